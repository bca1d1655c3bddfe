//! Checker configuration.

/// Default upper bound for `new T[n]`.
pub const DEFAULT_MAX_ARRAY_LENGTH: u32 = 128;

/// Switches for the checks that go beyond name and type resolution.
///
/// `Default` enables everything.
///
/// ```
/// use papyrus_checker::CheckOptions;
///
/// let options = CheckOptions::default().with_max_array_length(64);
/// assert!(options.validate_operators);
/// assert_eq!(options.max_array_length, 64);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckOptions {
    /// Validate binary operators, calls, assignments and returns. When off,
    /// operand and argument types are recorded but never compared.
    pub validate_operators: bool,
    /// Require array lengths to lie in `1..=max_array_length`.
    pub enforce_array_bounds: bool,
    pub max_array_length: u32,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            validate_operators: true,
            enforce_array_bounds: true,
            max_array_length: DEFAULT_MAX_ARRAY_LENGTH,
        }
    }
}

impl CheckOptions {
    /// Resolution and typing only.
    pub fn lenient() -> Self {
        Self {
            validate_operators: false,
            enforce_array_bounds: false,
            ..Self::default()
        }
    }

    pub fn with_validate_operators(mut self, enabled: bool) -> Self {
        self.validate_operators = enabled;
        self
    }

    pub fn with_enforce_array_bounds(mut self, enabled: bool) -> Self {
        self.enforce_array_bounds = enabled;
        self
    }

    pub fn with_max_array_length(mut self, max: u32) -> Self {
        self.max_array_length = max;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_enable_everything() {
        let options = CheckOptions::default();
        assert!(options.validate_operators);
        assert!(options.enforce_array_bounds);
        assert_eq!(options.max_array_length, 128);
    }

    #[test]
    fn lenient_keeps_bound_value() {
        let options = CheckOptions::lenient();
        assert!(!options.validate_operators);
        assert!(!options.enforce_array_bounds);
        assert_eq!(options.max_array_length, DEFAULT_MAX_ARRAY_LENGTH);
    }
}
