//! Where things are in a script.
//!
//! Spans come from the parser and are only ever copied into issues; the
//! checker never reads source text through them.

use std::fmt;

/// A run of bytes on one line of a script: 1-based `line` and `col`, and
/// the number of bytes covered.
///
/// Spans order by position, so the earlier of two spans compares less.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Span {
    pub line: u32,
    pub col: u32,
    pub len: u32,
}

impl Span {
    pub const fn new(line: u32, col: u32, len: u32) -> Self {
        Self { line, col, len }
    }

    /// Column one past the last covered byte.
    pub fn end_col(&self) -> u32 {
        self.col + self.len
    }

    /// Span from the start of the earlier of `self` and `other` to the end
    /// of the later one.
    ///
    /// A span can't cross lines. When the two sit on different lines the
    /// earlier one is returned unchanged.
    pub fn to(self, other: Span) -> Span {
        let (first, last) = if self <= other { (self, other) } else { (other, self) };
        if first.line != last.line {
            return first;
        }
        let end = first.end_col().max(last.end_col());
        Span::new(first.line, first.col, end - first.col)
    }
}

/// `line:col`, the form issues print.
impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_line_and_column() {
        assert_eq!(Span::new(3, 15, 5).to_string(), "3:15");
    }

    #[test]
    fn joins_on_one_line_in_either_order() {
        let name = Span::new(4, 5, 3);
        let length = Span::new(4, 10, 3);
        assert_eq!(name.to(length), Span::new(4, 5, 8));
        assert_eq!(length.to(name), Span::new(4, 5, 8));
    }

    #[test]
    fn nested_span_adds_nothing() {
        let outer = Span::new(1, 2, 20);
        assert_eq!(outer.to(Span::new(1, 6, 2)), outer);
    }

    #[test]
    fn different_lines_keep_the_earlier() {
        let first = Span::new(1, 5, 10);
        assert_eq!(Span::new(3, 1, 5).to(first), first);
    }
}
