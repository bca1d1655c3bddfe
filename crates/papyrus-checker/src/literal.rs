//! Literal parsing.
//!
//! Literals reach the checker in their source spelling. Each kind has its
//! own grammar:
//!
//! | Kind | Accepted |
//! |------|----------|
//! | Bool | `true`, `false` in any case |
//! | Int | `-`? then decimal digits fitting `i32`, or `0x` and up to 8 hex digits |
//! | Float | `-`? digits with optional fraction and exponent, finite `f32` |
//! | String | `"..."` with `\n`, `\t`, `\\`, `\"` escapes |
//! | None | `none`, which has no value |

use ordered_float::OrderedFloat;
use papyrus_core::{LiteralError, Span, Value};
use papyrus_syntax::{LiteralExpr, LiteralKind};

/// Parse a literal node. `Ok(None)` for the `none` literal.
pub fn parse_literal(literal: &LiteralExpr<'_>) -> Result<Option<Value>, LiteralError> {
    let text = literal.text;
    let span = literal.span;
    match literal.kind {
        LiteralKind::Bool => parse_bool(text, span).map(|v| Some(Value::Bool(v))),
        LiteralKind::Int => parse_int(text, span).map(|v| Some(Value::Int(v))),
        LiteralKind::Float => parse_float(text, span).map(|v| Some(Value::Float(OrderedFloat(v)))),
        LiteralKind::String => parse_string(text, span).map(|v| Some(Value::String(v))),
        LiteralKind::None => Ok(None),
    }
}

pub fn parse_bool(text: &str, span: Span) -> Result<bool, LiteralError> {
    if text.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if text.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(LiteralError::Bool {
            text: text.to_owned(),
            span,
        })
    }
}

pub fn parse_int(text: &str, span: Span) -> Result<i32, LiteralError> {
    let error = || LiteralError::Int {
        text: text.to_owned(),
        span,
    };
    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };

    if let Some(hex) = body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
        if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(error());
        }
        // 32 raw bits, so 0xFFFFFFFF is -1
        let bits = u32::from_str_radix(hex, 16).map_err(|_| error())? as i32;
        return Ok(if negative { bits.wrapping_neg() } else { bits });
    }

    if body.is_empty() || !body.bytes().all(|b| b.is_ascii_digit()) {
        return Err(error());
    }
    text.parse::<i32>().map_err(|_| error())
}

pub fn parse_float(text: &str, span: Span) -> Result<f32, LiteralError> {
    let error = || LiteralError::Float {
        text: text.to_owned(),
        span,
    };
    let body = text.strip_prefix('-').unwrap_or(text);
    let well_formed = body.starts_with(|c: char| c.is_ascii_digit() || c == '.')
        && body
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if !well_formed {
        return Err(error());
    }
    match text.parse::<f32>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(error()),
    }
}

pub fn parse_string(text: &str, span: Span) -> Result<String, LiteralError> {
    let error = || LiteralError::String {
        text: text.to_owned(),
        span,
    };
    let inner = text
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .ok_or_else(error)?;

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('\\') => out.push('\\'),
                Some('"') => out.push('"'),
                _ => return Err(error()),
            },
            '"' => return Err(error()),
            c => out.push(c),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span() -> Span {
        Span::new(1, 1, 1)
    }

    #[test]
    fn bools() {
        assert!(parse_bool("TRUE", span()).unwrap());
        assert!(!parse_bool("False", span()).unwrap());
        let err = parse_bool("True1", span()).unwrap_err();
        assert_eq!(err.id(), "SEMA3001");
    }

    #[test]
    fn decimal_ints() {
        assert_eq!(parse_int("42", span()).unwrap(), 42);
        assert_eq!(parse_int("-7", span()).unwrap(), -7);
        assert_eq!(parse_int("2147483647", span()).unwrap(), i32::MAX);
        assert!(parse_int("2147483648", span()).is_err());
        assert!(parse_int("+5", span()).is_err());
        assert!(parse_int("", span()).is_err());
        assert!(parse_int("12a", span()).is_err());
    }

    #[test]
    fn hex_ints() {
        assert_eq!(parse_int("0x1A", span()).unwrap(), 26);
        assert_eq!(parse_int("0X1a", span()).unwrap(), 26);
        assert_eq!(parse_int("0xFFFFFFFF", span()).unwrap(), -1);
        assert_eq!(parse_int("-0x10", span()).unwrap(), -16);
        assert!(parse_int("0x", span()).is_err());
        assert!(parse_int("0x1FFFFFFFF", span()).is_err());
        assert!(parse_int("0xG", span()).is_err());
    }

    #[test]
    fn floats() {
        assert_eq!(parse_float("3.14", span()).unwrap(), 3.14_f32);
        assert_eq!(parse_float("-0.5", span()).unwrap(), -0.5);
        assert_eq!(parse_float("1e3", span()).unwrap(), 1000.0);
        assert_eq!(parse_float("5", span()).unwrap(), 5.0);
        assert!(parse_float("inf", span()).is_err());
        assert!(parse_float("NaN", span()).is_err());
        assert!(parse_float("1e99", span()).is_err());
        assert!(parse_float("1.2.3", span()).is_err());
    }

    #[test]
    fn strings() {
        assert_eq!(parse_string(r#""hello""#, span()).unwrap(), "hello");
        assert_eq!(
            parse_string(r#""a\tb\n\"c\"\\""#, span()).unwrap(),
            "a\tb\n\"c\"\\"
        );
        assert_eq!(parse_string(r#""""#, span()).unwrap(), "");
        assert!(parse_string("hello", span()).is_err());
        assert!(parse_string(r#""bad\q""#, span()).is_err());
        assert!(parse_string(r#""a"b""#, span()).is_err());
        assert!(parse_string(r#"""#, span()).is_err());
    }
}
