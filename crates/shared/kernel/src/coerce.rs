//! Coercion of raw params into declared scope types.
//!
//! All functions here are pure. An absent type tag means "no coercion": the raw
//! value is returned unchanged, whatever its variant.

use crate::error::{Result, ScopeError};
use chrono::{DateTime, NaiveDate};
use scopie_domain::{Param, ScopeType, TypeTag};

/// Values that coerce to `true` under the `boolean` type. Everything else is `false`.
const TRUE_STRINGS: [&str; 2] = ["true", "1"];

/// Date layouts tried in order. The first one that parses wins.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y%m%d",
    "%d.%m.%Y",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d %B %Y",
    "%d %b %Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%b %d, %Y",
    "%b %d %Y",
    "%a, %d %b %Y",
];

/// Coerces `raw` according to the declared type tag.
///
/// # Errors
/// Returns [`ScopeError::InvalidOption`] if the tag names no known type, and
/// [`ScopeError::Format`] if the value cannot be parsed into the type.
pub fn coerce(raw: &Param, tag: Option<&TypeTag>) -> Result<Param> {
    let Some(tag) = tag else {
        return Ok(raw.clone());
    };
    let kind = tag.scope_type().ok_or_else(|| ScopeError::InvalidOption {
        tag: tag.as_str().to_owned().into(),
        scope: None,
        context: None,
    })?;
    coerce_to(raw, kind)
}

/// Coerces `raw` into a known [`ScopeType`].
///
/// # Errors
/// Returns [`ScopeError::Format`] if the value cannot be parsed into `kind`.
pub fn coerce_to(raw: &Param, kind: ScopeType) -> Result<Param> {
    match kind {
        ScopeType::Boolean => Ok(Param::Bool(to_boolean(raw))),
        ScopeType::Integer => to_integer(raw).map(Param::Int),
        ScopeType::Float => to_float(raw).map(Param::Float),
        ScopeType::Date => to_date(raw).map(Param::Date),
    }
}

#[must_use]
pub fn to_boolean(raw: &Param) -> bool {
    match raw {
        Param::Bool(b) => *b,
        Param::Int(i) => *i == 1,
        Param::Str(s) => TRUE_STRINGS.contains(&s.as_str()),
        _ => false,
    }
}

/// Base-10 integer parse. Surrounding whitespace and `_` digit separators are
/// accepted; finite floats are truncated.
///
/// # Errors
/// Returns [`ScopeError::Format`] for anything that is not an integer literal.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn to_integer(raw: &Param) -> Result<i64> {
    match raw {
        Param::Int(i) => Ok(*i),
        Param::Float(x) if x.is_finite() && x.trunc() >= i64::MIN as f64 && x.trunc() < i64::MAX as f64 => {
            Ok(x.trunc() as i64)
        },
        Param::Str(s) => {
            let digits = strip_separators(s.trim())
                .ok_or_else(|| invalid(raw, ScopeType::Integer))?;
            digits.parse::<i64>().map_err(|_| invalid(raw, ScopeType::Integer))
        },
        _ => Err(invalid(raw, ScopeType::Integer)),
    }
}

/// Floating point parse of a numeric literal. Non-finite spellings (`NaN`, `inf`) are rejected.
///
/// # Errors
/// Returns [`ScopeError::Format`] for anything that is not a finite number.
#[allow(clippy::cast_precision_loss)]
pub fn to_float(raw: &Param) -> Result<f64> {
    match raw {
        Param::Float(x) => Ok(*x),
        Param::Int(i) => Ok(*i as f64),
        Param::Str(s) => strip_separators(s.trim())
            .and_then(|literal| literal.parse::<f64>().ok())
            .filter(|x| x.is_finite())
            .ok_or_else(|| invalid(raw, ScopeType::Float)),
        _ => Err(invalid(raw, ScopeType::Float)),
    }
}

/// Calendar date parse, trying the layouts in [`DATE_FORMATS`] and then RFC 3339.
///
/// # Errors
/// Returns [`ScopeError::Format`] when no layout matches.
pub fn to_date(raw: &Param) -> Result<NaiveDate> {
    match raw {
        Param::Date(date) => Ok(*date),
        Param::Str(s) => parse_date(s.trim()).ok_or_else(|| invalid(raw, ScopeType::Date)),
        _ => Err(invalid(raw, ScopeType::Date)),
    }
}

fn parse_date(input: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|layout| NaiveDate::parse_from_str(input, layout).ok())
        .or_else(|| DateTime::parse_from_rfc3339(input).ok().map(|dt| dt.date_naive()))
}

/// Drops `_` separators that sit between two digits; `None` if any other `_` is found.
fn strip_separators(literal: &str) -> Option<String> {
    if !literal.contains('_') {
        return Some(literal.to_owned());
    }
    let chars: Vec<char> = literal.chars().collect();
    let mut out = String::with_capacity(literal.len());
    for (idx, c) in chars.iter().enumerate() {
        if *c != '_' {
            out.push(*c);
            continue;
        }
        let between_digits = idx > 0
            && chars[idx - 1].is_ascii_digit()
            && chars.get(idx + 1).is_some_and(char::is_ascii_digit);
        if !between_digits {
            return None;
        }
    }
    Some(out)
}

fn invalid(raw: &Param, kind: ScopeType) -> ScopeError {
    ScopeError::format(format!("{} '{raw}' is not a valid {kind}", raw.kind()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> Param {
        Param::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn boolean_accepts_only_truthy_literals() {
        for truthy in [Param::Bool(true), "true".into(), "1".into(), Param::Int(1)] {
            assert_eq!(coerce_to(&truthy, ScopeType::Boolean).unwrap(), Param::Bool(true));
        }
        for falsy in [
            Param::Bool(false),
            "false".into(),
            "0".into(),
            "TRUE".into(),
            "yes".into(),
            Param::Int(0),
            Param::Int(2),
            Param::Null,
        ] {
            assert_eq!(coerce_to(&falsy, ScopeType::Boolean).unwrap(), Param::Bool(false));
        }
    }

    #[test]
    fn integer_parses_base_ten() {
        assert_eq!(to_integer(&"0".into()).unwrap(), 0);
        assert_eq!(to_integer(&" -42 ".into()).unwrap(), -42);
        assert_eq!(to_integer(&"+7".into()).unwrap(), 7);
        assert_eq!(to_integer(&"1_000".into()).unwrap(), 1000);
        assert_eq!(to_integer(&Param::Float(3.9)).unwrap(), 3);
        assert_eq!(to_integer(&Param::Int(5)).unwrap(), 5);
    }

    #[test]
    fn integer_rejects_garbage() {
        for bad in ["", "abc", "1.5", "1__0", "_1", "0x1A", "12abc"] {
            let err = to_integer(&bad.into()).unwrap_err();
            assert!(matches!(err, ScopeError::Format { .. }), "{bad:?} should not parse");
        }
        assert!(to_integer(&Param::Null).is_err());
        assert!(to_integer(&Param::Bool(true)).is_err());
        assert!(to_integer(&Param::Float(f64::NAN)).is_err());
    }

    #[test]
    fn float_parses_numeric_literals() {
        assert!((to_float(&"1.23".into()).unwrap() - 1.23).abs() < f64::EPSILON);
        assert!((to_float(&"0.101".into()).unwrap() - 0.101).abs() < f64::EPSILON);
        assert!((to_float(&"1e3".into()).unwrap() - 1000.0).abs() < f64::EPSILON);
        assert!((to_float(&Param::Int(2)).unwrap() - 2.0).abs() < f64::EPSILON);
        assert!(to_float(&"NaN".into()).is_err());
        assert!(to_float(&"inf".into()).is_err());
        assert!(to_float(&"one".into()).is_err());
        assert!(to_float(&Param::Null).is_err());
    }

    #[test]
    fn date_parses_common_layouts() {
        assert_eq!(coerce_to(&"2016-06-01".into(), ScopeType::Date).unwrap(), date(2016, 6, 1));
        assert_eq!(coerce_to(&"2016/06/01".into(), ScopeType::Date).unwrap(), date(2016, 6, 1));
        assert_eq!(coerce_to(&"20160601".into(), ScopeType::Date).unwrap(), date(2016, 6, 1));
        assert_eq!(coerce_to(&"01.06.2016".into(), ScopeType::Date).unwrap(), date(2016, 6, 1));
        assert_eq!(coerce_to(&"1 June 2016".into(), ScopeType::Date).unwrap(), date(2016, 6, 1));
        assert_eq!(coerce_to(&"Jun 1 2016".into(), ScopeType::Date).unwrap(), date(2016, 6, 1));
        assert_eq!(
            coerce_to(&"2016-06-01T10:00:00+02:00".into(), ScopeType::Date).unwrap(),
            date(2016, 6, 1)
        );
        assert!(coerce_to(&"not a date".into(), ScopeType::Date).is_err());
        assert!(coerce_to(&"2016-13-45".into(), ScopeType::Date).is_err());
    }

    #[test]
    fn absent_tag_passes_raw_through() {
        let raw = Param::from(vec!["a", "b"]);
        assert_eq!(coerce(&raw, None).unwrap(), raw);
        assert_eq!(coerce(&"0".into(), None).unwrap(), Param::from("0"));
    }

    #[test]
    fn unknown_tag_names_the_tag() {
        let err = coerce(&"x".into(), Some(&TypeTag::from("unknown"))).unwrap_err();
        assert!(matches!(&err, ScopeError::InvalidOption { tag, .. } if tag == "unknown"));
        assert_eq!(err.to_string(), "Unknown value for option 'type' provided: :unknown");
        assert_eq!(err.scope(), None);
    }

    proptest! {
        #[test]
        fn boolean_is_false_for_any_other_string(s in "\\PC*") {
            prop_assume!(s != "true" && s != "1");
            prop_assert_eq!(to_boolean(&Param::Str(s)), false);
        }

        #[test]
        fn integer_accepts_padded_decimal_literals(n in any::<i64>(), pad in 0usize..3) {
            let literal = format!("{}{n}{}", " ".repeat(pad), " ".repeat(pad));
            prop_assert_eq!(to_integer(&Param::Str(literal)).unwrap(), n);
        }
    }
}
