//! Reusable rule combinators.
//!
//! Each combinator consumes an existing chain and returns a new chain that
//! applies one more rule, so a field's checks compose by plain function
//! nesting: `in_range(as_int(step), 1..=200)` parses, then range-checks.
//! Hints are fixed per combinator and end up in the failure message.

use std::fmt::Display;
use std::ops::RangeInclusive;
use std::str::FromStr;

use super::step::{BoxedStep, Part, RuleOutcome};

/// Enum membership table for [`entry_in`]: the lowercased member names and
/// the reverse lookup. Implemented by domain enums that may appear as raw
/// request input.
pub trait AllowedOptions: Sized + Send + Sync {
    /// Lowercased member names, in declaration order.
    const OPTIONS: &'static [&'static str];

    /// Resolve an already-lowercased name back to a member.
    fn from_option(name: &str) -> Option<Self>;
}

pub fn at_least<T>(step: BoxedStep<T>, min: T) -> BoxedStep<T>
where
    T: PartialOrd + Clone + Display + Send + Sync + 'static,
{
    Part::new(format!("must be at least {min}"), step, move |value| {
        if value >= min {
            RuleOutcome::Pass(value)
        } else {
            RuleOutcome::Fail
        }
    })
}

pub fn at_most<T>(step: BoxedStep<T>, max: T) -> BoxedStep<T>
where
    T: PartialOrd + Clone + Display + Send + Sync + 'static,
{
    Part::new(format!("must be at most {max}"), step, move |value| {
        if value <= max {
            RuleOutcome::Pass(value)
        } else {
            RuleOutcome::Fail
        }
    })
}

/// Inclusive on both ends.
pub fn in_range<T>(step: BoxedStep<T>, range: RangeInclusive<T>) -> BoxedStep<T>
where
    T: PartialOrd + Clone + Display + Send + Sync + 'static,
{
    let hint = format!("must be in range {}..{}", range.start(), range.end());
    Part::new(hint, step, move |value| {
        if range.contains(&value) {
            RuleOutcome::Pass(value)
        } else {
            RuleOutcome::Fail
        }
    })
}

pub fn matches(
    step: BoxedStep<String>,
    expected: impl Into<String>,
    ignore_case: bool,
) -> BoxedStep<String> {
    let expected = expected.into();
    let mut hint = format!("must match '{expected}'");
    if ignore_case {
        hint.push_str(" ignoring case");
    }
    Part::new(hint, step, move |value: String| {
        let equal = if ignore_case {
            value.to_lowercase() == expected.to_lowercase()
        } else {
            value == expected
        };
        if equal {
            RuleOutcome::Pass(value)
        } else {
            RuleOutcome::Fail
        }
    })
}

fn parsed<R>(step: BoxedStep<String>, hint: &str) -> BoxedStep<R>
where
    R: FromStr + Send + Sync + 'static,
{
    // str::parse rejects residue, so partial numeric input fails outright.
    Part::new(hint, step, |value: String| match value.parse::<R>() {
        Ok(parsed) => RuleOutcome::Pass(parsed),
        Err(_) => RuleOutcome::Fail,
    })
}

pub fn as_int(step: BoxedStep<String>) -> BoxedStep<i32> {
    parsed(step, "must be an integer")
}

pub fn as_long(step: BoxedStep<String>) -> BoxedStep<i64> {
    parsed(step, "must be an long")
}

pub fn as_float(step: BoxedStep<String>) -> BoxedStep<f32> {
    parsed(step, "must be an float")
}

pub fn as_double(step: BoxedStep<String>) -> BoxedStep<f64> {
    parsed(step, "must be a double")
}

/// Strict boolean literal, case-insensitive: only "true" and "false" pass.
pub fn as_boolean(step: BoxedStep<String>) -> BoxedStep<bool> {
    Part::new(
        "must be a boolean",
        step,
        |value: String| match value.to_lowercase().as_str() {
            "true" => RuleOutcome::Pass(true),
            "false" => RuleOutcome::Pass(false),
            _ => RuleOutcome::Fail,
        },
    )
}

/// Membership in an enum: the input, lowercased, must equal one of the
/// lowercased member names.
pub fn entry_in<E>(step: BoxedStep<String>) -> BoxedStep<E>
where
    E: AllowedOptions + 'static,
{
    let hint = format!("is not a part of allowed options {:?}", E::OPTIONS);
    Part::new(hint, step, |value: String| {
        match E::from_option(&value.to_lowercase()) {
            Some(entry) => RuleOutcome::Pass(entry),
            None => RuleOutcome::Fail,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::step::{start, Step};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Flavor {
        Sweet,
        Sour,
    }

    impl AllowedOptions for Flavor {
        const OPTIONS: &'static [&'static str] = &["sweet", "sour"];

        fn from_option(name: &str) -> Option<Self> {
            match name {
                "sweet" => Some(Flavor::Sweet),
                "sour" => Some(Flavor::Sour),
                _ => None,
            }
        }
    }

    #[tokio::test]
    async fn test_at_least_boundary_passes() {
        assert_eq!(at_least(start(5), 5).evaluate("n").await.unwrap(), 5);
        assert!(at_least(start(4), 5).evaluate("n").await.is_err());
    }

    #[tokio::test]
    async fn test_at_most_boundary_passes() {
        assert_eq!(at_most(start(5), 5).evaluate("n").await.unwrap(), 5);
        assert!(at_most(start(6), 5).evaluate("n").await.is_err());
    }

    #[tokio::test]
    async fn test_in_range_is_inclusive() {
        for value in [1, 100, 200] {
            assert_eq!(
                in_range(start(value), 1..=200).evaluate("n").await.unwrap(),
                value
            );
        }
        for value in [0, 201] {
            assert!(in_range(start(value), 1..=200).evaluate("n").await.is_err());
        }
    }

    #[tokio::test]
    async fn test_in_range_hint_mentions_bounds() {
        let err = in_range(start(250), 1..=200)
            .evaluate("pageSize")
            .await
            .unwrap_err();
        assert_eq!(
            err.message(),
            "pageSize must be in range 1..200, but instead was: '250'"
        );
    }

    #[tokio::test]
    async fn test_matches_case_sensitive() {
        assert!(matches(start("abc".to_string()), "abc", false)
            .evaluate("s")
            .await
            .is_ok());
        assert!(matches(start("ABC".to_string()), "abc", false)
            .evaluate("s")
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_matches_ignoring_case() {
        assert!(matches(start("ABC".to_string()), "abc", true)
            .evaluate("s")
            .await
            .is_ok());
        let err = matches(start("xyz".to_string()), "abc", true)
            .evaluate("s")
            .await
            .unwrap_err();
        assert_eq!(err.message(), "s must match 'abc' ignoring case, but instead was: 'xyz'");
    }

    #[tokio::test]
    async fn test_as_int_round_trips_formatted_integers() {
        for n in [i32::MIN, -1, 0, 40, i32::MAX] {
            let parsed = as_int(start(n.to_string())).evaluate("n").await.unwrap();
            assert_eq!(parsed, n);
        }
    }

    #[tokio::test]
    async fn test_as_int_rejects_malformed_input() {
        for raw in ["", "abc", "4.2", "40x", " 40"] {
            let err = as_int(start(raw.to_string())).evaluate("n").await.unwrap_err();
            assert!(err.message().contains("must be an integer"), "{raw}");
        }
    }

    #[tokio::test]
    async fn test_as_long_parses_beyond_i32() {
        let raw = (i64::from(i32::MAX) + 1).to_string();
        let parsed = as_long(start(raw)).evaluate("n").await.unwrap();
        assert_eq!(parsed, i64::from(i32::MAX) + 1);
    }

    #[tokio::test]
    async fn test_as_double_parses_decimals() {
        let parsed = as_double(start("2.5".to_string())).evaluate("n").await.unwrap();
        assert_eq!(parsed, 2.5);
        assert!(as_double(start("nope".to_string())).evaluate("n").await.is_err());
    }

    #[tokio::test]
    async fn test_as_boolean_is_strict_but_case_insensitive() {
        assert!(as_boolean(start("TRUE".to_string())).evaluate("b").await.unwrap());
        assert!(!as_boolean(start("false".to_string())).evaluate("b").await.unwrap());
        for raw in ["1", "yes", "truthy", ""] {
            assert!(as_boolean(start(raw.to_string())).evaluate("b").await.is_err());
        }
    }

    #[tokio::test]
    async fn test_entry_in_lowercases_input() {
        for raw in ["sweet", "SWEET", "Sweet"] {
            let entry: Flavor = entry_in(start(raw.to_string())).evaluate("f").await.unwrap();
            assert_eq!(entry, Flavor::Sweet);
        }
    }

    #[tokio::test]
    async fn test_entry_in_lists_allowed_options() {
        let err = entry_in::<Flavor>(start("bogus".to_string()))
            .evaluate("flavor")
            .await
            .unwrap_err();
        assert_eq!(
            err.message(),
            "flavor is not a part of allowed options [\"sweet\", \"sour\"], but instead was: 'bogus'"
        );
    }

    #[tokio::test]
    async fn test_chained_parse_then_range() {
        let step = in_range(as_int(start("40".to_string())), 1..=200);
        assert_eq!(step.evaluate("pageSize").await.unwrap(), 40);

        // Parse failure short-circuits before the range rule.
        let err = in_range(as_int(start("many".to_string())), 1..=200)
            .evaluate("pageSize")
            .await
            .unwrap_err();
        assert_eq!(
            err.message(),
            "pageSize must be an integer, but instead was: 'many'"
        );
    }
}
