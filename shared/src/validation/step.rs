//! Lazily-evaluated step chains.
//!
//! A chain is built once per field: a [`Start`] wrapping the raw input,
//! followed by zero or more [`Part`]s, each applying one rule to its
//! predecessor's result. Evaluation walks the chain from the start; the first
//! failing rule produces a [`RuleFailed`] and nothing after it runs.

use std::fmt::Display;

use async_trait::async_trait;

use crate::error::RuleFailed;

/// Result of applying one rule to a value.
pub enum RuleOutcome<R> {
    Pass(R),
    Fail,
}

/// One node of a field's chain, producing a value (possibly of a different
/// type than its input) or a typed failure when evaluated against the field
/// name.
///
/// Evaluation is async so a step may suspend, e.g. for an external uniqueness
/// check. The built-in rules are pure and never do.
#[async_trait]
pub trait Step<R>: Send + Sync {
    async fn evaluate(&self, field: &str) -> Result<R, RuleFailed>;
}

pub type BoxedStep<R> = Box<dyn Step<R>>;

/// The head of every chain: holds the raw input and always succeeds.
struct Start<T> {
    input: T,
}

#[async_trait]
impl<T> Step<T> for Start<T>
where
    T: Clone + Send + Sync,
{
    async fn evaluate(&self, _field: &str) -> Result<T, RuleFailed> {
        Ok(self.input.clone())
    }
}

/// Wrap a raw input value as the start of a chain.
pub fn start<T>(input: T) -> BoxedStep<T>
where
    T: Clone + Send + Sync + 'static,
{
    Box::new(Start { input })
}

/// A rule application: holds a failure hint, exactly one predecessor step,
/// and the rule itself.
pub struct Part<T, R> {
    hint: String,
    previous: BoxedStep<T>,
    rule: Box<dyn Fn(T) -> RuleOutcome<R> + Send + Sync>,
}

impl<T, R> Part<T, R>
where
    T: Clone + Display + Send + Sync + 'static,
    R: Send + Sync + 'static,
{
    pub fn new(
        hint: impl Into<String>,
        previous: BoxedStep<T>,
        rule: impl Fn(T) -> RuleOutcome<R> + Send + Sync + 'static,
    ) -> BoxedStep<R> {
        Box::new(Self {
            hint: hint.into(),
            previous,
            rule: Box::new(rule),
        })
    }
}

#[async_trait]
impl<T, R> Step<R> for Part<T, R>
where
    T: Clone + Display + Send + Sync,
    R: Send + Sync,
{
    async fn evaluate(&self, field: &str) -> Result<R, RuleFailed> {
        // A predecessor failure propagates as-is; this rule never runs.
        let input = self.previous.evaluate(field).await?;
        match (self.rule)(input.clone()) {
            RuleOutcome::Pass(value) => Ok(value),
            RuleOutcome::Fail => Err(RuleFailed::new(format!(
                "{field} {hint}, but instead was: '{input}'",
                hint = self.hint,
            ))),
        }
    }
}
