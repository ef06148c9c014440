use thiserror::Error;

/// One rule (or the required/absent check) failed for one field.
///
/// The message names the field, the violated constraint, and the offending
/// raw value, e.g. `pageSize must be in range 1..200, but instead was: '250'`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RuleFailed {
    message: String,
}

impl RuleFailed {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// The only error that escapes [`Validator::run`](crate::validation::Validator::run):
/// every per-field failure from one run, in registration order, so callers see
/// all problems in one pass instead of just the first.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validation failed for {} field(s)", .failures.len())]
pub struct ValidationFailed {
    failures: Vec<RuleFailed>,
}

impl ValidationFailed {
    pub fn new(failures: Vec<RuleFailed>) -> Self {
        Self { failures }
    }

    pub fn failures(&self) -> &[RuleFailed] {
        &self.failures
    }

    pub fn into_messages(self) -> Vec<String> {
        self.failures.into_iter().map(|f| f.message).collect()
    }
}
