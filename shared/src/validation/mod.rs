//! Request-input validation.
//!
//! A small declarative framework for validating raw request input, typically
//! strings pulled from query parameters.
//!
//! # Overview
//!
//! Three pieces cooperate:
//!
//! 1. **Step chains** ([`step`]) - an immutable chain of rule applications
//!    per field, evaluated lazily and stopping at the first failing rule.
//! 2. **Rules** ([`rules`]) - reusable combinators (parsing, range,
//!    equality, enum membership) that each wrap a chain in one more step.
//! 3. **The orchestrator** ([`Validator`]) - collects one binding per field,
//!    runs them all concurrently, and reports every field's failure in one
//!    aggregated error.
//!
//! # Usage
//!
//! ```ignore
//! use shared::validation::rules::{as_int, at_least, in_range};
//! use shared::validation::Validator;
//!
//! let mut validator = Validator::new();
//! let page_size = validator.register_optional("pageSize", page_size_param, |step| {
//!     in_range(as_int(step), 1..=200)
//! });
//! let page = validator.register_optional("page", page_param, |step| {
//!     at_least(as_int(step), 0)
//! });
//!
//! // Raises one ValidationFailed listing every failing field.
//! validator.run().await?;
//!
//! let page_size = page_size.value().unwrap_or(40);
//! let page = page.value().unwrap_or(0);
//! ```
//!
//! Handles are only readable after `run()` has returned; reading earlier is a
//! defect in the calling code and panics.

pub mod rules;
pub mod step;
pub mod validator;

pub use rules::AllowedOptions;
pub use validator::{Optional, Required, Validator};
