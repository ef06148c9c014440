//! Field bindings and the per-request orchestrator.
//!
//! A handler creates one [`Validator`] per request, registers one binding per
//! input field, and calls [`Validator::run`]. Every binding executes as its
//! own task; the run joins all of them and either returns normally (all
//! handles readable) or raises one [`ValidationFailed`] carrying every
//! field's failure.

use std::fmt::Display;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, OnceLock};

use crate::error::{RuleFailed, ValidationFailed};

use super::step::{start, BoxedStep, Step as _};

type BindingTask = Pin<Box<dyn Future<Output = Option<RuleFailed>> + Send>>;

/// Handle for a required field: readable once the run has completed.
pub struct Required<R> {
    field: &'static str,
    slot: Arc<OnceLock<R>>,
}

impl<R: Clone> Required<R> {
    /// The validated value.
    ///
    /// Panics if the owning [`Validator`] has not completed its run — that is
    /// a contract violation by the calling code, not a user input problem,
    /// and must never return a default instead.
    pub fn value(&self) -> R {
        match self.slot.get() {
            Some(value) => value.clone(),
            None => panic!(
                "field '{}' was read before Validator::run completed",
                self.field
            ),
        }
    }
}

/// Handle for an optional field: absent input reads as `None`.
pub struct Optional<R> {
    field: &'static str,
    slot: Arc<OnceLock<Option<R>>>,
}

impl<R: Clone> Optional<R> {
    /// The validated value, or `None` when the input was absent.
    ///
    /// Panics if the owning [`Validator`] has not completed its run.
    pub fn value(&self) -> Option<R> {
        match self.slot.get() {
            Some(value) => value.clone(),
            None => panic!(
                "field '{}' was read before Validator::run completed",
                self.field
            ),
        }
    }
}

/// Collects the bindings registered while handling one request. Single-use:
/// [`Validator::run`] consumes it, so nothing can be registered afterwards.
#[derive(Default)]
pub struct Validator {
    bindings: Vec<(&'static str, BindingTask)>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a field whose input must be present: absent input fails with
    /// `"<field> should not be null"` and the chain is never built.
    pub fn register_required<T, R, F>(
        &mut self,
        field: &'static str,
        input: Option<T>,
        build: F,
    ) -> Required<R>
    where
        T: Clone + Display + Send + Sync + 'static,
        R: Clone + Send + Sync + 'static,
        F: FnOnce(BoxedStep<T>) -> BoxedStep<R> + Send + 'static,
    {
        let slot = Arc::new(OnceLock::new());
        let task_slot = Arc::clone(&slot);
        self.bindings.push((
            field,
            Box::pin(async move {
                let Some(input) = input else {
                    return Some(RuleFailed::new(format!("{field} should not be null")));
                };
                match build(start(input)).evaluate(field).await {
                    Ok(value) => {
                        // Each slot is written once, by this task only.
                        let _ = task_slot.set(value);
                        None
                    }
                    Err(failure) => Some(failure),
                }
            }),
        ));
        Required { field, slot }
    }

    /// Register a field whose input may be absent: absent input short-circuits
    /// to an absent result with no failure and no chain evaluation.
    pub fn register_optional<T, R, F>(
        &mut self,
        field: &'static str,
        input: Option<T>,
        build: F,
    ) -> Optional<R>
    where
        T: Clone + Display + Send + Sync + 'static,
        R: Clone + Send + Sync + 'static,
        F: FnOnce(BoxedStep<T>) -> BoxedStep<R> + Send + 'static,
    {
        let slot = Arc::new(OnceLock::new());
        let task_slot = Arc::clone(&slot);
        self.bindings.push((
            field,
            Box::pin(async move {
                let Some(input) = input else {
                    let _ = task_slot.set(None);
                    return None;
                };
                match build(start(input)).evaluate(field).await {
                    Ok(value) => {
                        let _ = task_slot.set(Some(value));
                        None
                    }
                    Err(failure) => Some(failure),
                }
            }),
        ));
        Optional { field, slot }
    }

    /// Execute every binding and aggregate the failures.
    ///
    /// Bindings are independent of each other by contract, so each runs as
    /// its own task. The join handles are awaited in registration order,
    /// which makes the aggregated failure list deterministic even though the
    /// tasks complete in any order. A panicking binding is converted into a
    /// failure entry rather than unwinding out of the run.
    pub async fn run(self) -> Result<(), ValidationFailed> {
        let tasks: Vec<_> = self
            .bindings
            .into_iter()
            .map(|(field, task)| (field, tokio::spawn(task)))
            .collect();

        let mut failures = Vec::new();
        for (field, task) in tasks {
            match task.await {
                Ok(Some(failure)) => failures.push(failure),
                Ok(None) => {}
                Err(_) => failures.push(RuleFailed::new(format!(
                    "{field} validation panicked before completing"
                ))),
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(ValidationFailed::new(failures))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::*;
    use crate::validation::rules::{as_int, at_least, in_range};
    use crate::validation::step::{Part, RuleOutcome};

    #[tokio::test]
    async fn test_all_valid_fields_become_readable() {
        let mut validator = Validator::new();
        let page_size = validator.register_optional("pageSize", Some("40".to_string()), |step| {
            in_range(as_int(step), 1..=200)
        });
        let page = validator.register_required("page", Some("0".to_string()), |step| {
            at_least(as_int(step), 0)
        });

        validator.run().await.unwrap();

        assert_eq!(page_size.value(), Some(40));
        assert_eq!(page.value(), 0);
    }

    #[tokio::test]
    async fn test_required_absent_fails_without_building_chain() {
        let built = Arc::new(AtomicBool::new(false));
        let witness = Arc::clone(&built);

        let mut validator = Validator::new();
        let _handle = validator.register_required("page", None::<String>, move |step| {
            witness.store(true, Ordering::SeqCst);
            as_int(step)
        });

        let error = validator.run().await.unwrap_err();
        assert_eq!(error.failures().len(), 1);
        assert_eq!(error.failures()[0].message(), "page should not be null");
        assert!(!built.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_optional_absent_reads_as_none() {
        let built = Arc::new(AtomicBool::new(false));
        let witness = Arc::clone(&built);

        let mut validator = Validator::new();
        let handle = validator.register_optional("page", None::<String>, move |step| {
            witness.store(true, Ordering::SeqCst);
            as_int(step)
        });

        validator.run().await.unwrap();
        assert_eq!(handle.value(), None);
        assert!(!built.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_aggregates_exactly_the_failing_bindings() {
        let mut validator = Validator::new();
        let _a = validator.register_optional("a", Some("x".to_string()), as_int);
        let _b = validator.register_optional("b", Some("2".to_string()), as_int);
        let _c = validator.register_required("c", None::<String>, as_int);

        let error = validator.run().await.unwrap_err();
        assert_eq!(error.failures().len(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_failures_arrive_in_registration_order() {
        let mut validator = Validator::new();
        // The first binding sleeps so it completes last.
        let _slow = validator.register_optional("slow", Some("x".to_string()), |step| {
            Part::new("must be an integer", step, |_: String| {
                std::thread::sleep(std::time::Duration::from_millis(50));
                RuleOutcome::<i32>::Fail
            })
        });
        let _fast = validator.register_optional("fast", Some("y".to_string()), as_int);

        let error = validator.run().await.unwrap_err();
        let messages: Vec<_> = error.into_messages();
        assert!(messages[0].starts_with("slow "));
        assert!(messages[1].starts_with("fast "));
    }

    #[tokio::test]
    async fn test_panicking_binding_becomes_a_failure() {
        let mut validator = Validator::new();
        let _bad = validator.register_optional("bad", Some("x".to_string()), |step| {
            Part::new("hint", step, |_: String| -> RuleOutcome<i32> {
                panic!("rule blew up")
            })
        });
        let good = validator.register_optional("good", Some("1".to_string()), as_int);

        let error = validator.run().await.unwrap_err();
        assert_eq!(error.failures().len(), 1);
        assert!(error.failures()[0].message().contains("bad"));
        assert_eq!(good.value(), Some(1));
    }

    #[tokio::test]
    #[should_panic(expected = "read before Validator::run")]
    async fn test_reading_before_run_is_a_defect() {
        let mut validator = Validator::new();
        let handle = validator.register_optional("page", Some("0".to_string()), as_int);
        let _ = handle.value();
    }
}
