//! Checked functions
//!
//! Function values whose body may fail with any error, plus the combinators
//! a plain closure cannot offer: lifting into total functions, recovery,
//! composition, currying, argument reversal and memoization.
//!
//! # Architecture
//! - `macros.rs`: generator shared by every arity (`CheckedFunction0..4`)
//! - `arity.rs`: per-arity combinators (memoization, currying, composition)
//! - `memo.rs`: per-key single-flight result cache
//! - `predicate.rs`, `consumer.rs`, `runnable.rs`: single-purpose shapes
//!
//! Failures are carried as [`Failure`] (`anyhow::Error`). A panic inside a
//! body is the equivalent of an unchecked failure: `lift` and `lift_try`
//! capture it, every other combinator lets it unwind.

mod arity;
mod consumer;
mod macros;
mod memo;
mod predicate;
mod runnable;

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use crate::errors::CommonsError;

pub use arity::{
    CheckedFunction0, CheckedFunction1, CheckedFunction2, CheckedFunction3, CheckedFunction4,
};
pub use consumer::CheckedConsumer;
pub use memo::Memo;
pub use predicate::CheckedPredicate;
pub use runnable::CheckedRunnable;

/// Any failure a checked body may produce.
pub type Failure = anyhow::Error;

/// Result of invoking a checked body.
pub type Checked<R> = std::result::Result<R, Failure>;

/// Panic payload raised by the `unchecked()` adapters.
///
/// Code that calls an unchecked adapter and wants the original failure back
/// catches the unwind and downcasts the payload to this type.
#[derive(Debug)]
pub struct UncheckedFailure(pub Failure);

impl UncheckedFailure {
    pub fn failure(&self) -> &Failure {
        &self.0
    }

    pub fn into_inner(self) -> Failure {
        self.0
    }

    /// Recovers the carried failure from a payload returned by
    /// `std::panic::catch_unwind`. Foreign payloads are handed back untouched.
    pub fn from_payload(payload: Box<dyn Any + Send>) -> Result<Failure, Box<dyn Any + Send>> {
        payload
            .downcast::<UncheckedFailure>()
            .map(|unchecked| unchecked.into_inner())
    }
}

impl fmt::Display for UncheckedFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unchecked failure: {:#}", self.0)
    }
}

/// Runs `body`, turning a panic into a `Failure`.
///
/// An `UncheckedFailure` payload yields the failure it carries, so an
/// unchecked adapter nested inside a lifted function round-trips cleanly.
pub(crate) fn catch_failure<R, F>(body: F) -> Checked<R>
where
    F: FnOnce() -> Checked<R>,
{
    match panic::catch_unwind(AssertUnwindSafe(body)) {
        Ok(result) => result,
        Err(payload) => Err(payload_to_failure(payload)),
    }
}

fn payload_to_failure(payload: Box<dyn Any + Send>) -> Failure {
    match UncheckedFailure::from_payload(payload) {
        Ok(failure) => failure,
        Err(payload) => {
            let message = if let Some(s) = payload.downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = payload.downcast_ref::<String>() {
                s.clone()
            } else {
                "Unknown panic".to_string()
            };
            CommonsError::panicked(message).into()
        }
    }
}

/// Re-raises a failure as an unwinding panic carrying `UncheckedFailure`.
pub(crate) fn raise(failure: Failure) -> ! {
    panic::panic_any(UncheckedFailure(failure))
}
