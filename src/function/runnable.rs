use std::fmt;
use std::sync::Arc;

use super::{Checked, catch_failure, raise};

/// Checked action without input or output.
#[derive(Clone)]
pub struct CheckedRunnable {
    body: Arc<dyn Fn() -> Checked<()> + Send + Sync>,
}

impl fmt::Debug for CheckedRunnable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckedRunnable").finish_non_exhaustive()
    }
}

impl CheckedRunnable {
    pub fn of<F>(f: F) -> Self
    where
        F: Fn() -> Checked<()> + Send + Sync + 'static,
    {
        Self { body: Arc::new(f) }
    }

    pub fn run(&self) -> Checked<()> {
        (self.body)()
    }

    pub fn and_then(&self, after: &CheckedRunnable) -> Self {
        let first = Arc::clone(&self.body);
        let second = Arc::clone(&after.body);
        Self::of(move || {
            first()?;
            second()
        })
    }

    /// Total view: `true` when the action completed without failure or panic.
    pub fn lift<F>(f: F) -> impl Fn() -> bool + Send + Sync + 'static
    where
        F: Fn() -> Checked<()> + Send + Sync + 'static,
    {
        move || catch_failure(&f).is_ok()
    }

    pub fn unchecked(&self) -> impl Fn() + Send + Sync + 'static {
        let body = Arc::clone(&self.body);
        move || {
            if let Err(failure) = body() {
                raise(failure)
            }
        }
    }
}
