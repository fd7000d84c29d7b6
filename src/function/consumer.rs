use std::fmt;
use std::sync::Arc;

use super::{Checked, catch_failure, raise};

/// Checked side-effecting operation over a value.
pub struct CheckedConsumer<T> {
    body: Arc<dyn Fn(T) -> Checked<()> + Send + Sync>,
}

impl<T> Clone for CheckedConsumer<T> {
    fn clone(&self) -> Self {
        Self {
            body: Arc::clone(&self.body),
        }
    }
}

impl<T> fmt::Debug for CheckedConsumer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckedConsumer").finish_non_exhaustive()
    }
}

impl<T: 'static> CheckedConsumer<T> {
    pub fn of<F>(f: F) -> Self
    where
        F: Fn(T) -> Checked<()> + Send + Sync + 'static,
    {
        Self { body: Arc::new(f) }
    }

    pub fn accept(&self, value: T) -> Checked<()> {
        (self.body)(value)
    }

    /// Runs this consumer, then `after`, on clones of the same value. A
    /// failure in the first stage skips the second.
    pub fn and_then(&self, after: &CheckedConsumer<T>) -> Self
    where
        T: Clone,
    {
        let first = Arc::clone(&self.body);
        let second = Arc::clone(&after.body);
        Self::of(move |value: T| {
            first(value.clone())?;
            second(value)
        })
    }

    /// Total view: `true` when the value was accepted without failure or panic.
    pub fn lift<F>(f: F) -> impl Fn(T) -> bool + Send + Sync + 'static
    where
        F: Fn(T) -> Checked<()> + Send + Sync + 'static,
    {
        move |value: T| {
            let f = &f;
            catch_failure(move || f(value)).is_ok()
        }
    }

    pub fn unchecked(&self) -> impl Fn(T) + Send + Sync + 'static {
        let body = Arc::clone(&self.body);
        move |value: T| {
            if let Err(failure) = body(value) {
                raise(failure)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[test]
    fn test_and_then_runs_in_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let first_log = Arc::clone(&log);
        let second_log = Arc::clone(&log);

        let first = CheckedConsumer::of(move |v: u32| {
            first_log.lock().push(format!("first:{v}"));
            Ok(())
        });
        let second = CheckedConsumer::of(move |v: u32| {
            second_log.lock().push(format!("second:{v}"));
            Ok(())
        });

        first.and_then(&second).accept(5).unwrap();
        assert_eq!(*log.lock(), vec!["first:5", "second:5"]);
    }

    #[test]
    fn test_failure_skips_second_stage() {
        let ran = Arc::new(Mutex::new(false));
        let flag = Arc::clone(&ran);
        let failing = CheckedConsumer::of(|_: u32| Err(anyhow::anyhow!("disk full")));
        let second = CheckedConsumer::of(move |_: u32| {
            *flag.lock() = true;
            Ok(())
        });

        assert!(failing.and_then(&second).accept(1).is_err());
        assert!(!*ran.lock());
    }

    #[test]
    fn test_lift() {
        let lifted = CheckedConsumer::lift(|v: i32| {
            if v < 0 {
                anyhow::bail!("negative");
            }
            Ok(())
        });
        assert!(lifted(1));
        assert!(!lifted(-1));
    }
}
