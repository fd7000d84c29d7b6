use std::fmt;
use std::sync::Arc;

use super::{Checked, catch_failure, raise};

/// Checked test over a borrowed value.
pub struct CheckedPredicate<T: ?Sized> {
    body: Arc<dyn Fn(&T) -> Checked<bool> + Send + Sync>,
}

impl<T: ?Sized> Clone for CheckedPredicate<T> {
    fn clone(&self) -> Self {
        Self {
            body: Arc::clone(&self.body),
        }
    }
}

impl<T: ?Sized> fmt::Debug for CheckedPredicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckedPredicate").finish_non_exhaustive()
    }
}

impl<T: ?Sized + 'static> CheckedPredicate<T> {
    pub fn of<F>(f: F) -> Self
    where
        F: Fn(&T) -> Checked<bool> + Send + Sync + 'static,
    {
        Self { body: Arc::new(f) }
    }

    pub fn test(&self, value: &T) -> Checked<bool> {
        (self.body)(value)
    }

    pub fn negate(&self) -> Self {
        let body = Arc::clone(&self.body);
        Self::of(move |value: &T| body(value).map(|matched| !matched))
    }

    /// Short-circuits: `other` is not evaluated when this predicate is false.
    pub fn and(&self, other: &CheckedPredicate<T>) -> Self {
        let left = Arc::clone(&self.body);
        let right = Arc::clone(&other.body);
        Self::of(move |value: &T| Ok(left(value)? && right(value)?))
    }

    /// Short-circuits: `other` is not evaluated when this predicate is true.
    pub fn or(&self, other: &CheckedPredicate<T>) -> Self {
        let left = Arc::clone(&self.body);
        let right = Arc::clone(&other.body);
        Self::of(move |value: &T| Ok(left(value)? || right(value)?))
    }

    /// Total view: a failure or panic yields `None`.
    pub fn lift<F>(f: F) -> impl Fn(&T) -> Option<bool> + Send + Sync + 'static
    where
        F: Fn(&T) -> Checked<bool> + Send + Sync + 'static,
    {
        move |value: &T| catch_failure(|| f(value)).ok()
    }

    pub fn unchecked(&self) -> impl Fn(&T) -> bool + Send + Sync + 'static {
        let body = Arc::clone(&self.body);
        move |value: &T| match body(value) {
            Ok(matched) => matched,
            Err(failure) => raise(failure),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn is_numeric() -> CheckedPredicate<str> {
        CheckedPredicate::of(|s: &str| {
            if s.is_empty() {
                anyhow::bail!("empty input");
            }
            Ok(s.chars().all(|c| c.is_ascii_digit()))
        })
    }

    #[test]
    fn test_negate_and_or() {
        let numeric = is_numeric();
        let short = CheckedPredicate::of(|s: &str| Ok(s.len() < 4));

        assert!(numeric.test("123").unwrap());
        assert!(!numeric.negate().test("123").unwrap());
        assert!(numeric.and(&short).test("123").unwrap());
        assert!(!numeric.and(&short).test("12345").unwrap());
        assert!(numeric.or(&short).test("ab").unwrap());
        assert!(numeric.test("").is_err());
    }

    #[test]
    fn test_and_short_circuits() {
        let evaluated = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&evaluated);
        let never = CheckedPredicate::of(|_: &i32| Ok(false));
        let spy = CheckedPredicate::of(move |_: &i32| {
            flag.store(true, Ordering::SeqCst);
            Ok(true)
        });

        assert!(!never.and(&spy).test(&1).unwrap());
        assert!(!evaluated.load(Ordering::SeqCst));
    }

    #[test]
    fn test_lift_hides_failure() {
        let lifted = CheckedPredicate::<str>::lift(|s: &str| {
            if s.is_empty() {
                anyhow::bail!("empty input");
            }
            Ok(true)
        });
        assert_eq!(lifted("x"), Some(true));
        assert_eq!(lifted(""), None);
    }
}
