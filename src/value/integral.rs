use std::fmt;

use super::change::{ChangeSupport, ListenerId, ValueChange};
use super::number::{Number, NumberRepr};
use crate::errors::{CommonsError, Result};

/// Generates a mutable integral cell with checked arithmetic.
///
/// Every successful mutation fires exactly one change notification. An
/// overflowing mutation returns `CommonsError::Overflow` and leaves both the
/// value and the listeners untouched.
macro_rules! integral_value {
    ($(#[$meta:meta])* $name:ident, $t:ty) => {
        $(#[$meta])*
        pub struct $name {
            value: $t,
            support: ChangeSupport<$t>,
        }

        impl $name {
            pub fn new(value: $t) -> Self {
                Self::with_property("value", value)
            }

            /// Cell whose notifications carry `property` as the property name.
            pub fn with_property(property: impl Into<String>, value: $t) -> Self {
                Self {
                    value,
                    support: ChangeSupport::new(property),
                }
            }

            pub fn get(&self) -> $t {
                self.value
            }

            pub fn set(&mut self, value: $t) {
                let old = std::mem::replace(&mut self.value, value);
                self.support.fire(old, value);
            }

            /// Sets from an optional source; `None` is rejected.
            pub fn try_set(&mut self, value: Option<$t>) -> Result<()> {
                let value = value.ok_or_else(|| {
                    CommonsError::null_argument(format!(
                        "{} '{}' cannot be set to null",
                        stringify!($name),
                        self.support.property()
                    ))
                })?;
                self.set(value);
                Ok(())
            }

            pub fn add_listener<F>(&self, listener: F) -> ListenerId
            where
                F: Fn(&ValueChange<'_, $t>) + Send + Sync + 'static,
            {
                self.support.add_listener(listener)
            }

            pub fn remove_listener(&self, id: ListenerId) -> bool {
                self.support.remove_listener(id)
            }

            pub fn listener_count(&self) -> usize {
                self.support.listener_count()
            }

            fn apply_checked(
                &mut self,
                operation: &str,
                operand: $t,
                result: Option<$t>,
            ) -> Result<$t> {
                let value = result.ok_or_else(|| {
                    CommonsError::overflow(format!(
                        "{} overflow: {} {} {}",
                        stringify!($t),
                        self.value,
                        operation,
                        operand
                    ))
                })?;
                self.set(value);
                Ok(value)
            }

            pub fn increment(&mut self) -> Result<()> {
                self.increment_and_get().map(|_| ())
            }

            pub fn decrement(&mut self) -> Result<()> {
                self.decrement_and_get().map(|_| ())
            }

            pub fn add(&mut self, operand: $t) -> Result<()> {
                self.add_and_get(operand).map(|_| ())
            }

            pub fn subtract(&mut self, operand: $t) -> Result<()> {
                self.subtract_and_get(operand).map(|_| ())
            }

            pub fn multiply(&mut self, operand: $t) -> Result<()> {
                let result = self.value.checked_mul(operand);
                self.apply_checked("*", operand, result).map(|_| ())
            }

            /// Fails for the minimum value, whose negation does not fit.
            pub fn negate(&mut self) -> Result<()> {
                let result = self.value.checked_neg();
                self.apply_checked("* -", 1, result).map(|_| ())
            }

            pub fn increment_and_get(&mut self) -> Result<$t> {
                let result = self.value.checked_add(1);
                self.apply_checked("+", 1, result)
            }

            pub fn get_and_increment(&mut self) -> Result<$t> {
                let before = self.value;
                self.increment_and_get().map(|_| before)
            }

            pub fn decrement_and_get(&mut self) -> Result<$t> {
                let result = self.value.checked_sub(1);
                self.apply_checked("-", 1, result)
            }

            pub fn get_and_decrement(&mut self) -> Result<$t> {
                let before = self.value;
                self.decrement_and_get().map(|_| before)
            }

            pub fn add_and_get(&mut self, operand: $t) -> Result<$t> {
                let result = self.value.checked_add(operand);
                self.apply_checked("+", operand, result)
            }

            pub fn get_and_add(&mut self, operand: $t) -> Result<$t> {
                let before = self.value;
                self.add_and_get(operand).map(|_| before)
            }

            pub fn subtract_and_get(&mut self, operand: $t) -> Result<$t> {
                let result = self.value.checked_sub(operand);
                self.apply_checked("-", operand, result)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new(0)
            }
        }

        impl From<$t> for $name {
            fn from(value: $t) -> Self {
                Self::new(value)
            }
        }

        impl Number for $name {
            fn to_repr(&self) -> NumberRepr {
                NumberRepr::Integral(i128::from(self.value))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.value)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("value", &self.value)
                    .field("support", &self.support)
                    .finish()
            }
        }
    };
}

integral_value! {
    /// Observable `i32` cell.
    IntegerValue, i32
}

integral_value! {
    /// Observable `i64` cell.
    LongValue, i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_increment_fires_once() {
        let mut value = IntegerValue::with_property("retries", 1);
        let changes = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&changes);
        value.add_listener(move |c| sink.lock().push((c.property.to_string(), c.old, c.new)));

        value.increment().unwrap();
        assert_eq!(value.get(), 2);
        assert_eq!(*changes.lock(), vec![("retries".to_string(), 1, 2)]);
    }

    #[test]
    fn test_overflow_leaves_value_and_listeners_untouched() {
        let mut value = IntegerValue::new(i32::MAX);
        let fired = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&fired);
        value.add_listener(move |_| *counter.lock() += 1);

        let err = value.increment().unwrap_err();
        assert!(matches!(err, CommonsError::Overflow(_)));
        assert_eq!(value.get(), i32::MAX);
        assert_eq!(*fired.lock(), 0);

        let mut min = LongValue::new(i64::MIN);
        assert!(min.negate().is_err());
        assert!(min.decrement().is_err());
        assert_eq!(min.get(), i64::MIN);
    }

    #[test]
    fn test_get_and_variants() {
        let mut value = LongValue::new(10);
        assert_eq!(value.get_and_add(5).unwrap(), 10);
        assert_eq!(value.get(), 15);
        assert_eq!(value.get_and_increment().unwrap(), 15);
        assert_eq!(value.decrement_and_get().unwrap(), 15);
        assert_eq!(value.subtract_and_get(20).unwrap(), -5);
        value.multiply(-3).unwrap();
        assert_eq!(value.get(), 15);
    }

    #[test]
    fn test_try_set_rejects_none() {
        let mut value = IntegerValue::default();
        assert!(matches!(
            value.try_set(None),
            Err(CommonsError::NullArgument(_))
        ));
        value.try_set(Some(3)).unwrap();
        assert_eq!(value.get(), 3);
    }
}
