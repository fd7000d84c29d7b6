use std::fmt;

use super::change::{ChangeSupport, ListenerId, ValueChange};
use super::number::{Number, NumberRepr};
use crate::errors::{CommonsError, Result};

// Floating cells follow IEEE arithmetic: no overflow error, results may be
// infinite or NaN.
macro_rules! floating_value {
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

            pub fn increment(&mut self) {
                self.set(self.value + 1.0);
            }

            pub fn decrement(&mut self) {
                self.set(self.value - 1.0);
            }

            pub fn add(&mut self, operand: $t) {
                self.set(self.value + operand);
            }

            pub fn subtract(&mut self, operand: $t) {
                self.set(self.value - operand);
            }

            pub fn multiply(&mut self, operand: $t) {
                self.set(self.value * operand);
            }

            pub fn divide(&mut self, operand: $t) {
                self.set(self.value / operand);
            }

            pub fn add_and_get(&mut self, operand: $t) -> $t {
                self.add(operand);
                self.value
            }

            pub fn get_and_add(&mut self, operand: $t) -> $t {
                let before = self.value;
                self.add(operand);
                before
            }

            pub fn is_nan(&self) -> bool {
                self.value.is_nan()
            }

            pub fn is_infinite(&self) -> bool {
                self.value.is_infinite()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new(0.0)
            }
        }

        impl From<$t> for $name {
            fn from(value: $t) -> Self {
                Self::new(value)
            }
        }

        impl Number for $name {
            fn to_repr(&self) -> NumberRepr {
                NumberRepr::Floating(f64::from(self.value))
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

floating_value! {
    /// Observable `f64` cell.
    DoubleValue, f64
}

floating_value! {
    /// Observable `f32` cell.
    FloatValue, f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::NumericCompare;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_arithmetic_and_notifications() {
        let mut value = DoubleValue::new(1.5);
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);
        value.add_listener(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        value.add(1.0);
        value.multiply(2.0);
        assert_eq!(value.get_and_add(-1.0), 5.0);
        assert_eq!(value.get(), 4.0);
        assert_eq!(fired.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_ieee_edge_values() {
        let mut value = FloatValue::new(f32::MAX);
        value.multiply(2.0);
        assert!(value.is_infinite());

        let mut zero = DoubleValue::default();
        zero.divide(0.0);
        assert!(zero.is_nan());
        assert!(!zero.is_equal_to(0));
    }

    #[test]
    fn test_compares_against_any_number() {
        let value = FloatValue::new(2.5);
        assert!(value.is_greater_than(2));
        assert!(value.is_less_than(3u64));
        assert!(value.is_equal_to(2.5f64));
    }
}
