use std::fmt;
use std::str::FromStr;

use strum::IntoEnumIterator;

use super::change::{ChangeSupport, ListenerId, ValueChange};
use crate::errors::{CommonsError, Result};

/// Observable cell over a fieldless enum.
///
/// `E` is expected to derive strum's `EnumIter`, `AsRefStr` and `EnumString`;
/// the iteration order defines `ordinal`, `next` and `previous`.
pub struct EnumValue<E> {
    value: E,
    support: ChangeSupport<E>,
}

impl<E> EnumValue<E>
where
    E: IntoEnumIterator + Copy + PartialEq,
{
    pub fn new(value: E) -> Self {
        Self::with_property("value", value)
    }

    pub fn with_property(property: impl Into<String>, value: E) -> Self {
        Self {
            value,
            support: ChangeSupport::new(property),
        }
    }

    pub fn get(&self) -> E {
        self.value
    }

    pub fn set(&mut self, value: E) {
        let old = std::mem::replace(&mut self.value, value);
        self.support.fire(old, value);
    }

    /// Position of the current variant in declaration order.
    pub fn ordinal(&self) -> usize {
        E::iter()
            .position(|variant| variant == self.value)
            .unwrap_or_default()
    }

    /// Advances to the following variant, wrapping to the first.
    pub fn next(&mut self) -> E {
        let variants: Vec<E> = E::iter().collect();
        let next = variants[(self.ordinal() + 1) % variants.len()];
        self.set(next);
        next
    }

    /// Steps back to the preceding variant, wrapping to the last.
    pub fn previous(&mut self) -> E {
        let variants: Vec<E> = E::iter().collect();
        let previous = variants[(self.ordinal() + variants.len() - 1) % variants.len()];
        self.set(previous);
        previous
    }

    pub fn add_listener<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&ValueChange<'_, E>) + Send + Sync + 'static,
    {
        self.support.add_listener(listener)
    }

    pub fn remove_listener(&self, id: ListenerId) -> bool {
        self.support.remove_listener(id)
    }

    pub fn listener_count(&self) -> usize {
        self.support.listener_count()
    }
}

impl<E> EnumValue<E>
where
    E: IntoEnumIterator + Copy + PartialEq + AsRef<str>,
{
    pub fn name(&self) -> &str {
        self.value.as_ref()
    }
}

impl<E> EnumValue<E>
where
    E: IntoEnumIterator + Copy + PartialEq + FromStr,
{
    /// Sets the variant whose name parses from `name`.
    pub fn set_by_name(&mut self, name: &str) -> Result<()> {
        let value = E::from_str(name).map_err(|_| {
            CommonsError::validation(format!(
                "'{}' is not a variant of '{}'",
                name,
                self.support.property()
            ))
        })?;
        self.set(value);
        Ok(())
    }
}

impl<E> fmt::Display for EnumValue<E>
where
    E: AsRef<str>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value.as_ref())
    }
}

impl<E: fmt::Debug> fmt::Debug for EnumValue<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnumValue")
            .field("value", &self.value)
            .field("support", &self.support)
            .finish()
    }
}
