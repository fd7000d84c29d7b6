use std::fmt;

use super::change::{ChangeSupport, ListenerId, ValueChange};
use crate::errors::{CommonsError, Result};

/// Observable `bool` cell.
pub struct BooleanValue {
    value: bool,
    support: ChangeSupport<bool>,
}

impl BooleanValue {
    pub fn new(value: bool) -> Self {
        Self::with_property("value", value)
    }

    pub fn with_property(property: impl Into<String>, value: bool) -> Self {
        Self {
            value,
            support: ChangeSupport::new(property),
        }
    }

    pub fn get(&self) -> bool {
        self.value
    }

    pub fn is_true(&self) -> bool {
        self.value
    }

    pub fn is_false(&self) -> bool {
        !self.value
    }

    pub fn set(&mut self, value: bool) {
        let old = std::mem::replace(&mut self.value, value);
        self.support.fire(old, value);
    }

    pub fn try_set(&mut self, value: Option<bool>) -> Result<()> {
        let value = value.ok_or_else(|| {
            CommonsError::null_argument(format!(
                "BooleanValue '{}' cannot be set to null",
                self.support.property()
            ))
        })?;
        self.set(value);
        Ok(())
    }

    pub fn set_true(&mut self) {
        self.set(true);
    }

    pub fn set_false(&mut self) {
        self.set(false);
    }

    /// Inverts the value and returns the new one.
    pub fn flip(&mut self) -> bool {
        self.set(!self.value);
        self.value
    }

    pub fn add_listener<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&ValueChange<'_, bool>) + Send + Sync + 'static,
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

impl Default for BooleanValue {
    fn default() -> Self {
        Self::new(false)
    }
}

impl From<bool> for BooleanValue {
    fn from(value: bool) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for BooleanValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl fmt::Debug for BooleanValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BooleanValue")
            .field("value", &self.value)
            .field("support", &self.support)
            .finish()
    }
}
