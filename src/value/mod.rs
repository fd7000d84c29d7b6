//! Observable values
//!
//! Mutable single-value cells that notify listeners synchronously on every
//! mutation. Listeners run on the mutating thread before the mutator returns.
//!
//! - `integral.rs`: `IntegerValue`, `LongValue` (checked arithmetic)
//! - `floating.rs`: `DoubleValue`, `FloatValue` (IEEE arithmetic)
//! - `boolean.rs`, `enumeration.rs`: `BooleanValue`, `EnumValue`
//! - `change.rs`: listener registry and change event
//! - `number.rs`: cross-type numeric comparison

mod boolean;
mod change;
mod enumeration;
mod floating;
mod integral;
mod number;

pub use boolean::BooleanValue;
pub use change::{ChangeListener, ChangeSupport, ListenerId, ValueChange};
pub use enumeration::EnumValue;
pub use floating::{DoubleValue, FloatValue};
pub use integral::{IntegerValue, LongValue};
pub use number::{Number, NumberRepr, NumericCompare};
