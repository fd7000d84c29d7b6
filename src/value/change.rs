use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use tracing::trace;

/// 值变更通知
#[derive(Debug, Clone, PartialEq)]
pub struct ValueChange<'a, T> {
    /// 属性名称
    pub property: &'a str,
    /// 变更前的值
    pub old: T,
    /// 变更后的值
    pub new: T,
}

/// 值变更监听器
///
/// Called synchronously on the mutating thread, before the mutator returns.
pub trait ChangeListener<T>: Send + Sync {
    fn value_changed(&self, change: &ValueChange<'_, T>);
}

impl<T, F> ChangeListener<T> for F
where
    F: Fn(&ValueChange<'_, T>) + Send + Sync,
{
    fn value_changed(&self, change: &ValueChange<'_, T>) {
        self(change)
    }
}

/// Handle returned by `add_listener`, used to unregister.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Listener registry for one observable property.
pub struct ChangeSupport<T> {
    property: String,
    listeners: RwLock<Vec<(ListenerId, Arc<dyn ChangeListener<T>>)>>,
    next_id: AtomicU64,
}

impl<T: Clone> ChangeSupport<T> {
    pub fn new(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            listeners: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(0),
        }
    }

    pub fn property(&self) -> &str {
        &self.property
    }

    pub fn add_listener<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&ValueChange<'_, T>) + Send + Sync + 'static,
    {
        self.add_shared_listener(Arc::new(listener))
    }

    pub fn add_shared_listener(&self, listener: Arc<dyn ChangeListener<T>>) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners.write().push((id, listener));
        id
    }

    /// Returns `false` when `id` was not registered.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.write();
        let before = listeners.len();
        listeners.retain(|(registered, _)| *registered != id);
        listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.read().len()
    }

    /// Notifies every listener once, in registration order.
    ///
    /// The registry lock is released before listeners run, so a listener
    /// may register or remove listeners; such changes apply from the next
    /// notification on.
    pub fn fire(&self, old: T, new: T) {
        let listeners: Vec<Arc<dyn ChangeListener<T>>> = self
            .listeners
            .read()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        if listeners.is_empty() {
            return;
        }

        trace!(
            "Notifying {} listener(s) of '{}' change",
            listeners.len(),
            self.property
        );
        let change = ValueChange {
            property: &self.property,
            old,
            new,
        };
        for listener in listeners {
            listener.value_changed(&change);
        }
    }
}

impl<T> std::fmt::Debug for ChangeSupport<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeSupport")
            .field("property", &self.property)
            .field("listeners", &self.listeners.read().len())
            .finish()
    }
}
