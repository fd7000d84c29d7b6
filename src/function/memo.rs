use std::hash::Hash;
use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::trace;

use super::Checked;

type Slot<V> = Arc<Mutex<Option<V>>>;

/// Unbounded result cache with per-key single-flight computation.
///
/// - 同一 key 的并发调用只会执行一次计算，其他调用等待结果
/// - 不同 key 之间互不阻塞
/// - 计算失败不缓存，下一次调用会重新计算
/// - 失败 key 的空 slot 在没有其他调用者等待时被移除
///
/// Each key owns a slot guarded by its own mutex. The map's shard lock is
/// only held while the slot is looked up, never while computing.
pub struct Memo<K, V> {
    slots: DashMap<K, Slot<V>>,
}

impl<K, V> Memo<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new() -> Self {
        Self {
            slots: DashMap::new(),
        }
    }

    /// Returns the cached value for `key`, computing it with `compute` when
    /// no successful result has been stored yet.
    pub fn get_or_try_insert_with<F>(&self, key: K, compute: F) -> Checked<V>
    where
        F: FnOnce() -> Checked<V>,
    {
        let slot = self.slot(&key);
        let mut value = slot.lock();

        if let Some(cached) = value.as_ref() {
            trace!("Memo hit");
            return Ok(cached.clone());
        }

        trace!("Memo miss, computing");
        match compute() {
            Ok(computed) => {
                *value = Some(computed.clone());
                Ok(computed)
            }
            Err(failure) => {
                drop(value);
                self.discard_empty(&key, &slot);
                Err(failure)
            }
        }
    }

    /// Cached value for `key`, if a computation for it has succeeded.
    pub fn get(&self, key: &K) -> Option<V> {
        let slot = self.slots.get(key).map(|entry| Arc::clone(entry.value()))?;
        let value = slot.lock();
        value.clone()
    }

    /// Number of keys holding a successfully computed value.
    pub fn len(&self) -> usize {
        // Slot locks are taken only after the shard guards are released.
        let slots: Vec<Slot<V>> = self
            .slots
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();
        slots.iter().filter(|slot| slot.lock().is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot(&self, key: &K) -> Slot<V> {
        if let Some(existing) = self.slots.get(key) {
            return Arc::clone(existing.value());
        }
        Arc::clone(self.slots.entry(key.clone()).or_default().value())
    }

    /// Removes `key`'s slot after a failed computation unless a waiter still
    /// holds it. New clones are only taken under the shard lock `remove_if`
    /// holds, so a count of two (map + `held`) means nobody else has it.
    fn discard_empty(&self, key: &K, held: &Slot<V>) {
        self.slots.remove_if(key, |_, slot| {
            Arc::ptr_eq(slot, held)
                && Arc::strong_count(slot) == 2
                && slot.try_lock().is_some_and(|value| value.is_none())
        });
    }
}

impl<K, V> Default for Memo<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
