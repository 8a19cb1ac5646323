use {
  parking_lot::Mutex,
  std::{
    collections::VecDeque,
    fmt::Debug,
    num::NonZeroUsize,
    sync::{
      atomic::{AtomicU64, Ordering},
      Arc,
    },
  },
  tracing::{debug, trace},
};

/// Memo key that compares a region by identity instead of contents.
///
/// Two snapshots that share a region through the same `Arc` produce
/// equal keys, a region that was rebuilt produces a different key even
/// if its contents did not change. Use plain values as keys when deep
/// equality is wanted.
pub struct ByRef<T: ?Sized>(Arc<T>);

impl<T: ?Sized> ByRef<T> {
  pub fn new(value: &Arc<T>) -> Self {
    Self(Arc::clone(value))
  }
}

impl<T: ?Sized> PartialEq for ByRef<T> {
  fn eq(&self, other: &Self) -> bool {
    Arc::ptr_eq(&self.0, &other.0)
  }
}

impl<T: ?Sized> Clone for ByRef<T> {
  fn clone(&self) -> Self {
    Self(Arc::clone(&self.0))
  }
}

impl<T: ?Sized> Debug for ByRef<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "ref({:p})", Arc::as_ptr(&self.0))
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoStats {
  pub hits: u64,
  pub misses: u64,
}

/// A cache cell for one derivation.
///
/// It keeps the outputs for the last `capacity` distinct keys, most
/// recently used first. Outputs are handed out as `Arc`s so repeated
/// calls with an equal key return the very same allocation.
///
/// The derivation runs outside of the lock, so concurrent callers that
/// miss at the same time may both compute. The later insert replaces
/// the earlier one, a key never occupies more than one slot.
pub struct Memo<K, V> {
  name: &'static str,
  capacity: NonZeroUsize,
  result_eq: Option<fn(&V, &V) -> bool>,
  slots: Mutex<VecDeque<(K, Arc<V>)>>,
  hits: AtomicU64,
  misses: AtomicU64,
}

impl<K: PartialEq, V> Memo<K, V> {
  pub fn new(name: &'static str) -> Self {
    Self {
      name,
      capacity: NonZeroUsize::MIN,
      result_eq: None,
      slots: Mutex::new(VecDeque::with_capacity(1)),
      hits: AtomicU64::new(0),
      misses: AtomicU64::new(0),
    }
  }

  /// Keeps the outputs of up to `capacity` distinct keys.
  pub fn with_capacity(mut self, capacity: NonZeroUsize) -> Self {
    self.capacity = capacity;
    self.slots = Mutex::new(VecDeque::with_capacity(capacity.get()));
    self
  }

  pub fn name(&self) -> &'static str {
    self.name
  }

  pub fn stats(&self) -> MemoStats {
    MemoStats {
      hits: self.hits.load(Ordering::Relaxed),
      misses: self.misses.load(Ordering::Relaxed),
    }
  }

  pub fn len(&self) -> usize {
    self.slots.lock().len()
  }

  pub fn is_empty(&self) -> bool {
    self.slots.lock().is_empty()
  }

  pub fn clear(&self) {
    self.slots.lock().clear();
  }

  /// Returns the cached output for `key` or runs `compute` and caches
  /// its output.
  pub fn get_or_compute(&self, key: K, compute: impl FnOnce() -> V) -> Arc<V> {
    if let Some(hit) = self.lookup(&key) {
      return hit;
    }
    self.store(key, compute())
  }

  /// Like [`Memo::get_or_compute`], errors are returned to the caller
  /// and never cached.
  pub fn try_get_or_compute<E>(
    &self,
    key: K,
    compute: impl FnOnce() -> Result<V, E>,
  ) -> Result<Arc<V>, E> {
    if let Some(hit) = self.lookup(&key) {
      return Ok(hit);
    }
    Ok(self.store(key, compute()?))
  }

  fn lookup(&self, key: &K) -> Option<Arc<V>> {
    let mut slots = self.slots.lock();
    let pos = slots.iter().position(|(k, _)| k == key)?;
    if pos != 0 {
      let slot = slots.remove(pos)?;
      slots.push_front(slot);
    }
    self.hits.fetch_add(1, Ordering::Relaxed);
    trace!(memo = self.name, "hit");
    slots.front().map(|(_, v)| Arc::clone(v))
  }

  fn store(&self, key: K, value: V) -> Arc<V> {
    self.misses.fetch_add(1, Ordering::Relaxed);
    let mut slots = self.slots.lock();

    let value = match (self.result_eq, slots.front()) {
      (Some(eq), Some((_, last))) if eq(last, &value) => {
        debug!(memo = self.name, "recomputed an equal result, reusing");
        Arc::clone(last)
      }
      _ => {
        debug!(memo = self.name, "recomputed");
        Arc::new(value)
      }
    };

    slots.retain(|(k, _)| k != &key);
    slots.push_front((key, Arc::clone(&value)));
    slots.truncate(self.capacity.get());
    value
  }
}

impl<K: PartialEq, V: PartialEq> Memo<K, V> {
  /// When a recomputation yields a value equal to the most recent
  /// output, the previous `Arc` is returned instead of the new value.
  pub fn with_result_equality(mut self) -> Self {
    let eq: fn(&V, &V) -> bool = |a, b| a == b;
    self.result_eq = Some(eq);
    self
  }
}

impl<K, V> Debug for Memo<K, V> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Memo")
      .field("name", &self.name)
      .field("capacity", &self.capacity)
      .field("hits", &self.hits.load(Ordering::Relaxed))
      .field("misses", &self.misses.load(Ordering::Relaxed))
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use {
    super::{ByRef, Memo, MemoStats},
    std::{cell::Cell, num::NonZeroUsize, sync::Arc},
  };

  #[test]
  fn equal_keys_hit() {
    let memo = Memo::<u32, String>::new("test");
    let runs = Cell::new(0);
    let compute = |n: u32| {
      runs.set(runs.get() + 1);
      format!("value {n}")
    };

    let a = memo.get_or_compute(1, || compute(1));
    let b = memo.get_or_compute(1, || compute(1));
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(runs.get(), 1);

    let c = memo.get_or_compute(2, || compute(2));
    assert_eq!(*c, "value 2");
    assert_eq!(runs.get(), 2);
    assert_eq!(memo.stats(), MemoStats { hits: 1, misses: 2 });
    assert_eq!(memo.len(), 1);
  }

  #[test]
  fn by_ref_keys_compare_identity() {
    let memo = Memo::<ByRef<Vec<u8>>, usize>::new("len");
    let region = Arc::new(vec![1, 2, 3]);
    let rebuilt = Arc::new(vec![1, 2, 3]);

    let first = memo.get_or_compute(ByRef::new(&region), || region.len());
    let same = memo.get_or_compute(ByRef::new(&region), || unreachable!());
    assert!(Arc::ptr_eq(&first, &same));

    let other = memo.get_or_compute(ByRef::new(&rebuilt), || rebuilt.len());
    assert!(!Arc::ptr_eq(&first, &other));
    assert_eq!(memo.stats().misses, 2);
  }

  #[test]
  fn value_keys_compare_contents() {
    let memo = Memo::<Vec<u8>, usize>::new("deep");
    let first = memo.get_or_compute(vec![1, 2], || 2);
    let second = memo.get_or_compute(vec![1, 2], || unreachable!());
    assert!(Arc::ptr_eq(&first, &second));
  }

  #[test]
  fn lru_capacity_is_honored() -> anyhow::Result<()> {
    let memo = Memo::<u32, u32>::new("lru")
      .with_capacity(NonZeroUsize::new(2).ok_or(anyhow::anyhow!("zero"))?);

    memo.get_or_compute(1, || 10);
    memo.get_or_compute(2, || 20);
    // touch 1 so that 2 becomes the eviction candidate
    memo.get_or_compute(1, || unreachable!());
    memo.get_or_compute(3, || 30);
    assert_eq!(memo.len(), 2);

    memo.get_or_compute(1, || unreachable!());
    let recomputed = memo.get_or_compute(2, || 21);
    assert_eq!(*recomputed, 21);
    Ok(())
  }

  #[test]
  fn racing_misses_keep_one_slot_per_key() -> anyhow::Result<()> {
    let memo = Memo::<u32, u32>::new("race")
      .with_capacity(NonZeroUsize::new(2).ok_or(anyhow::anyhow!("zero"))?);
    memo.get_or_compute(1, || 10);

    // another caller fills key 2 while this one is still computing it
    let outer = memo.get_or_compute(2, || {
      memo.get_or_compute(2, || 20);
      21
    });
    assert_eq!(*outer, 21);
    assert_eq!(memo.len(), 2);

    assert_eq!(*memo.get_or_compute(1, || unreachable!()), 10);
    assert_eq!(*memo.get_or_compute(2, || unreachable!()), 21);
    Ok(())
  }

  #[test]
  fn result_equality_keeps_previous_output() {
    let memo = Memo::<u32, Vec<u8>>::new("stable").with_result_equality();
    let first = memo.get_or_compute(1, || vec![1]);
    let second = memo.get_or_compute(2, || vec![1]);
    assert!(Arc::ptr_eq(&first, &second));

    let third = memo.get_or_compute(3, || vec![2]);
    assert!(!Arc::ptr_eq(&second, &third));
  }

  #[test]
  fn errors_are_not_cached() {
    let memo = Memo::<u32, u32>::new("fallible");
    let failed: Result<_, &str> = memo.try_get_or_compute(1, || Err("boom"));
    assert!(failed.is_err());
    assert!(memo.is_empty());

    let ok: Result<_, &str> = memo.try_get_or_compute(1, || Ok(7));
    assert_eq!(ok.map(|v| *v), Ok(7));
  }
}
