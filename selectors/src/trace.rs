use {
  parking_lot::Mutex,
  std::{
    collections::HashMap,
    time::{Duration, Instant},
  },
  tracing::{debug, debug_span, warn},
};

const DEFAULT_ID: &str = "default";

/// Registry of named timing traces.
///
/// A trace is started and ended by its name and an optional id, so the
/// same name may be pending several times concurrently under different
/// ids. The duration of the last completed trace is kept per name.
#[derive(Debug, Default)]
pub struct TraceRegistry {
  pending: Mutex<HashMap<(String, String), Instant>>,
  durations: Mutex<HashMap<String, Duration>>,
}

impl TraceRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  /// Starts a trace. Starting a trace that is already pending restarts
  /// its clock.
  pub fn start(&self, name: &str, id: Option<&str>) {
    let id = id.unwrap_or(DEFAULT_ID);
    debug!("starting trace {name}:{id}");
    self
      .pending
      .lock()
      .insert((name.to_owned(), id.to_owned()), Instant::now());
  }

  /// Ends a pending trace and records its duration.
  ///
  /// Returns `None` if no trace with this name and id was started.
  pub fn end(&self, name: &str, id: Option<&str>) -> Option<Duration> {
    let id = id.unwrap_or(DEFAULT_ID);
    let Some(started) = self
      .pending
      .lock()
      .remove(&(name.to_owned(), id.to_owned()))
    else {
      warn!("ending trace {name}:{id} that was never started");
      return None;
    };

    let elapsed = started.elapsed();
    debug!("finished trace {name}:{id} in {elapsed:?}");
    self.durations.lock().insert(name.to_owned(), elapsed);
    Some(elapsed)
  }

  /// Runs `f` inside a trace of the given name.
  pub fn trace<R>(&self, name: &str, f: impl FnOnce() -> R) -> R {
    let span = debug_span!("selector", trace = name);
    let _guard = span.enter();
    let started = Instant::now();
    let result = f();
    self
      .durations
      .lock()
      .insert(name.to_owned(), started.elapsed());
    result
  }

  /// Duration of the most recently completed trace with this name.
  pub fn duration(&self, name: &str) -> Option<Duration> {
    self.durations.lock().get(name).copied()
  }

  pub fn durations(&self) -> HashMap<String, Duration> {
    self.durations.lock().clone()
  }

  pub fn pending_count(&self) -> usize {
    self.pending.lock().len()
  }
}

#[cfg(test)]
mod tests {
  use super::TraceRegistry;

  #[test]
  fn traces_are_keyed_by_name_and_id() {
    let registry = TraceRegistry::new();
    registry.start("Transaction", Some("1"));
    registry.start("Transaction", Some("2"));
    registry.start("Transaction", None);
    assert_eq!(registry.pending_count(), 3);

    assert!(registry.end("Transaction", Some("1")).is_some());
    assert!(registry.end("Transaction", Some("1")).is_none());
    assert!(registry.end("Transaction", None).is_some());
    assert_eq!(registry.pending_count(), 1);
    assert!(registry.duration("Transaction").is_some());
  }

  #[test]
  fn unknown_traces_are_ignored() {
    let registry = TraceRegistry::new();
    assert!(registry.end("Signature", None).is_none());
    assert!(registry.duration("Signature").is_none());
    assert!(registry.durations().is_empty());
  }

  #[test]
  fn scoped_trace_records_duration() {
    let registry = TraceRegistry::new();
    let value = registry.trace("Account List", || 42);
    assert_eq!(value, 42);
    assert!(registry.duration("Account List").is_some());
    assert_eq!(registry.pending_count(), 0);
  }
}
