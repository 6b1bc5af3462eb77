use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Abstraction over the host audio clock.
/// Implementations: SystemTimeProvider (production), MockTimeProvider (testing).
pub trait TimeProvider {
    /// Current reading in seconds from an arbitrary epoch.
    /// Must be monotonically non-decreasing.
    fn now(&self) -> f64;
}

/// System time provider using std::time::Instant.
pub struct SystemTimeProvider {
    start: Instant,
}

impl SystemTimeProvider {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemTimeProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeProvider for SystemTimeProvider {
    fn now(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// Mock time provider for deterministic testing.
/// Clones share the same underlying reading, so a test can keep a handle
/// while the clock under test owns another.
#[derive(Clone, Default)]
pub struct MockTimeProvider {
    current: Rc<Cell<f64>>,
}

impl MockTimeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_time(&self, seconds: f64) {
        self.current.set(seconds);
    }

    pub fn advance(&self, delta_seconds: f64) {
        self.current.set(self.current.get() + delta_seconds);
    }
}

impl TimeProvider for MockTimeProvider {
    fn now(&self) -> f64 {
        self.current.get()
    }
}
