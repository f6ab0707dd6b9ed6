//! Performance instrumentation for the pointer pipeline.
//!
//! Pointer-move handling runs for every input sample during a gesture, so
//! hit testing and transform dispatch are wrapped in scoped timers.
//!
//! Enable with the `profiling` feature flag:
//! ```toml
//! [dependencies]
//! shapeboard = { features = ["profiling"] }
//! ```
//!
//! ```ignore
//! fn on_mouse_move(&mut self) {
//!     profile_scope!("on_mouse_move");
//!     // ... event handling code ...
//! }
//! ```

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

/// A pointer handler slower than this is reported with `warn!`
pub const SLOW_HANDLER_MS: f64 = 4.0;

/// Number of samples to keep for operation statistics
const STATS_SAMPLE_COUNT: usize = 100;

/// Global flag to enable/disable profiling at runtime
static PROFILING_ENABLED: AtomicBool = AtomicBool::new(cfg!(feature = "profiling"));

static OPERATION_STATS: Lazy<Mutex<HashMap<&'static str, OperationStats>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Profile a scope with the given name. Zero-cost when profiling is disabled.
#[macro_export]
macro_rules! profile_scope {
    ($name:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::new($name, $crate::perf::SLOW_HANDLER_MS);
        #[cfg(not(feature = "profiling"))]
        let _ = $name;
    };
    ($name:expr, $threshold_ms:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::new($name, $threshold_ms);
        #[cfg(not(feature = "profiling"))]
        let _ = ($name, $threshold_ms);
    };
}

/// Enable or disable profiling at runtime.
/// Only affects code compiled with the `profiling` feature.
pub fn set_profiling_enabled(enabled: bool) {
    PROFILING_ENABLED.store(enabled, Ordering::Relaxed);
}

#[inline]
pub fn is_profiling_enabled() -> bool {
    PROFILING_ENABLED.load(Ordering::Relaxed)
}

/// Rolling timing statistics for one named operation.
#[derive(Debug, Clone)]
pub struct OperationStats {
    samples: VecDeque<f64>,
    count: u64,
    max_ms: f64,
    sum_ms: f64,
}

impl Default for OperationStats {
    fn default() -> Self {
        Self {
            samples: VecDeque::with_capacity(STATS_SAMPLE_COUNT),
            count: 0,
            max_ms: 0.0,
            sum_ms: 0.0,
        }
    }
}

impl OperationStats {
    pub fn record(&mut self, ms: f64) {
        if self.samples.len() >= STATS_SAMPLE_COUNT {
            if let Some(old) = self.samples.pop_front() {
                self.sum_ms -= old;
            }
        }
        self.samples.push_back(ms);
        self.sum_ms += ms;
        self.count += 1;
        self.max_ms = self.max_ms.max(ms);
    }

    /// Average over the retained samples.
    pub fn average(&self) -> f64 {
        if self.samples.is_empty() {
            0.0
        } else {
            self.sum_ms / self.samples.len() as f64
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn max(&self) -> f64 {
        self.max_ms
    }
}

/// Snapshot of the statistics recorded for `name`.
pub fn operation_stats(name: &str) -> Option<OperationStats> {
    OPERATION_STATS.lock().get(name).cloned()
}

pub fn reset_operation_stats() {
    OPERATION_STATS.lock().clear();
}

/// RAII timer: records its lifetime on drop.
pub struct ScopedTimer {
    name: &'static str,
    start: Instant,
    threshold_ms: f64,
}

impl ScopedTimer {
    pub fn new(name: &'static str, threshold_ms: f64) -> Self {
        Self {
            name,
            start: Instant::now(),
            threshold_ms,
        }
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        if !is_profiling_enabled() {
            return;
        }
        let ms = self.start.elapsed().as_secs_f64() * 1000.0;
        OPERATION_STATS.lock().entry(self.name).or_default().record(ms);
        if ms > self.threshold_ms {
            tracing::warn!(
                operation = self.name,
                elapsed_ms = format!("{:.2}", ms),
                "Slow pointer handling"
            );
        } else {
            tracing::trace!(operation = self.name, elapsed_ms = format!("{:.3}", ms), "Timed");
        }
    }
}
