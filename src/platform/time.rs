//! Time sources
//!
//! The clock only needs a monotonic millisecond reading per frame.

/// Monotonic, non-decreasing wall-clock time in milliseconds
pub trait TimeSource {
    fn now_ms(&self) -> f64;
}

/// Time that only moves when told to (headless runs and tests)
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualTime {
    now_ms: f64,
}

impl ManualTime {
    pub fn new(start_ms: f64) -> Self {
        Self { now_ms: start_ms }
    }

    pub fn advance(&mut self, ms: f64) {
        self.now_ms += ms.max(0.0);
    }

    /// Jump to `ms`; earlier times are ignored
    pub fn set(&mut self, ms: f64) {
        self.now_ms = self.now_ms.max(ms);
    }
}

impl TimeSource for ManualTime {
    fn now_ms(&self) -> f64 {
        self.now_ms
    }
}

/// Milliseconds since construction, from the OS monotonic clock
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Copy)]
pub struct MonotonicTime {
    start: std::time::Instant,
}

#[cfg(not(target_arch = "wasm32"))]
impl MonotonicTime {
    pub fn new() -> Self {
        Self {
            start: std::time::Instant::now(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for MonotonicTime {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl TimeSource for MonotonicTime {
    fn now_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

/// `performance.now()` in the browser
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone)]
pub struct BrowserTime {
    performance: web_sys::Performance,
}

#[cfg(target_arch = "wasm32")]
impl BrowserTime {
    pub fn new() -> Option<Self> {
        let performance = web_sys::window()?.performance()?;
        Some(Self { performance })
    }
}

#[cfg(target_arch = "wasm32")]
impl TimeSource for BrowserTime {
    fn now_ms(&self) -> f64 {
        self.performance.now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_time_never_goes_back() {
        let mut time = ManualTime::new(100.0);
        time.advance(50.0);
        assert_eq!(time.now_ms(), 150.0);

        time.set(120.0);
        assert_eq!(time.now_ms(), 150.0);

        time.advance(-10.0);
        assert_eq!(time.now_ms(), 150.0);

        time.set(200.0);
        assert_eq!(time.now_ms(), 200.0);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_monotonic_time_is_non_decreasing() {
        let time = MonotonicTime::new();
        let a = time.now_ms();
        let b = time.now_ms();
        assert!(b >= a);
    }
}
