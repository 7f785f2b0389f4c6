//! Marching-ants animation driver.
//!
//! An independent loop on the host's frame callback, throttled well below
//! the render cap, since the dashed copy border only needs coarse motion. It
//! shares nothing with the render scheduler except the redraw request.

/// Dash advances per second (10 updates/s by default).
pub const DEFAULT_ANTS_INTERVAL_MS: f64 = 100.0;

/// Dash offset increment per advance.
pub const DEFAULT_DASH_STEP: f64 = 1.0;

#[derive(Debug)]
pub struct AntsDriver {
    pub interval_ms: f64,
    pub step: f64,
    dash_offset: f64,
    last_advance_ms: f64,
    last_visible: bool,
    running: bool,
}

impl AntsDriver {
    pub fn new() -> Self {
        Self {
            interval_ms: DEFAULT_ANTS_INTERVAL_MS,
            step: DEFAULT_DASH_STEP,
            dash_offset: 0.0,
            last_advance_ms: f64::MIN,
            last_visible: false,
            running: false,
        }
    }

    /// Current dash phase for the dashed copy border.
    pub fn dash_offset(&self) -> f64 {
        self.dash_offset
    }

    /// Start the loop. Returns false when already running (no-op).
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        true
    }

    /// Stop the loop; safe to call repeatedly.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// One loop iteration. Returns true when a redraw should be requested:
    /// either the dash advanced, or the visibility flag changed since the
    /// previous tick (so the border appears and disappears promptly between
    /// dash advances).
    pub fn tick(&mut self, now: f64, visible: bool) -> bool {
        let mut redraw = false;
        if visible && now - self.last_advance_ms >= self.interval_ms {
            self.dash_offset += self.step;
            self.last_advance_ms = now;
            redraw = true;
        }
        if visible != self.last_visible {
            self.last_visible = visible;
            redraw = true;
        }
        redraw
    }
}

impl Default for AntsDriver {
    fn default() -> Self {
        Self::new()
    }
}
