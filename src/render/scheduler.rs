//! Dirty-flag render scheduling with a soft frame-rate ceiling.
//!
//! Redraw requests are coalesced: a dirty flag plus a render-pending flag
//! guarantee at most one scheduled frame at a time. Requests arriving less
//! than [`MIN_FRAME_INTERVAL_MS`] after the last completed frame are
//! deferred to the next host frame callback instead of drawn immediately.

/// Soft 60 fps ceiling between synchronous draws.
pub const MIN_FRAME_INTERVAL_MS: f64 = 16.0;

/// What the caller should do with a redraw request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderAction {
    /// Draw synchronously now.
    Draw,
    /// Schedule one host frame callback.
    Defer,
    /// A frame is already scheduled; nothing to do.
    AlreadyPending,
}

#[derive(Debug)]
pub struct RenderScheduler {
    dirty: bool,
    render_pending: bool,
    last_frame_ms: f64,
    pub min_interval_ms: f64,
}

impl RenderScheduler {
    pub fn new() -> Self {
        Self {
            dirty: false,
            render_pending: false,
            last_frame_ms: f64::MIN,
            min_interval_ms: MIN_FRAME_INTERVAL_MS,
        }
    }

    /// Flag the rendered frame as stale.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_pending(&self) -> bool {
        self.render_pending
    }

    /// Decide how to service a redraw request at time `now`.
    pub fn schedule(&mut self, now: f64) -> RenderAction {
        if self.render_pending {
            return RenderAction::AlreadyPending;
        }
        if now - self.last_frame_ms < self.min_interval_ms {
            self.render_pending = true;
            return RenderAction::Defer;
        }
        RenderAction::Draw
    }

    /// A redraw is skipped entirely when nothing is dirty and the marching
    /// ants are off.
    pub fn should_paint(&self, ants_active: bool) -> bool {
        self.dirty || ants_active
    }

    /// A deferred frame fired but there was nothing to paint; release the
    /// pending slot without counting a frame.
    pub fn skip_frame(&mut self) {
        self.render_pending = false;
    }

    /// Record a completed frame, whichever path triggered it.
    pub fn frame_done(&mut self, now: f64) {
        self.dirty = false;
        self.render_pending = false;
        self.last_frame_ms = now;
    }
}

impl Default for RenderScheduler {
    fn default() -> Self {
        Self::new()
    }
}
