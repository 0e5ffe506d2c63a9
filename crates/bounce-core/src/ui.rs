/// Shows the fullscreen button while the pointer is moving and hides it
/// after a quiet period.
///
/// Timestamps are milliseconds from any monotonic clock
/// (`performance.now()` in the browser).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IdleTimer {
    hide_after_ms: f64,
    last_move_ms: Option<f64>,
}

impl Default for IdleTimer {
    fn default() -> Self {
        Self::new(2000.0)
    }
}

impl IdleTimer {
    pub fn new(hide_after_ms: f64) -> Self {
        Self {
            hide_after_ms,
            last_move_ms: None,
        }
    }

    pub fn hide_after_ms(&self) -> f64 {
        self.hide_after_ms
    }

    pub fn pointer_moved(&mut self, now_ms: f64) {
        self.last_move_ms = Some(now_ms);
    }

    /// Hidden until the first pointer move.
    pub fn is_visible(&self, now_ms: f64) -> bool {
        match self.last_move_ms {
            Some(last) => now_ms - last < self.hide_after_ms,
            None => false,
        }
    }
}
