//! Hotspot visibility with a single rearmable hide timer.

#[derive(Clone, Copy, Debug, PartialEq)]
struct PendingHide {
    delay_ms: f64,
    // pinned on the first frame observed after arming
    deadline_ms: Option<f64>,
}

#[derive(Debug)]
pub struct IdleTimer {
    visible: bool,
    pending: Option<PendingHide>,
    default_delay_ms: f64,
}

impl IdleTimer {
    pub fn new(default_delay_ms: f64) -> Self {
        Self {
            visible: true,
            pending: None,
            default_delay_ms,
        }
    }

    pub fn hotspots_visible(&self) -> bool {
        self.visible
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn default_delay_ms(&self) -> f64 {
        self.default_delay_ms
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Arm the hide timer, replacing any pending one.
    pub fn arm(&mut self, delay_ms: f64) {
        self.pending = Some(PendingHide {
            delay_ms: delay_ms.max(0.0),
            deadline_ms: None,
        });
    }

    /// Returns true exactly once, on the frame the pending hide fires.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        let Some(pending) = self.pending.as_mut() else {
            return false;
        };
        let deadline = *pending
            .deadline_ms
            .get_or_insert(now_ms + pending.delay_ms);
        if now_ms >= deadline {
            self.pending = None;
            true
        } else {
            false
        }
    }
}
