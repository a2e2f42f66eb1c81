//! Yaw driver. Two frame-driven processes write into one `current` angle:
//! a finite eased transition and an unbounded constant-speed auto-rotation.
//! At most one of them is registered at any time.

use crate::angle::{ease_in_out_cubic, normalize, shortest_delta};
use crate::host::ViewerHost;
use crate::orientation::BaseOrientation;

/// Opaque token for a registered per-frame process.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProcessHandle(u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProcessKind {
    Transition,
    AutoRotate,
}

#[derive(Clone, Debug)]
struct Transition {
    handle: ProcessHandle,
    from: f64,
    to: f64,
    // unset until the first frame is observed
    start_ms: Option<f64>,
}

#[derive(Clone, Debug)]
struct AutoRotate {
    handle: ProcessHandle,
    last_ms: Option<f64>,
}

#[derive(Debug)]
pub struct RotationEngine {
    base: BaseOrientation,
    current: f64,
    transition: Option<Transition>,
    auto: Option<AutoRotate>,
    speed_deg_per_sec: f64,
    duration_ms: f64,
    next_handle: u32,
}

impl RotationEngine {
    pub fn new(base: BaseOrientation, speed_deg_per_sec: f64, duration_ms: f64) -> Self {
        Self {
            base,
            current: 0.0,
            transition: None,
            auto: None,
            speed_deg_per_sec,
            duration_ms,
            next_handle: 0,
        }
    }

    pub fn base(&self) -> BaseOrientation {
        self.base
    }

    /// Last yaw offset sent to the host, in `[0, 360)`.
    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn active(&self) -> Option<(ProcessKind, ProcessHandle)> {
        match (&self.transition, &self.auto) {
            (Some(t), _) => Some((ProcessKind::Transition, t.handle)),
            (None, Some(a)) => Some((ProcessKind::AutoRotate, a.handle)),
            (None, None) => None,
        }
    }

    pub fn is_auto_rotating(&self) -> bool {
        self.auto.is_some()
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    fn next_handle(&mut self) -> ProcessHandle {
        self.next_handle = self.next_handle.wrapping_add(1);
        ProcessHandle(self.next_handle)
    }

    /// Start an eased transition from the current angle to `current + delta_deg`.
    pub fn rotate_by(&mut self, delta_deg: f64) -> ProcessHandle {
        self.stop_auto();
        self.cancel_transition();
        let handle = self.next_handle();
        let from = self.current;
        let to = from + delta_deg;
        log::debug!("[rotate] transition {:.1} -> {:.1}", from, normalize(to));
        self.transition = Some(Transition {
            handle,
            from,
            to,
            start_ms: None,
        });
        handle
    }

    /// Jump straight to `angle_deg`, cancelling whatever process is running.
    pub fn set_absolute(&mut self, angle_deg: f64, host: &impl ViewerHost) {
        self.stop_auto();
        self.cancel_transition();
        self.commit(normalize(angle_deg), host);
    }

    /// Begin constant-speed rotation. Returns false when blocked by AR or already running.
    pub fn start_auto(&mut self, in_ar: bool) -> bool {
        if in_ar || self.auto.is_some() {
            return false;
        }
        self.cancel_transition();
        let handle = self.next_handle();
        self.auto = Some(AutoRotate {
            handle,
            last_ms: None,
        });
        log::debug!("[rotate] auto-rotation started");
        true
    }

    pub fn stop_auto(&mut self) {
        if self.auto.take().is_some() {
            log::debug!("[rotate] auto-rotation stopped");
        }
    }

    pub fn cancel_transition(&mut self) {
        self.transition = None;
    }

    /// Advance whichever process is registered to frame time `now_ms`.
    pub fn tick(&mut self, now_ms: f64, in_ar: bool, host: &impl ViewerHost) {
        if let Some(tr) = self.transition.as_mut() {
            let start = *tr.start_ms.get_or_insert(now_ms);
            let t = if self.duration_ms > 0.0 {
                ((now_ms - start) / self.duration_ms).clamp(0.0, 1.0)
            } else {
                1.0
            };
            let (from, to) = (tr.from, tr.to);
            if t >= 1.0 {
                self.transition = None;
                // snap to the exact target so rounding never accumulates
                self.commit(normalize(to), host);
            } else {
                let angle = from + shortest_delta(from, to) * ease_in_out_cubic(t);
                self.commit(normalize(angle), host);
            }
            return;
        }

        if let Some(auto) = self.auto.as_mut() {
            // AR can begin between frames
            if in_ar {
                self.stop_auto();
                return;
            }
            let dt_sec = auto
                .last_ms
                .map(|last| (now_ms - last).max(0.0) / 1000.0)
                .unwrap_or(0.0);
            auto.last_ms = Some(now_ms);
            let next = normalize(self.current + self.speed_deg_per_sec * dt_sec);
            self.commit(next, host);
        }
    }

    fn commit(&mut self, angle: f64, host: &impl ViewerHost) {
        host.set_orientation(&self.base.command(angle));
        host.request_render();
        self.current = angle;
    }
}
