//! Composition of the rotation engine, idle timer, AR session and animation
//! toggle behind the operations the page wires its events to.
//!
//! Everything runs on one thread. Continuous processes and the idle deadline
//! only move inside [`ViewerController::tick`], which the frontend calls once per
//! display frame.

use crate::animation::{AnimationToggle, Pose, PoseClips};
use crate::ar::{ArSession, ArTransition};
use crate::config::ViewerConfig;
use crate::host::{ArStatus, Overlay, ViewerHost};
use crate::orientation::BaseOrientation;
use crate::rotation::RotationEngine;
use crate::triggers::{IdleAction, TriggerSource};
use crate::visibility::IdleTimer;

pub struct ViewerController<H: ViewerHost, O: Overlay> {
    host: Option<H>,
    overlay: O,
    config: ViewerConfig,
    rotation: RotationEngine,
    idle: IdleTimer,
    ar: ArSession,
    animation: AnimationToggle,
}

impl<H: ViewerHost, O: Overlay> ViewerController<H, O> {
    /// `host == None` is tolerated: every host-facing operation becomes a logged no-op.
    pub fn new(host: Option<H>, overlay: O, config: ViewerConfig) -> Self {
        let base = match &host {
            Some(h) => BaseOrientation::parse(h.orientation_attr().as_deref()),
            None => {
                log::error!("[host] viewer element missing; rotation and animation disabled");
                BaseOrientation::default()
            }
        };
        let rotation = RotationEngine::new(
            base,
            config.auto_rotate_deg_per_sec,
            config.rotate_duration_ms,
        );
        let idle = IdleTimer::new(config.idle_hide_delay_ms);
        let animation = AnimationToggle::new(config.crossfade_ms);
        Self {
            host,
            overlay,
            config,
            rotation,
            idle,
            ar: ArSession::default(),
            animation,
        }
    }

    pub fn host(&self) -> Option<&H> {
        self.host.as_ref()
    }

    pub fn overlay(&self) -> &O {
        &self.overlay
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn rotation(&self) -> &RotationEngine {
        &self.rotation
    }

    pub fn idle(&self) -> &IdleTimer {
        &self.idle
    }

    pub fn ar(&self) -> &ArSession {
        &self.ar
    }

    pub fn animation(&self) -> &AnimationToggle {
        &self.animation
    }

    pub fn is_in_ar(&self) -> bool {
        self.ar.is_in_ar()
    }

    fn host_or_warn(&self, op: &str) -> Option<&H> {
        if self.host.is_none() {
            log::warn!("[host] {} ignored; no viewer element", op);
        }
        self.host.as_ref()
    }

    // ---------------- Visibility / idle ----------------

    /// Interaction started: keep the model still and show the hotspots.
    pub fn show_now(&mut self) {
        self.idle.cancel();
        self.rotation.stop_auto();
        self.idle.set_visible(true);
        self.overlay.set_hotspots_visible(true);
    }

    pub fn schedule_hide(&mut self) {
        let delay = self.idle.default_delay_ms();
        self.schedule_hide_after(delay);
    }

    /// Rearm the single hide timer. Any earlier pending hide is dropped.
    pub fn schedule_hide_after(&mut self, delay_ms: f64) {
        self.idle.arm(delay_ms);
    }

    pub fn bump(&mut self) {
        self.show_now();
        self.schedule_hide();
    }

    pub fn apply_idle_action(&mut self, action: IdleAction) {
        match action {
            IdleAction::ShowNow => self.show_now(),
            IdleAction::ScheduleHide => self.schedule_hide(),
            IdleAction::Bump => self.bump(),
        }
    }

    /// Dispatch a raw event name through the trigger map. Returns false when unmapped.
    pub fn handle_trigger(&mut self, source: TriggerSource, event: &str) -> bool {
        match self.config.triggers.action_for(source, event) {
            Some(action) => {
                self.apply_idle_action(action);
                true
            }
            None => false,
        }
    }

    fn hide_fired(&mut self) {
        self.idle.set_visible(false);
        self.overlay.set_hotspots_visible(false);
        if !self.is_in_ar() {
            self.start_auto_rotation();
        }
    }

    // ---------------- Rotation ----------------

    pub fn rotate_by(&mut self, delta_deg: f64) -> bool {
        if self.host_or_warn("rotate").is_none() {
            return false;
        }
        self.rotation.rotate_by(delta_deg);
        true
    }

    /// The rotate control: one configured step.
    pub fn rotate_step(&mut self) -> bool {
        let step = self.config.rotate_step_deg;
        self.rotate_by(step)
    }

    pub fn set_absolute(&mut self, angle_deg: f64) {
        match self.host.as_ref() {
            Some(host) => self.rotation.set_absolute(angle_deg, host),
            None => log::warn!("[host] set angle ignored; no viewer element"),
        }
    }

    pub fn start_auto_rotation(&mut self) -> bool {
        if !self.config.auto_rotate {
            return false;
        }
        if self.host_or_warn("auto-rotation").is_none() {
            return false;
        }
        let in_ar = self.is_in_ar();
        self.rotation.start_auto(in_ar)
    }

    pub fn stop_auto_rotation(&mut self) {
        self.rotation.stop_auto();
    }

    // ---------------- AR ----------------

    /// Explicit AR action. Returns true when the frontend should launch AR on the host.
    pub fn request_ar(&mut self) -> bool {
        if self.host_or_warn("AR request").is_none() {
            return false;
        }
        let current = self.rotation.current();
        match self.ar.request(current) {
            ArTransition::Requested => {
                self.rotation.stop_auto();
                self.idle.cancel();
                // a non-zero yaw at placement time skews the floor anchor scale
                self.set_absolute(0.0);
                log::info!("[ar] requested; saved angle {:.1}", current);
                true
            }
            _ => false,
        }
    }

    /// Raw `ar-status` value from the host.
    pub fn on_ar_status(&mut self, raw: &str) {
        match raw.parse::<ArStatus>() {
            Ok(status) => {
                log::info!("[ar] host status {:?}", status);
                let t = self.ar.on_status(status);
                self.apply_ar_transition(t);
            }
            Err(e) => log::warn!("[ar] {}", e),
        }
    }

    /// The page lost foreground, typically to an external AR viewer.
    pub fn on_page_hidden(&mut self) {
        log::info!("[ar] page hidden");
        self.rotation.stop_auto();
        self.idle.cancel();
    }

    /// The page came back. Treated as leaving AR.
    pub fn on_page_visible(&mut self) {
        log::info!("[ar] page visible again");
        let t = self.ar.on_page_visible();
        self.apply_ar_transition(t);
    }

    fn apply_ar_transition(&mut self, t: ArTransition) {
        match t {
            ArTransition::Activated => {
                self.show_now();
                self.hide_placement_indicators();
            }
            ArTransition::Exited { restore } => {
                if let Some(angle) = restore {
                    log::info!("[ar] restoring angle {:.1}", angle);
                    self.set_absolute(angle);
                }
                self.bump();
            }
            ArTransition::Requested | ArTransition::Unchanged => {}
        }
    }

    fn hide_placement_indicators(&self) {
        let Some(host) = self.host.as_ref() else {
            return;
        };
        let patterns: Vec<&str> = self
            .config
            .placement_indicator_patterns
            .iter()
            .map(String::as_str)
            .collect();
        match host.hide_placement_indicators(&patterns) {
            Ok(0) => log::debug!("[ar] no placement indicators found"),
            Ok(n) => log::info!("[ar] hid {} placement indicators", n),
            Err(e) => log::debug!("[ar] indicator cleanup skipped: {}", e),
        }
    }

    // ---------------- Animation ----------------

    pub fn toggle_animation(&mut self) -> Option<Pose> {
        let Some(host) = self.host.as_ref() else {
            log::warn!("[host] animation toggle ignored; no viewer element");
            return None;
        };
        let pose = self.animation.toggle(host)?;
        self.overlay.show_pose(pose);
        Some(pose)
    }

    /// Host finished loading the model.
    pub fn on_model_loaded(&mut self) {
        if let Some(host) = self.host.as_ref() {
            let names = host.animation_names();
            let clips = PoseClips::resolve(
                &names,
                &self.config.primary_pose_keyword,
                &self.config.secondary_pose_keyword,
            );
            self.animation.set_clips(clips);
        }
        self.overlay.show_pose(self.animation.pose());
        self.bump();
    }

    // ---------------- Frame ----------------

    /// Advance the idle deadline and the active rotation process to `now_ms`.
    pub fn tick(&mut self, now_ms: f64) {
        if self.idle.poll(now_ms) {
            self.hide_fired();
        }
        let in_ar = self.is_in_ar();
        if let Some(host) = self.host.as_ref() {
            self.rotation.tick(now_ms, in_ar, host);
        }
    }
}
