//! Seams to the outside world: the 3D host element and the page overlay.
//!
//! These traits avoid any platform-specific types so the controller can run
//! against the real `<model-viewer>` element in the browser and against
//! recording fakes in host-side tests.

use std::str::FromStr;

use thiserror::Error;

use crate::animation::Pose;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum HostError {
    #[error("host does not expose {0}")]
    Unsupported(&'static str),
    #[error("host call failed: {0}")]
    Call(String),
}

/// The 3D viewer component. Sink for orientation and animation commands.
pub trait ViewerHost {
    /// Orientation attribute as authored, if any.
    fn orientation_attr(&self) -> Option<String>;

    /// Apply an orientation command of the form `"{x}deg {y}deg {z}deg"`.
    fn set_orientation(&self, orientation: &str);

    fn request_render(&self);

    /// Names of the animation clips shipped with the loaded model.
    fn animation_names(&self) -> Vec<String>;

    /// Play `clip` once, crossfading from whatever is playing. Never loops.
    fn play_animation(&self, clip: &str, crossfade_ms: u32, repetitions: u32);

    /// Hide scene nodes whose lowercased name contains any of `patterns`.
    ///
    /// Optional capability; returns the number of nodes hidden. Callers treat any
    /// error as advisory.
    fn hide_placement_indicators(&self, _patterns: &[&str]) -> Result<usize, HostError> {
        Err(HostError::Unsupported("scene graph access"))
    }
}

/// Page-side controls that follow controller state.
pub trait Overlay {
    fn set_hotspots_visible(&self, visible: bool);

    /// Refresh any label/thumbnail bound to the current pose.
    fn show_pose(&self, _pose: Pose) {}
}

/// AR status values the host reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArStatus {
    SessionStarted,
    ObjectPlaced,
    NotPresenting,
    Failed,
}

impl ArStatus {
    /// Statuses that mean a session is live.
    pub fn is_presenting(self) -> bool {
        matches!(self, ArStatus::SessionStarted | ArStatus::ObjectPlaced)
    }
}

impl FromStr for ArStatus {
    type Err = HostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "session-started" => Ok(ArStatus::SessionStarted),
            "object-placed" => Ok(ArStatus::ObjectPlaced),
            "not-presenting" => Ok(ArStatus::NotPresenting),
            "failed" => Ok(ArStatus::Failed),
            other => Err(HostError::Call(format!("unknown ar-status {:?}", other))),
        }
    }
}
