//! AR session state reconciled from three evidence sources: the explicit AR
//! action on the page, status notifications from the host element, and page
//! visibility changes caused by an external AR viewer taking over the display.

use crate::host::ArStatus;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ArPhase {
    #[default]
    Idle,
    /// Explicit action taken; the host has not confirmed yet.
    Requested,
    /// Host confirmed a live session or a placed object.
    Active,
}

/// What the controller has to do after feeding the session a signal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ArTransition {
    Unchanged,
    Requested,
    Activated,
    Exited { restore: Option<f64> },
}

#[derive(Debug, Default)]
pub struct ArSession {
    phase: ArPhase,
    saved_angle: Option<f64>,
    host_status: Option<ArStatus>,
}

impl ArSession {
    pub fn phase(&self) -> ArPhase {
        self.phase
    }

    pub fn saved_angle(&self) -> Option<f64> {
        self.saved_angle
    }

    pub fn host_status(&self) -> Option<ArStatus> {
        self.host_status
    }

    /// Whether auto-rotation must stay off.
    ///
    /// The explicit flag wins: an external viewer may take a while to report its
    /// first status, and rotation must not resume during that gap.
    pub fn is_in_ar(&self) -> bool {
        if self.phase != ArPhase::Idle {
            return true;
        }
        self.host_status.is_some_and(ArStatus::is_presenting)
    }

    /// Explicit AR action. Saves `current_angle` for the return trip.
    pub fn request(&mut self, current_angle: f64) -> ArTransition {
        if self.phase != ArPhase::Idle {
            log::debug!("[ar] request ignored; already {:?}", self.phase);
            return ArTransition::Unchanged;
        }
        self.saved_angle = Some(current_angle);
        self.phase = ArPhase::Requested;
        ArTransition::Requested
    }

    pub fn on_status(&mut self, status: ArStatus) -> ArTransition {
        self.host_status = Some(status);
        if status.is_presenting() {
            // object-placed follows session-started; both re-run the activation effects
            self.phase = ArPhase::Active;
            return ArTransition::Activated;
        }
        match self.phase {
            ArPhase::Idle => ArTransition::Unchanged,
            ArPhase::Requested | ArPhase::Active => self.exit(),
        }
    }

    /// Page regained foreground after being hidden. Counts as leaving AR even
    /// when the host never reported anything.
    pub fn on_page_visible(&mut self) -> ArTransition {
        if self.host_status.is_some_and(ArStatus::is_presenting) {
            self.host_status = None;
        }
        self.exit()
    }

    fn exit(&mut self) -> ArTransition {
        let restore = self.saved_angle.take();
        self.phase = ArPhase::Idle;
        ArTransition::Exited { restore }
    }
}
