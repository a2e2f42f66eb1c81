//! Event-name to idle-action table. The web layer registers one listener per
//! entry; the controller only ever sees the resulting action.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdleAction {
    ShowNow,
    ScheduleHide,
    Bump,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerSource {
    /// Global page input (pointer, touch, mouse, selection).
    Window,
    /// Notifications dispatched by the host element.
    Host,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Trigger {
    pub source: TriggerSource,
    pub event: String,
    pub action: IdleAction,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TriggerMap {
    entries: Vec<Trigger>,
}

const WINDOW_START: [&str; 4] = ["pointerdown", "touchstart", "mousedown", "selectstart"];
const WINDOW_END: [&str; 5] = [
    "pointerup",
    "pointercancel",
    "touchend",
    "touchcancel",
    "mouseup",
];

impl Default for TriggerMap {
    fn default() -> Self {
        let mut map = Self::empty();
        for ev in WINDOW_START {
            map.insert(TriggerSource::Window, ev, IdleAction::ShowNow);
        }
        for ev in WINDOW_END {
            map.insert(TriggerSource::Window, ev, IdleAction::ScheduleHide);
        }
        map.insert(TriggerSource::Host, "interaction-start", IdleAction::ShowNow);
        map.insert(TriggerSource::Host, "interaction-end", IdleAction::ScheduleHide);
        map.insert(TriggerSource::Host, "select", IdleAction::Bump);
        map
    }
}

impl TriggerMap {
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Map `event` from `source` to `action`, replacing an existing mapping.
    pub fn insert(&mut self, source: TriggerSource, event: &str, action: IdleAction) {
        if let Some(t) = self
            .entries
            .iter_mut()
            .find(|t| t.source == source && t.event == event)
        {
            t.action = action;
            return;
        }
        self.entries.push(Trigger {
            source,
            event: event.to_string(),
            action,
        });
    }

    #[cfg(test)]
    pub(crate) fn remove(&mut self, source: TriggerSource, event: &str) {
        self.entries
            .retain(|t| !(t.source == source && t.event == event));
    }

    pub fn action_for(&self, source: TriggerSource, event: &str) -> Option<IdleAction> {
        self.entries
            .iter()
            .find(|t| t.source == source && t.event == event)
            .map(|t| t.action)
    }

    pub fn for_source(&self, source: TriggerSource) -> impl Iterator<Item = &Trigger> + '_ {
        self.entries.iter().filter(move |t| t.source == source)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pair_start_and_end_edges() {
        let map = TriggerMap::default();
        assert_eq!(
            map.action_for(TriggerSource::Window, "touchstart"),
            Some(IdleAction::ShowNow)
        );
        assert_eq!(
            map.action_for(TriggerSource::Window, "touchend"),
            Some(IdleAction::ScheduleHide)
        );
        assert_eq!(
            map.action_for(TriggerSource::Host, "select"),
            Some(IdleAction::Bump)
        );
        assert_eq!(map.action_for(TriggerSource::Host, "touchend"), None);
        assert_eq!(map.for_source(TriggerSource::Host).count(), 3);
    }

    #[test]
    fn insert_replaces_and_remove_drops() {
        let mut map = TriggerMap::default();
        let n = map.len();
        map.insert(TriggerSource::Window, "mousedown", IdleAction::Bump);
        assert_eq!(map.len(), n);
        assert_eq!(
            map.action_for(TriggerSource::Window, "mousedown"),
            Some(IdleAction::Bump)
        );
        map.remove(TriggerSource::Window, "mousedown");
        assert_eq!(map.action_for(TriggerSource::Window, "mousedown"), None);
    }
}
