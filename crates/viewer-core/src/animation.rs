use crate::host::ViewerHost;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Pose {
    #[default]
    Primary,
    Secondary,
}

impl Pose {
    pub fn opposite(self) -> Self {
        match self {
            Pose::Primary => Pose::Secondary,
            Pose::Secondary => Pose::Primary,
        }
    }
}

/// Clip names for the two poses, resolved when the model loads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoseClips {
    pub primary: String,
    pub secondary: String,
}

impl PoseClips {
    /// Pick clips by case-insensitive keyword, falling back to clip order.
    pub fn resolve(names: &[String], primary_kw: &str, secondary_kw: &str) -> Option<Self> {
        let find = |kw: &str, skip: Option<&String>| {
            let kw = kw.to_lowercase();
            names
                .iter()
                .filter(|n| Some(*n) != skip)
                .find(|n| n.to_lowercase().contains(&kw))
                .cloned()
        };
        let primary = find(primary_kw, None).or_else(|| names.first().cloned())?;
        let secondary = find(secondary_kw, Some(&primary))
            .or_else(|| names.iter().find(|n| **n != primary).cloned())?;
        Some(Self { primary, secondary })
    }

    pub fn clip(&self, pose: Pose) -> &str {
        match pose {
            Pose::Primary => &self.primary,
            Pose::Secondary => &self.secondary,
        }
    }
}

/// Two-state crossfade between the primary and secondary pose.
#[derive(Debug)]
pub struct AnimationToggle {
    pose: Pose,
    clips: Option<PoseClips>,
    crossfade_ms: u32,
}

impl AnimationToggle {
    pub fn new(crossfade_ms: u32) -> Self {
        Self {
            pose: Pose::Primary,
            clips: None,
            crossfade_ms,
        }
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub fn clips(&self) -> Option<&PoseClips> {
        self.clips.as_ref()
    }

    pub fn set_clips(&mut self, clips: Option<PoseClips>) {
        match &clips {
            Some(c) => log::info!("[anim] poses: {:?} / {:?}", c.primary, c.secondary),
            None => log::warn!("[anim] model has no usable animation clips"),
        }
        self.clips = clips;
    }

    /// Crossfade to the other pose. Returns the new pose, or `None` when no clips resolved.
    pub fn toggle(&mut self, host: &impl ViewerHost) -> Option<Pose> {
        let Some(clips) = self.clips.as_ref() else {
            log::warn!("[anim] toggle ignored; clips unresolved");
            return None;
        };
        let next = self.pose.opposite();
        host.play_animation(clips.clip(next), self.crossfade_ms, 1);
        self.pose = next;
        Some(next)
    }
}
