// Shared interaction/rotation tuning constants used by the controller and the web frontend.

// Rotation
pub const ROTATE_STEP_DEG: f64 = 90.0; // one press of the rotate control
pub const ROTATE_DURATION_MS: f64 = 300.0; // eased transition length
pub const AUTO_ROTATE_DEG_PER_SEC: f64 = 12.0; // constant idle spin speed

// Idle hotspots
pub const IDLE_HIDE_DELAY_MS: f64 = 3000.0;

// Animation toggle
pub const CROSSFADE_MS: u32 = 300;
pub const PRIMARY_POSE_KEYWORD: &str = "chair";
pub const SECONDARY_POSE_KEYWORD: &str = "stretch";

// Scene-graph names the AR runtime uses for its floor placement helpers
pub const PLACEMENT_INDICATOR_PATTERNS: [&str; 6] = [
    "ring",
    "circle",
    "indicator",
    "reticle",
    "placement",
    "footprint",
];

// Texture variants
pub const ORIGINAL_VARIANT: &str = "original";

// Host orientation attribute fallback
pub const DEFAULT_ORIENTATION: &str = "0deg 0deg 0deg";
