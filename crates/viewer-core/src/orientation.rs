use glam::DVec3;

use crate::constants::DEFAULT_ORIENTATION;

/// Orientation the host element was authored with, in degrees per axis.
///
/// Captured once when the controller starts. Only the Z (yaw) component is ever
/// combined with the rotation value; X and Y pass through untouched so the AR
/// floor placement keeps its scale.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BaseOrientation(DVec3);

impl BaseOrientation {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self(DVec3::new(x, y, z))
    }

    /// Parse an orientation attribute such as `"0deg 90deg 12.5deg"`.
    ///
    /// Missing attribute means the host default. Each malformed or missing token
    /// falls back to 0 on its own axis.
    pub fn parse(attr: Option<&str>) -> Self {
        let attr = attr.unwrap_or(DEFAULT_ORIENTATION);
        let mut axes = [0.0_f64; 3];
        for (slot, token) in axes.iter_mut().zip(attr.split_whitespace()) {
            *slot = parse_degrees(token).unwrap_or_else(|| {
                log::warn!("[host] bad orientation token {:?}; using 0", token);
                0.0
            });
        }
        Self(DVec3::from_array(axes))
    }

    pub fn as_vec3(&self) -> DVec3 {
        self.0
    }

    /// Orientation command for a given yaw offset: `"{x}deg {y}deg {z}deg"`.
    pub fn command(&self, yaw_deg: f64) -> String {
        format!(
            "{}deg {}deg {}deg",
            self.0.x,
            self.0.y,
            self.0.z + yaw_deg
        )
    }
}

fn parse_degrees(token: &str) -> Option<f64> {
    let v: f64 = token.strip_suffix("deg").unwrap_or(token).trim().parse().ok()?;
    v.is_finite().then_some(v)
}
