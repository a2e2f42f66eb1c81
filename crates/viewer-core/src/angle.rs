//! Pure yaw helpers. All angles are degrees.

/// Wrap an angle into `[0, 360)`.
#[inline]
pub fn normalize(angle: f64) -> f64 {
    let a = angle % 360.0;
    let a = if a < 0.0 { a + 360.0 } else { a };
    // -1e-15 % 360 + 360 rounds to exactly 360.0
    if a >= 360.0 {
        0.0
    } else {
        a
    }
}

/// Signed delta in `(-180, 180]` that takes the visually shorter way from `from` to `to`.
#[inline]
pub fn shortest_delta(from: f64, to: f64) -> f64 {
    let mut d = normalize(to) - normalize(from);
    if d > 180.0 {
        d -= 360.0;
    } else if d <= -180.0 {
        d += 360.0;
    }
    d
}

/// Symmetric cubic ease: accelerates through the first half, decelerates through the second.
#[inline]
pub fn ease_in_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let f = -2.0 * t + 2.0;
        1.0 - f * f * f / 2.0
    }
}
