use nalgebra::Vector3;
use std::f64::consts::{PI, TAU};
use tracing::warn;

use crate::utils::constants::MAX_TIMESTEP;

/// Clamp a frame timestep to the integration cap. NaN and negative
/// values are a caller error class; they become zero here and never
/// reach an integration term.
pub fn sanitize_timestep(dt: f64) -> f64 {
    if !dt.is_finite() || dt < 0.0 {
        warn!(dt, "invalid timestep, treating as zero");
        return 0.0;
    }
    dt.min(MAX_TIMESTEP)
}

/// Convert degrees to radians
#[inline]
pub fn deg_to_rad(deg: f64) -> f64 {
    deg * PI / 180.0
}

/// Convert radians to degrees
#[inline]
pub fn rad_to_deg(rad: f64) -> f64 {
    rad * 180.0 / PI
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(start: f64, end: f64, factor: f64) -> f64 {
    start + (end - start) * factor.clamp(0.0, 1.0)
}

/// Wrap an angle to the canonical (-pi, pi] range
#[inline]
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped > PI {
        wrapped - TAU
    } else {
        wrapped
    }
}

/// Shortest signed difference from one angle to another
#[inline]
pub fn angle_delta(from: f64, to: f64) -> f64 {
    wrap_angle(to - from)
}

/// Exponential smoothing factor for a given lag rate and timestep.
/// Frame-rate independent: chaining two half-steps equals one full step.
#[inline]
pub fn smoothing_factor(lag_rate: f64, dt: f64) -> f64 {
    1.0 - (-lag_rate * dt).exp()
}

/// Nose direction for a given pitch/yaw pair (y-up, z-forward world).
/// Roll does not move the nose.
pub fn nose_vector(pitch: f64, yaw: f64) -> Vector3<f64> {
    Vector3::new(
        pitch.cos() * yaw.sin(),
        pitch.sin(),
        pitch.cos() * yaw.cos(),
    )
}
