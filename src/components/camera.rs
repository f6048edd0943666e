use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Camera pose derived from the ship state each tick. The only
/// persistent camera state is the previous pose used for smoothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    /// Position relative to the ship frame (the world scrolls; the ship
    /// stays at the origin).
    pub position: Vector3<f64>,
    /// Orientation as pitch/yaw/roll euler angles (radians).
    pub orientation: Vector3<f64>,
    /// Vertical field of view (degrees).
    pub fov: f64,
    /// Shake displacement, applied on top of `position` by the renderer.
    pub shake_offset: Vector3<f64>,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            position: Vector3::new(0.0, 2.0, -8.0),
            orientation: Vector3::zeros(),
            fov: 60.0,
            shake_offset: Vector3::zeros(),
        }
    }
}
