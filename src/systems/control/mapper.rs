use crate::components::{ControlInput, RawInputState};

/// Converts the raw device snapshot into a normalized `ControlInput`
/// once per tick. Stateless except for the previous-frame snapshot,
/// which drives the fire edge trigger.
#[derive(Debug, Clone, Default)]
pub struct ControlMapper {
    previous: RawInputState,
}

/// Opposing keys cancel to zero.
fn axis(positive: bool, negative: bool) -> f64 {
    match (positive, negative) {
        (true, false) => 1.0,
        (false, true) => -1.0,
        _ => 0.0,
    }
}

impl ControlMapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn map(&mut self, raw: &RawInputState) -> ControlInput {
        let input = ControlInput {
            pitch: axis(raw.pitch_up, raw.pitch_down),
            roll: axis(raw.roll_right, raw.roll_left),
            yaw: axis(raw.yaw_right, raw.yaw_left),
            throttle_delta: axis(raw.throttle_up, raw.throttle_down),
            fire_held: raw.fire,
            fire_pressed: raw.fire && !self.previous.fire,
            afterburner: raw.afterburner,
            brake: raw.brake,
        }
        .sanitized();

        self.previous = *raw;
        input
    }

    pub fn reset(&mut self) {
        self.previous = RawInputState::default();
    }
}
