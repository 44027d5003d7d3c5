use tracing::warn;

/// Wheel delta to velocity units, before the speed multiplier.
pub const WHEEL_GAIN: f32 = 0.01;
/// Velocity units per arrow-key press, before the speed multiplier.
pub const KEY_IMPULSE: f32 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// Signed wheel delta; positive scrolls forward.
    Wheel { delta_y: f32 },
    Key(Direction),
}

/// Turns raw wheel/key events into signed velocity impulses.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InputAdapter {
    speed: f32,
}

impl InputAdapter {
    pub fn new(speed: f32) -> Self {
        Self { speed }
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// `None` for input that carries no usable impulse.
    pub fn impulse(&self, event: InputEvent) -> Option<f32> {
        let delta = match event {
            InputEvent::Wheel { delta_y } => {
                if !delta_y.is_finite() {
                    warn!("wheel_delta_dropped delta_y={delta_y}");
                    return None;
                }
                delta_y * WHEEL_GAIN * self.speed
            }
            InputEvent::Key(Direction::Up | Direction::Left) => -KEY_IMPULSE * self.speed,
            InputEvent::Key(Direction::Down | Direction::Right) => KEY_IMPULSE * self.speed,
        };
        delta.is_finite().then_some(delta)
    }
}
