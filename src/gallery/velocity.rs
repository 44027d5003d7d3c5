use tracing::warn;

/// Frame step the damping factor is expressed against.
pub const NOMINAL_STEP: f32 = 1.0 / 60.0;

/// Single scalar scroll velocity with impulse accumulation and multiplicative damping.
#[derive(Debug, Clone)]
pub struct VelocityIntegrator {
    velocity: f32,
    pending: f32,
    damping: f32,
    autoplay_rate: f32,
}

impl VelocityIntegrator {
    pub fn new(damping: f32, autoplay_rate: f32) -> Self {
        Self {
            velocity: 0.0,
            pending: 0.0,
            damping,
            autoplay_rate,
        }
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Queue an impulse for the next tick. Non-finite impulses are dropped.
    pub fn apply_impulse(&mut self, delta: f32) {
        if !delta.is_finite() {
            warn!("impulse_dropped delta={delta}");
            return;
        }
        self.pending += delta;
        if !self.pending.is_finite() {
            warn!("impulse_overflow pending reset");
            self.pending = 0.0;
        }
    }

    /// Fold queued impulses and autoplay drift in, then damp. Returns the new velocity.
    pub fn tick(&mut self, dt: f32, autoplay: bool) -> f32 {
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };

        self.velocity += self.pending;
        self.pending = 0.0;
        if autoplay {
            self.velocity += self.autoplay_rate * dt;
        }

        // Exponential decay, refresh-rate independent.
        self.velocity *= self.damping.powf(dt / NOMINAL_STEP);

        if !self.velocity.is_finite() {
            warn!("velocity_non_finite reset to 0");
            self.velocity = 0.0;
        }
        self.velocity
    }

    pub fn reset(&mut self) {
        self.velocity = 0.0;
        self.pending = 0.0;
    }
}
