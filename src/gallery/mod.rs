//! Continuous-loop gallery engine.
//!
//! A fixed pool of slots travels along a wrapped depth axis. Input and autoplay
//! feed one velocity; each tick advances the ring, modulates every slot by its
//! distance from the viewer and emits a [`RenderFrame`] for whatever draws it.

mod autoplay;
mod frame;
mod input;
mod layout;
mod modulator;
mod ring;
mod settings;
mod velocity;

pub use autoplay::{AutoplayScheduler, IdleTimer, PlaybackMode};
pub use frame::{ImageRef, RenderFrame, SlotFrame};
pub use input::{Direction, InputAdapter, InputEvent, KEY_IMPULSE, WHEEL_GAIN};
pub use layout::{generate_layout, offset_for, LayoutOffset};
pub use modulator::{Bands, Modulation, ViewerPlane, VisualModulator};
pub use ring::{index_advance, wrap_depth, wrap_index, Slot, SlotRing};
pub use settings::{
    GallerySettings, SettingsError, DEFAULT_DEPTH_RANGE, DEFAULT_IDLE_POLL, DEFAULT_IDLE_THRESHOLD,
    DEFAULT_Z_SPACING,
};
pub use velocity::{VelocityIntegrator, NOMINAL_STEP};

use glam::{Vec2, Vec3};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Snapshot of the engine's scalar state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineState {
    pub velocity: f32,
    pub last_interaction: Option<Instant>,
    pub autoplay: bool,
}

pub struct GalleryEngine {
    images: Vec<ImageRef>,
    input: InputAdapter,
    velocity: VelocityIntegrator,
    autoplay: AutoplayScheduler,
    ring: SlotRing,
    layout: Vec<LayoutOffset>,
    modulator: VisualModulator,
    viewer_plane: ViewerPlane,
    frame: RenderFrame,
    running: bool,
}

impl GalleryEngine {
    pub fn new(images: Vec<ImageRef>, settings: &GallerySettings) -> Result<Self, SettingsError> {
        settings.validate()?;
        let depth_range = settings.resolved_depth_range();
        let visible = settings.visible_count;
        let ring = SlotRing::new(
            visible,
            images.len(),
            depth_range,
            settings.depth_speed_scale,
        );

        info!(
            "gallery_start images={} slots={} depth_range={} index_advance={}",
            images.len(),
            visible,
            depth_range,
            ring.index_advance()
        );

        Ok(Self {
            input: InputAdapter::new(settings.speed),
            velocity: VelocityIntegrator::new(settings.damping, settings.autoplay_rate),
            autoplay: AutoplayScheduler::new(settings.idle_threshold, settings.idle_poll_interval),
            layout: generate_layout(visible, settings.max_offset_x, settings.max_offset_y),
            modulator: settings.modulator(),
            viewer_plane: settings.viewer_plane,
            frame: RenderFrame {
                slots: Vec::with_capacity(visible),
            },
            ring,
            images,
            running: true,
        })
    }

    pub fn images(&self) -> &[ImageRef] {
        &self.images
    }

    pub fn image(&self, index: usize) -> Option<&ImageRef> {
        self.images.get(index)
    }

    pub fn ring(&self) -> &SlotRing {
        &self.ring
    }

    pub fn layout(&self) -> &[LayoutOffset] {
        &self.layout
    }

    pub fn playback_mode(&self) -> PlaybackMode {
        self.autoplay.mode()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Nothing will ever be drawn: no images, no slots, or torn down.
    pub fn is_inert(&self) -> bool {
        !self.running || self.images.is_empty() || self.ring.is_empty()
    }

    pub fn state(&self) -> EngineState {
        EngineState {
            velocity: self.velocity.velocity(),
            last_interaction: self.autoplay.last_interaction(),
            autoplay: self.autoplay.is_autoplay(),
        }
    }

    /// Raw impulse entry point. Counts as user interaction.
    pub fn apply_impulse(&mut self, delta: f32, now: Instant) {
        if !self.running {
            return;
        }
        if !delta.is_finite() {
            warn!("impulse_dropped delta={delta}");
            return;
        }
        self.velocity.apply_impulse(delta);
        self.autoplay.record_interaction(now);
    }

    pub fn handle_input(&mut self, event: InputEvent, now: Instant) {
        if let Some(delta) = self.input.impulse(event) {
            self.apply_impulse(delta, now);
        }
    }

    /// Advance one frame and return it. `dt` is in seconds; `now` drives the idle timer.
    pub fn tick(&mut self, now: Instant, dt: f32) -> &RenderFrame {
        self.frame.clear();
        if !self.running {
            return &self.frame;
        }
        let dt = if dt.is_finite() && dt >= 0.0 {
            dt
        } else {
            warn!("tick_dt_invalid dt={dt}");
            0.0
        };

        self.autoplay.poll(now);
        let velocity = self.velocity.tick(dt, self.autoplay.is_autoplay());
        self.ring.advance(dt, velocity);
        let repaired = self.ring.repair_non_finite();
        if repaired > 0 {
            warn!("slot_depth_non_finite repaired={repaired}");
        }

        if self.images.is_empty() {
            return &self.frame;
        }

        let range = self.ring.depth_range();
        let viewer_depth = self.viewer_plane.viewer_depth(range);
        for slot in self.ring.slots() {
            let n = self.viewer_plane.normalized_distance(slot.depth, range);
            let m = self.modulator.modulate(n);
            let offset = self.layout.get(slot.slot_index);
            self.frame.slots.push(SlotFrame {
                slot_index: slot.slot_index,
                image_index: slot.image_index,
                position: Vec3::new(
                    offset.map_or(0.0, |o| o.x),
                    offset.map_or(0.0, |o| o.y),
                    slot.depth - viewer_depth,
                ),
                scale: Vec2::splat(m.scale),
                opacity: m.opacity,
                blur: m.blur,
            });
        }
        &self.frame
    }

    /// Release the idle timer and stop producing frames. Safe to call more than once.
    pub fn shutdown(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.autoplay.stop();
        self.velocity.reset();
        self.frame.clear();
        debug!("gallery_shutdown");
    }

    pub fn idle_timer_armed(&self) -> bool {
        self.autoplay.timer().is_armed()
    }
}

impl Drop for GalleryEngine {
    fn drop(&mut self) {
        self.shutdown();
    }
}
