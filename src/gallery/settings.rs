use crate::gallery::modulator::{Bands, ViewerPlane, VisualModulator};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_DEPTH_RANGE: f32 = 50.0;
pub const DEFAULT_Z_SPACING: f32 = 4.0;
pub const DEFAULT_IDLE_THRESHOLD: Duration = Duration::from_millis(3000);
pub const DEFAULT_IDLE_POLL: Duration = Duration::from_secs(1);

/// Construction input for [`crate::gallery::GalleryEngine`].
#[derive(Debug, Clone, PartialEq)]
pub struct GallerySettings {
    pub speed: f32,
    pub visible_count: usize,
    /// `None` derives `visible_count * z_spacing`.
    pub depth_range: Option<f32>,
    pub z_spacing: f32,
    pub depth_speed_scale: f32,
    pub damping: f32,
    pub autoplay_rate: f32,
    pub idle_threshold: Duration,
    pub idle_poll_interval: Duration,
    pub viewer_plane: ViewerPlane,
    pub fade: Bands,
    pub blur: Bands,
    pub max_blur: f32,
    pub min_scale: f32,
    pub max_scale: f32,
    pub max_offset_x: f32,
    pub max_offset_y: f32,
}

impl Default for GallerySettings {
    fn default() -> Self {
        Self {
            speed: 1.0,
            visible_count: 12,
            depth_range: None,
            z_spacing: DEFAULT_Z_SPACING,
            depth_speed_scale: 10.0,
            damping: 0.95,
            autoplay_rate: 0.3,
            idle_threshold: DEFAULT_IDLE_THRESHOLD,
            idle_poll_interval: DEFAULT_IDLE_POLL,
            viewer_plane: ViewerPlane::Front,
            fade: Bands::new(0.05, 0.2),
            blur: Bands::new(0.1, 0.03),
            max_blur: 8.0,
            min_scale: 0.1,
            max_scale: 2.0,
            max_offset_x: 8.0,
            max_offset_y: 8.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    #[error("{field} must be a finite number greater than zero (got {value})")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} must be a finite number >= 0 (got {value})")]
    Negative { field: &'static str, value: f32 },
    #[error("min_scale ({min}) must not exceed max_scale ({max})")]
    ScaleOrder { min: f32, max: f32 },
    #[error("{field} bands overlap: near {near} + far {far} must stay below 1")]
    BandsOverlap {
        field: &'static str,
        near: f32,
        far: f32,
    },
    #[error("damping must be in (0, 1] (got {0})")]
    Damping(f32),
    #[error("{0} must be longer than zero")]
    ZeroDuration(&'static str),
}

fn positive(field: &'static str, value: f32) -> Result<(), SettingsError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SettingsError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), SettingsError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SettingsError::Negative { field, value })
    }
}

fn bands(field: &'static str, b: Bands) -> Result<(), SettingsError> {
    non_negative(field, b.near)?;
    non_negative(field, b.far)?;
    if b.near + b.far >= 1.0 {
        return Err(SettingsError::BandsOverlap {
            field,
            near: b.near,
            far: b.far,
        });
    }
    Ok(())
}

impl GallerySettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        positive("speed", self.speed)?;
        if let Some(d) = self.depth_range {
            positive("depth_range", d)?;
        }
        positive("z_spacing", self.z_spacing)?;
        positive("depth_speed_scale", self.depth_speed_scale)?;
        if !(self.damping > 0.0 && self.damping <= 1.0) {
            return Err(SettingsError::Damping(self.damping));
        }
        non_negative("autoplay_rate", self.autoplay_rate)?;
        if self.idle_threshold.is_zero() {
            return Err(SettingsError::ZeroDuration("idle_threshold"));
        }
        if self.idle_poll_interval.is_zero() {
            return Err(SettingsError::ZeroDuration("idle_poll_interval"));
        }
        bands("fade", self.fade)?;
        bands("blur", self.blur)?;
        non_negative("max_blur", self.max_blur)?;
        non_negative("min_scale", self.min_scale)?;
        non_negative("max_scale", self.max_scale)?;
        if self.min_scale > self.max_scale {
            return Err(SettingsError::ScaleOrder {
                min: self.min_scale,
                max: self.max_scale,
            });
        }
        non_negative("max_offset_x", self.max_offset_x)?;
        non_negative("max_offset_y", self.max_offset_y)?;
        Ok(())
    }

    pub fn resolved_depth_range(&self) -> f32 {
        if let Some(d) = self.depth_range {
            return d;
        }
        let derived = self.visible_count as f32 * self.z_spacing;
        if derived.is_finite() && derived > 0.0 {
            derived
        } else {
            DEFAULT_DEPTH_RANGE
        }
    }

    pub fn modulator(&self) -> VisualModulator {
        VisualModulator {
            min_scale: self.min_scale,
            max_scale: self.max_scale,
            fade: self.fade,
            blur: self.blur,
            max_blur: self.max_blur,
        }
    }
}
