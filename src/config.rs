use crate::gallery::{Bands, GallerySettings, ViewerPlane};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug, Clone)]
#[command(name = "loop-gallery", version, about = "Endless depth-scrolling image gallery in the terminal")]
pub struct Config {
    /// Image list: one `source` or `source | label` per line.
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    #[arg(long, default_value_t = 1.2)]
    pub speed: f32,

    #[arg(long, default_value_t = 12)]
    pub visible_count: usize,

    /// Total depth of the loop; derived from visible count and spacing when omitted.
    #[arg(long)]
    pub depth_range: Option<f32>,

    #[arg(long, default_value_t = 4.0)]
    pub z_spacing: f32,

    #[arg(long, default_value_t = 0.05)]
    pub near_fade: f32,

    #[arg(long, default_value_t = 0.2)]
    pub far_fade: f32,

    #[arg(long, default_value_t = 0.1)]
    pub blur_near: f32,

    #[arg(long, default_value_t = 0.03)]
    pub blur_far: f32,

    #[arg(long, default_value_t = 8.0)]
    pub max_blur: f32,

    #[arg(long, default_value_t = 0.1)]
    pub min_scale: f32,

    #[arg(long, default_value_t = 2.0)]
    pub max_scale: f32,

    #[arg(long, value_enum, default_value_t = ViewerPlaneArg::Front)]
    pub viewer_plane: ViewerPlaneArg,

    #[arg(long, default_value_t = 3000)]
    pub idle_ms: u64,

    #[arg(long, default_value_t = 60)]
    pub fps: u32,

    #[arg(long, value_enum, default_value_t = RendererMode::HalfBlock)]
    pub renderer: RendererMode,

    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub sync_updates: bool,

    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub auto_probe: bool,

    /// Write logs here; the terminal itself is taken by the gallery.
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RendererMode {
    #[value(alias = "ansi", alias = "text")]
    Ascii,
    #[value(name = "half-block", alias = "halfblock", alias = "half_block", alias = "hb")]
    HalfBlock,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ViewerPlaneArg {
    Front,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_tracing(self) -> tracing::Level {
        match self {
            Self::Error => tracing::Level::ERROR,
            Self::Warn => tracing::Level::WARN,
            Self::Info => tracing::Level::INFO,
            Self::Debug => tracing::Level::DEBUG,
            Self::Trace => tracing::Level::TRACE,
        }
    }
}

impl Config {
    pub fn gallery_settings(&self) -> GallerySettings {
        GallerySettings {
            speed: self.speed,
            visible_count: self.visible_count,
            depth_range: self.depth_range,
            z_spacing: self.z_spacing,
            idle_threshold: Duration::from_millis(self.idle_ms),
            viewer_plane: match self.viewer_plane {
                ViewerPlaneArg::Front => ViewerPlane::Front,
                ViewerPlaneArg::Center => ViewerPlane::Center,
            },
            fade: Bands::new(self.near_fade, self.far_fade),
            blur: Bands::new(self.blur_near, self.blur_far),
            max_blur: self.max_blur,
            min_scale: self.min_scale,
            max_scale: self.max_scale,
            ..GallerySettings::default()
        }
    }
}
