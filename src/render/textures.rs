use crate::gallery::ImageRef;
use std::time::{Duration, Instant};

/// Stand-in for a decoded texture: a flat color and an aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Swatch {
    pub rgb: (u8, u8, u8),
    pub aspect: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextureStatus {
    Ready(Swatch),
    Loading,
}

/// Resolves image indices to drawable textures.
pub trait TextureSource {
    fn status(&self, image_index: usize) -> TextureStatus;
}

/// Deterministic swatches keyed by image source, becoming ready one by one.
pub struct SwatchTextures {
    swatches: Vec<Swatch>,
    ready_at: Vec<Instant>,
    ready: Vec<bool>,
}

const ASPECTS: [f32; 4] = [4.0 / 3.0, 3.0 / 4.0, 1.0, 3.0 / 2.0];

impl SwatchTextures {
    /// `stagger` delays image `i` by `i * stagger` from `start`.
    pub fn new(images: &[ImageRef], start: Instant, stagger: Duration) -> Self {
        let swatches: Vec<Swatch> = images.iter().map(|img| swatch_for(&img.source)).collect();
        let ready_at = (0..images.len())
            .map(|i| start + stagger.saturating_mul(u32::try_from(i).unwrap_or(u32::MAX)))
            .collect();
        Self {
            ready: vec![false; swatches.len()],
            swatches,
            ready_at,
        }
    }

    /// Everything available up front.
    pub fn preloaded(images: &[ImageRef]) -> Self {
        let now = Instant::now();
        let mut t = Self::new(images, now, Duration::ZERO);
        t.refresh(now);
        t
    }

    pub fn refresh(&mut self, now: Instant) {
        for (flag, at) in self.ready.iter_mut().zip(&self.ready_at) {
            if !*flag && now >= *at {
                *flag = true;
            }
        }
    }

    pub fn loaded_count(&self) -> usize {
        self.ready.iter().filter(|r| **r).count()
    }

    pub fn len(&self) -> usize {
        self.swatches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.swatches.is_empty()
    }
}

impl TextureSource for SwatchTextures {
    fn status(&self, image_index: usize) -> TextureStatus {
        match (self.swatches.get(image_index), self.ready.get(image_index)) {
            (Some(s), Some(true)) => TextureStatus::Ready(*s),
            _ => TextureStatus::Loading,
        }
    }
}

/// FNV-1a over the source, spread into a saturated color.
pub(crate) fn swatch_for(source: &str) -> Swatch {
    let mut h: u32 = 0x811c_9dc5;
    for b in source.bytes() {
        h ^= b as u32;
        h = h.wrapping_mul(0x0100_0193);
    }
    let hue = (h % 360) as f32;
    let (r, g, b) = hsv_to_rgb(hue, 0.55, 0.92);
    Swatch {
        rgb: (r, g, b),
        aspect: ASPECTS[((h >> 12) % ASPECTS.len() as u32) as usize],
    }
}

fn hsv_to_rgb(h: f32, s: f32, v: f32) -> (u8, u8, u8) {
    let c = v * s;
    let hp = (h / 60.0) % 6.0;
    let x = c * (1.0 - ((hp % 2.0) - 1.0).abs());
    let (r1, g1, b1) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = v - c;
    let to_u8 = |f: f32| ((f + m).clamp(0.0, 1.0) * 255.0).round() as u8;
    (to_u8(r1), to_u8(g1), to_u8(b1))
}
