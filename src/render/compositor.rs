use crate::gallery::RenderFrame;
use crate::render::{TextureSource, TextureStatus};

pub const FOV_Y_DEGREES: f32 = 55.0;
/// World-space edge length of a quad at scale 1.
pub const QUAD_SIZE: f32 = 4.0;
pub const BACKGROUND_RGB: (u8, u8, u8) = (4, 4, 8);
const NEAR_PLANE: f32 = 0.5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompositeStats {
    pub drawn: usize,
    /// Texture for the slot's image not loaded yet.
    pub skipped_loading: usize,
    /// Fully transparent, behind the camera, or off screen.
    pub culled: usize,
}

/// Software rasterizer for gallery frames: a perspective camera at the origin
/// looking down -z, drawing each slot as a flat colored quad.
pub struct Compositor {
    w: usize,
    h: usize,
    /// Height / width of one pixel on screen.
    pixel_aspect: f32,
    pixels: Vec<u8>,
}

impl Compositor {
    pub fn new(w: usize, h: usize) -> Self {
        let mut c = Self {
            w: 0,
            h: 0,
            pixel_aspect: 1.0,
            pixels: Vec::new(),
        };
        c.resize(w, h);
        c
    }

    pub fn resize(&mut self, w: usize, h: usize) {
        self.w = w;
        self.h = h;
        self.pixels.resize(w.saturating_mul(h).saturating_mul(4), 0);
    }

    pub fn set_pixel_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.pixel_aspect = aspect;
        }
    }

    pub fn size(&self) -> (usize, usize) {
        (self.w, self.h)
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn clear(&mut self) {
        let (r, g, b) = BACKGROUND_RGB;
        for px in self.pixels.chunks_exact_mut(4) {
            px[0] = r;
            px[1] = g;
            px[2] = b;
            px[3] = 255;
        }
    }

    pub fn compose(&mut self, frame: &RenderFrame, textures: &dyn TextureSource) -> CompositeStats {
        self.clear();
        let mut stats = CompositeStats::default();
        if self.w == 0 || self.h == 0 {
            stats.culled = frame.len();
            return stats;
        }

        let focal = (self.h as f32 * 0.5) / (FOV_Y_DEGREES.to_radians() * 0.5).tan();
        let cx = self.w as f32 * 0.5;
        let cy = self.h as f32 * 0.5;

        for slot in frame.back_to_front() {
            if !slot.is_visible() {
                stats.culled += 1;
                continue;
            }
            let swatch = match textures.status(slot.image_index) {
                TextureStatus::Ready(s) => s,
                TextureStatus::Loading => {
                    stats.skipped_loading += 1;
                    continue;
                }
            };
            let dist = -slot.position.z;
            if dist < NEAR_PLANE {
                stats.culled += 1;
                continue;
            }

            let k = focal / dist;
            let size = slot.fit_aspect(swatch.aspect) * QUAD_SIZE;
            let half_w = size.x * 0.5 * k * self.pixel_aspect;
            let half_h = size.y * 0.5 * k;
            let center_x = cx + slot.position.x * k * self.pixel_aspect;
            let center_y = cy - slot.position.y * k;

            let rect = (
                center_x - half_w,
                center_y - half_h,
                center_x + half_w,
                center_y + half_h,
            );
            if self.fill_quad(rect, swatch.rgb, slot.opacity, slot.blur * 0.5) {
                stats.drawn += 1;
            } else {
                stats.culled += 1;
            }
        }
        stats
    }

    /// Alpha-blend a rect with edges feathered over `feather` pixels. False if nothing landed.
    fn fill_quad(
        &mut self,
        (x0, y0, x1, y1): (f32, f32, f32, f32),
        rgb: (u8, u8, u8),
        opacity: f32,
        feather: f32,
    ) -> bool {
        if !(x0.is_finite() && y0.is_finite() && x1.is_finite() && y1.is_finite()) {
            return false;
        }
        let px_start = x0.floor().max(0.0) as usize;
        let py_start = y0.floor().max(0.0) as usize;
        let px_end = (x1.ceil().max(0.0) as usize).min(self.w);
        let py_end = (y1.ceil().max(0.0) as usize).min(self.h);
        if px_start >= px_end || py_start >= py_end {
            return false;
        }

        let opacity = opacity.clamp(0.0, 1.0);
        let (sr, sg, sb) = (rgb.0 as f32, rgb.1 as f32, rgb.2 as f32);
        let mut touched = false;

        for py in py_start..py_end {
            let fy = py as f32 + 0.5;
            for px in px_start..px_end {
                let fx = px as f32 + 0.5;
                let edge = (fx - x0).min(x1 - fx).min(fy - y0).min(y1 - fy);
                if edge <= 0.0 {
                    continue;
                }
                let soft = if feather > 0.0 {
                    (edge / feather).clamp(0.0, 1.0)
                } else {
                    1.0
                };
                let a = opacity * soft;
                if a <= 0.0 {
                    continue;
                }
                let i = (py * self.w + px) * 4;
                let blend = |dst: u8, src: f32| (dst as f32 * (1.0 - a) + src * a).round() as u8;
                self.pixels[i] = blend(self.pixels[i], sr);
                self.pixels[i + 1] = blend(self.pixels[i + 1], sg);
                self.pixels[i + 2] = blend(self.pixels[i + 2], sb);
                touched = true;
            }
        }
        touched
    }
}
