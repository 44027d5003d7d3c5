/// Where the viewer sits along the depth axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ViewerPlane {
    /// Viewer at depth `D`; slots approach as depth grows.
    #[default]
    Front,
    /// Viewer at depth `D / 2`; slots fade symmetrically on both sides.
    Center,
}

impl ViewerPlane {
    pub fn viewer_depth(self, depth_range: f32) -> f32 {
        match self {
            Self::Front => depth_range,
            Self::Center => depth_range * 0.5,
        }
    }

    /// Distance from the viewer normalised to `[0, 1]`.
    pub fn normalized_distance(self, depth: f32, depth_range: f32) -> f32 {
        if !(depth_range > 0.0) {
            return 1.0;
        }
        let n = match self {
            Self::Front => (depth_range - depth) / depth_range,
            Self::Center => (depth - depth_range * 0.5).abs() / (depth_range * 0.5),
        };
        if n.is_finite() { n.clamp(0.0, 1.0) } else { 1.0 }
    }
}

/// Widths (in normalised distance) of the bands next to the viewer and at the far end.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bands {
    pub near: f32,
    pub far: f32,
}

impl Bands {
    pub const fn new(near: f32, far: f32) -> Self {
        Self { near, far }
    }

    /// 0 at either outer edge, 1 from the inner edge of each band inward.
    fn ramp(self, n: f32) -> f32 {
        if self.near > 0.0 && n < self.near {
            return (n / self.near).clamp(0.0, 1.0);
        }
        if self.far > 0.0 && n > 1.0 - self.far {
            return ((1.0 - n) / self.far).clamp(0.0, 1.0);
        }
        1.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Modulation {
    pub opacity: f32,
    pub scale: f32,
    pub blur: f32,
}

/// Maps distance from the viewer to opacity, scale and blur.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisualModulator {
    pub min_scale: f32,
    pub max_scale: f32,
    pub fade: Bands,
    pub blur: Bands,
    pub max_blur: f32,
}

impl VisualModulator {
    pub fn scale_at(&self, n: f32) -> f32 {
        let n = n.clamp(0.0, 1.0);
        self.min_scale + (self.max_scale - self.min_scale) * (1.0 - n)
    }

    pub fn opacity_at(&self, n: f32) -> f32 {
        self.fade.ramp(n.clamp(0.0, 1.0))
    }

    pub fn blur_at(&self, n: f32) -> f32 {
        self.max_blur * (1.0 - self.blur.ramp(n.clamp(0.0, 1.0)))
    }

    pub fn modulate(&self, n: f32) -> Modulation {
        Modulation {
            opacity: self.opacity_at(n),
            scale: self.scale_at(n),
            blur: self.blur_at(n),
        }
    }
}
