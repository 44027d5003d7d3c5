use glam::{Vec2, Vec3};

/// An image in the registry. Built once at the boundary; the engine only stores indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    pub source: String,
    pub label: String,
}

impl ImageRef {
    pub fn labeled(source: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            label: label.into(),
        }
    }
}

impl From<&str> for ImageRef {
    fn from(source: &str) -> Self {
        Self::labeled(source, "")
    }
}

impl From<String> for ImageRef {
    fn from(source: String) -> Self {
        Self::labeled(source, "")
    }
}

/// Per-slot render data for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotFrame {
    pub slot_index: usize,
    pub image_index: usize,
    pub position: Vec3,
    pub scale: Vec2,
    pub opacity: f32,
    pub blur: f32,
}

impl SlotFrame {
    /// Stretch the uniform scale to a texture's width/height ratio.
    pub fn fit_aspect(&self, aspect: f32) -> Vec2 {
        if !(aspect.is_finite() && aspect > 0.0) {
            return self.scale;
        }
        if aspect > 1.0 {
            Vec2::new(self.scale.x * aspect, self.scale.y)
        } else {
            Vec2::new(self.scale.x, self.scale.y / aspect)
        }
    }

    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }
}

/// Ordered by slot index. Reused across ticks by the engine.
#[derive(Debug, Clone, Default)]
pub struct RenderFrame {
    pub slots: Vec<SlotFrame>,
}

impl RenderFrame {
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Farthest first, for painter's-order drawing.
    pub fn back_to_front(&self) -> Vec<&SlotFrame> {
        let mut order: Vec<&SlotFrame> = self.slots.iter().collect();
        order.sort_by(|a, b| a.position.z.total_cmp(&b.position.z));
        order
    }

    /// The most opaque, nearest slot; what a HUD would call "now showing".
    pub fn focus(&self) -> Option<&SlotFrame> {
        self.slots
            .iter()
            .filter(|s| s.opacity >= 0.999)
            .max_by(|a, b| a.position.z.total_cmp(&b.position.z))
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
    }
}
