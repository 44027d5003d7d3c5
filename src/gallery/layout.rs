use std::f32::consts::{PI, TAU};

const H_ANGLE_STEP: f32 = 2.618;
const V_ANGLE_STEP: f32 = 1.618;
const V_ANGLE_PHASE: f32 = PI / 3.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutOffset {
    pub slot_index: usize,
    pub x: f32,
    pub y: f32,
}

/// Deterministic off-axis scatter for `visible` slots.
///
/// Two angular sequences with incommensurate steps spread the planes around the
/// depth axis; the radius cycles through a few rings so displacement stays within
/// `max_x` / `max_y`. Depends only on the slot index, so the same configuration
/// always produces the same layout.
pub fn generate_layout(visible: usize, max_x: f32, max_y: f32) -> Vec<LayoutOffset> {
    (0..visible).map(|i| offset_for(i, max_x, max_y)).collect()
}

pub fn offset_for(slot_index: usize, max_x: f32, max_y: f32) -> LayoutOffset {
    let i = slot_index as f32;
    let h_angle = (i * H_ANGLE_STEP) % TAU;
    let v_angle = (i * V_ANGLE_STEP + V_ANGLE_PHASE) % TAU;
    let h_radius = (slot_index % 3) as f32 * 1.2;
    let v_radius = ((slot_index + 1) % 4) as f32 * 0.8;
    LayoutOffset {
        slot_index,
        x: h_angle.sin() * h_radius * max_x / 3.0,
        y: v_angle.cos() * v_radius * max_y / 4.0,
    }
}
