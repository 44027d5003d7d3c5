use tracing::debug;

/// One recycled rendering position. The pool is allocated once and mutated in place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slot {
    pub slot_index: usize,
    pub depth: f32,
    pub image_index: usize,
}

/// Fixed-size pool of slots cycling through `[0, depth_range)`.
#[derive(Debug, Clone)]
pub struct SlotRing {
    slots: Vec<Slot>,
    depth_range: f32,
    image_count: usize,
    index_advance: usize,
    speed_scale: f32,
}

/// Image steps applied to a slot per full lap: `N mod M`, or `M` when that is zero.
pub fn index_advance(visible: usize, images: usize) -> usize {
    if images == 0 {
        return 0;
    }
    match visible % images {
        0 => images,
        r => r,
    }
}

/// Modulo that never returns a negative value.
pub fn wrap_index(value: i64, modulus: usize) -> usize {
    if modulus == 0 {
        return 0;
    }
    let m = modulus as i64;
    (((value % m) + m) % m) as usize
}

/// Wrap a depth into `[0, range)`. Non-finite input maps to 0.
pub fn wrap_depth(depth: f32, range: f32) -> f32 {
    if !depth.is_finite() || !(range > 0.0) {
        return 0.0;
    }
    let d = ((depth % range) + range) % range;
    // `(-tiny + range) % range` can round to exactly `range` in f32.
    if d >= range || d < 0.0 { 0.0 } else { d }
}

/// Split an unwrapped depth into whole laps and a depth in `[0, range)`.
///
/// The lap count always agrees with the returned depth:
/// `laps * range + depth` reproduces the input up to rounding.
fn split_laps(target: f64, range: f32) -> (i64, f32) {
    let r = range as f64;
    let mut laps = (target / r).floor();
    let mut rem = target - laps * r;
    if rem < 0.0 {
        rem += r;
        laps -= 1.0;
    } else if rem >= r {
        rem -= r;
        laps += 1.0;
    }
    let mut depth = rem as f32;
    // Narrowing can land exactly on `range`; that is the start of the next lap.
    if depth >= range {
        depth = 0.0;
        laps += 1.0;
    }
    (laps as i64, depth.max(0.0))
}

impl SlotRing {
    pub fn new(visible: usize, image_count: usize, depth_range: f32, speed_scale: f32) -> Self {
        let slots = (0..visible)
            .map(|i| Slot {
                slot_index: i,
                depth: wrap_depth((depth_range / visible as f32) * i as f32, depth_range),
                image_index: if image_count > 0 { i % image_count } else { 0 },
            })
            .collect();
        Self {
            slots,
            depth_range,
            image_count,
            index_advance: index_advance(visible, image_count),
            speed_scale,
        }
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn depth_range(&self) -> f32 {
        self.depth_range
    }

    pub fn image_count(&self) -> usize {
        self.image_count
    }

    pub fn index_advance(&self) -> usize {
        self.index_advance
    }

    /// Move every slot by `velocity * dt * speed_scale` and rebind images on wraparound.
    pub fn advance(&mut self, dt: f32, velocity: f32) {
        let step = velocity as f64 * dt as f64 * self.speed_scale as f64;
        if step == 0.0 || !step.is_finite() || !(self.depth_range > 0.0) {
            return;
        }
        let range = self.depth_range;
        let m = self.image_count;
        let adv = self.index_advance as i64;

        for slot in &mut self.slots {
            let (laps, depth) = split_laps(slot.depth as f64 + step, range);

            if laps != 0 && m > 0 {
                let before = slot.image_index;
                slot.image_index = wrap_index(
                    slot.image_index as i64 + laps.saturating_mul(adv) % m as i64,
                    m,
                );
                debug!(
                    "slot_wrap slot={} laps={} image {}->{}",
                    slot.slot_index, laps, before, slot.image_index
                );
            }

            slot.depth = depth;
        }
    }

    /// Reset any slot whose depth went non-finite. Returns how many were repaired.
    pub fn repair_non_finite(&mut self) -> usize {
        let mut repaired = 0;
        for slot in &mut self.slots {
            if !slot.depth.is_finite() {
                slot.depth = 0.0;
                repaired += 1;
            }
        }
        repaired
    }
}
