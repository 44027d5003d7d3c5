use std::time::Duration;

use loop_gallery::gallery::{
    generate_layout, offset_for, Bands, GallerySettings, SettingsError, ViewerPlane,
    VisualModulator, DEFAULT_DEPTH_RANGE,
};

fn modulator() -> VisualModulator {
    VisualModulator {
        min_scale: 0.1,
        max_scale: 2.0,
        fade: Bands::new(0.05, 0.2),
        blur: Bands::new(0.1, 0.03),
        max_blur: 8.0,
    }
}

// ── Scale ──────────────────────────────────────────────────────────────────

#[test]
fn scale_hits_max_at_viewer_and_min_at_far_end() {
    let m = modulator();
    assert!((m.scale_at(0.0) - 2.0).abs() < 1e-6);
    assert!((m.scale_at(1.0) - 0.1).abs() < 1e-6);
    assert!((m.scale_at(0.5) - 1.05).abs() < 1e-6);
}

#[test]
fn scale_shrinks_monotonically_with_distance() {
    let m = modulator();
    let mut prev = f32::INFINITY;
    for i in 0..=100 {
        let s = m.scale_at(i as f32 / 100.0);
        assert!(s <= prev);
        prev = s;
    }
}

// ── Opacity ────────────────────────────────────────────────────────────────

#[test]
fn opacity_is_exactly_one_outside_fade_bands() {
    let m = modulator();
    for n in [0.051, 0.1, 0.3, 0.5, 0.7, 0.79] {
        assert_eq!(m.opacity_at(n), 1.0, "n = {n}");
    }
}

#[test]
fn opacity_fades_to_zero_at_both_ends() {
    let m = modulator();
    assert_eq!(m.opacity_at(0.0), 0.0);
    assert_eq!(m.opacity_at(1.0), 0.0);
    assert!((m.opacity_at(0.025) - 0.5).abs() < 1e-5);
    assert!((m.opacity_at(0.9) - 0.5).abs() < 1e-5);
}

#[test]
fn zero_width_bands_disable_fading() {
    let m = VisualModulator {
        fade: Bands::new(0.0, 0.0),
        ..modulator()
    };
    assert_eq!(m.opacity_at(0.0), 1.0);
    assert_eq!(m.opacity_at(1.0), 1.0);
}

// ── Blur ───────────────────────────────────────────────────────────────────

#[test]
fn blur_peaks_at_edges_and_clears_in_the_middle() {
    let m = modulator();
    assert!((m.blur_at(0.0) - 8.0).abs() < 1e-5);
    assert!((m.blur_at(1.0) - 8.0).abs() < 1e-5);
    assert_eq!(m.blur_at(0.5), 0.0);
    assert!((m.blur_at(0.05) - 4.0).abs() < 1e-4);
}

#[test]
fn modulate_bundles_all_three() {
    let out = modulator().modulate(0.5);
    assert_eq!(out.opacity, 1.0);
    assert_eq!(out.blur, 0.0);
    assert!((out.scale - 1.05).abs() < 1e-6);
}

// ── Viewer plane ───────────────────────────────────────────────────────────

#[test]
fn front_plane_measures_from_far_end_of_range() {
    let p = ViewerPlane::Front;
    assert_eq!(p.viewer_depth(50.0), 50.0);
    assert!((p.normalized_distance(0.0, 50.0) - 1.0).abs() < 1e-6);
    assert!((p.normalized_distance(25.0, 50.0) - 0.5).abs() < 1e-6);
    assert!(p.normalized_distance(49.99, 50.0) < 0.001);
}

#[test]
fn center_plane_is_symmetric() {
    let p = ViewerPlane::Center;
    assert_eq!(p.viewer_depth(50.0), 25.0);
    assert_eq!(p.normalized_distance(25.0, 50.0), 0.0);
    let a = p.normalized_distance(10.0, 50.0);
    let b = p.normalized_distance(40.0, 50.0);
    assert!((a - b).abs() < 1e-6);
    assert!((p.normalized_distance(0.0, 50.0) - 1.0).abs() < 1e-6);
}

#[test]
fn degenerate_range_reads_as_far_away() {
    assert_eq!(ViewerPlane::Front.normalized_distance(3.0, 0.0), 1.0);
    assert_eq!(ViewerPlane::Center.normalized_distance(f32::NAN, 10.0), 1.0);
}

// ── Spatial layout ─────────────────────────────────────────────────────────

#[test]
fn layout_is_deterministic_and_indexed() {
    let a = generate_layout(12, 8.0, 8.0);
    let b = generate_layout(12, 8.0, 8.0);
    assert_eq!(a, b);
    for (i, o) in a.iter().enumerate() {
        assert_eq!(o.slot_index, i);
        assert_eq!(*o, offset_for(i, 8.0, 8.0));
    }
}

#[test]
fn layout_prefix_is_stable_when_count_grows() {
    let small = generate_layout(5, 8.0, 8.0);
    let large = generate_layout(20, 8.0, 8.0);
    assert_eq!(&large[..5], &small[..]);
}

#[test]
fn layout_stays_within_bounds_and_spreads_out() {
    let layout = generate_layout(64, 8.0, 6.0);
    for o in &layout {
        assert!(o.x.abs() <= 8.0 && o.y.abs() <= 6.0, "{o:?}");
    }
    let distinct_x = layout
        .iter()
        .filter(|o| o.x.abs() > 0.5)
        .count();
    assert!(distinct_x > 16, "offsets clustered on the axis");
}

#[test]
fn slot_zero_sits_on_the_horizontal_axis() {
    let o = offset_for(0, 8.0, 8.0);
    assert_eq!(o.x, 0.0);
}

// ── Settings ───────────────────────────────────────────────────────────────

#[test]
fn default_settings_are_valid() {
    GallerySettings::default()
        .validate()
        .expect("defaults should validate");
}

#[test]
fn depth_range_is_derived_when_missing() {
    let s = GallerySettings {
        visible_count: 12,
        z_spacing: 3.0,
        depth_range: None,
        ..GallerySettings::default()
    };
    assert_eq!(s.resolved_depth_range(), 36.0);

    let empty = GallerySettings {
        visible_count: 0,
        ..GallerySettings::default()
    };
    assert_eq!(empty.resolved_depth_range(), DEFAULT_DEPTH_RANGE);

    let explicit = GallerySettings {
        depth_range: Some(30.0),
        ..GallerySettings::default()
    };
    assert_eq!(explicit.resolved_depth_range(), 30.0);
}

#[test]
fn settings_reject_bad_values() {
    let bad_speed = GallerySettings {
        speed: 0.0,
        ..GallerySettings::default()
    };
    assert!(matches!(
        bad_speed.validate(),
        Err(SettingsError::NotPositive { field: "speed", .. })
    ));

    let bad_depth = GallerySettings {
        depth_range: Some(f32::NAN),
        ..GallerySettings::default()
    };
    assert!(matches!(
        bad_depth.validate(),
        Err(SettingsError::NotPositive {
            field: "depth_range",
            ..
        })
    ));

    let overlap = GallerySettings {
        fade: Bands::new(0.6, 0.4),
        ..GallerySettings::default()
    };
    assert!(matches!(
        overlap.validate(),
        Err(SettingsError::BandsOverlap { field: "fade", .. })
    ));

    let inverted = GallerySettings {
        min_scale: 3.0,
        max_scale: 1.0,
        ..GallerySettings::default()
    };
    assert!(matches!(
        inverted.validate(),
        Err(SettingsError::ScaleOrder { .. })
    ));

    let no_damping = GallerySettings {
        damping: 1.5,
        ..GallerySettings::default()
    };
    assert!(matches!(no_damping.validate(), Err(SettingsError::Damping(_))));

    let zero_poll = GallerySettings {
        idle_poll_interval: Duration::ZERO,
        ..GallerySettings::default()
    };
    assert!(matches!(
        zero_poll.validate(),
        Err(SettingsError::ZeroDuration("idle_poll_interval"))
    ));
}

#[test]
fn settings_error_messages_name_the_field() {
    let err = GallerySettings {
        speed: -1.0,
        ..GallerySettings::default()
    }
    .validate()
    .expect_err("negative speed must fail");
    assert!(err.to_string().contains("speed"));
}
