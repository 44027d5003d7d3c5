use std::path::Path;
use std::time::Duration;

use clap::Parser;
use loop_gallery::config::{Config, LogLevel, RendererMode};
use loop_gallery::gallery::{GallerySettings, ImageRef, ViewerPlane};
use loop_gallery::manifest::{builtin_manifest, ImageManifest, ManifestError};

#[test]
fn manifest_parses_sources_labels_and_comments() {
    let text = r#"
        # storefront
        /beans.jpg | Brazilian Beans
        /hoodie.jpg

        /cap.jpg |   Cap
    "#;
    let m = ImageManifest::parse(text).expect("manifest should parse");
    assert_eq!(m.len(), 3);
    assert_eq!(m.images[0], ImageRef::labeled("/beans.jpg", "Brazilian Beans"));
    assert_eq!(m.images[1], ImageRef::from("/hoodie.jpg"));
    assert_eq!(m.images[2].label, "Cap");
}

#[test]
fn manifest_reports_line_of_empty_source() {
    let err = ImageManifest::parse("/a.jpg\n# note\n | orphan label\n")
        .expect_err("empty source must fail");
    assert!(matches!(err, ManifestError::Parse { line: 3, .. }));
    assert!(err.to_string().contains("line 3"));
}

#[test]
fn empty_manifest_is_valid_and_empty() {
    let m = ImageManifest::parse("# nothing here\n\n").expect("comments only should parse");
    assert!(m.is_empty());
    assert!(m.into_images().is_empty());
}

#[test]
fn manifest_text_reparses_to_same_list() {
    let m = builtin_manifest();
    let again = ImageManifest::parse(&m.to_text()).expect("rendered manifest should parse");
    assert_eq!(again, m);
}

#[test]
fn missing_manifest_file_is_an_io_error() {
    let err = ImageManifest::load(Path::new("/definitely/not/here/gallery.txt"))
        .expect_err("missing file must fail");
    assert!(matches!(err, ManifestError::Io(_)));
}

#[test]
fn builtin_catalog_is_labeled() {
    let m = builtin_manifest();
    assert!(m.len() >= 3);
    assert!(m.images.iter().all(|img| !img.label.is_empty()));
}

// ── CLI config ─────────────────────────────────────────────────────────────

#[test]
fn cli_defaults_produce_valid_settings() {
    let cfg = Config::parse_from(["loop-gallery"]);
    assert_eq!(cfg.renderer, RendererMode::HalfBlock);
    assert_eq!(cfg.log_level, LogLevel::Info);
    assert!(cfg.log_file.is_none());

    let s = cfg.gallery_settings();
    s.validate().expect("CLI defaults should validate");
    assert_eq!(s.visible_count, 12);
    assert_eq!(s.idle_threshold, Duration::from_millis(3000));
    assert_eq!(s.viewer_plane, ViewerPlane::Front);
    assert_eq!(s.damping, GallerySettings::default().damping);
}

#[test]
fn cli_flags_flow_into_settings() {
    let cfg = Config::parse_from([
        "loop-gallery",
        "--speed",
        "2.5",
        "--visible-count",
        "6",
        "--depth-range",
        "30",
        "--viewer-plane",
        "center",
        "--idle-ms",
        "1500",
        "--renderer",
        "ascii",
        "--max-scale",
        "3",
    ]);
    assert_eq!(cfg.renderer, RendererMode::Ascii);

    let s = cfg.gallery_settings();
    assert_eq!(s.speed, 2.5);
    assert_eq!(s.visible_count, 6);
    assert_eq!(s.resolved_depth_range(), 30.0);
    assert_eq!(s.viewer_plane, ViewerPlane::Center);
    assert_eq!(s.idle_threshold, Duration::from_millis(1500));
    assert_eq!(s.max_scale, 3.0);
}

#[test]
fn renderer_aliases_are_accepted() {
    let cfg = Config::parse_from(["loop-gallery", "--renderer", "hb"]);
    assert_eq!(cfg.renderer, RendererMode::HalfBlock);
    assert!(Config::try_parse_from(["loop-gallery", "--renderer", "sixel"]).is_err());
}

#[test]
fn bad_cli_values_fail_validation() {
    let cfg = Config::parse_from(["loop-gallery", "--min-scale", "5", "--max-scale", "1"]);
    assert!(cfg.gallery_settings().validate().is_err());
}
