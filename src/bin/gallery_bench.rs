use std::time::{Duration, Instant};

use loop_gallery::gallery::{GalleryEngine, GallerySettings, ImageRef, InputEvent, Direction};
use loop_gallery::render::{Compositor, SwatchTextures};

struct Args {
    ticks: usize,
    images: usize,
    visible: usize,
    fps: f32,
    seed: u64,
    w: usize,
    h: usize,
    compose: bool,
    ci_smoke: bool,
    max_ms: f64,
}

fn parse_args() -> Args {
    let mut args = Args {
        ticks: 3600,
        images: 18,
        visible: 12,
        fps: 60.0,
        seed: 7,
        w: 160,
        h: 88,
        compose: true,
        ci_smoke: false,
        max_ms: 2.0,
    };

    let argv = std::env::args().skip(1).collect::<Vec<_>>();
    let mut i = 0usize;
    while i < argv.len() {
        let k = argv[i].as_str();
        let v = argv.get(i + 1).map(|s| s.as_str());
        match (k, v) {
            ("--ticks", Some(x)) => {
                if let Ok(n) = x.parse::<usize>() {
                    args.ticks = n.max(1);
                }
                i += 2;
            }
            ("--images", Some(x)) => {
                if let Ok(n) = x.parse::<usize>() {
                    args.images = n;
                }
                i += 2;
            }
            ("--visible", Some(x)) => {
                if let Ok(n) = x.parse::<usize>() {
                    args.visible = n;
                }
                i += 2;
            }
            ("--fps", Some(x)) => {
                if let Ok(f) = x.parse::<f32>() {
                    args.fps = f.max(1.0);
                }
                i += 2;
            }
            ("--seed", Some(x)) => {
                if let Ok(n) = x.parse::<u64>() {
                    args.seed = n;
                }
                i += 2;
            }
            ("--w", Some(x)) => {
                if let Ok(n) = x.parse::<usize>() {
                    args.w = n.max(1);
                }
                i += 2;
            }
            ("--h", Some(x)) => {
                if let Ok(n) = x.parse::<usize>() {
                    args.h = n.max(1);
                }
                i += 2;
            }
            ("--compose", Some(x)) => {
                if let Some(b) = parse_bool(x) {
                    args.compose = b;
                }
                i += 2;
            }
            ("--ci-smoke", Some(x)) if !x.starts_with("--") => {
                args.ci_smoke = parse_bool(x).unwrap_or(true);
                i += 2;
            }
            ("--ci-smoke", _) => {
                args.ci_smoke = true;
                i += 1;
            }
            ("--max-ms", Some(x)) => {
                if let Ok(v) = x.parse::<f64>() {
                    args.max_ms = v.max(0.001);
                }
                i += 2;
            }
            _ => {
                i += 1;
            }
        }
    }
    args
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Bursts of wheel and key input separated by idle stretches long enough for autoplay.
fn scripted_input(rng: &mut fastrand::Rng, tick: usize) -> Option<InputEvent> {
    let phase = tick % 600;
    if phase >= 240 {
        return None;
    }
    if !rng.bool() || rng.u8(..) > 40 {
        return None;
    }
    Some(match rng.u8(..4) {
        0 => InputEvent::Wheel {
            delta_y: rng.f32() * 240.0 - 60.0,
        },
        1 => InputEvent::Key(Direction::Down),
        2 => InputEvent::Key(Direction::Up),
        _ => InputEvent::Key(Direction::Right),
    })
}

fn main() {
    let args = parse_args();
    let images = (0..args.images)
        .map(|i| ImageRef::labeled(format!("/bench/{i:03}.jpg"), format!("Bench {i}")))
        .collect::<Vec<_>>();
    let settings = GallerySettings {
        visible_count: args.visible,
        ..GallerySettings::default()
    };

    let origin = Instant::now();
    let textures = SwatchTextures::preloaded(&images);
    let mut engine = match GalleryEngine::new(images, &settings) {
        Ok(e) => e,
        Err(err) => {
            eprintln!("invalid settings: {err}");
            std::process::exit(2);
        }
    };
    let mut compositor = Compositor::new(args.w, args.h);
    let mut rng = fastrand::Rng::with_seed(args.seed);

    let step = Duration::from_secs_f32(1.0 / args.fps);
    let dt = step.as_secs_f32();
    let range = engine.ring().depth_range();
    let image_count = engine.images().len();

    let mut violations = 0usize;
    let mut wraps = 0usize;
    let mut autoplay_ticks = 0usize;
    let mut drawn_total = 0usize;
    let mut prev_images: Vec<usize> = engine.ring().slots().iter().map(|s| s.image_index).collect();

    let wall = Instant::now();
    for tick in 0..args.ticks {
        let now = origin + step.saturating_mul(tick as u32);
        if let Some(ev) = scripted_input(&mut rng, tick) {
            engine.handle_input(ev, now);
        }
        let frame = engine.tick(now, dt);
        if args.compose {
            drawn_total += compositor.compose(frame, &textures).drawn;
        }
        if engine.state().autoplay {
            autoplay_ticks += 1;
        }

        for (slot, prev) in engine.ring().slots().iter().zip(prev_images.iter_mut()) {
            if !(slot.depth >= 0.0 && slot.depth < range) {
                violations += 1;
            }
            if image_count > 0 && slot.image_index >= image_count {
                violations += 1;
            }
            if slot.image_index != *prev {
                wraps += 1;
                *prev = slot.image_index;
            }
        }
    }
    let elapsed = wall.elapsed().as_secs_f64() * 1000.0;
    let per_tick = elapsed / args.ticks as f64;

    println!(
        "ticks={} slots={} images={} compose={} ms/tick={:.4} total_ms={:.1}",
        args.ticks, args.visible, args.images, args.compose, per_tick, elapsed
    );
    println!(
        "image_changes={} autoplay_ticks={} drawn_avg={:.2} violations={}",
        wraps,
        autoplay_ticks,
        drawn_total as f64 / args.ticks as f64,
        violations
    );

    if args.ci_smoke {
        if violations > 0 || per_tick > args.max_ms {
            eprintln!("CI smoke: FAIL");
            if violations > 0 {
                eprintln!("  invariant violations: {violations}");
            }
            if per_tick > args.max_ms {
                eprintln!("  slow tick: {:.4} ms > {:.4}", per_tick, args.max_ms);
            }
            std::process::exit(1);
        }
        println!("CI smoke: PASS");
    }
}
