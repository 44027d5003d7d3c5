use crate::capability::probe_runtime;
use crate::config::{Config, RendererMode};
use crate::gallery::{Direction, GalleryEngine, InputEvent};
use crate::manifest::{builtin_manifest, ImageManifest};
use crate::render::{AsciiRenderer, Compositor, Frame, HalfBlockRenderer, Renderer, SwatchTextures};
use crate::terminal::TerminalGuard;
use anyhow::Context;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind};
use std::io::BufWriter;
use std::time::{Duration, Instant};
use tracing::info;

/// Browser-style delta for one wheel notch.
pub const WHEEL_NOTCH_DELTA: f32 = 100.0;
/// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f32 = 2.0;
/// Delay between successive swatches becoming available.
const TEXTURE_STAGGER: Duration = Duration::from_millis(150);

pub fn init_logging(cfg: &Config) -> anyhow::Result<()> {
    let Some(path) = cfg.log_file.as_ref() else {
        return Ok(());
    };
    let file = std::fs::File::create(path)
        .with_context(|| format!("create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .with_max_level(cfg.log_level.to_tracing())
        .try_init()
        .map_err(|e| anyhow::anyhow!("init logging: {e}"))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyAction {
    Quit,
    Steer(InputEvent),
    ToggleHud,
    ToggleHelp,
    Ignore,
}

pub fn map_key(code: KeyCode, mods: KeyModifiers) -> KeyAction {
    if mods.contains(KeyModifiers::CONTROL) && matches!(code, KeyCode::Char('c')) {
        return KeyAction::Quit;
    }
    match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => KeyAction::Quit,
        KeyCode::Up => KeyAction::Steer(InputEvent::Key(Direction::Up)),
        KeyCode::Down => KeyAction::Steer(InputEvent::Key(Direction::Down)),
        KeyCode::Left => KeyAction::Steer(InputEvent::Key(Direction::Left)),
        KeyCode::Right => KeyAction::Steer(InputEvent::Key(Direction::Right)),
        KeyCode::Char('i') | KeyCode::Char('I') => KeyAction::ToggleHud,
        KeyCode::Char('?') | KeyCode::Char('h') | KeyCode::Char('H') => KeyAction::ToggleHelp,
        _ => KeyAction::Ignore,
    }
}

pub fn map_scroll(kind: MouseEventKind) -> Option<InputEvent> {
    match kind {
        MouseEventKind::ScrollDown => Some(InputEvent::Wheel {
            delta_y: WHEEL_NOTCH_DELTA,
        }),
        MouseEventKind::ScrollUp => Some(InputEvent::Wheel {
            delta_y: -WHEEL_NOTCH_DELTA,
        }),
        _ => None,
    }
}

pub fn run(cfg: Config) -> anyhow::Result<()> {
    let manifest = match cfg.manifest.as_deref() {
        Some(path) => ImageManifest::load(path)
            .with_context(|| format!("load manifest {}", path.display()))?,
        None => builtin_manifest(),
    };
    let images = manifest.into_images();
    let start = Instant::now();
    let mut textures = SwatchTextures::new(&images, start, TEXTURE_STAGGER);
    let mut engine = GalleryEngine::new(images, &cfg.gallery_settings())
        .context("invalid gallery settings")?;

    let caps = probe_runtime(cfg.renderer, cfg.auto_probe);
    for note in caps.notes() {
        info!("capability {note}");
    }

    let _term = TerminalGuard::new()?;
    let mut out = BufWriter::new(TerminalGuard::stdout());

    let mut renderer: Box<dyn Renderer> = match caps.renderer {
        RendererMode::HalfBlock => Box::new(HalfBlockRenderer::new()),
        RendererMode::Ascii => Box::new(AsciiRenderer::new()),
    };
    let (px_w_mul, px_h_mul) = renderer.cell_pixels();
    let mut compositor = Compositor::new(0, 0);
    compositor.set_pixel_aspect(CELL_ASPECT * px_w_mul as f32 / px_h_mul as f32);

    let mut last_size = crossterm::terminal::size().context("get terminal size")?;
    if last_size.1 < 2 || last_size.0 < 4 {
        return Err(anyhow::anyhow!(
            "terminal too small (need at least 4x2, got {}x{})",
            last_size.0,
            last_size.1
        ));
    }

    let mut show_hud = true;
    let mut show_help = false;
    let mut fps = FpsCounter::new();
    let mut last_frame = start;
    let capability_label = caps.status_label();

    loop {
        let now = Instant::now();

        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(k) if k.kind != KeyEventKind::Release => {
                    match map_key(k.code, k.modifiers) {
                        KeyAction::Quit => {
                            engine.shutdown();
                            return Ok(());
                        }
                        KeyAction::Steer(ev) => engine.handle_input(ev, now),
                        KeyAction::ToggleHud => show_hud = !show_hud,
                        KeyAction::ToggleHelp => show_help = !show_help,
                        KeyAction::Ignore => {}
                    }
                }
                Event::Mouse(m) => {
                    if let Some(ev) = map_scroll(m.kind) {
                        engine.handle_input(ev, now);
                    }
                }
                Event::Resize(c, r) => last_size = (c, r),
                _ => {}
            }
        }

        // Resize events can be missed in some terminals.
        let sz = crossterm::terminal::size()?;
        if sz != last_size {
            last_size = sz;
        }
        let (term_cols, term_rows) = last_size;
        let hud_rows: u16 = if show_hud && term_rows >= 3 { 1 } else { 0 };
        let visual_rows = term_rows.saturating_sub(hud_rows).max(1);
        let w = (term_cols as usize).saturating_mul(px_w_mul);
        let h = (visual_rows as usize).saturating_mul(px_h_mul);
        if compositor.size() != (w, h) {
            compositor.resize(w, h);
        }

        let dt = now.duration_since(last_frame).as_secs_f32();
        last_frame = now;

        textures.refresh(now);
        let frame = engine.tick(now, dt);
        let stats = compositor.compose(frame, &textures);
        let focus = frame.focus().map(|s| s.image_index);

        let hud = if hud_rows > 0 {
            let state = engine.state();
            let showing = focus
                .and_then(|i| engine.image(i))
                .map(|img| {
                    if img.label.is_empty() {
                        img.source.as_str()
                    } else {
                        img.label.as_str()
                    }
                })
                .unwrap_or("-");
            format!(
                "{} | v {:+.2} | {} slots | {}/{} loaded | drawn {} wait {} | {} | {:.0} fps | {}",
                engine.playback_mode().label(),
                state.velocity,
                engine.ring().len(),
                textures.loaded_count(),
                engine.images().len(),
                stats.drawn,
                stats.skipped_loading,
                showing,
                fps.fps(),
                capability_label,
            )
        } else {
            String::new()
        };

        let overlay = if show_help {
            Some(help_popup_text())
        } else {
            inert_overlay(&engine)
        };

        let view = Frame {
            term_cols,
            term_rows,
            visual_rows,
            pixel_width: w,
            pixel_height: h,
            pixels_rgba: compositor.pixels(),
            hud: &hud,
            hud_rows,
            overlay,
            sync_updates: cfg.sync_updates,
        };
        renderer.render(&view, &mut out)?;
        fps.tick();

        let target = Duration::from_secs_f32(1.0 / cfg.fps.max(1) as f32);
        let elapsed = now.elapsed();
        if elapsed < target {
            std::thread::sleep(target - elapsed);
        }
    }
}

/// Message shown while the engine has nothing to draw.
pub fn inert_overlay(engine: &GalleryEngine) -> Option<&'static str> {
    if !engine.is_inert() {
        None
    } else if !engine.is_running() {
        Some("Gallery stopped")
    } else if engine.images().is_empty() {
        Some("Gallery empty\nNo images to show.")
    } else {
        Some("Gallery empty\nNo visible slots configured.")
    }
}

fn help_popup_text() -> &'static str {
    "Loop Gallery\n\
     \n\
     Down / Right   move forward\n\
     Up / Left      move back\n\
     Mouse wheel    scroll through depth\n\
     i              toggle HUD\n\
     ? / h          toggle this help\n\
     q / Esc        quit\n\
     \n\
     Playback resumes on its own after a few idle seconds."
}

struct FpsCounter {
    last: Instant,
    frames: u32,
    fps: f32,
}

impl FpsCounter {
    fn new() -> Self {
        Self {
            last: Instant::now(),
            frames: 0,
            fps: 0.0,
        }
    }

    fn tick(&mut self) {
        self.frames += 1;
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        if dt >= 0.5 {
            self.fps = (self.frames as f32) / dt;
            self.frames = 0;
            self.last = now;
        }
    }

    fn fps(&self) -> f32 {
        self.fps
    }
}
