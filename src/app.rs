use crate::audio::AudioSystem;
use crate::capability::{self, CapabilityReport};
use crate::config::{Config, RendererMode, ShadowMode};
use crate::engine::{
    AnimationScheduler, FrameInputs, ShadowStrategy, ShadowStyle, SwayMotion,
};
use crate::render::{AsciiRenderer, Frame, HalfBlockRenderer, Renderer};
use crate::scene::{Scene, SceneCtx};
use crate::terminal::TerminalGuard;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use std::io::BufWriter;
use std::time::{Duration, Instant};

const BANNER_TEXT: &str = "BEYOND";
const DEFAULT_SCROLL_TEXT: &str = "+++ BEYOND: A TERMINAL MUSIC INTRO +++ \
    GREETINGS TO EVERYONE KEEPING THE SCENE ALIVE +++ \
    CODE, GFX AND SFX BY THE BEYOND CREW +++";

pub fn run(cfg: Config) -> anyhow::Result<()> {
    cfg.validate()?;

    // Capability branch resolved once; the frame loop never re-probes.
    let report = capability::probe_runtime(cfg.renderer, cfg.shadow, cfg.auto_probe);
    let strategy = if report.shadow == ShadowMode::Single {
        ShadowStrategy::Single
    } else {
        ShadowStrategy::Stacked
    };

    let _term = TerminalGuard::new()?;
    let mut out = BufWriter::new(TerminalGuard::stdout());

    let mut renderer: Box<dyn Renderer> = match report.renderer {
        RendererMode::HalfBlock => Box::new(HalfBlockRenderer::new()),
        RendererMode::Ascii => Box::new(AsciiRenderer::new()),
    };
    let (px_w_mul, px_h_mul) = match report.renderer {
        RendererMode::HalfBlock => (1usize, 2usize),
        RendererMode::Ascii => (1usize, 1usize),
    };

    let scroll_text = cfg
        .scroll_text
        .clone()
        .unwrap_or_else(|| DEFAULT_SCROLL_TEXT.to_string());
    let mut scene = Scene::new(BANNER_TEXT, scroll_text);
    let motion = SwayMotion::new();
    let mut scheduler = AnimationScheduler::new(strategy);

    let mut audio: Option<AudioSystem> = None;
    let mut audio_error: Option<String> = None;
    let mut show_hud = true;
    let mut fps = FpsCounter::new();

    loop {
        let now = Instant::now();

        // Drain input events (non-blocking).
        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(k) if k.kind != KeyEventKind::Release => {
                    if k.modifiers.contains(KeyModifiers::CONTROL)
                        && matches!(k.code, KeyCode::Char('c'))
                    {
                        return Ok(());
                    }
                    match k.code {
                        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(()),
                        KeyCode::Char('i') | KeyCode::Char('I') => show_hud = !show_hud,
                        KeyCode::Char('m') | KeyCode::Char('M') | KeyCode::Char(' ') => {
                            if scheduler.is_running() {
                                // Stop the tick source before releasing the
                                // analysis resources; nothing may touch the
                                // frequency buffers after this point.
                                scheduler.stop();
                                audio = None;
                            } else {
                                try_start(&mut scheduler, &mut audio, &mut audio_error, &cfg);
                            }
                        }
                        _ => {
                            if !scheduler.is_running() {
                                try_start(&mut scheduler, &mut audio, &mut audio_error, &cfg);
                            }
                        }
                    }
                }
                _ => {}
            }
        }

        // Viewport queried fresh every frame; resize events alone can be
        // missed in some terminals.
        let (term_cols, term_rows) = TerminalGuard::size()?;

        let hud_rows = if show_hud {
            2u16.min(term_rows.saturating_sub(1))
        } else {
            0
        };
        let visual_rows = term_rows.saturating_sub(hud_rows).max(1);
        let w = term_cols as usize * px_w_mul;
        let h = visual_rows as usize * px_h_mul;

        // Sampling precedes target computation. With no sampler attached the
        // amplitude is NaN and the envelope degrades to its floor.
        let amplitude = audio.as_mut().map(|a| a.sample()).unwrap_or(f32::NAN);

        let elapsed = scheduler.elapsed_s(now).unwrap_or(0.0);
        let sway_px = motion.offset_px(elapsed, w as f32);
        let ticked = scheduler.tick(
            now,
            FrameInputs {
                amplitude,
                translation_px: sway_px,
                viewport_w: w as f32,
            },
        );

        let (t, scale, scroller_t) = match &ticked {
            Some(f) => {
                let st = (f.elapsed_s >= cfg.scroller_delay)
                    .then(|| f.elapsed_s - cfg.scroller_delay);
                (f.elapsed_s, f.scale, st)
            }
            None => (0.0, scheduler.scale(), None),
        };
        let shadow = scheduler.shadow().clone();

        let hud = if show_hud {
            build_hud(
                &scheduler,
                if amplitude.is_finite() { amplitude } else { 0.0 },
                scale,
                &shadow,
                &report,
                renderer.name(),
                fps.fps(),
            )
        } else {
            String::new()
        };

        let overlay = if scheduler.is_running() {
            None
        } else {
            Some(prompt_text(&audio_error))
        };

        let ctx = SceneCtx {
            t,
            w,
            h,
            scale,
            sway_px,
            shadow: &shadow,
            scroller_t,
        };
        let pixels = scene.render(&ctx);

        // A degenerate surface skips presentation for this frame, not the
        // whole run.
        if !pixels.is_empty() {
            let frame = Frame {
                term_cols,
                term_rows,
                visual_rows,
                pixel_width: w,
                pixel_height: h,
                pixels_rgba: pixels,
                hud: &hud,
                hud_rows,
                overlay: overlay.as_deref(),
                sync_updates: cfg.sync_updates,
            };
            renderer.render(&frame, &mut out)?;
            fps.tick();
        }

        // Frame pacing.
        let target = Duration::from_secs_f32(1.0 / cfg.fps.max(1) as f32);
        let spent = now.elapsed();
        if spent < target {
            std::thread::sleep(target - spent);
        }
    }
}

/// Acquire the audio system (at most once per enable-cycle) and start a fresh
/// activation. Setup failure is recorded once and shown on the prompt; the
/// next interaction retries.
fn try_start(
    scheduler: &mut AnimationScheduler,
    audio: &mut Option<AudioSystem>,
    audio_error: &mut Option<String>,
    cfg: &Config,
) {
    if audio.is_none() {
        match AudioSystem::new(cfg.source, cfg.device.as_deref(), cfg.fft_size) {
            Ok(sys) => {
                *audio = Some(sys);
                *audio_error = None;
            }
            Err(e) => {
                *audio_error = Some(format!("{e:#}"));
                return;
            }
        }
    }
    scheduler.start(Instant::now());
}

fn prompt_text(audio_error: &Option<String>) -> String {
    match audio_error {
        Some(e) => format!(
            "AUDIO UNAVAILABLE\n{}\npress any key to retry | q quits",
            e
        ),
        None => "B E Y O N D\npress any key to start the intro\nm/space stop+start | i HUD | q quit".to_string(),
    }
}

fn shadow_label(shadow: &ShadowStyle) -> String {
    match shadow {
        ShadowStyle::Stacked(layers) => format!("stack({})", layers.len()),
        ShadowStyle::Single(_) => "single".to_string(),
        ShadowStyle::Off => "off".to_string(),
    }
}

fn build_hud(
    scheduler: &AnimationScheduler,
    amplitude: f32,
    scale: f32,
    shadow: &ShadowStyle,
    report: &CapabilityReport,
    renderer_name: &str,
    fps: f32,
) -> String {
    let state = if scheduler.is_running() { "playing" } else { "idle" };
    format!(
        "State: {} | Amp: {:>5.1} | Scale: {:>4.2} | Shadow: {} | Renderer: {} | FPS: {:>4.1}\n\
         Probe: {} | Keys: any key start | m/space stop | i HUD | q/esc quit",
        state,
        amplitude,
        scale,
        shadow_label(shadow),
        renderer_name,
        fps,
        report.status_label(),
    )
}

struct FpsCounter {
    window_start: Instant,
    frames: u32,
    fps: f32,
}

impl FpsCounter {
    fn new() -> Self {
        Self {
            window_start: Instant::now(),
            frames: 0,
            fps: 0.0,
        }
    }

    fn tick(&mut self) {
        self.frames += 1;
        let dt = self.window_start.elapsed().as_secs_f32();
        if dt >= 0.5 {
            self.fps = self.frames as f32 / dt;
            self.frames = 0;
            self.window_start = Instant::now();
        }
    }

    fn fps(&self) -> f32 {
        self.fps
    }
}
