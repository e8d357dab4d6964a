//! main.rs - Desktop simulator for the night sky animator
//! Owns the window, the refresh loop, and keyboard controls

use embedded_graphics::{
    mono_font::{ascii::FONT_6X10, MonoTextStyle},
    pixelcolor::Rgb888,
    prelude::*,
    text::{Baseline, Text},
};
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use nightsky_rust::{Animator, ConfigError, FrameScheduler, GraphicsSurface, Scene, Settings, TickGate};

const SCREEN_WIDTH: u32 = 480;
const SCREEN_HEIGHT: u32 = 270;
const PIXEL_RATIO: f32 = 1.0;
const MAX_PARTICLES: usize = 1024;

type Display = GraphicsSurface<SimulatorDisplay<Rgb888>>;
type SkyAnimator = Animator<Display, RefreshQueue, MAX_PARTICLES>;

// CHANGE: Refresh requests are a single slot instead of a browser callback
// REASON: The window loop polls once per iteration, so at most one request is ever due
#[derive(Default)]
struct RefreshQueue {
    next: u64,
    due: Option<u64>,
}

impl RefreshQueue {
    fn take_due(&mut self) -> Option<u64> {
        self.due.take()
    }
}

impl FrameScheduler for RefreshQueue {
    type Handle = u64;

    fn schedule_next(&mut self) -> u64 {
        self.next += 1;
        self.due = Some(self.next);
        self.next
    }

    fn cancel(&mut self, handle: u64) {
        if self.due == Some(handle) {
            self.due = None;
        }
    }
}

fn seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn settings_for(scene: Scene, gate: TickGate) -> Settings {
    let mut settings = match scene {
        Scene::Fireworks => Settings::fireworks(),
        Scene::Starfield => Settings::starfield(),
    };
    settings.fireworks.tick_gate = gate;
    settings.with_seed(seed())
}

fn gate_for(settings: &Settings, fixed: bool) -> TickGate {
    if fixed {
        TickGate::FixedStep {
            fps: settings.fireworks.fps,
        }
    } else {
        TickGate::EveryFrame
    }
}

/// Tear down `animator` and build its replacement on the same display.
fn rebuild(animator: SkyAnimator, settings: Settings, now: f64) -> Result<SkyAnimator, ConfigError> {
    let (display, scheduler) = animator.into_parts();
    let mut replacement = Animator::new(display, scheduler, settings, now)?;
    replacement.subscribe();
    Ok(replacement)
}

fn draw_label(animator: &mut SkyAnimator, fixed_step: bool) {
    let scene = match animator.settings().scene {
        Scene::Fireworks => "fireworks",
        Scene::Starfield => "starfield",
    };
    let gate = if fixed_step { "fixed step" } else { "every frame" };
    let label = format!("{} | {} | {} particles", scene, gate, animator.particles().len());

    let style = MonoTextStyle::new(&FONT_6X10, Rgb888::new(100, 116, 139));
    let target = animator.surface_mut().target_mut();
    if Text::with_baseline(&label, Point::new(5, 5), style, Baseline::Top)
        .draw(target)
        .is_err()
    {
        log::warn!("failed to draw label");
    }
}

fn main() -> Result<(), ConfigError> {
    env_logger::init();

    let scene = match std::env::args().nth(1).as_deref() {
        Some("fireworks") => Scene::Fireworks,
        _ => Scene::Starfield,
    };
    let mut fixed_step = false;

    let display = SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
    let output_settings = OutputSettingsBuilder::new().scale(2).build();
    let mut window = Window::new("Night Sky", &output_settings);

    let epoch = Instant::now();
    let now_ms = || epoch.elapsed().as_secs_f64() * 1000.0;

    let settings = settings_for(scene, TickGate::EveryFrame);
    let mut animator: SkyAnimator = Animator::new(
        GraphicsSurface::new(display, PIXEL_RATIO),
        RefreshQueue::default(),
        settings,
        now_ms(),
    )?;
    animator.subscribe();

    let target_fps = 60;
    let frame_duration = Duration::from_secs_f32(1.0 / target_fps as f32);

    println!("=== Night Sky - Particle Field Animator ===");
    println!("Controls:");
    println!("  Space: Switch between starfield and fireworks");
    println!("  G: Toggle fireworks tick gate (every frame / fixed step)");
    println!("  Q: Quit");

    'main_loop: loop {
        let frame_start = Instant::now();

        if animator.scheduler_mut().take_due().is_some() {
            animator.paint_frame(now_ms());
            draw_label(&mut animator, fixed_step);
        }
        window.update(animator.surface().target());

        for event in window.events() {
            match event {
                SimulatorEvent::Quit => break 'main_loop,
                SimulatorEvent::KeyDown { keycode, .. } => {
                    let key = format!("{:?}", keycode).to_lowercase();
                    match key.as_str() {
                        "space" => {
                            let next = match animator.settings().scene {
                                Scene::Fireworks => Scene::Starfield,
                                Scene::Starfield => Scene::Fireworks,
                            };
                            let gate = gate_for(animator.settings(), fixed_step);
                            animator = rebuild(animator, settings_for(next, gate), now_ms())?;
                            println!("Scene: {:?}", next);
                        }
                        "g" => {
                            fixed_step = !fixed_step;
                            let gate = gate_for(animator.settings(), fixed_step);
                            let mut settings = *animator.settings();
                            settings.fireworks.tick_gate = gate;
                            animator = rebuild(animator, settings, now_ms())?;
                            println!("Tick gate: {:?}", gate);
                        }
                        "q" => break 'main_loop,
                        _ => {}
                    }
                }
                _ => {}
            }
        }

        // Frame rate limiting
        let elapsed = frame_start.elapsed();
        if elapsed < frame_duration {
            thread::sleep(frame_duration - elapsed);
        }
    }

    animator.unsubscribe();
    println!("Good night!");
    Ok(())
}
