//! Pongularity entry point
//!
//! Sets up logging and the terminal, then runs the fixed-rate game loop:
//! poll input, step the match once, draw.

use std::fs::File;
use std::io::stdout;
use std::time::Duration;

use color_eyre::eyre::WrapErr;
use crossterm::event::{
    self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::supports_keyboard_enhancement;
use ratatui::DefaultTerminal;

use pongularity::consts::TICK_RATE;
use pongularity::platform::{Clock, KeyboardState, MonotonicClock, TickSchedule};
use pongularity::renderer::{self, Hud};
use pongularity::sim::{GameEvent, Match, tick};
use pongularity::{FrameView, Settings};

/// Log file; stderr belongs to the terminal UI
const LOG_FILE: &str = "pongularity.log";

/// Rolling frames-per-second estimate over the last `TICK_RATE` frames
struct FpsCounter {
    frame_times: Vec<u64>,
    frame_index: usize,
    fps: u32,
}

impl FpsCounter {
    fn new() -> Self {
        Self {
            frame_times: vec![0; TICK_RATE as usize],
            frame_index: 0,
            fps: 0,
        }
    }

    fn record(&mut self, now_ms: u64) -> u32 {
        let len = self.frame_times.len();
        let oldest = self.frame_times[self.frame_index];
        self.frame_times[self.frame_index] = now_ms;
        self.frame_index = (self.frame_index + 1) % len;
        if oldest > 0 && now_ms > oldest {
            self.fps = ((len as u64 * 1000) / (now_ms - oldest)) as u32;
        }
        self.fps
    }
}

fn init_logging() {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    match File::create(LOG_FILE) {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(_) => {
            builder.filter_level(log::LevelFilter::Off);
        }
    }
    builder.init();
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::PaddleHit { .. } | GameEvent::WallBounce { .. } => {
            log::trace!("{:?}", event)
        }
        _ => log::debug!("{:?}", event),
    }
}

fn run(
    terminal: &mut DefaultTerminal,
    settings: &Settings,
    seed: u64,
    reports_release: bool,
) -> color_eyre::Result<()> {
    let clock = MonotonicClock::new();
    let mut state = Match::new(seed, settings.variant.rules());
    let mut keys = KeyboardState::new(reports_release);
    let mut fps = FpsCounter::new();
    let mut hud = Hud {
        variant: settings.variant.as_str(),
        show_effect_timers: settings.show_effect_timers,
        fps: None,
    };

    let mut schedule = TickSchedule::new(clock.now_ms());
    loop {
        // Collect input until the next tick is due
        loop {
            let now = clock.now_ms();
            let deadline = schedule.next_deadline();
            if now >= deadline {
                break;
            }
            let timeout = Duration::from_millis(deadline - now);
            if event::poll(timeout).wrap_err("failed to poll for terminal events")? {
                let event = event::read().wrap_err("failed to read terminal event")?;
                if let Event::Key(key) = event {
                    keys.handle_event(&key, clock.now_ms());
                }
            }
        }

        if keys.quit_requested() {
            log::info!("Quit requested");
            break;
        }

        // One timestamp for the whole tick
        let now = clock.now_ms();
        schedule.advance(now);

        let input = keys.take_tick_input(now);
        for event in tick(&mut state, &input, now) {
            log_event(&event);
        }

        let view = FrameView::capture(&state, now);
        let current_fps = fps.record(now);
        hud.fps = settings.show_fps.then_some(current_fps);
        terminal
            .draw(|frame| renderer::draw(frame, &view, &hud))
            .wrap_err("failed to draw frame")?;
    }

    Ok(())
}

/// Run `setup` then `body`, and always run `restore` afterwards
fn with_restore(
    setup: impl FnOnce() -> color_eyre::Result<()>,
    body: impl FnOnce() -> color_eyre::Result<()>,
    restore: impl FnOnce(),
) -> color_eyre::Result<()> {
    let result = setup().and_then(|()| body());
    restore();
    result
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    init_logging();

    let settings = Settings::load();
    let seed = settings.resolve_seed();
    log::info!(
        "Pongularity starting ({} mode, seed {})",
        settings.variant.as_str(),
        seed
    );

    let mut terminal = ratatui::init();
    let enhanced = matches!(supports_keyboard_enhancement(), Ok(true));
    let result = with_restore(
        || {
            if enhanced {
                execute!(
                    stdout(),
                    PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
                )
                .wrap_err("failed to enable keyboard enhancement")?;
            }
            Ok(())
        },
        || run(&mut terminal, &settings, seed, enhanced),
        || {
            if enhanced {
                let _ = execute!(stdout(), PopKeyboardEnhancementFlags);
            }
            ratatui::restore();
        },
    );
    log::info!("Pongularity exiting");
    result
}
