//! Pongularity - a two-paddle arcade Pong with power-ups
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, power-ups, match flow)
//! - `view`: Read-only frame snapshot handed to renderers
//! - `renderer`: Terminal rendering of a frame snapshot
//! - `platform`: Clock and keyboard input adapters
//! - `settings`: Persisted player preferences

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod view;

pub use settings::{Settings, Variant};
pub use view::FrameView;

/// Game configuration constants
pub mod consts {
    /// Simulation ticks per second
    pub const TICK_RATE: u32 = 60;

    /// Field dimensions
    pub const WIDTH: f32 = 750.0;
    pub const HEIGHT: f32 = 585.0;
    /// Base unit for every entity size and border
    pub const GRID: f32 = 15.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = GRID;
    pub const PADDLE_HEIGHT: f32 = GRID * 5.0;
    pub const MAX_PADDLE_Y: f32 = HEIGHT - GRID - PADDLE_HEIGHT;
    pub const PADDLE_SPEED: f32 = 6.0;

    /// Ball defaults
    pub const BALL_SIZE: f32 = GRID;
    pub const BALL_SPEED: f32 = 5.0;
    /// Added to each axis on every paddle hit
    pub const BALL_ACCELERATION: f32 = 0.25;
    pub const MAX_BALL_SPEED: f32 = 15.0;
    /// Ball freeze after a point when it is the last ball on the field
    pub const RESET_DELAY_MS: u64 = 400;

    /// First side to reach this wins
    pub const MAX_SCORE: u32 = 10;

    /// Power-ups
    pub const POWERUP_SPAWN_INTERVAL_MS: u64 = 10_000;
    pub const POWERUP_DURATION_MS: u64 = 8_000;
    pub const POWERUP_SIZE: f32 = GRID * 2.0;
    /// Keep-out band along every field edge for pickup spawns
    pub const POWERUP_MARGIN: f32 = GRID * 5.0;
    pub const GIANT_BALL_SIZE: f32 = GRID * 2.0;
    pub const MICRO_BALL_SIZE: f32 = GRID / 2.0;
    pub const SLOW_MOTION_SPEED: f32 = BALL_SPEED / 2.0;
    pub const SPEED_BALL_SPEED: f32 = MAX_BALL_SPEED * 0.8;
}

/// An RGB colour triple
pub type Rgb = (u8, u8, u8);

/// Palette shared by renderers
pub mod palette {
    use super::Rgb;

    pub const BLACK: Rgb = (0, 0, 0);
    pub const WHITE: Rgb = (255, 255, 255);
    pub const LIGHT_GREY: Rgb = (211, 211, 211);
}

/// Field centre point
#[inline]
pub fn field_center() -> glam::Vec2 {
    glam::Vec2::new(consts::WIDTH / 2.0, consts::HEIGHT / 2.0)
}

/// Sign of a velocity component; zero counts as negative
#[inline]
pub fn direction_sign(v: f32) -> f32 {
    if v > 0.0 { 1.0 } else { -1.0 }
}
