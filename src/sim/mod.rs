//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One timestamp per tick, supplied by the caller
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod powerup;
pub mod state;
pub mod tick;

pub use collision::{Rect, collides, paddle_contact};
pub use state::{
    ActiveEffect, Ball, GameEvent, Match, MatchPhase, Paddle, Pickup, PowerUpKind, Rules, Score,
    Side,
};
pub use tick::{PaddleIntent, TickInput, invariants_hold, tick};
