//! Fixed timestep simulation tick
//!
//! Core game loop that advances the match by one frame.

use serde::{Deserialize, Serialize};

use super::collision::paddle_contact;
use super::powerup;
use super::state::{GameEvent, Match, MatchPhase, Side};
use crate::consts::*;

/// Held direction for one paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaddleIntent {
    Up,
    Down,
    #[default]
    Still,
}

impl PaddleIntent {
    /// Vertical velocity this intent gives a paddle
    pub fn dy(&self) -> f32 {
        match self {
            PaddleIntent::Up => -PADDLE_SPEED,
            PaddleIntent::Down => PADDLE_SPEED,
            PaddleIntent::Still => 0.0,
        }
    }
}

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub left: PaddleIntent,
    pub right: PaddleIntent,
    /// Start or restart (only acted on outside of play)
    pub start: bool,
}

/// Advance the match by one tick at time `now_ms`
///
/// `now_ms` is the single timestamp for the whole tick; every spawn, effect and
/// respawn threshold is compared against it.
pub fn tick(state: &mut Match, input: &TickInput, now_ms: u64) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.start && state.phase != MatchPhase::Playing {
        state.reset_game(now_ms);
        events.push(GameEvent::MatchStarted);
    }

    if state.phase != MatchPhase::Playing {
        return events;
    }

    // Paddles
    state.left_paddle.dy = input.left.dy();
    state.right_paddle.dy = input.right.dy();
    state.left_paddle.advance();
    state.right_paddle.advance();

    // Power-ups
    if powerup::spawn_due(state, now_ms) {
        events.push(powerup::spawn_pickup(state, now_ms));
    }
    powerup::update_effects(state, now_ms, &mut events);
    powerup::collect_pickups(state, now_ms, &mut events);

    // Balls
    let mut i = 0;
    while i < state.balls.len() {
        let ball = &mut state.balls[i];
        let ball_id = ball.id;

        ball.advance();

        // Top and bottom borders
        if ball.pos.y < GRID {
            ball.pos.y = GRID;
            ball.vel.y = -ball.vel.y;
            events.push(GameEvent::WallBounce { ball_id });
        } else if ball.pos.y + ball.size.y > HEIGHT - GRID {
            ball.pos.y = HEIGHT - GRID - ball.size.y;
            ball.vel.y = -ball.vel.y;
            events.push(GameEvent::WallBounce { ball_id });
        }

        // Scoring
        if !ball.resetting {
            if let Some(exit) = ball.out_of_bounds() {
                let scorer = match exit {
                    Side::Left => Side::Right,
                    Side::Right => Side::Left,
                };
                let last_ball = state.balls.len() == 1;
                if last_ball {
                    state.balls[i].begin_reset(now_ms + RESET_DELAY_MS);
                } else {
                    state.balls.remove(i);
                    events.push(GameEvent::BallRemoved { ball_id });
                }

                state.score.award(scorer);
                events.push(GameEvent::Scored {
                    side: scorer,
                    ball_id,
                });
                log::info!(
                    "{} scores ({} - {})",
                    scorer.as_str(),
                    state.score.left,
                    state.score.right
                );

                // The match ends on the scoring event itself; remaining balls stay put
                if let Some(winner) = state.score.winner() {
                    state.phase = MatchPhase::GameOver;
                    events.push(GameEvent::GameOver { winner });
                    log::info!("Game over: {} player wins", winner.as_str());
                    break;
                }

                if !last_ball {
                    continue;
                }
            }
        }

        let ball = &mut state.balls[i];

        if ball.reset_due(now_ms) {
            ball.reset();
            events.push(GameEvent::BallRespawned { ball_id });
        }

        // Paddles, left first
        match paddle_contact(ball, &state.left_paddle, &state.right_paddle) {
            Some(Side::Left) => {
                ball.vel.x = -ball.vel.x;
                ball.pos.x = state.left_paddle.pos.x + state.left_paddle.size.x;
                ball.accelerate();
                events.push(GameEvent::PaddleHit {
                    ball_id,
                    side: Side::Left,
                });
            }
            Some(Side::Right) => {
                ball.vel.x = -ball.vel.x;
                ball.pos.x = state.right_paddle.pos.x - ball.size.x;
                ball.accelerate();
                events.push(GameEvent::PaddleHit {
                    ball_id,
                    side: Side::Right,
                });
            }
            None => {}
        }

        i += 1;
    }

    if state.phase == MatchPhase::Playing && state.balls.is_empty() {
        state.add_ball(1.0);
    }

    debug_assert!(invariants_hold(state));

    events
}

/// Post-step invariants: paddles inside the borders, speeds capped, at least one ball
pub fn invariants_hold(state: &Match) -> bool {
    let paddles_ok = [&state.left_paddle, &state.right_paddle]
        .iter()
        .all(|p| p.pos.y >= GRID && p.pos.y <= MAX_PADDLE_Y);
    let speeds_ok = state
        .balls
        .iter()
        .all(|b| b.vel.x.abs() <= MAX_BALL_SPEED && b.vel.y.abs() <= MAX_BALL_SPEED);
    let pickups_ok = state.pickups.iter().all(|p| {
        let rect = p.rect();
        rect.x >= POWERUP_MARGIN
            && rect.y >= POWERUP_MARGIN
            && rect.right() <= WIDTH - POWERUP_MARGIN
            && rect.bottom() <= HEIGHT - POWERUP_MARGIN
    });
    paddles_ok && speeds_ok && pickups_ok && !state.balls.is_empty()
}
