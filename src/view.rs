//! Read-only snapshot of a match for drawing
//!
//! Renderers never touch [`Match`] directly; they draw from a [`FrameView`]
//! captured once per tick after the simulation step.

use serde::Serialize;

use crate::Rgb;
use crate::sim::{Match, MatchPhase, PowerUpKind, Rect, Score, Side};

/// A pickup as drawn on screen
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PickupView {
    pub rect: Rect,
    pub color: Rgb,
    pub kind: PowerUpKind,
}

/// An active power-up and its countdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EffectTimer {
    pub kind: PowerUpKind,
    pub label: &'static str,
    /// Whole seconds remaining, rounded up
    pub remaining_secs: u64,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameView {
    pub phase: MatchPhase,
    pub left_paddle: Rect,
    pub right_paddle: Rect,
    pub balls: Vec<Rect>,
    pub pickups: Vec<PickupView>,
    pub score: Score,
    pub effects: Vec<EffectTimer>,
    /// Set once the match is over
    pub winner: Option<Side>,
}

impl FrameView {
    pub fn capture(state: &Match, now_ms: u64) -> Self {
        Self {
            phase: state.phase,
            left_paddle: state.left_paddle.rect(),
            right_paddle: state.right_paddle.rect(),
            balls: state.balls.iter().map(|b| b.rect()).collect(),
            pickups: state
                .pickups
                .iter()
                .map(|p| PickupView {
                    rect: p.rect(),
                    color: p.color(),
                    kind: p.kind,
                })
                .collect(),
            score: state.score,
            effects: state
                .effects
                .iter()
                .map(|e| EffectTimer {
                    kind: e.kind,
                    label: e.kind.label(),
                    remaining_secs: e.remaining_secs(now_ms),
                })
                .collect(),
            winner: match state.phase {
                MatchPhase::GameOver => state.score.winner(),
                _ => None,
            },
        }
    }
}
