//! Match state and core simulation types
//!
//! Every entity on the field lives inside one owned [`Match`] value.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;
use crate::{Rgb, direction_sign, field_center};

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Title screen, waiting for the start signal
    #[default]
    StartScreen,
    /// Active gameplay
    Playing,
    /// A side reached the winning score
    GameOver,
}

/// Side of the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "LEFT",
            Side::Right => "RIGHT",
        }
    }
}

/// A player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub side: Side,
    /// Top-left corner; x never changes
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity, one of `-PADDLE_SPEED`, `0`, `PADDLE_SPEED`
    pub dy: f32,
}

impl Paddle {
    pub fn new(side: Side) -> Self {
        let x = match side {
            Side::Left => GRID * 2.0,
            Side::Right => WIDTH - GRID * 3.0,
        };
        Self {
            side,
            pos: Vec2::new(x, Self::center_y()),
            size: Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT),
            dy: 0.0,
        }
    }

    fn center_y() -> f32 {
        HEIGHT / 2.0 - PADDLE_HEIGHT / 2.0
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Move back to the vertical centre and stop
    pub fn recenter(&mut self) {
        self.pos.y = Self::center_y();
        self.dy = 0.0;
    }

    /// Apply `dy` and keep the paddle between the borders
    pub fn advance(&mut self) {
        self.pos.y = (self.pos.y + self.dy).clamp(GRID, MAX_PADDLE_Y);
    }
}

/// A ball entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    /// Width/height; changed by the giant and micro power-ups
    pub size: Vec2,
    /// Frozen after a point while waiting to respawn
    pub resetting: bool,
    /// Respawn time (ms) while `resetting`
    pub reset_deadline_ms: Option<u64>,
}

impl Ball {
    pub fn new(id: u32, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            size: Vec2::splat(BALL_SIZE),
            resetting: false,
            reset_deadline_ms: None,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Move by one tick of velocity unless frozen
    pub fn advance(&mut self) {
        if !self.resetting {
            self.pos += self.vel;
        }
    }

    /// Recentre after a point, keeping direction but dropping back to base speed
    pub fn reset(&mut self) {
        self.resetting = false;
        self.reset_deadline_ms = None;
        self.pos = field_center();
        self.vel = Vec2::new(
            BALL_SPEED * direction_sign(self.vel.x),
            BALL_SPEED * direction_sign(self.vel.y),
        );
    }

    /// Freeze in place until `deadline_ms`
    pub fn begin_reset(&mut self, deadline_ms: u64) {
        self.resetting = true;
        self.reset_deadline_ms = Some(deadline_ms);
    }

    /// True once a frozen ball's respawn time has come
    pub fn reset_due(&self, now_ms: u64) -> bool {
        self.resetting && self.reset_deadline_ms.is_some_and(|deadline| now_ms >= deadline)
    }

    /// Speed up after a paddle hit, capped per axis
    pub fn accelerate(&mut self) {
        self.vel = Vec2::new(
            accelerate_axis(self.vel.x),
            accelerate_axis(self.vel.y),
        );
    }

    /// Limit each axis to at most `max`
    pub fn cap_speed(&mut self, max: f32) {
        self.vel = Vec2::new(
            self.vel.x.abs().min(max) * direction_sign(self.vel.x),
            self.vel.y.abs().min(max) * direction_sign(self.vel.y),
        );
    }

    /// Raise each axis to at least `min`
    pub fn floor_speed(&mut self, min: f32) {
        self.vel = Vec2::new(
            self.vel.x.abs().max(min) * direction_sign(self.vel.x),
            self.vel.y.abs().max(min) * direction_sign(self.vel.y),
        );
    }

    /// Out past the left or right edge of the field
    pub fn out_of_bounds(&self) -> Option<Side> {
        if self.pos.x < 0.0 {
            Some(Side::Left)
        } else if self.pos.x > WIDTH {
            Some(Side::Right)
        } else {
            None
        }
    }
}

fn accelerate_axis(v: f32) -> f32 {
    (v.abs() + BALL_ACCELERATION).min(MAX_BALL_SPEED) * direction_sign(v)
}

/// Running score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub left: u32,
    pub right: u32,
}

impl Score {
    pub fn award(&mut self, side: Side) {
        match side {
            Side::Left => self.left += 1,
            Side::Right => self.right += 1,
        }
    }

    /// The side that has reached `MAX_SCORE`, left first
    pub fn winner(&self) -> Option<Side> {
        if self.left >= MAX_SCORE {
            Some(Side::Left)
        } else if self.right >= MAX_SCORE {
            Some(Side::Right)
        } else {
            None
        }
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    MultiBall,
    GiantBall,
    MicroBall,
    SlowMotion,
    SpeedBall,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 5] = [
        PowerUpKind::MultiBall,
        PowerUpKind::GiantBall,
        PowerUpKind::MicroBall,
        PowerUpKind::SlowMotion,
        PowerUpKind::SpeedBall,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpKind::MultiBall => "multi_ball",
            PowerUpKind::GiantBall => "giant_ball",
            PowerUpKind::MicroBall => "micro_ball",
            PowerUpKind::SlowMotion => "slow_motion",
            PowerUpKind::SpeedBall => "speed_ball",
        }
    }

    /// On-screen name for the active effect list
    pub fn label(&self) -> &'static str {
        match self {
            PowerUpKind::MultiBall => "Multi Ball",
            PowerUpKind::GiantBall => "Giant Ball",
            PowerUpKind::MicroBall => "Micro Ball",
            PowerUpKind::SlowMotion => "Slow Motion",
            PowerUpKind::SpeedBall => "Speed Ball",
        }
    }

    pub fn color(&self) -> Rgb {
        match self {
            PowerUpKind::MultiBall => (255, 215, 0),
            PowerUpKind::GiantBall => (255, 69, 0),
            PowerUpKind::MicroBall => (0, 191, 255),
            PowerUpKind::SlowMotion => (138, 43, 226),
            PowerUpKind::SpeedBall => (50, 205, 50),
        }
    }

    /// Whether this kind changes ball dimensions
    pub fn resizes_balls(&self) -> bool {
        matches!(self, PowerUpKind::GiantBall | PowerUpKind::MicroBall)
    }
}

/// A collectible power-up waiting on the field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub id: u32,
    pub kind: PowerUpKind,
    /// Top-left corner
    pub pos: Vec2,
}

impl Pickup {
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, Vec2::splat(POWERUP_SIZE))
    }

    pub fn color(&self) -> Rgb {
        self.kind.color()
    }
}

/// An activated power-up and when it wears off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveEffect {
    pub kind: PowerUpKind,
    pub expires_at_ms: u64,
}

impl ActiveEffect {
    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms >= self.expires_at_ms
    }

    /// Whole seconds left, rounded up
    pub fn remaining_secs(&self, now_ms: u64) -> u64 {
        self.expires_at_ms.saturating_sub(now_ms).div_ceil(1000)
    }
}

/// Things that happened during a tick, for logging and presentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    MatchStarted,
    PaddleHit { ball_id: u32, side: Side },
    WallBounce { ball_id: u32 },
    /// `side` is the side that earned the point
    Scored { side: Side, ball_id: u32 },
    BallRemoved { ball_id: u32 },
    BallRespawned { ball_id: u32 },
    PickupSpawned { pickup_id: u32, kind: PowerUpKind },
    PowerUpActivated { kind: PowerUpKind, ball_id: u32 },
    PowerUpExpired { kind: PowerUpKind },
    GameOver { winner: Side },
}

/// Gameplay rules that differ between game variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    /// Periodically drop pickups on the field
    pub spawn_powerups: bool,
    /// Upper bound on simultaneous balls
    pub max_balls: Option<usize>,
}

impl Rules {
    /// One ball, no power-ups
    pub const fn classic() -> Self {
        Self {
            spawn_powerups: false,
            max_balls: Some(1),
        }
    }

    pub const fn power_ups() -> Self {
        Self {
            spawn_powerups: true,
            max_balls: None,
        }
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::power_ups()
    }
}

/// Complete match state (deterministic for a given seed and input stream)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    pub rules: Rules,
    pub phase: MatchPhase,
    pub left_paddle: Paddle,
    pub right_paddle: Paddle,
    /// Active balls, in spawn order
    pub balls: Vec<Ball>,
    pub score: Score,
    /// Uncollected pickups, in spawn order
    pub pickups: Vec<Pickup>,
    /// Activated power-ups, in activation order
    pub effects: Vec<ActiveEffect>,
    /// When the last pickup spawned (or the match started)
    pub last_spawn_ms: u64,
    rng: Pcg32,
    next_id: u32,
}

impl Match {
    /// Create a match on the start screen
    pub fn new(seed: u64, rules: Rules) -> Self {
        let mut state = Self {
            rules,
            phase: MatchPhase::StartScreen,
            left_paddle: Paddle::new(Side::Left),
            right_paddle: Paddle::new(Side::Right),
            balls: Vec::new(),
            score: Score::default(),
            pickups: Vec::new(),
            effects: Vec::new(),
            last_spawn_ms: 0,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        };

        // Serve toward the right and upward until the first reset
        let id = state.next_entity_id();
        let mut ball = Ball::new(id, field_center());
        ball.vel = Vec2::new(BALL_SPEED, -BALL_SPEED);
        state.balls.push(ball);

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    fn random_sign(&mut self) -> f32 {
        if self.rng.random_bool(0.5) { 1.0 } else { -1.0 }
    }

    /// Whether the ball cap leaves room for another ball
    pub fn can_add_ball(&self) -> bool {
        self.rules
            .max_balls
            .is_none_or(|max| self.balls.len() < max)
    }

    /// Add a ball at the centre heading in a random diagonal direction
    ///
    /// Returns the new ball's id, or `None` when the ball cap is reached.
    pub fn add_ball(&mut self, speed_multiplier: f32) -> Option<u32> {
        if !self.can_add_ball() {
            return None;
        }
        let speed = BALL_SPEED * speed_multiplier;
        let dx = speed * self.random_sign();
        let dy = speed * self.random_sign();
        let id = self.next_entity_id();
        let mut ball = Ball::new(id, field_center());
        ball.vel = Vec2::new(dx, dy);
        self.balls.push(ball);
        Some(id)
    }

    /// Start a fresh match at `now_ms`
    pub fn reset_game(&mut self, now_ms: u64) {
        self.score = Score::default();
        self.left_paddle.recenter();
        self.right_paddle.recenter();
        self.balls.clear();
        self.add_ball(1.0);
        self.pickups.clear();
        self.effects.clear();
        self.last_spawn_ms = now_ms;
        self.phase = MatchPhase::Playing;
        log::info!("Match started at {}ms", now_ms);
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Left => &self.left_paddle,
            Side::Right => &self.right_paddle,
        }
    }

    /// Find a ball by id
    pub fn ball(&self, id: u32) -> Option<&Ball> {
        self.balls.iter().find(|b| b.id == id)
    }

    /// Count active effects of one kind
    pub fn effect_count(&self, kind: PowerUpKind) -> usize {
        self.effects.iter().filter(|e| e.kind == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_paddle_positions() {
        let state = Match::new(1, Rules::default());
        assert_eq!(state.left_paddle.pos, Vec2::new(GRID * 2.0, HEIGHT / 2.0 - PADDLE_HEIGHT / 2.0));
        assert_eq!(state.right_paddle.pos.x, WIDTH - GRID * 3.0);
        assert_eq!(state.right_paddle.size, Vec2::new(GRID, PADDLE_HEIGHT));
        assert_eq!(state.left_paddle.dy, 0.0);
    }

    #[test]
    fn test_initial_ball() {
        let state = Match::new(1, Rules::default());
        assert_eq!(state.phase, MatchPhase::StartScreen);
        assert_eq!(state.balls.len(), 1);
        let ball = &state.balls[0];
        assert_eq!(ball.pos, Vec2::new(WIDTH / 2.0, HEIGHT / 2.0));
        assert_eq!(ball.size, Vec2::splat(GRID));
        assert_eq!(ball.vel, Vec2::new(BALL_SPEED, -BALL_SPEED));
        assert!(!ball.resetting);
    }

    #[test]
    fn test_ball_reset_keeps_direction() {
        let mut ball = Ball::new(1, Vec2::new(100.0, 100.0));
        ball.vel = Vec2::new(-10.0, 7.5);
        ball.begin_reset(400);
        ball.reset();
        assert_eq!(ball.pos, field_center());
        assert!(!ball.resetting);
        assert_eq!(ball.reset_deadline_ms, None);
        assert_eq!(ball.vel, Vec2::new(-BALL_SPEED, BALL_SPEED));
    }

    #[test]
    fn test_ball_reset_is_idempotent() {
        let mut once = Ball::new(1, Vec2::new(12.0, 300.0));
        once.vel = Vec2::new(13.0, -2.0);
        let mut twice = once.clone();
        once.reset();
        twice.reset();
        twice.reset();
        assert_eq!(once.pos, twice.pos);
        assert_eq!(once.vel, twice.vel);
    }

    #[test]
    fn test_accelerate_preserves_sign() {
        let mut ball = Ball::new(1, Vec2::ZERO);
        ball.vel = Vec2::new(BALL_SPEED, -BALL_SPEED);
        ball.accelerate();
        assert_eq!(ball.vel, Vec2::new(BALL_SPEED + BALL_ACCELERATION, -BALL_SPEED - BALL_ACCELERATION));
    }

    #[test]
    fn test_accelerate_caps_at_max() {
        let mut ball = Ball::new(1, Vec2::ZERO);
        ball.vel = Vec2::new(MAX_BALL_SPEED, -MAX_BALL_SPEED);
        ball.accelerate();
        assert_eq!(ball.vel, Vec2::new(MAX_BALL_SPEED, -MAX_BALL_SPEED));
    }

    #[test]
    fn test_accelerate_converges() {
        let mut ball = Ball::new(1, Vec2::ZERO);
        ball.vel = Vec2::new(-BALL_SPEED, 1.0);
        let mut prev = ball.vel.abs();
        for _ in 0..100 {
            ball.accelerate();
            let now = ball.vel.abs();
            assert!(now.x >= prev.x && now.y >= prev.y);
            prev = now;
        }
        assert_eq!(ball.vel, Vec2::new(-MAX_BALL_SPEED, MAX_BALL_SPEED));
    }

    #[test]
    fn test_paddle_clamps_to_borders() {
        let mut paddle = Paddle::new(Side::Left);
        paddle.pos.y = 0.0;
        paddle.dy = -10.0;
        paddle.advance();
        assert_eq!(paddle.pos.y, GRID);

        paddle.pos.y = HEIGHT;
        paddle.dy = 10.0;
        paddle.advance();
        assert_eq!(paddle.pos.y, MAX_PADDLE_Y);
    }

    #[test]
    fn test_score_winner() {
        let mut score = Score::default();
        assert_eq!(score.winner(), None);
        score.right = MAX_SCORE - 1;
        score.award(Side::Right);
        assert_eq!(score.winner(), Some(Side::Right));
    }

    #[test]
    fn test_effect_remaining_rounds_up() {
        let effect = ActiveEffect {
            kind: PowerUpKind::SlowMotion,
            expires_at_ms: 8_000,
        };
        assert_eq!(effect.remaining_secs(0), 8);
        assert_eq!(effect.remaining_secs(1), 8);
        assert_eq!(effect.remaining_secs(7_001), 1);
        assert_eq!(effect.remaining_secs(8_000), 0);
        assert!(effect.is_expired(8_000));
        assert!(!effect.is_expired(7_999));
    }

    #[test]
    fn test_reset_game() {
        let mut state = Match::new(7, Rules::default());
        state.score = Score { left: 4, right: 9 };
        state.left_paddle.pos.y = GRID;
        state.right_paddle.dy = PADDLE_SPEED;
        state.add_ball(1.0);
        state.add_ball(1.0);
        state.effects.push(ActiveEffect {
            kind: PowerUpKind::GiantBall,
            expires_at_ms: 100,
        });

        state.reset_game(5_000);

        assert_eq!(state.phase, MatchPhase::Playing);
        assert_eq!(state.score, Score::default());
        assert_eq!(state.left_paddle.pos.y, HEIGHT / 2.0 - PADDLE_HEIGHT / 2.0);
        assert_eq!(state.right_paddle.dy, 0.0);
        assert_eq!(state.balls.len(), 1);
        assert_eq!(state.balls[0].vel.abs(), Vec2::splat(BALL_SPEED));
        assert!(state.pickups.is_empty());
        assert!(state.effects.is_empty());
        assert_eq!(state.last_spawn_ms, 5_000);
    }

    #[test]
    fn test_classic_rules_cap_balls() {
        let mut state = Match::new(3, Rules::classic());
        assert_eq!(state.add_ball(1.0), None);
        assert_eq!(state.balls.len(), 1);

        let mut state = Match::new(3, Rules::power_ups());
        assert!(state.add_ball(2.0).is_some());
        assert_eq!(state.balls[1].vel.abs(), Vec2::splat(BALL_SPEED * 2.0));
    }
}
