//! Power-up spawning, pickup, activation and timed effects

use glam::Vec2;
use rand::Rng;

use super::collision::{Rect, collides};
use super::state::{ActiveEffect, Ball, GameEvent, Match, Pickup, PowerUpKind};
use crate::consts::*;

/// Region a pickup's top-left corner may be placed in
pub fn spawn_area() -> Rect {
    Rect::new(
        POWERUP_MARGIN,
        POWERUP_MARGIN,
        WIDTH - 2.0 * POWERUP_MARGIN - POWERUP_SIZE,
        HEIGHT - 2.0 * POWERUP_MARGIN - POWERUP_SIZE,
    )
}

/// Whether the spawn interval has elapsed
pub fn spawn_due(state: &Match, now_ms: u64) -> bool {
    state.rules.spawn_powerups
        && now_ms.saturating_sub(state.last_spawn_ms) >= POWERUP_SPAWN_INTERVAL_MS
}

/// Drop a pickup of random kind at a random spot inside the margins
pub fn spawn_pickup(state: &mut Match, now_ms: u64) -> GameEvent {
    let area = spawn_area();
    let rng = state.rng();
    let kind = PowerUpKind::ALL[rng.random_range(0..PowerUpKind::ALL.len())];
    let pos = Vec2::new(
        rng.random_range(area.x..=area.right()),
        rng.random_range(area.y..=area.bottom()),
    );

    let id = state.next_entity_id();
    state.pickups.push(Pickup { id, kind, pos });
    state.last_spawn_ms = now_ms;
    log::debug!("Spawned {} pickup #{} at ({:.0}, {:.0})", kind.as_str(), id, pos.x, pos.y);

    GameEvent::PickupSpawned { pickup_id: id, kind }
}

/// Start a power-up's timer and run its one-shot side effect
pub fn activate(state: &mut Match, kind: PowerUpKind, now_ms: u64) {
    state.effects.push(ActiveEffect {
        kind,
        expires_at_ms: now_ms + POWERUP_DURATION_MS,
    });

    match kind {
        PowerUpKind::MultiBall => {
            for _ in 0..2 {
                state.add_ball(1.0);
            }
        }
        PowerUpKind::GiantBall
        | PowerUpKind::MicroBall
        | PowerUpKind::SlowMotion
        | PowerUpKind::SpeedBall => {}
    }
    log::debug!("Activated {} until {}ms", kind.as_str(), now_ms + POWERUP_DURATION_MS);
}

/// Per-tick effect of an active power-up on every ball
pub fn apply_continuous(kind: PowerUpKind, balls: &mut [Ball]) {
    match kind {
        PowerUpKind::GiantBall => {
            for ball in balls {
                ball.size = Vec2::splat(GIANT_BALL_SIZE);
            }
        }
        PowerUpKind::MicroBall => {
            for ball in balls {
                ball.size = Vec2::splat(MICRO_BALL_SIZE);
            }
        }
        PowerUpKind::SlowMotion => {
            for ball in balls {
                ball.cap_speed(SLOW_MOTION_SPEED);
            }
        }
        PowerUpKind::SpeedBall => {
            for ball in balls {
                ball.floor_speed(SPEED_BALL_SPEED);
            }
        }
        PowerUpKind::MultiBall => {}
    }
}

/// Undo an expiring power-up
pub fn cleanup(kind: PowerUpKind, balls: &mut [Ball]) {
    match kind {
        PowerUpKind::GiantBall | PowerUpKind::MicroBall => {
            for ball in balls {
                ball.size = Vec2::splat(BALL_SIZE);
            }
        }
        PowerUpKind::MultiBall | PowerUpKind::SlowMotion | PowerUpKind::SpeedBall => {}
    }
}

/// Expire finished effects, then apply the ones still running
pub fn update_effects(state: &mut Match, now_ms: u64, events: &mut Vec<GameEvent>) {
    let mut expired = Vec::new();
    state.effects.retain(|effect| {
        if effect.is_expired(now_ms) {
            expired.push(effect.kind);
            false
        } else {
            true
        }
    });

    for kind in expired {
        cleanup(kind, &mut state.balls);
        log::debug!("{} expired", kind.as_str());
        events.push(GameEvent::PowerUpExpired { kind });
    }

    for effect in &state.effects {
        apply_continuous(effect.kind, &mut state.balls);
    }
}

/// Activate every pickup a ball is touching; each pickup fires once
pub fn collect_pickups(state: &mut Match, now_ms: u64, events: &mut Vec<GameEvent>) {
    let mut collected: Vec<(u32, PowerUpKind, u32)> = Vec::new();
    for ball in &state.balls {
        let ball_rect = ball.rect();
        for pickup in &state.pickups {
            let taken = collected.iter().any(|(id, _, _)| *id == pickup.id);
            if !taken && collides(&ball_rect, &pickup.rect()) {
                collected.push((pickup.id, pickup.kind, ball.id));
            }
        }
    }

    if collected.is_empty() {
        return;
    }

    state
        .pickups
        .retain(|p| !collected.iter().any(|(id, _, _)| *id == p.id));

    for (_, kind, ball_id) in collected {
        activate(state, kind, now_ms);
        events.push(GameEvent::PowerUpActivated { kind, ball_id });
    }
}
