//! Player movement, wall bumps, trail and item pickup

use glam::Vec2;

use super::collision::resolve_move;
use super::hostile::alert_hostiles;
use super::resources::raise_noise;
use super::state::{GameState, TrailPoint};
use super::tick::TickInput;
use crate::consts::TRAIL_CAPACITY;

/// Shake impulse on a wall bump
const BUMP_SHAKE: f32 = 10.0;
/// Shake impulse on pickup
const COLLECT_SHAKE: f32 = 3.0;

/// Outcome of one movement step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveOutcome {
    /// A wall was hit this tick (whether or not it counted as a bump)
    pub collided: bool,
    /// The hit was loud: cooldown had elapsed, noise raised, hostiles alerted
    pub bumped: bool,
}

/// Direction requested by the held movement keys (not normalized)
fn intent(input: &TickInput) -> Vec2 {
    let mut dir = Vec2::ZERO;
    if input.up {
        dir.y -= 1.0;
    }
    if input.down {
        dir.y += 1.0;
    }
    if input.left {
        dir.x -= 1.0;
    }
    if input.right {
        dir.x += 1.0;
    }
    dir
}

/// Integrate player motion with momentum, friction and obstacle collision
pub fn update_player(state: &mut GameState, input: &TickInput, dt: f32) -> MoveOutcome {
    let tuning = &state.tuning;
    let accel = if input.stealth {
        tuning.stealth_accel
    } else {
        tuning.player_accel
    };
    state.stats.stealth_active = input.stealth;

    let player = &mut state.player;
    player.vel += intent(input) * accel * dt;
    player.vel *= tuning.friction_retained.powf(dt);

    let candidate = player.pos + player.vel * dt;
    let result = resolve_move(player.pos, candidate, player.radius, &state.obstacles);
    player.pos = result.pos;
    if result.blocked_x {
        player.vel.x = 0.0;
    }
    if result.blocked_y {
        player.vel.y = 0.0;
    }

    let mut outcome = MoveOutcome {
        collided: result.hit(),
        bumped: false,
    };

    if state.bump_cooldown > 0.0 {
        state.bump_cooldown -= dt;
    }
    if outcome.collided && state.bump_cooldown <= 0.0 {
        outcome.bumped = true;
        state.screen_shake = BUMP_SHAKE;
        raise_noise(&mut state.stats, &state.tuning);
        state.bump_cooldown = state.tuning.bump_cooldown;
        let alerted = alert_hostiles(
            &mut state.hostiles,
            state.player.pos,
            state.tuning.bump_alert_radius,
            state.tuning.bump_alert_scatter,
            &mut state.rng,
        );
        log::debug!("Bump at {:?}, {} hostiles alerted", state.player.pos, alerted);
    }

    update_trail(state, dt);
    outcome
}

/// Lay a trail point when moving fast enough, then age and prune
fn update_trail(state: &mut GameState, dt: f32) {
    let vel = state.player.vel;
    let threshold = state.tuning.trail_threshold;
    if vel.x.abs() > threshold || vel.y.abs() > threshold {
        state.trail.push(TrailPoint {
            pos: state.player.pos,
            age: 0.0,
        });
    }

    let aging = state.tuning.trail_aging * dt;
    state.trail.retain_mut(|t| {
        t.age += aging;
        t.age < 1.0
    });
    if state.trail.len() > TRAIL_CAPACITY {
        let excess = state.trail.len() - TRAIL_CAPACITY;
        state.trail.drain(..excess);
    }
}

/// Whether the player currently counts as moving for oxygen drain
pub fn is_moving(state: &GameState) -> bool {
    let vel = state.player.vel;
    let threshold = state.tuning.moving_threshold;
    vel.x.abs() > threshold || vel.y.abs() > threshold
}

/// Pick up items in reach
///
/// An item within the pickup radius is taken when collect is held, or
/// without input once the player is inside the much smaller auto radius.
pub fn collect_nearby(state: &mut GameState, collect_held: bool) -> u32 {
    let player = state.player.pos;
    let mut taken = 0;
    for item in state.collectibles.iter_mut().filter(|c| !c.collected) {
        let dist = item.pos.distance(player);
        if dist < state.tuning.pickup_radius && (collect_held || dist < state.tuning.auto_pickup_radius) {
            item.collected = true;
            taken += 1;
        }
    }
    if taken > 0 {
        state.stats.collected += taken;
        state.screen_shake = COLLECT_SHAKE;
        log::info!(
            "Collected item ({}/{})",
            state.stats.collected,
            state.tuning.collectible_count
        );
    }
    taken
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::state::{Collectible, Hostile, Obstacle};
    use crate::tuning::Tuning;

    fn empty_state() -> GameState {
        GameState::empty(5, Tuning::default())
    }

    #[test]
    fn test_momentum_and_friction() {
        let mut state = empty_state();
        let push = TickInput {
            right: true,
            ..Default::default()
        };
        for _ in 0..10 {
            update_player(&mut state, &push, SIM_DT);
        }
        let vx = state.player.vel.x;
        assert!(vx > 0.0);
        assert!(state.player.pos.x > 0.0);

        // released: keeps drifting while slowing down
        let x_before = state.player.pos.x;
        update_player(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.player.vel.x < vx);
        assert!(state.player.pos.x > x_before);
    }

    #[test]
    fn test_stealth_is_slower() {
        let mut normal = empty_state();
        let mut sneaky = empty_state();
        let input = TickInput {
            down: true,
            ..Default::default()
        };
        let stealth = TickInput {
            down: true,
            stealth: true,
            ..Default::default()
        };
        for _ in 0..30 {
            update_player(&mut normal, &input, SIM_DT);
            update_player(&mut sneaky, &stealth, SIM_DT);
        }
        assert!(sneaky.player.pos.y < normal.player.pos.y);
        assert!(sneaky.stats.stealth_active);
        assert!(!normal.stats.stealth_active);
    }

    #[test]
    fn test_bump_spikes_noise_and_alerts() {
        let mut state = empty_state();
        state.obstacles.push(Obstacle::new(8.0, -50.0, 20.0, 100.0));
        state.hostiles.push(Hostile {
            pos: Vec2::new(0.0, 400.0),
            target: Vec2::new(0.0, 400.0),
            speed: 20.0,
            revealed: 0.0,
            size: 15.0,
        });
        state.player.vel = Vec2::new(300.0, 0.0);

        let outcome = update_player(&mut state, &TickInput::default(), SIM_DT);
        assert!(outcome.collided && outcome.bumped);
        assert_eq!(state.player.vel.x, 0.0);
        assert_eq!(state.player.pos.x, 0.0);
        assert_eq!(state.stats.noise_level, 60.0);
        assert_eq!(state.screen_shake, BUMP_SHAKE);
        assert!(state.hostiles[0].target.length() < 30.0);

        // still pressed against the wall during cooldown: no second spike
        state.player.vel = Vec2::new(300.0, 0.0);
        let outcome = update_player(&mut state, &TickInput::default(), SIM_DT);
        assert!(outcome.collided && !outcome.bumped);
        assert_eq!(state.stats.noise_level, 60.0);
    }

    #[test]
    fn test_trail_capacity_and_aging() {
        let mut state = empty_state();
        state.player.vel = Vec2::new(0.0, 900.0);
        let input = TickInput {
            down: true,
            ..Default::default()
        };
        for _ in 0..200 {
            update_player(&mut state, &input, SIM_DT);
            assert!(state.trail.len() <= TRAIL_CAPACITY);
            assert!(state.trail.iter().all(|t| t.age < 1.0));
        }
        assert!(!state.trail.is_empty());
        // oldest first
        assert!(state.trail[0].age >= state.trail[state.trail.len() - 1].age);
    }

    #[test]
    fn test_pickup_requires_input_unless_very_close() {
        let mut state = empty_state();
        state.collectibles.push(Collectible::new(Vec2::new(30.0, 0.0), 0.0));
        state.collectibles.push(Collectible::new(Vec2::new(0.0, 60.0), 0.0));

        assert_eq!(collect_nearby(&mut state, false), 0);
        assert_eq!(collect_nearby(&mut state, true), 1);
        assert!(state.collectibles[0].collected);
        assert!(!state.collectibles[1].collected);

        state.player.pos = Vec2::new(0.0, 45.0);
        assert_eq!(collect_nearby(&mut state, false), 1);
        assert_eq!(state.stats.collected, 2);

        // collected items stay collected and never count twice
        assert_eq!(collect_nearby(&mut state, true), 0);
        assert_eq!(state.stats.collected, 2);
    }
}
