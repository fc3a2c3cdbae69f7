//! Hostile AI
//!
//! Hostiles have no senses of their own. Each one walks toward its current
//! target and picks a fresh wander target on arrival; pulses and collision
//! bumps overwrite the target with a point near the noise.

use glam::Vec2;
use rand::Rng;

use super::state::{GameState, Hostile};
use super::world::jitter;

/// Redirect every hostile within `radius` of `source` to a point near it
///
/// Returns how many hostiles were alerted.
pub fn alert_hostiles(hostiles: &mut [Hostile], source: Vec2, radius: f32, scatter: f32, rng: &mut impl Rng) -> usize {
    let mut alerted = 0;
    for hostile in hostiles.iter_mut() {
        if hostile.pos.distance(source) < radius {
            hostile.target = source + Vec2::new(jitter(rng, scatter * 2.0), jitter(rng, scatter * 2.0));
            alerted += 1;
        }
    }
    alerted
}

/// Advance every hostile toward its target, wandering on arrival
pub fn update_hostiles(state: &mut GameState, dt: f32) {
    let arrive = state.tuning.hostile_arrive_distance;
    let wander_span = state.tuning.hostile_wander_range * 2.0;
    let rng = &mut state.rng;

    for hostile in &mut state.hostiles {
        let to_target = hostile.target - hostile.pos;
        let dist = to_target.length();
        if dist > arrive {
            let step = (hostile.speed * dt).min(dist);
            hostile.pos += to_target / dist * step;
        } else {
            hostile.target = hostile.pos + Vec2::new(jitter(rng, wander_span), jitter(rng, wander_span));
        }
    }
}

/// Update the nearby flag and report whether any hostile reached the player
///
/// Visibility plays no part: an unrevealed hostile kills just the same.
pub fn check_contact(state: &mut GameState) -> bool {
    let player = state.player.pos;
    let mut nearby = false;
    let mut caught = false;
    for hostile in &state.hostiles {
        let dist = hostile.pos.distance(player);
        if dist < state.tuning.nearby_radius {
            nearby = true;
        }
        if dist < state.tuning.kill_radius {
            caught = true;
        }
    }
    state.stats.nearby_hostile = nearby;
    caught
}
