//! Fixed timestep simulation tick
//!
//! Core game loop that advances one run by a single step. Order matters:
//! emission, movement, resources, pulses and fading, pickup, hostiles,
//! ambience, and finally the terminal check.

use super::state::{DefeatCause, GameState, RunPhase};
use super::{hostile, player, pulse, resources, world};

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Slow, careful movement
    pub stealth: bool,
    /// Pick up items within reach
    pub collect: bool,
    /// Emit a pulse this tick (one-shot)
    pub pulse: bool,
}

/// Advance the run by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if !state.is_active() {
        return;
    }
    // time never runs backward
    let dt = dt.max(0.0);
    state.time_ticks += 1;

    if input.pulse
        && let Err(reason) = pulse::emit_pulse(state)
    {
        log::debug!("Pulse rejected: {:?}", reason);
    }

    player::update_player(state, input, dt);
    resources::decay_noise(&mut state.stats, &state.tuning, dt);

    let moving = player::is_moving(state);
    resources::recharge_battery(&mut state.stats, &state.tuning, dt);
    resources::drain_oxygen(&mut state.stats, &state.tuning, moving, dt);
    resources::clamp_resources(&mut state.stats);
    state.stats.elapsed += dt;
    state.screen_shake = resources::decay_shake(state.screen_shake, dt);

    pulse::propagate_pulses(state, dt);
    pulse::fade_reveals(state, dt);

    player::collect_nearby(state, input.collect);

    hostile::update_hostiles(state, dt);
    let caught = hostile::check_contact(state);

    world::update_particles(state, dt);

    state.phase = evaluate_phase(state, caught);
    if let RunPhase::Lost(cause) = state.phase {
        log::info!("Run lost ({:?}) at depth {} after {:.1}s", cause, state.depth(), state.stats.elapsed);
    } else if state.phase == RunPhase::Won {
        log::info!("Run won at depth {} after {:.1}s", state.depth(), state.stats.elapsed);
    }
}

/// Terminal conditions; gathering the last item wins even on a fatal frame
fn evaluate_phase(state: &GameState, caught: bool) -> RunPhase {
    if state.stats.collected >= state.target_count() {
        RunPhase::Won
    } else if caught {
        RunPhase::Lost(DefeatCause::Caught)
    } else if state.stats.oxygen <= 0.0 {
        RunPhase::Lost(DefeatCause::Suffocated)
    } else if state.stats.battery <= 0.0 {
        RunPhase::Lost(DefeatCause::BatteryDepleted)
    } else {
        RunPhase::Active
    }
}
