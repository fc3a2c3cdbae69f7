//! Sonar pulses and the visibility they grant
//!
//! Only the advancing front of a pulse reveals anything: an entity is lit when
//! its distance to the origin is within a small tolerance of the current
//! radius. Everything fades back to darkness afterwards, faster as the run
//! progresses.

use super::hostile::alert_hostiles;
use super::resources::spend_battery;
use super::state::{GameState, Pulse};

/// Shake impulse on emission
const EMIT_SHAKE: f32 = 6.0;

/// Why an emission request did nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitRejection {
    CoolingDown,
    LowBattery,
}

/// Emit a pulse from the player's position
///
/// A rejected request changes nothing: battery, pulse list and cooldown
/// timestamp are left as they were.
pub fn emit_pulse(state: &mut GameState) -> Result<(), EmitRejection> {
    let now = state.stats.elapsed;
    if let Some(last) = state.last_pulse_at
        && now - last < state.tuning.pulse_cooldown
    {
        return Err(EmitRejection::CoolingDown);
    }
    if !spend_battery(&mut state.stats, state.tuning.pulse_cost) {
        return Err(EmitRejection::LowBattery);
    }

    let origin = state.player.pos;
    state.last_pulse_at = Some(now);
    state.screen_shake = EMIT_SHAKE;
    state.pulses.push(Pulse::new(origin, state.tuning.pulse_max_radius));

    let alerted = alert_hostiles(
        &mut state.hostiles,
        origin,
        state.tuning.pulse_alert_radius,
        state.tuning.pulse_alert_scatter,
        &mut state.rng,
    );
    log::debug!(
        "Pulse emitted at {:?} (battery {:.1}, {} hostiles alerted)",
        origin,
        state.stats.battery,
        alerted
    );
    Ok(())
}

/// Grow active pulses and reveal whatever their fronts cross
///
/// Pulses that went inactive on the previous tick are purged first.
pub fn propagate_pulses(state: &mut GameState, dt: f32) {
    state.pulses.retain(|p| p.active);

    let tuning = &state.tuning;
    for pulse in &mut state.pulses {
        pulse.radius += tuning.pulse_speed * dt;
        if pulse.radius > pulse.max_radius {
            pulse.active = false;
            continue;
        }

        for obstacle in &mut state.obstacles {
            let dist = obstacle.distance_to(pulse.origin);
            if (dist - pulse.radius).abs() < tuning.obstacle_front_tolerance {
                obstacle.revealed = 1.0;
            }
        }

        for item in state.collectibles.iter_mut().filter(|c| !c.collected) {
            let dist = item.pos.distance(pulse.origin);
            if (dist - pulse.radius).abs() < tuning.point_front_tolerance {
                item.revealed = 1.0;
            }
        }

        for hostile in &mut state.hostiles {
            let dist = hostile.pos.distance(pulse.origin);
            if (dist - pulse.radius).abs() < tuning.point_front_tolerance {
                hostile.revealed = 1.0;
            }
        }
    }
}

/// Fade revealed entities and advance collectible pulsation
pub fn fade_reveals(state: &mut GameState, dt: f32) {
    let tuning = &state.tuning;
    let multiplier = tuning.fade_multiplier(state.stats.collected);
    let still_fade = tuning.obstacle_fade * multiplier * dt;
    let hostile_fade = tuning.hostile_fade * multiplier * dt;

    for obstacle in &mut state.obstacles {
        obstacle.revealed = fade(obstacle.revealed, still_fade);
    }
    for item in &mut state.collectibles {
        item.revealed = fade(item.revealed, still_fade);
        item.pulse_phase += tuning.collectible_phase_speed * dt;
    }
    for hostile in &mut state.hostiles {
        hostile.revealed = fade(hostile.revealed, hostile_fade);
    }
}

#[inline]
fn fade(revealed: f32, amount: f32) -> f32 {
    (revealed - amount).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::state::{Collectible, Hostile, Obstacle};
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn empty_state() -> GameState {
        GameState::empty(42, Tuning::default())
    }

    #[test]
    fn test_emit_deducts_exact_cost() {
        let mut state = empty_state();
        assert!(emit_pulse(&mut state).is_ok());
        assert_eq!(state.stats.battery, 100.0 - 8.0);
        assert_eq!(state.pulses.len(), 1);
        assert_eq!(state.pulses[0].radius, 0.0);
        assert!(state.pulses[0].active);
        assert_eq!(state.screen_shake, EMIT_SHAKE);
    }

    #[test]
    fn test_emit_rejected_when_battery_low() {
        let mut state = empty_state();
        state.stats.battery = 5.0;
        assert_eq!(emit_pulse(&mut state), Err(EmitRejection::LowBattery));
        assert_eq!(state.stats.battery, 5.0);
        assert!(state.pulses.is_empty());
        assert_eq!(state.last_pulse_at, None);
    }

    #[test]
    fn test_emit_respects_cooldown() {
        let mut state = empty_state();
        assert!(emit_pulse(&mut state).is_ok());
        state.stats.elapsed += 0.1;
        assert_eq!(emit_pulse(&mut state), Err(EmitRejection::CoolingDown));
        assert_eq!(state.pulses.len(), 1);
        assert_eq!(state.stats.battery, 92.0);

        state.stats.elapsed += 0.25;
        assert!(emit_pulse(&mut state).is_ok());
        assert_eq!(state.pulses.len(), 2);
    }

    #[test]
    fn test_emit_alerts_nearby_hostiles() {
        let mut state = empty_state();
        let far = Vec2::new(0.0, 5000.0);
        state.hostiles.push(Hostile {
            pos: Vec2::new(0.0, 300.0),
            target: Vec2::new(0.0, 300.0),
            speed: 20.0,
            revealed: 0.0,
            size: 15.0,
        });
        state.hostiles.push(Hostile {
            pos: far,
            target: far,
            speed: 20.0,
            revealed: 0.0,
            size: 15.0,
        });
        emit_pulse(&mut state).unwrap();
        assert!(state.hostiles[0].target.length() < 50.0);
        assert_eq!(state.hostiles[1].target, far);
    }

    #[test]
    fn test_front_reveals_ring_not_disc() {
        let mut state = empty_state();
        // inside the disc, well behind the front once it passes
        state.collectibles.push(Collectible::new(Vec2::new(0.0, 10.0), 0.0));
        // ahead of the front
        state.collectibles.push(Collectible::new(Vec2::new(0.0, 200.0), 0.0));
        state.pulses.push(Pulse {
            origin: Vec2::ZERO,
            radius: 94.0,
            max_radius: 500.0,
            active: true,
        });

        propagate_pulses(&mut state, SIM_DT);
        assert!((state.pulses[0].radius - 100.0).abs() < 1e-3);
        assert_eq!(state.collectibles[0].revealed, 0.0);
        assert_eq!(state.collectibles[1].revealed, 0.0);

        state.pulses[0].radius = 184.0;
        propagate_pulses(&mut state, SIM_DT);
        assert_eq!(state.collectibles[1].revealed, 1.0);
    }

    #[test]
    fn test_obstacle_reveal_uses_rect_distance() {
        let mut state = empty_state();
        // nearest face is 100 away even though the center is much further
        state.obstacles.push(Obstacle::new(100.0, -200.0, 300.0, 400.0));
        state.pulses.push(Pulse::new(Vec2::ZERO, 500.0));
        state.pulses[0].radius = 88.0;
        propagate_pulses(&mut state, SIM_DT);
        assert_eq!(state.obstacles[0].revealed, 1.0);
    }

    #[test]
    fn test_collected_items_never_revealed() {
        let mut state = empty_state();
        let mut item = Collectible::new(Vec2::new(0.0, 50.0), 0.0);
        item.collected = true;
        state.collectibles.push(item);
        state.pulses.push(Pulse::new(Vec2::ZERO, 500.0));
        state.pulses[0].radius = 44.0;
        propagate_pulses(&mut state, SIM_DT);
        assert_eq!(state.collectibles[0].revealed, 0.0);
    }

    #[test]
    fn test_pulse_expires_then_is_purged() {
        let mut state = empty_state();
        state.pulses.push(Pulse::new(Vec2::ZERO, 500.0));
        state.pulses[0].radius = 499.0;

        propagate_pulses(&mut state, SIM_DT);
        assert_eq!(state.pulses.len(), 1);
        assert!(!state.pulses[0].active);

        propagate_pulses(&mut state, SIM_DT);
        assert!(state.pulses.is_empty());
    }

    #[test]
    fn test_fade_speeds_up_with_progress() {
        let mut early = empty_state();
        early.obstacles.push(Obstacle {
            revealed: 1.0,
            ..Obstacle::new(0.0, 0.0, 1.0, 1.0)
        });
        let mut late = early.clone();
        late.stats.collected = 3;

        fade_reveals(&mut early, 1.0);
        fade_reveals(&mut late, 1.0);
        assert!(late.obstacles[0].revealed < early.obstacles[0].revealed);
        assert!((1.0 - early.obstacles[0].revealed - 0.18).abs() < 1e-5);
    }

    #[test]
    fn test_fade_floors_at_zero() {
        let mut state = empty_state();
        state.hostiles.push(Hostile {
            pos: Vec2::ZERO,
            target: Vec2::ZERO,
            speed: 20.0,
            revealed: 0.01,
            size: 15.0,
        });
        fade_reveals(&mut state, 1.0);
        assert_eq!(state.hostiles[0].revealed, 0.0);
    }
}
