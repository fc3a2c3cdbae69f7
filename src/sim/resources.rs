//! Battery, oxygen and noise bookkeeping
//!
//! Resources are clamped, never rejected: any sequence of drains and
//! recharges leaves battery and oxygen in `[0, 100]`.

use super::state::Stats;
use crate::tuning::Tuning;

pub const RESOURCE_MAX: f32 = 100.0;

/// Fraction of screen shake retained after one second
const SHAKE_RETAINED: f32 = 0.001_797;
/// Shake below this snaps to zero
const SHAKE_EPSILON: f32 = 0.1;

/// Clamp battery and oxygen into range
#[inline]
pub fn clamp_resources(stats: &mut Stats) {
    stats.battery = stats.battery.clamp(0.0, RESOURCE_MAX);
    stats.oxygen = stats.oxygen.clamp(0.0, RESOURCE_MAX);
}

/// Passive battery recharge
pub fn recharge_battery(stats: &mut Stats, tuning: &Tuning, dt: f32) {
    stats.battery = (stats.battery + tuning.battery_recharge * dt).min(RESOURCE_MAX);
}

/// Try to pay for a pulse; leaves the battery untouched when short
pub fn spend_battery(stats: &mut Stats, cost: f32) -> bool {
    if stats.battery < cost {
        return false;
    }
    stats.battery = (stats.battery - cost).max(0.0);
    true
}

/// Oxygen drain, heavier while moving and as progress grows
pub fn drain_oxygen(stats: &mut Stats, tuning: &Tuning, moving: bool, dt: f32) {
    let base = if moving {
        tuning.oxygen_move_drain
    } else {
        tuning.oxygen_idle_drain
    };
    let drain = base * tuning.oxygen_multiplier(stats.collected) * dt;
    stats.oxygen = (stats.oxygen - drain).max(0.0);
}

/// Spike noise from a collision bump
pub fn raise_noise(stats: &mut Stats, tuning: &Tuning) {
    stats.noise_level = (stats.noise_level + tuning.bump_noise).min(tuning.noise_cap);
}

/// Multiplicative noise decay, snapped to zero below epsilon
pub fn decay_noise(stats: &mut Stats, tuning: &Tuning, dt: f32) {
    if stats.noise_level > 0.0 {
        stats.noise_level *= tuning.noise_retained.powf(dt);
        if stats.noise_level < tuning.noise_epsilon {
            stats.noise_level = 0.0;
        }
    }
}

/// Screen shake decay
pub fn decay_shake(shake: f32, dt: f32) -> f32 {
    let next = shake * SHAKE_RETAINED.powf(dt);
    if next < SHAKE_EPSILON { 0.0 } else { next }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;

    #[test]
    fn test_recharge_caps_at_max() {
        let tuning = Tuning::default();
        let mut stats = Stats {
            battery: 99.99,
            ..Stats::default()
        };
        recharge_battery(&mut stats, &tuning, 1.0);
        assert_eq!(stats.battery, RESOURCE_MAX);
    }

    #[test]
    fn test_spend_battery_rejects_when_short() {
        let mut stats = Stats {
            battery: 7.9,
            ..Stats::default()
        };
        assert!(!spend_battery(&mut stats, 8.0));
        assert_eq!(stats.battery, 7.9);
        stats.battery = 8.0;
        assert!(spend_battery(&mut stats, 8.0));
        assert_eq!(stats.battery, 0.0);
    }

    #[test]
    fn test_moving_drains_more_and_scales_with_progress() {
        let tuning = Tuning::default();
        let mut idle = Stats::default();
        let mut moving = Stats::default();
        drain_oxygen(&mut idle, &tuning, false, 1.0);
        drain_oxygen(&mut moving, &tuning, true, 1.0);
        assert!(moving.oxygen < idle.oxygen);

        let mut late = Stats {
            collected: 4,
            ..Stats::default()
        };
        drain_oxygen(&mut late, &tuning, true, 1.0);
        let early_loss = RESOURCE_MAX - moving.oxygen;
        let late_loss = RESOURCE_MAX - late.oxygen;
        assert!((late_loss / early_loss - tuning.oxygen_multiplier(4)).abs() < 1e-3);
    }

    #[test]
    fn test_oxygen_floors_at_zero() {
        let tuning = Tuning::default();
        let mut stats = Stats {
            oxygen: 0.001,
            ..Stats::default()
        };
        drain_oxygen(&mut stats, &tuning, true, 10.0);
        assert_eq!(stats.oxygen, 0.0);
    }

    #[test]
    fn test_noise_spike_caps_and_decays_to_zero() {
        let tuning = Tuning::default();
        let mut stats = Stats::default();
        raise_noise(&mut stats, &tuning);
        raise_noise(&mut stats, &tuning);
        assert_eq!(stats.noise_level, tuning.noise_cap);

        for _ in 0..60 * 20 {
            decay_noise(&mut stats, &tuning, SIM_DT);
        }
        assert_eq!(stats.noise_level, 0.0);
    }

    #[test]
    fn test_noise_matches_per_frame_decay() {
        let tuning = Tuning::default();
        let mut stats = Stats {
            noise_level: 60.0,
            ..Stats::default()
        };
        decay_noise(&mut stats, &tuning, SIM_DT);
        assert!((stats.noise_level - 60.0 * 0.985).abs() < 0.01);
    }

    #[test]
    fn test_shake_decays() {
        let mut shake = 10.0;
        shake = decay_shake(shake, SIM_DT);
        assert!((shake - 9.0).abs() < 0.01);
        for _ in 0..60 {
            shake = decay_shake(shake, SIM_DT);
        }
        assert_eq!(shake, 0.0);
    }
}
