//! Data-driven game balance
//!
//! Every rate is per second; retained-fraction fields are the share of a
//! value left after one second of exponential decay.

use serde::{Deserialize, Serialize};

/// Balance table consumed by the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    pub collectible_count: usize,
    pub hostile_count: usize,
    pub particle_count: usize,
    /// Padding around obstacles that collectible placement must avoid
    pub collectible_padding: f32,
    /// Rejection-sampling attempts before the fallback position is used
    pub placement_attempts: u32,

    // === Player ===
    pub player_accel: f32,
    pub stealth_accel: f32,
    /// Fraction of velocity retained after one second
    pub friction_retained: f32,
    /// Per-axis speed above which the player counts as moving (oxygen drain)
    pub moving_threshold: f32,
    /// Per-axis speed above which trail points are laid
    pub trail_threshold: f32,
    pub trail_aging: f32,
    pub bump_cooldown: f32,
    pub bump_noise: f32,
    pub bump_alert_radius: f32,
    pub bump_alert_scatter: f32,

    // === Pulse ===
    pub pulse_cost: f32,
    pub pulse_speed: f32,
    pub pulse_max_radius: f32,
    pub pulse_cooldown: f32,
    pub obstacle_front_tolerance: f32,
    pub point_front_tolerance: f32,
    pub pulse_alert_radius: f32,
    pub pulse_alert_scatter: f32,
    pub auto_pulse_delay: f32,

    // === Visibility ===
    pub obstacle_fade: f32,
    pub hostile_fade: f32,
    /// Collectibles never render below this visibility
    pub collectible_visibility_floor: f32,
    pub collectible_phase_speed: f32,

    // === Resources ===
    pub battery_recharge: f32,
    pub oxygen_move_drain: f32,
    pub oxygen_idle_drain: f32,
    /// Oxygen drain multiplier added per collected item
    pub oxygen_difficulty_step: f32,
    /// Fade multiplier added per collected item
    pub fade_difficulty_step: f32,
    pub noise_cap: f32,
    pub noise_retained: f32,
    pub noise_epsilon: f32,

    // === Interaction ===
    pub pickup_radius: f32,
    pub auto_pickup_radius: f32,
    pub kill_radius: f32,
    pub nearby_radius: f32,

    // === Hostiles ===
    pub hostile_min_speed: f32,
    pub hostile_max_speed: f32,
    pub hostile_arrive_distance: f32,
    pub hostile_wander_range: f32,

    // === Ambience ===
    pub particle_recycle_distance: f32,
    pub particle_scatter: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            collectible_count: 5,
            hostile_count: 3,
            particle_count: 100,
            collectible_padding: 20.0,
            placement_attempts: 50,

            player_accel: 1800.0,
            stealth_accel: 792.0,
            friction_retained: 0.160_8,
            moving_threshold: 9.0,
            trail_threshold: 12.0,
            trail_aging: 1.2,
            bump_cooldown: 0.2,
            bump_noise: 60.0,
            bump_alert_radius: 600.0,
            bump_alert_scatter: 20.0,

            pulse_cost: 8.0,
            pulse_speed: 360.0,
            pulse_max_radius: 500.0,
            pulse_cooldown: 0.3,
            obstacle_front_tolerance: 15.0,
            point_front_tolerance: 20.0,
            pulse_alert_radius: 800.0,
            pulse_alert_scatter: 30.0,
            auto_pulse_delay: 0.4,

            obstacle_fade: 0.18,
            hostile_fade: 0.36,
            collectible_visibility_floor: 0.05,
            collectible_phase_speed: 3.0,

            battery_recharge: 1.08,
            oxygen_move_drain: 0.6,
            oxygen_idle_drain: 0.12,
            oxygen_difficulty_step: 0.22,
            fade_difficulty_step: 0.3,
            noise_cap: 100.0,
            noise_retained: 0.403_8,
            noise_epsilon: 0.5,

            pickup_radius: 40.0,
            auto_pickup_radius: 20.0,
            kill_radius: 25.0,
            nearby_radius: 200.0,

            hostile_min_speed: 18.0,
            hostile_max_speed: 42.0,
            hostile_arrive_distance: 5.0,
            hostile_wander_range: 100.0,

            particle_recycle_distance: 800.0,
            particle_scatter: 600.0,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override; missing fields keep defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Oxygen drain multiplier for the given progress
    #[inline]
    pub fn oxygen_multiplier(&self, collected: u32) -> f32 {
        1.0 + collected as f32 * self.oxygen_difficulty_step
    }

    /// Visibility fade multiplier for the given progress
    #[inline]
    pub fn fade_multiplier(&self, collected: u32) -> f32 {
        1.0 + collected as f32 * self.fade_difficulty_step
    }
}
