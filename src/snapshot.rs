//! Read-only view of a run for renderers and HUDs
//!
//! Borrowed straight from the `GameState` after the update pass, so there is
//! never a second copy of the world to keep in sync.

use glam::Vec2;
use serde::Serialize;

use crate::sim::{Collectible, GameState, Hostile, Obstacle, Particle, Pulse, RunPhase, TrailPoint};
use crate::{depth_for, sector_for};

/// HUD numbers
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HudStats {
    pub battery: f32,
    pub oxygen: f32,
    pub depth: i32,
    pub sector: u32,
    pub collected: u32,
    pub target: u32,
    pub elapsed: f32,
    pub nearby_hostile: bool,
    pub stealth_active: bool,
    pub noise_level: f32,
}

/// Everything a frame needs to draw
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub phase: RunPhase,
    pub player_pos: Vec2,
    pub player_vel: Vec2,
    pub player_radius: f32,
    pub obstacles: &'a [Obstacle],
    pub collectibles: &'a [Collectible],
    pub hostiles: &'a [Hostile],
    pub particles: &'a [Particle],
    pub trail: &'a [TrailPoint],
    pub pulses: &'a [Pulse],
    /// Collectibles never draw fainter than this
    pub collectible_floor: f32,
    pub screen_shake: f32,
    pub stats: HudStats,
}

impl<'a> Snapshot<'a> {
    /// Capture the state; `shake_enabled` folds in the player's preference
    pub fn capture(state: &'a GameState, shake_enabled: bool) -> Self {
        let depth = depth_for(state.player.pos.y);
        Self {
            phase: state.phase,
            player_pos: state.player.pos,
            player_vel: state.player.vel,
            player_radius: state.player.radius,
            obstacles: &state.obstacles,
            collectibles: &state.collectibles,
            hostiles: &state.hostiles,
            particles: &state.particles,
            trail: &state.trail,
            pulses: &state.pulses,
            collectible_floor: state.tuning.collectible_visibility_floor,
            screen_shake: if shake_enabled { state.screen_shake } else { 0.0 },
            stats: HudStats {
                battery: state.stats.battery,
                oxygen: state.stats.oxygen,
                depth,
                sector: sector_for(depth),
                collected: state.stats.collected,
                target: state.target_count(),
                elapsed: state.stats.elapsed,
                nearby_hostile: state.stats.nearby_hostile,
                stealth_active: state.stats.stealth_active,
                noise_level: state.stats.noise_level,
            },
        }
    }

    /// Visible collectibles with their rendered opacity
    pub fn visible_collectibles(&self) -> impl Iterator<Item = (&'a Collectible, f32)> + '_ {
        let floor = self.collectible_floor;
        self.collectibles
            .iter()
            .filter(|c| !c.collected)
            .map(move |c| (c, c.visibility(floor)))
    }

    /// Obstacles with any visibility left
    pub fn visible_obstacles(&self) -> impl Iterator<Item = &'a Obstacle> + '_ {
        self.obstacles.iter().filter(|o| o.revealed > 0.0)
    }

    /// Hostiles with any visibility left
    pub fn visible_hostiles(&self) -> impl Iterator<Item = &'a Hostile> + '_ {
        self.hostiles.iter().filter(|h| h.revealed > 0.0)
    }

    /// Active pulse rings with their stroke opacity, fading out toward max radius
    pub fn pulse_rings(&self) -> impl Iterator<Item = (&'a Pulse, f32)> + '_ {
        self.pulses
            .iter()
            .filter(|p| p.active)
            .map(|p| (p, 1.0 - p.progress()))
    }

    /// Serialize for an out-of-process renderer
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
