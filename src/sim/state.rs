//! Game state and core simulation types
//!
//! `GameState` is the single owner of everything a run mutates. Renderers
//! read it through [`crate::snapshot::Snapshot`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::tuning::Tuning;

/// Why a run was lost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DefeatCause {
    Suffocated,
    BatteryDepleted,
    Caught,
}

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// Simulation advancing
    Active,
    /// Run ended in defeat
    Lost(DefeatCause),
    /// Every collectible gathered
    Won,
}

/// Axis-aligned static obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub revealed: f32,
}

impl Obstacle {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            x,
            y,
            w,
            h,
            revealed: 0.0,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Point inside the rectangle grown by `padding` on every side (strict)
    pub fn contains_padded(&self, p: Vec2, padding: f32) -> bool {
        p.x > self.x - padding
            && p.x < self.right() + padding
            && p.y > self.y - padding
            && p.y < self.bottom() + padding
    }

    /// Shortest distance from `p` to the rectangle (0 inside)
    pub fn distance_to(&self, p: Vec2) -> f32 {
        let dx = (self.x - p.x).max(0.0).max(p.x - self.right());
        let dy = (self.y - p.y).max(0.0).max(p.y - self.bottom());
        Vec2::new(dx, dy).length()
    }
}

/// Objective item
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    pub pos: Vec2,
    pub collected: bool,
    pub revealed: f32,
    /// Free-running pulsation angle
    pub pulse_phase: f32,
}

impl Collectible {
    pub fn new(pos: Vec2, pulse_phase: f32) -> Self {
        Self {
            pos,
            collected: false,
            revealed: 0.0,
            pulse_phase,
        }
    }

    /// Rendered visibility; collectibles keep a faint presence even when unrevealed
    pub fn visibility(&self, floor: f32) -> f32 {
        self.revealed.max(floor)
    }
}

/// Roaming hostile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hostile {
    pub pos: Vec2,
    pub target: Vec2,
    pub speed: f32,
    pub revealed: f32,
    pub size: f32,
}

/// Expanding sonar ring
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pulse {
    pub origin: Vec2,
    pub radius: f32,
    pub max_radius: f32,
    pub active: bool,
}

impl Pulse {
    pub fn new(origin: Vec2, max_radius: f32) -> Self {
        Self {
            origin,
            radius: 0.0,
            max_radius,
            active: true,
        }
    }

    /// 0 at emission, 1 at max radius
    pub fn progress(&self) -> f32 {
        (self.radius / self.max_radius).clamp(0.0, 1.0)
    }
}

/// Player submersible
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: PLAYER_RADIUS,
        }
    }
}

/// Trail point for player wake rendering
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrailPoint {
    pub pos: Vec2,
    /// 0 when laid, purged at 1
    pub age: f32,
}

/// Ambient drifting particle (cosmetic only)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub opacity: f32,
}

/// Per-run counters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub battery: f32,
    pub oxygen: f32,
    pub collected: u32,
    pub elapsed: f32,
    pub nearby_hostile: bool,
    pub stealth_active: bool,
    pub noise_level: f32,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            battery: 100.0,
            oxygen: 100.0,
            collected: 0,
            elapsed: 0.0,
            nearby_hostile: false,
            stealth_active: false,
            noise_level: 0.0,
        }
    }
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: RunPhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    pub stats: Stats,
    pub obstacles: Vec<Obstacle>,
    pub collectibles: Vec<Collectible>,
    pub hostiles: Vec<Hostile>,
    pub pulses: Vec<Pulse>,
    pub trail: Vec<TrailPoint>,
    pub particles: Vec<Particle>,
    /// Elapsed time of the last successful pulse emission
    pub last_pulse_at: Option<f32>,
    /// Seconds until another bump may register
    pub bump_cooldown: f32,
    pub screen_shake: f32,
}

impl GameState {
    /// Create an empty run (no world) with the given seed
    pub fn empty(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            phase: RunPhase::Active,
            time_ticks: 0,
            player: Player::default(),
            stats: Stats::default(),
            obstacles: Vec::new(),
            collectibles: Vec::new(),
            hostiles: Vec::new(),
            pulses: Vec::new(),
            trail: Vec::with_capacity(TRAIL_CAPACITY),
            particles: Vec::new(),
            last_pulse_at: None,
            bump_cooldown: 0.0,
            screen_shake: 0.0,
        }
    }

    /// Create a run with a freshly generated world
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self::empty(seed, tuning);
        super::world::generate_world(&mut state);
        state
    }

    /// Current displayed depth
    pub fn depth(&self) -> i32 {
        crate::depth_for(self.player.pos.y)
    }

    /// Collectibles required to win
    pub fn target_count(&self) -> u32 {
        self.tuning.collectible_count as u32
    }

    pub fn is_active(&self) -> bool {
        self.phase == RunPhase::Active
    }
}
