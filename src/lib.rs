//! Echoshift - sonar exploration in the dark
//!
//! Core modules:
//! - `sim`: Fixed-timestep simulation (world generation, player, pulses, hostiles, resources)
//! - `session`: Title/Playing/GameOver/Victory state machine driving the simulation
//! - `snapshot`: Read-only view of the simulation handed to renderers
//! - `profile`: Player profiles (best depth, lifetime collected) behind a store trait
//! - `persistence`: Versioned JSON envelope with integrity verification
//! - `tuning`: Data-driven game balance
//! - `settings`: Persisted player preferences

pub mod input;
pub mod persistence;
pub mod profile;
pub mod session;
pub mod settings;
pub mod sim;
pub mod snapshot;
pub mod tuning;

pub use profile::{PlayerProfile, ProfileError, ProfileStore};
pub use session::{RunReport, Screen, Session};
pub use settings::{DifficultyPreset, Settings};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Largest frame delta the session accepts (lag spikes are clamped to this)
    pub const MAX_FRAME_DT: f32 = 0.033;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// World units per unit of displayed depth
    pub const DEPTH_SCALE: f32 = 8.0;
    /// Depth units per display sector
    pub const SECTOR_SPAN: u32 = 500;

    /// Player collision radius
    pub const PLAYER_RADIUS: f32 = 6.0;
    /// Maximum stored trail points
    pub const TRAIL_CAPACITY: usize = 60;
}

/// Displayed depth for a position along the travel axis
#[inline]
pub fn depth_for(y: f32) -> i32 {
    (y / consts::DEPTH_SCALE).floor() as i32
}

/// 1-based sector label for a depth value
#[inline]
pub fn sector_for(depth: i32) -> u32 {
    depth.unsigned_abs() / consts::SECTOR_SPAN + 1
}

/// Format elapsed seconds as `mm:ss`
pub fn format_time(seconds: f32) -> String {
    let total = seconds.max(0.0).floor() as u32;
    format!("{:02}:{:02}", total / 60, total % 60)
}
