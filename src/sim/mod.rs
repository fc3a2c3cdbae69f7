//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of I/O:
//! - Fixed timestep only
//! - Seeded RNG only (injected through `GameState::new`)
//! - No rendering or platform dependencies

pub mod collision;
pub mod hostile;
pub mod player;
pub mod pulse;
pub mod resources;
pub mod state;
pub mod tick;
pub mod world;

pub use collision::{CollisionResult, circle_box_overlaps, resolve_move};
pub use pulse::{EmitRejection, emit_pulse};
pub use state::{
    Collectible, DefeatCause, GameState, Hostile, Obstacle, Particle, Player, Pulse, RunPhase, Stats,
    TrailPoint,
};
pub use tick::{TickInput, tick};
pub use world::generate_world;
