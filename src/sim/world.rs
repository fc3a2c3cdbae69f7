//! Procedural level generation
//!
//! The level is a corridor running down the +y axis from the spawn point,
//! walled on both sides, with sparse cross-beams inside and loose debris
//! scattered over a much wider area.

use glam::Vec2;
use rand::Rng;

use super::state::{Collectible, GameState, Hostile, Obstacle, Particle};
use crate::tuning::Tuning;

/// Wall segments per corridor side
const CORRIDOR_SEGMENTS: u32 = 30;
const CORRIDOR_SPACING: f32 = 150.0;
const CORRIDOR_START_Y: f32 = -400.0;
const LEFT_WALL_X: f32 = -320.0;
const RIGHT_WALL_X: f32 = 200.0;

const CROSS_BEAMS: u32 = 15;
const CROSS_BEAM_SPACING: f32 = 250.0;

const DEBRIS_COUNT: u32 = 20;
/// Debris never lands within this distance of the spawn point
const SPAWN_CLEARANCE: f32 = 60.0;
const DEBRIS_ATTEMPTS: u32 = 10;

/// Anchor of the first collectible: close enough to find without exploring
const FIRST_ANCHOR: Vec2 = Vec2::new(100.0, 120.0);
const FIRST_SPREAD: Vec2 = Vec2::new(120.0, 80.0);
const DEEP_ANCHOR_START: f32 = 400.0;
const DEEP_ANCHOR_STEP: f32 = 500.0;
const DEEP_SPREAD: Vec2 = Vec2::new(300.0, 200.0);

const HOSTILE_LATERAL_SPAN: f32 = 1200.0;
const HOSTILE_DEPTH_START: f32 = 800.0;
const HOSTILE_DEPTH_STEP: f32 = 800.0;
const HOSTILE_DEPTH_JITTER: f32 = 400.0;

/// Uniform value in `[lo, hi)`; collapses to `lo` for an empty range
#[inline]
pub(crate) fn between(rng: &mut impl Rng, lo: f32, hi: f32) -> f32 {
    lo + rng.random::<f32>() * (hi - lo)
}

/// Uniform offset in `[-span/2, span/2)`
#[inline]
pub(crate) fn jitter(rng: &mut impl Rng, span: f32) -> f32 {
    (rng.random::<f32>() - 0.5) * span
}

/// Populate every world collection of a fresh run
pub fn generate_world(state: &mut GameState) {
    let tuning = state.tuning.clone();
    let rng = &mut state.rng;

    state.obstacles = generate_obstacles(rng);
    state.collectibles = generate_collectibles(rng, &state.obstacles, &tuning);
    state.hostiles = generate_hostiles(rng, &tuning);
    state.particles = generate_particles(rng, state.player.pos, &tuning);

    log::info!(
        "World generated (seed {}): {} obstacles, {} collectibles, {} hostiles",
        state.seed,
        state.obstacles.len(),
        state.collectibles.len(),
        state.hostiles.len()
    );
}

/// Corridor walls, cross-beams and scattered debris
pub fn generate_obstacles(rng: &mut impl Rng) -> Vec<Obstacle> {
    let mut obstacles = Vec::with_capacity((CORRIDOR_SEGMENTS * 2 + CROSS_BEAMS + DEBRIS_COUNT) as usize);

    for i in 0..CORRIDOR_SEGMENTS {
        let y = i as f32 * CORRIDOR_SPACING + CORRIDOR_START_Y;
        for side_x in [LEFT_WALL_X, RIGHT_WALL_X] {
            obstacles.push(Obstacle::new(
                side_x + jitter(rng, 80.0),
                y + between(rng, 0.0, 30.0),
                between(rng, 60.0, 160.0),
                between(rng, 40.0, 160.0),
            ));
        }
    }

    for i in 0..CROSS_BEAMS {
        obstacles.push(Obstacle::new(
            between(rng, -150.0, 150.0),
            i as f32 * CROSS_BEAM_SPACING + 100.0 + between(rng, 0.0, 80.0),
            between(rng, 40.0, 140.0),
            between(rng, 10.0, 40.0),
        ));
    }

    for _ in 0..DEBRIS_COUNT {
        let mut placed = None;
        for _ in 0..DEBRIS_ATTEMPTS {
            let rock = Obstacle::new(
                between(rng, -800.0, 800.0),
                between(rng, -500.0, 3000.0),
                between(rng, 20.0, 100.0),
                between(rng, 20.0, 100.0),
            );
            if rock.distance_to(Vec2::ZERO) > SPAWN_CLEARANCE {
                placed = Some(rock);
                break;
            }
        }
        // A rock that keeps landing on the spawn point is simply dropped
        if let Some(rock) = placed {
            obstacles.push(rock);
        }
    }

    obstacles
}

/// True when `p` lies inside any obstacle grown by `padding`
pub fn inside_any_obstacle(p: Vec2, obstacles: &[Obstacle], padding: f32) -> bool {
    obstacles.iter().any(|o| o.contains_padded(p, padding))
}

/// Rejection-sample a point in the band below `anchor`
///
/// Samples `anchor.x ± spread.x/2` laterally and `anchor.y .. anchor.y + spread.y`
/// in depth. After `attempts` rejections the anchor pushed half the band
/// deeper is returned so generation never stalls.
pub fn find_open_position(
    rng: &mut impl Rng,
    anchor: Vec2,
    spread: Vec2,
    obstacles: &[Obstacle],
    padding: f32,
    attempts: u32,
) -> Vec2 {
    for _ in 0..attempts {
        let candidate = Vec2::new(
            anchor.x + jitter(rng, spread.x),
            anchor.y + between(rng, 0.0, spread.y),
        );
        if !inside_any_obstacle(candidate, obstacles, padding) {
            return candidate;
        }
    }
    log::debug!("No open position near {:?}, using fallback", anchor);
    Vec2::new(anchor.x, anchor.y + spread.y * 0.5)
}

/// Objective items: one near spawn, the rest at increasing depth
pub fn generate_collectibles(rng: &mut impl Rng, obstacles: &[Obstacle], tuning: &Tuning) -> Vec<Collectible> {
    let mut collectibles = Vec::with_capacity(tuning.collectible_count);

    for i in 0..tuning.collectible_count {
        let (anchor, spread) = if i == 0 {
            (FIRST_ANCHOR, FIRST_SPREAD)
        } else {
            (
                Vec2::new(0.0, DEEP_ANCHOR_START + i as f32 * DEEP_ANCHOR_STEP),
                DEEP_SPREAD,
            )
        };
        let pos = find_open_position(
            rng,
            anchor,
            spread,
            obstacles,
            tuning.collectible_padding,
            tuning.placement_attempts,
        );
        let phase = between(rng, 0.0, std::f32::consts::TAU);
        collectibles.push(Collectible::new(pos, phase));
    }

    collectibles
}

/// Hostiles spread out along the depth axis, idle at spawn
pub fn generate_hostiles(rng: &mut impl Rng, tuning: &Tuning) -> Vec<Hostile> {
    (0..tuning.hostile_count)
        .map(|i| {
            let pos = Vec2::new(
                jitter(rng, HOSTILE_LATERAL_SPAN),
                HOSTILE_DEPTH_START + i as f32 * HOSTILE_DEPTH_STEP + between(rng, 0.0, HOSTILE_DEPTH_JITTER),
            );
            Hostile {
                pos,
                target: pos,
                speed: between(rng, tuning.hostile_min_speed, tuning.hostile_max_speed),
                revealed: 0.0,
                size: between(rng, 15.0, 25.0),
            }
        })
        .collect()
}

/// Ambient particles scattered in a square around `center`
pub fn generate_particles(rng: &mut impl Rng, center: Vec2, tuning: &Tuning) -> Vec<Particle> {
    (0..tuning.particle_count)
        .map(|_| Particle {
            pos: center
                + Vec2::new(
                    jitter(rng, tuning.particle_scatter * 2.0),
                    jitter(rng, tuning.particle_scatter * 2.0),
                ),
            vel: Vec2::new(jitter(rng, 18.0), jitter(rng, 18.0) + 6.0),
            size: between(rng, 0.5, 2.5),
            opacity: between(rng, 0.05, 0.3),
        })
        .collect()
}

/// Drift ambient particles, recycling any that stray too far from the player
pub fn update_particles(state: &mut GameState, dt: f32) {
    let center = state.player.pos;
    let recycle = state.tuning.particle_recycle_distance;
    let span = state.tuning.particle_scatter * 2.0;
    let rng = &mut state.rng;

    for particle in &mut state.particles {
        particle.pos += particle.vel * dt;
        if particle.pos.distance(center) > recycle {
            particle.pos = center + Vec2::new(jitter(rng, span), jitter(rng, span));
        }
    }
}
