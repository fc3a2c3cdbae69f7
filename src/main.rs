//! Echoshift headless runner
//!
//! Plays one run with a scripted autopilot at a fixed frame rate, logs the
//! outcome and optionally folds it into a file-backed player profile.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use glam::Vec2;

use echoshift::input::{InputEvent, InputState};
use echoshift::profile::{FileProfileStore, ProfileStore};
use echoshift::session::{Screen, Session};
use echoshift::settings::{DifficultyPreset, Settings};
use echoshift::sim::GameState;
use echoshift::{format_time, sector_for};

#[derive(Debug, Parser)]
#[command(name = "echoshift", about = "Headless sonar-dive runner")]
struct Args {
    /// Seed for reproducible runs (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many simulated seconds
    #[arg(long, default_value_t = 180.0)]
    seconds: f32,

    /// Difficulty preset (relaxed, standard, abyssal)
    #[arg(long)]
    difficulty: Option<String>,

    /// Settings JSON file
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Directory holding player profiles
    #[arg(long)]
    profile_dir: Option<PathBuf>,

    #[arg(long, requires = "profile_dir")]
    player: Option<String>,

    #[arg(long, requires = "player", default_value = "")]
    passcode: String,
}

/// Host frame delta used by the runner
const FRAME_DT: f32 = 1.0 / 60.0;
/// Seconds between autopilot pulses
const AUTOPILOT_PULSE_INTERVAL: f32 = 2.0;
/// Autopilot steers to items closer than this
const AUTOPILOT_SEEK_RANGE: f32 = 220.0;

/// Scripted pilot: dive, pulse periodically, steer toward nearby items
struct Autopilot {
    since_pulse: f32,
    strafe_left: bool,
    last_pos: Vec2,
}

impl Autopilot {
    fn new() -> Self {
        Self {
            since_pulse: 0.0,
            strafe_left: false,
            last_pos: Vec2::ZERO,
        }
    }

    fn steer(&mut self, state: &GameState, input: &mut InputState) {
        let pos = state.player.pos;
        let held = &mut input.held;
        *held = Default::default();

        self.since_pulse += FRAME_DT;
        if self.since_pulse >= AUTOPILOT_PULSE_INTERVAL {
            input.events.push(InputEvent::Pulse);
            self.since_pulse = 0.0;
        }

        let target = state
            .collectibles
            .iter()
            .filter(|c| !c.collected)
            .map(|c| c.pos)
            .filter(|p| p.distance(pos) < AUTOPILOT_SEEK_RANGE)
            .min_by(|a, b| a.distance(pos).total_cmp(&b.distance(pos)));

        if let Some(target) = target {
            let to = target - pos;
            held.left = to.x < -4.0;
            held.right = to.x > 4.0;
            held.up = to.y < -4.0;
            held.down = to.y > 4.0;
            held.collect = true;
            held.stealth = to.length() < 60.0;
        } else {
            held.down = true;
            // blocked below: slide sideways until the way opens
            if (pos.y - self.last_pos.y).abs() < 0.05 {
                if pos.x.abs() > 120.0 {
                    self.strafe_left = pos.x > 0.0;
                }
                held.left = self.strafe_left;
                held.right = !self.strafe_left;
            }
        }
        self.last_pos = pos;
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut settings = match &args.settings {
        Some(path) => Settings::load_from(path),
        None => Settings::default(),
    };
    if let Some(name) = &args.difficulty {
        match DifficultyPreset::from_str(name) {
            Some(preset) => settings.difficulty = preset,
            None => bail!("unknown difficulty preset: {}", name),
        }
    }

    let mut store = args.profile_dir.as_ref().map(FileProfileStore::new);
    let mut session = match args.seed {
        Some(seed) => Session::with_seed(seed),
        None => Session::new(),
    }
    .with_settings(settings);

    if let (Some(store), Some(player)) = (store.as_mut(), args.player.as_deref()) {
        let login = store
            .login(player, &args.passcode)
            .with_context(|| format!("login failed for {}", player))?;
        let profile = login.profile();
        log::info!(
            "Pilot {}: best depth {}m, {} items lifetime",
            profile.name,
            profile.max_depth,
            profile.total_collected
        );
        session.set_profile(Some(profile.clone()));
    }

    let mut input = InputState::new();
    input.push(InputEvent::Start);
    session.frame(FRAME_DT, &mut input);

    let mut pilot = Autopilot::new();
    let frames = (args.seconds / FRAME_DT).ceil() as u64;
    let mut report = None;
    for _ in 0..frames {
        if let Some(state) = session.run() {
            pilot.steer(state, &mut input);
        }
        if let Some(done) = session.frame(FRAME_DT, &mut input) {
            report = Some(done);
            break;
        }
    }

    let Some(report) = report else {
        let snap = session.snapshot().context("session has no run")?;
        println!(
            "Time limit reached: depth {}m (sector {}), {}/{} items, battery {:.0}%, oxygen {:.0}%",
            snap.stats.depth,
            snap.stats.sector,
            snap.stats.collected,
            snap.stats.target,
            snap.stats.battery,
            snap.stats.oxygen
        );
        session.abandon_run();
        return Ok(());
    };

    let verdict = match session.screen() {
        Screen::Victory => "VICTORY".to_string(),
        _ => format!("LOST: {:?}", report.outcome),
    };
    println!(
        "{} | depth {}m (sector {}) | items {} | time {}",
        verdict,
        report.final_depth.abs(),
        sector_for(report.final_depth),
        report.collected,
        format_time(report.elapsed)
    );

    if let (Some(store), Some(player)) = (store.as_mut(), args.player.as_deref()) {
        let profile = store
            .record_run(player, &report)
            .with_context(|| format!("saving profile to {}", store.dir().display()))?;
        println!(
            "Profile {}: best depth {}m, lifetime items {}",
            profile.name, profile.max_depth, profile.total_collected
        );
    }

    Ok(())
}
