//! Session loop and screen state machine
//!
//! `Title -> Playing -> {GameOver, Victory} -> Title`. Only `Playing` owns a
//! simulation; entering it builds a fresh `GameState`, leaving it cancels the
//! pending opening pulse and drops queued one-shot input.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::input::{InputEvent, InputState};
use crate::profile::PlayerProfile;
use crate::settings::Settings;
use crate::sim::{DefeatCause, GameState, RunPhase, tick};
use crate::snapshot::Snapshot;

/// Top-level screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    Title,
    Playing,
    GameOver,
    Victory,
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    Victory,
    Defeat(DefeatCause),
}

/// Summary handed to the profile store when a run ends
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub outcome: RunOutcome,
    pub final_depth: i32,
    pub collected: u32,
    pub elapsed: f32,
}

/// Owner of the current run and the screen flow around it
#[derive(Debug)]
pub struct Session {
    screen: Screen,
    run: Option<GameState>,
    settings: Settings,
    /// Source of per-run seeds
    seeds: Pcg32,
    accumulator: f32,
    /// Seconds until the opening pulse fires
    auto_pulse: Option<f32>,
    /// Pulse requested but no tick has run yet
    pending_pulse: bool,
    last_report: Option<RunReport>,
    /// Prior profile, shown on the title screen only
    profile: Option<PlayerProfile>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Session seeded from OS entropy
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Session whose runs are reproducible from `seed`
    pub fn with_seed(seed: u64) -> Self {
        Self {
            screen: Screen::Title,
            run: None,
            settings: Settings::default(),
            seeds: Pcg32::seed_from_u64(seed),
            accumulator: 0.0,
            auto_pulse: None,
            pending_pulse: false,
            last_report: None,
            profile: None,
        }
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn run(&self) -> Option<&GameState> {
        self.run.as_ref()
    }

    /// Mutable access to the live run (hosts and tests poking at state)
    pub fn run_mut(&mut self) -> Option<&mut GameState> {
        self.run.as_mut()
    }

    pub fn last_report(&self) -> Option<&RunReport> {
        self.last_report.as_ref()
    }

    pub fn profile(&self) -> Option<&PlayerProfile> {
        self.profile.as_ref()
    }

    /// Attach the logged-in player's record (display only)
    pub fn set_profile(&mut self, profile: Option<PlayerProfile>) {
        self.profile = profile;
    }

    /// True while the opening pulse is still scheduled
    pub fn auto_pulse_pending(&self) -> bool {
        self.auto_pulse.is_some()
    }

    /// Enter `Playing` with a freshly generated world
    pub fn start_run(&mut self) {
        let seed = self.seeds.random::<u64>();
        let state = GameState::new(seed, self.settings.effective_tuning());
        self.auto_pulse = Some(state.tuning.auto_pulse_delay);
        self.run = Some(state);
        self.accumulator = 0.0;
        self.pending_pulse = false;
        self.last_report = None;
        self.screen = Screen::Playing;
        log::info!("Run started (seed {})", seed);
    }

    /// Leave a run without finishing it
    pub fn abandon_run(&mut self) {
        if self.screen == Screen::Playing {
            log::info!("Run abandoned");
        }
        self.enter_title();
    }

    fn enter_title(&mut self) {
        self.cancel_scheduled();
        self.run = None;
        self.screen = Screen::Title;
    }

    fn cancel_scheduled(&mut self) {
        self.auto_pulse = None;
        self.pending_pulse = false;
        self.accumulator = 0.0;
    }

    /// Process one host frame
    ///
    /// Returns the run report on the frame a run ends. Queued input events are
    /// consumed either way.
    pub fn frame(&mut self, frame_dt: f32, input: &mut InputState) -> Option<RunReport> {
        let report = match self.screen {
            Screen::Title => {
                if input.has(InputEvent::Start) {
                    self.start_run();
                }
                None
            }
            Screen::Playing => {
                if input.has(InputEvent::Pulse) {
                    self.pending_pulse = true;
                }
                self.advance(frame_dt, input)
            }
            Screen::GameOver | Screen::Victory => {
                if input.has(InputEvent::Restart) {
                    self.enter_title();
                }
                None
            }
        };
        input.clear_events();
        report
    }

    /// Run fixed ticks for a clamped frame delta
    fn advance(&mut self, frame_dt: f32, input: &InputState) -> Option<RunReport> {
        let run = self.run.as_mut()?;
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let mut fire = std::mem::take(&mut self.pending_pulse);
            if let Some(remaining) = self.auto_pulse.as_mut() {
                *remaining -= SIM_DT;
                if *remaining <= 0.0 {
                    fire = true;
                    self.auto_pulse = None;
                }
            }

            tick(run, &input.to_tick_input(fire), SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            if let Some(report) = report_for(run) {
                self.conclude(report);
                return Some(report);
            }
        }
        None
    }

    fn conclude(&mut self, report: RunReport) {
        self.cancel_scheduled();
        self.screen = match report.outcome {
            RunOutcome::Victory => Screen::Victory,
            RunOutcome::Defeat(_) => Screen::GameOver,
        };
        self.last_report = Some(report);
        log::info!(
            "Run over: {:?}, depth {}, collected {}, time {}",
            report.outcome,
            report.final_depth,
            report.collected,
            crate::format_time(report.elapsed)
        );
    }

    /// Read-only view of the run for the renderer
    pub fn snapshot(&self) -> Option<Snapshot<'_>> {
        self.run
            .as_ref()
            .map(|run| Snapshot::capture(run, self.settings.effective_screen_shake()))
    }
}

/// Report for a finished run, `None` while it is still active
fn report_for(run: &GameState) -> Option<RunReport> {
    let outcome = match run.phase {
        RunPhase::Active => return None,
        RunPhase::Won => RunOutcome::Victory,
        RunPhase::Lost(cause) => RunOutcome::Defeat(cause),
    };
    Some(RunReport {
        outcome,
        final_depth: run.depth(),
        collected: run.stats.collected,
        elapsed: run.stats.elapsed,
    })
}
