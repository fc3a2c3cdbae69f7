//! Device-agnostic input state
//!
//! The host records which actions are held and queues discrete events; the
//! session consumes both once per frame.

use crate::sim::TickInput;

/// Actions that matter while held
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldActions {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub stealth: bool,
    pub collect: bool,
}

/// One-shot actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Emit a sonar pulse
    Pulse,
    /// Begin a run from the title screen
    Start,
    /// Return to the title screen after a run
    Restart,
}

/// Everything the session reads from the host for one frame
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub held: HeldActions,
    pub events: Vec<InputEvent>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a discrete event
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    pub fn has(&self, event: InputEvent) -> bool {
        self.events.contains(&event)
    }

    /// Forget queued events (held state persists)
    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Per-tick input; `pulse` is only set when requested for this tick
    pub fn to_tick_input(&self, pulse: bool) -> TickInput {
        TickInput {
            up: self.held.up,
            down: self.held.down,
            left: self.held.left,
            right: self.held.right,
            stealth: self.held.stealth,
            collect: self.held.collect,
            pulse,
        }
    }
}
