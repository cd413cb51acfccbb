#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure exploration system that turns polled input into player movement commands.

use tallgrass_core::{Command, Event, InputSnapshot, WorldMode};

/// Translates directional input into step commands while the world is exploring.
#[derive(Clone, Debug)]
pub struct Exploration {
    mode: WorldMode,
    moving: bool,
}

impl Default for Exploration {
    fn default() -> Self {
        Self::new()
    }
}

impl Exploration {
    /// Creates a new exploration system that assumes the world starts exploring.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            mode: WorldMode::Exploring,
            moving: false,
        }
    }

    /// Consumes world events and the input snapshot to emit movement commands.
    ///
    /// Input is dropped while the world is in any mode other than exploring.
    /// When the directional input is released a single halt command is emitted
    /// so the player's idle animation can resume.
    pub fn handle(&mut self, events: &[Event], input: InputSnapshot, out: &mut Vec<Command>) {
        for event in events {
            if let Event::WorldModeChanged { mode } = event {
                self.mode = mode.clone();
                if !mode.accepts_movement() {
                    self.moving = false;
                }
            }
        }

        if !self.mode.accepts_movement() {
            return;
        }

        match input.direction {
            Some(direction) => {
                self.moving = true;
                out.push(Command::StepPlayer {
                    direction,
                    running: input.run,
                });
            }
            None if self.moving => {
                self.moving = false;
                out.push(Command::HaltPlayer);
            }
            None => {}
        }
    }
}
