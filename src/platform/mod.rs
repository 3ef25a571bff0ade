//! Platform abstraction layer
//!
//! Glue between a host frame loop (window redraw callback, timer, test
//! harness) and the simulation:
//! - `input`: key/drag events to per-tick input snapshots
//! - `time`: variable frame time to fixed ticks

pub mod input;
pub mod time;

pub use input::{InputState, Key};
pub use time::FixedTimestep;

use crate::consts::SIM_DT;
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, StageCatalog, advance_stage, tick};

/// What happened during one host frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    /// Ticks simulated this frame (0 = nothing to redraw)
    pub ticks: u32,
    pub phase: GamePhase,
    /// Events from all ticks run this frame, oldest first
    pub events: Vec<GameEvent>,
}

impl FrameReport {
    /// The world changed and should be redrawn
    pub fn changed(&self) -> bool {
        self.ticks > 0
    }
}

/// Game instance holding state, input buffer and clock
#[derive(Debug, Clone)]
pub struct GameHost {
    pub state: GameState,
    pub input: InputState,
    clock: FixedTimestep,
    last_phase: GamePhase,
}

impl GameHost {
    pub fn new(settings: &Settings, catalog: StageCatalog) -> Self {
        let seed = settings.resolve_seed();
        log::info!("Starting new game with seed: {}", seed);
        Self {
            state: GameState::new(seed, catalog, settings.arena),
            input: InputState::new(),
            clock: FixedTimestep::new(SIM_DT, settings.effective_max_substeps()),
            last_phase: GamePhase::NotStarted,
        }
    }

    /// Run the ticks owed for `elapsed_secs` of wall time
    pub fn frame(&mut self, elapsed_secs: f32) -> FrameReport {
        let owed = self.clock.advance(elapsed_secs);
        let mut events = Vec::new();
        let mut ticks = 0;

        for _ in 0..owed {
            if self.state.phase.is_terminal() {
                break;
            }
            let input = self.input.take_tick_input();
            tick(&mut self.state, &input);
            events.append(&mut self.state.events);
            ticks += 1;
        }

        let phase = self.state.phase;
        if phase != self.last_phase {
            log::debug!("Phase {:?} -> {:?}", self.last_phase, phase);
            self.last_phase = phase;
        }
        FrameReport {
            ticks,
            phase,
            events,
        }
    }

    /// Continue to the next stage after a clear. Returns false on the last stage.
    pub fn next_stage(&mut self) -> bool {
        let advanced = advance_stage(&mut self.state);
        if advanced {
            self.input.release_all();
            self.clock.reset();
        }
        advanced
    }

    /// Restart from stage 1 with the same seed
    pub fn restart(&mut self) {
        self.state.reset();
        self.input.release_all();
        self.clock.reset();
        self.last_phase = GamePhase::NotStarted;
        log::info!("Restarted game with seed: {}", self.state.seed);
    }
}
