//! Game loop thread: runs the simulation engine at 30Hz and publishes snapshots.
//!
//! The engine is created inside the thread so it is never shared. Commands
//! arrive via `mpsc` channel; snapshots are stored in shared state for polling.
//! Saves happen between ticks, never inside one.

use std::io;
use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use log::{info, warn};

use orbitlink_core::config::SimConfig;
use orbitlink_core::constants::{DT, TICK_RATE};
use orbitlink_core::snapshot::GameStateSnapshot;
use orbitlink_persistence::SaveStore;
use orbitlink_sim::{SimulationEngine, TickSummary};

use crate::state::GameLoopCommand;

/// Nominal duration of one tick.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Default autosave cadence: every 30 seconds of wall time.
pub const DEFAULT_AUTOSAVE_TICKS: u64 = 30 * TICK_RATE as u64;

/// Everything the loop needs to start a session.
#[derive(Debug, Clone)]
pub struct LoopSettings {
    pub sim: SimConfig,
    pub save_dir: PathBuf,
    /// Ticks between autosaves. Zero disables autosave.
    pub autosave_ticks: u64,
}

impl LoopSettings {
    pub fn new(sim: SimConfig, save_dir: impl Into<PathBuf>) -> Self {
        Self {
            sim,
            save_dir: save_dir.into(),
            autosave_ticks: DEFAULT_AUTOSAVE_TICKS,
        }
    }
}

/// One session plus its save store. Driven by the loop thread, or directly in
/// tests.
pub struct GameLoop {
    engine: SimulationEngine,
    store: SaveStore,
    settings: LoopSettings,
    ticks_since_save: u64,
}

impl GameLoop {
    /// Resume whatever the save directory holds.
    pub fn start(settings: LoopSettings) -> Self {
        let store = SaveStore::new(&settings.save_dir);
        let (state, source) = store.load_with_source();
        info!("starting session ({source:?})");
        Self {
            engine: SimulationEngine::with_state(settings.sim.clone(), state),
            store,
            settings,
            ticks_since_save: 0,
        }
    }

    pub fn engine(&self) -> &SimulationEngine {
        &self.engine
    }

    /// Apply a host command. Returns false when the loop should stop.
    pub fn handle(&mut self, command: GameLoopCommand) -> bool {
        match command {
            GameLoopCommand::Player(cmd) => self.engine.queue_command(cmd),
            GameLoopCommand::Save => {
                self.save();
            }
            GameLoopCommand::NewGame => {
                if let Err(e) = self.store.delete() {
                    warn!("could not remove old save: {e}");
                }
                self.engine.restart();
                self.ticks_since_save = 0;
                info!("new game started");
            }
            GameLoopCommand::Shutdown => {
                self.save();
                return false;
            }
        }
        true
    }

    /// Run one tick, publish the snapshot and autosave when due.
    pub fn tick(&mut self, latest_snapshot: &Mutex<Option<GameStateSnapshot>>) -> TickSummary {
        let summary = self.engine.tick(DT);

        let snapshot = self.engine.snapshot();
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        self.ticks_since_save += 1;
        if self.settings.autosave_ticks > 0 && self.ticks_since_save >= self.settings.autosave_ticks {
            self.save();
        }
        summary
    }

    /// Save now. Failures are logged by the store and the session carries on.
    pub fn save(&mut self) -> bool {
        self.ticks_since_save = 0;
        self.store.save(self.engine.state()).is_ok()
    }
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender for the host and the thread handle.
pub fn spawn_game_loop(
    settings: LoopSettings,
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
) -> io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("orbitlink-game-loop".into())
        .spawn(move || {
            run_game_loop(settings, cmd_rx, &latest_snapshot);
        })?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    settings: LoopSettings,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) {
    let mut game = GameLoop::start(settings);
    let mut next_tick_time = Instant::now();
    info!("game loop running at {TICK_RATE} Hz");

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(command) => {
                    if !game.handle(command) {
                        info!("game loop stopped");
                        return;
                    }
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    game.save();
                    info!("host went away; game loop stopped");
                    return;
                }
            }
        }

        // 2. Advance one tick (the engine applies pause and time scale)
        game.tick(latest_snapshot);

        // 3. Sleep until next tick
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind; reset to avoid catch-up spiral
            next_tick_time = now;
        }
    }
}
