//! Handles shared between the host and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use orbitlink_core::commands::PlayerCommand;
use orbitlink_core::snapshot::GameStateSnapshot;

/// Commands sent from the host to the game loop thread.
#[derive(Debug, Clone, PartialEq)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    Player(PlayerCommand),
    /// Write the session to disk before the next tick.
    Save,
    /// Discard the save files and start over on the default world.
    NewGame,
    /// Save and stop the game loop thread.
    Shutdown,
}

/// Host-side view of a running game loop.
///
/// The latest snapshot is shared with the loop thread, which replaces it after
/// every tick.
pub struct AppState {
    command_tx: mpsc::Sender<GameLoopCommand>,
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
    handle: Option<JoinHandle<()>>,
}

impl AppState {
    pub fn new(
        command_tx: mpsc::Sender<GameLoopCommand>,
        latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
        handle: JoinHandle<()>,
    ) -> Self {
        Self {
            command_tx,
            latest_snapshot,
            handle: Some(handle),
        }
    }

    /// Forward a command. False once the loop has stopped.
    pub fn send(&self, command: GameLoopCommand) -> bool {
        self.command_tx.send(command).is_ok()
    }

    /// Copy of the most recent snapshot, if a tick has completed.
    pub fn snapshot(&self) -> Option<GameStateSnapshot> {
        self.latest_snapshot.lock().ok().and_then(|lock| lock.clone())
    }

    /// Ask the loop to save and stop, then wait for it.
    pub fn shutdown(&mut self) {
        let _ = self.command_tx.send(GameLoopCommand::Shutdown);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("game loop thread panicked");
            }
        }
    }
}

impl Drop for AppState {
    fn drop(&mut self) {
        self.shutdown();
    }
}
