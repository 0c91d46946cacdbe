//! ORBITLINK headless runner.
//!
//! Usage:
//!   orbitlink [--config orbitlink.toml] [--saves saves]
//!
//! Reads commands from stdin (`help` lists them). End of input saves and exits.

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use orbitlink_app::console::{self, ConsoleAction};
use orbitlink_app::game_loop::{self, LoopSettings};
use orbitlink_app::state::{AppState, GameLoopCommand};
use orbitlink_core::config::SimConfig;

fn flag_value(args: &[String], flag: &str) -> Option<PathBuf> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(PathBuf::from)
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let config_path = flag_value(&args, "--config").unwrap_or_else(|| PathBuf::from("orbitlink.toml"));
    let save_dir = flag_value(&args, "--saves").unwrap_or_else(|| PathBuf::from("saves"));

    let config = SimConfig::load_or_default(&config_path);
    let latest = Arc::new(Mutex::new(None));
    let (tx, handle) = match game_loop::spawn_game_loop(
        LoopSettings::new(config, save_dir),
        Arc::clone(&latest),
    ) {
        Ok(spawned) => spawned,
        Err(e) => {
            eprintln!("failed to start game loop: {e}");
            std::process::exit(1);
        }
    };
    let mut app = AppState::new(tx, latest, handle);

    println!("=== ORBITLINK ===");
    println!("{}", console::HELP);

    for line in io::stdin().lock().lines() {
        let Ok(line) = line else { break };
        match console::parse_line(&line) {
            Ok(None) => {}
            Ok(Some(ConsoleAction::Help)) => println!("{}", console::HELP),
            Ok(Some(ConsoleAction::Status)) => match app.snapshot() {
                Some(snapshot) => println!("{}", console::status_line(&snapshot)),
                None => println!("no tick has run yet"),
            },
            Ok(Some(ConsoleAction::Send(GameLoopCommand::Shutdown))) => break,
            Ok(Some(ConsoleAction::Send(command))) => {
                if !app.send(command) {
                    eprintln!("game loop has stopped");
                    break;
                }
            }
            Err(e) => eprintln!("{e}"),
        }
    }

    app.shutdown();
}
