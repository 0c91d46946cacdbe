//! Line-oriented commands for the headless host.

use orbitlink_core::commands::PlayerCommand;
use orbitlink_core::snapshot::GameStateSnapshot;

use crate::state::GameLoopCommand;

pub const HELP: &str = "\
commands:
  pause | resume            stop or restart the clock
  scale <x>                 set time scale (0..8)
  route <from> <to>         connect two planets
  delete <route>            remove a route
  upgrade <route>           buy the next route tier
  prestige                  reset for dark matter
  save                      write the session to disk
  new                       discard the save and start over
  status                    print balances and fleet size
  quit                      save and exit";

/// What a console line asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleAction {
    Send(GameLoopCommand),
    Status,
    Help,
}

/// Parse one input line. Blank lines are `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<ConsoleAction>, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let action = match (verb, args.as_slice()) {
        ("pause", []) => player(PlayerCommand::Pause),
        ("resume", []) => player(PlayerCommand::Resume),
        ("scale", [x]) => player(PlayerCommand::SetTimeScale {
            scale: parse_arg(x, "scale")?,
        }),
        ("route", [from, to]) => player(PlayerCommand::CreateRoute {
            source_planet_id: parse_arg(from, "planet id")?,
            target_planet_id: parse_arg(to, "planet id")?,
        }),
        ("delete", [id]) => player(PlayerCommand::DeleteRoute {
            route_id: parse_arg(id, "route id")?,
        }),
        ("upgrade", [id]) => player(PlayerCommand::UpgradeRoute {
            route_id: parse_arg(id, "route id")?,
        }),
        ("prestige", []) => player(PlayerCommand::Prestige),
        ("save", []) => ConsoleAction::Send(GameLoopCommand::Save),
        ("new", []) => ConsoleAction::Send(GameLoopCommand::NewGame),
        ("quit" | "exit", []) => ConsoleAction::Send(GameLoopCommand::Shutdown),
        ("status", []) => ConsoleAction::Status,
        ("help", []) => ConsoleAction::Help,
        _ => return Err(format!("unrecognised command: {}", line.trim())),
    };
    Ok(Some(action))
}

/// One-line summary of a snapshot.
pub fn status_line(snapshot: &GameStateSnapshot) -> String {
    let jammed = snapshot.ships.iter().filter(|s| s.jammed).count();
    format!(
        "t={:.1}s{} credits={:.0} dark_matter={:.0} ships={} jammed={} routes={}{}",
        snapshot.time.elapsed_secs,
        if snapshot.paused { " (paused)" } else { "" },
        snapshot.wallet_balance,
        snapshot.dark_matter_balance,
        snapshot.ships.len(),
        jammed,
        snapshot.routes.len(),
        if snapshot.can_prestige { " [prestige ready]" } else { "" },
    )
}

fn player(command: PlayerCommand) -> ConsoleAction {
    ConsoleAction::Send(GameLoopCommand::Player(command))
}

fn parse_arg<T: std::str::FromStr>(raw: &str, what: &str) -> Result<T, String> {
    raw.parse().map_err(|_| format!("invalid {what}: {raw}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_player_commands() {
        assert_eq!(
            parse_line("route 1 3"),
            Ok(Some(player(PlayerCommand::CreateRoute {
                source_planet_id: 1,
                target_planet_id: 3
            })))
        );
        assert_eq!(
            parse_line("  scale 2.5 "),
            Ok(Some(player(PlayerCommand::SetTimeScale { scale: 2.5 })))
        );
        assert_eq!(
            parse_line("upgrade 101"),
            Ok(Some(player(PlayerCommand::UpgradeRoute { route_id: 101 })))
        );
    }

    #[test]
    fn parses_host_commands() {
        assert_eq!(
            parse_line("quit"),
            Ok(Some(ConsoleAction::Send(GameLoopCommand::Shutdown)))
        );
        assert_eq!(parse_line("status"), Ok(Some(ConsoleAction::Status)));
        assert_eq!(parse_line(""), Ok(None));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_line("route 1").is_err());
        assert!(parse_line("delete abc").is_err());
        assert!(parse_line("warp 9").is_err());
        assert!(parse_line("pause now").is_err());
    }

    #[test]
    fn status_mentions_balances() {
        let snapshot = GameStateSnapshot {
            wallet_balance: 42.0,
            paused: true,
            ..Default::default()
        };
        let line = status_line(&snapshot);
        assert!(line.contains("credits=42"));
        assert!(line.contains("(paused)"));
    }
}
