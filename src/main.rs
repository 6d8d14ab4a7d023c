use anyhow::Result;

use chess_swiss::cli::Command;
use chess_swiss::{handle_pair, handle_standings, interpret};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Pair { snapshot, json } => handle_pair(snapshot, *json),
        Command::Standings { snapshot, json } => handle_standings(snapshot, *json),
    }
}
