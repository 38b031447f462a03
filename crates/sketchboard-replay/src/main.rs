//! Replay a scripted input sequence through the engine (native).
//!
//! Usage: `sketchboard-replay [SCRIPT.json]`. Reads stdin when no path (or
//! `-`) is given and prints the final board state as JSON.

mod script;

use script::{ReplayError, Script, replay};
use std::io::Read;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("replay failed: {}", err);
            eprintln!("sketchboard-replay: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), ReplayError> {
    let source = match std::env::args().nth(1) {
        Some(path) if path != "-" => {
            log::info!("Loading script {}", path);
            std::fs::read_to_string(path)?
        }
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let script = Script::from_json(&source)?;
    let report = replay(&script)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
