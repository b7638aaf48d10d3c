//! Grid duel client binary.
//!
//! Plays one headless round and prints the result:
//! - `ai_vs_ai`: both agents run the mirror policy until the round ends
//! - `player_vs_ai`: moves are read from stdin, one of `n`/`s`/`e`/`w` per
//!   line, and the tiered policy answers each of them
//!
//! Configuration comes from the environment (and `.env`), see
//! [`config::ClientConfig::from_env`].

mod config;

use std::io::{self, BufRead};
use std::time::Instant;

use anyhow::{Context, Result};
use game_core::{Direction, GameError};
use runtime::{Mode, RuntimeError, Session, Side};

use crate::config::ClientConfig;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::from_env()?;
    tracing::info!(
        mode = %config.runtime.mode,
        difficulty = %config.runtime.difficulty,
        strategy = %config.runtime.ai_config.strategy,
        seed = config.runtime.seed,
        "Starting grid duel"
    );

    let started = match config.load_board()? {
        Some(board) => Session::with_board(config.runtime.clone(), board),
        None => Session::new(config.runtime.clone()),
    };
    let mut session = started.inspect_err(log_runtime_error)?;
    println!("{}", session.board());

    match session.mode() {
        Mode::AiVsAi => {
            session
                .run_to_completion(Instant::now)
                .inspect_err(log_runtime_error)?;
        }
        Mode::PlayerVsAi => play_interactive(&mut session)?,
    }

    report(&session);
    Ok(())
}

fn play_interactive(session: &mut Session) -> Result<()> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read move from stdin")?;
        let Some(direction) = parse_direction(&line) else {
            tracing::warn!(input = %line.trim(), "expected one of n, s, e, w");
            continue;
        };

        let action = match session.player_step(direction, Instant::now()) {
            Ok(action) => action,
            Err(err) if err.severity().is_recoverable() => {
                log_runtime_error(&err);
                break;
            }
            Err(err) => return Err(err.into()),
        };
        tracing::info!(?action, "player moved");
        if session.outcome().is_some() {
            break;
        }

        tracing::info!(
            aim = %session.predicted_cell(Side::First),
            "predicted player cell"
        );
        let reply = session.ai_turn(Instant::now()).inspect_err(log_runtime_error)?;
        tracing::info!(?reply, "ai moved");
        if session.outcome().is_some() {
            break;
        }
    }
    Ok(())
}

fn log_runtime_error(err: &RuntimeError) {
    tracing::error!(
        code = err.error_code(),
        severity = err.severity().as_str(),
        "{err}"
    );
}

fn parse_direction(input: &str) -> Option<Direction> {
    match input.trim().to_ascii_lowercase().as_str() {
        "n" | "north" => Some(Direction::North),
        "s" | "south" => Some(Direction::South),
        "e" | "east" => Some(Direction::East),
        "w" | "west" => Some(Direction::West),
        _ => None,
    }
}

fn report(session: &Session) {
    let (first, second) = session.agents();
    match session.outcome() {
        Some(outcome) => println!(
            "{} after {} turns ({})",
            outcome.winner,
            session.turn(),
            outcome.reason
        ),
        None => println!("round abandoned after {} turns", session.turn()),
    }
    for agent in [first, second] {
        println!(
            "{:>6}: cell {} health {} score {}",
            agent.name, agent.cell, agent.health, agent.score
        );
    }
}
