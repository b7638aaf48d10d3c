//! Client configuration read from the environment.
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use game_content::{ConfigLoader, MapLoader};
use game_core::{Board, Difficulty};
use runtime::{AiConfig, Mode, RuntimeConfig, Strategy};

/// Settings for one headless round.
#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    pub runtime: RuntimeConfig,
    /// Optional text layout replacing the generated board.
    pub map: Option<PathBuf>,
}

impl ClientConfig {
    /// Construct client configuration from environment variables.
    ///
    /// Environment variables:
    /// - `GRID_DUEL_MODE` - `player_vs_ai` or `ai_vs_ai` (default: `ai_vs_ai`)
    /// - `GRID_DUEL_DIFFICULTY` - `easy`, `medium` or `hard` (default: `easy`)
    /// - `GRID_DUEL_SEED` - seed for the board and every AI decision (default: 0)
    /// - `GRID_DUEL_STRATEGY` - `tiered` or `utility`, overriding the
    ///   config file (default: `tiered`)
    /// - `GRID_DUEL_CONFIG` - path to a TOML game configuration; its `[ai]`
    ///   table tunes the policies
    /// - `GRID_DUEL_MAP` - path to a board layout
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        let runtime = &mut config.runtime;

        if let Some(mode) = read_env::<Mode>("GRID_DUEL_MODE")? {
            runtime.mode = mode;
        }
        if let Some(difficulty) = read_env::<Difficulty>("GRID_DUEL_DIFFICULTY")? {
            runtime.difficulty = difficulty;
        }
        if let Some(seed) = read_env::<u64>("GRID_DUEL_SEED")? {
            runtime.seed = seed;
        }
        if let Ok(path) = env::var("GRID_DUEL_CONFIG") {
            runtime.game_config = ConfigLoader::load(path.as_ref())?;
            runtime.ai_config = ConfigLoader::load_section::<AiConfig>(path.as_ref(), "ai")?;
        }
        if let Some(strategy) = read_env::<Strategy>("GRID_DUEL_STRATEGY")? {
            runtime.ai_config.strategy = strategy;
        }
        config.map = env::var_os("GRID_DUEL_MAP").map(PathBuf::from);

        Ok(config)
    }

    /// Loads the configured layout, if any.
    pub fn load_board(&self) -> Result<Option<Board>> {
        self.map
            .as_deref()
            .map(MapLoader::load)
            .transpose()
    }
}

fn read_env<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Ok(raw) = env::var(key) else {
        return Ok(None);
    };
    parse_value(&raw)
        .map(Some)
        .with_context(|| format!("invalid value for {key}"))
}

fn parse_value<T>(raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|err| anyhow::anyhow!("{:?}: {}", raw, err))
}
