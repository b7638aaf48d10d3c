//! Game configuration loader.
//!
//! A config file holds the [`GameConfig`] keys at the top level. Consumers
//! keep their own tuning in named tables next to them, e.g. `[ai]`, and read
//! those with [`ConfigLoader::load_section`].

use std::path::Path;

use anyhow::Context;
use game_core::GameConfig;
use serde::de::DeserializeOwned;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys keep their [`GameConfig::default`] values.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse config data from TOML text.
    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        let bounds = GameConfig::MIN_GRID_SIZE..=GameConfig::MAX_GRID_SIZE;
        if !bounds.contains(&config.grid_size) {
            anyhow::bail!(
                "grid_size must be within {}..={}, got {}",
                GameConfig::MIN_GRID_SIZE,
                GameConfig::MAX_GRID_SIZE,
                config.grid_size
            );
        }

        Ok(config)
    }

    /// Load the `[section]` table of a TOML file.
    ///
    /// A file without the table yields `T::default()`.
    pub fn load_section<T>(path: &Path, section: &str) -> LoadResult<T>
    where
        T: DeserializeOwned + Default,
    {
        let content = read_file(path)?;
        Self::parse_section(&content, section)
    }

    /// Parse the `[section]` table of TOML text.
    pub fn parse_section<T>(content: &str, section: &str) -> LoadResult<T>
    where
        T: DeserializeOwned + Default,
    {
        let mut table: toml::Table = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        match table.remove(section) {
            Some(value) => value
                .try_into()
                .with_context(|| format!("Invalid [{section}] table")),
            None => Ok(T::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[derive(Debug, Default, PartialEq, serde::Deserialize)]
    #[serde(default)]
    struct Tuning {
        depth: u32,
        chance: f64,
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = ConfigLoader::parse("grid_size = 8\nmax_turns = 40\n").unwrap();
        assert_eq!(config.grid_size, 8);
        assert_eq!(config.max_turns, 40);
        assert_eq!(config.melee_damage, GameConfig::default().melee_damage);
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "ranged_damage = 25").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.ranged_damage, 25);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(ConfigLoader::parse("grid_size = 1").is_err());
        assert!(ConfigLoader::parse("grid_size = 70000").is_err());
        assert!(ConfigLoader::parse("grid_size = \"big\"").is_err());
        assert!(ConfigLoader::load(Path::new("/nonexistent/config.toml")).is_err());
    }

    #[test]
    fn sections_sit_beside_game_keys() {
        let content = "grid_size = 10\n\n[tuning]\ndepth = 3\n";

        let config = ConfigLoader::parse(content).unwrap();
        assert_eq!(config.grid_size, 10);

        let tuning: Tuning = ConfigLoader::parse_section(content, "tuning").unwrap();
        assert_eq!(tuning, Tuning { depth: 3, chance: 0.0 });

        let missing: Tuning = ConfigLoader::parse_section(content, "other").unwrap();
        assert_eq!(missing, Tuning::default());
    }

    #[test]
    fn malformed_section_is_rejected() {
        let err = ConfigLoader::parse_section::<Tuning>("[tuning]\ndepth = \"deep\"\n", "tuning")
            .unwrap_err();
        assert!(err.to_string().contains("[tuning]"));
    }
}
