//! Data-driven content loaders.
//!
//! This crate reads the static inputs of a round from disk:
//! - Game configuration (data-driven via TOML)
//! - Board layouts (plain-text grids, one glyph per cell)
//!
//! All loaders produce `game-core` types directly.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, LoadResult, MapLoader};
