//! Board layout loader.
//!
//! Layouts are square grids of single-character glyphs, one row per line.
//! Blank lines and lines starting with `#` are ignored.
//!
//! | glyph | cell              |
//! |-------|-------------------|
//! | `.`   | empty             |
//! | `X`   | obstacle          |
//! | `T`   | spike trap        |
//! | `t`   | fire trap         |
//! | `E`   | coin              |
//! | `H`   | health pack       |
//! | `S`   | shield            |
//!
//! The two goal corners must be empty.

use std::path::Path;

use anyhow::Context;
use game_core::{Board, Cell, ResourceKind, TrapKind};

use crate::loaders::{LoadResult, read_file};

/// Loader for board layouts from text files.
pub struct MapLoader;

impl MapLoader {
    /// Load a board layout from a text file.
    pub fn load(path: &Path) -> LoadResult<Board> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("Invalid map {}", path.display()))
    }

    /// Parse a board layout from text.
    pub fn parse(content: &str) -> LoadResult<Board> {
        let rows: Vec<&str> = content
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .collect();

        let size = rows.len();
        if size < 2 {
            anyhow::bail!("map needs at least 2 rows, found {}", size);
        }

        let mut board = Board::new(size as u32)?;
        for (row, line) in rows.iter().enumerate() {
            let width = line.chars().count();
            if width != size {
                anyhow::bail!("row {} has {} cells, expected {}", row, width, size);
            }

            for (col, glyph) in line.chars().enumerate() {
                let cell = Cell::new(row as i32, col as i32);
                let placed = match glyph {
                    '.' => Ok(()),
                    'X' => board.place_obstacle(cell),
                    'T' => board.place_trap(cell, TrapKind::Spike),
                    't' => board.place_trap(cell, TrapKind::Fire),
                    'E' => board.place_resource(cell, ResourceKind::Coin),
                    'H' => board.place_resource(cell, ResourceKind::Health),
                    'S' => board.place_resource(cell, ResourceKind::Shield),
                    other => anyhow::bail!("unknown glyph {:?} at {}", other, cell),
                };
                placed.with_context(|| format!("cannot place {:?} at {}", glyph, cell))?;
            }
        }

        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use game_core::CellKind;

    use super::*;

    const LAYOUT: &str = "\
# arena
.X..
.Tt.
E.HS
X...
";

    #[test]
    fn parses_every_glyph() {
        let board = MapLoader::parse(LAYOUT).unwrap();

        assert_eq!(board.size(), 4);
        assert!(board.is_obstacle(Cell::new(0, 1)));
        assert!(board.is_obstacle(Cell::new(3, 0)));
        assert_eq!(board.traps().get(&Cell::new(1, 1)), Some(&TrapKind::Spike));
        assert_eq!(board.traps().get(&Cell::new(1, 2)), Some(&TrapKind::Fire));
        assert_eq!(board.resources().get(&Cell::new(2, 0)), Some(&ResourceKind::Coin));
        assert_eq!(board.resources().get(&Cell::new(2, 2)), Some(&ResourceKind::Health));
        assert_eq!(board.resources().get(&Cell::new(2, 3)), Some(&ResourceKind::Shield));
        assert_eq!(board.kind(Cell::new(3, 3)), Some(CellKind::Empty));
    }

    #[test]
    fn rejects_malformed_layouts() {
        assert!(MapLoader::parse("..\n...\n").is_err());
        assert!(MapLoader::parse("..\n.?\n").is_err());
        assert!(MapLoader::parse(".\n").is_err());
        // Goal corners are reserved.
        assert!(MapLoader::parse("X.\n..\n").is_err());
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{LAYOUT}").unwrap();

        let board = MapLoader::load(file.path()).unwrap();
        assert_eq!(board.obstacles().len(), 2);
        assert_eq!(board.resources().len(), 3);
    }
}
