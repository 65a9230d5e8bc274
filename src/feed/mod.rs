pub mod table;
pub mod types;

use anyhow::Result;
use std::path::Path;
use table::RawTable;
use types::{EndRecord, GameRecord};

/// Both input tables, read and typed.
#[derive(Debug, Clone)]
pub struct Inputs {
    /// Kept untyped alongside `ends` so unused columns survive to the output.
    pub ends_table: RawTable,
    pub ends: Vec<EndRecord>,
    pub games: Vec<GameRecord>,
}

impl Inputs {
    pub fn load(ends_path: &Path, games_path: &Path) -> Result<Self> {
        let ends_table = RawTable::read(ends_path)?;
        let games_table = RawTable::read(games_path)?;
        Self::from_tables(ends_table, &games_table)
    }

    pub fn from_tables(ends_table: RawTable, games_table: &RawTable) -> Result<Self> {
        let ends = types::parse_ends(&ends_table)?;
        let games = types::parse_games(games_table)?;
        tracing::info!(ends = ends.len(), games = games.len(), "inputs loaded");
        Ok(Self { ends_table, ends, games })
    }
}
