use super::table::{cell, required_cell, RawTable};
use crate::error::PipelineError;

pub const COL_COMPETITION: &str = "CompetitionID";
pub const COL_SESSION: &str = "SessionID";
pub const COL_GAME: &str = "GameID";
pub const COL_TEAM: &str = "TeamID";
pub const COL_END: &str = "EndID";
pub const COL_RESULT: &str = "Result";
pub const COL_POWER_PLAY: &str = "PowerPlay";
pub const COL_TEAM_1: &str = "TeamID1";
pub const COL_TEAM_2: &str = "TeamID2";

/// One team's line for one end, as read from the ends table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndRecord {
    /// Position in the source table (0-based), used to carry raw columns through.
    pub source_row: usize,
    pub competition_id: String,
    pub session_id: String,
    pub game_id: String,
    pub team_id: String,
    pub end_id: u32,
    /// Points as written in the file. Not interpreted here.
    pub result: Option<String>,
    /// Present when the team called a power play; the value may name the stone.
    pub power_play: Option<String>,
}

/// The two teams contesting one match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    pub competition_id: String,
    pub session_id: String,
    pub game_id: String,
    pub team_id_1: Option<String>,
    pub team_id_2: Option<String>,
}

struct EndColumns {
    competition: usize,
    session: usize,
    game: usize,
    team: usize,
    end: usize,
    result: usize,
    power_play: usize,
}

impl EndColumns {
    fn locate(table: &RawTable) -> Result<Self, PipelineError> {
        Ok(Self {
            competition: table.column(COL_COMPETITION)?,
            session: table.column(COL_SESSION)?,
            game: table.column(COL_GAME)?,
            team: table.column(COL_TEAM)?,
            end: table.column(COL_END)?,
            result: table.column(COL_RESULT)?,
            power_play: table.column(COL_POWER_PLAY)?,
        })
    }
}

/// Parse every row of the ends table. Identifiers and EndID are required;
/// Result and PowerPlay may be blank.
pub fn parse_ends(table: &RawTable) -> Result<Vec<EndRecord>, PipelineError> {
    let cols = EndColumns::locate(table)?;

    table
        .rows
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let row = i + 1;
            let end_raw = required_cell(table, record, cols.end, row)?;
            let end_id = end_raw
                .parse::<u32>()
                .map_err(|_| PipelineError::InvalidEndId {
                    table: table.name.clone(),
                    row,
                    value: end_raw.clone(),
                })?;

            Ok(EndRecord {
                source_row: i,
                competition_id: required_cell(table, record, cols.competition, row)?,
                session_id: required_cell(table, record, cols.session, row)?,
                game_id: required_cell(table, record, cols.game, row)?,
                team_id: required_cell(table, record, cols.team, row)?,
                end_id,
                result: cell(record, cols.result).map(str::to_string),
                power_play: cell(record, cols.power_play).map(str::to_string),
            })
        })
        .collect()
}

/// Parse every row of the games table. Roster slots may be blank; such a
/// match simply resolves no opponents.
pub fn parse_games(table: &RawTable) -> Result<Vec<GameRecord>, PipelineError> {
    let competition = table.column(COL_COMPETITION)?;
    let session = table.column(COL_SESSION)?;
    let game = table.column(COL_GAME)?;
    let team_1 = table.column(COL_TEAM_1)?;
    let team_2 = table.column(COL_TEAM_2)?;

    table
        .rows
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let row = i + 1;
            Ok(GameRecord {
                competition_id: required_cell(table, record, competition, row)?,
                session_id: required_cell(table, record, session, row)?,
                game_id: required_cell(table, record, game, row)?,
                team_id_1: cell(record, team_1).map(str::to_string),
                team_id_2: cell(record, team_2).map(str::to_string),
            })
        })
        .collect()
}
