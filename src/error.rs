use thiserror::Error;

/// Precondition violations that abort a run.
///
/// Data-quality gaps that the table can represent (unresolved opponents,
/// unparseable results) are not errors; they surface as missing cells and
/// counts in the run report.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PipelineError {
    #[error("{table}: required column `{column}` not found in header")]
    MissingColumn { table: String, column: String },

    #[error("{table} row {row}: `{column}` is empty")]
    MissingIdentifier {
        table: String,
        row: usize,
        column: String,
    },

    #[error("{table}: column `{column}` clashes with a derived output column")]
    ColumnCollision { table: String, column: String },

    #[error("{table} row {row}: EndID `{value}` is not a non-negative integer")]
    InvalidEndId {
        table: String,
        row: usize,
        value: String,
    },

    #[error("match {match_id}: team {team_id} has more than one record for end {end_id}")]
    DuplicateEnd {
        match_id: String,
        team_id: String,
        end_id: u32,
    },

    #[error("match {match_id}: listed more than once in the games table")]
    DuplicateMatch { match_id: String },

    #[error("match {match_id}: roster lists team {team_id} in both slots")]
    InvalidRoster { match_id: String, team_id: String },
}
