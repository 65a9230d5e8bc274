//! Running score state per team per match.
//!
//! Two passes: first every (match, team) group is summed to give each row the
//! team's score before the end, then a lookup keyed by (match, end, team) is
//! built from the finished table and queried with the *opponent's* team id.
//! The lookup is only built once all groups are summed.

use super::match_key::MatchKey;
use super::roster::cmp_team_ids;
use crate::error::PipelineError;
use std::collections::HashMap;

/// Points credited for a result that is blank or not a number.
pub const MISSING_RESULT_POINTS: u32 = 0;

/// Parse a raw result cell as points. Fractions truncate toward zero;
/// negative, non-finite, non-numeric and out-of-range (above `u32::MAX`)
/// values are rejected rather than clamped.
pub fn parse_points(raw: &str) -> Option<u32> {
    let value: f64 = raw.trim().parse().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    let value = value.trunc();
    if value > f64::from(u32::MAX) {
        return None;
    }
    Some(value as u32)
}

/// Cleaned result: parsed points, or [`MISSING_RESULT_POINTS`] when the raw
/// value is absent or malformed. A blank end counts as no points scored.
pub fn clean_result(raw: Option<&str>) -> u32 {
    raw.and_then(parse_points).unwrap_or(MISSING_RESULT_POINTS)
}

/// The fields of one row the score calculation needs.
#[derive(Debug, Clone, Copy)]
pub struct ScoreInput<'a> {
    pub match_key: &'a MatchKey,
    pub team_id: &'a str,
    pub end_id: u32,
    pub result: u32,
}

/// Score before each end for every row, index-aligned with `rows`.
///
/// The value excludes the row's own result (exclusive prefix sum over the
/// team's ends in that match, ordered by end id). Two rows for the same
/// (match, team, end) leave the order undefined and fail with
/// [`PipelineError::DuplicateEnd`].
pub fn score_before_end(rows: &[ScoreInput<'_>]) -> Result<Vec<u64>, PipelineError> {
    let mut order: Vec<usize> = (0..rows.len()).collect();
    order.sort_by(|&a, &b| {
        let (ra, rb) = (&rows[a], &rows[b]);
        ra.match_key
            .cmp(rb.match_key)
            .then_with(|| cmp_team_ids(ra.team_id, rb.team_id))
            .then_with(|| ra.end_id.cmp(&rb.end_id))
    });

    let mut before = vec![0u64; rows.len()];
    let mut prev: Option<&ScoreInput<'_>> = None;
    let mut running: u64 = 0;

    for &idx in &order {
        let row = &rows[idx];
        match prev {
            Some(p) if p.match_key == row.match_key && p.team_id == row.team_id => {
                if p.end_id == row.end_id {
                    return Err(PipelineError::DuplicateEnd {
                        match_id: row.match_key.to_string(),
                        team_id: row.team_id.to_string(),
                        end_id: row.end_id,
                    });
                }
            }
            _ => running = 0,
        }
        before[idx] = running;
        running = running.saturating_add(u64::from(row.result));
        prev = Some(row);
    }

    Ok(before)
}

/// Score-before-end keyed by (match, end, team), built from a fully computed
/// [`score_before_end`] result.
#[derive(Debug, Default)]
pub struct ScoreLookup<'a> {
    scores: HashMap<(&'a MatchKey, u32, &'a str), u64>,
}

impl<'a> ScoreLookup<'a> {
    pub fn build(rows: &[ScoreInput<'a>], before: &[u64]) -> Self {
        let scores = rows
            .iter()
            .zip(before)
            .map(|(row, &score)| ((row.match_key, row.end_id, row.team_id), score))
            .collect();
        Self { scores }
    }

    pub fn get(&self, match_key: &'a MatchKey, end_id: u32, team_id: &'a str) -> Option<u64> {
        self.scores.get(&(match_key, end_id, team_id)).copied()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// Opponent score before the same end, `None` when there is no opponent or
/// the opponent has no row for that end. Zero is a real score and is never
/// used as a stand-in.
pub fn opponent_score_before_end<'a>(
    lookup: &ScoreLookup<'a>,
    match_key: &'a MatchKey,
    end_id: u32,
    opponent: Option<&'a str>,
) -> Option<u64> {
    opponent.and_then(|opp| lookup.get(match_key, end_id, opp))
}

/// Team minus opponent, only when both sides are known. Saturates at the
/// `i64` bounds, which only matters for the bucket's sign.
pub fn score_differential(team: u64, opponent: Option<u64>) -> Option<i64> {
    opponent.map(|opp| {
        let diff = i128::from(team) - i128::from(opp);
        i64::try_from(diff).unwrap_or(if diff < 0 { i64::MIN } else { i64::MAX })
    })
}
