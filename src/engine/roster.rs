use super::match_key::{Keyed, MatchKey};
use crate::error::PipelineError;
use crate::feed::types::GameRecord;
use std::cmp::Ordering;
use std::collections::HashMap;

/// The two registered teams of one match, in games-table slot order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    pub team_1: Option<String>,
    pub team_2: Option<String>,
}

impl Roster {
    /// The other slot's team, or `None` when `team` is in neither slot.
    /// Never guesses: a team missing from the roster has no opponent.
    pub fn opponent_of(&self, team: &str) -> Option<&str> {
        if self.team_1.as_deref() == Some(team) {
            self.team_2.as_deref()
        } else if self.team_2.as_deref() == Some(team) {
            self.team_1.as_deref()
        } else {
            None
        }
    }
}

pub type RosterIndex = HashMap<MatchKey, Roster>;

fn is_numeric_id(id: &str) -> bool {
    !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit())
}

/// Order for team ids: all-digit ids compare by value ("9" before "10") and
/// sort ahead of any other id; everything else compares as text. Equal values
/// spelled differently ("07" vs "7") fall back to text so the order stays
/// consistent with string equality.
pub fn cmp_team_ids(a: &str, b: &str) -> Ordering {
    match (is_numeric_id(a), is_numeric_id(b)) {
        (true, true) => {
            let (ta, tb) = (a.trim_start_matches('0'), b.trim_start_matches('0'));
            ta.len()
                .cmp(&tb.len())
                .then_with(|| ta.cmp(tb))
                .then_with(|| a.cmp(b))
        }
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.cmp(b),
    }
}

/// Project the games table to match key -> roster.
///
/// A match listed twice would fan out end rows on join, and a roster naming
/// the same team twice has no well-defined opponent; both fail the run.
pub fn build_roster_index(games: &[GameRecord]) -> Result<RosterIndex, PipelineError> {
    let mut index = RosterIndex::with_capacity(games.len());

    for game in games {
        let key = game.match_key();

        if let (Some(t1), Some(t2)) = (&game.team_id_1, &game.team_id_2) {
            if t1 == t2 {
                return Err(PipelineError::InvalidRoster {
                    match_id: key.to_string(),
                    team_id: t1.clone(),
                });
            }
        }

        let roster = Roster {
            team_1: game.team_id_1.clone(),
            team_2: game.team_id_2.clone(),
        };
        if index.insert(key.clone(), roster).is_some() {
            return Err(PipelineError::DuplicateMatch {
                match_id: key.to_string(),
            });
        }
    }

    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(g: &str, t1: Option<&str>, t2: Option<&str>) -> GameRecord {
        GameRecord {
            competition_id: "1".into(),
            session_id: "1".into(),
            game_id: g.into(),
            team_id_1: t1.map(Into::into),
            team_id_2: t2.map(Into::into),
        }
    }

    #[test]
    fn test_numeric_team_ids_order_by_value() {
        assert_eq!(cmp_team_ids("9", "10"), Ordering::Less);
        assert_eq!(cmp_team_ids("100", "20"), Ordering::Greater);
        assert_eq!(cmp_team_ids("12", "12"), Ordering::Equal);
        assert_eq!(cmp_team_ids("007", "7"), Ordering::Less);
        assert_eq!(cmp_team_ids("7", "007"), Ordering::Greater);
    }

    #[test]
    fn test_text_team_ids_order_as_text() {
        assert_eq!(cmp_team_ids("B", "A"), Ordering::Greater);
        assert_eq!(cmp_team_ids("10", "A"), Ordering::Less);
        assert_eq!(cmp_team_ids("A", "10"), Ordering::Greater);
        assert_eq!(cmp_team_ids("T10", "T9"), Ordering::Less);
    }

    #[test]
    fn test_opponent_resolves_both_slots() {
        let roster = Roster { team_1: Some("A".into()), team_2: Some("B".into()) };
        assert_eq!(roster.opponent_of("A"), Some("B"));
        assert_eq!(roster.opponent_of("B"), Some("A"));
    }

    #[test]
    fn test_unknown_team_has_no_opponent() {
        let roster = Roster { team_1: Some("A".into()), team_2: Some("B".into()) };
        assert_eq!(roster.opponent_of("C"), None);
    }

    #[test]
    fn test_blank_slot_gives_no_opponent() {
        let roster = Roster { team_1: Some("A".into()), team_2: None };
        assert_eq!(roster.opponent_of("A"), None);
    }

    #[test]
    fn test_index_by_match_key() {
        let index = build_roster_index(&[
            game("1", Some("A"), Some("B")),
            game("2", Some("C"), Some("D")),
        ])
        .unwrap();
        assert_eq!(index.len(), 2);
        let roster = &index[&MatchKey::new("1", "1", "2")];
        assert_eq!(roster.opponent_of("D"), Some("C"));
    }

    #[test]
    fn test_duplicate_match_rejected() {
        let err = build_roster_index(&[
            game("1", Some("A"), Some("B")),
            game("1", Some("A"), Some("B")),
        ])
        .unwrap_err();
        assert_eq!(err, PipelineError::DuplicateMatch { match_id: "1-1-1".into() });
    }

    #[test]
    fn test_same_team_both_slots_rejected() {
        let err = build_roster_index(&[game("1", Some("A"), Some("A"))]).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidRoster { .. }));
    }
}
