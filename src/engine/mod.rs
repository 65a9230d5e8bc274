pub mod classify;
pub mod match_key;
pub mod roster;
pub mod score_state;

pub use classify::{ResultBin, ScoreBucket};
pub use match_key::{Keyed, MatchKey};
pub use roster::{Roster, RosterIndex};
