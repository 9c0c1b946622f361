use derive_more::Display;
use serde::{Deserialize, Serialize};

/// The high-level state of a game.
#[derive(Debug, Display, Default, Copy, Clone, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// The side to move has at least one legal move.
    #[default]
    #[display(fmt = "playing")]
    Playing,

    /// The side to move has no legal moves and its king is not covered.
    #[display(fmt = "stalemate")]
    Stalemate,

    /// The side to move has no legal moves and its king is covered.
    #[display(fmt = "checkmate")]
    Checkmate,
}

impl Status {
    /// Whether the game is over.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Status::Playing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[test]
    fn games_start_out_playing() {
        assert_eq!(Status::default(), Status::Playing);
        assert!(!Status::Playing.is_terminal());
    }

    #[proptest]
    fn only_playing_is_not_terminal(s: Status) {
        assert_eq!(s.is_terminal(), s != Status::Playing);
    }

    #[proptest]
    fn status_is_serializable(s: Status) {
        assert_eq!(ron::de::from_str::<Status>(&ron::ser::to_string(&s)?), Ok(s));
    }
}
