use crate::chess::{ParseSquareError, Square};
use derive_more::{Display, Error, From};
use std::str::FromStr;

/// A chess move in [pure coordinate notation].
///
/// A move only means something in the context of the board that produced
/// it, it carries no information about the pieces involved.
///
/// [pure coordinate notation]: https://www.chessprogramming.org/Algebraic_Chess_Notation#Pure_coordinate_notation
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[cfg_attr(test, filter(#self.0 != #self.1))]
#[display(fmt = "{}{}", _0, _1)]
pub struct Move(pub Square, pub Square);

impl Move {
    /// The start [`Square`].
    #[inline(always)]
    pub fn whence(&self) -> Square {
        self.0
    }

    /// The landing [`Square`].
    #[inline(always)]
    pub fn whither(&self) -> Square {
        self.1
    }
}

/// The reason why parsing [`Move`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
pub enum ParseMoveError {
    #[display(fmt = "failed to parse move, {}", _0)]
    InvalidSquare(ParseSquareError),
    #[display(fmt = "failed to parse move, expected exactly two squares")]
    #[from(ignore)]
    InvalidLength,
}

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((i, _)) = s.char_indices().nth(2).filter(|_| s.chars().count() == 4) else {
            return Err(ParseMoveError::InvalidLength);
        };

        Ok(Move(s[..i].parse()?, s[i..].parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use test_strategy::proptest;

    #[proptest]
    fn move_has_a_start_and_a_landing_square(a: Square, b: Square) {
        let m = Move(a, b);
        assert_eq!(m.whence(), a);
        assert_eq!(m.whither(), b);
    }

    #[proptest]
    fn moves_are_compared_by_value(m: Move) {
        let copy = Move(m.whence(), m.whither());
        assert_eq!(copy, m);
        assert_eq!(HashSet::from([m, copy]).len(), 1);
    }

    #[proptest]
    fn parsing_printed_move_is_an_identity(m: Move) {
        assert_eq!(m.to_string().parse(), Ok(m));
    }

    #[proptest]
    fn parsing_move_fails_if_length_not_four(#[filter(#s.chars().count() != 4)] s: String) {
        assert_eq!(s.parse::<Move>(), Err(ParseMoveError::InvalidLength));
    }

    #[proptest]
    fn parsing_move_fails_if_square_invalid(
        sq: Square,
        #[filter(!('a'..='h').contains(&#c))] c: char,
        #[strategy("[1-8]")] r: String,
    ) {
        assert!(matches!(
            format!("{sq}{c}{r}").parse::<Move>(),
            Err(ParseMoveError::InvalidSquare(_))
        ));
    }
}
