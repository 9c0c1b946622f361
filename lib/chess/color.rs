use derive_more::{Display, Error};
use std::{ops::Not, str::FromStr};

/// The color of a chess [`Piece`][`crate::chess::Piece`].
///
/// The discriminants are sign opposites, so the direction a side advances
/// along the rows is given by [`Color::sign`].
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[repr(i8)]
pub enum Color {
    #[display(fmt = "white")]
    White = 1,
    #[display(fmt = "black")]
    Black = -1,
}

impl Color {
    /// `+1` for white, `-1` for black.
    #[inline(always)]
    pub const fn sign(&self) -> i8 {
        *self as i8
    }
}

impl Not for Color {
    type Output = Self;

    #[inline(always)]
    fn not(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

/// The reason why parsing [`Color`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "failed to parse side to move, expected `w` or `b`")]
pub struct ParseColorError;

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "w" => Ok(Color::White),
            "b" => Ok(Color::Black),
            _ => Err(ParseColorError),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[proptest]
    fn color_implements_not_operator(c: Color) {
        assert_eq!(!!c, c);
        assert_ne!(!c, c);
    }

    #[proptest]
    fn opposite_colors_have_opposite_signs(c: Color) {
        assert_eq!((!c).sign(), -c.sign());
    }

    #[test]
    fn white_advances_towards_increasing_rows() {
        assert_eq!(Color::White.sign(), 1);
        assert_eq!(Color::Black.sign(), -1);
    }

    #[test]
    fn color_can_be_parsed_from_side_to_move() {
        assert_eq!("w".parse(), Ok(Color::White));
        assert_eq!("b".parse(), Ok(Color::Black));
    }

    #[proptest]
    fn parsing_color_fails_if_not_w_or_b(#[filter(#s != "w" && #s != "b")] s: String) {
        assert_eq!(s.parse::<Color>(), Err(ParseColorError));
    }
}
