use crate::chess::{Color, Role};
use derive_more::{Display, Error};
use std::fmt::{self, Formatter};
use std::str::FromStr;

/// A chess [piece][`Role`] of a certain [`Color`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub struct Piece(pub Color, pub Role);

impl Piece {
    /// This piece's [`Color`].
    #[inline(always)]
    pub const fn color(&self) -> Color {
        self.0
    }

    /// This piece's [`Role`].
    #[inline(always)]
    pub const fn role(&self) -> Role {
        self.1
    }
}

/// Formats the piece as a FEN letter, uppercase for white.
impl fmt::Display for Piece {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let role = self.role().to_string();
        match self.color() {
            Color::White => f.write_str(&role.to_ascii_uppercase()),
            Color::Black => f.write_str(&role),
        }
    }
}

/// The reason why parsing [`Piece`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "failed to parse piece, expected one of `KQBNRPkqbnrp`")]
pub struct ParsePieceError;

impl FromStr for Piece {
    type Err = ParsePieceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let role = s.to_ascii_lowercase().parse().map_err(|_| ParsePieceError)?;
        if s.chars().all(|c| c.is_ascii_uppercase()) {
            Ok(Piece(Color::White, role))
        } else {
            Ok(Piece(Color::Black, role))
        }
    }
}
