use derive_more::{Display, Error};
use std::fmt::{self, Formatter, Write};
use std::str::FromStr;

/// The type of a chess [`Piece`][`crate::chess::Piece`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[repr(u8)]
pub enum Role {
    King,
    Queen,
    Bishop,
    Knight,
    Rook,
    Pawn,
}

impl Role {
    /// All roles.
    pub const ALL: [Role; 6] = [
        Role::King,
        Role::Queen,
        Role::Bishop,
        Role::Knight,
        Role::Rook,
        Role::Pawn,
    ];

    /// Whether pieces of this role may be captured.
    ///
    /// Kings are never a capture target.
    #[inline(always)]
    pub const fn is_capturable(&self) -> bool {
        !matches!(self, Role::King)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Role::King => f.write_char('k'),
            Role::Queen => f.write_char('q'),
            Role::Bishop => f.write_char('b'),
            Role::Knight => f.write_char('n'),
            Role::Rook => f.write_char('r'),
            Role::Pawn => f.write_char('p'),
        }
    }
}

/// The reason why parsing [`Role`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "failed to parse role, expected one of `kqbnrp`")]
pub struct ParseRoleError;

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "k" => Ok(Role::King),
            "q" => Ok(Role::Queen),
            "b" => Ok(Role::Bishop),
            "n" => Ok(Role::Knight),
            "r" => Ok(Role::Rook),
            "p" => Ok(Role::Pawn),
            _ => Err(ParseRoleError),
        }
    }
}
