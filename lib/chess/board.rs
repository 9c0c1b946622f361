use crate::chess::{movegen, Color, Move, Piece, Role, Square};
use derive_more::{Display, Error};
use std::collections::HashSet;
use std::fmt::{self, Write};
use std::{ops::Index, str::FromStr};

/// The chess board.
///
/// Holds the piece placement and the side to move, it does not validate
/// whether the placement is reachable by any sequence of moves.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Board {
    squares: [Option<Piece>; 64],
    pub turn: Color,
}

impl Default for Board {
    /// The standard starting position, white to move.
    fn default() -> Self {
        use {Color::*, Role::*};

        let mut board = Board::empty(White);
        let back = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];

        for (column, role) in (1..=Board::SIZE).zip(back) {
            for (row, piece) in [
                (1, Piece(White, role)),
                (2, Piece(White, Pawn)),
                (7, Piece(Black, Pawn)),
                (8, Piece(Black, role)),
            ] {
                if let Some(sq) = Square::new(row, column) {
                    board.set(sq, Some(piece));
                }
            }
        }

        board
    }
}

impl Board {
    /// The number of rows, which is also the number of columns.
    pub const SIZE: i8 = 8;

    /// A board without any pieces.
    pub fn empty(turn: Color) -> Self {
        Board {
            squares: [None; 64],
            turn,
        }
    }

    /// The [`Piece`] on the given [`Square`], if any.
    #[inline(always)]
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }

    /// Places a piece on a square, or clears it, returning the previous occupant.
    #[inline(always)]
    pub fn set(&mut self, sq: Square, p: Option<Piece>) -> Option<Piece> {
        std::mem::replace(&mut self.squares[sq.index()], p)
    }

    /// Clears a square, returning its previous occupant.
    #[inline(always)]
    pub fn take(&mut self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()].take()
    }

    /// An iterator over all pieces on the board.
    pub fn iter(&self) -> impl Iterator<Item = (Piece, Square)> + '_ {
        Square::iter().filter_map(|sq| Some((self[sq]?, sq)))
    }

    /// [`Square`]s occupied by a [`Color`].
    pub fn by_color(&self, c: Color) -> impl Iterator<Item = Square> + '_ {
        self.iter()
            .filter(move |(p, _)| p.color() == c)
            .map(|(_, sq)| sq)
    }

    /// [`Square`] occupied by a the king of a [`Color`].
    pub fn king(&self, side: Color) -> Option<Square> {
        let king = Piece(side, Role::King);
        self.iter().find(|&(p, _)| p == king).map(|(_, sq)| sq)
    }

    /// Whether the king of the side to move is covered by an opponent's piece.
    pub fn is_check(&self) -> bool {
        self.king(self.turn)
            .is_some_and(|k| movegen::is_attacked(self, k, !self.turn))
    }

    /// The legal [`Move`]s of the side to move.
    ///
    /// See [`movegen::moves`].
    pub fn moves(&self) -> HashSet<Move> {
        movegen::moves(self)
    }

    /// Relocates a piece and passes the turn, without checking legality.
    ///
    /// Returns the piece previously at the landing square, if any.
    pub fn play_unchecked(&mut self, m: Move) -> Option<Piece> {
        let piece = self.take(m.whence());
        let capture = self.set(m.whither(), piece);
        self.turn = !self.turn;
        capture
    }
}

/// Retrieves the [`Piece`] at a given [`Square`], if any.
impl Index<Square> for Board {
    type Output = Option<Piece>;

    #[inline(always)]
    fn index(&self, sq: Square) -> &Self::Output {
        &self.squares[sq.index()]
    }
}

/// Formats the board as the first two fields of a FEN string.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (1..=Board::SIZE).rev() {
            let mut skip = 0;

            for sq in (1..=Board::SIZE).filter_map(|c| Square::new(row, c)) {
                match self[sq] {
                    None => skip += 1,
                    Some(p) => {
                        if skip > 0 {
                            write!(f, "{}", skip)?;
                            skip = 0;
                        }

                        write!(f, "{}", p)?;
                    }
                }
            }

            if skip > 0 {
                write!(f, "{}", skip)?;
            }

            if row > 1 {
                f.write_char('/')?;
            }
        }

        match self.turn {
            Color::White => f.write_str(" w"),
            Color::Black => f.write_str(" b"),
        }
    }
}

/// The reason why parsing [`Board`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
pub enum ParseBoardError {
    #[display(fmt = "failed to parse piece placement")]
    InvalidPlacement,
    #[display(fmt = "failed to parse side to move")]
    InvalidSideToMove,
    #[display(fmt = "expected piece placement followed by side to move")]
    InvalidSyntax,
}

impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<_> = s.split(' ').collect();
        let [placement, turn] = &fields[..] else {
            return Err(ParseBoardError::InvalidSyntax);
        };

        let turn = turn
            .parse()
            .map_err(|_| ParseBoardError::InvalidSideToMove)?;

        let rows: Vec<_> = placement.split('/').rev().collect();
        if rows.len() != Board::SIZE as usize {
            return Err(ParseBoardError::InvalidPlacement);
        }

        let mut board = Board::empty(turn);
        for (row, segment) in (1..=Board::SIZE).zip(rows) {
            let mut column = 1;
            for c in segment.chars() {
                if let Some(skip) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                    column += skip as i8;
                } else {
                    let mut buffer = [0; 4];
                    let piece = c
                        .encode_utf8(&mut buffer)
                        .parse()
                        .map_err(|_| ParseBoardError::InvalidPlacement)?;

                    let sq = Square::new(row, column).ok_or(ParseBoardError::InvalidPlacement)?;
                    board.set(sq, Some(piece));
                    column += 1;
                }

                if column > Board::SIZE + 1 {
                    return Err(ParseBoardError::InvalidPlacement);
                }
            }

            if column != Board::SIZE + 1 {
                return Err(ParseBoardError::InvalidPlacement);
            }
        }

        Ok(board)
    }
}

#[cfg(test)]
impl proptest::arbitrary::Arbitrary for Board {
    type Parameters = ();
    type Strategy = proptest::strategy::BoxedStrategy<Board>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        use proptest::{collection::vec, prelude::*};

        (vec(any::<Option<Piece>>(), 64), any::<Color>())
            .prop_map(|(squares, turn)| {
                let mut board = Board::empty(turn);
                for (sq, p) in Square::iter().zip(squares) {
                    board.set(sq, p);
                }

                board
            })
            .boxed()
    }
}
