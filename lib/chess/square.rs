use crate::chess::Board;
use derive_more::{Display, Error};
use std::{fmt, str::FromStr};

/// A square on the chess board.
///
/// Rows and columns are 1-indexed, rows grow away from white's back rank.
/// A [`Square`] is always on the board, off-board coordinates are simply not
/// representable.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub struct Square {
    #[cfg_attr(test, strategy(1..=Board::SIZE))]
    row: i8,
    #[cfg_attr(test, strategy(1..=Board::SIZE))]
    column: i8,
}

impl Square {
    /// Constructs [`Square`] from a pair of row and column, if on the board.
    #[inline(always)]
    pub fn new(row: i8, column: i8) -> Option<Self> {
        let range = 1..=Board::SIZE;
        if range.contains(&row) && range.contains(&column) {
            Some(Square { row, column })
        } else {
            None
        }
    }

    /// This square's row.
    #[inline(always)]
    pub fn row(&self) -> i8 {
        self.row
    }

    /// This square's column.
    #[inline(always)]
    pub fn column(&self) -> i8 {
        self.column
    }

    /// The square displaced by `(rows, columns)`, if still on the board.
    #[inline(always)]
    pub fn offset(&self, rows: i8, columns: i8) -> Option<Self> {
        Square::new(self.row.checked_add(rows)?, self.column.checked_add(columns)?)
    }

    /// This square's position in a row-major array.
    #[inline(always)]
    pub fn index(&self) -> usize {
        ((self.row - 1) * Board::SIZE + self.column - 1) as usize
    }

    /// The square at a position in a row-major array, if any.
    #[inline(always)]
    pub fn from_index(i: usize) -> Option<Self> {
        let size = Board::SIZE as usize;
        if i < size * size {
            Square::new((i / size) as i8 + 1, (i % size) as i8 + 1)
        } else {
            None
        }
    }

    /// An iterator over all squares in row-major order.
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        (0..Board::SIZE * Board::SIZE).map(|i| Square {
            row: i / Board::SIZE + 1,
            column: i % Board::SIZE + 1,
        })
    }
}

/// Formats the square in algebraic notation, e.g. `e4`.
impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let column = char::from(b'a' + self.column as u8 - 1);
        write!(f, "{}{}", column, self.row)
    }
}

/// The reason why parsing [`Square`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
pub enum ParseSquareError {
    #[display(fmt = "failed to parse square, expected column in the range `a..=h`")]
    InvalidColumn,
    #[display(fmt = "failed to parse square, expected row in the range `1..=8`")]
    InvalidRow,
}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();

        let column = match chars.next() {
            Some(c @ 'a'..='h') => (c as u8 - b'a') as i8 + 1,
            _ => return Err(ParseSquareError::InvalidColumn),
        };

        let row = match (chars.next(), chars.next()) {
            (Some(r @ '1'..='8'), None) => (r as u8 - b'0') as i8,
            _ => return Err(ParseSquareError::InvalidRow),
        };

        Square::new(row, column).ok_or(ParseSquareError::InvalidRow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[proptest]
    fn new_constructs_square_from_pair_of_row_and_column(sq: Square) {
        assert_eq!(Square::new(sq.row(), sq.column()), Some(sq));
    }

    #[proptest]
    fn new_fails_if_row_is_off_the_board(
        #[filter(!(1..=Board::SIZE).contains(&#r))] r: i8,
        #[strategy(1..=Board::SIZE)] c: i8,
    ) {
        assert_eq!(Square::new(r, c), None);
    }

    #[proptest]
    fn new_fails_if_column_is_off_the_board(
        #[strategy(1..=Board::SIZE)] r: i8,
        #[filter(!(1..=Board::SIZE).contains(&#c))] c: i8,
    ) {
        assert_eq!(Square::new(r, c), None);
    }

    #[proptest]
    fn offset_displaces_square(sq: Square, #[strategy(-8i8..=8)] dr: i8, #[strategy(-8i8..=8)] dc: i8) {
        assert_eq!(
            sq.offset(dr, dc),
            Square::new(sq.row() + dr, sq.column() + dc)
        );
    }

    #[proptest]
    fn offset_never_overflows(sq: Square, dr: i8, dc: i8) {
        if let Some(s) = sq.offset(dr, dc) {
            assert_eq!(s.row() - sq.row(), dr);
            assert_eq!(s.column() - sq.column(), dc);
        }
    }

    #[proptest]
    fn index_is_row_major(sq: Square) {
        assert_eq!(
            sq.index(),
            (sq.row() as usize - 1) * 8 + sq.column() as usize - 1
        );
    }

    #[proptest]
    fn from_index_is_the_inverse_of_index(sq: Square) {
        assert_eq!(Square::from_index(sq.index()), Some(sq));
    }

    #[proptest]
    fn from_index_fails_past_the_last_square(#[strategy(64usize..)] i: usize) {
        assert_eq!(Square::from_index(i), None);
    }

    #[test]
    fn iter_visits_every_square_once_in_row_major_order() {
        let squares: Vec<_> = Square::iter().collect();
        assert_eq!(squares.len(), 64);
        for (i, sq) in squares.into_iter().enumerate() {
            assert_eq!(sq.index(), i);
        }
    }

    #[test]
    fn squares_are_printed_in_algebraic_notation() {
        assert_eq!(Square::new(1, 1).map(|s| s.to_string()), Some("a1".into()));
        assert_eq!(Square::new(4, 5).map(|s| s.to_string()), Some("e4".into()));
        assert_eq!(Square::new(8, 8).map(|s| s.to_string()), Some("h8".into()));
    }

    #[proptest]
    fn parsing_printed_square_is_an_identity(sq: Square) {
        assert_eq!(sq.to_string().parse(), Ok(sq));
    }

    #[proptest]
    fn parsing_square_fails_if_column_invalid(
        #[filter(!('a'..='h').contains(&#c))] c: char,
        #[strategy(1..=Board::SIZE)] r: i8,
    ) {
        assert_eq!(
            format!("{c}{r}").parse::<Square>(),
            Err(ParseSquareError::InvalidColumn)
        );
    }

    #[proptest]
    fn parsing_square_fails_if_row_invalid(
        #[strategy("[a-h]")] c: String,
        #[filter(!('1'..='8').contains(&#r))] r: char,
    ) {
        assert_eq!(
            format!("{c}{r}").parse::<Square>(),
            Err(ParseSquareError::InvalidRow)
        );
    }

    #[proptest]
    fn parsing_square_fails_if_length_not_two(#[filter(#s.chars().count() != 2)] s: String) {
        assert!(s.parse::<Square>().is_err());
    }
}
