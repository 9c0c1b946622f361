//! Legal move generation.
//!
//! Moves are generated per piece from its role's movement pattern, filtered
//! only by blocking and by which occupants may be captured. Moves that leave
//! the mover's own king covered are *not* filtered out.

use crate::chess::{Board, Color, Move, Role, Square};
use arrayvec::ArrayVec;
use rayon::prelude::*;
use std::collections::HashSet;

type Vector = (i8, i8);

const ORTHOGONAL: [Vector; 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
const DIAGONAL: [Vector; 4] = [(1, 1), (-1, -1), (1, -1), (-1, 1)];

#[rustfmt::skip]
const KNIGHT: [Vector; 8] = [
    (2, 1), (2, -1), (-2, 1), (-2, -1),
    (1, 2), (1, -2), (-1, 2), (-1, -2),
];

#[rustfmt::skip]
const KING: [Vector; 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

/// How a piece covers the board.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Pattern {
    /// Walks each direction until it leaves the board or runs into a piece.
    Slide(&'static [Vector]),
    /// Jumps directly to each offset.
    Leap(&'static [Vector]),
}

impl Role {
    fn patterns(&self) -> &'static [Pattern] {
        const KING_PATTERNS: &[Pattern] = &[Pattern::Leap(&KING)];
        const QUEEN_PATTERNS: &[Pattern] = &[Pattern::Slide(&ORTHOGONAL), Pattern::Slide(&DIAGONAL)];
        const BISHOP_PATTERNS: &[Pattern] = &[Pattern::Slide(&DIAGONAL)];
        const KNIGHT_PATTERNS: &[Pattern] = &[Pattern::Leap(&KNIGHT)];
        const ROOK_PATTERNS: &[Pattern] = &[Pattern::Slide(&ORTHOGONAL)];

        match self {
            Role::King => KING_PATTERNS,
            Role::Queen => QUEEN_PATTERNS,
            Role::Bishop => BISHOP_PATTERNS,
            Role::Knight => KNIGHT_PATTERNS,
            Role::Rook => ROOK_PATTERNS,
            Role::Pawn => &[],
        }
    }
}

/// The squares covered by the piece on `whence`, if any.
///
/// Sliding pieces cover every square along their rays up to and including
/// the first occupied one, regardless of its color. Leaping pieces cover
/// every on-board offset. Pawns cover nothing, since their only move never
/// captures.
pub fn attacks(board: &Board, whence: Square) -> ArrayVec<Square, 27> {
    let mut squares = ArrayVec::new();

    let Some(piece) = board[whence] else {
        return squares;
    };

    for pattern in piece.role().patterns() {
        match *pattern {
            Pattern::Leap(offsets) => {
                squares.extend(offsets.iter().filter_map(|&(r, c)| whence.offset(r, c)));
            }

            Pattern::Slide(directions) => {
                for &(r, c) in directions {
                    let mut next = whence.offset(r, c);
                    while let Some(sq) = next {
                        squares.push(sq);
                        next = match board[sq] {
                            None => sq.offset(r, c),
                            Some(_) => None,
                        };
                    }
                }
            }
        }
    }

    squares
}

/// Whether any piece of color `by` covers `sq`.
pub fn is_attacked(board: &Board, sq: Square, by: Color) -> bool {
    board
        .by_color(by)
        .any(|whence| attacks(board, whence).contains(&sq))
}

/// The squares the piece on `whence` may legally move to.
///
/// A landing square is legal if empty, or if occupied by an opponent's piece
/// that is not a king. Pawns only ever step one row forward onto an empty
/// square.
pub fn destinations(board: &Board, whence: Square) -> ArrayVec<Square, 27> {
    let Some(piece) = board[whence] else {
        return ArrayVec::new();
    };

    match piece.role() {
        Role::Pawn => whence
            .offset(piece.color().sign(), 0)
            .filter(|&sq| board[sq].is_none())
            .into_iter()
            .collect(),

        _ => attacks(board, whence)
            .into_iter()
            .filter(|&sq| match board[sq] {
                None => true,
                Some(p) => p.color() != piece.color() && p.role().is_capturable(),
            })
            .collect(),
    }
}

/// The legal [`Move`]s of the side to move.
pub fn moves(board: &Board) -> HashSet<Move> {
    board
        .by_color(board.turn)
        .flat_map(|whence| {
            destinations(board, whence)
                .into_iter()
                .map(move |whither| Move(whence, whither))
        })
        .collect()
}

/// Counts the leaf nodes of the tree of legal moves `depth` plies deep.
///
/// See [perft](https://www.chessprogramming.org/Perft).
pub fn perft(board: &Board, depth: u8) -> usize {
    match depth {
        0 => 1,
        1 => moves(board).len(),
        d => moves(board)
            .into_par_iter()
            .map(|m| {
                let mut next = *board;
                next.play_unchecked(m);
                perft(&next, d - 1)
            })
            .sum(),
    }
}
