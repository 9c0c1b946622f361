use crate::chess::{movegen, Board, Color, Move, Piece, Square, Status};
use derive_more::{Display, Error};
use std::collections::HashSet;
use tracing::{debug, instrument};

mod delegate;
mod options;

pub use delegate::*;
pub use options::*;

/// The reason why a [`Move`] was rejected.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
#[display(fmt = "move `{}` is illegal in this position", _0)]
pub struct IllegalMove(#[error(not(source))] pub Move);

/// Enforces the rules of a game of chess.
///
/// The referee owns the [`Board`], caches the legal [`Move`]s of the side to
/// move, and keeps the [`Delegate`] informed of every change it makes.
#[derive(Debug)]
pub struct Referee<D = ()> {
    board: Board,
    moves: HashSet<Move>,
    status: Status,
    captured: Vec<Piece>,
    options: Options,
    delegate: D,
}

impl Default for Referee {
    fn default() -> Self {
        Self::new()
    }
}

impl Referee {
    /// Constructs [`Referee`] with the default [`Options`].
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    /// Constructs [`Referee`] with the given [`Options`].
    pub fn with_options(options: Options) -> Self {
        Self::with_delegate((), options)
    }
}

impl<D: Delegate> Referee<D> {
    /// Constructs [`Referee`] that reports to a [`Delegate`].
    ///
    /// The game is set up in the starting position, but the delegate is only
    /// notified of changes that happen after construction.
    pub fn with_delegate(delegate: D, options: Options) -> Self {
        let board = Board::default();
        let moves = movegen::moves(&board);

        Referee {
            status: Self::judge(&board, &moves, options),
            board,
            moves,
            captured: Vec::new(),
            options,
            delegate,
        }
    }

    /// The [`Status`] of a position given its legal moves.
    fn judge(board: &Board, moves: &HashSet<Move>, options: Options) -> Status {
        if !options.terminal || !moves.is_empty() {
            Status::Playing
        } else if board.is_check() {
            Status::Checkmate
        } else {
            Status::Stalemate
        }
    }

    /// Regenerates the legal moves and the status, notifying status changes.
    fn update(&mut self) {
        self.moves = movegen::moves(&self.board);

        let status = Self::judge(&self.board, &self.moves, self.options);
        if status != self.status {
            debug!(from = %self.status, to = %status, "status changed");
            self.status = status;
            self.delegate.on_status_changed(status);
        }
    }

    /// Replaces the board, forgetting the capture history.
    fn replace(&mut self, board: Board) {
        self.board = board;
        self.captured.clear();
        self.update();

        for sq in Square::iter() {
            self.delegate.on_square_refresh(sq);
        }
    }

    /// Sets up the standard starting position with white to move.
    #[instrument(level = "trace", skip(self))]
    pub fn reset(&mut self) {
        self.replace(Board::default())
    }

    /// Sets up an arbitrary position.
    ///
    /// The position is taken as is, it need not be reachable from the
    /// starting position.
    #[instrument(level = "trace", skip(self, board), fields(%board))]
    pub fn load(&mut self, board: Board) {
        self.replace(board)
    }

    /// The number of rows and columns on the board.
    pub fn board_size(&self) -> u8 {
        Board::SIZE as u8
    }

    /// The [`Piece`] on a [`Square`], if any.
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        self.board.piece_on(sq)
    }

    /// The side to move.
    pub fn turn(&self) -> Color {
        self.board.turn
    }

    /// The current [`Status`] of the game.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Whether a piece of the side to move stands on a [`Square`].
    ///
    /// This does not imply the piece has anywhere to go.
    pub fn can_move(&self, sq: Square) -> bool {
        self.piece_on(sq).map(|p| p.color()) == Some(self.turn())
    }

    /// The legal moves of the side to move.
    pub fn moves(&self) -> &HashSet<Move> {
        &self.moves
    }

    /// The legal [`Move`] from `whence` to `whither`, if there is one.
    #[instrument(level = "trace", skip(self), ret)]
    pub fn find(&self, whence: Square, whither: Square) -> Option<Move> {
        self.moves.get(&Move(whence, whither)).copied()
    }

    /// Plays a legal [`Move`] and passes the turn.
    ///
    /// Returns the captured piece, if any. Illegal moves are rejected without
    /// touching the game.
    #[instrument(level = "trace", skip(self), err)]
    pub fn play(&mut self, m: Move) -> Result<Option<Piece>, IllegalMove> {
        if !self.moves.contains(&m) {
            return Err(IllegalMove(m));
        }

        let capture = self.board.play_unchecked(m);
        if let Some(p) = capture {
            debug!(piece = %p, square = %m.whither(), "captured");
            self.captured.push(p);
        }

        self.update();
        self.delegate.on_square_refresh(m.whence());
        self.delegate.on_square_refresh(m.whither());

        Ok(capture)
    }

    /// The pieces captured so far, in the order they were taken.
    pub fn captured(&self) -> &[Piece] {
        &self.captured
    }

    /// The current [`Board`].
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The [`Options`] in effect.
    pub fn options(&self) -> Options {
        self.options
    }

    /// A reference to the [`Delegate`].
    pub fn delegate(&self) -> &D {
        &self.delegate
    }

    /// A mutable reference to the [`Delegate`].
    pub fn delegate_mut(&mut self) -> &mut D {
        &mut self.delegate
    }
}
