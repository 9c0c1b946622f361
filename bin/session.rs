use crate::io::Io;
use anyhow::Error as Anyhow;
use derive_more::{Display, Error, From};
use lib::chess::{Board, Move, ParseBoardError, ParseMoveError, Square, Status};
use lib::referee::{Delegate, Options, Referee};
use std::io::{Read, Write};
use std::{fmt, mem, str::FromStr};
use tracing::{debug, info, instrument, warn};

/// Collects what the terminal needs to be told after each command.
#[derive(Debug, Default)]
struct Announcer {
    redraw: bool,
    status: Option<Status>,
}

impl Delegate for Announcer {
    fn on_status_changed(&mut self, status: Status) {
        info!(%status, "status changed");
        self.status = Some(status);
    }

    fn on_square_refresh(&mut self, sq: Square) {
        debug!(%sq, "square refreshed");
        self.redraw = true;
    }
}

/// Draws a [`Board`] with white at the bottom.
struct Diagram<'a>(&'a Board);

impl fmt::Display for Diagram<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (1..=Board::SIZE).rev() {
            write!(f, "{}", row)?;
            for sq in (1..=Board::SIZE).filter_map(|c| Square::new(row, c)) {
                match self.0[sq] {
                    Some(p) => write!(f, " {}", p)?,
                    None => f.write_str(" .")?,
                }
            }

            f.write_str("\n")?;
        }

        f.write_str(" ")?;
        for c in 'a'..='h' {
            write!(f, " {}", c)?;
        }

        Ok(())
    }
}

/// A line of user input.
#[derive(Debug, Clone, Eq, PartialEq)]
enum Command {
    Play(Move),
    Moves,
    Board,
    Captured,
    Load(Board),
    Reset,
    Resign,
}

/// The reason why parsing [`Command`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
enum ParseCommandError {
    #[display(fmt = "{}", _0)]
    InvalidMove(ParseMoveError),
    #[display(fmt = "{}", _0)]
    InvalidBoard(ParseBoardError),
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "moves" => Ok(Command::Moves),
            "board" => Ok(Command::Board),
            "captured" => Ok(Command::Captured),
            "reset" => Ok(Command::Reset),
            "resign" | "quit" => Ok(Command::Resign),
            s => match s.strip_prefix("load ") {
                Some(fen) => Ok(Command::Load(fen.trim().parse()?)),
                None => Ok(Command::Play(s.parse()?)),
            },
        }
    }
}

/// A game of chess played on a terminal.
pub struct Session<W: Write, R: Read> {
    referee: Referee<Announcer>,
    io: Io<W, R>,
}

impl<W: Write, R: Read> Session<W, R> {
    /// Starts a game from the given [`Board`].
    pub fn new(io: Io<W, R>, board: Board, options: Options) -> Self {
        let mut referee = Referee::with_delegate(Announcer::default(), options);
        referee.load(board);
        Session { referee, io }
    }

    /// Tells the player about whatever changed since the last command.
    fn announce(&mut self) -> Result<(), Anyhow> {
        let announcer = self.referee.delegate_mut();
        let redraw = mem::take(&mut announcer.redraw);
        let status = announcer.status.take();

        if redraw {
            self.io.send(Diagram(self.referee.board()))?;
        }

        match status {
            Some(Status::Checkmate) => {
                let winner = !self.referee.turn();
                self.io.send(format_args!("checkmate, {} wins", winner))?;
            }

            Some(Status::Stalemate) => self.io.send("stalemate")?,
            Some(Status::Playing) | None => {}
        }

        Ok(())
    }

    #[instrument(level = "trace", skip(self), err)]
    fn execute(&mut self, command: Command) -> Result<(), Anyhow> {
        match command {
            Command::Play(m) => match self.referee.play(m) {
                Ok(Some(p)) => self.io.send(format_args!("captured {}", p))?,
                Ok(None) => {}
                Err(e) => {
                    warn!("{}", e);
                    self.io.send(format_args!("error: {}", e))?;
                }
            },

            Command::Moves => {
                let mut moves: Vec<_> = self.referee.moves().iter().map(Move::to_string).collect();
                moves.sort();
                self.io.send(moves.join(" "))?;
            }

            Command::Captured => {
                let captured: Vec<_> = self.referee.captured().iter().map(|p| p.to_string()).collect();
                self.io.send(captured.join(" "))?;
            }

            Command::Board => self.io.send(self.referee.board())?,
            Command::Load(b) => self.referee.load(b),
            Command::Reset => self.referee.reset(),
            Command::Resign => {}
        }

        self.announce()
    }

    /// Reads commands until the player resigns or the input is exhausted.
    #[instrument(level = "trace", skip(self), err)]
    pub fn run(&mut self) -> Result<(), Anyhow> {
        self.announce()?;

        loop {
            self.io.flush()?;

            let Some(line) = self.io.recv()? else {
                break Ok(());
            };

            if line.trim().is_empty() {
                continue;
            }

            match line.parse() {
                Ok(Command::Resign) => {
                    let turn = self.referee.turn();
                    self.io.send(format_args!("{} resigns", turn))?;
                    self.io.flush()?;
                    break Ok(());
                }

                Ok(command) => self.execute(command)?,

                Err(e) => {
                    warn!("{}", e);
                    self.io.send(format_args!("error: {}", e))?;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str;
    use test_strategy::proptest;

    fn run(board: &str, input: &str) -> String {
        let mut output = Vec::new();
        let io = Io::new(&mut output, input.as_bytes());
        Session::new(io, board.parse().unwrap(), Options::default())
            .run()
            .unwrap();

        str::from_utf8(&output).unwrap().to_string()
    }

    const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w";

    #[test]
    fn diagram_draws_white_at_the_bottom() {
        assert_eq!(
            Diagram(&Board::default()).to_string(),
            [
                "8 r n b q k b n r",
                "7 p p p p p p p p",
                "6 . . . . . . . .",
                "5 . . . . . . . .",
                "4 . . . . . . . .",
                "3 . . . . . . . .",
                "2 P P P P P P P P",
                "1 R N B Q K B N R",
                "  a b c d e f g h",
            ]
            .join("\n")
        );
    }

    #[test]
    fn session_draws_the_board_before_reading_commands() {
        assert_eq!(run(START, ""), format!("{}\n", Diagram(&Board::default())));
    }

    #[test]
    fn commands_are_parsed() {
        assert_eq!("moves".parse(), Ok(Command::Moves));
        assert_eq!(" board ".parse(), Ok(Command::Board));
        assert_eq!("captured".parse(), Ok(Command::Captured));
        assert_eq!("reset".parse(), Ok(Command::Reset));
        assert_eq!("resign".parse(), Ok(Command::Resign));
        assert_eq!("quit".parse(), Ok(Command::Resign));
        assert_eq!("e2e3".parse(), Ok(Command::Play("e2e3".parse().unwrap())));
        assert_eq!(
            format!("load {START}").parse(),
            Ok(Command::Load(Board::default()))
        );
    }

    #[test]
    fn parsing_printed_move_yields_play_command() {
        for m in Board::default().moves() {
            assert_eq!(m.to_string().parse(), Ok(Command::Play(m)));
        }
    }

    #[proptest]
    fn blank_lines_are_ignored(#[strategy("[ \t]*")] s: String) {
        assert_eq!(run(START, &format!("{s}\nboard\n")), run(START, "board\n"));
    }

    #[test]
    fn invalid_commands_are_reported() {
        assert!(matches!("foo".parse::<Command>(), Err(ParseCommandError::InvalidMove(_))));
        assert!(matches!("load 8/8 w".parse::<Command>(), Err(ParseCommandError::InvalidBoard(_))));

        let output = run(START, "foo\nboard\n");
        assert!(output.contains("error: failed to parse move"));
        assert!(output.ends_with(&format!("{START}\n")));
    }

    #[test]
    fn moves_lists_legal_moves_in_order() {
        let output = run(START, "moves\n");
        assert!(output.ends_with(
            "a2a3 b1a3 b1c3 b2b3 c2c3 d2d3 e2e3 f2f3 g1f3 g1h3 g2g3 h2h3\n"
        ));
    }

    #[test]
    fn playing_a_move_redraws_the_board() {
        let output = run(START, "e2e3\nboard\n");
        let mut b = Board::default();
        b.play_unchecked("e2e3".parse().unwrap());
        assert!(output.contains(&Diagram(&b).to_string()));
        assert!(output.ends_with(&format!("{b}\n")));
    }

    #[test]
    fn illegal_moves_are_rejected() {
        let output = run(START, "e2e5\nboard\n");
        assert!(output.contains("error: move `e2e5` is illegal in this position"));
        assert!(output.ends_with(&format!("{START}\n")));
    }

    #[test]
    fn captures_are_announced_and_recorded() {
        let output = run("k7/8/8/8/8/8/r7/R6K w", "a1a2\ncaptured\n");
        assert!(output.contains("captured r\n"));
        assert!(output.ends_with("r\n"));
    }

    #[test]
    fn checkmate_is_announced() {
        let output = run("kb6/ppp5/P1P5/8/N7/8/8/7K w", "a4b6\n");
        assert!(output.ends_with("checkmate, white wins\n"));
    }

    #[test]
    fn stalemate_is_announced() {
        let output = run("kb6/ppp5/P1P5/1P6/8/8/8/7K w", "b5b6\n");
        assert!(output.ends_with("stalemate\n"));
    }

    #[test]
    fn resigning_ends_the_session() {
        let output = run(START, "resign\ne2e3\n");
        assert!(output.ends_with("white resigns\n"));
    }

    #[test]
    fn reset_restores_the_starting_position() {
        let output = run(START, "e2e3\nreset\nboard\n");
        assert!(output.ends_with(&format!("{START}\n")));
    }
}
