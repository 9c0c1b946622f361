use crate::{io::Io, session::Session};
use anyhow::Error as Anyhow;
use clap::Parser;
use lib::chess::Board;
use lib::referee::Options;
use std::io::{stdin, stdout};
use tracing::instrument;

/// Referees a game of chess played on the terminal.
///
/// Moves are read in pure coordinate notation, e.g. `e2e3`.
#[derive(Debug, Default, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Play {
    /// The referee configuration.
    #[clap(short, long, default_value_t)]
    options: Options,

    /// The starting position as piece placement followed by side to move.
    #[clap(short, long, default_value_t)]
    board: Board,
}

impl Play {
    #[instrument(level = "trace", skip(self), err)]
    pub fn execute(self) -> Result<(), Anyhow> {
        let io = Io::new(stdout(), stdin());
        Session::new(io, self.board, self.options).run()
    }
}
