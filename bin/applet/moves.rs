use anyhow::Error as Anyhow;
use clap::Parser;
use lib::chess::{movegen, Board};
use tracing::{info, instrument};

/// Lists the legal moves in a position.
#[derive(Debug, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Moves {
    /// The position as piece placement followed by side to move.
    #[clap(short, long, default_value_t)]
    board: Board,
}

impl Moves {
    #[instrument(level = "trace", skip(self), err)]
    pub fn execute(self) -> Result<(), Anyhow> {
        let mut moves: Vec<_> = movegen::moves(&self.board).into_iter().collect();
        moves.sort();

        info!(board = %self.board, count = moves.len());

        for m in moves {
            println!("{}", m);
        }

        Ok(())
    }
}
