use anyhow::Error as Anyhow;
use clap::Parser;
use lib::chess::{movegen, Board};
use std::time::Instant;
use tracing::{info, instrument};

/// Counts the leaf nodes of the legal move tree.
#[derive(Debug, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Perft {
    /// How many plies deep to expand.
    depth: u8,

    /// The position as piece placement followed by side to move.
    #[clap(short, long, default_value_t)]
    board: Board,
}

impl Perft {
    #[instrument(level = "trace", skip(self), err)]
    pub fn execute(self) -> Result<(), Anyhow> {
        let timer = Instant::now();
        let nodes = movegen::perft(&self.board, self.depth);
        info!(depth = self.depth, nodes, time = ?timer.elapsed());
        println!("{}", nodes);
        Ok(())
    }
}
