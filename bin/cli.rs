use crate::applet::Applet;
use anyhow::Error as Anyhow;
use clap::Parser;
use std::{cmp::min, io::stderr};
use tracing::{instrument, Level};
use tracing_subscriber::fmt::{format::FmtSpan, layer};
use tracing_subscriber::{filter::Targets, prelude::*, registry, util::SubscriberInitExt};

/// Command line interface.
#[derive(Debug, Parser)]
#[clap(author, version, about)]
pub struct Cli {
    /// Verbosity level, defaults to what suits the applet.
    #[clap(short, long)]
    verbosity: Option<Level>,

    #[clap(subcommand)]
    applet: Option<Applet>,
}

impl Cli {
    /// The verbosity of the referee's own logs.
    ///
    /// Interactive games keep quiet so log lines don't interleave with the
    /// board, batch applets report their results.
    fn verbosity(&self) -> Level {
        match (self.verbosity, &self.applet) {
            (Some(level), _) => level,
            (None, None | Some(Applet::Play(_))) => Level::WARN,
            (None, Some(Applet::Moves(_) | Applet::Perft(_))) => Level::INFO,
        }
    }

    /// Logs from this binary and the library at the chosen verbosity,
    /// everything else at most at `WARN`.
    fn filter(&self) -> Targets {
        let verbosity = self.verbosity();
        Targets::new()
            .with_target("cli", verbosity)
            .with_target("lib", verbosity)
            .with_default(min(Level::WARN, verbosity))
    }

    #[instrument(level = "trace", skip(self), err)]
    pub fn execute(self) -> Result<(), Anyhow> {
        let writer = layer()
            .pretty()
            .with_span_events(FmtSpan::CLOSE)
            .with_writer(stderr);

        registry().with(self.filter()).with(writer).init();

        self.applet.unwrap_or_default().execute()
    }
}
