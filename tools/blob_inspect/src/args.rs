use clap::{ArgAction, Parser};
use log::Level;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "blob_inspect",
    about = "Decode a configuration tree blob, print its content and look up paths in it",
    version
)]
pub struct Args {
    /// The blob file to decode
    pub file: PathBuf,

    /// Node or property paths to look up, e.g. `/cpus/cpu0` or `/cpus/cpu0/hartid`
    pub paths: Vec<String>,

    /// Log more details about decoding (repeat for per-record tracing)
    #[arg(long, short = 'v', action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log errors
    #[arg(long, short = 'q', conflicts_with = "verbose")]
    pub quiet: bool,

    /// Don't print the decoded tree
    #[arg(long)]
    pub no_dump: bool,
}

impl Args {
    pub fn log_level(&self) -> Level {
        match (self.quiet, self.verbose) {
            (true, _) => Level::Error,
            (false, 0) => Level::Info,
            (false, 1) => Level::Debug,
            (false, _) => Level::Trace,
        }
    }
}
