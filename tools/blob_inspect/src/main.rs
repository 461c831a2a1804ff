mod args;
mod error;
mod report;

use args::Args;
use blob_log::ConsoleLogger;
use blob_tree::blob::Tree;
use clap::Parser;
use error::InspectError;
use log::Level;
use std::io::Write;
use std::process::ExitCode;

static LOGGER: ConsoleLogger = ConsoleLogger::new(Level::Info);

fn main() -> ExitCode {
    let args = Args::parse();
    if LOGGER.install().is_ok() {
        LOGGER.update_log_level(args.log_level());
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), InspectError> {
    let buf = std::fs::read(&args.file).map_err(|error| InspectError::Read {
        path: args.file.clone(),
        error,
    })?;
    log::info!("loaded {} bytes from {}", buf.len(), args.file.display());

    let tree = Tree::load(&buf).map_err(InspectError::Decode)?;

    let mut out = std::io::stdout().lock();
    report::write_summary(&mut out, &tree).map_err(InspectError::Output)?;
    if !args.no_dump {
        write!(out, "{}", tree.root().dump()).map_err(InspectError::Output)?;
    }

    let mut unresolved = 0;
    for path in &args.paths {
        if !report::write_query(&mut out, &tree, path).map_err(InspectError::Output)? {
            unresolved += 1;
        }
    }
    out.flush().map_err(InspectError::Output)?;

    if unresolved > 0 {
        return Err(InspectError::Unresolved(unresolved));
    }
    Ok(())
}
