//! A logging implementation that writes every record through a [`ConsoleWriter`]
use core::fmt::Write;

use crate::print::ConsoleWriter;
use log::{Level, Log, Metadata, Record, SetLoggerError};

/// A [`Log`] implementation that can be placed in a `static` and installed as the global logger.
///
/// Filtering happens only through the global maximum level of the `log` crate.
pub struct ConsoleLogger {
    pub initial_log_level: Level,
}

impl ConsoleLogger {
    pub const fn new(max_log_level: Level) -> ConsoleLogger {
        ConsoleLogger {
            initial_log_level: max_log_level,
        }
    }

    pub fn install(&'static self) -> Result<(), SetLoggerError> {
        log::set_logger(self).map(|_| log::set_max_level(self.initial_log_level.to_level_filter()))
    }

    pub fn update_log_level(&'static self, level: Level) {
        log::set_max_level(level.to_level_filter());
    }
}

fn level_symbol(level: Level) -> &'static str {
    match level {
        Level::Error => "❌",
        Level::Warn => "⚠️",
        Level::Info => "ℹ️",
        Level::Debug => "🛠️",
        Level::Trace => "👣",
    }
}

/// Render a record the way [`ConsoleLogger`] prints it
fn write_record(writer: &mut impl Write, record: &Record) -> core::fmt::Result {
    writer.write_fmt(format_args!(
        "{}  {}: {}\n",
        level_symbol(record.level()),
        record.target(),
        record.args(),
    ))
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            // there is nowhere left to report a failing console to
            let _ = write_record(&mut ConsoleWriter {}, record);
        }
    }

    fn flush(&self) {
        ConsoleWriter {}.flush();
    }
}
