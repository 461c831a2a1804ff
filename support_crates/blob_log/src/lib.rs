#![no_std]

#[cfg(feature = "std")]
extern crate std;

#[macro_use]
pub mod print;
mod console_logger;

pub use console_logger::ConsoleLogger;
pub use print::ConsoleWriter;
