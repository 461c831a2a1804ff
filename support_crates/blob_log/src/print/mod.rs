use core::fmt;
use core::fmt::Write;

#[cfg(feature = "std")]
mod stderr_print;

#[cfg(feature = "std")]
pub use stderr_print::StderrWriter as ConsoleWriter;

#[cfg(not(feature = "std"))]
mod null_print;

#[cfg(not(feature = "std"))]
pub use null_print::NullWriter as ConsoleWriter;

#[doc(hidden)]
pub fn _print(args: fmt::Arguments) {
    let _ = ConsoleWriter {}.write_fmt(args);
}

#[macro_export]
macro_rules! print {
    ($($arg:tt)*) => ($crate::print::_print(format_args!($($arg)*)));
}

#[macro_export]
macro_rules! println {
    () => ($crate::print!("\n"));
    ($($arg:tt)*) => ($crate::print!("{}\n", format_args!($($arg)*)));
}
