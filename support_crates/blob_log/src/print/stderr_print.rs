use core::fmt;
use std::io::Write as _;

/// Writer that forwards everything to the standard error stream of the host process
pub struct StderrWriter {}

impl StderrWriter {
    pub fn flush(&mut self) {
        let _ = std::io::stderr().flush();
    }
}

impl fmt::Write for StderrWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        std::io::stderr()
            .write_all(s.as_bytes())
            .map_err(|_| fmt::Error)
    }
}
