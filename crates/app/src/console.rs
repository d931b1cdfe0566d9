use std::io::{self, Write};
use tracing::warn;

/// Echoes each decoded sample as one line of text.
#[derive(Debug)]
pub struct Console<W = io::Stdout> {
    out:   W,
    lines: u64,
}

impl Console {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Console<W> {
    pub fn new(out: W) -> Self {
        Self { out, lines: 0 }
    }

    /// Write `value` and flush, so the line shows up even when stdout is a
    /// pipe.  A closed stdout is logged, not fatal.
    pub fn echo(&mut self, value: f64) {
        let written = writeln!(self.out, "{}", format_sample(value)).and_then(|()| self.out.flush());
        match written {
            Ok(()) => self.lines += 1,
            Err(e) => warn!("Cannot write sample to output: {e}"),
        }
    }

    /// Lines written so far.
    pub fn lines(&self) -> u64 {
        self.lines
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Shortest text that reads back as `value`, always with a decimal point
/// or exponent (`1.0`, `3.14159`, `1e-7`).
pub fn format_sample(value: f64) -> String {
    format!("{value:?}")
}
