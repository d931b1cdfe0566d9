//! The receive → decode → plot flow, minus the window.

use crate::console::Console;
use scope_chart::Plotter;
use scope_core::{sample::ingest, MalformedPolicy, Result, Sample, TrimPolicy};
use scope_net::{Datagram, Receiver};
use std::io::{self, Write};

/// Block until a datagram decodes to a sample.
///
/// Malformed payloads are skipped or returned as [`ScopeError::Decode`]
/// depending on `policy`; transport errors are always returned.
///
/// [`ScopeError::Decode`]: scope_core::ScopeError::Decode
pub fn pump(receiver: &Receiver, policy: MalformedPolicy) -> Result<Sample> {
    loop {
        let Datagram { payload, source } = receiver.receive_one()?;
        if let Some(sample) = ingest(&payload, source, policy)? {
            return Ok(sample);
        }
    }
}

/// Consumer side: echoes each sample and feeds the plotter.
#[derive(Debug)]
pub struct Pipeline<W = io::Stdout> {
    plotter: Plotter,
    console: Console<W>,
}

impl Pipeline {
    pub fn stdout(policy: TrimPolicy) -> Self {
        Self::new(policy, Console::stdout())
    }
}

impl<W: Write> Pipeline<W> {
    pub fn new(policy: TrimPolicy, console: Console<W>) -> Self {
        Self {
            plotter: Plotter::new(policy),
            console,
        }
    }

    /// Print the sample, then append it and invalidate the chart.
    pub fn accept(&mut self, sample: &Sample) {
        self.console.echo(sample.value);
        self.plotter.append_and_redraw(sample.value);
    }

    pub fn plotter(&self) -> &Plotter {
        &self.plotter
    }

    pub fn plotter_mut(&mut self) -> &mut Plotter {
        &mut self.plotter
    }

    pub fn console(&self) -> &Console<W> {
        &self.console
    }
}
