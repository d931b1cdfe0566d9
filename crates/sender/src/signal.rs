use crate::filter::{Mode, Svf};
use rand::rngs::StdRng;
use rand::Rng;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SignalError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("row {row}: {text:?} is not a number")]
    NotANumber { row: usize, text: String },

    #[error("no samples in file")]
    Empty,

    #[error("every sample is {0}; nothing to normalise")]
    Flat(f32),
}

/// Shaping applied on the way out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shaping {
    pub sample_rate: u32,
    /// Samples skipped after each one sent.
    pub skip_n:      usize,
    pub lowpass_hz:  u32,
    pub highpass_hz: u32,
    /// Uniform noise amplitude as a percentage of full scale.
    pub noise_pct:   u8,
    /// Map `[-1, 1]` to whole numbers in `[0, 1000]`.
    pub int_mode:    bool,
}

/// Read the first column of `path` as numbers.
pub fn load_csv(path: impl AsRef<Path>, has_header: bool) -> Result<Vec<f32>, SignalError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(has_header)
        .flexible(true)
        .from_path(path)?;

    let mut values = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let text = record.get(0).unwrap_or_default().trim();
        let value = text.parse::<f32>().map_err(|_| SignalError::NotANumber {
            row: row + 1,
            text: text.to_string(),
        })?;
        values.push(value);
    }
    Ok(values)
}

/// Rescale to `[-1, 1]`.
pub fn normalise(values: &[f32]) -> Result<Vec<f32>, SignalError> {
    let (min, max) = values
        .iter()
        .fold(None, |acc: Option<(f32, f32)>, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
        .ok_or(SignalError::Empty)?;

    if max <= min {
        return Err(SignalError::Flat(min));
    }
    Ok(values.iter().map(|x| (x - min) * 2.0 / (max - min) - 1.0).collect())
}

/// A looping, shaped playback of a recorded signal.
#[derive(Debug)]
pub struct Signal {
    data:      Vec<f32>,
    index:     usize,
    shaping:   Shaping,
    noise:     f32,
    lowpass:   Option<Svf>,
    highpass:  Option<Svf>,
    rng:       StdRng,
}

impl Signal {
    /// `data` should already be normalised; see [`normalise`].
    pub fn new(data: Vec<f32>, shaping: Shaping, rng: StdRng) -> Result<Self, SignalError> {
        if data.is_empty() {
            return Err(SignalError::Empty);
        }
        let fs = shaping.sample_rate as f32;
        Ok(Self {
            data,
            index: 0,
            noise: f32::from(shaping.noise_pct.min(100)) / 100.0,
            lowpass: Svf::new(Mode::Lowpass, fs, shaping.lowpass_hz as f32),
            highpass: Svf::new(Mode::Highpass, fs, shaping.highpass_hz as f32),
            shaping,
            rng,
        })
    }

    /// Gap between datagrams.
    pub fn delay_ms(&self) -> u64 {
        u64::from(1000 / self.shaping.sample_rate.max(1)).max(1)
    }

    pub fn next_value(&mut self) -> f32 {
        let mut value = self.data[self.index % self.data.len()];
        self.index = self.index.wrapping_add(1 + self.shaping.skip_n);

        if self.noise > 0.0 {
            value += self.rng.random_range(-1.0f32..=1.0) * self.noise;
        }
        if let Some(lp) = &mut self.lowpass {
            value = lp.tick(value);
        }
        if let Some(hp) = &mut self.highpass {
            value = hp.tick(value);
        }

        // Shaping can overshoot [-1, 1] slightly; the mapping does not clamp.
        if self.shaping.int_mode {
            value = ((value + 1.0) * 500.0).round();
        }
        value
    }

    /// Payload text, short enough for the scope's 10-byte receive buffer.
    pub fn payload(&self, value: f32) -> String {
        if self.shaping.int_mode {
            format!("{value}")
        } else {
            format!("{value:.6}")
        }
    }
}
