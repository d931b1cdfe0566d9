//! Trapezoidal state-variable filter (Simper's SVF).

use std::f32::consts::PI;

/// Q used for both stages; just under Butterworth.
pub const Q: f32 = 0.771;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Lowpass,
    Highpass,
}

/// A single second-order filter stage.
#[derive(Debug, Clone)]
pub struct Svf {
    mode: Mode,
    k:    f32,
    a1:   f32,
    a2:   f32,
    a3:   f32,
    ic1:  f32,
    ic2:  f32,
}

impl Svf {
    /// `None` when `cutoff` is zero or at/above Nyquist: the stage would do
    /// nothing useful, so the caller skips it.
    pub fn new(mode: Mode, sample_rate: f32, cutoff: f32) -> Option<Self> {
        if cutoff <= 0.0 || cutoff >= sample_rate / 2.0 {
            return None;
        }

        let g = (PI * cutoff / sample_rate).tan();
        let k = 1.0 / Q;
        let a1 = 1.0 / (1.0 + g * (g + k));
        let a2 = g * a1;
        let a3 = g * a2;

        Some(Self { mode, k, a1, a2, a3, ic1: 0.0, ic2: 0.0 })
    }

    pub fn tick(&mut self, v0: f32) -> f32 {
        let v3 = v0 - self.ic2;
        let v1 = self.a1 * self.ic1 + self.a2 * v3;
        let v2 = self.ic2 + self.a2 * self.ic1 + self.a3 * v3;
        self.ic1 = 2.0 * v1 - self.ic1;
        self.ic2 = 2.0 * v2 - self.ic2;

        match self.mode {
            Mode::Lowpass  => v2,
            Mode::Highpass => v0 - self.k * v1 - v2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settle(filter: &mut Svf, input: f32, n: usize) -> f32 {
        (0..n).map(|_| filter.tick(input)).last().unwrap_or_default()
    }

    #[test]
    fn disabled_outside_useful_band() {
        assert!(Svf::new(Mode::Lowpass, 200.0, 0.0).is_none());
        assert!(Svf::new(Mode::Lowpass, 200.0, 100.0).is_none());
        assert!(Svf::new(Mode::Highpass, 200.0, 250.0).is_none());
    }

    #[test]
    fn lowpass_passes_dc() {
        let mut lp = Svf::new(Mode::Lowpass, 200.0, 20.0).unwrap();
        assert!((settle(&mut lp, 1.0, 500) - 1.0).abs() < 1e-3);
    }

    #[test]
    fn highpass_blocks_dc() {
        let mut hp = Svf::new(Mode::Highpass, 200.0, 20.0).unwrap();
        assert!(settle(&mut hp, 1.0, 500).abs() < 1e-3);
    }

    #[test]
    fn lowpass_attenuates_nyquist() {
        let mut lp = Svf::new(Mode::Lowpass, 200.0, 5.0).unwrap();
        let mut peak = 0.0f32;
        for i in 0..400 {
            let x = if i % 2 == 0 { 1.0 } else { -1.0 };
            let y = lp.tick(x);
            if i > 200 {
                peak = peak.max(y.abs());
            }
        }
        assert!(peak < 0.05, "peak {peak}");
    }
}
