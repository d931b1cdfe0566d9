use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// How the sample buffer sheds old samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "lowercase")]
pub enum TrimPolicy {
    /// Keep at most `capacity` most-recent samples; the oldest falls off on
    /// overflow.
    Ring {
        #[serde(default = "default_capacity")]
        capacity: usize,
    },
    /// Once the buffer holds more than `trigger` samples, drop everything at
    /// index `cut` and beyond.
    ///
    /// With the stock values (`trigger = 100`, `cut = 1000`) nothing is
    /// dropped until the buffer passes 1000 samples.
    Legacy {
        #[serde(default = "default_trigger")]
        trigger: usize,
        #[serde(default = "default_cut")]
        cut: usize,
    },
}

fn default_capacity() -> usize {
    TrimPolicy::DEFAULT_CAPACITY
}

fn default_trigger() -> usize {
    100
}

fn default_cut() -> usize {
    1000
}

impl TrimPolicy {
    pub const DEFAULT_CAPACITY: usize = 100;

    /// The observed `len > 100 → del [1000:]` rule.
    pub const fn legacy() -> Self {
        Self::Legacy { trigger: 100, cut: 1000 }
    }

    pub const fn ring(capacity: usize) -> Self {
        Self::Ring { capacity }
    }

    /// `(trigger, retain)`: when `len > trigger`, truncate to `retain`.
    const fn bounds(self) -> (usize, usize) {
        match self {
            Self::Ring { capacity }       => (capacity, capacity),
            Self::Legacy { trigger, cut } => (trigger, cut),
        }
    }
}

impl Default for TrimPolicy {
    fn default() -> Self {
        Self::ring(Self::DEFAULT_CAPACITY)
    }
}

/// Received sample values, newest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleBuffer {
    samples: VecDeque<f64>,
    policy:  TrimPolicy,
}

impl SampleBuffer {
    pub fn new(policy: TrimPolicy) -> Self {
        Self {
            samples: VecDeque::new(),
            policy,
        }
    }

    /// Prepend `value`, then apply the trim policy.
    pub fn push(&mut self, value: f64) {
        self.samples.push_front(value);
        self.trim();
    }

    /// Switch policies; the new policy applies immediately.
    pub fn set_policy(&mut self, policy: TrimPolicy) {
        self.policy = policy;
        self.trim();
    }

    pub fn policy(&self) -> TrimPolicy {
        self.policy
    }

    fn trim(&mut self) {
        let (trigger, retain) = self.policy.bounds();
        if self.samples.len() > trigger {
            self.samples.truncate(retain);
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Most recent sample, if any.
    pub fn latest(&self) -> Option<f64> {
        self.samples.front().copied()
    }

    /// Iterate newest to oldest.
    pub fn newest_first(&self) -> impl DoubleEndedIterator<Item = f64> + ExactSizeIterator + '_ {
        self.samples.iter().copied()
    }

    /// Iterate oldest to newest, the order samples are plotted in.
    pub fn chronological(&self) -> impl DoubleEndedIterator<Item = f64> + ExactSizeIterator + '_ {
        self.samples.iter().rev().copied()
    }
}
