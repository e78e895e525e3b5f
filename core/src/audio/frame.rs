use crate::framing::AudioHeader;

/// A `samples × channels` matrix of f32, row-major (one row per time sample).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AudioFrame {
    pub channels: usize,
    pub sample_rate: u32,
    /// Interleaved: `data[row * channels + channel]`.
    pub data: Vec<f32>,
}

impl AudioFrame {
    /// Wrap interleaved samples. `data.len()` must be a multiple of `channels`.
    pub fn new(channels: usize, sample_rate: u32, data: Vec<f32>) -> Self {
        debug_assert!(channels == 0 || data.len() % channels == 0);
        Self { channels, sample_rate, data }
    }

    pub fn from_header(header: &AudioHeader, data: Vec<f32>) -> Self {
        Self::new(header.channels as usize, header.sample_rate, data)
    }

    /// Number of time samples (rows).
    pub fn frames(&self) -> usize {
        if self.channels == 0 { 0 } else { self.data.len() / self.channels }
    }

    /// `(rows, cols)` = `(samples, channels)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.frames(), self.channels)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, sample: usize, channel: usize) -> Option<f32> {
        if channel >= self.channels {
            return None;
        }
        let idx = sample.checked_mul(self.channels)?.checked_add(channel)?;
        self.data.get(idx).copied()
    }

    /// All channels of one time sample.
    pub fn row(&self, sample: usize) -> Option<&[f32]> {
        let start = sample.checked_mul(self.channels)?;
        self.data.get(start..start.checked_add(self.channels)?)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f32]> {
        // chunks_exact panics on 0
        self.data.chunks_exact(self.channels.max(1))
    }

    /// One channel as a contiguous vector.
    pub fn channel(&self, channel: usize) -> Option<Vec<f32>> {
        if channel >= self.channels {
            return None;
        }
        Some(self.rows().map(|r| r[channel]).collect())
    }

    /// Whether `other` can be appended along the time axis: same channel
    /// count and same sample rate.
    pub fn same_layout(&self, other: &AudioFrame) -> bool {
        self.channels == other.channels && self.sample_rate == other.sample_rate
    }

    /// Append `other` along the time axis. Caller checks [`same_layout`](Self::same_layout).
    pub fn append(&mut self, other: AudioFrame) {
        debug_assert!(self.same_layout(&other));
        if self.data.is_empty() {
            self.data = other.data;
        } else {
            self.data.extend_from_slice(&other.data);
        }
    }
}
