use dasp::sample::Sample;
use resamp_foundation::{ResampleError, Result};

/// An owned, contiguous block of interleaved 32-bit float samples.
///
/// Purely a shape-checked value type: it carries no conversion logic.
/// `frame_count` is derived from the flat sample length and the channel
/// count, and the invariant `samples.len() == frame_count * channel_count`
/// is enforced at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    samples: Vec<f32>,
    channels: usize,
}

impl SampleBuffer {
    /// Wrap a flat interleaved sample vector.
    ///
    /// Fails with a shape error if `channels` is zero or the flat length is
    /// not a multiple of `channels`.
    pub fn from_interleaved(samples: Vec<f32>, channels: usize) -> Result<Self> {
        if channels == 0 {
            return Err(ResampleError::Shape(
                "channel count must be at least 1".to_string(),
            ));
        }
        if samples.len() % channels != 0 {
            return Err(ResampleError::Shape(format!(
                "{} samples is not a whole number of {}-channel frames",
                samples.len(),
                channels
            )));
        }
        Ok(Self { samples, channels })
    }

    /// A zero-frame buffer that still carries its channel count.
    ///
    /// Infallible, unlike [`from_interleaved`](Self::from_interleaved): a
    /// channel count of zero is coerced to one so the resulting buffer
    /// always has a valid shape.
    pub fn empty(channels: usize) -> Self {
        Self {
            samples: Vec::new(),
            channels: channels.max(1),
        }
    }

    /// Boundary normalization: signed 16-bit PCM into `[-1.0, 1.0)`.
    pub fn from_i16(samples: &[i16], channels: usize) -> Result<Self> {
        let converted = samples.iter().map(|&s| s.to_sample::<f32>()).collect();
        Self::from_interleaved(converted, channels)
    }

    /// Boundary normalization: 64-bit float samples narrowed to 32-bit.
    pub fn from_f64(samples: &[f64], channels: usize) -> Result<Self> {
        let converted = samples.iter().map(|&s| s.to_sample::<f32>()).collect();
        Self::from_interleaved(converted, channels)
    }

    pub fn frame_count(&self) -> usize {
        self.samples.len() / self.channels
    }

    pub fn channel_count(&self) -> usize {
        self.channels
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Read one sample by `(frame, channel)`.
    pub fn sample(&self, frame: usize, channel: usize) -> Result<f32> {
        if frame >= self.frame_count() || channel >= self.channels {
            return Err(ResampleError::IndexOutOfRange {
                frame,
                channel,
                frames: self.frame_count(),
                channels: self.channels,
            });
        }
        Ok(self.samples[frame * self.channels + channel])
    }

    /// The flat interleaved sample slice.
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }
}
