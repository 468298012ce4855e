use std::collections::VecDeque;

use resamp_foundation::{ResampleError, Result};

use crate::buffer::SampleBuffer;
use crate::converter::{validate_ratio, ConverterKind};
use crate::stream::StreamingResampler;

/// Pull-based adapter over a data-producing callback.
///
/// Wraps a producer and an owned [`StreamingResampler`] so that "read N
/// output frames" transparently pulls as much input as needed. The producer
/// is invoked synchronously on the caller's thread; if it blocks, `read`
/// blocks for that duration. It must not re-enter the adapter.
///
/// The producer signals exhaustion by returning `None` or a zero-frame
/// buffer. A producer panic unwinds through `read` untouched.
pub struct CallbackPullAdapter {
    producer: Box<dyn FnMut() -> Option<SampleBuffer>>,
    resampler: StreamingResampler,
    ratio: f64,
    channels: usize,
    /// Interleaved output frames converted but not yet delivered.
    pending: VecDeque<f32>,
    exhausted: bool,
}

impl CallbackPullAdapter {
    pub fn new<F>(producer: F, ratio: f64, kind: ConverterKind, channels: usize) -> Result<Self>
    where
        F: FnMut() -> Option<SampleBuffer> + 'static,
    {
        validate_ratio(ratio)?;
        let resampler = StreamingResampler::new(kind, channels)?;
        tracing::debug!(kind = kind.name(), channels, ratio, "creating callback adapter");
        Ok(Self {
            producer: Box::new(producer),
            resampler,
            ratio,
            channels,
            pending: VecDeque::new(),
            exhausted: false,
        })
    }

    /// Deliver up to `requested` output frames.
    ///
    /// Pulls and converts producer chunks until the pending queue can satisfy
    /// the request or the producer is exhausted; on exhaustion the resampler
    /// is flushed exactly once. Returns fewer frames than requested only
    /// after exhaustion, and zero-frame buffers forever afterwards. No chunk
    /// is converted twice; no output frame is duplicated or dropped.
    pub fn read(&mut self, requested: usize) -> Result<SampleBuffer> {
        while !self.exhausted && self.pending.len() / self.channels < requested {
            match (self.producer)() {
                Some(chunk) if chunk.frame_count() > 0 => {
                    if chunk.channel_count() != self.channels {
                        return Err(ResampleError::ProducerProtocol(format!(
                            "expected {} channels, got {}",
                            self.channels,
                            chunk.channel_count()
                        )));
                    }
                    let out = self.resampler.process(&chunk, self.ratio, false)?;
                    self.pending.extend(out.samples().iter().copied());
                }
                _ => {
                    let flushed = self.resampler.process(
                        &SampleBuffer::empty(self.channels),
                        self.ratio,
                        true,
                    )?;
                    self.pending.extend(flushed.samples().iter().copied());
                    self.exhausted = true;
                }
            }
        }

        let frames = requested.min(self.pending.len() / self.channels);
        let samples: Vec<f32> = self.pending.drain(..frames * self.channels).collect();
        tracing::trace!(requested, delivered = frames, "read");
        SampleBuffer::from_interleaved(samples, self.channels)
    }

    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}
