use resamp_foundation::{ResampleError, Result};

use crate::buffer::SampleBuffer;
use crate::converter::{convert, ConverterKind, FilterState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StreamState {
    Fresh,
    Streaming,
    Finalized,
}

/// Stateful streaming converter.
///
/// Threads filter history across successive [`process`](Self::process) calls
/// so that arbitrary chunk boundaries produce the same output as one
/// continuous conversion. The ratio may change between calls; the channel
/// count is fixed for the instance's lifetime.
///
/// A `process` call with `end_of_input = true` flushes all pending filter
/// history into that call's output and finalizes the stream: further calls
/// fail with [`ResampleError::FinalizedStream`] until [`reset`](Self::reset).
///
/// `process` is not reentrant; one instance must be driven by one caller at
/// a time. Independent instances share nothing and may live on different
/// threads.
#[derive(Debug, Clone)]
pub struct StreamingResampler {
    kind: ConverterKind,
    channels: usize,
    filter: FilterState,
    state: StreamState,
}

impl StreamingResampler {
    pub fn new(kind: ConverterKind, channels: usize) -> Result<Self> {
        if channels == 0 {
            return Err(ResampleError::Shape(
                "channel count must be at least 1".to_string(),
            ));
        }
        tracing::debug!(kind = kind.name(), channels, "creating streaming resampler");
        Ok(Self {
            kind,
            channels,
            filter: FilterState::new(kind, channels),
            state: StreamState::Fresh,
        })
    }

    /// Convert one chunk, carrying filter history over from previous calls.
    ///
    /// Over a whole call sequence ending in a flushed call, the cumulative
    /// output frame count equals `round(sum(input_frames_i * ratio_i))`, so
    /// for a constant ratio it is within one frame of
    /// `total_input_frames * ratio`.
    pub fn process(
        &mut self,
        input: &SampleBuffer,
        ratio: f64,
        end_of_input: bool,
    ) -> Result<SampleBuffer> {
        let next = match (self.state, end_of_input) {
            (StreamState::Finalized, _) => return Err(ResampleError::FinalizedStream),
            (_, true) => StreamState::Finalized,
            (_, false) => StreamState::Streaming,
        };

        let (output, consumed) = convert(input, ratio, self.kind, &mut self.filter, end_of_input)?;
        debug_assert_eq!(consumed, input.frame_count());
        self.state = next;

        if end_of_input {
            tracing::debug!(
                frames_in = self.filter.frames_in(),
                frames_out = self.filter.frames_out(),
                "stream finalized"
            );
        } else {
            tracing::trace!(
                frames = input.frame_count(),
                emitted = output.frame_count(),
                ratio,
                "processed chunk"
            );
        }
        Ok(output)
    }

    /// Discard all filter history and return to the fresh state, as if the
    /// instance had just been constructed.
    pub fn reset(&mut self) {
        self.filter.reset();
        self.state = StreamState::Fresh;
    }

    pub fn converter_kind(&self) -> ConverterKind {
        self.kind
    }

    pub fn channel_count(&self) -> usize {
        self.channels
    }

    pub fn is_finalized(&self) -> bool {
        self.state == StreamState::Finalized
    }
}
