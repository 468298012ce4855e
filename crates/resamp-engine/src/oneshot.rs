use resamp_foundation::Result;

use crate::buffer::SampleBuffer;
use crate::converter::ConverterKind;
use crate::stream::StreamingResampler;

/// Resample a whole buffer at once.
///
/// Equivalent to feeding the entire input through a fresh streaming session
/// in a single flushed call; no state survives. The output holds
/// `round(input.frame_count() * ratio)` frames.
pub fn resample(input: &SampleBuffer, ratio: f64, kind: ConverterKind) -> Result<SampleBuffer> {
    let mut resampler = StreamingResampler::new(kind, input.channel_count())?;
    resampler.process(input, ratio, true)
}
