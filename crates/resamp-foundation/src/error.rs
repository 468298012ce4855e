use thiserror::Error;

/// Errors reported by the resampling engine.
///
/// All variants are synchronous and local to the call that raised them.
/// Every variant is recoverable at the caller's discretion except that a
/// stream which returned [`ResampleError::FinalizedStream`] stays terminal
/// and must be discarded (or reset).
#[derive(Error, Debug)]
pub enum ResampleError {
    #[error("malformed buffer: {0}")]
    Shape(String),

    #[error("invalid conversion ratio {0}: must be finite and greater than zero")]
    InvalidRatio(f64),

    #[error("unsupported converter kind: {0}")]
    UnsupportedConverter(String),

    #[error("stream is finalized and accepts no further input")]
    FinalizedStream,

    #[error("producer callback violated its contract: {0}")]
    ProducerProtocol(String),

    #[error(
        "sample index out of range: frame {frame}, channel {channel} \
         (buffer is {frames} frames x {channels} channels)"
    )]
    IndexOutOfRange {
        frame: usize,
        channel: usize,
        frames: usize,
        channels: usize,
    },
}

pub type Result<T> = std::result::Result<T, ResampleError>;

impl ResampleError {
    /// Whether the instance that raised this error remains usable.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, ResampleError::FinalizedStream)
    }
}
