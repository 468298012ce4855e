pub mod buffer;
pub mod callback;
pub mod converter;
pub mod oneshot;
pub mod stream;

// Public API
pub use buffer::SampleBuffer;
pub use callback::CallbackPullAdapter;
pub use converter::ConverterKind;
pub use oneshot::resample;
pub use stream::StreamingResampler;

pub use resamp_foundation::{ResampleError, Result};
