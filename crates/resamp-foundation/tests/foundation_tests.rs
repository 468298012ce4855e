//! Error taxonomy basics: display text and recoverability.

use resamp_foundation::ResampleError;

#[test]
fn display_messages_carry_the_offending_values() {
    let err = ResampleError::InvalidRatio(-2.0);
    assert!(err.to_string().contains("-2"));

    let err = ResampleError::UnsupportedConverter("cubic".to_string());
    assert!(err.to_string().contains("cubic"));

    let err = ResampleError::IndexOutOfRange {
        frame: 9,
        channel: 1,
        frames: 4,
        channels: 2,
    };
    let text = err.to_string();
    assert!(text.contains("frame 9") && text.contains("channel 1"));
}

#[test]
fn only_finalized_streams_are_terminal() {
    assert!(!ResampleError::FinalizedStream.is_recoverable());
    for recoverable in [
        ResampleError::Shape("bad".into()),
        ResampleError::InvalidRatio(0.0),
        ResampleError::UnsupportedConverter("x".into()),
        ResampleError::ProducerProtocol("y".into()),
    ] {
        assert!(recoverable.is_recoverable(), "{recoverable}");
    }
}
