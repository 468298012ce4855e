//! One-shot facade: empty inputs, silence, ratio validation, and channel
//! preservation.

use resamp_engine::{resample, ConverterKind, ResampleError, SampleBuffer};

// ─── Degenerate Inputs ───────────────────────────────────────────────

#[test]
fn empty_input_yields_empty_output_for_every_kind_and_ratio() {
    for kind in ConverterKind::ALL {
        for ratio in [0.1, 0.5, 1.0, 2.0, 7.3] {
            let out = resample(&SampleBuffer::empty(1), ratio, kind).unwrap();
            assert_eq!(
                out.frame_count(),
                0,
                "{kind:?} at ratio {ratio} produced frames from nothing"
            );
        }
    }
}

#[test]
fn silence_resamples_to_silence() {
    let input = SampleBuffer::from_interleaved(vec![0.0; 100], 1).unwrap();
    let out = resample(&input, 2.0, ConverterKind::Fastest).unwrap();
    assert_eq!(out.frame_count(), 200);
    for (i, s) in out.samples().iter().enumerate() {
        assert!(s.abs() < 1e-6, "frame {i} is not silent: {s}");
    }
}

// ─── Ratio Validation ────────────────────────────────────────────────

#[test]
fn non_positive_and_non_finite_ratios_are_rejected() {
    let input = SampleBuffer::from_interleaved(vec![0.0; 16], 1).unwrap();
    for bad in [-1.0, 0.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        match resample(&input, bad, ConverterKind::Fastest) {
            Err(ResampleError::InvalidRatio(r)) => {
                assert!(r.is_nan() || r == bad);
            }
            other => panic!("ratio {bad}: expected InvalidRatio, got {other:?}"),
        }
    }
}

// ─── Channel Handling ────────────────────────────────────────────────

#[test]
fn stereo_downsampling_keeps_channels_separate() {
    // Left channel counts up, right channel counts down.
    let frames = 64;
    let mut samples = Vec::with_capacity(frames * 2);
    for i in 0..frames {
        samples.push(i as f32);
        samples.push(-(i as f32));
    }
    let input = SampleBuffer::from_interleaved(samples, 2).unwrap();

    let out = resample(&input, 0.5, ConverterKind::ZeroOrderHold).unwrap();
    assert_eq!(out.frame_count(), 32);
    assert_eq!(out.channel_count(), 2);
    for j in 0..32 {
        assert_eq!(out.sample(j, 0).unwrap(), (2 * j) as f32);
        assert_eq!(out.sample(j, 1).unwrap(), -((2 * j) as f32));
    }
}

#[test]
fn normalized_i16_input_resamples_cleanly() {
    let pcm: Vec<i16> = (0..480)
        .map(|i| ((i as f32 * 0.1).sin() * 12_000.0) as i16)
        .collect();
    let input = SampleBuffer::from_i16(&pcm, 1).unwrap();
    let out = resample(&input, 1.5, ConverterKind::Medium).unwrap();
    assert_eq!(out.frame_count(), 720);
    assert!(out.samples().iter().all(|s| s.abs() <= 1.0));
}
