use std::f64::consts::PI;

use resamp_foundation::{ResampleError, Result};

use crate::buffer::SampleBuffer;

/// Converter tiers, from highest fidelity to cheapest.
///
/// A capability selector, not a strategy object: each kind maps onto an
/// interpolation kernel through a `match`, and carries no state of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConverterKind {
    /// Windowed-sinc interpolation, longest kernel.
    Best,
    /// Windowed-sinc interpolation, medium kernel.
    Medium,
    /// Windowed-sinc interpolation, shortest kernel.
    Fastest,
    /// Repeat the most recent input frame.
    ZeroOrderHold,
    /// Two-point linear interpolation.
    Linear,
}

impl ConverterKind {
    pub const ALL: [ConverterKind; 5] = [
        ConverterKind::Best,
        ConverterKind::Medium,
        ConverterKind::Fastest,
        ConverterKind::ZeroOrderHold,
        ConverterKind::Linear,
    ];

    /// Parse a converter name.
    ///
    /// Accepts both the short tier names (`best`, `medium`, `fastest`) and
    /// the libsamplerate-style names (`sinc_best`, `sinc_medium`,
    /// `sinc_fastest`, `zero_order_hold`, `linear`).
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "best" | "sinc_best" => Ok(ConverterKind::Best),
            "medium" | "sinc_medium" => Ok(ConverterKind::Medium),
            "fastest" | "sinc_fastest" => Ok(ConverterKind::Fastest),
            "zero_order_hold" => Ok(ConverterKind::ZeroOrderHold),
            "linear" => Ok(ConverterKind::Linear),
            other => Err(ResampleError::UnsupportedConverter(other.to_string())),
        }
    }

    /// Numeric selector, same ordering as libsamplerate's converter table.
    pub fn from_index(index: usize) -> Result<Self> {
        match index {
            0 => Ok(ConverterKind::Best),
            1 => Ok(ConverterKind::Medium),
            2 => Ok(ConverterKind::Fastest),
            3 => Ok(ConverterKind::ZeroOrderHold),
            4 => Ok(ConverterKind::Linear),
            other => Err(ResampleError::UnsupportedConverter(format!(
                "index {other}"
            ))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ConverterKind::Best => "sinc_best",
            ConverterKind::Medium => "sinc_medium",
            ConverterKind::Fastest => "sinc_fastest",
            ConverterKind::ZeroOrderHold => "zero_order_hold",
            ConverterKind::Linear => "linear",
        }
    }

    /// Half kernel length in frames: how many future input frames the kernel
    /// must see past the interpolation point before it can emit.
    pub(crate) fn lookahead(self) -> usize {
        match self {
            ConverterKind::Best => 32,
            ConverterKind::Medium => 16,
            ConverterKind::Fastest => 8,
            ConverterKind::Linear => 1,
            ConverterKind::ZeroOrderHold => 0,
        }
    }
}

pub(crate) fn validate_ratio(ratio: f64) -> Result<()> {
    if !ratio.is_finite() || ratio <= 0.0 {
        return Err(ResampleError::InvalidRatio(ratio));
    }
    Ok(())
}

/// Filter history threaded through successive convert calls.
///
/// Holds the interleaved frames the kernel may still read, the fractional
/// read position within them, and the running totals that drive the flush
/// target. Owned exclusively by one `StreamingResampler` and mutated only
/// through its `process` calls.
#[derive(Debug, Clone)]
pub(crate) struct FilterState {
    channels: usize,
    lookahead: usize,
    /// Retained interleaved frames: kernel history plus unread input.
    window: Vec<f32>,
    /// Continuous read position within `window`, in frames.
    position: f64,
    frames_in: u64,
    frames_out: u64,
    /// Running `sum(input_frames_i * ratio_i)`; rounded at flush to fix the
    /// total output count.
    expected_out: f64,
    /// Per-channel accumulator reused across emitted frames.
    scratch: Vec<f64>,
}

impl FilterState {
    pub(crate) fn new(kind: ConverterKind, channels: usize) -> Self {
        Self {
            channels,
            lookahead: kind.lookahead(),
            window: Vec::new(),
            position: 0.0,
            frames_in: 0,
            frames_out: 0,
            expected_out: 0.0,
            scratch: vec![0.0; channels],
        }
    }

    pub(crate) fn reset(&mut self) {
        self.window.clear();
        self.position = 0.0;
        self.frames_in = 0;
        self.frames_out = 0;
        self.expected_out = 0.0;
    }

    pub(crate) fn frames_in(&self) -> u64 {
        self.frames_in
    }

    pub(crate) fn frames_out(&self) -> u64 {
        self.frames_out
    }
}

/// One conversion pass over the current window.
///
/// Absorbs `input` into the state window, emits every output frame the
/// kernel has context for, and returns the output along with the number of
/// input frames consumed. Output is caller-growable here, so the full input
/// is always absorbed and `frames_consumed == input.frame_count()`; the
/// count is returned to keep the contract explicit for output-bounded
/// callers. Unread frames stay in the state window, never dropped.
///
/// With `end_of_input` the window is padded with the kernel's lookahead of
/// silence after absorbing the supplied input, and emission continues until
/// the cumulative output count reaches `round(sum(input_frames * ratio))`.
///
/// Interpolation coefficients and accumulation are f64 throughout one call;
/// samples are stored as f32.
pub(crate) fn convert(
    input: &SampleBuffer,
    ratio: f64,
    kind: ConverterKind,
    state: &mut FilterState,
    end_of_input: bool,
) -> Result<(SampleBuffer, usize)> {
    validate_ratio(ratio)?;
    if input.channel_count() != state.channels {
        return Err(ResampleError::Shape(format!(
            "expected {} channels, got {}",
            state.channels,
            input.channel_count()
        )));
    }

    let channels = state.channels;
    let consumed = input.frame_count();
    state.window.extend_from_slice(input.samples());
    state.frames_in += consumed as u64;
    state.expected_out += consumed as f64 * ratio;

    let step = 1.0 / ratio;
    let lookahead = state.lookahead;
    let mut out: Vec<f32> =
        Vec::with_capacity(((consumed as f64 * ratio) as usize + 1) * channels);

    if end_of_input {
        state
            .window
            .extend(std::iter::repeat(0.0).take(lookahead * channels));
        let target = state.expected_out.round() as u64;
        while state.frames_out < target {
            emit_frame(
                &state.window,
                channels,
                state.position,
                kind,
                lookahead,
                &mut state.scratch,
                &mut out,
            );
            state.position += step;
            state.frames_out += 1;
        }
        state.window.clear();
        state.position = 0.0;
    } else {
        let frames = state.window.len() / channels;
        // Emission is capped by the running expected count so chunked totals
        // never overshoot what a single flushed call would produce.
        let target = state.expected_out.round() as u64;
        while state.frames_out < target && has_context(state.position, lookahead, frames) {
            emit_frame(
                &state.window,
                channels,
                state.position,
                kind,
                lookahead,
                &mut state.scratch,
                &mut out,
            );
            state.position += step;
            state.frames_out += 1;
        }
        // Frames the kernel can never read again are dropped; the position
        // is rebased by the same whole number of frames. A step larger than
        // the window carries the position past its end, so the cut is
        // clamped to the window length and the overshoot stays in
        // `position`.
        let keep_from = (state.position.floor() as usize)
            .saturating_sub(lookahead)
            .min(frames);
        if keep_from > 0 {
            state.window.drain(..keep_from * channels);
            state.position -= keep_from as f64;
        }
    }

    let output = SampleBuffer::from_interleaved(out, channels)?;
    Ok((output, consumed))
}

/// Whether the kernel centered at `position` has all the input it needs.
fn has_context(position: f64, lookahead: usize, frames: usize) -> bool {
    if frames == 0 {
        return false;
    }
    position.floor() as usize + lookahead < frames
}

fn emit_frame(
    window: &[f32],
    channels: usize,
    position: f64,
    kind: ConverterKind,
    lookahead: usize,
    scratch: &mut [f64],
    out: &mut Vec<f32>,
) {
    match kind {
        ConverterKind::ZeroOrderHold => hold_frame(window, channels, position, out),
        ConverterKind::Linear => linear_frame(window, channels, position, out),
        _ => sinc_frame(window, channels, position, lookahead, scratch, out),
    }
}

fn sample_or_silence(window: &[f32], channels: usize, frame: isize, channel: usize) -> f64 {
    let frames = (window.len() / channels) as isize;
    if frame < 0 || frame >= frames {
        return 0.0;
    }
    window[frame as usize * channels + channel] as f64
}

fn hold_frame(window: &[f32], channels: usize, position: f64, out: &mut Vec<f32>) {
    let frames = window.len() / channels;
    if frames == 0 {
        out.extend(std::iter::repeat(0.0).take(channels));
        return;
    }
    let idx = (position.floor() as usize).min(frames - 1);
    out.extend_from_slice(&window[idx * channels..(idx + 1) * channels]);
}

fn linear_frame(window: &[f32], channels: usize, position: f64, out: &mut Vec<f32>) {
    let base = position.floor();
    let frac = position - base;
    let i0 = base as isize;
    for channel in 0..channels {
        let a = sample_or_silence(window, channels, i0, channel);
        let b = sample_or_silence(window, channels, i0 + 1, channel);
        out.push((a + (b - a) * frac) as f32);
    }
}

fn sinc_frame(
    window: &[f32],
    channels: usize,
    position: f64,
    lookahead: usize,
    scratch: &mut [f64],
    out: &mut Vec<f32>,
) {
    let base = position.floor();
    let frac = position - base;
    let i0 = base as isize;
    let half = lookahead as isize;

    scratch.fill(0.0);
    let mut norm = 0.0f64;
    for k in (1 - half)..=half {
        let x = k as f64 - frac;
        let weight = windowed_sinc(x, lookahead as f64);
        norm += weight;
        let frame = i0 + k;
        let frames = (window.len() / channels) as isize;
        if frame >= 0 && frame < frames {
            let offset = frame as usize * channels;
            for (channel, acc) in scratch.iter_mut().enumerate() {
                *acc += weight * window[offset + channel] as f64;
            }
        }
    }
    for acc in scratch.iter() {
        out.push(if norm != 0.0 { (acc / norm) as f32 } else { 0.0 });
    }
}

/// Blackman-windowed sinc, zero outside `[-half, half]`.
fn windowed_sinc(x: f64, half: f64) -> f64 {
    if x.abs() >= half {
        return 0.0;
    }
    let sinc = if x == 0.0 {
        1.0
    } else {
        let px = PI * x;
        px.sin() / px
    };
    let window = 0.42 + 0.5 * (PI * x / half).cos() + 0.08 * (2.0 * PI * x / half).cos();
    sinc * window
}
