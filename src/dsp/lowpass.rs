//! # Recursive Single-Pole Lowpass Effect
//!
//! The classic "RC" lowpass: a resistor feeding a capacitor, sampled.
//!
//! ```text
//!     ---/\/\/\/\----------->
//!                    |
//!                   --- C
//!                   ---
//!                    |
//!                    V
//! ```
//!
//! ## The Filter Equation
//!
//! ```text
//! d[n]  = A * x[n] + B * m[n-1]
//!
//! B = e^(-2π * cutoff_hz / sample_rate)
//! A = 1 - B
//! ```
//!
//! `m` is the filter's memory (the "capacitor"). Because `A + B = 1`, a
//! constant input passes through at unity gain.
//!
//! ## Which Value Feeds the Memory?
//!
//! In the textbook filter `m[n] = d[n]`: the memory holds the previous
//! *output*, which is what makes the filter recursive (IIR).
//!
//! This effect reproduces the historic lowpass stage it's modelled on,
//! which stores the previous *input* instead: `m[n] = x[n]`. That turns
//! the recurrence into a two-tap weighted average of the current and
//! previous input, with a noticeably different frequency response. Since
//! existing pipelines depend on that sound, it's the default
//! ([`Feedback::PreviousInput`]). The textbook wiring is available as
//! the explicit alternate mode [`Feedback::PreviousOutput`].
//!
//! ## Lifecycle
//!
//! 1. **Configure**: [`LowpassEffect::configure`] parses the cutoff.
//! 2. **Initialize**: [`LowpassEffect::initialize`] derives `A` and `B`
//!    from the sample rate and clears the memory.
//! 3. **Process**: [`LowpassEffect::process`] runs once per buffer, in
//!    stream order.
//! 4. **Finalize**: [`LowpassEffect::finalize`] at stream end.

use std::f64::consts::PI;

use super::error::{ConfigError, RangeError};

/// A fixed-point audio sample: 32-bit signed, full scale at ±[`SAMPLE_MAX`].
pub type Sample = i32;

/// Largest output sample.
pub const SAMPLE_MAX: Sample = 2_147_483_647;

/// Smallest output sample. The range is symmetric, so `i32::MIN` is never
/// produced even though it's accepted as input.
pub const SAMPLE_MIN: Sample = -2_147_483_647;

/// Which value the filter stores in its memory after each sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Feedback {
    /// Store the raw input sample, as the historic effect does.
    #[default]
    PreviousInput,

    /// Store the clamped output sample (the textbook one-pole filter).
    PreviousOutput,
}

/// The state of one lowpass stage.
///
/// Each audio channel or stream needs its own instance; nothing is shared
/// between them.
#[derive(Debug, Clone, PartialEq)]
pub struct LowpassEffect {
    /// Corner frequency in Hz. Fixed once configured.
    cutoff_hz: f32,

    /// Feed-forward gain `A = 1 - B`.
    coefficient_a: f64,

    /// Feedback gain `B = e^(-2π * cutoff / rate)`.
    coefficient_b: f64,

    /// The memory element. The only field that changes per sample.
    previous: f64,

    feedback: Feedback,
}

impl LowpassEffect {
    /// Create an effect for `cutoff_hz`, not yet initialized.
    ///
    /// Both gains start at zero, so an effect that skips
    /// [`initialize`](Self::initialize) outputs silence.
    pub fn new(cutoff_hz: f32) -> Self {
        Self {
            cutoff_hz,
            coefficient_a: 0.0,
            coefficient_b: 0.0,
            previous: 0.0,
            feedback: Feedback::default(),
        }
    }

    /// Parse the effect's arguments: `lowp cutoff`.
    ///
    /// Only the first argument is used. Anything after it is accepted and
    /// ignored.
    ///
    /// The whole first argument (minus surrounding whitespace) must be the
    /// number. Trailing text is rejected rather than skipped, so `"12kHz"`
    /// is an error, not a 12 Hz cutoff.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] if there are no arguments or the first one isn't a
    /// finite number.
    pub fn configure<S: AsRef<str>>(args: &[S]) -> Result<Self, ConfigError> {
        let raw = args.first().ok_or(ConfigError::MissingCutoff)?.as_ref();

        let cutoff_hz = raw
            .trim()
            .parse::<f32>()
            .ok()
            .filter(|hz| hz.is_finite())
            .ok_or_else(|| ConfigError::InvalidCutoff(raw.to_owned()))?;

        Ok(Self::new(cutoff_hz))
    }

    /// Build an already-initialized effect from explicit gains.
    ///
    /// For hosts that design the gains themselves. The cutoff is unknown
    /// and reported as `0.0`, so calling [`initialize`](Self::initialize)
    /// on the result fails.
    pub fn from_coefficients(coefficient_a: f64, coefficient_b: f64) -> Self {
        Self {
            cutoff_hz: 0.0,
            coefficient_a,
            coefficient_b,
            previous: 0.0,
            feedback: Feedback::default(),
        }
    }

    /// Select which value feeds the memory.
    pub fn with_feedback(mut self, feedback: Feedback) -> Self {
        self.feedback = feedback;
        self
    }

    pub fn cutoff_hz(&self) -> f32 {
        self.cutoff_hz
    }

    /// The `(A, B)` gains.
    pub fn coefficients(&self) -> (f64, f64) {
        (self.coefficient_a, self.coefficient_b)
    }

    pub fn feedback(&self) -> Feedback {
        self.feedback
    }

    /// Derive the gains for `sample_rate` and clear the memory.
    ///
    /// This is the only place the memory is reset, and it's safe to call
    /// again (e.g. when the host restarts the stream).
    ///
    /// # Errors
    ///
    /// [`RangeError`] if the sample rate isn't positive, the cutoff isn't
    /// positive, the cutoff is at or above Nyquist (`sample_rate / 2`), or
    /// the cutoff is so small relative to the rate that `B` rounds to 1.0.
    /// The effect is left unchanged on error.
    pub fn initialize(&mut self, sample_rate: f32) -> Result<(), RangeError> {
        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            return Err(RangeError::InvalidSampleRate(sample_rate));
        }
        if self.cutoff_hz <= 0.0 {
            return Err(RangeError::NonPositiveCutoff(self.cutoff_hz));
        }

        let nyquist_hz = sample_rate / 2.0;
        if self.cutoff_hz >= nyquist_hz {
            return Err(RangeError::AboveNyquist {
                cutoff_hz: self.cutoff_hz,
                nyquist_hz,
            });
        }

        let coefficient_b =
            (-2.0 * PI * f64::from(self.cutoff_hz) / f64::from(sample_rate)).exp();
        let coefficient_a = 1.0 - coefficient_b;

        // Both gains must lie strictly inside (0, 1). `B` is always above
        // e^-π here, so only `A` can collapse to zero.
        if coefficient_a <= 0.0 {
            return Err(RangeError::CutoffTooLow {
                cutoff_hz: self.cutoff_hz,
                sample_rate,
            });
        }

        self.coefficient_a = coefficient_a;
        self.coefficient_b = coefficient_b;
        self.previous = 0.0;

        Ok(())
    }

    /// Run one sample through the filter.
    ///
    /// Assumes a successful [`initialize`](Self::initialize); nothing is
    /// checked here.
    #[inline]
    pub fn tick(&mut self, input: Sample) -> Sample {
        let x = f64::from(input);
        let mut d = self.coefficient_a * x + self.coefficient_b * self.previous;

        // Saturate in floating point; the cast below would saturate at
        // i32::MIN, which is outside the symmetric range.
        if d < f64::from(SAMPLE_MIN) {
            d = f64::from(SAMPLE_MIN);
        } else if d > f64::from(SAMPLE_MAX) {
            d = f64::from(SAMPLE_MAX);
        }

        self.previous = match self.feedback {
            Feedback::PreviousInput => x,
            Feedback::PreviousOutput => d,
        };

        // `as` truncates toward zero.
        d as Sample
    }

    /// Filter `input` into `output`, returning how many samples were
    /// processed.
    ///
    /// Only `min(input.len(), output.len())` samples are read and written.
    /// The rest of both buffers is left alone; pass the remainder in the
    /// next call to continue the stream.
    pub fn process(&mut self, input: &[Sample], output: &mut [Sample]) -> usize {
        let len = input.len().min(output.len());

        for (out, &x) in output[..len].iter_mut().zip(&input[..len]) {
            *out = self.tick(x);
        }

        len
    }

    /// End of stream. The effect holds no resources, so there's nothing to
    /// release.
    pub fn finalize(&mut self) {}
}

// ─────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────
