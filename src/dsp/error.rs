//! # Lifecycle Errors
//!
//! The filter can only fail before it starts processing. Both error kinds
//! are terminal: once either is returned, the effect must not be used to
//! process audio.
//!
//! - [`ConfigError`] comes from the Configurator, when the cutoff argument
//!   is missing or isn't a number.
//! - [`RangeError`] comes from the Initializer, when the cutoff can't be
//!   realised at the stream's sample rate.

use thiserror::Error;

/// The cutoff argument was missing or unparseable.
///
/// Both variants render as the effect's usage line, since that's all a
/// host needs to show the user.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// No arguments were supplied at all.
    #[error("usage: lowp cutoff")]
    MissingCutoff,

    /// The first argument isn't a finite floating-point number.
    #[error("usage: lowp cutoff (got {0:?})")]
    InvalidCutoff(String),
}

/// The configured cutoff can't be used at this sample rate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RangeError {
    /// The Nyquist constraint: a one-pole design only makes sense for
    /// cutoffs strictly below half the sample rate.
    #[error("cutoff must be less than half the sample rate ({cutoff_hz} Hz >= {nyquist_hz} Hz)")]
    AboveNyquist { cutoff_hz: f32, nyquist_hz: f32 },

    /// Zero or negative cutoffs would push the feedback gain to 1.0 or
    /// above, which never decays.
    #[error("cutoff must be greater than zero (got {0} Hz)")]
    NonPositiveCutoff(f32),

    /// The cutoff is positive but so small next to the sample rate that
    /// the feed-forward gain rounds to zero.
    #[error("cutoff is too low to resolve at this sample rate ({cutoff_hz} Hz at {sample_rate} Hz)")]
    CutoffTooLow { cutoff_hz: f32, sample_rate: f32 },

    #[error("sample rate must be a positive number (got {0})")]
    InvalidSampleRate(f32),
}
