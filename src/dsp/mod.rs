//! # DSP (Digital Signal Processing) Core
//!
//! - **`lowpass`**: the recursive single-pole lowpass effect and its
//!   configure / initialize / process / finalize lifecycle.
//!
//! - **`error`**: the errors configure and initialize can return.
//!
//! Nothing in here knows about plugin hosts; the integer-sample effect can
//! be driven by any pipeline.

pub mod error;
pub mod lowpass;

pub use error::{ConfigError, RangeError};
pub use lowpass::{Feedback, LowpassEffect, Sample, SAMPLE_MAX, SAMPLE_MIN};
