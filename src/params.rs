//! # Plugin Parameters
//!
//! The lowpass effect has a single control: its cutoff frequency. Every
//! other value (the two gains, the memory) is derived from it and the
//! host's sample rate.
//!
//! ## Why Isn't the Cutoff Automatable?
//!
//! The effect's cutoff is fixed for the lifetime of a stream. Its memory
//! is cleared only when the effect is initialized, so retuning mid-stream
//! would mean either resetting the memory (an audible click) or mixing
//! gains designed for two different cutoffs. Instead, a changed cutoff is
//! picked up the next time the host initializes or resets the plugin,
//! e.g. when playback restarts.

use nih_plug::prelude::*;

/// All user-facing parameters for the Loveless Lowpass plugin.
#[derive(Params)]
pub struct PluginParams {
    /// **Cutoff** — the corner frequency of the lowpass.
    ///
    /// - 200 Hz = dark and muffled
    /// - 1000 Hz = warm, most of the top end gone
    /// - 8000 Hz = gentle high-end rolloff
    ///
    /// Range: 20 Hz to 20 kHz. The effect rejects cutoffs at or above
    /// half the sample rate, so the top of the range only works at
    /// sample rates above 40 kHz.
    #[id = "cutoff"]
    pub cutoff: FloatParam,
}

impl PluginParams {
    /// The cutoff as the effect's argument list (`lowp cutoff`).
    pub fn effect_args(&self) -> [String; 1] {
        [self.cutoff.value().to_string()]
    }
}

impl Default for PluginParams {
    fn default() -> Self {
        Self {
            cutoff: FloatParam::new(
                "Cutoff",
                1000.0,
                FloatRange::Skewed {
                    min: 20.0,
                    max: 20000.0,
                    // Frequency perception is roughly logarithmic, so
                    // give the low end more knob travel.
                    factor: FloatRange::skew_factor(-2.0),
                },
            )
            .with_unit(" Hz")
            .with_step_size(1.0)
            .with_flags(ParamFlags::NON_AUTOMATABLE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::LowpassEffect;

    /// The default cutoff has to survive the trip through the effect's
    /// argument parser unchanged.
    #[test]
    fn test_default_cutoff_configures_effect() {
        let params = PluginParams::default();
        let effect = LowpassEffect::configure(&params.effect_args())
            .expect("default cutoff should parse");

        assert_eq!(effect.cutoff_hz(), 1000.0);
    }

    #[test]
    fn test_default_cutoff_is_valid_at_common_rates() {
        let params = PluginParams::default();

        for rate in [22050.0, 44100.0, 48000.0, 96000.0] {
            let mut effect = LowpassEffect::new(params.cutoff.value());
            assert!(effect.initialize(rate).is_ok(), "rate {rate}");
        }
    }
}
