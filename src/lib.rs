//! # Loveless Lowpass — An AU/VST3/CLAP One-Pole Lowpass Plugin
//!
//! A recursive single-pole lowpass built with
//! [nih-plug](https://github.com/robbert-vdh/nih-plug), modelled on the
//! classic "RC" lowpass stage of old sound-file toolkits. Outputs Audio Unit
//! (AUv2), VST3, and CLAP formats from a single codebase.
//!
//! The DSP itself lives in [`dsp`] and works on 32-bit integer samples, as
//! those toolkits did. This file is the adapter between that
//! integer-domain effect and a plugin host's `f32` buffers.
//!
//! ## Lifecycle
//!
//! ```text
//! host callback      effect call
//! ─────────────      ───────────────────────────────────────────
//! initialize()  ──►  configure(cutoff)  +  initialize(sample_rate)
//! reset()       ──►  initialize(sample_rate)     (clears memory)
//! process()     ──►  tick() per sample, per channel
//! deactivate()  ──►  finalize()
//! ```
//!
//! ## Signal Flow (per channel)
//!
//! ```text
//! f32 ──► [to i32] ──► (A * x + B * memory) ──► [clamp] ──► [to f32] ──► f32
//!                 │                                ▲
//!                 └──────────► memory ─────────────┘
//! ```

pub mod dsp;
mod params;

use std::num::NonZeroU32;
use std::sync::Arc;

use dasp::Sample as _;
use dsp::{LowpassEffect, Sample};
use nih_plug::prelude::*;
use params::PluginParams;

/// The main plugin struct.
///
/// Holds the per-channel effect state that persists between calls to
/// `process()`. Parameters are shared with the host through `Arc`; the
/// effects are owned by the audio thread alone.
struct LovelessLowpass {
    params: Arc<PluginParams>,

    /// The current sample rate in Hz. Set during `initialize()` and reused
    /// by `reset()` to re-initialize the effects.
    sample_rate: f32,

    /// One independent effect per audio channel. Channels never share
    /// filter memory, so stereo images stay intact.
    effects: Vec<LowpassEffect>,
}

impl Default for LovelessLowpass {
    fn default() -> Self {
        Self {
            params: Arc::new(PluginParams::default()),
            // Placeholder until the host tells us the real rate.
            sample_rate: 44100.0,
            effects: Vec::new(),
        }
    }
}

impl LovelessLowpass {
    /// Run the effect's configure and initialize steps for each channel.
    ///
    /// Returns `false` (after logging why) if the cutoff can't be used at
    /// the current sample rate. The host then refuses to load the plugin
    /// in this configuration.
    fn build_effects(&mut self, num_channels: usize) -> bool {
        let args = self.params.effect_args();

        let mut effects = Vec::with_capacity(num_channels);
        for _ in 0..num_channels {
            let mut effect = match LowpassEffect::configure(&args) {
                Ok(effect) => effect,
                Err(err) => {
                    nih_error!("Lowpass configuration failed: {err}");
                    return false;
                }
            };
            if let Err(err) = effect.initialize(self.sample_rate) {
                nih_error!("Lowpass: {err}");
                return false;
            }
            effects.push(effect);
        }

        nih_log!(
            "Lowpass ready: {} Hz cutoff at {} Hz, {} channel(s)",
            self.params.cutoff.value(),
            self.sample_rate,
            num_channels
        );

        self.effects = effects;
        true
    }

    /// Clear every channel's memory by re-running its initialize step at
    /// the current sample rate.
    ///
    /// The cutoffs were already accepted at this rate by `build_effects`,
    /// so an error here means the stored rate changed underneath us.
    fn reinitialize_effects(&mut self) {
        for effect in &mut self.effects {
            if let Err(err) = effect.initialize(self.sample_rate) {
                nih_error!("Lowpass: reset failed: {err}");
            }
        }
    }
}

impl Plugin for LovelessLowpass {
    const NAME: &'static str = "Loveless Lowpass";
    const VENDOR: &'static str = "Loveless Audio";
    const URL: &'static str = "";
    const EMAIL: &'static str = "steve.loveless@gmail.com";
    const VERSION: &'static str = env!("CARGO_PKG_VERSION");

    // Stereo first, mono as a fallback. Each channel gets its own effect.
    const AUDIO_IO_LAYOUTS: &'static [AudioIOLayout] = &[
        AudioIOLayout {
            main_input_channels: NonZeroU32::new(2),
            main_output_channels: NonZeroU32::new(2),
            aux_input_ports: &[],
            aux_output_ports: &[],
            names: PortNames::const_default(),
        },
        AudioIOLayout {
            main_input_channels: NonZeroU32::new(1),
            main_output_channels: NonZeroU32::new(1),
            aux_input_ports: &[],
            aux_output_ports: &[],
            names: PortNames::const_default(),
        },
    ];

    const MIDI_INPUT: MidiConfig = MidiConfig::None;

    type SysExMessage = ();
    type BackgroundTask = ();

    fn params(&self) -> Arc<dyn Params> {
        self.params.clone()
    }

    /// Called when the plugin is loaded or the audio configuration
    /// changes. This is where the cutoff gets parsed and checked against
    /// the sample rate, because the rate is only known now.
    ///
    /// # Return value
    ///
    /// `false` if the cutoff is at or above Nyquist for this rate.
    fn initialize(
        &mut self,
        audio_io_layout: &AudioIOLayout,
        buffer_config: &BufferConfig,
        _context: &mut impl InitContext<Self>,
    ) -> bool {
        self.sample_rate = buffer_config.sample_rate;

        let num_channels = audio_io_layout
            .main_input_channels
            .map(|c| c.get() as usize)
            .unwrap_or(2);

        self.build_effects(num_channels)
    }

    /// Called before playback resumes. Starting a new stream is the one
    /// point where the filter memory may be cleared, so re-run the
    /// effect's initialize step. A cutoff changed since the last
    /// `initialize()` takes effect here.
    fn reset(&mut self) {
        let num_channels = self.effects.len();
        let cutoff_hz = self.params.cutoff.value();

        if self.effects.iter().all(|e| e.cutoff_hz() == cutoff_hz) {
            self.reinitialize_effects();
        } else if !self.build_effects(num_channels) {
            // Keep the previous effects running rather than going silent.
            nih_warn!("Lowpass: keeping previous cutoff");
            self.reinitialize_effects();
        }
    }

    /// Runs every channel's samples through its own effect.
    ///
    /// The host hands us `f32` samples in [-1, 1]. They're scaled into the
    /// effect's 32-bit integer domain, filtered, and scaled back. The
    /// effect saturates at full scale, so the output stays within [-1, 1].
    fn process(
        &mut self,
        buffer: &mut Buffer,
        _aux: &mut AuxiliaryBuffers,
        _context: &mut impl ProcessContext<Self>,
    ) -> ProcessStatus {
        for (channel, effect) in buffer.as_slice().iter_mut().zip(&mut self.effects) {
            for sample in channel.iter_mut() {
                let input: Sample = (*sample).to_sample();
                *sample = effect.tick(input).to_sample();
            }
        }

        ProcessStatus::Normal
    }

    /// Called when the host stops the plugin: the end of the stream.
    fn deactivate(&mut self) {
        for effect in &mut self.effects {
            effect.finalize();
        }
    }
}

// ─────────────────────────────────────────────────────────────────────
// Plugin format trait implementations
// ─────────────────────────────────────────────────────────────────────

impl ClapPlugin for LovelessLowpass {
    const CLAP_ID: &'static str = "com.loveless-audio.loveless-lowpass-v1";
    const CLAP_DESCRIPTION: Option<&'static str> =
        Some("A recursive single-pole lowpass modelled on an RC filter");
    const CLAP_MANUAL_URL: Option<&'static str> = None;
    const CLAP_SUPPORT_URL: Option<&'static str> = None;
    const CLAP_FEATURES: &'static [ClapFeature] = &[
        ClapFeature::AudioEffect,
        ClapFeature::Stereo,
        ClapFeature::Mono,
        ClapFeature::Filter,
    ];
}

impl Vst3Plugin for LovelessLowpass {
    // `*b"..."` turns the 16-character ASCII literal into a `[u8; 16]`.
    const VST3_CLASS_ID: [u8; 16] = *b"LvlssLowpass_v01";

    const VST3_SUBCATEGORIES: &'static [Vst3SubCategory] =
        &[Vst3SubCategory::Fx, Vst3SubCategory::Filter];
}

// ─────────────────────────────────────────────────────────────────────
// Export macros
// ─────────────────────────────────────────────────────────────────────
//
// nih_export_clap! exports the `clap_entry` symbol for CLAP hosts.
// nih_export_vst3! exports `GetPluginFactory` for VST3 hosts.
// clap_wrapper re-exports the CLAP entry point as an AUv2 component.

nih_export_clap!(LovelessLowpass);
nih_export_vst3!(LovelessLowpass);

clap_wrapper::export_auv2!();

// ─────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────
