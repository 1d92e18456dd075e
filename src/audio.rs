//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects and an ambient melody loop - no
//! external files needed. Everything here is fire-and-forget: a missing or
//! suspended context silently drops cues and can never stall the game.

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;
use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::Settings;

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// A ball was thrown into play
    Throw,
    /// The target ball count went up
    LevelUp,
    /// A ball hit the floor
    GameOver,
}

/// Gain applied to the master bus before user volume scaling
const MASTER_GAIN_LEVEL: f32 = 0.08;

/// Ambient melody, one triangle-wave note per beat
const MELODY: [f32; 16] = [
    523.25, 659.25, 587.33, 783.99, 698.46, 659.25, 523.25, 392.0, 440.0, 523.25, 587.33, 659.25,
    587.33, 523.25, 440.0, 392.0,
];
const MUSIC_BEAT_MS: i32 = 260;

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    master: Option<GainNode>,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    music_started: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // Context creation can fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }

        let master = ctx.as_ref().and_then(|ctx| {
            let gain = ctx.create_gain().ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;
            Some(gain)
        });

        let mut manager = Self {
            ctx,
            master,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
            music_started: false,
        };
        manager.apply_master_gain();
        manager
    }

    /// Take volume preferences from settings
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.master_volume = settings.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
        self.music_volume = settings.music_volume.clamp(0.0, 1.0);
        self.apply_master_gain();
    }

    /// Mute/unmute all audio (music included, via the master bus)
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        self.apply_master_gain();
    }

    /// Resume the context (required after a user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    fn apply_master_gain(&mut self) {
        if let Some(master) = &self.master {
            let level = if self.muted {
                0.0
            } else {
                MASTER_GAIN_LEVEL * self.master_volume
            };
            master.gain().set_value(level);
        }
    }

    /// Play a sound cue
    pub fn play(&self, cue: SoundCue) {
        let vol = if self.muted { 0.0 } else { self.sfx_volume };
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Resume if suspended (browsers require a user gesture first)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match cue {
            SoundCue::Throw => self.play_throw(ctx, vol),
            SoundCue::LevelUp => self.play_level_up(ctx, vol),
            SoundCue::GameOver => self.play_game_over(ctx, vol),
        }
    }

    /// Start the ambient melody loop. Idempotent: the loop is started at
    /// most once and runs until the page goes away.
    pub fn start_music(&mut self) {
        if self.music_started {
            return;
        }
        let (Some(ctx), Some(master)) = (self.ctx.clone(), self.master.clone()) else {
            return;
        };
        let Some(window) = web_sys::window() else {
            return;
        };
        self.music_started = true;

        let music_volume = self.music_volume;
        let index = Rc::new(Cell::new(0usize));
        let beat = Closure::<dyn FnMut()>::new(move || {
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }
            let freq = MELODY[index.get() % MELODY.len()];
            index.set(index.get() + 1);

            let Some((osc, gain)) = osc_into(&ctx, &master, freq, OscillatorType::Triangle) else {
                return;
            };
            let t = ctx.current_time();
            let note_secs = MUSIC_BEAT_MS as f64 * 0.85 / 1000.0;
            gain.gain().set_value_at_time(0.0, t).ok();
            gain.gain()
                .linear_ramp_to_value_at_time(music_volume, t + 0.01)
                .ok();
            gain.gain()
                .linear_ramp_to_value_at_time(0.0, t + note_secs)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + note_secs + 0.02).ok();
        });

        if window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                beat.as_ref().unchecked_ref(),
                MUSIC_BEAT_MS,
            )
            .is_ok()
        {
            log::info!("Ambient melody started");
        }
        beat.forget();
    }

    // === Sound generators ===

    /// Create an oscillator routed through a fresh gain into the master bus
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let master = self.master.as_ref()?;
        osc_into(ctx, master, freq, osc_type)
    }

    /// Throw chirp - rising sine sweep
    fn play_throw(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 740.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        osc.frequency().set_value_at_time(740.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(980.0, t + 0.12)
            .ok();
        gain.gain().set_value_at_time(0.0, t).ok();
        gain.gain()
            .linear_ramp_to_value_at_time(vol * 0.35, t + 0.02)
            .ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.001, t + 0.18)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.2).ok();
    }

    /// Level up - ascending dings
    fn play_level_up(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [600.0, 800.0, 1000.0].iter().enumerate() {
            let delay = i as f64 * 0.08;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.25, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.2).ok();
            }
        }
    }

    /// Game over - sad descending
    fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [400.0, 350.0, 300.0, 200.0].iter().enumerate() {
            let delay = i as f64 * 0.2;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.3, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.4).ok();
            }
        }
    }
}

/// Oscillator + envelope gain wired into `out`
fn osc_into(
    ctx: &AudioContext,
    out: &GainNode,
    freq: f32,
    osc_type: OscillatorType,
) -> Option<(OscillatorNode, GainNode)> {
    let osc = ctx.create_oscillator().ok()?;
    let gain = ctx.create_gain().ok()?;

    osc.set_type(osc_type);
    osc.frequency().set_value(freq);
    osc.connect_with_audio_node(&gain).ok()?;
    gain.connect_with_audio_node(out).ok()?;

    Some((osc, gain))
}
