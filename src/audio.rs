//! Audio boundary
//!
//! Engines never touch audio directly. The host turns engine events into
//! [`SoundEffect`]s and feeds the racer's [`MusicCue`] to an
//! [`AudioManager`], which applies volume settings and forwards to an
//! [`AudioSink`]. Playback failures are swallowed by the sinks.

use crate::racer::RacerEvent;
use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Rising "ding" when the ship flies through a gate
    GateChime,
}

impl SoundEffect {
    /// Sound for a racer event, if it has one
    pub fn for_racer_event(event: &RacerEvent) -> Option<Self> {
        match event {
            RacerEvent::GatePassed { .. } => Some(SoundEffect::GateChime),
            _ => None,
        }
    }
}

/// Desired background music state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MusicCue {
    pub playing: bool,
    /// Music volume before master volume is applied
    pub volume: f32,
}

/// Playback primitives provided by the host
pub trait AudioSink {
    /// Play a one-shot effect at `volume` (0..=1)
    fn play(&mut self, effect: SoundEffect, volume: f32);
    /// Start (or resume) the looping music track
    fn start_music(&mut self);
    fn stop_music(&mut self);
    fn set_music_volume(&mut self, volume: f32);
}

/// Sink that only logs, for headless runs
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::debug!("sfx {effect:?} at {volume:.2}");
    }

    fn start_music(&mut self) {
        log::debug!("music start");
    }

    fn stop_music(&mut self) {
        log::debug!("music stop");
    }

    fn set_music_volume(&mut self, volume: f32) {
        log::debug!("music volume {volume:.2}");
    }
}

/// Audio manager for the games
pub struct AudioManager<S: AudioSink> {
    sink: S,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    /// Last cue forwarded to the sink
    music: MusicCue,
}

impl<S: AudioSink> AudioManager<S> {
    pub fn new(sink: S, settings: &Settings) -> Self {
        Self {
            sink,
            master_volume: settings.master_volume,
            sfx_volume: settings.sfx_volume,
            muted: false,
            music: MusicCue {
                playing: false,
                volume: settings.music_volume,
            },
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
        self.push_music_volume();
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        self.push_music_volume();
    }

    fn gain(&self) -> f32 {
        if self.muted { 0.0 } else { self.master_volume }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.gain() * self.sfx_volume;
        if vol <= 0.0 {
            return;
        }
        self.sink.play(effect, vol);
    }

    /// Play the sounds for a batch of racer events
    pub fn play_racer_events(&mut self, events: &[RacerEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_racer_event) {
            self.play(effect);
        }
    }

    /// Bring the music in line with `cue`, only touching the sink on change
    pub fn sync_music(&mut self, cue: MusicCue) {
        if cue == self.music {
            return;
        }
        let previous = self.music;
        self.music = cue;

        if cue.volume != previous.volume {
            self.push_music_volume();
        }
        if cue.playing && !previous.playing {
            self.push_music_volume();
            self.sink.start_music();
        } else if !cue.playing && previous.playing {
            self.sink.stop_music();
        }
    }

    fn push_music_volume(&mut self) {
        let vol = self.gain() * self.music.volume;
        self.sink.set_music_volume(vol);
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

/// Browser playback through Web Audio and an `<audio>` element
#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, HtmlAudioElement, OscillatorNode, OscillatorType};

    use super::{AudioSink, SoundEffect};

    const MUSIC_URL: &str = "/audio/synthwave.mp4";

    pub struct WebAudio {
        ctx: Option<AudioContext>,
        music: Option<HtmlAudioElement>,
    }

    impl Default for WebAudio {
        fn default() -> Self {
            Self::new()
        }
    }

    impl WebAudio {
        pub fn new() -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - sound effects disabled");
            }
            let music = HtmlAudioElement::new_with_src(MUSIC_URL).ok();
            if let Some(audio) = &music {
                audio.set_loop(true);
            }
            Self { ctx, music }
        }

        fn create_osc(
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        fn play_gate_chime(ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = Self::create_osc(ctx, 800.0, OscillatorType::Sine) else {
                log::debug!("Gate chime unavailable");
                return;
            };
            let t = ctx.current_time();

            osc.frequency().set_value_at_time(800.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(1200.0, t + 0.1)
                .ok();

            gain.gain().set_value_at_time(0.0, t).ok();
            gain.gain()
                .linear_ramp_to_value_at_time(0.3 * vol, t + 0.01)
                .ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.2)
                .ok();

            osc.start_with_when(t).ok();
            osc.stop_with_when(t + 0.2).ok();
        }
    }

    impl AudioSink for WebAudio {
        fn play(&mut self, effect: SoundEffect, volume: f32) {
            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::GateChime => Self::play_gate_chime(ctx, volume),
            }
        }

        fn start_music(&mut self) {
            let Some(audio) = &self.music else { return };
            // Autoplay may be blocked until the page gets a gesture
            if let Err(err) = audio.play() {
                log::debug!("Music did not start: {err:?}");
            }
        }

        fn stop_music(&mut self) {
            if let Some(audio) = &self.music {
                audio.pause().ok();
                audio.set_current_time(0.0);
            }
        }

        fn set_music_volume(&mut self, volume: f32) {
            if let Some(audio) = &self.music {
                audio.set_volume(volume.clamp(0.0, 1.0) as f64);
            }
        }
    }
}
