//! Audio system
//!
//! Squash clip, procedurally generated buzzes and looping background music.
//! Playback is best effort: callers log failures and carry on.

use crate::error::Result;

/// Squash sound clip
pub const CATCH_CLIP: &str = "bugsmash.mp3";
/// Background music loop
pub const MUSIC_CLIP: &str = "bgmusic.mp3";

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

/// A single enveloped oscillator note
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    /// Hz
    pub frequency: f32,
    /// Seconds
    pub duration: f64,
    pub waveform: Waveform,
    /// Peak gain (0.0 - 1.0)
    pub volume: f32,
    /// Seconds from now before the note starts
    pub delay: f64,
}

impl Tone {
    pub fn new(frequency: f32, duration: f64, waveform: Waveform, volume: f32) -> Self {
        Self {
            frequency,
            duration,
            waveform,
            volume,
            delay: 0.0,
        }
    }

    pub fn delayed(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }
}

/// Audio output capability
pub trait AudioSink {
    fn play_tone(&self, tone: Tone) -> Result<()>;
    fn play_clip(&self, clip: &str, volume: f32) -> Result<()>;
    fn start_loop(&mut self, clip: &str) -> Result<()>;
    fn stop_loop(&mut self) -> Result<()>;
}

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Bug squashed by a hand
    BugCaught,
    /// Bug appeared
    BugSpawn,
    /// Bug got away
    BugEscaped,
}

impl SoundEffect {
    /// Play this effect at the given effect volume
    pub fn play<A: AudioSink + ?Sized>(&self, sink: &A, volume: f32) -> Result<()> {
        if volume <= 0.0 {
            return Ok(());
        }
        match self {
            SoundEffect::BugCaught => sink.play_clip(CATCH_CLIP, 0.5 * volume),
            SoundEffect::BugSpawn => {
                sink.play_tone(Tone::new(300.0, 0.3, Waveform::Sawtooth, 0.15 * volume))
            }
            SoundEffect::BugEscaped => {
                sink.play_tone(Tone::new(250.0, 0.4, Waveform::Sawtooth, 0.2 * volume))?;
                sink.play_tone(
                    Tone::new(280.0, 0.3, Waveform::Sawtooth, 0.15 * volume).delayed(0.2),
                )
            }
        }
    }
}

/// No-op output for native runs
#[derive(Debug, Default)]
pub struct SilentAudio {
    looping: Option<String>,
}

impl SilentAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_looping(&self) -> bool {
        self.looping.is_some()
    }
}

impl AudioSink for SilentAudio {
    fn play_tone(&self, tone: Tone) -> Result<()> {
        log::trace!("tone {:?}", tone);
        Ok(())
    }

    fn play_clip(&self, clip: &str, volume: f32) -> Result<()> {
        log::trace!("clip {} at {:.2}", clip, volume);
        Ok(())
    }

    fn start_loop(&mut self, clip: &str) -> Result<()> {
        self.looping = Some(clip.to_string());
        Ok(())
    }

    fn stop_loop(&mut self) -> Result<()> {
        self.looping = None;
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{AudioContext, GainNode, HtmlAudioElement, OscillatorNode, OscillatorType};

    use super::{AudioSink, Tone, Waveform};
    use crate::error::{GameError, Result, js_message};

    fn audio_err(e: wasm_bindgen::JsValue) -> GameError {
        GameError::Audio(js_message(&e))
    }

    /// Await a media `play()` promise in the background, logging rejection
    fn detach_play(promise: js_sys::Promise, what: String) {
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                log::warn!("Could not play {}: {}", what, js_message(&e));
            }
        });
    }

    /// Web Audio API output
    pub struct WebAudio {
        ctx: Option<AudioContext>,
        music: Option<HtmlAudioElement>,
        music_volume: f32,
    }

    impl WebAudio {
        pub fn new(music_volume: f32) -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Web Audio API not supported - tones disabled");
            }
            Self {
                ctx,
                music: None,
                music_volume,
            }
        }

        /// Create an oscillator routed through a gain node
        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Result<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().map_err(audio_err)?;
            let gain = ctx.create_gain().map_err(audio_err)?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).map_err(audio_err)?;
            gain.connect_with_audio_node(&ctx.destination())
                .map_err(audio_err)?;

            Ok((osc, gain))
        }
    }

    impl AudioSink for WebAudio {
        fn play_tone(&self, tone: Tone) -> Result<()> {
            let Some(ctx) = &self.ctx else {
                return Err(GameError::Audio("no audio context".into()));
            };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            let osc_type = match tone.waveform {
                Waveform::Sine => OscillatorType::Sine,
                Waveform::Square => OscillatorType::Square,
                Waveform::Sawtooth => OscillatorType::Sawtooth,
                Waveform::Triangle => OscillatorType::Triangle,
            };
            let (osc, gain) = self.create_osc(ctx, tone.frequency, osc_type)?;
            let t = ctx.current_time() + tone.delay;

            // Quick attack, exponential decay
            gain.gain().set_value_at_time(0.0, t).map_err(audio_err)?;
            gain.gain()
                .linear_ramp_to_value_at_time(tone.volume, t + 0.01)
                .map_err(audio_err)?;
            gain.gain()
                .exponential_ramp_to_value_at_time(0.001, t + tone.duration)
                .map_err(audio_err)?;

            osc.start_with_when(t).map_err(audio_err)?;
            osc.stop_with_when(t + tone.duration).map_err(audio_err)?;
            Ok(())
        }

        fn play_clip(&self, clip: &str, volume: f32) -> Result<()> {
            let audio = HtmlAudioElement::new_with_src(clip).map_err(audio_err)?;
            audio.set_volume(volume.clamp(0.0, 1.0) as f64);
            let promise = audio.play().map_err(audio_err)?;
            detach_play(promise, clip.to_string());
            Ok(())
        }

        fn start_loop(&mut self, clip: &str) -> Result<()> {
            if self.music.is_none() {
                let music = HtmlAudioElement::new_with_src(clip).map_err(audio_err)?;
                music.set_loop(true);
                music.set_volume(self.music_volume.clamp(0.0, 1.0) as f64);
                self.music = Some(music);
            }
            if let Some(music) = &self.music {
                let promise = music.play().map_err(audio_err)?;
                detach_play(promise, "background music".to_string());
            }
            Ok(())
        }

        fn stop_loop(&mut self) -> Result<()> {
            if let Some(music) = &self.music {
                music.pause().map_err(audio_err)?;
                music.set_current_time(0.0);
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        tones: RefCell<Vec<Tone>>,
        clips: RefCell<Vec<(String, f32)>>,
    }

    impl AudioSink for Recorder {
        fn play_tone(&self, tone: Tone) -> Result<()> {
            self.tones.borrow_mut().push(tone);
            Ok(())
        }

        fn play_clip(&self, clip: &str, volume: f32) -> Result<()> {
            self.clips.borrow_mut().push((clip.to_string(), volume));
            Ok(())
        }

        fn start_loop(&mut self, _clip: &str) -> Result<()> {
            Ok(())
        }

        fn stop_loop(&mut self) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_catch_plays_clip() {
        let sink = Recorder::default();
        SoundEffect::BugCaught.play(&sink, 1.0).unwrap();
        assert_eq!(*sink.clips.borrow(), vec![(CATCH_CLIP.to_string(), 0.5)]);
        assert!(sink.tones.borrow().is_empty());
    }

    #[test]
    fn test_escape_buzz_is_two_tones() {
        let sink = Recorder::default();
        SoundEffect::BugEscaped.play(&sink, 1.0).unwrap();
        let tones = sink.tones.borrow();
        assert_eq!(tones.len(), 2);
        assert_eq!(tones[0], Tone::new(250.0, 0.4, Waveform::Sawtooth, 0.2));
        assert_eq!(tones[1].frequency, 280.0);
        assert_eq!(tones[1].delay, 0.2);
    }

    #[test]
    fn test_spawn_buzz_scales_with_volume() {
        let sink = Recorder::default();
        SoundEffect::BugSpawn.play(&sink, 0.5).unwrap();
        assert_eq!(sink.tones.borrow()[0].volume, 0.075);
    }

    #[test]
    fn test_muted_plays_nothing() {
        let sink = Recorder::default();
        SoundEffect::BugCaught.play(&sink, 0.0).unwrap();
        SoundEffect::BugEscaped.play(&sink, 0.0).unwrap();
        assert!(sink.clips.borrow().is_empty() && sink.tones.borrow().is_empty());
    }

    #[test]
    fn test_silent_audio_tracks_loop() {
        let mut audio = SilentAudio::new();
        audio.start_loop(MUSIC_CLIP).unwrap();
        assert!(audio.is_looping());
        audio.stop_loop().unwrap();
        assert!(!audio.is_looping());
    }
}
