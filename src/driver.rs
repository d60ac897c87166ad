//! Frame driver
//!
//! Glue between the detection model, the simulation, audio and the screen.
//! One call to `on_detections` is one frame.

use crate::audio::{AudioSink, MUSIC_CLIP, SoundEffect};
use crate::detection::{Detection, hand_boxes, hand_detections};
use crate::error::Result;
use crate::renderer::{Surface, draw_frame};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, TickInput, tick};

const FPS_WINDOW: usize = 60;

/// Owns the game and everything it draws to or plays through
pub struct FrameDriver<S: Surface, A: AudioSink> {
    state: GameState,
    surface: S,
    audio: A,
    settings: Settings,
    // FPS tracking
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    fps: u32,
}

impl<S: Surface, A: AudioSink> FrameDriver<S, A> {
    pub fn new(surface: S, audio: A, settings: Settings, seed: u64) -> Self {
        let mut state = GameState::new(seed, surface.size());
        state.spawn_rate = settings.spawn_rate_per_sec;
        Self {
            state,
            surface,
            audio,
            settings,
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            fps: 0,
        }
    }

    /// Start the background music
    pub fn start(&mut self) {
        if let Err(e) = self.audio.start_loop(MUSIC_CLIP) {
            log::warn!("Background music unavailable: {}", e);
        }
    }

    /// Run one frame from the model's output
    pub fn on_detections(&mut self, result: Result<Vec<Detection>>, now: f64) {
        let detections = match result {
            Ok(detections) => detections,
            Err(e) => {
                log::warn!("Skipping frame: {}", e);
                return;
            }
        };

        if self.settings.debug && !detections.is_empty() {
            log::debug!("Raw predictions found: {}", detections.len());
        }

        self.track_fps(now);
        self.state.bounds = self.surface.size();

        let hands = hand_detections(&detections);
        let input = TickInput {
            now,
            hands: hand_boxes(&detections),
        };
        let events = tick(&mut self.state, &input);
        for event in &events {
            self.dispatch(event);
        }

        draw_frame(
            &mut self.surface,
            &mut self.state,
            &hands,
            self.settings.debug,
            now,
        );
    }

    fn dispatch(&mut self, event: &GameEvent) {
        let volume = self.settings.effective_sfx_volume();
        let outcome = match event {
            GameEvent::BugSpawned { pos } => {
                log::debug!("Bug spawned at ({:.0}, {:.0})", pos.x, pos.y);
                if self.settings.spawn_sound {
                    SoundEffect::BugSpawn.play(&self.audio, volume)
                } else {
                    Ok(())
                }
            }
            GameEvent::BugCaught { pos } => {
                log::info!(
                    "Bug squashed at ({:.0}, {:.0}) - score {}",
                    pos.x,
                    pos.y,
                    self.state.score
                );
                SoundEffect::BugCaught.play(&self.audio, volume)
            }
            GameEvent::BugEscaped => {
                log::info!(
                    "Bug escaped - score {}, missed {}",
                    self.state.score,
                    self.state.missed
                );
                if self.settings.escape_sound {
                    SoundEffect::BugEscaped.play(&self.audio, volume)
                } else {
                    Ok(())
                }
            }
            GameEvent::GameOver { score } => {
                log::info!("Game over - final score {}", score);
                self.audio.stop_loop()
            }
            GameEvent::HoldStarted => {
                log::info!("Restart hold started");
                Ok(())
            }
            GameEvent::HoldCancelled => {
                log::info!("Restart hold cancelled");
                Ok(())
            }
            GameEvent::Restarted => {
                log::info!("Game restarted");
                self.audio.start_loop(MUSIC_CLIP)
            }
        };
        if let Err(e) = outcome {
            log::warn!("{}", e);
        }
    }

    /// Calculate FPS from oldest to newest frame
    fn track_fps(&mut self, now: f64) {
        self.frame_times[self.frame_index] = now;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;

        let oldest_time = self.frame_times[self.frame_index];
        if oldest_time > 0.0 {
            let elapsed = now - oldest_time;
            if elapsed > 0.0 {
                self.fps = ((FPS_WINDOW - 1) as f64 * 1000.0 / elapsed).round() as u32;
            }
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::Tone;
    use crate::error::GameError;
    use crate::consts::FACE_CLASS;
    use crate::renderer::RecordingSurface;
    use crate::sim::GamePhase;
    use glam::Vec2;
    use std::cell::RefCell;

    #[derive(Default)]
    struct TestAudio {
        fail: bool,
        clips: RefCell<Vec<String>>,
        tones: RefCell<Vec<Tone>>,
        loop_starts: u32,
        loop_stops: u32,
    }

    impl TestAudio {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        fn check(&self) -> Result<()> {
            if self.fail {
                Err(GameError::Audio("blocked by autoplay policy".into()))
            } else {
                Ok(())
            }
        }
    }

    impl AudioSink for TestAudio {
        fn play_tone(&self, tone: Tone) -> Result<()> {
            self.tones.borrow_mut().push(tone);
            self.check()
        }

        fn play_clip(&self, clip: &str, _volume: f32) -> Result<()> {
            self.clips.borrow_mut().push(clip.to_string());
            self.check()
        }

        fn start_loop(&mut self, _clip: &str) -> Result<()> {
            self.loop_starts += 1;
            self.check()
        }

        fn stop_loop(&mut self) -> Result<()> {
            self.loop_stops += 1;
            self.check()
        }
    }

    fn driver(audio: TestAudio) -> FrameDriver<RecordingSurface, TestAudio> {
        let mut settings = Settings::default();
        settings.spawn_rate_per_sec = 0.0;
        FrameDriver::new(RecordingSurface::new(640.0, 480.0), audio, settings, 7)
    }

    fn hand_over(pos: Vec2) -> Detection {
        Detection::new(1, 0.9, [pos.x - 30.0, pos.y - 30.0, 60.0, 60.0])
    }

    #[test]
    fn test_detection_error_skips_frame() {
        let mut d = driver(TestAudio::default());
        d.state_mut().add_bug(Vec2::new(100.0, 100.0), 0.0, 1000.0);

        d.on_detections(Err(GameError::Detection("model busy".into())), 16.0);
        assert_eq!(d.state().bugs.len(), 1);
        assert!(d.surface().ops.is_empty());

        // Next good frame proceeds normally
        d.on_detections(Ok(vec![]), 33.0);
        assert!(!d.surface().ops.is_empty());
    }

    #[test]
    fn test_catch_plays_squash() {
        let mut d = driver(TestAudio::default());
        let pos = Vec2::new(200.0, 200.0);
        d.state_mut().add_bug(pos, 0.0, 4000.0);

        d.on_detections(Ok(vec![hand_over(pos)]), 16.0);
        assert_eq!(d.state().score, 1);
        assert_eq!(*d.audio().clips.borrow(), vec!["bugsmash.mp3".to_string()]);
    }

    #[test]
    fn test_faces_never_catch() {
        let mut d = driver(TestAudio::default());
        let pos = Vec2::new(200.0, 200.0);
        d.state_mut().add_bug(pos, 0.0, 4000.0);

        let mut face = hand_over(pos);
        face.class_id = FACE_CLASS;
        d.on_detections(Ok(vec![face]), 16.0);
        assert_eq!(d.state().score, 0);
    }

    #[test]
    fn test_audio_failure_does_not_change_state() {
        let mut quiet = driver(TestAudio::default());
        let mut broken = driver(TestAudio::failing());
        let pos = Vec2::new(200.0, 200.0);
        for d in [&mut quiet, &mut broken] {
            d.start();
            d.state_mut().add_bug(pos, 0.0, 4000.0);
            d.on_detections(Ok(vec![hand_over(pos)]), 16.0);
        }
        assert_eq!(quiet.state().score, broken.state().score);
        assert_eq!(quiet.surface().frame(), broken.surface().frame());
    }

    #[test]
    fn test_game_over_stops_music_and_restart_resumes() {
        let mut d = driver(TestAudio::default());
        d.start();
        assert_eq!(d.audio().loop_starts, 1);

        for i in 0..3 {
            d.state_mut().add_bug(Vec2::new(100.0 + i as f32 * 100.0, 100.0), 0.0, 300.0);
        }
        d.on_detections(Ok(vec![]), 400.0);
        assert_eq!(d.state().phase, GamePhase::GameOver);
        assert_eq!(d.audio().loop_stops, 1);

        let button = crate::sim::restart_button(d.state().bounds);
        let hand = Detection::new(1, 0.9, [button.x, button.y, button.width, button.height]);
        d.on_detections(Ok(vec![hand.clone()]), 1000.0);
        d.on_detections(Ok(vec![hand]), 6000.0);
        assert_eq!(d.state().phase, GamePhase::Playing);
        assert_eq!(d.audio().loop_starts, 2);
    }

    #[test]
    fn test_escape_sound_needs_setting() {
        let mut d = driver(TestAudio::default());
        d.state_mut().add_bug(Vec2::new(100.0, 100.0), 0.0, 300.0);
        d.on_detections(Ok(vec![]), 400.0);
        assert!(d.audio().tones.borrow().is_empty());

        let mut settings = Settings::default();
        settings.spawn_rate_per_sec = 0.0;
        settings.escape_sound = true;
        let mut d = FrameDriver::new(
            RecordingSurface::new(640.0, 480.0),
            TestAudio::default(),
            settings,
            7,
        );
        d.state_mut().add_bug(Vec2::new(100.0, 100.0), 0.0, 300.0);
        d.on_detections(Ok(vec![]), 400.0);
        assert_eq!(d.audio().tones.borrow().len(), 2);
    }

    #[test]
    fn test_bounds_follow_surface() {
        let mut d = driver(TestAudio::default());
        d.surface_mut().resize(1280.0, 720.0);
        d.on_detections(Ok(vec![]), 16.0);
        assert_eq!(d.state().bounds, Vec2::new(1280.0, 720.0));
    }

    #[test]
    fn test_fps_over_window() {
        let mut d = driver(TestAudio::default());
        for i in 1..=120 {
            d.on_detections(Ok(vec![]), i as f64 * 1000.0 / 30.0);
        }
        assert_eq!(d.fps(), 30);
    }
}
