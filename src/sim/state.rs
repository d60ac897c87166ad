//! Game state and core simulation types
//!
//! Everything the frame step reads or writes lives in `GameState`, so the
//! step can be driven from tests without a canvas or a clock.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::bug::Bug;
use super::splash::Splash;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Bugs spawning, hands squashing
    Playing,
    /// Run ended, waiting for the restart hold
    GameOver,
}

/// Things that happened during a step, for audio and logging
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    BugSpawned { pos: Vec2 },
    BugCaught { pos: Vec2 },
    BugEscaped,
    GameOver { score: u32 },
    HoldStarted,
    HoldCancelled,
    Restarted,
}

/// Dwell timer for the "Play Again" button
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RestartHold {
    /// When the current hold began (ms), if a hand is on the button
    pub started_at: Option<f64>,
}

impl RestartHold {
    pub fn is_active(&self) -> bool {
        self.started_at.is_some()
    }

    /// Time held so far (ms)
    pub fn elapsed(&self, now: f64) -> f64 {
        self.started_at.map(|start| now - start).unwrap_or(0.0)
    }

    /// Hold completion in [0, 1]
    pub fn progress(&self, now: f64) -> f32 {
        (self.elapsed(now) / RESTART_HOLD_MS).clamp(0.0, 1.0) as f32
    }

    /// Whole seconds left, rounded up
    pub fn remaining_secs(&self, now: f64) -> u32 {
        ((RESTART_HOLD_MS - self.elapsed(now)) / 1000.0).ceil().max(0.0) as u32
    }

    pub fn cancel(&mut self) {
        self.started_at = None;
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Bugs caught minus bugs escaped, never below zero
    pub score: u32,
    /// Bugs that escaped this run
    pub missed: u32,
    pub phase: GamePhase,
    /// Active bugs
    pub bugs: Vec<Bug>,
    /// Active splash effects
    pub splashes: Vec<Splash>,
    pub restart_hold: RestartHold,
    /// Drawing surface size in pixels
    pub bounds: Vec2,
    /// Expected bug spawns per second
    pub spawn_rate: f64,
    /// Timestamp of the previous step (ms)
    pub last_step: Option<f64>,
    rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64, bounds: Vec2) -> Self {
        Self {
            score: 0,
            missed: 0,
            phase: GamePhase::Playing,
            bugs: Vec::new(),
            splashes: Vec::new(),
            restart_hold: RestartHold::default(),
            bounds,
            spawn_rate: SPAWN_RATE_PER_SEC,
            last_step: None,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Insert a bug at a known position (scripted sessions and tests)
    pub fn add_bug(&mut self, pos: Vec2, now: f64, lifetime: f64) -> u32 {
        let id = self.next_entity_id();
        self.bugs.push(Bug::new(id, pos, now, lifetime));
        id
    }

    /// Start a fresh run, keeping surface size, spawn rate and RNG stream
    pub fn reset(&mut self) {
        self.score = 0;
        self.missed = 0;
        self.phase = GamePhase::Playing;
        self.bugs.clear();
        self.splashes.clear();
        self.restart_hold.cancel();
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = GameState::new(1, Vec2::new(640.0, 480.0));
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.missed, 0);
        assert!(state.bugs.is_empty() && state.splashes.is_empty());
        assert!(!state.restart_hold.is_active());
    }

    #[test]
    fn test_entity_ids_increase() {
        let mut state = GameState::new(1, Vec2::new(640.0, 480.0));
        let a = state.add_bug(Vec2::new(10.0, 10.0), 0.0, 1000.0);
        let b = state.add_bug(Vec2::new(20.0, 20.0), 0.0, 1000.0);
        assert!(b > a);
    }

    #[test]
    fn test_reset_clears_run() {
        let mut state = GameState::new(1, Vec2::new(640.0, 480.0));
        state.add_bug(Vec2::new(10.0, 10.0), 0.0, 1000.0);
        state.score = 4;
        state.missed = 3;
        state.phase = GamePhase::GameOver;
        state.restart_hold.started_at = Some(10.0);

        state.reset();
        assert_eq!(state.score, 0);
        assert_eq!(state.missed, 0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.bugs.is_empty());
        assert!(!state.restart_hold.is_active());
    }

    #[test]
    fn test_restart_hold_progress() {
        let hold = RestartHold {
            started_at: Some(1000.0),
        };
        assert_eq!(hold.progress(1000.0), 0.0);
        assert!((hold.progress(3500.0) - 0.5).abs() < 1e-6);
        assert_eq!(hold.progress(9000.0), 1.0);
        assert_eq!(hold.remaining_secs(1000.0), 5);
        assert_eq!(hold.remaining_secs(1001.0), 5);
        assert_eq!(hold.remaining_secs(5000.0), 1);
        assert_eq!(RestartHold::default().progress(1000.0), 0.0);
    }
}
