//! Bug Squash - a webcam hand tracking arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bugs, splashes, scoring, restart hold)
//! - `renderer`: Drawing surface abstraction and scene painter
//! - `audio`: Sound effects and background music
//! - `detection`: Hand model input/output contract
//! - `driver`: Per-frame glue between detections, simulation, audio and rendering
//! - `platform`: Browser bindings (hand model, animation frames, clock)

pub mod audio;
pub mod detection;
pub mod driver;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use driver::FrameDriver;
pub use error::{GameError, Result};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Bug body radius (pixels)
    pub const BUG_RADIUS: f32 = 25.0;
    /// Bug lifetime range (ms), sampled uniformly in [min, max)
    pub const BUG_MIN_LIFETIME_MS: f64 = 300.0;
    pub const BUG_MAX_LIFETIME_MS: f64 = 4000.0;
    /// Keep spawned bugs this far from the surface edges
    pub const SPAWN_MARGIN: f32 = 30.0;
    /// Placement samples tried before settling for an overlapping position
    pub const PLACEMENT_ATTEMPTS: u32 = 50;
    /// Wiggle animation phase step per rendered frame
    pub const WIGGLE_STEP: f32 = 0.3;

    /// Expected bug spawns per second (0.8% per frame at 60 Hz)
    pub const SPAWN_RATE_PER_SEC: f64 = 0.008 * 60.0;
    /// Nominal frame duration used for the very first step (ms)
    pub const NOMINAL_FRAME_MS: f64 = 1000.0 / 60.0;
    /// Longest gap between steps that counts toward spawning (ms)
    pub const MAX_STEP_MS: f64 = 250.0;

    /// Misses allowed before the run ends
    pub const MAX_MISSES: u32 = 3;

    /// Splash defaults
    pub const SPLASH_LIFETIME_MS: f64 = 800.0;
    pub const SPLASH_PARTICLES: usize = 8;
    /// Particle velocity components are uniform in [-max, max)
    pub const PARTICLE_MAX_SPEED: f32 = 4.0;
    pub const PARTICLE_MIN_SIZE: f32 = 3.0;
    pub const PARTICLE_MAX_SIZE: f32 = 9.0;
    /// Per-update gravity added to vertical velocity
    pub const PARTICLE_GRAVITY: f32 = 0.2;
    /// Per-update velocity multiplier (air resistance)
    pub const PARTICLE_DRAG: f32 = 0.98;
    /// Per-update size multiplier
    pub const PARTICLE_SHRINK: f32 = 0.99;

    /// Restart button (centered horizontally, below screen center)
    pub const RESTART_HOLD_MS: f64 = 5000.0;
    pub const BUTTON_WIDTH: f32 = 160.0;
    pub const BUTTON_HEIGHT: f32 = 50.0;
    pub const BUTTON_OFFSET_Y: f32 = 40.0;

    /// Model class id reserved for faces
    pub const FACE_CLASS: i32 = 5;
}
