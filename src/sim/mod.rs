//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform dependencies:
//! - Time comes in through `TickInput`
//! - Seeded RNG only
//! - Hands arrive as plain boxes

pub mod bug;
pub mod geometry;
pub mod splash;
pub mod state;
pub mod tick;

pub use bug::{Bug, Placement, place_bug};
pub use geometry::{BBox, boxes_overlap, point_in_box, restart_button};
pub use splash::{Particle, Splash, SplashColor};
pub use state::{GameEvent, GamePhase, GameState, RestartHold};
pub use tick::{TickInput, spawn_chance, tick};
