//! Per-frame simulation step
//!
//! Core game loop that advances the state once per detection result.

use rand::Rng;

use super::bug::Bug;
use super::geometry::{BBox, restart_button};
use super::splash::Splash;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Input for a single step
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Current timestamp (ms)
    pub now: f64,
    /// Hand boxes for this frame (faces already removed)
    pub hands: Vec<BBox>,
}

/// Real time covered by this step (ms), capped so a stalled tab doesn't
/// flood the screen when it resumes
fn step_duration(last_step: Option<f64>, now: f64) -> f64 {
    match last_step {
        Some(prev) => (now - prev).clamp(0.0, MAX_STEP_MS),
        None => NOMINAL_FRAME_MS,
    }
}

/// Probability of at least one spawn in `dt_ms` for a Poisson process of `rate_per_sec`
pub fn spawn_chance(rate_per_sec: f64, dt_ms: f64) -> f64 {
    (1.0 - (-rate_per_sec * dt_ms / 1000.0).exp()).clamp(0.0, 1.0)
}

/// Advance the game state by one frame and report what happened
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let now = input.now;
    let dt = step_duration(state.last_step, now);
    state.last_step = Some(now);

    let mut events = Vec::new();

    if state.phase == GamePhase::GameOver {
        update_restart_hold(state, &input.hands, now, &mut events);
        return events;
    }

    // Spawn
    let chance = spawn_chance(state.spawn_rate, dt);
    if state.rng().random_bool(chance) {
        let bounds = state.bounds;
        let id = state.next_entity_id();
        let bug = Bug::spawn(id, state.rng(), bounds, &input.hands, now);
        events.push(GameEvent::BugSpawned { pos: bug.pos });
        state.bugs.push(bug);
    }

    // Escapes
    for bug in &mut state.bugs {
        if bug.caught || bug.processed || !bug.is_expired(now) {
            continue;
        }
        state.score = state.score.saturating_sub(1);
        state.missed += 1;
        bug.processed = true;
        events.push(GameEvent::BugEscaped);

        if state.missed >= MAX_MISSES {
            state.phase = GamePhase::GameOver;
            break;
        }
    }

    state.bugs.retain(|bug| !bug.caught && !bug.is_expired(now));

    // Splashes
    for splash in &mut state.splashes {
        splash.update(now);
    }
    state.splashes.retain(|splash| !splash.is_expired(now));

    // The step began in Playing, so hands still score on the step that ends the run
    check_catches(state, &input.hands, now, &mut events);

    if state.phase == GamePhase::GameOver {
        events.push(GameEvent::GameOver { score: state.score });
    }

    events
}

/// Hands outer, bugs inner. `check_collision` ignores caught bugs, so a bug
/// under two hands only scores once.
fn check_catches(state: &mut GameState, hands: &[BBox], now: f64, events: &mut Vec<GameEvent>) {
    let mut squashed = Vec::new();
    for hand in hands {
        for bug in &mut state.bugs {
            if bug.check_collision(hand) {
                bug.caught = true;
                squashed.push(bug.pos);
            }
        }
    }

    for pos in squashed {
        state.score += 1;
        let splash = Splash::new(state.rng(), pos, now);
        state.splashes.push(splash);
        events.push(GameEvent::BugCaught { pos });
    }
}

/// Any hand on the button keeps the hold going; none cancels it
fn update_restart_hold(
    state: &mut GameState,
    hands: &[BBox],
    now: f64,
    events: &mut Vec<GameEvent>,
) {
    let button = restart_button(state.bounds);
    let over = hands.iter().any(|hand| hand.overlaps(&button));

    if !over {
        if state.restart_hold.is_active() {
            state.restart_hold.cancel();
            events.push(GameEvent::HoldCancelled);
        }
        return;
    }

    if !state.restart_hold.is_active() {
        state.restart_hold.started_at = Some(now);
        events.push(GameEvent::HoldStarted);
    }

    if state.restart_hold.elapsed(now) >= RESTART_HOLD_MS {
        state.reset();
        events.push(GameEvent::Restarted);
    }
}
