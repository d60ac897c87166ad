//! Scene painter
//!
//! Z-order while playing: bugs, splashes, debug hand boxes, HUD.

use glam::Vec2;

use super::{Surface, TextAlign, TextStyle};
use crate::consts::MAX_MISSES;
use crate::detection::Detection;
use crate::sim::{BBox, Bug, GameState, Splash, restart_button};

const BUG_BODY: &str = "#FF4444";
const BUG_OUTLINE: &str = "#CC0000";
const BUG_HEAD: &str = "#AA0000";
const BLACK: &str = "#000000";
const HAND_BOX: &str = "#00ff00";
const BUTTON: &str = "#4CAF50";
const BUTTON_HELD: &str = "#45a049";
const BUTTON_PROGRESS: &str = "#2E7D32";

const HUD_STYLE: TextStyle = TextStyle {
    font: "bold 24px Arial",
    fill: "#FFFFFF",
    stroke: Some((BLACK, 2.0)),
    align: TextAlign::Left,
};

/// Paint one frame for the current state
pub fn draw_frame<S: Surface>(
    surface: &mut S,
    state: &mut GameState,
    hands: &[Detection],
    debug: bool,
    now: f64,
) {
    surface.clear();

    if state.is_game_over() {
        draw_game_over(surface, state, now);
        if debug {
            for hand in hands {
                surface.stroke_rect(hand.bbox(), HAND_BOX, 4.0);
            }
        }
        return;
    }

    for bug in state.bugs.iter_mut().filter(|b| !b.caught) {
        draw_bug(surface, bug);
    }
    for splash in &state.splashes {
        draw_splash(surface, splash);
    }
    if debug {
        for hand in hands {
            draw_hand(surface, hand);
        }
    }
    draw_hud(surface, state);
}

/// Bug with body, head, antennae, legs and eyes, offset by its wiggle
pub fn draw_bug<S: Surface>(surface: &mut S, bug: &mut Bug) {
    let wiggle = bug.next_wiggle();
    let r = bug.radius;
    let c = bug.pos + wiggle;

    surface.fill_ellipse(c, Vec2::new(r, r * 0.7), BUG_BODY, Some((BUG_OUTLINE, 2.0)));
    surface.fill_circle(Vec2::new(c.x, c.y - r * 0.5), r * 0.4, BUG_HEAD);

    // Antennae
    for side in [-1.0, 1.0] {
        surface.line(
            Vec2::new(c.x + side * 8.0, c.y - r * 0.7),
            Vec2::new(c.x + side * 12.0, c.y - r * 0.9),
            BLACK,
            2.0,
        );
    }

    // Legs, three per side
    for i in 0..3 {
        let leg_y = c.y - r * 0.2 + i as f32 * r * 0.3;
        for side in [-1.0, 1.0] {
            surface.line(
                Vec2::new(c.x + side * r * 0.8, leg_y),
                Vec2::new(c.x + side * r * 1.2, leg_y + 5.0),
                BLACK,
                1.0,
            );
        }
    }

    // Eyes
    for side in [-1.0, 1.0] {
        surface.fill_circle(Vec2::new(c.x + side * 5.0, c.y - r * 0.5), 2.0, BLACK);
    }
}

pub fn draw_splash<S: Surface>(surface: &mut S, splash: &Splash) {
    for particle in splash.particles.iter().filter(|p| p.life > 0.0) {
        surface.save();
        surface.set_alpha(particle.life);
        surface.fill_circle(particle.pos, particle.size, particle.color.hex());
        surface.restore();
    }
}

/// Debug overlay: hand box and model label
fn draw_hand<S: Surface>(surface: &mut S, hand: &Detection) {
    let bbox = hand.bbox();
    surface.stroke_rect(bbox, HAND_BOX, 4.0);
    let label_y = if bbox.y > 10.0 { bbox.y - 5.0 } else { 10.0 };
    surface.text(
        &hand.label(),
        Vec2::new(bbox.x, label_y),
        &TextStyle {
            font: "16px Arial",
            fill: HAND_BOX,
            stroke: None,
            align: TextAlign::Left,
        },
    );
}

fn draw_hud<S: Surface>(surface: &mut S, state: &GameState) {
    surface.text(
        &format!("Bugs Caught: {}", state.score),
        Vec2::new(20.0, 40.0),
        &HUD_STYLE,
    );
    surface.text(
        &format!("Missed: {}/{}", state.missed, MAX_MISSES),
        Vec2::new(20.0, 80.0),
        &TextStyle {
            fill: "#FF4444",
            ..HUD_STYLE
        },
    );
}

fn draw_game_over<S: Surface>(surface: &mut S, state: &GameState, now: f64) {
    let size = surface.size();
    let center = size / 2.0;

    surface.fill_rect(BBox::new(0.0, 0.0, size.x, size.y), "rgba(0, 0, 0, 0.8)");

    let title = TextStyle {
        font: "bold 48px Arial",
        fill: "#FF4444",
        stroke: Some((BLACK, 3.0)),
        align: TextAlign::Center,
    };
    surface.text("GAME OVER", Vec2::new(center.x, center.y - 100.0), &title);

    let stats = TextStyle {
        font: "bold 32px Arial",
        fill: "#FFFFFF",
        stroke: Some((BLACK, 2.0)),
        align: TextAlign::Center,
    };
    surface.text(
        &format!("Final Score: {}", state.score),
        Vec2::new(center.x, center.y - 40.0),
        &stats,
    );
    surface.text(
        &format!("Bugs Missed: {}", state.missed),
        Vec2::new(center.x, center.y),
        &stats,
    );

    // Play Again button with hold progress
    let button = restart_button(size);
    let hold = state.restart_hold;
    let holding = hold.is_active();

    surface.fill_rect(button, if holding { BUTTON_HELD } else { BUTTON });
    surface.stroke_rect(button, BUTTON_HELD, 3.0);

    let progress = hold.progress(now);
    if holding && progress > 0.0 {
        let mut filled = button;
        filled.width *= progress;
        surface.fill_rect(filled, BUTTON_PROGRESS);
    }

    let label = if holding {
        format!("HOLD ({}s)", hold.remaining_secs(now))
    } else {
        "PLAY AGAIN".to_string()
    };
    surface.text(
        &label,
        Vec2::new(center.x, button.y + 32.0),
        &TextStyle {
            font: "bold 20px Arial",
            fill: "#FFFFFF",
            stroke: Some((BLACK, 2.0)),
            align: TextAlign::Center,
        },
    );

    surface.text(
        "Hold your hand over the button for 5 seconds",
        Vec2::new(center.x, button.y + 75.0),
        &TextStyle {
            font: "16px Arial",
            fill: "#CCCCCC",
            stroke: Some((BLACK, 1.0)),
            align: TextAlign::Center,
        },
    );
}
