//! Bug entity and spawn placement

use glam::Vec2;
use rand::Rng;

use super::geometry::{BBox, boxes_overlap, point_in_box};
use crate::consts::*;

/// Result of searching for a spawn position
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Position clear of every hand box
    Clear(Vec2),
    /// No clear position within the attempt budget; last sample is used anyway
    Fallback(Vec2),
}

impl Placement {
    pub fn pos(&self) -> Vec2 {
        match *self {
            Placement::Clear(pos) | Placement::Fallback(pos) => pos,
        }
    }

    pub fn is_clear(&self) -> bool {
        matches!(self, Placement::Clear(_))
    }
}

/// Sample one coordinate along an axis of the given extent
fn sample_axis<R: Rng>(rng: &mut R, extent: f32) -> f32 {
    let t: f32 = rng.random();
    if extent > SPAWN_MARGIN * 2.0 {
        SPAWN_MARGIN + t * (extent - SPAWN_MARGIN * 2.0)
    } else {
        t * extent.max(0.0)
    }
}

/// Find a spawn position that keeps a bug of `radius` off every hand box.
///
/// Tries up to `PLACEMENT_ATTEMPTS` samples. Hands covering most of the
/// screen must not stall the game, so the last sample is returned as a
/// fallback rather than failing.
pub fn place_bug<R: Rng>(rng: &mut R, bounds: Vec2, hands: &[BBox], radius: f32) -> Placement {
    let mut pos = Vec2::ZERO;
    for _ in 0..PLACEMENT_ATTEMPTS {
        pos = Vec2::new(sample_axis(rng, bounds.x), sample_axis(rng, bounds.y));
        if !hands.iter().any(|hand| boxes_overlap(hand, pos, radius)) {
            return Placement::Clear(pos);
        }
    }
    Placement::Fallback(pos)
}

/// A bug waiting to be squashed
#[derive(Debug, Clone)]
pub struct Bug {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    /// Spawn timestamp (ms)
    pub spawn_time: f64,
    /// Time on screen before escaping (ms)
    pub lifetime: f64,
    /// Squashed by a hand
    pub caught: bool,
    /// Escape penalty already applied
    pub processed: bool,
    /// Animation phase
    pub wiggle: f32,
}

impl Bug {
    pub fn new(id: u32, pos: Vec2, spawn_time: f64, lifetime: f64) -> Self {
        Self {
            id,
            pos,
            radius: BUG_RADIUS,
            spawn_time,
            lifetime,
            caught: false,
            processed: false,
            wiggle: 0.0,
        }
    }

    /// Spawn a bug away from the current hands with a random lifetime
    pub fn spawn<R: Rng>(id: u32, rng: &mut R, bounds: Vec2, hands: &[BBox], now: f64) -> Self {
        let placement = place_bug(rng, bounds, hands, BUG_RADIUS);
        if !placement.is_clear() {
            log::debug!(
                "No hand-free spot after {} attempts, spawning bug {} at {:?}",
                PLACEMENT_ATTEMPTS,
                id,
                placement.pos()
            );
        }
        let lifetime = rng.random_range(BUG_MIN_LIFETIME_MS..BUG_MAX_LIFETIME_MS);
        Self::new(id, placement.pos(), now, lifetime)
    }

    pub fn is_expired(&self, now: f64) -> bool {
        now - self.spawn_time > self.lifetime
    }

    /// Hand catches the bug when the bug's center lies inside the hand box
    pub fn check_collision(&self, hand: &BBox) -> bool {
        if self.caught {
            return false;
        }
        point_in_box(self.pos, hand)
    }

    /// Advance the wiggle animation, returning this frame's draw offset
    pub fn next_wiggle(&mut self) -> Vec2 {
        self.wiggle += WIGGLE_STEP;
        Vec2::new(self.wiggle.sin() * 2.0, (self.wiggle * 1.5).cos())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_placement_avoids_hands() {
        let mut rng = Pcg32::seed_from_u64(7);
        let bounds = Vec2::new(640.0, 480.0);
        // Hand covers the left half
        let hands = [BBox::new(0.0, 0.0, 320.0, 480.0)];

        for _ in 0..100 {
            let placement = place_bug(&mut rng, bounds, &hands, BUG_RADIUS);
            assert!(placement.is_clear());
            assert!(placement.pos().x - BUG_RADIUS >= 320.0);
        }
    }

    #[test]
    fn test_placement_falls_back_when_covered() {
        let mut rng = Pcg32::seed_from_u64(7);
        let bounds = Vec2::new(640.0, 480.0);
        let hands = [BBox::new(-10.0, -10.0, 700.0, 500.0)];

        let placement = place_bug(&mut rng, bounds, &hands, BUG_RADIUS);
        assert!(!placement.is_clear());
        let pos = placement.pos();
        assert!(pos.x >= SPAWN_MARGIN && pos.x <= bounds.x - SPAWN_MARGIN);
        assert!(pos.y >= SPAWN_MARGIN && pos.y <= bounds.y - SPAWN_MARGIN);
    }

    #[test]
    fn test_placement_on_tiny_surface() {
        let mut rng = Pcg32::seed_from_u64(3);
        let pos = place_bug(&mut rng, Vec2::new(40.0, 20.0), &[], BUG_RADIUS).pos();
        assert!((0.0..=40.0).contains(&pos.x));
        assert!((0.0..=20.0).contains(&pos.y));
    }

    #[test]
    fn test_spawn_lifetime_range() {
        let mut rng = Pcg32::seed_from_u64(11);
        for id in 0..200 {
            let bug = Bug::spawn(id, &mut rng, Vec2::new(800.0, 600.0), &[], 0.0);
            assert!(bug.lifetime >= BUG_MIN_LIFETIME_MS && bug.lifetime < BUG_MAX_LIFETIME_MS);
            assert_eq!(bug.radius, BUG_RADIUS);
            assert!(!bug.caught && !bug.processed);
        }
    }

    #[test]
    fn test_expiry_is_strict() {
        let bug = Bug::new(1, Vec2::new(100.0, 100.0), 0.0, 1000.0);
        assert!(!bug.is_expired(1000.0));
        assert!(bug.is_expired(1001.0));
    }

    #[test]
    fn test_collision_uses_center_point() {
        let mut bug = Bug::new(1, Vec2::new(100.0, 100.0), 0.0, 1000.0);
        assert!(bug.check_collision(&BBox::new(80.0, 80.0, 60.0, 60.0)));

        // Box overlaps the body but not the center
        assert!(!bug.check_collision(&BBox::new(110.0, 80.0, 60.0, 60.0)));

        bug.caught = true;
        assert!(!bug.check_collision(&BBox::new(80.0, 80.0, 60.0, 60.0)));
    }

    #[test]
    fn test_wiggle_advances() {
        let mut bug = Bug::new(1, Vec2::ZERO, 0.0, 1000.0);
        let offset = bug.next_wiggle();
        assert!((bug.wiggle - WIGGLE_STEP).abs() < 1e-6);
        assert!(offset.x.abs() <= 2.0 && offset.y.abs() <= 1.0);
    }
}
