//! Splash particle burst shown when a bug is squashed
//!
//! Particles integrate once per update call. Fading is driven by the splash
//! age, so every particle in a splash shares the same `life`.

use glam::Vec2;
use rand::Rng;

use crate::consts::*;

/// Splash palette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplashColor {
    Red,
    LightRed,
    Crimson,
    DarkRed,
    Pink,
}

impl SplashColor {
    pub const ALL: [SplashColor; 5] = [
        SplashColor::Red,
        SplashColor::LightRed,
        SplashColor::Crimson,
        SplashColor::DarkRed,
        SplashColor::Pink,
    ];

    pub fn hex(&self) -> &'static str {
        match self {
            SplashColor::Red => "#FF4444",
            SplashColor::LightRed => "#FF6666",
            SplashColor::Crimson => "#CC0000",
            SplashColor::DarkRed => "#AA0000",
            SplashColor::Pink => "#FF8888",
        }
    }
}

/// A single splash droplet
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub color: SplashColor,
    /// 0-1, drives opacity
    pub life: f32,
}

/// Burst of particles at a squash point
#[derive(Debug, Clone)]
pub struct Splash {
    pub origin: Vec2,
    /// Creation timestamp (ms)
    pub created_at: f64,
    pub lifetime: f64,
    pub particles: Vec<Particle>,
}

impl Splash {
    pub fn new<R: Rng>(rng: &mut R, origin: Vec2, now: f64) -> Self {
        let particles = (0..SPLASH_PARTICLES)
            .map(|_| Particle {
                pos: origin,
                vel: Vec2::new(
                    rng.random_range(-PARTICLE_MAX_SPEED..PARTICLE_MAX_SPEED),
                    rng.random_range(-PARTICLE_MAX_SPEED..PARTICLE_MAX_SPEED),
                ),
                size: rng.random_range(PARTICLE_MIN_SIZE..PARTICLE_MAX_SIZE),
                color: SplashColor::ALL[rng.random_range(0..SplashColor::ALL.len())],
                life: 1.0,
            })
            .collect();

        Self {
            origin,
            created_at: now,
            lifetime: SPLASH_LIFETIME_MS,
            particles,
        }
    }

    /// Fraction of the splash lifetime remaining, clamped at 0
    pub fn life_ratio(&self, now: f64) -> f32 {
        let age = now - self.created_at;
        (1.0 - age / self.lifetime).max(0.0) as f32
    }

    /// Step every particle once: move, gravity, drag, fade, shrink
    pub fn update(&mut self, now: f64) {
        let life = self.life_ratio(now);
        for particle in &mut self.particles {
            particle.pos += particle.vel;
            particle.vel.y += PARTICLE_GRAVITY;
            particle.vel *= PARTICLE_DRAG;
            particle.life = life;
            particle.size = (particle.size * PARTICLE_SHRINK).max(0.0);
        }
    }

    pub fn is_expired(&self, now: f64) -> bool {
        now - self.created_at > self.lifetime
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn splash_at(x: f32, y: f32) -> Splash {
        let mut rng = Pcg32::seed_from_u64(42);
        Splash::new(&mut rng, Vec2::new(x, y), 0.0)
    }

    #[test]
    fn test_new_splash_particles() {
        let splash = splash_at(100.0, 100.0);
        assert_eq!(splash.particles.len(), SPLASH_PARTICLES);
        assert_eq!(splash.lifetime, SPLASH_LIFETIME_MS);
        for p in &splash.particles {
            assert_eq!(p.pos, Vec2::new(100.0, 100.0));
            assert!(p.vel.x >= -PARTICLE_MAX_SPEED && p.vel.x < PARTICLE_MAX_SPEED);
            assert!(p.vel.y >= -PARTICLE_MAX_SPEED && p.vel.y < PARTICLE_MAX_SPEED);
            assert!(p.size >= PARTICLE_MIN_SIZE && p.size < PARTICLE_MAX_SIZE);
            assert_eq!(p.life, 1.0);
        }
    }

    #[test]
    fn test_update_integrates_velocity() {
        let mut splash = splash_at(0.0, 0.0);
        splash.particles[0].vel = Vec2::new(2.0, -1.0);
        splash.particles[0].size = 5.0;

        splash.update(400.0);
        let p = &splash.particles[0];
        assert_eq!(p.pos, Vec2::new(2.0, -1.0));
        assert!((p.vel.x - 2.0 * 0.98).abs() < 1e-5);
        assert!((p.vel.y - (-1.0 + 0.2) * 0.98).abs() < 1e-5);
        assert!((p.size - 4.95).abs() < 1e-5);
        assert!((p.life - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_life_shared_and_clamped() {
        let mut splash = splash_at(0.0, 0.0);
        splash.update(200.0);
        assert!(splash.particles.iter().all(|p| (p.life - 0.75).abs() < 1e-5));

        splash.update(1200.0);
        assert!(splash.particles.iter().all(|p| p.life == 0.0));
    }

    #[test]
    fn test_expiry() {
        let splash = splash_at(0.0, 0.0);
        assert!(!splash.is_expired(800.0));
        assert!(splash.is_expired(800.5));
    }

    #[test]
    fn test_palette() {
        let hexes: Vec<_> = SplashColor::ALL.iter().map(|c| c.hex()).collect();
        assert_eq!(hexes, ["#FF4444", "#FF6666", "#CC0000", "#AA0000", "#FF8888"]);
    }
}
