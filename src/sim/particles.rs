//! Burst particle effects
//!
//! Purely cosmetic: the tick loop emits a burst on heart/cake pickup and on
//! crash, then integrates simple gravity-plus-drag motion. The pool is
//! hard-capped; bursts past the cap drop their oldest-first overflow.

use glam::Vec2;
use rand::Rng;

use crate::frames;

#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 1.0 at birth, dead at 0.
    pub life: f32,
    pub size: f32,
    decay: f32,
}

#[derive(Debug, Default)]
pub struct Particles {
    pool: Vec<Particle>,
    max: usize,
}

impl Particles {
    pub fn new(max: usize) -> Self {
        Self {
            pool: Vec::with_capacity(max),
            max,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.pool.iter()
    }

    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    pub fn clear(&mut self) {
        self.pool.clear();
    }

    /// Emit an upward-biased burst at `origin`.
    pub fn burst(&mut self, origin: Vec2, count: usize, rng: &mut impl Rng) {
        for _ in 0..count {
            if self.pool.len() >= self.max {
                self.pool.remove(0);
            }
            let angle = rng.random_range(0.0..std::f32::consts::TAU);
            let magnitude = 0.5 + rng.random::<f32>() * 2.0;
            let vel = Vec2::new(angle.cos() * magnitude, angle.sin() * magnitude - 1.5);
            self.pool.push(Particle {
                pos: origin,
                vel,
                life: 1.0,
                size: 2.0 + rng.random::<f32>() * 3.0,
                decay: 0.015 + rng.random::<f32>() * 0.02,
            });
        }
    }

    pub fn update(&mut self, dt_ms: f32) {
        let step = frames(dt_ms);
        for p in &mut self.pool {
            p.vel.y += 0.2 * step;
            p.vel.x *= 0.98;
            p.pos += p.vel * step;
            p.life -= p.decay * step;
        }
        self.pool.retain(|p| p.life > 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_burst_respects_cap() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut particles = Particles::new(10);
        particles.burst(Vec2::ZERO, 25, &mut rng);
        assert_eq!(particles.len(), 10);
    }

    #[test]
    fn test_particles_die_out() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut particles = Particles::new(50);
        particles.burst(Vec2::new(100.0, 50.0), 20, &mut rng);
        for _ in 0..500 {
            particles.update(16.0);
        }
        assert!(particles.is_empty());
    }

    #[test]
    fn test_gravity_pulls_down() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut particles = Particles::new(50);
        particles.burst(Vec2::ZERO, 1, &mut rng);
        let vy0 = particles.iter().next().map(|p| p.vel.y);
        particles.update(16.0);
        let vy1 = particles.iter().next().map(|p| p.vel.y);
        assert!(vy1 > vy0);
    }
}
