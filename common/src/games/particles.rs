use std::ops::RangeInclusive;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::SessionRng;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Cosmetic particle. Position and velocity are in whatever unit the owning game
/// draws with; the pool never interprets them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: u32,
    pub color: Rgb,
}

impl Particle {
    const DEAD: Particle = Particle {
        pos: Vec2::ZERO,
        vel: Vec2::ZERO,
        life: 0,
        color: Rgb(0, 0, 0),
    };

    pub fn is_alive(&self) -> bool {
        self.life > 0
    }

    /// Opacity fades out over the last ~40 ticks of life.
    pub fn alpha(&self) -> u8 {
        self.life.saturating_mul(6).min(255) as u8
    }

    pub fn size(&self) -> u32 {
        (self.life / 10).max(1)
    }
}

/// Fixed-capacity particle storage. Dead particles free their slot, and spawns
/// reuse slots starting at a rotating cursor; when every slot is live the slot
/// under the cursor is overwritten.
pub struct ParticlePool {
    slots: Vec<Particle>,
    cursor: usize,
    live: usize,
}

impl ParticlePool {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![Particle::DEAD; capacity.max(1)],
            cursor: 0,
            live: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn clear(&mut self) {
        self.slots.fill(Particle::DEAD);
        self.cursor = 0;
        self.live = 0;
    }

    pub fn spawn(&mut self, particle: Particle) {
        if !particle.is_alive() {
            return;
        }

        let capacity = self.slots.len();
        let free = (0..capacity)
            .map(|i| (self.cursor + i) % capacity)
            .find(|&i| !self.slots[i].is_alive());

        let index = match free {
            Some(index) => {
                self.live += 1;
                index
            }
            None => self.cursor,
        };

        self.slots[index] = particle;
        self.cursor = (index + 1) % capacity;
    }

    /// Spawns `count` particles at `origin` with per-axis velocity uniform in
    /// `[-speed, speed]` and a lifetime drawn from `life`.
    pub fn burst(
        &mut self,
        rng: &mut SessionRng,
        origin: Vec2,
        count: usize,
        speed: f32,
        life: RangeInclusive<u32>,
        color: Rgb,
    ) {
        for _ in 0..count {
            let vel = if speed > 0.0 {
                Vec2::new(rng.random_range(-speed..=speed), rng.random_range(-speed..=speed))
            } else {
                Vec2::ZERO
            };
            self.spawn(Particle {
                pos: origin,
                vel,
                life: rng.random_range(life.clone()),
                color,
            });
        }
    }

    /// One simulation tick: move, age, free expired slots.
    pub fn update(&mut self) {
        for particle in self.slots.iter_mut().filter(|p| p.is_alive()) {
            particle.pos += particle.vel;
            particle.life -= 1;
            if particle.life == 0 {
                self.live -= 1;
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.slots.iter().filter(|p| p.is_alive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn particle(life: u32) -> Particle {
        Particle {
            pos: Vec2::ZERO,
            vel: Vec2::new(1.0, -0.5),
            life,
            color: Rgb(255, 0, 0),
        }
    }

    #[test]
    fn test_update_moves_and_ages() {
        let mut pool = ParticlePool::new(8);
        pool.spawn(particle(3));
        pool.update();
        let p = pool.iter().next().unwrap();
        assert_eq!(p.pos, Vec2::new(1.0, -0.5));
        assert_eq!(p.life, 2);
    }

    #[test]
    fn test_particle_removed_when_life_reaches_zero() {
        let mut pool = ParticlePool::new(8);
        pool.spawn(particle(2));
        pool.update();
        assert_eq!(pool.len(), 1);
        pool.update();
        assert_eq!(pool.len(), 0);
        assert_eq!(pool.iter().count(), 0);
    }

    #[test]
    fn test_dead_particle_is_not_spawned() {
        let mut pool = ParticlePool::new(4);
        pool.spawn(particle(0));
        assert!(pool.is_empty());
    }

    #[test]
    fn test_full_pool_overwrites_instead_of_growing() {
        let mut pool = ParticlePool::new(4);
        for life in 1..=6 {
            pool.spawn(particle(life * 10));
        }
        assert_eq!(pool.len(), 4);
        assert_eq!(pool.capacity(), 4);
        let mut lives: Vec<u32> = pool.iter().map(|p| p.life).collect();
        lives.sort_unstable();
        assert_eq!(lives, vec![30, 40, 50, 60]);
    }

    #[test]
    fn test_freed_slots_are_reused() {
        let mut pool = ParticlePool::new(2);
        pool.spawn(particle(1));
        pool.spawn(particle(5));
        pool.update();
        assert_eq!(pool.len(), 1);
        pool.spawn(particle(7));
        assert_eq!(pool.len(), 2);
        let mut lives: Vec<u32> = pool.iter().map(|p| p.life).collect();
        lives.sort_unstable();
        assert_eq!(lives, vec![4, 7]);
    }

    #[test]
    fn test_burst_respects_ranges() {
        let mut pool = ParticlePool::new(64);
        let mut rng = SessionRng::new(42);
        pool.burst(&mut rng, Vec2::new(2.0, 2.0), 30, 0.15, 20..=40, Rgb(1, 2, 3));
        assert_eq!(pool.len(), 30);
        for p in pool.iter() {
            assert!((20..=40).contains(&p.life));
            assert!(p.vel.x.abs() <= 0.15 && p.vel.y.abs() <= 0.15);
            assert_eq!(p.pos, Vec2::new(2.0, 2.0));
        }
    }

    #[test]
    fn test_alpha_and_size() {
        assert_eq!(particle(10).alpha(), 60);
        assert_eq!(particle(100).alpha(), 255);
        assert_eq!(particle(5).size(), 1);
        assert_eq!(particle(35).size(), 3);
    }
}
