//! Spawn points with synchronous reservation.
//!
//! Reservation happens inside the authoritative death-handling step so two
//! players dying in the same tick can never double-book a point; the
//! reservation is released only once the player has actually been placed.

use crate::player::PlayerId;
use glam::Vec3;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPoint {
    pub id: u32,
    pub pos: Vec3,
    pub yaw: f32,
}

pub struct SpawnRegistry {
    points: Vec<SpawnPoint>,
    reserved: HashMap<u32, PlayerId>,
    rng: ChaCha8Rng,
}

impl SpawnRegistry {
    pub fn new(points: Vec<SpawnPoint>, seed: u64) -> Self {
        Self {
            points,
            reserved: HashMap::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// A ring of eight points, enough for tests and the demo arena.
    #[must_use]
    pub fn ring(radius: f32) -> Self {
        let points = (0..8u32)
            .map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let a = (i as f32) * std::f32::consts::TAU / 8.0;
                SpawnPoint {
                    id: i + 1,
                    pos: Vec3::new(a.cos() * radius, 0.0, a.sin() * radius),
                    // Face the arena center.
                    yaw: (-a.cos()).atan2(-a.sin()),
                }
            })
            .collect();
        Self::new(points, 7)
    }

    /// Reserve a random free point for `who`. First valid request wins;
    /// returns None only when every point is taken.
    pub fn reserve(&mut self, who: PlayerId) -> Option<u32> {
        let free: Vec<u32> = self
            .points
            .iter()
            .map(|p| p.id)
            .filter(|id| !self.reserved.contains_key(id))
            .collect();
        if free.is_empty() {
            return None;
        }
        let pick = free[self.rng.gen_range(0..free.len())];
        self.reserved.insert(pick, who);
        Some(pick)
    }

    /// Release after placement (not when the respawn decision is made).
    pub fn release(&mut self, id: u32) {
        self.reserved.remove(&id);
    }

    #[inline]
    pub fn get(&self, id: u32) -> Option<&SpawnPoint> {
        self.points.iter().find(|p| p.id == id)
    }

    #[inline]
    #[must_use]
    pub fn is_reserved(&self, id: u32) -> bool {
        self.reserved.contains_key(&id)
    }

    #[inline]
    #[must_use]
    pub fn reserved_count(&self) -> usize {
        self.reserved.len()
    }
}
