//! Collision oracles consumed by the simulation step.
//!
//! The core treats collision as a black box: a ground support query, a
//! swept obstacle query, an aim raycast, a jump-pad lookup, and a ledge
//! scan. [`StaticWorld`] is a deliberately simple implementation (ground
//! plane plus axis-aligned boxes) used by tests and local play; a real
//! physics backend slots in behind the same trait.

use glam::{Vec2, Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepHit {
    pub point: Vec3,
    pub normal: Vec3,
    pub dist: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub point: Vec3,
    pub dist: f32,
    /// Whether the surface accepts grapple/swing anchors.
    pub grappleable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LedgeHit {
    /// Where the feet end up after the mantle completes.
    pub stand_pos: Vec3,
}

pub trait CollisionQuery {
    /// Height of the highest support under the horizontal position, at or
    /// below `max_y`. Returns `f32::NEG_INFINITY` when nothing qualifies
    /// (a pawn already under the world keeps falling toward the kill plane).
    fn ground_height(&self, pos: Vec3, radius: f32, max_y: f32) -> f32;

    /// Sweep a sphere of `radius` from `origin` along unit `dir` up to `dist`.
    fn sweep(&self, origin: Vec3, dir: Vec3, radius: f32, dist: f32) -> Option<SweepHit>;

    /// Thin raycast for aim queries.
    fn raycast(&self, origin: Vec3, dir: Vec3, max_dist: f32) -> Option<RayHit>;

    /// Jump pad apex height at the given standing position, if any.
    fn jump_pad_at(&self, pos: Vec3, radius: f32) -> Option<f32>;

    /// Scan forward for a mantleable ledge with its top inside the height
    /// window `[min_h, max_h]` above the feet and standing clearance on top.
    fn ledge_scan(
        &self,
        pos: Vec3,
        forward: Vec3,
        min_h: f32,
        max_h: f32,
        reach: f32,
    ) -> Option<LedgeHit>;
}

/// Axis-aligned box obstacle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
    pub grappleable: bool,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min,
            max,
            grappleable: true,
        }
    }

    fn contains_xz(&self, p: Vec3, pad: f32) -> bool {
        p.x >= self.min.x - pad
            && p.x <= self.max.x + pad
            && p.z >= self.min.z - pad
            && p.z <= self.max.z + pad
    }

    /// Slab-method ray intersection; returns entry distance and face normal.
    fn ray_hit(&self, origin: Vec3, dir: Vec3, max_dist: f32, pad: f32) -> Option<(f32, Vec3)> {
        let min = self.min - Vec3::splat(pad);
        let max = self.max + Vec3::splat(pad);
        let mut t_enter = 0.0f32;
        let mut t_exit = max_dist;
        let mut normal = Vec3::ZERO;
        for axis in 0..3 {
            let (o, d, lo, hi) = match axis {
                0 => (origin.x, dir.x, min.x, max.x),
                1 => (origin.y, dir.y, min.y, max.y),
                _ => (origin.z, dir.z, min.z, max.z),
            };
            if d.abs() < 1e-8 {
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / d;
            let (mut t0, mut t1) = ((lo - o) * inv, (hi - o) * inv);
            let mut axis_normal = match axis {
                0 => Vec3::NEG_X,
                1 => Vec3::NEG_Y,
                _ => Vec3::NEG_Z,
            };
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
                axis_normal = -axis_normal;
            }
            if t0 > t_enter {
                t_enter = t0;
                normal = axis_normal;
            }
            t_exit = t_exit.min(t1);
            if t_enter > t_exit {
                return None;
            }
        }
        if t_enter <= 0.0 || t_enter > max_dist {
            return None;
        }
        Some((t_enter, normal))
    }
}

/// Circular jump pad on the ground.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JumpPad {
    pub center: Vec2,
    pub radius: f32,
    /// Apex height forced onto jumps from the pad.
    pub height: f32,
}

/// Ground plane at y = 0 plus static boxes and jump pads.
#[derive(Debug, Clone, Default)]
pub struct StaticWorld {
    pub boxes: Vec<Aabb>,
    pub pads: Vec<JumpPad>,
}

impl StaticWorld {
    #[must_use]
    pub fn flat() -> Self {
        Self::default()
    }

    pub fn with_box(mut self, b: Aabb) -> Self {
        self.boxes.push(b);
        self
    }

    pub fn with_pad(mut self, p: JumpPad) -> Self {
        self.pads.push(p);
        self
    }
}

impl CollisionQuery for StaticWorld {
    fn ground_height(&self, pos: Vec3, radius: f32, max_y: f32) -> f32 {
        let mut h = if max_y >= 0.0 { 0.0 } else { f32::NEG_INFINITY };
        for b in &self.boxes {
            if b.contains_xz(pos, radius * 0.5) && b.max.y <= max_y && b.max.y > h {
                h = b.max.y;
            }
        }
        h
    }

    fn sweep(&self, origin: Vec3, dir: Vec3, radius: f32, dist: f32) -> Option<SweepHit> {
        let mut best: Option<SweepHit> = None;
        for b in &self.boxes {
            if let Some((t, normal)) = b.ray_hit(origin, dir, dist, radius)
                && best.as_ref().map(|h| t < h.dist).unwrap_or(true)
            {
                best = Some(SweepHit {
                    point: origin + dir * t,
                    normal,
                    dist: t,
                });
            }
        }
        best
    }

    fn raycast(&self, origin: Vec3, dir: Vec3, max_dist: f32) -> Option<RayHit> {
        let mut best: Option<(f32, bool)> = None;
        for b in &self.boxes {
            if let Some((t, _)) = b.ray_hit(origin, dir, max_dist, 0.0)
                && best.map(|(bt, _)| t < bt).unwrap_or(true)
            {
                best = Some((t, b.grappleable));
            }
        }
        // Ground plane for downward rays.
        if dir.y < -1e-6 {
            let t = -origin.y / dir.y;
            if t > 0.0 && t <= max_dist && best.map(|(bt, _)| t < bt).unwrap_or(true) {
                best = Some((t, false));
            }
        }
        best.map(|(t, grappleable)| RayHit {
            point: origin + dir * t,
            dist: t,
            grappleable,
        })
    }

    fn jump_pad_at(&self, pos: Vec3, radius: f32) -> Option<f32> {
        let p = Vec2::new(pos.x, pos.z);
        self.pads
            .iter()
            .find(|pad| (p - pad.center).length() <= pad.radius + radius && pos.y < 0.5)
            .map(|pad| pad.height)
    }

    fn ledge_scan(
        &self,
        pos: Vec3,
        forward: Vec3,
        min_h: f32,
        max_h: f32,
        reach: f32,
    ) -> Option<LedgeHit> {
        let fwd = Vec3::new(forward.x, 0.0, forward.z).normalize_or_zero();
        if fwd == Vec3::ZERO {
            return None;
        }
        // Knee and chest probes so both short blocks and tall walls register.
        let probes = [pos.y + min_h * 0.5, pos.y + (min_h + max_h) * 0.5];
        for probe_y in probes {
            let origin = Vec3::new(pos.x, probe_y, pos.z);
            for b in &self.boxes {
                let Some((t, _)) = b.ray_hit(origin, fwd, reach, 0.0) else {
                    continue;
                };
                let top = b.max.y;
                let rel = top - pos.y;
                if rel < min_h || rel > max_h {
                    continue;
                }
                // Standing clearance: nothing overlapping the capsule on top.
                let stand = origin + fwd * (t + 0.3);
                let stand = Vec3::new(stand.x, top, stand.z);
                let blocked = self.boxes.iter().any(|o| {
                    o.contains_xz(stand, 0.0) && o.min.y < top + 1.7 && o.max.y > top + 0.1
                });
                if !blocked {
                    return Some(LedgeHit { stand_pos: stand });
                }
            }
        }
        None
    }
}
