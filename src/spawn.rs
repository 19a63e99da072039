//! Spawn context for tube initialization.
//!
//! Provides helper methods to reduce boilerplate when seeding tubes: random
//! draws for per-tube motion constants and the colinear seed layouts the
//! drifting-tube demos start from.
//!
//! ```ignore
//! scene.with_spawner(|ctx| {
//!     let origin = ctx.random_point_spread(Vec3::new(10.0, 10.0, 5.0));
//!     let count = ctx.random_int(10, 35) as usize;
//!     TubeSeed {
//!         points: ctx.line_points(origin, count, 2.0),
//!         config: TubeConfig::new().with_radius(ctx.random_range(0.01, 0.05)),
//!     }
//! })
//! ```

use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::tube::TubeConfig;

/// Everything needed to build one tube: seed polyline plus configuration.
pub struct TubeSeed {
    /// Initial chain points, head first. Length fixes the chain length.
    pub points: Vec<Vec3>,
    /// Geometry and motion parameters.
    pub config: TubeConfig,
}

impl TubeSeed {
    /// A scattered tube in the classic demo layout: a random origin inside
    /// a (10, 10, 5) spread, 10-35 chain points trailing along -Z at 2-unit
    /// spacing, and per-tube radius/attraction/vlimit drawn from the demo
    /// ranges.
    pub fn scattered(ctx: &mut SpawnContext) -> Self {
        let origin = ctx.random_point_spread(Vec3::new(10.0, 10.0, 5.0));
        let count = ctx.random_int(10, 35) as usize;
        let config = TubeConfig::new()
            .with_radius(ctx.random_range(0.01, 0.05))
            .with_attraction(0.001 + ctx.random_range(0.0, 0.006))
            .with_vlimit(0.025 + ctx.random_range(0.0, 0.025));

        Self {
            points: ctx.line_points(origin, count, 2.0),
            config,
        }
    }
}

/// Context passed to spawner functions, one per tube being built.
pub struct SpawnContext {
    /// Index of the tube being spawned (0 to count-1).
    pub index: u32,
    /// Total number of tubes being spawned.
    pub count: u32,
    /// Internal RNG - use the helper methods instead of accessing directly.
    rng: SmallRng,
}

impl SpawnContext {
    /// Create a spawn context seeded from the index and the wall clock, so
    /// runs differ but draws within a run stay stable per tube.
    pub(crate) fn new(index: u32, count: u32) -> Self {
        let seed = index as u64
            ^ (std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(42));
        Self::seeded(index, count, seed)
    }

    /// Create a deterministic spawn context from an explicit seed.
    pub(crate) fn seeded(index: u32, count: u32, seed: u64) -> Self {
        Self {
            index,
            count,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Normalized progress through the spawn (0.0 to 1.0).
    #[inline]
    pub fn progress(&self) -> f32 {
        self.index as f32 / self.count as f32
    }

    // ========== Random primitives ==========

    /// Random f32 between 0.0 and 1.0.
    #[inline]
    pub fn random(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Random f32 in the given range.
    #[inline]
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        self.rng.gen_range(min..max)
    }

    /// Random i32 in the given inclusive range.
    #[inline]
    pub fn random_int(&mut self, min: i32, max: i32) -> i32 {
        self.rng.gen_range(min..=max)
    }

    /// Random f32 in `<-range/2, range/2>`.
    #[inline]
    pub fn random_spread(&mut self, range: f32) -> f32 {
        range * (0.5 - self.rng.gen::<f32>())
    }

    // ========== Layout helpers ==========

    /// Random point with each component spread around zero by the matching
    /// component of `extent`.
    pub fn random_point_spread(&mut self, extent: Vec3) -> Vec3 {
        Vec3::new(
            self.random_spread(extent.x),
            self.random_spread(extent.y),
            self.random_spread(extent.z),
        )
    }

    /// `count` colinear points starting at `origin` and trailing along -Z
    /// at `spacing` intervals. The head is the origin; the tail stretches
    /// behind it, ready to be pulled along by chain-follow motion.
    pub fn line_points(&self, origin: Vec3, count: usize, spacing: f32) -> Vec<Vec3> {
        (0..count)
            .map(|i| Vec3::new(origin.x, origin.y, origin.z - spacing * i as f32))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_context_progress() {
        let ctx = SpawnContext::seeded(50, 100, 1);
        assert!((ctx.progress() - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_random_spread_is_centered() {
        let mut ctx = SpawnContext::seeded(0, 1, 7);
        for _ in 0..200 {
            let v = ctx.random_spread(10.0);
            assert!(v >= -5.0 && v <= 5.0);
        }
    }

    #[test]
    fn test_seeded_contexts_repeat() {
        let mut a = SpawnContext::seeded(0, 1, 99);
        let mut b = SpawnContext::seeded(0, 1, 99);
        for _ in 0..10 {
            assert_eq!(a.random(), b.random());
        }
    }

    #[test]
    fn test_line_points_trail_along_negative_z() {
        let ctx = SpawnContext::seeded(0, 1, 1);
        let points = ctx.line_points(Vec3::new(1.0, 2.0, 3.0), 4, 2.0);
        assert_eq!(points.len(), 4);
        assert_eq!(points[0], Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(points[3], Vec3::new(1.0, 2.0, -3.0));
    }

    #[test]
    fn test_scattered_seed_within_demo_ranges() {
        let mut ctx = SpawnContext::seeded(3, 10, 123);
        let seed = TubeSeed::scattered(&mut ctx);
        assert!(seed.points.len() >= 10 && seed.points.len() <= 35);
        assert!(seed.config.radius >= 0.01 && seed.config.radius < 0.05);
        assert!(seed.config.attraction >= 0.001 && seed.config.attraction < 0.007);
        assert!(seed.config.vlimit >= 0.025 && seed.config.vlimit < 0.05);
    }
}
