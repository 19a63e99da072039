//! Centripetal Catmull-Rom curve through a moving polyline.
//!
//! The curve owns its control points so the chain logic can mutate them in
//! place each frame and then refresh the cached arc-length table without
//! reallocating. Ring placement uses arc-length parameterization
//! ([`CatmullRom3::point_at_arc`]) so tube segments stay evenly spaced even
//! when control points bunch up; frames are propagated along the curve
//! rather than recomputed per segment, which keeps the tube cross-section
//! from flipping at inflection points.

use glam::{Quat, Vec3};

/// Subdivisions used for the cached arc-length table.
const ARC_DIVISIONS: usize = 200;

/// Below this squared length a direction is treated as degenerate.
const DEGENERATE_EPS: f32 = 1e-12;

/// Cubic polynomial for one curve span, in power form.
struct SegmentPoly {
    c0: Vec3,
    c1: Vec3,
    c2: Vec3,
    c3: Vec3,
}

impl SegmentPoly {
    /// Nonuniform Catmull-Rom span through p1..p2 with knot spacings derived
    /// from the centripetal parameterization.
    fn centripetal(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3) -> Self {
        let mut dt0 = p0.distance_squared(p1).powf(0.25);
        let mut dt1 = p1.distance_squared(p2).powf(0.25);
        let mut dt2 = p2.distance_squared(p3).powf(0.25);

        // Coincident points would zero a knot spacing; fall back to safe values.
        if dt1 < 1e-4 {
            dt1 = 1.0;
        }
        if dt0 < 1e-4 {
            dt0 = dt1;
        }
        if dt2 < 1e-4 {
            dt2 = dt1;
        }

        let t1 = ((p1 - p0) / dt0 - (p2 - p0) / (dt0 + dt1) + (p2 - p1) / dt1) * dt1;
        let t2 = ((p2 - p1) / dt1 - (p3 - p1) / (dt1 + dt2) + (p3 - p2) / dt2) * dt1;

        Self {
            c0: p1,
            c1: t1,
            c2: -3.0 * p1 + 3.0 * p2 - 2.0 * t1 - t2,
            c3: 2.0 * p1 - 2.0 * p2 + t1 + t2,
        }
    }

    fn eval(&self, w: f32) -> Vec3 {
        ((self.c3 * w + self.c2) * w + self.c1) * w + self.c0
    }

    fn deriv(&self, w: f32) -> Vec3 {
        (self.c3 * (3.0 * w) + self.c2 * 2.0) * w + self.c1
    }
}

/// Tangent/normal/binormal triples for each ring along a curve.
///
/// Allocated once per tube and refilled in place every frame.
#[derive(Debug)]
pub struct FrenetFrames {
    /// Unit tangents, one per ring.
    pub tangents: Vec<Vec3>,
    /// Unit normals, one per ring.
    pub normals: Vec<Vec3>,
    /// Unit binormals, one per ring.
    pub binormals: Vec<Vec3>,
}

impl FrenetFrames {
    /// Allocate zeroed frames for `ring_count` rings.
    pub fn new(ring_count: usize) -> Self {
        Self {
            tangents: vec![Vec3::ZERO; ring_count],
            normals: vec![Vec3::ZERO; ring_count],
            binormals: vec![Vec3::ZERO; ring_count],
        }
    }

    /// Number of rings these frames describe.
    pub fn ring_count(&self) -> usize {
        self.tangents.len()
    }
}

/// A centripetal Catmull-Rom spline through an ordered set of points.
#[derive(Debug)]
pub struct CatmullRom3 {
    points: Vec<Vec3>,
    /// Cumulative chord lengths over ARC_DIVISIONS samples; lengths[0] = 0.
    lengths: Vec<f32>,
}

impl CatmullRom3 {
    /// Build a curve through `points`. Needs at least two points.
    pub fn new(points: Vec<Vec3>) -> Self {
        assert!(points.len() >= 2, "a curve needs at least 2 points");
        let mut curve = Self {
            points,
            lengths: vec![0.0; ARC_DIVISIONS + 1],
        };
        curve.refresh();
        curve
    }

    /// The control points.
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Mutable access for in-place chain updates. Call [`Self::refresh`]
    /// after mutating so arc-length sampling sees the new shape.
    pub fn points_mut(&mut self) -> &mut [Vec3] {
        &mut self.points
    }

    /// Exact control point `i`.
    pub fn point_at_index(&self, i: usize) -> Vec3 {
        self.points[i]
    }

    /// Total curve length per the cached table.
    pub fn length(&self) -> f32 {
        *self.lengths.last().unwrap_or(&0.0)
    }

    /// Recompute the cumulative arc-length table in place.
    pub fn refresh(&mut self) {
        let mut last = self.point_at(0.0);
        let mut sum = 0.0;
        self.lengths[0] = 0.0;
        for d in 1..=ARC_DIVISIONS {
            let p = self.point_at(d as f32 / ARC_DIVISIONS as f32);
            sum += p.distance(last);
            self.lengths[d] = sum;
            last = p;
        }
    }

    /// Locate the span containing parameter `t` and its local weight.
    fn segment(&self, t: f32) -> (SegmentPoly, f32) {
        let l = self.points.len();
        let p = (l - 1) as f32 * t.clamp(0.0, 1.0);
        let mut i = p.floor() as usize;
        let mut weight = p - i as f32;
        if i >= l - 1 {
            i = l - 2;
            weight = 1.0;
        }

        // Endpoints extrapolate by reflecting the neighbor through the end.
        let p0 = if i > 0 {
            self.points[i - 1]
        } else {
            2.0 * self.points[0] - self.points[1]
        };
        let p1 = self.points[i];
        let p2 = self.points[i + 1];
        let p3 = if i + 2 < l {
            self.points[i + 2]
        } else {
            2.0 * self.points[l - 1] - self.points[l - 2]
        };

        (SegmentPoly::centripetal(p0, p1, p2, p3), weight)
    }

    /// Evaluate the curve at parameter `t` in [0, 1].
    pub fn point_at(&self, t: f32) -> Vec3 {
        let (poly, w) = self.segment(t);
        poly.eval(w)
    }

    /// Unit tangent at parameter `t`, or zero for a degenerate curve.
    pub fn tangent_at(&self, t: f32) -> Vec3 {
        let (poly, w) = self.segment(t);
        let d = poly.deriv(w);
        if d.length_squared() > DEGENERATE_EPS {
            d.normalize()
        } else {
            Vec3::ZERO
        }
    }

    /// Map an arc-length fraction `u` in [0, 1] to a curve parameter `t`.
    fn arc_to_t(&self, u: f32) -> f32 {
        let total = self.length();
        if total <= f32::EPSILON {
            return 0.0;
        }
        let target = u.clamp(0.0, 1.0) * total;

        // First table entry at or past the target distance.
        let hi = self.lengths.partition_point(|&len| len < target);
        if hi == 0 {
            return 0.0;
        }
        if hi > ARC_DIVISIONS {
            return 1.0;
        }
        let i = hi - 1;
        let l0 = self.lengths[i];
        let l1 = self.lengths[hi];
        let span = l1 - l0;
        let frac = if span > f32::EPSILON {
            (target - l0) / span
        } else {
            0.0
        };
        (i as f32 + frac) / ARC_DIVISIONS as f32
    }

    /// Evaluate the curve at an arc-length fraction `u` in [0, 1].
    ///
    /// Unlike [`Self::point_at`], equal steps in `u` land at (approximately)
    /// equal distances along the curve.
    pub fn point_at_arc(&self, u: f32) -> Vec3 {
        self.point_at(self.arc_to_t(u))
    }

    /// Unit tangent at an arc-length fraction `u`.
    pub fn tangent_at_arc(&self, u: f32) -> Vec3 {
        self.tangent_at(self.arc_to_t(u))
    }

    /// Fill `frames` with propagated tangent/normal/binormal triples.
    ///
    /// The ring count is taken from `frames`; ring `i` sits at arc fraction
    /// `i / (ring_count - 1)`. The first normal is seeded against the
    /// smallest tangent component; every following normal is the previous
    /// one rotated by the quaternion between consecutive tangents, so the
    /// frame twists as little as possible from ring to ring.
    pub fn frames_into(&self, frames: &mut FrenetFrames) {
        let rings = frames.ring_count();
        debug_assert!(rings >= 2, "frames need at least 2 rings");
        let segments = rings - 1;

        for i in 0..rings {
            let mut t = self.tangent_at_arc(i as f32 / segments as f32);
            if t.length_squared() <= DEGENERATE_EPS {
                // Degenerate span: carry the previous direction forward.
                t = if i > 0 { frames.tangents[i - 1] } else { Vec3::Z };
            }
            frames.tangents[i] = t;
        }

        // Seed the first normal perpendicular to the tangent, biased away
        // from the tangent's smallest component.
        let t0 = frames.tangents[0];
        let (ax, ay, az) = (t0.x.abs(), t0.y.abs(), t0.z.abs());
        let pick = if ax <= ay && ax <= az {
            Vec3::X
        } else if ay <= az {
            Vec3::Y
        } else {
            Vec3::Z
        };
        let mut side = t0.cross(pick);
        if side.length_squared() <= DEGENERATE_EPS {
            side = t0.cross(Vec3::X);
            if side.length_squared() <= DEGENERATE_EPS {
                side = Vec3::Y;
            }
        }
        let side = side.normalize();
        frames.normals[0] = t0.cross(side);
        frames.binormals[0] = t0.cross(frames.normals[0]);

        // Rotate each frame into the next instead of rebuilding it, so the
        // cross-section orientation never flips along the chain.
        for i in 1..rings {
            let prev_t = frames.tangents[i - 1];
            let t = frames.tangents[i];
            let mut normal = frames.normals[i - 1];

            let axis = prev_t.cross(t);
            if axis.length_squared() > DEGENERATE_EPS {
                let theta = prev_t.dot(t).clamp(-1.0, 1.0).acos();
                normal = Quat::from_axis_angle(axis.normalize(), theta) * normal;
            }

            frames.normals[i] = normal;
            frames.binormals[i] = t.cross(normal);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_z(n: usize) -> Vec<Vec3> {
        (0..n).map(|i| Vec3::new(0.0, 0.0, -2.0 * i as f32)).collect()
    }

    fn helix(n: usize) -> Vec<Vec3> {
        (0..n)
            .map(|i| {
                let t = i as f32 * 0.4;
                Vec3::new(t.cos(), t.sin(), t * 0.5)
            })
            .collect()
    }

    #[test]
    fn test_endpoints_hit_control_points() {
        let curve = CatmullRom3::new(helix(8));
        assert!(curve.point_at(0.0).distance(curve.point_at_index(0)) < 1e-5);
        assert!(curve.point_at(1.0).distance(curve.point_at_index(7)) < 1e-5);
    }

    #[test]
    fn test_point_at_index_is_exact() {
        let points = helix(6);
        let curve = CatmullRom3::new(points.clone());
        for (i, p) in points.iter().enumerate() {
            assert_eq!(curve.point_at_index(i), *p);
        }
    }

    #[test]
    fn test_straight_line_stays_on_axis() {
        let curve = CatmullRom3::new(line_z(5));
        for d in 0..=10 {
            let p = curve.point_at(d as f32 / 10.0);
            assert!(p.x.abs() < 1e-5);
            assert!(p.y.abs() < 1e-5);
        }
    }

    #[test]
    fn test_length_of_straight_line() {
        // 5 points spaced 2 apart: total length 8.
        let curve = CatmullRom3::new(line_z(5));
        assert!((curve.length() - 8.0).abs() < 0.05);
    }

    #[test]
    fn test_arc_sampling_is_evenly_spaced() {
        let curve = CatmullRom3::new(helix(10));
        let steps = 16;
        let spans: Vec<f32> = (0..steps)
            .map(|i| {
                let a = curve.point_at_arc(i as f32 / steps as f32);
                let b = curve.point_at_arc((i + 1) as f32 / steps as f32);
                a.distance(b)
            })
            .collect();
        let mean = spans.iter().sum::<f32>() / steps as f32;
        for span in spans {
            assert!(
                (span - mean).abs() < mean * 0.15,
                "uneven arc spacing: {} vs mean {}",
                span,
                mean
            );
        }
    }

    #[test]
    fn test_tangent_is_unit() {
        let curve = CatmullRom3::new(helix(10));
        for d in 0..=20 {
            let t = curve.tangent_at_arc(d as f32 / 20.0);
            assert!((t.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_frames_are_orthonormal() {
        let curve = CatmullRom3::new(helix(12));
        let mut frames = FrenetFrames::new(12);
        curve.frames_into(&mut frames);
        for i in 0..frames.ring_count() {
            let (t, n, b) = (frames.tangents[i], frames.normals[i], frames.binormals[i]);
            assert!((t.length() - 1.0).abs() < 1e-4);
            assert!((n.length() - 1.0).abs() < 1e-3);
            assert!((b.length() - 1.0).abs() < 1e-3);
            assert!(t.dot(n).abs() < 1e-3);
            assert!(t.dot(b).abs() < 1e-3);
            assert!(n.dot(b).abs() < 1e-3);
        }
    }

    #[test]
    fn test_frames_never_flip() {
        let curve = CatmullRom3::new(helix(16));
        let mut frames = FrenetFrames::new(16);
        curve.frames_into(&mut frames);
        for i in 1..frames.ring_count() {
            assert!(
                frames.normals[i - 1].dot(frames.normals[i]) > 0.0,
                "normal flipped between rings {} and {}",
                i - 1,
                i
            );
        }
    }

    #[test]
    fn test_refresh_tracks_moved_points() {
        let mut curve = CatmullRom3::new(line_z(5));
        let before = curve.length();
        // Stretch the head away from the chain.
        curve.points_mut()[0] = Vec3::new(0.0, 0.0, 4.0);
        curve.refresh();
        assert!(curve.length() > before + 1.0);
    }

    #[test]
    #[should_panic(expected = "at least 2 points")]
    fn test_single_point_rejected() {
        let _ = CatmullRom3::new(vec![Vec3::ZERO]);
    }
}
