//! Tube chains: trailing polylines wrapped in a live tube surface.
//!
//! A [`TubeChain`] is a fixed-length polyline animated with a chain-follow
//! rule: every frame each point takes its predecessor's position, and the
//! head advances under one of two velocity policies ([`Motion::Drift`]
//! through a shared curl field, or [`Motion::Seek`] toward a target). After
//! the chain moves, the tube's vertex positions and normals are rewritten
//! in place from the curve's propagated frames; the buffers are allocated
//! once at construction and never grow, shrink, or go stale.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use tendrils::prelude::*;
//!
//! let field = Arc::new(CurlField::simplex(42));
//! let points = (0..20).map(|i| Vec3::new(0.0, 0.0, -2.0 * i as f32)).collect();
//! let mut tube = TubeChain::new(points, field, TubeConfig::new())?;
//!
//! // Once per frame:
//! tube.advance(dt, Motion::Drift);
//! upload(tube.position_bytes(), tube.normal_bytes());
//! # Ok::<(), tendrils::ConfigError>(())
//! ```
//!
//! # Buffer layout
//!
//! Positions and normals are flat `f32` triples; the vertex for ring `i`,
//! radial step `j` starts at `3 * (i * (radial_segments + 1) + j)`. The
//! triangle index and UV buffers are generated once at construction and
//! never change.

use std::f32::consts::TAU;
use std::sync::Arc;

use glam::Vec3;

use crate::curve::{CatmullRom3, FrenetFrames};
use crate::error::ConfigError;
use crate::field::CurlField;
use crate::time::REFERENCE_FPS;

/// Velocity policy for a tube's head point, chosen by the caller each frame.
///
/// The caller's input layer owns the mode; a tube never remembers which
/// policy drove it last frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Motion {
    /// Wander through the shared curl field.
    Drift,
    /// Pursue a target point (typically the tracked pointer position).
    Seek(Vec3),
}

/// Geometry and motion parameters for a single tube.
///
/// # Example
///
/// ```ignore
/// let config = TubeConfig::new()
///     .with_radius(0.03)
///     .with_radial_segments(12)
///     .with_attraction(0.004)
///     .with_vlimit(0.0375);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct TubeConfig {
    /// Tube surface radius.
    pub radius: f32,
    /// Subdivisions around the tube's circumference.
    pub radial_segments: usize,
    /// Per-frame steering strength at the 60 fps reference rate.
    pub attraction: f32,
    /// Componentwise speed limit at the 60 fps reference rate.
    pub vlimit: f32,
    /// Scale applied to the head position before sampling the curl field.
    pub field_scale: f32,
}

impl TubeConfig {
    /// Defaults matching the middle of the demo spawn ranges.
    pub fn new() -> Self {
        Self {
            radius: 0.03,
            radial_segments: 12,
            attraction: 0.004,
            vlimit: 0.0375,
            field_scale: 2.0,
        }
    }

    /// Set the tube radius.
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    /// Set the number of radial segments. Fixed once the tube is built.
    pub fn with_radial_segments(mut self, segments: usize) -> Self {
        self.radial_segments = segments;
        self
    }

    /// Set the steering strength.
    pub fn with_attraction(mut self, attraction: f32) -> Self {
        self.attraction = attraction;
        self
    }

    /// Set the componentwise velocity limit.
    pub fn with_vlimit(mut self, vlimit: f32) -> Self {
        self.vlimit = vlimit;
        self
    }

    /// Set the curl-field sampling scale.
    pub fn with_field_scale(mut self, scale: f32) -> Self {
        self.field_scale = scale;
        self
    }
}

impl Default for TubeConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// A chain-follow tube: moving polyline plus its live surface mesh.
#[derive(Debug)]
pub struct TubeChain {
    curve: CatmullRom3,
    frames: FrenetFrames,
    tubular_segments: usize,
    radial_segments: usize,
    radius: f32,
    attraction: f32,
    vlimit: f32,
    field_scale: f32,
    field: Arc<CurlField>,
    velocity: Vec3,
    positions: Vec<f32>,
    normals: Vec<f32>,
    indices: Vec<u32>,
    uvs: Vec<f32>,
    cap_first: Vec3,
    cap_last: Vec3,
}

impl TubeChain {
    /// Build a tube over `points` (head first, tail last).
    ///
    /// The chain length is fixed forever at `points.len()`; the tube has
    /// `points.len() - 1` tubular segments. The mesh buffers are allocated
    /// here and filled immediately, so the tube is renderable before the
    /// first [`Self::advance`].
    ///
    /// # Errors
    ///
    /// Rejects fewer than two points, zero radial segments, and a radius
    /// that is not strictly positive and finite.
    pub fn new(
        points: Vec<Vec3>,
        field: Arc<CurlField>,
        config: TubeConfig,
    ) -> Result<Self, ConfigError> {
        if points.len() < 2 {
            return Err(ConfigError::TooFewPoints { got: points.len() });
        }
        if config.radial_segments == 0 {
            return Err(ConfigError::NoRadialSegments);
        }
        if !(config.radius > 0.0 && config.radius.is_finite()) {
            return Err(ConfigError::InvalidRadius { got: config.radius });
        }

        let tubular_segments = points.len() - 1;
        let ring_count = tubular_segments + 1;
        let ring_verts = config.radial_segments + 1;
        let vertex_count = ring_count * ring_verts;

        let mut tube = Self {
            curve: CatmullRom3::new(points),
            frames: FrenetFrames::new(ring_count),
            tubular_segments,
            radial_segments: config.radial_segments,
            radius: config.radius,
            attraction: config.attraction,
            vlimit: config.vlimit,
            field_scale: config.field_scale,
            field,
            velocity: Vec3::ZERO,
            positions: vec![0.0; vertex_count * 3],
            normals: vec![0.0; vertex_count * 3],
            indices: build_indices(tubular_segments, config.radial_segments),
            uvs: build_uvs(tubular_segments, config.radial_segments),
            cap_first: Vec3::ZERO,
            cap_last: Vec3::ZERO,
        };
        tube.regenerate();
        Ok(tube)
    }

    /// Advance the chain by one frame and rebuild the mesh.
    ///
    /// `dt` is the frame's wall-clock duration in seconds; steering strength
    /// and the speed limit both scale with `dt * 60`, so the visible speed
    /// is the same at any frame rate. A zero `dt` still shifts the chain
    /// but moves the head nowhere.
    pub fn advance(&mut self, dt: f32, motion: Motion) {
        // Chain follow: each point takes its predecessor's place, tail first.
        let points = self.curve.points_mut();
        for i in (1..points.len()).rev() {
            points[i] = points[i - 1];
        }
        let head = points[0];

        let raw = match motion {
            Motion::Seek(target) => target - head,
            Motion::Drift => self.field.curl(head * self.field_scale),
        };

        // A stalled head (raw ~ 0) contributes nothing this frame.
        let direction = if raw.length_squared() > 1e-12 {
            raw.normalize()
        } else {
            Vec3::ZERO
        };

        let step = dt * REFERENCE_FPS;
        self.velocity += direction * (self.attraction * step);
        let limit = self.vlimit * step;
        self.velocity = self
            .velocity
            .clamp(Vec3::splat(-limit), Vec3::splat(limit));

        self.curve.points_mut()[0] = head + self.velocity;

        self.regenerate();
    }

    /// Rewrite every ring of the position/normal buffers from the current
    /// chain. Called by [`Self::advance`]; also runs once at construction.
    fn regenerate(&mut self) {
        self.curve.refresh();
        self.curve.frames_into(&mut self.frames);

        self.cap_first = self.curve.point_at(0.0);
        self.cap_last = self.curve.point_at(1.0);

        for i in 0..=self.tubular_segments {
            self.write_ring(i);
        }
    }

    /// Fill one ring of vertices at tubular index `i`.
    fn write_ring(&mut self, i: usize) {
        let center = self
            .curve
            .point_at_arc(i as f32 / self.tubular_segments as f32);
        let n = self.frames.normals[i];
        let b = self.frames.binormals[i];

        for j in 0..=self.radial_segments {
            let v = j as f32 / self.radial_segments as f32 * TAU;
            let (sin, cos) = v.sin_cos();
            let cos = -cos;

            let normal = (n * cos + b * sin).normalize();
            let vertex = center + normal * self.radius;

            let offset = 3 * (i * (self.radial_segments + 1) + j);
            self.normals[offset..offset + 3].copy_from_slice(&normal.to_array());
            self.positions[offset..offset + 3].copy_from_slice(&vertex.to_array());
        }
    }

    // ========== Chain state ==========

    /// The polyline, head (newest) first.
    pub fn points(&self) -> &[Vec3] {
        self.curve.points()
    }

    /// The head point.
    pub fn head(&self) -> Vec3 {
        self.curve.point_at_index(0)
    }

    /// The accumulated head velocity.
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Tube radius.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Number of tubular segments (`points().len() - 1`).
    pub fn tubular_segments(&self) -> usize {
        self.tubular_segments
    }

    /// Number of radial segments.
    pub fn radial_segments(&self) -> usize {
        self.radial_segments
    }

    /// Componentwise velocity limit at the reference frame rate.
    pub fn vlimit(&self) -> f32 {
        self.vlimit
    }

    /// Steering strength at the reference frame rate.
    pub fn attraction(&self) -> f32 {
        self.attraction
    }

    /// Scale applied to the head position before curl sampling.
    pub fn field_scale(&self) -> f32 {
        self.field_scale
    }

    /// Center of ring `i`, on the curve at arc fraction
    /// `i / tubular_segments`.
    pub fn ring_center(&self, i: usize) -> Vec3 {
        self.curve
            .point_at_arc(i as f32 / self.tubular_segments as f32)
    }

    /// The propagated per-ring frames behind the current mesh.
    pub fn frames(&self) -> &FrenetFrames {
        &self.frames
    }

    // ========== Renderer-facing buffers ==========

    /// Vertex count per buffer:
    /// `(tubular_segments + 1) * (radial_segments + 1)`.
    pub fn vertex_count(&self) -> usize {
        (self.tubular_segments + 1) * (self.radial_segments + 1)
    }

    /// Flat vertex positions, `vertex_count() * 3` floats.
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Flat vertex normals, same layout as [`Self::positions`].
    pub fn normals(&self) -> &[f32] {
        &self.normals
    }

    /// Triangle indices, generated once at construction.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Per-vertex UVs (ring fraction, radial fraction), generated once.
    pub fn uvs(&self) -> &[f32] {
        &self.uvs
    }

    /// Positions as raw bytes, ready for a vertex-buffer upload.
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Normals as raw bytes.
    pub fn normal_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.normals)
    }

    /// Indices as raw bytes.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Marker positions for rounded end caps, at the curve's start and end.
    pub fn cap_positions(&self) -> (Vec3, Vec3) {
        (self.cap_first, self.cap_last)
    }
}

/// Two triangles per quad between adjacent rings.
fn build_indices(tubular_segments: usize, radial_segments: usize) -> Vec<u32> {
    let ring_verts = (radial_segments + 1) as u32;
    let mut indices = Vec::with_capacity(tubular_segments * radial_segments * 6);
    for j in 1..=tubular_segments as u32 {
        for i in 1..=radial_segments as u32 {
            let a = ring_verts * (j - 1) + (i - 1);
            let b = ring_verts * j + (i - 1);
            let c = ring_verts * j + i;
            let d = ring_verts * (j - 1) + i;
            indices.extend_from_slice(&[a, b, d]);
            indices.extend_from_slice(&[b, c, d]);
        }
    }
    indices
}

/// UV.x runs along the tube, UV.y around it.
fn build_uvs(tubular_segments: usize, radial_segments: usize) -> Vec<f32> {
    let mut uvs = Vec::with_capacity((tubular_segments + 1) * (radial_segments + 1) * 2);
    for i in 0..=tubular_segments {
        for j in 0..=radial_segments {
            uvs.push(i as f32 / tubular_segments as f32);
            uvs.push(j as f32 / radial_segments as f32);
        }
    }
    uvs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_field() -> Arc<CurlField> {
        Arc::new(CurlField::simplex(42))
    }

    fn line_points(n: usize) -> Vec<Vec3> {
        (0..n).map(|i| Vec3::new(0.0, 0.0, -(i as f32))).collect()
    }

    fn tube(n: usize) -> TubeChain {
        TubeChain::new(line_points(n), test_field(), TubeConfig::new()).unwrap()
    }

    // ========== Construction ==========

    #[test]
    fn test_rejects_too_few_points() {
        let err = TubeChain::new(line_points(1), test_field(), TubeConfig::new());
        assert_eq!(err.unwrap_err(), ConfigError::TooFewPoints { got: 1 });
    }

    #[test]
    fn test_rejects_zero_radial_segments() {
        let config = TubeConfig::new().with_radial_segments(0);
        let err = TubeChain::new(line_points(5), test_field(), config);
        assert_eq!(err.unwrap_err(), ConfigError::NoRadialSegments);
    }

    #[test]
    fn test_rejects_bad_radius() {
        let config = TubeConfig::new().with_radius(0.0);
        let err = TubeChain::new(line_points(5), test_field(), config);
        assert!(matches!(err.unwrap_err(), ConfigError::InvalidRadius { .. }));
    }

    #[test]
    fn test_buffer_sizes() {
        let t = tube(5);
        // 5 rings x 13 ring verts x 3 floats
        assert_eq!(t.vertex_count(), 5 * 13);
        assert_eq!(t.positions().len(), 5 * 13 * 3);
        assert_eq!(t.normals().len(), 5 * 13 * 3);
        // 4 quads rings x 12 radial x 2 triangles x 3 indices
        assert_eq!(t.indices().len(), 4 * 12 * 6);
        assert_eq!(t.uvs().len(), 5 * 13 * 2);
    }

    #[test]
    fn test_buffers_filled_at_construction() {
        let t = tube(5);
        // Ring 0 vertex 0 must sit one radius from the head ring center.
        let center = t.ring_center(0);
        let v = Vec3::new(t.positions()[0], t.positions()[1], t.positions()[2]);
        assert!((v.distance(center) - t.radius()).abs() < 1e-5);
    }

    // ========== Chain motion ==========

    #[test]
    fn test_chain_follow_shift() {
        let mut t = tube(5);
        let before: Vec<Vec3> = t.points().to_vec();
        t.advance(1.0 / 60.0, Motion::Drift);
        for i in 1..5 {
            assert_eq!(t.points()[i], before[i - 1]);
        }
    }

    #[test]
    fn test_length_never_changes() {
        let mut t = tube(8);
        for frame in 0..50 {
            let motion = if frame % 2 == 0 {
                Motion::Drift
            } else {
                Motion::Seek(Vec3::new(1.0, 2.0, 3.0))
            };
            t.advance(1.0 / 60.0, motion);
            assert_eq!(t.points().len(), 8);
        }
    }

    #[test]
    fn test_seek_moves_head_toward_target() {
        let mut t = tube(5);
        let start = t.head();
        let target = start + Vec3::X;
        let dt = 1.0 / 60.0;
        t.advance(dt, Motion::Seek(target));

        let moved = t.head() - start;
        assert!(moved.x > 0.0, "head did not move toward +X");
        assert!(moved.x <= t.vlimit() * (dt * REFERENCE_FPS) + 1e-6);
        assert!(moved.y.abs() < 1e-6);
        assert!(moved.z.abs() < 1e-6);
    }

    #[test]
    fn test_velocity_clamped_every_frame() {
        let mut t = tube(5);
        let dt = 1.0 / 60.0;
        let limit = t.vlimit() * (dt * REFERENCE_FPS) + 1e-6;
        for _ in 0..100 {
            t.advance(dt, Motion::Seek(Vec3::new(50.0, -20.0, 10.0)));
            let v = t.velocity();
            assert!(v.x.abs() <= limit && v.y.abs() <= limit && v.z.abs() <= limit);
        }
    }

    #[test]
    fn test_zero_dt_shifts_but_does_not_move_head() {
        let mut t = tube(5);
        let before: Vec<Vec3> = t.points().to_vec();
        t.advance(0.0, Motion::Seek(Vec3::new(9.0, 9.0, 9.0)));

        // Shift still happened...
        for i in 1..5 {
            assert_eq!(t.points()[i], before[i - 1]);
        }
        // ...but the head stayed where the old head was.
        assert_eq!(t.head(), before[0]);
    }

    #[test]
    fn test_seek_at_target_is_a_zero_contribution() {
        let mut t = tube(5);
        let head = t.head();
        // Target exactly on the head: direction is undefined, treated as zero.
        t.advance(1.0 / 60.0, Motion::Seek(head));
        assert_eq!(t.velocity(), Vec3::ZERO);
    }

    // ========== Mesh invariants ==========

    #[test]
    fn test_mesh_vertices_sit_on_ring_circles() {
        let mut t = tube(6);
        for _ in 0..5 {
            t.advance(1.0 / 60.0, Motion::Drift);
        }
        let ring_verts = t.radial_segments() + 1;
        for i in 0..=t.tubular_segments() {
            let center = t.ring_center(i);
            for j in 0..ring_verts {
                let offset = 3 * (i * ring_verts + j);
                let n = Vec3::new(
                    t.normals()[offset],
                    t.normals()[offset + 1],
                    t.normals()[offset + 2],
                );
                let v = Vec3::new(
                    t.positions()[offset],
                    t.positions()[offset + 1],
                    t.positions()[offset + 2],
                );
                assert!((n.length() - 1.0).abs() < 1e-5);
                assert!(v.distance(center + n * t.radius()) < 1e-5);
            }
        }
    }

    #[test]
    fn test_ring_seam_vertices_coincide() {
        // Radial step 0 and radial step `radial_segments` close the ring.
        let t = tube(5);
        let ring_verts = t.radial_segments() + 1;
        for i in 0..=t.tubular_segments() {
            let first = 3 * (i * ring_verts);
            let last = 3 * (i * ring_verts + t.radial_segments());
            for k in 0..3 {
                assert!((t.positions()[first + k] - t.positions()[last + k]).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn test_caps_track_curve_ends() {
        let mut t = tube(5);
        t.advance(1.0 / 60.0, Motion::Seek(Vec3::new(1.0, 0.0, 0.0)));
        let (first, last) = t.cap_positions();
        assert!(first.distance(t.points()[0]) < 1e-4);
        assert!(last.distance(t.points()[4]) < 1e-4);
    }

    #[test]
    fn test_byte_views_cover_buffers() {
        let t = tube(4);
        assert_eq!(t.position_bytes().len(), t.positions().len() * 4);
        assert_eq!(t.normal_bytes().len(), t.normals().len() * 4);
        assert_eq!(t.index_bytes().len(), t.indices().len() * 4);
    }
}
