//! Curl of a 3D scalar noise field.
//!
//! A [`CurlField`] derives a smooth, divergence-free-looking vector field
//! from any scalar [`Noise3`] by finite differencing. Advecting points
//! through the field produces the swirling, never-bunching flow used to
//! drive drifting tubes.
//!
//! The field is pure: [`CurlField::curl`] has no internal state and always
//! returns the same vector for the same input point. Wrap one in an `Arc`
//! and share it across every tube in a scene.
//!
//! # Example
//!
//! ```ignore
//! use tendrils::field::CurlField;
//! use tendrils::Vec3;
//!
//! let field = CurlField::simplex(42);
//! let v = field.curl(Vec3::new(0.5, -1.0, 2.0));
//! // v is unnormalized; normalize it if only the direction matters.
//! ```
//!
//! # Choosing an epsilon
//!
//! The finite-difference step must match the characteristic wavelength of
//! the noise it samples. The default (1e-4) suits simplex-style noise with
//! ~unit wavelength. A coarse tiled noise with a wavelength near one cell
//! wants a step near 1.0. Set it with [`CurlField::with_eps`].

use glam::Vec3;

use crate::noise::{Noise3, PerlinNoise3, Simplex3};

/// Default finite-difference step, tuned for simplex-scale noise.
pub const DEFAULT_EPS: f32 = 1e-4;

/// A divergence-free-looking vector field derived from scalar noise.
pub struct CurlField {
    noise: Box<dyn Noise3>,
    eps: f32,
}

impl core::fmt::Debug for CurlField {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CurlField")
            .field("eps", &self.eps)
            .finish_non_exhaustive()
    }
}

impl CurlField {
    /// Create a curl field over an arbitrary noise primitive.
    pub fn new(noise: impl Noise3 + 'static) -> Self {
        Self {
            noise: Box::new(noise),
            eps: DEFAULT_EPS,
        }
    }

    /// Create a curl field over seeded OpenSimplex noise.
    pub fn simplex(seed: u32) -> Self {
        Self::new(Simplex3::new(seed))
    }

    /// Create a curl field over seeded Perlin noise.
    pub fn perlin(seed: u32) -> Self {
        Self::new(PerlinNoise3::new(seed))
    }

    /// Set the finite-difference step.
    ///
    /// Must be positive. Match it to the noise function's wavelength:
    /// too small amplifies sampling noise, too large smears the field.
    pub fn with_eps(mut self, eps: f32) -> Self {
        assert!(
            eps > 0.0 && eps.is_finite(),
            "curl epsilon must be positive and finite"
        );
        self.eps = eps;
        self
    }

    /// The configured finite-difference step.
    pub fn eps(&self) -> f32 {
        self.eps
    }

    /// Sample the underlying scalar noise at a point.
    pub fn noise(&self, p: Vec3) -> f32 {
        self.noise.sample(p.x, p.y, p.z)
    }

    /// Approximate the curl of the noise field at `p`.
    ///
    /// Each partial derivative is a centered difference
    /// `(n(p + eps) - n(p - eps)) / (2 * eps)`; the three axis pairs
    /// (YZ, ZX, XY) combine into the x, y and z components. The three
    /// derivatives are shared between components, so one call costs six
    /// noise samples.
    ///
    /// The result is unnormalized. It is finite for any finite input and
    /// deterministic for a fixed noise function and epsilon.
    pub fn curl(&self, p: Vec3) -> Vec3 {
        let e = self.eps;
        let e2 = 2.0 * e;

        let dn_dx =
            (self.noise.sample(p.x + e, p.y, p.z) - self.noise.sample(p.x - e, p.y, p.z)) / e2;
        let dn_dy =
            (self.noise.sample(p.x, p.y + e, p.z) - self.noise.sample(p.x, p.y - e, p.z)) / e2;
        let dn_dz =
            (self.noise.sample(p.x, p.y, p.z + e) - self.noise.sample(p.x, p.y, p.z - e)) / e2;

        Vec3::new(dn_dy - dn_dz, dn_dz - dn_dx, dn_dx - dn_dy)
    }
}
