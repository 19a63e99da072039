//! # Tendrils
//!
//! Curl-noise tube trails - procedural trail animation made easy.
//!
//! Tendrils animates swarms of tube-shaped trails: each tube is a
//! fixed-length polyline whose head wanders through a curl-noise flow field
//! (or chases a target), while the rest of the chain follows the path the
//! head took. Every frame the tube's surface mesh is rebuilt in place from
//! the moving polyline, producing position/normal buffers ready for any
//! renderer to upload.
//!
//! ## Quick Start
//!
//! ```ignore
//! use tendrils::prelude::*;
//!
//! fn main() -> Result<(), ConfigError> {
//!     let mut scene = Scene::builder()
//!         .with_tube_count(100)
//!         .with_field(CurlField::simplex(42))
//!         .build()?;
//!
//!     let mut time = Time::new();
//!     loop {
//!         let (_, delta) = time.update();
//!
//!         // Drift through the noise field, or chase the pointer:
//!         scene.advance(delta, Motion::Drift);
//!
//!         for tube in scene.tubes() {
//!             // Hand the buffers to your renderer.
//!             let _ = (tube.position_bytes(), tube.normal_bytes());
//!         }
//!     }
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Fields
//!
//! A [`CurlField`] turns any scalar [`Noise3`](noise::Noise3) into a
//! smooth, divergence-free-looking vector field by finite-difference curl.
//! One field is shared (via `Arc`) by every tube in a scene; sampling it is
//! pure and deterministic.
//!
//! ### Tubes
//!
//! A [`TubeChain`] owns a fixed-length polyline and its mesh buffers. Each
//! [`TubeChain::advance`] shifts the chain (every point takes its
//! predecessor's position), steers the head, and rewrites the vertex
//! positions and normals in place - no allocation after construction, and
//! the buffers are never stale.
//!
//! ### Motion
//!
//! The caller picks a [`Motion`] policy per frame: [`Motion::Drift`]
//! (ambient curl-noise wandering) or [`Motion::Seek`] (pursue a target,
//! typically the tracked pointer). The mode lives with the caller's input
//! handling, not inside the tubes.
//!
//! ### Scenes
//!
//! A [`Scene`] spawns and owns many tubes over one shared field, with a
//! builder for counts, seeding and custom spawners. `scene.advance(dt,
//! motion)` steps the whole swarm.
//!
//! ## Frame-rate independence
//!
//! Motion constants are authored at a 60 fps reference
//! ([`time::REFERENCE_FPS`]); `advance` scales them by `delta * 60` so
//! tubes cover the same distance per second at any frame rate.

mod curve;
mod error;
pub mod field;
pub mod noise;
mod scene;
pub mod spawn;
pub mod time;
mod tube;

pub use bytemuck;
pub use curve::{CatmullRom3, FrenetFrames};
pub use error::ConfigError;
pub use field::CurlField;
pub use glam::Vec3;
pub use scene::{Scene, SceneBuilder};
pub use spawn::{SpawnContext, TubeSeed};
pub use time::Time;
pub use tube::{Motion, TubeChain, TubeConfig};

/// Convenient re-exports for common usage.
///
/// # Usage
///
/// ```ignore
/// use tendrils::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::ConfigError;
    pub use crate::field::CurlField;
    pub use crate::noise::{Noise3, PerlinNoise3, Simplex3};
    pub use crate::scene::{Scene, SceneBuilder};
    pub use crate::spawn::{SpawnContext, TubeSeed};
    pub use crate::time::Time;
    pub use crate::tube::{Motion, TubeChain, TubeConfig};
    pub use crate::Vec3;
}
