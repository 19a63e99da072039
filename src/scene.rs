//! Scene builder and per-frame driver for a swarm of tubes.
//!
//! A [`Scene`] owns a set of [`TubeChain`]s and the [`CurlField`] they
//! share. The caller's render loop calls [`Scene::advance`] once per frame
//! with the elapsed time and the frame's motion policy, then uploads each
//! tube's buffers. The scene itself never touches a renderer.
//!
//! # Example
//!
//! ```ignore
//! use tendrils::prelude::*;
//!
//! let mut scene = Scene::builder()
//!     .with_tube_count(100)
//!     .with_field(CurlField::simplex(7))
//!     .build()?;
//!
//! // Per frame, from the host's animation callback:
//! scene.advance(dt, if trail_mode { Motion::Seek(cursor) } else { Motion::Drift });
//! for tube in scene.tubes() {
//!     upload(tube.position_bytes(), tube.normal_bytes());
//! }
//! # Ok::<(), tendrils::ConfigError>(())
//! ```

use std::sync::Arc;

use crate::error::ConfigError;
use crate::field::CurlField;
use crate::spawn::{SpawnContext, TubeSeed};
use crate::tube::{Motion, TubeChain};

/// A built scene: tubes plus their shared curl field.
#[derive(Debug)]
pub struct Scene {
    tubes: Vec<TubeChain>,
    field: Arc<CurlField>,
}

impl Scene {
    /// Start configuring a scene.
    pub fn builder() -> SceneBuilder {
        SceneBuilder::new()
    }

    /// Advance every tube by one frame.
    ///
    /// Tubes are independent of each other; each one's shift-and-rebuild
    /// completes before the next starts, and all buffers are consistent
    /// when this returns.
    pub fn advance(&mut self, dt: f32, motion: Motion) {
        for tube in &mut self.tubes {
            tube.advance(dt, motion);
        }
    }

    /// The tubes, for buffer access after an advance.
    pub fn tubes(&self) -> &[TubeChain] {
        &self.tubes
    }

    /// Mutable tube access, for driving tubes individually.
    pub fn tubes_mut(&mut self) -> &mut [TubeChain] {
        &mut self.tubes
    }

    /// Number of tubes in the scene.
    pub fn len(&self) -> usize {
        self.tubes.len()
    }

    /// Whether the scene has no tubes (never true for a built scene).
    pub fn is_empty(&self) -> bool {
        self.tubes.is_empty()
    }

    /// The shared curl field.
    pub fn field(&self) -> &Arc<CurlField> {
        &self.field
    }
}

/// Builder for [`Scene`]. Use method chaining, then call `.build()`.
pub struct SceneBuilder {
    tube_count: usize,
    field: Option<CurlField>,
    field_scale: Option<f32>,
    seed: Option<u64>,
    spawner: Box<dyn FnMut(&mut SpawnContext) -> TubeSeed>,
}

impl SceneBuilder {
    /// Create a builder with default settings: 100 scattered tubes over a
    /// freshly seeded simplex curl field.
    pub fn new() -> Self {
        Self {
            tube_count: 100,
            field: None,
            field_scale: None,
            seed: None,
            spawner: Box::new(TubeSeed::scattered),
        }
    }

    /// Set the number of tubes.
    pub fn with_tube_count(mut self, count: usize) -> Self {
        self.tube_count = count;
        self
    }

    /// Use a specific curl field instead of the default simplex one.
    pub fn with_field(mut self, field: CurlField) -> Self {
        self.field = Some(field);
        self
    }

    /// Override the curl-field sampling scale for every spawned tube.
    pub fn with_field_scale(mut self, scale: f32) -> Self {
        self.field_scale = Some(scale);
        self
    }

    /// Make spawning (and the default field) deterministic.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the tube spawner. Called once per tube with a [`SpawnContext`].
    pub fn with_spawner<F>(mut self, spawner: F) -> Self
    where
        F: FnMut(&mut SpawnContext) -> TubeSeed + 'static,
    {
        self.spawner = Box::new(spawner);
        self
    }

    /// Build the scene, spawning and validating every tube.
    ///
    /// # Errors
    ///
    /// Fails on a zero tube count or on any tube seed that violates the
    /// construction rules (see [`TubeChain::new`]).
    pub fn build(mut self) -> Result<Scene, ConfigError> {
        if self.tube_count == 0 {
            return Err(ConfigError::NoTubes);
        }

        let field = Arc::new(match self.field {
            Some(field) => field,
            None => CurlField::simplex(match self.seed {
                Some(seed) => seed as u32,
                None => rand::random(),
            }),
        });

        let mut tubes = Vec::with_capacity(self.tube_count);
        for index in 0..self.tube_count as u32 {
            let mut ctx = match self.seed {
                Some(seed) => SpawnContext::seeded(index, self.tube_count as u32, seed ^ index as u64),
                None => SpawnContext::new(index, self.tube_count as u32),
            };
            let mut seed = (self.spawner)(&mut ctx);
            if let Some(scale) = self.field_scale {
                seed.config.field_scale = scale;
            }
            tubes.push(TubeChain::new(seed.points, Arc::clone(&field), seed.config)?);
        }

        Ok(Scene { tubes, field })
    }
}

impl Default for SceneBuilder {
    fn default() -> Self {
        Self::new()
    }
}
