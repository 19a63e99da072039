//! Frame timing for the animation loop.
//!
//! Tube motion is authored against a 60 fps reference: steering strength
//! and velocity limits are "per reference frame" quantities, and
//! [`TubeChain::advance`](crate::TubeChain::advance) multiplies them by
//! `delta * REFERENCE_FPS` so the visible speed is identical at 30, 60 or
//! 144 fps. [`Time`] supplies that delta from the host's loop, with an
//! optional fixed delta for deterministic stepping in tests and demos.
//!
//! # Example
//!
//! ```ignore
//! use tendrils::time::Time;
//!
//! let mut time = Time::new();
//! loop {
//!     let (elapsed, delta) = time.update();
//!     scene.advance(delta, Motion::Drift);
//! }
//! ```

use std::time::{Duration, Instant};

/// The frame rate the motion constants are normalized against.
pub const REFERENCE_FPS: f32 = 60.0;

/// Time tracking for the per-frame animation loop.
#[derive(Debug)]
pub struct Time {
    /// When the timer was created.
    start: Instant,
    /// When the last frame occurred.
    last_frame: Instant,
    /// Total elapsed time in seconds.
    elapsed_secs: f32,
    /// Time since last frame in seconds.
    delta_secs: f32,
    /// Total frames since start.
    frame_count: u64,
    /// Whether time is paused.
    paused: bool,
    /// Accumulated time spent paused.
    pause_elapsed: Duration,
    /// Fixed delta time for deterministic updates (optional).
    fixed_delta: Option<f32>,
}

impl Time {
    /// Create a new time tracker starting from now.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            elapsed_secs: 0.0,
            delta_secs: 0.0,
            frame_count: 0,
            paused: false,
            pause_elapsed: Duration::ZERO,
            fixed_delta: None,
        }
    }

    /// Create a tracker that always reports the given delta.
    ///
    /// Handy for tests and headless demos that step a known amount per
    /// frame regardless of wall-clock time.
    pub fn fixed(delta: f32) -> Self {
        let mut time = Self::new();
        time.fixed_delta = Some(delta);
        time
    }

    /// Update timing values. Call once per frame.
    ///
    /// Returns `(elapsed_time, delta_time)` for convenience.
    pub fn update(&mut self) -> (f32, f32) {
        let now = Instant::now();

        if self.paused {
            self.delta_secs = 0.0;
            return (self.elapsed_secs, self.delta_secs);
        }

        let raw_delta = now.duration_since(self.last_frame).as_secs_f32();
        self.delta_secs = self.fixed_delta.unwrap_or(raw_delta);
        self.last_frame = now;

        // Under a fixed delta, elapsed time is the sum of steps taken, so a
        // headless run advances its clock deterministically.
        if self.fixed_delta.is_some() {
            self.elapsed_secs += self.delta_secs;
        } else {
            let raw_elapsed = now.duration_since(self.start) - self.pause_elapsed;
            self.elapsed_secs = raw_elapsed.as_secs_f32();
        }

        self.frame_count += 1;

        (self.elapsed_secs, self.delta_secs)
    }

    /// Total elapsed time in seconds since start.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs
    }

    /// Time since last frame in seconds (delta time).
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// The current delta expressed in reference frames: `delta * 60`.
    ///
    /// This is the factor the motion rules scale by each frame.
    #[inline]
    pub fn step_scale(&self) -> f32 {
        self.delta_secs * REFERENCE_FPS
    }

    /// Total frames since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Whether time is currently paused.
    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pause time progression.
    ///
    /// While paused, `delta()` returns 0, so advancing a scene freezes it
    /// in place (the chain shift still runs, moving nothing).
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume time progression after pausing.
    pub fn resume(&mut self) {
        if self.paused {
            let now = Instant::now();
            self.pause_elapsed += now.duration_since(self.last_frame);
            self.last_frame = now;
            self.paused = false;
        }
    }

    /// Set a fixed delta time for deterministic updates.
    ///
    /// Pass `None` to return to real frame timing.
    pub fn set_fixed_delta(&mut self, delta: Option<f32>) {
        self.fixed_delta = delta;
    }

    /// Reset the timer to its initial state.
    pub fn reset(&mut self) {
        *self = Self {
            fixed_delta: self.fixed_delta,
            ..Self::new()
        };
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}
