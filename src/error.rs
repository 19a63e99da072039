//! Error types for tendrils.
//!
//! Configuration problems are caught at construction time and reported as
//! [`ConfigError`]; the per-frame animation path is infallible.

use std::fmt;

/// Errors raised when a tube or scene is built with invalid parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A tube chain was given fewer than two control points.
    TooFewPoints {
        /// Number of points actually supplied.
        got: usize,
    },
    /// A tube was configured with zero radial segments.
    NoRadialSegments,
    /// A tube was configured with a radius that is zero, negative, or not finite.
    InvalidRadius {
        /// The offending radius value.
        got: f32,
    },
    /// A scene was built with zero tubes.
    NoTubes,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::TooFewPoints { got } => write!(
                f,
                "A tube chain needs at least 2 control points, got {}.",
                got
            ),
            ConfigError::NoRadialSegments => write!(
                f,
                "A tube needs at least 1 radial segment to form a cross-section."
            ),
            ConfigError::InvalidRadius { got } => {
                write!(f, "Tube radius must be positive and finite, got {}.", got)
            }
            ConfigError::NoTubes => write!(
                f,
                "A scene needs at least one tube. Use .with_tube_count() to set the count."
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
