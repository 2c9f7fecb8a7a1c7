//! Error types for link computation.

use std::fmt;

/// Errors that can occur while computing brain/IO links.
#[derive(Debug, Clone)]
pub enum LinkError {
    /// Not enough brain points for the requested operation.
    InsufficientPoints { needed: usize, got: usize },

    /// The point configuration is one the algorithms do not handle:
    /// exactly coincident brain positions, an IO point claimed by no
    /// Voronoi cell, or a generator with no Delaunay neighbors while
    /// other clusters exist. These indicate unhandled geometry, not a
    /// recoverable condition.
    GeometricDefect(String),
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkError::InsufficientPoints { needed, got } => {
                write!(
                    f,
                    "insufficient points: need at least {}, got {}",
                    needed, got
                )
            }
            LinkError::GeometricDefect(msg) => {
                write!(f, "geometric defect: {}", msg)
            }
        }
    }
}

impl std::error::Error for LinkError {}
