//! Error types for pare.
//!
//! This module defines all error types used throughout the library.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors that can occur while building, loading, or saving meshes.
///
/// Simplification itself never fails: degenerate geometry is absorbed by the
/// cost evaluator and budget exhaustion is a normal termination.
#[derive(Error, Debug)]
pub enum MeshError {
    /// The mesh has no vertices.
    #[error("mesh has no vertices")]
    EmptyMesh,

    /// A triangle references an invalid vertex index.
    #[error("triangle {triangle} references invalid vertex index {vertex}")]
    InvalidVertexIndex {
        /// The triangle index.
        triangle: usize,
        /// The invalid vertex index.
        vertex: usize,
    },

    /// The index buffer length is not a multiple of three.
    #[error("index count {count} is not a multiple of 3")]
    IndexCountNotTriangles {
        /// The offending index count.
        count: usize,
    },

    /// The vertex count cannot be addressed by the chosen index type.
    #[error("{count} vertices cannot be addressed with {index_type} indices")]
    IndexOverflow {
        /// Number of vertices in the mesh.
        count: usize,
        /// Name of the index type.
        index_type: &'static str,
    },

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error loading mesh from file.
    #[error("failed to load mesh from {path}: {message}")]
    LoadError {
        /// The file path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Error saving mesh to file.
    #[error("failed to save mesh to {path}: {message}")]
    SaveError {
        /// The file path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Unsupported file format.
    #[error("unsupported file format: {extension}")]
    UnsupportedFormat {
        /// The file extension.
        extension: String,
    },

    /// Invalid parameter value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },
}

impl MeshError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        MeshError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }

    pub(crate) fn load<P: Into<PathBuf>, M: std::fmt::Display>(path: P, message: M) -> Self {
        MeshError::LoadError {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub(crate) fn save<P: Into<PathBuf>, M: std::fmt::Display>(path: P, message: M) -> Self {
        MeshError::SaveError {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MeshError::InvalidVertexIndex { triangle: 3, vertex: 17 };
        assert_eq!(
            err.to_string(),
            "triangle 3 references invalid vertex index 17"
        );

        let err = MeshError::invalid_param("error_limit", -1.0, "must be non-negative");
        assert!(err.to_string().contains("error_limit = -1"));
    }

    #[test]
    fn test_index_overflow_display() {
        let err = MeshError::IndexOverflow { count: 70_000, index_type: "u16" };
        assert!(err.to_string().contains("70000"));
        assert!(err.to_string().contains("u16"));
    }
}
