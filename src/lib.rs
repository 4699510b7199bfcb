//! # Pare
//!
//! Mesh simplification with quadric error metrics.
//!
//! Pare stores a triangle mesh as a flat vertex array plus a flat index
//! buffer, and reduces its vertex count by repeatedly merging the vertex pair
//! whose merge adds the least squared distance to the original surface.
//! Merged vertices are removed from the store as they go, so the mesh is
//! always compact; collapsed triangles stay in the index buffer as
//! degenerate triangles.
//!
//! ## Features
//!
//! - **Indexed mesh store**: 16-, 32- or 64-bit indices, bounds-checked access
//! - **Quadric error metrics**: Garland–Heckbert plane quadrics with a
//!   singular-system fallback
//! - **Indexed priority queue**: pairs are re-keyed in place after each merge
//! - **Stopping conditions**: error limit, contraction cap, deadline
//! - **File formats**: OBJ, STL, PLY
//!
//! ## Quick Start
//!
//! ```no_run
//! use pare::prelude::*;
//!
//! let mut mesh: IndexedMesh = pare::io::load("model.obj").unwrap();
//! let stats = simplify(&mut mesh, &SimplifyOptions::with_error_limit(1e-4));
//! println!("{}", stats);
//! pare::io::save(&mesh, "model_simplified.obj").unwrap();
//! ```
//!
//! ## Building Meshes Programmatically
//!
//! ```
//! use pare::prelude::*;
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//! ];
//! let faces = vec![[0, 1, 2], [0, 2, 3]];
//!
//! let mut mesh: IndexedMesh = build_from_triangles(&vertices, &faces).unwrap();
//! let stats = simplify_to_error(&mut mesh, 1.0);
//!
//! assert!(stats.contractions > 0);
//! assert_eq!(mesh.index_count(), 6);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod error;
pub mod io;
pub mod mesh;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use pare::prelude::*;
/// ```
pub mod prelude {
    pub use crate::algo::simplify::{
        simplify, simplify_to_error, simplify_with_progress, QuadricPolicy, SimplifyOptions,
        SimplifyStats, Termination,
    };
    pub use crate::algo::Progress;
    pub use crate::error::{MeshError, Result};
    pub use crate::mesh::{build_from_triangles, to_face_vertex, IndexedMesh, MeshIndex, Relocation};
}

// Re-export nalgebra types for convenience
pub use nalgebra;
