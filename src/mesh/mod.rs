//! Core mesh data structures.
//!
//! This module provides the indexed triangle mesh that the simplifier works
//! on, plus helpers to build one.
//!
//! # Overview
//!
//! The primary type is [`IndexedMesh`], a vertex buffer paired with a flat
//! index buffer, the same layout that is uploaded to a GPU. The index buffer
//! is generic over its integer width ([`MeshIndex`]), so the mesh can be
//! simplified directly in the format it will be drawn with.
//!
//! # Construction
//!
//! ```
//! use pare::mesh::{IndexedMesh, build_from_triangles};
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 0.0),
//! ];
//! let faces = vec![[0, 1, 2]];
//!
//! let mesh: IndexedMesh<u16> = build_from_triangles(&vertices, &faces).unwrap();
//! ```

mod builder;
mod index;
pub mod primitives;
mod store;

pub use builder::{build_from_triangles, to_face_vertex};
pub use index::MeshIndex;
pub use store::{IndexedMesh, Relocation};
