//! Mesh file I/O.
//!
//! This module provides functions for loading and saving meshes in various formats.
//!
//! # Supported Formats
//!
//! | Format | Extension | Load | Save | Notes |
//! |--------|-----------|------|------|-------|
//! | Wavefront OBJ | `.obj` | ✓ | ✓ | Polygons are fan-triangulated |
//! | STL | `.stl` | ✓ | ✓ | Binary and ASCII load, binary save |
//! | PLY | `.ply` | ✓ | ✓ | ASCII save |
//!
//! Saving writes every triangle slot, including degenerate triangles left
//! behind by simplification, so the saved index count matches the store.
//!
//! # Usage
//!
//! ```no_run
//! use pare::io::{load, save};
//! use pare::mesh::IndexedMesh;
//!
//! // Load with automatic format detection
//! let mesh: IndexedMesh = load("model.obj").unwrap();
//!
//! // Save with automatic format detection
//! save(&mesh, "output.ply").unwrap();
//! ```
//!
//! You can also use format-specific functions:
//!
//! ```no_run
//! use pare::io::obj;
//! use pare::mesh::IndexedMesh;
//!
//! let mesh: IndexedMesh = obj::load("model.obj").unwrap();
//! obj::save(&mesh, "output.obj").unwrap();
//! ```

pub mod obj;
pub mod ply;
pub mod stl;

use std::path::Path;

use crate::error::{MeshError, Result};
use crate::mesh::{IndexedMesh, MeshIndex};

/// Supported mesh file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Wavefront OBJ format.
    Obj,
    /// STL (stereolithography) format.
    Stl,
    /// PLY (Stanford polygon) format.
    Ply,
}

impl Format {
    /// Detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Format> {
        match ext.to_lowercase().as_str() {
            "obj" => Some(Format::Obj),
            "stl" => Some(Format::Stl),
            "ply" => Some(Format::Ply),
            _ => None,
        }
    }

    /// Detect format from file path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Format> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Format::from_extension)
    }

    fn require<P: AsRef<Path>>(path: P) -> Result<Format> {
        let path = path.as_ref();
        Format::from_path(path).ok_or_else(|| MeshError::UnsupportedFormat {
            extension: path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("(none)")
                .to_string(),
        })
    }
}

/// Load a mesh from a file with automatic format detection.
///
/// The format is determined by the file extension.
pub fn load<P: AsRef<Path>, I: MeshIndex>(path: P) -> Result<IndexedMesh<I>> {
    let path = path.as_ref();
    let mesh = match Format::require(path)? {
        Format::Obj => obj::load(path)?,
        Format::Stl => stl::load(path)?,
        Format::Ply => ply::load(path)?,
    };
    log::debug!(
        "loaded {}: {} vertices, {} triangles",
        path.display(),
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    Ok(mesh)
}

/// Save a mesh to a file with automatic format detection.
///
/// The format is determined by the file extension.
pub fn save<P: AsRef<Path>, I: MeshIndex>(mesh: &IndexedMesh<I>, path: P) -> Result<()> {
    let path = path.as_ref();
    match Format::require(path)? {
        Format::Obj => obj::save(mesh, path),
        Format::Stl => stl::save(mesh, path),
        Format::Ply => ply::save(mesh, path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::primitives;

    #[test]
    fn test_format_detection() {
        assert_eq!(Format::from_path("a/b/model.OBJ"), Some(Format::Obj));
        assert_eq!(Format::from_path("scan.ply"), Some(Format::Ply));
        assert_eq!(Format::from_path("part.stl"), Some(Format::Stl));
        assert_eq!(Format::from_path("scene.gltf"), None);
        assert_eq!(Format::from_path("no_extension"), None);
    }

    #[test]
    fn test_unsupported_extension() {
        let mesh: IndexedMesh = primitives::quad();
        let dir = tempfile::tempdir().unwrap();

        let err = save(&mesh, dir.path().join("mesh.fbx")).unwrap_err();
        assert!(matches!(err, MeshError::UnsupportedFormat { ref extension } if extension == "fbx"));

        let err = load::<_, u32>(dir.path().join("mesh")).unwrap_err();
        assert!(matches!(err, MeshError::UnsupportedFormat { ref extension } if extension == "(none)"));
    }

    #[test]
    fn test_dispatch_round_trip() {
        let cube: IndexedMesh = primitives::unit_cube();
        let dir = tempfile::tempdir().unwrap();

        for name in ["cube.obj", "cube.ply", "cube.stl"] {
            let path = dir.path().join(name);
            save(&cube, &path).unwrap();
            let loaded: IndexedMesh = load(&path).unwrap();
            assert_eq!(loaded.vertex_count(), 8, "{}", name);
            assert_eq!(loaded.triangle_count(), 12, "{}", name);
        }
    }
}
