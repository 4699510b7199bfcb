//! Wavefront OBJ format support.
//!
//! Loading goes through `tobj`, which handles the full grammar (groups,
//! objects, negative indices, polygons). Only positions and faces are kept.
//! Saving writes `v` and `f` records only.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use nalgebra::Point3;

use crate::error::{MeshError, Result};
use crate::mesh::{build_from_triangles, IndexedMesh, MeshIndex};

/// Load a mesh from an OBJ file.
///
/// All objects and groups in the file are merged into one mesh. Polygons are
/// fan-triangulated. Vertices are numbered in order of first use, and
/// vertices no face references are dropped.
///
/// # Example
///
/// ```no_run
/// use pare::io::obj;
/// use pare::mesh::IndexedMesh;
///
/// let mesh: IndexedMesh = obj::load("model.obj").unwrap();
/// ```
pub fn load<P: AsRef<Path>, I: MeshIndex>(path: P) -> Result<IndexedMesh<I>> {
    let path = path.as_ref();
    let options = tobj::LoadOptions {
        triangulate: true,
        single_index: false,
        ignore_points: true,
        ignore_lines: true,
        ..Default::default()
    };
    // Materials are irrelevant here, and a missing .mtl is not an error.
    let (models, _materials) =
        tobj::load_obj(path, &options).map_err(|e| MeshError::load(path, e))?;

    let mut vertices: Vec<Point3<f64>> = Vec::new();
    let mut faces: Vec<[usize; 3]> = Vec::new();

    for model in &models {
        let mesh = &model.mesh;
        if mesh.positions.len() % 3 != 0 {
            return Err(MeshError::load(
                path,
                format!("object '{}' has a truncated position list", model.name),
            ));
        }
        if mesh.indices.len() % 3 != 0 {
            return Err(MeshError::load(
                path,
                format!("object '{}' was not fully triangulated", model.name),
            ));
        }

        let offset = vertices.len();
        vertices.extend(mesh.positions.chunks_exact(3).map(|p| {
            Point3::new(f64::from(p[0]), f64::from(p[1]), f64::from(p[2]))
        }));
        faces.extend(mesh.indices.chunks_exact(3).map(|f| {
            [
                offset + f[0] as usize,
                offset + f[1] as usize,
                offset + f[2] as usize,
            ]
        }));
    }

    if vertices.is_empty() {
        return Err(MeshError::EmptyMesh);
    }

    build_from_triangles(&vertices, &faces)
}

/// Save a mesh to an OBJ file.
///
/// Every triangle slot is written, degenerate ones included.
///
/// # Example
///
/// ```no_run
/// use pare::io::obj;
/// use pare::mesh::{primitives, IndexedMesh};
///
/// let mesh: IndexedMesh = primitives::unit_cube();
/// obj::save(&mesh, "cube.obj").unwrap();
/// ```
pub fn save<P: AsRef<Path>, I: MeshIndex>(mesh: &IndexedMesh<I>, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "# Generated by pare")?;
    writeln!(
        writer,
        "# {} vertices, {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    )?;

    for p in mesh.positions() {
        writeln!(writer, "v {} {} {}", p.x, p.y, p.z)?;
    }

    // OBJ indices are 1-based.
    for [a, b, c] in mesh.triangles() {
        writeln!(writer, "f {} {} {}", a + 1, b + 1, c + 1)?;
    }

    writer.flush()?;
    Ok(())
}
