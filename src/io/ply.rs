//! PLY (Stanford polygon) format support.
//!
//! Loading accepts ASCII and binary files through `ply-rs`. Saving writes
//! ASCII with double-precision coordinates, so positions survive a round trip
//! exactly and vertex order is preserved.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use nalgebra::Point3;
use ply_rs::parser::Parser;
use ply_rs::ply::{DefaultElement, Property};

use crate::error::{MeshError, Result};
use crate::mesh::{build_from_triangles, IndexedMesh, MeshIndex};

/// Load a mesh from a PLY file.
///
/// Faces with more than three corners are fan-triangulated. A file without a
/// `face` element loads as a point set with no triangles.
///
/// # Example
///
/// ```no_run
/// use pare::io::ply;
/// use pare::mesh::IndexedMesh;
///
/// let mesh: IndexedMesh = ply::load("model.ply").unwrap();
/// ```
pub fn load<P: AsRef<Path>, I: MeshIndex>(path: P) -> Result<IndexedMesh<I>> {
    let path = path.as_ref();
    let mut reader = BufReader::new(File::open(path)?);

    let parser = Parser::<DefaultElement>::new();
    let ply = parser
        .read_ply(&mut reader)
        .map_err(|e| MeshError::load(path, e))?;

    let vertex_element = ply
        .payload
        .get("vertex")
        .ok_or_else(|| MeshError::load(path, "no vertex element"))?;
    if vertex_element.is_empty() {
        return Err(MeshError::EmptyMesh);
    }

    let vertices = vertex_element
        .iter()
        .enumerate()
        .map(|(i, vertex)| {
            let coord = |name: &str| {
                float_property(vertex, name).ok_or_else(|| {
                    MeshError::load(path, format!("vertex {} has no numeric '{}'", i, name))
                })
            };
            Ok(Point3::new(coord("x")?, coord("y")?, coord("z")?))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut faces: Vec<[usize; 3]> = Vec::new();
    for (i, face) in ply.payload.get("face").into_iter().flatten().enumerate() {
        let corners = list_property(face, "vertex_indices")
            .or_else(|| list_property(face, "vertex_index"))
            .ok_or_else(|| MeshError::load(path, format!("face {} has no vertex index list", i)))?;

        if corners.len() < 3 {
            return Err(MeshError::load(
                path,
                format!("face {} has only {} corners", i, corners.len()),
            ));
        }
        for k in 1..corners.len() - 1 {
            faces.push([corners[0], corners[k], corners[k + 1]]);
        }
    }

    build_from_triangles(&vertices, &faces)
}

fn float_property(element: &DefaultElement, name: &str) -> Option<f64> {
    match element.get(name)? {
        Property::Float(v) => Some(f64::from(*v)),
        Property::Double(v) => Some(*v),
        Property::Int(v) => Some(f64::from(*v)),
        Property::UInt(v) => Some(f64::from(*v)),
        Property::Short(v) => Some(f64::from(*v)),
        Property::UShort(v) => Some(f64::from(*v)),
        Property::Char(v) => Some(f64::from(*v)),
        Property::UChar(v) => Some(f64::from(*v)),
        _ => None,
    }
}

fn list_property(element: &DefaultElement, name: &str) -> Option<Vec<usize>> {
    fn widen<T: Copy + TryInto<usize>>(values: &[T]) -> Option<Vec<usize>> {
        values.iter().map(|&x| x.try_into().ok()).collect()
    }

    match element.get(name)? {
        Property::ListInt(v) => widen(v),
        Property::ListUInt(v) => widen(v),
        Property::ListShort(v) => widen(v),
        Property::ListUShort(v) => widen(v),
        Property::ListChar(v) => widen(v),
        Property::ListUChar(v) => widen(v),
        _ => None,
    }
}

/// Save a mesh to a PLY file (ASCII format).
///
/// Every triangle slot is written, degenerate ones included.
///
/// # Example
///
/// ```no_run
/// use pare::io::ply;
/// use pare::mesh::{primitives, IndexedMesh};
///
/// let mesh: IndexedMesh = primitives::unit_cube();
/// ply::save(&mesh, "cube.ply").unwrap();
/// ```
pub fn save<P: AsRef<Path>, I: MeshIndex>(mesh: &IndexedMesh<I>, path: P) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);

    writeln!(writer, "ply")?;
    writeln!(writer, "format ascii 1.0")?;
    writeln!(writer, "comment Generated by pare")?;
    writeln!(writer, "element vertex {}", mesh.vertex_count())?;
    for axis in ["x", "y", "z"] {
        writeln!(writer, "property double {}", axis)?;
    }
    writeln!(writer, "element face {}", mesh.triangle_count())?;
    writeln!(writer, "property list uchar uint vertex_indices")?;
    writeln!(writer, "end_header")?;

    for p in mesh.positions() {
        writeln!(writer, "{} {} {}", p.x, p.y, p.z)?;
    }
    for [a, b, c] in mesh.triangles() {
        writeln!(writer, "3 {} {} {}", a, b, c)?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::simplify::{simplify, SimplifyOptions};
    use crate::mesh::primitives;
    use std::fs;

    #[test]
    fn test_round_trip_is_exact() {
        let patch: IndexedMesh =
            primitives::terrain_face(6, nalgebra::Vector3::new(-1.0, 0.0, 0.0)).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("patch.ply");

        save(&patch, &path).unwrap();
        let loaded: IndexedMesh = load(&path).unwrap();
        assert_eq!(loaded, patch);
    }

    #[test]
    fn test_simplified_mesh_round_trip() {
        let mut mesh: IndexedMesh = primitives::grid(4).unwrap();
        simplify(&mut mesh, &SimplifyOptions::default().with_max_contractions(10));
        assert!(mesh.degenerate_triangle_count() > 0);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("simplified.ply");
        save(&mesh, &path).unwrap();
        let loaded: IndexedMesh<u16> = load(&path).unwrap();

        assert_eq!(loaded.vertex_count(), mesh.vertex_count());
        assert_eq!(loaded.index_count(), mesh.index_count());
        assert_eq!(loaded.degenerate_triangle_count(), mesh.degenerate_triangle_count());
    }

    #[test]
    fn test_load_polygon_face() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pentagon.ply");
        fs::write(
            &path,
            "ply\nformat ascii 1.0\nelement vertex 5\nproperty float x\nproperty float y\n\
             property float z\nelement face 1\nproperty list uchar int vertex_index\nend_header\n\
             0 0 0\n1 0 0\n1.5 1 0\n0.5 1.5 0\n-0.5 1 0\n5 0 1 2 3 4\n",
        )
        .unwrap();

        let mesh: IndexedMesh = load(&path).unwrap();
        assert_eq!(mesh.vertex_count(), 5);
        assert_eq!(mesh.triangle_count(), 3);
        assert_eq!(mesh.triangle(2), [0, 3, 4]);
    }

    #[test]
    fn test_out_of_range_face_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.ply");
        fs::write(
            &path,
            "ply\nformat ascii 1.0\nelement vertex 3\nproperty float x\nproperty float y\n\
             property float z\nelement face 1\nproperty list uchar int vertex_indices\nend_header\n\
             0 0 0\n1 0 0\n0 1 0\n3 0 1 7\n",
        )
        .unwrap();

        let err = load::<_, u32>(&path).unwrap_err();
        assert!(matches!(err, MeshError::InvalidVertexIndex { triangle: 0, vertex: 7 }));
    }
}
