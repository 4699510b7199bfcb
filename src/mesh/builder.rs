//! Mesh construction utilities.
//!
//! This module converts between [`IndexedMesh`] and the face-vertex lists
//! found in mesh file formats and procedural generators.

use nalgebra::Point3;

use super::index::MeshIndex;
use super::store::IndexedMesh;
use crate::error::{MeshError, Result};

/// Build an indexed mesh from vertices and triangle faces.
///
/// # Arguments
/// * `vertices` - List of vertex positions
/// * `faces` - List of triangle faces, each as [v0, v1, v2] indices
///
/// # Returns
/// An indexed mesh, or an error if a face references a missing vertex or the
/// vertex count does not fit in `I`.
///
/// # Example
/// ```
/// use pare::mesh::{build_from_triangles, IndexedMesh};
/// use nalgebra::Point3;
///
/// let vertices = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.5, 1.0, 0.0),
/// ];
/// let faces = vec![[0, 1, 2]];
///
/// let mesh: IndexedMesh = build_from_triangles(&vertices, &faces).unwrap();
/// assert_eq!(mesh.vertex_count(), 3);
/// assert_eq!(mesh.triangle_count(), 1);
/// ```
pub fn build_from_triangles<I: MeshIndex>(
    vertices: &[Point3<f64>],
    faces: &[[usize; 3]],
) -> Result<IndexedMesh<I>> {
    if vertices.len() > I::capacity() {
        return Err(MeshError::IndexOverflow {
            count: vertices.len(),
            index_type: I::NAME,
        });
    }

    let mut indices = Vec::with_capacity(faces.len() * 3);
    for (fi, face) in faces.iter().enumerate() {
        for &vi in face {
            if vi >= vertices.len() {
                return Err(MeshError::InvalidVertexIndex { triangle: fi, vertex: vi });
            }
            indices.push(I::from_usize(vi));
        }
    }

    IndexedMesh::new(vertices.to_vec(), indices)
}

/// Extract vertex positions and triangle faces from an indexed mesh.
///
/// Degenerate triangle slots are kept so that the triangle count matches the
/// index buffer.
pub fn to_face_vertex<I: MeshIndex>(mesh: &IndexedMesh<I>) -> (Vec<Point3<f64>>, Vec<[usize; 3]>) {
    (mesh.positions().to_vec(), mesh.triangles().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_and_extract() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let faces = vec![[0, 1, 2], [0, 2, 3]];

        let mesh: IndexedMesh<u16> = build_from_triangles(&vertices, &faces).unwrap();
        assert_eq!(mesh.indices(), &[0, 1, 2, 0, 2, 3]);

        let (v, f) = to_face_vertex(&mesh);
        assert_eq!(v, vertices);
        assert_eq!(f, faces);
    }

    #[test]
    fn test_invalid_face_index() {
        let vertices = vec![Point3::origin(); 3];
        let result: Result<IndexedMesh> = build_from_triangles(&vertices, &[[0, 1, 5]]);
        assert!(matches!(
            result,
            Err(MeshError::InvalidVertexIndex { triangle: 0, vertex: 5 })
        ));
    }

    #[test]
    fn test_no_faces_is_allowed() {
        let vertices = vec![Point3::origin(); 3];
        let mesh: IndexedMesh = build_from_triangles(&vertices, &[]).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.index_count(), 0);
    }
}
