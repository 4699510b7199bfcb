//! STL (stereolithography) format support.
//!
//! STL stores each triangle with its own three corners. `stl_io` merges
//! bit-identical corners on read, which gives back the shared vertices of a
//! mesh that was written from an indexed store. Vertices no triangle uses
//! cannot be represented and are lost on save.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use nalgebra::{Point3, Vector3};

use crate::algo::simplify::triangle_plane;
use crate::error::{MeshError, Result};
use crate::mesh::{build_from_triangles, IndexedMesh, MeshIndex};

/// Load a mesh from an STL file.
///
/// Automatically detects binary vs ASCII format. Triangles are kept as
/// stored, degenerate ones included.
///
/// # Example
///
/// ```no_run
/// use pare::io::stl;
/// use pare::mesh::IndexedMesh;
///
/// let mesh: IndexedMesh = stl::load("model.stl").unwrap();
/// ```
pub fn load<P: AsRef<Path>, I: MeshIndex>(path: P) -> Result<IndexedMesh<I>> {
    let path = path.as_ref();
    let mut file = File::open(path)?;

    let stl = stl_io::read_stl(&mut file).map_err(|e| MeshError::load(path, e))?;
    if stl.vertices.is_empty() {
        return Err(MeshError::EmptyMesh);
    }

    let vertices: Vec<Point3<f64>> = stl
        .vertices
        .iter()
        .map(|v| Point3::new(f64::from(v[0]), f64::from(v[1]), f64::from(v[2])))
        .collect();
    let faces: Vec<[usize; 3]> = stl.faces.iter().map(|f| f.vertices).collect();

    build_from_triangles(&vertices, &faces)
}

/// Save a mesh to a binary STL file.
///
/// Coordinates are narrowed to `f32`. Degenerate triangles are written with a
/// zero normal.
///
/// # Example
///
/// ```no_run
/// use pare::io::stl;
/// use pare::mesh::{primitives, IndexedMesh};
///
/// let mesh: IndexedMesh = primitives::unit_cube();
/// stl::save(&mesh, "cube.stl").unwrap();
/// ```
pub fn save<P: AsRef<Path>, I: MeshIndex>(mesh: &IndexedMesh<I>, path: P) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);

    let vertex = |p: &Point3<f64>| stl_io::Vertex::new([p.x as f32, p.y as f32, p.z as f32]);

    let triangles: Vec<stl_io::Triangle> = (0..mesh.triangle_count())
        .map(|t| {
            let [p0, p1, p2] = mesh.triangle_positions(t);
            let n = triangle_plane(&p0, &p1, &p2).map_or_else(Vector3::zeros, |plane| plane.xyz());

            stl_io::Triangle {
                normal: stl_io::Normal::new([n.x as f32, n.y as f32, n.z as f32]),
                vertices: [vertex(&p0), vertex(&p1), vertex(&p2)],
            }
        })
        .collect();

    stl_io::write_stl(&mut writer, triangles.iter()).map_err(|e| MeshError::save(path, e))?;

    Ok(())
}
