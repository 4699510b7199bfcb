//! Procedural meshes for tests, benchmarks and the `demo` command.
//!
//! These are stand-ins for an upstream mesh generator. The simplifier does not
//! depend on how its input was produced.

use nalgebra::{Point3, Vector3};

use super::builder::build_from_triangles;
use super::index::MeshIndex;
use super::store::IndexedMesh;
use crate::error::{MeshError, Result};

/// A unit square in the z = 0 plane, split into two triangles.
pub fn quad<I: MeshIndex>() -> IndexedMesh<I> {
    let vertices = [
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(1.0, 1.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
    ];
    let faces = [[0, 1, 2], [0, 2, 3]];
    small_mesh(&vertices, &faces)
}

/// An axis-aligned unit cube with 8 vertices and 12 triangles, wound
/// counter-clockwise when viewed from outside.
pub fn unit_cube<I: MeshIndex>() -> IndexedMesh<I> {
    let vertices = [
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(1.0, 1.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(0.0, 0.0, 1.0),
        Point3::new(1.0, 0.0, 1.0),
        Point3::new(1.0, 1.0, 1.0),
        Point3::new(0.0, 1.0, 1.0),
    ];
    let faces = [
        [0, 2, 1],
        [0, 3, 2], // bottom
        [4, 5, 6],
        [4, 6, 7], // top
        [0, 1, 5],
        [0, 5, 4], // front
        [3, 7, 6],
        [3, 6, 2], // back
        [0, 4, 7],
        [0, 7, 3], // left
        [1, 2, 6],
        [1, 6, 5], // right
    ];
    small_mesh(&vertices, &faces)
}

/// A flat `n` x `n` grid of unit cells in the z = 0 plane.
pub fn grid<I: MeshIndex>(n: usize) -> Result<IndexedMesh<I>> {
    if n == 0 {
        return Err(MeshError::invalid_param("n", n, "grid needs at least one cell"));
    }

    let mut vertices = Vec::with_capacity((n + 1) * (n + 1));
    let mut faces = Vec::with_capacity(n * n * 2);

    for j in 0..=n {
        for i in 0..=n {
            vertices.push(Point3::new(i as f64, j as f64, 0.0));
        }
    }

    for j in 0..n {
        for i in 0..n {
            let v00 = j * (n + 1) + i;
            let v10 = v00 + 1;
            let v01 = v00 + (n + 1);
            let v11 = v01 + 1;

            faces.push([v00, v10, v11]);
            faces.push([v00, v11, v01]);
        }
    }

    build_from_triangles(&vertices, &faces)
}

/// One face of a cube-sphere: a `resolution` x `resolution` vertex patch of
/// the unit cube face facing `local_up`, projected onto the unit sphere.
///
/// Six of these with the six axis directions tile a sphere, which is how
/// planet terrain meshes are usually seeded.
pub fn terrain_face<I: MeshIndex>(resolution: usize, local_up: Vector3<f64>) -> Result<IndexedMesh<I>> {
    if resolution < 2 {
        return Err(MeshError::invalid_param(
            "resolution",
            resolution,
            "need at least 2 vertices per side",
        ));
    }
    let up_len = local_up.norm();
    if up_len == 0.0 || !up_len.is_finite() {
        return Err(MeshError::invalid_param(
            "local_up",
            format!("{:?}", local_up.as_slice()),
            "must be a non-zero direction",
        ));
    }

    let local_up = local_up / up_len;
    let axis_a = Vector3::new(local_up.y, local_up.z, local_up.x);
    let axis_b = local_up.cross(&axis_a);
    let step = (resolution - 1) as f64;

    let mut vertices = Vec::with_capacity(resolution * resolution);
    let mut faces = Vec::with_capacity((resolution - 1) * (resolution - 1) * 2);

    for y in 0..resolution {
        for x in 0..resolution {
            let px = x as f64 / step;
            let py = y as f64 / step;
            let on_cube = local_up + axis_a * ((px - 0.5) * 2.0) + axis_b * ((py - 0.5) * 2.0);
            vertices.push(Point3::from(on_cube.normalize()));

            if x + 1 < resolution && y + 1 < resolution {
                let i = x + y * resolution;
                faces.push([i, i + resolution + 1, i + resolution]);
                faces.push([i, i + 1, i + resolution + 1]);
            }
        }
    }

    build_from_triangles(&vertices, &faces)
}

fn small_mesh<I: MeshIndex>(vertices: &[Point3<f64>], faces: &[[usize; 3]]) -> IndexedMesh<I> {
    let indices = faces.iter().flatten().map(|&v| I::from_usize(v)).collect();
    IndexedMesh::from_parts_unchecked(vertices.to_vec(), indices)
}
