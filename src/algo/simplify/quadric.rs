//! Quadric error metrics.

use std::ops::{Add, AddAssign};

use nalgebra::{Matrix4, Point3, Vector4};

use crate::mesh::{IndexedMesh, MeshIndex};

/// Determinant threshold below which the minimizer system counts as singular.
pub const SINGULAR_EPSILON: f64 = 1e-6;

/// Cross products shorter than this have no usable plane.
const DEGENERATE_AREA_EPSILON: f64 = 1e-12;

/// A quadric error matrix (4x4 symmetric matrix).
///
/// Represents the sum of squared distances to a set of planes.
/// Stored as 10 unique elements since the matrix is symmetric.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Quadric {
    /// Upper triangular elements: [a, b, c, d, e, f, g, h, i, j]
    /// Matrix form:
    /// | a b c d |
    /// | b e f g |
    /// | c f h i |
    /// | d g i j |
    data: [f64; 10],
}

impl Quadric {
    /// The zero quadric. Every point has zero error.
    pub const fn zero() -> Self {
        Self { data: [0.0; 10] }
    }

    /// Create the fundamental quadric `p pᵗ` of the plane ax + by + cz + d = 0.
    /// The plane should be normalized (a² + b² + c² = 1).
    pub fn from_plane(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self {
            data: [
                a * a,
                a * b,
                a * c,
                a * d,
                b * b,
                b * c,
                b * d,
                c * c,
                c * d,
                d * d,
            ],
        }
    }

    /// Fundamental quadric of the plane through a triangle.
    ///
    /// Zero-area triangles have no plane and contribute the zero quadric.
    pub fn from_triangle(p0: &Point3<f64>, p1: &Point3<f64>, p2: &Point3<f64>) -> Self {
        match triangle_plane(p0, p1, p2) {
            Some(p) => Self::from_plane(p.x, p.y, p.z, p.w),
            None => Self::zero(),
        }
    }

    /// Evaluate the quadric error for a point.
    /// Returns vᵗ Q v where v = [x, y, z, 1].
    pub fn evaluate(&self, p: &Point3<f64>) -> f64 {
        let [a, b, c, d, e, f, g, h, i, j] = self.data;
        let (x, y, z) = (p.x, p.y, p.z);

        a * x * x + 2.0 * b * x * y + 2.0 * c * x * z + 2.0 * d * x
            + e * y * y + 2.0 * f * y * z + 2.0 * g * y
            + h * z * z + 2.0 * i * z
            + j
    }

    /// Expand to a full 4x4 matrix.
    pub fn to_matrix(&self) -> Matrix4<f64> {
        let [a, b, c, d, e, f, g, h, i, j] = self.data;
        #[rustfmt::skip]
        let m = Matrix4::new(
            a, b, c, d,
            b, e, f, g,
            c, f, h, i,
            d, g, i, j,
        );
        m
    }

    /// Find the point that minimizes the quadric error.
    ///
    /// Solves `M v = (0, 0, 0, 1)ᵗ` where `M` is the quadric with its last row
    /// replaced by `(0, 0, 0, 1)`. Returns None if `|det M|` does not exceed
    /// [`SINGULAR_EPSILON`], which happens for flat or sliver neighborhoods.
    pub fn minimizer(&self) -> Option<Point3<f64>> {
        let mut m = self.to_matrix();
        m[(3, 0)] = 0.0;
        m[(3, 1)] = 0.0;
        m[(3, 2)] = 0.0;
        m[(3, 3)] = 1.0;

        if m.determinant().abs() <= SINGULAR_EPSILON {
            return None;
        }

        let inv = m.try_inverse()?;
        let v = inv * Vector4::new(0.0, 0.0, 0.0, 1.0);
        let p = Point3::new(v.x, v.y, v.z);
        p.iter().all(|c| c.is_finite()).then_some(p)
    }
}

impl AddAssign for Quadric {
    fn add_assign(&mut self, other: Quadric) {
        for (lhs, rhs) in self.data.iter_mut().zip(other.data) {
            *lhs += rhs;
        }
    }
}

impl Add for Quadric {
    type Output = Quadric;

    fn add(mut self, other: Quadric) -> Quadric {
        self += other;
        self
    }
}

/// Plane equation (a, b, c, d) of a triangle with unit normal (a, b, c).
///
/// Returns None for zero-area triangles.
pub fn triangle_plane(p0: &Point3<f64>, p1: &Point3<f64>, p2: &Point3<f64>) -> Option<Vector4<f64>> {
    let normal = (p1 - p0).cross(&(p2 - p0));
    let len = normal.norm();
    if len.is_nan() || len < DEGENERATE_AREA_EPSILON {
        return None;
    }

    let n = normal / len;
    let d = -n.dot(&p0.coords);
    Some(Vector4::new(n.x, n.y, n.z, d))
}

/// Accumulate the quadric of every vertex from the planes of its triangles.
pub fn vertex_quadrics<I: MeshIndex>(mesh: &IndexedMesh<I>) -> Vec<Quadric> {
    let mut quadrics = vec![Quadric::zero(); mesh.vertex_count()];

    for t in 0..mesh.triangle_count() {
        let [p0, p1, p2] = mesh.triangle_positions(t);
        let q = Quadric::from_triangle(&p0, &p1, &p2);
        for v in mesh.triangle(t) {
            quadrics[v] += q;
        }
    }

    quadrics
}

/// Sum of the plane quadrics of the triangles currently touching `v`.
pub fn incident_quadric<I: MeshIndex>(mesh: &IndexedMesh<I>, v: usize) -> Quadric {
    let mut q = Quadric::zero();
    for t in 0..mesh.triangle_count() {
        if mesh.triangle(t).contains(&v) {
            let [p0, p1, p2] = mesh.triangle_positions(t);
            q += Quadric::from_triangle(&p0, &p1, &p2);
        }
    }
    q
}
