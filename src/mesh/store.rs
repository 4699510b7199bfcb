//! Indexed triangle mesh storage.
//!
//! [`IndexedMesh`] is the flat vertex/index layout that a renderer uploads:
//! a dense vector of positions and a flat index buffer with three entries per
//! triangle. The simplifier mutates it in place. Vertices are removed by
//! swapping the last live vertex into the freed slot, so the vertex buffer
//! stays dense while the index buffer keeps its original length.

use nalgebra::Point3;

use super::index::MeshIndex;
use crate::error::{MeshError, Result};

/// Record of a vertex moved by [`IndexedMesh::remove_vertex_compact`].
///
/// The vertex that used to live at `from` now lives at `to`. Any triangle
/// index still holding `from` must be rewritten to `to` by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relocation {
    /// Former index of the moved vertex (the old last slot).
    pub from: usize,
    /// New index of the moved vertex (the slot that was removed).
    pub to: usize,
}

/// A triangle mesh stored as a vertex buffer and a flat index buffer.
///
/// The index type `I` is the width of the index buffer as it will be uploaded
/// (`u16`, `u32` or `u64`).
///
/// # Example
///
/// ```
/// use pare::mesh::IndexedMesh;
/// use nalgebra::Point3;
///
/// let mesh: IndexedMesh = IndexedMesh::new(
///     vec![
///         Point3::new(0.0, 0.0, 0.0),
///         Point3::new(1.0, 0.0, 0.0),
///         Point3::new(0.0, 1.0, 0.0),
///     ],
///     vec![0, 1, 2],
/// )
/// .unwrap();
///
/// assert_eq!(mesh.vertex_count(), 3);
/// assert_eq!(mesh.triangle_count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedMesh<I: MeshIndex = u32> {
    positions: Vec<Point3<f64>>,
    indices: Vec<I>,
}

impl<I: MeshIndex> Default for IndexedMesh<I> {
    fn default() -> Self {
        Self {
            positions: Vec::new(),
            indices: Vec::new(),
        }
    }
}

impl<I: MeshIndex> IndexedMesh<I> {
    /// Create a mesh from a vertex buffer and a flat index buffer.
    ///
    /// Fails if the index buffer is not made of whole triangles, if any index
    /// is out of range, or if the vertex count does not fit in `I`.
    /// Degenerate triangles (repeated indices) are accepted.
    pub fn new(positions: Vec<Point3<f64>>, indices: Vec<I>) -> Result<Self> {
        if indices.len() % 3 != 0 {
            return Err(MeshError::IndexCountNotTriangles { count: indices.len() });
        }
        if positions.len() > I::capacity() {
            return Err(MeshError::IndexOverflow {
                count: positions.len(),
                index_type: I::NAME,
            });
        }
        for (slot, &index) in indices.iter().enumerate() {
            if index.to_usize() >= positions.len() {
                return Err(MeshError::InvalidVertexIndex {
                    triangle: slot / 3,
                    vertex: index.to_usize(),
                });
            }
        }

        Ok(Self { positions, indices })
    }

    /// Create a mesh from buffers already known to be consistent.
    pub(crate) fn from_parts_unchecked(positions: Vec<Point3<f64>>, indices: Vec<I>) -> Self {
        debug_assert!(indices.len() % 3 == 0);
        debug_assert!(indices.iter().all(|i| i.to_usize() < positions.len()));
        Self { positions, indices }
    }

    /// Number of live vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of index buffer slots. Constant under simplification.
    #[inline]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Number of triangle slots, including degenerate ones.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns true if the mesh has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// The vertex buffer.
    #[inline]
    pub fn positions(&self) -> &[Point3<f64>] {
        &self.positions
    }

    /// The index buffer.
    #[inline]
    pub fn indices(&self) -> &[I] {
        &self.indices
    }

    /// Position of vertex `v`.
    ///
    /// # Panics
    /// Panics if `v >= vertex_count()`.
    #[inline]
    pub fn position(&self, v: usize) -> Point3<f64> {
        self.check_vertex(v);
        self.positions[v]
    }

    /// Move vertex `v` to `p`.
    ///
    /// # Panics
    /// Panics if `v >= vertex_count()`.
    #[inline]
    pub fn set_position(&mut self, v: usize, p: Point3<f64>) {
        self.check_vertex(v);
        self.positions[v] = p;
    }

    /// Vertex referenced by index buffer slot `slot`.
    #[inline]
    pub fn index(&self, slot: usize) -> usize {
        self.indices[slot].to_usize()
    }

    /// Point index buffer slot `slot` at vertex `v`.
    ///
    /// # Panics
    /// Panics if `v >= vertex_count()` or `slot >= index_count()`.
    #[inline]
    pub fn set_index(&mut self, slot: usize, v: usize) {
        self.check_vertex(v);
        self.indices[slot] = I::from_usize(v);
    }

    /// Vertex indices of triangle `t`.
    #[inline]
    pub fn triangle(&self, t: usize) -> [usize; 3] {
        let base = t * 3;
        [
            self.indices[base].to_usize(),
            self.indices[base + 1].to_usize(),
            self.indices[base + 2].to_usize(),
        ]
    }

    /// Iterate over the vertex indices of every triangle slot.
    pub fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|t| [t[0].to_usize(), t[1].to_usize(), t[2].to_usize()])
    }

    /// Corner positions of triangle `t`.
    #[inline]
    pub fn triangle_positions(&self, t: usize) -> [Point3<f64>; 3] {
        let [a, b, c] = self.triangle(t);
        [self.positions[a], self.positions[b], self.positions[c]]
    }

    /// Remove vertex `v` by moving the last vertex into its slot.
    ///
    /// Returns the relocation performed, or `None` if `v` was already the
    /// last vertex. The index buffer is left untouched: references to `v`
    /// must be remapped before the call, and references to the relocated
    /// vertex must be remapped after it.
    ///
    /// # Panics
    /// Panics if `v >= vertex_count()`.
    pub fn remove_vertex_compact(&mut self, v: usize) -> Option<Relocation> {
        self.check_vertex(v);
        let last = self.positions.len() - 1;
        self.positions.swap_remove(v);
        (v != last).then_some(Relocation { from: last, to: v })
    }

    /// Replace every index buffer occurrence of `from` with `to`.
    ///
    /// `from` may be a slot just vacated by [`remove_vertex_compact`], so
    /// only `to` is required to be live. Returns the number of slots
    /// rewritten.
    ///
    /// # Panics
    /// Panics if `to >= vertex_count()`.
    ///
    /// [`remove_vertex_compact`]: Self::remove_vertex_compact
    pub fn remap_index(&mut self, from: usize, to: usize) -> usize {
        self.check_vertex(to);
        let from = I::from_usize(from);
        let to = I::from_usize(to);
        let mut rewritten = 0;
        for index in self.indices.iter_mut().filter(|i| **i == from) {
            *index = to;
            rewritten += 1;
        }
        rewritten
    }

    /// Returns true if triangle `t` repeats a vertex.
    #[inline]
    pub fn is_degenerate_triangle(&self, t: usize) -> bool {
        let [a, b, c] = self.triangle(t);
        a == b || b == c || a == c
    }

    /// Number of triangle slots that repeat a vertex.
    pub fn degenerate_triangle_count(&self) -> usize {
        (0..self.triangle_count())
            .filter(|&t| self.is_degenerate_triangle(t))
            .count()
    }

    /// Compute the axis-aligned bounding box.
    ///
    /// Returns None if the mesh has no vertices.
    pub fn bounding_box(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        let first = *self.positions.first()?;
        Some(self.positions.iter().fold((first, first), |(min, max), p| {
            (min.inf(p), max.sup(p))
        }))
    }

    #[inline]
    fn check_vertex(&self, v: usize) {
        assert!(
            v < self.positions.len(),
            "vertex index {} out of range (vertex count {})",
            v,
            self.positions.len()
        );
    }
}
