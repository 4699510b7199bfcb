//! Registry of contractible vertex pairs.

use std::collections::HashMap;
use std::fmt;

use crate::mesh::{IndexedMesh, MeshIndex, Relocation};

/// An unordered pair of vertex indices, stored smaller first.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pair {
    u: usize,
    v: usize,
}

impl Pair {
    /// Create a canonical pair from two distinct vertices in any order.
    ///
    /// # Panics
    /// Panics in debug builds if `a == b`.
    #[inline]
    pub fn new(a: usize, b: usize) -> Self {
        debug_assert_ne!(a, b, "a pair needs two distinct vertices");
        if a < b {
            Self { u: a, v: b }
        } else {
            Self { u: b, v: a }
        }
    }

    /// The two vertices, smaller first.
    #[inline]
    pub fn vertices(self) -> (usize, usize) {
        (self.u, self.v)
    }

    /// Returns true if `x` is one of the endpoints.
    #[inline]
    pub fn contains(self, x: usize) -> bool {
        self.u == x || self.v == x
    }

    /// The endpoint that is not `x`.
    #[inline]
    pub fn other(self, x: usize) -> usize {
        debug_assert!(self.contains(x));
        if self.u == x {
            self.v
        } else {
            self.u
        }
    }
}

impl fmt::Debug for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.u, self.v)
    }
}

/// Stable identity of a pair. Its target and queue entry share the same id.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct PairId(usize);

impl PairId {
    /// Create an id from a raw slot number.
    #[inline]
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// The raw slot number.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Debug for PairId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P({})", self.0)
    }
}

/// What a contraction did to the registry.
#[derive(Debug, Default)]
pub struct PairUpdate {
    /// Live pairs that now contain the surviving vertex.
    pub touched: Vec<PairId>,
    /// Pairs dropped because renaming made them equal to an existing pair.
    pub retired: Vec<PairId>,
}

/// The set of unique vertex pairs eligible for contraction.
///
/// Pairs are kept in id-addressed slots so that ids stay stable while pairs
/// are removed or renamed. A hash index rejects duplicates, and a per-vertex
/// incidence list finds the pairs touching a vertex without a full scan.
#[derive(Debug, Clone, Default)]
pub struct PairRegistry {
    slots: Vec<Option<Pair>>,
    lookup: HashMap<Pair, PairId>,
    incident: Vec<Vec<PairId>>,
}

impl PairRegistry {
    /// Collect every distinct edge of the mesh's triangles.
    ///
    /// Edges of degenerate triangles that join a vertex to itself are skipped.
    pub fn build<I: MeshIndex>(mesh: &IndexedMesh<I>) -> Self {
        let mut registry = Self {
            slots: Vec::with_capacity(mesh.index_count()),
            lookup: HashMap::with_capacity(mesh.index_count()),
            incident: vec![Vec::new(); mesh.vertex_count()],
        };

        for tri in mesh.triangles() {
            for i in 0..3 {
                let (a, b) = (tri[i], tri[(i + 1) % 3]);
                if a != b {
                    registry.insert(Pair::new(a, b));
                }
            }
        }

        registry
    }

    fn insert(&mut self, pair: Pair) {
        if self.lookup.contains_key(&pair) {
            return;
        }
        let id = PairId(self.slots.len());
        self.slots.push(Some(pair));
        self.lookup.insert(pair, id);
        let (u, v) = pair.vertices();
        self.incident[u].push(id);
        self.incident[v].push(id);
    }

    /// Number of live pairs.
    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    /// Returns true if no pairs are left.
    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }

    /// Number of ids ever handed out. Ids are always below this bound.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// The pair stored under `id`, if it is still live.
    pub fn get(&self, id: PairId) -> Option<Pair> {
        self.slots.get(id.0).copied().flatten()
    }

    /// The id of `pair`, if it is registered.
    pub fn id_of(&self, pair: Pair) -> Option<PairId> {
        self.lookup.get(&pair).copied()
    }

    /// Iterate over the live pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (PairId, Pair)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.map(|p| (PairId(i), p)))
    }

    /// Ids of the live pairs touching vertex `x`.
    pub fn incident(&self, x: usize) -> &[PairId] {
        &self.incident[x]
    }

    /// Remove a pair. Returns the pair if it was live.
    pub fn remove(&mut self, id: PairId) -> Option<Pair> {
        let pair = self.slots.get_mut(id.0)?.take()?;
        self.lookup.remove(&pair);
        let (u, v) = pair.vertices();
        self.incident[u].retain(|&p| p != id);
        self.incident[v].retain(|&p| p != id);
        Some(pair)
    }

    /// Rename endpoints after `eliminated` was merged into `survivor`.
    ///
    /// The pair joining the two must already be removed. Pairs on the
    /// eliminated vertex move to the survivor, and when the mesh store
    /// relocated its last vertex into the freed slot, pairs on that vertex
    /// follow it. A renamed pair that collides with an existing one is
    /// retired.
    pub fn contract(
        &mut self,
        survivor: usize,
        eliminated: usize,
        relocation: Option<Relocation>,
    ) -> PairUpdate {
        debug_assert!(self.id_of(Pair::new(survivor, eliminated)).is_none());
        let mut update = PairUpdate::default();

        for id in std::mem::take(&mut self.incident[eliminated]) {
            let Some(pair) = self.slots[id.0] else { continue };
            let other = pair.other(eliminated);
            self.lookup.remove(&pair);

            let renamed = Pair::new(survivor, other);
            if self.lookup.contains_key(&renamed) {
                self.slots[id.0] = None;
                self.incident[other].retain(|&p| p != id);
                update.retired.push(id);
            } else {
                self.slots[id.0] = Some(renamed);
                self.lookup.insert(renamed, id);
                self.incident[survivor].push(id);
            }
        }

        // Mirror the swap-with-last removal in the mesh store.
        self.incident.swap_remove(eliminated);
        if let Some(Relocation { from, to }) = relocation {
            debug_assert_eq!(to, eliminated);
            for &id in &self.incident[to] {
                let Some(pair) = self.slots[id.0] else { continue };
                self.lookup.remove(&pair);
                let renamed = Pair::new(pair.other(from), to);
                self.slots[id.0] = Some(renamed);
                self.lookup.insert(renamed, id);
            }
        }

        update.touched = self.incident[survivor].clone();
        update
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::primitives;

    #[test]
    fn test_pair_is_canonical() {
        assert_eq!(Pair::new(5, 2), Pair::new(2, 5));
        assert_eq!(Pair::new(5, 2).vertices(), (2, 5));
        assert_eq!(Pair::new(5, 2).other(5), 2);
    }

    #[test]
    fn test_quad_pairs() {
        let quad: IndexedMesh = primitives::quad();
        let registry = PairRegistry::build(&quad);

        // Four sides plus the shared diagonal.
        assert_eq!(registry.len(), 5);
        assert!(registry.id_of(Pair::new(0, 2)).is_some());
        assert!(registry.id_of(Pair::new(1, 3)).is_none());
        assert_eq!(registry.incident(0).len(), 3);
    }

    #[test]
    fn test_cube_pairs() {
        let cube: IndexedMesh = primitives::unit_cube();
        let registry = PairRegistry::build(&cube);
        // 12 cube edges plus one diagonal per face.
        assert_eq!(registry.len(), 18);
        for (_, pair) in registry.iter() {
            let (u, v) = pair.vertices();
            assert!(u < v);
        }
    }

    #[test]
    fn test_degenerate_edges_skipped() {
        let mesh: IndexedMesh =
            IndexedMesh::new(vec![nalgebra::Point3::origin(); 2], vec![0, 1, 1]).unwrap();
        let registry = PairRegistry::build(&mesh);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_remove() {
        let quad: IndexedMesh = primitives::quad();
        let mut registry = PairRegistry::build(&quad);
        let id = registry.id_of(Pair::new(0, 2)).unwrap();

        assert_eq!(registry.remove(id), Some(Pair::new(0, 2)));
        assert_eq!(registry.remove(id), None);
        assert_eq!(registry.len(), 4);
        assert!(!registry.incident(0).contains(&id));
        assert!(!registry.incident(2).contains(&id));
    }

    #[test]
    fn test_contract_renames_and_retires() {
        // Quad 0-1-2-3 with diagonal 0-2. Merge 1 into 0; vertex 3 moves to 1.
        let quad: IndexedMesh = primitives::quad();
        let mut registry = PairRegistry::build(&quad);
        let id = registry.id_of(Pair::new(0, 1)).unwrap();
        registry.remove(id);

        let update = registry.contract(0, 1, Some(Relocation { from: 3, to: 1 }));

        // (1, 2) became (0, 2), which already existed.
        assert_eq!(update.retired.len(), 1);
        assert_eq!(registry.len(), 3);

        let mut pairs: Vec<Pair> = registry.iter().map(|(_, p)| p).collect();
        pairs.sort();
        assert_eq!(pairs, vec![Pair::new(0, 1), Pair::new(0, 2), Pair::new(1, 2)]);

        // (0, 3) became (0, 1) and (0, 2) stayed.
        assert_eq!(update.touched.len(), 2);
        for id in &update.touched {
            assert!(registry.get(*id).unwrap().contains(0));
        }
    }

    #[test]
    fn test_contract_last_vertex_without_relocation() {
        let quad: IndexedMesh = primitives::quad();
        let mut registry = PairRegistry::build(&quad);
        let id = registry.id_of(Pair::new(2, 3)).unwrap();
        registry.remove(id);

        let update = registry.contract(2, 3, None);

        // (0, 3) became (0, 2), a duplicate.
        assert_eq!(update.retired.len(), 1);
        let mut pairs: Vec<Pair> = registry.iter().map(|(_, p)| p).collect();
        pairs.sort();
        assert_eq!(pairs, vec![Pair::new(0, 1), Pair::new(0, 2), Pair::new(1, 2)]);
    }
}
