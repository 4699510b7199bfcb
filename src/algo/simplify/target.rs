//! Optimal merge position and cost for a vertex pair.

use nalgebra::Point3;

use super::pairs::Pair;
use super::quadric::Quadric;
use crate::mesh::{IndexedMesh, MeshIndex};

/// The result of evaluating a pair: where the merged vertex would go and how
/// much quadric error that placement costs.
///
/// A target does not name its pair. It is filed under the pair's
/// [`PairId`](super::pairs::PairId), which stays valid while the pair's
/// endpoints are renamed by contractions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContractionTarget {
    /// Position of the merged vertex.
    pub position: Point3<f64>,
    /// Quadric error at `position`. Never negative.
    pub cost: f64,
}

/// Evaluate the contraction of `pair`.
///
/// The merged position is the minimizer of the combined quadric when that
/// system is well conditioned. Otherwise the cheapest of the two endpoints
/// and their midpoint is used, preferring earlier candidates on ties.
pub fn evaluate_pair<I: MeshIndex>(
    mesh: &IndexedMesh<I>,
    quadrics: &[Quadric],
    pair: Pair,
) -> ContractionTarget {
    let (u, v) = pair.vertices();
    let q = quadrics[u] + quadrics[v];

    let position = match q.minimizer() {
        Some(p) => p,
        None => {
            let pu = mesh.position(u);
            let pv = mesh.position(v);
            let mid = Point3::from((pu.coords + pv.coords) * 0.5);
            cheapest(&q, [pu, pv, mid])
        }
    };

    ContractionTarget {
        position,
        cost: q.evaluate(&position).max(0.0),
    }
}

fn cheapest(q: &Quadric, candidates: [Point3<f64>; 3]) -> Point3<f64> {
    let mut best = candidates[0];
    let mut best_cost = q.evaluate(&best);
    for p in &candidates[1..] {
        let cost = q.evaluate(p);
        if cost < best_cost {
            best = *p;
            best_cost = cost;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::simplify::quadric::vertex_quadrics;
    use crate::mesh::{build_from_triangles, primitives};
    use approx::assert_relative_eq;

    #[test]
    fn test_planar_pair_costs_nothing() {
        let quad: IndexedMesh = primitives::quad();
        let quadrics = vertex_quadrics(&quad);

        for pair in [Pair::new(0, 1), Pair::new(0, 2), Pair::new(2, 3)] {
            let target = evaluate_pair(&quad, &quadrics, pair);
            assert_relative_eq!(target.cost, 0.0, epsilon = 1e-12);
            assert_relative_eq!(target.position.z, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_singular_falls_back_to_first_endpoint() {
        // Every candidate is exact on a flat quad, so the first one wins.
        let quad: IndexedMesh = primitives::quad();
        let quadrics = vertex_quadrics(&quad);
        let target = evaluate_pair(&quad, &quadrics, Pair::new(1, 2));
        assert_eq!(target.position, quad.position(1));
    }

    #[test]
    fn test_fallback_picks_cheapest_candidate() {
        // Only u carries error, and it is lowest at v.
        let mesh: IndexedMesh = build_from_triangles(
            &[Point3::new(0.0, 0.0, 1.0), Point3::new(0.0, 0.0, 0.0)],
            &[],
        )
        .unwrap();
        let quadrics = vec![Quadric::from_plane(0.0, 0.0, 1.0, 0.0), Quadric::zero()];

        let target = evaluate_pair(&mesh, &quadrics, Pair::new(0, 1));
        assert_eq!(target.position, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(target.cost, 0.0);
    }

    #[test]
    fn test_cube_edge_uses_minimizer() {
        let cube: IndexedMesh = primitives::unit_cube();
        let quadrics = vertex_quadrics(&cube);
        let target = evaluate_pair(&cube, &quadrics, Pair::new(0, 1));

        assert!(target.cost >= 0.0);
        assert!(target.position.iter().all(|c| c.is_finite()));
        // Corners 0 and 1 share the bottom and front faces, so the merged
        // vertex stays on both planes.
        assert_relative_eq!(target.position.z, 0.0, epsilon = 1e-9);
        assert_relative_eq!(target.position.y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_coincident_vertices_cost_zero() {
        let p = Point3::new(0.5, 0.5, 0.5);
        let mesh: IndexedMesh = build_from_triangles(
            &[p, p, Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)],
            &[[0, 2, 3], [1, 3, 2]],
        )
        .unwrap();
        let quadrics = vertex_quadrics(&mesh);

        let target = evaluate_pair(&mesh, &quadrics, Pair::new(0, 1));
        assert_relative_eq!(target.cost, 0.0, epsilon = 1e-12);
    }
}
