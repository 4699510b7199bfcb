//! The contraction loop.

use log::{debug, info, trace};

use super::pairs::{PairId, PairRegistry};
use super::quadric::{incident_quadric, vertex_quadrics, Quadric};
use super::queue::ContractionQueue;
use super::target::evaluate_pair;
use super::{QuadricPolicy, SimplifyOptions, SimplifyStats, Termination};
use crate::algo::Progress;
use crate::mesh::{IndexedMesh, MeshIndex};

/// Simplify a mesh in place.
///
/// Pairs are contracted cheapest first until one of the stopping conditions
/// in `options` is met or no more than one pair is left. The vertex count
/// shrinks by one per contraction. The index count never changes: triangles
/// that collapse stay in the index buffer as degenerate triangles.
///
/// Invalid options are clamped with a warning; see
/// [`SimplifyOptions::validate`] to reject them up front.
///
/// # Arguments
///
/// * `mesh` - The mesh to simplify (modified in place)
/// * `options` - Stopping conditions and quadric policy
pub fn simplify<I: MeshIndex>(mesh: &mut IndexedMesh<I>, options: &SimplifyOptions) -> SimplifyStats {
    simplify_with_progress(mesh, options, &Progress::none())
}

/// Simplify a mesh in place until the cheapest pair costs at least `error_limit`.
pub fn simplify_to_error<I: MeshIndex>(mesh: &mut IndexedMesh<I>, error_limit: f64) -> SimplifyStats {
    simplify(mesh, &SimplifyOptions::with_error_limit(error_limit))
}

/// Like [`simplify`], reporting each contraction to `progress`.
pub fn simplify_with_progress<I: MeshIndex>(
    mesh: &mut IndexedMesh<I>,
    options: &SimplifyOptions,
    progress: &Progress,
) -> SimplifyStats {
    let mut run = Simplifier::new(mesh, options);

    let termination = loop {
        if let Some(reason) = run.should_stop() {
            break reason;
        }
        run.contract_cheapest();
        progress.tick(run.contractions, run.budget, "Contracting pairs");
    };

    let stats = run.finish(termination);
    info!("simplified: {}", stats);
    stats
}

/// State of one run: the mesh plus the per-vertex quadrics, pair registry and
/// queue, all kept in lock-step.
struct Simplifier<'a, I: MeshIndex> {
    mesh: &'a mut IndexedMesh<I>,
    quadrics: Vec<Quadric>,
    pairs: PairRegistry,
    queue: ContractionQueue,
    error_limit: f64,
    max_contractions: Option<usize>,
    deadline: Option<std::time::Instant>,
    policy: QuadricPolicy,
    original_vertices: usize,
    initial_pairs: usize,
    budget: usize,
    contractions: usize,
    last_cost: f64,
}

impl<'a, I: MeshIndex> Simplifier<'a, I> {
    fn new(mesh: &'a mut IndexedMesh<I>, options: &SimplifyOptions) -> Self {
        let error_limit = options.effective_error_limit();
        let quadrics = vertex_quadrics(&*mesh);
        let pairs = PairRegistry::build(&*mesh);

        let mut queue = ContractionQueue::with_capacity(pairs.capacity());
        for (id, pair) in pairs.iter() {
            queue.push(id, evaluate_pair(&*mesh, &quadrics, pair));
        }

        let original_vertices = mesh.vertex_count();
        let max_possible = original_vertices.saturating_sub(1);
        let budget = options.max_contractions.map_or(max_possible, |m| m.min(max_possible));

        debug!(
            "simplify: {} vertices, {} triangles, {} pairs, error limit {}, {} quadrics",
            original_vertices,
            mesh.triangle_count(),
            pairs.len(),
            error_limit,
            options.quadric_policy
        );

        Self {
            initial_pairs: pairs.len(),
            mesh,
            quadrics,
            pairs,
            queue,
            error_limit,
            max_contractions: options.max_contractions,
            deadline: options.deadline,
            policy: options.quadric_policy,
            original_vertices,
            budget,
            contractions: 0,
            last_cost: 0.0,
        }
    }

    /// The reason to stop before the next contraction, if any.
    fn should_stop(&self) -> Option<Termination> {
        if self.mesh.triangle_count() < 2 || self.queue.len() <= 1 {
            return Some(Termination::QueueExhausted);
        }
        if let Some((_, cheapest)) = self.queue.peek_min() {
            if cheapest.cost >= self.error_limit {
                return Some(Termination::ErrorLimit);
            }
        }
        if self.max_contractions.is_some_and(|max| self.contractions >= max) {
            return Some(Termination::ContractionLimit);
        }
        if self.deadline.is_some_and(|d| std::time::Instant::now() >= d) {
            return Some(Termination::Deadline);
        }
        None
    }

    /// Merge the cheapest pair.
    ///
    /// The eliminated vertex is the larger index `v`. Its triangle slots are
    /// pointed at `u` before the store compacts, and slots of the vertex the
    /// store moved into `v`'s place are pointed at `v` afterwards. Quadrics and
    /// pair endpoints follow the same relocation.
    fn contract_cheapest(&mut self) {
        let Some((id, target)) = self.queue.pop_min() else {
            return;
        };
        let pair = self.pairs.remove(id);
        debug_assert!(pair.is_some(), "queued {:?} has no registered pair", id);
        let Some(pair) = pair else { return };
        let (u, v) = pair.vertices();
        let merged = self.quadrics[u] + self.quadrics[v];

        self.mesh.set_position(u, target.position);
        let remapped = self.mesh.remap_index(v, u);
        let relocation = self.mesh.remove_vertex_compact(v);
        self.quadrics.swap_remove(v);
        if let Some(r) = relocation {
            self.mesh.remap_index(r.from, r.to);
        }

        self.quadrics[u] = match self.policy {
            QuadricPolicy::Accumulate => merged,
            QuadricPolicy::Recompute => incident_quadric(&*self.mesh, u),
        };

        let update = self.pairs.contract(u, v, relocation);
        for retired in &update.retired {
            self.queue.remove(*retired);
        }
        for &touched in &update.touched {
            self.reevaluate(touched);
        }

        self.contractions += 1;
        self.last_cost = target.cost;

        trace!(
            "contract {:?} into {} at {:?}, cost {:.3e}, {} slots remapped, {} pairs retired",
            pair,
            u,
            [target.position.x, target.position.y, target.position.z],
            target.cost,
            remapped,
            update.retired.len()
        );
        debug_assert!(self.queue.is_heap());
        debug_assert_eq!(self.queue.len(), self.pairs.len());
    }

    fn reevaluate(&mut self, id: PairId) {
        if let Some(pair) = self.pairs.get(id) {
            let target = evaluate_pair(&*self.mesh, &self.quadrics, pair);
            self.queue.update(id, target);
        }
    }

    fn finish(self, termination: Termination) -> SimplifyStats {
        SimplifyStats {
            original_vertices: self.original_vertices,
            final_vertices: self.mesh.vertex_count(),
            initial_pairs: self.initial_pairs,
            contractions: self.contractions,
            last_cost: self.last_cost,
            termination,
        }
    }
}
