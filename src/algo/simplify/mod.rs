//! Greedy pair-contraction simplification driven by quadric error metrics.
//!
//! Every vertex carries a quadric that measures squared distance to the
//! planes of the triangles it touched. Each edge is a candidate pair; merging
//! a pair places the survivor where the summed quadric is smallest, and the
//! cheapest pair is always merged first. Merged vertices are compacted out of
//! the mesh immediately, so the store stays dense while triangle slots are
//! left in place (collapsed triangles become degenerate).
//!
//! # Example
//!
//! ```
//! use pare::algo::simplify::{simplify, SimplifyOptions, Termination};
//! use pare::mesh::{primitives, IndexedMesh};
//!
//! let mut mesh: IndexedMesh = primitives::grid(4).unwrap();
//! let index_count = mesh.index_count();
//!
//! let stats = simplify(&mut mesh, &SimplifyOptions::with_error_limit(1e-9));
//!
//! assert!(stats.final_vertices < stats.original_vertices);
//! assert_eq!(mesh.index_count(), index_count);
//! assert_eq!(stats.termination, Termination::QueueExhausted);
//! ```
//!
//! # References
//!
//! - Garland, M. & Heckbert, P. (1997). "Surface Simplification Using Quadric
//!   Error Metrics." SIGGRAPH '97.

mod driver;
mod pairs;
mod quadric;
mod queue;
mod target;

use std::fmt;
use std::time::{Duration, Instant};

use crate::error::{MeshError, Result};

pub use driver::{simplify, simplify_to_error, simplify_with_progress};
pub use pairs::{Pair, PairId, PairRegistry, PairUpdate};
pub use quadric::{incident_quadric, triangle_plane, vertex_quadrics, Quadric, SINGULAR_EPSILON};
pub use queue::ContractionQueue;
pub use target::{evaluate_pair, ContractionTarget};

/// How the surviving vertex's quadric is formed after a merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QuadricPolicy {
    /// Sum the quadrics of both endpoints. Planes shared by the two vertices
    /// are counted twice, which is the classic Garland–Heckbert behavior.
    #[default]
    Accumulate,
    /// Rebuild the quadric from the triangles currently incident to the
    /// survivor, at their current positions. Slower; error does not carry
    /// across merges.
    Recompute,
}

impl fmt::Display for QuadricPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuadricPolicy::Accumulate => write!(f, "accumulate"),
            QuadricPolicy::Recompute => write!(f, "recompute"),
        }
    }
}

/// Options for a simplification run.
#[derive(Debug, Clone)]
pub struct SimplifyOptions {
    /// Stop once the cheapest remaining pair costs at least this much.
    /// Must be non-negative. Defaults to infinity.
    pub error_limit: f64,

    /// Stop after this many contractions.
    pub max_contractions: Option<usize>,

    /// Stop once this instant has passed. Checked before every contraction.
    pub deadline: Option<Instant>,

    /// How merged quadrics are formed.
    pub quadric_policy: QuadricPolicy,
}

impl Default for SimplifyOptions {
    fn default() -> Self {
        Self {
            error_limit: f64::INFINITY,
            max_contractions: None,
            deadline: None,
            quadric_policy: QuadricPolicy::default(),
        }
    }
}

impl SimplifyOptions {
    /// Create options that contract until the cheapest pair reaches `error_limit`.
    pub fn with_error_limit(error_limit: f64) -> Self {
        Self {
            error_limit,
            ..Self::default()
        }
    }

    /// Cap the number of contractions.
    pub fn with_max_contractions(mut self, max: usize) -> Self {
        self.max_contractions = Some(max);
        self
    }

    /// Stop at a fixed instant.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Stop once `timeout` has elapsed, measured from now.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        let deadline = Instant::now() + timeout;
        self.with_deadline(deadline)
    }

    /// Set the quadric policy.
    pub fn with_quadric_policy(mut self, policy: QuadricPolicy) -> Self {
        self.quadric_policy = policy;
        self
    }

    /// Check the options without running anything.
    pub fn validate(&self) -> Result<()> {
        if self.error_limit.is_nan() || self.error_limit < 0.0 {
            return Err(MeshError::invalid_param(
                "error_limit",
                self.error_limit,
                "must be a non-negative number",
            ));
        }
        Ok(())
    }

    /// The error limit actually used by a run. Invalid limits become zero,
    /// which stops before the first contraction.
    pub(crate) fn effective_error_limit(&self) -> f64 {
        if self.validate().is_err() {
            log::warn!(
                "error limit {} is not a non-negative number, using 0",
                self.error_limit
            );
            return 0.0;
        }
        self.error_limit
    }
}

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// At most one pair was left, or the mesh had fewer than two triangles.
    QueueExhausted,
    /// The cheapest pair reached the error limit.
    ErrorLimit,
    /// The contraction cap was reached.
    ContractionLimit,
    /// The deadline passed.
    Deadline,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Termination::QueueExhausted => "no pairs left",
            Termination::ErrorLimit => "error limit reached",
            Termination::ContractionLimit => "contraction limit reached",
            Termination::Deadline => "deadline passed",
        };
        f.write_str(reason)
    }
}

/// Summary of a simplification run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimplifyStats {
    /// Vertex count before the run.
    pub original_vertices: usize,
    /// Vertex count after the run.
    pub final_vertices: usize,
    /// Number of distinct pairs found in the input.
    pub initial_pairs: usize,
    /// Number of merges performed.
    pub contractions: usize,
    /// Cost of the last merge, or 0 if nothing was merged.
    pub last_cost: f64,
    /// Why the run stopped.
    pub termination: Termination,
}

impl fmt::Display for SimplifyStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} vertices, {} contractions of {} pairs, last cost {:.3e} ({})",
            self.original_vertices,
            self.final_vertices,
            self.contractions,
            self.initial_pairs,
            self.last_cost,
            self.termination
        )
    }
}
