//! Mesh processing algorithms.
//!
//! - **Simplification**: greedy pair contraction with quadric error metrics
//! - **Progress**: callbacks for long-running operations

pub mod progress;
pub mod simplify;

pub use progress::Progress;
