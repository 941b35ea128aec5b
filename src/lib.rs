//! Pareto graph contraction for multi-objective trade-off analysis.
//!

pub use pareto_graph::*;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use pareto_graph::prelude::*;
}
