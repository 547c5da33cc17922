//! Community detection traits.

use crate::error::Result;
use petgraph::graph::UnGraph;

/// Trait for community detection over signed petgraph graphs.
pub trait CommunityDetection {
    /// Detect communities in a graph whose edge weights are signed numbers
    /// (positive = friend, negative = enemy).
    ///
    /// Returns a mapping from node index to community ID.
    fn detect<N, E>(&self, graph: &UnGraph<N, E>) -> Result<Vec<usize>>
    where
        N: Clone,
        E: Copy + Into<f64>;
}
