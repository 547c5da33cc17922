//! Aggregation phase: collapse communities into single nodes.

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::graph::SignedGraph;

/// Build the graph whose nodes are the communities of `partition`.
///
/// Node `i` of the result carries the `i`-th distinct label in first-seen
/// order, so for a renumbered partition a node's handle equals its label.
/// Each original edge `(u, v, sign, w)` adds `w` to the edge
/// `(partition[u], partition[v], sign)`; intra-community edges become
/// self-loops. Total weight per polarity is conserved.
pub fn induced_graph<N>(partition: &[usize], graph: &SignedGraph<N>) -> Result<SignedGraph<usize>> {
    let mut handles: IndexMap<usize, usize> = IndexMap::new();
    for node in 0..graph.node_count() {
        let label = partition
            .get(node)
            .copied()
            .ok_or(Error::NodeNotFound { node })?;
        let next = handles.len();
        handles.entry(label).or_insert(next);
    }

    let mut induced = SignedGraph::with_capacity(handles.len(), graph.edge_count());
    for &label in handles.keys() {
        induced.add_node(label);
    }
    for edge in graph.edges() {
        let cu = handles[&partition[edge.source]];
        let cv = handles[&partition[edge.target]];
        induced.add_edge(cu, cv, edge.sign, edge.weight)?;
    }
    Ok(induced)
}
