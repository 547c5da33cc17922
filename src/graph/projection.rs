//! Single-polarity views of a signed graph.

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

use super::{Sign, SignPair, SignedGraph};

/// The edges of one polarity, over every node of the source graph.
///
/// Node `i` of the projection is node `i` of the source graph. Isolated nodes
/// are kept so that degree lookups never miss.
#[derive(Debug, Clone)]
pub struct Projection {
    sign: Sign,
    graph: UnGraph<(), f64>,
    /// Weighted degree; a self-loop counts twice.
    degrees: Vec<f64>,
    self_loops: Vec<f64>,
    total_weight: f64,
}

impl Projection {
    fn build<N>(source: &SignedGraph<N>, sign: Sign) -> Self {
        let n = source.node_count();
        let mut graph = UnGraph::with_capacity(n, source.edge_count());
        for _ in 0..n {
            graph.add_node(());
        }
        for edge in source.edges().iter().filter(|e| e.sign == sign) {
            graph.add_edge(
                NodeIndex::new(edge.source),
                NodeIndex::new(edge.target),
                edge.weight,
            );
        }

        let mut degrees = vec![0.0; n];
        let mut self_loops = vec![0.0; n];
        let mut total_weight = 0.0;
        for edge in graph.edge_references() {
            let (i, j, w) = (edge.source().index(), edge.target().index(), *edge.weight());
            degrees[i] += w;
            degrees[j] += w;
            if i == j {
                self_loops[i] += w;
            }
            total_weight += w;
        }

        Self {
            sign,
            graph,
            degrees,
            self_loops,
            total_weight,
        }
    }

    /// Polarity of the retained edges.
    pub fn sign(&self) -> Sign {
        self.sign
    }

    /// Underlying petgraph graph (unit node weights, edge weight = weight).
    pub fn graph(&self) -> &UnGraph<(), f64> {
        &self.graph
    }

    /// Number of nodes (equal to the source graph's).
    pub fn node_count(&self) -> usize {
        self.degrees.len()
    }

    /// Number of edges of this polarity.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Weighted degree of `node`, 0 for unknown nodes.
    pub fn degree(&self, node: usize) -> f64 {
        self.degrees.get(node).copied().unwrap_or(0.0)
    }

    /// Self-loop weight of `node`, 0 if it has none.
    pub fn self_loop(&self, node: usize) -> f64 {
        self.self_loops.get(node).copied().unwrap_or(0.0)
    }

    /// All weighted degrees, indexed by node.
    pub fn degrees(&self) -> &[f64] {
        &self.degrees
    }

    /// All self-loop weights, indexed by node.
    pub fn self_loops(&self) -> &[f64] {
        &self.self_loops
    }

    /// Total edge weight (each edge once).
    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }
}

impl<N> SignedGraph<N> {
    /// Split into positive-only and negative-only projections.
    ///
    /// Both projections contain every node, even those without an edge of
    /// that polarity.
    pub fn split_by_sign(&self) -> SignPair<Projection> {
        SignPair::from_fn(|sign| Projection::build(self, sign))
    }
}
