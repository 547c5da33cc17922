//! Adjacency storage for signed multigraphs.

use std::collections::HashMap;

use petgraph::graph::UnGraph;
use petgraph::visit::EdgeRef;

use super::Sign;
use crate::error::{Error, Result};

/// Weight assumed for edges added without an explicit weight.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// A polarity-tagged, weighted, undirected edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignedEdge {
    /// First endpoint (as given to [`SignedGraph::add_edge`]).
    pub source: usize,
    /// Second endpoint.
    pub target: usize,
    /// Polarity.
    pub sign: Sign,
    /// Accumulated weight.
    pub weight: f64,
}

impl SignedEdge {
    /// Whether both endpoints are the same node.
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }

    /// The endpoint opposite to `node`.
    pub fn other(&self, node: usize) -> usize {
        if self.source == node {
            self.target
        } else {
            self.source
        }
    }
}

/// Undirected multigraph with signed, weighted edges.
///
/// Nodes are dense handles `0..node_count()`, each carrying a node weight `N`
/// (typically the caller's identifier). Edges are keyed by unordered
/// endpoint pair and polarity.
#[derive(Debug, Clone)]
pub struct SignedGraph<N = usize> {
    nodes: Vec<N>,
    edges: Vec<SignedEdge>,
    /// (min endpoint, max endpoint, sign) -> edge id.
    edge_index: HashMap<(usize, usize, Sign), usize>,
    /// node -> incident edge ids; a self-loop is listed once.
    incident: Vec<Vec<usize>>,
}

impl<N> Default for SignedGraph<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> SignedGraph<N> {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            edge_index: HashMap::new(),
            incident: Vec::new(),
        }
    }

    /// Create an empty graph with room for `nodes` nodes and `edges` edges.
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(nodes),
            edges: Vec::with_capacity(edges),
            edge_index: HashMap::with_capacity(edges),
            incident: Vec::with_capacity(nodes),
        }
    }

    /// Add a node and return its handle.
    pub fn add_node(&mut self, weight: N) -> usize {
        self.nodes.push(weight);
        self.incident.push(Vec::new());
        self.nodes.len() - 1
    }

    /// Add `weight` to the edge `(a, b, sign)`, creating it if absent.
    ///
    /// Returns the edge id. Fails if either endpoint is not a node.
    pub fn add_edge(&mut self, a: usize, b: usize, sign: Sign, weight: f64) -> Result<usize> {
        for node in [a, b] {
            if node >= self.nodes.len() {
                return Err(Error::NodeNotFound { node });
            }
        }

        let key = (a.min(b), a.max(b), sign);
        if let Some(&id) = self.edge_index.get(&key) {
            self.edges[id].weight += weight;
            return Ok(id);
        }

        let id = self.edges.len();
        self.edges.push(SignedEdge {
            source: a,
            target: b,
            sign,
            weight,
        });
        self.edge_index.insert(key, id);
        self.incident[a].push(id);
        if a != b {
            self.incident[b].push(id);
        }
        Ok(id)
    }

    /// Add an edge of [`DEFAULT_WEIGHT`].
    pub fn add_unit_edge(&mut self, a: usize, b: usize, sign: Sign) -> Result<usize> {
        self.add_edge(a, b, sign, DEFAULT_WEIGHT)
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of distinct (pair, polarity) edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Node weight of `node`.
    pub fn node_weight(&self, node: usize) -> Option<&N> {
        self.nodes.get(node)
    }

    /// All node weights, indexed by handle.
    pub fn node_weights(&self) -> &[N] {
        &self.nodes
    }

    /// All edges, in insertion order.
    pub fn edges(&self) -> &[SignedEdge] {
        &self.edges
    }

    /// Edges touching `node`, in insertion order. Empty for unknown nodes.
    pub fn incident_edges(&self, node: usize) -> impl Iterator<Item = &SignedEdge> + '_ {
        self.incident
            .get(node)
            .into_iter()
            .flatten()
            .map(move |&id| &self.edges[id])
    }

    /// The edge between `a` and `b` with the given polarity.
    pub fn find_edge(&self, a: usize, b: usize, sign: Sign) -> Option<&SignedEdge> {
        self.edge_index
            .get(&(a.min(b), a.max(b), sign))
            .map(|&id| &self.edges[id])
    }

    /// Sum of edge weights of one polarity (each edge once).
    pub fn total_weight(&self, sign: Sign) -> f64 {
        self.edges
            .iter()
            .filter(|e| e.sign == sign)
            .map(|e| e.weight)
            .sum()
    }

    /// Check that the graph is a well-formed signed multigraph.
    ///
    /// Every endpoint must be a node and every weight finite.
    pub fn validate(&self) -> Result<()> {
        let n = self.nodes.len();
        if self.incident.len() != n || self.edge_index.len() != self.edges.len() {
            return Err(Error::InvalidGraph("adjacency index out of sync".into()));
        }
        for (id, edge) in self.edges.iter().enumerate() {
            if edge.source >= n || edge.target >= n {
                return Err(Error::InvalidGraph(format!(
                    "edge {id} ({}, {}) references a node outside 0..{n}",
                    edge.source, edge.target
                )));
            }
            if !edge.weight.is_finite() {
                return Err(Error::InvalidGraph(format!(
                    "edge {id} ({}, {}) has non-finite weight {}",
                    edge.source, edge.target, edge.weight
                )));
            }
        }
        Ok(())
    }
}

impl SignedGraph<usize> {
    /// Create a graph with nodes `0..n`, each labeled by its handle.
    pub fn with_nodes(n: usize) -> Self {
        let mut graph = Self::with_capacity(n, 0);
        for i in 0..n {
            graph.add_node(i);
        }
        graph
    }

    /// Build a graph from a dense symmetric signed adjacency matrix.
    ///
    /// Entry `(i, j)` becomes a positive edge of weight `m[i][j]` when
    /// positive and a negative edge of weight `-m[i][j]` when negative; zeros
    /// are skipped and the diagonal gives self-loops.
    #[cfg(feature = "ndarray")]
    pub fn from_signed_matrix(matrix: &ndarray::Array2<f64>) -> Result<Self> {
        let (rows, cols) = matrix.dim();
        if rows != cols {
            return Err(Error::InvalidGraph(format!(
                "signed adjacency matrix must be square, got {rows}x{cols}"
            )));
        }

        let mut graph = Self::with_nodes(rows);
        for i in 0..rows {
            for j in i..cols {
                let w = matrix[[i, j]];
                if !w.is_finite() {
                    return Err(Error::InvalidGraph(format!(
                        "entry ({i}, {j}) is not finite"
                    )));
                }
                if w != matrix[[j, i]] {
                    return Err(Error::InvalidGraph(format!(
                        "matrix is not symmetric at ({i}, {j})"
                    )));
                }
                if let Some(sign) = Sign::of(w) {
                    graph.add_edge(i, j, sign, w.abs())?;
                }
            }
        }
        Ok(graph)
    }
}

impl<N: Clone> SignedGraph<N> {
    /// Convert a petgraph graph whose edge weights are signed numbers.
    ///
    /// The sign of each weight gives the polarity and its magnitude the
    /// edge weight. Zero or NaN weights carry no polarity and are rejected.
    pub fn from_petgraph<E>(graph: &UnGraph<N, E>) -> Result<Self>
    where
        E: Copy + Into<f64>,
    {
        let mut out = Self::with_capacity(graph.node_count(), graph.edge_count());
        for idx in graph.node_indices() {
            out.add_node(graph[idx].clone());
        }
        for edge in graph.edge_references() {
            let (a, b) = (edge.source().index(), edge.target().index());
            let w: f64 = (*edge.weight()).into();
            let sign = Sign::of(w).ok_or_else(|| {
                Error::InvalidGraph(format!(
                    "edge ({a}, {b}) has weight {w}; signed weights must be non-zero"
                ))
            })?;
            out.add_edge(a, b, sign, w.abs())?;
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parallel_same_sign_edges_are_summed() {
        let mut g = SignedGraph::with_nodes(2);
        let e1 = g.add_edge(0, 1, Sign::Positive, 1.5).unwrap();
        let e2 = g.add_edge(1, 0, Sign::Positive, 2.0).unwrap();
        assert_eq!(e1, e2);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.find_edge(0, 1, Sign::Positive).unwrap().weight, 3.5);
    }

    #[test]
    fn test_opposite_signs_coexist() {
        let mut g = SignedGraph::with_nodes(2);
        g.add_unit_edge(0, 1, Sign::Positive).unwrap();
        g.add_unit_edge(0, 1, Sign::Negative).unwrap();
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.incident_edges(0).count(), 2);
        assert_eq!(g.total_weight(Sign::Positive), 1.0);
        assert_eq!(g.total_weight(Sign::Negative), 1.0);
    }

    #[test]
    fn test_self_loop_listed_once() {
        let mut g = SignedGraph::with_nodes(2);
        g.add_unit_edge(0, 0, Sign::Positive).unwrap();
        g.add_unit_edge(0, 1, Sign::Negative).unwrap();
        let incident: Vec<_> = g.incident_edges(0).collect();
        assert_eq!(incident.len(), 2);
        assert!(incident[0].is_self_loop());
        assert_eq!(incident[1].other(0), 1);
        assert_eq!(g.incident_edges(1).count(), 1);
    }

    #[test]
    fn test_unknown_endpoint() {
        let mut g = SignedGraph::with_nodes(2);
        let err = g.add_unit_edge(0, 5, Sign::Positive).unwrap_err();
        assert_eq!(err, Error::NodeNotFound { node: 5 });
        assert_eq!(g.incident_edges(7).count(), 0);
    }

    #[test]
    fn test_validate_rejects_non_finite_weight() {
        let mut g = SignedGraph::with_nodes(2);
        g.add_edge(0, 1, Sign::Positive, f64::INFINITY).unwrap();
        assert!(matches!(g.validate(), Err(Error::InvalidGraph(_))));
    }

    #[test]
    fn test_node_weights_keep_labels() {
        let mut g: SignedGraph<&str> = SignedGraph::new();
        let a = g.add_node("alice");
        let b = g.add_node("bob");
        g.add_unit_edge(a, b, Sign::Negative).unwrap();
        assert_eq!(g.node_weight(b), Some(&"bob"));
        assert_eq!(g.node_weights(), &["alice", "bob"]);
        assert!(g.validate().is_ok());
    }

    #[test]
    fn test_from_petgraph() {
        let mut pg = UnGraph::<char, f64>::new_undirected();
        let a = pg.add_node('a');
        let b = pg.add_node('b');
        let c = pg.add_node('c');
        pg.add_edge(a, b, 2.0);
        pg.add_edge(b, c, -1.0);

        let g = SignedGraph::from_petgraph(&pg).unwrap();
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.node_weight(2), Some(&'c'));
        assert_eq!(g.find_edge(0, 1, Sign::Positive).unwrap().weight, 2.0);
        assert_eq!(g.find_edge(1, 2, Sign::Negative).unwrap().weight, 1.0);
    }

    #[test]
    fn test_from_petgraph_rejects_zero_weight() {
        let mut pg = UnGraph::<(), f64>::new_undirected();
        let a = pg.add_node(());
        let b = pg.add_node(());
        pg.add_edge(a, b, 0.0);
        assert!(matches!(
            SignedGraph::from_petgraph(&pg),
            Err(Error::InvalidGraph(_))
        ));
    }

    #[cfg(feature = "ndarray")]
    #[test]
    fn test_from_signed_matrix() {
        use ndarray::array;

        let q = array![
            [1.0, 1.0, -1.0, 0.0],
            [1.0, 1.0, 0.0, 0.0],
            [-1.0, 0.0, 1.0, 1.0],
            [0.0, 0.0, 1.0, 1.0],
        ];
        let g = SignedGraph::from_signed_matrix(&q).unwrap();
        assert_eq!(g.node_count(), 4);
        // 4 self-loops + 2 friend edges + 1 enemy edge
        assert_eq!(g.edge_count(), 7);
        assert_eq!(g.total_weight(Sign::Positive), 6.0);
        assert_eq!(g.total_weight(Sign::Negative), 1.0);
    }

    #[cfg(feature = "ndarray")]
    #[test]
    fn test_from_signed_matrix_rejects_bad_shapes() {
        use ndarray::array;

        let rect = array![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        assert!(SignedGraph::from_signed_matrix(&rect).is_err());

        let asym = array![[0.0, 1.0], [-1.0, 0.0]];
        assert!(SignedGraph::from_signed_matrix(&asym).is_err());
    }
}
