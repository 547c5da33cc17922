//! Louvain algorithm for signed community detection.
//!
//! Multilevel greedy optimization of signed modularity through local node
//! moves and graph aggregation.
//!
//! ## The Algorithm
//!
//! 1. **Local moving** ([`one_level`]): start from singletons (or a given
//!    partition) and move nodes to the neighboring community with the best
//!    signed gain until the partition stabilizes.
//!
//! 2. **Aggregation** ([`induced_graph`]): build a meta-graph whose nodes are
//!    the communities. Edge weights are summed per polarity; intra-community
//!    weight becomes a self-loop.
//!
//! 3. **Iterate** on the meta-graph, each time from singletons, until the
//!    modularity gain of a new level drops below the threshold.
//!
//! Every finished level is recorded in a [`Dendrogram`]; level `i + 1`
//! partitions the communities of level `i`.
//!
//! ## References
//!
//! Blondel et al. (2008). "Fast unfolding of communities in large networks."
//! Journal of Statistical Mechanics: Theory and Experiment, P10008.

use petgraph::graph::UnGraph;
use tracing::debug;

use super::aggregate::induced_graph;
use super::local_move::one_level;
use super::partition::{community_count, renumber};
use super::status::Status;
use super::traits::CommunityDetection;
use crate::error::{Error, Result};
use crate::graph::SignedGraph;
use crate::hierarchy::Dendrogram;

/// Default minimum modularity improvement to keep iterating.
pub const DEFAULT_MIN_GAIN: f64 = 1e-7;

/// Louvain community detection for signed graphs.
#[derive(Debug, Clone)]
pub struct SignedLouvain {
    /// Minimum modularity improvement per sweep and per level.
    min_gain: f64,
    /// Cap on local-moving sweeps per level.
    max_passes: Option<usize>,
    /// Cap on dendrogram levels.
    max_levels: Option<usize>,
}

impl SignedLouvain {
    /// Create a detector with default settings: `min_gain = 1e-7`, no caps.
    pub fn new() -> Self {
        Self {
            min_gain: DEFAULT_MIN_GAIN,
            max_passes: None,
            max_levels: None,
        }
    }

    /// Set the minimum modularity improvement.
    pub fn with_min_gain(mut self, min_gain: f64) -> Self {
        self.min_gain = min_gain;
        self
    }

    /// Limit local-moving sweeps per level.
    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = Some(max_passes);
        self
    }

    /// Limit the number of dendrogram levels.
    pub fn with_max_levels(mut self, max_levels: usize) -> Self {
        self.max_levels = Some(max_levels);
        self
    }

    /// Minimum modularity improvement.
    pub fn min_gain(&self) -> f64 {
        self.min_gain
    }

    fn check(&self) -> Result<()> {
        if !self.min_gain.is_finite() || self.min_gain < 0.0 {
            return Err(Error::InvalidParameter {
                name: "min_gain",
                message: "must be finite and non-negative",
            });
        }
        if self.max_passes == Some(0) {
            return Err(Error::InvalidParameter {
                name: "max_passes",
                message: "must be at least 1",
            });
        }
        if self.max_levels == Some(0) {
            return Err(Error::InvalidParameter {
                name: "max_levels",
                message: "must be at least 1",
            });
        }
        Ok(())
    }

    /// Find communities in `graph` and return the whole hierarchy.
    ///
    /// `initial` seeds the first level; its labels are used as given. A graph
    /// without edges yields a single level of singleton communities.
    pub fn generate_dendrogram<N>(
        &self,
        graph: &SignedGraph<N>,
        initial: Option<&[usize]>,
    ) -> Result<Dendrogram> {
        self.check()?;
        graph.validate()?;

        let mut dendrogram = Dendrogram::new();
        if graph.edge_count() == 0 {
            dendrogram.push((0..graph.node_count()).collect(), 0.0);
            return Ok(dendrogram);
        }

        let mut status = Status::init(graph, initial)?;
        let stats = one_level(graph, &mut status, self.min_gain, self.max_passes);
        let mut modularity = stats.final_modularity;
        let partition = renumber(status.assignments());
        let mut current = induced_graph(&partition, graph)?;
        debug!(
            level = 0,
            communities = current.node_count(),
            modularity,
            passes = stats.passes,
            "level complete"
        );
        dendrogram.push(partition, modularity);

        while self.max_levels.map_or(true, |cap| dendrogram.len() < cap) {
            let mut status = Status::init(&current, None)?;
            let stats = one_level(&current, &mut status, self.min_gain, self.max_passes);
            if stats.final_modularity - modularity < self.min_gain {
                break;
            }
            modularity = stats.final_modularity;
            let partition = renumber(status.assignments());
            current = induced_graph(&partition, &current)?;
            debug!(
                level = dendrogram.len(),
                communities = community_count(&partition),
                modularity,
                passes = stats.passes,
                "level complete"
            );
            dendrogram.push(partition, modularity);
        }

        Ok(dendrogram)
    }

    /// Partition of the original nodes at the coarsest dendrogram level.
    pub fn best_partition<N>(
        &self,
        graph: &SignedGraph<N>,
        initial: Option<&[usize]>,
    ) -> Result<Vec<usize>> {
        self.generate_dendrogram(graph, initial)?.best_partition()
    }
}

impl Default for SignedLouvain {
    fn default() -> Self {
        Self::new()
    }
}

impl CommunityDetection for SignedLouvain {
    fn detect<N, E>(&self, graph: &UnGraph<N, E>) -> Result<Vec<usize>>
    where
        N: Clone,
        E: Copy + Into<f64>,
    {
        let signed = SignedGraph::from_petgraph(graph)?;
        self.best_partition(&signed, None)
    }
}

/// [`SignedLouvain::generate_dendrogram`] with default settings.
pub fn generate_dendrogram<N>(
    graph: &SignedGraph<N>,
    initial: Option<&[usize]>,
) -> Result<Dendrogram> {
    SignedLouvain::new().generate_dendrogram(graph, initial)
}

/// [`SignedLouvain::best_partition`] with default settings.
pub fn best_partition<N>(graph: &SignedGraph<N>, initial: Option<&[usize]>) -> Result<Vec<usize>> {
    SignedLouvain::new().best_partition(graph, initial)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::community::modularity;
    use crate::error::ErrorKind;
    use crate::graph::Sign;

    /// Two positive triangles joined by negative edges.
    fn two_factions() -> SignedGraph {
        let mut g = SignedGraph::with_nodes(6);
        for (a, b) in [(0, 1), (1, 2), (0, 2), (3, 4), (4, 5), (3, 5)] {
            g.add_unit_edge(a, b, Sign::Positive).unwrap();
        }
        for (a, b) in [(0, 3), (1, 4), (2, 5)] {
            g.add_unit_edge(a, b, Sign::Negative).unwrap();
        }
        g
    }

    #[test]
    fn test_two_factions() {
        let g = two_factions();
        let communities = best_partition(&g, None).unwrap();

        assert_eq!(communities.len(), 6);
        assert_eq!(communities[0], communities[1]);
        assert_eq!(communities[1], communities[2]);
        assert_eq!(communities[3], communities[4]);
        assert_eq!(communities[4], communities[5]);
        assert_ne!(communities[0], communities[3]);
    }

    #[test]
    fn test_no_edges_gives_identity() {
        let g = SignedGraph::with_nodes(4);
        let dendrogram = generate_dendrogram(&g, None).unwrap();
        assert_eq!(dendrogram.len(), 1);
        assert_eq!(dendrogram.level(0).unwrap().partition, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_empty_graph() {
        let g: SignedGraph = SignedGraph::new();
        assert_eq!(best_partition(&g, None).unwrap(), Vec::<usize>::new());
    }

    #[test]
    fn test_levels_are_renumbered() {
        let g = two_factions();
        let dendrogram = generate_dendrogram(&g, None).unwrap();
        for level in dendrogram.levels() {
            assert_eq!(level.partition, renumber(&level.partition));
        }
    }

    #[test]
    fn test_last_level_score_matches_scorer() {
        let g = two_factions();
        let dendrogram = generate_dendrogram(&g, None).unwrap();
        let flat = dendrogram.best_partition().unwrap();
        let recorded = dendrogram.last().unwrap().modularity;
        assert!((modularity(&flat, &g).unwrap() - recorded).abs() < 1e-9);
    }

    #[test]
    fn test_initial_partition_is_used() {
        let g = two_factions();
        // seeding with the answer leaves nothing to improve
        let seed = [4, 4, 4, 8, 8, 8];
        let dendrogram = generate_dendrogram(&g, Some(&seed)).unwrap();
        assert_eq!(dendrogram.level(0).unwrap().partition, vec![0, 0, 0, 1, 1, 1]);
    }

    #[test]
    fn test_initial_partition_rejects_zero_weight() {
        let mut g = two_factions();
        g.add_edge(0, 4, Sign::Positive, 0.0).unwrap();
        let err = generate_dendrogram(&g, Some(&[0, 0, 0, 1, 1, 1])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_malformed_graph_rejected_before_work() {
        let mut g = two_factions();
        g.add_edge(0, 5, Sign::Negative, f64::NAN).unwrap();
        let err = generate_dendrogram(&g, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Shape);
    }

    #[test]
    fn test_invalid_parameters() {
        let g = two_factions();
        for detector in [
            SignedLouvain::new().with_min_gain(-1.0),
            SignedLouvain::new().with_min_gain(f64::NAN),
            SignedLouvain::new().with_max_passes(0),
            SignedLouvain::new().with_max_levels(0),
        ] {
            let err = detector.generate_dendrogram(&g, None).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Parameter);
        }
    }

    #[test]
    fn test_max_levels_caps_dendrogram() {
        let g = two_factions();
        let dendrogram = SignedLouvain::new()
            .with_max_levels(1)
            .generate_dendrogram(&g, None)
            .unwrap();
        assert_eq!(dendrogram.len(), 1);
    }

    #[test]
    fn test_detect_petgraph() {
        let mut pg = UnGraph::<&str, f64>::new_undirected();
        let nodes: Vec<_> = ["a", "b", "c", "d"].iter().map(|&n| pg.add_node(n)).collect();
        pg.add_edge(nodes[0], nodes[1], 1.0);
        pg.add_edge(nodes[2], nodes[3], 1.0);
        pg.add_edge(nodes[0], nodes[2], -1.0);
        pg.add_edge(nodes[1], nodes[3], -1.0);

        let communities = SignedLouvain::new().detect(&pg).unwrap();
        assert_eq!(communities[0], communities[1]);
        assert_eq!(communities[2], communities[3]);
        assert_ne!(communities[0], communities[2]);
    }
}
