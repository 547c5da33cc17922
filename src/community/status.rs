//! Incremental community statistics.
//!
//! [`Status`] caches, per polarity, the aggregates the signed-modularity
//! objective needs, so that moving one node between communities costs O(1)
//! map updates instead of a rescan of the graph:
//!
//! | Field | Keyed by | Meaning |
//! |-------|----------|---------|
//! | `gdegree` | node | weighted degree in the projection (self-loop twice) |
//! | `loops` | node | self-loop weight |
//! | `degree` | community | Σ `gdegree` of members |
//! | `internal` | community | intra-community weight: cross edges once, self-loops fully |
//! | `total_weight` | - | projection's total edge weight, fixed for the lifetime |
//!
//! Community-keyed maps are insertion-ordered, so every iteration over
//! communities is reproducible.

use core::fmt;

use indexmap::{IndexMap, IndexSet};

use crate::error::{Error, Result};
use crate::graph::{Sign, SignPair, SignedGraph};

/// Community label of a node that is between a remove and an insert.
pub const UNASSIGNED: usize = usize::MAX;

#[derive(Debug, Clone, Default)]
struct SignStats {
    gdegree: Vec<f64>,
    loops: Vec<f64>,
    degree: IndexMap<usize, f64>,
    internal: IndexMap<usize, f64>,
    total_weight: f64,
}

/// Aggregate statistics of a graph under a current partition.
///
/// `Clone` yields a fully independent copy.
#[derive(Debug, Clone)]
pub struct Status {
    node2com: Vec<usize>,
    stats: SignPair<SignStats>,
}

impl Status {
    /// Build the statistics of `graph` under `initial`, or under singleton
    /// communities labeled `0..n` in node order when `initial` is `None`.
    ///
    /// Labels of an initial partition are kept verbatim; [`UNASSIGNED`] is
    /// rejected. With an initial partition every incident edge weight must be
    /// positive; without one, every weighted degree must be non-negative.
    pub fn init<N>(graph: &SignedGraph<N>, initial: Option<&[usize]>) -> Result<Self> {
        let n = graph.node_count();
        let split = graph.split_by_sign();
        let mut stats = SignPair::from_fn(|sign| {
            let projection = &split[sign];
            SignStats {
                gdegree: projection.degrees().to_vec(),
                loops: projection.self_loops().to_vec(),
                degree: IndexMap::with_capacity(n),
                internal: IndexMap::with_capacity(n),
                total_weight: projection.total_weight(),
            }
        });
        let mut node2com = Vec::with_capacity(n);

        match initial {
            None => {
                for node in 0..n {
                    for sign in Sign::ALL {
                        let s = &mut stats[sign];
                        let deg = s.gdegree[node];
                        if deg < 0.0 {
                            return Err(Error::InvalidWeight { node, weight: deg });
                        }
                        let self_loop = s.loops[node];
                        s.degree.insert(node, deg);
                        s.internal.insert(node, self_loop);
                    }
                    node2com.push(node);
                }
            }
            Some(partition) => {
                for node in 0..n {
                    let com = community_in(partition, node)?;
                    if com == UNASSIGNED {
                        return Err(Error::InvalidParameter {
                            name: "initial",
                            message: "community label usize::MAX is reserved",
                        });
                    }
                    node2com.push(com);

                    let mut inc = SignPair::new(0.0, 0.0);
                    for edge in graph.incident_edges(node) {
                        if edge.weight <= 0.0 {
                            return Err(Error::InvalidWeight {
                                node,
                                weight: edge.weight,
                            });
                        }
                        let neighbor = edge.other(node);
                        if community_in(partition, neighbor)? != com {
                            continue;
                        }
                        // Cross edges are seen from both endpoints.
                        inc[edge.sign] += if edge.is_self_loop() {
                            edge.weight
                        } else {
                            edge.weight / 2.0
                        };
                    }

                    for sign in Sign::ALL {
                        let s = &mut stats[sign];
                        let deg = s.gdegree[node];
                        *s.degree.entry(com).or_insert(0.0) += deg;
                        *s.internal.entry(com).or_insert(0.0) += inc[sign];
                    }
                }
            }
        }

        Ok(Self { node2com, stats })
    }

    /// Take `node` out of `community`.
    ///
    /// `cross` is the weight, per polarity, of the edges between `node` and
    /// the other members of `community`.
    ///
    /// # Panics
    ///
    /// If `node` is not a node of the graph this status was built from.
    pub fn remove(&mut self, node: usize, community: usize, cross: SignPair<f64>) {
        for sign in Sign::ALL {
            let s = &mut self.stats[sign];
            let (deg, self_loop) = (s.gdegree[node], s.loops[node]);
            *s.degree.entry(community).or_insert(0.0) -= deg;
            *s.internal.entry(community).or_insert(0.0) -= cross[sign] + self_loop;
        }
        self.node2com[node] = UNASSIGNED;
    }

    /// Put `node` into `community`; `cross` as in [`Status::remove`].
    ///
    /// # Panics
    ///
    /// If `node` is not a node of the graph this status was built from.
    pub fn insert(&mut self, node: usize, community: usize, cross: SignPair<f64>) {
        self.node2com[node] = community;
        for sign in Sign::ALL {
            let s = &mut self.stats[sign];
            let (deg, self_loop) = (s.gdegree[node], s.loops[node]);
            *s.degree.entry(community).or_insert(0.0) += deg;
            *s.internal.entry(community).or_insert(0.0) += cross[sign] + self_loop;
        }
    }

    /// Signed modularity of the current partition.
    ///
    /// ```text
    /// Q = Σ_c [ in⁺_c / 2L⁺ − (deg⁺_c / 2L⁺)² ] − Σ_c [ in⁻_c / 2L⁻ − (deg⁻_c / 2L⁻)² ]
    /// ```
    ///
    /// A polarity with no edge weight contributes nothing.
    pub fn modularity(&self) -> f64 {
        let communities = self.communities();
        let mut q = 0.0;
        for sign in Sign::ALL {
            let s = &self.stats[sign];
            let links = s.total_weight;
            if links <= 0.0 {
                continue;
            }
            let term: f64 = communities
                .iter()
                .map(|c| {
                    let internal = s.internal.get(c).copied().unwrap_or(0.0);
                    let degree = s.degree.get(c).copied().unwrap_or(0.0);
                    internal / (2.0 * links) - (degree / (2.0 * links)).powi(2)
                })
                .sum();
            match sign {
                Sign::Positive => q += term,
                Sign::Negative => q -= term,
            }
        }
        q
    }

    /// Number of nodes tracked.
    pub fn node_count(&self) -> usize {
        self.node2com.len()
    }

    /// Current community of `node`; `None` if unknown or detached.
    pub fn community_of(&self, node: usize) -> Option<usize> {
        self.node2com.get(node).copied().filter(|&c| c != UNASSIGNED)
    }

    /// Community of every node, indexed by node.
    pub fn assignments(&self) -> &[usize] {
        &self.node2com
    }

    /// Distinct communities currently holding a node, in first-seen order.
    pub fn communities(&self) -> IndexSet<usize> {
        self.node2com
            .iter()
            .copied()
            .filter(|&c| c != UNASSIGNED)
            .collect()
    }

    /// Weighted degree of `node` in one polarity.
    pub fn node_degree(&self, sign: Sign, node: usize) -> f64 {
        self.stats[sign].gdegree.get(node).copied().unwrap_or(0.0)
    }

    /// Self-loop weight of `node` in one polarity.
    pub fn self_loop(&self, sign: Sign, node: usize) -> f64 {
        self.stats[sign].loops.get(node).copied().unwrap_or(0.0)
    }

    /// Total degree of `community` in one polarity.
    pub fn degree(&self, sign: Sign, community: usize) -> f64 {
        self.stats[sign]
            .degree
            .get(&community)
            .copied()
            .unwrap_or(0.0)
    }

    /// Intra-community weight of `community` in one polarity.
    pub fn internal(&self, sign: Sign, community: usize) -> f64 {
        self.stats[sign]
            .internal
            .get(&community)
            .copied()
            .unwrap_or(0.0)
    }

    /// Total edge weight of one polarity.
    pub fn total_weight(&self, sign: Sign) -> f64 {
        self.stats[sign].total_weight
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "node2com: {:?}", self.node2com)?;
        for sign in Sign::ALL {
            let s = &self.stats[sign];
            writeln!(
                f,
                "{sign}: degrees {:?} internals {:?} total_weight {}",
                s.degree, s.internal, s.total_weight
            )?;
        }
        Ok(())
    }
}

fn community_in(partition: &[usize], node: usize) -> Result<usize> {
    partition
        .get(node)
        .copied()
        .ok_or(Error::NodeNotFound { node })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    // Two friendly pairs (0,1) and (2,3), enemies 0-2, positive self-loops.
    fn fixture() -> SignedGraph {
        let mut g = SignedGraph::with_nodes(4);
        for i in 0..4 {
            g.add_unit_edge(i, i, Sign::Positive).unwrap();
        }
        g.add_unit_edge(0, 1, Sign::Positive).unwrap();
        g.add_unit_edge(2, 3, Sign::Positive).unwrap();
        g.add_unit_edge(0, 2, Sign::Negative).unwrap();
        g
    }

    /// Recompute degree and internal weight of every community from scratch.
    fn assert_consistent(status: &Status, graph: &SignedGraph) {
        for c in status.communities() {
            for sign in Sign::ALL {
                let degree: f64 = (0..graph.node_count())
                    .filter(|&n| status.community_of(n) == Some(c))
                    .map(|n| status.node_degree(sign, n))
                    .sum();
                assert!((status.degree(sign, c) - degree).abs() < TOL);

                let internal: f64 = graph
                    .edges()
                    .iter()
                    .filter(|e| e.sign == sign)
                    .filter(|e| {
                        status.community_of(e.source) == Some(c)
                            && status.community_of(e.target) == Some(c)
                    })
                    .map(|e| e.weight)
                    .sum();
                assert!((status.internal(sign, c) - internal).abs() < TOL);
            }
        }
    }

    #[test]
    fn test_init_singletons() {
        let g = fixture();
        let status = Status::init(&g, None).unwrap();

        assert_eq!(status.assignments(), &[0, 1, 2, 3]);
        assert_eq!(status.total_weight(Sign::Positive), 6.0);
        assert_eq!(status.total_weight(Sign::Negative), 1.0);
        assert_eq!(status.degree(Sign::Positive, 0), 3.0);
        assert_eq!(status.degree(Sign::Negative, 0), 1.0);
        assert_eq!(status.degree(Sign::Negative, 1), 0.0);
        assert_eq!(status.internal(Sign::Positive, 2), 1.0);
        assert_consistent(&status, &g);
    }

    #[test]
    fn test_init_with_partition_keeps_labels() {
        let g = fixture();
        let status = Status::init(&g, Some(&[7, 7, 3, 3])).unwrap();

        assert_eq!(status.assignments(), &[7, 7, 3, 3]);
        assert_eq!(status.communities().into_iter().collect::<Vec<_>>(), vec![7, 3]);
        // two self-loops plus the friend edge, counted once
        assert!((status.internal(Sign::Positive, 7) - 3.0).abs() < TOL);
        assert_eq!(status.internal(Sign::Negative, 7), 0.0);
        assert_eq!(status.degree(Sign::Positive, 7), 6.0);
        assert_consistent(&status, &g);
    }

    #[test]
    fn test_init_with_partition_rejects_non_positive_weight() {
        let mut g = fixture();
        g.add_edge(1, 3, Sign::Negative, 0.0).unwrap();
        let err = Status::init(&g, Some(&[0, 0, 1, 1])).unwrap_err();
        assert!(matches!(err, Error::InvalidWeight { node: 1, .. }));
    }

    #[test]
    fn test_init_rejects_negative_degree() {
        let mut g = SignedGraph::with_nodes(2);
        g.add_edge(0, 1, Sign::Positive, -2.0).unwrap();
        assert!(matches!(
            Status::init(&g, None),
            Err(Error::InvalidWeight { node: 0, .. })
        ));
    }

    #[test]
    fn test_init_rejects_reserved_label() {
        let g = fixture();
        let err = Status::init(&g, Some(&[UNASSIGNED, UNASSIGNED, 5, 5])).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidParameter {
                name: "initial",
                ..
            }
        ));
    }

    #[test]
    fn test_init_partition_must_cover_nodes() {
        let g = fixture();
        let err = Status::init(&g, Some(&[0, 0, 1])).unwrap_err();
        assert_eq!(err, Error::NodeNotFound { node: 3 });
    }

    #[test]
    fn test_remove_insert_keeps_invariants() {
        let g = fixture();
        let mut status = Status::init(&g, None).unwrap();

        // move 1 into 0's community, then 3 into 2's, then 2 into 0's
        status.remove(1, 1, SignPair::new(0.0, 0.0));
        assert_eq!(status.community_of(1), None);
        status.insert(1, 0, SignPair::new(1.0, 0.0));
        assert_consistent(&status, &g);

        status.remove(3, 3, SignPair::new(0.0, 0.0));
        status.insert(3, 2, SignPair::new(1.0, 0.0));
        assert_consistent(&status, &g);

        status.remove(2, 2, SignPair::new(1.0, 0.0));
        status.insert(2, 0, SignPair::new(0.0, 1.0));
        assert_consistent(&status, &g);

        assert_eq!(status.assignments(), &[0, 0, 0, 2]);
        // vacated community 1 keeps a zero degree
        assert!(status.degree(Sign::Positive, 1).abs() < TOL);
    }

    #[test]
    fn test_modularity_of_friend_pairs() {
        let g = fixture();
        let singletons = Status::init(&g, None).unwrap();
        let pairs = Status::init(&g, Some(&[0, 0, 1, 1])).unwrap();
        let single = Status::init(&g, Some(&[0, 0, 0, 0])).unwrap();

        assert!((pairs.modularity() - 0.5).abs() < TOL);
        assert!(single.modularity().abs() < TOL);
        assert!((singletons.modularity() - 7.0 / 12.0).abs() < TOL);
    }

    #[test]
    fn test_modularity_skips_empty_polarity() {
        let mut g = SignedGraph::with_nodes(2);
        g.add_unit_edge(0, 1, Sign::Positive).unwrap();
        let status = Status::init(&g, Some(&[0, 0])).unwrap();
        // in = 1, deg = 2, L = 1
        assert!((status.modularity() - (0.5 - 1.0)).abs() < TOL);
    }

    #[test]
    fn test_clone_is_independent() {
        let g = fixture();
        let original = Status::init(&g, None).unwrap();
        let mut copy = original.clone();

        copy.remove(1, 1, SignPair::new(0.0, 0.0));
        copy.insert(1, 0, SignPair::new(1.0, 0.0));

        assert_eq!(original.assignments(), &[0, 1, 2, 3]);
        assert_eq!(original.degree(Sign::Positive, 0), 3.0);
        assert_eq!(copy.degree(Sign::Positive, 0), 6.0);
        assert_ne!(original.modularity(), copy.modularity());
    }

    #[test]
    fn test_display_lists_both_polarities() {
        let g = fixture();
        let text = Status::init(&g, None).unwrap().to_string();
        assert!(text.starts_with("node2com: [0, 1, 2, 3]"));
        assert!(text.contains("positive"));
        assert!(text.contains("negative"));
    }
}
