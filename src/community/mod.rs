//! Community detection for signed graphs.
//!
//! Given a graph whose edges are either friendly (positive) or hostile
//! (negative), find groups whose members are tied by many positive edges and
//! few negative ones.
//!
//! ## The Signed Modularity Objective
//!
//! Each polarity is scored against its own null model and the hostile score
//! is subtracted from the friendly one:
//!
//! ```text
//! Q = Σ_c [in⁺_c / 2L⁺ − (deg⁺_c / 2L⁺)²] − Σ_c [in⁻_c / 2L⁻ − (deg⁻_c / 2L⁻)²]
//! ```
//!
//! Where:
//! - L⁺, L⁻ = total positive and negative edge weight
//! - in_c = edge weight inside community c (self-loops counted fully)
//! - deg_c = summed degree of c's members (self-loops counted twice)
//!
//! A polarity with L = 0 contributes nothing to the score the detector
//! optimizes. [`modularity`] is stricter and rejects such graphs.
//!
//! **Intuition**: a good partition has more positive weight inside groups
//! than chance would put there, and less negative weight.
//!
//! ## Algorithm
//!
//! [`SignedLouvain`] runs the Louvain scheme ([Blondel et al. 2008](https://arxiv.org/abs/0803.0476))
//! on this objective:
//! 1. **Local moving** ([`one_level`]): move single nodes while the score improves
//! 2. **Aggregation** ([`induced_graph`]): contract communities into nodes, repeat
//!
//! Every level is kept in a [`Dendrogram`](crate::hierarchy::Dendrogram).
//!
//! ## Usage
//!
//! ```rust
//! use rift::community::best_partition;
//! use rift::graph::{Sign, SignedGraph};
//!
//! let mut graph = SignedGraph::with_nodes(4);
//! graph.add_unit_edge(0, 1, Sign::Positive).unwrap();
//! graph.add_unit_edge(2, 3, Sign::Positive).unwrap();
//! graph.add_unit_edge(1, 2, Sign::Negative).unwrap();
//!
//! let communities = best_partition(&graph, None).unwrap();
//! assert_eq!(communities[0], communities[1]);
//! assert_ne!(communities[1], communities[2]);
//! ```
//!
//! ## References
//!
//! - Blondel et al. (2008). "Fast unfolding of communities in large networks."
//! - Gómez, Jensen, Arenas (2009). "Analysis of community structure in
//!   networks of correlated data." Physical Review E 80, 016114.

mod aggregate;
mod local_move;
mod louvain;
mod modularity;
mod partition;
mod status;
mod traits;

pub use aggregate::induced_graph;
pub use local_move::{one_level, LocalMoveStats};
pub use louvain::{best_partition, generate_dendrogram, SignedLouvain, DEFAULT_MIN_GAIN};
pub use modularity::modularity;
pub use partition::{community_count, renumber};
pub use status::{Status, UNASSIGNED};
pub use traits::CommunityDetection;
