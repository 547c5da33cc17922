//! # rift
//!
//! Community detection in signed graphs: multilevel Louvain optimization of
//! signed modularity, where positive edges pull nodes together and negative
//! edges push them apart.
//!
//! - [`graph`]: signed multigraph storage, per-polarity projections and file loaders
//! - [`community`]: local moving, aggregation, the signed modularity scorer and
//!   the [`SignedLouvain`] driver
//! - [`hierarchy`]: the [`Dendrogram`] of levels and flat-partition projection
//!
//! ```rust
//! use rift::{best_partition, modularity, Sign, SignedGraph};
//!
//! let mut graph = SignedGraph::with_nodes(4);
//! graph.add_unit_edge(0, 1, Sign::Positive).unwrap();
//! graph.add_unit_edge(2, 3, Sign::Positive).unwrap();
//! graph.add_unit_edge(0, 2, Sign::Negative).unwrap();
//!
//! let partition = best_partition(&graph, None).unwrap();
//! assert!(modularity(&partition, &graph).unwrap() > 0.0);
//! ```

pub mod community;
/// Error types used across `rift`.
pub mod error;
pub mod graph;
pub mod hierarchy;


pub use error::{Error, ErrorKind, Result};

pub use community::{
    best_partition, generate_dendrogram, induced_graph, modularity, one_level, renumber,
    CommunityDetection, SignedLouvain, Status,
};
pub use graph::{Sign, SignPair, SignedEdge, SignedGraph};
pub use hierarchy::{partition_at_level, Dendrogram, Level};
