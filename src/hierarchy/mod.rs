//! Multilevel partition hierarchies.
//!
//! A [`Dendrogram`] records each level produced by aggregation; flat
//! partitions of the original nodes are recovered with
//! [`partition_at_level`].

mod dendrogram;

pub use dendrogram::{partition_at_level, Dendrogram, Level};
