//! Signed modularity of an arbitrary partition.
//!
//! Recomputes the objective from scratch, without a [`Status`], so that any
//! partition (including one produced elsewhere) can be scored and checked
//! against the incremental bookkeeping.
//!
//! [`Status`]: super::Status

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::graph::{Sign, SignPair, SignedGraph};

/// Signed modularity of `partition` over `graph`.
///
/// ```text
/// Q = Σ_c [ in⁺_c / 2L⁺ − (deg⁺_c / 2L⁺)² ] − Σ_c [ in⁻_c / 2L⁻ − (deg⁻_c / 2L⁻)² ]
/// ```
///
/// `in_c` counts each intra-community edge once and each self-loop fully.
///
/// # Errors
///
/// - [`Error::InvalidGraph`] if the graph is malformed.
/// - [`Error::UndefinedModularity`] if either polarity has zero total weight.
/// - [`Error::NodeNotFound`] if `partition` does not cover every node.
pub fn modularity<N>(partition: &[usize], graph: &SignedGraph<N>) -> Result<f64> {
    graph.validate()?;

    let split = graph.split_by_sign();
    let links = SignPair::from_fn(|sign| split[sign].total_weight());
    for sign in Sign::ALL {
        if links[sign] == 0.0 {
            return Err(Error::UndefinedModularity { sign });
        }
    }

    // community -> (internal, degree) per polarity
    let mut inc: IndexMap<usize, SignPair<f64>> = IndexMap::new();
    let mut deg: IndexMap<usize, SignPair<f64>> = IndexMap::new();

    for node in 0..graph.node_count() {
        let com = lookup(partition, node)?;
        let node_deg = deg.entry(com).or_default();
        for sign in Sign::ALL {
            node_deg[sign] += split[sign].degree(node);
        }

        for edge in graph.incident_edges(node) {
            if lookup(partition, edge.other(node))? != com {
                continue;
            }
            inc.entry(com).or_default()[edge.sign] += if edge.is_self_loop() {
                edge.weight
            } else {
                edge.weight / 2.0
            };
        }
    }

    let mut q = 0.0;
    for (com, degree) in &deg {
        let internal = inc.get(com).copied().unwrap_or_default();
        let term = |sign: Sign| {
            let two_l = 2.0 * links[sign];
            internal[sign] / two_l - (degree[sign] / two_l).powi(2)
        };
        q += term(Sign::Positive) - term(Sign::Negative);
    }
    Ok(q)
}

fn lookup(partition: &[usize], node: usize) -> Result<usize> {
    partition
        .get(node)
        .copied()
        .ok_or(Error::NodeNotFound { node })
}
