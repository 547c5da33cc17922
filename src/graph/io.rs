//! Graph file formats.
//!
//! ## Binary (CSR)
//!
//! The compact format written by the `convert` utility of the reference C++
//! Louvain implementation: a little-endian stream of `u32`
//!
//! ```text
//! [num_nodes][cum_degree_0 .. cum_degree_{num_nodes-1}][neighbor_0 ..]
//! ```
//!
//! where `cum_degree` is a prefix-sum offset array into the neighbor list, so
//! the neighbors of node `i` are `neighbors[cum_degree[i-1]..cum_degree[i]]`.
//! The link count is the last cumulative degree. Streams that repeat it as
//! an explicit `[num_links]` word before the neighbor list are accepted too.
//!
//! The format has no polarity or weight: every link loads as a positive edge
//! of weight 1, once per unordered node pair.
//!
//! ## Signed edge list
//!
//! One edge per line, whitespace- or comma-separated:
//!
//! ```text
//! # u  v  sign  [weight]
//! alice bob   +1
//! alice carol -1  2.5
//! ```
//!
//! `sign` is `1`, `+1`, `+`, `-1` or `-`; the weight defaults to 1.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use super::{Sign, SignedGraph, DEFAULT_WEIGHT};
use crate::error::{Error, Result};

/// Read a binary CSR graph from `reader`.
pub fn read_binary<R: Read>(mut reader: R) -> Result<SignedGraph> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    if bytes.len() % 4 != 0 {
        return Err(Error::Format(format!(
            "stream length {} is not a multiple of 4 bytes",
            bytes.len()
        )));
    }
    let words: Vec<u32> = bytes
        .chunks_exact(4)
        .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();

    let (&num_nodes, rest) = words
        .split_first()
        .ok_or_else(|| Error::Format("empty stream".into()))?;
    let num_nodes = num_nodes as usize;
    if rest.len() < num_nodes {
        return Err(Error::Format(format!(
            "expected {num_nodes} cumulative degrees, found {}",
            rest.len()
        )));
    }
    let (cum_degree, rest) = rest.split_at(num_nodes);

    let num_links = cum_degree.last().copied().unwrap_or(0) as usize;
    let links = if rest.len() == num_links {
        rest
    } else if rest.len() == num_links + 1 && rest[0] as usize == num_links {
        &rest[1..]
    } else {
        return Err(Error::Format(format!(
            "expected {num_links} links, found {} words",
            rest.len()
        )));
    };

    let mut graph = SignedGraph::with_nodes(num_nodes);
    let mut start = 0usize;
    for (node, &end) in cum_degree.iter().enumerate() {
        let end = end as usize;
        if end < start || end > links.len() {
            return Err(Error::Format(format!(
                "cumulative degree of node {node} is out of order"
            )));
        }
        for &neighbor in &links[start..end] {
            let neighbor = neighbor as usize;
            if neighbor >= num_nodes {
                return Err(Error::Format(format!(
                    "node {node} links to {neighbor}, beyond {num_nodes} nodes"
                )));
            }
            if graph.find_edge(node, neighbor, Sign::Positive).is_none() {
                graph.add_unit_edge(node, neighbor, Sign::Positive)?;
            }
        }
        start = end;
    }
    Ok(graph)
}

/// Load a binary CSR graph file.
pub fn load_binary<P: AsRef<Path>>(path: P) -> Result<SignedGraph> {
    let file = File::open(path)?;
    read_binary(BufReader::new(file))
}

/// Read a signed edge list; node weights are the labels as written.
pub fn read_edge_list<R: BufRead>(reader: R) -> Result<SignedGraph<String>> {
    let mut graph = SignedGraph::new();
    let mut handles: HashMap<String, usize> = HashMap::new();

    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|s| !s.is_empty())
            .collect();
        if !(3..=4).contains(&fields.len()) {
            return Err(Error::Format(format!(
                "line {}: expected `<u> <v> <sign> [weight]`",
                lineno + 1
            )));
        }

        let sign = parse_sign(fields[2]).ok_or_else(|| {
            Error::Format(format!("line {}: bad sign '{}'", lineno + 1, fields[2]))
        })?;
        let weight = match fields.get(3) {
            Some(raw) => raw
                .parse::<f64>()
                .ok()
                .filter(|w| w.is_finite() && *w > 0.0)
                .ok_or_else(|| {
                    Error::Format(format!("line {}: bad weight '{raw}'", lineno + 1))
                })?,
            None => DEFAULT_WEIGHT,
        };

        let u = intern(&mut graph, &mut handles, fields[0]);
        let v = intern(&mut graph, &mut handles, fields[1]);
        graph.add_edge(u, v, sign, weight)?;
    }
    Ok(graph)
}

/// Load a signed edge-list file.
pub fn load_edge_list<P: AsRef<Path>>(path: P) -> Result<SignedGraph<String>> {
    let file = File::open(path)?;
    read_edge_list(BufReader::new(file))
}

fn parse_sign(raw: &str) -> Option<Sign> {
    match raw {
        "1" | "+1" | "+" => Some(Sign::Positive),
        "-1" | "-" => Some(Sign::Negative),
        _ => None,
    }
}

fn intern(
    graph: &mut SignedGraph<String>,
    handles: &mut HashMap<String, usize>,
    label: &str,
) -> usize {
    if let Some(&handle) = handles.get(label) {
        return handle;
    }
    let handle = graph.add_node(label.to_string());
    handles.insert(label.to_string(), handle);
    handle
}
