use std::fmt::Display;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use rift::graph::{load_binary, load_edge_list};
use rift::{generate_dendrogram, Error, SignedGraph};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
Usage : rift filename
find the communities in graph filename and display the dendrogram
Parameters:
filename is either a binary file as generated by the convert utility
distributed with the C implementation, or a signed edge list
(.txt, .tsv, .edges, .edgelist) with lines `<u> <v> <sign> [weight]`";

const EDGE_LIST_EXTENSIONS: [&str; 4] = ["txt", "tsv", "edges", "edgelist"];

#[derive(Parser, Debug)]
#[command(
    name = "rift",
    about = "Signed-graph community detection (signed Louvain)"
)]
struct Cli {
    /// Graph file to partition.
    file: Option<PathBuf>,
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let Some(path) = cli.file else {
        println!("{USAGE}");
        return Ok(());
    };

    if is_edge_list(&path) {
        run(&path, load_edge_list(&path))
    } else {
        run(&path, load_binary(&path))
    }
}

/// Report on a loaded graph; an unreadable file only prints the usage.
fn run<N: Display>(path: &Path, loaded: Result<SignedGraph<N>, Error>) -> Result<(), Error> {
    match loaded {
        Ok(graph) => report(&graph),
        Err(Error::Io(msg)) => {
            debug!(path = %path.display(), error = %msg, "could not read graph file");
            println!("{USAGE}");
            Ok(())
        }
        Err(err) => Err(err),
    }
}

fn is_edge_list(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            EDGE_LIST_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Partition `graph`, print the score to stderr and the assignment to stdout.
fn report<N: Display>(graph: &SignedGraph<N>) -> Result<(), Error> {
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "graph loaded"
    );

    let dendrogram = generate_dendrogram(graph, None)?;
    let partition = dendrogram.best_partition()?;
    let score = dendrogram.last().map_or(0.0, |level| level.modularity);
    info!(levels = dendrogram.len(), modularity = score, "partition found");
    eprintln!("{score}");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for (label, community) in graph.node_weights().iter().zip(&partition) {
        writeln!(out, "{label} {community}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreadable_file_prints_usage() {
        let path = Path::new("/nonexistent/graph.bin");
        let loaded: Result<SignedGraph, Error> = Err(Error::Io("not found".into()));
        assert!(run(path, loaded).is_ok());
    }

    #[test]
    fn test_malformed_file_propagates() {
        let path = Path::new("graph.bin");
        let loaded: Result<SignedGraph, Error> = Err(Error::Format("truncated".into()));
        assert_eq!(
            run(path, loaded).unwrap_err(),
            Error::Format("truncated".into())
        );
    }

    #[test]
    fn test_loader_chosen_by_extension() {
        assert!(is_edge_list(Path::new("friends.edges")));
        assert!(is_edge_list(Path::new("FRIENDS.TXT")));
        assert!(is_edge_list(Path::new("a/b.edgelist")));
        assert!(!is_edge_list(Path::new("graph.bin")));
        assert!(!is_edge_list(Path::new("graph")));
    }
}
