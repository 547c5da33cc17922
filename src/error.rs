use core::fmt;

use crate::graph::Sign;

/// Result alias for `rift`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by graph construction, loading and community detection.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Graph is not a well-formed signed multigraph.
    InvalidGraph(String),

    /// Modularity is undefined because one polarity carries no edge weight.
    UndefinedModularity {
        /// Polarity whose total weight is zero.
        sign: Sign,
    },

    /// A node's incident weight is not positive.
    InvalidWeight {
        /// Node whose incident edge (or weighted degree) is invalid.
        node: usize,
        /// Offending weight.
        weight: f64,
    },

    /// Node handle not present in a graph or partition.
    NodeNotFound {
        /// Missing node handle.
        node: usize,
    },

    /// Community label not present at a dendrogram level.
    CommunityNotFound {
        /// Level being projected.
        level: usize,
        /// Missing community label.
        community: usize,
    },

    /// Requested dendrogram level does not exist.
    LevelOutOfRange {
        /// Requested level.
        level: usize,
        /// Number of levels in the dendrogram.
        n_levels: usize,
    },

    /// Invalid parameter value.
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Error message.
        message: &'static str,
    },

    /// Malformed graph file contents.
    Format(String),

    /// Graph file could not be opened or read.
    Io(String),
}

/// Broad category of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Input is not the expected signed-multigraph representation.
    Shape,
    /// Quantity is mathematically undefined for this input.
    Domain,
    /// Edge weights violate the positivity requirement.
    Validation,
    /// A node, community or level key is missing.
    Lookup,
    /// Misconfigured detector.
    Parameter,
    /// Reading or parsing external input failed.
    Input,
}

impl Error {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidGraph(_) => ErrorKind::Shape,
            Error::UndefinedModularity { .. } => ErrorKind::Domain,
            Error::InvalidWeight { .. } => ErrorKind::Validation,
            Error::NodeNotFound { .. }
            | Error::CommunityNotFound { .. }
            | Error::LevelOutOfRange { .. } => ErrorKind::Lookup,
            Error::InvalidParameter { .. } => ErrorKind::Parameter,
            Error::Format(_) | Error::Io(_) => ErrorKind::Input,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidGraph(msg) => write!(f, "invalid signed graph: {msg}"),
            Error::UndefinedModularity { sign } => {
                write!(
                    f,
                    "modularity is undefined: no {sign} edge weight in the graph"
                )
            }
            Error::InvalidWeight { node, weight } => {
                write!(f, "non-positive weight {weight} at node {node}")
            }
            Error::NodeNotFound { node } => write!(f, "node {node} not found"),
            Error::CommunityNotFound { level, community } => {
                write!(f, "community {community} missing at level {level}")
            }
            Error::LevelOutOfRange { level, n_levels } => {
                write!(f, "level {level} out of range for {n_levels} levels")
            }
            Error::InvalidParameter { name, message } => {
                write!(f, "invalid parameter '{name}': {message}")
            }
            Error::Format(msg) => write!(f, "malformed graph file: {msg}"),
            Error::Io(msg) => write!(f, "i/o error: {msg}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}
