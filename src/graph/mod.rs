//! Signed multigraphs.
//!
//! A signed graph attaches a **polarity** to every edge in addition to its
//! weight: positive edges model affinity ("friends"), negative edges model
//! antagonism ("enemies").
//!
//! ```text
//!     0 ──(+)── 1
//!     │
//!    (−)
//!     │
//!     2 ──(+)── 3
//! ```
//!
//! [`SignedGraph`] stores at most one edge per unordered node pair and
//! polarity, so a pair can be linked by one positive *and* one negative edge.
//! Adding a second edge with the same key sums into the existing one.
//! Self-loops carry weight internal to a node; after coarsening they hold the
//! intra-community weight of the community that node stands for.
//!
//! Most statistics are computed per polarity. [`SignedGraph::split_by_sign`]
//! projects the graph into a positive-only and a negative-only
//! [`Projection`], both keeping every node of the source graph.

mod io;
mod projection;
mod signed;

pub use io::{load_binary, load_edge_list, read_binary, read_edge_list};
pub use projection::Projection;
pub use signed::{SignedEdge, SignedGraph, DEFAULT_WEIGHT};

use core::fmt;
use core::ops::{Index, IndexMut};

use crate::error::{Error, Result};

/// Polarity of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sign {
    /// Friend edge (+1).
    Positive,
    /// Enemy edge (−1).
    Negative,
}

impl Sign {
    /// Both polarities, positive first.
    pub const ALL: [Sign; 2] = [Sign::Positive, Sign::Negative];

    /// Numeric value: `+1` or `-1`.
    pub fn value(self) -> i8 {
        match self {
            Sign::Positive => 1,
            Sign::Negative => -1,
        }
    }

    /// Polarity of a signed weight; `None` for zero or NaN.
    pub fn of(weight: f64) -> Option<Sign> {
        if weight > 0.0 {
            Some(Sign::Positive)
        } else if weight < 0.0 {
            Some(Sign::Negative)
        } else {
            None
        }
    }
}

impl TryFrom<i8> for Sign {
    type Error = Error;

    fn try_from(value: i8) -> Result<Self> {
        match value {
            1 => Ok(Sign::Positive),
            -1 => Ok(Sign::Negative),
            other => Err(Error::InvalidGraph(format!(
                "edge sign must be +1 or -1, got {other}"
            ))),
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sign::Positive => write!(f, "positive"),
            Sign::Negative => write!(f, "negative"),
        }
    }
}

/// One value per polarity.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SignPair<T> {
    /// Value for positive edges.
    pub positive: T,
    /// Value for negative edges.
    pub negative: T,
}

impl<T> SignPair<T> {
    /// Build a pair from its two halves.
    pub fn new(positive: T, negative: T) -> Self {
        Self { positive, negative }
    }

    /// Build a pair by evaluating `f` for each polarity.
    pub fn from_fn(mut f: impl FnMut(Sign) -> T) -> Self {
        Self {
            positive: f(Sign::Positive),
            negative: f(Sign::Negative),
        }
    }

    /// Apply `f` to both halves.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> SignPair<U> {
        SignPair {
            positive: f(self.positive),
            negative: f(self.negative),
        }
    }
}

impl<T> Index<Sign> for SignPair<T> {
    type Output = T;

    fn index(&self, sign: Sign) -> &T {
        match sign {
            Sign::Positive => &self.positive,
            Sign::Negative => &self.negative,
        }
    }
}

impl<T> IndexMut<Sign> for SignPair<T> {
    fn index_mut(&mut self, sign: Sign) -> &mut T {
        match sign {
            Sign::Positive => &mut self.positive,
            Sign::Negative => &mut self.negative,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_from_i8() {
        assert_eq!(Sign::try_from(1).unwrap(), Sign::Positive);
        assert_eq!(Sign::try_from(-1).unwrap(), Sign::Negative);
        let err = Sign::try_from(0).unwrap_err();
        assert!(matches!(err, Error::InvalidGraph(_)));
    }

    #[test]
    fn test_sign_of_weight() {
        assert_eq!(Sign::of(2.5), Some(Sign::Positive));
        assert_eq!(Sign::of(-0.1), Some(Sign::Negative));
        assert_eq!(Sign::of(0.0), None);
        assert_eq!(Sign::of(f64::NAN), None);
    }

    #[test]
    fn test_sign_pair_index() {
        let mut pair = SignPair::new(1.0, 2.0);
        pair[Sign::Negative] += 3.0;
        assert_eq!(pair[Sign::Positive], 1.0);
        assert_eq!(pair[Sign::Negative], 5.0);
        assert_eq!(pair.map(|x| x * 2.0), SignPair::new(2.0, 10.0));
    }
}
