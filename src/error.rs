use core::fmt;

use thiserror::Error;

/// Result alias for search invocations.
pub type Result<T, E = SearchError> = std::result::Result<T, E>;

/// Raised while building a [Grid](crate::grid::Grid) from caller-supplied data.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GridError {
    #[error("grid dimensions {width}x{height} are not usable")]
    InvalidDimensions { width: usize, height: usize },

    #[error("passable probability {0} is outside [0, 1]")]
    InvalidProbability(f64),

    #[error("cell {key} lies outside the {width}x{height} grid")]
    OutOfBounds {
        key: String,
        width: usize,
        height: usize,
    },

    #[error("cell {key} was supplied more than once")]
    DuplicateCell { key: String },

    #[error("{missing} cell(s) were not supplied, first missing is {first}")]
    MissingCells { missing: usize, first: String },

    #[error("row {row} has {found} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("unrecognised cell character {found:?} at {key}")]
    UnknownCell { found: char, key: String },
}

/// Which end of a search an invalid coordinate belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Start,
    Goal,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Endpoint::Start => write!(f, "start"),
            Endpoint::Goal => write!(f, "goal"),
        }
    }
}

/// Raised when a search is invoked with endpoints it cannot start from or end at. An
/// unreachable goal is not an error; it yields an empty exploration instead.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("{endpoint} {key} lies outside the grid")]
    OutOfBounds { endpoint: Endpoint, key: String },

    #[error("{endpoint} {key} is blocked")]
    Blocked { endpoint: Endpoint, key: String },
}
