//! Error types for model building and ground-state solving.

use thiserror::Error;

/// Errors returned by the solver and the model accessors.
#[derive(Debug, Error)]
pub enum IsingError {
    /// No header was accepted, or the header declared zero spins.
    #[error("model has no spins to solve")]
    EmptyModel,

    /// Requested root is not a node of the model.
    #[error("root node {root} out of range for {spins} spins")]
    RootOutOfRange { root: usize, spins: usize },

    /// Edges close a cycle, so the exact tree recursion does not apply.
    #[error("graph is not a forest: edge ({a}, {b}) closes a cycle")]
    NotAForest { a: usize, b: usize },

    /// Reading or writing an instance failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Writing the per-node CSV table failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A spin assignment does not cover exactly the model's nodes.
    #[error("spin configuration has {found} entries, model has {expected} spins")]
    SizeMismatch { expected: usize, found: usize },
}

pub type IsingResult<T> = Result<T, IsingError>;

/// Why a single input record was discarded.
///
/// These never abort a build; they are logged and counted as skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("header has {0} fields, expected 4")]
    HeaderFieldCount(usize),

    #[error("data record has {0} fields, expected 3")]
    DataFieldCount(usize),

    #[error("field `{0}` is not an integer")]
    NotAnInteger(String),

    /// Weights are limited to 32 bits so energy sums cannot overflow `i64`.
    #[error("weight {0} outside the 32-bit range")]
    WeightOutOfRange(i64),

    #[error("node {node} out of range for {spins} spins")]
    NodeOutOfRange { node: i64, spins: usize },
}
