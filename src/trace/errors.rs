//! Rejected trace requests
//!
//! Only genuine misuse reaches this type: an algorithm name nobody knows, or
//! a search with nothing to search for. Malformed numbers are the caller's
//! business.

use super::AlgorithmId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TraceError {
    #[error("Unknown algorithm '{name}'")]
    UnknownAlgorithm { name: String },

    #[error("{algorithm} needs a target value")]
    MissingTarget { algorithm: AlgorithmId },
}
