//! Error types for signature computation.
//!
//! Failures here are contract violations by the caller (mismatched example
//! counts, values whose entries disagree with their arity) or internal layout
//! bugs (signatures of unequal length reaching the reduction). Lambda
//! evaluation failures are not errors at this level; the sampler discards them.

use thiserror::Error;

/// Main error type for property signature operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SignatureError {
    /// Values processed together span different numbers of examples
    #[error("Example count mismatch: expected {expected} examples, found {found}")]
    ExampleCountMismatch { expected: usize, found: usize },

    /// Signatures fed into a reduction have different lengths
    #[error("Signature length mismatch at signature {position}: expected {expected}, found {found}")]
    SignatureLengthMismatch {
        position: usize,
        expected: usize,
        found: usize,
    },

    /// A reduction was requested over zero signatures
    #[error("Cannot reduce an empty list of signatures")]
    EmptyReduction,

    /// A value's entry does not match its declared number of free variables
    #[error("Entry {index} is not {expected}")]
    EntryKind { index: usize, expected: &'static str },

    /// A value has no entry for the requested example
    #[error("Example {index} out of range for value with {num_examples} examples")]
    MissingExample { index: usize, num_examples: usize },

    /// The canonical lambda used to size the lambda block produced no samples
    #[error("Fixture error: {0}")]
    Fixture(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, SignatureError>;
