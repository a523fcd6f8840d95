//! Property signatures for concrete objects and lambdas.
//!
//! A signature describes a value (or a set of I/O examples) with boolean
//! features, then reduces those features across examples into
//! [`ReducedFeature`] statistics consumed by a ranking model.
//!
//! ## Pipeline
//!
//! - [`classify`]: one-hot type classification
//! - [`properties`]: per-object properties and relevance expansion
//! - [`basic`]: basic signature of a single object
//! - [`compare`]: comparison of two objects, possibly of different types
//! - [`example`]: signature of one I/O example, or one object against an output
//! - [`reduce`]: folding per-example signatures into statistics
//! - [`lambda`]: behavior sampling for functional values
//! - [`encoder`]: top-level dispatch and fixed-length layout
//!
//! ## Fixed-length mode
//!
//! With `fixed_length = true` every object type (and ordered type pair, for
//! comparisons) has a reserved slot sized from a canonical default object.
//! Slots that do not apply hold `None`, which reduces to coverage 0. Every
//! signature of a given kind then has the same width regardless of the types
//! involved.

pub mod basic;
pub mod classify;
pub mod compare;
pub mod encoder;
pub mod example;
pub mod lambda;
pub mod properties;
pub mod reduce;

/// Per-position features; `None` marks a slot that does not apply.
pub type Signature = Vec<Option<bool>>;

pub use basic::basic_signature;
pub use compare::compare;
pub use encoder::{
    default_encoder, io_examples_signature_length, property_signature_io_examples,
    property_signature_value, value_signature_length, SignatureEncoder, SignatureLayout,
};
pub use example::{single_example_signature, single_object_signature};
pub use lambda::{run_lambda, Sample};
pub use reduce::{flatten, reduce_across_examples, ReducedFeature, REDUCED_PADDING};
