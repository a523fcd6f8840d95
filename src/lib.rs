//! Property signatures for program synthesis.
//!
//! Encodes concrete values and partially-applied programs (lambdas with free
//! variables) into fixed- or variable-length feature vectors for a learned
//! model that ranks candidates during bottom-up enumerative search.
//!
//! # Example
//!
//! ```rust
//! use propsig::{property_signature_io_examples, ConcreteValue, Object};
//!
//! let input = ConcreteValue::new(vec![Object::List(vec![1, 2, 4, 7])]);
//! let output = ConcreteValue::new(vec![Object::List(vec![4, 5, 7, 10])]);
//!
//! let signature = property_signature_io_examples(&[&input], &output, true).unwrap();
//! assert_eq!(signature.len(), propsig::io_examples_signature_length().unwrap());
//! ```

pub mod cli;
pub mod config;
pub mod errors;
pub mod object;
pub mod operations;
pub mod signature;
pub mod value;

pub use crate::config::SignatureConfig;
pub use crate::errors::{Result, SignatureError};
pub use crate::object::{Object, ObjectType};
pub use crate::operations::{canonical_lambda, Add, Argument, Operation};
pub use crate::signature::{
    flatten, io_examples_signature_length, property_signature_io_examples,
    property_signature_value, value_signature_length, ReducedFeature, SignatureEncoder,
    SignatureLayout, REDUCED_PADDING,
};
pub use crate::value::{lambda_fn, ConcreteValue, Entry, EvalError, Lambda, LambdaValue, Value};
