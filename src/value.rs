//! Multi-example values consumed by the signature engine.
//!
//! A [`Value`] is a column with one entry per I/O example. Concrete values
//! hold an [`Object`] per example; functional values (lambdas with free
//! variables) hold a callable per example, all sharing one arity.

use crate::errors::{Result, SignatureError};
use crate::object::Object;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Failure raised by a lambda invoked on an input it cannot handle.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    #[error("expected {expected} arguments, got {found}")]
    Arity { expected: usize, found: usize },

    #[error("integer overflow")]
    Overflow,

    #[error("{0}")]
    Domain(String),
}

/// A callable entry of a functional value.
///
/// `Ok(None)` means the lambda ran but produced no result; the sampler treats
/// it like a failure.
pub trait Lambda: Send + Sync {
    fn call(&self, args: &[Object]) -> std::result::Result<Option<Object>, EvalError>;
}

impl<F> Lambda for F
where
    F: Fn(&[Object]) -> std::result::Result<Option<Object>, EvalError> + Send + Sync,
{
    fn call(&self, args: &[Object]) -> std::result::Result<Option<Object>, EvalError> {
        self(args)
    }
}

/// Wraps a closure as a shareable [`Lambda`].
pub fn lambda_fn<F>(f: F) -> Arc<dyn Lambda>
where
    F: Fn(&[Object]) -> std::result::Result<Option<Object>, EvalError> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// What a value holds for one example.
#[derive(Clone, Copy)]
pub enum Entry<'a> {
    Object(&'a Object),
    Lambda(&'a dyn Lambda),
}

impl fmt::Debug for Entry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Object(object) => f.debug_tuple("Object").field(object).finish(),
            Entry::Lambda(_) => f.write_str("Lambda(..)"),
        }
    }
}

/// A column of per-example objects or callables.
pub trait Value: Send + Sync {
    /// Number of parallel examples this value spans.
    fn num_examples(&self) -> usize;

    /// Zero for concrete values, the lambda's arity otherwise.
    fn num_free_variables(&self) -> usize {
        0
    }

    /// Entry for one example, or `None` when out of range.
    fn entry(&self, index: usize) -> Option<Entry<'_>>;

    fn is_lambda(&self) -> bool {
        self.num_free_variables() > 0
    }

    /// Concrete object for `index`, failing if the value is functional there.
    fn object(&self, index: usize) -> Result<&Object> {
        match self.entry(index) {
            Some(Entry::Object(object)) => Ok(object),
            Some(Entry::Lambda(_)) => Err(SignatureError::EntryKind {
                index,
                expected: "a concrete object",
            }),
            None => Err(SignatureError::MissingExample {
                index,
                num_examples: self.num_examples(),
            }),
        }
    }

    /// Callable for `index`, failing if the value is concrete there.
    fn lambda(&self, index: usize) -> Result<&dyn Lambda> {
        match self.entry(index) {
            Some(Entry::Lambda(lambda)) => Ok(lambda),
            Some(Entry::Object(_)) => Err(SignatureError::EntryKind {
                index,
                expected: "a lambda",
            }),
            None => Err(SignatureError::MissingExample {
                index,
                num_examples: self.num_examples(),
            }),
        }
    }
}

/// A concrete value: one object per example.
///
/// A single-object column is a constant and broadcasts to any example index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConcreteValue {
    objects: Vec<Object>,
}

impl ConcreteValue {
    pub fn new(objects: Vec<Object>) -> Self {
        Self { objects }
    }

    pub fn constant(object: impl Into<Object>) -> Self {
        Self {
            objects: vec![object.into()],
        }
    }
}

impl<T: Into<Object>> FromIterator<T> for ConcreteValue {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

impl Value for ConcreteValue {
    fn num_examples(&self) -> usize {
        self.objects.len()
    }

    fn entry(&self, index: usize) -> Option<Entry<'_>> {
        let index = if self.objects.len() == 1 { 0 } else { index };
        self.objects.get(index).map(Entry::Object)
    }
}

/// A functional value: one callable per example, all of the same arity.
///
/// A single-callable column broadcasts like a constant.
#[derive(Clone)]
pub struct LambdaValue {
    arity: usize,
    lambdas: Vec<Arc<dyn Lambda>>,
}

impl LambdaValue {
    pub fn new(arity: usize, lambdas: Vec<Arc<dyn Lambda>>) -> Self {
        Self { arity, lambdas }
    }

    /// Same callable for every example.
    pub fn single<F>(arity: usize, f: F) -> Self
    where
        F: Fn(&[Object]) -> std::result::Result<Option<Object>, EvalError> + Send + Sync + 'static,
    {
        Self::new(arity, vec![lambda_fn(f)])
    }
}

impl fmt::Debug for LambdaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LambdaValue")
            .field("arity", &self.arity)
            .field("num_examples", &self.lambdas.len())
            .finish()
    }
}

impl Value for LambdaValue {
    fn num_examples(&self) -> usize {
        self.lambdas.len()
    }

    fn num_free_variables(&self) -> usize {
        self.arity
    }

    fn entry(&self, index: usize) -> Option<Entry<'_>> {
        let index = if self.lambdas.len() == 1 { 0 } else { index };
        self.lambdas
            .get(index)
            .map(|lambda| Entry::Lambda(lambda.as_ref()))
    }
}

/// Checks that `value` can be aligned example-by-example with `expected`
/// examples. Single-example values broadcast.
pub(crate) fn check_broadcastable(value: &dyn Value, expected: usize) -> Result<()> {
    let found = value.num_examples();
    if found == expected || found == 1 {
        Ok(())
    } else {
        Err(SignatureError::ExampleCountMismatch { expected, found })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_broadcasts() {
        let value = ConcreteValue::constant(7i64);
        assert_eq!(value.num_examples(), 1);
        assert_eq!(value.object(0).unwrap(), &Object::Int(7));
        assert_eq!(value.object(5).unwrap(), &Object::Int(7));
    }

    #[test]
    fn test_concrete_out_of_range() {
        let value: ConcreteValue = vec![1i64, 2].into_iter().collect();
        assert_eq!(
            value.object(2),
            Err(SignatureError::MissingExample {
                index: 2,
                num_examples: 2
            })
        );
    }

    #[test]
    fn test_lambda_value_entries() {
        let value = LambdaValue::single(1, |args| Ok(Some(args[0].clone())));
        assert!(value.is_lambda());
        assert!(value.object(0).is_err());
        let lambda = value.lambda(3).unwrap();
        assert_eq!(lambda.call(&[Object::Int(4)]), Ok(Some(Object::Int(4))));
    }

    #[test]
    fn test_check_broadcastable() {
        let constant = ConcreteValue::constant(true);
        let pair: ConcreteValue = vec![true, false].into_iter().collect();
        assert!(check_broadcastable(&constant, 4).is_ok());
        assert!(check_broadcastable(&pair, 2).is_ok());
        assert_eq!(
            check_broadcastable(&pair, 3),
            Err(SignatureError::ExampleCountMismatch {
                expected: 3,
                found: 2
            })
        );
    }
}
