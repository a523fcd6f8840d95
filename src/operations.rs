//! Operations that turn partially-applied arguments into lambda values.
//!
//! Only the pieces needed to manufacture functional values live here: an
//! [`Operation`] trait, argument placeholders for free variables, and the
//! integer [`Add`] used as the canonical lambda when sizing lambda signatures.

use crate::object::Object;
use crate::value::{EvalError, LambdaValue};
use std::sync::Arc;

/// A primitive operation over concrete objects.
pub trait Operation: Send + Sync {
    fn name(&self) -> &'static str;

    fn arity(&self) -> usize;

    /// Applies the operation to fully concrete arguments.
    fn evaluate(&self, args: &[Object]) -> Result<Object, EvalError>;
}

/// One argument slot of a partial application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Argument {
    Constant(Object),
    /// Bound to the lambda's positional parameter with this index.
    FreeVariable(usize),
}

/// Integer addition with overflow reported as a failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct Add;

impl Operation for Add {
    fn name(&self) -> &'static str {
        "Add"
    }

    fn arity(&self) -> usize {
        2
    }

    fn evaluate(&self, args: &[Object]) -> Result<Object, EvalError> {
        match args {
            [Object::Int(a), Object::Int(b)] => {
                a.checked_add(*b).map(Object::Int).ok_or(EvalError::Overflow)
            }
            [_, _] => Err(EvalError::TypeMismatch(format!(
                "{} expects two integers",
                self.name()
            ))),
            _ => Err(EvalError::Arity {
                expected: self.arity(),
                found: args.len(),
            }),
        }
    }
}

impl LambdaValue {
    /// Builds the single-example lambda `|v0, v1, ..| op(args)` where every
    /// [`Argument::FreeVariable`] is filled from the call's arguments.
    ///
    /// The lambda's arity is one more than the highest free-variable index.
    pub fn from_operation(op: Arc<dyn Operation>, args: Vec<Argument>) -> Self {
        let arity = args
            .iter()
            .filter_map(|arg| match arg {
                Argument::FreeVariable(index) => Some(index + 1),
                Argument::Constant(_) => None,
            })
            .max()
            .unwrap_or(0);

        LambdaValue::single(arity, move |inputs: &[Object]| {
            if inputs.len() != arity {
                return Err(EvalError::Arity {
                    expected: arity,
                    found: inputs.len(),
                });
            }
            let bound = args
                .iter()
                .map(|arg| match arg {
                    Argument::Constant(object) => object.clone(),
                    Argument::FreeVariable(index) => inputs[*index].clone(),
                })
                .collect::<Vec<_>>();
            op.evaluate(&bound).map(Some)
        })
    }
}

/// The canonical 1-ary lambda `x -> 10 + x`.
pub fn canonical_lambda() -> LambdaValue {
    LambdaValue::from_operation(
        Arc::new(Add),
        vec![Argument::Constant(Object::Int(10)), Argument::FreeVariable(0)],
    )
}
