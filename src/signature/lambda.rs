//! Behavior sampling for functional values.
//!
//! A lambda has no structure worth describing directly, so it is run on every
//! tuple of probe inputs and characterized by the (inputs, output) pairs that
//! succeed.

use super::classify::lambda_type_property;
use super::compare::compare;
use super::example::single_example_signature;
use super::Signature;
use crate::errors::Result;
use crate::object::{all_probe_values, Object};
use crate::value::{Lambda, Value};
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;
use tracing::{debug, debug_span, trace};

// Set while a probe call is in flight on this thread
thread_local! {
    static SAMPLING: Cell<bool> = const { Cell::new(false) };
}

static QUIET_PANIC_HOOK: Once = Once::new();

/// Chains a panic hook that stays silent for panics raised by probe calls and
/// defers to the previously installed hook for everything else.
fn install_quiet_panic_hook() {
    QUIET_PANIC_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if !SAMPLING.with(Cell::get) {
                previous(info);
            }
        }));
    });
}

/// Marks the current thread as sampling until dropped.
struct SamplingGuard;

impl SamplingGuard {
    fn enter() -> Self {
        SAMPLING.with(|flag| flag.set(true));
        SamplingGuard
    }
}

impl Drop for SamplingGuard {
    fn drop(&mut self) {
        SAMPLING.with(|flag| flag.set(false));
    }
}

/// One successful run of a lambda.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    pub inputs: Vec<Object>,
    pub output: Object,
}

/// Iterates the `arity`-fold Cartesian product of `pool`, last position
/// varying fastest.
struct ProbeTuples<'a> {
    pool: &'a [Object],
    indices: Vec<usize>,
    done: bool,
}

impl<'a> ProbeTuples<'a> {
    fn new(pool: &'a [Object], arity: usize) -> Self {
        Self {
            pool,
            indices: vec![0; arity],
            done: pool.is_empty(),
        }
    }
}

impl Iterator for ProbeTuples<'_> {
    type Item = Vec<Object>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let tuple = self.indices.iter().map(|&i| self.pool[i].clone()).collect();

        self.done = true;
        for index in self.indices.iter_mut().rev() {
            *index += 1;
            if *index < self.pool.len() {
                self.done = false;
                break;
            }
            *index = 0;
        }
        Some(tuple)
    }
}

/// Invokes `lambda`, treating errors, empty results and panics alike as
/// "no sample".
fn try_call(lambda: &dyn Lambda, args: &[Object]) -> Option<Object> {
    let outcome = {
        let _sampling = SamplingGuard::enter();
        panic::catch_unwind(AssertUnwindSafe(|| lambda.call(args)))
    };
    match outcome {
        Ok(Ok(result)) => result,
        Ok(Err(err)) => {
            trace!(%err, "lambda rejected probe inputs");
            None
        }
        Err(_) => {
            trace!("lambda panicked on probe inputs");
            None
        }
    }
}

/// Runs every per-example callable of `value` on all probe tuples.
///
/// Returns the successful samples for each of the value's examples, in probe
/// order.
pub fn run_lambda(value: &dyn Value) -> Result<Vec<Vec<Sample>>> {
    let arity = value.num_free_variables();
    let num_examples = value.num_examples();
    let _span = debug_span!("run_lambda", arity, num_examples).entered();

    install_quiet_panic_hook();
    let pool = all_probe_values();
    let lambdas = (0..num_examples)
        .map(|index| value.lambda(index))
        .collect::<Result<Vec<_>>>()?;

    let mut samples_per_example = vec![Vec::new(); num_examples];
    for inputs in ProbeTuples::new(&pool, arity) {
        for (lambda, samples) in lambdas.iter().zip(samples_per_example.iter_mut()) {
            if let Some(output) = try_call(*lambda, &inputs) {
                samples.push(Sample {
                    inputs: inputs.clone(),
                    output,
                });
            }
        }
    }

    debug!(
        successes = samples_per_example.iter().map(Vec::len).sum::<usize>(),
        "sampled lambda behavior"
    );
    Ok(samples_per_example)
}

/// Builds one signature per sample: the lambda's type classification, the
/// sample output compared to that example's true output, and the example
/// signature of the sample itself.
///
/// A single-example lambda is compared against every output example, so a
/// constant lambda contributes `samples * num_examples` signatures. Comparing
/// it against the first output example alone would skew `frac_true` toward
/// that example.
pub fn sample_signatures(
    samples_per_example: &[Vec<Sample>],
    output_value: &dyn Value,
    fixed_length: bool,
    max_inputs: usize,
) -> Result<Vec<Signature>> {
    let broadcast = samples_per_example.len() == 1;
    let num_targets = if broadcast {
        output_value.num_examples()
    } else {
        samples_per_example.len()
    };

    let mut signatures = Vec::new();
    for target in 0..num_targets {
        let samples = &samples_per_example[if broadcast { 0 } else { target }];
        let expected = output_value.object(target)?;
        for sample in samples {
            let mut sig: Signature = lambda_type_property().into_iter().map(Some).collect();
            sig.extend(compare(&sample.output, expected, fixed_length));
            sig.extend(single_example_signature(
                &sample.inputs,
                &sample.output,
                fixed_length,
                max_inputs,
            ));
            signatures.push(sig);
        }
    }
    Ok(signatures)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{ConcreteValue, EvalError, LambdaValue};

    #[test]
    fn test_probe_tuples_cover_product() {
        let pool = vec![Object::Int(1), Object::Int(2), Object::Int(3)];
        let tuples: Vec<_> = ProbeTuples::new(&pool, 2).collect();
        assert_eq!(tuples.len(), 9);
        assert_eq!(tuples[0], vec![Object::Int(1), Object::Int(1)]);
        assert_eq!(tuples[1], vec![Object::Int(1), Object::Int(2)]);
        assert_eq!(tuples[8], vec![Object::Int(3), Object::Int(3)]);
    }

    #[test]
    fn test_probe_tuples_zero_arity_yields_one_empty_tuple() {
        let pool = vec![Object::Int(1)];
        let tuples: Vec<_> = ProbeTuples::new(&pool, 0).collect();
        assert_eq!(tuples, vec![Vec::<Object>::new()]);
    }

    #[test]
    fn test_run_lambda_keeps_only_successes() {
        let value = LambdaValue::single(1, |args| match &args[0] {
            Object::Int(x) => Ok(Some(Object::Int(x * 2))),
            Object::Bool(_) => Ok(None),
            Object::List(_) => Err(EvalError::TypeMismatch("list".into())),
        });
        let samples = run_lambda(&value).unwrap();
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].len(), 21);
        assert_eq!(
            samples[0][0],
            Sample {
                inputs: vec![Object::Int(-100)],
                output: Object::Int(-200),
            }
        );
    }

    #[test]
    fn test_run_lambda_survives_panics() {
        let value = LambdaValue::single(1, |args| match &args[0] {
            Object::List(xs) => Ok(Some(Object::Int(xs[0]))),
            _ => Ok(None),
        });
        let samples = run_lambda(&value).unwrap();
        // Every probe list except the empty one.
        assert_eq!(samples[0].len(), 19);
    }

    #[test]
    fn test_run_lambda_rejects_concrete_value() {
        let value = ConcreteValue::constant(1i64);
        assert!(run_lambda(&value).is_err());
    }

    #[test]
    fn test_sample_signature_width() {
        let samples = vec![vec![Sample {
            inputs: vec![Object::Int(1)],
            output: Object::Int(11),
        }]];
        let output = ConcreteValue::new(vec![Object::Int(1), Object::Int(2)]);
        let sigs = sample_signatures(&samples, &output, true, 3).unwrap();
        assert_eq!(sigs.len(), 2);
        assert!(sigs.iter().all(|sig| sig.len() == 4 + 119 + 769));
        assert_eq!(sigs[0][0], Some(true));
    }

    // Index of the (int, int) equality bit inside one sample signature:
    // lambda type bits, then the bool/bool and bool/int comparison slots.
    const INT_EQUALITY: usize = 4 + 4;

    fn constant_lambda(result: i64) -> std::sync::Arc<dyn Lambda> {
        crate::value::lambda_fn(move |args| match args {
            [Object::Bool(true)] => Ok(Some(Object::Int(result))),
            _ => Ok(None),
        })
    }

    #[test]
    fn test_samples_compared_with_their_own_example() {
        let value = LambdaValue::new(1, vec![constant_lambda(7), constant_lambda(9)]);
        let samples = run_lambda(&value).unwrap();
        assert_eq!(samples.iter().map(Vec::len).collect::<Vec<_>>(), vec![1, 1]);

        let output = ConcreteValue::new(vec![Object::Int(7), Object::Int(9)]);
        let sigs = sample_signatures(&samples, &output, true, 3).unwrap();
        assert_eq!(sigs.len(), 2);
        assert!(sigs.iter().all(|sig| sig[INT_EQUALITY] == Some(true)));

        let crossed = ConcreteValue::new(vec![Object::Int(9), Object::Int(7)]);
        let sigs = sample_signatures(&samples, &crossed, true, 3).unwrap();
        assert!(sigs.iter().all(|sig| sig[INT_EQUALITY] == Some(false)));
    }

    #[test]
    fn test_panicking_lambda_marks_thread_only_during_call() {
        let value = LambdaValue::single(1, |args| match &args[0] {
            Object::List(xs) => {
                assert!(SAMPLING.with(Cell::get));
                Ok(Some(Object::Int(xs[5])))
            }
            _ => Ok(None),
        });
        let samples = run_lambda(&value).unwrap();
        // Probe lists with at least six elements.
        assert_eq!(samples[0].len(), 5);
        assert!(!SAMPLING.with(Cell::get));
    }
}
