//! Top-level dispatch and the global signature layout.
//!
//! Concrete and functional values produce blocks of different widths. In
//! fixed-length mode every value signature is `[concrete block | lambda block]`
//! with the block that does not apply filled by
//! [`REDUCED_PADDING`](super::reduce::REDUCED_PADDING), so all
//! values share one width.

use super::basic::basic_signature_len;
use super::compare::compare_len;
use super::example::{single_example_signature, single_object_signature};
use super::lambda::{run_lambda, sample_signatures};
use super::reduce::{padding, reduce_across_examples, ReducedFeature};
use super::Signature;
use crate::config::SignatureConfig;
use crate::errors::{Result, SignatureError};
use crate::object::{Object, ObjectType};
use crate::operations::canonical_lambda;
use crate::value::{check_broadcastable, ConcreteValue, Value};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::OnceLock;
use tracing::{debug, info};

/// Every width of the fixed-length encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignatureLayout {
    pub max_inputs: usize,
    pub basic_signature_length_by_type: BTreeMap<String, usize>,
    pub compare_length_by_types: BTreeMap<String, usize>,
    pub concrete_value_signature_length: usize,
    pub lambda_value_signature_length: usize,
    pub io_examples_signature_length: usize,
    pub value_signature_length: usize,
}

/// Computes property signatures with a fixed input cap.
#[derive(Debug, Clone)]
pub struct SignatureEncoder {
    max_inputs: usize,
    layout: SignatureLayout,
}

impl SignatureEncoder {
    /// Sizes every block by encoding canonical fixtures.
    pub fn new(config: &SignatureConfig) -> Result<Self> {
        config.validate()?;
        let max_inputs = config.max_inputs;
        let probe_output = ConcreteValue::constant(Object::List(vec![1]));

        let concrete_value_signature_length =
            concrete_signature(&ConcreteValue::constant(0i64), &probe_output, true)?.len();

        let fixture_samples = run_lambda(&canonical_lambda())?;
        if fixture_samples.iter().all(Vec::is_empty) {
            return Err(SignatureError::Fixture(
                "canonical lambda produced no samples".to_string(),
            ));
        }
        let lambda_value_signature_length = reduce_across_examples(&sample_signatures(
            &fixture_samples,
            &probe_output,
            true,
            max_inputs,
        )?)?
        .len();

        let io_examples_signature_length = io_examples_signature(
            &[&ConcreteValue::new(vec![Object::Int(1), Object::Int(2)])],
            &ConcreteValue::new(vec![Object::Int(-1), Object::Int(-2)]),
            true,
            max_inputs,
        )?
        .len();

        let layout = SignatureLayout {
            max_inputs,
            basic_signature_length_by_type: ObjectType::ALL
                .into_iter()
                .map(|t| (t.to_string(), basic_signature_len(t)))
                .collect(),
            compare_length_by_types: ObjectType::pairs()
                .map(|(a, b)| (format!("{},{}", a, b), compare_len(a, b)))
                .collect(),
            concrete_value_signature_length,
            lambda_value_signature_length,
            io_examples_signature_length,
            value_signature_length: concrete_value_signature_length
                + lambda_value_signature_length,
        };
        info!(
            max_inputs,
            io_examples = layout.io_examples_signature_length,
            value = layout.value_signature_length,
            "computed signature layout"
        );
        Ok(Self { max_inputs, layout })
    }

    pub fn layout(&self) -> &SignatureLayout {
        &self.layout
    }

    pub fn io_examples_signature_length(&self) -> usize {
        self.layout.io_examples_signature_length
    }

    pub fn value_signature_length(&self) -> usize {
        self.layout.value_signature_length
    }

    pub fn concrete_value_signature_length(&self) -> usize {
        self.layout.concrete_value_signature_length
    }

    pub fn lambda_value_signature_length(&self) -> usize {
        self.layout.lambda_value_signature_length
    }

    /// Signature of a set of I/O examples.
    ///
    /// Every input must span the same number of examples as the output.
    pub fn property_signature_io_examples(
        &self,
        inputs: &[&dyn Value],
        output: &dyn Value,
        fixed_length: bool,
    ) -> Result<Vec<ReducedFeature>> {
        io_examples_signature(inputs, output, fixed_length, self.max_inputs)
    }

    /// Signature of a value with respect to the output value.
    pub fn property_signature_value(
        &self,
        value: &dyn Value,
        output: &dyn Value,
        fixed_length: bool,
    ) -> Result<Vec<ReducedFeature>> {
        if value.is_lambda() {
            let block = self.lambda_signature(value, output, fixed_length)?;
            if !fixed_length {
                return Ok(block);
            }
            let mut result = padding(self.layout.concrete_value_signature_length);
            result.extend(block);
            Ok(result)
        } else {
            let mut result = concrete_signature(value, output, fixed_length)?;
            if fixed_length {
                result.extend(padding(self.layout.lambda_value_signature_length));
            }
            Ok(result)
        }
    }

    /// Signatures of many candidate values against one output, in parallel.
    pub fn property_signature_values(
        &self,
        values: &[&dyn Value],
        output: &dyn Value,
        fixed_length: bool,
    ) -> Result<Vec<Vec<ReducedFeature>>> {
        values
            .par_iter()
            .map(|value| self.property_signature_value(*value, output, fixed_length))
            .collect()
    }

    fn lambda_signature(
        &self,
        value: &dyn Value,
        output: &dyn Value,
        fixed_length: bool,
    ) -> Result<Vec<ReducedFeature>> {
        check_broadcastable(value, output.num_examples())?;
        let samples = run_lambda(value)?;
        if samples.iter().all(Vec::is_empty) {
            debug!("lambda never ran successfully, using padding");
            return Ok(padding(self.layout.lambda_value_signature_length));
        }
        let signatures = sample_signatures(&samples, output, fixed_length, self.max_inputs)?;
        reduce_across_examples(&signatures)
    }
}

fn concrete_signature(
    value: &dyn Value,
    output: &dyn Value,
    fixed_length: bool,
) -> Result<Vec<ReducedFeature>> {
    check_broadcastable(value, output.num_examples())?;
    let signatures = (0..output.num_examples())
        .map(|i| {
            Ok(single_object_signature(
                value.object(i)?,
                output.object(i)?,
                fixed_length,
            ))
        })
        .collect::<Result<Vec<Signature>>>()?;
    reduce_across_examples(&signatures)
}

fn io_examples_signature(
    inputs: &[&dyn Value],
    output: &dyn Value,
    fixed_length: bool,
    max_inputs: usize,
) -> Result<Vec<ReducedFeature>> {
    let num_examples = output.num_examples();
    if let Some(input) = inputs.iter().find(|i| i.num_examples() != num_examples) {
        return Err(SignatureError::ExampleCountMismatch {
            expected: num_examples,
            found: input.num_examples(),
        });
    }

    let signatures = (0..num_examples)
        .map(|i| {
            let objects = inputs
                .iter()
                .map(|input| input.object(i))
                .collect::<Result<Vec<_>>>()?;
            Ok(single_example_signature(
                objects,
                output.object(i)?,
                fixed_length,
                max_inputs,
            ))
        })
        .collect::<Result<Vec<Signature>>>()?;
    reduce_across_examples(&signatures)
}

static DEFAULT_ENCODER: OnceLock<Result<SignatureEncoder>> = OnceLock::new();

/// Process-wide encoder using the default input cap.
pub fn default_encoder() -> Result<&'static SignatureEncoder> {
    DEFAULT_ENCODER
        .get_or_init(|| SignatureEncoder::new(&SignatureConfig::default()))
        .as_ref()
        .map_err(Clone::clone)
}

/// Signature of a set of I/O examples using the default encoder.
pub fn property_signature_io_examples(
    inputs: &[&dyn Value],
    output: &dyn Value,
    fixed_length: bool,
) -> Result<Vec<ReducedFeature>> {
    default_encoder()?.property_signature_io_examples(inputs, output, fixed_length)
}

/// Signature of a value with respect to the output, using the default encoder.
pub fn property_signature_value(
    value: &dyn Value,
    output: &dyn Value,
    fixed_length: bool,
) -> Result<Vec<ReducedFeature>> {
    default_encoder()?.property_signature_value(value, output, fixed_length)
}

pub fn io_examples_signature_length() -> Result<usize> {
    Ok(default_encoder()?.io_examples_signature_length())
}

pub fn value_signature_length() -> Result<usize> {
    Ok(default_encoder()?.value_signature_length())
}
