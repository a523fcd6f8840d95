//! Signatures for one I/O example and for one object in context of an output.

use super::basic::{basic_signature, fixed_basic_signature_len};
use super::compare::{compare, fixed_compare_len};
use super::Signature;
use crate::object::Object;

/// Fixed-length width contributed by each input of an example.
pub fn fixed_input_len() -> usize {
    fixed_basic_signature_len() + fixed_compare_len()
}

/// Fixed-length width of an example signature with room for `max_inputs`.
pub fn fixed_example_len(max_inputs: usize) -> usize {
    fixed_basic_signature_len() + max_inputs * fixed_input_len()
}

/// Signature of one example: the output's basic signature, then each input's
/// basic signature followed by its comparison to the output.
///
/// In fixed-length mode inputs beyond `max_inputs` are dropped and missing
/// inputs are padded with `None`, so the width is always
/// [`fixed_example_len`].
pub fn single_example_signature<'a, I>(
    inputs: I,
    output: &Object,
    fixed_length: bool,
    max_inputs: usize,
) -> Signature
where
    I: IntoIterator<Item = &'a Object>,
{
    let limit = if fixed_length { max_inputs } else { usize::MAX };
    let mut result = basic_signature(output, fixed_length);
    let mut num_inputs = 0;
    for input in inputs.into_iter().take(limit) {
        result.extend(single_object_signature(input, output, fixed_length));
        num_inputs += 1;
    }
    if fixed_length && num_inputs < max_inputs {
        let missing = (max_inputs - num_inputs) * fixed_input_len();
        result.extend(std::iter::repeat(None).take(missing));
    }
    result
}

/// Signature of `x` in the context of an output: its basic signature followed
/// by its comparison to the output.
pub fn single_object_signature(x: &Object, output: &Object, fixed_length: bool) -> Signature {
    let mut result = basic_signature(x, fixed_length);
    result.extend(compare(x, output, fixed_length));
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_widths() {
        assert_eq!(fixed_input_len(), 222);
        assert_eq!(fixed_example_len(3), 769);
    }

    #[test]
    fn test_fixed_length_pads_missing_inputs() {
        let inputs = [Object::List(vec![1, 2, 4, 7]), Object::Int(3)];
        let output = Object::List(vec![4, 5, 7, 10]);
        let sig = single_example_signature(&inputs, &output, true, 3);
        assert_eq!(sig.len(), 769);
        assert!(sig[103 + 2 * 222..].iter().all(Option::is_none));
    }

    #[test]
    fn test_fixed_length_truncates_extra_inputs() {
        let inputs = vec![Object::Int(1); 5];
        let output = Object::Int(2);
        let sig = single_example_signature(&inputs, &output, true, 3);
        let first_three = single_example_signature(&inputs[..3], &output, true, 3);
        assert_eq!(sig, first_three);
    }

    #[test]
    fn test_fixed_length_without_inputs() {
        let inputs: [Object; 0] = [];
        let sig = single_example_signature(&inputs, &Object::Bool(true), true, 3);
        assert_eq!(sig.len(), 769);
        assert!(sig[103..].iter().all(Option::is_none));
    }

    #[test]
    fn test_variable_length_keeps_all_inputs() {
        let inputs = vec![Object::Int(1); 5];
        let output = Object::Int(2);
        let sig = single_example_signature(&inputs, &output, false, 3);
        // Output basic (16) plus five inputs of basic (16) and comparison (8).
        assert_eq!(sig.len(), 16 + 5 * 24);
    }

    #[test]
    fn test_single_object_signature() {
        let sig = single_object_signature(&Object::Int(0), &Object::Int(0), false);
        assert_eq!(sig.len(), 24);
        assert_eq!(sig[16], Some(true));
    }
}
