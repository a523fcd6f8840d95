//! Folding per-example signatures into per-feature summary statistics.

use super::Signature;
use crate::errors::{Result, SignatureError};
use serde::{Deserialize, Serialize};

/// Summary of one signature position across several samples.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReducedFeature {
    /// Fraction of samples where the feature applied (was not `None`).
    pub coverage: f64,
    /// Every applicable value was true.
    pub all_true: bool,
    /// Every applicable value was false.
    pub all_false: bool,
    /// Fraction of applicable values that were true, 0.5 if none applied.
    pub frac_true: f64,
}

/// Neutral feature used for padding and for positions that never applied.
pub const REDUCED_PADDING: ReducedFeature = ReducedFeature {
    coverage: 0.0,
    all_true: false,
    all_false: false,
    frac_true: 0.5,
};

impl ReducedFeature {
    /// Numeric form `[coverage, all_true, all_false, frac_true]`.
    pub fn to_array(&self) -> [f64; 4] {
        [
            self.coverage,
            f64::from(u8::from(self.all_true)),
            f64::from(u8::from(self.all_false)),
            self.frac_true,
        ]
    }
}

/// Flattens reduced features into the model's input vector.
pub fn flatten(features: &[ReducedFeature]) -> Vec<f64> {
    features.iter().flat_map(ReducedFeature::to_array).collect()
}

/// `count` copies of [`REDUCED_PADDING`].
pub fn padding(count: usize) -> Vec<ReducedFeature> {
    vec![REDUCED_PADDING; count]
}

/// Reduces equal-length signatures position by position.
pub fn reduce_across_examples(signatures: &[Signature]) -> Result<Vec<ReducedFeature>> {
    let first = signatures.first().ok_or(SignatureError::EmptyReduction)?;
    let signature_len = first.len();
    if let Some((position, sig)) = signatures
        .iter()
        .enumerate()
        .find(|(_, sig)| sig.len() != signature_len)
    {
        return Err(SignatureError::SignatureLengthMismatch {
            position,
            expected: signature_len,
            found: sig.len(),
        });
    }

    let num_samples = signatures.len() as f64;
    let reduced = (0..signature_len)
        .map(|i| {
            let (applicable, num_true) = signatures
                .iter()
                .filter_map(|sig| sig[i])
                .fold((0usize, 0usize), |(n, t), b| (n + 1, t + usize::from(b)));
            reduce_position(applicable, num_true, num_samples)
        })
        .collect();
    Ok(reduced)
}

fn reduce_position(applicable: usize, num_true: usize, num_samples: f64) -> ReducedFeature {
    if applicable == 0 {
        return REDUCED_PADDING;
    }
    let frac_true = num_true as f64 / applicable as f64;
    ReducedFeature {
        coverage: applicable as f64 / num_samples,
        all_true: num_true == applicable,
        all_false: num_true == 0,
        frac_true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_mixed_column() {
        let sigs = vec![
            vec![Some(true), None, Some(false)],
            vec![Some(false), None, Some(false)],
            vec![Some(true), Some(true), None],
            vec![None, None, Some(false)],
        ];
        let reduced = reduce_across_examples(&sigs).unwrap();
        assert_eq!(
            reduced[0],
            ReducedFeature {
                coverage: 0.75,
                all_true: false,
                all_false: false,
                frac_true: 2.0 / 3.0,
            }
        );
        assert_eq!(
            reduced[1],
            ReducedFeature {
                coverage: 0.25,
                all_true: true,
                all_false: false,
                frac_true: 1.0,
            }
        );
        assert_eq!(
            reduced[2],
            ReducedFeature {
                coverage: 0.75,
                all_true: false,
                all_false: true,
                frac_true: 0.0,
            }
        );
    }

    #[test]
    fn test_all_none_is_padding() {
        let sigs = vec![vec![None], vec![None]];
        assert_eq!(reduce_across_examples(&sigs).unwrap(), vec![REDUCED_PADDING]);
    }

    #[test]
    fn test_empty_input_fails() {
        assert_eq!(
            reduce_across_examples(&[]),
            Err(SignatureError::EmptyReduction)
        );
    }

    #[test]
    fn test_length_mismatch_fails() {
        let sigs = vec![vec![Some(true)], vec![Some(true)], vec![Some(true), None]];
        assert_eq!(
            reduce_across_examples(&sigs),
            Err(SignatureError::SignatureLengthMismatch {
                position: 2,
                expected: 1,
                found: 2,
            })
        );
    }

    #[test]
    fn test_flatten() {
        let features = [
            REDUCED_PADDING,
            ReducedFeature {
                coverage: 1.0,
                all_true: true,
                all_false: false,
                frac_true: 1.0,
            },
        ];
        assert_eq!(
            flatten(&features),
            vec![0.0, 0.0, 0.0, 0.5, 1.0, 1.0, 0.0, 1.0]
        );
    }

    proptest! {
        #[test]
        fn prop_constant_column_reduces_exactly(b in any::<bool>(), n in 1usize..20) {
            let sigs = vec![vec![Some(b)]; n];
            let reduced = reduce_across_examples(&sigs).unwrap();
            prop_assert_eq!(reduced, vec![ReducedFeature {
                coverage: 1.0,
                all_true: b,
                all_false: !b,
                frac_true: if b { 1.0 } else { 0.0 },
            }]);
        }

        #[test]
        fn prop_reduction_bounds(
            column in prop::collection::vec(prop::option::of(any::<bool>()), 1..30)
        ) {
            let sigs: Vec<Signature> = column.iter().map(|b| vec![*b]).collect();
            let feature = reduce_across_examples(&sigs).unwrap()[0];
            prop_assert!((0.0..=1.0).contains(&feature.coverage));
            prop_assert!((0.0..=1.0).contains(&feature.frac_true));
            prop_assert!(!(feature.all_true && feature.all_false));
        }
    }
}
