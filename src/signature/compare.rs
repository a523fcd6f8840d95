//! Pairwise comparison of concrete objects.

use super::properties::relevant;
use super::Signature;
use crate::object::{Object, ObjectType};
use once_cell::sync::Lazy;
use std::collections::{BTreeSet, HashMap};

/// Variable-length comparison width per ordered type pair, sized from the
/// canonical default objects.
static COMPARE_LENGTH_BY_TYPES: Lazy<HashMap<(ObjectType, ObjectType), usize>> =
    Lazy::new(|| {
        ObjectType::pairs()
            .map(|(a, b)| {
                let len = variable_compare(&a.default_object(), &b.default_object()).len();
                ((a, b), len)
            })
            .collect()
    });

/// Slot width reserved for the ordered pair `(a, b)` in fixed-length comparisons.
pub fn compare_len(a: ObjectType, b: ObjectType) -> usize {
    COMPARE_LENGTH_BY_TYPES[&(a, b)]
}

/// Width of every fixed-length comparison.
pub fn fixed_compare_len() -> usize {
    ObjectType::pairs().map(|(a, b)| compare_len(a, b)).sum()
}

/// Compares two objects of the same type; `None` if their types differ.
pub fn compare_same_type(x: &Object, y: &Object) -> Option<Vec<bool>> {
    match (x, y) {
        (Object::Bool(x), Object::Bool(y)) => Some(vec![x == y, x != y, *x && *y, *x || *y]),
        (Object::Int(x), Object::Int(y)) => Some(compare_ints(*x, *y)),
        (Object::List(x), Object::List(y)) => Some(compare_lists(x, y)),
        _ => None,
    }
}

fn compare_ints(x: i64, y: i64) -> Vec<bool> {
    let abs_diff = (i128::from(x) - i128::from(y)).unsigned_abs();
    vec![
        x == y,
        x < y,
        x > y,
        abs_diff < 2,
        abs_diff < 5,
        abs_diff < 10,
        abs_diff < 100,
        (x >= 0) == (y >= 0),
    ]
}

fn compare_lists(x: &[i64], y: &[i64]) -> Vec<bool> {
    let unique_x: BTreeSet<_> = x.iter().collect();
    let unique_y: BTreeSet<_> = y.iter().collect();
    let pairs = || x.iter().zip(y);
    vec![
        x == y,
        x.len() == y.len(),
        x.len() > y.len(),
        x.len() < y.len(),
        x.len().abs_diff(y.len()) < 2,
        pairs().all(|(a, b)| a <= b),
        pairs().all(|(a, b)| a >= b),
        // One is a prefix of the other.
        pairs().all(|(a, b)| a == b),
        unique_x == unique_y,
        unique_x.is_subset(&unique_y),
        unique_y.is_subset(&unique_x),
    ]
}

/// Compares two concrete objects of any types.
///
/// Objects of different types are compared through the relevance sets:
/// members of `x`'s set against `y`, then `x` against members of `y`'s set.
/// In fixed-length mode every ordered type pair gets its own slot.
pub fn compare(x: &Object, y: &Object, fixed_length: bool) -> Signature {
    let variable = variable_compare(x, y);
    if !fixed_length {
        return variable;
    }

    let own_pair = (x.object_type(), y.object_type());
    let mut result = Vec::with_capacity(fixed_compare_len());
    for pair in ObjectType::pairs() {
        if pair == own_pair {
            result.extend_from_slice(&variable);
        } else {
            result.extend(std::iter::repeat(None).take(compare_len(pair.0, pair.1)));
        }
    }
    result
}

fn variable_compare(x: &Object, y: &Object) -> Signature {
    let bools = match compare_same_type(x, y) {
        Some(bools) => bools,
        None => {
            let from_x = relevant(x);
            let from_y = relevant(y);
            from_x
                .iter()
                .filter_map(|r| compare_same_type(r, y))
                .chain(from_y.iter().filter_map(|r| compare_same_type(x, r)))
                .flatten()
                .collect()
        }
    };
    bools.into_iter().map(Some).collect()
}
