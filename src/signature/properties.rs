//! Per-object boolean properties and relevance expansion.

use crate::object::Object;
use std::collections::BTreeSet;

/// Magnitude buckets tested on `|x|` for integers.
const MAGNITUDE_THRESHOLDS: [u64; 5] = [5, 10, 30, 100, 300];

/// Boolean properties describing `x` in isolation.
///
/// Widths are fixed per type: 2 for booleans, 12 for integers, 5 for lists.
pub fn basic_properties(x: &Object) -> Vec<bool> {
    match x {
        Object::Bool(b) => vec![*b, !*b],
        Object::Int(x) => int_properties(*x),
        Object::List(xs) => list_properties(xs),
    }
}

fn int_properties(x: i64) -> Vec<bool> {
    let abs_x = x.unsigned_abs();
    let mut props = vec![x == -1, x == 0, x == 1, x == 2, x > 0, x < 0];
    props.extend(MAGNITUDE_THRESHOLDS.iter().map(|&t| abs_x < t));
    props.push(abs_x >= MAGNITUDE_THRESHOLDS[MAGNITUDE_THRESHOLDS.len() - 1]);
    props
}

fn list_properties(xs: &[i64]) -> Vec<bool> {
    let mut sorted = xs.to_vec();
    sorted.sort_unstable();
    let ascending = xs == sorted.as_slice();
    sorted.reverse();
    let descending = xs == sorted.as_slice();
    let num_unique = xs.iter().collect::<BTreeSet<_>>().len();

    vec![
        ascending,
        descending,
        num_unique == 1,
        num_unique <= xs.len() / 2,
        num_unique == xs.len(),
    ]
}

/// Objects whose basic properties help characterize `x`, starting with `x`.
///
/// Lists expand to `[x, len, max, min, sum, first, last]`. For an empty list
/// the aggregates are taken over `[0]`, while `x` and `len` stay exact.
pub fn relevant(x: &Object) -> Vec<Object> {
    match x {
        Object::Bool(_) | Object::Int(_) => vec![x.clone()],
        Object::List(xs) => {
            let nonempty: &[i64] = if xs.is_empty() { &[0] } else { xs };
            let max = nonempty.iter().copied().max().unwrap_or(0);
            let min = nonempty.iter().copied().min().unwrap_or(0);
            let sum = exact_sum(nonempty);
            vec![
                x.clone(),
                Object::Int(xs.len() as i64),
                Object::Int(max),
                Object::Int(min),
                Object::Int(sum),
                Object::Int(nonempty[0]),
                Object::Int(nonempty[nonempty.len() - 1]),
            ]
        }
    }
}

/// Sum computed without intermediate overflow, clamped to `i64` once.
fn exact_sum(xs: &[i64]) -> i64 {
    let total: i128 = xs.iter().copied().map(i128::from).sum();
    i64::try_from(total).unwrap_or(if total < 0 { i64::MIN } else { i64::MAX })
}
