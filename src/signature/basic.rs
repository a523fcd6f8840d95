//! Basic signatures: type classification plus properties of the relevance set.

use super::classify::type_property;
use super::properties::{basic_properties, relevant};
use super::Signature;
use crate::object::{Object, ObjectType};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Variable-length basic signature width per type, sized from each type's
/// canonical default object.
static BASIC_SIGNATURE_LENGTH_BY_TYPE: Lazy<HashMap<ObjectType, usize>> = Lazy::new(|| {
    ObjectType::ALL
        .into_iter()
        .map(|t| (t, variable_basic_signature(&t.default_object()).len()))
        .collect()
});

/// Slot width reserved for `t` in fixed-length basic signatures.
pub fn basic_signature_len(t: ObjectType) -> usize {
    BASIC_SIGNATURE_LENGTH_BY_TYPE[&t]
}

/// Width of every fixed-length basic signature.
pub fn fixed_basic_signature_len() -> usize {
    ObjectType::ALL.into_iter().map(basic_signature_len).sum()
}

/// Signature of a single concrete object.
///
/// In fixed-length mode each type in canonical order gets its own slot; only
/// the slot of `x`'s type is filled and the others are `None`.
pub fn basic_signature(x: &Object, fixed_length: bool) -> Signature {
    let variable = variable_basic_signature(x);
    if !fixed_length {
        return variable;
    }

    let own_type = x.object_type();
    let mut result = Vec::with_capacity(fixed_basic_signature_len());
    for t in ObjectType::ALL {
        if t == own_type {
            result.extend_from_slice(&variable);
        } else {
            result.extend(std::iter::repeat(None).take(basic_signature_len(t)));
        }
    }
    result
}

fn variable_basic_signature(x: &Object) -> Signature {
    let related = relevant(x);
    type_property(x)
        .into_iter()
        .chain(related.iter().flat_map(basic_properties))
        .map(Some)
        .collect()
}
