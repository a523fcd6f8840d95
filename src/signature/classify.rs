//! One-hot type classification.

use crate::object::{Object, ObjectType};

/// Width of every type classification vector.
pub const TYPE_PROPERTY_LEN: usize = 4;

/// Classifies a concrete object as `[is_lambda, is_bool, is_int, is_list]`.
pub fn type_property(x: &Object) -> [bool; TYPE_PROPERTY_LEN] {
    let t = x.object_type();
    [
        false,
        t == ObjectType::Bool,
        t == ObjectType::Int,
        t == ObjectType::List,
    ]
}

/// Classification of a functional value. Its output type is not known up
/// front, so only the lambda bit is set.
pub fn lambda_type_property() -> [bool; TYPE_PROPERTY_LEN] {
    [true, false, false, false]
}
