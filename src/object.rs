//! Concrete objects flowing through a synthesis search.
//!
//! The object model is a closed set of three types. Every dispatch point in
//! the signature engine matches exhaustively on [`Object`], so adding a type
//! means extending each of them together.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single concrete runtime object for one example.
///
/// Serialized untagged so JSON `true`, `3` and `[1, 2]` map directly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Object {
    Bool(bool),
    Int(i64),
    List(Vec<i64>),
}

/// Type tag of an [`Object`].
///
/// The declaration order is the canonical enumeration order used for
/// fixed-length slot layouts and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectType {
    Bool,
    Int,
    List,
}

impl ObjectType {
    /// All types in canonical order.
    pub const ALL: [ObjectType; 3] = [ObjectType::Bool, ObjectType::Int, ObjectType::List];

    /// Canonical representative used to size this type's fixed-length slots.
    pub fn default_object(self) -> Object {
        match self {
            ObjectType::Bool => Object::Bool(false),
            ObjectType::Int => Object::Int(0),
            ObjectType::List => Object::List(Vec::new()),
        }
    }

    /// Every ordered pair of types, row-major over [`ObjectType::ALL`].
    pub fn pairs() -> impl Iterator<Item = (ObjectType, ObjectType)> {
        Self::ALL
            .into_iter()
            .flat_map(|a| Self::ALL.into_iter().map(move |b| (a, b)))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ObjectType::Bool => "bool",
            ObjectType::Int => "int",
            ObjectType::List => "list",
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Object {
    pub fn object_type(&self) -> ObjectType {
        match self {
            Object::Bool(_) => ObjectType::Bool,
            Object::Int(_) => ObjectType::Int,
            Object::List(_) => ObjectType::List,
        }
    }
}

impl From<bool> for Object {
    fn from(value: bool) -> Self {
        Object::Bool(value)
    }
}

impl From<i64> for Object {
    fn from(value: i64) -> Self {
        Object::Int(value)
    }
}

impl From<Vec<i64>> for Object {
    fn from(value: Vec<i64>) -> Self {
        Object::List(value)
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::Bool(b) => write!(f, "{}", b),
            Object::Int(x) => write!(f, "{}", x),
            Object::List(xs) => write!(f, "{:?}", xs),
        }
    }
}

const PROBE_INTS: [i64; 21] = [
    -100, -50, -20, -10, -7, -5, -4, -3, -2, -1, 0, 1, 2, 3, 4, 5, 7, 10, 20, 50, 100,
];

const PROBE_LISTS: [&[i64]; 20] = [
    &[],
    &[0],
    &[-1],
    &[1],
    &[6],
    &[0, 1],
    &[2, 2],
    &[-2, -4],
    &[5, -3],
    &[-8, 1],
    &[1, 2, 3],
    &[6, 2, 5],
    &[-5, 2, -19],
    &[-32, 51, -45, 23],
    &[0, 0, 0, 0, 0],
    &[2, 2, 1, 3, 3, 0],
    &[5, -6, 9, -19, 43, 22, -1],
    &[6, 21, 23, 45, 55, 67, 72, 75],
    &[24, -22, 0, 1, 6, -59, 35, 1, -2],
    &[0, 0, 0, 1, 1, 1, 1, 2, 3, 3],
];

/// Curated inputs tried when sampling a lambda's behavior for one type.
pub fn probe_values(object_type: ObjectType) -> Vec<Object> {
    match object_type {
        ObjectType::Bool => vec![Object::Bool(false), Object::Bool(true)],
        ObjectType::Int => PROBE_INTS.iter().copied().map(Object::Int).collect(),
        ObjectType::List => PROBE_LISTS.iter().map(|xs| Object::List(xs.to_vec())).collect(),
    }
}

/// Probe pools of every type concatenated in canonical type order.
pub fn all_probe_values() -> Vec<Object> {
    ObjectType::ALL.into_iter().flat_map(probe_values).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pairs_are_row_major() {
        let pairs: Vec<_> = ObjectType::pairs().collect();
        assert_eq!(pairs.len(), 9);
        assert_eq!(pairs[0], (ObjectType::Bool, ObjectType::Bool));
        assert_eq!(pairs[1], (ObjectType::Bool, ObjectType::Int));
        assert_eq!(pairs[3], (ObjectType::Int, ObjectType::Bool));
        assert_eq!(pairs[8], (ObjectType::List, ObjectType::List));
    }

    #[test]
    fn test_probe_pool_sizes() {
        assert_eq!(probe_values(ObjectType::Bool).len(), 2);
        assert_eq!(probe_values(ObjectType::Int).len(), 21);
        assert_eq!(probe_values(ObjectType::List).len(), 20);
        assert_eq!(all_probe_values().len(), 43);
        assert_eq!(all_probe_values()[0], Object::Bool(false));
        assert_eq!(all_probe_values()[2], Object::Int(-100));
        assert_eq!(all_probe_values()[23], Object::List(vec![]));
    }

    #[test]
    fn test_untagged_json() {
        let objects: Vec<Object> = serde_json::from_str("[true, -3, [1, 2]]").unwrap();
        assert_eq!(
            objects,
            vec![Object::Bool(true), Object::Int(-3), Object::List(vec![1, 2])]
        );
    }

    #[test]
    fn test_default_objects_match_their_type() {
        for t in ObjectType::ALL {
            assert_eq!(t.default_object().object_type(), t);
        }
    }
}
