//! Three-state nullable value type: every Terraform attribute is `null`,
//! `unknown` (computed, not yet resolved), or `known(T)`. Plain `Option<T>`
//! cannot distinguish "explicitly absent" from "not yet computed" — that
//! distinction drives plan-diff decisions throughout the server reconciler
//!.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "value")]
pub enum Value<T> {
    Null,
    Unknown,
    Known(T),
}

impl<T> Value<T> {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Value::Unknown)
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Value::Known(_))
    }

    pub fn known(&self) -> Option<&T> {
        match self {
            Value::Known(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_known(self) -> Option<T> {
        match self {
            Value::Known(v) => Some(v),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Value<U> {
        match self {
            Value::Null => Value::Null,
            Value::Unknown => Value::Unknown,
            Value::Known(v) => Value::Known(f(v)),
        }
    }

    /// Known-and-non-null-and-changed, the predicate plan-diff logic uses
    /// to decide whether an immutable attribute transitioned.
    pub fn known_ne(&self, other: &Value<T>) -> bool
    where
        T: PartialEq,
    {
        match (self, other) {
            (Value::Known(a), Value::Known(b)) => a != b,
            _ => false,
        }
    }
}

impl<T> Default for Value<T> {
    fn default() -> Self {
        Value::Null
    }
}

impl<T> From<Option<T>> for Value<T> {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => Value::Known(v),
            None => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distinguishes_null_from_unknown() {
        let null: Value<String> = Value::Null;
        let unknown: Value<String> = Value::Unknown;
        assert!(null.is_null() && !null.is_unknown());
        assert!(unknown.is_unknown() && !unknown.is_null());
    }

    #[test]
    fn known_ne_is_false_unless_both_known_and_different() {
        let a: Value<i64> = Value::Known(1);
        let b: Value<i64> = Value::Known(2);
        let u: Value<i64> = Value::Unknown;
        assert!(a.known_ne(&b));
        assert!(!a.known_ne(&u));
        assert!(!u.known_ne(&a));
    }
}
