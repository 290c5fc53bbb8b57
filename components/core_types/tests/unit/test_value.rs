//! Unit tests for ObjectRef and Value

use core_types::{ObjectRef, Value};
use std::collections::HashSet;

#[cfg(test)]
mod object_ref_tests {
    use super::*;

    #[test]
    fn test_object_ref_copy() {
        let a = ObjectRef::new(1, 0);
        let b = a;
        assert_eq!(a, b);
    }

    #[test]
    fn test_object_ref_hash_distinguishes_generations() {
        let mut set = HashSet::new();
        set.insert(ObjectRef::new(0, 0));
        set.insert(ObjectRef::new(0, 1));
        set.insert(ObjectRef::new(0, 0));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_object_ref_display() {
        assert_eq!(ObjectRef::new(42, 3).to_string(), "#42@3");
    }
}

#[cfg(test)]
mod value_tests {
    use super::*;

    #[test]
    fn test_scalar_payload() {
        let v = Value::Scalar(i64::MIN);
        assert_eq!(v.as_scalar(), Some(i64::MIN));
        assert_eq!(v.type_name(), "scalar");
        assert_eq!(v.to_string(), i64::MIN.to_string());
    }

    #[test]
    fn test_composite_children_order() {
        let head = ObjectRef::new(4, 0);
        let tail = ObjectRef::new(5, 0);
        let v = Value::Composite { head, tail };
        assert_eq!(v.children(), Some((head, tail)));
        assert_eq!(v.type_name(), "composite");
    }

    #[test]
    fn test_value_equality_is_structural() {
        let r = ObjectRef::new(0, 0);
        assert_eq!(
            Value::Composite { head: r, tail: r },
            Value::Composite { head: r, tail: r }
        );
        assert_ne!(Value::Scalar(1), Value::Scalar(2));
    }
}
