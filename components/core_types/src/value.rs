//! Heap object handles and the object value representation.
//!
//! Objects live in the collector's arena and are named by [`ObjectRef`]
//! handles rather than raw addresses. A handle carries the generation of the
//! slot it was issued for, so a handle to a reclaimed object can never
//! resolve to whatever object later reuses the slot.

use std::fmt;

/// Handle to an object in a collector arena.
///
/// Identity is by handle: two handles are equal iff they name the same slot
/// in the same generation. Handles are plain data and carry no ownership.
///
/// # Examples
///
/// ```
/// use core_types::ObjectRef;
///
/// let a = ObjectRef::new(3, 0);
/// let b = ObjectRef::new(3, 1);
///
/// assert_eq!(a.index(), b.index());
/// assert_ne!(a, b);
/// assert_eq!(a.to_string(), "#3@0");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectRef {
    index: u32,
    generation: u32,
}

impl ObjectRef {
    /// Creates a handle naming slot `index` in generation `generation`.
    pub const fn new(index: u32, generation: u32) -> Self {
        ObjectRef { index, generation }
    }

    /// Slot index inside the arena.
    pub const fn index(self) -> u32 {
        self.index
    }

    /// Generation of the slot this handle was issued for.
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}@{}", self.index, self.generation)
    }
}

/// A collector-managed object: either a scalar or a two-child composite.
///
/// Composite children are graph edges, not ownership edges. They are fixed
/// at construction; nothing mutates them afterwards.
///
/// # Examples
///
/// ```
/// use core_types::{ObjectRef, Value};
///
/// let scalar = Value::Scalar(7);
/// assert_eq!(scalar.as_scalar(), Some(7));
/// assert_eq!(scalar.children(), None);
///
/// let pair = Value::Composite {
///     head: ObjectRef::new(0, 0),
///     tail: ObjectRef::new(1, 0),
/// };
/// assert!(pair.is_composite());
/// assert_eq!(pair.type_name(), "composite");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Value {
    /// Integer payload
    Scalar(i64),
    /// Pair of references to other objects
    Composite {
        /// First child (the older of the two combined stack values)
        head: ObjectRef,
        /// Second child (the most recently pushed of the two)
        tail: ObjectRef,
    },
}

impl Value {
    /// Returns true for `Value::Scalar`.
    pub fn is_scalar(&self) -> bool {
        matches!(self, Value::Scalar(_))
    }

    /// Returns true for `Value::Composite`.
    pub fn is_composite(&self) -> bool {
        matches!(self, Value::Composite { .. })
    }

    /// Returns the integer payload of a scalar.
    pub fn as_scalar(&self) -> Option<i64> {
        match self {
            Value::Scalar(n) => Some(*n),
            Value::Composite { .. } => None,
        }
    }

    /// Returns `(head, tail)` of a composite.
    pub fn children(&self) -> Option<(ObjectRef, ObjectRef)> {
        match self {
            Value::Scalar(_) => None,
            Value::Composite { head, tail } => Some((*head, *tail)),
        }
    }

    /// Short name of the object kind, used in logs and diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Scalar(_) => "scalar",
            Value::Composite { .. } => "composite",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Scalar(n) => write!(f, "{}", n),
            Value::Composite { head, tail } => write!(f, "({}, {})", head, tail),
        }
    }
}
