//! Core object types and error handling for the mark-and-sweep VM.
//!
//! This crate provides the foundational types shared by the collector and
//! its embedders: object handles, the object representation, and the error
//! taxonomy.
//!
//! # Overview
//!
//! - [`ObjectRef`] - Generational handle naming an arena slot
//! - [`Value`] - Scalar or two-child composite object
//! - [`GcError`] - Stack and allocation errors
//!
//! # Examples
//!
//! ```
//! use core_types::{GcError, ObjectRef, Value};
//!
//! let head = ObjectRef::new(0, 0);
//! let tail = ObjectRef::new(1, 0);
//! let pair = Value::Composite { head, tail };
//! assert_eq!(pair.children(), Some((head, tail)));
//!
//! let err = GcError::StackOverflow { capacity: 256 };
//! assert!(err.is_caller_error());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod value;

pub use error::{GcError, GcResult};
pub use value::{ObjectRef, Value};
