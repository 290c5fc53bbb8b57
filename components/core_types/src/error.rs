//! Collector error types.
//!
//! Stack errors are caller errors: the rejected operation leaves the VM
//! untouched. Allocation failure is fatal to this core and is handed to the
//! embedding application to decide what to do.

use thiserror::Error;

use crate::ObjectRef;

/// Errors raised by the root stack and the allocator.
///
/// # Examples
///
/// ```
/// use core_types::GcError;
///
/// let err = GcError::StackUnderflow { needed: 2, depth: 1 };
/// assert!(err.is_caller_error());
/// assert_eq!(
///     err.to_string(),
///     "stack underflow: needed 2 values, stack holds 1"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GcError {
    /// Push attempted with every stack slot in use
    #[error("stack overflow: capacity of {capacity} slots exhausted")]
    StackOverflow {
        /// Stack capacity
        capacity: usize,
    },

    /// Pop or combine attempted with too few values on the stack
    #[error("stack underflow: needed {needed} values, stack holds {depth}")]
    StackUnderflow {
        /// Values the operation consumes
        needed: usize,
        /// Stack depth at the time of the call
        depth: usize,
    },

    /// Object storage is exhausted
    #[error("allocation failure: {live} live objects, {}", describe_limit(.limit))]
    AllocationFailure {
        /// Live objects after the collection that preceded the failure
        live: usize,
        /// Configured heap cap, or `None` when the host allocator refused memory
        limit: Option<usize>,
    },

    /// Handle names no live object
    #[error("invalid reference {0}: object does not exist")]
    InvalidReference(ObjectRef),
}

fn describe_limit(limit: &Option<usize>) -> String {
    match limit {
        Some(limit) => format!("heap limit of {} objects reached", limit),
        None => "host allocator refused memory".to_string(),
    }
}

impl GcError {
    /// True for errors caused by invalid input from the caller.
    pub fn is_caller_error(&self) -> bool {
        !self.is_fatal()
    }

    /// True for resource exhaustion, which this core cannot recover from.
    pub fn is_fatal(&self) -> bool {
        matches!(self, GcError::AllocationFailure { .. })
    }
}

/// Result type for collector operations
pub type GcResult<T> = Result<T, GcError>;
