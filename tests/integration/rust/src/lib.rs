//! Integration test suite for the mark-and-sweep VM
//!
//! This crate provides integration tests that drive the collector only
//! through the public VM surface, across the component boundary.

/// Re-export components for test convenience
pub mod components {
    pub use core_types;
    pub use memory_manager;
}
