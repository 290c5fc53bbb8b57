//! Memory Manager - Mark-and-sweep garbage collector for the toy VM
//!
//! This component provides:
//! - An arena heap threading every live object on an owned-list
//! - Worklist-driven marking from the VM operand stack
//! - A linear sweep that reclaims unmarked objects
//! - An allocator that collects at a threshold and regrows it from the
//!   surviving object count

pub mod config;
pub mod gc;
pub mod heap;
pub mod stats;
pub mod vm;

// Re-export main types
pub use config::{GcConfig, DEFAULT_GROWTH_FACTOR, INITIAL_GC_THRESHOLD, STACK_MAX};
pub use gc::{CollectionReport, MarkSweep, MarkStack, Trace};
pub use heap::{Heap, HeapObject};
pub use stats::GcStats;
pub use vm::Vm;

pub use core_types::{GcError, GcResult, ObjectRef, Value};
