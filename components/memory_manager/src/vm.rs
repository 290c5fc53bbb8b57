//! The VM: operand stack as root set, plus the allocator and threshold policy.
//!
//! Every object is created through [`Vm`]. Before an allocation, the VM
//! checks the live-object count against its threshold and runs a full
//! collection first if the threshold has been reached, so a cycle never
//! sees a half-built object. After each cycle the threshold is regrown from
//! the surviving object count.
//!
//! # Examples
//!
//! ```
//! use memory_manager::Vm;
//!
//! let mut vm = Vm::new();
//! vm.push_scalar(1).unwrap();
//! vm.push_scalar(2).unwrap();
//! let pair = vm.push_composite().unwrap();
//!
//! assert_eq!(vm.live_object_count(), 3);
//! assert_eq!(vm.stack_depth(), 1);
//! assert_eq!(vm.peek(), Some(pair));
//! ```

use arrayvec::ArrayVec;
use tracing::{debug, debug_span, trace, warn};

use core_types::{GcError, GcResult, ObjectRef, Value};

use crate::config::{GcConfig, STACK_MAX};
use crate::gc::{CollectionReport, MarkSweep};
use crate::heap::Heap;
use crate::stats::GcStats;

/// A VM instance owning one heap and one root stack.
///
/// Instances share no state. Handles returned by a VM are only meaningful
/// to that VM, and a handle to an object that a later collection frees no
/// longer resolves.
#[derive(Debug)]
pub struct Vm {
    /// Every allocated object
    heap: Heap,
    /// Root set, top of stack last
    stack: ArrayVec<ObjectRef, STACK_MAX>,
    collector: MarkSweep,
    config: GcConfig,
    /// Live-object count that triggers the next collection
    max_objects: usize,
    stats: GcStats,
}

impl Vm {
    /// Creates a VM with an empty stack, no objects and the default
    /// threshold.
    pub fn new() -> Self {
        Self::with_config(GcConfig::default())
    }

    /// Creates a VM with a custom allocator configuration.
    pub fn with_config(config: GcConfig) -> Self {
        Vm {
            heap: Heap::new(),
            stack: ArrayVec::new(),
            collector: MarkSweep::new(),
            max_objects: config.first_threshold(),
            config,
            stats: GcStats::default(),
        }
    }

    /// Pushes `obj` onto the root stack.
    ///
    /// # Errors
    ///
    /// `InvalidReference` if `obj` names no live object, `StackOverflow` if
    /// all `STACK_MAX` slots are in use. The stack is unchanged on error.
    pub fn push(&mut self, obj: ObjectRef) -> GcResult<()> {
        if !self.heap.contains(obj) {
            return Err(GcError::InvalidReference(obj));
        }
        self.stack
            .try_push(obj)
            .map_err(|_| GcError::StackOverflow {
                capacity: STACK_MAX,
            })
    }

    /// Removes and returns the top of the root stack.
    ///
    /// The popped object stays allocated until a collection finds it
    /// unreachable.
    pub fn pop(&mut self) -> GcResult<ObjectRef> {
        self.stack.pop().ok_or(GcError::StackUnderflow {
            needed: 1,
            depth: 0,
        })
    }

    /// Returns the top of the root stack without removing it.
    pub fn peek(&self) -> Option<ObjectRef> {
        self.stack.last().copied()
    }

    /// Allocates a scalar and pushes it.
    pub fn push_scalar(&mut self, value: i64) -> GcResult<ObjectRef> {
        if self.stack.is_full() {
            return Err(GcError::StackOverflow {
                capacity: STACK_MAX,
            });
        }
        let obj = self.allocate(Value::Scalar(value))?;
        self.push(obj)?;
        Ok(obj)
    }

    /// Pops two values, combines them into a composite and pushes it.
    ///
    /// The top of the stack becomes `tail` and the value below it becomes
    /// `head`. Both stay on the stack while the composite is allocated, so a
    /// collection triggered by that allocation cannot free them.
    ///
    /// # Errors
    ///
    /// `StackUnderflow` with fewer than two values on the stack, or the
    /// allocation error. The stack is unchanged on error.
    pub fn push_composite(&mut self) -> GcResult<ObjectRef> {
        let depth = self.stack.len();
        if depth < 2 {
            return Err(GcError::StackUnderflow { needed: 2, depth });
        }
        let head = self.stack[depth - 2];
        let tail = self.stack[depth - 1];

        let obj = self.allocate(Value::Composite { head, tail })?;

        let popped_tail = self.pop()?;
        let popped_head = self.pop()?;
        debug_assert_eq!((popped_head, popped_tail), (head, tail));

        self.push(obj)?;
        Ok(obj)
    }

    /// Forces a full collection and regrows the threshold.
    pub fn collect(&mut self) -> CollectionReport {
        let live_before = self.heap.len();
        let _span = debug_span!("memory_manager.collect", live_before).entered();

        let report = self.collector.collect(&mut self.heap, &self.stack);
        self.max_objects = self.config.next_threshold(report.live_after);
        self.stats.record_collection(&report);

        debug!(
            marked = report.marked,
            freed = report.freed,
            live = report.live_after,
            threshold = self.max_objects,
            "collection finished"
        );
        report
    }

    /// Empties the root stack without collecting.
    pub fn clear_stack(&mut self) {
        self.stack.clear();
    }

    /// Tears the VM down: drops every root and reclaims every object.
    pub fn shutdown(mut self) -> CollectionReport {
        self.clear_stack();
        self.collect()
    }

    /// Returns the number of live objects.
    pub fn live_object_count(&self) -> usize {
        self.heap.len()
    }

    /// Returns the number of values on the root stack.
    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    /// Returns the live-object count that triggers the next collection.
    pub fn threshold(&self) -> usize {
        self.max_objects
    }

    /// Looks up the value of a live object.
    pub fn get(&self, obj: ObjectRef) -> Option<&Value> {
        self.heap.value(obj)
    }

    /// Returns the root stack, bottom first.
    pub fn stack(&self) -> &[ObjectRef] {
        &self.stack
    }

    /// Returns the heap.
    pub fn heap(&self) -> &Heap {
        &self.heap
    }

    /// Returns the collector statistics.
    pub fn stats(&self) -> &GcStats {
        &self.stats
    }

    /// Returns the configuration this VM was created with.
    pub fn config(&self) -> &GcConfig {
        &self.config
    }

    fn allocate(&mut self, value: Value) -> GcResult<ObjectRef> {
        let live = self.heap.len();
        let capped = self
            .config
            .max_heap_objects
            .is_some_and(|limit| live >= limit);

        if live >= self.max_objects || capped {
            trace!(live, threshold = self.max_objects, "allocation threshold reached");
            self.collect();
        }

        let live = self.heap.len();
        if let Some(limit) = self.config.max_heap_objects {
            if live >= limit {
                warn!(live, limit, "heap limit reached");
                return Err(GcError::AllocationFailure {
                    live,
                    limit: Some(limit),
                });
            }
        }

        let obj = self.heap.insert(value).map_err(|err| {
            warn!(live, "host allocator refused memory");
            err
        })?;
        self.stats.record_allocation(self.heap.len());
        Ok(obj)
    }
}

impl Default for Vm {
    fn default() -> Self {
        Self::new()
    }
}
