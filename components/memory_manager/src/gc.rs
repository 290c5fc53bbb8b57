//! Mark-and-sweep garbage collection.
//!
//! A collection runs two passes over the [`Heap`]:
//! - Mark: starting from every root, set the mark bit of each reachable
//!   object. An explicit worklist replaces recursion, so deep or long
//!   chains never grow the call stack. The mark bit doubles as the visited
//!   set, which makes cyclic graphs terminate.
//! - Sweep: walk the owned-list once, release unmarked objects and clear
//!   the mark bit of survivors.

use crossbeam_deque::Worker;
use std::fmt;

use core_types::{ObjectRef, Value};

use crate::heap::Heap;

/// Reports the outgoing graph edges of an object.
pub trait Trace {
    /// Calls `visitor` once per referenced object, in edge order.
    fn trace(&self, visitor: &mut dyn FnMut(ObjectRef));
}

impl Trace for Value {
    fn trace(&self, visitor: &mut dyn FnMut(ObjectRef)) {
        if let Value::Composite { head, tail } = self {
            visitor(*head);
            visitor(*tail);
        }
    }
}

/// Worklist of marked objects whose children have not been scanned yet.
pub struct MarkStack {
    local: Worker<ObjectRef>,
}

impl MarkStack {
    /// Creates a new empty mark stack.
    pub fn new() -> Self {
        MarkStack {
            local: Worker::new_lifo(),
        }
    }

    /// Pushes an object onto the mark stack.
    pub fn push(&self, obj: ObjectRef) {
        self.local.push(obj);
    }

    /// Pops the most recently pushed object.
    pub fn pop(&self) -> Option<ObjectRef> {
        self.local.pop()
    }

    /// Returns true if the mark stack is empty.
    pub fn is_empty(&self) -> bool {
        self.local.is_empty()
    }

    /// Returns the number of pending objects.
    pub fn len(&self) -> usize {
        self.local.len()
    }

    /// Drops every pending object.
    pub fn clear(&self) {
        while self.local.pop().is_some() {}
    }
}

impl Default for MarkStack {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MarkStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarkStack")
            .field("len", &self.len())
            .finish()
    }
}

/// Outcome of one collection cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectionReport {
    /// Objects on the owned-list when the cycle started
    pub live_before: usize,
    /// Objects reached from the roots
    pub marked: usize,
    /// Objects released by the sweep
    pub freed: usize,
    /// Objects on the owned-list when the cycle finished
    pub live_after: usize,
}

/// Stop-the-world mark-and-sweep collector.
#[derive(Debug, Default)]
pub struct MarkSweep {
    mark_stack: MarkStack,
}

impl MarkSweep {
    /// Creates a collector with an empty mark stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks every object reachable from `root`.
    ///
    /// Returns how many objects this call marked. Objects that are already
    /// marked are not rescanned, so a second call on the same root within a
    /// cycle returns 0. Stale handles are ignored.
    pub fn mark(&mut self, heap: &mut Heap, root: ObjectRef) -> usize {
        if !heap.mark(root) {
            return 0;
        }
        self.mark_stack.push(root);

        let mut marked = 1;
        let mut children = Vec::new();
        while let Some(obj) = self.mark_stack.pop() {
            let Some(value) = heap.value(obj).copied() else {
                continue;
            };

            value.trace(&mut |child| children.push(child));
            // Reverse so the first edge is scanned first.
            for child in children.drain(..).rev() {
                if heap.mark(child) {
                    marked += 1;
                    self.mark_stack.push(child);
                }
            }
        }
        marked
    }

    /// Marks everything reachable from any of `roots`.
    pub fn mark_roots(&mut self, heap: &mut Heap, roots: &[ObjectRef]) -> usize {
        roots.iter().map(|&root| self.mark(heap, root)).sum()
    }

    /// Releases every unmarked object and clears the marks of survivors.
    ///
    /// Returns the number of objects released.
    pub fn sweep(&self, heap: &mut Heap) -> usize {
        let mut freed = 0;
        let mut prev = None;
        let mut cursor = heap.first_index();

        while let Some(index) = cursor {
            // The owned-list only names occupied slots.
            let Some(object) = heap.object_at_mut(index) else {
                break;
            };
            let next = object.arena_next;

            if object.marked {
                object.marked = false;
                prev = Some(index);
            } else {
                heap.relink(prev, next);
                heap.release(index);
                freed += 1;
            }
            cursor = next;
        }
        freed
    }

    /// Runs a full mark-and-sweep cycle over `heap` with the given roots.
    pub fn collect(&mut self, heap: &mut Heap, roots: &[ObjectRef]) -> CollectionReport {
        let live_before = heap.len();
        self.mark_stack.clear();

        let marked = self.mark_roots(heap, roots);
        let freed = self.sweep(heap);

        CollectionReport {
            live_before,
            marked,
            freed,
            live_after: heap.len(),
        }
    }
}
