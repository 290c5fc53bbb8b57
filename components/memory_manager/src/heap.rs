//! Arena heap with an intrusive owned-list.
//!
//! This module implements the object store used by the collector:
//! - Objects live in a slot vector and are named by generational handles
//! - Vacant slots are recycled through a free list
//! - Every live object is threaded on a singly-linked owned-list rooted at
//!   `first_object`, which is the only structure the sweep phase walks

use core_types::{GcError, GcResult, ObjectRef, Value};

/// A collector-managed object with its GC metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeapObject {
    /// The object itself
    value: Value,
    /// Mark bit, only set while a collection is in progress
    pub(crate) marked: bool,
    /// Next slot on the owned-list (not a graph edge)
    pub(crate) arena_next: Option<u32>,
}

impl HeapObject {
    /// Returns the object value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Returns whether this object is marked.
    pub fn is_marked(&self) -> bool {
        self.marked
    }
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    object: Option<HeapObject>,
}

/// Object arena owning every live object.
///
/// Graph edges between objects are handles, so releasing an object never
/// leaves a dangling pointer: a stale handle simply stops resolving.
#[derive(Debug, Default)]
pub struct Heap {
    /// Object storage, indexed by `ObjectRef::index`
    slots: Vec<Slot>,
    /// Vacant slot indices available for reuse
    free_list: Vec<u32>,
    /// Head of the owned-list
    first_object: Option<u32>,
    /// Number of objects on the owned-list
    len: usize,
}

impl Heap {
    /// Creates an empty heap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` and links it at the head of the owned-list.
    ///
    /// The new object starts unmarked.
    ///
    /// # Errors
    ///
    /// Returns `AllocationFailure` when the host allocator refuses to grow
    /// the slot vector or the slot index space is exhausted.
    pub fn insert(&mut self, value: Value) -> GcResult<ObjectRef> {
        let object = HeapObject {
            value,
            marked: false,
            arena_next: self.first_object,
        };

        let index = match self.free_list.pop() {
            Some(index) => index,
            None => {
                let exhausted = GcError::AllocationFailure {
                    live: self.len,
                    limit: None,
                };
                let index = u32::try_from(self.slots.len()).map_err(|_| exhausted.clone())?;
                self.slots.try_reserve(1).map_err(|_| exhausted)?;
                self.slots.push(Slot {
                    generation: 0,
                    object: None,
                });
                index
            }
        };

        let slot = &mut self.slots[index as usize];
        slot.object = Some(object);
        self.first_object = Some(index);
        self.len += 1;
        Ok(ObjectRef::new(index, slot.generation))
    }

    /// Returns the object named by `obj`, if it is still live.
    pub fn get(&self, obj: ObjectRef) -> Option<&HeapObject> {
        let slot = self.slots.get(obj.index() as usize)?;
        if slot.generation != obj.generation() {
            return None;
        }
        slot.object.as_ref()
    }

    /// Returns the value of the object named by `obj`, if it is still live.
    pub fn value(&self, obj: ObjectRef) -> Option<&Value> {
        self.get(obj).map(HeapObject::value)
    }

    /// Checks whether `obj` names a live object.
    pub fn contains(&self, obj: ObjectRef) -> bool {
        self.get(obj).is_some()
    }

    /// Returns the number of live objects.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if no objects are live.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the most recently allocated live object.
    pub fn first_object(&self) -> Option<ObjectRef> {
        self.first_object.map(|index| self.handle_at(index))
    }

    /// Iterates the owned-list, most recent allocation first.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            heap: self,
            cursor: self.first_object,
        }
    }

    /// Sets the mark bit of `obj`.
    ///
    /// Returns true only when the object was live and previously unmarked.
    pub(crate) fn mark(&mut self, obj: ObjectRef) -> bool {
        let Some(slot) = self.slots.get_mut(obj.index() as usize) else {
            return false;
        };
        if slot.generation != obj.generation() {
            return false;
        }
        match slot.object.as_mut() {
            Some(object) if !object.marked => {
                object.marked = true;
                true
            }
            _ => false,
        }
    }

    /// Head slot of the owned-list.
    pub(crate) fn first_index(&self) -> Option<u32> {
        self.first_object
    }

    /// Object occupying `index`, for owned-list walks.
    pub(crate) fn object_at_mut(&mut self, index: u32) -> Option<&mut HeapObject> {
        self.slots.get_mut(index as usize)?.object.as_mut()
    }

    /// Makes `next` follow `prev` on the owned-list (`prev == None` means
    /// the list head).
    pub(crate) fn relink(&mut self, prev: Option<u32>, next: Option<u32>) {
        match prev {
            None => self.first_object = next,
            Some(prev) => {
                if let Some(object) = self.object_at_mut(prev) {
                    object.arena_next = next;
                }
            }
        }
    }

    /// Frees the object in `index`. The caller must already have unlinked it.
    ///
    /// Bumps the slot generation so every outstanding handle goes stale.
    pub(crate) fn release(&mut self, index: u32) {
        let Some(slot) = self.slots.get_mut(index as usize) else {
            return;
        };
        if slot.object.take().is_some() {
            slot.generation = slot.generation.wrapping_add(1);
            self.free_list.push(index);
            self.len -= 1;
        }
    }

    fn handle_at(&self, index: u32) -> ObjectRef {
        let generation = self
            .slots
            .get(index as usize)
            .map_or(0, |slot| slot.generation);
        ObjectRef::new(index, generation)
    }
}

/// Iterator over the owned-list.
pub struct Iter<'a> {
    heap: &'a Heap,
    cursor: Option<u32>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (ObjectRef, &'a HeapObject);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.cursor?;
        let slot = self.heap.slots.get(index as usize)?;
        let object = slot.object.as_ref()?;
        self.cursor = object.arena_next;
        Some((ObjectRef::new(index, slot.generation), object))
    }
}
