//! Collector configuration.
//!
//! The defaults reproduce the reference behavior: a 256-slot root stack and
//! a first collection once 10 objects are live, with the trigger point
//! doubling from the surviving object count after every cycle.

/// Capacity of the VM root stack.
pub const STACK_MAX: usize = 256;

/// Live-object count that triggers the first collection.
pub const INITIAL_GC_THRESHOLD: usize = 10;

/// Multiplier applied to the surviving object count after a collection.
pub const DEFAULT_GROWTH_FACTOR: usize = 2;

/// Configuration for the allocator and threshold policy.
///
/// Fixed when the VM is created; there is no way to change it afterwards.
///
/// # Example
///
/// ```
/// use memory_manager::GcConfig;
///
/// // Cap the heap to exercise allocation failure
/// let config = GcConfig {
///     max_heap_objects: Some(64),
///     ..Default::default()
/// };
/// assert_eq!(config.next_threshold(5), 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GcConfig {
    /// Threshold before the first collection, and the fallback after a
    /// collection that leaves nothing alive
    pub initial_threshold: usize,
    /// Threshold after a collection is `live * growth_factor`
    pub growth_factor: usize,
    /// Hard cap on live objects (None = bounded only by the host allocator)
    pub max_heap_objects: Option<usize>,
}

impl Default for GcConfig {
    fn default() -> Self {
        GcConfig {
            initial_threshold: INITIAL_GC_THRESHOLD,
            growth_factor: DEFAULT_GROWTH_FACTOR,
            max_heap_objects: None,
        }
    }
}

impl GcConfig {
    /// Computes the collection threshold after a cycle leaves `live` objects.
    ///
    /// An empty heap falls back to the initial threshold so the VM does not
    /// collect on every following allocation. The result is never zero.
    pub fn next_threshold(&self, live: usize) -> usize {
        let next = if live == 0 {
            self.initial_threshold
        } else {
            live.saturating_mul(self.growth_factor)
        };
        next.max(1)
    }

    /// Threshold before the first collection, never zero.
    pub fn first_threshold(&self) -> usize {
        self.initial_threshold.max(1)
    }
}
