//! Collector statistics.

use crate::gc::CollectionReport;

/// Running totals of allocation and collection activity for one VM.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GcStats {
    /// Number of completed collection cycles
    pub collections: usize,
    /// Total objects allocated
    pub objects_allocated: usize,
    /// Total objects released by sweeps
    pub objects_freed: usize,
    /// Objects marked by the most recent cycle
    pub last_marked: usize,
    /// Highest live-object count observed
    pub peak_live: usize,
}

impl GcStats {
    /// Records an allocation that left `live` objects on the heap.
    pub fn record_allocation(&mut self, live: usize) {
        self.objects_allocated += 1;
        self.peak_live = self.peak_live.max(live);
    }

    /// Records a finished collection cycle.
    pub fn record_collection(&mut self, report: &CollectionReport) {
        self.collections += 1;
        self.objects_freed += report.freed;
        self.last_marked = report.marked;
    }
}
