//! VM and Collector Integration Tests
//!
//! Drives allocation, the root stack and collection together through `Vm`.

use core_types::{GcError, Value};
use memory_manager::{Vm, INITIAL_GC_THRESHOLD, STACK_MAX};

/// Test: two scalars combine into a composite with head = first push
#[test]
fn test_combine_pair_scenario() {
    let mut vm = Vm::new();
    let one = vm.push_scalar(1).unwrap();
    let two = vm.push_scalar(2).unwrap();

    let pair = vm.push_composite().unwrap();

    let Some(&Value::Composite { head, tail }) = vm.get(pair) else {
        panic!("expected a composite");
    };
    assert_eq!(vm.get(head), Some(&Value::Scalar(1)));
    assert_eq!(vm.get(tail), Some(&Value::Scalar(2)));
    assert_eq!((head, tail), (one, two));
    assert_eq!(vm.live_object_count(), 3);
    assert_eq!(vm.stack_depth(), 1);
}

/// Test: the allocation past the threshold collects first, and rooted
/// objects all survive
#[test]
fn test_threshold_collection_scenario() {
    let mut vm = Vm::new();
    for n in 0..INITIAL_GC_THRESHOLD as i64 {
        vm.push_scalar(n).unwrap();
    }
    assert_eq!(vm.stats().collections, 0);

    vm.push_scalar(INITIAL_GC_THRESHOLD as i64).unwrap();

    assert_eq!(vm.stats().collections, 1);
    assert_eq!(vm.stats().objects_freed, 0);
    assert_eq!(vm.live_object_count(), INITIAL_GC_THRESHOLD + 1);
    // Ten objects survived the cycle, which ran before the eleventh existed.
    assert_eq!(vm.threshold(), 2 * INITIAL_GC_THRESHOLD);
}

/// Test: an explicitly collected VM keeps only its rooted object
#[test]
fn test_pop_then_collect_scenario() {
    let mut vm = Vm::new();
    let kept = vm.push_scalar(1).unwrap();
    let dropped = vm.push_scalar(2).unwrap();
    assert_eq!(vm.pop(), Ok(dropped));

    let report = vm.collect();

    assert_eq!(report.freed, 1);
    assert_eq!(vm.live_object_count(), 1);
    assert!(vm.get(kept).is_some());
    assert!(vm.get(dropped).is_none());
}

/// Test: nested composites keep their whole subgraph alive
#[test]
fn test_nested_composites_survive() {
    let mut vm = Vm::new();
    vm.push_scalar(1).unwrap();
    vm.push_scalar(2).unwrap();
    vm.push_composite().unwrap();
    vm.push_scalar(3).unwrap();
    vm.push_scalar(4).unwrap();
    vm.push_composite().unwrap();
    let root = vm.push_composite().unwrap();

    vm.push_scalar(99).unwrap();
    vm.pop().unwrap();
    let report = vm.collect();

    assert_eq!(report.freed, 1);
    assert_eq!(vm.live_object_count(), 7);
    assert_eq!(vm.stack(), &[root]);
}

/// Test: garbage produced in a loop is reclaimed and the heap stays bounded
#[test]
fn test_steady_state_garbage_is_bounded() {
    let mut vm = Vm::new();
    vm.push_scalar(0).unwrap();

    for n in 0..10_000 {
        vm.push_scalar(n).unwrap();
        vm.push_composite().unwrap();
        vm.pop().unwrap();
        vm.push_scalar(n).unwrap();
    }

    assert!(vm.stats().collections > 0);
    assert!(vm.live_object_count() <= vm.threshold());
    assert!(vm.threshold() <= 2 * INITIAL_GC_THRESHOLD);
}

/// Test: a full stack rejects both raw pushes and scalar allocation
#[test]
fn test_stack_overflow_is_rejected() {
    let mut vm = Vm::new();
    for n in 0..STACK_MAX as i64 {
        vm.push_scalar(n).unwrap();
    }
    let live = vm.live_object_count();

    assert_eq!(
        vm.push_scalar(0),
        Err(GcError::StackOverflow {
            capacity: STACK_MAX
        })
    );
    assert_eq!(vm.stack_depth(), STACK_MAX);
    assert_eq!(vm.live_object_count(), live);
}

/// Test: shutting down reclaims every object
#[test]
fn test_shutdown_reclaims_all() {
    let mut vm = Vm::new();
    for n in 0..25 {
        vm.push_scalar(n).unwrap();
    }
    let live = vm.live_object_count();

    let report = vm.shutdown();
    assert_eq!(report.freed, live);
    assert_eq!(report.live_after, 0);
}
