//! Decoding must not reserve memory far beyond the size of its input.
//!
//! A tracking global allocator records the largest single allocation made
//! while decoding payloads whose container headers declare huge counts.

use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use hbase_thrift::core::GenericStruct;
use hbase_thrift::service::GetMultipleArgs;
use hbase_thrift::{ThriftError, ThriftValue};

struct TrackingAllocator;

static LARGEST_ALLOCATION: AtomicUsize = AtomicUsize::new(0);

unsafe impl GlobalAlloc for TrackingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        LARGEST_ALLOCATION.fetch_max(layout.size(), Ordering::Relaxed);
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        LARGEST_ALLOCATION.fetch_max(new_size, Ordering::Relaxed);
        System.realloc(ptr, layout, new_size)
    }
}

#[global_allocator]
static GLOBAL: TrackingAllocator = TrackingAllocator;

/// Serializes the tests so one test's allocations do not show up in another's peak.
static SERIAL: Mutex<()> = Mutex::new(());

/// Runs `decode` and returns the largest single allocation it made.
fn largest_allocation_during(decode: impl FnOnce()) -> usize {
    LARGEST_ALLOCATION.store(0, Ordering::SeqCst);
    decode();
    LARGEST_ALLOCATION.load(Ordering::SeqCst)
}

/// `getMultiple_args` with a `tgets` list header declaring `count` structs,
/// followed by `count` stop bytes.
fn get_multiple_with_declared_count(count: usize) -> Vec<u8> {
    let mut data = vec![11, 0, 1, 0, 0, 0, 1, b't'];
    data.extend_from_slice(&[15, 0, 2, 12]);
    data.extend_from_slice(&(count as i32).to_be_bytes());
    data.resize(data.len() + count, 0);
    data.push(0);
    data
}

#[test]
fn test_struct_list_reservation_bounded_by_input() {
    let _guard = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    let data = get_multiple_with_declared_count(1_000_000);

    let mut result = None;
    let largest = largest_allocation_during(|| {
        result = Some(GetMultipleArgs::from_bytes(&data));
    });

    // every element is an empty TGet, which lacks its required row
    assert!(result.unwrap().is_err());
    assert!(
        largest <= data.len(),
        "input of {} bytes caused a {} byte allocation",
        data.len(),
        largest
    );
}

#[test]
fn test_string_list_count_checked_against_string_size() {
    let _guard = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    // field 1: list<string> declaring 1M strings with only 1M bytes behind
    // it; each string needs at least its four-byte length
    let count = 1_000_000usize;
    let mut data = vec![15, 0, 1, 11];
    data.extend_from_slice(&(count as i32).to_be_bytes());
    data.resize(data.len() + count, 0);

    let mut result = None;
    let largest = largest_allocation_during(|| {
        result = Some(GenericStruct::from_bytes(&data));
    });

    let err = result.unwrap().unwrap_err();
    assert!(matches!(err, ThriftError::Transport(_)), "unexpected error: {err}");
    assert!(largest <= data.len());
}
