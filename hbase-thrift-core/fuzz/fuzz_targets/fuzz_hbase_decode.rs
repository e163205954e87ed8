#![no_main]

use hbase_thrift::{TGet, TMutation, TPut, TResult, TScan};
use hbase_thrift_core::ThriftValue;
use libfuzzer_sys::fuzz_target;

fn check<T: ThriftValue + PartialEq + std::fmt::Debug>(data: &[u8]) {
    if let Ok(value) = T::from_bytes(data) {
        let encoded = value.to_bytes().expect("decoded record must re-encode");
        let again = T::from_bytes(&encoded).expect("re-encoded record must decode");
        assert_eq!(value, again);
    }
}

fuzz_target!(|data: &[u8]| {
    check::<TGet>(data);
    check::<TPut>(data);
    check::<TScan>(data);
    check::<TResult>(data);
    check::<TMutation>(data);
});
