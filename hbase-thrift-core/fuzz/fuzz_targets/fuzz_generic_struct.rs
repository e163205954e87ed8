#![no_main]

use hbase_thrift_core::{GenericStruct, ThriftValue};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(value) = GenericStruct::from_bytes(data) {
        let _ = value.field_count();
        for (_, field) in value.iter() {
            let _ = field.ttype();
            let _ = field.as_i64();
            let _ = field.as_binary();
            let _ = field.as_struct();
        }

        // Anything that decodes must re-encode and decode again.
        let encoded = value.to_bytes().expect("decoded struct must re-encode");
        GenericStruct::from_bytes(&encoded).expect("re-encoded struct must decode");
    }
});
