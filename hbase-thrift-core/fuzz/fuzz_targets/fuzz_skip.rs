#![no_main]

use hbase_thrift_core::{ProtocolConfig, TBinaryInputProtocol, TInputProtocol, TType};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&tag, rest)) = data.split_first() else {
        return;
    };
    let Ok(ttype) = TType::from_u8(tag) else {
        return;
    };

    let config = ProtocolConfig::builder()
        .max_string_size(1 << 16)
        .max_container_size(1 << 12)
        .recursion_limit(16)
        .build()
        .expect("valid fuzz limits");
    let mut input = TBinaryInputProtocol::with_config(rest, config);
    let _ = input.skip(ttype);
});
