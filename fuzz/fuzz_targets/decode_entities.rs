#![no_main]

use html::decode_entities;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let decoded = decode_entities(data);
    assert!(decoded.len() <= data.len(), "decoding grew the input");
});
