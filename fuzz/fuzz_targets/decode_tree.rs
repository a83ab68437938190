#![no_main]
use libfuzzer_sys::fuzz_target;

use sch2bob::de::{from_bytes_with_opts, DecodeOpts};

fuzz_target!(|data: &[u8]| {
    if let Ok(root) = from_bytes_with_opts(data, DecodeOpts::new().max_seq_len(1 << 16)) {
        let _ = root.find("Blocks");
    }
});
