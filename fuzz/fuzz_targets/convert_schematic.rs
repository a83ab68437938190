#![no_main]
use libfuzzer_sys::fuzz_target;

use sch2bob::bob::to_bob;
use sch2bob::de::from_bytes;

fuzz_target!(|data: &[u8]| {
    if let Ok(root) = from_bytes(data) {
        let _ = to_bob(&root);
    }
});
