#![no_main]
use libfuzzer_sys::fuzz_target;
use protocol::chunk::decode_chunk_column;

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    let mask = i32::from(u16::from_be_bytes([data[0], data[1]]));
    let _ = decode_chunk_column(mask, &data[2..]);
});
