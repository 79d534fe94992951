#![no_main]
use libfuzzer_sys::fuzz_target;
use protocol::{LoginPacket, RawPacket, ServerPacket};

fuzz_target!(|data: &[u8]| {
    if let Some((&id, body)) = data.split_first() {
        let raw = RawPacket::new(i32::from(id), body.to_vec());
        let _ = ServerPacket::decode(&raw);
        let _ = LoginPacket::decode(&raw);
    }
});
