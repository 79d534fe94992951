#![no_main]
use libfuzzer_sys::fuzz_target;
use protocol::FrameReader;

fuzz_target!(|data: &[u8]| {
    let mut frames = FrameReader::new();
    frames.extend(data);
    while let Ok(Some(_)) = frames.next_frame() {}
});
