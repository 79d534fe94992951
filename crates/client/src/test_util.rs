use protocol::{codec::Decode, Reader};

use crate::{conn::PacketWrite, error::SessionError};

/// Records written packets.
#[derive(Default)]
pub struct Sink {
    pub packets: Vec<(i32, Vec<u8>)>,
}

impl Sink {
    pub fn ids(&self) -> Vec<i32> {
        self.packets.iter().map(|(id, _)| *id).collect()
    }

    /// Decodes the first field of the `index`th packet.
    pub fn field<T: Decode>(&self, index: usize) -> T {
        Reader::new(&self.packets[index].1).read().unwrap()
    }
}

impl PacketWrite for Sink {
    fn write_raw(&mut self, id: i32, body: &[u8]) -> Result<(), SessionError> {
        self.packets.push((id, body.to_vec()));
        Ok(())
    }
}
