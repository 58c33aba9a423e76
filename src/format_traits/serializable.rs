//! Serializes a given struct to a given BufMut

use bytes::{BufMut, Bytes, BytesMut};

use super::SelfEncodedSize;

pub trait Serializable {
    /// Transforms the structure to a byte stream
    fn serialize(&self, buffer: &mut impl BufMut);

    /// Serializes into a buffer sized exactly for the encoding
    fn serialize_to_bytes(&self) -> Bytes
    where
        Self: SelfEncodedSize,
    {
        let mut buffer = BytesMut::with_capacity(self.encoded_size());
        self.serialize(&mut buffer);
        buffer.freeze()
    }
}
