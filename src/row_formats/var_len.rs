//! Payloads that do not fit in a field word. The word instead holds the payload's offset
//! from the start of the row in its high 32 bits and the payload length in its low 32 bits.
//!
//! Payloads are padded with zeros out to a whole word, the stored length excludes the padding.
use crate::constants::WORD_SIZE;
use crate::format_traits::ConstEncodedSize;
use crate::memory::platform;
use crate::types::CalendarInterval;
use bytes::{BufMut, Bytes};
use std::mem::size_of;

const LENGTH_MASK: u64 = (1u64 << 32) - 1;

pub fn pack_offset_and_size(offset: usize, size: usize) -> u64 {
    assert!(
        offset <= u32::MAX as usize,
        "offset ({}) does not fit in 32 bits",
        offset
    );
    assert!(
        size <= u32::MAX as usize,
        "size ({}) does not fit in 32 bits",
        size
    );
    ((offset as u64) << 32) | size as u64
}

pub fn unpack_offset_and_size(word: u64) -> (usize, usize) {
    ((word >> 32) as usize, (word & LENGTH_MASK) as usize)
}

/// Rounds a payload length up to the next word boundary.
pub fn round_to_word(size: usize) -> usize {
    (size + WORD_SIZE - 1) / WORD_SIZE * WORD_SIZE
}

/// Resolves a packed word against the row starting at `base_offset`.
pub fn payload(data: &[u8], base_offset: usize, word: u64) -> &[u8] {
    let (offset, size) = unpack_offset_and_size(word);
    let start = base_offset + offset;
    &data[start..start + size]
}

/// Appends a payload with its word padding, the caller records the returned packed word.
pub fn append_payload(buffer: &mut impl BufMut, row_offset: usize, bytes: &[u8]) -> u64 {
    let word = pack_offset_and_size(row_offset, bytes.len());
    buffer.put_slice(bytes);
    buffer.put_bytes(0, round_to_word(bytes.len()) - bytes.len());
    word
}

pub fn decode_interval(bytes: &[u8]) -> CalendarInterval {
    assert!(
        bytes.len() >= CalendarInterval::encoded_size(),
        "interval payload is {} bytes, need {}",
        bytes.len(),
        CalendarInterval::encoded_size()
    );
    let months = platform::get_long(bytes, 0) as i32;
    let microseconds = platform::get_long(bytes, size_of::<i64>());
    CalendarInterval::new(months, microseconds)
}

/// Smallest big endian two's complement form of an unscaled decimal.
pub fn encode_decimal_bytes(unscaled: i128) -> Bytes {
    let full = unscaled.to_be_bytes();
    let mut start = 0;
    while start < full.len() - 1 {
        let redundant = (full[start] == 0x00 && full[start + 1] & 0x80 == 0)
            || (full[start] == 0xff && full[start + 1] & 0x80 != 0);
        if !redundant {
            break;
        }
        start += 1;
    }
    Bytes::copy_from_slice(&full[start..])
}

pub fn decode_decimal_bytes(bytes: &[u8]) -> i128 {
    assert!(
        bytes.len() <= size_of::<i128>(),
        "decimal payload of {} bytes is wider than 128 bits",
        bytes.len()
    );
    if bytes.is_empty() {
        return 0;
    }

    let fill = if bytes[0] & 0x80 != 0 { 0xff } else { 0x00 };
    let mut full = [fill; size_of::<i128>()];
    full[size_of::<i128>() - bytes.len()..].copy_from_slice(bytes);
    i128::from_be_bytes(full)
}
