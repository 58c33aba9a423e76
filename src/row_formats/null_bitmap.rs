//! Null tracking bits at the front of a row. Bit `i` lives in word `i / 64`, counted
//! from the least significant bit of that little endian word.
use crate::constants::{BITS_PER_WORD, WORD_SIZE};
use crate::memory::platform;

pub struct NullBitmap {}

impl NullBitmap {
    fn word_offset(base_offset: usize, index: usize) -> usize {
        base_offset + (index / BITS_PER_WORD) * WORD_SIZE
    }

    fn mask(index: usize) -> i64 {
        1i64 << (index % BITS_PER_WORD)
    }

    pub fn set(data: &mut [u8], base_offset: usize, index: usize) {
        let offset = NullBitmap::word_offset(base_offset, index);
        let word = platform::get_long(data, offset);
        platform::put_long(data, offset, word | NullBitmap::mask(index));
    }

    pub fn unset(data: &mut [u8], base_offset: usize, index: usize) {
        let offset = NullBitmap::word_offset(base_offset, index);
        let word = platform::get_long(data, offset);
        platform::put_long(data, offset, word & !NullBitmap::mask(index));
    }

    pub fn is_set(data: &[u8], base_offset: usize, index: usize) -> bool {
        let offset = NullBitmap::word_offset(base_offset, index);
        platform::get_long(data, offset) & NullBitmap::mask(index) != 0
    }

    /// Checks whole words rather than single bits.
    pub fn any_set(data: &[u8], base_offset: usize, word_count: usize) -> bool {
        (0..word_count).any(|i| platform::get_long(data, base_offset + i * WORD_SIZE) != 0)
    }
}
