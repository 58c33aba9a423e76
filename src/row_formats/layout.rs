//! Where things live inside a row: the null bitmap, then one word per field, then the
//! variable length payloads.
use crate::constants::{BITS_PER_WORD, WORD_SIZE};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RowLayout {
    num_fields: usize,
    bit_set_width_in_bytes: usize,
}

impl RowLayout {
    pub fn new(num_fields: usize) -> RowLayout {
        RowLayout {
            num_fields,
            bit_set_width_in_bytes: RowLayout::calculate_bit_set_width_in_bytes(num_fields),
        }
    }

    /// Null tracking width, rounded up to whole words.
    pub fn calculate_bit_set_width_in_bytes(num_fields: usize) -> usize {
        ((num_fields + BITS_PER_WORD - 1) / BITS_PER_WORD) * WORD_SIZE
    }

    pub fn num_fields(&self) -> usize {
        self.num_fields
    }

    pub fn bit_set_width_in_bytes(&self) -> usize {
        self.bit_set_width_in_bytes
    }

    pub fn fixed_region_size(&self) -> usize {
        self.num_fields * WORD_SIZE
    }

    /// Bytes taken by the bitmap and fixed region, where the variable length region starts.
    pub fn fixed_length_size(&self) -> usize {
        self.bit_set_width_in_bytes + self.fixed_region_size()
    }

    pub fn field_offset(&self, base_offset: usize, ordinal: usize) -> usize {
        base_offset + self.bit_set_width_in_bytes + ordinal * WORD_SIZE
    }
}
