//! Sizes and magic numbers of the row format. Changing any of these changes the binary layout
//! other subsystems rely on, so treat them as part of the wire contract.

/// Every slot in the fixed region and every bitmap word is this many bytes.
pub const WORD_SIZE: usize = 8;

/// Bits tracked per null bitmap word.
pub const BITS_PER_WORD: usize = WORD_SIZE * 8;

/// Seed used when hashing a row's bytes.
pub const HASH_SEED: u32 = 42;

/// Largest decimal precision whose unscaled value always fits in an i64.
pub const MAX_LONG_DIGITS: u8 = 18;

/// Largest decimal precision supported at all, the unscaled value must fit in an i128.
pub const MAX_DECIMAL_PRECISION: u8 = 38;

/// Default size of the scratch buffer used to stream rows that are not plain heap arrays.
pub const WRITE_BUFFER_SIZE: usize = 4096;

/// Size of the pages handed out by the page allocator.
pub const PAGE_SIZE: usize = 4096;
