mod row_settings;
pub use row_settings::BITS_PER_WORD;
pub use row_settings::HASH_SEED;
pub use row_settings::MAX_DECIMAL_PRECISION;
pub use row_settings::MAX_LONG_DIGITS;
pub use row_settings::PAGE_SIZE;
pub use row_settings::WORD_SIZE;
pub use row_settings::WRITE_BUFFER_SIZE;
