mod layout;
pub use layout::RowLayout;

mod murmur3;
pub use murmur3::hash_bytes;

mod null_bitmap;
pub use null_bitmap::NullBitmap;

mod unsafe_row;
pub use unsafe_row::UnsafeRow;
pub use unsafe_row::UnsafeRowError;

mod unsafe_row_writer;
pub use unsafe_row_writer::UnsafeRowWriter;

pub mod var_len;
