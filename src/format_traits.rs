mod encoded_size;
pub use encoded_size::ConstEncodedSize;
pub use encoded_size::SelfEncodedSize;

mod serializable;
pub use serializable::Serializable;
