/// Provides the expected size of the serialized form so space can be reserved up front.

pub trait ConstEncodedSize {
    fn encoded_size() -> usize;
}

pub trait SelfEncodedSize {
    fn encoded_size(&self) -> usize;
}
