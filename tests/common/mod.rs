use bytes::Bytes;
use unsaferowlib::row_formats::UnsafeRowWriter;
use unsaferowlib::types::DataType;

pub fn hello_types() -> Vec<DataType> {
    vec![DataType::Integer, DataType::String, DataType::Double]
}

/// The int, "hello", null double row used across the tests.
pub fn hello_row(id: i32) -> Bytes {
    let mut writer = UnsafeRowWriter::new(3);
    writer.write_int(0, id);
    writer.write_string(1, "hello");
    writer.set_null_at(2);
    writer.finish()
}

/// A two field row: an int and a nested struct of two ints.
pub fn nested_row(outer: i32, left: i32, right: i32) -> Bytes {
    let mut inner = UnsafeRowWriter::new(2);
    inner.write_int(0, left);
    inner.write_int(1, right);
    let inner = inner.finish_row();

    let mut writer = UnsafeRowWriter::new(2);
    writer.write_int(0, outer);
    writer.write_struct(1, &inner);
    writer.finish()
}
