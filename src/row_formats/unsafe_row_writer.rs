//! Builds rows, including the variable length payloads that can not be written in place
//! once a row exists.
//!
//! Fixed width values get their whole word zeroed before being written, payloads are
//! appended in write order and padded to a word. Each variable length field should be
//! written once per row, writing it again leaves the earlier payload behind as dead bytes.
use super::layout::RowLayout;
use super::null_bitmap::NullBitmap;
use super::var_len;
use super::{UnsafeRow, UnsafeRowError};
use crate::format_traits::Serializable;
use crate::memory::{platform, MemoryRegion};
use crate::types::{CalendarInterval, DataType, Decimal, Utf8String, Value};
use bytes::{Bytes, BytesMut};

pub struct UnsafeRowWriter {
    layout: RowLayout,
    buffer: BytesMut,
}

impl UnsafeRowWriter {
    pub fn new(num_fields: usize) -> UnsafeRowWriter {
        let mut writer = UnsafeRowWriter {
            layout: RowLayout::new(num_fields),
            buffer: BytesMut::new(),
        };
        writer.reset();
        writer
    }

    /// Drops anything written so far and starts a fresh row with every field non null and zero.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.buffer.resize(self.layout.fixed_length_size(), 0);
    }

    pub fn num_fields(&self) -> usize {
        self.layout.num_fields()
    }

    /// Bytes written for the current row so far.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    fn assert_index_is_valid(&self, ordinal: usize) {
        assert!(
            ordinal < self.layout.num_fields(),
            "ordinal ({}) should be < {}",
            ordinal,
            self.layout.num_fields()
        );
    }

    /// Clears the null bit and zeroes the field word, returning the word's offset.
    fn prepare_field(&mut self, ordinal: usize) -> usize {
        self.assert_index_is_valid(ordinal);
        let offset = self.layout.field_offset(0, ordinal);
        NullBitmap::unset(&mut self.buffer, 0, ordinal);
        platform::put_long(&mut self.buffer, offset, 0);
        offset
    }

    pub fn set_null_at(&mut self, ordinal: usize) {
        self.assert_index_is_valid(ordinal);
        let offset = self.layout.field_offset(0, ordinal);
        NullBitmap::set(&mut self.buffer, 0, ordinal);
        platform::put_long(&mut self.buffer, offset, 0);
    }

    pub fn write_boolean(&mut self, ordinal: usize, value: bool) {
        let offset = self.prepare_field(ordinal);
        platform::put_boolean(&mut self.buffer, offset, value);
    }

    pub fn write_byte(&mut self, ordinal: usize, value: i8) {
        let offset = self.prepare_field(ordinal);
        platform::put_byte(&mut self.buffer, offset, value);
    }

    pub fn write_short(&mut self, ordinal: usize, value: i16) {
        let offset = self.prepare_field(ordinal);
        platform::put_short(&mut self.buffer, offset, value);
    }

    pub fn write_int(&mut self, ordinal: usize, value: i32) {
        let offset = self.prepare_field(ordinal);
        platform::put_int(&mut self.buffer, offset, value);
    }

    pub fn write_long(&mut self, ordinal: usize, value: i64) {
        let offset = self.prepare_field(ordinal);
        platform::put_long(&mut self.buffer, offset, value);
    }

    pub fn write_float(&mut self, ordinal: usize, value: f32) {
        let value = if value.is_nan() { f32::NAN } else { value };
        let offset = self.prepare_field(ordinal);
        platform::put_float(&mut self.buffer, offset, value);
    }

    pub fn write_double(&mut self, ordinal: usize, value: f64) {
        let value = if value.is_nan() { f64::NAN } else { value };
        let offset = self.prepare_field(ordinal);
        platform::put_double(&mut self.buffer, offset, value);
    }

    pub fn write_date(&mut self, ordinal: usize, days: i32) {
        self.write_int(ordinal, days)
    }

    pub fn write_timestamp(&mut self, ordinal: usize, micros: i64) {
        self.write_long(ordinal, micros)
    }

    fn write_payload(&mut self, ordinal: usize, bytes: &[u8]) {
        let offset = self.prepare_field(ordinal);
        let row_offset = self.buffer.len();
        let word = var_len::append_payload(&mut self.buffer, row_offset, bytes);
        platform::put_long(&mut self.buffer, offset, word as i64);
    }

    pub fn write_binary(&mut self, ordinal: usize, value: &[u8]) {
        self.write_payload(ordinal, value);
    }

    pub fn write_string(&mut self, ordinal: usize, value: &str) {
        self.write_payload(ordinal, value.as_bytes());
    }

    pub fn write_utf8_string(&mut self, ordinal: usize, value: &Utf8String) {
        self.write_payload(ordinal, value.as_bytes());
    }

    pub fn write_interval(&mut self, ordinal: usize, value: &CalendarInterval) {
        let mut encoded = BytesMut::new();
        value.serialize(&mut encoded);
        self.write_payload(ordinal, &encoded);
    }

    /// Stores the value at the column's precision and scale. Columns narrow enough for a
    /// long keep it in the field word, wider ones get a big endian payload.
    pub fn write_decimal(
        &mut self,
        ordinal: usize,
        value: &Decimal,
        precision: u8,
        scale: u8,
    ) -> Result<(), UnsafeRowError> {
        self.assert_index_is_valid(ordinal);
        let value = value.to_precision(precision, scale)?;
        if Decimal::fits_in_long(precision) {
            match value.to_unscaled_long() {
                Some(unscaled) => self.write_long(ordinal, unscaled),
                None => return Err(UnsafeRowError::DecimalPrecisionTooWide(precision)),
            }
        } else {
            let encoded = var_len::encode_decimal_bytes(value.unscaled());
            self.write_payload(ordinal, &encoded);
        }
        Ok(())
    }

    /// Embeds a complete row as a nested struct field.
    pub fn write_struct<R: MemoryRegion>(&mut self, ordinal: usize, value: &UnsafeRow<R>) {
        self.write_payload(ordinal, value.as_bytes());
    }

    /// Writes a value into a column of the given type, the value must match it.
    pub fn write_value(
        &mut self,
        ordinal: usize,
        data_type: &DataType,
        value: &Value,
    ) -> Result<(), UnsafeRowError> {
        assert!(
            value.type_matches(data_type),
            "ordinal ({}) of type {} can not hold {}",
            ordinal,
            data_type,
            value
        );

        match (value, data_type) {
            (Value::Null, _) => self.set_null_at(ordinal),
            (Value::Boolean(v), _) => self.write_boolean(ordinal, *v),
            (Value::Byte(v), _) => self.write_byte(ordinal, *v),
            (Value::Short(v), _) => self.write_short(ordinal, *v),
            (Value::Integer(v), _) => self.write_int(ordinal, *v),
            (Value::Long(v), _) => self.write_long(ordinal, *v),
            (Value::Float(v), _) => self.write_float(ordinal, *v),
            (Value::Double(v), _) => self.write_double(ordinal, *v),
            (Value::Decimal(v), DataType::Decimal { precision, scale }) => {
                return self.write_decimal(ordinal, v, *precision, *scale);
            }
            (Value::Date(v), _) => self.write_date(ordinal, *v),
            (Value::Timestamp(v), _) => self.write_timestamp(ordinal, *v),
            (Value::Binary(v), _) => self.write_binary(ordinal, v),
            (Value::String(v), _) => self.write_utf8_string(ordinal, v),
            (Value::CalendarInterval(v), _) => self.write_interval(ordinal, v),
            (Value::Struct(v), _) => self.write_struct(ordinal, v),
            (_, _) => panic!("ordinal ({}) can not be written with {}", ordinal, value),
        }
        Ok(())
    }

    /// Hands back the finished row bytes and starts a new row.
    pub fn finish(&mut self) -> Bytes {
        let row = self.buffer.split().freeze();
        self.reset();
        row
    }

    /// Finishes the row and binds a view over it.
    pub fn finish_row(&mut self) -> UnsafeRow<Bytes> {
        let num_fields = self.num_fields();
        let row = self.finish();
        let size = row.len();
        UnsafeRow::bound(row, 0, num_fields, size)
    }
}
