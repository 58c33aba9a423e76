//! A row view that reads and writes fields directly in a byte region it does not own.
//!
//! Layout: `[null bitmap][one word per field][variable length payloads]`. The bitmap is
//! padded to whole words. Fixed width values sit in their field word, everything else
//! stores a packed offset and length pointing into the payload region (see `var_len`).
//!
//! A view starts unbound and can be rebound as many times as needed, the intended use is
//! one view per scan loop pointed at each row in turn. Only `copy` allocates.
//!
//! Bad ordinals, unbound access and in place writes of variable length values are caller
//! bugs and panic. Operations the format simply does not support return `UnsafeRowError`.
use super::layout::RowLayout;
use super::murmur3;
use super::null_bitmap::NullBitmap;
use super::var_len;
use crate::constants::{HASH_SEED, WORD_SIZE};
use crate::format_traits::{SelfEncodedSize, Serializable};
use crate::memory::{platform, MemoryRegion, MemoryRegionMut, RegionFlags};
use crate::types::{CalendarInterval, DataType, Decimal, DecimalError, Utf8String, Value};
use bytes::{BufMut, Bytes};
use std::cmp::min;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::io::{self, Write};
use thiserror::Error;

#[derive(Clone)]
pub struct UnsafeRow<R> {
    base_object: Option<R>,
    base_offset: usize,
    layout: RowLayout,
    size_in_bytes: usize,
}

impl<R> UnsafeRow<R> {
    /// Creates an unbound row, it can not be read until `bind` is called.
    pub fn new() -> UnsafeRow<R> {
        UnsafeRow {
            base_object: None,
            base_offset: 0,
            layout: RowLayout::default(),
            size_in_bytes: 0,
        }
    }

    pub fn is_bound(&self) -> bool {
        self.base_object.is_some()
    }

    /// Detaches the view, handing back the region it pointed at.
    pub fn unbind(&mut self) -> Option<R> {
        self.base_offset = 0;
        self.layout = RowLayout::default();
        self.size_in_bytes = 0;
        self.base_object.take()
    }

    pub fn base_object(&self) -> &R {
        match &self.base_object {
            Some(r) => r,
            None => panic!("row is not bound to a memory region"),
        }
    }

    pub fn base_offset(&self) -> usize {
        self.base_offset
    }

    pub fn num_fields(&self) -> usize {
        self.layout.num_fields()
    }

    pub fn size_in_bytes(&self) -> usize {
        self.size_in_bytes
    }

    fn assert_index_is_valid(&self, ordinal: usize) {
        assert!(self.is_bound(), "row is not bound to a memory region");
        assert!(
            ordinal < self.layout.num_fields(),
            "ordinal ({}) should be < {}",
            ordinal,
            self.layout.num_fields()
        );
    }

    fn field_offset(&self, ordinal: usize) -> usize {
        self.layout.field_offset(self.base_offset, ordinal)
    }
}

impl<R: MemoryRegion> UnsafeRow<R> {
    pub fn bound(
        base_object: R,
        base_offset: usize,
        num_fields: usize,
        size_in_bytes: usize,
    ) -> UnsafeRow<R> {
        let mut row = UnsafeRow::new();
        row.bind(base_object, base_offset, num_fields, size_in_bytes);
        row
    }

    /// Points this view at a different row. Only the bounds are checked, the contents are
    /// trusted to be a row of `num_fields` fields.
    pub fn bind(
        &mut self,
        base_object: R,
        base_offset: usize,
        num_fields: usize,
        size_in_bytes: usize,
    ) {
        let layout = RowLayout::new(num_fields);
        assert!(
            size_in_bytes >= layout.fixed_length_size(),
            "row of {} bytes can not hold {} fields",
            size_in_bytes,
            num_fields
        );
        assert!(
            base_offset
                .checked_add(size_in_bytes)
                .map_or(false, |end| end <= base_object.as_bytes().len()),
            "row at {} of {} bytes runs past the end of a {} byte region",
            base_offset,
            size_in_bytes,
            base_object.as_bytes().len()
        );

        self.base_object = Some(base_object);
        self.base_offset = base_offset;
        self.layout = layout;
        self.size_in_bytes = size_in_bytes;
    }

    fn data(&self) -> &[u8] {
        self.base_object().as_bytes()
    }

    /// The bytes of this row and nothing else.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data()[self.base_offset..self.base_offset + self.size_in_bytes]
    }

    pub fn is_null_at(&self, ordinal: usize) -> bool {
        self.assert_index_is_valid(ordinal);
        NullBitmap::is_set(self.data(), self.base_offset, ordinal)
    }

    pub fn any_null(&self) -> bool {
        NullBitmap::any_set(
            self.data(),
            self.base_offset,
            self.layout.bit_set_width_in_bytes() / WORD_SIZE,
        )
    }

    pub fn get_boolean(&self, ordinal: usize) -> bool {
        self.assert_index_is_valid(ordinal);
        platform::get_boolean(self.data(), self.field_offset(ordinal))
    }

    pub fn get_byte(&self, ordinal: usize) -> i8 {
        self.assert_index_is_valid(ordinal);
        platform::get_byte(self.data(), self.field_offset(ordinal))
    }

    pub fn get_short(&self, ordinal: usize) -> i16 {
        self.assert_index_is_valid(ordinal);
        platform::get_short(self.data(), self.field_offset(ordinal))
    }

    pub fn get_int(&self, ordinal: usize) -> i32 {
        self.assert_index_is_valid(ordinal);
        platform::get_int(self.data(), self.field_offset(ordinal))
    }

    pub fn get_long(&self, ordinal: usize) -> i64 {
        self.assert_index_is_valid(ordinal);
        platform::get_long(self.data(), self.field_offset(ordinal))
    }

    pub fn get_float(&self, ordinal: usize) -> f32 {
        self.assert_index_is_valid(ordinal);
        platform::get_float(self.data(), self.field_offset(ordinal))
    }

    pub fn get_double(&self, ordinal: usize) -> f64 {
        self.assert_index_is_valid(ordinal);
        platform::get_double(self.data(), self.field_offset(ordinal))
    }

    /// Days since the epoch
    pub fn get_date(&self, ordinal: usize) -> i32 {
        self.get_int(ordinal)
    }

    /// Microseconds since the epoch
    pub fn get_timestamp(&self, ordinal: usize) -> i64 {
        self.get_long(ordinal)
    }

    fn payload(&self, ordinal: usize) -> &[u8] {
        let word = self.get_long(ordinal) as u64;
        var_len::payload(self.data(), self.base_offset, word)
    }

    pub fn get_binary(&self, ordinal: usize) -> Option<Bytes> {
        if self.is_null_at(ordinal) {
            return None;
        }
        Some(Bytes::copy_from_slice(self.payload(ordinal)))
    }

    pub fn get_utf8_string(&self, ordinal: usize) -> Option<Utf8String> {
        self.get_binary(ordinal).map(Utf8String::from_bytes)
    }

    pub fn get_interval(&self, ordinal: usize) -> Option<CalendarInterval> {
        if self.is_null_at(ordinal) {
            return None;
        }
        let word = self.get_long(ordinal) as u64;
        let (offset, _) = var_len::unpack_offset_and_size(word);
        let start = self.base_offset + offset;
        Some(var_len::decode_interval(&self.data()[start..]))
    }

    pub fn get_decimal(&self, ordinal: usize, precision: u8, scale: u8) -> Option<Decimal> {
        if self.is_null_at(ordinal) {
            return None;
        }
        let unscaled = if Decimal::fits_in_long(precision) {
            self.get_long(ordinal) as i128
        } else {
            var_len::decode_decimal_bytes(self.payload(ordinal))
        };
        Some(Decimal::from_stored(unscaled, precision, scale))
    }

    /// A view of a nested row. It shares this row's region, nothing is copied.
    pub fn get_struct(&self, ordinal: usize, num_fields: usize) -> Option<UnsafeRow<&R>> {
        if self.is_null_at(ordinal) {
            return None;
        }
        let word = self.get_long(ordinal) as u64;
        let (offset, size) = var_len::unpack_offset_and_size(word);
        Some(UnsafeRow::bound(
            self.base_object(),
            self.base_offset + offset,
            num_fields,
            size,
        ))
    }

    pub fn get(&self, ordinal: usize, data_type: &DataType) -> Result<Value<'_>, UnsafeRowError> {
        if self.is_null_at(ordinal) || *data_type == DataType::Null {
            return Ok(Value::Null);
        }

        let value = match data_type {
            DataType::Null => Value::Null,
            DataType::Boolean => Value::Boolean(self.get_boolean(ordinal)),
            DataType::Byte => Value::Byte(self.get_byte(ordinal)),
            DataType::Short => Value::Short(self.get_short(ordinal)),
            DataType::Integer => Value::Integer(self.get_int(ordinal)),
            DataType::Long => Value::Long(self.get_long(ordinal)),
            DataType::Float => Value::Float(self.get_float(ordinal)),
            DataType::Double => Value::Double(self.get_double(ordinal)),
            DataType::Decimal { precision, scale } => {
                match self.get_decimal(ordinal, *precision, *scale) {
                    Some(d) => Value::Decimal(d),
                    None => Value::Null,
                }
            }
            DataType::Date => Value::Date(self.get_date(ordinal)),
            DataType::Timestamp => Value::Timestamp(self.get_timestamp(ordinal)),
            DataType::Binary => Value::Binary(Bytes::copy_from_slice(self.payload(ordinal))),
            DataType::String => Value::String(Utf8String::from_bytes(Bytes::copy_from_slice(
                self.payload(ordinal),
            ))),
            DataType::CalendarInterval => match self.get_interval(ordinal) {
                Some(i) => Value::CalendarInterval(i),
                None => Value::Null,
            },
            DataType::Struct(fields) => {
                let word = self.get_long(ordinal) as u64;
                let (offset, size) = var_len::unpack_offset_and_size(word);
                let region: &dyn MemoryRegion = self.base_object();
                Value::Struct(UnsafeRow::bound(
                    region,
                    self.base_offset + offset,
                    fields.len(),
                    size,
                ))
            }
            DataType::Array(_) | DataType::Map(_, _) => {
                warn!("Unable to read ordinal {} as {}", ordinal, data_type);
                return Err(UnsafeRowError::UnsupportedType(data_type.clone()));
            }
        };

        Ok(value)
    }

    /// Copies the row into its own buffer, the result outlives whatever backed this view.
    pub fn copy(&self) -> Result<UnsafeRow<Bytes>, UnsafeRowError> {
        if self.base_object().flags().contains(RegionFlags::OBJECT_POOL) {
            warn!("Unable to copy a row that references an object pool");
            return Err(UnsafeRowError::CopyOfPooledRow());
        }

        trace!("Copying row of {} bytes", self.size_in_bytes);
        let copy = Bytes::copy_from_slice(self.as_bytes());
        Ok(UnsafeRow::bound(copy, 0, self.num_fields(), self.size_in_bytes))
    }

    /// Writes the row to `out`. Rows in plain heap memory go out in one write, off heap rows
    /// are staged through `write_buffer` one chunk at a time.
    pub fn write_to(&self, out: &mut impl Write, write_buffer: &mut [u8]) -> io::Result<()> {
        let region = self.base_object();
        if !region.flags().contains(RegionFlags::OFF_HEAP) {
            return out.write_all(self.as_bytes());
        }

        assert!(
            !write_buffer.is_empty() || self.size_in_bytes == 0,
            "an off heap row needs a non empty write buffer"
        );
        trace!(
            "Writing off heap row of {} bytes in chunks of {}",
            self.size_in_bytes,
            write_buffer.len()
        );

        let mut read_position = self.base_offset;
        let mut data_remaining = self.size_in_bytes;
        while data_remaining > 0 {
            let to_transfer = min(write_buffer.len(), data_remaining);
            platform::copy_memory(
                region.as_bytes(),
                read_position,
                write_buffer,
                0,
                to_transfer,
            );
            out.write_all(&write_buffer[..to_transfer])?;
            read_position += to_transfer;
            data_remaining -= to_transfer;
        }
        Ok(())
    }

    /// Copies the row into already allocated memory, `target` must have room for it.
    pub fn write_to_memory(&self, target: &mut [u8], target_offset: usize) {
        platform::copy_memory(
            self.data(),
            self.base_offset,
            target,
            target_offset,
            self.size_in_bytes,
        );
    }

    /// The row's bytes, sharing the backing buffer when it is exactly this row.
    pub fn get_bytes(&self) -> Bytes {
        if let Some(shared) = self.base_object().as_shared() {
            if self.base_offset == 0 && shared.len() == self.size_in_bytes {
                return shared.clone();
            }
        }
        Bytes::copy_from_slice(self.as_bytes())
    }

    /// Seeded Murmur3 over the row bytes, consistent with equality.
    pub fn hash_code(&self) -> i32 {
        murmur3::hash_bytes(self.as_bytes(), HASH_SEED)
    }
}

impl<R: MemoryRegionMut> UnsafeRow<R> {
    fn data_mut(&mut self) -> &mut [u8] {
        match &mut self.base_object {
            Some(r) => r.as_bytes_mut(),
            None => panic!("row is not bound to a memory region"),
        }
    }

    fn set_not_null_at(&mut self, ordinal: usize) {
        self.assert_index_is_valid(ordinal);
        let base_offset = self.base_offset;
        NullBitmap::unset(self.data_mut(), base_offset, ordinal);
    }

    /// Marks the field null and zeroes its word so equal rows stay byte identical.
    pub fn set_null_at(&mut self, ordinal: usize) {
        self.assert_index_is_valid(ordinal);
        let base_offset = self.base_offset;
        let offset = self.field_offset(ordinal);
        let data = self.data_mut();
        NullBitmap::set(data, base_offset, ordinal);
        platform::put_long(data, offset, 0);
    }

    pub fn set_boolean(&mut self, ordinal: usize, value: bool) {
        self.set_not_null_at(ordinal);
        let offset = self.field_offset(ordinal);
        platform::put_boolean(self.data_mut(), offset, value);
    }

    pub fn set_byte(&mut self, ordinal: usize, value: i8) {
        self.set_not_null_at(ordinal);
        let offset = self.field_offset(ordinal);
        platform::put_byte(self.data_mut(), offset, value);
    }

    pub fn set_short(&mut self, ordinal: usize, value: i16) {
        self.set_not_null_at(ordinal);
        let offset = self.field_offset(ordinal);
        platform::put_short(self.data_mut(), offset, value);
    }

    pub fn set_int(&mut self, ordinal: usize, value: i32) {
        self.set_not_null_at(ordinal);
        let offset = self.field_offset(ordinal);
        platform::put_int(self.data_mut(), offset, value);
    }

    pub fn set_long(&mut self, ordinal: usize, value: i64) {
        self.set_not_null_at(ordinal);
        let offset = self.field_offset(ordinal);
        platform::put_long(self.data_mut(), offset, value);
    }

    /// NaN is stored as the single canonical NaN.
    pub fn set_float(&mut self, ordinal: usize, value: f32) {
        let value = if value.is_nan() { f32::NAN } else { value };
        self.set_not_null_at(ordinal);
        let offset = self.field_offset(ordinal);
        platform::put_float(self.data_mut(), offset, value);
    }

    /// NaN is stored as the single canonical NaN.
    pub fn set_double(&mut self, ordinal: usize, value: f64) {
        let value = if value.is_nan() { f64::NAN } else { value };
        self.set_not_null_at(ordinal);
        let offset = self.field_offset(ordinal);
        platform::put_double(self.data_mut(), offset, value);
    }

    pub fn set_date(&mut self, ordinal: usize, days: i32) {
        self.set_int(ordinal, days)
    }

    pub fn set_timestamp(&mut self, ordinal: usize, micros: i64) {
        self.set_long(ordinal, micros)
    }

    /// Only decimal columns whose precision fits in a long can be updated in place, wider
    /// ones live in the payload region which can not be resized. The value is rescaled to
    /// the column's precision and scale first.
    pub fn set_decimal(
        &mut self,
        ordinal: usize,
        value: Option<&Decimal>,
        precision: u8,
        scale: u8,
    ) -> Result<(), UnsafeRowError> {
        self.assert_index_is_valid(ordinal);
        let value = match value {
            Some(v) => v,
            None => {
                self.set_null_at(ordinal);
                return Ok(());
            }
        };

        if !Decimal::fits_in_long(precision) {
            warn!(
                "Unable to update ordinal {} in place, decimal precision {} is too wide",
                ordinal, precision
            );
            return Err(UnsafeRowError::DecimalPrecisionTooWide(precision));
        }

        let value = value.to_precision(precision, scale)?;
        match value.to_unscaled_long() {
            Some(unscaled) => {
                self.set_long(ordinal, unscaled);
                Ok(())
            }
            None => Err(UnsafeRowError::DecimalPrecisionTooWide(precision)),
        }
    }

    /// Updates a field of the given column type from a value. Columns that are not settable
    /// in place panic, use `UnsafeRowWriter` to build rows holding them.
    pub fn update(
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
            (Value::Decimal(d), DataType::Decimal { precision, scale }) => {
                return self.set_decimal(ordinal, Some(d), *precision, *scale);
            }
            (_, _) if !data_type.is_settable() => {
                panic!(
                    "ordinal ({}) of type {} can not be updated in place",
                    ordinal, data_type
                );
            }
            (Value::Boolean(v), _) => self.set_boolean(ordinal, *v),
            (Value::Byte(v), _) => self.set_byte(ordinal, *v),
            (Value::Short(v), _) => self.set_short(ordinal, *v),
            (Value::Integer(v), _) => self.set_int(ordinal, *v),
            (Value::Long(v), _) => self.set_long(ordinal, *v),
            (Value::Float(v), _) => self.set_float(ordinal, *v),
            (Value::Double(v), _) => self.set_double(ordinal, *v),
            (Value::Date(v), _) => self.set_date(ordinal, *v),
            (Value::Timestamp(v), _) => self.set_timestamp(ordinal, *v),
            (_, _) => panic!("ordinal ({}) can not be updated with {}", ordinal, value),
        }
        Ok(())
    }
}

impl<R> Default for UnsafeRow<R> {
    fn default() -> Self {
        Self::new()
    }
}

/// Rows are equal when their bytes are, two encodings of the same logical values that
/// differ in unused bytes compare unequal.
impl<R: MemoryRegion, S: MemoryRegion> PartialEq<UnsafeRow<S>> for UnsafeRow<R> {
    fn eq(&self, other: &UnsafeRow<S>) -> bool {
        match (self.is_bound(), other.is_bound()) {
            (true, true) => {
                self.size_in_bytes == other.size_in_bytes && self.as_bytes() == other.as_bytes()
            }
            (false, false) => true,
            _ => false,
        }
    }
}

impl<R: MemoryRegion> Eq for UnsafeRow<R> {}

impl<R: MemoryRegion> Hash for UnsafeRow<R> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_i32(self.hash_code());
    }
}

impl<R: MemoryRegion> SelfEncodedSize for UnsafeRow<R> {
    fn encoded_size(&self) -> usize {
        self.size_in_bytes
    }
}

impl<R: MemoryRegion> Serializable for UnsafeRow<R> {
    fn serialize(&self, buffer: &mut impl BufMut) {
        buffer.put_slice(self.as_bytes());
    }
}

impl<R> fmt::Debug for UnsafeRow<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnsafeRow")
            .field("bound", &self.is_bound())
            .field("base_offset", &self.base_offset)
            .field("num_fields", &self.layout.num_fields())
            .field("size_in_bytes", &self.size_in_bytes)
            .finish()
    }
}

/// Renders the row as its signed words, for debugging.
impl<R: MemoryRegion> fmt::Display for UnsafeRow<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_bound() {
            return write!(f, "[unbound]");
        }

        write!(f, "[")?;
        for chunk in self.as_bytes().chunks(WORD_SIZE) {
            let mut word = [0u8; WORD_SIZE];
            word[..chunk.len()].copy_from_slice(chunk);
            write!(f, "{},", platform::get_long(&word, 0))?;
        }
        write!(f, "]")
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum UnsafeRowError {
    #[error("Unable to copy a row that references an object pool")]
    CopyOfPooledRow(),
    #[error("Decimal precision {0} does not fit in a long, can not update in place")]
    DecimalPrecisionTooWide(u8),
    #[error(transparent)]
    InvalidDecimal(#[from] DecimalError),
    #[error("Unsupported data type {0}")]
    UnsupportedType(DataType),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::PageAllocator;
    use crate::row_formats::UnsafeRowWriter;
    use hex_literal::hex;

    fn get_row(num_fields: usize) -> UnsafeRow<Vec<u8>> {
        let size = RowLayout::new(num_fields).fixed_length_size();
        UnsafeRow::bound(vec![0u8; size], 0, num_fields, size)
    }

    #[test]
    fn test_primitive_roundtrip() {
        let mut row = get_row(9);

        row.set_boolean(0, true);
        row.set_byte(1, -8);
        row.set_short(2, 1234);
        row.set_int(3, -56789);
        row.set_long(4, i64::MIN);
        row.set_float(5, 1.25);
        row.set_double(6, -0.5);
        row.set_date(7, 18000);
        row.set_timestamp(8, 1_600_000_000_000_000);

        assert!(row.get_boolean(0));
        assert_eq!(row.get_byte(1), -8);
        assert_eq!(row.get_short(2), 1234);
        assert_eq!(row.get_int(3), -56789);
        assert_eq!(row.get_long(4), i64::MIN);
        assert_eq!(row.get_float(5), 1.25);
        assert_eq!(row.get_double(6), -0.5);
        assert_eq!(row.get_date(7), 18000);
        assert_eq!(row.get_timestamp(8), 1_600_000_000_000_000);
        assert!(!row.any_null());
    }

    #[test]
    fn test_layout_bytes() {
        let mut row = get_row(2);
        row.set_int(0, 1);
        row.set_null_at(1);

        assert_eq!(
            row.as_bytes(),
            &hex!("0200000000000000 0100000000000000 0000000000000000")
        );
    }

    #[test]
    fn test_set_null_zeroes_word() {
        let mut row = get_row(3);
        row.set_long(1, -1);

        row.set_null_at(1);

        assert!(row.is_null_at(1));
        assert_eq!(row.get_long(1), 0);
        assert!(!row.is_null_at(0));
        assert!(!row.is_null_at(2));
    }

    #[test]
    fn test_set_after_null_clears_bit() {
        let mut row = get_row(1);
        row.set_null_at(0);
        assert!(row.any_null());

        row.set_short(0, 3);

        assert!(!row.is_null_at(0));
        assert!(!row.any_null());
    }

    #[test]
    fn test_any_null_past_first_word() {
        let mut row = get_row(70);
        assert!(!row.any_null());

        row.set_null_at(69);

        assert!(row.any_null());
    }

    #[test]
    fn test_nan_canonicalized() {
        let odd_double = f64::from_bits(0x7ff8_0000_dead_beef);
        let odd_float = f32::from_bits(0x7fc0_beef);
        assert!(odd_double.is_nan());
        assert!(odd_float.is_nan());

        let mut left = get_row(2);
        left.set_double(0, odd_double);
        left.set_float(1, odd_float);

        let mut right = get_row(2);
        right.set_double(0, f64::NAN);
        right.set_float(1, -f32::NAN);

        assert_eq!(left.get_long(0), f64::NAN.to_bits() as i64);
        assert_eq!(left.get_int(1), f32::NAN.to_bits() as i32);
        assert_eq!(left, right);
        assert_eq!(left.hash_code(), right.hash_code());
    }

    #[test]
    fn test_narrow_set_keeps_high_bytes() {
        let mut dirty = get_row(1);
        dirty.set_long(0, -1);
        dirty.set_int(0, 5);

        let mut clean = get_row(1);
        clean.set_int(0, 5);

        assert_eq!(dirty.get_int(0), clean.get_int(0));
        assert_ne!(dirty, clean);
    }

    #[test]
    fn test_equality_and_hash() {
        let mut left = get_row(2);
        left.set_int(0, 7);
        let mut right = get_row(2);
        right.set_int(0, 7);

        assert_eq!(left, right);
        assert_eq!(left.hash_code(), right.hash_code());

        right.set_int(1, 1);
        assert_ne!(left, right);

        assert_ne!(get_row(1), get_row(2));
        assert_eq!(UnsafeRow::<Vec<u8>>::new(), UnsafeRow::<Vec<u8>>::new());
    }

    #[test]
    fn test_decimal_in_place() -> Result<(), Box<dyn std::error::Error>> {
        let mut row = get_row(1);
        let value = Decimal::new(-12345, 10, 2)?;

        row.set_decimal(0, Some(&value), 10, 2)?;
        assert_eq!(row.get_decimal(0, 10, 2), Some(value));

        row.set_decimal(0, None, 10, 2)?;
        assert!(row.is_null_at(0));
        assert_eq!(row.get_decimal(0, 10, 2), None);
        Ok(())
    }

    #[test]
    fn test_decimal_too_wide() -> Result<(), Box<dyn std::error::Error>> {
        let mut row = get_row(1);
        let value = Decimal::new(1, 20, 0)?;

        assert_eq!(
            row.set_decimal(0, Some(&value), 20, 0),
            Err(UnsafeRowError::DecimalPrecisionTooWide(20))
        );
        Ok(())
    }

    #[test]
    fn test_update() -> Result<(), Box<dyn std::error::Error>> {
        let mut row = get_row(3);

        row.update(0, &DataType::Integer, &Value::Integer(12))?;
        row.update(1, &DataType::Double, &Value::Double(2.5))?;
        row.update(2, &DataType::Long, &Value::Null)?;

        assert_eq!(row.get(0, &DataType::Integer)?, Value::Integer(12));
        assert_eq!(row.get(1, &DataType::Double)?, Value::Double(2.5));
        assert_eq!(row.get(2, &DataType::Long)?, Value::Null);
        Ok(())
    }

    #[test]
    #[should_panic(expected = "can not be updated in place")]
    fn test_update_variable_length() {
        let mut row = get_row(1);
        let _ = row.update(0, &DataType::String, &Value::String(Utf8String::from("nope")));
    }

    #[test]
    #[should_panic(expected = "can not hold")]
    fn test_update_mismatched_type() {
        let mut row = get_row(1);
        let _ = row.update(0, &DataType::Integer, &Value::Long(1));
    }

    #[test]
    fn test_decimal_rescaled_to_column() -> Result<(), Box<dyn std::error::Error>> {
        let mut row = get_row(1);
        let column = DataType::Decimal {
            precision: 10,
            scale: 2,
        };

        row.update(0, &column, &Value::Decimal(Decimal::new(7, 1, 0)?))?;
        assert_eq!(row.get_long(0), 700);
        assert_eq!(row.get(0, &column)?, Value::Decimal(Decimal::new(700, 10, 2)?));

        assert_eq!(
            row.set_decimal(0, Some(&Decimal::new(999_999_999, 9, 0)?), 10, 2),
            Err(UnsafeRowError::InvalidDecimal(
                DecimalError::ValueExceedsPrecision(99_999_999_900, 10)
            ))
        );
        assert_eq!(row.get_long(0), 700);
        Ok(())
    }

    #[test]
    fn test_narrow_decimal_into_wide_column() -> Result<(), Box<dyn std::error::Error>> {
        let wide = Decimal::new(10i128.pow(19), 20, 0)?;
        let mut writer = UnsafeRowWriter::new(1);
        writer.write_decimal(0, &wide, 20, 0)?;
        let bytes = writer.finish().to_vec();
        let size = bytes.len();
        let mut row = UnsafeRow::bound(bytes, 0, 1, size);
        let before = row.clone();

        let column = DataType::Decimal {
            precision: 20,
            scale: 0,
        };
        assert_eq!(
            row.update(0, &column, &Value::Decimal(Decimal::new(7, 1, 0)?)),
            Err(UnsafeRowError::DecimalPrecisionTooWide(20))
        );
        assert_eq!(row, before);
        assert_eq!(row.get_decimal(0, 20, 0), Some(wide));
        Ok(())
    }

    #[test]
    fn test_get_null_type() -> Result<(), Box<dyn std::error::Error>> {
        let mut row = get_row(1);
        row.set_int(0, 3);

        assert_eq!(row.get(0, &DataType::Null)?, Value::Null);
        Ok(())
    }

    #[test]
    fn test_get_unsupported() {
        let mut row = get_row(1);
        row.set_long(0, 0);

        let array = DataType::Array(Box::new(DataType::Integer));
        assert_eq!(
            row.get(0, &array),
            Err(UnsafeRowError::UnsupportedType(array.clone()))
        );

        row.set_null_at(0);
        assert_eq!(row.get(0, &array), Ok(Value::Null));
    }

    #[test]
    fn test_copy_is_independent() -> Result<(), Box<dyn std::error::Error>> {
        let mut row = get_row(2);
        row.set_long(0, 99);

        let copy = row.copy()?;
        assert_eq!(copy, row);

        row.set_long(0, 100);
        assert_eq!(copy.get_long(0), 99);
        assert_ne!(copy, row);
        Ok(())
    }

    #[test]
    fn test_copy_pooled_page() {
        let mut alloc = PageAllocator::with_page_size(64);
        let page = alloc.allocate_pooled();
        let row = UnsafeRow::bound(&page, 0, 1, 16);

        assert_eq!(row.copy(), Err(UnsafeRowError::CopyOfPooledRow()));
    }

    #[test]
    fn test_rebind() {
        let first = hex!("0000000000000000 0100000000000000");
        let second = hex!("0000000000000000 0000000000000000 0200000000000000");

        let mut row = UnsafeRow::new();
        assert!(!row.is_bound());

        row.bind(&first[..], 0, 1, 16);
        assert_eq!(row.get_long(0), 1);

        row.bind(&second[..], 8, 1, 16);
        assert_eq!(row.get_long(0), 2);
        assert_eq!(row.base_offset(), 8);

        assert!(row.unbind().is_some());
        assert!(!row.is_bound());
    }

    #[test]
    fn test_write_to_heap() -> Result<(), Box<dyn std::error::Error>> {
        let mut row = get_row(1);
        row.set_int(0, 4);

        let mut out: Vec<u8> = vec![];
        row.write_to(&mut out, &mut [])?;

        assert_eq!(out, row.as_bytes());
        Ok(())
    }

    #[test]
    fn test_write_to_off_heap_chunks() -> Result<(), Box<dyn std::error::Error>> {
        let mut alloc = PageAllocator::with_page_size(128);
        let mut page = alloc.allocate();
        {
            let mut row = UnsafeRow::bound(&mut page, 40, 3, 32);
            row.set_long(0, 1);
            row.set_long(1, 2);
            row.set_null_at(2);
        }

        let row = UnsafeRow::bound(&page, 40, 3, 32);
        let mut out: Vec<u8> = vec![];
        let mut scratch = [0u8; 5];
        row.write_to(&mut out, &mut scratch)?;

        assert_eq!(out, row.as_bytes());

        let reread = UnsafeRow::bound(out, 0, 3, 32);
        assert_eq!(reread, row);
        assert_eq!(reread.get_long(1), 2);
        assert!(reread.is_null_at(2));
        Ok(())
    }

    #[test]
    #[should_panic(expected = "non empty write buffer")]
    fn test_write_to_off_heap_needs_buffer() {
        let mut alloc = PageAllocator::with_page_size(64);
        let page = alloc.allocate();
        let row = UnsafeRow::bound(&page, 0, 1, 16);

        let _ = row.write_to(&mut Vec::<u8>::new(), &mut []);
    }

    #[test]
    fn test_write_to_memory() {
        let mut row = get_row(1);
        row.set_int(0, 9);

        let mut target = vec![0xffu8; 20];
        row.write_to_memory(&mut target, 4);

        let moved = UnsafeRow::bound(&target[..], 4, 1, 16);
        assert_eq!(moved, row);
    }

    #[test]
    fn test_get_bytes_shares_exact_buffer() {
        let backing = Bytes::from(vec![0u8; 16]);
        let row = UnsafeRow::bound(backing.clone(), 0, 1, 16);

        let bytes = row.get_bytes();
        assert_eq!(bytes.as_ptr(), backing.as_ptr());
        assert_eq!(bytes.len(), 16);

        let offset_row = UnsafeRow::bound(backing.clone(), 0, 0, 8);
        let bytes = offset_row.get_bytes();
        assert_eq!(bytes.len(), 8);
    }

    #[test]
    fn test_serializable() {
        let mut row = get_row(1);
        row.set_byte(0, 1);

        let bytes = row.serialize_to_bytes();
        assert_eq!(bytes.len(), row.encoded_size());
        assert_eq!(&bytes[..], row.as_bytes());
    }

    #[test]
    fn test_display() {
        let mut row = get_row(1);
        row.set_long(0, -2);
        assert_eq!(row.to_string(), "[0,-2,]");
        assert_eq!(UnsafeRow::<Vec<u8>>::new().to_string(), "[unbound]");
    }

    #[test]
    fn test_zero_fields() {
        let row = UnsafeRow::bound(Vec::<u8>::new(), 0, 0, 0);
        assert!(!row.any_null());
        assert_eq!(row.as_bytes().len(), 0);
        assert_eq!(row.hash_code(), murmur3::hash_bytes(&[], HASH_SEED));
    }

    #[test]
    #[should_panic(expected = "not bound")]
    fn test_unbound_access() {
        let row: UnsafeRow<Vec<u8>> = UnsafeRow::new();
        row.get_int(0);
    }

    #[test]
    #[should_panic(expected = "runs past the end")]
    fn test_bind_past_region() {
        UnsafeRow::bound(vec![0u8; 8], 0, 1, 16);
    }

    #[test]
    #[should_panic(expected = "can not hold")]
    fn test_bind_too_small_for_fields() {
        UnsafeRow::bound(vec![0u8; 64], 0, 3, 16);
    }

    macro_rules! out_of_bounds {
        ($name:ident, |$row:ident| $access:expr) => {
            #[test]
            #[should_panic(expected = "should be <")]
            fn $name() {
                let mut $row = get_row(2);
                $access;
            }
        };
    }

    out_of_bounds!(oob_is_null_at, |row| row.is_null_at(2));
    out_of_bounds!(oob_set_null_at, |row| row.set_null_at(2));
    out_of_bounds!(oob_get_boolean, |row| row.get_boolean(2));
    out_of_bounds!(oob_get_byte, |row| row.get_byte(2));
    out_of_bounds!(oob_get_short, |row| row.get_short(2));
    out_of_bounds!(oob_get_int, |row| row.get_int(2));
    out_of_bounds!(oob_get_long, |row| row.get_long(2));
    out_of_bounds!(oob_get_float, |row| row.get_float(2));
    out_of_bounds!(oob_get_double, |row| row.get_double(2));
    out_of_bounds!(oob_get_binary, |row| row.get_binary(2));
    out_of_bounds!(oob_get_utf8_string, |row| row.get_utf8_string(2));
    out_of_bounds!(oob_get_interval, |row| row.get_interval(2));
    out_of_bounds!(oob_get_decimal, |row| row.get_decimal(2, 5, 0));
    out_of_bounds!(oob_get_struct, |row| row.get_struct(2, 1));
    out_of_bounds!(oob_get, |row| row.get(2, &DataType::Integer));
    out_of_bounds!(oob_set_boolean, |row| row.set_boolean(2, true));
    out_of_bounds!(oob_set_byte, |row| row.set_byte(2, 1));
    out_of_bounds!(oob_set_short, |row| row.set_short(2, 1));
    out_of_bounds!(oob_set_int, |row| row.set_int(2, 1));
    out_of_bounds!(oob_set_long, |row| row.set_long(2, 1));
    out_of_bounds!(oob_set_float, |row| row.set_float(2, 1.0));
    out_of_bounds!(oob_set_double, |row| row.set_double(2, 1.0));
    out_of_bounds!(oob_set_decimal, |row| row.set_decimal(2, None, 5, 0));
    out_of_bounds!(oob_update, |row| row.update(2, &DataType::Integer, &Value::Integer(1)));
    out_of_bounds!(oob_far, |row| row.get_long(usize::MAX));
}
