use super::{CalendarInterval, DataType, Decimal, Utf8String};
use crate::memory::MemoryRegion;
use crate::row_formats::UnsafeRow;
use bytes::Bytes;
use std::fmt::{self, Display, Formatter};

/// A single field read out of a row. Nested rows stay views into the parent's region.
#[derive(Clone, Debug, PartialEq)]
pub enum Value<'a> {
    Null,
    Boolean(bool),
    Byte(i8),
    Short(i16),
    Integer(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Decimal(Decimal),
    Date(i32),
    Timestamp(i64),
    Binary(Bytes),
    String(Utf8String),
    CalendarInterval(CalendarInterval),
    Struct(UnsafeRow<&'a dyn MemoryRegion>),
}

impl<'a> Value<'a> {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Used to check a value against the type a caller expects to store it as.
    pub fn type_matches(&self, data_type: &DataType) -> bool {
        match (self, data_type) {
            (Value::Null, _) => true,
            (Value::Boolean(_), DataType::Boolean) => true,
            (Value::Byte(_), DataType::Byte) => true,
            (Value::Short(_), DataType::Short) => true,
            (Value::Integer(_), DataType::Integer) => true,
            (Value::Long(_), DataType::Long) => true,
            (Value::Float(_), DataType::Float) => true,
            (Value::Double(_), DataType::Double) => true,
            (Value::Decimal(d), DataType::Decimal { precision, scale }) => {
                d.precision() <= *precision && d.scale() == *scale
            }
            (Value::Date(_), DataType::Date) => true,
            (Value::Timestamp(_), DataType::Timestamp) => true,
            (Value::Binary(_), DataType::Binary) => true,
            (Value::String(_), DataType::String) => true,
            (Value::CalendarInterval(_), DataType::CalendarInterval) => true,
            (Value::Struct(r), DataType::Struct(fields)) => r.num_fields() == fields.len(),
            (_, _) => false,
        }
    }
}

impl<'a> Display for Value<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Boolean(v) => write!(f, "{}", v),
            Value::Byte(v) => write!(f, "{}", v),
            Value::Short(v) => write!(f, "{}", v),
            Value::Integer(v) => write!(f, "{}", v),
            Value::Long(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Double(v) => write!(f, "{}", v),
            Value::Decimal(v) => write!(f, "{}", v),
            Value::Date(v) => write!(f, "{}", v),
            Value::Timestamp(v) => write!(f, "{}", v),
            Value::Binary(v) => write!(f, "{:x?}", v.as_ref()),
            Value::String(v) => write!(f, "{}", v),
            Value::CalendarInterval(v) => write!(f, "{}", v),
            Value::Struct(v) => write!(f, "{}", v),
        }
    }
}
