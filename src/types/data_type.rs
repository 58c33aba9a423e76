//! Logical type tags. The row itself carries no types, whoever reads a row keeps these
//! alongside it and picks the getter from them.
use crate::constants::MAX_LONG_DIGITS;
use std::fmt::{self, Display, Formatter};

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum DataType {
    Null,
    Boolean,
    Byte,
    Short,
    Integer,
    Long,
    Float,
    Double,
    Decimal { precision: u8, scale: u8 },
    /// Days since the epoch
    Date,
    /// Microseconds since the epoch
    Timestamp,
    Binary,
    String,
    CalendarInterval,
    Struct(Vec<DataType>),
    Array(Box<DataType>),
    Map(Box<DataType>, Box<DataType>),
}

impl DataType {
    /// Types that can be updated in place once a row has been written.
    pub fn is_settable(&self) -> bool {
        match self {
            DataType::Null
            | DataType::Boolean
            | DataType::Byte
            | DataType::Short
            | DataType::Integer
            | DataType::Long
            | DataType::Float
            | DataType::Double
            | DataType::Date
            | DataType::Timestamp => true,
            DataType::Decimal { precision, .. } => *precision <= MAX_LONG_DIGITS,
            _ => false,
        }
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Null => write!(f, "null"),
            DataType::Boolean => write!(f, "boolean"),
            DataType::Byte => write!(f, "tinyint"),
            DataType::Short => write!(f, "smallint"),
            DataType::Integer => write!(f, "int"),
            DataType::Long => write!(f, "bigint"),
            DataType::Float => write!(f, "float"),
            DataType::Double => write!(f, "double"),
            DataType::Decimal { precision, scale } => write!(f, "decimal({},{})", precision, scale),
            DataType::Date => write!(f, "date"),
            DataType::Timestamp => write!(f, "timestamp"),
            DataType::Binary => write!(f, "binary"),
            DataType::String => write!(f, "string"),
            DataType::CalendarInterval => write!(f, "interval"),
            DataType::Struct(fields) => {
                write!(f, "struct<")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", field)?;
                }
                write!(f, ">")
            }
            DataType::Array(element) => write!(f, "array<{}>", element),
            DataType::Map(key, value) => write!(f, "map<{},{}>", key, value),
        }
    }
}
