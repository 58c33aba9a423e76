mod calendar_interval;
pub use calendar_interval::CalendarInterval;

mod data_type;
pub use data_type::DataType;

mod decimal;
pub use decimal::Decimal;
pub use decimal::DecimalError;

mod utf8_string;
pub use utf8_string::Utf8String;

mod value;
pub use value::Value;
