//! A month count plus a microsecond count, the two can not be folded together since
//! months vary in length.
use crate::format_traits::{ConstEncodedSize, Serializable};
use bytes::BufMut;
use std::fmt;
use std::mem::size_of;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct CalendarInterval {
    pub months: i32,
    pub microseconds: i64,
}

impl CalendarInterval {
    pub fn new(months: i32, microseconds: i64) -> CalendarInterval {
        CalendarInterval {
            months,
            microseconds,
        }
    }
}

/// Months are widened to a full word on disk so both halves stay word aligned.
impl ConstEncodedSize for CalendarInterval {
    fn encoded_size() -> usize {
        size_of::<i64>() * 2
    }
}

impl Serializable for CalendarInterval {
    fn serialize(&self, buffer: &mut impl BufMut) {
        buffer.put_i64_le(self.months as i64);
        buffer.put_i64_le(self.microseconds);
    }
}

impl fmt::Display for CalendarInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "interval {} months {} microseconds",
            self.months, self.microseconds
        )
    }
}
