//! Fixed point decimal held as an unscaled integer plus precision and scale, for example
//! 123.45 is unscaled 12345 with precision 5 and scale 2.
use crate::constants::{MAX_DECIMAL_PRECISION, MAX_LONG_DIGITS};
use std::convert::TryFrom;
use std::fmt::{self, Display, Formatter};
use thiserror::Error;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Decimal {
    unscaled: i128,
    precision: u8,
    scale: u8,
}

impl Decimal {
    pub fn new(unscaled: i128, precision: u8, scale: u8) -> Result<Decimal, DecimalError> {
        if precision == 0 || precision > MAX_DECIMAL_PRECISION {
            return Err(DecimalError::PrecisionOutOfRange(precision));
        }
        if scale > precision {
            return Err(DecimalError::ScaleExceedsPrecision(scale, precision));
        }
        if unscaled.unsigned_abs() >= 10u128.pow(precision as u32) {
            return Err(DecimalError::ValueExceedsPrecision(unscaled, precision));
        }

        Ok(Decimal {
            unscaled,
            precision,
            scale,
        })
    }

    /// Builds a decimal read back from a row, the column type is trusted to describe it.
    pub(crate) fn from_stored(unscaled: i128, precision: u8, scale: u8) -> Decimal {
        Decimal {
            unscaled,
            precision,
            scale,
        }
    }

    pub fn unscaled(&self) -> i128 {
        self.unscaled
    }

    /// The unscaled value as a long, if it fits.
    pub fn to_unscaled_long(&self) -> Option<i64> {
        i64::try_from(self.unscaled).ok()
    }

    pub fn precision(&self) -> u8 {
        self.precision
    }

    pub fn scale(&self) -> u8 {
        self.scale
    }

    /// Rescales to a column's precision and scale, rounding half away from zero when the
    /// scale shrinks.
    pub fn to_precision(&self, precision: u8, scale: u8) -> Result<Decimal, DecimalError> {
        if precision == 0 || precision > MAX_DECIMAL_PRECISION {
            return Err(DecimalError::PrecisionOutOfRange(precision));
        }
        if scale > precision {
            return Err(DecimalError::ScaleExceedsPrecision(scale, precision));
        }

        let unscaled = if scale >= self.scale {
            let factor = 10i128.pow((scale - self.scale) as u32);
            self.unscaled
                .checked_mul(factor)
                .ok_or(DecimalError::ValueExceedsPrecision(self.unscaled, precision))?
        } else {
            let divisor = 10i128.pow((self.scale - scale) as u32);
            let quotient = self.unscaled / divisor;
            let remainder = self.unscaled % divisor;
            if remainder.unsigned_abs() * 2 >= divisor.unsigned_abs() {
                quotient + self.unscaled.signum()
            } else {
                quotient
            }
        };

        Decimal::new(unscaled, precision, scale)
    }

    /// Narrow decimals are stored directly in the field word.
    pub fn fits_in_long(precision: u8) -> bool {
        precision <= MAX_LONG_DIGITS
    }
}

impl Display for Decimal {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let digits = self.unscaled.unsigned_abs().to_string();
        let sign = if self.unscaled < 0 { "-" } else { "" };
        let scale = self.scale as usize;

        if scale == 0 {
            return write!(f, "{}{}", sign, digits);
        }

        let padded = if digits.len() <= scale {
            format!("{}{}", "0".repeat(scale - digits.len() + 1), digits)
        } else {
            digits
        };
        let (whole, fraction) = padded.split_at(padded.len() - scale);
        write!(f, "{}{}.{}", sign, whole, fraction)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum DecimalError {
    #[error("Precision {0} is outside 1..=38")]
    PrecisionOutOfRange(u8),
    #[error("Scale {0} is larger than precision {1}")]
    ScaleExceedsPrecision(u8, u8),
    #[error("Unscaled value {0} needs more than {1} digits")]
    ValueExceedsPrecision(i128, u8),
}
