use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A money value in cents of the table currency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(i64);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseAmountError {
    #[error("'{0}' is not a number")]
    NotANumber(String),
    #[error("'{0}' has more than two decimal places")]
    TooPrecise(String),
    #[error("'{0}' is larger than {}", Amount::MAX)]
    OutOfRange(String),
}

impl Amount {
    pub const ZERO: Amount = Amount(0);
    /// Largest magnitude accepted from text input.
    pub const MAX: Amount = Amount::from_units(1_000_000_000);

    pub const fn from_cents(cents: i64) -> Self {
        Amount(cents)
    }

    pub const fn from_units(units: i64) -> Self {
        Amount(units * 100)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub fn checked_add(self, rhs: Amount) -> Option<Amount> {
        self.0.checked_add(rhs.0).map(Amount)
    }
}

impl FromStr for Amount {
    type Err = ParseAmountError;

    /// Accepts `.` or `,` as the decimal separator: `"0,5"` and `"0.50"` are equal.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let not_a_number = || ParseAmountError::NotANumber(s.to_string());
        let out_of_range = || ParseAmountError::OutOfRange(s.to_string());

        let raw = s.trim();
        let (negative, unsigned) = match raw.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, raw.strip_prefix('+').unwrap_or(raw)),
        };
        let (whole, fraction) = match unsigned.split_once(|c: char| c == '.' || c == ',') {
            Some((whole, fraction)) => (whole, fraction),
            None => (unsigned, ""),
        };
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction) {
            return Err(not_a_number());
        }
        if fraction.len() > 2 {
            return Err(ParseAmountError::TooPrecise(s.to_string()));
        }

        let mut cents: i64 = 0;
        for digit in whole.bytes().chain(fraction.bytes()).chain("00".bytes().take(2 - fraction.len())) {
            cents = cents
                .checked_mul(10)
                .and_then(|c| c.checked_add(i64::from(digit - b'0')))
                .ok_or_else(out_of_range)?;
        }
        if cents > Amount::MAX.0 {
            return Err(out_of_range());
        }
        Ok(Amount(if negative { -cents } else { cents }))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        Amount(self.0 + rhs.0)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Amount) {
        self.0 += rhs.0;
    }
}

impl Sub for Amount {
    type Output = Amount;

    fn sub(self, rhs: Amount) -> Amount {
        Amount(self.0 - rhs.0)
    }
}

impl Mul<u32> for Amount {
    type Output = Amount;

    fn mul(self, factor: u32) -> Amount {
        Amount(self.0 * i64::from(factor))
    }
}

impl Neg for Amount {
    type Output = Amount;

    fn neg(self) -> Amount {
        Amount(-self.0)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Amount {
        iter.fold(Amount::ZERO, Add::add)
    }
}
