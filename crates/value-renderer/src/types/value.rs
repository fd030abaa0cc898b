use std::fmt;
use std::str::FromStr;

use num_bigint::{BigInt, BigUint, Sign};

use crate::error::Error;

/// Number of fractional digits carried by [`Dec`].
pub const DEC_PRECISION: u32 = 18;

/// An amount of a specific denomination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Coin {
    pub denom: String,
    pub amount: BigInt,
}

impl Coin {
    pub fn new(amount: impl Into<BigInt>, denom: impl Into<String>) -> Self {
        Self {
            denom: denom.into(),
            amount: amount.into(),
        }
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// Fixed-point decimal with [`DEC_PRECISION`] fractional digits.
///
/// Stored as an integer scaled by `10^18`, so `1.5` is `1_500_000_000_000_000_000`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Dec(BigInt);

impl Dec {
    /// Build a decimal from its scaled integer representation.
    pub fn from_scaled(scaled: BigInt) -> Self {
        Self(scaled)
    }

    /// Build a decimal holding a whole number.
    pub fn from_int(value: impl Into<BigInt>) -> Self {
        Self(value.into() * BigInt::from(10u32).pow(DEC_PRECISION))
    }

    /// The scaled integer representation.
    pub fn scaled(&self) -> &BigInt {
        &self.0
    }
}

impl FromStr for Dec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(Error::EmptyInput);
        }

        let (negative, unsigned) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let (int_part, frac_part) = match unsigned.split_once('.') {
            Some((int_part, frac_part)) => (int_part, frac_part),
            None => (unsigned, ""),
        };

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if int_part.is_empty() || !all_digits(int_part) || !all_digits(frac_part) {
            return Err(Error::InvalidAmount(s.to_string()));
        }
        if frac_part.len() > DEC_PRECISION as usize {
            return Err(Error::InvalidAmount(format!(
                "{s}: more than {DEC_PRECISION} fractional digits"
            )));
        }

        let mut digits = String::with_capacity(int_part.len() + DEC_PRECISION as usize);
        digits.push_str(int_part);
        digits.push_str(frac_part);
        digits.extend(std::iter::repeat_n('0', DEC_PRECISION as usize - frac_part.len()));

        let magnitude = BigUint::from_str(&digits).map_err(|_| Error::InvalidAmount(s.to_string()))?;
        let sign = if negative { Sign::Minus } else { Sign::Plus };
        Ok(Self(BigInt::from_biguint(sign, magnitude)))
    }
}

impl fmt::Display for Dec {
    /// Canonical form: always 18 fractional digits.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = DEC_PRECISION as usize;
        let digits = self.0.magnitude().to_string();
        let padded = if digits.len() <= precision {
            format!("{}{digits}", "0".repeat(precision + 1 - digits.len()))
        } else {
            digits
        };
        let (int_part, frac_part) = padded.split_at(padded.len() - precision);
        let sign = if self.0.sign() == Sign::Minus { "-" } else { "" };
        write!(f, "{sign}{int_part}.{frac_part}")
    }
}

/// A value accepted by the renderer's format operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderValue {
    Dec(Dec),
    Int(BigInt),
    Coin(Coin),
}

impl From<Dec> for RenderValue {
    fn from(value: Dec) -> Self {
        RenderValue::Dec(value)
    }
}

impl From<BigInt> for RenderValue {
    fn from(value: BigInt) -> Self {
        RenderValue::Int(value)
    }
}

impl From<Coin> for RenderValue {
    fn from(value: Coin) -> Self {
        RenderValue::Coin(value)
    }
}

/// Result of parsing a human-entered value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedValue {
    Coin(Coin),
    Uint(BigUint),
}

impl ParsedValue {
    pub fn as_coin(&self) -> Option<&Coin> {
        match self {
            ParsedValue::Coin(coin) => Some(coin),
            ParsedValue::Uint(_) => None,
        }
    }
}
