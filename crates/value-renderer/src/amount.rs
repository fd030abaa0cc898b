use num_bigint::{BigInt, Sign};

use crate::error::Error;
use crate::types::metadata::{check_exponent, Metadata, MAX_EXPONENT};
use crate::types::value::{Dec, DEC_PRECISION};

/// `exponent(denom) - exponent(display)` for the given metadata.
///
/// Unlisted denoms count as exponent 0. Exponents above [`MAX_EXPONENT`]
/// are rejected.
pub fn exponent_delta(denom: &str, metadata: &Metadata) -> Result<i64, Error> {
    let mut coin_exp = None;
    let mut display_exp = None;

    for unit in &metadata.denom_units {
        if unit.denom == denom {
            coin_exp = Some(unit.exponent);
        }
        if unit.denom == metadata.display {
            display_exp = Some(unit.exponent);
        }
    }

    if coin_exp.is_none() {
        tracing::warn!(denom, base = %metadata.base, "denom not listed in metadata, assuming exponent 0");
    }
    if display_exp.is_none() {
        tracing::warn!(display = %metadata.display, base = %metadata.base, "display denom not listed in metadata, assuming exponent 0");
    }

    let coin_exp = coin_exp.unwrap_or(0);
    let display_exp = display_exp.unwrap_or(0);
    check_exponent(denom, coin_exp)?;
    check_exponent(&metadata.display, display_exp)?;

    Ok(i64::from(coin_exp) - i64::from(display_exp))
}

/// Render `amount` scaled by `10^delta` with thousands separators.
///
/// `|delta|` may not exceed [`MAX_EXPONENT`].
pub fn format_scaled(amount: &BigInt, delta: i64) -> Result<String, Error> {
    let shift = match u32::try_from(delta.unsigned_abs()) {
        Ok(shift) if shift <= MAX_EXPONENT => shift,
        _ => {
            return Err(Error::InvalidMetadata(format!(
                "exponent delta {delta} out of range, maximum is {MAX_EXPONENT}"
            )))
        }
    };

    if delta < 0 {
        let digits = amount.magnitude().to_string();
        let shift = shift as usize;
        if trailing_zeros(&digits) >= shift {
            // exact division: only whole units remain
            return Ok(group_signed(amount.sign(), &digits[..digits.len() - shift]));
        }
        return Ok(format_fraction(amount.sign(), &digits, shift));
    }

    if delta > 0 {
        return Ok(format_int(&(amount * BigInt::from(10u32).pow(shift))));
    }

    Ok(format_int(amount))
}

/// Render a [`Dec`] exactly, trimming trailing fractional zeros.
pub fn format_dec(dec: &Dec) -> String {
    let scaled = dec.scaled();
    format_fraction(
        scaled.sign(),
        &scaled.magnitude().to_string(),
        DEC_PRECISION as usize,
    )
}

/// Render an integer with thousands separators.
pub fn format_int(amount: &BigInt) -> String {
    group_signed(amount.sign(), &amount.magnitude().to_string())
}

/// Number of trailing `0` digits, never counting the leading digit.
pub fn trailing_zeros(digits: &str) -> usize {
    let bytes = digits.as_bytes();
    let mut count = 0;
    let mut i = bytes.len();
    while i > 1 && bytes[i - 1] == b'0' {
        count += 1;
        i -= 1;
    }
    count
}

/// Place a decimal point `scale` digits from the right of `digits`.
fn format_fraction(sign: Sign, digits: &str, scale: usize) -> String {
    let padded;
    let digits = if digits.len() <= scale {
        padded = format!("{}{digits}", "0".repeat(scale + 1 - digits.len()));
        padded.as_str()
    } else {
        digits
    };

    let (integer_part, decimal_part) = digits.split_at(digits.len() - scale);
    let trimmed = decimal_part.trim_end_matches('0');
    let grouped = group_signed(sign, integer_part);
    if trimmed.is_empty() {
        grouped
    } else if grouped == "0" && sign == Sign::Minus {
        format!("-0.{trimmed}")
    } else {
        format!("{grouped}.{trimmed}")
    }
}

fn group_signed(sign: Sign, digits: &str) -> String {
    let grouped = group_digits(digits);
    if sign == Sign::Minus && grouped != "0" {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Insert `,` every three digits from the right.
fn group_digits(digits: &str) -> String {
    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        return "0".to_string();
    }

    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::metadata::DenomUnit;

    fn atom() -> Metadata {
        Metadata {
            denom_units: vec![
                DenomUnit::new("uatom", 0),
                DenomUnit::new("matom", 3),
                DenomUnit::new("atom", 6),
            ],
            base: "uatom".to_string(),
            display: "atom".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_exponent_delta() {
        let meta = atom();
        assert_eq!(exponent_delta("uatom", &meta).unwrap(), -6);
        assert_eq!(exponent_delta("matom", &meta).unwrap(), -3);
        assert_eq!(exponent_delta("atom", &meta).unwrap(), 0);
        assert_eq!(exponent_delta("katom", &meta).unwrap(), -6);
    }

    #[test]
    fn test_exponent_delta_display_missing() {
        let mut meta = atom();
        meta.display = "kiloatom".to_string();
        assert_eq!(exponent_delta("atom", &meta).unwrap(), 6);
    }

    #[test]
    fn test_trailing_zeros() {
        assert_eq!(trailing_zeros("1000000"), 6);
        assert_eq!(trailing_zeros("1230"), 1);
        assert_eq!(trailing_zeros("123"), 0);
        assert_eq!(trailing_zeros("0"), 0);
        assert_eq!(trailing_zeros(""), 0);
    }

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits("0"), "0");
        assert_eq!(group_digits("999"), "999");
        assert_eq!(group_digits("1000"), "1,000");
        assert_eq!(group_digits("1234567"), "1,234,567");
        assert_eq!(group_digits("000123"), "123");
    }

    #[test]
    fn test_format_scaled_no_delta() {
        assert_eq!(format_scaled(&BigInt::from(1_234_567), 0).unwrap(), "1,234,567");
        assert_eq!(format_scaled(&BigInt::from(-1_234_567), 0).unwrap(), "-1,234,567");
        assert_eq!(format_scaled(&BigInt::from(0), 0).unwrap(), "0");
    }

    #[test]
    fn test_format_scaled_exact_division() {
        assert_eq!(format_scaled(&BigInt::from(1_000_000), -6).unwrap(), "1");
        assert_eq!(format_scaled(&BigInt::from(1_234_000_000_000u64), -6).unwrap(), "1,234,000");
        assert_eq!(format_scaled(&BigInt::from(-5_000_000), -6).unwrap(), "-5");
    }

    #[test]
    fn test_format_scaled_fraction() {
        assert_eq!(format_scaled(&BigInt::from(1_500_000), -6).unwrap(), "1.5");
        assert_eq!(format_scaled(&BigInt::from(123), -6).unwrap(), "0.000123");
        assert_eq!(format_scaled(&BigInt::from(1_234_567_891), -6).unwrap(), "1,234.567891");
        assert_eq!(format_scaled(&BigInt::from(-1), -3).unwrap(), "-0.001");
        assert_eq!(format_scaled(&BigInt::from(0), -6).unwrap(), "0");
    }

    #[test]
    fn test_format_scaled_large_is_exact() {
        // beyond f64 precision
        let amount: BigInt = "123456789012345678901".parse().unwrap();
        assert_eq!(format_scaled(&amount, -6).unwrap(), "123,456,789,012,345.678901");
    }

    #[test]
    fn test_format_scaled_multiply() {
        assert_eq!(format_scaled(&BigInt::from(5), 6).unwrap(), "5,000,000");
        assert_eq!(format_scaled(&BigInt::from(12), 3).unwrap(), "12,000");
        let amount = BigInt::from(i64::MAX);
        assert_eq!(
            format_scaled(&amount, 3).unwrap(),
            format_int(&(BigInt::from(i64::MAX) * 1000))
        );
    }

    #[test]
    fn test_format_dec() {
        assert_eq!(format_dec(&"1234567.89".parse().unwrap()), "1,234,567.89");
        assert_eq!(format_dec(&"10.000000000000000000".parse().unwrap()), "10");
        assert_eq!(format_dec(&"-0.5".parse().unwrap()), "-0.5");
        assert_eq!(format_dec(&"0".parse().unwrap()), "0");
        assert_eq!(
            format_dec(&"0.000000000000000001".parse().unwrap()),
            "0.000000000000000001"
        );
    }

    #[test]
    fn test_exponent_delta_rejects_huge_exponent() {
        let mut meta = atom();
        meta.denom_units[2].exponent = 50_000_000;
        assert!(matches!(
            exponent_delta("uatom", &meta),
            Err(Error::InvalidMetadata(_))
        ));
        assert!(matches!(
            exponent_delta("atom", &meta),
            Err(Error::InvalidMetadata(_))
        ));
    }

    #[test]
    fn test_format_scaled_rejects_out_of_range_delta() {
        let one = BigInt::from(1);
        let max = i64::from(MAX_EXPONENT);
        assert!(format_scaled(&one, -max).is_ok());
        assert!(format_scaled(&one, max).is_ok());
        assert!(matches!(
            format_scaled(&one, -max - 1),
            Err(Error::InvalidMetadata(_))
        ));
        assert!(matches!(
            format_scaled(&one, i64::from(u32::MAX)),
            Err(Error::InvalidMetadata(_))
        ));
        assert!(matches!(
            format_scaled(&one, i64::MIN),
            Err(Error::InvalidMetadata(_))
        ));
    }
}
