//! Amount parsing and validation.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::{AmountRejection, Error, Result};

/// Maximum number of fractional digits accepted for an amount.
pub const MONEY_SCALE: u32 = 2;

/// Parse user input into a monetary amount.
///
/// Surrounding whitespace is ignored and trailing fractional zeros are
/// dropped before the precision check, so `"12.500"` is accepted as `12.5`.
/// Input is never rounded: digits beyond what a `Decimal` can hold are
/// rejected rather than silently dropped.
/// The sign is not checked here; deposit and withdraw reject non-positive
/// amounts themselves.
///
/// # Errors
///
/// Returns [`Error::InvalidAmount`] if the text is not a decimal number or
/// has more than [`MONEY_SCALE`] fractional digits.
pub fn parse_amount(input: &str) -> Result<Decimal> {
    let text = input.trim();
    let amount = match Decimal::from_str_exact(text) {
        Ok(amount) => amount.normalize(),
        // Parses only with rounding: more digits than a Decimal can hold.
        Err(_) if Decimal::from_str(text).is_ok() => {
            return Err(Error::InvalidAmount(AmountRejection::TooPrecise));
        }
        Err(_) => return Err(Error::InvalidAmount(AmountRejection::Malformed)),
    };

    if amount.scale() > MONEY_SCALE {
        return Err(Error::InvalidAmount(AmountRejection::TooPrecise));
    }

    Ok(amount)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_whole_and_fractional() {
        assert_eq!(parse_amount("100").unwrap(), Decimal::from(100));
        assert_eq!(parse_amount("30.25").unwrap(), Decimal::new(3025, 2));
        assert_eq!(parse_amount("  0.5\n").unwrap(), Decimal::new(5, 1));
    }

    #[test]
    fn test_parse_trailing_zeros() {
        assert_eq!(parse_amount("12.500").unwrap(), Decimal::new(125, 1));
    }

    #[test]
    fn test_parse_keeps_sign() {
        assert_eq!(parse_amount("-5").unwrap(), Decimal::from(-5));
    }

    #[test]
    fn test_parse_malformed() {
        for input in ["", "abc", "1.2.3", "$5", "five"] {
            let err = parse_amount(input).unwrap_err();
            assert!(
                matches!(err, Error::InvalidAmount(AmountRejection::Malformed)),
                "{input:?} should be malformed"
            );
        }
    }

    #[test]
    fn test_parse_too_precise() {
        let err = parse_amount("0.001").unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidAmount(AmountRejection::TooPrecise)
        ));
    }

    #[test]
    fn test_parse_beyond_decimal_precision_is_not_rounded() {
        let err = parse_amount("1.000000000000000000000000000001").unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidAmount(AmountRejection::TooPrecise)
        ));
    }
}
