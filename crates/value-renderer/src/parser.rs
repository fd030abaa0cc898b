use num_bigint::{BigInt, BigUint};
use regex::Regex;

use crate::error::Error;
use crate::types::config::RendererConfig;
use crate::types::value::{Coin, ParsedValue};

/// Parser for human-entered amounts: `1,000,000uatom` or a bare `42`.
#[derive(Debug, Clone)]
pub struct ValueParser {
    coin_pattern: Regex,
}

impl ValueParser {
    /// Build the coin pattern `^[0-9]+(prefix)?(denom)$` from the configured
    /// magnitude prefixes and accepted denoms.
    pub fn new(config: &RendererConfig) -> Result<Self, Error> {
        config.validate()?;

        let prefixes: Vec<String> = config
            .magnitude_prefixes()
            .into_iter()
            .map(regex::escape)
            .collect();
        let denoms: Vec<String> = config.accepted_denoms.iter().map(|d| regex::escape(d)).collect();

        let prefix_group = if prefixes.is_empty() {
            String::new()
        } else {
            format!("(?:{})?", prefixes.join("|"))
        };
        let pattern = format!("^[0-9]+{prefix_group}(?:{})$", denoms.join("|"));

        let coin_pattern = Regex::new(&pattern)
            .map_err(|e| Error::Config(format!("invalid coin pattern `{pattern}`: {e}")))?;
        Ok(Self { coin_pattern })
    }

    /// Parse a coin or an unsigned integer. Thousands separators are ignored.
    pub fn parse(&self, input: &str) -> Result<ParsedValue, Error> {
        if input.is_empty() {
            return Err(Error::EmptyInput);
        }

        let stripped = input.replace(',', "");

        if self.coin_pattern.is_match(&stripped) {
            let (amount, denom) = split_amount_denom(&stripped)?;
            let amount: BigInt = amount
                .parse()
                .map_err(|_| Error::InvalidAmount(amount.to_string()))?;
            tracing::debug!(%amount, denom, "parsed coin");
            return Ok(ParsedValue::Coin(Coin::new(amount, denom)));
        }

        // u64's FromStr would accept a leading `+`
        if !stripped.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidAmount(input.to_string()));
        }
        let value: u64 = stripped
            .parse()
            .map_err(|_| Error::InvalidAmount(input.to_string()))?;
        tracing::debug!(value, "parsed unsigned integer");
        Ok(ParsedValue::Uint(BigUint::from(value)))
    }
}

/// Split `s` into its leading amount and its trailing run of ASCII letters.
///
/// `"1000uatom"` splits into `("1000", "uatom")`. A string made only of
/// letters has no amount and is rejected.
pub fn split_amount_denom(s: &str) -> Result<(&str, &str), Error> {
    let boundary = s
        .char_indices()
        .rev()
        .find(|(_, c)| !c.is_ascii_alphabetic())
        .map(|(i, c)| i + c.len_utf8())
        .ok_or_else(|| Error::NoDenominationFound(s.to_string()))?;

    Ok(s.split_at(boundary))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> ValueParser {
        ValueParser::new(&RendererConfig::default()).unwrap()
    }

    #[test]
    fn test_parse_grouped_coin() {
        let parsed = parser().parse("1,000,000uatom").unwrap();
        assert_eq!(parsed, ParsedValue::Coin(Coin::new(1_000_000, "uatom")));
    }

    #[test]
    fn test_parse_prefixes() {
        let p = parser();
        assert_eq!(
            p.parse("25matom").unwrap().as_coin(),
            Some(&Coin::new(25, "matom"))
        );
        assert_eq!(p.parse("3atom").unwrap().as_coin(), Some(&Coin::new(3, "atom")));
    }

    #[test]
    fn test_parse_bare_integer() {
        assert_eq!(
            parser().parse("42").unwrap(),
            ParsedValue::Uint(BigUint::from(42u32))
        );
        assert_eq!(
            parser().parse("1,000").unwrap(),
            ParsedValue::Uint(BigUint::from(1000u32))
        );
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(parser().parse(""), Err(Error::EmptyInput)));
    }

    #[test]
    fn test_parse_unknown_denom_is_invalid_amount() {
        let p = parser();
        assert!(matches!(p.parse("100uosmo"), Err(Error::InvalidAmount(_))));
        assert!(matches!(p.parse("1.5atom"), Err(Error::InvalidAmount(_))));
        assert!(matches!(p.parse("-5"), Err(Error::InvalidAmount(_))));
        assert!(matches!(p.parse("atom"), Err(Error::InvalidAmount(_))));
        assert!(matches!(p.parse("+42"), Err(Error::InvalidAmount(_))));
        assert!(matches!(p.parse("+42uatom"), Err(Error::InvalidAmount(_))));
        assert!(matches!(
            p.parse("18446744073709551616"),
            Err(Error::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_parse_large_coin_amount() {
        let parsed = parser().parse("18446744073709551616uatom").unwrap();
        let coin = parsed.as_coin().unwrap();
        assert_eq!(coin.amount, "18446744073709551616".parse::<BigInt>().unwrap());
    }

    #[test]
    fn test_parse_configured_denoms() {
        let config = RendererConfig::from_json(
            r#"{ "policy": { "basePrefix": "u", "rewritePrefixes": [] }, "acceptedDenoms": ["osmo", "ion"] }"#,
        )
        .unwrap();
        let p = ValueParser::new(&config).unwrap();
        assert_eq!(
            p.parse("7uosmo").unwrap().as_coin(),
            Some(&Coin::new(7, "uosmo"))
        );
        assert_eq!(p.parse("9ion").unwrap().as_coin(), Some(&Coin::new(9, "ion")));
        assert!(p.parse("7mosmo").is_err());
        assert!(p.parse("7uatom").is_err());
    }

    #[test]
    fn test_split_amount_denom() {
        assert_eq!(split_amount_denom("1000uatom").unwrap(), ("1000", "uatom"));
        assert_eq!(split_amount_denom("12").unwrap(), ("12", ""));
        assert_eq!(split_amount_denom("1a2b").unwrap(), ("1a2", "b"));
    }

    #[test]
    fn test_split_all_letters() {
        assert!(matches!(
            split_amount_denom("uatom"),
            Err(Error::NoDenominationFound(_))
        ));
        assert!(matches!(
            split_amount_denom(""),
            Err(Error::NoDenominationFound(_))
        ));
    }
}
