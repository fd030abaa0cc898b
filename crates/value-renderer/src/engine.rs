use num_bigint::BigInt;

use crate::amount::{exponent_delta, format_dec, format_int, format_scaled};
use crate::context::Context;
use crate::denom::DenomNormalizer;
use crate::error::Error;
use crate::parser::ValueParser;
use crate::source::MetadataSource;
use crate::types::config::RendererConfig;
use crate::types::metadata::{check_exponent, Metadata};
use crate::types::value::{Coin, Dec, ParsedValue, RenderValue};

/// Renders numeric values and coins for display, and parses them back.
#[derive(Debug, Clone)]
pub struct ValueRenderer<S> {
    source: S,
    normalizer: DenomNormalizer,
    parser: ValueParser,
}

impl<S: MetadataSource> ValueRenderer<S> {
    pub fn new(source: S, config: RendererConfig) -> Result<Self, Error> {
        let parser = ValueParser::new(&config)?;
        Ok(Self {
            source,
            normalizer: DenomNormalizer::new(config.policy),
            parser,
        })
    }

    /// Build a renderer with the default `u`/`m` prefix policy accepting `atom`.
    pub fn with_defaults(source: S) -> Result<Self, Error> {
        Self::new(source, RendererConfig::default())
    }

    /// Format a value for display.
    ///
    /// Coins are scaled to their display denom, which is appended as a
    /// suffix: `1500000uatom` renders as `1.5atom`.
    pub async fn format(&self, ctx: &Context, value: &RenderValue) -> Result<String, Error> {
        render_value(ctx, value, &self.source, &self.normalizer).await
    }

    /// Format loosely typed JSON input.
    ///
    /// Accepts `{"denom": .., "amount": ..}` coins, decimal strings, and
    /// integer strings or JSON integers.
    pub async fn format_json(
        &self,
        ctx: &Context,
        value: &serde_json::Value,
    ) -> Result<String, Error> {
        let value = render_value_from_json(value)?;
        self.format(ctx, &value).await
    }

    /// Parse a human-entered coin or unsigned integer.
    pub fn parse(&self, input: &str) -> Result<ParsedValue, Error> {
        self.parser.parse(input)
    }

    /// Convert a coin in any listed unit to the base denom of its token.
    pub async fn to_base_units(&self, ctx: &Context, coin: &Coin) -> Result<Coin, Error> {
        let metadata = lookup_metadata(ctx, &coin.denom, &self.source, &self.normalizer).await?;
        let exponent = metadata.exponent_of(&coin.denom).ok_or_else(|| {
            Error::InvalidMetadata(format!(
                "denom `{}` is not a unit of `{}`",
                coin.denom, metadata.base
            ))
        })?;
        check_exponent(&coin.denom, exponent)?;
        let amount = &coin.amount * BigInt::from(10u32).pow(exponent);
        Ok(Coin::new(amount, metadata.base))
    }

    pub fn normalizer(&self) -> &DenomNormalizer {
        &self.normalizer
    }
}

/// Format `value`, resolving coin metadata through `source`.
pub(crate) async fn render_value<S: MetadataSource>(
    ctx: &Context,
    value: &RenderValue,
    source: &S,
    normalizer: &DenomNormalizer,
) -> Result<String, Error> {
    match value {
        RenderValue::Dec(dec) => Ok(format_dec(dec)),
        RenderValue::Int(int) => Ok(format_int(int)),
        RenderValue::Coin(coin) => {
            let metadata = lookup_metadata(ctx, &coin.denom, source, normalizer).await?;
            let delta = exponent_delta(&coin.denom, &metadata)?;
            let amount = format_scaled(&coin.amount, delta)?;
            Ok(format!("{amount}{}", metadata.display))
        }
    }
}

async fn lookup_metadata<S: MetadataSource>(
    ctx: &Context,
    denom: &str,
    source: &S,
    normalizer: &DenomNormalizer,
) -> Result<Metadata, Error> {
    let base = normalizer.normalize(denom);
    tracing::debug!(denom, base = %base, "looking up denom metadata");
    ctx.run(source.metadata(&base)).await.inspect_err(|e| {
        tracing::warn!(denom, base = %base, error = %e, "denom metadata lookup failed");
    })
}

fn render_value_from_json(value: &serde_json::Value) -> Result<RenderValue, Error> {
    match value {
        serde_json::Value::Object(map) => {
            let denom = map.get("denom").and_then(|d| d.as_str());
            let amount = map.get("amount");
            let (Some(denom), Some(amount)) = (denom, amount) else {
                return Err(Error::UnsupportedType(
                    "object without `denom` and `amount`".to_string(),
                ));
            };
            let amount = int_from_json(amount)?;
            Ok(RenderValue::Coin(Coin::new(amount, denom)))
        }
        serde_json::Value::String(s) if s.contains('.') => Ok(RenderValue::Dec(s.parse::<Dec>()?)),
        serde_json::Value::String(_) | serde_json::Value::Number(_) => {
            Ok(RenderValue::Int(int_from_json(value)?))
        }
        other => Err(Error::UnsupportedType(json_kind(other).to_string())),
    }
}

fn int_from_json(value: &serde_json::Value) -> Result<BigInt, Error> {
    match value {
        serde_json::Value::String(s) if s.is_empty() => Err(Error::EmptyInput),
        serde_json::Value::String(s) => s
            .parse()
            .map_err(|_| Error::InvalidAmount(s.clone())),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(BigInt::from(i))
            } else if let Some(u) = n.as_u64() {
                Ok(BigInt::from(u))
            } else {
                Err(Error::UnsupportedType(format!("non-integer number {n}")))
            }
        }
        other => Err(Error::UnsupportedType(json_kind(other).to_string())),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
