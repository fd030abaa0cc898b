pub mod amount;
pub mod context;
pub mod denom;
pub mod engine;
pub mod error;
pub mod parser;
pub mod source;
pub mod types;

use error::Error;

// Re-exports for convenience
pub use context::{CancelHandle, Context};
pub use engine::ValueRenderer;
pub use parser::split_amount_denom;
pub use source::{EmptyMetadataSource, MetadataSource, StaticMetadataSource};
pub use types::config::{DenomPolicy, RendererConfig};
pub use types::metadata::{DenomUnit, Metadata};
pub use types::value::{Coin, Dec, ParsedValue, RenderValue};

/// Format a value for display with the default denom policy.
pub async fn format<S: MetadataSource>(
    ctx: &Context,
    value: &RenderValue,
    source: S,
) -> Result<String, Error> {
    engine::render_value(ctx, value, &source, &denom::DenomNormalizer::default()).await
}

/// Parse a human-entered value with the default denom policy.
pub fn parse(input: &str) -> Result<ParsedValue, Error> {
    parser::ValueParser::new(&RendererConfig::default())?.parse(input)
}
