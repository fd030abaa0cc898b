use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Renderer configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RendererConfig {
    /// Denom prefix conventions used to find a coin's base unit.
    #[serde(default)]
    pub policy: DenomPolicy,

    /// Display denoms (without magnitude prefix) recognised when parsing
    /// `<digits><prefix?><denom>` input.
    #[serde(default = "default_accepted_denoms")]
    pub accepted_denoms: Vec<String>,
}

/// Prefix conventions mapping a denom to its base unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DenomPolicy {
    /// Prefix carried by base-unit denoms, e.g. `u` in `uatom`.
    #[serde(default = "default_base_prefix")]
    pub base_prefix: String,

    /// Prefixes of larger units that are rewritten to the base prefix,
    /// e.g. `m` in `matom`.
    #[serde(default = "default_rewrite_prefixes")]
    pub rewrite_prefixes: Vec<String>,
}

fn default_base_prefix() -> String {
    "u".to_string()
}

fn default_rewrite_prefixes() -> Vec<String> {
    vec!["m".to_string()]
}

fn default_accepted_denoms() -> Vec<String> {
    vec!["atom".to_string()]
}

impl Default for DenomPolicy {
    fn default() -> Self {
        Self {
            base_prefix: default_base_prefix(),
            rewrite_prefixes: default_rewrite_prefixes(),
        }
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            policy: DenomPolicy::default(),
            accepted_denoms: default_accepted_denoms(),
        }
    }
}

impl RendererConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let config: Self = serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Prefixes, longest first, that may precede an accepted denom.
    pub fn magnitude_prefixes(&self) -> Vec<&str> {
        let mut prefixes: Vec<&str> = std::iter::once(self.policy.base_prefix.as_str())
            .chain(self.policy.rewrite_prefixes.iter().map(String::as_str))
            .filter(|p| !p.is_empty())
            .collect();
        prefixes.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
        prefixes.dedup();
        prefixes
    }

    /// Prefixes and denoms must be alphabetic so a parsed coin splits
    /// cleanly into digits and denom.
    pub fn validate(&self) -> Result<(), Error> {
        if self.accepted_denoms.is_empty() {
            return Err(Error::Config("acceptedDenoms must not be empty".to_string()));
        }

        for denom in &self.accepted_denoms {
            if denom.is_empty() || !is_alphabetic(denom) {
                return Err(Error::Config(format!(
                    "accepted denom `{denom}` must be non-empty and alphabetic"
                )));
            }
        }

        let prefixes = std::iter::once(&self.policy.base_prefix).chain(&self.policy.rewrite_prefixes);
        for prefix in prefixes {
            if !is_alphabetic(prefix) {
                return Err(Error::Config(format!("prefix `{prefix}` must be alphabetic")));
            }
        }

        if self.policy.rewrite_prefixes.iter().any(|p| p.is_empty()) {
            return Err(Error::Config("rewrite prefixes must not be empty".to_string()));
        }

        Ok(())
    }
}

fn is_alphabetic(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_alphabetic())
}
