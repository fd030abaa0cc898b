use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Largest exponent a denom unit may carry.
pub const MAX_EXPONENT: u32 = 36;

/// Denomination metadata of a single token, in the bank module's JSON shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub description: String,

    /// Units of this token, ordered by exponent.
    #[serde(default)]
    pub denom_units: Vec<DenomUnit>,

    /// Smallest unit of the token; must be listed with exponent 0.
    pub base: String,

    /// Unit preferred for display to end users.
    pub display: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub symbol: String,

    #[serde(default)]
    pub uri: String,

    #[serde(default)]
    pub uri_hash: String,
}

/// A denomination unit and its power-of-ten scale relative to the base unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DenomUnit {
    pub denom: String,

    #[serde(default)]
    pub exponent: u32,

    #[serde(default)]
    pub aliases: Vec<String>,
}

impl DenomUnit {
    pub fn new(denom: impl Into<String>, exponent: u32) -> Self {
        Self {
            denom: denom.into(),
            exponent,
            aliases: Vec::new(),
        }
    }
}

impl Metadata {
    /// Parse metadata from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Exponent of a listed unit, or `None` if the denom is not listed.
    pub fn exponent_of(&self, denom: &str) -> Option<u32> {
        self.denom_units
            .iter()
            .find(|unit| unit.denom == denom)
            .map(|unit| unit.exponent)
    }

    /// Check that base and display are each listed exactly once, that
    /// base has exponent 0, and that no exponent exceeds [`MAX_EXPONENT`].
    pub fn validate(&self) -> Result<(), Error> {
        for unit in &self.denom_units {
            check_exponent(&unit.denom, unit.exponent)?;
        }

        let base_units: Vec<&DenomUnit> = self
            .denom_units
            .iter()
            .filter(|unit| unit.denom == self.base)
            .collect();
        match base_units.as_slice() {
            [unit] if unit.exponent == 0 => {}
            [unit] => {
                return Err(Error::InvalidMetadata(format!(
                    "base denom `{}` has exponent {}, expected 0",
                    self.base, unit.exponent
                )))
            }
            units => {
                return Err(Error::InvalidMetadata(format!(
                    "base denom `{}` listed {} times, expected once",
                    self.base,
                    units.len()
                )))
            }
        }

        let display_count = self
            .denom_units
            .iter()
            .filter(|unit| unit.denom == self.display)
            .count();
        if display_count != 1 {
            return Err(Error::InvalidMetadata(format!(
                "display denom `{}` listed {} times, expected once",
                self.display, display_count
            )));
        }

        Ok(())
    }
}

/// Reject exponents above [`MAX_EXPONENT`].
pub fn check_exponent(denom: &str, exponent: u32) -> Result<(), Error> {
    if exponent > MAX_EXPONENT {
        return Err(Error::InvalidMetadata(format!(
            "denom `{denom}` has exponent {exponent}, maximum is {MAX_EXPONENT}"
        )));
    }
    Ok(())
}
