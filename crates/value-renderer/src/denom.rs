use crate::types::config::DenomPolicy;

/// Maps display or scaled denoms to the base-unit denom used as the
/// metadata lookup key.
#[derive(Debug, Clone)]
pub struct DenomNormalizer {
    policy: DenomPolicy,
}

impl DenomNormalizer {
    pub fn new(policy: DenomPolicy) -> Self {
        Self { policy }
    }

    /// Base-unit form of `denom`.
    ///
    /// With the default policy: `uatom` stays `uatom`, `matom` becomes
    /// `uatom`, and a bare `atom` becomes `uatom`.
    pub fn normalize(&self, denom: &str) -> String {
        let base = &self.policy.base_prefix;
        if denom.starts_with(base.as_str()) {
            return denom.to_string();
        }

        for prefix in &self.policy.rewrite_prefixes {
            if let Some(rest) = denom.strip_prefix(prefix.as_str()) {
                return format!("{base}{rest}");
            }
        }

        format!("{base}{denom}")
    }
}

impl Default for DenomNormalizer {
    fn default() -> Self {
        Self::new(DenomPolicy::default())
    }
}
