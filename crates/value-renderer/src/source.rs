use std::collections::HashMap;
use std::future::Future;

use crate::error::LookupError;
use crate::types::metadata::Metadata;

/// Trait for denomination metadata providers (bank keeper, gRPC query,
/// in-memory table, ...).
pub trait MetadataSource {
    /// Look up metadata by base denom.
    fn metadata(&self, denom: &str) -> impl Future<Output = Result<Metadata, LookupError>> + Send;
}

impl<S: MetadataSource + Sync> MetadataSource for &S {
    fn metadata(&self, denom: &str) -> impl Future<Output = Result<Metadata, LookupError>> + Send {
        (**self).metadata(denom)
    }
}

/// A source with no metadata; every lookup is not-found.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyMetadataSource;

impl MetadataSource for EmptyMetadataSource {
    fn metadata(&self, denom: &str) -> impl Future<Output = Result<Metadata, LookupError>> + Send {
        let denom = denom.to_string();
        async move { Err(LookupError::NotFound { denom }) }
    }
}

/// In-memory metadata source keyed by base denom.
#[derive(Debug, Clone)]
pub struct StaticMetadataSource {
    entries: HashMap<String, Metadata>,
}

impl StaticMetadataSource {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Add metadata under its base denom, replacing any previous entry.
    pub fn insert(&mut self, metadata: Metadata) {
        self.entries.insert(metadata.base.clone(), metadata);
    }

    /// Add metadata from bank-module JSON after checking its invariants.
    pub fn add_json(&mut self, json: &str) -> Result<(), LookupError> {
        let metadata = Metadata::from_json(json).map_err(|e| LookupError::Parse(e.to_string()))?;
        metadata
            .validate()
            .map_err(|e| LookupError::Parse(e.to_string()))?;
        self.insert(metadata);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for StaticMetadataSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataSource for StaticMetadataSource {
    fn metadata(&self, denom: &str) -> impl Future<Output = Result<Metadata, LookupError>> + Send {
        let result = self
            .entries
            .get(denom)
            .cloned()
            .ok_or_else(|| LookupError::NotFound {
                denom: denom.to_string(),
            });
        async move { result }
    }
}
