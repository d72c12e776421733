// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Offramp Provider Registry
//!
//! Owns the set of registered settlement providers and answers "which
//! provider should handle this (country, chain, token)" queries.
//!
//! ## Ordering
//!
//! Providers are ranked by `priority`, highest first. Equal priorities keep
//! registration order, so the provider registered first wins a tie.
//! Re-registering an id replaces the entry in place and keeps its original
//! registration slot.
//!
//! ## Sharing
//!
//! One registry is built at startup and shared as
//! `Arc<OfframpProviderRegistry>`. Entries sit behind a `RwLock`; a poisoned
//! lock is recovered rather than propagated since every write leaves the map
//! consistent.

use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use indexmap::IndexMap;
use tracing::{info, warn};

use super::provider::OfframpProvider;
use super::types::{ChainId, ProviderStatsSummary, RegistryStats};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("offramp provider `{0}` is already registered")]
    AlreadyRegistered(String),
}

/// A registered provider with its ranking state.
#[derive(Clone)]
pub struct RegistryEntry {
    pub provider: Arc<dyn OfframpProvider>,
    pub priority: i32,
    pub enabled: bool,
}

impl fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryEntry")
            .field("provider", &self.provider.id())
            .field("priority", &self.priority)
            .field("enabled", &self.enabled)
            .finish()
    }
}

/// Outcome of [`OfframpProviderRegistry::select_provider`].
#[derive(Clone)]
pub struct SelectionResult {
    /// Highest ranked supporting provider, if any.
    pub provider: Option<Arc<dyn OfframpProvider>>,
    /// Other supporting providers, in ranking order.
    pub alternatives: Vec<Arc<dyn OfframpProvider>>,
    /// Human readable explanation, safe to show to end users.
    pub reason: String,
}

impl SelectionResult {
    pub fn provider_id(&self) -> Option<&str> {
        self.provider.as_deref().map(|p| p.id())
    }

    pub fn alternative_ids(&self) -> Vec<&str> {
        self.alternatives.iter().map(|p| p.id()).collect()
    }
}

impl fmt::Debug for SelectionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionResult")
            .field("provider", &self.provider_id())
            .field("alternatives", &self.alternative_ids())
            .field("reason", &self.reason)
            .finish()
    }
}

/// Registry of offramp settlement providers keyed by provider id.
#[derive(Default)]
pub struct OfframpProviderRegistry {
    entries: RwLock<IndexMap<String, RegistryEntry>>,
}

impl OfframpProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, IndexMap<String, RegistryEntry>> {
        self.entries.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, IndexMap<String, RegistryEntry>> {
        self.entries.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Register a provider, replacing any entry with the same id.
    pub fn register(&self, provider: Arc<dyn OfframpProvider>, priority: i32, enabled: bool) {
        let id = provider.id().to_string();
        let mut entries = self.write();

        if entries.contains_key(&id) {
            warn!(
                provider_id = %id,
                "Offramp provider already registered, overwriting"
            );
        }

        entries.insert(
            id.clone(),
            RegistryEntry {
                provider,
                priority,
                enabled,
            },
        );

        info!(
            provider_id = %id,
            priority,
            enabled,
            "Registered offramp provider"
        );
    }

    /// Register a provider, refusing to replace an existing entry.
    pub fn try_register(
        &self,
        provider: Arc<dyn OfframpProvider>,
        priority: i32,
        enabled: bool,
    ) -> Result<(), RegistryError> {
        let id = provider.id().to_string();
        let mut entries = self.write();

        if entries.contains_key(&id) {
            return Err(RegistryError::AlreadyRegistered(id));
        }

        entries.insert(
            id.clone(),
            RegistryEntry {
                provider,
                priority,
                enabled,
            },
        );
        info!(provider_id = %id, priority, enabled, "Registered offramp provider");
        Ok(())
    }

    /// Remove a provider. Returns `false` if it was not registered.
    pub fn unregister(&self, id: &str) -> bool {
        let removed = self.write().shift_remove(id).is_some();
        if removed {
            info!(provider_id = %id, "Unregistered offramp provider");
        } else {
            warn!(provider_id = %id, "Cannot unregister unknown offramp provider");
        }
        removed
    }

    /// Enable or disable a provider. Returns `false` if it is not registered.
    pub fn set_enabled(&self, id: &str, enabled: bool) -> bool {
        match self.write().get_mut(id) {
            Some(entry) => {
                entry.enabled = enabled;
                info!(provider_id = %id, enabled, "Offramp provider toggled");
                true
            }
            None => {
                warn!(provider_id = %id, "Cannot toggle unknown offramp provider");
                false
            }
        }
    }

    /// Change a provider's priority. Returns `false` if it is not registered.
    pub fn set_priority(&self, id: &str, priority: i32) -> bool {
        match self.write().get_mut(id) {
            Some(entry) => {
                entry.priority = priority;
                info!(provider_id = %id, priority, "Offramp provider priority changed");
                true
            }
            None => {
                warn!(provider_id = %id, "Cannot reprioritize unknown offramp provider");
                false
            }
        }
    }

    /// Provider by id, only if registered and enabled.
    pub fn get_provider(&self, id: &str) -> Option<Arc<dyn OfframpProvider>> {
        self.read()
            .get(id)
            .filter(|entry| entry.enabled)
            .map(|entry| Arc::clone(&entry.provider))
    }

    /// Entries ranked by priority (highest first, ties in registration order).
    pub fn entries(&self, enabled_only: bool) -> Vec<RegistryEntry> {
        let mut ranked: Vec<RegistryEntry> = self
            .read()
            .values()
            .filter(|entry| !enabled_only || entry.enabled)
            .cloned()
            .collect();
        // stable sort: ties stay in registration order
        ranked.sort_by(|a, b| b.priority.cmp(&a.priority));
        ranked
    }

    pub fn get_all_providers(&self, enabled_only: bool) -> Vec<Arc<dyn OfframpProvider>> {
        self.entries(enabled_only)
            .into_iter()
            .map(|entry| entry.provider)
            .collect()
    }

    /// Pick the best enabled provider for a triple.
    pub fn select_provider(&self, country: &str, chain_id: ChainId, token: &str) -> SelectionResult {
        let mut supporting = self
            .entries(true)
            .into_iter()
            .filter(|entry| entry.provider.supports(country, chain_id, token));

        let Some(primary) = supporting.next() else {
            return SelectionResult {
                provider: None,
                alternatives: Vec::new(),
                reason: format!("No provider supports {token} on chain {chain_id} in {country}"),
            };
        };

        let reason = format!(
            "Selected {} (priority {})",
            primary.provider.name(),
            primary.priority
        );

        SelectionResult {
            provider: Some(primary.provider),
            alternatives: supporting.map(|entry| entry.provider).collect(),
            reason,
        }
    }

    pub fn get_providers_for_country(&self, country: &str) -> Vec<Arc<dyn OfframpProvider>> {
        self.providers_where(|p| p.capabilities().supports_country(country))
    }

    pub fn get_providers_for_chain(&self, chain_id: ChainId) -> Vec<Arc<dyn OfframpProvider>> {
        self.providers_where(|p| p.capabilities().supports_chain(chain_id))
    }

    pub fn get_providers_for_token(&self, token: &str) -> Vec<Arc<dyn OfframpProvider>> {
        self.providers_where(|p| p.capabilities().supports_token(token))
    }

    fn providers_where<F>(&self, predicate: F) -> Vec<Arc<dyn OfframpProvider>>
    where
        F: Fn(&dyn OfframpProvider) -> bool,
    {
        self.get_all_providers(true)
            .into_iter()
            .filter(|p| predicate(p.as_ref()))
            .collect()
    }

    pub fn is_supported(&self, country: &str, chain_id: ChainId, token: &str) -> bool {
        self.select_provider(country, chain_id, token).provider.is_some()
    }

    pub fn get_stats(&self) -> RegistryStats {
        let entries = self.entries(false);
        let total = entries.len();
        let enabled = entries.iter().filter(|entry| entry.enabled).count();

        let providers = entries
            .iter()
            .filter(|entry| entry.enabled)
            .map(|entry| {
                let caps = entry.provider.capabilities();
                ProviderStatsSummary {
                    id: entry.provider.id().to_string(),
                    name: entry.provider.name().to_string(),
                    priority: entry.priority,
                    countries: caps.supported_countries.len(),
                    chains: caps.supported_chains.len(),
                    tokens: caps.supported_tokens.len(),
                }
            })
            .collect();

        RegistryStats {
            total,
            enabled,
            disabled: total - enabled,
            providers,
        }
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Remove every provider.
    pub fn clear(&self) {
        self.write().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offramp::types::{
        Currency, FormField, ProviderCapabilities, CHAIN_ARBITRUM, CHAIN_BASE, CHAIN_POLYGON,
    };

    /// Mock provider for testing.
    struct MockProvider {
        id: String,
        name: String,
        capabilities: ProviderCapabilities,
    }

    impl MockProvider {
        fn new(id: &str, countries: &[&str], chains: &[ChainId], tokens: &[&str]) -> Arc<Self> {
            Arc::new(Self {
                id: id.to_string(),
                name: format!("{id} name"),
                capabilities: ProviderCapabilities {
                    supported_countries: countries.iter().map(|c| c.to_string()).collect(),
                    supported_chains: chains.to_vec(),
                    supported_tokens: tokens.iter().map(|t| t.to_string()).collect(),
                    min_amount: None,
                    max_amount: None,
                    fees: None,
                    estimated_time: "instant".to_string(),
                },
            })
        }

        fn kenya(id: &str) -> Arc<Self> {
            Self::new(id, &["kenya"], &[CHAIN_BASE], &["USDC"])
        }
    }

    impl OfframpProvider for MockProvider {
        fn id(&self) -> &str {
            &self.id
        }

        fn name(&self) -> &str {
            &self.name
        }

        fn description(&self) -> &str {
            "mock"
        }

        fn capabilities(&self) -> &ProviderCapabilities {
            &self.capabilities
        }

        fn currency_code(&self, _country: &str) -> Option<&'static str> {
            None
        }

        fn currencies(&self, _country: &str) -> Vec<Currency> {
            Vec::new()
        }

        fn form_fields(&self) -> Vec<FormField> {
            Vec::new()
        }
    }

    #[test]
    fn reregistration_overwrites() {
        let registry = OfframpProviderRegistry::new();
        registry.register(MockProvider::kenya("dup"), 5, true);
        registry.register(
            MockProvider::new("dup", &["ghana"], &[CHAIN_POLYGON], &["USDT"]),
            9,
            true,
        );

        let provider = registry.get_provider("dup").unwrap();
        assert!(provider.supports("ghana", CHAIN_POLYGON, "USDT"));
        assert!(!provider.supports("kenya", CHAIN_BASE, "USDC"));

        let stats = registry.get_stats();
        assert_eq!(stats.total, 1);
        assert_eq!(stats.providers[0].priority, 9);
    }

    #[test]
    fn overwrite_keeps_registration_slot() {
        let registry = OfframpProviderRegistry::new();
        registry.register(MockProvider::kenya("first"), 10, true);
        registry.register(MockProvider::kenya("second"), 10, true);
        registry.register(MockProvider::kenya("first"), 10, true);

        let result = registry.select_provider("kenya", CHAIN_BASE, "USDC");
        assert_eq!(result.provider_id(), Some("first"));
    }

    #[test]
    fn try_register_refuses_duplicates() {
        let registry = OfframpProviderRegistry::new();
        registry
            .try_register(MockProvider::kenya("a"), 1, true)
            .unwrap();
        let err = registry
            .try_register(MockProvider::kenya("a"), 2, true)
            .unwrap_err();
        assert_eq!(err, RegistryError::AlreadyRegistered("a".to_string()));
        assert_eq!(registry.entries(false)[0].priority, 1);
    }

    #[test]
    fn highest_priority_wins() {
        let registry = OfframpProviderRegistry::new();
        registry.register(MockProvider::kenya("a"), 5, true);
        registry.register(MockProvider::kenya("b"), 10, true);

        let result = registry.select_provider("kenya", CHAIN_BASE, "USDC");
        assert_eq!(result.provider_id(), Some("b"));
        assert_eq!(result.alternative_ids(), ["a"]);
        assert_eq!(result.reason, "Selected b name (priority 10)");
    }

    #[test]
    fn ties_go_to_earliest_registration() {
        let registry = OfframpProviderRegistry::new();
        registry.register(MockProvider::kenya("z-first"), 10, true);
        registry.register(MockProvider::kenya("a-second"), 10, true);
        registry.register(MockProvider::kenya("m-third"), 10, true);

        let result = registry.select_provider("kenya", CHAIN_BASE, "USDC");
        assert_eq!(result.provider_id(), Some("z-first"));
        assert_eq!(result.alternative_ids(), ["a-second", "m-third"]);
    }

    #[test]
    fn unsupported_triple_never_selected() {
        let registry = OfframpProviderRegistry::new();
        registry.register(MockProvider::kenya("a"), 10, true);
        registry.register(MockProvider::new("b", &["ghana"], &[CHAIN_BASE], &["USDC"]), 20, true);

        for (country, chain, token) in [
            ("ghana", CHAIN_ARBITRUM, "USDC"),
            ("kenya", CHAIN_BASE, "USDT"),
            ("nigeria", CHAIN_BASE, "USDC"),
        ] {
            let result = registry.select_provider(country, chain, token);
            assert!(result.provider.is_none(), "{country}/{chain}/{token}");
            assert!(result.alternatives.is_empty());
        }

        let result = registry.select_provider("kenya", CHAIN_BASE, "USDC");
        assert_eq!(result.provider_id(), Some("a"));
        assert!(result.alternatives.is_empty());
    }

    #[test]
    fn disabled_provider_is_excluded() {
        let registry = OfframpProviderRegistry::new();
        registry.register(MockProvider::kenya("only"), 10, true);
        assert!(registry.set_enabled("only", false));

        let result = registry.select_provider("kenya", CHAIN_BASE, "USDC");
        assert!(result.provider.is_none());
        assert!(result.alternatives.is_empty());
        assert!(registry.get_provider("only").is_none());
        assert!(!registry.is_supported("kenya", CHAIN_BASE, "USDC"));

        assert!(registry.set_enabled("only", true));
        assert!(registry.is_supported("kenya", CHAIN_BASE, "USDC"));
    }

    #[test]
    fn disabled_at_registration() {
        let registry = OfframpProviderRegistry::new();
        registry.register(MockProvider::kenya("off"), 10, false);
        assert!(registry.get_provider("off").is_none());
        assert!(registry.get_all_providers(true).is_empty());
        assert_eq!(registry.get_all_providers(false).len(), 1);
    }

    #[test]
    fn mutations_on_missing_ids_are_noops() {
        let registry = OfframpProviderRegistry::new();
        assert!(!registry.set_enabled("ghost", true));
        assert!(!registry.set_priority("ghost", 3));
        assert!(!registry.unregister("ghost"));
        assert!(registry.is_empty());
    }

    #[test]
    fn unregister_removes_entry() {
        let registry = OfframpProviderRegistry::new();
        registry.register(MockProvider::kenya("a"), 1, true);
        assert!(registry.unregister("a"));
        assert!(registry.get_provider("a").is_none());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn unregister_twice_leaves_others() {
        let registry = OfframpProviderRegistry::new();
        registry.register(MockProvider::kenya("a"), 1, true);
        registry.register(MockProvider::kenya("b"), 2, true);

        assert!(registry.unregister("a"));
        assert!(!registry.unregister("a"));
        assert_eq!(registry.len(), 1);
        assert!(registry.get_provider("b").is_some());
    }

    #[test]
    fn set_priority_reorders() {
        let registry = OfframpProviderRegistry::new();
        registry.register(MockProvider::kenya("a"), 10, true);
        registry.register(MockProvider::kenya("b"), 5, true);
        assert!(registry.set_priority("b", 11));

        let ids: Vec<_> = registry
            .get_all_providers(true)
            .iter()
            .map(|p| p.id().to_string())
            .collect();
        assert_eq!(ids, ["b", "a"]);
    }

    #[test]
    fn no_provider_reason_names_triple() {
        let registry = OfframpProviderRegistry::new();
        let result = registry.select_provider("kenya", CHAIN_ARBITRUM, "USDT");
        assert_eq!(result.reason, "No provider supports USDT on chain 42161 in kenya");
    }

    #[test]
    fn capability_filters() {
        let registry = OfframpProviderRegistry::new();
        registry.register(MockProvider::new("a", &["kenya"], &[CHAIN_BASE], &["USDC"]), 1, true);
        registry.register(
            MockProvider::new("b", &["kenya", "ghana"], &[CHAIN_POLYGON], &["USDT"]),
            2,
            true,
        );
        registry.register(MockProvider::new("c", &["kenya"], &[CHAIN_BASE], &["USDT"]), 3, false);

        let ids = |providers: Vec<Arc<dyn OfframpProvider>>| -> Vec<String> {
            providers.iter().map(|p| p.id().to_string()).collect()
        };

        assert_eq!(ids(registry.get_providers_for_country("kenya")), ["b", "a"]);
        assert_eq!(ids(registry.get_providers_for_chain(CHAIN_BASE)), ["a"]);
        assert_eq!(ids(registry.get_providers_for_token("USDT")), ["b"]);
    }

    #[test]
    fn stats_are_idempotent() {
        let registry = OfframpProviderRegistry::new();
        registry.register(MockProvider::kenya("a"), 1, true);
        registry.register(MockProvider::kenya("b"), 2, false);

        let first = registry.get_stats();
        let second = registry.get_stats();
        assert_eq!(first, second);
        assert_eq!((first.total, first.enabled, first.disabled), (2, 1, 1));
        assert_eq!(first.providers.len(), 1);
        assert_eq!(first.providers[0].id, "a");
        assert_eq!(first.providers[0].countries, 1);
    }

    #[test]
    fn clear_empties_registry() {
        let registry = OfframpProviderRegistry::new();
        registry.register(MockProvider::kenya("a"), 1, true);
        registry.clear();
        assert!(registry.is_empty());
        assert_eq!(registry.get_stats().total, 0);
    }
}
