// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Startup population of the provider registry.

use std::sync::Arc;

use tracing::{info, warn};

use super::registry::OfframpProviderRegistry;
use crate::config::OfframpConfig;
use crate::providers::{IdrxProvider, PayrampProvider};

/// Priority every built-in provider is registered at.
pub const BUILTIN_PROVIDER_PRIORITY: i32 = 10;

/// Register the built-in providers. Returns the number registered.
///
/// Registration order is Payramp then IDRX, which decides ties.
pub fn initialize_offramp_providers(registry: &OfframpProviderRegistry) -> usize {
    registry.register(
        Arc::new(PayrampProvider::new()),
        BUILTIN_PROVIDER_PRIORITY,
        true,
    );
    registry.register(Arc::new(IdrxProvider::new()), BUILTIN_PROVIDER_PRIORITY, true);

    let stats = registry.get_stats();
    info!(
        total = stats.total,
        enabled = stats.enabled,
        "Offramp providers initialized"
    );
    stats.total
}

/// Register the built-in providers, then disable the ones turned off in
/// configuration.
pub fn initialize_with_config(registry: &OfframpProviderRegistry, config: &OfframpConfig) -> usize {
    let registered = initialize_offramp_providers(registry);

    for id in &config.disabled_providers {
        if registry.set_enabled(id, false) {
            info!(provider_id = %id, "Offramp provider disabled by configuration");
        } else {
            warn!(provider_id = %id, "OFFRAMP_DISABLED_PROVIDERS names an unknown provider");
        }
    }

    registered
}
