// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::offramp::OfframpProviderRegistry;

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<OfframpProviderRegistry>,
    /// Bearer token guarding admin routes; `None` disables them.
    pub admin_token: Option<Arc<str>>,
}

impl AppState {
    pub fn new(registry: Arc<OfframpProviderRegistry>, admin_token: Option<String>) -> Self {
        Self {
            registry,
            admin_token: admin_token.map(Arc::from),
        }
    }
}

#[cfg(test)]
impl Default for AppState {
    /// Built-in providers registered, admin routes disabled.
    fn default() -> Self {
        let registry = OfframpProviderRegistry::new();
        crate::offramp::initialize_offramp_providers(&registry);
        Self::new(Arc::new(registry), None)
    }
}
