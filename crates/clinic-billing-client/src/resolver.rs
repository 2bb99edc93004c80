//! Logical service name resolution.
//!
//! The billing service is addressed by the logical name `billing-service`
//! rather than a fixed host. How that name maps to a reachable base URL
//! (static wiring, a service registry, DNS) is deployment-specific, so the
//! client only depends on the narrow [`ServiceResolver`] seam.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Url;

use crate::error::TransportError;

/// Resolves a logical service name to a reachable base URL.
#[async_trait]
pub trait ServiceResolver: Send + Sync + std::fmt::Debug {
    /// Resolve `service` to the base URL requests should be issued against.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Resolve`] if the name is unknown or the
    /// lookup fails.
    async fn resolve(&self, service: &str) -> Result<Url, TransportError>;
}

/// A resolver backed by a fixed name-to-URL table.
///
/// Suitable for deployments with static wiring and for tests. Registry-backed
/// resolvers implement [`ServiceResolver`] the same way.
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    services: HashMap<String, Url>,
}

impl StaticResolver {
    /// Create an empty resolver.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a service at a base URL.
    #[must_use]
    pub fn with_service(mut self, service: impl Into<String>, url: Url) -> Self {
        self.services.insert(service.into(), url);
        self
    }
}

#[async_trait]
impl ServiceResolver for StaticResolver {
    async fn resolve(&self, service: &str) -> Result<Url, TransportError> {
        self.services
            .get(service)
            .cloned()
            .ok_or_else(|| TransportError::Resolve {
                service: service.to_string(),
                reason: "unknown service".to_string(),
            })
    }
}
