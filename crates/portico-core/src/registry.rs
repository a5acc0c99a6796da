//! Registry of trusted relying parties.
//!
//! The registry is owned elsewhere in the server; this core only scans it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// A registered relying party.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredService {
    /// Service name, unique by convention (duplicates are a registry
    /// integrity issue and are not resolved here).
    pub name: String,
    /// Free-form description of the service.
    pub description: String,
}

impl RegisteredService {
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Read-only view over the externally owned service registry.
#[async_trait]
pub trait ServiceRegistry: Send + Sync {
    /// Snapshot of all registered services, in the registry's natural
    /// enumeration order.
    async fn all_services(&self) -> Vec<RegisteredService>;
}

/// In-memory service registry.
///
/// Reference implementation for tests and embedding. Enumeration order is
/// insertion order.
#[derive(Debug, Default)]
pub struct InMemoryServiceRegistry {
    services: RwLock<Vec<RegisteredService>>,
}

impl InMemoryServiceRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a service.
    pub async fn register(&self, service: RegisteredService) {
        tracing::debug!(name = %service.name, "service registered");
        self.services.write().await.push(service);
    }
}

#[async_trait]
impl ServiceRegistry for InMemoryServiceRegistry {
    async fn all_services(&self) -> Vec<RegisteredService> {
        self.services.read().await.clone()
    }
}
