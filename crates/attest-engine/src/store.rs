//! # Answer Store Boundary
//!
//! The engine computes; callers own storage. [`AnswerStore`] is the
//! key-value collaborator the owning application implements over its
//! real backend — one answer map per `(tenant, process)`, last write
//! wins, no transactional guarantees. The engine never calls it; it
//! exists so the surrounding product and the tests share one seam.
//!
//! [`MemoryAnswerStore`] is the in-process reference implementation.

use std::collections::HashMap;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use attest_core::AnswerMap;

/// Unique identifier for a tenant organisation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TenantId(pub Uuid);

impl TenantId {
    /// Generate a new random tenant identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TenantId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TenantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tenant:{}", self.0)
    }
}

/// Key-value storage of answer maps per `(tenant, process)`.
///
/// Implementations provide durability only; merge policy is the
/// caller's (the debounced autosave writes whole maps, last write
/// wins). Backend faults surface at the implementor's boundary, not
/// through this trait.
pub trait AnswerStore {
    /// The stored answers, or an empty map when none exist yet.
    fn load(&self, tenant: &TenantId, process_id: &str) -> AnswerMap;

    /// Replace the stored answers.
    fn save(&self, tenant: &TenantId, process_id: &str, answers: AnswerMap);

    /// Remove the stored answers (the explicit clear).
    fn clear(&self, tenant: &TenantId, process_id: &str);
}

/// In-memory answer store for tests and tooling.
#[derive(Debug, Default)]
pub struct MemoryAnswerStore {
    entries: RwLock<HashMap<(TenantId, String), AnswerMap>>,
}

impl MemoryAnswerStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl AnswerStore for MemoryAnswerStore {
    fn load(&self, tenant: &TenantId, process_id: &str) -> AnswerMap {
        self.entries
            .read()
            .get(&(tenant.clone(), process_id.to_string()))
            .cloned()
            .unwrap_or_default()
    }

    fn save(&self, tenant: &TenantId, process_id: &str, answers: AnswerMap) {
        self.entries
            .write()
            .insert((tenant.clone(), process_id.to_string()), answers);
    }

    fn clear(&self, tenant: &TenantId, process_id: &str) {
        self.entries
            .write()
            .remove(&(tenant.clone(), process_id.to_string()));
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
