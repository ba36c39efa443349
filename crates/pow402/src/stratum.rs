//! The mining-coordination collaborator and subscription bookkeeping.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::evidence::PaymentEvidence;

/// Narrow handle onto the mining-coordination service.
///
/// The coordinator is authoritative for proof-of-work correctness and
/// for binding a share to a currently-issued work assignment; the gate
/// never re-derives that judgment. Calls are synchronous black boxes
/// (implementations may block); `None`/`false` signal failure.
pub trait MiningCoordinator: Send + Sync {
    /// Register a worker and produce its subscription response.
    /// `None` signals the coordinator cannot allocate a work context.
    fn register_subscriber(&self, worker_id: u64) -> Option<SubscriptionInfo>;

    /// Fetch the current work assignment for a worker. The coordinator
    /// applies its own refresh and invalidation policy.
    fn work_assignment(&self, worker_id: u64, refresh: bool) -> Option<WorkAssignment>;

    /// Validate submitted share evidence against the currently assigned
    /// work. `true` means cryptographically and contextually valid.
    fn submit_evidence(&self, evidence: &PaymentEvidence) -> bool;

    /// Scale the difficulty the coordinator expects from paywall
    /// shares, independent of its network-facing difficulty.
    fn set_paywall_threshold(&self, multiplier: u64);

    /// Report paywall difficulty inverted relative to network
    /// difficulty (larger target, easier shares).
    fn invert_threshold_reporting(&self, inverted: bool);
}

/// Subscription response produced by the coordinator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionInfo {
    /// Coordinator-issued subscription identifier (hex).
    #[serde(rename = "subscriptionId")]
    pub subscription_id: String,
    /// Full subscription message, forwarded to the client verbatim.
    pub payload: Value,
}

/// A work assignment message. Treated as an opaque payload apart from
/// the previous-block-hash byte-order correction and the appended
/// share difficulty field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkAssignment {
    pub payload: Value,
}

/// Maps coordinator-issued subscription ids to internal worker ids.
///
/// Worker ids come from a single atomic counter starting at 1; a
/// subscription id maps to exactly one worker id for the life of the
/// process. Entries are never removed.
pub struct SubscriptionRegistry {
    worker_id_counter: AtomicU64,
    worker_ids: DashMap<String, u64>,
}

impl SubscriptionRegistry {
    pub fn new() -> Self {
        Self {
            worker_id_counter: AtomicU64::new(0),
            worker_ids: DashMap::new(),
        }
    }

    /// Allocate the next worker id. Ids are unique and start at 1.
    pub fn allocate_worker_id(&self) -> u64 {
        self.worker_id_counter.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Bind a subscription id to a worker id. Ids are hex strings and
    /// are case-normalized on both write and read.
    pub fn bind(&self, subscription_id: &str, worker_id: u64) {
        self.worker_ids
            .insert(subscription_id.to_ascii_lowercase(), worker_id);
    }

    pub fn worker_id(&self, subscription_id: &str) -> Option<u64> {
        self.worker_ids
            .get(&subscription_id.to_ascii_lowercase())
            .map(|entry| *entry)
    }

    pub fn len(&self) -> usize {
        self.worker_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.worker_ids.is_empty()
    }
}

impl Default for SubscriptionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worker_ids_start_at_one_and_increase() {
        let registry = SubscriptionRegistry::new();
        assert_eq!(registry.allocate_worker_id(), 1);
        assert_eq!(registry.allocate_worker_id(), 2);
        assert_eq!(registry.allocate_worker_id(), 3);
    }

    #[test]
    fn bind_and_lookup_are_case_insensitive() {
        let registry = SubscriptionRegistry::new();
        registry.bind("ABC123", 7);
        assert_eq!(registry.worker_id("abc123"), Some(7));
        assert_eq!(registry.worker_id("ABC123"), Some(7));
        assert_eq!(registry.worker_id("abc124"), None);
    }

    #[test]
    fn rebinding_replaces_the_worker_id() {
        let registry = SubscriptionRegistry::new();
        registry.bind("abc123", 1);
        registry.bind("abc123", 2);
        assert_eq!(registry.worker_id("abc123"), Some(2));
        assert_eq!(registry.len(), 1);
    }
}
