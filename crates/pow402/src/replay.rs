//! Replay protection for accepted shares.

use dashmap::DashSet;

use crate::canonical::ShareFingerprint;
use crate::constants::DEFAULT_SHARE_HISTORY_CAPACITY;

/// Bounded, in-memory history of accepted share fingerprints.
///
/// Membership and insertion are one atomic operation. The history is
/// volatile: a restart forgets prior shares, an accepted risk window.
pub struct ReplayGuard {
    shares: DashSet<ShareFingerprint>,
    capacity: usize,
}

impl ReplayGuard {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_SHARE_HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            shares: DashSet::new(),
            capacity,
        }
    }

    /// Atomically record a fingerprint. Returns `true` iff it was not
    /// already present; at most one of any number of concurrent calls
    /// with the same fingerprint observes `true`.
    ///
    /// When the history reaches capacity immediately after an insert,
    /// the whole set is cleared, including the entry just inserted. A
    /// clear racing an in-flight admit may drop that admit's entry;
    /// this loses replay protection for one entry, nothing more.
    pub fn admit(&self, fingerprint: ShareFingerprint) -> bool {
        if !self.shares.insert(fingerprint) {
            return false;
        }
        if self.shares.len() >= self.capacity {
            tracing::debug!(capacity = self.capacity, "share history full, resetting");
            self.shares.clear();
        }
        true
    }

    pub fn len(&self) -> usize {
        self.shares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }
}

impl Default for ReplayGuard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fp(byte: u8) -> ShareFingerprint {
        ShareFingerprint::from_bytes([byte; 32])
    }

    #[test]
    fn admit_is_true_exactly_once() {
        let guard = ReplayGuard::new();
        assert!(guard.admit(fp(0x01)));
        assert!(!guard.admit(fp(0x01)));
        assert!(!guard.admit(fp(0x01)));
        assert!(guard.admit(fp(0x02)));
    }

    #[test]
    fn reaching_capacity_clears_the_history() {
        let guard = ReplayGuard::with_capacity(4);
        for byte in 0..4 {
            assert!(guard.admit(fp(byte)));
        }
        // The fourth insert hit capacity; everything was cleared,
        // including the fourth entry itself.
        assert!(guard.is_empty());
        assert!(guard.admit(fp(0)));
        assert!(guard.admit(fp(3)));
    }

    #[test]
    fn below_capacity_history_is_retained() {
        let guard = ReplayGuard::with_capacity(4);
        assert!(guard.admit(fp(0)));
        assert!(guard.admit(fp(1)));
        assert!(guard.admit(fp(2)));
        assert_eq!(guard.len(), 3);
        assert!(!guard.admit(fp(1)));
    }
}
