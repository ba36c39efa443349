//! The per-request serve-or-reject decision.

use std::sync::Arc;

use crate::canonical;
use crate::endpoint::FreeEndpointSet;
use crate::evidence::{self, EvidenceSources};
use crate::replay::ReplayGuard;
use crate::stratum::MiningCoordinator;

/// Terminal states of the payment decision.
///
/// Every non-serving state must produce the same externally-observable
/// response, so callers cannot probe which failure mode occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Path is exempt from payment.
    FreePass,
    /// No evidence in any of the three sources.
    NoEvidence,
    /// Evidence was malformed or rejected by the coordinator.
    InvalidEvidence,
    /// Evidence was valid but its fingerprint was already spent.
    Replayed,
    /// Fresh, valid evidence.
    Accepted,
}

impl GateDecision {
    /// Whether the underlying resource should be served.
    pub fn allows_access(&self) -> bool {
        matches!(self, GateDecision::FreePass | GateDecision::Accepted)
    }

    /// Stable label for logging and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            GateDecision::FreePass => "free_pass",
            GateDecision::NoEvidence => "no_evidence",
            GateDecision::InvalidEvidence => "invalid_evidence",
            GateDecision::Replayed => "replayed",
            GateDecision::Accepted => "accepted",
        }
    }
}

/// Decides, per request, whether payment evidence earns access.
///
/// All dependencies are injected at construction; independent gate
/// instances can coexist, each with its own replay history.
pub struct MonetizationGate {
    free_endpoints: FreeEndpointSet,
    replay_guard: ReplayGuard,
    coordinator: Arc<dyn MiningCoordinator>,
}

impl MonetizationGate {
    pub fn new(
        free_endpoints: FreeEndpointSet,
        replay_guard: ReplayGuard,
        coordinator: Arc<dyn MiningCoordinator>,
    ) -> Self {
        Self {
            free_endpoints,
            replay_guard,
            coordinator,
        }
    }

    /// Run the full decision pipeline for one request.
    ///
    /// Free paths short-circuit before extraction. Malformed evidence
    /// never reaches the coordinator; it is indistinguishable from
    /// coordinator-rejected evidence from the outside.
    pub fn evaluate(&self, path: &str, sources: &EvidenceSources) -> GateDecision {
        if self.free_endpoints.is_free(path) {
            return GateDecision::FreePass;
        }

        let Some(evidence) = evidence::extract(sources) else {
            return GateDecision::NoEvidence;
        };

        let fingerprint = match canonical::fingerprint(&evidence) {
            Ok(fingerprint) => fingerprint,
            Err(err) => {
                tracing::debug!(%err, "malformed share evidence");
                return GateDecision::InvalidEvidence;
            }
        };

        if !self.coordinator.submit_evidence(&evidence) {
            return GateDecision::InvalidEvidence;
        }

        if !self.replay_guard.admit(fingerprint) {
            return GateDecision::Replayed;
        }

        GateDecision::Accepted
    }
}
