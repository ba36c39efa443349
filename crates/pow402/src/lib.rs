//! Proof-of-work monetization for HTTP resources.
//!
//! Otherwise-free resources are paid for with mining shares: a client
//! subscribes, fetches a work assignment from a mining-coordination
//! service, solves it, and attaches the resulting share evidence to its
//! requests. The gateway validates the evidence and rejects reuse.
//!
//! # Components
//!
//! - [`FreeEndpointSet`]: paths exempt from payment
//! - [`evidence`]: multi-source extraction of share evidence
//! - [`canonical`]: canonical share fingerprints, robust to re-encoding
//! - [`ReplayGuard`]: bounded history of spent shares
//! - [`MonetizationGate`]: the serve-or-reject decision per request
//! - [`SubscriptionRegistry`] / [`MiningCoordinator`]: work distribution

pub mod canonical;
pub mod constants;
pub mod difficulty;
pub mod endpoint;
pub mod error;
pub mod evidence;
pub mod gate;
pub mod replay;
pub mod stratum;

// Re-exports
pub use canonical::ShareFingerprint;
pub use constants::*;
pub use endpoint::{EndpointMatcher, FreeEndpointSet};
pub use error::MalformedEvidence;
pub use evidence::{EvidenceSources, PaymentEvidence};
pub use gate::{GateDecision, MonetizationGate};
pub use replay::ReplayGuard;
pub use stratum::{MiningCoordinator, SubscriptionInfo, SubscriptionRegistry, WorkAssignment};
