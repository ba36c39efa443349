use std::sync::Arc;

use pow402::difficulty;
use pow402::stratum::MiningCoordinator;
use pow402::{FreeEndpointSet, MonetizationGate, ReplayGuard, SubscriptionRegistry};

use crate::config::GatewayConfig;

/// Shared application state.
///
/// Every gate dependency is owned here and injected at construction, so
/// independent gateway instances can coexist (each with its own replay
/// history and worker-id space).
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    pub coordinator: Arc<dyn MiningCoordinator>,
    pub gate: Arc<MonetizationGate>,
    pub registry: Arc<SubscriptionRegistry>,
    /// Paywall share target, hex-encoded for work assignment payloads.
    pub share_difficulty_hex: String,
}

impl AppState {
    pub fn new(config: GatewayConfig, coordinator: Arc<dyn MiningCoordinator>) -> Self {
        let mut free_endpoints = FreeEndpointSet::new();
        for rule in &config.free_endpoints {
            free_endpoints.add(&rule.pattern, rule.strict);
        }

        let replay_guard = ReplayGuard::with_capacity(config.share_history_capacity);
        let gate = MonetizationGate::new(free_endpoints, replay_guard, Arc::clone(&coordinator));
        let share_difficulty_hex = hex::encode(difficulty::paywall_target(config.paywall_multiplier));

        Self {
            config: Arc::new(config),
            coordinator,
            gate: Arc::new(gate),
            registry: Arc::new(SubscriptionRegistry::new()),
            share_difficulty_hex,
        }
    }

    /// Push the paywall difficulty policy to the coordinator. Called
    /// once at startup, off the async runtime (the coordinator call may
    /// block).
    pub fn configure_coordinator(&self) {
        self.coordinator
            .set_paywall_threshold(self.config.paywall_multiplier);
        self.coordinator.invert_threshold_reporting(true);
    }
}
