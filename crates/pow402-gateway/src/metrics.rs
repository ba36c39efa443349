use prometheus::{IntCounter, IntCounterVec, Opts, Registry};
use std::sync::LazyLock;

pub static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

// Gate decisions by terminal state
pub static GATE_DECISIONS: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        Opts::new(
            "gateway_gate_decisions_total",
            "Monetization gate decisions by terminal state",
        ),
        &["decision"],
    )
    .unwrap()
});

// Work distribution counters
pub static SUBSCRIPTIONS_TOTAL: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "gateway_subscriptions_total",
        "Total number of worker subscriptions",
    )
    .unwrap()
});

pub static WORK_ASSIGNMENTS_TOTAL: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "gateway_work_assignments_total",
        "Total number of work assignments served",
    )
    .unwrap()
});

/// Register all metrics with the registry
pub fn register_metrics() {
    REGISTRY
        .register(Box::new(GATE_DECISIONS.clone()))
        .unwrap();
    REGISTRY
        .register(Box::new(SUBSCRIPTIONS_TOTAL.clone()))
        .unwrap();
    REGISTRY
        .register(Box::new(WORK_ASSIGNMENTS_TOTAL.clone()))
        .unwrap();
}
