//! HTTP client for a remote mining-coordination service.

use std::sync::OnceLock;
use std::time::Duration;

use serde_json::Value;

use pow402::evidence::PaymentEvidence;
use pow402::stratum::{MiningCoordinator, SubscriptionInfo, WorkAssignment};

/// [`MiningCoordinator`] backed by a coordination service's HTTP API.
///
/// Calls block; invoke them through `web::block` (or another blocking
/// pool), never directly on the async workers. The client itself is
/// built lazily on first use for the same reason.
pub struct HttpCoordinator {
    base_url: String,
    client: OnceLock<reqwest::blocking::Client>,
}

impl HttpCoordinator {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: OnceLock::new(),
        }
    }

    fn client(&self) -> &reqwest::blocking::Client {
        self.client.get_or_init(|| {
            reqwest::blocking::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default()
        })
    }

    fn post_json(&self, path: &str, body: &Value) -> Option<Value> {
        let url = format!("{}{}", self.base_url, path);
        let response = match self.client().post(&url).json(body).send() {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(%url, error = %e, "coordinator request failed");
                return None;
            }
        };
        if !response.status().is_success() {
            tracing::warn!(%url, status = %response.status(), "coordinator call rejected");
            return None;
        }
        response.json().ok()
    }
}

impl MiningCoordinator for HttpCoordinator {
    fn register_subscriber(&self, worker_id: u64) -> Option<SubscriptionInfo> {
        let payload = self.post_json(
            "/subscribers",
            &serde_json::json!({ "workerId": worker_id }),
        )?;
        let subscription_id = payload.get("subscriptionId")?.as_str()?.to_string();
        Some(SubscriptionInfo {
            subscription_id,
            payload,
        })
    }

    fn work_assignment(&self, worker_id: u64, refresh: bool) -> Option<WorkAssignment> {
        let url = format!("{}/work/{}?refresh={}", self.base_url, worker_id, refresh);
        let response = self.client().get(&url).send().ok()?;
        if !response.status().is_success() {
            return None;
        }
        let payload: Value = response.json().ok()?;
        Some(WorkAssignment { payload })
    }

    fn submit_evidence(&self, evidence: &PaymentEvidence) -> bool {
        self.post_json("/shares", &evidence.to_json())
            .and_then(|response| response.get("accepted").and_then(Value::as_bool))
            .unwrap_or(false)
    }

    fn set_paywall_threshold(&self, multiplier: u64) {
        let body = serde_json::json!({ "multiplier": multiplier });
        if self.post_json("/paywall-threshold", &body).is_none() {
            tracing::warn!(multiplier, "failed to set paywall threshold on coordinator");
        }
    }

    fn invert_threshold_reporting(&self, inverted: bool) {
        let body = serde_json::json!({ "inverted": inverted });
        if self.post_json("/paywall-threshold/inverted", &body).is_none() {
            tracing::warn!(inverted, "failed to set threshold reporting on coordinator");
        }
    }
}
