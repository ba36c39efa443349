use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use pow402::constants::{PREVIOUS_BLOCK_HASH_FIELD, SHARE_DIFFICULTY_FIELD};
use pow402::difficulty;

use crate::error::GatewayError;
use crate::metrics::WORK_ASSIGNMENTS_TOTAL;
use crate::response;
use crate::routes::bad_method;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct WorkQuery {
    #[serde(rename = "subscriptionId")]
    subscription_id: Option<String>,
}

/// GET /get-work?subscriptionId=<hex> - Fetch the current work
/// assignment for a subscribed worker.
pub async fn get_work(
    query: web::Query<WorkQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, GatewayError> {
    let subscription_id = query
        .subscription_id
        .as_deref()
        .ok_or(GatewayError::UnknownSubscription)?;
    let worker_id = state
        .registry
        .worker_id(subscription_id)
        .ok_or(GatewayError::UnknownSubscription)?;

    let coordinator = Arc::clone(&state.coordinator);
    let mut assignment = web::block(move || coordinator.work_assignment(worker_id, true))
        .await
        .map_err(|_| GatewayError::WorkUnavailable)?
        .ok_or(GatewayError::WorkUnavailable)?;

    if let Some(message) = assignment.payload.as_object_mut() {
        // The coordinator reports the previous block hash in its
        // internal word order; un-swab it before handing out the work.
        let swabbed = message
            .get(PREVIOUS_BLOCK_HASH_FIELD)
            .and_then(|value| value.as_str())
            .and_then(|hash_hex| hex::decode(hash_hex).ok())
            .map(|bytes| hex::encode(difficulty::swab(&bytes)));
        if let Some(hash_hex) = swabbed {
            message.insert(
                PREVIOUS_BLOCK_HASH_FIELD.to_string(),
                serde_json::json!(hash_hex),
            );
        }

        message.insert(
            SHARE_DIFFICULTY_FIELD.to_string(),
            serde_json::json!(state.share_difficulty_hex),
        );
    }

    WORK_ASSIGNMENTS_TOTAL.inc();
    tracing::debug!(worker_id, "work assignment served");

    Ok(HttpResponse::Ok().json(response::success_with_result(assignment.payload)))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/get-work", web::get().to(get_work))
        .route("/get-work", web::to(bad_method));
}
