use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::error::GatewayError;
use crate::metrics::SUBSCRIPTIONS_TOTAL;
use crate::routes::bad_method;
use crate::state::AppState;

/// GET /subscribe - Allocate a worker id and register it with the
/// mining coordinator. The coordinator picks the subscription id; the
/// registry remembers the mapping for later get-work calls.
pub async fn subscribe(state: web::Data<AppState>) -> Result<HttpResponse, GatewayError> {
    let worker_id = state.registry.allocate_worker_id();

    let coordinator = Arc::clone(&state.coordinator);
    let info = web::block(move || coordinator.register_subscriber(worker_id))
        .await
        .map_err(|_| GatewayError::SubscribeFailed)?
        .ok_or(GatewayError::SubscribeFailed)?;

    state.registry.bind(&info.subscription_id, worker_id);
    SUBSCRIPTIONS_TOTAL.inc();
    tracing::debug!(worker_id, subscription_id = %info.subscription_id, "worker subscribed");

    Ok(HttpResponse::Ok().json(info.payload))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/subscribe", web::get().to(subscribe))
        .route("/subscribe", web::to(bad_method));
}
