use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use crate::response;

#[derive(Debug, Error)]
pub enum GatewayError {
    /// Malformed method or parameters
    #[error("bad request")]
    BadRequest,
    /// Subscription id not present in the registry
    #[error("invalid subscription ID")]
    UnknownSubscription,
    /// Coordinator could not allocate a work context
    #[error("unable to subscribe worker")]
    SubscribeFailed,
    /// Coordinator could not produce a work assignment
    #[error("unable to generate work")]
    WorkUnavailable,
    /// No, invalid, or replayed payment evidence
    #[error("payment required")]
    PaymentRequired,
}

impl ResponseError for GatewayError {
    fn error_response(&self) -> HttpResponse {
        match self {
            GatewayError::BadRequest => {
                HttpResponse::BadRequest().json(response::error_envelope(400, "Bad request."))
            }
            GatewayError::UnknownSubscription => HttpResponse::BadRequest()
                .json(response::error_envelope(400, "Invalid subscription ID.")),
            GatewayError::SubscribeFailed => HttpResponse::InternalServerError()
                .json(response::error_envelope(500, "Unable to subscribe worker.")),
            GatewayError::WorkUnavailable => HttpResponse::InternalServerError()
                .json(response::error_envelope(500, "Unable to generate work.")),
            // No failure detail crosses the payment boundary.
            GatewayError::PaymentRequired => response::payment_required(),
        }
    }
}
