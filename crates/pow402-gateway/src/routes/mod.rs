pub mod health;
pub mod paywall;
pub mod subscribe;
pub mod work;

use actix_web::HttpResponse;

use crate::error::GatewayError;

/// Handler for unsupported methods on API endpoints.
pub async fn bad_method() -> Result<HttpResponse, GatewayError> {
    Err(GatewayError::BadRequest)
}
