//! Uniform JSON envelopes for API responses.

use actix_web::HttpResponse;
use serde_json::{json, Value};

/// Standard success envelope.
pub fn success_envelope() -> Value {
    json!({
        "wasSuccess": 1,
        "errorCode": null,
        "errorMessage": null,
    })
}

/// Success envelope with an embedded result.
pub fn success_with_result(result: Value) -> Value {
    let mut envelope = success_envelope();
    envelope["result"] = result;
    envelope
}

/// Standard error envelope.
pub fn error_envelope(error_code: u16, error_message: &str) -> Value {
    json!({
        "wasSuccess": 0,
        "errorCode": error_code,
        "errorMessage": error_message,
    })
}

/// The one payment-rejection response.
///
/// Absent, invalid, malformed, and replayed evidence all produce this
/// exact body, so callers cannot distinguish which failure occurred.
pub fn payment_required() -> HttpResponse {
    HttpResponse::PaymentRequired().json(json!({
        "wasSuccess": 0,
        "errorMessage": "Payment required.",
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_shapes() {
        let success = success_envelope();
        assert_eq!(success["wasSuccess"], 1);
        assert!(success["errorCode"].is_null());
        assert!(success["errorMessage"].is_null());

        let error = error_envelope(400, "Bad request.");
        assert_eq!(error["wasSuccess"], 0);
        assert_eq!(error["errorCode"], 400);
        assert_eq!(error["errorMessage"], "Bad request.");
    }

    #[test]
    fn test_success_with_result_embeds_value() {
        let envelope = success_with_result(json!({"taskId": "0001"}));
        assert_eq!(envelope["wasSuccess"], 1);
        assert_eq!(envelope["result"]["taskId"], "0001");
    }
}
