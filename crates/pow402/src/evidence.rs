//! Extraction of payment evidence from a request.
//!
//! A worker submit message travels as a JSON array under one configured
//! field name, in any of three locations: a query parameter, a
//! form-encoded body parameter, or an HTTP header.

use serde_json::Value;

/// One claimed unit of completed work, as submitted by a client.
///
/// Wire form is a JSON array:
/// `[workerLabel, taskId, extraNonce2, timestamp, nonce]`, where every
/// field after the label is hex-encoded. Only shallow shape validation
/// happens here; arity and hex validity are enforced during
/// canonicalization.
#[derive(Debug, Clone)]
pub struct PaymentEvidence {
    fields: Vec<Value>,
}

impl PaymentEvidence {
    /// Parse a candidate payload. Accepts any non-empty JSON array.
    pub fn parse(raw: &str) -> Option<Self> {
        let value: Value = serde_json::from_str(raw).ok()?;
        match value {
            Value::Array(fields) if !fields.is_empty() => Some(Self { fields }),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field_str(&self, index: usize) -> Option<&str> {
        self.fields.get(index)?.as_str()
    }

    /// Worker-identifying label. Excluded from canonicalization.
    pub fn worker_label(&self) -> Option<&str> {
        self.field_str(0)
    }

    pub fn task_id_hex(&self) -> Option<&str> {
        self.field_str(1)
    }

    pub fn extra_nonce_hex(&self) -> Option<&str> {
        self.field_str(2)
    }

    pub fn timestamp_hex(&self) -> Option<&str> {
        self.field_str(3)
    }

    pub fn nonce_hex(&self) -> Option<&str> {
        self.field_str(4)
    }

    /// The raw submit message, for forwarding to the mining coordinator.
    pub fn to_json(&self) -> Value {
        Value::Array(self.fields.clone())
    }
}

/// Candidate evidence strings pulled from the three transport
/// locations, all under the one configured field name.
#[derive(Debug, Clone, Default)]
pub struct EvidenceSources {
    /// Value of the named URL query parameter.
    pub query: Option<String>,
    /// Value of the named field in a form-encoded body.
    pub form: Option<String>,
    /// First value of the named HTTP header.
    pub header: Option<String>,
}

/// Try each source in fixed priority order: query parameter, then form
/// body, then header. The first value that parses as a non-empty JSON
/// array wins; a present-but-unparseable source falls through to the
/// next.
pub fn extract(sources: &EvidenceSources) -> Option<PaymentEvidence> {
    [&sources.query, &sources.form, &sources.header]
        .into_iter()
        .flatten()
        .find_map(|raw| PaymentEvidence::parse(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUBMIT: &str = r#"["alice","0001","00aa","5f10","0002"]"#;

    #[test]
    fn parses_submit_message_fields() {
        let evidence = PaymentEvidence::parse(SUBMIT).unwrap();
        assert_eq!(evidence.len(), 5);
        assert_eq!(evidence.worker_label(), Some("alice"));
        assert_eq!(evidence.task_id_hex(), Some("0001"));
        assert_eq!(evidence.extra_nonce_hex(), Some("00aa"));
        assert_eq!(evidence.timestamp_hex(), Some("5f10"));
        assert_eq!(evidence.nonce_hex(), Some("0002"));
    }

    #[test]
    fn rejects_non_array_and_empty_payloads() {
        assert!(PaymentEvidence::parse("{}").is_none());
        assert!(PaymentEvidence::parse("[]").is_none());
        assert!(PaymentEvidence::parse("\"share\"").is_none());
        assert!(PaymentEvidence::parse("not json").is_none());
    }

    #[test]
    fn query_source_has_priority() {
        let sources = EvidenceSources {
            query: Some(r#"["query","01","02","03","04"]"#.to_string()),
            form: Some(r#"["form","01","02","03","04"]"#.to_string()),
            header: Some(r#"["header","01","02","03","04"]"#.to_string()),
        };
        let evidence = extract(&sources).unwrap();
        assert_eq!(evidence.worker_label(), Some("query"));
    }

    #[test]
    fn unparseable_source_falls_through() {
        let sources = EvidenceSources {
            query: Some("not json".to_string()),
            form: None,
            header: Some(SUBMIT.to_string()),
        };
        let evidence = extract(&sources).unwrap();
        assert_eq!(evidence.worker_label(), Some("alice"));
    }

    #[test]
    fn absent_everywhere_is_none() {
        assert!(extract(&EvidenceSources::default()).is_none());
    }
}
