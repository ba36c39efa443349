use thiserror::Error;

/// Reasons a worker submit message fails canonicalization.
///
/// Malformed evidence is rejected before it reaches the mining
/// coordinator and is surfaced to clients as the uniform
/// payment-required response.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MalformedEvidence {
    #[error("evidence tuple has {0} elements, expected at least 5")]
    MissingFields(usize),

    #[error("evidence field {0} is not a string")]
    NonStringField(usize),

    #[error("evidence field {0} is not valid hex")]
    InvalidHex(usize),
}
