//! Protocol constants shared between the core and the gateway.

/// Field name checked in the query string, form body, and headers for
/// share evidence.
pub const MONETIZATION_FIELD_NAME: &str = "Monetization";

/// Maximum number of share fingerprints retained before the replay
/// history resets.
pub const DEFAULT_SHARE_HISTORY_CAPACITY: usize = 1_048_576;

/// Default paywall share difficulty multiplier (2^18).
pub const DEFAULT_PAYWALL_MULTIPLIER: u64 = 1 << 18;

/// JSON field carrying the previous block hash in a work assignment
/// payload. The coordinator emits it in its internal word order.
pub const PREVIOUS_BLOCK_HASH_FIELD: &str = "previousBlockHash";

/// JSON field appended to outgoing work assignments with the paywall
/// share target.
pub const SHARE_DIFFICULTY_FIELD: &str = "shareDifficulty";
