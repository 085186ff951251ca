//! Typed failures of the interpretation pipeline.
//!
//! Deterministic post-processing never raises; only the model call and an
//! unsalvageable model reply surface as errors. A malformed reply fails the
//! single request rather than fabricating a stub record, since a silently
//! wrong ledger entry is worse than a failed one.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InterpretError {
    /// The model service call itself failed (network, timeout, 5xx).
    #[error("model service unavailable")]
    Model(#[source] anyhow::Error),

    /// The reply contained no `{ ... }` block to parse.
    #[error("no JSON object in model reply")]
    NoJson,

    /// The carved block was not valid JSON.
    #[error("malformed JSON in model reply")]
    BadJson(#[source] serde_json::Error),
}
