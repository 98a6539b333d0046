use std::path::PathBuf;

/// Failures of the policy extraction pipeline.
///
/// `Parse` and `Schema` are recoverable exactly once, from the strict stage
/// into the repair pass. Every other kind is fatal.
#[derive(thiserror::Error, Debug)]
pub enum ExtractError {
    #[error("model endpoint not reachable at {host}. Did you run `ollama serve`?")]
    Transport {
        host: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("model endpoint at {host} did not answer within {secs}s. Raise --timeout-secs for slow models.")]
    Timeout { host: String, secs: u64 },
    #[error("{hint} | status={status} body={body}")]
    Endpoint {
        status: u16,
        body: String,
        hint: String,
    },
    #[error("model endpoint returned an unreadable body: {0}")]
    Response(#[source] reqwest::Error),
    #[error("model did not return valid JSON. First 300 chars: {snippet}")]
    Parse {
        snippet: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("policy JSON failed schema validation: {detail}")]
    Schema { detail: String },
    #[error("cannot load policy schema: {0}")]
    SchemaLoad(String),
    #[error("cannot encode policy JSON: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("cannot write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExtractError {
    /// True for the kinds that may hand over to the repair pass.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ExtractError::Parse { .. } | ExtractError::Schema { .. })
    }
}
