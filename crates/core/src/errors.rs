use thiserror::Error;

/// Unified error type for the entire fund-dashboard-core library.
/// Every public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Subgraph / Network ──────────────────────────────────────────
    #[error("Network error: {0}")]
    Network(String),

    #[error("Subgraph returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("GraphQL error: {}", .0.join("; "))]
    GraphQl(Vec<String>),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Subgraph response is missing '{0}'")]
    MissingData(String),

    // ── Lookups ─────────────────────────────────────────────────────
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    // ── Input / Setup ───────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl CoreError {
    /// True for failures caused by the subgraph or the path to it,
    /// as opposed to bad input or a missing entity.
    #[must_use]
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            CoreError::Network(_)
                | CoreError::Http { .. }
                | CoreError::GraphQl(_)
                | CoreError::Deserialization(_)
                | CoreError::MissingData(_)
        )
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // Subgraph URLs may carry API keys in the query string; strip it.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}
