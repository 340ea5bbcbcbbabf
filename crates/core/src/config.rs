use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

pub const ENV_SUBGRAPH_HTTP: &str = "MELON_SUBGRAPH_HTTP";
pub const ENV_SUBGRAPH_WS: &str = "MELON_SUBGRAPH_WS";
pub const ENV_SUBGRAPH_HTTP_PUBLIC: &str = "MELON_SUBGRAPH_HTTP_PUBLIC";
pub const ENV_SUBGRAPH_WS_PUBLIC: &str = "MELON_SUBGRAPH_WS_PUBLIC";

/// Subgraph endpoints.
///
/// The server-side pair is what this process queries; the public pair is
/// what gets handed to browsers, falling back to the server-side values when
/// no public override is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubgraphConfig {
    pub http: String,
    pub ws: Option<String>,
    pub public_http: String,
    pub public_ws: Option<String>,
}

/// The browser-facing half of [`SubgraphConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicSubgraphConfig {
    pub subgraph_http: String,
    pub subgraph_ws: Option<String>,
}

impl SubgraphConfig {
    /// Config pointing both server and browser at the same HTTP endpoint.
    pub fn new(http: impl Into<String>) -> Self {
        let http = http.into();
        Self {
            public_http: http.clone(),
            http,
            ws: None,
            public_ws: None,
        }
    }

    /// Read endpoints from the process environment.
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let http = get(ENV_SUBGRAPH_HTTP).ok_or_else(|| {
            CoreError::Configuration(format!("{ENV_SUBGRAPH_HTTP} must be set"))
        })?;
        validate_url(ENV_SUBGRAPH_HTTP, &http, &["http://", "https://"])?;

        let ws = get(ENV_SUBGRAPH_WS);
        if let Some(ws) = &ws {
            validate_url(ENV_SUBGRAPH_WS, ws, &["ws://", "wss://"])?;
        }

        let public_http = get(ENV_SUBGRAPH_HTTP_PUBLIC).unwrap_or_else(|| http.clone());
        let public_ws = get(ENV_SUBGRAPH_WS_PUBLIC).or_else(|| ws.clone());

        Ok(Self {
            http,
            ws,
            public_http,
            public_ws,
        })
    }

    #[must_use]
    pub fn public(&self) -> PublicSubgraphConfig {
        PublicSubgraphConfig {
            subgraph_http: self.public_http.clone(),
            subgraph_ws: self.public_ws.clone(),
        }
    }
}

fn validate_url(key: &str, value: &str, schemes: &[&str]) -> Result<(), CoreError> {
    if schemes.iter().any(|s| value.starts_with(s)) {
        Ok(())
    } else {
        Err(CoreError::Configuration(format!(
            "{key} must start with one of {}: got '{value}'",
            schemes.join(", ")
        )))
    }
}
