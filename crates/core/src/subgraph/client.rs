use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::fund::FundSnapshot;
use crate::models::manager::FundManager;
use super::queries::{
    FundDetailsData, ManagerDetailsData, ManagerListData, FUND_DETAILS_OPERATION,
    FUND_DETAILS_QUERY, MANAGER_DETAILS_OPERATION, MANAGER_DETAILS_QUERY,
    MANAGER_LIST_OPERATION, MANAGER_LIST_QUERY,
};
use super::traits::SubgraphSource;

/// Default request timeout for subgraph queries.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Longest slice of an error body kept in `CoreError::Http`.
const MAX_ERROR_BODY: usize = 200;

/// GraphQL-over-HTTP client for the fund subgraph.
///
/// - **Transport**: `POST {endpoint}` with `{query, variables, operationName}`.
/// - **Errors**: non-2xx status, a non-empty `errors` array, or a missing
///   `data` object are all failures, even if partial data came back.
/// - Addresses are lowercased before querying; subgraph entity ids are
///   lowercase hex.
pub struct HttpSubgraphClient {
    client: Client,
    endpoint: String,
}

impl HttpSubgraphClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_timeout(endpoint, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Self {
        let builder = Client::builder().timeout(timeout);
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            endpoint: endpoint.into(),
        }
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Run one GraphQL operation and decode its `data` object into `T`.
    pub async fn query<T: DeserializeOwned>(
        &self,
        operation: &str,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T, CoreError> {
        log::debug!("subgraph query {operation} variables={variables}");

        let request = GraphQlRequest {
            query,
            variables,
            operation_name: operation,
        };

        let response = self.client.post(&self.endpoint).json(&request).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        decode_response(status, &body).inspect_err(|e| {
            log::warn!("subgraph query {operation} failed: {e}");
        })
    }
}

// ── GraphQL envelope types ──────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: serde_json::Value,
    operation_name: &'a str,
}

#[derive(Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlErrorMessage>,
}

#[derive(Deserialize)]
struct GraphQlErrorMessage {
    message: String,
}

/// Decode a raw subgraph HTTP response.
pub fn decode_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, CoreError> {
    if !(200..300).contains(&status) {
        let message: String = body.trim().chars().take(MAX_ERROR_BODY).collect();
        return Err(CoreError::Http { status, message });
    }

    let envelope: GraphQlResponse<T> = serde_json::from_str(body)?;

    if !envelope.errors.is_empty() {
        return Err(CoreError::GraphQl(
            envelope.errors.into_iter().map(|e| e.message).collect(),
        ));
    }

    envelope
        .data
        .ok_or_else(|| CoreError::MissingData("data".into()))
}

fn normalize_address(address: &str) -> String {
    address.trim().to_lowercase()
}

#[async_trait]
impl SubgraphSource for HttpSubgraphClient {
    fn name(&self) -> &str {
        "HttpSubgraph"
    }

    async fn fund_managers(&self) -> Result<Vec<FundManager>, CoreError> {
        let data: ManagerListData = self
            .query(
                MANAGER_LIST_OPERATION,
                MANAGER_LIST_QUERY,
                serde_json::json!({}),
            )
            .await?;
        Ok(data.fund_managers)
    }

    async fn fund_manager(&self, address: &str) -> Result<Option<FundManager>, CoreError> {
        let data: ManagerDetailsData = self
            .query(
                MANAGER_DETAILS_OPERATION,
                MANAGER_DETAILS_QUERY,
                serde_json::json!({ "manager": normalize_address(address) }),
            )
            .await?;
        Ok(data.fund_manager)
    }

    async fn fund_details(&self, address: &str) -> Result<Option<FundSnapshot>, CoreError> {
        let data: FundDetailsData = self
            .query(
                FUND_DETAILS_OPERATION,
                FUND_DETAILS_QUERY,
                serde_json::json!({ "fund": normalize_address(address) }),
            )
            .await?;
        Ok(data.fund.map(|fund| FundSnapshot {
            fund,
            assets: data.assets,
        }))
    }
}
