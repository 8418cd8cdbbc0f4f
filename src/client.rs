use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::error::{Result, StaleError};

pub const DEFAULT_ENDPOINT: &str = "https://api.github.com/graphql";

const USER_AGENT: &str = concat!("stale-prs/", env!("CARGO_PKG_VERSION"));

/// Sends a GraphQL query and returns the `data` member of the reply.
///
/// Transport, HTTP status and GraphQL error payloads all surface as errors,
/// never as a successful value.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn send(&self, query: &str, variables: Value) -> Result<Value>;
}

pub struct GitHubClient {
    http: Client,
    endpoint: String,
    token: String,
}

#[derive(Serialize)]
struct GraphQLRequest<'a> {
    query: &'a str,
    variables: Value,
}

#[derive(Deserialize)]
struct GraphQLResponse {
    data: Option<Value>,
    errors: Option<Vec<GraphQLError>>,
}

#[derive(Deserialize, Debug)]
struct GraphQLError {
    message: String,
}

impl GitHubClient {
    pub fn new(token: String, endpoint: Option<String>) -> Self {
        Self {
            http: Client::new(),
            endpoint: endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            token,
        }
    }
}

#[async_trait]
impl QueryExecutor for GitHubClient {
    #[instrument(skip_all, fields(endpoint = %self.endpoint))]
    async fn send(&self, query: &str, variables: Value) -> Result<Value> {
        let request = GraphQLRequest { query, variables };

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .header("User-Agent", USER_AGENT)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        debug!(status = status.as_u16(), "received GraphQL reply");

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read response body>".to_string());
            return Err(status_error(status, body));
        }

        let envelope: GraphQLResponse = response.json().await?;
        into_data(envelope)
    }
}

fn status_error(status: StatusCode, body: String) -> StaleError {
    StaleError::ApiError {
        status: status.as_u16(),
        message: body,
    }
}

fn into_data(envelope: GraphQLResponse) -> Result<Value> {
    if let Some(errors) = envelope.errors.filter(|errors| !errors.is_empty()) {
        return Err(StaleError::GraphQL {
            messages: errors.into_iter().map(|e| e.message).collect(),
        });
    }

    match envelope.data {
        Some(Value::Null) | None => Err(StaleError::EmptyResponse),
        Some(data) => Ok(data),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(value: Value) -> GraphQLResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_into_data_returns_data() {
        let data = into_data(envelope(json!({ "data": { "repository": null } }))).unwrap();
        assert_eq!(data, json!({ "repository": null }));
    }

    #[test]
    fn test_into_data_reports_graphql_errors() {
        let err = into_data(envelope(json!({
            "data": null,
            "errors": [{ "message": "Bad credentials" }, { "message": "Rate limited" }]
        })))
        .unwrap_err();
        assert!(matches!(err, StaleError::GraphQL { ref messages } if messages.len() == 2));
        assert_eq!(err.to_string(), "GraphQL errors: Bad credentials, Rate limited");
    }

    #[test]
    fn test_into_data_empty() {
        assert!(matches!(
            into_data(envelope(json!({ "data": null }))),
            Err(StaleError::EmptyResponse)
        ));
        assert!(matches!(
            into_data(envelope(json!({}))),
            Err(StaleError::EmptyResponse)
        ));
    }

    #[test]
    fn test_new_defaults_to_github_endpoint() {
        let client = GitHubClient::new("ghp_abc".to_string(), None);
        assert_eq!(client.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_status_error_keeps_status_and_body() {
        let err = status_error(StatusCode::UNAUTHORIZED, "Bad credentials".to_string());
        assert!(matches!(
            err,
            StaleError::ApiError { status: 401, ref message } if message == "Bad credentials"
        ));
        assert_eq!(err.to_string(), "API error (status 401): Bad credentials");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        let client = GitHubClient {
            http: Client::builder().no_proxy().build().unwrap(),
            endpoint: "http://127.0.0.1:1/graphql".to_string(),
            token: "ghp_abc".to_string(),
        };

        let result = client.send("query { viewer { login } }", json!({})).await;

        assert!(matches!(result, Err(StaleError::Http(_))));
    }

    #[test]
    fn test_request_serializes_null_cursor() {
        let request = GraphQLRequest {
            query: "query { viewer { login } }",
            variables: json!({ "cursor": Option::<String>::None }),
        };
        let body = serde_json::to_string(&request).unwrap();
        assert!(body.contains(r#""cursor":null"#));
    }
}
