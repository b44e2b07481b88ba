use reqwest::Method;
use rollups_indexer_client_interface::IndexerError;
use rollups_utils::http_client::{HttpClient, HttpClientError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::types::{GraphQlError, GraphQlRequest, GraphQlResponse};

/// Suffix the indexer uses for every "resource does not exist (yet)" error message.
const NOT_FOUND_SUFFIX: &str = "not found";

/// POSTs GraphQL documents to `{node}/graphql` and classifies failures into [`IndexerError`].
#[derive(Debug, Clone)]
pub struct GraphQlTransport {
    client: HttpClient,
}

impl GraphQlTransport {
    pub fn new(node_url: &Url) -> Result<Self, HttpClientError> {
        let client = HttpClient::new(node_url.as_str())?;
        Ok(Self { client })
    }

    pub fn endpoint(&self) -> Url {
        self.client.request().path("graphql").url()
    }

    /// Runs a single query and decodes its `data` member into `R`.
    ///
    /// Structured GraphQL errors take precedence over the HTTP status, since the indexer reports
    /// missing entities with a `200` or `400` response carrying an `errors` array.
    pub async fn query<V, R>(&self, operation: &str, document: &str, variables: V) -> Result<R, IndexerError>
    where
        V: Serialize + Send,
        R: DeserializeOwned,
    {
        tracing::debug!(operation = %operation, endpoint = %self.endpoint(), "Sending GraphQL query");

        let request = GraphQlRequest { operation_name: operation, query: document, variables };
        let response = self
            .client
            .request()
            .method(Method::POST)
            .path("graphql")
            .body(&request)
            .map_err(|e| IndexerError::parse(operation, format!("failed to encode request: {}", e)))?
            .send()
            .await
            .map_err(|e| network_error(operation, e))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| IndexerError::Network {
            operation: operation.to_string(),
            message: format!("failed to read response body: {}", e),
        })?;

        let parsed: Result<GraphQlResponse, _> = serde_json::from_str(&text);
        match parsed {
            Ok(body) if !body.errors.is_empty() => Err(classify_errors(operation, &body.errors)),
            Ok(_) | Err(_) if !status.is_success() => Err(IndexerError::Api {
                operation: operation.to_string(),
                status: status.as_u16(),
                message: text,
            }),
            Ok(body) => {
                let data = body
                    .data
                    .ok_or_else(|| IndexerError::parse(operation, "response carries neither data nor errors"))?;
                serde_json::from_value(data).map_err(|e| IndexerError::parse(operation, e.to_string()))
            }
            Err(e) => Err(IndexerError::parse(operation, e.to_string())),
        }
    }
}

fn network_error(operation: &str, error: HttpClientError) -> IndexerError {
    IndexerError::Network { operation: operation.to_string(), message: error.to_string() }
}

/// The first error decides the outcome. A message like `input not found` marks the entity as not
/// indexed yet; anything else is a failed query.
fn classify_errors(operation: &str, errors: &[GraphQlError]) -> IndexerError {
    let first = &errors[0];
    let message = first.message.trim();
    if message.to_ascii_lowercase().ends_with(NOT_FOUND_SUFFIX) {
        let entity = message.split_whitespace().next().unwrap_or("entity").to_string();
        return IndexerError::not_found(entity, message);
    }

    let joined = errors.iter().map(|e| e.message.as_str()).collect::<Vec<_>>().join("; ");
    IndexerError::query(operation, joined)
}
