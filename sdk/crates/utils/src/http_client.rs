//! Thin request builder over [`reqwest`] used by the indexer and inspect clients.
//!
//! A [`HttpClient`] owns a base URL. Individual requests are assembled with [`RequestBuilder`] by
//! appending path segments and an optional body.

use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Method, Response};
use serde::Serialize;
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum HttpClientError {
    #[error("Invalid base URL {url}: {message}")]
    InvalidBaseUrl { url: String, message: String },
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: Url,
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new(base_url: &str) -> Result<Self, HttpClientError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| HttpClientError::InvalidBaseUrl { url: base_url.to_string(), message: e.to_string() })?;
        if base_url.cannot_be_a_base() {
            return Err(HttpClientError::InvalidBaseUrl {
                url: base_url.to_string(),
                message: "URL cannot be used as a base".to_string(),
            });
        }

        Ok(Self { base_url, client: reqwest::Client::new() })
    }

    pub fn request(&self) -> RequestBuilder<'_> {
        RequestBuilder {
            client: self,
            method: Method::GET,
            path_segments: Vec::new(),
            body: None,
        }
    }
}

enum RequestBody {
    Json(Vec<u8>),
    Raw(Vec<u8>),
}

pub struct RequestBuilder<'a> {
    client: &'a HttpClient,
    method: Method,
    path_segments: Vec<String>,
    body: Option<RequestBody>,
}

impl<'a> RequestBuilder<'a> {
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Appends a single path segment. The segment is percent-encoded, so a `/` inside it does not
    /// create a new segment.
    pub fn path(mut self, segment: &str) -> Self {
        self.path_segments.push(segment.to_string());
        self
    }

    pub fn body<T: Serialize>(mut self, body: T) -> Result<Self, serde_json::Error> {
        self.body = Some(RequestBody::Json(serde_json::to_vec(&body)?));
        Ok(self)
    }

    pub fn raw_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(RequestBody::Raw(body.into()));
        self
    }

    /// Final URL for this request.
    pub fn url(&self) -> Url {
        let mut url = self.client.base_url.clone();
        if !self.path_segments.is_empty() {
            // `HttpClient::new` rejects cannot-be-a-base URLs, so this always succeeds.
            if let Ok(mut segments) = url.path_segments_mut() {
                segments.pop_if_empty().extend(self.path_segments.iter());
            }
        }
        url
    }

    pub async fn send(self) -> Result<Response, HttpClientError> {
        let url = self.url();
        let request = self.client.client.request(self.method, url);

        let request = match self.body {
            Some(RequestBody::Json(bytes)) => {
                request.header(CONTENT_TYPE, HeaderValue::from_static("application/json")).body(bytes)
            }
            Some(RequestBody::Raw(bytes)) => request.body(bytes),
            None => request,
        };

        Ok(request.send().await?)
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[rstest]
    #[case("http://localhost:8080", &["graphql"], "http://localhost:8080/graphql")]
    #[case("http://localhost:8080/", &["graphql"], "http://localhost:8080/graphql")]
    #[case("http://localhost:8080/node/", &["inspect", "0xdead"], "http://localhost:8080/node/inspect/0xdead")]
    #[case("http://localhost:8080", &["inspect", "a/b"], "http://localhost:8080/inspect/a%2Fb")]
    fn url_joins_path_segments(#[case] base: &str, #[case] segments: &[&str], #[case] expected: &str) {
        let client = HttpClient::new(base).unwrap();
        let request = segments.iter().fold(client.request(), |request, segment| request.path(segment));
        assert_eq!(request.url().as_str(), expected);
    }

    #[rstest]
    fn new_rejects_non_base_url() {
        assert!(HttpClient::new("mailto:someone@example.com").is_err());
        assert!(HttpClient::new("not a url").is_err());
    }

    #[tokio::test]
    async fn send_posts_json_body() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/graphql").header("content-type", "application/json").json_body(json!({"a": 1}));
            then.status(200).body("ok");
        });

        let client = HttpClient::new(&server.base_url()).unwrap();
        let response =
            client.request().method(Method::POST).path("graphql").body(json!({"a": 1})).unwrap().send().await.unwrap();

        assert!(response.status().is_success());
        mock.assert();
    }

    #[tokio::test]
    async fn send_posts_raw_body() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/inspect").body("0xdead");
            then.status(200);
        });

        let client = HttpClient::new(&server.base_url()).unwrap();
        client.request().method(Method::POST).path("inspect").raw_body("0xdead").send().await.unwrap();

        mock.assert();
    }
}
