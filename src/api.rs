use crate::errors::{QuarryError, QuarryResult};
use reqwest::Client;
use serde::{Deserialize, Serialize};

// The backend exposes a single endpoint.
pub const SEARCH_ENDPOINT: &str = "/search";

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
}

/// Raw reply shape. Every field is optional so the success/error/malformed
/// split is decided here rather than by serde rejecting the body outright.
#[derive(Debug, Deserialize)]
struct SearchReply {
    error: Option<String>,
    most_relevant_code: Option<String>,
    similarity_score: Option<f64>,
    file_link: Option<String>,
}

/// A successful search result.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchMatch {
    pub snippet: String,
    pub score: f64,
    pub file_link: String,
}

/// Client for the code-snippet search service.
#[derive(Debug, Clone)]
pub struct SearchClient {
    http: Client,
    base_url: String,
}

impl SearchClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Sends one query and maps the reply into a `SearchMatch` or an error.
    ///
    /// Backend-reported errors (`{"error": ...}`) become `Backend`; a success
    /// reply missing any of its fields becomes `MalformedReply` rather than a
    /// guessed default. No retries, no client-side timeout.
    pub async fn search(&self, query: &str) -> QuarryResult<SearchMatch> {
        let url = format!("{}{}", self.base_url, SEARCH_ENDPOINT);
        let response = self
            .http
            .post(&url)
            .json(&SearchRequest { query })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(QuarryError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let reply: SearchReply = response
            .json()
            .await
            .map_err(|e| QuarryError::malformed(e.to_string()))?;

        if let Some(message) = reply.error {
            return Err(QuarryError::backend(message));
        }

        match (reply.most_relevant_code, reply.similarity_score, reply.file_link) {
            (Some(snippet), Some(score), Some(file_link)) => Ok(SearchMatch {
                snippet,
                score,
                file_link,
            }),
            _ => Err(QuarryError::malformed(
                "reply missing most_relevant_code, similarity_score, or file_link",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn search_parses_a_successful_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/search"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({ "query": "video processing" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "most_relevant_code": "def f(): pass",
                "similarity_score": 0.8567,
                "file_link": "http://x/y"
            })))
            .mount(&server)
            .await;

        let client = SearchClient::new(server.uri());
        let result = client.search("video processing").await.unwrap();
        assert_eq!(result.snippet, "def f(): pass");
        assert_eq!(result.file_link, "http://x/y");
        assert!((result.score - 0.8567).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn search_surfaces_backend_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/search"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "error": "not found" })),
            )
            .mount(&server)
            .await;

        let client = SearchClient::new(server.uri());
        let err = client.search("anything").await.unwrap_err();
        match err {
            QuarryError::Backend(message) => assert_eq!(message, "not found"),
            other => panic!("expected backend error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_success_fields_are_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "most_relevant_code": "def f(): pass",
                "similarity_score": 0.9
            })))
            .mount(&server)
            .await;

        let client = SearchClient::new(server.uri());
        let err = client.search("anything").await.unwrap_err();
        assert!(matches!(err, QuarryError::MalformedReply(_)));
    }

    #[tokio::test]
    async fn null_success_fields_are_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "most_relevant_code": "def f(): pass",
                "similarity_score": 0.9,
                "file_link": null
            })))
            .mount(&server)
            .await;

        let client = SearchClient::new(server.uri());
        let err = client.search("anything").await.unwrap_err();
        assert!(matches!(err, QuarryError::MalformedReply(_)));
    }

    #[tokio::test]
    async fn non_json_body_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = SearchClient::new(server.uri());
        let err = client.search("anything").await.unwrap_err();
        assert!(matches!(err, QuarryError::MalformedReply(_)));
    }

    #[tokio::test]
    async fn http_error_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = SearchClient::new(server.uri());
        let err = client.search("anything").await.unwrap_err();
        match err {
            QuarryError::Http { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("expected http error, got {other:?}"),
        }
    }
}
