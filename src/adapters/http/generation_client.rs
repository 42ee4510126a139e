//! HTTP client for the brief-parse, motivation, and copy endpoints.
//!
//! All methods map network and protocol failures into [`GenerationError`]
//! with a human-readable message; the gateway attaches the step id.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::errors::GenerationError;
use crate::domain::models::brief::{BriefData, BriefDocument, CopyVariation, Motivation};
use crate::domain::ports::GenerationService;

/// Header carrying the uploaded document's original file name.
const FILE_NAME_HEADER: &str = "x-airwave-filename";

/// Client for the generation service endpoints.
#[derive(Debug, Clone)]
pub struct HttpGenerationClient {
    http: Client,
    base_url: String,
}

impl HttpGenerationClient {
    /// Build a client with the given base URL and per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, GenerationError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| GenerationError::new(format!("failed to build HTTP client: {err}")))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, GenerationError> {
        let response = self
            .http
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|err| GenerationError::new(format!("request to {path} failed: {err}")))?;
        Self::decode(path, response).await
    }

    async fn decode<T: DeserializeOwned>(
        path: &str,
        response: reqwest::Response,
    ) -> Result<T, GenerationError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = if body.is_empty() {
                String::new()
            } else {
                format!(": {}", body.chars().take(200).collect::<String>())
            };
            return Err(GenerationError::new(format!(
                "{path} returned {status}{detail}"
            )));
        }
        response
            .json::<T>()
            .await
            .map_err(|err| GenerationError::new(format!("malformed response from {path}: {err}")))
    }
}

#[async_trait]
impl GenerationService for HttpGenerationClient {
    async fn parse_brief(&self, document: &BriefDocument) -> Result<BriefData, GenerationError> {
        let path = "/brief/parse";
        let response = self
            .http
            .post(self.url(path))
            .header(CONTENT_TYPE, &document.mime_type)
            .header(FILE_NAME_HEADER, &document.file_name)
            .body(document.data.clone())
            .send()
            .await
            .map_err(|err| GenerationError::new(format!("request to {path} failed: {err}")))?;
        Self::decode(path, response).await
    }

    async fn generate_motivations(
        &self,
        brief: &BriefData,
    ) -> Result<Vec<Motivation>, GenerationError> {
        self.post_json("/motivations/generate", brief).await
    }

    async fn generate_copy(
        &self,
        motivations: &[Motivation],
    ) -> Result<Vec<CopyVariation>, GenerationError> {
        self.post_json("/copy/generate", motivations).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_normalized() {
        let client =
            HttpGenerationClient::new("http://gen.example/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.url("/brief/parse"), "http://gen.example/brief/parse");
    }
}
