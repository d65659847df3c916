use futures_util::StreamExt;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Response};

use crate::chunk::TextChunkStream;
use crate::config::CompletionConfig;
use crate::error::{parse_error_message, CompletionApiError};
use crate::headers::build_headers;
use crate::payload::CompletionRequest;
use crate::url::normalize_completion_url;

/// HTTP client for the completion gateway.
///
/// One request produces at most one completion stream; there is no retry and
/// no caching at this layer.
#[derive(Debug)]
pub struct CompletionClient {
    http: Client,
    config: CompletionConfig,
}

impl CompletionClient {
    pub fn new(config: CompletionConfig) -> Result<Self, CompletionApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(CompletionApiError::from)?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &CompletionConfig {
        &self.config
    }

    pub fn normalized_endpoint(&self) -> String {
        normalize_completion_url(&self.config.base_url)
    }

    pub fn build_headers(&self, user_agent: Option<&str>) -> Result<HeaderMap, CompletionApiError> {
        let headers = build_headers(&self.config, user_agent)?;
        let mut out = HeaderMap::new();
        for (key, value) in headers {
            out.insert(
                HeaderName::from_bytes(key.as_bytes()).map_err(|_| {
                    CompletionApiError::InvalidHeader(format!("invalid header key: {key}"))
                })?,
                HeaderValue::from_str(&value).map_err(|_| {
                    CompletionApiError::InvalidHeader(format!("invalid header value for {key}"))
                })?,
            );
        }
        Ok(out)
    }

    pub fn build_request(
        &self,
        request: &CompletionRequest,
    ) -> Result<reqwest::RequestBuilder, CompletionApiError> {
        validate_request_payload_shape(request)?;

        let headers = self.build_headers(self.config.user_agent.as_deref())?;
        Ok(self
            .http
            .post(self.normalized_endpoint())
            .headers(headers)
            .json(request))
    }

    /// Dispatches the request and returns the raw successful response.
    ///
    /// A non-success status is read fully and surfaced as
    /// [`CompletionApiError::Status`]; the gateway does not guarantee a
    /// structured error payload.
    pub async fn send(&self, request: &CompletionRequest) -> Result<Response, CompletionApiError> {
        let endpoint = self.normalized_endpoint();
        tracing::debug!(%endpoint, layers = request.layers.len(), "dispatching completion request");

        let response = self
            .build_request(request)?
            .send()
            .await
            .map_err(CompletionApiError::from)?;

        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_else(|_| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });
        Err(CompletionApiError::Status(
            status,
            parse_error_message(status, &body),
        ))
    }

    /// Dispatches the request and opens the decoded text chunk stream.
    pub async fn open_stream(
        &self,
        request: &CompletionRequest,
    ) -> Result<TextChunkStream, CompletionApiError> {
        let response = self.send(request).await?;
        let bytes = response
            .bytes_stream()
            .map(|chunk| {
                chunk
                    .map(|bytes| bytes.to_vec())
                    .map_err(|error| CompletionApiError::ChunkRead(error.to_string()))
            })
            .boxed();
        Ok(TextChunkStream::from_bytes_stream(bytes))
    }
}

fn validate_request_payload_shape(request: &CompletionRequest) -> Result<(), CompletionApiError> {
    if request.layers.is_empty() {
        return Err(CompletionApiError::InvalidRequestPayload(
            "'layers' must be a non-empty list".to_owned(),
        ));
    }

    if request.layers.iter().any(|layer| layer.trim().is_empty()) {
        return Err(CompletionApiError::InvalidRequestPayload(
            "'layers' entries must be non-empty strings".to_owned(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::validate_request_payload_shape;
    use crate::error::CompletionApiError;
    use crate::payload::CompletionRequest;

    #[test]
    fn empty_layer_list_is_rejected_before_dispatch() {
        let error = validate_request_payload_shape(&CompletionRequest::new(Vec::new()))
            .expect_err("empty list should be rejected");
        assert!(matches!(
            error,
            CompletionApiError::InvalidRequestPayload(_)
        ));
    }

    #[test]
    fn blank_layer_entries_are_rejected_before_dispatch() {
        let request = CompletionRequest::new(vec!["* ok".to_owned(), "   ".to_owned()]);
        let error = validate_request_payload_shape(&request)
            .expect_err("blank entry should be rejected");
        assert!(matches!(
            error,
            CompletionApiError::InvalidRequestPayload(_)
        ));
    }

    #[test]
    fn well_formed_payload_passes_preflight() {
        let request = CompletionRequest::from_fragments(["Roses are red"]);
        assert!(validate_request_payload_shape(&request).is_ok());
    }
}
