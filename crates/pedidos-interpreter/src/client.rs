//! HTTP client for the chat-completions service.
//!
//! Wraps `reqwest` with prompt construction, typed deserialization of the
//! completion envelope, and the error taxonomy in [`crate::error`]. Use
//! [`InterpreterClient::new`] for production or
//! [`InterpreterClient::with_base_url`] to point at a mock server in tests.

use std::time::Duration;

use pedidos_core::{average_confidence, AppConfig, CatalogLookup, InterpretationResult};
use reqwest::{Client, Url};

use crate::error::InterpretError;
use crate::types::{ChatMessage, ChatRequest, ChatResponse, ResponseFormat, ServiceErrorEnvelope};
use crate::{enrich, payload, prompt};

/// Low creativity: the assistant transcribes orders, it does not invent them.
const TEMPERATURE: f64 = 0.1;
const MAX_TOKENS: u32 = 1500;

/// Client for the order-interpretation completion service.
pub struct InterpreterClient {
    client: Client,
    api_key: String,
    model: String,
    max_catalog_items: usize,
    completions_url: Url,
}

impl InterpreterClient {
    /// Creates a client pointed at the configured completion service.
    ///
    /// # Errors
    ///
    /// Returns [`InterpretError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`InterpretError::Configuration`] if the
    /// configured base URL does not parse.
    pub fn new(config: &AppConfig) -> Result<Self, InterpretError> {
        Self::with_base_url(config, &config.completion_base_url)
    }

    /// Creates a client with an explicit base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Same as [`InterpreterClient::new`].
    pub fn with_base_url(config: &AppConfig, base_url: &str) -> Result<Self, InterpretError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("pedidos/0.1 (order-interpretation)")
            .build()?;

        let joined = format!("{}/chat/completions", base_url.trim_end_matches('/'));
        let completions_url = Url::parse(&joined).map_err(|e| {
            InterpretError::Configuration(format!("invalid base URL '{base_url}': {e}"))
        })?;

        Ok(Self {
            client,
            api_key: config.completion_api_key.clone(),
            model: config.completion_model.clone(),
            max_catalog_items: config.max_catalog_items,
            completions_url,
        })
    }

    /// Interprets a free-text order into line-item candidates.
    ///
    /// Single request, no retries; layer [`crate::retry::retry_with_backoff`]
    /// on top when retries are wanted. Confidence scores are the service's
    /// own, passed through unchanged, and low-confidence items are never
    /// dropped here — thresholding is the caller's policy.
    ///
    /// # Errors
    ///
    /// - [`InterpretError::Http`] on network failure or timeout.
    /// - [`InterpretError::QuotaExceeded`] on a 429 with the service's
    ///   `insufficient_quota` marker.
    /// - [`InterpretError::ServiceStatus`] on any other non-2xx answer.
    /// - [`InterpretError::MalformedResponse`] when the 2xx payload has no
    ///   recoverable item structure. Partially broken payloads succeed with
    ///   the valid subset and explanatory `processing_notes`.
    pub async fn interpret<C: CatalogLookup + ?Sized>(
        &self,
        order_text: &str,
        catalog: &C,
    ) -> Result<InterpretationResult, InterpretError> {
        let context = catalog.context_products(self.max_catalog_items).await;
        tracing::debug!(
            text_len = order_text.len(),
            catalog_items = context.len(),
            "interpreting order text"
        );

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_owned(),
                    content: prompt::system_prompt(&context),
                },
                ChatMessage {
                    role: "user".to_owned(),
                    content: prompt::user_prompt(order_text),
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            response_format: ResponseFormat::json_object(),
        };

        let response = self
            .client
            .post(self.completions_url.clone())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_failure(status.as_u16(), &body));
        }

        let body = response.text().await?;
        let envelope: ChatResponse =
            serde_json::from_str(&body).map_err(|e| InterpretError::MalformedResponse {
                context: "chat-completion envelope".to_owned(),
                reason: e.to_string(),
            })?;

        let tokens_used = envelope.usage.map(|u| u.total_tokens);
        let content = envelope
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| InterpretError::MalformedResponse {
                context: "chat-completion envelope".to_owned(),
                reason: "response has no choices".to_owned(),
            })?;

        let mut parsed =
            payload::parse_payload(&content).map_err(|reason| InterpretError::MalformedResponse {
                context: "assistant payload".to_owned(),
                reason,
            })?;

        enrich::apply(catalog, &mut parsed.items).await;

        let avg = average_confidence(&parsed.items);
        tracing::info!(
            items = parsed.items.len(),
            average_confidence = avg,
            tokens_used = ?tokens_used,
            notes = parsed.notes.len(),
            "order interpretation finished"
        );

        Ok(InterpretationResult {
            original_text: order_text.to_owned(),
            items: parsed.items,
            average_confidence: avg,
            processing_notes: parsed.notes,
            tokens_used,
        })
    }
}

/// Maps a non-2xx answer to the error taxonomy, pulling the service's own
/// message out of the error envelope when present.
fn classify_failure(status: u16, body: &str) -> InterpretError {
    let envelope: ServiceErrorEnvelope = serde_json::from_str(body).unwrap_or_default();
    let (message, kind) = envelope
        .error
        .map_or((None, None), |e| (e.message, e.kind));
    let message = message.unwrap_or_else(|| "unknown error".to_owned());

    if status == 429 && kind.as_deref() == Some("insufficient_quota") {
        return InterpretError::QuotaExceeded(message);
    }
    InterpretError::ServiceStatus { status, message }
}

#[cfg(test)]
mod tests {
    use pedidos_core::Environment;

    use super::*;

    fn test_config() -> AppConfig {
        AppConfig {
            env: Environment::Test,
            log_level: "info".to_owned(),
            completion_base_url: "https://api.openai.com/v1".to_owned(),
            completion_api_key: "test-key".to_owned(),
            completion_model: "gpt-4o-mini".to_owned(),
            request_timeout_secs: 30,
            max_catalog_items: 100,
        }
    }

    #[test]
    fn completions_url_appends_endpoint() {
        let client = InterpreterClient::new(&test_config()).unwrap();
        assert_eq!(
            client.completions_url.as_str(),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[test]
    fn completions_url_strips_trailing_slash() {
        let client =
            InterpreterClient::with_base_url(&test_config(), "http://localhost:9999/v1/").unwrap();
        assert_eq!(
            client.completions_url.as_str(),
            "http://localhost:9999/v1/chat/completions"
        );
    }

    #[test]
    fn invalid_base_url_is_a_configuration_error() {
        let result = InterpreterClient::with_base_url(&test_config(), "not a url");
        assert!(matches!(result, Err(InterpretError::Configuration(_))));
    }

    #[test]
    fn quota_429_classifies_as_quota_exceeded() {
        let body = r#"{"error": {"message": "You exceeded your current quota", "type": "insufficient_quota"}}"#;
        let err = classify_failure(429, body);
        assert!(matches!(err, InterpretError::QuotaExceeded(msg) if msg.contains("quota")));
    }

    #[test]
    fn plain_429_classifies_as_service_status() {
        let body = r#"{"error": {"message": "Rate limit reached", "type": "rate_limit_exceeded"}}"#;
        let err = classify_failure(429, body);
        assert!(matches!(
            err,
            InterpretError::ServiceStatus { status: 429, .. }
        ));
    }

    #[test]
    fn unparseable_error_body_still_reports_status() {
        let err = classify_failure(503, "<html>bad gateway</html>");
        assert!(matches!(
            err,
            InterpretError::ServiceStatus { status: 503, ref message } if message == "unknown error"
        ));
    }
}
