//! Wire types for the chat-completions exchange.
//!
//! The request side mirrors the OpenAI chat-completions JSON; the response
//! side models only the fields the interpreter reads. The assistant's
//! message `content` is itself a JSON document — the order payload — whose
//! shapes live at the bottom of this module.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
    pub max_tokens: u32,
    pub response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// `{"type": "json_object"}` — forces the service into JSON-only output.
#[derive(Debug, Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub format_type: String,
}

impl ResponseFormat {
    #[must_use]
    pub fn json_object() -> Self {
        Self {
            format_type: "json_object".to_owned(),
        }
    }
}

// ---------------------------------------------------------------------------
// Response envelope
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<ChatChoice>,
    #[serde(default)]
    pub usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponseMessage {
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatUsage {
    pub total_tokens: u64,
}

/// Error envelope for non-2xx answers: `{"error": {"message", "type"}}`.
#[derive(Debug, Default, Deserialize)]
pub struct ServiceErrorEnvelope {
    #[serde(default)]
    pub error: Option<ServiceErrorBody>,
}

#[derive(Debug, Deserialize)]
pub struct ServiceErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

// ---------------------------------------------------------------------------
// Assistant payload (the JSON inside `message.content`)
// ---------------------------------------------------------------------------

/// Top-level order payload produced by the assistant.
///
/// Every field is defaulted: the payload is validated item by item in
/// `payload`, not rejected wholesale on a missing key.
#[derive(Debug, Default, Deserialize)]
pub struct OrderPayload {
    #[serde(default)]
    pub items: Option<serde_json::Value>,
    #[serde(default)]
    pub ambiguities: Vec<String>,
}

/// One raw item entry before validation.
#[derive(Debug, Default, Deserialize)]
pub struct ItemPayload {
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub product_code: Option<String>,
    #[serde(default)]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub unit_price: Option<f64>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}
