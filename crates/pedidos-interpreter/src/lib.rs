//! Natural-language order interpretation against an OpenAI-compatible
//! chat-completions service.
//!
//! Wraps `reqwest` with order-domain prompt construction, typed response
//! deserialization, payload validation with best-effort partial parsing, and
//! catalog enrichment of the detected line items. One call, one request: the
//! client never retries on its own, but [`retry`] ships the back-off
//! combinator callers layer on top when they want retries.

pub mod client;
pub mod error;
pub mod retry;
pub mod types;

mod enrich;
mod payload;
mod prompt;

pub use client::InterpreterClient;
pub use error::InterpretError;
pub use retry::{is_retriable, retry_with_backoff};
