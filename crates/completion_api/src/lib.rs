//! Transport-only completion gateway client primitives.
//!
//! This crate owns request framing, endpoint/header construction, and
//! streamed response decoding for the completion gateway only. It contains no
//! canvas coupling and no session orchestration.
//!
//! The gateway contract is one completion per request: a `POST` with a
//! `{"layers": [...]}` body answered by a chunked plain-text stream that ends
//! by closing. There is no retry and no caching anywhere in this crate.

pub mod chunk;
pub mod client;
pub mod config;
pub mod error;
pub mod headers;
pub mod payload;
pub mod url;

pub use chunk::TextChunkStream;
pub use client::CompletionClient;
pub use config::CompletionConfig;
pub use error::CompletionApiError;
pub use payload::CompletionRequest;
pub use url::normalize_completion_url;
