//! Core relay components
//!
//! The relay turns one user question into one provider call.

mod relay;

pub use relay::{ChatRelay, ChatRequest, ChatResponse, RelayError};
