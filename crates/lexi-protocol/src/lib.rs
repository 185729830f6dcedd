#![deny(unsafe_code)]
#![warn(missing_docs)]

//! Wire types of the Lexi backend functions
//!
//! The client talks to two HTTP functions: `chatWithLexi`, which answers a
//! learner's message (optionally with a pronunciation and grammar score), and
//! `healthCheck`. This crate holds their request and response bodies and the
//! [`FunctionError`] a failed call decodes into.
//!
//! # Type Organization
//!
//! - **Chat types**: [`chat`] - Requests, replies, scores
//! - **Health**: [`health`] - Health check body
//! - **Error types**: [`error`] - Protocol and function errors
//!
//! # Design Principles
//!
//! - **Zero I/O**: All types are pure data structures
//! - **Retry-ready**: [`FunctionError`] implements [`lexi_core::error::Failure`],
//!   so any transport built on these types can be wrapped in a `RetryExecutor`
//!
//! # Usage
//!
//! ```
//! use lexi_protocol::{ChatRequest, ChatResponse};
//!
//! let request = ChatRequest::new("How do I say hello?").with_scoring();
//! assert!(request.validate().is_ok());
//!
//! let body = r#"{"success":true,"data":{"response":"Xin chào!","timestamp":1700000000000}}"#;
//! let reply = ChatResponse::from_json(body).unwrap().into_result().unwrap();
//! assert_eq!(reply.response, "Xin chào!");
//! ```

pub mod chat;
pub mod error;
pub mod health;

// Re-export commonly used types at crate level
pub use chat::{ChatData, ChatRequest, ChatResponse, ChatRole, ChatTurn, Score};
pub use error::{FunctionError, ProtocolError, Result};
pub use health::HealthStatus;
