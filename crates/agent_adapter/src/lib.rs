//! Backend-agnostic contract for asking one agent one question.
//!
//! This crate defines only the shared request/result types and the
//! [`AgentAdapter`] capability. It excludes transport details, process
//! handling and persistence; concrete backends live in sibling crates.
//!
//! Every adapter terminates in an [`AgentResult`]. Failures are values: an
//! adapter reports them through [`AgentResult::error`] and never panics or
//! propagates an error out of [`AgentAdapter::ask`].

mod config;
mod error;
mod kind;
mod request;
mod result;

pub use config::AdapterConfig;
pub use error::AdapterError;
pub use kind::{AgentKind, UnknownAgentError};
pub use request::{AskRequest, ContentPart, HistoryContent, HistoryEntry, Role};
pub use result::{AgentResult, RawPayload};

/// Capability implemented by every backend.
pub trait AgentAdapter: Send + Sync {
    /// Returns which agent this adapter talks to.
    fn kind(&self) -> AgentKind;

    /// Returns true when the backend accepts uploaded attachments.
    ///
    /// Callers only resolve `@path` references for adapters that do; other
    /// backends receive the message text untouched.
    fn supports_attachments(&self) -> bool {
        false
    }

    /// Sends one turn and waits for the backend to finish.
    fn ask(&self, request: AskRequest) -> AgentResult;
}
