//! Adapters that drive locally installed agent CLIs as subprocesses.
//!
//! Each call spawns the configured executable once, writes the message to its
//! stdin, waits for it to exit and parses stdout. Claude and Codex keep their
//! own server-side sessions and hand back a continuation token; Gemini does
//! not, so its history is replayed as a transcript.

pub mod claude;
pub mod codex;
pub mod gemini;
pub mod options;
pub mod process;
pub mod transcript;

pub use claude::ClaudeAdapter;
pub use codex::CodexAdapter;
pub use gemini::GeminiAdapter;
pub use options::CliOptions;
pub use process::{CliInvocation, CliOutput, ProcessRunner, SystemProcessRunner};
