//! Error types for the Atelier domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all Atelier operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Agent errors ---
    #[error("Agent error: {0}")]
    Agent(#[from] AgentError),

    // --- Tool errors ---
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    // --- Memory errors ---
    #[error("Memory error: {0}")]
    Memory(#[from] MemoryError),

    // --- Pattern errors ---
    #[error("Pattern error: {0}")]
    Pattern(#[from] PatternError),

    // --- Version control errors ---
    #[error("Version control error: {0}")]
    Vcs(#[from] VcsError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("Unknown agent '{name}' — available: {}", available.join(", "))]
    Unknown { name: String, available: Vec<String> },

    #[error("Input prompt is empty")]
    EmptyInput,

    #[error("Input prompt has {tokens} tokens, max is {max}")]
    PromptTooLong { tokens: usize, max: u32 },

    #[error("Agent execution failed: {agent} — {reason}")]
    ExecutionFailed { agent: String, reason: String },
}

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("Tool execution failed: {tool} — {reason}")]
    ExecutionFailed { tool: String, reason: String },
}

#[derive(Debug, Error)]
pub enum MemoryError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Snapshot encode failed: {0}")]
    Encode(String),

    #[error("Snapshot decode failed: {0}")]
    Decode(String),
}

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("Unknown pattern: {0}")]
    Unknown(String),

    #[error("Pattern '{name}' targets unknown agent '{agent}'")]
    BadTarget { name: String, agent: String },
}

#[derive(Debug, Error)]
pub enum VcsError {
    #[error("Not a git repository: {0}")]
    NotARepository(String),

    #[error("git {command} failed: {reason}")]
    CommandFailed { command: String, reason: String },

    #[error("Push rejected: {0}")]
    PushRejected(String),
}
