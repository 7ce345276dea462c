//! Error types for flockprobe
//!
//! All error types use thiserror for clean error handling.
//! SECURITY: Error messages MUST NOT contain passwords or sensitive data.

use std::fmt;

/// Login field that must be present before a host can be profiled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostField {
    Hostname,
    Username,
    Port,
}

impl HostField {
    /// Order in which required fields are checked
    pub const REQUIRED: [HostField; 3] = [HostField::Hostname, HostField::Username, HostField::Port];

    /// Capitalized label used in user-facing messages
    pub fn label(&self) -> &'static str {
        match self {
            HostField::Hostname => "Hostname",
            HostField::Username => "Username",
            HostField::Port => "Port",
        }
    }
}

impl fmt::Display for HostField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Errors from resolving raw login input into a connection spec
///
/// These are caller-input problems: deterministic, never retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing {0}")]
    MissingField(HostField),

    #[error("Missing Root Password")]
    MissingRootPassword,
}

/// Errors raised while establishing a session with the target host
///
/// The payload is diagnostic detail for logs; user-facing messages are
/// built by the caller from its own input values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConnectionError {
    #[error("Invalid hostname: {0}")]
    InvalidHostname(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Cannot connect: {0}")]
    CannotConnect(String),
}

impl ConnectionError {
    /// Only socket-level failures are worth another attempt
    pub fn is_transient(&self) -> bool {
        matches!(self, ConnectionError::CannotConnect(_))
    }
}

/// Top-level error type for a profiling request
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Connection(#[from] ConnectionError),
}

/// Errors from the interactive host form
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("Prompt failed for '{field}': {reason}")]
    Prompt { field: String, reason: String },
}

/// Errors local to the command-line front end
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Failed to read profile file {path}: {source}")]
    ReadProfile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse profile file {path}: {source}")]
    ParseProfile {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid headline pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Failed to serialize output: {0}")]
    Output(#[from] serde_json::Error),

    #[error(transparent)]
    Form(#[from] FormError),
}
