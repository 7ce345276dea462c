//! # Utilities Module
//!
//! Cross-cutting concerns shared by the core, the transport and the CLI.
//!
//! - [`errors`]: Typed error hierarchy using `thiserror`
//! - [`retry`]: Exponential backoff for transient connection failures
//!
//! Error types live here so `core` and `platform` can both depend on them
//! without depending on each other.

pub mod errors;
pub mod retry;

pub use errors::{
    CliError, ConnectionError, FormError, HostField, ProfileError, ValidationError,
};
pub use retry::{retry_with_backoff, RetryConfig};
