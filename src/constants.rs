//! # Application-Wide Constants
//!
//! Centralized configuration values used throughout flockprobe.
//!
//! ## Usage
//!
//! ```rust
//! use flockprobe::constants::*;
//! use std::time::Duration;
//!
//! let timeout = Duration::from_secs(SSH_CONNECT_TIMEOUT_SECS);
//! assert_eq!(timeout.as_secs(), 10);
//! ```

/// Application name, used for the data directory and log file names
pub const APP_NAME: &str = "flockprobe";

/// Crate version shown in the CLI banner
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Login
// ============================================================================

/// Account that never needs a secondary escalation password
pub const ROOT_USERNAME: &str = "root";

/// Initial username offered by the host form (collection layer only)
pub const FORM_DEFAULT_USERNAME: &str = "root";

/// Initial port offered by the host form (collection layer only)
pub const FORM_DEFAULT_PORT: &str = "22";

// ============================================================================
// Timeouts and Retry
// ============================================================================

/// TCP connect timeout for the SSH transport
///
/// **Rationale**: long enough for a slow WAN handshake, short enough that an
/// unreachable host fails before the operator gives up on the prompt.
pub const SSH_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Per-command timeout applied to the SSH session
///
/// Package and service listings on busy hosts can take several seconds.
pub const SSH_COMMAND_TIMEOUT_SECS: u64 = 30;

/// Retries after a failed TCP connect/handshake (not counting the first attempt)
pub const DEFAULT_CONNECT_RETRIES: u32 = 2;

/// Delay before the first connect retry
pub const RETRY_INITIAL_DELAY_MS: u64 = 500;

/// Upper bound for the backoff delay
pub const RETRY_MAX_DELAY_MS: u64 = 5_000;

/// Backoff growth factor between attempts
pub const RETRY_BACKOFF_MULTIPLIER: f64 = 2.0;

// ============================================================================
// Report
// ============================================================================

/// Section searched for the report headline
pub const HEADLINE_SECTION_PATTERN: &str = "System";

/// Entry searched for the report headline
pub const HEADLINE_ENTRY_PATTERN: &str = "Hostname";

/// Separator used when an entry holds several values
pub const VALUE_SEPARATOR: &str = ", ";

// ============================================================================
// Logging / Environment
// ============================================================================

/// Log files larger than this are rotated to `.log.bak` at start-up
pub const MAX_LOG_BYTES: u64 = 10 * 1024 * 1024;

/// `EnvFilter` directives, e.g. `FLOCKPROBE_LOG=flockprobe=trace`
pub const ENV_LOG_FILTER: &str = "FLOCKPROBE_LOG";

/// Set to `1` to also append logs to the data directory
pub const ENV_ENABLE_FILE_LOGGING: &str = "FLOCKPROBE_ENABLE_LOGGING";

/// Login password fallback for non-interactive runs
pub const ENV_PASSWORD: &str = "FLOCKPROBE_PASSWORD";

/// Root password fallback for non-interactive runs
pub const ENV_ROOT_PASSWORD: &str = "FLOCKPROBE_ROOT_PASSWORD";
