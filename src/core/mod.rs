//! Core business logic (platform-agnostic)
//!
//! CRITICAL: This module MUST NOT import platform-specific code or UI frameworks.

pub mod profiler;
pub mod report;
pub mod resolver;
pub mod session;

// Test utilities for mock sessions (tests only)
#[cfg(test)]
pub mod mock_session;

pub use profiler::{collect_profile, FactProbe, DEFAULT_PROBES};
pub use report::{find_entry_value, headline, render, NamePattern};
pub use resolver::resolve;
pub use session::{ProfileExecutor, RemoteShell};
