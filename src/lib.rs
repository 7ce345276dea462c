//! flockprobe - remote Unix host profiler
//!
//! Validates login details, profiles a host over SSH and renders the
//! resulting facts as a plain-text report.

// Public modules
pub mod app;
pub mod cli;
pub mod constants;
pub mod core;
pub mod form;
pub mod logger;
pub mod models;
pub mod platform;
pub mod utils;

// Re-export commonly used types
pub use app::{run_profile, ProfileReport};
pub use core::{find_entry_value, headline, render, resolve, ProfileExecutor, RemoteShell};
pub use models::{ConnectionSpec, Entry, EntryValues, Profile, RawHostInput, Section, SecureString};
pub use utils::{ConnectionError, ProfileError, ValidationError};
