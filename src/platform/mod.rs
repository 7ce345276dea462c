//! Platform-specific implementations (remote transports)
//!
//! All transport code is isolated here; the core only sees the
//! `ProfileExecutor` and `RemoteShell` traits.

pub mod ssh;

pub use ssh::{SshExecutor, SshOptions, SshSession};
