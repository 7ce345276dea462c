//! Remote session abstraction
//!
//! These traits let the workflow run against real SSH sessions or mock
//! implementations. Platform-specific implementations are in `src/platform/`.

use crate::models::{ConnectionSpec, Profile};
use crate::utils::ConnectionError;

/// Command execution on an established, authenticated session
#[async_trait::async_trait]
pub trait RemoteShell: Send + Sync {
    /// Host this shell is connected to
    fn host(&self) -> &str;

    /// Run a shell command and return its stdout
    ///
    /// When `privileged` is set the command runs as root through the
    /// session's escalation method.
    ///
    /// SECURITY: Command must be built by the caller from trusted fragments.
    async fn run(&self, command: &str, privileged: bool) -> Result<String, String>;
}

/// Opens a session for a resolved login and builds the host profile
///
/// Called exactly once per profiling request. Connection failures come back
/// as one of the [`ConnectionError`] kinds and are passed to the caller
/// unchanged; any timeout or retry policy belongs to the implementation.
#[async_trait::async_trait]
pub trait ProfileExecutor: Send + Sync {
    async fn profile(&self, spec: &ConnectionSpec) -> Result<Profile, ConnectionError>;
}
