//! Profiling workflow
//!
//! Resolve the login, hand it to an executor once, and turn the resulting
//! profile into report text plus a headline. Also maps every error kind to
//! the message shown to the operator.

use crate::core::{headline, render, resolve, ProfileExecutor};
use crate::models::{Profile, RawHostInput};
use crate::utils::{ConnectionError, ProfileError};
use serde::Serialize;

/// Everything the display layer needs after a successful run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileReport {
    /// The profiled host's reported name (may be empty)
    pub headline: String,
    /// Rendered report text
    pub report: String,
    pub profile: Profile,
}

impl ProfileReport {
    pub fn from_profile(profile: Profile) -> Self {
        Self {
            headline: headline(&profile),
            report: render(&profile),
            profile,
        }
    }

    pub fn title(&self) -> String {
        results_title(&self.headline)
    }
}

/// Validate `raw`, profile the host and render the result
///
/// Invalid input is reported without touching the executor. Connection
/// errors from the executor are returned unchanged.
pub async fn run_profile(
    raw: &RawHostInput,
    executor: &dyn ProfileExecutor,
) -> Result<ProfileReport, ProfileError> {
    let spec = resolve(raw)?;
    tracing::info!(
        host = spec.hostname(),
        port = spec.port(),
        user = spec.username(),
        "profiling host"
    );

    let profile = executor.profile(&spec).await?;
    tracing::info!(
        host = spec.hostname(),
        sections = profile.sections.len(),
        "profile complete"
    );
    Ok(ProfileReport::from_profile(profile))
}

/// Window/report title for a profiled host
pub fn results_title(headline: &str) -> String {
    format!("Results for {}", headline)
}

impl ProfileError {
    /// Message for the operator, naming the values they typed
    pub fn user_message(&self, raw: &RawHostInput) -> String {
        match self {
            ProfileError::Validation(e) => e.to_string(),
            ProfileError::Connection(ConnectionError::InvalidHostname(_)) => {
                format!("Unable to resolve '{}'", raw.hostname)
            }
            ProfileError::Connection(ConnectionError::AuthenticationFailed(_)) => {
                format!("Unable to log in as '{}'", raw.username)
            }
            ProfileError::Connection(ConnectionError::CannotConnect(_)) => {
                format!("Cannot connect to {}:{}", raw.hostname, raw.port)
            }
        }
    }
}
