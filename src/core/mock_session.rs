//! Mock sessions for testing without real hosts
//!
//! `MockShell` answers commands from a canned table; `MockExecutor` returns a
//! fixed profile or connection error and counts how often it was asked.

use super::session::{ProfileExecutor, RemoteShell};
use crate::models::{ConnectionSpec, Entry, Profile, Section};
use crate::utils::ConnectionError;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Shell with scripted command output
pub struct MockShell {
    host: String,
    responses: HashMap<String, Result<String, String>>,
    calls: Mutex<Vec<(String, bool)>>,
}

impl MockShell {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            responses: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Answer `command` with `stdout`
    pub fn respond(mut self, command: &str, stdout: &str) -> Self {
        self.responses
            .insert(command.to_string(), Ok(stdout.to_string()));
        self
    }

    /// Fail `command` with `error`
    pub fn fail(mut self, command: &str, error: &str) -> Self {
        self.responses
            .insert(command.to_string(), Err(error.to_string()));
        self
    }

    /// Commands run so far, with their privileged flag
    pub fn calls(&self) -> Vec<(String, bool)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl RemoteShell for MockShell {
    fn host(&self) -> &str {
        &self.host
    }

    async fn run(&self, command: &str, privileged: bool) -> Result<String, String> {
        self.calls
            .lock()
            .unwrap()
            .push((command.to_string(), privileged));
        self.responses
            .get(command)
            .cloned()
            .unwrap_or_else(|| Err(format!("sh: {}: command not found", command)))
    }
}

/// Executor with a fixed outcome
pub struct MockExecutor {
    outcome: Result<Profile, ConnectionError>,
    calls: AtomicUsize,
}

impl MockExecutor {
    pub fn succeeding(profile: Profile) -> Self {
        Self {
            outcome: Ok(profile),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(error: ConnectionError) -> Self {
        Self {
            outcome: Err(error),
            calls: AtomicUsize::new(0),
        }
    }

    /// Small Linux host profile headed by `hostname`
    pub fn linux_host(hostname: &str) -> Self {
        Self::succeeding(Profile::new(vec![
            Section::new(
                "System",
                vec![
                    Entry::new("Hostname", hostname),
                    Entry::new("Operating System", "Ubuntu 24.04 LTS"),
                    Entry::new("Uptime", ""),
                ],
            ),
            Section::new(
                "Memory",
                vec![
                    Entry::new("Total", "65536 MiB"),
                    Entry::new("Available", "18432 MiB"),
                ],
            ),
        ]))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ProfileExecutor for MockExecutor {
    async fn profile(&self, _spec: &ConnectionSpec) -> Result<Profile, ConnectionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::resolve;
    use crate::models::RawHostInput;

    #[tokio::test]
    async fn test_mock_shell_scripted_and_unknown_commands() {
        let shell = MockShell::new("db1")
            .respond("uname -r", "6.8.0\n")
            .fail("uptime -p", "timeout");

        assert_eq!(shell.run("uname -r", false).await.unwrap(), "6.8.0\n");
        assert_eq!(shell.run("uptime -p", false).await.unwrap_err(), "timeout");
        assert!(shell
            .run("lsblk", true)
            .await
            .unwrap_err()
            .contains("command not found"));
        assert_eq!(shell.calls().len(), 3);
        assert_eq!(shell.host(), "db1");
    }

    #[tokio::test]
    async fn test_mock_executor_counts_calls() {
        let spec = resolve(&RawHostInput::new("db1", "root", "22")).unwrap();
        let executor = MockExecutor::failing(ConnectionError::CannotConnect("refused".into()));

        assert!(executor.profile(&spec).await.is_err());
        assert!(executor.profile(&spec).await.is_err());
        assert_eq!(executor.calls(), 2);
    }
}
