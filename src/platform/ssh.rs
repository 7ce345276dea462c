//! Linux host profiling over SSH
//!
//! `SshExecutor` opens one password-authenticated `ssh2` session per
//! profiling request and runs the fact probes over it. Privileged probes
//! escalate with sudo or su according to the resolved login.

use crate::constants::{SSH_COMMAND_TIMEOUT_SECS, SSH_CONNECT_TIMEOUT_SECS};
use crate::core::profiler::{collect_profile, DEFAULT_PROBES};
use crate::core::session::{ProfileExecutor, RemoteShell};
use crate::models::{ConnectionSpec, Escalation, Profile, SecureString};
use crate::utils::{retry_with_backoff, ConnectionError, RetryConfig};
use ssh2::{Channel, ExtendedData, Session};
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Transport tuning for [`SshExecutor`]
#[derive(Debug, Clone)]
pub struct SshOptions {
    /// TCP connect timeout per attempt
    pub connect_timeout: Duration,
    /// Session timeout for handshake, auth and each command
    pub command_timeout: Duration,
    /// Backoff for connect attempts; only `CannotConnect` is retried
    pub retry: RetryConfig,
}

impl Default for SshOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(SSH_CONNECT_TIMEOUT_SECS),
            command_timeout: Duration::from_secs(SSH_COMMAND_TIMEOUT_SECS),
            retry: RetryConfig::default(),
        }
    }
}

/// Executor that profiles a host through [`SshSession`]
pub struct SshExecutor {
    options: SshOptions,
}

impl SshExecutor {
    pub fn new(options: SshOptions) -> Self {
        Self { options }
    }
}

#[async_trait::async_trait]
impl ProfileExecutor for SshExecutor {
    async fn profile(&self, spec: &ConnectionSpec) -> Result<Profile, ConnectionError> {
        let session = SshSession::connect(spec, &self.options).await?;
        Ok(collect_profile(&session, DEFAULT_PROBES).await)
    }
}

/// Authenticated SSH session to one host
pub struct SshSession {
    host: String,
    escalation: Escalation,
    root_password: SecureString,
    session: Arc<Mutex<Session>>,
}

impl SshSession {
    /// Resolve, connect, handshake and authenticate with the login password
    ///
    /// Failures are classified as `InvalidHostname` (name resolution),
    /// `AuthenticationFailed` (password rejected) or `CannotConnect`
    /// (bad port, socket or handshake failure). Only the last is retried.
    pub async fn connect(
        spec: &ConnectionSpec,
        options: &SshOptions,
    ) -> Result<Self, ConnectionError> {
        let port = parse_port(spec.port())?;
        tracing::debug!(
            host = spec.hostname(),
            port,
            user = spec.username(),
            escalation = ?spec.escalation(),
            "SshSession::connect START"
        );

        let connect_timeout = options.connect_timeout;
        let command_timeout = options.command_timeout;
        let result = retry_with_backoff(
            options.retry.clone(),
            || {
                let host = spec.hostname().to_string();
                let username = spec.username().to_string();
                let password = spec.password().clone();
                async move {
                    let task = tokio::task::spawn_blocking(move || {
                        open_session(
                            &host,
                            port,
                            &username,
                            &password,
                            connect_timeout,
                            command_timeout,
                        )
                    });
                    match task.await {
                        Ok(result) => result,
                        Err(e) => Err(ConnectionError::CannotConnect(format!(
                            "SSH task failed: {e}"
                        ))),
                    }
                }
            },
            ConnectionError::is_transient,
        )
        .await;

        match result {
            Ok(session) => {
                tracing::debug!(host = spec.hostname(), "SshSession::connect OK");
                Ok(Self {
                    host: spec.hostname().to_string(),
                    escalation: spec.escalation(),
                    root_password: spec.root_password().clone(),
                    session: Arc::new(Mutex::new(session)),
                })
            }
            Err(e) => {
                tracing::error!(host = spec.hostname(), "SshSession::connect FAILED: {e}");
                Err(e)
            }
        }
    }
}

#[async_trait::async_trait]
impl RemoteShell for SshSession {
    fn host(&self) -> &str {
        &self.host
    }

    async fn run(&self, command: &str, privileged: bool) -> Result<String, String> {
        let mode = ExecMode::for_command(self.escalation, privileged);
        let wrapped = build_command(command, mode);
        let secret = (mode != ExecMode::Plain).then(|| self.root_password.clone());
        let session = Arc::clone(&self.session);

        tracing::trace!(host = %self.host, ?mode, "exec {command}");
        tokio::task::spawn_blocking(move || exec_blocking(&session, &wrapped, mode, secret.as_ref()))
            .await
            .map_err(|e| format!("SSH task failed: {e}"))?
    }
}

/// How one command reaches the remote shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExecMode {
    /// As the login user (or as root when logged in as root)
    Plain,
    /// `sudo -S` reading the password from stdin
    Sudo,
    /// `su -c` on a pseudo-terminal answering the password prompt
    Su,
}

impl ExecMode {
    fn for_command(escalation: Escalation, privileged: bool) -> Self {
        match (privileged, escalation) {
            (false, _) | (true, Escalation::AlreadyRoot) => ExecMode::Plain,
            (true, Escalation::Sudo) => ExecMode::Sudo,
            (true, Escalation::Su) => ExecMode::Su,
        }
    }
}

fn build_command(command: &str, mode: ExecMode) -> String {
    let quoted = shell_escape::escape(command.into());
    match mode {
        ExecMode::Plain => format!("sh -c {quoted}"),
        ExecMode::Sudo => format!("sudo -S -p '' sh -c {quoted}"),
        ExecMode::Su => format!("su -c {quoted}"),
    }
}

/// Port must be a non-zero `u16`; anything else cannot be connected to
pub(crate) fn parse_port(raw: &str) -> Result<u16, ConnectionError> {
    match raw.trim().parse::<u16>() {
        Ok(port) if port > 0 => Ok(port),
        _ => Err(ConnectionError::CannotConnect(format!(
            "invalid port '{raw}'"
        ))),
    }
}

fn resolve_address(host: &str, port: u16) -> Result<SocketAddr, ConnectionError> {
    (host, port)
        .to_socket_addrs()
        .map_err(|e| ConnectionError::InvalidHostname(format!("{host}: {e}")))?
        .next()
        .ok_or_else(|| ConnectionError::InvalidHostname(format!("{host}: no addresses found")))
}

fn open_session(
    host: &str,
    port: u16,
    username: &str,
    password: &SecureString,
    connect_timeout: Duration,
    command_timeout: Duration,
) -> Result<Session, ConnectionError> {
    let addr = resolve_address(host, port)?;
    let tcp = TcpStream::connect_timeout(&addr, connect_timeout)
        .map_err(|e| ConnectionError::CannotConnect(format!("TCP connect to {addr} failed: {e}")))?;

    let mut sess = Session::new()
        .map_err(|e| ConnectionError::CannotConnect(format!("SSH session init failed: {e}")))?;
    sess.set_tcp_stream(tcp);
    sess.set_timeout(command_timeout.as_millis().min(u32::MAX as u128) as u32);
    sess.handshake()
        .map_err(|e| ConnectionError::CannotConnect(format!("SSH handshake failed: {e}")))?;

    sess.userauth_password(username, password.as_str())
        .map_err(|e| ConnectionError::AuthenticationFailed(format!("{username}: {e}")))?;
    if !sess.authenticated() {
        return Err(ConnectionError::AuthenticationFailed(format!(
            "{username}: server did not accept the password"
        )));
    }

    Ok(sess)
}

fn exec_blocking(
    session: &Mutex<Session>,
    command: &str,
    mode: ExecMode,
    secret: Option<&SecureString>,
) -> Result<String, String> {
    let sess = session
        .lock()
        .map_err(|_| "SSH session lock poisoned".to_string())?;
    let mut channel = sess
        .channel_session()
        .map_err(|e| format!("SSH channel open failed: {e}"))?;

    if mode == ExecMode::Su {
        channel
            .request_pty("vt100", None, None)
            .map_err(|e| format!("PTY request failed: {e}"))?;
    } else {
        // Unread stderr would fill the window and stall stdout
        channel
            .handle_extended_data(ExtendedData::Ignore)
            .map_err(|e| format!("SSH channel setup failed: {e}"))?;
    }
    channel
        .exec(command)
        .map_err(|e| format!("SSH exec failed: {e}"))?;

    if let Some(secret) = secret {
        if mode == ExecMode::Su {
            // su flushes terminal input before prompting; answer the prompt, not before it
            wait_for_prompt(&mut channel)?;
        }
        write_secret(&mut channel, secret)?;
        if mode == ExecMode::Sudo {
            channel.send_eof().ok();
        }
    }

    let mut stdout = String::new();
    channel
        .read_to_string(&mut stdout)
        .map_err(|e| format!("SSH read failed: {e}"))?;
    channel.wait_close().ok();
    let exit_status = channel.exit_status().unwrap_or(0);

    command_result(mode, exit_status, stdout)
}

/// Decide whether a finished command produced facts
///
/// On a PTY (`su`) the output also carries su's own errors, so any non-zero
/// status is a failure. Otherwise partial output from a failing command is kept.
fn command_result(mode: ExecMode, exit_status: i32, stdout: String) -> Result<String, String> {
    let failed = match mode {
        ExecMode::Su => exit_status != 0,
        ExecMode::Plain | ExecMode::Sudo => exit_status != 0 && stdout.trim().is_empty(),
    };
    if !failed {
        return Ok(stdout);
    }
    let detail = stdout.trim();
    Err(if detail.is_empty() {
        format!("command failed with status {exit_status}")
    } else {
        format!("command failed with status {exit_status}: {detail}")
    })
}

fn wait_for_prompt(channel: &mut Channel) -> Result<(), String> {
    let mut seen = Vec::new();
    let mut buf = [0u8; 256];
    loop {
        let n = channel
            .read(&mut buf)
            .map_err(|e| format!("su prompt read failed: {e}"))?;
        if n == 0 {
            return Err("su exited before asking for a password".to_string());
        }
        seen.extend_from_slice(&buf[..n]);
        if is_password_prompt(&seen) {
            return Ok(());
        }
    }
}

fn is_password_prompt(seen: &[u8]) -> bool {
    String::from_utf8_lossy(seen).trim_end().ends_with(':')
}

fn write_secret(channel: &mut Channel, secret: &SecureString) -> Result<(), String> {
    let send = |channel: &mut Channel| -> std::io::Result<()> {
        channel.write_all(secret.as_str().as_bytes())?;
        channel.write_all(b"\n")?;
        channel.flush()
    };
    send(channel).map_err(|e| format!("Failed to send escalation password: {e}"))
}
