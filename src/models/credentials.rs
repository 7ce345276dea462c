//! Host login types
//!
//! SECURITY: Password buffers are zeroed on drop and never shown by `Debug`.

use std::fmt;
use zeroize::{Zeroize, Zeroizing};

/// Password that zeros memory on drop
///
/// SECURITY: This type never implements Display or Debug in a way that reveals the password.
#[derive(Clone, PartialEq, Eq)]
pub struct SecureString(String);

impl SecureString {
    /// Create a new secure string
    pub fn new(password: impl Into<String>) -> Self {
        SecureString(password.into())
    }

    /// Get the password as a string slice
    ///
    /// Use this sparingly and only when necessary for transport calls.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if the password is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Drop for SecureString {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl fmt::Debug for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecureString(*** {} bytes ***)", self.0.len())
    }
}

/// Unvalidated login fields exactly as the operator typed them
///
/// No invariants hold here: any field may be empty or padded. The
/// collection layer owns initial values; `Default` is all-empty.
#[derive(Clone, Default)]
pub struct RawHostInput {
    pub hostname: String,
    pub username: String,
    pub password: Zeroizing<String>,
    pub root_password: Zeroizing<String>,
    pub port: String,
    pub use_sudo: bool,
}

impl RawHostInput {
    pub fn new(
        hostname: impl Into<String>,
        username: impl Into<String>,
        port: impl Into<String>,
    ) -> Self {
        Self {
            hostname: hostname.into(),
            username: username.into(),
            port: port.into(),
            ..Self::default()
        }
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Zeroizing::new(password.into());
        self
    }

    pub fn with_root_password(mut self, root_password: impl Into<String>) -> Self {
        self.root_password = Zeroizing::new(root_password.into());
        self
    }

    pub fn with_sudo(mut self, use_sudo: bool) -> Self {
        self.use_sudo = use_sudo;
        self
    }
}

impl fmt::Debug for RawHostInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawHostInput")
            .field("hostname", &self.hostname)
            .field("username", &self.username)
            .field("password", &format_args!("*** {} bytes ***", self.password.len()))
            .field(
                "root_password",
                &format_args!("*** {} bytes ***", self.root_password.len()),
            )
            .field("port", &self.port)
            .field("use_sudo", &self.use_sudo)
            .finish()
    }
}

/// How privileged commands reach root on the target host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escalation {
    /// Logged in as root; commands run as-is
    AlreadyRoot,
    /// `sudo` with the login password
    Sudo,
    /// `su` with a separately supplied root password
    Su,
}

/// Validated, normalized login details for one profiling run
///
/// Only [`crate::core::resolve`] builds one, so the escalation invariants
/// always hold: root never uses sudo, and root/sudo logins carry the login
/// password as the root password.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectionSpec {
    hostname: String,
    username: String,
    port: String,
    password: SecureString,
    root_password: SecureString,
    use_sudo: bool,
}

impl ConnectionSpec {
    pub(crate) fn new(
        hostname: String,
        username: String,
        port: String,
        password: SecureString,
        root_password: SecureString,
        use_sudo: bool,
    ) -> Self {
        Self {
            hostname,
            username,
            port,
            password,
            root_password,
            use_sudo,
        }
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Port as entered; the transport decides how to parse it
    pub fn port(&self) -> &str {
        &self.port
    }

    pub fn password(&self) -> &SecureString {
        &self.password
    }

    pub fn root_password(&self) -> &SecureString {
        &self.root_password
    }

    pub fn use_sudo(&self) -> bool {
        self.use_sudo
    }

    pub fn escalation(&self) -> Escalation {
        if self.username == crate::constants::ROOT_USERNAME {
            Escalation::AlreadyRoot
        } else if self.use_sudo {
            Escalation::Sudo
        } else {
            Escalation::Su
        }
    }
}
