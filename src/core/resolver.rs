//! Login resolution
//!
//! Turns raw operator input into a [`ConnectionSpec`] or the first
//! [`ValidationError`] found. Pure: no I/O, no logging of secrets, never retried.

use crate::constants::ROOT_USERNAME;
use crate::models::{ConnectionSpec, RawHostInput, SecureString};
use crate::utils::{HostField, ValidationError};

/// Validate and normalize host login input
///
/// Required fields are checked in the order hostname, username, port and
/// the first empty (or whitespace-only) one is reported. A root login never
/// uses sudo. Root and sudo logins reuse the login password as the root
/// password; any other login must supply its own root password for `su`.
///
/// # Example
///
/// ```
/// use flockprobe::core::resolve;
/// use flockprobe::models::RawHostInput;
///
/// let raw = RawHostInput::new("db1", "root", "22").with_password("pw").with_sudo(true);
/// let spec = resolve(&raw).unwrap();
/// assert!(!spec.use_sudo());
/// assert_eq!(spec.root_password().as_str(), "pw");
/// ```
pub fn resolve(raw: &RawHostInput) -> Result<ConnectionSpec, ValidationError> {
    let mut required = [String::new(), String::new(), String::new()];
    for (slot, field) in required.iter_mut().zip(HostField::REQUIRED) {
        let value = required_field(raw, field).trim();
        if value.is_empty() {
            return Err(ValidationError::MissingField(field));
        }
        *slot = value.to_string();
    }
    let [hostname, username, port] = required;

    let is_root = username == ROOT_USERNAME;
    let use_sudo = raw.use_sudo && !is_root;

    // Passwords are never trimmed; a blank root password still counts as given
    let root_password = if is_root || use_sudo {
        raw.password.as_str()
    } else if raw.root_password.is_empty() {
        return Err(ValidationError::MissingRootPassword);
    } else {
        raw.root_password.as_str()
    };

    Ok(ConnectionSpec::new(
        hostname,
        username,
        port,
        SecureString::new(raw.password.as_str()),
        SecureString::new(root_password),
        use_sudo,
    ))
}

fn required_field(raw: &RawHostInput, field: HostField) -> &str {
    match field {
        HostField::Hostname => &raw.hostname,
        HostField::Username => &raw.username,
        HostField::Port => &raw.port,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Escalation;
    use proptest::prelude::*;

    #[test]
    fn test_missing_hostname_reported_first() {
        let raw = RawHostInput::new("", "root", "22");
        assert_eq!(
            resolve(&raw),
            Err(ValidationError::MissingField(HostField::Hostname))
        );

        // Every field empty still names only the hostname
        assert_eq!(
            resolve(&RawHostInput::default()),
            Err(ValidationError::MissingField(HostField::Hostname))
        );
    }

    #[test]
    fn test_missing_username_then_port() {
        assert_eq!(
            resolve(&RawHostInput::new("db1", "  ", "")),
            Err(ValidationError::MissingField(HostField::Username))
        );
        assert_eq!(
            resolve(&RawHostInput::new("db1", "alice", "\t")),
            Err(ValidationError::MissingField(HostField::Port))
        );
    }

    #[test]
    fn test_root_login() {
        let raw = RawHostInput::new("db1", "root", "22").with_password("pw");
        let spec = resolve(&raw).unwrap();

        assert_eq!(spec.hostname(), "db1");
        assert_eq!(spec.username(), "root");
        assert_eq!(spec.port(), "22");
        assert_eq!(spec.password().as_str(), "pw");
        assert_eq!(spec.root_password().as_str(), "pw");
        assert!(!spec.use_sudo());
        assert_eq!(spec.escalation(), Escalation::AlreadyRoot);
    }

    #[test]
    fn test_root_overrides_sudo_and_root_password() {
        let raw = RawHostInput::new("db1", "root", "22")
            .with_password("pw")
            .with_root_password("ignored")
            .with_sudo(true);
        let spec = resolve(&raw).unwrap();

        assert!(!spec.use_sudo());
        assert_eq!(spec.root_password().as_str(), "pw");
    }

    #[test]
    fn test_non_root_without_sudo_needs_root_password() {
        let raw = RawHostInput::new("db1", "alice", "22").with_password("pw");
        assert_eq!(resolve(&raw), Err(ValidationError::MissingRootPassword));
    }

    #[test]
    fn test_non_root_with_su_keeps_root_password() {
        let raw = RawHostInput::new("db1", "alice", "22")
            .with_password("pw")
            .with_root_password("toor");
        let spec = resolve(&raw).unwrap();

        assert!(!spec.use_sudo());
        assert_eq!(spec.root_password().as_str(), "toor");
        assert_eq!(spec.escalation(), Escalation::Su);
    }

    #[test]
    fn test_sudo_reuses_login_password() {
        let raw = RawHostInput::new("db1", "alice", "22")
            .with_password("pw")
            .with_root_password("discarded")
            .with_sudo(true);
        let spec = resolve(&raw).unwrap();

        assert!(spec.use_sudo());
        assert_eq!(spec.root_password().as_str(), "pw");
        assert_eq!(spec.escalation(), Escalation::Sudo);
    }

    #[test]
    fn test_sudo_allows_empty_password() {
        let raw = RawHostInput::new("db1", "alice", "22").with_sudo(true);
        let spec = resolve(&raw).unwrap();
        assert!(spec.password().is_empty());
        assert!(spec.root_password().is_empty());
    }

    #[test]
    fn test_fields_are_trimmed_passwords_are_not() {
        let raw = RawHostInput::new("  db1.example.com ", " root", "2222 ").with_password(" pw ");
        let spec = resolve(&raw).unwrap();

        assert_eq!(spec.hostname(), "db1.example.com");
        assert_eq!(spec.username(), "root");
        assert_eq!(spec.port(), "2222");
        assert_eq!(spec.password().as_str(), " pw ");
        assert_eq!(spec.escalation(), Escalation::AlreadyRoot);
    }

    #[test]
    fn test_whitespace_root_password_is_a_password() {
        let raw = RawHostInput::new("db1", "alice", "22")
            .with_password("pw")
            .with_root_password("   ");
        let spec = resolve(&raw).unwrap();

        assert_eq!(spec.root_password().as_str(), "   ");
        assert_eq!(spec.escalation(), Escalation::Su);
    }

    fn field() -> impl Strategy<Value = String> {
        prop_oneof![Just(String::new()), Just("  ".to_string()), "[a-z0-9]{1,8}"]
    }

    proptest! {
        #[test]
        fn prop_first_missing_field_is_reported(
            hostname in field(),
            username in field(),
            port in field(),
            sudo in any::<bool>(),
        ) {
            let raw = RawHostInput::new(hostname.clone(), username.clone(), port.clone())
                .with_password("pw")
                .with_root_password("toor")
                .with_sudo(sudo);
            let expected = [(hostname, HostField::Hostname), (username, HostField::Username), (port, HostField::Port)]
                .into_iter()
                .find(|(value, _)| value.trim().is_empty())
                .map(|(_, field)| field);

            match (resolve(&raw), expected) {
                (Err(ValidationError::MissingField(got)), Some(want)) => prop_assert_eq!(got, want),
                (Ok(_), None) => {}
                (other, want) => prop_assert!(false, "unexpected {:?} for {:?}", other, want),
            }
        }

        #[test]
        fn prop_root_never_uses_sudo(
            password in ".{0,12}",
            root_password in ".{0,12}",
            sudo in any::<bool>(),
        ) {
            let raw = RawHostInput::new("db1", "root", "22")
                .with_password(password.clone())
                .with_root_password(root_password)
                .with_sudo(sudo);
            let spec = resolve(&raw).unwrap();
            prop_assert!(!spec.use_sudo());
            prop_assert_eq!(spec.root_password().as_str(), password.as_str());
        }

        #[test]
        fn prop_sudo_root_password_is_login_password(
            username in "[a-z]{1,8}",
            password in ".{0,12}",
            root_password in ".{0,12}",
        ) {
            let raw = RawHostInput::new("db1", username, "22")
                .with_password(password.clone())
                .with_root_password(root_password)
                .with_sudo(true);
            let spec = resolve(&raw).unwrap();
            prop_assert_eq!(spec.root_password().as_str(), password.as_str());
        }

        #[test]
        fn prop_su_without_root_password_fails(
            username in "[a-z]{1,8}",
            password in ".{0,12}",
        ) {
            prop_assume!(username != ROOT_USERNAME);
            let raw = RawHostInput::new("db1", username, "22").with_password(password);
            prop_assert_eq!(resolve(&raw), Err(ValidationError::MissingRootPassword));
        }
    }
}
