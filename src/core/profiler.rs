//! Fact probes for building a host profile
//!
//! A profile is gathered by running an ordered table of shell probes through
//! a [`RemoteShell`]. Each probe fills one entry; the table order decides
//! both section order (first appearance) and entry order.
//!
//! Probes are best-effort: a failing command leaves its entry without
//! values, which the report renderer then omits.
//!
//! # Example
//!
//! ```ignore
//! let profile = collect_profile(&session, DEFAULT_PROBES).await;
//! println!("{}", render(&profile));
//! ```

use super::session::RemoteShell;
use crate::models::{Entry, EntryValues, Profile, Section};

/// One fact to gather from the remote host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactProbe {
    /// Section title the entry is filed under
    pub section: &'static str,
    /// Entry name
    pub name: &'static str,
    /// POSIX shell command; each non-blank stdout line becomes one value
    pub command: &'static str,
    /// Run through the session's root escalation
    pub privileged: bool,
}

impl FactProbe {
    const fn new(section: &'static str, name: &'static str, command: &'static str) -> Self {
        Self {
            section,
            name,
            command,
            privileged: false,
        }
    }

    const fn privileged(self) -> Self {
        Self {
            privileged: true,
            ..self
        }
    }
}

/// Facts collected for every profiled Linux host
pub const DEFAULT_PROBES: &[FactProbe] = &[
    FactProbe::new("System", "Hostname", "hostname 2>/dev/null || uname -n"),
    FactProbe::new(
        "System",
        "Operating System",
        r#"sed -n 's/^PRETTY_NAME=//p' /etc/os-release 2>/dev/null | tr -d '"'"#,
    ),
    FactProbe::new("System", "Kernel", "uname -r"),
    FactProbe::new("System", "Architecture", "uname -m"),
    FactProbe::new("System", "Uptime", "uptime -p 2>/dev/null || uptime"),
    FactProbe::new(
        "CPU",
        "Model",
        "sed -n 's/^model name[[:space:]]*: //p' /proc/cpuinfo | head -n 1",
    ),
    FactProbe::new(
        "CPU",
        "Cores",
        "nproc 2>/dev/null || grep -c ^processor /proc/cpuinfo",
    ),
    FactProbe::new(
        "Memory",
        "Total",
        r#"awk '/^MemTotal:/ {printf "%.0f MiB\n", $2/1024}' /proc/meminfo"#,
    ),
    FactProbe::new(
        "Memory",
        "Available",
        r#"awk '/^MemAvailable:/ {printf "%.0f MiB\n", $2/1024}' /proc/meminfo"#,
    ),
    FactProbe::new(
        "Memory",
        "Swap",
        r#"awk '/^SwapTotal:/ && $2 > 0 {printf "%.0f MiB\n", $2/1024}' /proc/meminfo"#,
    ),
    FactProbe::new(
        "Storage",
        "Filesystems",
        r#"df -hP -x tmpfs -x devtmpfs 2>/dev/null | awk 'NR > 1 {print $6 " " $3 "/" $2 " (" $5 ")"}'"#,
    ),
    FactProbe::new(
        "Network",
        "Addresses",
        r#"ip -o addr show scope global 2>/dev/null | awk '{print $2 " " $4}'"#,
    ),
    FactProbe::new(
        "Network",
        "Listening Ports",
        r#"ss -H -tln 2>/dev/null | awk '{print $4}' | sort -u"#,
    )
    .privileged(),
    FactProbe::new(
        "Software",
        "Package Manager",
        "for p in apt-get dnf yum zypper pacman apk; do command -v $p >/dev/null 2>&1 && echo $p && break; done",
    ),
    FactProbe::new(
        "Software",
        "Running Services",
        "systemctl list-units --type=service --state=running --no-legend --no-pager 2>/dev/null | awk '{print $1}'",
    ),
];

/// Run every probe against the shell and assemble the profile
pub async fn collect_profile(shell: &dyn RemoteShell, probes: &[FactProbe]) -> Profile {
    let mut sections: Vec<Section> = Vec::new();

    for probe in probes {
        let values = match shell.run(probe.command, probe.privileged).await {
            Ok(stdout) => output_values(&stdout),
            Err(e) => {
                tracing::warn!(
                    host = shell.host(),
                    section = probe.section,
                    entry = probe.name,
                    "probe failed: {e}"
                );
                EntryValues::default()
            }
        };

        let entry = Entry {
            name: probe.name.to_string(),
            values,
        };
        match sections.iter_mut().find(|s| s.title == probe.section) {
            Some(section) => section.entries.push(entry),
            None => sections.push(Section::new(probe.section, vec![entry])),
        }
    }

    tracing::debug!(
        host = shell.host(),
        sections = sections.len(),
        probes = probes.len(),
        "profile collected"
    );
    Profile::new(sections)
}

/// Non-blank stdout lines, trimmed, in order
fn output_values(stdout: &str) -> EntryValues {
    EntryValues::new(
        stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect(),
    )
}
