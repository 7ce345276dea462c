//! Command-line surface
//!
//! `flockprobe run` profiles a host over SSH; `flockprobe render` re-renders a
//! saved profile without connecting.

use crate::app::ProfileReport;
use crate::constants::{
    APP_NAME, DEFAULT_CONNECT_RETRIES, ENV_PASSWORD, ENV_ROOT_PASSWORD, FORM_DEFAULT_PORT,
    FORM_DEFAULT_USERNAME, HEADLINE_ENTRY_PATTERN, HEADLINE_SECTION_PATTERN,
    SSH_COMMAND_TIMEOUT_SECS, SSH_CONNECT_TIMEOUT_SECS,
};
use crate::core::find_entry_value;
use crate::models::{Profile, RawHostInput};
use crate::platform::SshOptions;
use crate::utils::{CliError, RetryConfig};
use clap::{Args, Parser, Subcommand, ValueEnum};
use regex::Regex;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(name = APP_NAME, version, about = "Profile a remote Unix host over SSH")]
pub struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in to a host and report what it is running
    Run(RunArgs),
    /// Render a profile saved as JSON
    Render(RenderArgs),
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Host to profile; the interactive form opens when omitted
    #[arg(short = 'H', long)]
    pub hostname: Option<String>,

    #[arg(short, long, default_value = FORM_DEFAULT_USERNAME)]
    pub username: String,

    #[arg(long, env = ENV_PASSWORD, hide_env_values = true)]
    pub password: Option<String>,

    /// Needed for su escalation when not logging in as root or using sudo
    #[arg(long, env = ENV_ROOT_PASSWORD, hide_env_values = true)]
    pub root_password: Option<String>,

    #[arg(short, long, default_value = FORM_DEFAULT_PORT)]
    pub port: String,

    /// Escalate with sudo instead of su
    #[arg(long)]
    pub sudo: bool,

    /// Always fill in the host form, using flags as initial values
    #[arg(short, long)]
    pub interactive: bool,

    /// TCP connect timeout in seconds
    #[arg(long, default_value_t = SSH_CONNECT_TIMEOUT_SECS)]
    pub connect_timeout: u64,

    /// Per-command timeout in seconds
    #[arg(long, default_value_t = SSH_COMMAND_TIMEOUT_SECS)]
    pub command_timeout: u64,

    /// Extra connect attempts after a refused or timed-out connection
    #[arg(long, default_value_t = DEFAULT_CONNECT_RETRIES)]
    pub retries: u32,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Profile JSON file
    pub path: PathBuf,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args)]
pub struct OutputArgs {
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Section name pattern (regex) used to pick the title
    #[arg(long)]
    pub headline_section: Option<String>,

    /// Entry name pattern (regex) used to pick the title
    #[arg(long)]
    pub headline_entry: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl RunArgs {
    /// Flags as a raw form, before any interactive editing
    pub fn raw_input(&self) -> RawHostInput {
        RawHostInput::new(
            self.hostname.clone().unwrap_or_default(),
            self.username.clone(),
            self.port.clone(),
        )
        .with_password(self.password.clone().unwrap_or_default())
        .with_root_password(self.root_password.clone().unwrap_or_default())
        .with_sudo(self.sudo)
    }

    pub fn needs_form(&self) -> bool {
        self.interactive || self.hostname.is_none()
    }

    pub fn ssh_options(&self) -> SshOptions {
        SshOptions {
            connect_timeout: Duration::from_secs(self.connect_timeout),
            command_timeout: Duration::from_secs(self.command_timeout),
            retry: RetryConfig::with_retries(self.retries),
        }
    }
}

impl OutputArgs {
    /// Recompute the headline when either pattern was given
    ///
    /// A missing pattern falls back to the default for that half.
    pub fn apply_headline(&self, report: &mut ProfileReport) -> Result<(), CliError> {
        if self.headline_section.is_none() && self.headline_entry.is_none() {
            return Ok(());
        }
        let section = compile(
            self.headline_section
                .as_deref()
                .unwrap_or(HEADLINE_SECTION_PATTERN),
        )?;
        let entry = compile(self.headline_entry.as_deref().unwrap_or(HEADLINE_ENTRY_PATTERN))?;
        report.headline = find_entry_value(&report.profile, &section, &entry);
        Ok(())
    }

    pub fn format(&self, report: &ProfileReport) -> Result<String, CliError> {
        format_report(report, self.format)
    }
}

fn compile(pattern: &str) -> Result<Regex, CliError> {
    Regex::new(pattern).map_err(|source| CliError::Pattern {
        pattern: pattern.to_string(),
        source,
    })
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    title: String,
    #[serde(flatten)]
    report: &'a ProfileReport,
}

/// Text: title, blank line, report. JSON: title plus the report fields.
pub fn format_report(report: &ProfileReport, format: OutputFormat) -> Result<String, CliError> {
    match format {
        OutputFormat::Text => Ok(format!("{}\n\n{}", report.title(), report.report)),
        OutputFormat::Json => {
            let output = JsonOutput {
                title: report.title(),
                report,
            };
            Ok(serde_json::to_string_pretty(&output)?)
        }
    }
}

/// Read a profile saved as JSON
pub fn load_profile(path: &Path) -> Result<Profile, CliError> {
    let display = path.display().to_string();
    let text = std::fs::read_to_string(path).map_err(|source| CliError::ReadProfile {
        path: display.clone(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CliError::ParseProfile {
        path: display,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::mock_session::MockExecutor;
    use crate::models::{Entry, Section};

    fn run_args(argv: &[&str]) -> RunArgs {
        let mut full = vec!["flockprobe", "run"];
        full.extend_from_slice(argv);
        match Cli::try_parse_from(full).unwrap().command {
            Command::Run(args) => args,
            other => panic!("expected run, got {:?}", other),
        }
    }

    fn sample_report() -> ProfileReport {
        let profile = Profile::new(vec![
            Section {
                title: "System".into(),
                entries: vec![
                    Entry::new("Hostname", "db1"),
                    Entry::new("FQDN", "db1.example.com"),
                ],
            },
            Section {
                title: "Memory".into(),
                entries: vec![Entry::new("Total", "64 GiB")],
            },
        ]);
        ProfileReport::from_profile(profile)
    }

    #[test]
    fn test_run_defaults() {
        let args = run_args(&["-H", "db1"]);
        let raw = args.raw_input();

        assert_eq!(raw.hostname, "db1");
        assert_eq!(raw.username, "root");
        assert_eq!(raw.port, "22");
        assert!(!raw.use_sudo);
        assert!(!args.needs_form());
        assert_eq!(args.output.format, OutputFormat::Text);

        let options = args.ssh_options();
        assert_eq!(options.connect_timeout, Duration::from_secs(SSH_CONNECT_TIMEOUT_SECS));
        assert_eq!(options.retry.max_retries, DEFAULT_CONNECT_RETRIES);
    }

    #[test]
    fn test_run_flags_map_to_input() {
        let args = run_args(&[
            "--hostname",
            "db1",
            "-u",
            "alice",
            "--password",
            "pw",
            "--port",
            "2222",
            "--sudo",
            "--retries",
            "0",
            "--format",
            "json",
        ]);
        let raw = args.raw_input();

        assert_eq!(raw.username, "alice");
        assert_eq!(raw.password.as_str(), "pw");
        assert_eq!(raw.port, "2222");
        assert!(raw.use_sudo);
        assert_eq!(args.ssh_options().retry.max_retries, 0);
        assert_eq!(args.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_missing_hostname_opens_form() {
        assert!(run_args(&[]).needs_form());
        assert!(run_args(&["-H", "db1", "--interactive"]).needs_form());
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = Cli::try_parse_from(["flockprobe", "render", "p.json", "-v"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Command::Render(args) => assert_eq!(args.path, PathBuf::from("p.json")),
            other => panic!("expected render, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(Cli::try_parse_from(["flockprobe", "render", "p.json", "--format", "xml"]).is_err());
    }

    #[test]
    fn test_text_output() {
        let text = format_report(&sample_report(), OutputFormat::Text).unwrap();
        assert_eq!(
            text,
            "Results for db1\n\nSystem\nHostname: db1\nFQDN: db1.example.com\n\nMemory\nTotal: 64 GiB"
        );
    }

    #[test]
    fn test_json_output() {
        let json = format_report(&sample_report(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["title"], "Results for db1");
        assert_eq!(value["headline"], "db1");
        assert_eq!(value["profile"]["sections"][1]["title"], "Memory");
        assert!(value["report"].as_str().unwrap().starts_with("System\n"));
    }

    #[test]
    fn test_headline_override() {
        let mut report = sample_report();
        let output = OutputArgs {
            format: OutputFormat::Text,
            headline_section: None,
            headline_entry: Some("^FQDN$".into()),
        };

        output.apply_headline(&mut report).unwrap();

        assert_eq!(report.headline, "db1.example.com");
        assert_eq!(report.title(), "Results for db1.example.com");
    }

    #[test]
    fn test_bad_headline_pattern() {
        let mut report = sample_report();
        let output = OutputArgs {
            format: OutputFormat::Text,
            headline_section: Some("(".into()),
            headline_entry: None,
        };

        let err = output.apply_headline(&mut report).unwrap_err();

        assert!(matches!(err, CliError::Pattern { .. }));
        assert_eq!(report.headline, "db1");
    }

    #[test]
    fn test_load_profile_round_trip_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db1.json");
        std::fs::write(
            &path,
            r#"{"sections":[{"title":"System","entries":[{"name":"Hostname","values":"db1"}]}]}"#,
        )
        .unwrap();

        let profile = load_profile(&path).unwrap();
        let report = ProfileReport::from_profile(profile);

        assert_eq!(report.report, "System\nHostname: db1");
    }

    #[test]
    fn test_load_profile_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.json");
        assert!(matches!(
            load_profile(&missing),
            Err(CliError::ReadProfile { .. })
        ));

        let garbage = dir.path().join("garbage.json");
        std::fs::write(&garbage, "not json").unwrap();
        assert!(matches!(
            load_profile(&garbage),
            Err(CliError::ParseProfile { .. })
        ));
    }

    #[tokio::test]
    async fn test_run_args_drive_workflow() {
        let args = run_args(&["-H", " db1 ", "--password", "pw"]);
        let executor = MockExecutor::linux_host("db1");

        let report = crate::app::run_profile(&args.raw_input(), &executor)
            .await
            .unwrap();

        assert_eq!(report.title(), "Results for db1");
        assert_eq!(executor.calls(), 1);
    }
}
