use clap::Parser;
use flockprobe::app::{run_profile, ProfileReport};
use flockprobe::cli::{load_profile, Cli, Command, OutputArgs, RenderArgs, RunArgs};
use flockprobe::constants::{APP_NAME, APP_VERSION};
use flockprobe::form::{self, TerminalPrompter};
use flockprobe::logger;
use flockprobe::platform::SshExecutor;
use flockprobe::utils::{CliError, ProfileError};
use std::process::ExitCode;

const EXIT_LOCAL_ERROR: u8 = 1;
const EXIT_VALIDATION_ERROR: u8 = 2;
const EXIT_CONNECTION_ERROR: u8 = 3;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init_logging(cli.verbose);
    tracing::debug!("{} {} starting", APP_NAME, APP_VERSION);

    match cli.command {
        Command::Run(args) => run(args).await,
        Command::Render(args) => render(args),
    }
}

async fn run(args: RunArgs) -> ExitCode {
    let mut raw = args.raw_input();
    if args.needs_form() {
        if let Err(e) = form::fill(&mut raw, &mut TerminalPrompter::new()) {
            return local_failure(e.into());
        }
    }

    let executor = SshExecutor::new(args.ssh_options());
    let mut report = match run_profile(&raw, &executor).await {
        Ok(report) => report,
        Err(e) => {
            tracing::debug!(error = %e, "profile failed");
            eprintln!("{}", e.user_message(&raw));
            return ExitCode::from(match e {
                ProfileError::Validation(_) => EXIT_VALIDATION_ERROR,
                ProfileError::Connection(_) => EXIT_CONNECTION_ERROR,
            });
        }
    };

    if let Err(e) = args.output.apply_headline(&mut report) {
        return local_failure(e);
    }
    print_report(&report, &args.output)
}

fn render(args: RenderArgs) -> ExitCode {
    let profile = match load_profile(&args.path) {
        Ok(profile) => profile,
        Err(e) => return local_failure(e),
    };
    let mut report = ProfileReport::from_profile(profile);
    if let Err(e) = args.output.apply_headline(&mut report) {
        return local_failure(e);
    }
    print_report(&report, &args.output)
}

fn print_report(report: &ProfileReport, output: &OutputArgs) -> ExitCode {
    match output.format(report) {
        Ok(text) => {
            println!("{}", text);
            ExitCode::SUCCESS
        }
        Err(e) => local_failure(e),
    }
}

fn local_failure(err: CliError) -> ExitCode {
    tracing::error!(error = %err, "aborting");
    eprintln!("{}", err);
    ExitCode::from(EXIT_LOCAL_ERROR)
}
