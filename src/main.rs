//! # submit50
//!
//! Command-line submission client: packages the files in the current
//! directory, merges in instructor-provided dotfiles, and pushes the result
//! as a commit to the student's per-assignment repository.
//!
//! This CLI is built with [clap](https://docs.rs/clap).

use std::env;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use colored::Colorize;
use submit50::{
    Error, Honesty, SUBMIT_URL, Submission, SubmitOptions, check_announcements, check_version,
    http_client, install_interrupt_handler, is_affirmative, submit,
};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line interface definition.
///
/// Parsed using `clap` derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "submit50",
    version,
    about = "submit50 - submit coursework to your assignment repository",
    arg_required_else_help = true
)]
struct Cli {
    /// Prescribed identifier of work to submit (org/assignment-username)
    slug: String,

    /// Diagnostics written to stderr: info adds the git commands run,
    /// debug adds their output
    #[arg(long, value_enum, default_value = "warn")]
    log_level: LogLevel,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
}

impl LogLevel {
    fn as_filter(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }
}

/// Initialize the tracing subscriber. `RUST_LOG` wins over `--log-level`.
fn setup_logging(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_filter()));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr).compact())
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.log_level);
    if let Err(err) = install_interrupt_handler() {
        debug!("could not install interrupt handler: {err}");
    }

    match run(&cli) {
        Ok(submission) => {
            println!(
                "{}",
                format!(
                    "Submitted {}! Commit {} is on branch {}.",
                    cli.slug,
                    &submission.commit[..submission.commit.len().min(7)],
                    submission.branch
                )
                .green()
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            report_error(&err);
            eprintln!("{}", "Submission cancelled.".red());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<Submission> {
    let client = http_client()?;
    let base_url = env::var("SUBMIT50_URL").unwrap_or_else(|_| SUBMIT_URL.to_string());
    check_announcements(&client, &base_url)?;
    check_version(&client, &base_url, env!("CARGO_PKG_VERSION"))?;

    let opts = SubmitOptions::new(cli.slug.clone(), env::current_dir()?);
    submit(&opts, terminal_prompt)
}

/// The confirmation callback: list the classified files, then ask the
/// honesty question on the terminal. EOF declines.
fn terminal_prompt(honesty: &Honesty, included: &[String], excluded: &[String]) -> bool {
    println!("{}", "Files that will be submitted:".green());
    for file in included {
        println!("{}", format!("./{file}").green());
    }
    if !excluded.is_empty() {
        println!("{}", "Files that won't be submitted:".yellow());
        for file in excluded {
            println!("{}", format!("./{file}").yellow());
        }
    }

    let Some(question) = honesty.question() else {
        return true;
    };
    print!("{}", question.yellow());
    let _ = io::stdout().flush();

    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(0) | Err(_) => {
            println!();
            false
        }
        Ok(_) => is_affirmative(&answer),
    }
}

/// Exactly one terminal message per failed run: domain errors get their
/// tailored text, everything else the generic one. The full error chain is
/// visible only at debug level.
fn report_error(err: &anyhow::Error) {
    debug!("{err:?}");
    match err.downcast_ref::<Error>() {
        Some(domain) => eprintln!("{}", domain.to_string().yellow()),
        None => eprintln!(
            "{}",
            "Sorry, something's wrong, please try again. If the problem persists, please \
             visit our status page https://cs50.statuspage.io for more information."
                .yellow()
        ),
    }
}
