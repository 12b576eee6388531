// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! kira - the Kira CLI (§6 "CLI surface")

mod color;
mod commands;
mod envelope;
mod exit_error;
mod help;
mod output;
mod table;

use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};

use commands::{agent, diag, doctor, task, validate};
use envelope::Trace;
use kira_daemon::{env, KiraConfig};
use output::OutputFormat;

#[derive(Parser)]
#[command(name = "kira", version, disable_version_flag = true, about = "Kira - a local-first personal knowledge and task engine")]
struct Cli {
    /// Output format
    #[arg(short = 'o', long = "output", value_enum, default_value_t, global = true)]
    output: OutputFormat,

    /// Machine-readable output (shorthand for --output json)
    #[arg(long, global = true)]
    json: bool,

    /// Validate and report, but never mutate the vault
    #[arg(long, global = true)]
    dry_run: bool,

    /// Skip interactive confirmation
    #[arg(long, global = true)]
    yes: bool,

    /// Correlate this invocation's logs/audit record across components
    #[arg(long, global = true)]
    trace_id: Option<String>,

    /// Append a trace id to human-readable error output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run graph validation (cycles, orphans, broken links, duplicates)
    Validate(validate::ValidateArgs),
    /// Create, update, list, get, or delete a task
    Task(task::TaskArgs),
    /// Tail or summarize structured logs
    Diag(diag::DiagArgs),
    /// Check vault lock, config, and log directory health
    Doctor(doctor::DoctorArgs),
    /// Plan and execute a natural-language request against the vault
    Agent(agent::AgentArgs),
}

fn main() {
    let matches = match cli_command().try_get_matches() {
        Ok(m) => m,
        Err(e) => e.exit(),
    };
    let cli = match Cli::from_arg_matches(&matches) {
        Ok(cli) => cli,
        Err(e) => e.exit(),
    };

    let format = if cli.json { OutputFormat::Json } else { cli.output };
    let trace = Trace { trace_id: cli.trace_id.clone().unwrap_or_else(new_trace_id), verbose: cli.verbose };

    let Some(command) = cli.command else {
        help::print_help(cli_command());
        std::process::exit(0);
    };

    let config = match env::config_path().and_then(|p| KiraConfig::load(&p)) {
        Ok(c) => c,
        Err(e) => std::process::exit(envelope::error(format, &trace, &e.to_string(), exit_error::ExitError::CONFIG)),
    };

    let code = match command {
        Commands::Validate(args) => validate::handle(args, &config.vault_path, format, &trace),
        Commands::Task(args) => task::handle(args.command, &config.vault_path, cli.dry_run, format, &trace),
        Commands::Diag(args) => diag::handle(args.command, &config.vault_path, format, &trace),
        Commands::Doctor(args) => doctor::handle(args, format, &trace),
        Commands::Agent(args) => agent::handle(args, &config.vault_path, format, &trace),
    };

    std::process::exit(code);
}

fn cli_command() -> clap::Command {
    Cli::command()
        .help_template(help::template())
        .before_help(help::commands())
        .after_help(help::after_help())
        .styles(help::styles())
        .arg(
            clap::Arg::new("version")
                .short('v')
                .long("version")
                .action(clap::ArgAction::Version)
                .help("Print version"),
        )
}

/// A short, unique-enough correlation id when the caller doesn't supply `--trace-id`.
fn new_trace_id() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!("{nanos:x}")
}
