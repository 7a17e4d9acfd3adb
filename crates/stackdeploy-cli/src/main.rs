//! stackdeploy - deploy compose stacks through the docker CLI
//!
//! Usage:
//!   stackdeploy list            # Show configured stacks
//!   stackdeploy deploy <stack>  # docker stack deploy
//!   stackdeploy rm <stack>...   # docker stack rm, one stack at a time
//!   stackdeploy show <stack>    # Print the command without running it

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stackdeploy_core::config::{ConfigStore, StackDeployConfig};
use stackdeploy_core::error::StackError;
use stackdeploy_core::manager::StackManager;
use stackdeploy_core::runner::CommandRunner;

#[derive(Parser)]
#[command(name = "stackdeploy")]
#[command(about = "Deploy compose stacks to docker engines", long_about = None)]
struct Cli {
    /// Path to stackdeploy.toml (defaults to the user config directory)
    #[arg(long, short, global = true, env = "STACKDEPLOY_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Deploy a stack (docker stack deploy)
    Deploy {
        /// Stack name as configured in [stacks]
        stack: String,
    },

    /// Remove stacks (docker stack rm)
    ///
    /// Each stack is removed on its own; a failure does not stop the rest.
    #[command(alias = "remove")]
    Rm {
        /// Stack names as configured in [stacks]
        #[arg(required = true, num_args = 1..)]
        stacks: Vec<String>,
    },

    /// Print the command line for a stack operation without running it
    Show {
        /// Stack name as configured in [stacks]
        stack: String,

        /// Operation to show
        #[arg(long, short, default_value = "deploy")]
        action: Action,
    },

    /// List configured stacks
    List {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, ValueEnum, Default, PartialEq, Eq, Debug)]
enum Action {
    #[default]
    Deploy,
    Rm,
}

#[derive(Clone, Copy, ValueEnum, Default, PartialEq, Eq, Debug)]
enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// Machine-readable JSON
    Json,
}

#[derive(Serialize)]
struct StackRow<'a> {
    name: &'a str,
    endpoint: &'a str,
    url: &'a str,
    project_path: String,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stackdeploy=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            let _ = report_error(&err, &mut std::io::stderr().lock());
            ExitCode::FAILURE
        }
    }
}

/// Run a command; `Ok(false)` means some stacks failed and were already reported.
fn run(cli: Cli) -> Result<bool> {
    let store = match cli.config {
        Some(path) => ConfigStore::from_path(path),
        None => ConfigStore::from_default()?,
    };
    tracing::debug!(path = %store.config_path().display(), "loading config");
    let config = store.load()?;

    match cli.command {
        Commands::Deploy { stack } => {
            let (stack, endpoint) = config.resolve(&stack)?;
            manager_for(&config).deploy(&stack, &endpoint)?;
            println!("Deployed stack {}", stack.name);
        }
        Commands::Rm { stacks } => {
            return remove_stacks(
                &config,
                &manager_for(&config),
                &stacks,
                &mut std::io::stdout().lock(),
                &mut std::io::stderr().lock(),
            );
        }
        Commands::Show { stack, action } => {
            let (stack, endpoint) = config.resolve(&stack)?;
            let manager = manager_for(&config);
            let spec = match action {
                Action::Deploy => manager.deploy_command(&stack, &endpoint),
                Action::Rm => manager.remove_command(&stack, &endpoint),
            };
            println!("{spec}");
        }
        Commands::List { format } => match format {
            OutputFormat::Table => print_stack_table(&config),
            OutputFormat::Json => print_stack_json(&config)?,
        },
    }

    Ok(true)
}

/// Remove each named stack, reporting per stack. Returns whether all succeeded.
fn remove_stacks<R: CommandRunner>(
    config: &StackDeployConfig,
    manager: &StackManager<R>,
    names: &[String],
    out: &mut impl Write,
    err_out: &mut impl Write,
) -> Result<bool> {
    let mut all_removed = true;
    for name in names {
        let outcome = config
            .resolve(name)
            .and_then(|(stack, endpoint)| Ok(manager.remove(&stack, &endpoint)?));
        match outcome {
            Ok(()) => writeln!(out, "Removed stack {name}")?,
            Err(err) => {
                all_removed = false;
                tracing::warn!(stack = %name, "stack removal failed");
                report_error(&err, err_out)?;
            }
        }
    }
    Ok(all_removed)
}

/// Print an error for the operator.
///
/// Tool diagnostics are printed as-is since they already describe the failure.
fn report_error(err: &anyhow::Error, out: &mut impl Write) -> std::io::Result<()> {
    match err.downcast_ref::<StackError>() {
        Some(StackError::Operation { detail, code }) if detail.trim().is_empty() => {
            match code {
                Some(code) => writeln!(
                    out,
                    "Error: orchestration tool exited with code {code} and no diagnostics"
                ),
                None => writeln!(
                    out,
                    "Error: orchestration tool was terminated with no diagnostics"
                ),
            }
        }
        Some(StackError::Operation { detail, .. }) => {
            write!(out, "{detail}")?;
            if !detail.ends_with('\n') {
                writeln!(out)?;
            }
            Ok(())
        }
        _ => writeln!(out, "Error: {err:#}"),
    }
}

fn manager_for(config: &StackDeployConfig) -> StackManager {
    StackManager::new().with_tool(config.tool())
}

fn stack_rows(config: &StackDeployConfig) -> Vec<StackRow<'_>> {
    config
        .stacks
        .iter()
        .map(|(name, entry)| StackRow {
            name,
            endpoint: &entry.endpoint,
            url: config
                .endpoints
                .get(&entry.endpoint)
                .map(|e| e.url.as_str())
                .unwrap_or("-"),
            project_path: entry.project_path.display().to_string(),
        })
        .collect()
}

fn print_stack_table(config: &StackDeployConfig) {
    let rows = stack_rows(config);
    if rows.is_empty() {
        println!("No stacks configured.");
        return;
    }

    println!("{:<20} {:<12} {:<30} PATH", "STACK", "ENDPOINT", "URL");
    for row in rows {
        println!(
            "{:<20} {:<12} {:<30} {}",
            truncate(row.name, 20),
            truncate(row.endpoint, 12),
            truncate(row.url, 30),
            row.project_path
        );
    }
}

fn print_stack_json(config: &StackDeployConfig) -> Result<()> {
    let json = serde_json::to_string_pretty(&stack_rows(config))?;
    println!("{json}");
    Ok(())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
