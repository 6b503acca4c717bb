//! k8ctl CLI binary entrypoint.
//!
//! This is the main entry point for the `k8ctl` command-line tool.

use std::io;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use k8ctl_cli::cli::{Cli, Commands};
use k8ctl_cli::commands::{
    DeploymentCommand, GuideCommand, ReleaseCommand, ResourceCommand, VersionCommand,
};
use k8ctl_cli::{CliError, Dispatcher};
use k8ctl_config::Config;
use k8ctl_proto::ResourceKind;

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Run async runtime
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();

    let (kind, command) = match &cli.command {
        Commands::Version => return VersionCommand.execute(&mut stdout),
        Commands::Releases { command } => {
            let dispatcher = connect(&cli)?;
            let cmd = ReleaseCommand::new(&dispatcher);
            return cmd.execute(&mut stdout, command).await;
        }
        Commands::Deployments { command } => {
            let dispatcher = connect(&cli)?;
            let cmd = DeploymentCommand::new(&dispatcher);
            return cmd.execute(&mut stdout, command).await;
        }
        Commands::Guide => {
            let dispatcher = connect(&cli)?;
            let cmd = GuideCommand::new(&dispatcher);
            return cmd.execute(&mut stdout).await;
        }
        Commands::Pods { command } => (ResourceKind::Pod, command),
        Commands::Jobs { command } => (ResourceKind::Job, command),
        Commands::Cronjobs { command } => (ResourceKind::Cronjob, command),
        Commands::Ingresses { command } => (ResourceKind::Ingress, command),
        Commands::Services { command } => (ResourceKind::Service, command),
        Commands::Configmaps { command } => (ResourceKind::Configmap, command),
        Commands::Secrets { command } => (ResourceKind::Secret, command),
    };

    let dispatcher = connect(&cli)?;
    let cmd = ResourceCommand::new(&dispatcher, kind);
    cmd.execute(&mut stdout, command).await
}

/// Resolves the selected cluster and builds the dispatcher for it.
fn connect(cli: &Cli) -> Result<Dispatcher, CliError> {
    let cluster = cli
        .cluster
        .as_deref()
        .filter(|name| !name.is_empty())
        .ok_or_else(|| CliError::InvalidArgument("--cluster is required".into()))?;

    let config = Config::discover(cli.config.as_deref())?;
    let endpoint = config.resolve(cluster)?;

    let dispatcher = Dispatcher::new(&endpoint)?;
    debug!(cluster, url = %dispatcher.base_url(), "Using cluster");
    Ok(match cli.timeout {
        Some(secs) => dispatcher.with_timeout(Duration::from_secs(secs)),
        None => dispatcher,
    })
}
