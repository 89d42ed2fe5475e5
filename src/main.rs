use std::{io, path::PathBuf, process::ExitCode};

use anyhow::Context;
use clap::{CommandFactory, Parser};
use kubepeek::{
    Catalog, KubeClusterClient, claputil,
    config::{self, ClientOptions},
    run_report, select_namespace,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "kubepeek",
    version,
    about = "Inspect the workloads of a single Kubernetes namespace"
)]
struct Cli {
    /// Namespace to inspect; prompts for one when absent or unknown.
    #[arg(add = claputil::namespace_value_completer())]
    namespace: Option<String>,

    /// Override the Kubernetes context to target.
    #[arg(long, add = claputil::context_value_completer())]
    context: Option<String>,

    /// Kubeconfig file (defaults to ~/.kube/config).
    #[arg(long, value_name = "PATH")]
    kubeconfig: Option<PathBuf>,

    /// Authenticate with the service account of the pod this runs in.
    #[arg(long, conflicts_with_all = ["context", "kubeconfig"])]
    in_cluster: bool,

    /// tracing filter (for example: warn,kubepeek=debug)
    #[arg(long, default_value = "warn")]
    log_filter: String,
}

fn init_tracing(level_filter: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level_filter))
        .context("failed to initialize tracing filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .with_writer(io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to install tracing subscriber: {err}"))
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let options = ClientOptions {
        kubeconfig: cli.kubeconfig,
        context: cli.context,
        in_cluster: cli.in_cluster,
    };
    if !options.in_cluster {
        println!("Kubeconfig file: {}", options.kubeconfig_path()?.display());
    }

    let client = KubeClusterClient::new(config::connect(&options).await?);
    let catalog = Catalog::builtin();

    let namespace = select_namespace(
        &client,
        cli.namespace.as_deref(),
        io::stdin().lock(),
        io::stdout(),
    )
    .await?;

    let summary = run_report(&client, &catalog, &namespace, &mut io::stdout().lock()).await?;
    for section in summary.failed() {
        tracing::debug!(kind = section.name, "listing failed, reported as none");
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    clap_complete::CompleteEnv::with_factory(Cli::command).complete();

    let cli = Cli::parse();
    if let Err(err) = init_tracing(&cli.log_filter) {
        eprintln!("Error: {err:#}");
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
