use std::path::{Path, PathBuf};

use anyhow::Context;
use kube::{
    Client, Config,
    config::{KubeConfigOptions, Kubeconfig},
};

/// How to authenticate against the cluster.
#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    /// Kubeconfig file; defaults to `$HOME/.kube/config`.
    pub kubeconfig: Option<PathBuf>,
    /// Context to use instead of the kubeconfig's `current-context`.
    pub context: Option<String>,
    /// Use the service account mounted into the pod instead of a kubeconfig.
    pub in_cluster: bool,
}

impl ClientOptions {
    /// The kubeconfig file that will be read.
    pub fn kubeconfig_path(&self) -> anyhow::Result<PathBuf> {
        match &self.kubeconfig {
            Some(path) => Ok(path.clone()),
            None => default_kubeconfig_path(),
        }
    }
}

/// `$HOME/.kube/config`.
pub fn default_kubeconfig_path() -> anyhow::Result<PathBuf> {
    let home = dirs::home_dir().context("Failed to determine user home directory")?;
    Ok(home.join(".kube").join("config"))
}

/// Detects the Kubernetes context to use.
///
/// Context determination follows this priority:
/// 1. Uses the context if explicitly specified.
/// 2. Uses the current context of the given kubeconfig.
///
/// # Errors
/// Returns an error if no context is specified and the kubeconfig has no current context.
pub fn determine_context(context: Option<&str>, kubeconfig: &Kubeconfig) -> anyhow::Result<String> {
    match context {
        Some(context) => Ok(context.to_string()),
        None => kubeconfig
            .current_context
            .clone()
            .ok_or_else(|| anyhow::anyhow!("current_context is not set")),
    }
}

/// Read the kubeconfig file at `path`.
pub fn read_kubeconfig(path: &Path) -> anyhow::Result<Kubeconfig> {
    Kubeconfig::read_from(path)
        .with_context(|| format!("Failed to read kubeconfig file {}", path.display()))
}

/// Build the client configuration described by `options`.
pub async fn load_config(options: &ClientOptions) -> anyhow::Result<Config> {
    if options.in_cluster {
        tracing::info!("using in-cluster configuration");
        return Config::incluster().context("Failed to load in-cluster configuration");
    }

    let path = options.kubeconfig_path()?;
    let kubeconfig = read_kubeconfig(&path)?;
    let context = determine_context(options.context.as_deref(), &kubeconfig)?;
    tracing::info!(context = %context, "using kubeconfig context");

    let kube_options = KubeConfigOptions {
        context: Some(context.clone()),
        ..Default::default()
    };
    Config::from_custom_kubeconfig(kubeconfig, &kube_options)
        .await
        .with_context(|| format!("Failed to load kubeconfig context {context}"))
}

/// Build an authenticated client. Every failure here is fatal for the caller.
pub async fn connect(options: &ClientOptions) -> anyhow::Result<Client> {
    let config = load_config(options).await?;
    Client::try_from(config).context("Failed to create Kubernetes client")
}

#[cfg(test)]
mod tests {
    use kube::config::{Kubeconfig, NamedContext};

    use super::{ClientOptions, determine_context, read_kubeconfig};

    fn kubeconfig(current: Option<&str>) -> Kubeconfig {
        Kubeconfig {
            current_context: current.map(String::from),
            contexts: vec![NamedContext {
                name: "kind-dev".to_string(),
                context: None,
            }],
            ..Default::default()
        }
    }

    #[test]
    fn explicit_context_wins() {
        let context = determine_context(Some("prod"), &kubeconfig(Some("kind-dev")))
            .expect("explicit context");
        assert_eq!(context, "prod");
    }

    #[test]
    fn falls_back_to_current_context() {
        let context = determine_context(None, &kubeconfig(Some("kind-dev"))).expect("current");
        assert_eq!(context, "kind-dev");
    }

    #[test]
    fn missing_current_context_is_an_error() {
        assert!(determine_context(None, &kubeconfig(None)).is_err());
    }

    #[test]
    fn explicit_kubeconfig_path_is_used() {
        let options = ClientOptions {
            kubeconfig: Some("/tmp/kubeconfig".into()),
            ..Default::default()
        };
        assert_eq!(
            options.kubeconfig_path().expect("path"),
            std::path::PathBuf::from("/tmp/kubeconfig")
        );
    }

    #[test]
    fn unreadable_kubeconfig_is_fatal() {
        let path = std::env::temp_dir().join("kubepeek-missing").join("config");
        let err = read_kubeconfig(&path).expect_err("missing kubeconfig");
        assert!(
            err.to_string().contains("Failed to read kubeconfig file"),
            "{err:#}"
        );
        assert!(err.to_string().contains("kubepeek-missing"), "{err:#}");
    }
}
