use std::ffi::OsStr;

use clap_complete::engine::{ArgValueCompleter, CompletionCandidate};
use kube::config::Kubeconfig;
use tokio::{runtime::Handle, task};

use crate::{
    client::{ClusterClient, KubeClusterClient},
    config::{ClientOptions, connect, read_kubeconfig},
};

/// Create an `ArgValueCompleter` that lists contexts from the kubeconfig the binary reads by default.
///
/// The current context is offered first.
pub fn context_value_completer() -> ArgValueCompleter {
    ArgValueCompleter::new(|input: &OsStr| -> Vec<CompletionCandidate> {
        let kubeconfig = match ClientOptions::default()
            .kubeconfig_path()
            .and_then(|path| read_kubeconfig(&path))
        {
            Ok(kubeconfig) => kubeconfig,
            Err(_) => return Vec::new(),
        };

        let input = input.to_string_lossy();
        matching_contexts(&kubeconfig, input.trim())
            .into_iter()
            .map(CompletionCandidate::new)
            .collect()
    })
}

fn matching_contexts(kubeconfig: &Kubeconfig, prefix: &str) -> Vec<String> {
    let current = kubeconfig.current_context.as_deref();
    let (mut current_first, others): (Vec<String>, Vec<String>) = matching_names(
        kubeconfig.contexts.iter().map(|named| named.name.clone()),
        prefix,
    )
    .partition(|name| Some(name.as_str()) == current);
    current_first.extend(others);
    current_first
}

/// Create an `ArgValueCompleter` that lists namespaces of the current context.
///
/// This makes a network call to the cluster, so it may be slow, and it returns
/// no candidates on network, authentication or permission failures.
///
/// Limitation: `--context` and `--kubeconfig` given on the same command line are not considered.
/// See https://github.com/clap-rs/clap/issues/1910 for more details.
pub fn namespace_value_completer() -> ArgValueCompleter {
    ArgValueCompleter::new(|input: &OsStr| -> Vec<CompletionCandidate> {
        let input = input.to_string_lossy();
        let prefix = input.trim();

        let namespaces_future = async {
            let client = match connect(&ClientOptions::default()).await {
                Ok(client) => KubeClusterClient::new(client),
                Err(_) => return Vec::new(),
            };

            match client.list_namespaces().await {
                Ok(namespaces) => matching_names(
                    namespaces.into_iter().filter_map(|ns| ns.metadata.name),
                    prefix,
                )
                .map(CompletionCandidate::new)
                .collect(),
                Err(_) => Vec::new(),
            }
        };

        // If called on an existing Tokio runtime, `Runtime::block_on` will panic.
        // Therefore, if a runtime exists, we use `block_in_place` to escape to a blocking thread,
        // and from there we call `block_on` with the current handle.
        match Handle::try_current() {
            Ok(handle) => task::block_in_place(move || handle.block_on(namespaces_future)),
            Err(_) => tokio::runtime::Runtime::new()
                .map(|rt| rt.block_on(namespaces_future))
                .unwrap_or_default(),
        }
    })
}

fn matching_names<'a>(
    names: impl Iterator<Item = String> + 'a,
    prefix: &'a str,
) -> impl Iterator<Item = String> + 'a {
    names.filter(move |name| name.starts_with(prefix))
}
