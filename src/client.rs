use std::future::Future;

use k8s_openapi::api::core::v1::Namespace;
use kube::{Api, Client, Error as KubeError, api::ListParams};

use crate::{catalog::ResourceKind, dynamic::DynamicObject};

/// The read-only slice of the Kubernetes API the inspector needs.
///
/// Implemented by [`KubeClusterClient`] for a live cluster; tests substitute
/// canned responses.
pub trait ClusterClient {
    /// List every namespace visible to the current credentials.
    fn list_namespaces(&self) -> impl Future<Output = Result<Vec<Namespace>, KubeError>>;

    /// List objects of `kind` in `namespace`.
    ///
    /// `field_selector` is passed to the API server as-is and evaluated there.
    fn list_objects(
        &self,
        kind: &ResourceKind,
        namespace: &str,
        field_selector: Option<&str>,
    ) -> impl Future<Output = Result<Vec<DynamicObject>, KubeError>>;
}

/// [`ClusterClient`] backed by an authenticated [`kube::Client`].
///
/// Every call issues exactly one list request: no retry and no continuation.
#[derive(Clone)]
pub struct KubeClusterClient {
    client: Client,
}

impl KubeClusterClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

/// List parameters for a single request, with the optional server-side field selector.
pub fn list_params(field_selector: Option<&str>) -> ListParams {
    match field_selector {
        Some(selector) => ListParams::default().fields(selector),
        None => ListParams::default(),
    }
}

impl ClusterClient for KubeClusterClient {
    fn list_namespaces(&self) -> impl Future<Output = Result<Vec<Namespace>, KubeError>> {
        async move {
            let namespaces: Api<Namespace> = Api::all(self.client.clone());
            Ok(namespaces.list(&ListParams::default()).await?.items)
        }
    }

    fn list_objects(
        &self,
        kind: &ResourceKind,
        namespace: &str,
        field_selector: Option<&str>,
    ) -> impl Future<Output = Result<Vec<DynamicObject>, KubeError>> {
        let api: Api<DynamicObject> = Api::namespaced_with(self.client.clone(), namespace, kind);
        let lp = list_params(field_selector);
        async move { Ok(api.list(&lp).await?.items) }
    }
}
