use kube::Error as KubeError;

use crate::{catalog::ResourceKind, client::ClusterClient, dynamic::DynamicObject};

/// Field selector for pods in the `Running` phase.
pub const RUNNING_PODS: &str = "status.phase=Running";
/// Complement of [`RUNNING_PODS`]; together they cover every pod exactly once.
pub const NON_RUNNING_PODS: &str = "status.phase!=Running";

/// Outcome of one list call.
///
/// `Empty` and `Failed` print the same way, but stay distinct here.
#[derive(Debug)]
pub enum Enumeration {
    Found(Vec<DynamicObject>),
    Empty,
    Failed(KubeError),
}

impl Enumeration {
    fn from_objects(objects: Vec<DynamicObject>) -> Self {
        if objects.is_empty() {
            Self::Empty
        } else {
            Self::Found(objects)
        }
    }

    pub fn objects(&self) -> &[DynamicObject] {
        match self {
            Self::Found(objects) => objects,
            Self::Empty | Self::Failed(_) => &[],
        }
    }

    pub fn into_objects(self) -> Vec<DynamicObject> {
        match self {
            Self::Found(objects) => objects,
            Self::Empty | Self::Failed(_) => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.objects().len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects().is_empty()
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// List `kind` in `namespace`, with `filter` applied server-side if present.
///
/// Errors are logged and returned as [`Enumeration::Failed`] so that the
/// caller can carry on with the next kind.
pub async fn enumerate<C: ClusterClient>(
    client: &C,
    kind: &ResourceKind,
    namespace: &str,
    filter: Option<&str>,
) -> Enumeration {
    tracing::debug!(%kind, namespace, filter, "listing resources");

    match client.list_objects(kind, namespace, filter).await {
        Ok(objects) => Enumeration::from_objects(objects),
        Err(error) => {
            tracing::warn!(
                group = kind.group,
                version = kind.version,
                resource = kind.plural,
                namespace,
                filter = filter.unwrap_or(""),
                error = %error,
                "failed to list resources"
            );
            Enumeration::Failed(error)
        }
    }
}
