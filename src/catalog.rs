/// Identifies a Kubernetes resource type by group, version and plural path segment.
///
/// `group` is empty for the core API (`/api/v1`).
/// `kind` is carried so that [`crate::dynamic::DynamicObject`] can implement
/// [`kube::Resource`]; it does not take part in the request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceKind {
    pub group: &'static str,
    pub version: &'static str,
    pub kind: &'static str,
    pub plural: &'static str,
}

impl ResourceKind {
    pub const fn core(kind: &'static str, plural: &'static str) -> Self {
        Self {
            group: "",
            version: "v1",
            kind,
            plural,
        }
    }

    pub const fn grouped(
        group: &'static str,
        version: &'static str,
        kind: &'static str,
        plural: &'static str,
    ) -> Self {
        Self {
            group,
            version,
            kind,
            plural,
        }
    }

    /// `v1` for the core group, `group/version` otherwise.
    pub fn api_version(&self) -> String {
        if self.group.is_empty() {
            self.version.to_string()
        } else {
            format!("{}/{}", self.group, self.version)
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.group.is_empty() {
            write!(f, "{}/{}", self.version, self.plural)
        } else {
            write!(f, "{}/{}/{}", self.group, self.version, self.plural)
        }
    }
}

pub const PODS: ResourceKind = ResourceKind::core("Pod", "pods");

/// A display name paired with the resource kind it lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: &'static str,
    pub kind: ResourceKind,
}

impl CatalogEntry {
    /// Pods get the per-container rendering and the running/non-running split.
    pub fn is_pods(&self) -> bool {
        self.kind == PODS
    }
}

/// The fixed set of resource kinds reported for a namespace.
///
/// Built once at startup and only read afterwards.
/// Entries are kept in declaration order, which is also the print order.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn builtin() -> Self {
        Self::from_entries(vec![
            CatalogEntry {
                name: "Pods",
                kind: PODS,
            },
            CatalogEntry {
                name: "Services",
                kind: ResourceKind::core("Service", "services"),
            },
            CatalogEntry {
                name: "Deployments",
                kind: ResourceKind::grouped("apps", "v1", "Deployment", "deployments"),
            },
            CatalogEntry {
                name: "DaemonSets",
                kind: ResourceKind::grouped("apps", "v1", "DaemonSet", "daemonsets"),
            },
            CatalogEntry {
                name: "ReplicaSets",
                kind: ResourceKind::grouped("apps", "v1", "ReplicaSet", "replicasets"),
            },
            CatalogEntry {
                name: "StatefulSets",
                kind: ResourceKind::grouped("apps", "v1", "StatefulSet", "statefulsets"),
            },
            CatalogEntry {
                name: "Jobs",
                kind: ResourceKind::grouped("batch", "v1", "Job", "jobs"),
            },
            CatalogEntry {
                name: "CronJobs",
                kind: ResourceKind::grouped("batch", "v1", "CronJob", "cronjobs"),
            },
        ])
    }

    /// Builds a catalog from arbitrary entries. Later duplicates of a display name are dropped.
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Self {
        let mut unique: Vec<CatalogEntry> = Vec::with_capacity(entries.len());
        for entry in entries {
            if !unique.iter().any(|seen| seen.name == entry.name) {
                unique.push(entry);
            }
        }
        Self { entries: unique }
    }

    pub fn lookup(&self, name: &str) -> Option<&ResourceKind> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| &entry.kind)
    }

    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
