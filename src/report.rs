use std::io::Write;

use chrono::Local;

use crate::{
    catalog::{Catalog, CatalogEntry},
    client::ClusterClient,
    enumerate::{Enumeration, NON_RUNNING_PODS, RUNNING_PODS, enumerate},
    present::{render_generic, render_pods},
};

/// What one catalog entry produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSummary {
    pub name: &'static str,
    /// Objects listed; for pods, running plus non-running.
    pub objects: usize,
    /// Container rows printed; only set for pods.
    pub rows: Option<usize>,
    /// At least one list call for this entry failed.
    pub failed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportSummary {
    pub sections: Vec<SectionSummary>,
}

impl ReportSummary {
    pub fn failed(&self) -> impl Iterator<Item = &SectionSummary> {
        self.sections.iter().filter(|section| section.failed)
    }

    pub fn section(&self, name: &str) -> Option<&SectionSummary> {
        self.sections.iter().find(|section| section.name == name)
    }
}

/// Print every catalog entry for `namespace`, one after another.
///
/// List failures are already logged by [`enumerate`] and show up as `none`;
/// only write errors on `out` abort the report.
pub async fn run_report<C, W>(
    client: &C,
    catalog: &Catalog,
    namespace: &str,
    out: &mut W,
) -> anyhow::Result<ReportSummary>
where
    C: ClusterClient,
    W: Write,
{
    writeln!(out, "\n Selected namespace: {namespace}")?;
    writeln!(out, " Current time: {}", Local::now())?;

    let mut summary = ReportSummary::default();
    for entry in catalog.entries() {
        writeln!(out, "\n\n  *** {} *** ", entry.name)?;
        let section = if entry.is_pods() {
            report_pods(client, entry, namespace, out).await?
        } else {
            report_generic(client, entry, namespace, out).await?
        };
        summary.sections.push(section);
    }
    out.flush()?;

    Ok(summary)
}

async fn report_pods<C: ClusterClient, W: Write>(
    client: &C,
    entry: &CatalogEntry,
    namespace: &str,
    out: &mut W,
) -> anyhow::Result<SectionSummary> {
    let running = enumerate(client, &entry.kind, namespace, Some(RUNNING_PODS)).await;
    let non_running = enumerate(client, &entry.kind, namespace, Some(NON_RUNNING_PODS)).await;
    let rows = render_pods(out, namespace, &running, &non_running)?;

    Ok(SectionSummary {
        name: entry.name,
        objects: running.len() + non_running.len(),
        rows: Some(rows),
        failed: running.is_failed() || non_running.is_failed(),
    })
}

async fn report_generic<C: ClusterClient, W: Write>(
    client: &C,
    entry: &CatalogEntry,
    namespace: &str,
    out: &mut W,
) -> anyhow::Result<SectionSummary> {
    let enumeration: Enumeration = enumerate(client, &entry.kind, namespace, None).await;
    render_generic(out, &enumeration)?;

    Ok(SectionSummary {
        name: entry.name,
        objects: enumeration.len(),
        rows: None,
        failed: enumeration.is_failed(),
    })
}

#[cfg(test)]
mod tests {
    use super::run_report;
    use crate::{
        catalog::{Catalog, CatalogEntry, PODS, ResourceKind},
        enumerate::tests::{FakeCluster, object, pod},
        present::NONE_MARKER,
    };

    const DEPLOYMENTS: ResourceKind =
        ResourceKind::grouped("apps", "v1", "Deployment", "deployments");

    async fn report(cluster: &FakeCluster, catalog: &Catalog) -> (String, super::ReportSummary) {
        let mut out = Vec::new();
        let summary = run_report(cluster, catalog, "demo", &mut out)
            .await
            .expect("report");
        (String::from_utf8(out).expect("utf8"), summary)
    }

    fn section<'a>(text: &'a str, name: &str) -> &'a str {
        let marker = format!("*** {name} *** \n");
        let start = text.find(&marker).expect("section header") + marker.len();
        let rest = &text[start..];
        let end = rest.find("\n\n  *** ").unwrap_or(rest.len());
        rest[..end].trim_end()
    }

    #[tokio::test]
    async fn single_running_pod_with_two_containers() {
        let catalog = Catalog::from_entries(vec![CatalogEntry {
            name: "Pods",
            kind: PODS,
        }]);
        let mut cluster = FakeCluster::default();
        cluster.insert(
            &PODS,
            "demo",
            vec![pod("web-0", "Running", &["nginx:1", "sidecar:1"])],
        );

        let (text, summary) = report(&cluster, &catalog).await;
        let pods = section(&text, "Pods");

        assert!(pods.contains("In total there are 1 Pods in namespace demo:"));
        assert!(pods.contains("ContainerImage"));
        assert!(pods.contains(" [1] \t web-0 \t"));
        assert!(pods.contains("nginx:1\n"));
        assert!(pods.contains(" [2] \t web-0 \t"));
        assert!(pods.contains("sidecar:1\n"));

        let pods = summary.section("Pods").expect("pods summary");
        assert_eq!(pods.objects, 1);
        assert_eq!(pods.rows, Some(2));
        assert!(!pods.failed);
    }

    #[tokio::test]
    async fn no_deployments_prints_none() {
        let mut cluster = FakeCluster::default();
        cluster.insert(
            &ResourceKind::core("Service", "services"),
            "demo",
            vec![object("frontend")],
        );

        let (text, summary) = report(&cluster, &Catalog::builtin()).await;

        assert_eq!(section(&text, "Deployments"), NONE_MARKER);
        assert_eq!(section(&text, "Services"), "frontend");
        assert!(text.contains(" Selected namespace: demo\n"));
        assert_eq!(summary.sections.len(), 8);
        assert_eq!(summary.failed().count(), 0);
    }

    #[tokio::test]
    async fn failed_kind_renders_none_but_is_recorded() {
        let mut cluster = FakeCluster {
            failing: vec!["deployments"],
            ..Default::default()
        };
        cluster.insert(&DEPLOYMENTS, "demo", vec![object("api")]);
        cluster.insert(
            &ResourceKind::grouped("batch", "v1", "Job", "jobs"),
            "demo",
            vec![object("migrate")],
        );

        let (text, summary) = report(&cluster, &Catalog::builtin()).await;

        assert_eq!(section(&text, "Deployments"), NONE_MARKER);
        assert_eq!(section(&text, "Jobs"), "migrate");

        let failed: Vec<_> = summary.failed().map(|section| section.name).collect();
        assert_eq!(failed, vec!["Deployments"]);
        let statefulsets = summary.section("StatefulSets").expect("statefulsets");
        assert!(!statefulsets.failed);
        assert_eq!(statefulsets.objects, 0);
    }

    #[tokio::test]
    async fn kinds_are_listed_in_catalog_order() {
        let cluster = FakeCluster::default();
        let (_, summary) = report(&cluster, &Catalog::builtin()).await;

        let calls = cluster.calls.borrow();
        let resources: Vec<_> = calls.iter().map(|(plural, _)| plural.as_str()).collect();
        assert_eq!(
            resources,
            vec![
                "pods",
                "pods",
                "services",
                "deployments",
                "daemonsets",
                "replicasets",
                "statefulsets",
                "jobs",
                "cronjobs"
            ]
        );
        assert_eq!(summary.section("Pods").and_then(|s| s.rows), Some(0));
    }
}
