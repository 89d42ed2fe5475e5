//! Human readable rendering of enumeration results.
//!
//! Failed and empty enumerations render identically, as the none marker.

use std::io::{self, Write};

use k8s_openapi::apimachinery::pkg::apis::meta::v1::Time;

use crate::{enumerate::Enumeration, pod::PodView};

pub const NONE_MARKER: &str = "   none";

const POD_HEADER: &str = "\t Name \t|\t CreationTimeStamp \t|\t ContainerImage";
const RUNNING_TITLE: &str = "\t\t\t ---- Running Pods :)  ----";
const NON_RUNNING_TITLE: &str = "\t\t\t ---- NON Running Pods  :(  ----";

/// Print one object name per line, or the none marker.
///
/// Objects without a name are logged and skipped, like unreadable pods.
pub fn render_generic<W: Write>(out: &mut W, enumeration: &Enumeration) -> io::Result<()> {
    let objects = enumeration.objects();
    if objects.is_empty() {
        return writeln!(out, "{NONE_MARKER}");
    }
    for object in objects {
        match object.name() {
            Some(name) => writeln!(out, "{name}")?,
            None => tracing::warn!("skipping object without metadata.name"),
        }
    }
    Ok(())
}

pub fn format_timestamp(time: Option<&Time>) -> String {
    match time {
        Some(time) => time.0.format("%Y-%m-%d %H:%M:%S +0000 UTC").to_string(),
        None => String::from("<unknown>"),
    }
}

/// Print the running and non-running pods as one table, a row per container.
///
/// Rows share a single counter across both groups. Pods that cannot be read
/// are logged and skipped; pods without containers print nothing but still
/// count towards the total. Returns the number of rows printed.
pub fn render_pods<W: Write>(
    out: &mut W,
    namespace: &str,
    running: &Enumeration,
    non_running: &Enumeration,
) -> io::Result<usize> {
    let total = running.len() + non_running.len();
    if total == 0 {
        writeln!(out, "{NONE_MARKER}")?;
        return Ok(0);
    }

    writeln!(out, " In total there are {total} Pods in namespace {namespace}:\n")?;

    let mut row = 0;
    writeln!(out, "{RUNNING_TITLE}")?;
    render_pod_group(out, namespace, running, &mut row)?;
    writeln!(out, "\n{NON_RUNNING_TITLE}")?;
    render_pod_group(out, namespace, non_running, &mut row)?;

    Ok(row)
}

fn render_pod_group<W: Write>(
    out: &mut W,
    namespace: &str,
    group: &Enumeration,
    row: &mut usize,
) -> io::Result<()> {
    if group.is_empty() {
        return writeln!(out, "\t\t\t\t{NONE_MARKER}");
    }
    writeln!(out, "{POD_HEADER}")?;
    for object in group.objects() {
        let pod = match PodView::try_from(object) {
            Ok(pod) => pod,
            Err(error) => {
                tracing::warn!(namespace, error = %error, "skipping unreadable pod");
                continue;
            }
        };
        let created = format_timestamp(pod.created.as_ref());
        for image in &pod.images {
            *row += 1;
            writeln!(out, " [{row}] \t {} \t {created} \t {image}", pod.name)?;
        }
    }
    Ok(())
}
