use std::io::{BufRead, Write};

use anyhow::Context;

use crate::client::ClusterClient;

/// Why a line typed at the namespace prompt was rejected.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("{input:?} is not a namespace id")]
    NotANumber { input: String },
    #[error("id {index} is out of range, pick one between 0 and {max}")]
    OutOfRange { index: usize, max: usize },
}

/// Validate one line of operator input against a list of `count` namespaces.
pub fn parse_selection(line: &str, count: usize) -> Result<usize, SelectionError> {
    let input = line.trim();
    let index: usize = input.parse().map_err(|_| SelectionError::NotANumber {
        input: input.to_string(),
    })?;
    if index >= count {
        return Err(SelectionError::OutOfRange {
            index,
            max: count.saturating_sub(1),
        });
    }
    Ok(index)
}

/// Resolve the namespace to report on.
///
/// Lists every namespace with a zero-based id. A `requested` name that exists is
/// taken as-is; otherwise the operator is prompted on `input` until a valid id
/// is entered.
///
/// # Errors
/// Fails when the namespaces cannot be listed, the cluster has none, or `input`
/// ends before a valid id was read.
pub async fn select_namespace<C, R, W>(
    client: &C,
    requested: Option<&str>,
    mut input: R,
    mut output: W,
) -> anyhow::Result<String>
where
    C: ClusterClient,
    R: BufRead,
    W: Write,
{
    let namespaces: Vec<String> = client
        .list_namespaces()
        .await
        .context("Failed to get namespaces")?
        .into_iter()
        .filter_map(|namespace| namespace.metadata.name)
        .collect();

    writeln!(output, "\nAvailable Namespaces =>")?;
    for (i, name) in namespaces.iter().enumerate() {
        writeln!(output, "[{i}] {name}")?;
    }

    if let Some(requested) = requested {
        if namespaces.iter().any(|name| name == requested) {
            return Ok(requested.to_string());
        }
        tracing::warn!(namespace = requested, "requested namespace does not exist");
    }

    if namespaces.is_empty() {
        anyhow::bail!("no namespaces available to select from");
    }

    writeln!(output, "\n-> Please select an id from the namespaces above.")?;
    output.flush()?;

    let mut line = String::new();
    loop {
        line.clear();
        if input
            .read_line(&mut line)
            .context("Failed to read namespace id")?
            == 0
        {
            anyhow::bail!("no namespace selected");
        }

        match parse_selection(&line, namespaces.len()) {
            Ok(index) => return Ok(namespaces[index].clone()),
            Err(error) => {
                writeln!(output, "{error}. Please try again.")?;
                output.flush()?;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::{SelectionError, parse_selection, select_namespace};
    use crate::enumerate::tests::FakeCluster;

    #[test]
    fn parses_index_within_bounds() {
        assert_eq!(parse_selection("1\n", 3), Ok(1));
        assert_eq!(parse_selection(" 0 ", 1), Ok(0));
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(
            parse_selection("kube-system", 3),
            Err(SelectionError::NotANumber {
                input: "kube-system".to_string()
            })
        );
        assert_eq!(
            parse_selection("-1", 3),
            Err(SelectionError::NotANumber {
                input: "-1".to_string()
            })
        );
        assert_eq!(
            parse_selection("3", 3),
            Err(SelectionError::OutOfRange { index: 3, max: 2 })
        );
    }

    #[tokio::test]
    async fn existing_namespace_skips_prompt() {
        let cluster = FakeCluster::with_namespaces(&["default", "demo"]);
        let mut output = Vec::new();

        let selected = select_namespace(&cluster, Some("demo"), Cursor::new(""), &mut output)
            .await
            .expect("namespace");

        assert_eq!(selected, "demo");
        let output = String::from_utf8(output).expect("utf8");
        assert!(output.contains("[0] default\n[1] demo\n"));
        assert!(!output.contains("Please select"));
    }

    #[tokio::test]
    async fn unknown_namespace_falls_through_to_prompt() {
        let cluster = FakeCluster::with_namespaces(&["default", "demo"]);
        let mut output = Vec::new();

        let selected = select_namespace(&cluster, Some("missing"), Cursor::new("1\n"), &mut output)
            .await
            .expect("namespace");

        assert_eq!(selected, "demo");
        let output = String::from_utf8(output).expect("utf8");
        assert!(output.contains("-> Please select an id from the namespaces above."));
    }

    #[tokio::test]
    async fn reprompts_until_valid_id() {
        let cluster = FakeCluster::with_namespaces(&["default", "demo"]);
        let mut output = Vec::new();

        let selected = select_namespace(&cluster, None, Cursor::new("abc\n7\n0\n"), &mut output)
            .await
            .expect("namespace");

        assert_eq!(selected, "default");
        let output = String::from_utf8(output).expect("utf8");
        assert_eq!(output.matches("Please try again.").count(), 2);
    }

    #[tokio::test]
    async fn end_of_input_is_an_error() {
        let cluster = FakeCluster::with_namespaces(&["default"]);
        let err = select_namespace(&cluster, None, Cursor::new("x\n"), Vec::new())
            .await
            .expect_err("no valid id");
        assert_eq!(err.to_string(), "no namespace selected");
    }

    #[tokio::test]
    async fn namespace_list_failure_is_fatal() {
        let cluster = FakeCluster {
            fail_namespaces: true,
            ..Default::default()
        };
        let err = select_namespace(&cluster, Some("demo"), Cursor::new(""), Vec::new())
            .await
            .expect_err("listing fails");
        assert_eq!(err.to_string(), "Failed to get namespaces");
    }

    #[tokio::test]
    async fn empty_cluster_cannot_select() {
        let cluster = FakeCluster::default();
        assert!(
            select_namespace(&cluster, None, Cursor::new("0\n"), Vec::new())
                .await
                .is_err()
        );
    }
}
