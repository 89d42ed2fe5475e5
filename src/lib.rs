#![cfg_attr(not(doctest), doc = include_str!("../README.md"))]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use clap_complete;
pub use k8s_openapi;
pub use kube;

pub mod catalog;
pub mod claputil;
pub use claputil::{context_value_completer, namespace_value_completer};
pub mod client;
pub mod config;
pub mod dynamic;
pub mod enumerate;
pub mod namespace;
pub mod pod;
pub mod present;
pub mod report;

pub use catalog::{Catalog, CatalogEntry, ResourceKind};
pub use client::{ClusterClient, KubeClusterClient};
pub use enumerate::{Enumeration, enumerate};
pub use namespace::select_namespace;
pub use report::{ReportSummary, run_report};
