#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/hobart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod capital;
pub mod catalog;
pub mod engine;
pub mod growth;
pub mod mapping;

pub use catalog::{MetricFormat, MetricInfo, all_metrics, get_metric_info};
pub use engine::{MetricRow, derive_metrics};

/// Version of the hobart-metrics crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
