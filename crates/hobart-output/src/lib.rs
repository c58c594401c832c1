#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/hobart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod export;
pub mod summary;
pub mod table;

pub use export::{ExportError, ExportFormat, Exporter, MetricObservation, to_observations};
pub use summary::{BankValue, MetricSnapshot, latest_date};
pub use table::{filter_banks, filter_date, metric_series, metrics_frame, select_metrics};

/// Version of the hobart-output crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
