//! Turn captured `top -b` output into aligned time series and an HTML report.
//!
//! ```no_run
//! let raw = std::fs::read("capture.txt").unwrap();
//! let parsed = ttop::capture::parse(&raw).unwrap();
//! let series = ttop::series::align(&parsed);
//! let html = ttop::report::render(&series, &ttop::report::ReportOptions::default()).unwrap();
//! ```

pub mod capture;
pub mod config;
pub mod format;
pub mod logging;
pub mod report;
pub mod series;
