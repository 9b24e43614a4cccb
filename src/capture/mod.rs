//! Splitting a `top -b` capture into typed snapshots.

mod error;
mod fields;
pub mod model;
pub mod parser;

pub use error::{ParseError, Result};
pub use model::{Metadata, ParseResult, ProcessRecord, Snapshot};
pub use parser::{SnapshotParser, parse};
