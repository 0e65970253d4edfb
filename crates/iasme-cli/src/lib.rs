//! IASME Research CLI - end-to-end pipeline runner.
//!
//! Wires configuration, the browser, the fetch layer and the scanner
//! together, then writes the validated records.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod args;
pub mod output;
pub mod pipeline;
pub mod telemetry;

pub use args::{Cli, FormatArg};
pub use output::{apply_rename_map, render_records, write_output};
pub use pipeline::{run, RunSummary};
pub use telemetry::init_tracing;
