//! Fetch layer for the research pipeline.
//!
//! Every page the pipeline reads over plain HTTP goes through [`Fetcher`]:
//! one cookie jar shared by all requests in a run, a per-request timeout,
//! and bounded retries with capped exponential backoff plus jitter.
//!
//! Exhausted retries yield `None`, never an error. Callers must treat a
//! missing page as normal.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod backoff;
pub mod error;
pub mod fetcher;

pub use backoff::{backoff_delay, MAX_BACKOFF_MS, MAX_JITTER_MS};
pub use error::{FetchError, Result};
pub use fetcher::{FetchPolicy, Fetcher, PageSource};
