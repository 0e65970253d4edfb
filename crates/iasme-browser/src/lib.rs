//! Browser automation capability for the directory collector.
//!
//! Drives a headless Chromium page, exposes the small set of interactions
//! the collector needs through [`BrowserActions`], and captures every JSON
//! network response the page receives.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod actions;
pub mod engine;
#[allow(missing_docs)]
pub mod error;
#[allow(missing_docs)]
pub mod fingerprint;

pub use actions::{is_json_content_type, BrowserActions, CapturedResponse};
pub use engine::BrowserEngine;
pub use error::{BrowserError, Result};
pub use fingerprint::FingerprintConfig;
