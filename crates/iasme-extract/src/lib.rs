//! Extraction engine and role scorer.
//!
//! Everything here is a pure function over page text. Malformed markup or a
//! page with no matches yields empty results, never an error.
//!
//! # Example
//!
//! ```rust
//! use iasme_extract::{extract_candidates, select_best, Role};
//!
//! let candidates = extract_candidates("John Smith - Chief Technology Officer\n");
//! let best = select_best(&candidates, Role::It).expect("one candidate scores");
//! assert_eq!(best.name, "John Smith");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_panics_doc)]

pub mod candidates;
pub mod patterns;
pub mod roles;
pub mod signals;

pub use candidates::{extract_candidates, extract_candidates_from_html, strip_markup, Candidate};
pub use patterns::{SignalKind, SignalPattern};
pub use roles::{score_title, select_best, Role};
pub use signals::{extract_signals, Signals};
