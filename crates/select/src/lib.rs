#![doc = include_str!("../README.md")]
//!
//! # Module Structure
//!
//! - [`error`]: Watchlist read errors (`WatchlistError`)
//! - [`flags`]: Parsed switches and the mutual-exclusion pass (`SelectionFlags`, `KindFilter`)
//! - [`watchlist`]: Watchlist reader (`read_watchlist`, `parse_watchlist`)
//! - [`resolver`]: Mode precedence and candidate enumeration (`SelectionMode`, `SourceResolver`)
//! - [`autobump`]: Tap-scoped exclusion with a per-run cache (`AutobumpFilter`)
//! - [`sort`]: Deterministic ordering (`sort_candidates`)
//! - [`options`]: Sparse engine options (`build_options`)
//! - [`run`]: The linear pipeline and engine dispatch (`RunContext`, `select`, `run`)

pub mod autobump;
pub mod error;
pub mod flags;
pub mod options;
pub mod resolver;
pub mod run;
pub mod sort;
pub mod watchlist;

// --- Public API Re-exports ---

pub use autobump::{AutobumpFilter, FilterOutcome};
pub use error::WatchlistError;
pub use flags::{KindFilter, SelectionFlags};
pub use options::build_options;
pub use resolver::{SelectionMode, SourceResolver};
pub use run::{RunContext, RunOutcome, Selection, run, select};
pub use sort::sort_candidates;
pub use watchlist::{parse_watchlist, read_watchlist};
