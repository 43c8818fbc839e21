//! # livecheck-cli
//!
//! Command-line front end for the livecheck selection pipeline.
//!
//! - [`cli`]: clap argument definitions
//! - [`commands`]: the check command
//! - [`engine`]: the plan-rendering `CheckEngine`
//! - [`error`]: CLI errors and exit codes
//! - [`logging`]: tracing subscriber setup
//! - [`output`]: text / JSON rendering

pub mod cli;
pub mod commands;
pub mod engine;
pub mod error;
pub mod logging;
pub mod output;
