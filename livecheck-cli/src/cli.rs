//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O. Mutually exclusive flags are
//! not declared to clap; they are checked by the selection pipeline so the error names
//! both flags the same way regardless of entry point.

use std::path::PathBuf;

use clap::Parser;

use livecheck_select::SelectionFlags;

use crate::logging::Verbosity;

/// Check for newer versions of formulae and/or casks from upstream.
///
/// With no named arguments and no `--tap`, `--installed` or `--eval-all`,
/// the watchlist file is checked.
#[derive(Parser, Debug, Default)]
#[command(name = "livecheck", version, about, long_about = None)]
pub struct Cli {
    /// Path to a livecheck.toml configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Print formulae and casks with fully-qualified names.
    #[arg(long)]
    pub full_name: bool,

    /// Check formulae and casks within the given tap, specified as `user/repo`.
    #[arg(long, value_name = "USER/REPO")]
    pub tap: Option<String>,

    /// Evaluate all available formulae and casks.
    #[arg(long)]
    pub eval_all: bool,

    /// Check formulae and casks that are currently installed.
    #[arg(long)]
    pub installed: bool,

    /// Show the latest version only if it's newer than the formula or cask.
    #[arg(long)]
    pub newer_only: bool,

    /// Output information in JSON format.
    #[arg(long)]
    pub json: bool,

    /// Also check resources for formulae.
    #[arg(short = 'r', long)]
    pub resources: bool,

    /// Suppress warnings, don't print a progress bar for JSON output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Only check formulae.
    #[arg(long, visible_alias = "formulae")]
    pub formula: bool,

    /// Only check casks.
    #[arg(long, visible_alias = "casks")]
    pub cask: bool,

    /// Enable checking multiple casks with ExtractPlist strategy.
    #[arg(long)]
    pub extract_plist: bool,

    /// Include packages that are autobumped by BrewTestBot.
    #[arg(long)]
    pub autobump: bool,

    /// Display any debugging information.
    #[arg(short, long)]
    pub debug: bool,

    /// Make some output more verbose.
    #[arg(short, long)]
    pub verbose: bool,

    /// Formula names, cask tokens or `user/repo/name` identifiers.
    #[arg(value_name = "FORMULA|CASK")]
    pub names: Vec<String>,
}

impl Cli {
    /// Selection flags for the pipeline.
    pub fn selection_flags(&self) -> SelectionFlags {
        SelectionFlags {
            tap: self.tap.clone(),
            installed: self.installed,
            eval_all: self.eval_all,
            formula: self.formula,
            cask: self.cask,
            extract_plist: self.extract_plist,
            json: self.json,
            debug: self.debug,
            full_name: self.full_name,
            resources: self.resources,
            newer_only: self.newer_only,
            quiet: self.quiet,
            verbose: self.verbose,
            autobump: self.autobump,
            named: self.names.clone(),
        }
    }

    pub fn verbosity(&self) -> Verbosity {
        Verbosity {
            debug: self.debug,
            verbose: self.verbose,
            quiet: self.quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_tap_mode_with_cask_alias() {
        let cli = Cli::try_parse_from(["livecheck", "--tap", "acme/tools", "--casks"])
            .expect("should parse");
        let flags = cli.selection_flags();
        assert_eq!(flags.tap.as_deref(), Some("acme/tools"));
        assert!(flags.cask);
        assert!(flags.named.is_empty());
    }

    #[test]
    fn parses_positional_names() {
        let cli = Cli::try_parse_from(["livecheck", "wget", "acme/tools/widget", "-q", "-r"])
            .expect("should parse");
        let flags = cli.selection_flags();
        assert_eq!(flags.named, vec!["wget", "acme/tools/widget"]);
        assert!(flags.quiet);
        assert!(flags.resources);
    }

    #[test]
    fn formulae_alias_maps_to_formula() {
        let cli = Cli::try_parse_from(["livecheck", "--formulae", "--installed"])
            .expect("should parse");
        assert!(cli.formula);
        assert!(cli.installed);
    }

    #[test]
    fn conflicting_flags_are_accepted_by_parser() {
        // the selection pipeline reports the conflict
        let cli = Cli::try_parse_from(["livecheck", "--json", "--debug"]).expect("should parse");
        assert!(cli.json && cli.debug);
    }

    #[test]
    fn verbosity_reflects_flags() {
        let cli = Cli::try_parse_from(["livecheck", "-v", "-q"]).expect("should parse");
        let v = cli.verbosity();
        assert!(v.verbose && v.quiet && !v.debug);
    }
}
