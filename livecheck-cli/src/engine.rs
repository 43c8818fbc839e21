//! Plan-rendering check engine
//!
//! [`PlanEngine`] is the `CheckEngine` the binary ships with. It does not contact
//! upstream sources; it writes the ordered check plan (what would be checked and
//! with which options) as text or JSON.

use std::io::Write;

use serde::Serialize;
use tracing::debug;

use livecheck_core::error::LivecheckError;
use livecheck_core::options::CheckOptions;
use livecheck_core::pipeline::CheckEngine;
use livecheck_core::types::{Candidate, Kind, TapName};

use crate::output::{OutputFormat, OutputWriter, Render};

/// Writes the check plan to `W`.
pub struct PlanEngine<W: Write + Send> {
    out: W,
}

impl<W: Write + Send> PlanEngine<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> CheckEngine for PlanEngine<W> {
    fn name(&self) -> &str {
        "plan"
    }

    fn run_checks(
        &mut self,
        candidates: &[Candidate],
        options: &CheckOptions,
    ) -> Result<(), LivecheckError> {
        let plan = CheckPlan::new(candidates, options);
        let writer = OutputWriter::new(OutputFormat::from_json_flag(options.json));
        debug!(count = plan.candidates.len(), format = ?writer.format(), "rendering check plan");
        writer.render_to(&mut self.out, &plan)?;
        Ok(())
    }
}

/// One planned check.
#[derive(Debug, Serialize)]
pub struct PlanEntry {
    /// Name or token as displayed (fully qualified with `--full-name`).
    pub identifier: String,
    pub kind: Kind,
    pub tap: Option<TapName>,
}

/// Ordered check plan.
#[derive(Debug, Serialize)]
pub struct CheckPlan {
    pub candidates: Vec<PlanEntry>,
    pub options: CheckOptions,
    #[serde(skip)]
    quiet: bool,
}

impl CheckPlan {
    pub fn new(candidates: &[Candidate], options: &CheckOptions) -> Self {
        let full_name = options.full_name == Some(true);
        let candidates = candidates
            .iter()
            .map(|c| PlanEntry {
                identifier: if full_name {
                    c.full_name()
                } else {
                    c.canonical_identifier().to_owned()
                },
                kind: c.kind,
                tap: c.tap.clone(),
            })
            .collect();

        Self {
            candidates,
            options: options.clone(),
            quiet: options.quiet == Some(true),
        }
    }
}

impl Render for CheckPlan {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        if !self.quiet {
            let header = format!("Checking {} formulae and casks", self.candidates.len());
            writeln!(w, "{} {}", "==>".blue().bold(), header.bold())?;
        }

        for entry in &self.candidates {
            let kind = match entry.kind {
                Kind::Formula => "formula".normal(),
                Kind::Cask => "cask".cyan(),
            };
            let tap = entry
                .tap
                .as_ref()
                .map_or_else(|| "-".to_owned(), ToString::to_string);
            writeln!(w, "{:<40} {:<8} {}", entry.identifier, kind, tap.dimmed())?;
        }

        if !self.quiet {
            let entries: Vec<String> = self
                .options
                .entries()
                .into_iter()
                .map(|(key, value)| format!("{key}={value}"))
                .collect();
            writeln!(w, "{} {}", "options:".dimmed(), entries.join(" "))?;
        }

        Ok(())
    }
}
