//! Default `livecheck` command: select candidates and dispatch the check engine.

use std::path::{Path, PathBuf};

use tracing::info;

use livecheck_core::config::{LivecheckConfig, home_dir};
use livecheck_core::error::LivecheckError;
use livecheck_core::pipeline::CheckEngine;
use livecheck_formulary::FsFormulary;
use livecheck_select::{RunContext, RunOutcome, SelectionFlags};

use crate::cli::Cli;
use crate::engine::PlanEngine;
use crate::error::CliError;

/// Execute a check run.
///
/// Filesystem access is synchronous, so the selection pipeline runs on the
/// blocking pool.
///
/// # Errors
///
/// Usage errors from the selection pipeline are returned as `CliError::Core`.
pub async fn execute(cli: &Cli, config: LivecheckConfig) -> Result<RunOutcome, CliError> {
    let flags = cli.selection_flags();
    let ctx = run_context(&flags, &config, home_dir().as_deref());
    let prefix = config.paths.prefix_dir();
    let repository = config.paths.repository_dir();

    info!(
        prefix = %prefix.display(),
        repository = %repository.display(),
        watchlist = %ctx.watchlist_path.display(),
        "starting livecheck"
    );

    let outcome = tokio::task::spawn_blocking(move || {
        let mut engine = PlanEngine::new(std::io::stdout());
        check_with(&ctx, &flags, prefix, repository, &mut engine)
    })
    .await
    .map_err(|e| CliError::Command(format!("check task failed: {e}")))??;

    if outcome == RunOutcome::AllAutobumped {
        info!("every candidate is autobumped, use --autobump to check them anyway");
    }
    Ok(outcome)
}

/// Validate the flags, open the formulary under `prefix`, and run the pipeline.
///
/// Conflicting flags are reported before `Library/Taps` is read.
pub fn check_with<E: CheckEngine + ?Sized>(
    ctx: &RunContext,
    flags: &SelectionFlags,
    prefix: PathBuf,
    repository: PathBuf,
    engine: &mut E,
) -> Result<RunOutcome, LivecheckError> {
    flags.validate()?;
    let formulary = FsFormulary::open(prefix, repository)?;
    livecheck_select::run(ctx, flags, &formulary, engine)
}

/// Run context from flags and configuration.
///
/// `[livecheck] autobump` (or `HOMEBREW_LIVECHECK_AUTOBUMP`) disables the
/// autobump filter the same way `--autobump` does.
pub fn run_context(
    flags: &SelectionFlags,
    config: &LivecheckConfig,
    home: Option<&Path>,
) -> RunContext {
    RunContext::new(
        config.paths.watchlist_path(home),
        flags.autobump,
        config.livecheck.autobump,
    )
}
