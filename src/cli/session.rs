use super::context::SweepContext;
use super::controller::CleanupState;
use super::{prompt, tui};
use crate::domain::CandidateSet;
use crate::infra::DisplayMode;
use anyhow::{Context, Result};
use std::io::{self, IsTerminal, Write};
use tracing::info;

/// How a session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEnd {
    NoCandidates,
    Listed(CandidateSet),
    Finished(CleanupState),
}

/// Resolves `Auto` against the attached streams
pub fn resolve_mode(mode: DisplayMode) -> DisplayMode {
    match mode {
        DisplayMode::Auto if io::stdin().is_terminal() && io::stdout().is_terminal() => {
            DisplayMode::Interactive
        }
        DisplayMode::Auto => DisplayMode::Line,
        other => other,
    }
}

/// Finds candidates and, unless there are none or this is a dry run, lets
/// the operator confirm their removal through the chosen front end.
pub async fn run_session<R: io::BufRead, W: Write>(
    ctx: &SweepContext,
    mode: DisplayMode,
    dry_run: bool,
    input: R,
    out: &mut W,
) -> Result<SessionEnd> {
    let candidates = ctx
        .discovery()
        .find_candidates(ctx.cancel_token())
        .await
        .context("falha ao buscar containers com nome automático")?;

    if candidates.is_empty() {
        writeln!(out, "Nenhum container com nome automático encontrado.")?;
        return Ok(SessionEnd::NoCandidates);
    }

    if dry_run {
        prompt::render_candidates(out, &candidates, ctx.config().image_width())?;
        info!("Modo dry-run: nenhum container foi removido");
        return Ok(SessionEnd::Listed(candidates));
    }

    let state = match resolve_mode(mode) {
        DisplayMode::Interactive => {
            let state = tui::run_interactive(ctx, candidates).await?;
            prompt::render_outcome(out, &state)?;
            state
        }
        DisplayMode::Line | DisplayMode::Auto => {
            prompt::run_line(ctx, candidates, input, out).await?
        }
    };

    Ok(SessionEnd::Finished(state))
}
