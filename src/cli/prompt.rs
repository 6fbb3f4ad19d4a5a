use super::context::SweepContext;
use super::controller::{CleanupController, CleanupState, Effect, Input, truncate};
use crate::domain::{CandidateSet, CleanupOutcome};
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::warn;

/// Writes the candidate list, one name/image pair per container
pub fn render_candidates<W: Write>(
    out: &mut W,
    candidates: &CandidateSet,
    image_width: usize,
) -> Result<()> {
    writeln!(
        out,
        "Encontrados {} container(s) com nome automático:",
        candidates.len()
    )?;
    for (i, candidate) in candidates.iter().enumerate() {
        writeln!(out)?;
        writeln!(out, "  {:>3}. Name : {}", i + 1, candidate.display_name())?;
        writeln!(
            out,
            "       Image: {}",
            truncate(&candidate.image, image_width)
        )?;
    }
    Ok(())
}

/// Writes the final line(s) for a terminal state
pub fn render_outcome<W: Write>(out: &mut W, state: &CleanupState) -> Result<()> {
    match state {
        CleanupState::Done(outcome) => render_done(out, outcome),
        CleanupState::Cancelled => {
            writeln!(out, "Operação cancelada.")?;
            Ok(())
        }
        CleanupState::Idle | CleanupState::Deleting => Ok(()),
    }
}

fn render_done<W: Write>(out: &mut W, outcome: &CleanupOutcome) -> Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "✅ {} container(s) com nome automático removido(s)",
        outcome.removed.len()
    )?;
    for name in &outcome.removed {
        writeln!(out, "  - {name}")?;
    }

    if let Some(err) = &outcome.error {
        writeln!(out)?;
        writeln!(out, "⚠️  Limpeza concluída com erros:")?;
        for failure in err.failures() {
            writeln!(out, "  - {failure}")?;
        }
    }
    Ok(())
}

/// `yes`/`y` in any case confirm; everything else, EOF included, cancels
pub fn parse_answer(line: &str) -> Input {
    match line.trim().to_lowercase().as_str() {
        "yes" | "y" => Input::Confirm,
        _ => Input::Cancel,
    }
}

/// Line-oriented session: list, ask, remove, report
pub async fn run_line<R: BufRead, W: Write>(
    ctx: &SweepContext,
    candidates: CandidateSet,
    mut input: R,
    out: &mut W,
) -> Result<CleanupState> {
    let image_width = ctx.config().image_width();
    let mut controller = CleanupController::new(candidates, usize::MAX);

    render_candidates(out, controller.candidates(), image_width)?;
    write!(out, "\nDeseja remover esses containers? (yes/no): ")?;
    out.flush()?;

    let mut answer = Vec::new();
    input
        .read_until(b'\n', &mut answer)
        .context("falha ao ler resposta")?;

    let answer = String::from_utf8_lossy(&answer);
    if controller.handle_input(parse_answer(&answer)) == Effect::StartRemoval {
        let watcher = watch_interrupt(ctx.cancel_token().clone());
        let outcome = ctx
            .remover()
            .remove_all(ctx.cancel_token(), controller.candidates())
            .await;
        watcher.abort();
        controller.handle_result(outcome);
    }

    render_outcome(out, controller.state())?;
    Ok(controller.state().clone())
}

/// Cancels `token` on Ctrl-C while a batch is running
fn watch_interrupt(token: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrompido, abortando remoções pendentes");
            token.cancel();
        }
    })
}
