use super::context::SweepContext;
use super::controller::{CleanupController, CleanupState, Effect, Input, truncate};
use crate::domain::{CandidateSet, CleanupOutcome};
use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures_util::StreamExt;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Cell, Paragraph, Row, Table};
use ratatui::{DefaultTerminal, Frame};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Rows taken by everything but candidates: borders (2), header (1),
/// header margin (1), scroll indicator (1) and status line (1)
const CHROME_ROWS: u16 = 6;

/// Candidate rows that fit in a terminal `height` rows tall
pub fn rows_for_height(height: u16) -> usize {
    usize::from(height.saturating_sub(CHROME_ROWS).max(1))
}

/// Maps a key press to controller input
pub fn map_key(key: KeyEvent) -> Option<Input> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Input::Interrupt),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => Some(Input::Confirm),
        KeyCode::Char('n') | KeyCode::Char('q') | KeyCode::Esc => Some(Input::Cancel),
        KeyCode::Up | KeyCode::Char('k') => Some(Input::ScrollUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Input::ScrollDown),
        KeyCode::PageUp => Some(Input::PageUp),
        KeyCode::PageDown => Some(Input::PageDown),
        _ => None,
    }
}

fn map_event(event: &Event) -> Option<Input> {
    match event {
        Event::Key(key) => map_key(*key),
        Event::Resize(_, height) => Some(Input::Resize(rows_for_height(*height))),
        _ => None,
    }
}

/// Restores the terminal on every exit path, panics included
struct TerminalGuard {
    terminal: DefaultTerminal,
}

impl TerminalGuard {
    fn enter() -> Result<Self> {
        let terminal = ratatui::try_init().context("inicializando terminal")?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        ratatui::restore();
    }
}

/// Full-screen session; returns once the controller reaches a terminal state
pub async fn run_interactive(ctx: &SweepContext, candidates: CandidateSet) -> Result<CleanupState> {
    let image_width = ctx.config().image_width();
    let batch_cancel = ctx.cancel_token().child_token();

    let mut guard = TerminalGuard::enter()?;
    let height = guard.terminal.size().context("lendo tamanho do terminal")?.height;
    let mut controller = CleanupController::new(candidates, rows_for_height(height));

    let mut events = EventStream::new();
    let mut batch: Option<JoinHandle<CleanupOutcome>> = None;
    let mut input_closed = false;

    loop {
        guard
            .terminal
            .draw(|frame| draw(frame, &controller, image_width))
            .context("desenhando tela")?;

        if controller.state().is_terminal() {
            break;
        }

        tokio::select! {
            event = events.next(), if !input_closed => {
                let input = match event {
                    Some(event) => {
                        let event = event.context("lendo eventos do terminal")?;
                        let Some(input) = map_event(&event) else {
                            continue;
                        };
                        input
                    }
                    // stdin closed: nobody left to confirm
                    None => {
                        input_closed = true;
                        Input::Interrupt
                    }
                };
                match controller.handle_input(input) {
                    Effect::StartRemoval => {
                        batch = Some(spawn_batch(ctx, &controller, batch_cancel.clone()));
                    }
                    Effect::AbortRemoval => batch_cancel.cancel(),
                    Effect::None | Effect::Quit => {}
                }
            }
            outcome = wait_batch(&mut batch) => {
                batch = None;
                controller.handle_result(outcome.context("tarefa de remoção falhou")?);
            }
        }
    }

    drop(guard);
    Ok(controller.state().clone())
}

/// The single asynchronous unit of work of a session
fn spawn_batch(
    ctx: &SweepContext,
    controller: &CleanupController,
    cancel: CancellationToken,
) -> JoinHandle<CleanupOutcome> {
    let remover = ctx.remover();
    let candidates = controller.candidates().clone();
    tokio::spawn(async move { remover.remove_all(&cancel, &candidates).await })
}

async fn wait_batch(
    batch: &mut Option<JoinHandle<CleanupOutcome>>,
) -> Result<CleanupOutcome, tokio::task::JoinError> {
    match batch {
        Some(handle) => handle.await,
        None => std::future::pending().await,
    }
}

fn color(index: u8) -> Color {
    Color::Indexed(index)
}

fn draw(frame: &mut Frame, controller: &CleanupController, image_width: usize) {
    let [table_area, scroll_area, status_area] = Layout::vertical([
        Constraint::Min(3),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let window = controller.window();
    let rows = window.visible().filter_map(|i| {
        let candidate = controller.candidates().get(i)?;
        let style = if i % 2 == 0 {
            Style::new().fg(color(250))
        } else {
            Style::new().fg(color(244))
        };
        Some(
            Row::new(vec![
                Cell::from((i + 1).to_string()),
                Cell::from(candidate.display_name().to_string()),
                Cell::from(truncate(&candidate.image, image_width)),
            ])
            .style(style),
        )
    });

    let header = Row::new(["#", "Name", "Image"])
        .style(Style::new().fg(color(51)).add_modifier(Modifier::BOLD))
        .bottom_margin(1);

    let widths = [
        Constraint::Length(5),
        Constraint::Fill(1),
        Constraint::Length(u16::try_from(image_width).unwrap_or(u16::MAX)),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(2)
        .block(Block::bordered().border_style(Style::new().fg(color(51))));
    frame.render_widget(table, table_area);

    if window.is_windowed() {
        let info = format!("{} Use ↑↓ para rolar", window.indicator());
        frame.render_widget(
            Paragraph::new(info).style(Style::new().fg(color(243))),
            scroll_area,
        );
    }

    frame.render_widget(Paragraph::new(status_line(controller.state())), status_area);
}

fn status_line(state: &CleanupState) -> Line<'static> {
    match state {
        CleanupState::Idle => Line::styled(
            "Pressione y/Enter para remover, n/q para cancelar.",
            Style::new().fg(color(243)),
        ),
        CleanupState::Deleting => {
            Line::styled("⏳ Removendo containers...", Style::new().fg(color(3)))
        }
        CleanupState::Done(outcome) => match &outcome.error {
            Some(err) => Line::styled(
                format!(
                    "{} container(s) removido(s). Concluído com erros: {err}",
                    outcome.removed.len()
                ),
                Style::new().fg(color(1)),
            ),
            None => Line::styled(
                format!(
                    "✓ {} container(s) removido(s) com sucesso.",
                    outcome.removed.len()
                ),
                Style::new().fg(color(2)),
            ),
        },
        CleanupState::Cancelled => {
            Line::styled("Operação cancelada.", Style::new().fg(color(8)))
        }
    }
}
