use crate::domain::{CandidateSet, CleanupOutcome};

/// Lifecycle of one cleanup session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupState {
    /// Candidates shown, waiting for the operator
    Idle,
    /// Removal batch dispatched, waiting for its result
    Deleting,
    Done(CleanupOutcome),
    Cancelled,
}

impl CleanupState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done(_) | Self::Cancelled)
    }
}

/// Operator input, independent of the front end that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Confirm,
    Cancel,
    /// Ctrl-C
    Interrupt,
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    /// Number of candidate rows that fit on screen
    Resize(usize),
}

/// What the front end must do after a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Dispatch the removal batch; happens at most once per session
    StartRemoval,
    /// Cancel the in-flight removal batch
    AbortRemoval,
    Quit,
}

/// Contiguous visible slice of the candidate list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollWindow {
    offset: usize,
    size: usize,
    total: usize,
}

impl ScrollWindow {
    pub fn new(total: usize, size: usize) -> Self {
        Self {
            offset: 0,
            size: size.max(1),
            total,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn max_offset(&self) -> usize {
        self.total.saturating_sub(self.size)
    }

    /// Moves the window by `delta` rows, clamped to `[0, max_offset]`
    pub fn scroll_by(&mut self, delta: isize) {
        let target = self.offset.saturating_add_signed(delta);
        self.offset = target.min(self.max_offset());
    }

    pub fn resize(&mut self, size: usize) {
        self.size = size.max(1);
        self.offset = self.offset.min(self.max_offset());
    }

    pub fn is_windowed(&self) -> bool {
        self.total > self.size
    }

    /// Index range of the visible rows
    pub fn visible(&self) -> std::ops::Range<usize> {
        self.offset..self.offset.saturating_add(self.size).min(self.total)
    }

    /// `(start-end of total)`, 1-based
    pub fn indicator(&self) -> String {
        let range = self.visible();
        format!("({}-{} of {})", range.start + 1, range.end, self.total)
    }
}

/// Confirmation state machine shared by the line and terminal front ends
#[derive(Debug)]
pub struct CleanupController {
    candidates: CandidateSet,
    state: CleanupState,
    window: ScrollWindow,
}

impl CleanupController {
    pub fn new(candidates: CandidateSet, window_size: usize) -> Self {
        let window = ScrollWindow::new(candidates.len(), window_size);
        Self {
            candidates,
            state: CleanupState::Idle,
            window,
        }
    }

    pub fn candidates(&self) -> &CandidateSet {
        &self.candidates
    }

    pub fn state(&self) -> &CleanupState {
        &self.state
    }

    pub fn window(&self) -> &ScrollWindow {
        &self.window
    }

    pub fn handle_input(&mut self, input: Input) -> Effect {
        match input {
            Input::ScrollUp => self.scroll(-1),
            Input::ScrollDown => self.scroll(1),
            Input::PageUp => self.scroll(-self.page()),
            Input::PageDown => self.scroll(self.page()),
            Input::Resize(rows) => {
                self.window.resize(rows);
                Effect::None
            }
            Input::Confirm => match self.state {
                CleanupState::Idle => {
                    self.state = CleanupState::Deleting;
                    Effect::StartRemoval
                }
                _ => Effect::None,
            },
            Input::Cancel => match self.state {
                CleanupState::Idle => {
                    self.state = CleanupState::Cancelled;
                    Effect::Quit
                }
                _ => Effect::None,
            },
            Input::Interrupt => match self.state {
                CleanupState::Idle => {
                    self.state = CleanupState::Cancelled;
                    Effect::Quit
                }
                CleanupState::Deleting => Effect::AbortRemoval,
                CleanupState::Done(_) | CleanupState::Cancelled => Effect::None,
            },
        }
    }

    /// Delivers the result of the removal batch
    pub fn handle_result(&mut self, outcome: CleanupOutcome) -> Effect {
        if self.state != CleanupState::Deleting {
            return Effect::None;
        }
        self.state = CleanupState::Done(outcome);
        Effect::Quit
    }

    fn scroll(&mut self, delta: isize) -> Effect {
        self.window.scroll_by(delta);
        Effect::None
    }

    fn page(&self) -> isize {
        isize::try_from(self.window.size()).unwrap_or(isize::MAX)
    }
}

/// Shortens `text` to `width` chars, marking the cut with `...`
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let keep = width.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CleanupError, ContainerSummary, RemovalFailure};

    fn set(n: usize) -> CandidateSet {
        CandidateSet::from_classified(
            (0..n)
                .map(|i| ContainerSummary::new(format!("id{i}"), vec!["/zen_turing".into()], "img"))
                .collect(),
        )
    }

    #[test]
    fn test_confirm_starts_removal_once() {
        let mut ctl = CleanupController::new(set(3), 10);

        assert_eq!(ctl.handle_input(Input::Confirm), Effect::StartRemoval);
        assert_eq!(ctl.state(), &CleanupState::Deleting);

        assert_eq!(ctl.handle_input(Input::Confirm), Effect::None);
        assert_eq!(ctl.handle_input(Input::Cancel), Effect::None);
        assert_eq!(ctl.state(), &CleanupState::Deleting);
    }

    #[test]
    fn test_cancel_from_idle() {
        let mut ctl = CleanupController::new(set(3), 10);

        assert_eq!(ctl.handle_input(Input::Cancel), Effect::Quit);
        assert_eq!(ctl.state(), &CleanupState::Cancelled);
        assert!(ctl.state().is_terminal());

        assert_eq!(ctl.handle_input(Input::Confirm), Effect::None);
        assert_eq!(ctl.state(), &CleanupState::Cancelled);
    }

    #[test]
    fn test_interrupt_aborts_in_flight_batch() {
        let mut ctl = CleanupController::new(set(3), 10);
        ctl.handle_input(Input::Confirm);

        assert_eq!(ctl.handle_input(Input::Interrupt), Effect::AbortRemoval);
        assert_eq!(ctl.state(), &CleanupState::Deleting);
    }

    #[test]
    fn test_interrupt_from_idle_cancels() {
        let mut ctl = CleanupController::new(set(3), 10);
        assert_eq!(ctl.handle_input(Input::Interrupt), Effect::Quit);
        assert_eq!(ctl.state(), &CleanupState::Cancelled);
    }

    #[test]
    fn test_result_moves_to_done() {
        let mut ctl = CleanupController::new(set(2), 10);
        ctl.handle_input(Input::Confirm);

        let outcome = CleanupOutcome {
            removed: vec!["zen_turing".into()],
            error: Some(CleanupError::new(vec![RemovalFailure {
                id: "id1".into(),
                name: "zen_turing".into(),
                reason: "busy".into(),
            }])),
        };

        assert_eq!(ctl.handle_result(outcome.clone()), Effect::Quit);
        assert_eq!(ctl.state(), &CleanupState::Done(outcome));

        assert_eq!(ctl.handle_input(Input::Confirm), Effect::None);
        assert_eq!(ctl.handle_input(Input::Interrupt), Effect::None);
        assert!(ctl.state().is_terminal());
    }

    #[test]
    fn test_result_ignored_outside_deleting() {
        let mut ctl = CleanupController::new(set(2), 10);
        assert_eq!(ctl.handle_result(CleanupOutcome::default()), Effect::None);
        assert_eq!(ctl.state(), &CleanupState::Idle);

        ctl.handle_input(Input::Cancel);
        assert_eq!(ctl.handle_result(CleanupOutcome::default()), Effect::None);
        assert_eq!(ctl.state(), &CleanupState::Cancelled);
    }

    #[test]
    fn test_window_clamps_at_end() {
        let mut ctl = CleanupController::new(set(100), 10);

        for _ in 0..500 {
            ctl.handle_input(Input::ScrollDown);
        }
        assert_eq!(ctl.window().offset(), 90);
        assert_eq!(ctl.window().visible(), 90..100);
        assert_eq!(ctl.window().indicator(), "(91-100 of 100)");

        ctl.handle_input(Input::PageDown);
        assert_eq!(ctl.window().offset(), 90);
    }

    #[test]
    fn test_window_clamps_at_start() {
        let mut ctl = CleanupController::new(set(100), 10);
        ctl.handle_input(Input::ScrollUp);
        ctl.handle_input(Input::PageUp);
        assert_eq!(ctl.window().offset(), 0);

        ctl.handle_input(Input::PageDown);
        ctl.handle_input(Input::PageDown);
        ctl.handle_input(Input::ScrollUp);
        assert_eq!(ctl.window().offset(), 19);
    }

    #[test]
    fn test_window_smaller_list_never_scrolls() {
        let mut ctl = CleanupController::new(set(3), 10);
        ctl.handle_input(Input::ScrollDown);
        assert_eq!(ctl.window().offset(), 0);
        assert!(!ctl.window().is_windowed());
        assert_eq!(ctl.window().visible(), 0..3);
    }

    #[test]
    fn test_resize_reclamps_offset() {
        let mut ctl = CleanupController::new(set(100), 10);
        ctl.handle_input(Input::PageDown);
        for _ in 0..100 {
            ctl.handle_input(Input::ScrollDown);
        }
        assert_eq!(ctl.window().offset(), 90);

        ctl.handle_input(Input::Resize(50));
        assert_eq!(ctl.window().offset(), 50);

        ctl.handle_input(Input::Resize(0));
        assert_eq!(ctl.window().size(), 1);
    }

    #[test]
    fn test_scrolling_allowed_while_deleting() {
        let mut ctl = CleanupController::new(set(20), 5);
        ctl.handle_input(Input::Confirm);
        ctl.handle_input(Input::ScrollDown);
        assert_eq!(ctl.window().offset(), 1);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("alpine:latest", 40), "alpine:latest");
        let long = "registry.example.com/team/very-long-image-name:2024.01.01";
        let cut = truncate(long, 40);
        assert_eq!(cut.chars().count(), 40);
        assert!(cut.ends_with("..."));
        assert!(long.starts_with(cut.trim_end_matches("...")));
        assert_eq!(truncate("ééééé", 4), "é...");
    }
}
