// src/picker/state.rs
// =============================================================================
// Everything the picker remembers between key presses, with no terminal in
// sight. view.rs draws it and feeds it keys; tests drive it directly.
//
// Key bindings:
//   typing / backspace   edit the query
//   up/down, c-p/c-n     move the highlight
//   tab, c-space         toggle the highlighted repo and move down
//   c-a / c-r            select / unselect every repo currently shown
//   c-e                  switch between fuzzy and exact matching
//   c-o                  open the highlighted repo on GitHub
//   enter                confirm (the highlighted repo if nothing is toggled)
//   esc, c-c             cancel
// =============================================================================

use super::choice::{dedup_ids, Choice, ChoiceMatcher, MatchMode};
use super::Selection;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What the event loop has to do after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerAction {
    /// Redraw and wait for the next key
    Continue,
    /// Open this repository's page, then keep going
    Open(String),
    Done(Selection),
}

pub struct PickerState {
    choices: Vec<Choice>,
    matcher: ChoiceMatcher,
    query: String,
    // Indices into `choices` that match the query, best first
    visible: Vec<usize>,
    // Position of the highlight inside `visible`
    cursor: usize,
    // One flag per choice, so toggles survive a changed query
    selected: Vec<bool>,
}

impl PickerState {
    pub fn new(choices: Vec<Choice>, mode: MatchMode) -> Self {
        let selected = vec![false; choices.len()];
        let mut state = PickerState {
            choices,
            matcher: ChoiceMatcher::new(mode),
            query: String::new(),
            visible: Vec::new(),
            cursor: 0,
            selected,
        };
        state.refilter();
        state
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn mode(&self) -> MatchMode {
        self.matcher.mode()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn total(&self) -> usize {
        self.choices.len()
    }

    pub fn selected_count(&self) -> usize {
        self.selected.iter().filter(|s| **s).count()
    }

    /// Matching choices in display order, with their toggle state.
    pub fn visible(&self) -> impl Iterator<Item = (&Choice, bool)> {
        self.visible
            .iter()
            .map(|&i| (&self.choices[i], self.selected[i]))
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    /// The highlighted choice, if anything matches.
    pub fn current(&self) -> Option<&Choice> {
        self.visible.get(self.cursor).map(|&i| &self.choices[i])
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> PickerAction {
        // Windows reports releases too
        if key.kind != KeyEventKind::Press {
            return PickerAction::Continue;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return PickerAction::Done(Selection::Cancelled),
            KeyCode::Char('c') if ctrl => return PickerAction::Done(Selection::Cancelled),
            KeyCode::Enter => return PickerAction::Done(Selection::Picked(self.picked())),
            KeyCode::Char('o') if ctrl => {
                if let Some(choice) = self.current() {
                    return PickerAction::Open(choice.repo.id.clone());
                }
            }
            KeyCode::Char('e') if ctrl => {
                self.matcher.toggle_mode();
                self.refilter();
            }
            KeyCode::Char('a') if ctrl => self.set_visible(true),
            KeyCode::Char('r') if ctrl => self.set_visible(false),
            KeyCode::Tab => self.toggle_current(),
            KeyCode::Char(' ') if ctrl => self.toggle_current(),
            KeyCode::Up => self.move_up(),
            KeyCode::Char('p') if ctrl => self.move_up(),
            KeyCode::Down => self.move_down(),
            KeyCode::Char('n') if ctrl => self.move_down(),
            KeyCode::Backspace => {
                if self.query.pop().is_some() {
                    self.refilter();
                }
            }
            KeyCode::Char(ch) if !ctrl => {
                self.query.push(ch);
                self.refilter();
            }
            _ => {}
        }
        PickerAction::Continue
    }

    /// Toggled identifiers in list order, deduplicated. With nothing
    /// toggled, the highlighted repo alone.
    fn picked(&self) -> Vec<String> {
        if self.selected_count() == 0 {
            return self.current().map(|c| vec![c.repo.id.clone()]).unwrap_or_default();
        }
        dedup_ids(
            self.choices
                .iter()
                .zip(&self.selected)
                .filter(|(_, selected)| **selected)
                .map(|(choice, _)| choice),
        )
    }

    fn toggle_current(&mut self) {
        if let Some(&i) = self.visible.get(self.cursor) {
            self.selected[i] = !self.selected[i];
            self.move_down();
        }
    }

    fn set_visible(&mut self, value: bool) {
        for &i in &self.visible {
            self.selected[i] = value;
        }
    }

    fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    fn move_down(&mut self) {
        if self.cursor + 1 < self.visible.len() {
            self.cursor += 1;
        }
    }

    fn refilter(&mut self) {
        let mut scored: Vec<(usize, i64)> = self
            .choices
            .iter()
            .enumerate()
            .filter_map(|(i, choice)| self.matcher.score(&self.query, choice).map(|s| (i, s)))
            .collect();
        // Stable, so equal scores keep list order
        scored.sort_by(|a, b| b.1.cmp(&a.1));

        self.visible = scored.into_iter().map(|(i, _)| i).collect();
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picker::choice::build_choices;
    use crate::picker::choice::tests::lists;

    fn state(mode: MatchMode) -> PickerState {
        PickerState::new(build_choices(&lists()), mode)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    fn type_query(state: &mut PickerState, text: &str) {
        for ch in text.chars() {
            state.handle_key(key(KeyCode::Char(ch)));
        }
    }

    fn labels(state: &PickerState) -> Vec<String> {
        state.visible().map(|(c, _)| c.label()).collect()
    }

    #[test]
    fn test_starts_with_everything_visible() {
        let state = state(MatchMode::Fuzzy);
        assert_eq!(state.visible_len(), 3);
        assert_eq!(state.current().unwrap().label(), "[rust] tokio-rs/tokio");
    }

    #[test]
    fn test_typing_filters_and_backspace_restores() {
        let mut state = state(MatchMode::Fuzzy);
        type_query(&mut state, "tkio");
        assert_eq!(labels(&state), vec!["[rust] tokio-rs/tokio"]);

        for _ in 0..4 {
            state.handle_key(key(KeyCode::Backspace));
        }
        assert_eq!(state.query(), "");
        assert_eq!(state.visible_len(), 3);
    }

    #[test]
    fn test_ctrl_e_switches_mode_mid_session() {
        let mut state = state(MatchMode::Fuzzy);
        type_query(&mut state, "tkio");
        assert_eq!(state.visible_len(), 1);

        assert_eq!(state.handle_key(ctrl('e')), PickerAction::Continue);
        assert_eq!(state.mode(), MatchMode::Exact);
        assert_eq!(state.visible_len(), 0);

        state.handle_key(ctrl('e'));
        assert_eq!(state.mode(), MatchMode::Fuzzy);
        assert_eq!(state.visible_len(), 1);
    }

    #[test]
    fn test_ctrl_o_opens_highlighted_repo() {
        let mut state = state(MatchMode::Fuzzy);
        state.handle_key(key(KeyCode::Down));

        assert_eq!(
            state.handle_key(ctrl('o')),
            PickerAction::Open("BurntSushi/ripgrep".to_string())
        );
        // Opening does not end the session or change the selection
        assert_eq!(state.selected_count(), 0);
        assert_eq!(state.cursor(), 1);
    }

    #[test]
    fn test_ctrl_o_with_no_match_does_nothing() {
        let mut state = state(MatchMode::Exact);
        type_query(&mut state, "zzz");
        assert_eq!(state.handle_key(ctrl('o')), PickerAction::Continue);
    }

    #[test]
    fn test_toggle_then_enter_returns_deduplicated_ids() {
        let mut state = state(MatchMode::Fuzzy);
        state.handle_key(ctrl('a'));
        assert_eq!(state.selected_count(), 3);

        assert_eq!(
            state.handle_key(key(KeyCode::Enter)),
            PickerAction::Done(Selection::Picked(vec![
                "tokio-rs/tokio".to_string(),
                "BurntSushi/ripgrep".to_string(),
            ]))
        );
    }

    #[test]
    fn test_tab_toggles_and_moves_down() {
        let mut state = state(MatchMode::Fuzzy);
        state.handle_key(key(KeyCode::Tab));
        assert_eq!(state.cursor(), 1);
        state.handle_key(key(KeyCode::Up));
        state.handle_key(KeyEvent::new(KeyCode::Char(' '), KeyModifiers::CONTROL));

        assert_eq!(state.selected_count(), 0);
    }

    #[test]
    fn test_select_all_only_touches_visible() {
        let mut state = state(MatchMode::Exact);
        type_query(&mut state, "ripgrep");
        state.handle_key(ctrl('a'));
        assert_eq!(state.selected_count(), 2);

        for _ in 0..7 {
            state.handle_key(key(KeyCode::Backspace));
        }
        type_query(&mut state, "tokio");
        state.handle_key(ctrl('r'));
        assert_eq!(state.selected_count(), 2);

        state.handle_key(ctrl('a'));
        state.handle_key(ctrl('r'));
        assert_eq!(state.selected_count(), 2);
    }

    #[test]
    fn test_enter_without_toggles_takes_highlighted() {
        let mut state = state(MatchMode::Fuzzy);
        state.handle_key(key(KeyCode::Down));
        assert_eq!(
            state.handle_key(key(KeyCode::Enter)),
            PickerAction::Done(Selection::Picked(vec!["BurntSushi/ripgrep".to_string()]))
        );
    }

    #[test]
    fn test_enter_with_no_match_picks_nothing() {
        let mut state = state(MatchMode::Exact);
        type_query(&mut state, "zzz");
        assert_eq!(
            state.handle_key(key(KeyCode::Enter)),
            PickerAction::Done(Selection::Picked(Vec::new()))
        );
    }

    #[test]
    fn test_escape_and_ctrl_c_cancel() {
        let mut state = state(MatchMode::Fuzzy);
        assert_eq!(
            state.handle_key(key(KeyCode::Esc)),
            PickerAction::Done(Selection::Cancelled)
        );
        assert_eq!(
            state.handle_key(ctrl('c')),
            PickerAction::Done(Selection::Cancelled)
        );
    }

    #[test]
    fn test_cursor_stays_in_bounds() {
        let mut state = state(MatchMode::Fuzzy);
        state.handle_key(key(KeyCode::Up));
        assert_eq!(state.cursor(), 0);
        for _ in 0..10 {
            state.handle_key(ctrl('n'));
        }
        assert_eq!(state.cursor(), 2);
    }
}
