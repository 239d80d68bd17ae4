//! UI-side state: the song-list cursor, the filter and the add-path prompt.
//!
//! The playlist itself belongs to `Player`; every method that needs it takes
//! the track slice, so the list is never mutated from here.

use std::path::PathBuf;

use crate::library::Track;

/// What keyboard input is currently typed into.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Normal,
    Filter,
    AddPath,
}

#[derive(Debug, Default)]
pub struct App {
    /// Playlist index under the cursor.
    pub selected: usize,
    pub input_mode: InputMode,
    pub filter_query: String,
    pub add_input: String,
    pub should_quit: bool,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    /// Case-insensitive substring match of `query` against `title`.
    pub fn title_matches(title: &str, query: &str) -> bool {
        query.is_empty() || title.to_lowercase().contains(&query.to_lowercase())
    }

    /// Char range of the first match of `query` in `title`, for highlighting.
    pub fn match_span(title: &str, query: &str) -> Option<(usize, usize)> {
        if query.is_empty() {
            return None;
        }
        let title_lower: Vec<char> = title.chars().flat_map(char::to_lowercase).collect();
        let query_lower: Vec<char> = query.chars().flat_map(char::to_lowercase).collect();
        // Lowercasing can change the char count; only highlight when it didn't.
        if title_lower.len() != title.chars().count() {
            return None;
        }
        title_lower
            .windows(query_lower.len())
            .position(|w| w == query_lower.as_slice())
            .map(|start| (start, start + query_lower.len()))
    }

    /// Playlist indices visible under the current filter, in playlist order.
    pub fn display_indices(&self, tracks: &[Track]) -> Vec<usize> {
        let query = self.filter_query.trim();
        tracks
            .iter()
            .enumerate()
            .filter(|(_, t)| Self::title_matches(&t.display_name, query))
            .map(|(i, _)| i)
            .collect()
    }

    /// Next visible index after `current`, wrapping to the first.
    pub fn next_in_view_from(&self, tracks: &[Track], current: usize) -> Option<usize> {
        let display = self.display_indices(tracks);
        if display.is_empty() {
            return None;
        }

        let pos = display.iter().position(|&i| i == current);
        match pos {
            Some(p) => Some(display[(p + 1) % display.len()]),
            None => Some(display[0]),
        }
    }

    /// Previous visible index before `current`, wrapping to the last.
    pub fn prev_in_view_from(&self, tracks: &[Track], current: usize) -> Option<usize> {
        let display = self.display_indices(tracks);
        if display.is_empty() {
            return None;
        }

        let pos = display.iter().position(|&i| i == current);
        match pos {
            Some(0) => Some(display[display.len() - 1]),
            Some(p) => Some(display[p - 1]),
            None => Some(display[display.len() - 1]),
        }
    }

    pub fn next(&mut self, tracks: &[Track]) {
        if let Some(next) = self.next_in_view_from(tracks, self.selected) {
            self.selected = next;
        }
    }

    pub fn prev(&mut self, tracks: &[Track]) {
        if let Some(prev) = self.prev_in_view_from(tracks, self.selected) {
            self.selected = prev;
        }
    }

    /// Move the cursor to `idx` and keep it inside the visible set.
    pub fn set_selected(&mut self, tracks: &[Track], idx: usize) {
        self.selected = idx;
        self.ensure_selected_visible(tracks);
    }

    pub fn enter_filter_mode(&mut self, tracks: &[Track]) {
        self.input_mode = InputMode::Filter;
        self.ensure_selected_visible(tracks);
    }

    /// Leave filter typing but keep the query applied.
    pub fn exit_filter_mode(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn clear_filter(&mut self, tracks: &[Track]) {
        self.filter_query.clear();
        self.input_mode = InputMode::Normal;
        self.ensure_selected_visible(tracks);
    }

    pub fn push_filter_char(&mut self, tracks: &[Track], c: char) {
        self.filter_query.push(c);
        self.ensure_selected_visible(tracks);
    }

    pub fn pop_filter_char(&mut self, tracks: &[Track]) {
        self.filter_query.pop();
        self.ensure_selected_visible(tracks);
    }

    pub fn enter_add_mode(&mut self) {
        self.input_mode = InputMode::AddPath;
        self.add_input.clear();
    }

    pub fn cancel_add(&mut self) {
        self.input_mode = InputMode::Normal;
        self.add_input.clear();
    }

    /// Finish the add-path prompt. Whitespace-only input yields nothing.
    pub fn submit_add(&mut self) -> Option<PathBuf> {
        self.input_mode = InputMode::Normal;
        let input = std::mem::take(&mut self.add_input);
        let trimmed = input.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(PathBuf::from(trimmed))
        }
    }

    /// Keep `selected` inside the visible set, falling back to its first entry.
    pub fn ensure_selected_visible(&mut self, tracks: &[Track]) {
        let display = self.display_indices(tracks);
        if display.is_empty() {
            self.selected = 0;
            return;
        }

        if !display.contains(&self.selected) {
            self.selected = display[0];
        }
    }
}
