//! Shared option-list state for the picker-style modes.
//!
//! The palette, the content-type filter, and add-to-stack all present the
//! same interaction: a list of labeled options, a typed query narrowing it,
//! and a wrapping selection. [`Chooser`] owns that state once; the payload
//! type parameter carries whatever each mode attaches to an option.
//!
//! Query matching is fuzzy (Skim), with match positions coalesced into
//! highlight ranges for the overlay.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// Option list with fuzzy narrowing and a wrapping selection.
pub struct Chooser<T> {
    entries: Vec<(String, T)>,
    /// Indices into `entries` that pass the current query.
    visible: Vec<usize>,
    query: String,
    selected: usize,
    matcher: SkimMatcherV2,
}

impl<T> Chooser<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            visible: Vec::new(),
            query: String::new(),
            selected: 0,
            matcher: SkimMatcherV2::default(),
        }
    }

    /// Replaces the option list and resets query and selection.
    pub fn seed(&mut self, entries: Vec<(String, T)>) {
        self.entries = entries;
        self.query.clear();
        self.selected = 0;
        self.refilter();
    }

    /// Moves the preselection to the entry whose payload matches, if any.
    pub fn preselect_by(&mut self, pred: impl Fn(&T) -> bool) {
        if let Some(pos) = self
            .visible
            .iter()
            .position(|&i| pred(&self.entries[i].1))
        {
            self.selected = pos;
        }
    }

    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
        self.selected = 0;
        self.refilter();
    }

    pub fn pop_char(&mut self) {
        self.query.pop();
        self.selected = 0;
        self.refilter();
    }

    pub fn move_selection(&mut self, delta: isize) {
        let len = self.visible.len();
        if len == 0 {
            return;
        }
        #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
        {
            self.selected = (self.selected as isize + delta).rem_euclid(len as isize) as usize;
        }
    }

    /// Payload of the selected option.
    #[must_use]
    pub fn selected_payload(&self) -> Option<&T> {
        self.visible
            .get(self.selected)
            .map(|&i| &self.entries[i].1)
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.visible.len()
    }

    /// Visible options as (label, payload, highlight ranges), in list order.
    pub fn visible_options(&self) -> Vec<(&str, &T, Vec<(usize, usize)>)> {
        self.visible
            .iter()
            .map(|&i| {
                let (label, payload) = &self.entries[i];
                (label.as_str(), payload, self.highlight_ranges(label))
            })
            .collect()
    }

    fn refilter(&mut self) {
        if self.query.is_empty() {
            self.visible = (0..self.entries.len()).collect();
            return;
        }
        self.visible = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, (label, _))| self.matcher.fuzzy_match(label, &self.query).is_some())
            .map(|(i, _)| i)
            .collect();
    }

    /// Byte ranges of `label` matched by the query, consecutive indices
    /// coalesced.
    fn highlight_ranges(&self, label: &str) -> Vec<(usize, usize)> {
        if self.query.is_empty() {
            return vec![];
        }
        let Some((_score, indices)) = self.matcher.fuzzy_indices(label, &self.query) else {
            return vec![];
        };

        let mut ranges = Vec::new();
        let mut start = None;
        let mut prev = None;
        for &idx in &indices {
            match (start, prev) {
                (None, _) => {
                    start = Some(idx);
                    prev = Some(idx);
                }
                (Some(_), Some(p)) if idx == p + 1 => {
                    prev = Some(idx);
                }
                (Some(s), Some(p)) => {
                    ranges.push((s, p + 1));
                    start = Some(idx);
                    prev = Some(idx);
                }
                _ => {}
            }
        }
        if let (Some(s), Some(p)) = (start, prev) {
            ranges.push((s, p + 1));
        }
        ranges
    }
}

impl<T> Default for Chooser<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for Chooser<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chooser")
            .field("entries", &self.entries.len())
            .field("visible", &self.visible.len())
            .field("query", &self.query)
            .field("selected", &self.selected)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chooser() -> Chooser<u32> {
        let mut c = Chooser::new();
        c.seed(vec![
            ("Copy".to_string(), 1),
            ("Edit note".to_string(), 2),
            ("Delete".to_string(), 3),
        ]);
        c
    }

    #[test]
    fn query_narrows_and_rehomes() {
        let mut c = chooser();
        c.move_selection(2);
        c.push_char('e');
        c.push_char('d');

        assert_eq!(c.selected_index(), 0);
        let labels: Vec<&str> = c.visible_options().iter().map(|(l, _, _)| *l).collect();
        assert!(labels.contains(&"Edit note"));
        assert!(!labels.contains(&"Copy"));
    }

    #[test]
    fn selection_wraps() {
        let mut c = chooser();
        c.move_selection(-1);
        assert_eq!(c.selected_payload(), Some(&3));
        c.move_selection(1);
        assert_eq!(c.selected_payload(), Some(&1));
    }

    #[test]
    fn highlights_cover_matched_characters() {
        let mut c = chooser();
        c.push_char('c');
        let options = c.visible_options();
        let (label, _, ranges) = &options[0];
        assert_eq!(*label, "Copy");
        assert!(!ranges.is_empty());
        assert_eq!(ranges[0].0, 0);
    }
}
