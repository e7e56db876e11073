use serde::Serialize;

use crate::report::{CoverageReport, Suggestion, UncoveredBin};

use super::{
    filter::filter,
    priority::{Priority, classify},
};

/// User interaction state. Owned by the UI loop and changed only through
/// `set_search_query` and `toggle_expanded`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    search_query: String,
    expanded_suggestion_index: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuggestionView<'a> {
    pub index: usize,
    pub suggestion: &'a Suggestion,
    pub priority: Priority,
    pub expanded: bool,
}

/// What the presenter shows for one report and one `ViewState`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedView<'a> {
    pub report: &'a CoverageReport,
    pub search_query: &'a str,
    pub visible_bins: Vec<&'a UncoveredBin>,
    pub suggestions: Vec<SuggestionView<'a>>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn expanded_suggestion_index(&self) -> Option<usize> {
        self.expanded_suggestion_index
    }

    pub fn set_search_query(&mut self, query: &str) {
        self.search_query = query.to_string();
    }

    /// Expands suggestion `index`, or collapses it if it is already the
    /// expanded one. At most one suggestion is expanded.
    pub fn toggle_expanded(&mut self, index: usize) {
        self.expanded_suggestion_index = match self.expanded_suggestion_index {
            Some(current) if current == index => None,
            _ => Some(index),
        };
    }

    /// Recomputed on every change. An index past the end of `report`'s
    /// suggestions leaves everything collapsed.
    pub fn derive<'a>(&'a self, report: &'a CoverageReport) -> DerivedView<'a> {
        let suggestions = report
            .suggestions
            .iter()
            .enumerate()
            .map(|(index, suggestion)| SuggestionView {
                index,
                suggestion,
                priority: classify(&suggestion.priority),
                expanded: self.expanded_suggestion_index == Some(index),
            })
            .collect();

        DerivedView {
            report,
            search_query: &self.search_query,
            visible_bins: filter(&report.uncovered_bins, &self.search_query),
            suggestions,
        }
    }
}

impl DerivedView<'_> {
    pub fn expanded(&self) -> Option<&SuggestionView<'_>> {
        self.suggestions.iter().find(|view| view.expanded)
    }

    pub fn is_filtered(&self) -> bool {
        !self.search_query.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report_with(targets: &[&str]) -> CoverageReport {
        CoverageReport {
            uncovered_bins: vec![
                UncoveredBin::new("cg_alu", "cp_op", "div"),
                UncoveredBin::new("cg_fifo", "cp_level", "full"),
            ],
            suggestions: targets
                .iter()
                .map(|target| Suggestion {
                    target_bin: target.to_string(),
                    priority: "medium".to_string(),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn starts_empty() {
        let state = ViewState::new();
        assert_eq!(state.search_query(), "");
        assert_eq!(state.expanded_suggestion_index(), None);
    }

    #[test]
    fn toggle_twice_collapses() {
        let mut state = ViewState::new();
        state.toggle_expanded(2);
        assert_eq!(state.expanded_suggestion_index(), Some(2));
        state.toggle_expanded(2);
        assert_eq!(state.expanded_suggestion_index(), None);
    }

    #[test]
    fn toggle_other_moves_expansion() {
        let mut state = ViewState::new();
        state.toggle_expanded(0);
        state.toggle_expanded(1);
        assert_eq!(state.expanded_suggestion_index(), Some(1));

        let report = report_with(&["a", "b", "c"]);
        let view = state.derive(&report);
        let expanded: Vec<usize> = view
            .suggestions
            .iter()
            .filter(|s| s.expanded)
            .map(|s| s.index)
            .collect();
        assert_eq!(expanded, vec![1]);
    }

    #[test]
    fn search_does_not_touch_expansion() {
        let mut state = ViewState::new();
        state.toggle_expanded(1);
        state.set_search_query("fifo");
        assert_eq!(state.expanded_suggestion_index(), Some(1));
        assert_eq!(state.search_query(), "fifo");
    }

    #[test]
    fn derive_filters_bins_but_not_suggestions() {
        let mut state = ViewState::new();
        state.set_search_query("FIFO");
        let report = report_with(&["a", "b"]);

        let view = state.derive(&report);

        assert_eq!(view.visible_bins, vec![&report.uncovered_bins[1]]);
        assert_eq!(view.suggestions.len(), 2);
        assert!(view.is_filtered());
        assert_eq!(view.suggestions[0].priority, Priority::Medium);
    }

    #[test]
    fn replaced_report_with_fewer_suggestions_collapses() {
        let mut state = ViewState::new();
        let first = report_with(&["a", "b", "c"]);
        state.toggle_expanded(2);
        assert_eq!(
            state.derive(&first).expanded().map(|s| s.suggestion.target_bin.as_str()),
            Some("c")
        );

        let second = report_with(&["a"]);
        let view = state.derive(&second);

        assert!(view.expanded().is_none());
        assert!(view.suggestions.iter().all(|s| !s.expanded));
    }
}
