use std::time::Instant;

use crate::matcher::match_keywords;
use crate::view_model::{AppViewModel, MatchRowView};
use crate::{
    CheckError, CheckId, DebounceDelays, DebounceTimer, Effect, KeywordList, MatchResult,
    TriggerSource,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Checking {
        check_id: CheckId,
    },
    ShowingResults,
    ShowingError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    keywords: KeywordList,
    keyword_input: String,
    auto_check: bool,
    results: Vec<MatchResult>,
    error: Option<CheckError>,
    phase: Phase,
    last_check_id: CheckId,
    timer: DebounceTimer,
    delays: DebounceDelays,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_delays(DebounceDelays::default())
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delays(delays: DebounceDelays) -> Self {
        Self {
            keywords: KeywordList::new(),
            keyword_input: String::new(),
            auto_check: true,
            results: Vec::new(),
            error: None,
            phase: Phase::Idle,
            last_check_id: 0,
            timer: DebounceTimer::new(),
            delays,
            dirty: false,
        }
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            phase: self.phase,
            keywords: self.keywords.to_vec(),
            keyword_input: self.keyword_input.clone(),
            auto_check: self.auto_check,
            check_enabled: !self.keywords.is_empty(),
            results: self
                .results
                .iter()
                .map(|r| MatchRowView {
                    keyword: r.keyword.clone(),
                    found: r.found,
                })
                .collect(),
            error: self.error.as_ref().map(ToString::to_string),
            dirty: self.dirty,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn keywords(&self) -> &KeywordList {
        &self.keywords
    }

    pub fn auto_check(&self) -> bool {
        self.auto_check
    }

    pub fn results(&self) -> &[MatchResult] {
        &self.results
    }

    pub fn error(&self) -> Option<&CheckError> {
        self.error.as_ref()
    }

    /// When the pending debounced check is due, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    /// Returns whether the view changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn restore_keywords(&mut self, entries: Vec<String>) {
        self.keywords = KeywordList::from_entries(entries);
        self.mark_dirty();
    }

    pub(crate) fn set_keyword_input(&mut self, text: String) {
        if self.keyword_input != text {
            self.keyword_input = text;
            self.mark_dirty();
        }
    }

    /// Adds the pending input as a keyword and clears the input.
    /// Returns whether the keyword list changed.
    pub(crate) fn commit_keyword_input(&mut self) -> bool {
        let input = std::mem::take(&mut self.keyword_input);
        if !input.is_empty() {
            self.mark_dirty();
        }
        let changed = self.keywords.add(&input);
        if changed {
            self.mark_dirty();
        }
        changed
    }

    pub(crate) fn remove_keyword(&mut self, keyword: &str) -> bool {
        let changed = self.keywords.remove(keyword);
        if changed {
            self.mark_dirty();
        }
        changed
    }

    pub(crate) fn set_auto_check(&mut self, enabled: bool) -> bool {
        if self.auto_check == enabled {
            return false;
        }
        self.auto_check = enabled;
        if !enabled {
            self.timer.cancel();
        }
        self.mark_dirty();
        true
    }

    pub(crate) fn schedule(&mut self, at: Instant, source: TriggerSource) {
        self.timer.arm(at, self.delays.for_source(source), source);
    }

    pub(crate) fn fire_timer(&mut self, now: Instant) -> Option<TriggerSource> {
        self.timer.fire(now)
    }

    /// Starts a new check, superseding any check in flight.
    ///
    /// An empty keyword list fails immediately without reaching the engine.
    pub(crate) fn begin_check(&mut self) -> Vec<Effect> {
        self.timer.cancel();
        self.mark_dirty();
        if self.keywords.is_empty() {
            self.fail(CheckError::EmptyKeywords);
            return Vec::new();
        }
        self.last_check_id += 1;
        let check_id = self.last_check_id;
        self.phase = Phase::Checking { check_id };
        vec![Effect::RunCheck { check_id }]
    }

    /// Applies an engine completion. Completions of superseded checks are
    /// ignored; returns whether the completion was applied.
    pub(crate) fn complete_check(
        &mut self,
        check_id: CheckId,
        outcome: Result<String, CheckError>,
    ) -> bool {
        if self.phase != (Phase::Checking { check_id }) {
            return false;
        }
        match outcome {
            Ok(job_text) => {
                self.results = match_keywords(&job_text, &self.keywords);
                self.error = None;
                self.phase = Phase::ShowingResults;
            }
            Err(error) => self.fail(error),
        }
        self.mark_dirty();
        true
    }

    fn fail(&mut self, error: CheckError) {
        self.results.clear();
        self.error = Some(error);
        self.phase = Phase::ShowingError;
    }
}
