use std::time::Instant;

use crate::{AppState, Effect, Msg, TriggerSource};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::RestoreKeywords(entries) => {
            state.restore_keywords(entries);
            Vec::new()
        }
        Msg::Started => {
            if state.auto_check() {
                let mut effects = vec![Effect::ArmWatcher];
                effects.extend(state.begin_check());
                effects
            } else {
                Vec::new()
            }
        }
        Msg::KeywordInputChanged(text) => {
            state.set_keyword_input(text);
            Vec::new()
        }
        Msg::AddKeywordClicked => {
            if state.commit_keyword_input() {
                keywords_changed(&mut state)
            } else {
                Vec::new()
            }
        }
        Msg::RemoveKeywordClicked(keyword) => {
            if state.remove_keyword(&keyword) {
                keywords_changed(&mut state)
            } else {
                Vec::new()
            }
        }
        Msg::AutoCheckToggled(enabled) => {
            if !state.set_auto_check(enabled) {
                return (state, Vec::new());
            }
            if enabled {
                let mut effects = vec![Effect::ArmWatcher];
                effects.extend(state.begin_check());
                effects
            } else {
                vec![Effect::DisarmWatcher]
            }
        }
        Msg::CheckClicked => state.begin_check(),
        Msg::TabActivated { at } => auto_trigger(&mut state, at, TriggerSource::TabActivated),
        Msg::TabLoadComplete { at } => auto_trigger(&mut state, at, TriggerSource::TabLoaded),
        Msg::ContentChanged { at } => auto_trigger(&mut state, at, TriggerSource::ContentChanged),
        Msg::Tick { now } => match state.fire_timer(now) {
            Some(_) if state.auto_check() => state.begin_check(),
            _ => Vec::new(),
        },
        Msg::CheckCompleted { check_id, outcome } => {
            state.complete_check(check_id, outcome);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn keywords_changed(state: &mut AppState) -> Vec<Effect> {
    let mut effects = vec![Effect::PersistKeywords(state.keywords().to_vec())];
    if state.auto_check() {
        effects.extend(state.begin_check());
    }
    effects
}

/// Navigation-style triggers re-arm the probe on the (possibly new) page and
/// schedule a debounced check; content changes only schedule.
fn auto_trigger(state: &mut AppState, at: Instant, source: TriggerSource) -> Vec<Effect> {
    if !state.auto_check() {
        return Vec::new();
    }
    state.schedule(at, source);
    match source {
        TriggerSource::TabActivated | TriggerSource::TabLoaded => vec![Effect::ArmWatcher],
        TriggerSource::ContentChanged => Vec::new(),
    }
}
