//! Jobscan core: pure controller state machine, keyword matching and view-model helpers.
mod check;
mod debounce;
mod effect;
mod keywords;
mod matcher;
mod msg;
mod state;
mod update;
mod view_model;

pub use check::{CheckError, CheckId};
pub use debounce::{DebounceDelays, DebounceTimer, TriggerSource};
pub use effect::Effect;
pub use keywords::KeywordList;
pub use matcher::{match_keywords, MatchResult};
pub use msg::Msg;
pub use state::{AppState, Phase};
pub use update::update;
pub use view_model::{AppViewModel, MatchRowView};
