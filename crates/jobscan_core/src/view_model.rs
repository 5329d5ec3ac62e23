use crate::Phase;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub phase: Phase,
    pub keywords: Vec<String>,
    pub keyword_input: String,
    pub auto_check: bool,
    /// The check button is disabled while there is nothing to look for.
    pub check_enabled: bool,
    pub results: Vec<MatchRowView>,
    pub error: Option<String>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRowView {
    pub keyword: String,
    pub found: bool,
}
