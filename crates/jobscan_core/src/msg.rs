use std::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Restore the keyword list loaded from the store.
    RestoreKeywords(Vec<String>),
    /// Front-end is up; runs the initial check when auto-check is on.
    Started,
    /// User edited the keyword input box.
    KeywordInputChanged(String),
    /// User submitted the keyword input (Add button or Enter).
    AddKeywordClicked,
    /// User removed a keyword chip.
    RemoveKeywordClicked(String),
    /// User flipped the auto-check switch.
    AutoCheckToggled(bool),
    /// User asked for a check right now.
    CheckClicked,
    /// Browser switched to another tab.
    TabActivated { at: Instant },
    /// A tab finished loading.
    TabLoadComplete { at: Instant },
    /// Page probe reported a mutation of the content node.
    ContentChanged { at: Instant },
    /// Timer tick; fires the debounced check once its deadline passed.
    Tick { now: Instant },
    /// Engine finished extracting the job text for a check.
    CheckCompleted {
        check_id: crate::CheckId,
        outcome: Result<String, crate::CheckError>,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}
