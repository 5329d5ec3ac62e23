#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Extract the active tab's job text; superseding any check in flight.
    RunCheck { check_id: crate::CheckId },
    /// Write the keyword list to the store.
    PersistKeywords(Vec<String>),
    /// (Re-)attach the page probe to the active tab's content node.
    ArmWatcher,
    /// Detach the page probe.
    DisarmWatcher,
}
