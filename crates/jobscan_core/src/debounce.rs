use std::time::{Duration, Instant};

/// Sources that may schedule a delayed re-check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerSource {
    TabActivated,
    TabLoaded,
    ContentChanged,
}

/// Quiet periods applied per trigger source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceDelays {
    pub tab_activated: Duration,
    pub tab_loaded: Duration,
    pub content_changed: Duration,
}

impl Default for DebounceDelays {
    fn default() -> Self {
        Self {
            tab_activated: Duration::from_millis(500),
            tab_loaded: Duration::from_millis(1000),
            content_changed: Duration::from_millis(500),
        }
    }
}

impl DebounceDelays {
    pub fn for_source(&self, source: TriggerSource) -> Duration {
        match source {
            TriggerSource::TabActivated => self.tab_activated,
            TriggerSource::TabLoaded => self.tab_loaded,
            TriggerSource::ContentChanged => self.content_changed,
        }
    }
}

/// Single cancellable timer shared by every debounced trigger.
///
/// Arming replaces any pending deadline, so a burst of triggers collapses
/// into one firing `delay` after the last of them. The last trigger's delay
/// wins even when it is shorter: a content change 100 ms into a 1000 ms
/// load-complete wait moves the check to 600 ms. The content node already
/// exists by then, which is all a check needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DebounceTimer {
    deadline: Option<Instant>,
    source: Option<TriggerSource>,
}

impl DebounceTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm(&mut self, now: Instant, delay: Duration, source: TriggerSource) {
        self.deadline = Some(now + delay);
        self.source = Some(source);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
        self.source = None;
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Consumes the pending deadline if it has passed, returning its source.
    pub fn fire(&mut self, now: Instant) -> Option<TriggerSource> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                let source = self.source.take();
                self.deadline = None;
                source
            }
            _ => None,
        }
    }
}
