use std::sync::Arc;
use std::time::Duration;

use jobscan_logging::{scan_debug, scan_trace, scan_warn};
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use crate::{AddressPolicy, ContentExtractor, NodeFingerprint, ProbeMessage, TabHost, TabId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeState {
    Unarmed,
    Armed { tab_id: TabId },
}

/// Page-side observer of the content node.
///
/// Each call to [`PageProbe::observe`] is one observation batch: however
/// much changed since the last batch, at most one notification comes out.
#[derive(Debug)]
pub struct PageProbe {
    extractor: Arc<ContentExtractor>,
    state: ProbeState,
    fingerprint: Option<NodeFingerprint>,
}

impl PageProbe {
    pub fn new(extractor: Arc<ContentExtractor>) -> Self {
        Self {
            extractor,
            state: ProbeState::Unarmed,
            fingerprint: None,
        }
    }

    pub fn state(&self) -> ProbeState {
        self.state
    }

    /// Attaches to the content node of `html`, dropping any previous observer.
    /// Stays unarmed when the page has no content node.
    pub fn arm(&mut self, tab_id: TabId, html: &str) -> bool {
        self.disarm();
        match self.extractor.fingerprint(html) {
            Some(fingerprint) => {
                self.state = ProbeState::Armed { tab_id };
                self.fingerprint = Some(fingerprint);
                true
            }
            None => false,
        }
    }

    pub fn disarm(&mut self) {
        self.state = ProbeState::Unarmed;
        self.fingerprint = None;
    }

    /// Compares the page against the last observed content node.
    ///
    /// A vanished node disarms the probe without notifying.
    pub fn observe(&mut self, html: &str) -> Option<ProbeMessage> {
        if self.state == ProbeState::Unarmed {
            return None;
        }
        let Some(next) = self.extractor.fingerprint(html) else {
            scan_debug!("Content node vanished; probe disarmed");
            self.disarm();
            return None;
        };
        let previous = self.fingerprint.replace(next)?;
        let kind = previous.mutation_since(&next)?;
        scan_trace!("Content node mutation: {:?}", kind);
        Some(ProbeMessage::ContentChanged)
    }
}

/// One-way channel from the probe to the controller.
///
/// Messages sent while nobody listens are dropped, never queued.
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: broadcast::Sender<ProbeMessage>,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(16)
    }
}

impl Notifier {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ProbeMessage> {
        self.tx.subscribe()
    }

    /// Returns whether a listener received the message.
    pub fn notify(&self, message: ProbeMessage) -> bool {
        match self.tx.send(message) {
            Ok(_) => true,
            Err(_) => {
                scan_trace!("No listener for {:?}; dropped", message);
                false
            }
        }
    }
}

/// Drives a [`PageProbe`] against the active tab by reloading it periodically.
pub struct Watcher {
    host: Arc<dyn TabHost>,
    extractor: Arc<ContentExtractor>,
    policy: Arc<AddressPolicy>,
    notifier: Notifier,
    poll_interval: Duration,
    active: Option<CancellationToken>,
}

impl Watcher {
    pub fn new(
        host: Arc<dyn TabHost>,
        extractor: Arc<ContentExtractor>,
        policy: Arc<AddressPolicy>,
        notifier: Notifier,
        poll_interval: Duration,
    ) -> Self {
        Self {
            host,
            extractor,
            policy,
            notifier,
            poll_interval,
            active: None,
        }
    }

    /// (Re-)attaches to the active tab. The previous observer is torn down first.
    /// Must be called from within a tokio runtime.
    pub fn arm(&mut self) {
        self.disarm();
        let token = CancellationToken::new();
        let task = ProbeTask {
            host: self.host.clone(),
            probe: PageProbe::new(self.extractor.clone()),
            policy: self.policy.clone(),
            notifier: self.notifier.clone(),
            poll_interval: self.poll_interval,
            token: token.clone(),
        };
        tokio::spawn(task.run());
        self.active = Some(token);
    }

    pub fn disarm(&mut self) {
        if let Some(token) = self.active.take() {
            token.cancel();
        }
    }

    /// True while a probe task is attached; it may still have given up on its own.
    pub fn is_attached(&self) -> bool {
        self.active.as_ref().is_some_and(|t| !t.is_cancelled())
    }
}

impl Drop for Watcher {
    fn drop(&mut self) {
        self.disarm();
    }
}

struct ProbeTask {
    host: Arc<dyn TabHost>,
    probe: PageProbe,
    policy: Arc<AddressPolicy>,
    notifier: Notifier,
    poll_interval: Duration,
    token: CancellationToken,
}

impl ProbeTask {
    async fn run(mut self) {
        let tab = match self.host.active_tab().await {
            Ok(Some(tab)) if !self.policy.is_restricted(&tab.url) => tab,
            Ok(_) => return,
            Err(err) => {
                scan_warn!("Content monitoring setup failed: {}", err);
                return;
            }
        };

        let page = tokio::select! {
            _ = self.token.cancelled() => return,
            page = self.host.load_page(&tab) => page,
        };
        let page = match page {
            Ok(page) => page,
            Err(err) => {
                scan_warn!("Content monitoring setup failed for tab {}: {}", tab.id, err);
                return;
            }
        };
        if !self.probe.arm(tab.id, &page.html) {
            scan_debug!("Tab {} has no content node; probe stays unarmed", tab.id);
            return;
        }
        scan_debug!("Probe armed on tab {}", tab.id);

        loop {
            let page = tokio::select! {
                _ = self.token.cancelled() => break,
                page = async {
                    tokio::time::sleep(self.poll_interval).await;
                    self.host.load_page(&tab).await
                } => page,
            };
            match page {
                Ok(page) => {
                    if let Some(message) = self.probe.observe(&page.html) {
                        self.notifier.notify(message);
                    }
                    if self.probe.state() == ProbeState::Unarmed {
                        break;
                    }
                }
                Err(err) => {
                    scan_debug!("Probe reload of tab {} failed: {}", tab.id, err);
                }
            }
        }
        scan_debug!("Probe on tab {} detached", tab.id);
    }
}
