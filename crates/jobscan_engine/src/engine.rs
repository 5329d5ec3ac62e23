use std::sync::Arc;
use std::time::Duration;

use jobscan_logging::{scan_debug, scan_info};
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use crate::check::run_extraction;
use crate::{
    AddressPolicy, CheckId, ContentExtractor, EngineEvent, ExtractorError, Notifier,
    ProbeMessage, TabHost, Watcher, DEFAULT_CONTENT_SELECTOR,
};

#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub content_selector: String,
    /// Prefixes rejected in addition to the built-in browser-internal ones.
    pub extra_restricted_prefixes: Vec<String>,
    pub poll_interval: Duration,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            content_selector: DEFAULT_CONTENT_SELECTOR.to_string(),
            extra_restricted_prefixes: Vec::new(),
            poll_interval: Duration::from_millis(1500),
        }
    }
}

/// Runs checks and the content watcher for the controller.
///
/// Only one check is in flight at a time: starting a check aborts the
/// previous one, whose completion is then never reported.
pub struct EngineHandle {
    host: Arc<dyn TabHost>,
    extractor: Arc<ContentExtractor>,
    policy: Arc<AddressPolicy>,
    event_tx: mpsc::UnboundedSender<EngineEvent>,
    in_flight: Option<(CheckId, JoinHandle<()>)>,
    notifier: Notifier,
    watcher: Watcher,
}

impl EngineHandle {
    pub fn new(
        host: Arc<dyn TabHost>,
        settings: &EngineSettings,
    ) -> Result<(Self, mpsc::UnboundedReceiver<EngineEvent>), ExtractorError> {
        let extractor = Arc::new(ContentExtractor::new(&settings.content_selector)?);
        let policy = Arc::new(AddressPolicy::new(
            settings.extra_restricted_prefixes.iter().cloned(),
        ));
        let notifier = Notifier::default();
        let watcher = Watcher::new(
            host.clone(),
            extractor.clone(),
            policy.clone(),
            notifier.clone(),
            settings.poll_interval,
        );
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let handle = Self {
            host,
            extractor,
            policy,
            event_tx,
            in_flight: None,
            notifier,
            watcher,
        };
        Ok((handle, event_rx))
    }

    pub fn start_check(&mut self, check_id: CheckId) {
        if let Some((previous, task)) = self.in_flight.take() {
            if !task.is_finished() {
                scan_debug!("Check {} superseded by {}", previous, check_id);
                task.abort();
            }
        }

        let host = self.host.clone();
        let extractor = self.extractor.clone();
        let policy = self.policy.clone();
        let event_tx = self.event_tx.clone();
        let task = tokio::spawn(async move {
            let result = run_extraction(host.as_ref(), &extractor, &policy).await;
            let _ = event_tx.send(EngineEvent::CheckFinished { check_id, result });
        });
        self.in_flight = Some((check_id, task));
    }

    pub fn arm_watcher(&mut self) {
        scan_info!("Arming content watcher");
        self.watcher.arm();
    }

    pub fn disarm_watcher(&mut self) {
        scan_info!("Disarming content watcher");
        self.watcher.disarm();
    }

    pub fn watcher_attached(&self) -> bool {
        self.watcher.is_attached()
    }

    /// Listens for probe notifications; dropping the receiver stops delivery.
    pub fn subscribe_content_changes(&self) -> broadcast::Receiver<ProbeMessage> {
        self.notifier.subscribe()
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        if let Some((_, task)) = self.in_flight.take() {
            task.abort();
        }
    }
}
