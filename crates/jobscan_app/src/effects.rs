use std::time::Instant;

use jobscan_core::{CheckError, Effect, Msg};
use jobscan_engine::{
    EngineEvent, EngineHandle, ExtractionFailure, KeyValueStore, KeywordStore, ProbeMessage,
};
use jobscan_logging::{scan_debug, scan_error, scan_info};
use tokio::sync::broadcast::{self, error::RecvError};

/// Executes controller effects against the engine and the keyword store.
pub struct EffectRunner<S> {
    engine: EngineHandle,
    store: KeywordStore<S>,
    content_rx: Option<broadcast::Receiver<ProbeMessage>>,
}

impl<S: KeyValueStore> EffectRunner<S> {
    pub fn new(engine: EngineHandle, store: KeywordStore<S>) -> Self {
        Self {
            engine,
            store,
            content_rx: None,
        }
    }

    pub fn store(&self) -> &KeywordStore<S> {
        &self.store
    }

    pub fn is_listening(&self) -> bool {
        self.content_rx.is_some()
    }

    pub fn enqueue(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::RunCheck { check_id } => {
                    let previous = jobscan_logging::current_check();
                    jobscan_logging::set_current_check(check_id);
                    scan_info!("RunCheck check_id={} previous={}", check_id, previous);
                    self.engine.start_check(check_id);
                }
                Effect::PersistKeywords(keywords) => {
                    if let Err(err) = self.store.save(&keywords) {
                        scan_error!("Failed to persist {} keywords: {}", keywords.len(), err);
                    }
                }
                Effect::ArmWatcher => {
                    if self.content_rx.is_none() {
                        self.content_rx = Some(self.engine.subscribe_content_changes());
                    }
                    self.engine.arm_watcher();
                }
                Effect::DisarmWatcher => {
                    self.engine.disarm_watcher();
                    // Without a receiver, late probe messages are dropped.
                    self.content_rx = None;
                }
            }
        }
    }

    /// Waits for the next probe notification; pending forever while not listening.
    pub async fn next_content_change(&mut self) -> Msg {
        let Some(rx) = self.content_rx.as_mut() else {
            return std::future::pending().await;
        };
        match rx.recv().await {
            Ok(ProbeMessage::ContentChanged) => Msg::ContentChanged { at: Instant::now() },
            Err(RecvError::Lagged(skipped)) => {
                scan_debug!("Skipped {} queued content notifications", skipped);
                Msg::ContentChanged { at: Instant::now() }
            }
            Err(RecvError::Closed) => std::future::pending().await,
        }
    }
}

/// Must run on the controller thread, where the current check id is recorded.
pub fn map_engine_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::CheckFinished { check_id, result } => {
            let current = jobscan_logging::current_check();
            if check_id == current {
                scan_debug!("Check {} finished, ok={}", check_id, result.is_ok());
            } else {
                scan_debug!("Check {} finished after check {} started", check_id, current);
            }
            Msg::CheckCompleted {
                check_id,
                outcome: result.map_err(map_failure),
            }
        }
    }
}

fn map_failure(failure: ExtractionFailure) -> CheckError {
    match failure {
        ExtractionFailure::NoActiveTab => CheckError::NoActiveTab,
        ExtractionFailure::RestrictedScheme { .. } => CheckError::RestrictedScheme,
        ExtractionFailure::ContentNotFound { .. } => CheckError::ContentNotFound,
        ExtractionFailure::Runtime(detail) => CheckError::Runtime(detail),
    }
}
