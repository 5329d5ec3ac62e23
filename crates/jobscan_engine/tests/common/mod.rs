#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use jobscan_engine::{FailureKind, FetchError, PageSnapshot, Tab, TabHost};

/// Tab host serving one in-memory page whose markup tests can swap.
pub struct FakeHost {
    tab: Mutex<Option<Tab>>,
    html: Mutex<Option<String>>,
    load_delay: Duration,
    loads: AtomicUsize,
}

impl FakeHost {
    pub fn new(url: &str, html: &str) -> Self {
        Self {
            tab: Mutex::new(Some(Tab {
                id: 1,
                url: url.to_string(),
            })),
            html: Mutex::new(Some(html.to_string())),
            load_delay: Duration::ZERO,
            loads: AtomicUsize::new(0),
        }
    }

    pub fn without_tab() -> Self {
        let host = Self::new("https://example.com", "");
        *host.tab.lock().unwrap() = None;
        host
    }

    pub fn with_load_delay(mut self, delay: Duration) -> Self {
        self.load_delay = delay;
        self
    }

    pub fn set_html(&self, html: &str) {
        *self.html.lock().unwrap() = Some(html.to_string());
    }

    pub fn fail_loads(&self) {
        *self.html.lock().unwrap() = None;
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl TabHost for FakeHost {
    async fn active_tab(&self) -> Result<Option<Tab>, FetchError> {
        Ok(self.tab.lock().unwrap().clone())
    }

    async fn load_page(&self, tab: &Tab) -> Result<PageSnapshot, FetchError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if !self.load_delay.is_zero() {
            tokio::time::sleep(self.load_delay).await;
        }
        let html = self.html.lock().unwrap().clone();
        match html {
            Some(html) => Ok(PageSnapshot {
                url: tab.url.clone(),
                html,
            }),
            None => Err(FetchError {
                kind: FailureKind::Network,
                message: "connection reset".to_string(),
            }),
        }
    }
}

pub fn job_page(description: &str) -> String {
    format!(
        r#"<html><body>
        <div class="jobs-description-content__text--stretch" data-rev="1">{description}</div>
        </body></html>"#
    )
}
