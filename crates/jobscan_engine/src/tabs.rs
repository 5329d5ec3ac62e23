use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use jobscan_logging::scan_debug;

use crate::{FailureKind, FetchError, PageLoader, PageSnapshot, Tab, TabId};

/// The browser as seen by the engine: which tab is active and how to read it.
#[async_trait::async_trait]
pub trait TabHost: Send + Sync {
    async fn active_tab(&self) -> Result<Option<Tab>, FetchError>;
    async fn load_page(&self, tab: &Tab) -> Result<PageSnapshot, FetchError>;
}

#[derive(Debug, Default)]
struct TabSet {
    tabs: Vec<Tab>,
    active: Option<TabId>,
    next_id: TabId,
}

/// In-process tab strip whose pages are read through a [`PageLoader`].
pub struct BrowserTabs {
    loader: Arc<dyn PageLoader>,
    tabs: Mutex<TabSet>,
}

impl BrowserTabs {
    pub fn new(loader: Arc<dyn PageLoader>) -> Self {
        Self {
            loader,
            tabs: Mutex::new(TabSet {
                next_id: 1,
                ..TabSet::default()
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, TabSet> {
        self.tabs.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Opens `url` in a new tab and activates it.
    pub fn open(&self, url: impl Into<String>) -> Tab {
        let mut set = self.lock();
        let tab = Tab {
            id: set.next_id,
            url: url.into(),
        };
        set.next_id += 1;
        set.active = Some(tab.id);
        set.tabs.push(tab.clone());
        scan_debug!("Opened tab {} at {}", tab.id, tab.url);
        tab
    }

    /// Points the active tab at `url`; opens a tab if none is active.
    pub fn navigate(&self, url: impl Into<String>) -> Tab {
        let url = url.into();
        {
            let mut set = self.lock();
            if let Some(active) = set.active {
                if let Some(tab) = set.tabs.iter_mut().find(|t| t.id == active) {
                    tab.url = url;
                    scan_debug!("Tab {} navigated to {}", tab.id, tab.url);
                    return tab.clone();
                }
            }
        }
        self.open(url)
    }

    pub fn activate(&self, id: TabId) -> Option<Tab> {
        let mut set = self.lock();
        let tab = set.tabs.iter().find(|t| t.id == id).cloned()?;
        set.active = Some(id);
        Some(tab)
    }

    /// Closes a tab; the last remaining tab becomes active if the active one closed.
    pub fn close(&self, id: TabId) -> bool {
        let mut set = self.lock();
        let before = set.tabs.len();
        set.tabs.retain(|t| t.id != id);
        if set.tabs.len() == before {
            return false;
        }
        if set.active == Some(id) {
            set.active = set.tabs.last().map(|t| t.id);
        }
        true
    }

    pub fn tabs(&self) -> Vec<Tab> {
        self.lock().tabs.clone()
    }

    pub fn active(&self) -> Option<Tab> {
        let set = self.lock();
        let active = set.active?;
        set.tabs.iter().find(|t| t.id == active).cloned()
    }
}

#[async_trait::async_trait]
impl TabHost for BrowserTabs {
    async fn active_tab(&self) -> Result<Option<Tab>, FetchError> {
        Ok(self.active())
    }

    async fn load_page(&self, tab: &Tab) -> Result<PageSnapshot, FetchError> {
        let known = self.lock().tabs.iter().any(|t| t.id == tab.id);
        if !known {
            return Err(FetchError::new(
                FailureKind::UnknownTab(tab.id),
                "tab was closed",
            ));
        }
        self.loader.load(&tab.url).await
    }
}
