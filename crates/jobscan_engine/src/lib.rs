//! Jobscan engine: page loading, content extraction, change probing and keyword storage.
mod check;
mod decode;
mod engine;
mod extract;
mod fetch;
mod persist;
mod scheme;
mod store;
mod tabs;
mod types;
mod watch;

pub use check::run_extraction;
pub use decode::{decode_page, DecodedPage};
pub use engine::{EngineHandle, EngineSettings};
pub use extract::{ContentExtractor, ExtractorError, MutationKind, NodeFingerprint, DEFAULT_CONTENT_SELECTOR};
pub use fetch::{FetchSettings, PageLoader, ReqwestFetcher};
pub use persist::{AtomicFile, PersistError};
pub use scheme::{AddressPolicy, DEFAULT_RESTRICTED_PREFIXES};
pub use store::{JsonFileStore, KeyValueStore, KeywordStore, MemoryStore, StoreError, KEYWORDS_KEY};
pub use tabs::{BrowserTabs, TabHost};
pub use types::{
    CheckId, EngineEvent, ExtractionFailure, ExtractionReply, FailureKind, FetchError,
    FetchMetadata, FetchOutput, PageSnapshot, ProbeMessage, Tab, TabId,
};
pub use watch::{Notifier, PageProbe, ProbeState, Watcher};
