use std::path::Path;

use jobscan_core::KeywordList;
use jobscan_engine::{AtomicFile, JsonFileStore, KeyValueStore, KeywordStore, StoreError};
use jobscan_logging::scan_info;

pub fn open_keyword_store(path: &Path) -> KeywordStore<JsonFileStore> {
    scan_info!("Using keyword store {:?}", path);
    KeywordStore::new(JsonFileStore::new(AtomicFile::new(path)))
}

/// Persisted keywords, normalized the same way the controller restores them.
pub fn load_keywords<S: KeyValueStore>(store: &KeywordStore<S>) -> KeywordList {
    KeywordList::from_entries(store.load())
}

/// Applies `edit` to the persisted list and writes it back if it changed.
pub fn edit_keywords<S, F>(store: &KeywordStore<S>, edit: F) -> Result<KeywordList, StoreError>
where
    S: KeyValueStore,
    F: FnOnce(&mut KeywordList) -> bool,
{
    let mut keywords = load_keywords(store);
    if edit(&mut keywords) {
        store.save(keywords.as_slice())?;
    }
    Ok(keywords)
}
