/// Ordered list of unique, trimmed, non-empty keywords.
///
/// Uniqueness is exact string equality; matching against page text is
/// case-insensitive and happens elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeywordList {
    items: Vec<String>,
}

impl KeywordList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list from persisted or user-supplied entries.
    /// Entries are trimmed; empties and later duplicates are dropped.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Self::new();
        for entry in entries {
            list.add(entry.as_ref());
        }
        list
    }

    /// Appends `raw` (trimmed) if it is non-empty and not already present.
    /// Returns whether the list changed.
    pub fn add(&mut self, raw: &str) -> bool {
        let keyword = raw.trim();
        if keyword.is_empty() || self.contains(keyword) {
            return false;
        }
        self.items.push(keyword.to_string());
        true
    }

    /// Removes `keyword` by exact match. Returns whether the list changed.
    pub fn remove(&mut self, keyword: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|k| k != keyword);
        self.items.len() != before
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.items.iter().any(|k| k == keyword)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.items
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.items.clone()
    }
}

