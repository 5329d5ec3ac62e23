use url::Url;

/// Address prefixes of browser-internal and extension pages that can never be read.
pub const DEFAULT_RESTRICTED_PREFIXES: &[&str] = &[
    "chrome://",
    "chrome-extension://",
    "edge://",
    "about:",
    "moz-extension://",
    "devtools://",
    "view-source:",
];

/// Decides which tab addresses may be read before any page load is attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressPolicy {
    restricted_prefixes: Vec<String>,
}

impl Default for AddressPolicy {
    fn default() -> Self {
        Self::new(std::iter::empty::<String>())
    }
}

impl AddressPolicy {
    /// Builds a policy from the default prefixes plus `extra` ones.
    pub fn new<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut restricted_prefixes: Vec<String> = DEFAULT_RESTRICTED_PREFIXES
            .iter()
            .map(|p| p.to_string())
            .collect();
        for prefix in extra {
            let prefix = prefix.into().to_ascii_lowercase();
            if !prefix.is_empty() && !restricted_prefixes.contains(&prefix) {
                restricted_prefixes.push(prefix);
            }
        }
        Self {
            restricted_prefixes,
        }
    }

    pub fn restricted_prefixes(&self) -> &[String] {
        &self.restricted_prefixes
    }

    /// True for listed prefixes and for anything that is not an http(s) page.
    pub fn is_restricted(&self, address: &str) -> bool {
        let lowered = address.trim().to_ascii_lowercase();
        if self
            .restricted_prefixes
            .iter()
            .any(|prefix| lowered.starts_with(prefix.as_str()))
        {
            return true;
        }
        match Url::parse(&lowered) {
            Ok(url) => !matches!(url.scheme(), "http" | "https"),
            Err(_) => true,
        }
    }
}
