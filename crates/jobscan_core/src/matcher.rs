use crate::KeywordList;

/// Outcome of looking up one keyword in the job text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub keyword: String,
    pub found: bool,
}

/// Case-insensitive substring lookup of every keyword in `haystack`.
///
/// Results follow the keyword order exactly. The haystack is lower-cased
/// once per call, so an already lower-cased input is fine too.
pub fn match_keywords(haystack: &str, keywords: &KeywordList) -> Vec<MatchResult> {
    let haystack = haystack.to_lowercase();
    keywords
        .iter()
        .map(|keyword| MatchResult {
            keyword: keyword.to_string(),
            found: haystack.contains(&keyword.to_lowercase()),
        })
        .collect()
}
