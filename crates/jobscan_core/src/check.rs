use std::fmt;

/// Monotonic id assigned to every started check.
pub type CheckId = u64;

/// Why a check could not produce results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckError {
    EmptyKeywords,
    NoActiveTab,
    RestrictedScheme,
    ContentNotFound,
    Runtime(String),
}

impl fmt::Display for CheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckError::EmptyKeywords => write!(f, "Please add some keywords to check."),
            CheckError::NoActiveTab => write!(f, "No active tab found."),
            CheckError::RestrictedScheme => write!(
                f,
                "Cannot access this type of page. Please navigate to a regular website."
            ),
            CheckError::ContentNotFound => write!(
                f,
                "Job description not found. Make sure you're on a LinkedIn job page."
            ),
            CheckError::Runtime(detail) => write!(
                f,
                "An error occurred while checking keywords. Error: {detail}"
            ),
        }
    }
}
