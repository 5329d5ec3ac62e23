use jobscan_logging::scan_debug;

use crate::{
    AddressPolicy, ContentExtractor, ExtractionFailure, ExtractionReply, TabHost,
};

/// Reads the job text of the active tab.
///
/// Restricted addresses are rejected before the page is loaded.
pub async fn run_extraction(
    host: &dyn TabHost,
    extractor: &ContentExtractor,
    policy: &AddressPolicy,
) -> Result<String, ExtractionFailure> {
    let tab = host
        .active_tab()
        .await
        .map_err(|err| ExtractionFailure::Runtime(err.to_string()))?
        .ok_or(ExtractionFailure::NoActiveTab)?;

    if policy.is_restricted(&tab.url) {
        return Err(ExtractionFailure::RestrictedScheme { url: tab.url });
    }

    let page = host
        .load_page(&tab)
        .await
        .map_err(|err| ExtractionFailure::Runtime(err.to_string()))?;

    match extractor.extract(&page.html) {
        ExtractionReply::Missing { error } => Err(ExtractionFailure::ContentNotFound { message: error }),
        ExtractionReply::Found { job_text } => {
            scan_debug!(
                "Extracted {} chars of job text from tab {}",
                job_text.len(),
                tab.id
            );
            Ok(job_text)
        }
    }
}
