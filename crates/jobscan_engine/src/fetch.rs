use std::time::Duration;

use futures_util::StreamExt;
use jobscan_logging::{scan_debug, scan_trace};
use reqwest::header::{CONTENT_TYPE, LOCATION};

use crate::decode::decode_page;
use crate::{FailureKind, FetchError, FetchMetadata, FetchOutput, PageSnapshot};

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub max_bytes: u64,
    pub allowed_content_types: Vec<String>,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            redirect_limit: 5,
            max_bytes: 5 * 1024 * 1024,
            allowed_content_types: vec![
                "text/html".to_string(),
                "application/xhtml+xml".to_string(),
            ],
        }
    }
}

/// Loads the current markup of the page at an address.
#[async_trait::async_trait]
pub trait PageLoader: Send + Sync {
    async fn load(&self, url: &str) -> Result<PageSnapshot, FetchError>;
}

/// HTTP page loader. One client (and connection pool) serves every fetch;
/// redirects are followed here so each request counts its own hops.
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    settings: FetchSettings,
    client: reqwest::Client,
}

impl ReqwestFetcher {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        let client = build_client(&settings)?;
        Ok(Self { settings, client })
    }

    fn is_content_type_allowed(&self, content_type: &str) -> bool {
        let ct = content_type.split(';').next().unwrap_or(content_type).trim();
        self.settings
            .allowed_content_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(ct))
    }

    /// Downloads the raw body of `url`, enforcing the size and type limits.
    pub async fn fetch(&self, url: &str) -> Result<FetchOutput, FetchError> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let (response, redirect_count) = self.follow_redirects(parsed).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        if let Some(ct) = content_type.as_deref() {
            if !self.is_content_type_allowed(ct) {
                return Err(FetchError::new(
                    FailureKind::UnsupportedContentType {
                        content_type: ct.to_string(),
                    },
                    "unsupported content type",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
            scan_trace!("fetch {} received {} bytes", url, bytes.len());
        }

        let metadata = FetchMetadata {
            original_url: url.to_string(),
            final_url,
            redirect_count,
            content_type,
            byte_len: bytes.len() as u64,
        };

        Ok(FetchOutput { bytes, metadata })
    }

    async fn follow_redirects(
        &self,
        mut current: reqwest::Url,
    ) -> Result<(reqwest::Response, usize), FetchError> {
        let mut redirects = 0;
        loop {
            let response = self
                .client
                .get(current.clone())
                .send()
                .await
                .map_err(map_reqwest_error)?;
            if !response.status().is_redirection() {
                return Ok((response, redirects));
            }
            let location = response
                .headers()
                .get(LOCATION)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string);
            let Some(location) = location else {
                return Ok((response, redirects));
            };
            if redirects >= self.settings.redirect_limit {
                return Err(FetchError::new(
                    FailureKind::RedirectLimitExceeded,
                    format!("more than {} redirects", self.settings.redirect_limit),
                ));
            }
            let next = current
                .join(&location)
                .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
            scan_trace!("redirect {} -> {}", current, next);
            current = next;
            redirects += 1;
        }
    }
}

#[async_trait::async_trait]
impl PageLoader for ReqwestFetcher {
    async fn load(&self, url: &str) -> Result<PageSnapshot, FetchError> {
        let output = self.fetch(url).await?;
        let decoded = decode_page(&output.bytes, output.metadata.content_type.as_deref());
        scan_debug!(
            "Loaded {} ({} bytes, {})",
            output.metadata.final_url,
            output.metadata.byte_len,
            decoded.encoding_label
        );
        Ok(PageSnapshot {
            url: output.metadata.final_url,
            html: decoded.html,
        })
    }
}

fn build_client(settings: &FetchSettings) -> Result<reqwest::Client, FetchError> {
    reqwest::Client::builder()
        .connect_timeout(settings.connect_timeout)
        .timeout(settings.request_timeout)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
