//! Validation of redirect targets.

use url::Url;

/// Longest long URL accepted for shortening.
pub const MAX_URL_LENGTH: usize = 2048;

/// Reasons a long URL is rejected.
#[derive(Debug, thiserror::Error)]
pub enum UrlValidationError {
    #[error("URL must not be empty")]
    Empty,

    #[error("URL exceeds {} characters", MAX_URL_LENGTH)]
    TooLong,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("URL must not contain control characters")]
    ControlCharacters,

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must contain a host")]
    MissingHost,
}

/// Checks that `input` is an absolute HTTP(S) URL with a host and returns it
/// parsed.
///
/// Callers store `url.as_str()`: the serialized form is ASCII with
/// percent-encoding applied, so it is always a valid `Location` header.
/// Surrounding spaces are trimmed. No further deduplication takes place, so two
/// spellings of the same address produce two distinct links.
///
/// # Errors
///
/// Rejects empty or oversized input, input with tabs, newlines or other control
/// characters, unparsable URLs, non-HTTP(S) schemes (`javascript:`, `data:`,
/// `file:`, ...) and URLs without a host.
pub fn validate_long_url(input: &str) -> Result<Url, UrlValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlValidationError::Empty);
    }
    if trimmed.len() > MAX_URL_LENGTH {
        return Err(UrlValidationError::TooLong);
    }
    // The URL parser silently drops these instead of failing.
    if trimmed.chars().any(char::is_control) {
        return Err(UrlValidationError::ControlCharacters);
    }

    let url = Url::parse(trimmed).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    if url.as_str().len() > MAX_URL_LENGTH {
        return Err(UrlValidationError::TooLong);
    }

    Ok(url)
}
