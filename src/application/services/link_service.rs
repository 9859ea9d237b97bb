//! Link creation and retrieval service.

use std::sync::Arc;

use serde_json::json;
use tracing::{info, warn};

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::generate_code;
use crate::utils::url_validator::validate_long_url;

/// Short code length used when none is configured.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Number of codes tried per link when none is configured.
pub const DEFAULT_MAX_ATTEMPTS: usize = 5;

/// Outcome of checking one freshly generated code against storage.
#[derive(Debug)]
enum CodeProbe {
    /// Storage has no link with this code.
    Accepted(String),
    /// The code is already taken.
    Collision(String),
    /// Generation or the lookup failed; creation must stop.
    Fatal(AppError),
}

/// Service for creating and retrieving shortened links.
///
/// # Code Uniqueness
///
/// Each attempt generates a random code and looks it up before inserting. The
/// lookup only saves a wasted insert: the repository's uniqueness constraint
/// is the real guarantee, so a [`AppError::Conflict`] from the insert (another
/// creator won the race) counts as a collision and uses up one attempt too.
pub struct LinkService<L: LinkRepository + ?Sized> {
    link_repository: Arc<L>,
    code_length: usize,
    max_attempts: usize,
}

impl<L: LinkRepository + ?Sized> LinkService<L> {
    /// Creates a link service with 6-character codes and 5 attempts.
    pub fn new(link_repository: Arc<L>) -> Self {
        Self::with_code_policy(link_repository, DEFAULT_CODE_LENGTH, DEFAULT_MAX_ATTEMPTS)
    }

    /// Creates a link service with a custom code length and attempt budget.
    pub fn with_code_policy(link_repository: Arc<L>, code_length: usize, max_attempts: usize) -> Self {
        Self {
            link_repository,
            code_length,
            max_attempts,
        }
    }

    /// Creates a new short link for `long_url`.
    ///
    /// The link stores the URL's parsed serialization, which is what redirects
    /// send back as `Location`. Every successful call creates a new link, even
    /// for a URL that was shortened before.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is not an absolute HTTP(S) URL
    /// or the configured code length is zero. Nothing is read or written then.
    ///
    /// Returns [`AppError::CodeExhausted`] if every attempt hit an existing code.
    /// No link is created in that case.
    ///
    /// Returns [`AppError::Internal`] if the random source or storage fails.
    pub async fn create_link(&self, long_url: String) -> Result<Link, AppError> {
        let long_url = validate_long_url(&long_url)
            .map_err(|e| {
                AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
            })?
            .to_string();

        for attempt in 1..=self.max_attempts {
            let code = match self.probe_code().await {
                CodeProbe::Accepted(code) => code,
                CodeProbe::Collision(code) => {
                    self.log_collision(&code, attempt);
                    continue;
                }
                CodeProbe::Fatal(e) => return Err(e),
            };

            match self
                .link_repository
                .create(NewLink::new(code.clone(), long_url.clone()))
                .await
            {
                Ok(link) => {
                    info!(short_code = %link.short_code, link_id = link.id, attempt, "Short link created");
                    return Ok(link);
                }
                Err(AppError::Conflict { .. }) => self.log_collision(&code, attempt),
                Err(e) => return Err(e),
            }
        }

        Err(AppError::code_exhausted(
            "Failed to generate a unique short code",
            json!({ "attempts": self.max_attempts }),
        ))
    }

    /// Retrieves a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn get_link_by_code(&self, short_code: &str) -> Result<Link, AppError> {
        self.link_repository
            .find_by_code(short_code)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Short link not found", json!({ "short_code": short_code }))
            })
    }

    /// Counts all stored links.
    pub async fn count_links(&self) -> Result<i64, AppError> {
        self.link_repository.count().await
    }

    /// Builds the public short URL for a code.
    pub fn get_short_url(&self, base_url: &str, short_code: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), short_code)
    }

    async fn probe_code(&self) -> CodeProbe {
        let code = match generate_code(self.code_length) {
            Ok(code) => code,
            Err(e) => return CodeProbe::Fatal(e.into()),
        };

        match self.link_repository.find_by_code(&code).await {
            Ok(None) => CodeProbe::Accepted(code),
            Ok(Some(_)) => CodeProbe::Collision(code),
            Err(e) => CodeProbe::Fatal(e),
        }
    }

    fn log_collision(&self, code: &str, attempt: usize) {
        metrics::counter!("short_code_collisions_total").increment(1);
        warn!(
            short_code = %code,
            attempt,
            max_attempts = self.max_attempts,
            "Short code already exists, retrying"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;
    use crate::utils::code_generator::ALPHABET;
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn create_test_link(id: i64, code: &str, url: &str) -> Link {
        Link::new(id, code.to_string(), url.to_string(), Utc::now())
    }

    fn echo_create(mock: &mut MockLinkRepository, times: usize) {
        mock.expect_create()
            .times(times)
            .returning(|new_link| Ok(create_test_link(10, &new_link.short_code, &new_link.long_url)));
    }

    #[tokio::test]
    async fn test_create_link_first_attempt() {
        let mut mock_link_repo = MockLinkRepository::new();

        mock_link_repo
            .expect_find_by_code()
            .times(1)
            .returning(|_| Ok(None));

        mock_link_repo
            .expect_create()
            .withf(|new_link| {
                new_link.short_code.len() == 6
                    && new_link.short_code.bytes().all(|b| ALPHABET.contains(&b))
                    && new_link.long_url == "https://example.com/"
            })
            .times(1)
            .returning(|new_link| Ok(create_test_link(1, &new_link.short_code, &new_link.long_url)));

        let service = LinkService::new(Arc::new(mock_link_repo));

        let link = service
            .create_link("https://example.com".to_string())
            .await
            .unwrap();

        assert_eq!(link.id, 1);
        assert_eq!(link.short_code.len(), 6);
        assert_eq!(link.long_url, "https://example.com/");
    }

    #[tokio::test]
    async fn test_create_link_stores_parsed_url() {
        let mut mock_link_repo = MockLinkRepository::new();

        mock_link_repo
            .expect_find_by_code()
            .times(1)
            .returning(|_| Ok(None));
        mock_link_repo
            .expect_create()
            .withf(|new_link| new_link.long_url == "https://example.com/a%20b")
            .times(1)
            .returning(|new_link| Ok(create_test_link(4, &new_link.short_code, &new_link.long_url)));

        let service = LinkService::new(Arc::new(mock_link_repo));

        let link = service
            .create_link("  https://example.com/a b  ".to_string())
            .await
            .unwrap();

        assert_eq!(link.long_url, "https://example.com/a%20b");
    }

    #[tokio::test]
    async fn test_create_link_retries_on_collision() {
        let mut mock_link_repo = MockLinkRepository::new();
        let lookups = Arc::new(AtomicUsize::new(0));
        let lookups_clone = lookups.clone();

        mock_link_repo
            .expect_find_by_code()
            .times(3)
            .returning(move |code| {
                if lookups_clone.fetch_add(1, Ordering::SeqCst) < 2 {
                    Ok(Some(create_test_link(5, code, "https://taken.com")))
                } else {
                    Ok(None)
                }
            });
        echo_create(&mut mock_link_repo, 1);

        let service = LinkService::new(Arc::new(mock_link_repo));

        let result = service.create_link("https://example.com".to_string()).await;

        assert!(result.is_ok());
        assert_eq!(lookups.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_create_link_exhausts_attempts_without_insert() {
        let mut mock_link_repo = MockLinkRepository::new();

        mock_link_repo
            .expect_find_by_code()
            .times(5)
            .returning(|code| Ok(Some(create_test_link(5, code, "https://taken.com"))));

        mock_link_repo.expect_create().times(0);

        let service = LinkService::new(Arc::new(mock_link_repo));

        let result = service.create_link("https://example.com".to_string()).await;

        assert!(matches!(result, Err(AppError::CodeExhausted { .. })));
    }

    #[tokio::test]
    async fn test_create_link_lookup_error_aborts() {
        let mut mock_link_repo = MockLinkRepository::new();

        mock_link_repo
            .expect_find_by_code()
            .times(1)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        mock_link_repo.expect_create().times(0);

        let service = LinkService::new(Arc::new(mock_link_repo));

        let result = service.create_link("https://example.com".to_string()).await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
    }

    #[tokio::test]
    async fn test_create_link_insert_conflict_counts_as_collision() {
        let mut mock_link_repo = MockLinkRepository::new();
        let inserts = Arc::new(AtomicUsize::new(0));
        let inserts_clone = inserts.clone();

        mock_link_repo
            .expect_find_by_code()
            .times(2)
            .returning(|_| Ok(None));

        mock_link_repo
            .expect_create()
            .times(2)
            .returning(move |new_link| {
                if inserts_clone.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(AppError::conflict("Short code already exists", json!({})))
                } else {
                    Ok(create_test_link(2, &new_link.short_code, &new_link.long_url))
                }
            });

        let service = LinkService::new(Arc::new(mock_link_repo));

        let link = service
            .create_link("https://example.com".to_string())
            .await
            .unwrap();

        assert_eq!(link.id, 2);
        assert_eq!(inserts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_create_link_insert_conflicts_exhaust_budget() {
        let mut mock_link_repo = MockLinkRepository::new();

        mock_link_repo
            .expect_find_by_code()
            .times(3)
            .returning(|_| Ok(None));
        mock_link_repo
            .expect_create()
            .times(3)
            .returning(|_| Err(AppError::conflict("Short code already exists", json!({}))));

        let service = LinkService::with_code_policy(Arc::new(mock_link_repo), 8, 3);

        let result = service.create_link("https://example.com".to_string()).await;

        assert!(matches!(result, Err(AppError::CodeExhausted { .. })));
    }

    #[tokio::test]
    async fn test_create_link_insert_error_surfaces() {
        let mut mock_link_repo = MockLinkRepository::new();

        mock_link_repo
            .expect_find_by_code()
            .times(1)
            .returning(|_| Ok(None));
        mock_link_repo
            .expect_create()
            .times(1)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let service = LinkService::new(Arc::new(mock_link_repo));

        let result = service.create_link("https://example.com".to_string()).await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
    }

    #[tokio::test]
    async fn test_create_link_invalid_url() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo.expect_find_by_code().times(0);
        mock_link_repo.expect_create().times(0);

        let service = LinkService::new(Arc::new(mock_link_repo));

        for url in ["not-a-url", "", "javascript:alert(1)", "https://example.com/a\nb"] {
            let result = service.create_link(url.to_string()).await;
            assert!(
                matches!(result, Err(AppError::Validation { .. })),
                "{url} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn test_create_link_zero_length_is_invalid() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo.expect_find_by_code().times(0);
        mock_link_repo.expect_create().times(0);

        let service = LinkService::with_code_policy(Arc::new(mock_link_repo), 0, 5);

        let result = service.create_link("https://example.com".to_string()).await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_create_link_does_not_deduplicate() {
        let mut mock_link_repo = MockLinkRepository::new();

        mock_link_repo
            .expect_find_by_code()
            .times(2)
            .returning(|_| Ok(None));
        echo_create(&mut mock_link_repo, 2);

        let service = LinkService::new(Arc::new(mock_link_repo));

        let first = service
            .create_link("https://example.com".to_string())
            .await
            .unwrap();
        let second = service
            .create_link("https://example.com".to_string())
            .await
            .unwrap();

        assert_eq!(first.long_url, second.long_url);
    }

    #[tokio::test]
    async fn test_get_link_by_code_found() {
        let mut mock_link_repo = MockLinkRepository::new();

        mock_link_repo
            .expect_find_by_code()
            .withf(|code| code == "abc123")
            .times(1)
            .returning(|code| Ok(Some(create_test_link(3, code, "https://example.com"))));

        let service = LinkService::new(Arc::new(mock_link_repo));

        let link = service.get_link_by_code("abc123").await.unwrap();
        assert_eq!(link.id, 3);
    }

    #[tokio::test]
    async fn test_get_link_by_code_not_found() {
        let mut mock_link_repo = MockLinkRepository::new();

        mock_link_repo
            .expect_find_by_code()
            .times(1)
            .returning(|_| Ok(None));

        let service = LinkService::new(Arc::new(mock_link_repo));

        let result = service.get_link_by_code("missing").await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[test]
    fn test_get_short_url_trims_trailing_slash() {
        let service = LinkService::new(Arc::new(MockLinkRepository::new()));

        assert_eq!(
            service.get_short_url("http://localhost:8080/", "abc123"),
            "http://localhost:8080/abc123"
        );
        assert_eq!(
            service.get_short_url("https://s.example.com", "xyz"),
            "https://s.example.com/xyz"
        );
    }
}
