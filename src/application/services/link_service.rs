//! Link creation and resolution service.

use std::sync::Arc;

use crate::application::services::CodeGenerator;
use crate::domain::entities::{CodeKind, ShortLink, Table};
use crate::domain::repositories::KeyValueStore;
use crate::error::AppError;
use crate::utils::code_generator::validate_custom_code;
use serde_json::json;
use tracing::{info, warn};

/// Attempts at claiming a freshly generated code before giving up.
const CLAIM_ATTEMPTS: usize = 3;

/// Service for creating and resolving short links.
///
/// # Storage Layout
///
/// - Generated codes are written both ways: `longToShort` and `shortToLong`
/// - Custom aliases are written only to `customToLong`, so shortening the same
///   long URL later still creates a generated code
///
/// # Consistency
///
/// Writes use set-if-absent, so a long URL maps to exactly one generated code
/// and no existing code is overwritten, even under concurrent requests.
pub struct LinkService {
    store: Arc<dyn KeyValueStore>,
    generator: CodeGenerator,
    base_url: String,
}

impl LinkService {
    /// Creates a new link service.
    ///
    /// `base_url` is the public origin short URLs are built from
    /// (e.g. `https://s.example.com`).
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        generator: CodeGenerator,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            store,
            generator,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn generator(&self) -> &CodeGenerator {
        &self.generator
    }

    /// Constructs the absolute short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url, code)
    }

    /// Returns the generated code for `long_url`, creating it on first use.
    ///
    /// # Flow
    ///
    /// 1. Existing `longToShort` entry → returned with `created: false`
    /// 2. Generate a candidate and claim it in `shortToLong` (regenerate if
    ///    another writer claimed it first)
    /// 3. Claim `long_url` in `longToShort`; if another writer mapped it in
    ///    the meantime, their code is returned with `created: false`
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on store failures and
    /// [`AppError::Internal`] if no code could be generated or claimed.
    pub async fn shorten(&self, long_url: &str) -> Result<ShortLink, AppError> {
        if let Some(code) = self.store.get(Table::LongToShort, long_url).await? {
            return Ok(ShortLink::existing(long_url, code, CodeKind::Generated));
        }

        for _ in 0..CLAIM_ATTEMPTS {
            let code = self.generator.generate().await?;

            if !self
                .store
                .set_if_absent(Table::ShortToLong, &code, long_url)
                .await?
            {
                warn!("Code {} was claimed concurrently, regenerating", code);
                continue;
            }

            if self
                .store
                .set_if_absent(Table::LongToShort, long_url, &code)
                .await?
            {
                info!("Created short link {} -> {}", code, long_url);
                metrics::counter!("links_created_total", "kind" => "generated").increment(1);
                return Ok(ShortLink::created(long_url, code, CodeKind::Generated));
            }

            if let Some(winner) = self.store.get(Table::LongToShort, long_url).await? {
                warn!(
                    "{} was shortened concurrently as {}, dropping {}",
                    long_url, winner, code
                );
                return Ok(ShortLink::existing(long_url, winner, CodeKind::Generated));
            }
        }

        Err(AppError::internal(
            "Failed to claim a short code",
            json!({ "long_url": long_url }),
        ))
    }

    /// Registers `custom_code` as an alias for `long_url`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the alias is malformed or reserved.
    ///
    /// Returns [`AppError::AlreadyTaken`] if the alias exists as a custom alias
    /// or as a generated code; nothing is written in that case.
    pub async fn custom_shorten(
        &self,
        long_url: &str,
        custom_code: &str,
    ) -> Result<ShortLink, AppError> {
        validate_custom_code(custom_code)?;

        let taken = || AppError::AlreadyTaken {
            code: custom_code.to_string(),
        };

        if self
            .store
            .get(Table::CustomToLong, custom_code)
            .await?
            .is_some()
            || self
                .store
                .get(Table::ShortToLong, custom_code)
                .await?
                .is_some()
        {
            return Err(taken());
        }

        if !self
            .store
            .set_if_absent(Table::CustomToLong, custom_code, long_url)
            .await?
        {
            return Err(taken());
        }

        info!("Created custom alias {} -> {}", custom_code, long_url);
        metrics::counter!("links_created_total", "kind" => "custom").increment(1);

        Ok(ShortLink::created(long_url, custom_code, CodeKind::Custom))
    }

    /// Resolves a code to its long URL.
    ///
    /// Generated codes take precedence over custom aliases.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if neither table holds `code`.
    pub async fn redirect(&self, code: &str) -> Result<ShortLink, AppError> {
        if let Some(long_url) = self.store.get(Table::ShortToLong, code).await? {
            metrics::counter!("redirects_total", "result" => "generated").increment(1);
            return Ok(ShortLink::existing(long_url, code, CodeKind::Generated));
        }

        if let Some(long_url) = self.store.get(Table::CustomToLong, code).await? {
            metrics::counter!("redirects_total", "result" => "custom").increment(1);
            return Ok(ShortLink::existing(long_url, code, CodeKind::Custom));
        }

        metrics::counter!("redirects_total", "result" => "not_found").increment(1);
        Err(AppError::NotFound {
            code: code.to_string(),
        })
    }
}
