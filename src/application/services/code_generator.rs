//! Word-based short code generation.

use std::sync::Arc;

use crate::domain::entities::{Corpus, Table, code_space};
use crate::domain::repositories::KeyValueStore;
use crate::error::AppError;
use crate::utils::code_generator::random_suffix;
use serde_json::json;
use tracing::{debug, warn};

/// Default number of plain word codes tried before switching to suffixed codes.
pub const DEFAULT_MAX_ATTEMPTS: usize = 10;

/// Builds short codes by concatenating one random word from each corpus.
///
/// Candidates are checked against the short table only; custom aliases are
/// not consulted.
///
/// # Collision Handling
///
/// - Up to `max_attempts` plain word codes are tried
/// - Then up to `max_attempts` word codes with a 4-character random suffix
/// - Then generation fails with [`AppError::Internal`]
pub struct CodeGenerator {
    corpora: Vec<Corpus>,
    store: Arc<dyn KeyValueStore>,
    max_attempts: usize,
}

impl CodeGenerator {
    /// Creates a generator over `corpora`, kept in the given order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `corpora` is empty.
    pub fn new(corpora: Vec<Corpus>, store: Arc<dyn KeyValueStore>) -> Result<Self, AppError> {
        if corpora.is_empty() {
            return Err(AppError::bad_request(
                "At least one word list is required",
                json!({}),
            ));
        }

        Ok(Self {
            corpora,
            store,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        })
    }

    /// Overrides the per-phase attempt limit (minimum 1).
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn corpora(&self) -> &[Corpus] {
        &self.corpora
    }

    /// Number of distinct plain word codes.
    pub fn code_space(&self) -> u128 {
        code_space(&self.corpora)
    }

    /// Draws one word per corpus and joins them in corpus order.
    fn candidate(&self) -> String {
        let mut rng = rand::rng();
        self.corpora
            .iter()
            .map(|corpus| corpus.choose(&mut rng))
            .collect()
    }

    /// Returns a code that was absent from the short table when checked.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] if a lookup fails and
    /// [`AppError::Internal`] once both phases are exhausted.
    pub async fn generate(&self) -> Result<String, AppError> {
        for _ in 0..self.max_attempts {
            let code = self.candidate();
            if self.is_free(&code).await? {
                return Ok(code);
            }
            debug!("Generated code {} already exists, retrying", code);
        }

        warn!(
            "{} word codes collided (code space: {}), falling back to suffixed codes",
            self.max_attempts,
            self.code_space()
        );

        for _ in 0..self.max_attempts {
            let code = format!("{}{}", self.candidate(), random_suffix()?);
            if self.is_free(&code).await? {
                return Ok(code);
            }
            debug!("Suffixed code {} already exists, retrying", code);
        }

        Err(AppError::internal(
            "Failed to generate unique code",
            json!({ "reason": "Too many collisions" }),
        ))
    }

    async fn is_free(&self, code: &str) -> Result<bool, AppError> {
        Ok(self.store.get(Table::ShortToLong, code).await?.is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{MockKeyValueStore, StoreError};
    use crate::infrastructure::store::MemoryStore;

    const CODE_SPACE: [&str; 4] = ["redcat", "reddog", "bluecat", "bluedog"];

    fn test_corpora() -> Vec<Corpus> {
        vec![
            Corpus::new("colors", ["red", "blue"]).unwrap(),
            Corpus::new("animals", ["cat", "dog"]).unwrap(),
        ]
    }

    #[tokio::test]
    async fn test_generate_draws_from_code_space() {
        let store = Arc::new(MemoryStore::new());
        let generator = CodeGenerator::new(test_corpora(), store).unwrap();

        for _ in 0..20 {
            let code = generator.generate().await.unwrap();
            assert!(CODE_SPACE.contains(&code.as_str()), "unexpected code {}", code);
        }
        assert_eq!(generator.code_space(), 4);
    }

    #[tokio::test]
    async fn test_generate_skips_existing_codes() {
        let store = Arc::new(MemoryStore::new());
        for code in ["redcat", "reddog", "bluecat"] {
            store
                .set(Table::ShortToLong, code, "https://taken.example")
                .await
                .unwrap();
        }

        let generator = CodeGenerator::new(test_corpora(), store)
            .unwrap()
            .with_max_attempts(500);

        for _ in 0..10 {
            assert_eq!(generator.generate().await.unwrap(), "bluedog");
        }
    }

    #[tokio::test]
    async fn test_generate_ignores_custom_table() {
        let store = Arc::new(MemoryStore::new());
        for code in CODE_SPACE {
            store
                .set(Table::CustomToLong, code, "https://custom.example")
                .await
                .unwrap();
        }

        let generator = CodeGenerator::new(test_corpora(), store).unwrap();
        let code = generator.generate().await.unwrap();

        assert!(CODE_SPACE.contains(&code.as_str()));
    }

    #[tokio::test]
    async fn test_generate_falls_back_to_suffix_when_space_exhausted() {
        let store = Arc::new(MemoryStore::new());
        for code in CODE_SPACE {
            store
                .set(Table::ShortToLong, code, "https://taken.example")
                .await
                .unwrap();
        }

        let generator = CodeGenerator::new(test_corpora(), store)
            .unwrap()
            .with_max_attempts(3);
        let code = generator.generate().await.unwrap();

        let base = CODE_SPACE
            .iter()
            .find(|word_code| code.starts_with(*word_code))
            .expect("suffixed code keeps a word prefix");
        assert_eq!(code.len(), base.len() + 4);
    }

    #[tokio::test]
    async fn test_generate_gives_up_after_both_phases() {
        let mut mock_store = MockKeyValueStore::new();

        mock_store
            .expect_get()
            .withf(|table, _| *table == Table::ShortToLong)
            .times(6)
            .returning(|_, _| Ok(Some("https://taken.example".to_string())));

        let generator = CodeGenerator::new(test_corpora(), Arc::new(mock_store))
            .unwrap()
            .with_max_attempts(3);

        let result = generator.generate().await;

        assert!(matches!(result.unwrap_err(), AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_generate_propagates_store_errors() {
        let mut mock_store = MockKeyValueStore::new();

        mock_store
            .expect_get()
            .times(1)
            .returning(|_, _| Err(StoreError::Connection("refused".into())));

        let generator = CodeGenerator::new(test_corpora(), Arc::new(mock_store)).unwrap();

        let result = generator.generate().await;

        assert!(matches!(result.unwrap_err(), AppError::StoreUnavailable(_)));
    }

    #[test]
    fn test_new_requires_corpora() {
        let store = Arc::new(MemoryStore::new());

        assert!(CodeGenerator::new(Vec::new(), store).is_err());
    }
}
