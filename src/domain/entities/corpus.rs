//! Word corpora used to build generated short codes.

use rand::Rng;
use rand::seq::IndexedRandom;
use thiserror::Error;

/// Errors raised while building a corpus.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("word list '{0}' contains no words")]
    Empty(String),

    #[error("failed to read word list '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// One ordered word list. Each generated code takes exactly one word from
/// every configured corpus.
///
/// A corpus is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corpus {
    name: String,
    words: Vec<String>,
}

impl Corpus {
    /// Builds a corpus from individual words.
    ///
    /// Words are trimmed and blank entries are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`CorpusError::Empty`] if no word remains.
    pub fn new<I, S>(name: impl Into<String>, words: I) -> Result<Self, CorpusError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let name = name.into();
        let words: Vec<String> = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_string())
            .filter(|w| !w.is_empty())
            .collect();

        if words.is_empty() {
            return Err(CorpusError::Empty(name));
        }

        Ok(Self { name, words })
    }

    /// Parses a newline-delimited word list.
    pub fn parse(name: impl Into<String>, text: &str) -> Result<Self, CorpusError> {
        Self::new(name, text.lines())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Picks one word uniformly at random.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        // `new` rejects empty corpora, so the fallback is unreachable.
        self.words.choose(rng).map(String::as_str).unwrap_or_default()
    }
}

/// Number of distinct codes the corpora can produce, saturating at `u128::MAX`.
pub fn code_space(corpora: &[Corpus]) -> u128 {
    corpora
        .iter()
        .fold(1u128, |acc, c| acc.saturating_mul(c.len() as u128))
}
