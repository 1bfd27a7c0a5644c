//! Loading word corpora from newline-delimited files.

use crate::domain::entities::{Corpus, CorpusError};
use std::path::Path;
use tracing::info;

/// Reads one corpus file.
///
/// # Errors
///
/// Returns [`CorpusError::Io`] if the file cannot be read and
/// [`CorpusError::Empty`] if it holds no words.
pub async fn load_corpus(path: &Path) -> Result<Corpus, CorpusError> {
    let name = path.display().to_string();
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CorpusError::Io {
            path: name.clone(),
            source,
        })?;

    let corpus = Corpus::parse(name, &text)?;
    info!("Loaded {} words from {}", corpus.len(), corpus.name());
    Ok(corpus)
}

/// Reads every corpus file, keeping the configured order.
pub async fn load_corpora<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<Corpus>, CorpusError> {
    let mut corpora = Vec::with_capacity(paths.len());
    for path in paths {
        corpora.push(load_corpus(path.as_ref()).await?);
    }
    Ok(corpora)
}
