//! Link entity representing a shortened URL mapping.

/// Which namespace a short code belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeKind {
    /// Built from the configured word corpora.
    Generated,
    /// Chosen by the caller on `/customshorten`.
    Custom,
}

impl CodeKind {
    /// Label used in logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Generated => "generated",
            Self::Custom => "custom",
        }
    }
}

/// A resolved mapping between a long URL and its short code.
///
/// `created` is `false` when an existing record was returned instead of
/// writing a new one, which lets handlers answer `200` rather than `201`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortLink {
    pub long_url: String,
    pub code: String,
    pub kind: CodeKind,
    pub created: bool,
}

impl ShortLink {
    /// A freshly written link.
    pub fn created(long_url: impl Into<String>, code: impl Into<String>, kind: CodeKind) -> Self {
        Self {
            long_url: long_url.into(),
            code: code.into(),
            kind,
            created: true,
        }
    }

    /// A link that was already on record.
    pub fn existing(long_url: impl Into<String>, code: impl Into<String>, kind: CodeKind) -> Self {
        Self {
            long_url: long_url.into(),
            code: code.into(),
            kind,
            created: false,
        }
    }
}
