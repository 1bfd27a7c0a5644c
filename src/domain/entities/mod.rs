//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without storage concerns.
//!
//! # Entity Types
//!
//! - [`ShortLink`] - A resolved long URL ↔ code mapping
//! - [`Table`] - The three logical link tables
//! - [`Corpus`] - A word list used to build generated codes

pub mod corpus;
pub mod link;
pub mod table;

pub use corpus::{Corpus, CorpusError, code_space};
pub use link::{CodeKind, ShortLink};
pub use table::Table;
