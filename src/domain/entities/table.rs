//! Logical tables of the link store.

use std::fmt;

/// One of the three string-to-string tables links are stored in.
///
/// The physical names are shared with existing deployments and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    /// Long URL → generated code.
    LongToShort,
    /// Generated code → long URL.
    ShortToLong,
    /// Custom alias → long URL.
    CustomToLong,
}

impl Table {
    pub const ALL: [Table; 3] = [Table::LongToShort, Table::ShortToLong, Table::CustomToLong];

    /// Name of the backing hash in the store.
    pub fn name(&self) -> &'static str {
        match self {
            Self::LongToShort => "longToShort",
            Self::ShortToLong => "shortToLong",
            Self::CustomToLong => "customToLong",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
