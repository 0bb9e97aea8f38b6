//! Filter to keep rows whose categorical column equals a chosen value.
//!
//! Backs the genre, cast and language axes. Matching is exact and
//! case-sensitive, the same strings the picker offers.

use crate::traits::Filter;
use data_loader::{MovieRecord, TextColumn};

/// Keeps rows where `column` equals `value` exactly.
pub struct ColumnMatchFilter {
    column: TextColumn,
    value: String,
    name: String,
}

impl ColumnMatchFilter {
    pub fn new(column: TextColumn, value: impl Into<String>) -> Self {
        Self {
            column,
            value: value.into(),
            name: format!("ColumnMatchFilter({})", column.header()),
        }
    }

    pub fn genre(value: impl Into<String>) -> Self {
        Self::new(TextColumn::Genre, value)
    }

    pub fn cast_member(value: impl Into<String>) -> Self {
        Self::new(TextColumn::CastMember, value)
    }

    pub fn language(value: impl Into<String>) -> Self {
        Self::new(TextColumn::Language, value)
    }

    pub fn column(&self) -> TextColumn {
        self.column
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl Filter for ColumnMatchFilter {
    fn name(&self) -> &str {
        &self.name
    }

    fn matches(&self, record: &MovieRecord) -> bool {
        self.column.value_of(record) == Some(self.value.as_str())
    }
}
