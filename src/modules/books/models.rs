use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(String);

impl BookId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for BookId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for BookId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A book as exposed by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Unique identifier, fixed at creation
    pub id: BookId,
    /// Title of the book
    pub title: String,
    /// Whether the book can currently be lent out
    pub available: bool,
}

impl Book {
    pub fn new(id: impl Into<BookId>, title: impl Into<String>, available: bool) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            available,
        }
    }
}

/// Query string of `GET /search`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchParams {
    pub criterion: String,
}
