//! Catalog collaborator: the trait the facade consumes and an in-memory
//! implementation of it.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;

use super::models::{Book, BookId};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("no book with id '{0}'")]
    BookNotFound(BookId),

    #[error("no books match '{0}'")]
    NoMatches(String),
}

/// Storage and search over the catalog.
#[async_trait]
pub trait CatalogService: Send + Sync {
    async fn find_by_id(&self, id: &BookId) -> Result<Book, CatalogError>;

    async fn update_availability(&self, id: &BookId, available: bool) -> Result<(), CatalogError>;

    /// Books whose searchable fields match `criterion`, in a stable order.
    async fn find_by_criterion(&self, criterion: &str) -> Result<Vec<Book>, CatalogError>;
}

/// Books held in process memory, ordered by id.
///
/// Titles match case-insensitively by substring, ids match exactly, and a
/// blank criterion matches everything.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    books: RwLock<BTreeMap<BookId, Book>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later entries replace earlier ones with the same id.
    pub fn with_books(books: impl IntoIterator<Item = Book>) -> Self {
        let books = books
            .into_iter()
            .map(|book| (book.id.clone(), book))
            .collect();
        Self {
            books: RwLock::new(books),
        }
    }

    /// Load a JSON array of books. Duplicate ids are rejected.
    pub async fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read seed file {}", path.display()))?;
        let books: Vec<Book> = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse seed file {}", path.display()))?;

        let mut seen = BTreeMap::new();
        for book in books {
            if seen.contains_key(&book.id) {
                anyhow::bail!(
                    "seed file {} lists book '{}' more than once",
                    path.display(),
                    book.id
                );
            }
            seen.insert(book.id.clone(), book);
        }

        Ok(Self {
            books: RwLock::new(seen),
        })
    }

    pub async fn len(&self) -> usize {
        self.books.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.books.read().await.is_empty()
    }
}

/// `needle_lower` is `needle` already lowercased.
fn matches(book: &Book, needle: &str, needle_lower: &str) -> bool {
    needle.is_empty()
        || book.id.as_str() == needle
        || book.title.to_lowercase().contains(needle_lower)
}

#[async_trait]
impl CatalogService for InMemoryCatalog {
    async fn find_by_id(&self, id: &BookId) -> Result<Book, CatalogError> {
        self.books
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| CatalogError::BookNotFound(id.clone()))
    }

    async fn update_availability(&self, id: &BookId, available: bool) -> Result<(), CatalogError> {
        let mut books = self.books.write().await;
        let book = books
            .get_mut(id)
            .ok_or_else(|| CatalogError::BookNotFound(id.clone()))?;
        book.available = available;
        Ok(())
    }

    async fn find_by_criterion(&self, criterion: &str) -> Result<Vec<Book>, CatalogError> {
        let needle = criterion.trim();
        let needle_lower = needle.to_lowercase();
        Ok(self
            .books
            .read()
            .await
            .values()
            .filter(|book| matches(book, needle, &needle_lower))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> InMemoryCatalog {
        InMemoryCatalog::with_books([
            Book::new("2", "El amor en los tiempos del cólera", false),
            Book::new("1", "Cien años de soledad", true),
            Book::new("3", "Crónica de una muerte anunciada", true),
        ])
    }

    fn ids(books: &[Book]) -> Vec<&str> {
        books.iter().map(|book| book.id.as_str()).collect()
    }

    #[tokio::test]
    async fn find_by_id_returns_the_book() {
        let book = catalog().find_by_id(&BookId::new("1")).await.unwrap();
        assert_eq!(book.title, "Cien años de soledad");
    }

    #[tokio::test]
    async fn find_by_id_unknown_is_not_found() {
        let err = catalog().find_by_id(&BookId::new("9")).await.unwrap_err();
        assert_eq!(err, CatalogError::BookNotFound(BookId::new("9")));
    }

    #[tokio::test]
    async fn update_availability_changes_only_the_flag() {
        let catalog = catalog();
        let id = BookId::new("2");
        catalog.update_availability(&id, true).await.unwrap();

        let book = catalog.find_by_id(&id).await.unwrap();
        assert!(book.available);
        assert_eq!(book.id, id);
        assert_eq!(book.title, "El amor en los tiempos del cólera");
    }

    #[tokio::test]
    async fn update_availability_unknown_is_not_found() {
        let err = catalog()
            .update_availability(&BookId::new("9"), true)
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::BookNotFound(_)));
    }

    #[tokio::test]
    async fn blank_criterion_returns_everything_in_id_order() {
        let catalog = catalog();
        assert_eq!(ids(&catalog.find_by_criterion("").await.unwrap()), ["1", "2", "3"]);
        assert_eq!(ids(&catalog.find_by_criterion("  ").await.unwrap()), ["1", "2", "3"]);
    }

    #[tokio::test]
    async fn criterion_matches_title_case_insensitively() {
        let found = catalog().find_by_criterion("CRÓNICA").await.unwrap();
        assert_eq!(ids(&found), ["3"]);

        let found = catalog().find_by_criterion("cien").await.unwrap();
        assert_eq!(ids(&found), ["1"]);
    }

    #[tokio::test]
    async fn criterion_matches_exact_id() {
        let found = catalog().find_by_criterion("2").await.unwrap();
        assert_eq!(ids(&found), ["2"]);
    }

    #[tokio::test]
    async fn id_match_keeps_case_while_title_match_ignores_it() {
        let catalog = InMemoryCatalog::with_books([
            Book::new("ISBN-A", "Pedro Páramo", true),
            Book::new("isbn-b", "El llano en llamas", true),
        ]);

        let found = catalog.find_by_criterion("  ISBN-A ").await.unwrap();
        assert_eq!(ids(&found), ["ISBN-A"]);

        assert!(catalog.find_by_criterion("isbn-a").await.unwrap().is_empty());

        let found = catalog.find_by_criterion(" PEDRO ").await.unwrap();
        assert_eq!(ids(&found), ["ISBN-A"]);
    }

    #[tokio::test]
    async fn no_match_is_an_empty_list() {
        let found = catalog().find_by_criterion("Rayuela").await.unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn seed_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("books.json");
        std::fs::write(
            &path,
            r#"[{"id": "1", "title": "Cien años de soledad", "available": true}]"#,
        )
        .unwrap();

        let catalog = InMemoryCatalog::from_json_file(&path).await.unwrap();
        assert_eq!(catalog.len().await, 1);
        assert!(catalog.find_by_id(&BookId::new("1")).await.unwrap().available);
    }

    #[tokio::test]
    async fn seed_file_with_duplicate_ids_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("books.json");
        std::fs::write(
            &path,
            r#"[
                {"id": "1", "title": "Cien años de soledad", "available": true},
                {"id": "1", "title": "Otra", "available": false}
            ]"#,
        )
        .unwrap();

        let err = InMemoryCatalog::from_json_file(&path).await.unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[tokio::test]
    async fn missing_seed_file_reports_path() {
        let err = InMemoryCatalog::from_json_file(Path::new("/nonexistent/books.json"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/books.json"));
    }
}
