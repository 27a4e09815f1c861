use std::sync::Arc;

use catalog_kernel::settings::{CatalogSettings, EmptySearch, MissingAvailability};

use super::models::{Book, BookId};
use super::service::{CatalogError, CatalogService};

/// Translates catalog requests into collaborator calls.
///
/// Holds nothing but the collaborator handle and the two policies that decide
/// how absence is reported.
#[derive(Clone)]
pub struct CatalogFacade {
    catalog: Arc<dyn CatalogService>,
    missing_availability: MissingAvailability,
    empty_search: EmptySearch,
}

impl CatalogFacade {
    pub fn new(
        catalog: Arc<dyn CatalogService>,
        missing_availability: MissingAvailability,
        empty_search: EmptySearch,
    ) -> Self {
        Self {
            catalog,
            missing_availability,
            empty_search,
        }
    }

    pub fn from_settings(catalog: Arc<dyn CatalogService>, settings: &CatalogSettings) -> Self {
        Self::new(catalog, settings.missing_availability, settings.empty_search)
    }

    pub async fn get_book(&self, id: &BookId) -> Result<Book, CatalogError> {
        self.catalog.find_by_id(id).await
    }

    pub async fn is_available(&self, id: &BookId) -> Result<bool, CatalogError> {
        match self.catalog.find_by_id(id).await {
            Ok(book) => Ok(book.available),
            Err(CatalogError::BookNotFound(_))
                if self.missing_availability == MissingAvailability::Unavailable =>
            {
                tracing::debug!(book_id = %id, "unknown book reported as unavailable");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    pub async fn set_availability(&self, id: &BookId, available: bool) -> Result<(), CatalogError> {
        self.catalog.update_availability(id, available).await?;
        tracing::info!(book_id = %id, available, "availability updated");
        Ok(())
    }

    pub async fn search(&self, criterion: &str) -> Result<Vec<Book>, CatalogError> {
        // An explicit no-match signal from the collaborator always propagates;
        // the policy only decides what an empty result means.
        let found = self.catalog.find_by_criterion(criterion).await?;

        if found.is_empty() && self.empty_search == EmptySearch::NotFound {
            return Err(CatalogError::NoMatches(criterion.to_string()));
        }
        Ok(found)
    }
}
