//! Route table of the books module.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use catalog_http::error::AppError;

use super::facade::CatalogFacade;
use super::models::{Book, BookId, SearchParams};
use super::service::CatalogError;

impl From<CatalogError> for AppError {
    fn from(error: CatalogError) -> Self {
        let code = match &error {
            CatalogError::BookNotFound(_) => "book_not_found",
            CatalogError::NoMatches(_) => "no_matches",
        };
        AppError::not_found_with_code(code, error.to_string())
    }
}

/// Method/path pairs served by the module, relative to its mount point.
pub fn router(facade: CatalogFacade) -> Router {
    Router::new()
        .route("/search", get(search_books))
        .route("/{id}", get(get_book))
        .route("/{id}/available", get(is_available))
        .route("/{id}/availability", put(set_availability))
        .with_state(facade)
}

async fn get_book(
    State(facade): State<CatalogFacade>,
    Path(id): Path<BookId>,
) -> Result<Json<Book>, AppError> {
    Ok(Json(facade.get_book(&id).await?))
}

async fn is_available(
    State(facade): State<CatalogFacade>,
    Path(id): Path<BookId>,
) -> Result<Json<bool>, AppError> {
    Ok(Json(facade.is_available(&id).await?))
}

async fn set_availability(
    State(facade): State<CatalogFacade>,
    Path(id): Path<BookId>,
    payload: Result<Json<bool>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(available) = payload?;
    facade.set_availability(&id, available).await?;
    Ok(StatusCode::OK)
}

async fn search_books(
    State(facade): State<CatalogFacade>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Vec<Book>>, AppError> {
    let Query(params) = params?;
    let found = facade.search(&params.criterion).await?;
    tracing::debug!(criterion = %params.criterion, hits = found.len(), "catalog search");
    Ok(Json(found))
}
