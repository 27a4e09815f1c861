pub mod facade;
pub mod models;
pub mod routes;
pub mod service;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use catalog_kernel::{settings::CatalogSettings, InitCtx, Module};
use serde_json::json;

use facade::CatalogFacade;
use service::{CatalogService, InMemoryCatalog};

/// Books module: exposes the catalog over HTTP
pub struct BooksModule {
    facade: CatalogFacade,
}

impl BooksModule {
    pub fn new(facade: CatalogFacade) -> Self {
        Self { facade }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            missing_availability = ?ctx.settings.catalog.missing_availability,
            empty_search = ?ctx.settings.catalog.empty_search,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.facade.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let not_found = json!({
            "description": "Book not found",
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                }
            }
        });
        let id_param = json!([{
            "name": "id",
            "in": "path",
            "required": true,
            "description": "Book identifier",
            "schema": { "type": "string" }
        }]);

        Some(json!({
            "paths": {
                "/{id}": {
                    "get": {
                        "summary": "Get a book",
                        "description": "Returns the book with the given identifier.",
                        "tags": ["Books"],
                        "parameters": id_param,
                        "responses": {
                            "200": {
                                "description": "Book found",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/Book" }
                                    }
                                }
                            },
                            "404": not_found
                        }
                    }
                },
                "/{id}/available": {
                    "get": {
                        "summary": "Check availability",
                        "description": "Returns whether the book can currently be lent out.",
                        "tags": ["Books"],
                        "parameters": id_param,
                        "responses": {
                            "200": {
                                "description": "Availability flag",
                                "content": {
                                    "application/json": {
                                        "schema": { "type": "boolean" }
                                    }
                                }
                            },
                            "404": not_found
                        }
                    }
                },
                "/{id}/availability": {
                    "put": {
                        "summary": "Update availability",
                        "description": "Sets the availability flag from a JSON boolean body.",
                        "tags": ["Books"],
                        "parameters": id_param,
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "type": "boolean" }
                                }
                            }
                        },
                        "responses": {
                            "200": { "description": "Availability updated" },
                            "400": {
                                "description": "Body is not a JSON boolean",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                                    }
                                }
                            },
                            "404": not_found
                        }
                    }
                },
                "/search": {
                    "get": {
                        "summary": "Search books",
                        "description": "Returns the books whose title contains the criterion.",
                        "tags": ["Books"],
                        "parameters": [{
                            "name": "criterion",
                            "in": "query",
                            "required": true,
                            "schema": { "type": "string" }
                        }],
                        "responses": {
                            "200": {
                                "description": "Matching books",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": { "$ref": "#/components/schemas/Book" }
                                        }
                                    }
                                }
                            },
                            "404": {
                                "description": "No books match the criterion",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Book": {
                        "type": "object",
                        "properties": {
                            "id": {
                                "type": "string",
                                "description": "Unique identifier for the book"
                            },
                            "title": {
                                "type": "string",
                                "description": "Title of the book"
                            },
                            "available": {
                                "type": "boolean",
                                "description": "Whether the book can currently be lent out"
                            }
                        },
                        "required": ["id", "title", "available"]
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Build the in-memory catalog, seeded from `seed_path` when configured
pub async fn load_catalog(settings: &CatalogSettings) -> anyhow::Result<InMemoryCatalog> {
    let catalog = match &settings.seed_path {
        Some(path) => InMemoryCatalog::from_json_file(path).await?,
        None => InMemoryCatalog::new(),
    };
    tracing::info!(
        books = catalog.len().await,
        seed = ?settings.seed_path,
        "catalog loaded"
    );
    Ok(catalog)
}

/// Create the books module on top of the given collaborator
pub fn create_module(
    catalog: Arc<dyn CatalogService>,
    settings: &CatalogSettings,
) -> Arc<dyn Module> {
    Arc::new(BooksModule::new(CatalogFacade::from_settings(
        catalog, settings,
    )))
}
