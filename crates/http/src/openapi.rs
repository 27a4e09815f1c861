//! Merges the OpenAPI fragments contributed by modules into one document.

use catalog_kernel::{settings::ServerSettings, ModuleRegistry};
use serde_json::json;

pub const API_TITLE: &str = "Book Catalog API";
pub const API_VERSION: &str = "1.0.0";

/// Build the full OpenAPI document.
///
/// Module paths are prefixed with the module's mount path and module schemas
/// are merged into `components.schemas`.
pub fn build_openapi(registry: &ModuleRegistry, server: &ServerSettings) -> serde_json::Value {
    let mut openapi_spec = json!({
        "openapi": "3.1.0",
        "info": {
            "title": API_TITLE,
            "version": API_VERSION,
            "description": "Lookup, availability and search over the book catalog"
        },
        "paths": {},
        "components": {
            "schemas": {}
        }
    });

    openapi_spec["components"]["schemas"]["ErrorResponse"] = json!({
        "type": "object",
        "properties": {
            "error": {
                "type": "object",
                "properties": {
                    "code": { "type": "string" },
                    "message": { "type": "string" },
                    "details": { "type": "array", "items": { "type": "object" } },
                    "trace_id": { "type": "string" },
                    "timestamp": { "type": "string" }
                },
                "required": ["code", "message", "trace_id", "timestamp"]
            }
        },
        "required": ["error"]
    });

    openapi_spec["paths"]["/healthz"] = json!({
        "get": {
            "summary": "Health check",
            "responses": {
                "200": {
                    "description": "OK",
                    "content": {
                        "text/plain": {
                            "schema": { "type": "string" }
                        }
                    }
                }
            }
        }
    });

    for module in registry.modules() {
        let Some(module_spec) = module.openapi() else {
            continue;
        };
        let mount_path = server.mount_path(module.name());

        if let Some(paths) = module_spec.get("paths").and_then(|p| p.as_object()) {
            for (path, path_item) in paths {
                let prefixed_path = format!("{}{}", mount_path, path);
                openapi_spec["paths"][prefixed_path] = path_item.clone();
            }
        }

        if let Some(schemas) = module_spec
            .get("components")
            .and_then(|c| c.get("schemas"))
            .and_then(|s| s.as_object())
        {
            for (schema_name, schema_def) in schemas {
                openapi_spec["components"]["schemas"][schema_name] = schema_def.clone();
            }
        }
    }

    openapi_spec
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use catalog_kernel::Module;
    use std::sync::Arc;

    struct ShelfModule;

    #[async_trait]
    impl Module for ShelfModule {
        fn name(&self) -> &'static str {
            "shelves"
        }

        fn openapi(&self) -> Option<serde_json::Value> {
            Some(json!({
                "paths": {
                    "/{id}": { "get": { "responses": { "200": { "description": "OK" } } } }
                },
                "components": {
                    "schemas": { "Shelf": { "type": "object" } }
                }
            }))
        }
    }

    struct SilentModule;

    #[async_trait]
    impl Module for SilentModule {
        fn name(&self) -> &'static str {
            "silent"
        }
    }

    fn registry() -> ModuleRegistry {
        let mut registry = ModuleRegistry::new();
        registry.register(Arc::new(ShelfModule)).unwrap();
        registry.register(Arc::new(SilentModule)).unwrap();
        registry
    }

    #[test]
    fn module_paths_are_prefixed_with_mount_path() {
        let server = ServerSettings {
            base_path: "/api".to_string(),
            ..ServerSettings::default()
        };
        let spec = build_openapi(&registry(), &server);

        assert!(spec["paths"]["/api/shelves/{id}"].is_object());
        assert!(spec["paths"]["/shelves/{id}"].is_null());
        assert!(spec["paths"]["/healthz"].is_object());
    }

    #[test]
    fn module_schemas_are_merged() {
        let spec = build_openapi(&registry(), &ServerSettings::default());
        let schemas = spec["components"]["schemas"].as_object().unwrap();

        assert!(schemas.contains_key("Shelf"));
        assert!(schemas.contains_key("ErrorResponse"));
    }
}
