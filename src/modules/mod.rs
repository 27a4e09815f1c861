pub mod books;

use std::sync::Arc;

use catalog_kernel::{settings::Settings, ModuleRegistry};

/// Register all service modules with the registry
pub async fn register_all(registry: &mut ModuleRegistry, settings: &Settings) -> anyhow::Result<()> {
    let catalog = books::load_catalog(&settings.catalog).await?;
    registry.register(books::create_module(Arc::new(catalog), &settings.catalog))?;
    Ok(())
}
