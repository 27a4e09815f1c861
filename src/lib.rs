//! Book catalog service
//!
//! Wires the catalog modules into the kernel registry and runs the HTTP server.

pub mod modules;

use anyhow::Context;
use catalog_kernel::{settings::Settings, InitCtx, ModuleRegistry};

pub use modules::books;

/// Build a registry holding every service module
pub async fn build_registry(settings: &Settings) -> anyhow::Result<ModuleRegistry> {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, settings)
        .await
        .context("failed to register modules")?;
    Ok(registry)
}

/// Run the service until a shutdown signal arrives
pub async fn serve(settings: &Settings) -> anyhow::Result<()> {
    let registry = build_registry(settings).await?;
    let ctx = InitCtx { settings };

    registry.init_modules(&ctx).await?;
    registry.start_modules(&ctx).await?;

    let served = catalog_http::start_server(&registry, settings).await;

    // Stop modules even when the server failed, then report the first error
    let stopped = registry.stop_modules().await;
    served?;
    stopped
}
