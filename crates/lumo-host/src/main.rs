mod config;
mod gl;
mod input;
mod runtime;

use anyhow::{Context, Result};

use lumo_native::NativeEngine;
use lumo_surface::logging::init_logging;

use crate::config::HostConfig;

fn main() -> Result<()> {
    let config = HostConfig::from_env().context("invalid LUMO_* configuration")?;
    init_logging(config.logging.clone());

    log::info!("starting {} ({:?})", config.title, config.initial_size);

    let engine = NativeEngine::load_default(config.engine_library.as_deref().map(|p| p.as_os_str()))
        .context("failed to load the native engine")?;
    if !engine.has_menu_button() {
        log::debug!("menu key will not reach the engine");
    }

    runtime::run(config, engine)
}
