use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use winit::dpi::LogicalSize;

use lumo_surface::device::SurfaceConfig;
use lumo_surface::logging::LoggingConfig;

/// Host configuration.
#[derive(Debug, Clone)]
pub struct HostConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub surface: SurfaceConfig,
    /// Explicit engine library; `None` defers to `LUMO_ENGINE_LIB` or the default name.
    pub engine_library: Option<PathBuf>,
    /// Run a continuous session once the surface is sized.
    pub continuous: bool,
    /// Fixed dpi; otherwise derived from the window scale factor.
    pub dpi_override: Option<i32>,
    pub logging: LoggingConfig,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            title: "lumo".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
            surface: SurfaceConfig::default(),
            engine_library: None,
            continuous: false,
            dpi_override: None,
            logging: LoggingConfig::default(),
        }
    }
}

impl HostConfig {
    /// Defaults overridden by `LUMO_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(title) = var("LUMO_TITLE") {
            config.title = title;
        }
        if let Some(size) = var("LUMO_SIZE") {
            let (w, h) = parse_size(&size).with_context(|| format!("LUMO_SIZE={size}"))?;
            config.initial_size = LogicalSize::new(w, h);
        }
        if let Some(v) = var("LUMO_TRANSLUCENT") {
            config.surface.translucent = parse_flag("LUMO_TRANSLUCENT", &v)?;
        }
        if let Some(v) = var("LUMO_DEPTH_BITS") {
            config.surface.depth_bits = v.parse().with_context(|| format!("LUMO_DEPTH_BITS={v}"))?;
        }
        if let Some(v) = var("LUMO_STENCIL_BITS") {
            config.surface.stencil_bits =
                v.parse().with_context(|| format!("LUMO_STENCIL_BITS={v}"))?;
        }
        if let Some(root) = var("LUMO_STORAGE_ROOT") {
            config.surface.storage_root = root;
        }
        if let Some(v) = var("LUMO_VERBOSE_CONFIGS") {
            config.surface.verbose_configs = parse_flag("LUMO_VERBOSE_CONFIGS", &v)?;
        }
        if let Some(v) = var("LUMO_DPI") {
            let dpi: i32 = v.parse().with_context(|| format!("LUMO_DPI={v}"))?;
            config.dpi_override = Some(dpi);
            config.surface.dpi = dpi;
        }
        if let Some(v) = var("LUMO_CONTINUOUS") {
            config.continuous = parse_flag("LUMO_CONTINUOUS", &v)?;
        }
        if let Some(path) = var("LUMO_ENGINE_LIB").filter(|p| !p.is_empty()) {
            config.engine_library = Some(PathBuf::from(path));
        }
        if let Some(filter) = var("LUMO_LOG") {
            config.logging.env_filter = Some(filter);
        }

        config
            .surface
            .validate()
            .context("invalid surface configuration")?;
        Ok(config)
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => bail!("{key}: expected a boolean, got {other:?}"),
    }
}

/// Parses "WIDTHxHEIGHT".
fn parse_size(value: &str) -> Result<(f64, f64)> {
    let (w, h) = value
        .split_once(['x', 'X'])
        .context("expected WIDTHxHEIGHT")?;
    let w: f64 = w.trim().parse().context("invalid width")?;
    let h: f64 = h.trim().parse().context("invalid height")?;
    if w <= 0.0 || h <= 0.0 {
        bail!("size must be positive");
    }
    Ok((w, h))
}
