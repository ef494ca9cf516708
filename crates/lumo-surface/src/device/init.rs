use super::{CapabilityProfile, Result, SurfaceError};

/// Initialization parameters for a render surface.
///
/// Fixed for the lifetime of a `RenderLoopController`; the derived profile is
/// reused on every surface re-creation.
#[derive(Debug, Clone)]
pub struct SurfaceConfig {
    /// Request a surface with an alpha channel (RGBA8888 instead of RGB565).
    pub translucent: bool,

    /// Minimum depth buffer bits.
    pub depth_bits: u8,

    /// Minimum stencil buffer bits.
    pub stencil_bits: u8,

    /// Display density handed to the engine on initialize.
    pub dpi: i32,

    /// Engine-private storage root, passed through unmodified.
    pub storage_root: String,

    /// Dump every candidate configuration while selecting.
    ///
    /// Ignored in release builds.
    pub verbose_configs: bool,
}

impl SurfaceConfig {
    /// Profile the matcher selects against.
    pub fn profile(&self) -> CapabilityProfile {
        CapabilityProfile::new(self.translucent, self.depth_bits, self.stencil_bits)
    }

    /// Rejects values the engine boundary cannot carry.
    pub fn validate(&self) -> Result<()> {
        if self.storage_root.contains('\0') {
            return Err(SurfaceError::InvalidConfig(
                "storage root contains a NUL byte".to_string(),
            ));
        }
        if self.dpi <= 0 {
            return Err(SurfaceError::InvalidConfig(format!("dpi must be positive, got {}", self.dpi)));
        }
        Ok(())
    }
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            translucent: false,
            depth_bits: 16,
            stencil_bits: 0,
            dpi: 160,
            storage_root: String::new(),
            verbose_configs: false,
        }
    }
}
