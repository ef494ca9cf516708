//! GPU configuration selection + context provisioning.
//!
//! This module is responsible for:
//! - deriving the required capability profile from the surface config
//! - choosing a platform configuration that matches it exactly
//! - creating and destroying the single context owned by a surface

mod candidate;
mod context;
mod error;
mod init;
mod matcher;
mod profile;

pub use candidate::{CoarseFilter, ConfigAttributes, ConfigCandidate, RenderableApi};
pub use context::{
    ContextAttribs, ContextFactory, ContextProvisioner, RenderContext, API_VERSION, ATTRIB_NONE,
    CONTEXT_CLIENT_VERSION,
};
pub use error::{ErrorCode, Result, SurfaceError};
pub use init::SurfaceConfig;
pub use matcher::{select_configuration, CapabilityMatcher, ConfigSource};
pub use profile::CapabilityProfile;
