use thiserror::Error;

use super::CapabilityProfile;

/// Result type for surface and context operations.
pub type Result<T> = std::result::Result<T, SurfaceError>;

/// Raw error code reported by the platform GPU layer (e.g. an EGL error).
pub type ErrorCode = u32;

/// Errors raised while negotiating a surface or driving the render loop.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// No platform configuration passed the coarse renderability filter.
    #[error("no GPU configuration matches the coarse filter")]
    ConfigurationUnavailable,

    /// Candidates exist, but none matches the requested color profile exactly.
    #[error("no GPU configuration matches {profile} exactly")]
    ExactMatchNotFound { profile: CapabilityProfile },

    /// The platform reported one or more error codes while creating the context.
    #[error("context creation failed (error codes: {})", format_codes(.codes))]
    ContextCreationFailed { codes: Vec<ErrorCode> },

    /// A context teardown was requested without an active context.
    ///
    /// Logged and swallowed by the provisioner; never fatal.
    #[error("no active context to destroy")]
    RedundantTeardown,

    /// The event is not valid in the current surface state.
    #[error("cannot handle {event} while {state}")]
    InvalidTransition { state: String, event: String },

    /// Another presentation loop owns the buffer swap.
    #[error("presentation is owned by the {0} loop")]
    PresentationBusy(&'static str),

    /// A platform primitive (enumeration, surface, swap) failed.
    #[error("platform error: {0}")]
    Platform(String),

    /// The surface configuration was rejected.
    #[error("invalid surface configuration: {0}")]
    InvalidConfig(String),
}

fn format_codes(codes: &[ErrorCode]) -> String {
    if codes.is_empty() {
        return "none".to_string();
    }
    codes
        .iter()
        .map(|c| format!("0x{c:x}"))
        .collect::<Vec<_>>()
        .join(", ")
}
