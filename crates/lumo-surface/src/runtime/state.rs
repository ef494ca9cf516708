use std::fmt;

/// Lifecycle state of a render surface.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceState {
    /// No context; the engine has not been initialized for this surface.
    Uninitialized,
    /// Context live, engine initialized, size not yet authoritative.
    Created,
    /// Context live with an authoritative size; frames may be produced.
    Sized { width: i32, height: i32 },
    /// Context released by a platform pause; engine still alive.
    Paused,
    /// Engine asked to close; no more frames.
    Closing,
    /// Torn down; no further engine calls.
    Closed,
}

impl SurfaceState {
    /// Whether the engine may receive calls.
    pub fn is_live(&self) -> bool {
        matches!(self, SurfaceState::Created | SurfaceState::Sized { .. })
    }

    pub fn size(&self) -> Option<(i32, i32)> {
        match *self {
            SurfaceState::Sized { width, height } => Some((width, height)),
            _ => None,
        }
    }
}

impl fmt::Display for SurfaceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceState::Uninitialized => f.write_str("uninitialized"),
            SurfaceState::Created => f.write_str("created"),
            SurfaceState::Sized { width, height } => write!(f, "sized {width}x{height}"),
            SurfaceState::Paused => f.write_str("paused"),
            SurfaceState::Closing => f.write_str("closing"),
            SurfaceState::Closed => f.write_str("closed"),
        }
    }
}

/// Surface lifecycle signals delivered by the platform.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceEvent {
    Created { width: i32, height: i32 },
    Changed { width: i32, height: i32 },
    DrawFrame,
    Pause,
    Resume,
    Teardown,
}

impl fmt::Display for SurfaceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceEvent::Created { width, height } => write!(f, "surface created ({width}x{height})"),
            SurfaceEvent::Changed { width, height } => write!(f, "surface changed ({width}x{height})"),
            SurfaceEvent::DrawFrame => f.write_str("draw frame"),
            SurfaceEvent::Pause => f.write_str("pause"),
            SurfaceEvent::Resume => f.write_str("resume"),
            SurfaceEvent::Teardown => f.write_str("teardown"),
        }
    }
}
