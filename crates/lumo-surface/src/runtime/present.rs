use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use crate::device::{Result, SurfaceError};

/// Performs the back-to-front buffer swap for a context.
pub trait BufferPresenter<C> {
    fn present(&mut self, context: &C) -> Result<()>;
}

/// Which loop currently owns buffer presentation.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PresentMode {
    /// Frames driven by the platform draw callback.
    OnDemand,
    /// Frames driven by a continuous session.
    Continuous,
}

impl PresentMode {
    pub fn name(self) -> &'static str {
        match self {
            PresentMode::OnDemand => "on-demand",
            PresentMode::Continuous => "continuous",
        }
    }
}

/// "Is running" flag of a continuous session.
///
/// Owned by the render loop and handed out by clone so other threads (or the
/// engine adapter) can stop a session.
#[derive(Debug, Clone, Default)]
pub struct RunFlag(Arc<AtomicBool>);

impl RunFlag {
    pub fn start(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn stop(&self) {
        self.0.store(false, Ordering::Release);
    }

    pub fn is_running(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Mutual exclusion between the two presentation loops.
///
/// Both loops swap buffers on the same surface, so at most one may own the
/// gate at a time.
#[derive(Debug, Clone, Default)]
pub struct PresentGate {
    owner: Arc<Mutex<Option<PresentMode>>>,
}

impl PresentGate {
    /// Claims presentation for `mode`; fails while another claim is alive.
    pub fn try_claim(&self, mode: PresentMode) -> Result<PresentClaim> {
        let mut owner = self.owner.lock();
        if let Some(current) = *owner {
            return Err(SurfaceError::PresentationBusy(current.name()));
        }
        *owner = Some(mode);
        Ok(PresentClaim {
            gate: self.clone(),
            mode,
        })
    }

    pub fn owner(&self) -> Option<PresentMode> {
        *self.owner.lock()
    }
}

/// Held while a loop owns presentation; released on drop.
pub struct PresentClaim {
    gate: PresentGate,
    mode: PresentMode,
}

impl PresentClaim {
    pub fn mode(&self) -> PresentMode {
        self.mode
    }
}

impl Drop for PresentClaim {
    fn drop(&mut self) {
        *self.gate.owner.lock() = None;
    }
}

impl fmt::Debug for PresentClaim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PresentClaim").field("mode", &self.mode).finish()
    }
}

/// A running continuous presentation session.
///
/// Obtained from `RenderLoopController::begin_continuous`; holds the present
/// gate until passed back to `end_continuous`.
#[derive(Debug)]
pub struct ContinuousSession {
    pub(crate) claim: PresentClaim,
    pub(crate) frames: u64,
}

impl ContinuousSession {
    /// Frames presented so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
