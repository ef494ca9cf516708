use std::fmt;
use std::sync::Arc;

/// Platform hook that schedules one invocation of the draw callback.
///
/// Requests are idempotent: several requests before the next draw may
/// collapse into one frame.
pub trait FrameScheduler: Send + Sync {
    fn request_frame(&self);
}

/// Cloneable handle for requesting frames from any thread.
///
/// Worker threads hold one of these; they never call into the engine.
#[derive(Clone)]
pub struct FrameRequester {
    scheduler: Arc<dyn FrameScheduler>,
}

impl FrameRequester {
    pub fn new<S: FrameScheduler + 'static>(scheduler: S) -> Self {
        Self {
            scheduler: Arc::new(scheduler),
        }
    }

    pub fn request(&self) {
        self.scheduler.request_frame();
    }
}

impl fmt::Debug for FrameRequester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameRequester").finish_non_exhaustive()
    }
}

impl<F> FrameScheduler for F
where
    F: Fn() + Send + Sync,
{
    fn request_frame(&self) {
        self()
    }
}
