//! On-demand render loop.
//!
//! `RenderLoopController` reacts to surface lifecycle callbacks, drives the
//! engine one frame at a time and arbitrates buffer presentation between the
//! on-demand loop and a continuous session.

mod callback;
mod controller;
mod present;
mod schedule;
mod state;

pub use callback::{FrameCallback, FrameOutcome};
pub use controller::RenderLoopController;
pub use present::{BufferPresenter, ContinuousSession, PresentClaim, PresentGate, PresentMode, RunFlag};
pub use schedule::{FrameRequester, FrameScheduler};
pub use state::{SurfaceEvent, SurfaceState};
