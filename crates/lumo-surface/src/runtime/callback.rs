use crate::device::Result;

use super::SurfaceEvent;

/// Result of a draw callback.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameOutcome {
    /// The engine painted; the platform should present the back buffer.
    Painted,
    /// A continuous session owns presentation; a frame follows when it ends.
    Deferred,
    /// Nothing was drawn.
    NoFrame,
}

/// Renderer callbacks driven by a platform surface.
///
/// The platform delivers these serialized on its render thread.
pub trait FrameCallback {
    fn on_surface_created(&mut self, width: i32, height: i32) -> Result<()>;

    fn on_surface_changed(&mut self, width: i32, height: i32) -> Result<()>;

    fn on_draw_frame(&mut self) -> FrameOutcome;

    fn on_pause(&mut self);

    fn on_resume(&mut self);

    fn on_teardown(&mut self);

    /// Routes a platform event to the matching callback.
    fn dispatch(&mut self, event: SurfaceEvent) -> Result<FrameOutcome> {
        match event {
            SurfaceEvent::Created { width, height } => {
                self.on_surface_created(width, height)?;
                Ok(FrameOutcome::NoFrame)
            }
            SurfaceEvent::Changed { width, height } => {
                self.on_surface_changed(width, height)?;
                Ok(FrameOutcome::NoFrame)
            }
            SurfaceEvent::DrawFrame => Ok(self.on_draw_frame()),
            SurfaceEvent::Pause => {
                self.on_pause();
                Ok(FrameOutcome::NoFrame)
            }
            SurfaceEvent::Resume => {
                self.on_resume();
                Ok(FrameOutcome::NoFrame)
            }
            SurfaceEvent::Teardown => {
                self.on_teardown();
                Ok(FrameOutcome::NoFrame)
            }
        }
    }
}
