//! In-memory fakes for the engine boundary and the platform seams.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::device::{
    CoarseFilter, ConfigCandidate, ConfigSource, ContextAttribs, ContextFactory, ErrorCode,
    Result, SurfaceError,
};
use crate::engine::{EngineBoundary, MouseButton};
use crate::runtime::{BufferPresenter, FrameScheduler, RunFlag};

#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    Initialize(i32, i32, i32, String),
    Resize(i32, i32),
    UpdateAndPaint,
    Close,
    PointerDown(MouseButton, i32, i32),
    PointerUp(MouseButton, i32, i32),
    PointerMove(MouseButton, i32, i32),
    TwoPointDown(i32, i32, i32, i32),
    TwoPointUp(i32, i32, i32, i32),
    TwoPointMove(i32, i32, i32, i32),
    DoubleClick(MouseButton, i32, i32),
    OrientationEuler(f32, f32, f32),
    OrientationQuaternion(f32, f32, f32, f32),
    MenuButton,
    /// Not an engine call; recorded by `CountingScheduler` so ordering is visible.
    FrameRequested,
}

/// Shared, ordered record of engine calls and frame requests.
#[derive(Debug, Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<EngineCall>>>);

impl Journal {
    pub fn push(&self, call: EngineCall) {
        self.0.lock().push(call);
    }

    pub fn calls(&self) -> Vec<EngineCall> {
        self.0.lock().clone()
    }

    pub fn clear(&self) {
        self.0.lock().clear();
    }

    pub fn count(&self, pred: impl Fn(&EngineCall) -> bool) -> usize {
        self.0.lock().iter().filter(|c| pred(c)).count()
    }
}

/// Engine double. Capability queries and `should_close` are not journaled.
#[derive(Debug, Default)]
pub struct RecordingEngine {
    journal: Journal,
    /// Result returned by every pointer/touch call.
    pub consume_input: bool,
    /// Results of successive `update_and_paint` calls; `false` once empty.
    pub paint_results: VecDeque<bool>,
    /// `should_close` turns true after this many paints.
    pub close_after_paints: Option<usize>,
    pub rotation: bool,
    pub image: bool,
    paints: usize,
}

impl RecordingEngine {
    pub fn journal(&self) -> Journal {
        self.journal.clone()
    }

    pub fn calls(&self) -> Vec<EngineCall> {
        self.journal.calls()
    }

    fn input(&mut self, call: EngineCall) -> bool {
        self.journal.push(call);
        self.consume_input
    }
}

impl EngineBoundary for RecordingEngine {
    fn initialize(&mut self, width: i32, height: i32, dpi: i32, storage_root: &str) {
        self.journal
            .push(EngineCall::Initialize(width, height, dpi, storage_root.to_string()));
    }

    fn resize(&mut self, width: i32, height: i32) {
        self.journal.push(EngineCall::Resize(width, height));
    }

    fn update_and_paint(&mut self) -> bool {
        self.journal.push(EngineCall::UpdateAndPaint);
        self.paints += 1;
        self.paint_results.pop_front().unwrap_or(false)
    }

    fn should_close(&mut self) -> bool {
        self.close_after_paints.is_some_and(|n| self.paints >= n)
    }

    fn close(&mut self) {
        self.journal.push(EngineCall::Close);
    }

    fn uses_rotation_input(&mut self) -> bool {
        self.rotation
    }

    fn uses_image_input(&mut self) -> bool {
        self.image
    }

    fn pointer_down(&mut self, button: MouseButton, x: i32, y: i32) -> bool {
        self.input(EngineCall::PointerDown(button, x, y))
    }

    fn pointer_up(&mut self, button: MouseButton, x: i32, y: i32) -> bool {
        self.input(EngineCall::PointerUp(button, x, y))
    }

    fn pointer_move(&mut self, button: MouseButton, x: i32, y: i32) -> bool {
        self.input(EngineCall::PointerMove(button, x, y))
    }

    fn two_point_down(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) -> bool {
        self.input(EngineCall::TwoPointDown(x1, y1, x2, y2))
    }

    fn two_point_up(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) -> bool {
        self.input(EngineCall::TwoPointUp(x1, y1, x2, y2))
    }

    fn two_point_move(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) -> bool {
        self.input(EngineCall::TwoPointMove(x1, y1, x2, y2))
    }

    fn double_click(&mut self, button: MouseButton, x: i32, y: i32) -> bool {
        self.input(EngineCall::DoubleClick(button, x, y))
    }

    fn orientation_euler(&mut self, pitch: f32, yaw: f32, roll: f32) {
        self.journal.push(EngineCall::OrientationEuler(pitch, yaw, roll));
    }

    fn orientation_quaternion(&mut self, x: f32, y: f32, z: f32, w: f32) {
        self.journal.push(EngineCall::OrientationQuaternion(x, y, z, w));
    }

    fn menu_button(&mut self) {
        self.journal.push(EngineCall::MenuButton);
    }
}

/// Scheduler that records each request into a journal.
pub struct CountingScheduler {
    journal: Journal,
}

impl CountingScheduler {
    pub fn new(journal: Journal) -> Self {
        Self { journal }
    }
}

impl FrameScheduler for CountingScheduler {
    fn request_frame(&self) {
        self.journal.push(EngineCall::FrameRequested);
    }
}

/// Configuration source backed by a fixed candidate list.
#[derive(Debug, Default)]
pub struct FakeSource {
    pub candidates: Vec<ConfigCandidate<u32>>,
    /// Filters passed to `enumerate`, in call order.
    pub filters: Vec<CoarseFilter>,
    pub fail: bool,
}

impl FakeSource {
    pub fn new(candidates: Vec<ConfigCandidate<u32>>) -> Self {
        Self {
            candidates,
            ..Default::default()
        }
    }
}

impl ConfigSource for FakeSource {
    type Config = u32;

    fn enumerate(&mut self, filter: &CoarseFilter) -> Result<Vec<ConfigCandidate<u32>>> {
        self.filters.push(*filter);
        if self.fail {
            return Err(SurfaceError::Platform("enumeration failed".to_string()));
        }
        Ok(self.candidates.clone())
    }
}

/// Context factory whose contexts are the config ids they were created from.
#[derive(Debug, Default)]
pub struct FakeFactory {
    /// `(config, client version)` per create call.
    pub created: Vec<(u32, i32)>,
    pub destroyed: usize,
    pub pending_errors: VecDeque<ErrorCode>,
    /// Queued right after a create call.
    pub errors_on_create: Vec<ErrorCode>,
    pub refuse: bool,
}

impl ContextFactory for FakeFactory {
    type Config = u32;
    type Context = u32;

    fn create_context(&mut self, config: &u32, attribs: &ContextAttribs) -> Option<u32> {
        self.created.push((*config, attribs.version()));
        self.pending_errors.extend(self.errors_on_create.iter().copied());
        if self.refuse { None } else { Some(*config) }
    }

    fn destroy_context(&mut self, _context: u32) {
        self.destroyed += 1;
    }

    fn next_error(&mut self) -> Option<ErrorCode> {
        self.pending_errors.pop_front()
    }
}

/// Presenter that records the contexts it swapped.
#[derive(Debug, Default)]
pub struct FakePresenter {
    pub presented: Vec<u32>,
    pub fail: bool,
    /// Clears the flag once this many frames were presented.
    pub stop_after: Option<(usize, RunFlag)>,
}

impl BufferPresenter<u32> for FakePresenter {
    fn present(&mut self, context: &u32) -> Result<()> {
        if self.fail {
            return Err(SurfaceError::Platform("swap failed".to_string()));
        }
        self.presented.push(*context);
        if let Some((n, flag)) = &self.stop_after {
            if self.presented.len() >= *n {
                flag.stop();
            }
        }
        Ok(())
    }
}
