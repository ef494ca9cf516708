use super::MouseButton;

/// Contract of the external rendering engine.
///
/// The render loop only reacts to the returned signals and never inspects
/// engine state. Implementations must tolerate repeated calls (e.g.
/// `initialize` after a pause/resume cycle) and must not unwind across this
/// boundary.
pub trait EngineBoundary {
    /// Called once per surface creation, with a possibly provisional size.
    fn initialize(&mut self, width: i32, height: i32, dpi: i32, storage_root: &str);

    fn resize(&mut self, width: i32, height: i32);

    /// Updates and paints one frame. `true` asks for another frame.
    fn update_and_paint(&mut self) -> bool;

    fn should_close(&mut self) -> bool;

    fn close(&mut self);

    /// Whether the engine wants device orientation input.
    fn uses_rotation_input(&mut self) -> bool;

    /// Whether the engine wants camera images. Camera forwarding itself is not wired.
    fn uses_image_input(&mut self) -> bool;

    fn pointer_down(&mut self, button: MouseButton, x: i32, y: i32) -> bool;
    fn pointer_up(&mut self, button: MouseButton, x: i32, y: i32) -> bool;
    fn pointer_move(&mut self, button: MouseButton, x: i32, y: i32) -> bool;

    fn two_point_down(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) -> bool;
    fn two_point_up(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) -> bool;
    fn two_point_move(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) -> bool;

    fn double_click(&mut self, button: MouseButton, x: i32, y: i32) -> bool;

    fn orientation_euler(&mut self, pitch: f32, yaw: f32, roll: f32);
    fn orientation_quaternion(&mut self, x: f32, y: f32, z: f32, w: f32);

    /// Hardware menu key. Engines without a menu ignore it.
    fn menu_button(&mut self) {}
}

/// Input capabilities reported by the engine after initialization.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct EngineCapabilities {
    pub rotation_input: bool,
    pub image_input: bool,
}

impl EngineCapabilities {
    pub fn query<E: EngineBoundary + ?Sized>(engine: &mut E) -> Self {
        Self {
            rotation_input: engine.uses_rotation_input(),
            image_input: engine.uses_image_input(),
        }
    }
}
