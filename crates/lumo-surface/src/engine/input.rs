use std::fmt;

use super::EngineBoundary;

/// Mouse button identifier as understood by the engine.
///
/// The numeric codes are part of the engine ABI.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    None,
    Left,
    Middle,
    Right,
}

impl MouseButton {
    pub fn code(self) -> i32 {
        match self {
            MouseButton::None => 0,
            MouseButton::Left => 1,
            MouseButton::Middle => 2,
            MouseButton::Right => 3,
        }
    }

    /// Unknown codes map to `None`.
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => MouseButton::Left,
            2 => MouseButton::Middle,
            3 => MouseButton::Right,
            _ => MouseButton::None,
        }
    }
}

/// Platform input forwarded verbatim to the engine.
///
/// Coordinates are surface pixels; angles are radians. Each variant maps to
/// exactly one engine call with the same parameters.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown { button: MouseButton, x: i32, y: i32 },
    PointerUp { button: MouseButton, x: i32, y: i32 },
    PointerMove { button: MouseButton, x: i32, y: i32 },

    TwoPointDown { x1: i32, y1: i32, x2: i32, y2: i32 },
    TwoPointUp { x1: i32, y1: i32, x2: i32, y2: i32 },
    TwoPointMove { x1: i32, y1: i32, x2: i32, y2: i32 },

    DoubleClick { button: MouseButton, x: i32, y: i32 },

    /// Absolute device orientation as Euler angles.
    OrientationEuler { pitch: f32, yaw: f32, roll: f32 },

    /// Absolute device orientation as a quaternion.
    OrientationQuaternion { x: f32, y: f32, z: f32, w: f32 },

    /// Hardware/menu key.
    MenuButton,
}

impl InputEvent {
    /// Issues the matching engine call.
    ///
    /// Returns `Some(consumed)` for pointer/touch events and `None` for calls
    /// without a result.
    pub fn forward<E: EngineBoundary + ?Sized>(self, engine: &mut E) -> Option<bool> {
        match self {
            InputEvent::PointerDown { button, x, y } => Some(engine.pointer_down(button, x, y)),
            InputEvent::PointerUp { button, x, y } => Some(engine.pointer_up(button, x, y)),
            InputEvent::PointerMove { button, x, y } => Some(engine.pointer_move(button, x, y)),

            InputEvent::TwoPointDown { x1, y1, x2, y2 } => Some(engine.two_point_down(x1, y1, x2, y2)),
            InputEvent::TwoPointUp { x1, y1, x2, y2 } => Some(engine.two_point_up(x1, y1, x2, y2)),
            InputEvent::TwoPointMove { x1, y1, x2, y2 } => Some(engine.two_point_move(x1, y1, x2, y2)),

            InputEvent::DoubleClick { button, x, y } => Some(engine.double_click(button, x, y)),

            InputEvent::OrientationEuler { pitch, yaw, roll } => {
                engine.orientation_euler(pitch, yaw, roll);
                None
            }
            InputEvent::OrientationQuaternion { x, y, z, w } => {
                engine.orientation_quaternion(x, y, z, w);
                None
            }

            InputEvent::MenuButton => {
                engine.menu_button();
                None
            }
        }
    }

    /// Whether the engine call returns a consumed flag.
    pub fn reports_consumed(&self) -> bool {
        !matches!(
            self,
            InputEvent::OrientationEuler { .. }
                | InputEvent::OrientationQuaternion { .. }
                | InputEvent::MenuButton
        )
    }

    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            InputEvent::PointerDown { .. } => "pointer_down",
            InputEvent::PointerUp { .. } => "pointer_up",
            InputEvent::PointerMove { .. } => "pointer_move",
            InputEvent::TwoPointDown { .. } => "two_point_down",
            InputEvent::TwoPointUp { .. } => "two_point_up",
            InputEvent::TwoPointMove { .. } => "two_point_move",
            InputEvent::DoubleClick { .. } => "double_click",
            InputEvent::OrientationEuler { .. } => "orientation_euler",
            InputEvent::OrientationQuaternion { .. } => "orientation_quaternion",
            InputEvent::MenuButton => "menu_button",
        }
    }
}

impl fmt::Display for MouseButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
