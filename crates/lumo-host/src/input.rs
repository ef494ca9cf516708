use std::time::{Duration, Instant};

use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton as WinitMouseButton, Touch, TouchPhase, WindowEvent};

use lumo_surface::engine::{InputEvent, MouseButton};

/// Maximum delay between two presses that form a double click.
pub const DOUBLE_CLICK_INTERVAL: Duration = Duration::from_millis(300);
/// Maximum distance in pixels between the two presses (per axis).
pub const DOUBLE_CLICK_SLOP: i32 = 8;

/// Detects double clicks from successive presses.
#[derive(Debug, Default)]
pub struct DoubleClickDetector {
    last: Option<(MouseButton, i32, i32, Instant)>,
}

impl DoubleClickDetector {
    /// Records a press; returns `true` when it completes a double click.
    pub fn press(&mut self, button: MouseButton, x: i32, y: i32, at: Instant) -> bool {
        if let Some((b, px, py, t)) = self.last {
            let close = (x - px).abs() <= DOUBLE_CLICK_SLOP && (y - py).abs() <= DOUBLE_CLICK_SLOP;
            if b == button && close && at.saturating_duration_since(t) <= DOUBLE_CLICK_INTERVAL {
                // A third press starts a new pair.
                self.last = None;
                return true;
            }
        }
        self.last = Some((button, x, y, at));
        false
    }
}

/// Folds touch points into single- and two-point gestures.
///
/// The first finger behaves like the left mouse button; a second finger
/// switches to two-point events. Further fingers are ignored.
#[derive(Debug, Default)]
pub struct TouchTracker {
    points: Vec<(u64, i32, i32)>,
}

impl TouchTracker {
    pub fn active(&self) -> usize {
        self.points.len()
    }

    pub fn update(&mut self, id: u64, phase: TouchPhase, x: i32, y: i32) -> Option<InputEvent> {
        let index = self.points.iter().position(|p| p.0 == id);
        match (phase, index) {
            (TouchPhase::Started, None) => match self.points.len() {
                0 => {
                    self.points.push((id, x, y));
                    Some(InputEvent::PointerDown { button: MouseButton::Left, x, y })
                }
                1 => {
                    self.points.push((id, x, y));
                    Some(self.two_point(TwoPoint::Down))
                }
                _ => None,
            },
            (TouchPhase::Moved, Some(i)) => {
                self.points[i].1 = x;
                self.points[i].2 = y;
                if self.points.len() == 2 {
                    Some(self.two_point(TwoPoint::Move))
                } else {
                    Some(InputEvent::PointerMove { button: MouseButton::Left, x, y })
                }
            }
            (TouchPhase::Ended | TouchPhase::Cancelled, Some(i)) => {
                self.points[i].1 = x;
                self.points[i].2 = y;
                let event = if self.points.len() == 2 {
                    self.two_point(TwoPoint::Up)
                } else {
                    InputEvent::PointerUp { button: MouseButton::Left, x, y }
                };
                self.points.remove(i);
                Some(event)
            }
            _ => None,
        }
    }

    fn two_point(&self, kind: TwoPoint) -> InputEvent {
        let (_, x1, y1) = self.points[0];
        let (_, x2, y2) = self.points[1];
        match kind {
            TwoPoint::Down => InputEvent::TwoPointDown { x1, y1, x2, y2 },
            TwoPoint::Move => InputEvent::TwoPointMove { x1, y1, x2, y2 },
            TwoPoint::Up => InputEvent::TwoPointUp { x1, y1, x2, y2 },
        }
    }
}

enum TwoPoint {
    Down,
    Move,
    Up,
}

/// Translates winit window events into engine input.
#[derive(Debug, Default)]
pub struct InputTranslator {
    cursor: (i32, i32),
    held: Option<MouseButton>,
    clicks: DoubleClickDetector,
    touches: TouchTracker,
}

impl InputTranslator {
    /// Returns the engine events for `event`, in order. Most events map to
    /// zero or one engine event; a press completing a double click maps to two.
    pub fn translate(&mut self, event: &WindowEvent, now: Instant) -> Vec<InputEvent> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = to_pixels(*position);
                let (x, y) = self.cursor;
                let button = self.held.unwrap_or(MouseButton::None);
                vec![InputEvent::PointerMove { button, x, y }]
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let button = map_mouse_button(*button);
                if button == MouseButton::None {
                    return Vec::new();
                }
                let (x, y) = self.cursor;
                match state {
                    ElementState::Pressed => {
                        self.held = Some(button);
                        let mut out = vec![InputEvent::PointerDown { button, x, y }];
                        if self.clicks.press(button, x, y, now) {
                            out.push(InputEvent::DoubleClick { button, x, y });
                        }
                        out
                    }
                    ElementState::Released => {
                        if self.held == Some(button) {
                            self.held = None;
                        }
                        vec![InputEvent::PointerUp { button, x, y }]
                    }
                }
            }

            WindowEvent::Touch(Touch { id, phase, location, .. }) => {
                let (x, y) = to_pixels(*location);
                self.touches.update(*id, *phase, x, y).into_iter().collect()
            }

            _ => Vec::new(),
        }
    }
}

fn to_pixels(pos: PhysicalPosition<f64>) -> (i32, i32) {
    (pos.x.round() as i32, pos.y.round() as i32)
}

fn map_mouse_button(b: WinitMouseButton) -> MouseButton {
    match b {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Back | WinitMouseButton::Forward | WinitMouseButton::Other(_) => {
            MouseButton::None
        }
    }
}
