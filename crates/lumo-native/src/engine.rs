use std::ffi::{CString, OsStr};

use lumo_surface::engine::{EngineBoundary, MouseButton};

use crate::error::Result;
use crate::library::{EngineLibrary, resolve_library_path};

/// The native engine reached through its C entry points.
///
/// Must only be driven from the thread that owns the GL context.
pub struct NativeEngine {
    lib: EngineLibrary,
}

impl NativeEngine {
    /// Loads the engine from `path`.
    pub fn load(path: impl AsRef<OsStr>) -> Result<Self> {
        let lib = EngineLibrary::open(path.as_ref())?;
        Ok(Self { lib })
    }

    /// Loads the engine from an explicit path, `LUMO_ENGINE_LIB` or the default name.
    pub fn load_default(explicit: Option<&OsStr>) -> Result<Self> {
        Self::load(resolve_library_path(explicit))
    }

    pub fn has_menu_button(&self) -> bool {
        self.lib.menu_button.is_some()
    }
}

fn flag(v: i32) -> bool {
    v != 0
}

/// Converts the storage root for the C side. A NUL byte cannot cross the
/// boundary; such roots are replaced by an empty path.
fn c_root(root: &str) -> CString {
    CString::new(root).unwrap_or_else(|e| {
        log::error!("storage root contains a NUL byte at {}; passing an empty root", e.nul_position());
        CString::default()
    })
}

// SAFETY (all calls below): the pointers were resolved with their declared C
// signatures and `self.lib` keeps the library mapped.
impl EngineBoundary for NativeEngine {
    fn initialize(&mut self, width: i32, height: i32, dpi: i32, storage_root: &str) {
        let root = c_root(storage_root);
        unsafe { (self.lib.init)(width, height, dpi, root.as_ptr()) }
    }

    fn resize(&mut self, width: i32, height: i32) {
        unsafe { (self.lib.resize)(width, height) }
    }

    fn update_and_paint(&mut self) -> bool {
        flag(unsafe { (self.lib.update_and_paint)() })
    }

    fn should_close(&mut self) -> bool {
        flag(unsafe { (self.lib.should_close)() })
    }

    fn close(&mut self) {
        unsafe { (self.lib.close)() }
    }

    fn uses_rotation_input(&mut self) -> bool {
        flag(unsafe { (self.lib.uses_rotation)() })
    }

    fn uses_image_input(&mut self) -> bool {
        flag(unsafe { (self.lib.uses_image)() })
    }

    fn pointer_down(&mut self, button: MouseButton, x: i32, y: i32) -> bool {
        flag(unsafe { (self.lib.pointer_down)(button.code(), x, y) })
    }

    fn pointer_up(&mut self, button: MouseButton, x: i32, y: i32) -> bool {
        flag(unsafe { (self.lib.pointer_up)(button.code(), x, y) })
    }

    fn pointer_move(&mut self, button: MouseButton, x: i32, y: i32) -> bool {
        flag(unsafe { (self.lib.pointer_move)(button.code(), x, y) })
    }

    fn two_point_down(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) -> bool {
        flag(unsafe { (self.lib.touch2_down)(x1, y1, x2, y2) })
    }

    fn two_point_up(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) -> bool {
        flag(unsafe { (self.lib.touch2_up)(x1, y1, x2, y2) })
    }

    fn two_point_move(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) -> bool {
        flag(unsafe { (self.lib.touch2_move)(x1, y1, x2, y2) })
    }

    fn double_click(&mut self, button: MouseButton, x: i32, y: i32) -> bool {
        flag(unsafe { (self.lib.double_click)(button.code(), x, y) })
    }

    fn orientation_euler(&mut self, pitch: f32, yaw: f32, roll: f32) {
        unsafe { (self.lib.rotation_pyr)(pitch, yaw, roll) }
    }

    fn orientation_quaternion(&mut self, x: f32, y: f32, z: f32, w: f32) {
        unsafe { (self.lib.rotation_quat)(x, y, z, w) }
    }

    fn menu_button(&mut self) {
        match self.lib.menu_button {
            Some(f) => unsafe { f() },
            None => log::trace!("menu button ignored"),
        }
    }
}
