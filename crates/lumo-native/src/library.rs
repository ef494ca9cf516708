use std::ffi::{OsStr, OsString, c_char, c_float, c_int};

use libloading::Library;

use crate::error::{EngineLoadError, Result};

/// Environment variable overriding the engine library path.
pub const ENGINE_LIB_ENV: &str = "LUMO_ENGINE_LIB";

pub(crate) type InitFn = unsafe extern "C" fn(c_int, c_int, c_int, *const c_char);
pub(crate) type ResizeFn = unsafe extern "C" fn(c_int, c_int);
pub(crate) type QueryFn = unsafe extern "C" fn() -> c_int;
pub(crate) type VoidFn = unsafe extern "C" fn();
pub(crate) type PointerFn = unsafe extern "C" fn(c_int, c_int, c_int) -> c_int;
pub(crate) type TwoPointFn = unsafe extern "C" fn(c_int, c_int, c_int, c_int) -> c_int;
pub(crate) type EulerFn = unsafe extern "C" fn(c_float, c_float, c_float);
pub(crate) type QuatFn = unsafe extern "C" fn(c_float, c_float, c_float, c_float);

/// Resolved engine entry points. The function pointers stay valid while `_lib`
/// is alive.
pub(crate) struct EngineLibrary {
    _lib: Library,
    pub init: InitFn,
    pub resize: ResizeFn,
    pub update_and_paint: QueryFn,
    pub should_close: QueryFn,
    pub close: VoidFn,
    pub uses_rotation: QueryFn,
    pub uses_image: QueryFn,
    pub pointer_down: PointerFn,
    pub pointer_up: PointerFn,
    pub pointer_move: PointerFn,
    pub touch2_down: TwoPointFn,
    pub touch2_up: TwoPointFn,
    pub touch2_move: TwoPointFn,
    pub double_click: PointerFn,
    pub rotation_pyr: EulerFn,
    pub rotation_quat: QuatFn,
    pub menu_button: Option<VoidFn>,
}

impl EngineLibrary {
    pub(crate) fn open(path: &OsStr) -> Result<Self> {
        log::info!("loading engine library {}", path.to_string_lossy());

        // SAFETY: loading runs the library's initializers; the engine library is trusted.
        let lib = unsafe { Library::new(path) }.map_err(|e| EngineLoadError::LibraryLoad {
            path: path.to_string_lossy().into_owned(),
            reason: e.to_string(),
        })?;

        // SAFETY: each symbol is declared with the signature of the engine's C header.
        let table = unsafe {
            Self {
                init: symbol(&lib, "lumo_engine_init")?,
                resize: symbol(&lib, "lumo_engine_resize")?,
                update_and_paint: symbol(&lib, "lumo_engine_update_and_paint")?,
                should_close: symbol(&lib, "lumo_engine_should_close")?,
                close: symbol(&lib, "lumo_engine_close")?,
                uses_rotation: symbol(&lib, "lumo_engine_uses_rotation")?,
                uses_image: symbol(&lib, "lumo_engine_uses_image")?,
                pointer_down: symbol(&lib, "lumo_engine_pointer_down")?,
                pointer_up: symbol(&lib, "lumo_engine_pointer_up")?,
                pointer_move: symbol(&lib, "lumo_engine_pointer_move")?,
                touch2_down: symbol(&lib, "lumo_engine_touch2_down")?,
                touch2_up: symbol(&lib, "lumo_engine_touch2_up")?,
                touch2_move: symbol(&lib, "lumo_engine_touch2_move")?,
                double_click: symbol(&lib, "lumo_engine_double_click")?,
                rotation_pyr: symbol(&lib, "lumo_engine_rotation_pyr")?,
                rotation_quat: symbol(&lib, "lumo_engine_rotation_quat")?,
                menu_button: symbol(&lib, "lumo_engine_menu_button").ok(),
                _lib: lib,
            }
        };

        if table.menu_button.is_none() {
            log::debug!("engine has no menu button entry point");
        }
        Ok(table)
    }
}

/// Looks up `name` and copies out the function pointer.
///
/// # Safety
/// `T` must match the symbol's real signature.
unsafe fn symbol<T: Copy>(lib: &Library, name: &str) -> Result<T> {
    let sym = unsafe { lib.get::<T>(name.as_bytes()) }
        .map_err(|e| EngineLoadError::SymbolNotFound(format!("{name}: {e}")))?;
    Ok(*sym)
}

/// Platform file name of the engine library (`liblumo_engine.so`, `lumo_engine.dll`, ...).
pub fn default_library_name() -> OsString {
    libloading::library_filename("lumo_engine")
}

/// Picks the library to load: an explicit path, else `LUMO_ENGINE_LIB`, else
/// the platform default name searched on the loader path.
pub fn resolve_library_path(explicit: Option<&OsStr>) -> OsString {
    resolve_with(explicit, std::env::var_os(ENGINE_LIB_ENV))
}

fn resolve_with(explicit: Option<&OsStr>, env: Option<OsString>) -> OsString {
    explicit
        .map(OsStr::to_os_string)
        .or(env.filter(|v| !v.is_empty()))
        .unwrap_or_else(default_library_name)
}
