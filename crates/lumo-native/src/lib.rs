//! Native engine adapter.
//!
//! Binds the `lumo_engine_*` C entry points of a shared library at runtime and
//! exposes them as an `EngineBoundary`.

mod engine;
mod error;
mod library;

pub use engine::NativeEngine;
pub use error::{EngineLoadError, Result};
pub use library::{ENGINE_LIB_ENV, default_library_name, resolve_library_path};
