//! Engine boundary.
//!
//! The native engine is an opaque collaborator. This module defines the
//! capability trait it is reached through and the platform-agnostic input
//! events the render loop forwards to it.

mod boundary;
mod input;

pub use boundary::{EngineBoundary, EngineCapabilities};
pub use input::{InputEvent, MouseButton};
