//! Lumo surface crate.
//!
//! Platform-neutral core that hosts an external native rendering engine on a
//! GPU surface: configuration selection, context provisioning, the on-demand
//! render loop and input forwarding. Platform layers plug in through the
//! `ConfigSource`, `ContextFactory`, `BufferPresenter` and `FrameScheduler`
//! traits.

pub mod device;
pub mod engine;
pub mod logging;
pub mod runtime;

#[cfg(test)]
mod testing;
