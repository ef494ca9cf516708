use super::{ErrorCode, Result, SurfaceError};

/// `CONTEXT_CLIENT_VERSION` attribute key.
pub const CONTEXT_CLIENT_VERSION: i32 = 0x3098;

/// Attribute list terminator.
pub const ATTRIB_NONE: i32 = 0x3038;

/// Client API version requested for every context.
pub const API_VERSION: i32 = 2;

/// Upper bound on error codes read per drain; a broken driver must not hang the render thread.
const MAX_DRAINED_ERRORS: usize = 64;

/// Versioned attribute list passed to the platform on context creation.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ContextAttribs {
    list: [i32; 3],
}

impl ContextAttribs {
    pub fn client_version(version: i32) -> Self {
        Self {
            list: [CONTEXT_CLIENT_VERSION, version, ATTRIB_NONE],
        }
    }

    pub fn version(&self) -> i32 {
        self.list[1]
    }

    /// Key/value pairs followed by `ATTRIB_NONE`.
    pub fn as_slice(&self) -> &[i32] {
        &self.list
    }
}

/// Platform side of context management.
pub trait ContextFactory {
    /// Configuration handle the context is created for.
    type Config;

    /// Platform context object.
    type Context;

    /// Creates a context; `None` when the platform produced nothing.
    fn create_context(&mut self, config: &Self::Config, attribs: &ContextAttribs) -> Option<Self::Context>;

    /// Releases a context created by this factory.
    fn destroy_context(&mut self, context: Self::Context);

    /// Pops the next queued platform error. `None` means "no error".
    fn next_error(&mut self) -> Option<ErrorCode>;
}

/// A live context bound to one configuration and one API version.
#[derive(Debug)]
pub struct RenderContext<C, K> {
    context: C,
    config: K,
    api_version: i32,
}

impl<C, K> RenderContext<C, K> {
    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    pub fn config(&self) -> &K {
        &self.config
    }

    pub fn api_version(&self) -> i32 {
        self.api_version
    }
}

/// Creates and destroys the single context owned by a surface.
pub struct ContextProvisioner<F: ContextFactory> {
    factory: F,
    active: Option<RenderContext<F::Context, F::Config>>,
}

impl<F: ContextFactory> ContextProvisioner<F> {
    pub fn new(factory: F) -> Self {
        Self { factory, active: None }
    }

    /// Realizes a GLES2 context for `config`.
    ///
    /// An existing context is destroyed first. Any error code the platform
    /// queues during creation makes the call fail.
    pub fn create_context(&mut self, config: F::Config) -> Result<&RenderContext<F::Context, F::Config>> {
        if self.active.is_some() {
            log::warn!("create_context with a live context; destroying the old one first");
            self.destroy_context();
        }

        let attribs = ContextAttribs::client_version(API_VERSION);
        log::info!("creating client version {} context", attribs.version());

        self.drain_errors("before create_context");
        let created = self.factory.create_context(&config, &attribs);
        let codes = self.drain_errors("after create_context");

        match created {
            Some(context) if codes.is_empty() => {
                let ctx = self.active.insert(RenderContext {
                    context,
                    config,
                    api_version: attribs.version(),
                });
                Ok(&*ctx)
            }
            Some(context) => {
                self.factory.destroy_context(context);
                Err(SurfaceError::ContextCreationFailed { codes })
            }
            None => {
                log::error!("platform returned no context");
                Err(SurfaceError::ContextCreationFailed { codes })
            }
        }
    }

    /// Releases the active context. Returns `false` when there was none.
    pub fn destroy_context(&mut self) -> bool {
        match self.active.take() {
            Some(ctx) => {
                self.factory.destroy_context(ctx.context);
                log::info!("context destroyed");
                true
            }
            None => {
                log::warn!("destroy_context: {}", SurfaceError::RedundantTeardown);
                false
            }
        }
    }

    pub fn active(&self) -> Option<&RenderContext<F::Context, F::Config>> {
        self.active.as_ref()
    }

    pub fn active_mut(&mut self) -> Option<&mut RenderContext<F::Context, F::Config>> {
        self.active.as_mut()
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    pub fn factory_mut(&mut self) -> &mut F {
        &mut self.factory
    }

    fn drain_errors(&mut self, prompt: &str) -> Vec<ErrorCode> {
        let mut codes = Vec::new();
        while let Some(code) = self.factory.next_error() {
            log::error!("{prompt}: platform error 0x{code:x}");
            codes.push(code);
            if codes.len() >= MAX_DRAINED_ERRORS {
                log::error!("{prompt}: giving up after {MAX_DRAINED_ERRORS} queued errors");
                break;
            }
        }
        codes
    }
}
