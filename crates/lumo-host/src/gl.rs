use std::collections::VecDeque;
use std::num::NonZeroU32;

use glutin::config::{Api, ColorBufferType, Config, ConfigTemplateBuilder, GlConfig};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, NotCurrentGlContext, PossiblyCurrentContext, Version,
};
use glutin::display::{Display, GlDisplay};
use glutin::surface::{GlSurface, Surface, SurfaceAttributesBuilder, WindowSurface};
use raw_window_handle::RawWindowHandle;

use lumo_surface::device::{
    CoarseFilter, ConfigAttributes, ConfigCandidate, ConfigSource, ContextAttribs,
    ContextFactory, ErrorCode, RenderableApi, Result, SurfaceError,
};
use lumo_surface::runtime::BufferPresenter;

/// Queued for glutin errors that carry no native code.
pub const UNCODED_ERROR: ErrorCode = 0;

/// Native window the context and its surface are created for.
#[derive(Debug, Copy, Clone)]
pub struct WindowTarget {
    pub handle: RawWindowHandle,
    pub width: NonZeroU32,
    pub height: NonZeroU32,
}

impl WindowTarget {
    pub fn new(handle: RawWindowHandle, width: u32, height: u32) -> Self {
        Self {
            handle,
            width: NonZeroU32::new(width).unwrap_or(NonZeroU32::MIN),
            height: NonZeroU32::new(height).unwrap_or(NonZeroU32::MIN),
        }
    }
}

/// Current GL context plus the window surface it renders to.
pub struct HostContext {
    pub context: PossiblyCurrentContext,
    pub surface: Surface<WindowSurface>,
}

impl HostContext {
    pub fn resize(&self, width: u32, height: u32) {
        if let (Some(w), Some(h)) = (NonZeroU32::new(width), NonZeroU32::new(height)) {
            self.surface.resize(&self.context, w, h);
        }
    }
}

// ── configuration source ─────────────────────────────────────────────────

/// Enumerates EGL configurations compatible with the native window.
pub struct GlutinConfigSource {
    display: Display,
    window: RawWindowHandle,
}

impl GlutinConfigSource {
    pub fn new(display: Display, window: RawWindowHandle) -> Self {
        Self { display, window }
    }

    pub fn retarget(&mut self, window: RawWindowHandle) {
        self.window = window;
    }
}

impl ConfigSource for GlutinConfigSource {
    type Config = Config;

    fn enumerate(&mut self, filter: &CoarseFilter) -> Result<Vec<ConfigCandidate<Config>>> {
        let template = ConfigTemplateBuilder::new()
            .with_api(api_of(filter.api))
            .with_buffer_type(ColorBufferType::Rgb {
                r_size: filter.min_red,
                g_size: filter.min_green,
                b_size: filter.min_blue,
            })
            .with_alpha_size(0)
            .compatible_with_native_window(self.window)
            .build();

        // SAFETY: the window handle stays valid while the host owns the window.
        let configs = unsafe { self.display.find_configs(template) }
            .map_err(|e| SurfaceError::Platform(format!("config enumeration failed: {e}")))?;

        Ok(configs
            .map(|config| {
                let attributes = attributes_of(&config);
                ConfigCandidate::new(config, attributes)
            })
            .collect())
    }
}

fn api_of(renderable: RenderableApi) -> Api {
    let mut api = Api::empty();
    for (bit, flag) in [
        (RenderableApi::OPENGL, Api::OPENGL),
        (RenderableApi::GLES1, Api::GLES1),
        (RenderableApi::GLES2, Api::GLES2),
        (RenderableApi::GLES3, Api::GLES3),
    ] {
        if renderable.contains(bit) {
            api |= flag;
        }
    }
    api
}

fn renderable_of(api: Api) -> RenderableApi {
    [
        (Api::OPENGL, RenderableApi::OPENGL),
        (Api::GLES1, RenderableApi::GLES1),
        (Api::GLES2, RenderableApi::GLES2),
        (Api::GLES3, RenderableApi::GLES3),
    ]
    .into_iter()
    .filter(|(flag, _)| api.contains(*flag))
    .fold(RenderableApi::default(), |acc, (_, bit)| acc.union(bit))
}

fn attributes_of(config: &Config) -> ConfigAttributes {
    let (red, green, blue) = match config.color_buffer_type() {
        Some(ColorBufferType::Rgb { r_size, g_size, b_size }) => (r_size, g_size, b_size),
        _ => (0, 0, 0),
    };
    let samples = config.num_samples();

    ConfigAttributes {
        red,
        green,
        blue,
        alpha: config.alpha_size(),
        depth: config.depth_size(),
        stencil: config.stencil_size(),
        samples,
        sample_buffers: u8::from(samples > 0),
        renderable: renderable_of(config.api()),
        hardware_accelerated: config.hardware_accelerated(),
        srgb: config.srgb_capable(),
    }
}

// ── context factory ──────────────────────────────────────────────────────

/// Creates GLES contexts and window surfaces, queueing native error codes.
pub struct GlutinContextFactory {
    display: Display,
    target: WindowTarget,
    errors: VecDeque<ErrorCode>,
}

impl GlutinContextFactory {
    pub fn new(display: Display, target: WindowTarget) -> Self {
        Self {
            display,
            target,
            errors: VecDeque::new(),
        }
    }

    /// Window used by the next `create_context`.
    pub fn retarget(&mut self, target: WindowTarget) {
        self.target = target;
    }

    fn record(&mut self, step: &str, err: glutin::error::Error) {
        log::error!("{step} failed: {err}");
        let code = err
            .raw_code()
            .and_then(|c| ErrorCode::try_from(c).ok())
            .unwrap_or(UNCODED_ERROR);
        self.errors.push_back(code);
    }
}

impl ContextFactory for GlutinContextFactory {
    type Config = Config;
    type Context = HostContext;

    fn create_context(&mut self, config: &Config, attribs: &ContextAttribs) -> Option<HostContext> {
        let major = u8::try_from(attribs.version()).unwrap_or(2);
        let attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::Gles(Some(Version::new(major, 0))))
            .build(Some(self.target.handle));

        // SAFETY: `config` was enumerated from this display for this window.
        let not_current = match unsafe { self.display.create_context(config, &attributes) } {
            Ok(ctx) => ctx,
            Err(e) => {
                self.record("context creation", e);
                return None;
            }
        };

        let surface_attributes = SurfaceAttributesBuilder::<WindowSurface>::new().build(
            self.target.handle,
            self.target.width,
            self.target.height,
        );
        // SAFETY: as above; the window outlives the surface.
        let surface = match unsafe { self.display.create_window_surface(config, &surface_attributes) } {
            Ok(surface) => surface,
            Err(e) => {
                self.record("window surface creation", e);
                return None;
            }
        };

        match not_current.make_current(&surface) {
            Ok(context) => Some(HostContext { context, surface }),
            Err(e) => {
                self.record("make current", e);
                None
            }
        }
    }

    fn destroy_context(&mut self, context: HostContext) {
        log::debug!("releasing GL context and window surface");
        drop(context);
    }

    fn next_error(&mut self) -> Option<ErrorCode> {
        self.errors.pop_front()
    }
}

/// Swaps the window surface.
#[derive(Debug, Default)]
pub struct GlSwap;

impl BufferPresenter<HostContext> for GlSwap {
    fn present(&mut self, context: &HostContext) -> Result<()> {
        context
            .surface
            .swap_buffers(&context.context)
            .map_err(|e| SurfaceError::Platform(format!("buffer swap failed: {e}")))
    }
}
