use std::time::Instant;

use anyhow::{Context, Result};
use glutin::display::{Display, DisplayApiPreference};
use parking_lot::Mutex;
use raw_window_handle::{HasDisplayHandle, HasWindowHandle, RawWindowHandle};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop, EventLoopProxy};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowId};

use lumo_surface::engine::{EngineBoundary, InputEvent};
use lumo_surface::runtime::{
    ContinuousSession, FrameCallback, FrameOutcome, FrameRequester, FrameScheduler,
    RenderLoopController, SurfaceState,
};

use crate::config::HostConfig;
use crate::gl::{GlSwap, GlutinConfigSource, GlutinContextFactory, WindowTarget};
use crate::input::InputTranslator;

#[cfg(target_os = "android")]
const BASE_DPI: f64 = 160.0;
#[cfg(not(target_os = "android"))]
const BASE_DPI: f64 = 96.0;

/// Events posted to the loop from other threads.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum HostEvent {
    FrameRequested,
}

/// Maps frame requests onto the winit event loop.
struct ProxyScheduler {
    proxy: Mutex<EventLoopProxy<HostEvent>>,
}

impl FrameScheduler for ProxyScheduler {
    fn request_frame(&self) {
        if self.proxy.lock().send_event(HostEvent::FrameRequested).is_err() {
            log::trace!("event loop closed; frame request dropped");
        }
    }
}

type Controller<E> = RenderLoopController<E, GlutinConfigSource, GlutinContextFactory>;

/// Runs the host until the window closes or the engine asks to exit.
pub fn run<E: EngineBoundary + 'static>(config: HostConfig, engine: E) -> Result<()> {
    let event_loop = EventLoop::<HostEvent>::with_user_event()
        .build()
        .context("failed to create winit EventLoop")?;
    let proxy = event_loop.create_proxy();
    let mut host = Host::new(config, engine, proxy);

    event_loop
        .run_app(&mut host)
        .context("winit event loop terminated with error")?;
    Ok(())
}

struct Host<E: EngineBoundary> {
    config: HostConfig,
    proxy: EventLoopProxy<HostEvent>,

    /// Held until the controller is built on the first resume.
    engine: Option<E>,
    window: Option<Window>,
    controller: Option<Controller<E>>,

    input: InputTranslator,
    presenter: GlSwap,
    session: Option<ContinuousSession>,
    session_done: bool,
    exit_requested: bool,
}

impl<E: EngineBoundary> Host<E> {
    fn new(config: HostConfig, engine: E, proxy: EventLoopProxy<HostEvent>) -> Self {
        Self {
            config,
            proxy,
            engine: Some(engine),
            window: None,
            controller: None,
            input: InputTranslator::default(),
            presenter: GlSwap,
            session: None,
            session_done: false,
            exit_requested: false,
        }
    }

    fn ensure_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        if self.window.is_some() {
            return Ok(());
        }
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size)
            .with_transparent(self.config.surface.translucent);
        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;
        self.window = Some(window);
        Ok(())
    }

    fn window_target(&self) -> Result<(RawWindowHandle, PhysicalSize<u32>)> {
        let window = self.window.as_ref().context("no window")?;
        let handle = window
            .window_handle()
            .context("window handle unavailable")?
            .as_raw();
        Ok((handle, window.inner_size()))
    }

    fn build_controller(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let (handle, size) = self.window_target()?;
        let raw_display = event_loop
            .display_handle()
            .context("display handle unavailable")?
            .as_raw();
        // SAFETY: the display handle comes from the live event loop.
        let display = unsafe { Display::new(raw_display, DisplayApiPreference::Egl) }
            .context("failed to open EGL display")?;

        let mut surface = self.config.surface.clone();
        if self.config.dpi_override.is_none() {
            let scale = self.window.as_ref().map_or(1.0, |w| w.scale_factor());
            surface.dpi = scaled_dpi(scale);
        }

        let engine = self.engine.take().context("engine already handed over")?;
        let scheduler = FrameRequester::new(ProxyScheduler {
            proxy: Mutex::new(self.proxy.clone()),
        });
        let controller = RenderLoopController::new(
            surface,
            engine,
            GlutinConfigSource::new(display.clone(), handle),
            GlutinContextFactory::new(display, WindowTarget::new(handle, size.width, size.height)),
            scheduler,
        )
        .context("invalid surface configuration")?;

        self.controller = Some(controller);
        Ok(())
    }

    /// Delivers surface-created followed by surface-changed for the current window.
    fn create_surface(&mut self) -> Result<()> {
        let (handle, size) = self.window_target()?;
        let controller = self.controller.as_mut().context("no controller")?;

        let (source, factory) = controller.platform_mut();
        source.retarget(handle);
        factory.retarget(WindowTarget::new(handle, size.width, size.height));

        let (w, h) = to_i32(size);
        controller.on_surface_created(w, h)?;
        controller.on_surface_changed(w, h)?;
        Ok(())
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        let Some(controller) = self.controller.as_mut() else {
            return;
        };
        if let Some(ctx) = controller.context() {
            ctx.resize(size.width, size.height);
        }
        let (w, h) = to_i32(size);
        if let Err(e) = controller.on_surface_changed(w, h) {
            log::debug!("resize ignored: {e}");
        }
    }

    fn redraw(&mut self) {
        let Some(controller) = self.controller.as_mut() else {
            return;
        };
        if controller.on_draw_frame() == FrameOutcome::Painted {
            if let Err(e) = controller.present(&mut self.presenter) {
                log::error!("{e}");
            }
        }
        if controller.wants_exit() {
            self.exit_requested = true;
        }
    }

    fn forward(&mut self, events: Vec<InputEvent>) {
        let Some(controller) = self.controller.as_mut() else {
            return;
        };
        for event in events {
            // Consumed input may have queued work inside the engine.
            if controller.forward_input(event) == Some(true) {
                controller.request_frame();
            }
        }
    }

    fn handle_key(&mut self, event: &KeyEvent) {
        if event.state != ElementState::Pressed || event.repeat {
            return;
        }
        match &event.logical_key {
            Key::Named(NamedKey::ContextMenu) => self.forward(vec![InputEvent::MenuButton]),
            Key::Named(NamedKey::Escape) if self.session.is_some() => {
                if let Some(controller) = &self.controller {
                    log::info!("stopping continuous presentation");
                    controller.run_flag().stop();
                }
            }
            _ => {}
        }
    }

    /// Starts the continuous session once the surface is first sized.
    fn maybe_begin_session(&mut self) {
        if !self.config.continuous || self.session_done || self.session.is_some() {
            return;
        }
        let Some(controller) = self.controller.as_mut() else {
            return;
        };
        if !matches!(controller.state(), SurfaceState::Sized { .. }) {
            return;
        }
        match controller.begin_continuous() {
            Ok(session) => self.session = Some(session),
            Err(e) => {
                log::warn!("continuous presentation not started: {e}");
                self.session_done = true;
            }
        }
    }

    fn step_session(&mut self) {
        let (Some(controller), Some(session)) = (self.controller.as_mut(), self.session.as_mut())
        else {
            return;
        };
        let keep_going = match controller.step_continuous(session, &mut self.presenter) {
            Ok(more) => more,
            Err(e) => {
                log::error!("continuous frame failed: {e}");
                false
            }
        };
        if !keep_going {
            self.end_session();
        }
    }

    fn end_session(&mut self) {
        if let (Some(controller), Some(session)) = (self.controller.as_mut(), self.session.take()) {
            controller.end_continuous(session);
            self.session_done = true;
        }
    }

    fn teardown(&mut self, event_loop: &ActiveEventLoop) {
        self.end_session();
        if let Some(controller) = self.controller.as_mut() {
            controller.on_teardown();
        }
        self.exit_requested = true;
        event_loop.exit();
    }
}

impl<E: EngineBoundary> ApplicationHandler<HostEvent> for Host<E> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let result = self.ensure_window(event_loop).and_then(|()| {
            if self.controller.is_none() {
                self.build_controller(event_loop)
            } else {
                if let Some(controller) = self.controller.as_mut() {
                    controller.on_resume();
                }
                Ok(())
            }
        });
        if let Err(e) = result {
            log::error!("failed to start surface: {e:#}");
            self.exit_requested = true;
            event_loop.exit();
            return;
        }

        // Failures leave the surface unrendered; the loop keeps running.
        if let Err(e) = self.create_surface() {
            log::error!("surface initialization failed: {e:#}");
        }
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(controller) = self.controller.as_mut() {
            controller.on_pause();
        }
        self.end_session();
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: HostEvent) {
        match event {
            HostEvent::FrameRequested => {
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        match &event {
            WindowEvent::CloseRequested => {
                self.teardown(event_loop);
                return;
            }
            WindowEvent::Resized(size) => self.resize(*size),
            WindowEvent::RedrawRequested => self.redraw(),
            WindowEvent::KeyboardInput { event: key, .. } => self.handle_key(key),
            _ => {
                let events = self.input.translate(&event, Instant::now());
                if !events.is_empty() {
                    self.forward(events);
                }
            }
        }

        if self.exit_requested {
            self.teardown(event_loop);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.maybe_begin_session();
        if self.session.is_some() {
            self.step_session();
        }

        if self.controller.as_ref().is_some_and(|c| c.wants_exit()) {
            self.teardown(event_loop);
            return;
        }

        event_loop.set_control_flow(if self.session.is_some() {
            ControlFlow::Poll
        } else {
            ControlFlow::Wait
        });
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.end_session();
        if let Some(controller) = self.controller.as_mut() {
            controller.on_teardown();
        }
    }
}

fn to_i32(size: PhysicalSize<u32>) -> (i32, i32) {
    (
        i32::try_from(size.width).unwrap_or(i32::MAX),
        i32::try_from(size.height).unwrap_or(i32::MAX),
    )
}

/// Dots per inch for a window scale factor.
fn scaled_dpi(scale_factor: f64) -> i32 {
    (scale_factor * BASE_DPI).round().max(1.0) as i32
}
