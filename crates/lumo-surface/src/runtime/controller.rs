use crate::device::{
    CapabilityMatcher, ConfigSource, ContextFactory, ContextProvisioner, Result, SurfaceConfig,
    SurfaceError,
};
use crate::engine::{EngineBoundary, EngineCapabilities, InputEvent};

use super::{
    BufferPresenter, ContinuousSession, FrameCallback, FrameOutcome, FrameRequester, PresentGate,
    PresentMode, RunFlag, SurfaceEvent, SurfaceState,
};

/// Drives the surface lifecycle and decides when the engine paints.
///
/// Frames are produced on demand: after sizing, when the engine reports
/// unfinished work, or when a `FrameRequester` asks. A continuous session can
/// take over presentation for long-running progressive work; the two modes
/// never overlap.
///
/// All methods must be called from the rendering thread that owns the context.
pub struct RenderLoopController<E, S, F>
where
    E: EngineBoundary,
    S: ConfigSource,
    F: ContextFactory<Config = S::Config>,
{
    engine: E,
    source: S,
    matcher: CapabilityMatcher,
    provisioner: ContextProvisioner<F>,
    config: SurfaceConfig,

    requester: FrameRequester,
    gate: PresentGate,
    running: RunFlag,

    state: SurfaceState,
    capabilities: EngineCapabilities,

    /// Engine initialized at least once and not yet closed.
    engine_live: bool,
    close_sent: bool,
    deferred_frame: bool,
}

impl<E, S, F> RenderLoopController<E, S, F>
where
    E: EngineBoundary,
    S: ConfigSource,
    F: ContextFactory<Config = S::Config>,
{
    pub fn new(
        config: SurfaceConfig,
        engine: E,
        source: S,
        factory: F,
        requester: FrameRequester,
    ) -> Result<Self> {
        config.validate()?;

        let matcher = CapabilityMatcher::new(config.profile()).with_verbose(config.verbose_configs);

        Ok(Self {
            engine,
            source,
            matcher,
            provisioner: ContextProvisioner::new(factory),
            config,
            requester,
            gate: PresentGate::default(),
            running: RunFlag::default(),
            state: SurfaceState::Uninitialized,
            capabilities: EngineCapabilities::default(),
            engine_live: false,
            close_sent: false,
            deferred_frame: false,
        })
    }

    pub fn state(&self) -> SurfaceState {
        self.state
    }

    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Capabilities reported by the engine at the last initialization.
    pub fn capabilities(&self) -> EngineCapabilities {
        self.capabilities
    }

    /// Active platform context, if any.
    pub fn context(&self) -> Option<&F::Context> {
        self.provisioner.active().map(|ctx| ctx.context())
    }

    pub fn provisioner(&self) -> &ContextProvisioner<F> {
        &self.provisioner
    }

    /// Platform seams, e.g. to retarget a recreated native window before
    /// the next `on_surface_created`.
    pub fn platform_mut(&mut self) -> (&mut S, &mut F) {
        (&mut self.source, self.provisioner.factory_mut())
    }

    /// Handle for scheduling frames from other threads.
    pub fn frame_requester(&self) -> FrameRequester {
        self.requester.clone()
    }

    /// Handle for stopping a continuous session from other threads.
    pub fn run_flag(&self) -> RunFlag {
        self.running.clone()
    }

    pub fn present_gate(&self) -> &PresentGate {
        &self.gate
    }

    /// True once the engine asked to close or the surface was torn down.
    pub fn wants_exit(&self) -> bool {
        matches!(self.state, SurfaceState::Closing | SurfaceState::Closed)
    }

    pub fn request_frame(&self) {
        log::trace!("frame requested");
        self.requester.request();
    }

    /// Forwards one input event to the engine.
    ///
    /// Returns the engine's consumed flag for pointer/touch input. Input that
    /// arrives while the engine is not live is dropped and reported as not
    /// consumed.
    pub fn forward_input(&mut self, event: InputEvent) -> Option<bool> {
        if !self.state.is_live() {
            log::debug!("dropping {} while {}", event.name(), self.state);
            return event.reports_consumed().then_some(false);
        }
        event.forward(&mut self.engine)
    }

    /// Swaps buffers after an on-demand frame.
    pub fn present<P: BufferPresenter<F::Context>>(&mut self, presenter: &mut P) -> Result<()> {
        let _claim = self.gate.try_claim(PresentMode::OnDemand)?;
        let ctx = self
            .provisioner
            .active()
            .ok_or_else(|| SurfaceError::Platform("present without an active context".to_string()))?;
        presenter.present(ctx.context())
    }

    // ── continuous presentation ───────────────────────────────────────────

    /// Starts a continuous session and sets the run flag.
    ///
    /// Only valid on a sized surface. Fails with `PresentationBusy` while
    /// another session holds the gate.
    pub fn begin_continuous(&mut self) -> Result<ContinuousSession> {
        if !matches!(self.state, SurfaceState::Sized { .. }) {
            return Err(self.invalid("begin continuous presentation"));
        }
        let claim = self.gate.try_claim(PresentMode::Continuous)?;
        self.running.start();
        log::info!("continuous presentation started");
        Ok(ContinuousSession { claim, frames: 0 })
    }

    /// Paints and presents one frame of a continuous session.
    ///
    /// Returns whether the session should keep going: `false` once the run
    /// flag is cleared, the surface left the sized state, or the engine asked
    /// to close.
    pub fn step_continuous<P: BufferPresenter<F::Context>>(
        &mut self,
        session: &mut ContinuousSession,
        presenter: &mut P,
    ) -> Result<bool> {
        if !self.running.is_running() || !matches!(self.state, SurfaceState::Sized { .. }) {
            return Ok(false);
        }

        // The session presents every iteration; the "more frames" hint only matters on demand.
        let _ = self.engine.update_and_paint();

        let ctx = self
            .provisioner
            .active()
            .ok_or_else(|| SurfaceError::Platform("continuous frame without an active context".to_string()))?;
        presenter.present(ctx.context())?;
        session.frames += 1;

        if self.engine.should_close() {
            self.begin_close();
            return Ok(false);
        }

        Ok(self.running.is_running())
    }

    /// Ends a session, releases the gate and hands control back to the
    /// on-demand loop with one frame request.
    pub fn end_continuous(&mut self, session: ContinuousSession) -> u64 {
        self.running.stop();
        let frames = session.frames;
        log::info!(
            "{} presentation ended after {frames} frames",
            session.claim.mode().name()
        );
        drop(session);

        if std::mem::take(&mut self.deferred_frame) {
            log::debug!("platform draw was deferred during the session");
        }
        if matches!(self.state, SurfaceState::Sized { .. }) {
            self.request_frame();
        }
        frames
    }

    /// Runs a continuous session until the run flag clears or the engine closes.
    pub fn run_continuous<P: BufferPresenter<F::Context>>(&mut self, presenter: &mut P) -> Result<u64> {
        let mut session = self.begin_continuous()?;
        let outcome = loop {
            match self.step_continuous(&mut session, presenter) {
                Ok(true) => continue,
                Ok(false) => break Ok(()),
                Err(e) => break Err(e),
            }
        };
        let frames = self.end_continuous(session);
        outcome.map(|()| frames)
    }

    // ── internals ─────────────────────────────────────────────────────────

    fn begin_close(&mut self) {
        if !self.close_sent {
            log::info!("engine requested close");
            self.engine.close();
            self.close_sent = true;
        }
        self.running.stop();
        self.state = SurfaceState::Closing;
    }

    fn invalid(&self, event: impl ToString) -> SurfaceError {
        SurfaceError::InvalidTransition {
            state: self.state.to_string(),
            event: event.to_string(),
        }
    }
}

impl<E, S, F> FrameCallback for RenderLoopController<E, S, F>
where
    E: EngineBoundary,
    S: ConfigSource,
    F: ContextFactory<Config = S::Config>,
{
    fn on_surface_created(&mut self, width: i32, height: i32) -> Result<()> {
        if matches!(self.state, SurfaceState::Closing | SurfaceState::Closed) {
            return Err(self.invalid(SurfaceEvent::Created { width, height }));
        }

        if self.provisioner.is_active() {
            log::info!("surface recreated while {}; releasing the old context", self.state);
            self.provisioner.destroy_context();
            self.state = SurfaceState::Uninitialized;
        }

        let candidate = self.matcher.choose(&mut self.source)?;
        self.provisioner.create_context(candidate.handle)?;

        log::info!(
            "initializing engine {width}x{height} @ {} dpi",
            self.config.dpi
        );
        self.engine
            .initialize(width, height, self.config.dpi, &self.config.storage_root);
        self.engine_live = true;
        self.capabilities = EngineCapabilities::query(&mut self.engine);
        self.state = SurfaceState::Created;
        Ok(())
    }

    fn on_surface_changed(&mut self, width: i32, height: i32) -> Result<()> {
        if !self.state.is_live() {
            return Err(self.invalid(SurfaceEvent::Changed { width, height }));
        }

        log::debug!("surface changed to {width}x{height}");
        self.engine.resize(width, height);
        self.state = SurfaceState::Sized { width, height };
        self.request_frame();
        Ok(())
    }

    fn on_draw_frame(&mut self) -> FrameOutcome {
        match self.state {
            SurfaceState::Sized { .. } => {}
            SurfaceState::Created => {
                log::debug!("draw before the first resize; skipped");
                return FrameOutcome::NoFrame;
            }
            other => {
                log::trace!("draw while {other}; skipped");
                return FrameOutcome::NoFrame;
            }
        }

        let _claim = match self.gate.try_claim(PresentMode::OnDemand) {
            Ok(claim) => claim,
            Err(_) => {
                log::trace!("draw deferred to the continuous session");
                self.deferred_frame = true;
                return FrameOutcome::Deferred;
            }
        };

        if self.engine.update_and_paint() {
            self.request_frame();
        }
        if self.engine.should_close() {
            self.begin_close();
        }
        FrameOutcome::Painted
    }

    fn on_pause(&mut self) {
        if !self.state.is_live() {
            log::debug!("pause while {}; ignored", self.state);
            return;
        }
        log::info!("surface paused; releasing context");
        self.running.stop();
        self.provisioner.destroy_context();
        self.state = SurfaceState::Paused;
    }

    fn on_resume(&mut self) {
        log::info!("surface resumed while {}", self.state);
    }

    fn on_teardown(&mut self) {
        if self.state == SurfaceState::Closed {
            log::debug!("teardown after close; ignored");
            return;
        }

        self.running.stop();
        if self.engine_live && !self.close_sent {
            self.engine.close();
            self.close_sent = true;
        }
        if self.provisioner.is_active() {
            self.provisioner.destroy_context();
        }
        self.engine_live = false;
        self.state = SurfaceState::Closed;
        log::info!("surface torn down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{ConfigAttributes, ConfigCandidate};
    use crate::engine::MouseButton;
    use crate::testing::{
        CountingScheduler, EngineCall, FakeFactory, FakePresenter, FakeSource, Journal,
        RecordingEngine,
    };

    type Controller = RenderLoopController<RecordingEngine, FakeSource, FakeFactory>;

    fn rgb565() -> FakeSource {
        FakeSource::new(vec![ConfigCandidate::new(
            1,
            ConfigAttributes::with_sizes(5, 6, 5, 0, 16, 0),
        )])
    }

    fn controller_with(engine: RecordingEngine, source: FakeSource) -> (Controller, Journal) {
        let journal = engine.journal();
        let requester = FrameRequester::new(CountingScheduler::new(journal.clone()));
        let config = SurfaceConfig {
            storage_root: "/data/files".to_string(),
            ..Default::default()
        };
        let c = RenderLoopController::new(config, engine, source, FakeFactory::default(), requester)
            .unwrap();
        (c, journal)
    }

    fn controller() -> (Controller, Journal) {
        controller_with(RecordingEngine::default(), rgb565())
    }

    fn sized() -> (Controller, Journal) {
        let (mut c, j) = controller();
        c.on_surface_created(0, 0).unwrap();
        c.on_surface_changed(640, 480).unwrap();
        j.clear();
        (c, j)
    }

    // ── creation ──────────────────────────────────────────────────────────

    #[test]
    fn created_initializes_engine_once_with_dpi_and_root() {
        let (mut c, j) = controller();
        c.on_surface_created(0, 0).unwrap();

        assert_eq!(c.state(), SurfaceState::Created);
        assert!(c.context().is_some());
        let inits: Vec<_> = j
            .calls()
            .into_iter()
            .filter(|call| matches!(call, EngineCall::Initialize(..)))
            .collect();
        assert_eq!(inits, vec![EngineCall::Initialize(0, 0, 160, "/data/files".to_string())]);
    }

    #[test]
    fn created_queries_capabilities() {
        let mut engine = RecordingEngine::default();
        engine.rotation = true;
        let (mut c, _) = controller_with(engine, rgb565());
        c.on_surface_created(1, 1).unwrap();
        assert!(c.capabilities().rotation_input);
        assert!(!c.capabilities().image_input);
    }

    #[test]
    fn missing_configuration_aborts_creation() {
        let (mut c, j) = controller_with(RecordingEngine::default(), FakeSource::new(vec![]));
        let err = c.on_surface_created(100, 100).unwrap_err();

        assert_eq!(err, SurfaceError::ConfigurationUnavailable);
        assert_eq!(c.state(), SurfaceState::Uninitialized);
        assert!(j.calls().is_empty());
    }

    #[test]
    fn inexact_configuration_aborts_creation() {
        let source = FakeSource::new(vec![ConfigCandidate::new(
            1,
            ConfigAttributes::with_sizes(8, 8, 8, 8, 24, 8),
        )]);
        let (mut c, j) = controller_with(RecordingEngine::default(), source);

        assert!(matches!(
            c.on_surface_created(100, 100),
            Err(SurfaceError::ExactMatchNotFound { .. })
        ));
        assert!(c.context().is_none());
        assert!(j.calls().is_empty());
    }

    #[test]
    fn invalid_config_is_rejected_up_front() {
        let config = SurfaceConfig {
            storage_root: "bad\0root".to_string(),
            ..Default::default()
        };
        let engine = RecordingEngine::default();
        let requester = FrameRequester::new(CountingScheduler::new(engine.journal()));
        let result =
            RenderLoopController::new(config, engine, rgb565(), FakeFactory::default(), requester);
        assert!(matches!(result, Err(SurfaceError::InvalidConfig(_))));
    }

    // ── sizing ────────────────────────────────────────────────────────────

    #[test]
    fn changed_before_created_is_rejected() {
        let (mut c, j) = controller();
        assert!(matches!(
            c.on_surface_changed(10, 10),
            Err(SurfaceError::InvalidTransition { .. })
        ));
        assert!(j.calls().is_empty());
    }

    #[test]
    fn two_changes_resize_twice_each_followed_by_one_request() {
        let (mut c, j) = controller();
        c.on_surface_created(0, 0).unwrap();
        j.clear();

        c.on_surface_changed(800, 600).unwrap();
        c.on_surface_changed(600, 800).unwrap();

        assert_eq!(
            j.calls(),
            vec![
                EngineCall::Resize(800, 600),
                EngineCall::FrameRequested,
                EngineCall::Resize(600, 800),
                EngineCall::FrameRequested,
            ]
        );
        assert_eq!(c.state(), SurfaceState::Sized { width: 600, height: 800 });
    }

    #[test]
    fn initialize_precedes_resize_precedes_paint() {
        let (mut c, j) = controller();
        c.on_surface_created(0, 0).unwrap();
        c.on_surface_changed(320, 240).unwrap();
        c.on_draw_frame();

        let calls = j.calls();
        let pos = |pred: fn(&EngineCall) -> bool| calls.iter().position(pred).unwrap();
        let init = pos(|c| matches!(c, EngineCall::Initialize(..)));
        let resize = pos(|c| matches!(c, EngineCall::Resize(..)));
        let paint = pos(|c| matches!(c, EngineCall::UpdateAndPaint));
        assert!(init < resize && resize < paint);
    }

    // ── drawing ───────────────────────────────────────────────────────────

    #[test]
    fn draw_before_resize_paints_nothing() {
        let (mut c, j) = controller();
        c.on_surface_created(0, 0).unwrap();
        j.clear();
        assert_eq!(c.on_draw_frame(), FrameOutcome::NoFrame);
        assert!(j.calls().is_empty());
    }

    #[test]
    fn more_work_requests_exactly_one_frame_per_paint() {
        let (mut c, j) = sized();
        c.engine_mut().paint_results.extend([true, true, true, false]);

        for _ in 0..4 {
            assert_eq!(c.on_draw_frame(), FrameOutcome::Painted);
        }

        assert_eq!(j.count(|call| *call == EngineCall::UpdateAndPaint), 4);
        assert_eq!(j.count(|call| *call == EngineCall::FrameRequested), 3);
    }

    #[test]
    fn idle_scene_requests_no_frames() {
        let (mut c, j) = sized();
        c.on_draw_frame();
        assert_eq!(j.count(|call| *call == EngineCall::FrameRequested), 0);
    }

    #[test]
    fn should_close_closes_once_and_stops_painting() {
        let (mut c, j) = sized();
        c.engine_mut().close_after_paints = Some(2);

        c.on_draw_frame();
        assert_eq!(c.state(), SurfaceState::Sized { width: 640, height: 480 });
        c.on_draw_frame();
        assert_eq!(c.state(), SurfaceState::Closing);
        assert!(c.wants_exit());

        assert_eq!(c.on_draw_frame(), FrameOutcome::NoFrame);
        c.on_teardown();

        assert_eq!(j.count(|call| *call == EngineCall::Close), 1);
        assert_eq!(j.count(|call| *call == EngineCall::UpdateAndPaint), 2);
        assert_eq!(c.state(), SurfaceState::Closed);
    }

    #[test]
    fn close_is_checked_even_when_more_work_is_pending() {
        let (mut c, j) = sized();
        c.engine_mut().paint_results.push_back(true);
        c.engine_mut().close_after_paints = Some(1);

        c.on_draw_frame();

        assert_eq!(j.count(|call| *call == EngineCall::FrameRequested), 1);
        assert_eq!(j.count(|call| *call == EngineCall::Close), 1);
        assert_eq!(c.state(), SurfaceState::Closing);
    }

    #[test]
    fn present_swaps_active_context() {
        let (mut c, _) = sized();
        let mut presenter = FakePresenter::default();
        c.on_draw_frame();
        c.present(&mut presenter).unwrap();
        assert_eq!(presenter.presented, vec![1]);
    }

    // ── teardown / pause ──────────────────────────────────────────────────

    #[test]
    fn teardown_closes_engine_and_destroys_context() {
        let (mut c, j) = sized();
        c.on_teardown();

        assert_eq!(j.calls(), vec![EngineCall::Close]);
        assert_eq!(c.provisioner().factory().destroyed, 1);
        assert!(c.context().is_none());

        c.on_teardown();
        assert_eq!(j.count(|call| *call == EngineCall::Close), 1);
        assert_eq!(c.provisioner().factory().destroyed, 1);
    }

    #[test]
    fn teardown_before_creation_touches_nothing() {
        let (mut c, j) = controller();
        c.on_teardown();
        assert!(j.calls().is_empty());
        assert_eq!(c.provisioner().factory().destroyed, 0);
        assert_eq!(c.state(), SurfaceState::Closed);
    }

    #[test]
    fn no_engine_calls_after_closed() {
        let (mut c, j) = sized();
        c.on_teardown();
        j.clear();

        assert!(c.on_surface_created(10, 10).is_err());
        assert!(c.on_surface_changed(10, 10).is_err());
        assert_eq!(c.on_draw_frame(), FrameOutcome::NoFrame);
        assert_eq!(
            c.forward_input(InputEvent::PointerDown { button: MouseButton::Left, x: 1, y: 1 }),
            Some(false)
        );
        assert!(j.calls().is_empty());
    }

    #[test]
    fn pause_resume_recreates_context_and_reinitializes() {
        let (mut c, j) = sized();
        c.on_pause();
        assert_eq!(c.state(), SurfaceState::Paused);
        assert!(c.context().is_none());
        assert_eq!(c.on_draw_frame(), FrameOutcome::NoFrame);

        c.on_resume();
        c.on_surface_created(640, 480).unwrap();
        c.on_surface_changed(640, 480).unwrap();

        let factory = c.provisioner().factory();
        assert_eq!(factory.created.len(), 2);
        assert_eq!(factory.destroyed, 1);
        assert_eq!(j.count(|call| matches!(call, EngineCall::Initialize(..))), 1);
        assert_eq!(j.count(|call| *call == EngineCall::Close), 0);
    }

    #[test]
    fn surface_recreated_without_pause_destroys_then_creates() {
        let (mut c, _) = sized();
        c.on_surface_created(640, 480).unwrap();

        let factory = c.provisioner().factory();
        assert_eq!(factory.created.len(), 2);
        assert_eq!(factory.destroyed, 1);
        assert_eq!(c.state(), SurfaceState::Created);
    }

    // ── input ─────────────────────────────────────────────────────────────

    #[test]
    fn input_is_forwarded_verbatim_with_result() {
        let mut engine = RecordingEngine::default();
        engine.consume_input = true;
        let (mut c, j) = controller_with(engine, rgb565());
        c.on_surface_created(0, 0).unwrap();
        j.clear();

        let consumed = c.forward_input(InputEvent::DoubleClick { button: MouseButton::Left, x: 5, y: 6 });
        let none = c.forward_input(InputEvent::OrientationEuler { pitch: 0.1, yaw: 0.2, roll: 0.3 });

        assert_eq!(consumed, Some(true));
        assert_eq!(none, None);
        assert_eq!(
            j.calls(),
            vec![
                EngineCall::DoubleClick(MouseButton::Left, 5, 6),
                EngineCall::OrientationEuler(0.1, 0.2, 0.3),
            ]
        );
    }

    #[test]
    fn input_before_creation_is_dropped() {
        let (mut c, j) = controller();
        assert_eq!(c.forward_input(InputEvent::MenuButton), None);
        assert!(j.calls().is_empty());
    }

    // ── continuous presentation ───────────────────────────────────────────

    #[test]
    fn continuous_requires_sized_surface() {
        let (mut c, _) = controller();
        assert!(matches!(
            c.begin_continuous(),
            Err(SurfaceError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn continuous_runs_until_flag_clears() {
        let (mut c, j) = sized();
        let flag = c.run_flag();
        let mut presenter = FakePresenter::default();
        presenter.stop_after = Some((3, flag));

        let frames = c.run_continuous(&mut presenter).unwrap();

        assert_eq!(frames, 3);
        assert_eq!(presenter.presented.len(), 3);
        assert_eq!(j.count(|call| *call == EngineCall::UpdateAndPaint), 3);
        assert!(!c.run_flag().is_running());
        assert_eq!(c.present_gate().owner(), None);
        // Hand-back to on-demand scheduling.
        assert_eq!(j.calls().last(), Some(&EngineCall::FrameRequested));
    }

    #[test]
    fn continuous_stops_when_engine_closes() {
        let (mut c, j) = sized();
        c.engine_mut().close_after_paints = Some(2);
        let mut presenter = FakePresenter::default();

        let frames = c.run_continuous(&mut presenter).unwrap();

        assert_eq!(frames, 2);
        assert_eq!(c.state(), SurfaceState::Closing);
        assert_eq!(j.count(|call| *call == EngineCall::Close), 1);
        assert_eq!(j.count(|call| *call == EngineCall::FrameRequested), 0);
    }

    #[test]
    fn platform_draw_is_deferred_during_session() {
        let (mut c, j) = sized();
        let mut session = c.begin_continuous().unwrap();
        let mut presenter = FakePresenter::default();

        assert!(c.step_continuous(&mut session, &mut presenter).unwrap());
        assert_eq!(c.on_draw_frame(), FrameOutcome::Deferred);
        assert!(c.present(&mut presenter).is_err());

        assert_eq!(c.end_continuous(session), 1);
        assert_eq!(j.count(|call| *call == EngineCall::UpdateAndPaint), 1);
        assert_eq!(j.count(|call| *call == EngineCall::FrameRequested), 1);
        assert_eq!(c.on_draw_frame(), FrameOutcome::Painted);
    }

    #[test]
    fn second_session_is_refused() {
        let (mut c, _) = sized();
        let session = c.begin_continuous().unwrap();
        assert_eq!(
            c.begin_continuous().unwrap_err(),
            SurfaceError::PresentationBusy("continuous")
        );
        c.end_continuous(session);
        assert!(c.begin_continuous().is_ok());
    }

    #[test]
    fn presenter_failure_ends_session_and_releases_gate() {
        let (mut c, _) = sized();
        let mut presenter = FakePresenter::default();
        presenter.fail = true;

        assert!(matches!(
            c.run_continuous(&mut presenter),
            Err(SurfaceError::Platform(_))
        ));
        assert_eq!(c.present_gate().owner(), None);
        assert!(!c.run_flag().is_running());
    }

    #[test]
    fn pause_stops_a_running_session() {
        let (mut c, _) = sized();
        let mut session = c.begin_continuous().unwrap();
        c.on_pause();
        let mut presenter = FakePresenter::default();
        assert!(!c.step_continuous(&mut session, &mut presenter).unwrap());
        assert_eq!(c.end_continuous(session), 0);
    }

    #[test]
    fn dispatch_routes_events() {
        let (mut c, _) = controller();
        c.dispatch(SurfaceEvent::Created { width: 0, height: 0 }).unwrap();
        c.dispatch(SurfaceEvent::Changed { width: 2, height: 2 }).unwrap();
        assert_eq!(c.dispatch(SurfaceEvent::DrawFrame).unwrap(), FrameOutcome::Painted);
        c.dispatch(SurfaceEvent::Teardown).unwrap();
        assert_eq!(c.state(), SurfaceState::Closed);
    }
}
