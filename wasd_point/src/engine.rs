use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::{
    config::DemoConfig,
    hud::CoordinateReadout,
    input::{translate_window_event, InputEvent, KeyRouter},
    math::Vec2,
    movement::MovementState,
    render::{render_all, Frame, PositionRenderer},
};

/// Configuration values for the demo window and loop timing.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Time between movement ticks.
    pub frame_interval: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            title: "WASD Point".into(),
            width: 800,
            height: 600,
            frame_interval: Duration::from_secs_f64(1.0 / 60.0), // 60 ticks per second
        }
    }
}

/// Main entrypoint for running the demo loop.
pub struct Engine {
    config: EngineConfig,
    router: KeyRouter,
    readout: CoordinateReadout,
}

impl Engine {
    /// Create a new engine instance with default configuration.
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
            router: KeyRouter::default(),
            readout: CoordinateReadout::default(),
        }
    }

    /// Take window settings and the quit key from a demo config.
    pub fn from_config(config: &DemoConfig) -> Self {
        Self::new()
            .with_title(config.title.clone())
            .with_size(config.width, config.height)
            .with_router(config.key_router())
    }

    /// Override the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.config.title = title.into();
        self
    }

    /// Override the initial window size in logical pixels.
    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.config.width = width;
        self.config.height = height;
        self
    }

    /// Override the tick interval.
    #[must_use]
    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.config.frame_interval = interval;
        self
    }

    /// Override the key router (and with it the quit key).
    #[must_use]
    pub fn with_router(mut self, router: KeyRouter) -> Self {
        self.router = router;
        self
    }

    /// Override the readout format.
    #[must_use]
    pub fn with_readout(mut self, readout: CoordinateReadout) -> Self {
        self.readout = readout;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Build the per-run context without opening a window.
    pub fn context(
        &self,
        state: MovementState,
        renderers: Vec<Box<dyn PositionRenderer>>,
    ) -> EngineContext {
        EngineContext {
            state,
            router: self.router,
            readout: self.readout,
            renderers,
            exit_requested: false,
        }
    }

    /// Run until the window is closed or the state asks to quit.
    ///
    /// Returns immediately when no display is available.
    pub fn run(self, state: MovementState, renderers: Vec<Box<dyn PositionRenderer>>) -> Result<()> {
        if is_headless() {
            log::warn!("No display available; not opening a window");
            return Ok(());
        }

        let ctx = self.context(state, renderers);
        let mut app = App {
            config: self.config,
            ctx,
            window: None,
            error: None,
        };

        let event_loop = EventLoop::new()?;
        log::info!("Starting '{}'", app.config.title);
        event_loop.run_app(&mut app)?;

        let final_position = app.ctx.state().position();
        log::info!("Stopped at {}", app.ctx.readout().format(final_position));

        match app.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-run state driven by the event loop: the movement state, the input
/// router and the renderers it feeds.
pub struct EngineContext {
    state: MovementState,
    router: KeyRouter,
    readout: CoordinateReadout,
    renderers: Vec<Box<dyn PositionRenderer>>,
    exit_requested: bool,
}

impl EngineContext {
    /// Route one input event to the movement state.
    pub fn handle_input(&mut self, event: InputEvent) {
        self.router.route(&mut self.state, event);
    }

    /// Advance to `now` and hand the new position to every renderer.
    pub fn update(&mut self, now: Instant, window: Option<&Window>) -> Result<Vec2> {
        let position = self.state.tick(now);
        let readout = self.readout.format(position);
        let frame = Frame {
            position,
            readout: &readout,
            window,
        };
        render_all(&mut self.renderers, &frame)?;
        Ok(position)
    }

    /// Request that the loop exit after the current frame.
    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    /// True once the window was closed or quit was requested.
    pub fn should_exit(&self) -> bool {
        self.exit_requested || self.state.should_quit()
    }

    pub fn state(&self) -> &MovementState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut MovementState {
        &mut self.state
    }

    pub fn readout(&self) -> &CoordinateReadout {
        &self.readout
    }
}

struct App {
    config: EngineConfig,
    ctx: EngineContext,
    window: Option<Window>,
    error: Option<anyhow::Error>,
}

impl App {
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("Stopping: {err:?}");
        self.error = Some(err);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));
        match event_loop.create_window(attributes) {
            Ok(window) => {
                self.window = Some(window);
                event_loop.set_control_flow(ControlFlow::WaitUntil(
                    Instant::now() + self.config.frame_interval,
                ));
            }
            Err(err) => self.fail(event_loop, anyhow!("failed to create window: {err}")),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        match &self.window {
            Some(window) if window.id() == window_id => {}
            _ => return,
        }

        if let Some(input) = translate_window_event(&event) {
            self.ctx.handle_input(input);
        }

        if let WindowEvent::CloseRequested = event {
            self.ctx.request_exit();
        }

        if self.ctx.should_exit() {
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            return;
        }

        let now = Instant::now();
        if let Err(err) = self.ctx.update(now, self.window.as_ref()) {
            self.fail(event_loop, err);
            return;
        }

        if self.ctx.should_exit() {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::WaitUntil(now + self.config.frame_interval));
    }
}

/// True when there is no display to open a window on.
fn is_headless() -> bool {
    #[cfg(any(
        target_os = "linux",
        target_os = "freebsd",
        target_os = "dragonfly",
        target_os = "netbsd",
        target_os = "openbsd",
    ))]
    {
        if std::env::var_os("DISPLAY").is_none() && std::env::var_os("WAYLAND_DISPLAY").is_none() {
            return true;
        }
    }
    false
}
