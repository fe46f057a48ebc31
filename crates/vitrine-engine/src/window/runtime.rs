use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App as CoreApp, AppControl, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::platform::winit::translate_window_event;
use crate::input::{InputFrame, InputState};
use crate::time::{FrameClock, FrameTime};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "vitrine".to_string(),
            initial_size: LogicalSize::new(800.0, 800.0),
        }
    }
}

/// Runtime context passed to the application.
///
/// Commands are buffered and applied after the current callback returns.
#[derive(Default)]
pub struct RuntimeCtx {
    commands: Vec<Command>,
}

impl RuntimeCtx {
    pub fn exit(&mut self) {
        self.commands.push(Command::Exit);
    }
}

enum Command {
    Exit,
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens one window, hands its GPU context to `app` and drives frames
    /// until the window closes or the app exits.
    ///
    /// Returns the setup error (window, GPU or `App::on_gpu_ready`) if the
    /// loop ended because of one.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.fatal.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    input_state: InputState,
    input_frame: InputFrame,
    clock: FrameClock,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    window: Option<WindowEntry>,
    fatal: Option<anyhow::Error>,
    exit_requested: bool,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            window: None,
            fatal: None,
            exit_requested: false,
        }
    }

    fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    fn fail(&mut self, err: anyhow::Error) {
        log::error!("{err:#}");
        self.fatal = Some(err);
        self.request_exit();
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        log::info!("window created: `{}`", self.config.title);
        let gpu_init = self.gpu_init.clone();

        let entry = WindowEntryTryBuilder {
            input_state: InputState::default(),
            input_frame: InputFrame::default(),
            clock: FrameClock::default(),
            window,
            gpu_builder: |w| {
                pollster::block_on(Gpu::new(w, gpu_init))
                    .context("GPU initialization failed")
            },
        }
        .try_build()?;

        entry
            .with_gpu(|gpu| self.app.on_gpu_ready(gpu))
            .context("application setup failed")?;

        Ok(entry)
    }

    fn apply_commands(&mut self, event_loop: &ActiveEventLoop, mut ctx: RuntimeCtx) {
        for cmd in ctx.commands.drain(..) {
            match cmd {
                Command::Exit => self.request_exit(),
            }
        }

        if self.exit_requested {
            event_loop.exit();
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId) {
        let mut runtime_ctx = RuntimeCtx::default();
        let mut app_control = AppControl::Continue;

        // Split borrows to avoid `self` capture inside `ouroboros` closures.
        let (app, window) = (&mut self.app, &mut self.window);

        if let Some(entry) = window.as_mut() {
            entry.with_mut(|fields| {
                let ft: FrameTime = fields.clock.tick();

                // Scope to ensure `ctx` is dropped before mutating frame state.
                {
                    let mut ctx = FrameCtx {
                        window: WindowCtx {
                            id: window_id,
                            window: fields.window,
                        },
                        gpu: fields.gpu,
                        input: fields.input_state,
                        input_frame: fields.input_frame,
                        time: ft,
                        runtime: &mut runtime_ctx,
                    };

                    app_control = app.on_frame(&mut ctx);
                }

                // Clear per-frame deltas after the frame is consumed.
                fields.input_frame.clear();
            });
        }

        if app_control == AppControl::Exit {
            runtime_ctx.exit();
        }

        self.apply_commands(event_loop, runtime_ctx);
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(entry) = self.window.as_mut() {
            // Time spent suspended must not reach the simulation as one huge step.
            entry.with_clock_mut(|clock| clock.reset());
            entry.with_window(|w| w.request_redraw());
            return;
        }

        match self.create_window_entry(event_loop) {
            Ok(entry) => {
                entry.with_window(|w| w.request_redraw());
                self.window = Some(entry);
            }
            Err(e) => {
                self.fail(e);
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw: every demo animates.
        if let Some(entry) = &self.window {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        let (app, window) = (&mut self.app, &mut self.window);

        let Some(entry) = window.as_mut() else {
            return;
        };
        if entry.with_window(|w| w.id()) != window_id {
            return;
        }

        // Track exit request from callbacks without mutating `self` in the closure.
        let mut exit_from_app_event = false;

        entry.with_mut(|fields| {
            if let Some(ev) = translate_window_event(&event) {
                fields.input_state.apply_event(fields.input_frame, ev);
            }

            if app.on_window_event(window_id, &event) == AppControl::Exit {
                exit_from_app_event = true;
            }
        });

        if exit_from_app_event {
            self.request_exit();
            event_loop.exit();
            return;
        }

        // Runtime-managed window lifecycle / resize / redraw handling.
        match &event {
            WindowEvent::CloseRequested => {
                log::info!("window closed");
                self.window = None;
                self.request_exit();
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                if let Some(entry) = self.window.as_mut() {
                    log::debug!("resized to {}x{}", new_size.width, new_size.height);
                    entry.with_gpu_mut(|gpu| gpu.resize(*new_size));
                    entry.with_window(|w| w.request_redraw());
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(entry) = self.window.as_mut() {
                    let new_size = entry.with_window(|w| w.inner_size());
                    entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                    entry.with_window(|w| w.request_redraw());
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop, window_id),

            _ => {}
        }

        if self.exit_requested {
            event_loop.exit();
        }
    }
}
