use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, FrameCtx, InitCtx};
use crate::device::{Gpu, GpuInit, InitError};
use crate::input::platform::translate_window_event;
use crate::time::{FrameClock, FrameTime};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub resizable: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "triad".to_string(),
            initial_size: LogicalSize::new(800.0, 600.0),
            resizable: true,
        }
    }
}

/// Deferred request from an application callback.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Command {
    /// Raise the window close flag; the loop ends after the current callback.
    RequestClose,
    /// Reconfigure presentation; `0` disables vsync.
    SetSwapInterval(u32),
}

/// Runtime context passed to the application.
///
/// Callbacks cannot reach the window or GPU context directly while the
/// runtime is dispatching to them. Commands are buffered and applied after
/// the current callback returns.
#[derive(Debug, Default)]
pub struct RuntimeCtx {
    commands: Vec<Command>,
}

impl RuntimeCtx {
    pub fn request_close(&mut self) {
        self.commands.push(Command::RequestClose);
    }

    pub fn set_swap_interval(&mut self, interval: u32) {
        self.commands.push(Command::SetSwapInterval(interval));
    }

    /// Commands queued so far, in order.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn close_requested(&self) -> bool {
        self.commands.contains(&Command::RequestClose)
    }

    fn drain(&mut self) -> std::vec::Drain<'_, Command> {
        self.commands.drain(..)
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window, initializes `app`, and drives it until the close flag
    /// is raised.
    ///
    /// Blocks the calling thread. An `App::on_init` failure is returned as an
    /// error wrapping the `InitError`, so callers can downcast it.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.init_error.take() {
            Some(e) => Err(anyhow::Error::new(e)),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    clock: FrameClock,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: App + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    entry: Option<WindowEntry>,
    started: bool,
    close_requested: bool,
    exited: bool,
    init_error: Option<InitError>,
}

impl<A> AppState<A>
where
    A: App + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            entry: None,
            started: false,
            close_requested: false,
            exited: false,
            init_error: None,
        }
    }

    fn request_close(&mut self, event_loop: &ActiveEventLoop) {
        self.close_requested = true;
        event_loop.exit();
    }

    fn create_window_entry(&self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size)
            .with_resizable(self.config.resizable);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();

        WindowEntryTryBuilder {
            clock: FrameClock::new(),
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
    }

    /// Window + GPU context creation followed by `App::on_init`.
    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<(), InitError> {
        let entry = self.create_window_entry(event_loop)?;

        let mut runtime_ctx = RuntimeCtx::default();
        let app = &mut self.app;
        entry.with(|fields| {
            let mut ctx = InitCtx {
                window: fields.window,
                gpu: fields.gpu,
                runtime: &mut runtime_ctx,
            };
            app.on_init(&mut ctx)
        })?;

        self.entry = Some(entry);
        self.apply_commands(event_loop, runtime_ctx);
        Ok(())
    }

    fn apply_commands(&mut self, event_loop: &ActiveEventLoop, mut ctx: RuntimeCtx) {
        for cmd in ctx.drain() {
            match cmd {
                Command::RequestClose => {
                    log::info!("close requested");
                    self.request_close(event_loop);
                }
                Command::SetSwapInterval(interval) => {
                    if let Some(entry) = self.entry.as_mut() {
                        entry.with_gpu_mut(|gpu| gpu.set_swap_interval(interval));
                    }
                }
            }
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(entry) = self.entry.as_mut() else {
            return;
        };

        let mut runtime_ctx = RuntimeCtx::default();
        let app = &mut self.app;

        let control = entry.with_mut(|fields| {
            let ft: FrameTime = fields.clock.tick();
            let mut ctx = FrameCtx {
                window: fields.window,
                gpu: fields.gpu,
                time: ft,
                runtime: &mut runtime_ctx,
            };
            app.on_frame(&mut ctx)
        });

        if control == AppControl::Exit {
            runtime_ctx.request_close();
        }

        self.apply_commands(event_loop, runtime_ctx);
    }

    /// Runs `App::on_exit` and releases the window and GPU context, once.
    fn shutdown(&mut self) {
        if self.exited {
            return;
        }
        self.exited = true;

        self.app.on_exit();

        if let Some(entry) = self.entry.take() {
            let (frames, elapsed) = entry.with_clock(|c| (c.frames(), c.elapsed()));
            log::debug!("presented {frames} frames in {:.3}s", elapsed.as_secs_f64());
            drop(entry);
        }
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.started {
            return;
        }
        self.started = true;

        if let Err(e) = self.start(event_loop) {
            log::error!("initialization failed: {e}");
            self.init_error = Some(e);
            self.request_close(event_loop);
            return;
        }

        if let Some(entry) = self.entry.as_ref() {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.close_requested {
            event_loop.exit();
            return;
        }

        // Continuous rendering: every loop pass polls events and draws a frame.
        if let Some(entry) = self.entry.as_ref() {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.close_requested || self.entry.is_none() {
            return;
        }

        // The surface must follow the window before the app sees the new size.
        if let WindowEvent::Resized(new_size) = &event {
            if let Some(entry) = self.entry.as_mut() {
                entry.with_gpu_mut(|gpu| gpu.resize(*new_size));
            }
        }

        if let Some(ev) = translate_window_event(&event) {
            let mut runtime_ctx = RuntimeCtx::default();
            self.app.on_input(&ev, &mut runtime_ctx);
            self.apply_commands(event_loop, runtime_ctx);
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("window close requested by the window system");
                self.request_close(event_loop);
            }
            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(entry) = self.entry.as_mut() {
                    let new_size = entry.with_window(|w| w.inner_size());
                    entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_keep_order() {
        let mut ctx = RuntimeCtx::default();
        ctx.set_swap_interval(1);
        ctx.request_close();
        ctx.set_swap_interval(0);

        assert_eq!(
            ctx.commands(),
            &[
                Command::SetSwapInterval(1),
                Command::RequestClose,
                Command::SetSwapInterval(0)
            ]
        );
        assert!(ctx.close_requested());
    }

    #[test]
    fn fresh_ctx_has_no_close_request() {
        let ctx = RuntimeCtx::default();
        assert!(!ctx.close_requested());
        assert!(ctx.commands().is_empty());
    }

    #[test]
    fn default_window_is_800_by_600() {
        let cfg = RuntimeConfig::default();
        assert_eq!(cfg.initial_size, LogicalSize::new(800.0, 600.0));
    }
}
