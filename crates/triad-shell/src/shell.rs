use std::time::Instant;

use log::{debug, info, trace, warn};

use triad_engine::coords::Viewport;
use triad_engine::core::{App, AppControl, FrameCtx, InitCtx};
use triad_engine::device::{DebugChannel, InitError};
use triad_engine::input::{InputEvent, Key, KeyState, MouseButton, MouseButtonState, MouseWheelDelta};
use triad_engine::render::{GeometryBuffer, ProgramDesc, ShaderProgram};
use triad_engine::time::FpsCounter;
use triad_engine::window::RuntimeCtx;

use crate::config::{swap_interval, ShellConfig};
use crate::scene::TRIANGLE;

/// Lifecycle of the shell. Transitions only move forward.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub enum ShellPhase {
    Uninitialized,
    Initialized,
    Running,
    Terminated,
}

/// GPU objects owned for the lifetime of the render loop.
struct GpuResources {
    geometry: GeometryBuffer,
    program: ShaderProgram,
}

/// Remembers the previous cursor position to derive per-event offsets.
#[derive(Debug, Default)]
struct CursorTracker {
    last: Option<(f64, f64)>,
}

impl CursorTracker {
    /// Returns `(dx, dy)` since the previous position, with `dy` positive upward.
    /// The first position only seeds the tracker.
    fn update(&mut self, x: f64, y: f64) -> Option<(f64, f64)> {
        let prev = self.last.replace((x, y));
        prev.map(|(lx, ly)| (x - lx, ly - y))
    }
}

/// The application: one window, one triangle, one program, an FPS log.
///
/// Input only produces log lines, with three exceptions: the close key raises
/// the close flag, the vsync key toggles the swap interval, and resizes update
/// the viewport.
pub struct GraphicsShell {
    config: ShellConfig,
    phase: ShellPhase,
    vsync: bool,
    viewport: Viewport,
    cursor: CursorTracker,
    fps: Option<FpsCounter>,
    run_started: Option<Instant>,
    resources: Option<GpuResources>,
}

impl GraphicsShell {
    pub fn new(config: ShellConfig) -> Self {
        let vsync = config.vsync;
        info!("Constructed...");
        Self {
            config,
            phase: ShellPhase::Uninitialized,
            vsync,
            viewport: Viewport::default(),
            cursor: CursorTracker::default(),
            fps: None,
            run_started: None,
            resources: None,
        }
    }

    pub fn phase(&self) -> ShellPhase {
        self.phase
    }

    pub fn vsync(&self) -> bool {
        self.vsync
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn advance(&mut self, to: ShellPhase) {
        debug_assert!(to > self.phase, "phase {:?} -> {:?} moves backwards", self.phase, to);
        debug!("shell phase {:?} -> {:?}", self.phase, to);
        self.phase = to;
    }

    /// First frame: start the FPS window and the run timer.
    fn begin_running(&mut self, now: Instant) {
        self.fps = Some(FpsCounter::new(now));
        self.run_started = Some(now);
        self.advance(ShellPhase::Running);
    }

    fn on_key(&mut self, key: Key, state: KeyState, repeat: bool, runtime: &mut RuntimeCtx) {
        // Repeats count as presses, matching held-key behavior of the close and vsync keys.
        if state != KeyState::Pressed {
            debug!("Key released: {key}");
            return;
        }

        if repeat {
            debug!("Key repeated: {key}");
        } else {
            info!("Key pressed: {key}");
        }

        if key == self.config.close_key {
            runtime.request_close();
        } else if key == self.config.vsync_key {
            self.vsync = !self.vsync;
            info!("vsync {}", if self.vsync { "enabled" } else { "disabled" });
            runtime.set_swap_interval(swap_interval(self.vsync));
        }
    }

    fn on_scroll(&mut self, delta: MouseWheelDelta) {
        let y = delta.y();
        if y > 0.0 {
            info!("scrolling up...");
        } else if y < 0.0 {
            info!("scrolling down...");
        }
    }

    fn on_mouse_button(&mut self, button: MouseButton, state: MouseButtonState) {
        let name = match button {
            MouseButton::Left => "Left",
            MouseButton::Right => "Right",
            other => {
                debug!("mouse button {other:?} {state:?}");
                return;
            }
        };
        let action = match state {
            MouseButtonState::Pressed => "pressed",
            MouseButtonState::Released => "released",
        };
        info!("{name} mouse button {action}");
    }

    fn on_cursor(&mut self, x: f64, y: f64) {
        if let Some((dx, dy)) = self.cursor.update(x, y) {
            trace!("cursor at ({x:.1}, {y:.1}), offset ({dx:.1}, {dy:.1})");
        }
    }

    fn on_resize(&mut self, width: u32, height: u32) {
        self.viewport = Viewport::from_size(width, height);
        debug!("viewport set to {:?}", self.viewport);
    }
}

/// Stops initialization if the device reported errors before `stage` finished.
fn ensure_no_pending(debug: &DebugChannel, stage: &'static str) -> Result<(), InitError> {
    let count = debug.take_pending();
    if count == 0 {
        return Ok(());
    }
    warn!("Pending GPU error while obtaining {stage}: {count}");
    Err(InitError::PendingDeviceError { stage, count })
}

impl App for GraphicsShell {
    fn on_init(&mut self, ctx: &mut InitCtx<'_, '_>) -> Result<(), InitError> {
        let gpu = ctx.gpu;
        let info = gpu.info();
        info.log();

        ensure_no_pending(gpu.debug(), "profile query")?;
        info!("{}", info.profile);
        info!("vsync {}", if self.vsync { "enabled" } else { "disabled" });

        let size = gpu.size();
        self.viewport = Viewport::from_size(size.width, size.height);

        let geometry = GeometryBuffer::new(gpu.device(), "triad triangle", &TRIANGLE)?;
        let program = ShaderProgram::new(
            gpu.device(),
            gpu.debug(),
            &ProgramDesc {
                label: "triad program",
                source: self.config.shader_source,
                target_format: gpu.surface_format(),
                color: self.config.fill_color,
            },
        )?;

        self.resources = Some(GpuResources { geometry, program });
        self.advance(ShellPhase::Initialized);
        info!("Initialized...");
        Ok(())
    }

    fn on_input(&mut self, event: &InputEvent, runtime: &mut RuntimeCtx) {
        match *event {
            InputEvent::Key {
                key, state, repeat, ..
            } => self.on_key(key, state, repeat, runtime),
            InputEvent::CursorMoved { x, y } => self.on_cursor(x, y),
            InputEvent::MouseButton { button, state } => self.on_mouse_button(button, state),
            InputEvent::MouseWheel(delta) => self.on_scroll(delta),
            InputEvent::Resized { width, height } => self.on_resize(width, height),
        }
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if self.resources.is_none() {
            return AppControl::Exit;
        }
        if self.phase == ShellPhase::Initialized {
            self.begin_running(ctx.time.now);
        }

        let clear = self.config.clear_color;
        let viewport = self.viewport;
        let control = match self.resources.as_ref() {
            Some(res) => ctx.render(clear, viewport, |rpass| res.program.draw(rpass, &res.geometry)),
            None => AppControl::Exit,
        };

        if let Some(report) = self.fps.as_mut().and_then(|f| f.tick(ctx.time.now)) {
            info!("FPS: {:.1}", report.fps);
        }

        control
    }

    fn on_exit(&mut self) {
        if let Some(started) = self.run_started {
            info!("elapsed time: {:.3}sec", started.elapsed().as_secs_f64());
        }

        // Program and buffer go first; the runtime destroys the window and context next.
        self.resources = None;
        if self.phase != ShellPhase::Terminated {
            self.advance(ShellPhase::Terminated);
        }
        info!("Bye...");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use triad_engine::device::{DebugMessage, DebugSeverity, DebugSource, DebugType};
    use triad_engine::window::Command;

    fn shell() -> GraphicsShell {
        GraphicsShell::new(ShellConfig::default())
    }

    fn press(key: Key) -> InputEvent {
        InputEvent::Key {
            key,
            state: KeyState::Pressed,
            code: 0,
            repeat: false,
        }
    }

    fn release(key: Key) -> InputEvent {
        InputEvent::Key {
            key,
            state: KeyState::Released,
            code: 0,
            repeat: false,
        }
    }

    #[test]
    fn escape_raises_close_flag_in_one_callback() {
        let mut s = shell();
        let mut rt = RuntimeCtx::default();

        s.on_input(&press(Key::Escape), &mut rt);

        assert!(rt.close_requested());
        assert_eq!(rt.commands(), &[Command::RequestClose]);
    }

    #[test]
    fn only_escape_closes() {
        let mut s = shell();
        let mut rt = RuntimeCtx::default();

        for key in [Key::Enter, Key::Space, Key::Letter('Q'), Key::Digit(0), Key::Function(4), Key::Unknown(5)] {
            s.on_input(&press(key), &mut rt);
            s.on_input(&release(key), &mut rt);
        }
        s.on_input(&release(Key::Escape), &mut rt);

        assert!(!rt.close_requested());
    }

    #[test]
    fn vsync_toggle_twice_restores_flag() {
        let mut s = shell();
        let mut rt = RuntimeCtx::default();
        let before = s.vsync();

        s.on_input(&press(Key::Letter('V')), &mut rt);
        assert!(s.vsync());
        s.on_input(&release(Key::Letter('V')), &mut rt);
        s.on_input(&press(Key::Letter('V')), &mut rt);

        assert_eq!(s.vsync(), before);
        assert_eq!(
            rt.commands(),
            &[Command::SetSwapInterval(1), Command::SetSwapInterval(0)]
        );
    }

    #[test]
    fn held_vsync_key_repeats_toggle() {
        let mut s = shell();
        let mut rt = RuntimeCtx::default();

        s.on_input(&press(Key::Letter('V')), &mut rt);
        s.on_input(
            &InputEvent::Key {
                key: Key::Letter('V'),
                state: KeyState::Pressed,
                code: 0,
                repeat: true,
            },
            &mut rt,
        );

        assert_eq!(rt.commands().len(), 2);
        assert!(!s.vsync());
    }

    #[test]
    fn resize_sets_full_viewport() {
        let mut s = shell();
        let mut rt = RuntimeCtx::default();

        s.on_input(&InputEvent::Resized { width: 400, height: 300 }, &mut rt);

        assert_eq!(s.viewport(), Viewport::new(0.0, 0.0, 400.0, 300.0));
        assert!(rt.commands().is_empty());
    }

    #[test]
    fn pointer_input_has_no_side_effects() {
        let mut s = shell();
        let mut rt = RuntimeCtx::default();

        s.on_input(&InputEvent::CursorMoved { x: 10.0, y: 20.0 }, &mut rt);
        s.on_input(
            &InputEvent::MouseButton {
                button: MouseButton::Left,
                state: MouseButtonState::Pressed,
            },
            &mut rt,
        );
        s.on_input(&InputEvent::MouseWheel(MouseWheelDelta::Line { x: 0.0, y: 1.0 }), &mut rt);

        assert!(rt.commands().is_empty());
        assert_eq!(s.viewport(), Viewport::default());
        assert!(!s.vsync());
    }

    #[test]
    fn cursor_offsets_invert_y() {
        let mut c = CursorTracker::default();
        assert_eq!(c.update(100.0, 100.0), None);
        assert_eq!(c.update(110.0, 90.0), Some((10.0, 10.0)));
        assert_eq!(c.update(105.0, 95.0), Some((-5.0, -5.0)));
    }

    #[test]
    fn phases_move_forward() {
        let mut s = shell();
        assert_eq!(s.phase(), ShellPhase::Uninitialized);

        s.advance(ShellPhase::Initialized);
        s.begin_running(Instant::now());
        assert_eq!(s.phase(), ShellPhase::Running);
        assert!(s.fps.is_some());

        s.on_exit();
        assert_eq!(s.phase(), ShellPhase::Terminated);
    }

    #[test]
    fn exit_without_init_terminates() {
        let mut s = shell();
        s.on_exit();
        assert_eq!(s.phase(), ShellPhase::Terminated);
        assert!(s.resources.is_none());
    }

    #[test]
    fn pending_device_error_stops_init() {
        let debug = DebugChannel::with_output(false);
        assert!(ensure_no_pending(&debug, "profile query").is_ok());

        debug.report(DebugMessage {
            source: DebugSource::Api,
            kind: DebugType::Error,
            severity: DebugSeverity::High,
            id: debug.next_id(),
            message: "invalid texture view".into(),
        });

        let err = ensure_no_pending(&debug, "profile query").err();
        assert!(matches!(
            err,
            Some(InitError::PendingDeviceError { stage: "profile query", count: 1 })
        ));
        assert!(err.is_some_and(|e| e.is_partial()));

        // The count is consumed by the check.
        assert!(ensure_no_pending(&debug, "profile query").is_ok());
    }

    #[test]
    fn pending_notifications_do_not_stop_init() {
        let debug = DebugChannel::with_output(false);
        debug.report(DebugMessage {
            source: DebugSource::ShaderCompiler,
            kind: DebugType::Other,
            severity: DebugSeverity::Notification,
            id: debug.next_id(),
            message: "note".into(),
        });
        assert!(ensure_no_pending(&debug, "profile query").is_ok());
    }
}
