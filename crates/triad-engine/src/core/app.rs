use crate::device::InitError;
use crate::input::InputEvent;
use crate::window::RuntimeCtx;

use super::ctx::{FrameCtx, InitCtx};

/// Control directive returned by frame callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract driven by `window::Runtime`.
///
/// Call order: `on_init` once after the window and GPU context exist, then
/// `on_input`/`on_frame` interleaved until close, then `on_exit` once.
/// `on_exit` also runs when `on_init` failed.
pub trait App {
    /// Creates GPU resources. An error stops the runtime before the first frame.
    fn on_init(&mut self, ctx: &mut InitCtx<'_, '_>) -> Result<(), InitError>;

    /// Called for every translated input event, before the next frame.
    fn on_input(&mut self, event: &InputEvent, runtime: &mut RuntimeCtx) {
        let _ = (event, runtime);
    }

    /// Called once per frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    /// Called once before the window and GPU context are destroyed.
    fn on_exit(&mut self) {}
}
