mod config;
mod scene;
mod shell;

use std::process::ExitCode;

use triad_engine::device::InitError;
use triad_engine::logging::{init_logging, LoggingConfig};
use triad_engine::window::Runtime;

use crate::config::ShellConfig;
use crate::shell::GraphicsShell;

fn main() -> ExitCode {
    init_logging(LoggingConfig::default());

    let config = ShellConfig::default();
    let runtime_config = config.runtime_config();
    let gpu_init = config.gpu_init();

    let result = Runtime::run(runtime_config, gpu_init, GraphicsShell::new(config));
    ExitCode::from(exit_status(&result))
}

/// `0` on a clean run, `2` when the GPU context came up but the program did
/// not, `1` for everything else.
fn exit_status(result: &anyhow::Result<()>) -> u8 {
    let Err(err) = result else {
        return 0;
    };

    log::error!("{err:#}");
    match err.downcast_ref::<InitError>() {
        Some(init) if init.is_partial() => 2,
        _ => 1,
    }
}
