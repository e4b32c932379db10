use thiserror::Error;

/// Why application initialization did not complete.
///
/// `Context` means nothing usable exists. The other variants are partial:
/// the window and GPU context were created, but the render resources were not.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("failed to set up window or GPU context: {0:#}")]
    Context(anyhow::Error),

    #[error("{count} GPU error(s) pending during {stage}; initialization stopped")]
    PendingDeviceError { stage: &'static str, count: u32 },

    #[error("shader compilation failed: {}", .messages.join("; "))]
    ShaderCompile { messages: Vec<String> },

    #[error("shader program link failed: {message}")]
    ProgramLink { message: String },

    #[error("{vertices} vertices do not fit a single draw call")]
    GeometryTooLarge { vertices: usize },
}

impl InitError {
    /// Returns `true` when the GPU context exists but later setup stopped.
    pub fn is_partial(&self) -> bool {
        !matches!(self, InitError::Context(_))
    }
}

impl From<anyhow::Error> for InitError {
    fn from(e: anyhow::Error) -> Self {
        InitError::Context(e)
    }
}
