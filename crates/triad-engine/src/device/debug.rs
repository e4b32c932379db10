//! GPU debug-message channel.
//!
//! wgpu reports validation and out-of-memory errors through an uncaptured-error
//! handler, and shader diagnostics through compilation info. Both are folded into
//! one `DebugMessage` shape and logged as a single line.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// Origin of a debug message.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DebugSource {
    Api,
    WindowSystem,
    ShaderCompiler,
    ThirdParty,
    Application,
    Other,
    Unknown,
}

/// Category of a debug message.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DebugType {
    Error,
    DeprecatedBehavior,
    UndefinedBehavior,
    Portability,
    Performance,
    Marker,
    Other,
    Unknown,
}

/// Severity of a debug message.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub enum DebugSeverity {
    Notification,
    Low,
    Medium,
    High,
    Unknown,
}

impl DebugSource {
    pub fn as_str(self) -> &'static str {
        match self {
            DebugSource::Api => "API",
            DebugSource::WindowSystem => "WINDOW SYSTEM",
            DebugSource::ShaderCompiler => "SHADER COMPILER",
            DebugSource::ThirdParty => "THIRD PARTY",
            DebugSource::Application => "APPLICATION",
            DebugSource::Other => "OTHER",
            DebugSource::Unknown => "UNKNOWN",
        }
    }
}

impl DebugType {
    pub fn as_str(self) -> &'static str {
        match self {
            DebugType::Error => "ERROR",
            DebugType::DeprecatedBehavior => "DEPRECATED_BEHAVIOR",
            DebugType::UndefinedBehavior => "UNDEFINED_BEHAVIOR",
            DebugType::Portability => "PORTABILITY",
            DebugType::Performance => "PERFORMANCE",
            DebugType::Marker => "MARKER",
            DebugType::Other => "OTHER",
            DebugType::Unknown => "UNKNOWN",
        }
    }
}

impl DebugSeverity {
    pub fn as_str(self) -> &'static str {
        match self {
            DebugSeverity::Notification => "NOTIFICATION",
            DebugSeverity::Low => "LOW",
            DebugSeverity::Medium => "MEDIUM",
            DebugSeverity::High => "HIGH",
            DebugSeverity::Unknown => "UNKNOWN",
        }
    }

    /// Log level used when the message is written out.
    pub fn log_level(self) -> log::Level {
        match self {
            DebugSeverity::Notification => log::Level::Debug,
            DebugSeverity::Low => log::Level::Info,
            DebugSeverity::Medium | DebugSeverity::Unknown => log::Level::Warn,
            DebugSeverity::High => log::Level::Error,
        }
    }
}

impl fmt::Display for DebugSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for DebugType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for DebugSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One message on the debug channel.
#[derive(Debug, Clone, PartialEq)]
pub struct DebugMessage {
    pub source: DebugSource,
    pub kind: DebugType,
    pub severity: DebugSeverity,
    pub id: u32,
    pub message: String,
}

impl DebugMessage {
    /// Classifies an uncaptured wgpu error.
    pub fn from_wgpu_error(id: u32, error: &wgpu::Error) -> Self {
        let (kind, severity) = match error {
            wgpu::Error::Validation { .. } => (DebugType::Error, DebugSeverity::High),
            wgpu::Error::OutOfMemory { .. } => (DebugType::Error, DebugSeverity::High),
            #[allow(unreachable_patterns)]
            _ => (DebugType::Unknown, DebugSeverity::Unknown),
        };

        Self {
            source: DebugSource::Api,
            kind,
            severity,
            id,
            message: error.to_string(),
        }
    }

    /// Classifies one shader compilation diagnostic.
    pub fn from_compilation(id: u32, msg: &wgpu::CompilationMessage) -> Self {
        let (kind, severity) = match msg.message_type {
            wgpu::CompilationMessageType::Error => (DebugType::Error, DebugSeverity::High),
            wgpu::CompilationMessageType::Warning => (DebugType::Portability, DebugSeverity::Medium),
            wgpu::CompilationMessageType::Info => (DebugType::Other, DebugSeverity::Notification),
        };

        let message = match &msg.location {
            Some(loc) => format!("{}:{}: {}", loc.line_number, loc.line_position, msg.message),
            None => msg.message.clone(),
        };

        Self {
            source: DebugSource::ShaderCompiler,
            kind,
            severity,
            id,
            message,
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == DebugType::Error
    }
}

impl fmt::Display for DebugMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[GPU DEBUG]: source = {}, type = {}, severity = {}, ID = '{}', message = '{}'",
            self.source, self.kind, self.severity, self.id, self.message
        )
    }
}

/// Collects debug messages from the device.
///
/// The uncaptured-error handler runs inside wgpu and must be `Send + Sync`,
/// so state here is atomics only. Only the count of unacknowledged errors is
/// retained; message text goes to the log when output is enabled.
#[derive(Debug)]
pub struct DebugChannel {
    output: bool,
    next_id: AtomicU32,
    pending_errors: AtomicU32,
}

impl DebugChannel {
    pub fn new() -> Arc<Self> {
        Self::with_output(true)
    }

    /// Channel that counts errors but writes messages to the log only when
    /// `output` is set.
    pub fn with_output(output: bool) -> Arc<Self> {
        Arc::new(Self {
            output,
            next_id: AtomicU32::new(0),
            pending_errors: AtomicU32::new(0),
        })
    }

    /// Routes uncaptured device errors into this channel.
    pub fn install(self: &Arc<Self>, device: &wgpu::Device) {
        let channel = Arc::clone(self);
        device.on_uncaptured_error(Arc::new(move |error: wgpu::Error| {
            let id = channel.next_id();
            channel.report(DebugMessage::from_wgpu_error(id, &error));
        }));
        if self.output {
            log::info!("GPU debug output enabled");
        }
    }

    /// Allocates the next message id.
    pub fn next_id(&self) -> u32 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Logs `msg` without recording it. Used for errors a caller already
    /// captured and handles itself.
    pub fn emit(&self, msg: &DebugMessage) {
        if self.output {
            log::log!(msg.severity.log_level(), "{msg}");
        }
    }

    /// Logs `msg` and records it as pending if it is an error.
    pub fn report(&self, msg: DebugMessage) {
        self.emit(&msg);
        if msg.is_error() {
            self.pending_errors.fetch_add(1, Ordering::AcqRel);
        }
    }

    /// Returns and clears the count of errors reported since the last call.
    pub fn take_pending(&self) -> u32 {
        self.pending_errors.swap(0, Ordering::AcqRel)
    }
}
