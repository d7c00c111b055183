//! Logger front end over a shared record handler

use super::{
    attr::Attr,
    handler::{Handler, LambdaHandler},
    lambda_context::LambdaContext,
    log_entry::LogEntry,
    log_level::LogLevel,
};
use std::fmt;
use std::sync::Arc;

/// Cheap, cloneable handle that builds entries and hands them to a handler
///
/// Level checks happen before any entry is built. Handler failures are
/// reported on stderr and never reach the caller.
#[derive(Clone)]
pub struct Logger {
    handler: Arc<dyn Handler>,
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger").finish_non_exhaustive()
    }
}

impl Logger {
    #[must_use]
    pub fn new<H: Handler + 'static>(handler: H) -> Self {
        Self {
            handler: Arc::new(handler),
        }
    }

    #[must_use]
    pub fn from_handler(handler: Arc<dyn Handler>) -> Self {
        Self { handler }
    }

    pub fn handler(&self) -> &Arc<dyn Handler> {
        &self.handler
    }

    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        self.handler.enabled(level)
    }

    /// Logger whose records carry `attrs` at the current group
    #[must_use]
    pub fn with(&self, attrs: Vec<Attr>) -> Self {
        if attrs.is_empty() {
            return self.clone();
        }
        Self::from_handler(self.handler.with_attrs(attrs))
    }

    /// Logger whose later attributes nest under `name`
    #[must_use]
    pub fn with_group(&self, name: &str) -> Self {
        if name.is_empty() {
            return self.clone();
        }
        Self::from_handler(self.handler.with_group(name))
    }

    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        self.log_context(None, level, message, Vec::new());
    }

    pub fn log_attrs(&self, level: LogLevel, message: impl Into<String>, attrs: Vec<Attr>) {
        self.log_context(None, level, message, attrs);
    }

    /// Log with an invocation context, so the record carries its request id
    pub fn log_context(
        &self,
        ctx: Option<&LambdaContext>,
        level: LogLevel,
        message: impl Into<String>,
        attrs: Vec<Attr>,
    ) {
        if !self.enabled(level) {
            return;
        }
        self.log_entry(ctx, LogEntry::new(level, message).with_attrs(attrs));
    }

    /// Hand a fully built entry to the handler, subject to the level check
    pub fn log_entry(&self, ctx: Option<&LambdaContext>, entry: LogEntry) {
        if !self.enabled(entry.level) {
            return;
        }
        if let Err(e) = self.handler.handle(ctx, &entry) {
            eprintln!("[LOGGER ERROR] Handler failed: {}", e);
        }
    }

    pub fn trace(&self, message: impl Into<String>) {
        self.log(LogLevel::TRACE, message);
    }

    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::DEBUG, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::INFO, message);
    }

    pub fn warn(&self, message: impl Into<String>) {
        self.log(LogLevel::WARN, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::ERROR, message);
    }

    pub fn fatal(&self, message: impl Into<String>) {
        self.log(LogLevel::FATAL, message);
    }

    pub fn info_with(&self, message: impl Into<String>, attrs: Vec<Attr>) {
        self.log_attrs(LogLevel::INFO, message, attrs);
    }

    pub fn error_with(&self, message: impl Into<String>, attrs: Vec<Attr>) {
        self.log_attrs(LogLevel::ERROR, message, attrs);
    }
}

impl From<LambdaHandler> for Logger {
    fn from(handler: LambdaHandler) -> Self {
        Self::new(handler)
    }
}
