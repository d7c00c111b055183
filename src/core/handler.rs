//! Record handler: assembles, renders and writes one record per call
//!
//! `LambdaHandler` turns a `LogEntry` into a `RecordTree` (built-in fields,
//! Lambda metadata, call site, bound context, the entry's own attributes),
//! renders it as JSON or text into a pooled buffer and writes it to the shared
//! appender under a single lock.

use super::{
    appender::Appender,
    attr::Attr,
    buffer_pool::BufferPool,
    config::HandlerConfig,
    context_chain::ContextChain,
    environment::{EnvLookup, ProcessEnv, LAMBDA_ENV_FUNCTION_NAME, LAMBDA_ENV_FUNCTION_VERSION},
    error::Result,
    lambda_context::LambdaContext,
    log_entry::LogEntry,
    log_level::LogLevel,
    metrics::LoggerMetrics,
    output_format::OutputFormat,
    record::RecordTree,
    timestamp::TimestampFormat,
};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

pub const LEVEL_KEY: &str = "level";
pub const MESSAGE_KEY: &str = "msg";
pub const TIME_KEY: &str = "time";
pub const SOURCE_KEY: &str = "source";
pub const RECORD_KEY: &str = "record";
pub const FUNCTION_NAME_KEY: &str = "functionName";
pub const FUNCTION_VERSION_KEY: &str = "version";
pub const REQUEST_ID_KEY: &str = "requestId";
pub const LOG_TYPE_KEY: &str = "type";

/// Contract between a logging front end and a record handler
pub trait Handler: Send + Sync {
    /// Whether records at `level` should be built at all
    fn enabled(&self, level: LogLevel) -> bool;

    /// Render and write one record
    fn handle(&self, ctx: Option<&LambdaContext>, entry: &LogEntry) -> Result<()>;

    /// Handler whose records also carry `attrs`
    fn with_attrs(&self, attrs: Vec<Attr>) -> Arc<dyn Handler>;

    /// Handler whose later attributes nest under `name`
    fn with_group(&self, name: &str) -> Arc<dyn Handler>;
}

/// Handler producing Lambda-style structured records
///
/// Cloning is cheap; clones and derived handlers share the appender, its lock
/// and the metrics.
///
/// # Example
///
/// ```
/// use lambda_log_handler::prelude::*;
///
/// let output = MemoryAppender::new();
/// let handler = LambdaHandler::builder(output.clone())
///     .json()
///     .without_time()
///     .environment(std::collections::HashMap::new())
///     .build();
///
/// let entry = LogEntry::new(LogLevel::INFO, "Hello, world!");
/// handler.handle(None, &entry).unwrap();
///
/// assert_eq!(output.contents(), "{\"level\":\"INFO\",\"msg\":\"Hello, world!\",\"type\":\"app.log\"}\n");
/// ```
#[derive(Clone)]
pub struct LambdaHandler {
    config: Arc<HandlerConfig>,
    env: Arc<dyn EnvLookup>,
    sink: Arc<Mutex<Box<dyn Appender>>>,
    metrics: Arc<LoggerMetrics>,
    chain: ContextChain,
}

impl fmt::Debug for LambdaHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LambdaHandler")
            .field("config", &self.config)
            .field("chain", &self.chain)
            .finish_non_exhaustive()
    }
}

impl LambdaHandler {
    /// Handler configured from the process environment
    pub fn new<A: Appender + 'static>(appender: A) -> Self {
        Self::builder(appender).build()
    }

    #[must_use]
    pub fn builder<A: Appender + 'static>(appender: A) -> HandlerBuilder {
        HandlerBuilder::new(appender)
    }

    pub fn config(&self) -> &HandlerConfig {
        &self.config
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub fn chain(&self) -> &ContextChain {
        &self.chain
    }

    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        self.config.enabled(level)
    }

    /// Derived handler carrying `attrs` at the current group
    #[must_use]
    pub fn with_attrs(&self, attrs: Vec<Attr>) -> Self {
        if attrs.is_empty() {
            return self.clone();
        }
        Self {
            chain: self.chain.with_attrs(attrs),
            ..self.clone()
        }
    }

    /// Derived handler nesting later attributes under `name`
    #[must_use]
    pub fn with_group(&self, name: &str) -> Self {
        if name.is_empty() {
            return self.clone();
        }
        Self {
            chain: self.chain.with_group(name),
            ..self.clone()
        }
    }

    /// Assemble the cleaned record tree for `entry`.
    pub fn build_record(&self, ctx: Option<&LambdaContext>, entry: &LogEntry) -> RecordTree {
        let config = &self.config;
        let time_format: TimestampFormat = config.timestamp_format;
        let mut root = RecordTree::new();

        root.insert_scalar(LEVEL_KEY, entry.level.to_string());
        root.insert_scalar(MESSAGE_KEY, entry.message.as_str());

        if let Some(time) = entry.time.filter(|_| !config.omit_time) {
            root.insert_scalar(TIME_KEY, time_format.format(&time));
        }

        let mut lambda = RecordTree::new();
        if let Some(name) = self.env.lookup(LAMBDA_ENV_FUNCTION_NAME) {
            lambda.insert_scalar(FUNCTION_NAME_KEY, name);
        }
        if let Some(version) = self.env.lookup(LAMBDA_ENV_FUNCTION_VERSION) {
            lambda.insert_scalar(FUNCTION_VERSION_KEY, version);
        }
        if let Some(ctx) = ctx {
            lambda.insert_scalar(REQUEST_ID_KEY, ctx.aws_request_id.as_str());
        }
        root.insert_tree(RECORD_KEY, lambda);

        if !config.log_type.is_empty() {
            root.insert_scalar(LOG_TYPE_KEY, config.log_type.as_str());
        }

        if let Some(source) = entry.source.as_ref().filter(|_| config.include_source) {
            root.append(
                Attr::group(
                    SOURCE_KEY,
                    vec![
                        Attr::string("function", source.function.as_str()),
                        Attr::string("file", source.file.as_str()),
                        Attr::int("line", i64::from(source.line)),
                    ],
                ),
                time_format,
            );
        }

        let skip_trailing_groups = entry.num_attrs() == 0;
        let cursor = self.chain.replay(&mut root, skip_trailing_groups, time_format);
        for attr in &entry.attrs {
            cursor.append(attr.clone(), time_format);
        }

        root.clean();
        root
    }

    /// Render `entry` and write it to the appender.
    ///
    /// An entry that cannot be encoded is replaced by a one-line error record
    /// and the encoding error is returned. Appender failures are returned as-is.
    pub fn handle(&self, ctx: Option<&LambdaContext>, entry: &LogEntry) -> Result<()> {
        let record = self.build_record(ctx, entry);
        let format: OutputFormat = self.config.format;

        let mut buf = BufferPool::global().get();
        if let Err(err) = format.render(&record, &mut buf) {
            self.metrics.record_encode_failure();
            buf.clear();
            let fallback = format.write_fallback(&mut *buf, &err);

            let mut sink = self.sink.lock();
            if fallback.is_ok() {
                // Best effort: the encoding error is what the caller needs.
                let _ = sink.append(&buf);
            }
            return Err(err);
        }

        let mut sink = self.sink.lock();
        match sink.append(&buf) {
            Ok(()) => {
                self.metrics.record_written(buf.len());
                Ok(())
            }
            Err(err) => {
                self.metrics.record_write_failure();
                Err(err)
            }
        }
    }

    /// Flush the underlying appender
    pub fn flush(&self) -> Result<()> {
        self.sink.lock().flush()
    }

    /// Name of the underlying appender
    pub fn appender_name(&self) -> String {
        self.sink.lock().name().to_string()
    }
}

impl Handler for LambdaHandler {
    fn enabled(&self, level: LogLevel) -> bool {
        LambdaHandler::enabled(self, level)
    }

    fn handle(&self, ctx: Option<&LambdaContext>, entry: &LogEntry) -> Result<()> {
        LambdaHandler::handle(self, ctx, entry)
    }

    fn with_attrs(&self, attrs: Vec<Attr>) -> Arc<dyn Handler> {
        Arc::new(LambdaHandler::with_attrs(self, attrs))
    }

    fn with_group(&self, name: &str) -> Arc<dyn Handler> {
        Arc::new(LambdaHandler::with_group(self, name))
    }
}

/// Builder for constructing a `LambdaHandler` with a fluent API
///
/// Level and format defaults come from `AWS_LAMBDA_LOG_LEVEL` and
/// `AWS_LAMBDA_LOG_FORMAT`, read once by `build()`. Options set on the
/// builder win over the environment.
///
/// # Example
/// ```
/// use lambda_log_handler::prelude::*;
///
/// let handler = LambdaHandler::builder(MemoryAppender::new())
///     .level(LogLevel::DEBUG)
///     .json()
///     .source(true)
///     .log_type("platform.log")
///     .without_time()
///     .build();
///
/// assert!(handler.enabled(LogLevel::DEBUG));
/// assert_eq!(handler.config().log_type, "platform.log");
/// ```
pub struct HandlerBuilder {
    appender: Box<dyn Appender>,
    env: Arc<dyn EnvLookup>,
    base: Option<HandlerConfig>,
    level: Option<LogLevel>,
    format: Option<OutputFormat>,
    include_source: Option<bool>,
    log_type: Option<String>,
    omit_time: Option<bool>,
    timestamp_format: Option<TimestampFormat>,
}

impl HandlerBuilder {
    pub fn new<A: Appender + 'static>(appender: A) -> Self {
        Self {
            appender: Box::new(appender),
            env: Arc::new(ProcessEnv),
            base: None,
            level: None,
            format: None,
            include_source: None,
            log_type: None,
            omit_time: None,
            timestamp_format: None,
        }
    }

    /// Minimum enabled level
    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = Some(level);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn json(self) -> Self {
        self.format(OutputFormat::Json)
    }

    #[must_use = "builder methods return a new value"]
    pub fn text(self) -> Self {
        self.format(OutputFormat::Text)
    }

    /// Include the call site as a `source` group
    #[must_use = "builder methods return a new value"]
    pub fn source(mut self, include: bool) -> Self {
        self.include_source = Some(include);
        self
    }

    /// Value of the `type` field; empty removes the field
    #[must_use = "builder methods return a new value"]
    pub fn log_type(mut self, log_type: impl Into<String>) -> Self {
        self.log_type = Some(log_type.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn without_time(mut self) -> Self {
        self.omit_time = Some(true);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = Some(format);
        self
    }

    /// Environment used for defaults and per-record metadata
    #[must_use = "builder methods return a new value"]
    pub fn environment<E: EnvLookup + 'static>(mut self, env: E) -> Self {
        self.env = Arc::new(env);
        self
    }

    /// Start from `config` instead of resolving defaults from the environment
    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: HandlerConfig) -> Self {
        self.base = Some(config);
        self
    }

    pub fn build(self) -> LambdaHandler {
        let mut config = self
            .base
            .unwrap_or_else(|| HandlerConfig::from_env(self.env.as_ref()));

        if let Some(level) = self.level {
            config.level = level;
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        if let Some(include) = self.include_source {
            config.include_source = include;
        }
        if let Some(log_type) = self.log_type {
            config.log_type = log_type;
        }
        if let Some(omit) = self.omit_time {
            config.omit_time = omit;
        }
        if let Some(format) = self.timestamp_format {
            config.timestamp_format = format;
        }

        LambdaHandler {
            config: Arc::new(config),
            env: self.env,
            sink: Arc::new(Mutex::new(self.appender)),
            metrics: Arc::new(LoggerMetrics::new()),
            chain: ContextChain::new(),
        }
    }
}
