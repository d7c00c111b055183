//! Core handler types and traits

pub mod appender;
pub mod attr;
pub mod buffer_pool;
pub mod config;
pub mod context_chain;
pub mod environment;
pub mod error;
pub mod handler;
pub mod lambda_context;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod output_format;
pub mod record;
pub mod timestamp;

pub use appender::Appender;
pub use attr::{AnyValue, Attr, LogValuer, MarshalError, MarshalJson, Value};
pub use buffer_pool::{BufferPool, PooledBuffer};
pub use config::{HandlerConfig, DEFAULT_LOG_TYPE};
pub use context_chain::{ChainLink, ContextChain};
pub use environment::{
    EnvLookup, ProcessEnv, LAMBDA_ENV_FUNCTION_NAME, LAMBDA_ENV_FUNCTION_VERSION,
    LAMBDA_ENV_LOG_FORMAT, LAMBDA_ENV_LOG_LEVEL,
};
pub use error::{LoggerError, Result};
pub use handler::{Handler, HandlerBuilder, LambdaHandler};
pub use lambda_context::LambdaContext;
pub use log_entry::{LogEntry, SourceLocation};
pub use log_level::LogLevel;
pub use logger::Logger;
pub use metrics::LoggerMetrics;
pub use output_format::OutputFormat;
pub use record::{Node, RecordTree, Scalar};
pub use timestamp::{format_duration, TimestampFormat};
