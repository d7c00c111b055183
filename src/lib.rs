//! # Lambda Log Handler
//!
//! Structured record handler for code running on AWS Lambda. Every record is
//! enriched with the function name, version and invocation request id, then
//! written as one JSON object or one flattened `key=value` line.
//!
//! ## Features
//!
//! - **Lambda-aware**: level and format defaults from `AWS_LAMBDA_LOG_LEVEL`
//!   and `AWS_LAMBDA_LOG_FORMAT`
//! - **Structured**: typed attributes, nested groups, lazily resolved values
//! - **Deterministic**: keys sorted at every level, empty groups removed
//! - **Thread Safe**: derived handlers share one sink; records never interleave
//!
//! ## Example
//!
//! ```
//! use lambda_log_handler::prelude::*;
//!
//! let output = MemoryAppender::new();
//! let logger = Logger::new(
//!     LambdaHandler::builder(output.clone())
//!         .json()
//!         .without_time()
//!         .environment(std::collections::HashMap::new())
//!         .build(),
//! );
//!
//! let ctx = LambdaContext::new("8f5d-4c21");
//! logger
//!     .with_group("order")
//!     .log_context(Some(&ctx), LogLevel::INFO, "accepted", vec![Attr::int("items", 3)]);
//!
//! assert_eq!(
//!     output.contents(),
//!     "{\"level\":\"INFO\",\"msg\":\"accepted\",\"order\":{\"items\":3},\"record\":{\"requestId\":\"8f5d-4c21\"},\"type\":\"app.log\"}\n"
//! );
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    #[cfg(feature = "console")]
    pub use crate::appenders::ConsoleAppender;
    #[cfg(feature = "file")]
    pub use crate::appenders::FileAppender;
    pub use crate::appenders::{MemoryAppender, WriterAppender};
    pub use crate::core::{
        Appender, Attr, Handler, HandlerBuilder, HandlerConfig, LambdaContext, LambdaHandler,
        LogEntry, LogLevel, Logger, LoggerError, LoggerMetrics, OutputFormat, Result,
        SourceLocation, TimestampFormat, Value,
    };
}

#[cfg(feature = "console")]
pub use appenders::ConsoleAppender;
#[cfg(feature = "file")]
pub use appenders::FileAppender;
pub use appenders::{MemoryAppender, WriterAppender};
pub use core::{
    format_duration, AnyValue, Appender, Attr, BufferPool, ChainLink, ContextChain, EnvLookup,
    Handler, HandlerBuilder, HandlerConfig, LambdaContext, LambdaHandler, LogEntry, LogLevel,
    LogValuer, Logger, LoggerError, LoggerMetrics, MarshalError, MarshalJson, Node, OutputFormat,
    ProcessEnv, RecordTree, Result, Scalar, SourceLocation, TimestampFormat, Value,
    DEFAULT_LOG_TYPE,
};
