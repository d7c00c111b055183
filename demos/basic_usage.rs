//! Basic usage example
//!
//! Demonstrates a handler configured from the Lambda environment, derived
//! loggers and per-invocation request ids.
//!
//! Run with: AWS_LAMBDA_LOG_FORMAT=json cargo run --example basic_usage

use lambda_log_handler::prelude::*;
use lambda_log_handler::{info, warn};
use std::time::Duration;

fn main() -> Result<()> {
    let handler = LambdaHandler::builder(ConsoleAppender::new())
        .source(true)
        .build();
    let logger = Logger::new(handler.clone());

    logger.info("Hello, world!");

    let ctx = LambdaContext::new("8f5d-4c21-9a7e");
    let orders = logger
        .with(vec![Attr::string("service", "orders")])
        .with_group("order");

    orders.log_context(
        Some(&ctx),
        LogLevel::INFO,
        "accepted",
        vec![
            Attr::int("items", 3),
            Attr::duration("elapsed", Duration::from_millis(1500)),
        ],
    );

    info!(orders, [Attr::bool("express", true)], "Shipping {} items", 3);
    warn!(logger, "Retry attempt {} of {}", 2, 5);
    logger.log(LogLevel::WARN.offset(2), "between WARN and ERROR");

    handler.flush()?;
    Ok(())
}
