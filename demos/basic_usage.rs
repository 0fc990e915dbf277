//! Basic logger usage example
//!
//! Demonstrates plain-text logging to stderr with levels, key/value
//! attributes, and value formatters.
//!
//! Run with: cargo run --example basic_usage

use kvlog::attrs;
use kvlog::prelude::*;

fn main() -> Result<()> {
    println!("=== kvlog - Basic Usage Example ===\n");

    // Create a logger writing plain text to stderr
    let logger = Logger::builder()
        .name("demo")
        .level(Level::Trace)
        .sink(Box::new(StderrSink::new()))
        .build()?;

    // Log messages at different levels
    println!("1. Logging at different levels:");
    logger.trace("This is a trace message", &[]);
    logger.debug("This is a debug message", &[]);
    logger.info("This is an info message", &[]);
    logger.warn("This is a warning message", &[]);
    logger.error("This is an error message", &[]);

    // Attach key/value attributes to a record
    println!("\n2. Logging with attributes:");
    logger.info("request handled", attrs!["method", "GET", "status", 200u32]);
    logger.info(
        "formatted values",
        &[
            "flags".into(),
            Value::Hex(0xff),
            "mode".into(),
            Value::Octal(0o644),
            "attempt".into(),
            Value::fmt("{} of {}", vec![3.into(), 5.into()]),
        ],
    );

    // Raise the threshold at runtime
    println!("\n3. Changing the threshold:");
    logger.set_level(Level::Warn);
    logger.info("Info message (hidden)", &[]);
    logger.warn("Warning message (visible)", &[]);

    // Switch the same configuration to JSON output
    println!("\n4. JSON output:");
    let json_logger = Logger::builder()
        .name("demo")
        .json_format(true)
        .sink(Box::new(StdoutSink::new()))
        .build()?;
    json_logger.info("structured record", attrs!["user", "alice", "count", 7u64]);

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
