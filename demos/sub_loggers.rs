//! Derived logger example
//!
//! Demonstrates named sub-loggers, inherited attributes, and the shared
//! threshold across a logger family.
//!
//! Run with: cargo run --example sub_loggers

use kvlog::attrs;
use kvlog::prelude::*;

fn main() -> Result<()> {
    println!("=== kvlog - Sub-Logger Example ===\n");

    let root = Logger::builder()
        .name("app")
        .level(Level::Debug)
        .sink(Box::new(StderrSink::new()))
        .build()?;

    // Derive named sub-loggers for subsystems
    println!("1. Named sub-loggers:");
    let db = root.named("db");
    let http = root.named("http");
    db.info("connection established", attrs!["host", "localhost", "port", 5432u32]);
    http.info("listening", attrs!["addr", "0.0.0.0:8080"]);

    // Inherited attributes travel with every record
    println!("\n2. Inherited attributes:");
    let request = http.with_attrs(attrs!["request_id", "a1b2c3", "user", "alice"]);
    request.debug("parsing headers", &[]);
    request.info("response sent", attrs!["status", 200u32]);

    // A derived logger can override an inherited value
    println!("\n3. Overriding inherited attributes:");
    let retry = request.with_attrs(attrs!["user", "bob"]);
    retry.info("retried as fallback user", &[]);

    // The threshold is shared by the whole family
    println!("\n4. Family-wide threshold:");
    db.set_level(Level::Warn);
    root.info("hidden everywhere now", &[]);
    http.warn("still visible", attrs!["queue_depth", 17u32]);

    // Replacing a name instead of extending it
    println!("\n5. Renaming:");
    let standalone = request.renamed("worker");
    standalone.warn("name replaced, attributes kept", &[]);

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
