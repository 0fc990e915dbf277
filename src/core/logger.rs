//! Logger engine
//!
//! A `Logger` owns its configuration and encodes records into a buffered
//! multi-writer. Derived loggers (`with_attrs`, `named`, `renamed`) share the
//! threshold cell and the output lock with their root, so a level change on
//! any of them is visible to all, and concurrent emissions from any of them
//! serialize through the same lock. The writer handle is also shared, until
//! an explicit `reset_output` replaces it on one instance only.

use super::caller::CallerSite;
use super::error::{LoggerError, Result};
use super::level::Level;
use super::options::{ExcludePredicate, LoggerOptions, DEFAULT_TIME_FORMAT};
use super::value::{needs_quoting, Value};
use super::writer::{ColorOption, MultiWriter};
use crate::sinks::{Flushable, Sink, StderrSink};
use chrono::{DateTime, Local};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

/// Key under which the trailing value of an odd-length attribute list is
/// recorded.
pub const MISSING_KEY: &str = "EXTRA_VALUE_AT_END";

/// Timestamp format of the JSON encoding, microsecond precision.
const JSON_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f%:z";

/// Substituted for the attributes of a record that failed JSON serialization.
const ERR_JSON_UNSUPPORTED: &str = "logging contained values that don't serialize to json";

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("json", &self.json)
            .field("caller", &self.caller)
            .field("name", &self.name)
            .field("time_format", &self.time_format)
            .field("implied", &self.implied)
            .finish()
    }
}

#[derive(Clone)]
pub struct Logger {
    json: bool,
    caller: bool,
    name: String,
    time_format: String,
    /// Serializes the encode-then-flush sequence across every logger derived
    /// from the same root, including instances whose writer was reset.
    lock: Arc<Mutex<()>>,
    /// Replaced per instance by `reset_output`; shared until then.
    writer: Arc<Mutex<MultiWriter>>,
    /// Lock-free threshold cell shared by all derived loggers.
    level: Arc<AtomicI32>,
    /// Inherited attributes, sorted by key, duplicates resolved.
    implied: Vec<Value>,
    exclude: Option<Arc<ExcludePredicate>>,
}

impl Logger {
    /// Start building a logger.
    #[must_use]
    pub fn builder() -> LoggerOptions {
        LoggerOptions::new()
    }

    pub(crate) fn from_options(opts: LoggerOptions) -> Result<Self> {
        let sinks = if opts.sinks.is_empty() {
            vec![Box::new(StderrSink::new()) as Box<dyn Sink>]
        } else {
            opts.sinks
        };

        let level = if opts.level == Level::NoLevel {
            Level::Info
        } else {
            opts.level
        };

        let writer = MultiWriter::new(sinks, opts.color)?;

        Ok(Self {
            json: opts.json_format,
            caller: opts.include_caller,
            name: opts.name,
            time_format: opts
                .time_format
                .unwrap_or_else(|| DEFAULT_TIME_FORMAT.to_string()),
            lock: opts.lock.unwrap_or_default(),
            writer: Arc::new(Mutex::new(writer)),
            level: Arc::new(AtomicI32::new(level as i32)),
            implied: Vec::new(),
            exclude: opts.exclude,
        })
    }

    /// Emit a record at `level`. `args` alternate key and value; an odd
    /// trailing value is recorded under [`MISSING_KEY`].
    #[track_caller]
    pub fn log(&self, level: Level, msg: &str, args: &[Value]) {
        self.emit(level, msg, args, CallerSite::here());
    }

    #[track_caller]
    pub fn trace(&self, msg: &str, args: &[Value]) {
        self.emit(Level::Trace, msg, args, CallerSite::here());
    }

    #[track_caller]
    pub fn debug(&self, msg: &str, args: &[Value]) {
        self.emit(Level::Debug, msg, args, CallerSite::here());
    }

    #[track_caller]
    pub fn info(&self, msg: &str, args: &[Value]) {
        self.emit(Level::Info, msg, args, CallerSite::here());
    }

    #[track_caller]
    pub fn warn(&self, msg: &str, args: &[Value]) {
        self.emit(Level::Warn, msg, args, CallerSite::here());
    }

    #[track_caller]
    pub fn error(&self, msg: &str, args: &[Value]) {
        self.emit(Level::Error, msg, args, CallerSite::here());
    }

    /// Emit at Error level, then panic with the message. Callers must not
    /// expect continuation.
    #[track_caller]
    pub fn panic(&self, msg: &str, args: &[Value]) -> ! {
        self.emit(Level::Error, msg, args, CallerSite::here());
        panic!("{}", msg);
    }

    /// If `err` is present, emit its description at Error level and panic
    /// with it. No-op on `None`.
    #[track_caller]
    pub fn error_panic<E: fmt::Display>(&self, err: Option<E>, args: &[Value]) {
        if let Some(e) = err {
            let msg = e.to_string();
            self.emit(Level::Error, &msg, args, CallerSite::here());
            panic!("{}", msg);
        }
    }

    /// Would a Trace record be emitted? Lock-free; use to elide expensive
    /// argument construction.
    pub fn is_trace(&self) -> bool {
        self.current_level() == Level::Trace
    }

    pub fn is_debug(&self) -> bool {
        self.current_level() <= Level::Debug
    }

    pub fn is_info(&self) -> bool {
        self.current_level() <= Level::Info
    }

    pub fn is_warn(&self) -> bool {
        self.current_level() <= Level::Warn
    }

    pub fn is_error(&self) -> bool {
        self.current_level() <= Level::Error
    }

    /// Derive a logger that always carries the given key/value pairs.
    ///
    /// New pairs are merged over the inherited ones (new values win for a
    /// duplicate key) and the result is re-sorted by key, so the emitted
    /// attribute order is deterministic regardless of insertion order. An
    /// odd trailing value is stored under [`MISSING_KEY`], appended after
    /// the sort.
    #[must_use]
    pub fn with_attrs(&self, args: &[Value]) -> Logger {
        let mut args = args.to_vec();
        let extra = if args.len() % 2 != 0 { args.pop() } else { None };

        let mut values: HashMap<String, Value> = HashMap::new();
        let mut keys: Vec<String> = Vec::with_capacity((self.implied.len() + args.len()) / 2);

        for pair in self.implied.chunks(2) {
            let key = pair[0].render();
            keys.push(key.clone());
            values.insert(key, pair[1].clone());
        }
        for pair in args.chunks(2) {
            let key = pair[0].render();
            if !values.contains_key(&key) {
                keys.push(key.clone());
            }
            values.insert(key, pair[1].clone());
        }

        keys.sort();

        let mut sl = self.clone();
        sl.implied = Vec::with_capacity(keys.len() * 2 + 2);
        for key in keys {
            let value = values
                .remove(&key)
                .unwrap_or(Value::Null);
            sl.implied.push(Value::Str(key));
            sl.implied.push(value);
        }

        if let Some(extra) = extra {
            sl.implied.push(Value::Str(MISSING_KEY.to_string()));
            sl.implied.push(extra);
        }

        sl
    }

    /// Derive a logger named `parent.suffix` (or just `suffix` when the
    /// parent is unnamed).
    #[must_use]
    pub fn named(&self, name: &str) -> Logger {
        let mut sl = self.clone();
        sl.name = if self.name.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.name, name)
        };
        sl
    }

    /// Derive a logger with the given name, ignoring the parent's name.
    #[must_use]
    pub fn renamed(&self, name: &str) -> Logger {
        let mut sl = self.clone();
        sl.name = name.to_string();
        sl
    }

    /// Update the severity threshold. Takes effect immediately for every
    /// logger derived from the same root.
    pub fn set_level(&self, level: Level) {
        self.level.store(level as i32, Ordering::Relaxed);
    }

    /// Swap this instance's sinks. The previous sinks stay in effect on
    /// error, and on sibling loggers derived before the reset regardless.
    pub fn reset_output(
        &mut self,
        sinks: Vec<Box<dyn Sink>>,
        colors: Vec<ColorOption>,
    ) -> Result<()> {
        if sinks.is_empty() {
            return Err(LoggerError::config("Logger", "given sink list is empty"));
        }

        let lock = Arc::clone(&self.lock);
        let _guard = lock.lock();
        self.swap_writer(sinks, colors)
    }

    /// Like [`Logger::reset_output`], but flushes `flushable` first and
    /// aborts without swapping if that fails.
    pub fn reset_output_with_flush(
        &mut self,
        sinks: Vec<Box<dyn Sink>>,
        colors: Vec<ColorOption>,
        flushable: &mut dyn Flushable,
    ) -> Result<()> {
        if sinks.is_empty() {
            return Err(LoggerError::config("Logger", "given sink list is empty"));
        }

        let lock = Arc::clone(&self.lock);
        let _guard = lock.lock();
        flushable.flush()?;
        self.swap_writer(sinks, colors)
    }

    fn swap_writer(&mut self, sinks: Vec<Box<dyn Sink>>, colors: Vec<ColorOption>) -> Result<()> {
        let writer = MultiWriter::new(sinks, colors)?;
        self.writer = Arc::new(Mutex::new(writer));
        Ok(())
    }

    /// Read-only view of the inherited attribute pairs.
    pub fn implied_attrs(&self) -> &[Value] {
        &self.implied
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn current_level(&self) -> Level {
        Level::from_ordinal(self.level.load(Ordering::Relaxed))
    }

    fn emit(&self, level: Level, msg: &str, args: &[Value], site: CallerSite) {
        // Lock-free fast path: disabled levels never touch the lock.
        if (level as i32) < self.level.load(Ordering::Relaxed) {
            return;
        }

        if let Some(exclude) = &self.exclude {
            if exclude(level, msg, args) {
                return;
            }
        }

        let now = Local::now();

        let _guard = self.lock.lock();
        let mut writer = self.writer.lock();

        if self.json {
            self.encode_json(&mut writer, now, level, msg, args, site);
        } else {
            self.encode_plain(&mut writer, now, level, msg, args, site);
        }

        // Sink I/O failures are not surfaced from emits; they are
        // fire-and-forget by design.
        let _ = writer.flush(level);
    }

    fn encode_plain(
        &self,
        w: &mut MultiWriter,
        t: DateTime<Local>,
        level: Level,
        msg: &str,
        args: &[Value],
        site: CallerSite,
    ) {
        if !self.time_format.is_empty() {
            w.write_str(&t.format(&self.time_format).to_string());
            w.write_byte(b' ');
        }

        w.write_str(level.bracket());

        if self.caller {
            w.write_byte(b' ');
            w.write_str(site.trimmed_file());
            w.write_byte(b':');
            w.write_str(&site.line().to_string());
            w.write_byte(b':');
        }

        w.write_byte(b' ');

        if !self.name.is_empty() {
            w.write_str(&self.name);
            w.write_str(": ");
        }

        w.write_str(msg);

        let mut merged: Vec<Value> = self
            .implied
            .iter()
            .chain(args.iter())
            .cloned()
            .collect();

        let mut stacktrace: Option<String> = None;

        if !merged.is_empty() {
            if merged.len() % 2 != 0 {
                let last = merged.pop().unwrap_or(Value::Null);
                if let Value::Stacktrace(trace) = last {
                    stacktrace = Some(trace);
                } else {
                    merged.push(Value::Str(MISSING_KEY.to_string()));
                    merged.push(last);
                }
            }

            w.write_byte(b':');

            for pair in merged.chunks(2) {
                // A stack trace in a value slot is the record's trace, not
                // an attribute; the pair is skipped entirely.
                if let Value::Stacktrace(trace) = &pair[1] {
                    stacktrace = Some(trace.clone());
                    continue;
                }

                let rendered = pair[1].render();

                w.write_byte(b' ');
                w.write_str(&pair[0].render());
                w.write_byte(b'=');

                if !pair[1].is_raw() && needs_quoting(&rendered) {
                    w.write_byte(b'"');
                    w.write_str(&rendered);
                    w.write_byte(b'"');
                } else {
                    w.write_str(&rendered);
                }
            }
        }

        w.write_str("\n");

        if let Some(trace) = stacktrace {
            w.write_str(&trace);
        }
    }

    fn encode_json(
        &self,
        w: &mut MultiWriter,
        t: DateTime<Local>,
        level: Level,
        msg: &str,
        args: &[Value],
        site: CallerSite,
    ) {
        let mut map = self.json_fixed_entries(t, level, msg, site);

        let mut merged: Vec<Value> = self
            .implied
            .iter()
            .chain(args.iter())
            .cloned()
            .collect();

        let mut unsupported = false;

        if !merged.is_empty() {
            if merged.len() % 2 != 0 {
                let last = merged.pop().unwrap_or(Value::Null);
                if let Value::Stacktrace(trace) = last {
                    map.insert("stacktrace".to_string(), serde_json::Value::String(trace));
                } else {
                    merged.push(Value::Str(MISSING_KEY.to_string()));
                    merged.push(last);
                }
            }

            for pair in merged.chunks(2) {
                match pair[1].to_json() {
                    Ok(value) => {
                        // True merge semantics: a later duplicate key
                        // overwrites the earlier entry.
                        map.insert(pair[0].render(), value);
                    }
                    Err(_) => {
                        unsupported = true;
                        break;
                    }
                }
            }
        }

        if unsupported {
            // Logging must never fail the caller over an attribute value.
            map = self.json_fixed_entries(t, level, msg, site);
            map.insert(
                "@warn".to_string(),
                serde_json::Value::String(ERR_JSON_UNSUPPORTED.to_string()),
            );
        }

        if let Ok(encoded) = serde_json::to_vec(&map) {
            w.write(&encoded);
            w.write_str("\n");
        }
    }

    fn json_fixed_entries(
        &self,
        t: DateTime<Local>,
        level: Level,
        msg: &str,
        site: CallerSite,
    ) -> serde_json::Map<String, serde_json::Value> {
        let mut map = serde_json::Map::new();
        map.insert(
            "@message".to_string(),
            serde_json::Value::String(msg.to_string()),
        );
        map.insert(
            "@timestamp".to_string(),
            serde_json::Value::String(t.format(JSON_TIME_FORMAT).to_string()),
        );
        map.insert(
            "@level".to_string(),
            serde_json::Value::String(level.json_name().to_string()),
        );

        if !self.name.is_empty() {
            map.insert(
                "@module".to_string(),
                serde_json::Value::String(self.name.clone()),
            );
        }

        if self.caller {
            map.insert(
                "@caller".to_string(),
                serde_json::Value::String(site.to_string()),
            );
        }

        map
    }
}

impl Default for Logger {
    /// A plain-text logger at Info level writing to standard error.
    fn default() -> Self {
        LoggerOptions::new()
            .build()
            .expect("stderr sink accepts the default color options")
    }
}
