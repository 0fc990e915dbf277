//! Core logger types and traits

pub mod caller;
pub mod error;
pub mod level;
pub mod logger;
pub mod options;
pub mod value;
pub mod writer;

pub use caller::CallerSite;
pub use error::{LoggerError, Result};
pub use level::Level;
pub use logger::{Logger, MISSING_KEY};
pub use options::{LoggerOptions, DEFAULT_TIME_FORMAT};
pub use value::Value;
pub use writer::{ColorOption, MultiWriter};
