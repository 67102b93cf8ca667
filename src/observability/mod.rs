//! Observability for plugin scans.
//!
//! Every scan runs inside a `plugins.scan` span and reports skipped
//! descriptors through `tracing` events. Hosts that do not install their own
//! subscriber can enable the `subscriber` feature:
//!
//! ```toml
//! plugin-scanner = { version = "0.1", features = ["subscriber"] }
//! ```
//!
//! ```rust,ignore
//! use plugin_scanner::observability::{TracingConfig, TracingLevel, init_tracing_subscriber};
//!
//! init_tracing_subscriber(&TracingConfig::new().level(TracingLevel::Debug))?;
//! ```

mod spans;
#[cfg(feature = "subscriber")]
mod subscriber;

pub use spans::{TracingConfig, TracingLevel, scan_span};
#[cfg(feature = "subscriber")]
pub use subscriber::{SubscriberError, init_tracing_subscriber};
