//! Renshu Observability - tracing setup shared by the Renshu binaries
//!
//! # Features
//!
//! - Console logging on stderr with `EnvFilter`
//! - Optional OpenTelemetry integration with OTLP export
//! - Span helpers for chat turns and HTTP requests
//!
//! # Quick Start
//!
//! ```no_run
//! use renshu_observability::{init, ObservabilityConfig};
//!
//! let config = ObservabilityConfig::new("renshu")
//!     .with_log_level("info");
//!
//! init(config)?;
//! tracing::info!("Service started");
//! # Ok::<(), renshu_observability::ObservabilityError>(())
//! ```
//!
//! # Environment Variables
//!
//! - `OTEL_SERVICE_NAME` or `SERVICE_NAME` - Service name
//! - `OTEL_SERVICE_VERSION` or `SERVICE_VERSION` - Service version
//! - `OTEL_EXPORTER_OTLP_ENDPOINT` - OTLP endpoint
//! - `OTEL_LOG_LEVEL` or `RUST_LOG` - Log level filter

pub mod config;
pub mod error;
pub mod telemetry;
pub mod tracing;

pub use config::ObservabilityConfig;
pub use error::ObservabilityError;
pub use telemetry::{init, shutdown};
pub use tracing::{record_duration, record_error};

// Macros are exported at the crate root via #[macro_export]:
// renshu_observability::chat_turn_span!(), http_request_span!()
