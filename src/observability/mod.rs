//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Per transfer:
//!     inbound event, fetch issued, fetch result, errors
//!         → logging.rs (structured log events, request ID attached)
//!         → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```

pub mod logging;
pub mod metrics;
