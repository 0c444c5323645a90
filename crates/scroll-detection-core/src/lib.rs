#![forbid(unsafe_code)]

//! Host-agnostic core of scroll-detection.
//!
//! Watches nothing by itself: the embedding frontend samples the document on
//! every `scroll` and `resize` event and hands the sample to a
//! [`ScrollDetector`], which edits a [`ClassSink`] (normally the `<body>`
//! element's class list) so the page can style itself by distance scrolled:
//!
//! - `scrolled-<N>` / `scrolled-pct-<N>` single-value classes track the exact
//!   current offset while it is small.
//! - Sticky classes such as `scrolled-100` or `scrolled-pct-50` stay once a
//!   threshold has been crossed.
//!
//! Nothing here touches a browser API, so every decision is testable on any
//! host.

pub mod config;
pub mod detector;
pub mod metrics;
pub mod token;

pub use config::{AxisConfig, ConfigError, ScrollConfig, ValidationMode};
pub use detector::{ClassUpdate, ScrollDetector, max_watched_distance};
pub use metrics::{DocumentMeasurements, ElementMeasurements, MetricsSource, ScrollMetrics};
pub use token::{ClassAttribute, ClassSink, TokenKind, TokenPattern, TokenSet};
