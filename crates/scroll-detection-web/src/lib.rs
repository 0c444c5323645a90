#![forbid(unsafe_code)]

//! WASM frontend for scroll-detection.
//!
//! On `wasm32` this crate binds a [`ScrollDetector`](scroll_detection_core::ScrollDetector)
//! to the live page:
//!
//! - samples `window`/`document` scroll and size properties,
//! - edits the `<body>` element's `className`,
//! - listens for `scroll` and `resize` on `window`,
//! - publishes `window.ScrollDetection` with `getConfig`/`setConfig`.
//!
//! ```js
//! import init, { install } from "./scroll_detection_web.js";
//! await init();
//! install();
//! window.ScrollDetection.setConfig({
//!   pixel:   { singleClassesUntil: 100, stickyDistances: [100, 500] },
//!   percent: { singleClassesUntil: 0,   stickyDistances: [50] },
//! });
//! ```
//!
//! On other targets only the JS-facing constants are compiled.

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use dom::{BodyClassList, DomMeasurer};
#[cfg(target_arch = "wasm32")]
pub use wasm::{ScrollDetection, install};

/// Property of `window` the installed instance is published under.
pub const SCROLL_DETECTION_GLOBAL: &str = "ScrollDetection";

/// Window events that trigger a class update, in registration order.
pub const SCROLL_DETECTION_EVENTS: [&str; 2] = ["scroll", "resize"];

/// Methods exposed on a `ScrollDetection` instance.
pub const SCROLL_DETECTION_JS_METHODS: [&str; 6] = [
    "getConfig",
    "setConfig",
    "refresh",
    "maxWatchedDistance",
    "bodyClassName",
    "destroy",
];
