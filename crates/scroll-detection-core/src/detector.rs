#![forbid(unsafe_code)]

//! Class decisions for one scroll or resize event.
//!
//! A [`ScrollDetector`] owns a [`ScrollConfig`] and the largest pixel
//! distance it needs to watch. Every event runs [`ScrollDetector::apply`]:
//!
//! 1. Reset. Within the watched range all scroll tokens are removed; past it
//!    only percent tokens are, so pixel sticky tokens earned on the way down
//!    stay frozen.
//! 2. Pixel single token `scrolled-<distance>` for `0 < distance <= until`.
//! 3. Pixel sticky tokens for every threshold with `distance >= d`.
//! 4. Percent single token `scrolled-pct-<percent>` for `0 < percent <= until`.
//! 5. Percent sticky tokens for every threshold with `percent > d` (strict).
//!
//! Comparisons are plain `f64` comparisons, so a `NaN` metric or threshold
//! never earns a token.

use tracing::{debug, trace};

use crate::config::{ConfigError, ScrollConfig, ValidationMode};
use crate::metrics::{MetricsSource, ScrollMetrics, js_max};
use crate::token::{ClassSink, TokenPattern, percent_token, pixel_token};

/// Largest pixel distance any pixel token depends on.
#[must_use]
pub fn max_watched_distance(config: &ScrollConfig) -> f64 {
    js_max([
        config.pixel.single_classes_until,
        js_max(config.pixel.sticky_distances.iter().copied()),
    ])
}

/// What one [`ScrollDetector::apply`] pass did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassUpdate {
    /// Whether the pass ran the full reset (inside the watched range).
    pub full_reset: bool,
    /// Number of tokens the reset removed.
    pub removed: usize,
    /// Tokens appended, in order.
    pub added: Vec<String>,
}

/// Scroll class state for one document.
#[derive(Debug, Clone)]
pub struct ScrollDetector {
    config: ScrollConfig,
    max_watched_distance: f64,
    validation: ValidationMode,
}

impl Default for ScrollDetector {
    fn default() -> Self {
        Self::new(ScrollConfig::default())
    }
}

impl ScrollDetector {
    /// Create a permissive detector.
    #[must_use]
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            max_watched_distance: max_watched_distance(&config),
            config,
            validation: ValidationMode::Permissive,
        }
    }

    /// Use `mode` for later [`set_config`](Self::set_config) calls.
    #[must_use]
    pub fn with_validation(mut self, mode: ValidationMode) -> Self {
        self.validation = mode;
        self
    }

    #[must_use]
    pub fn validation(&self) -> ValidationMode {
        self.validation
    }

    #[must_use]
    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    #[must_use]
    pub fn max_watched_distance(&self) -> f64 {
        self.max_watched_distance
    }

    /// Replace the configuration wholesale.
    ///
    /// In strict mode an invalid configuration is rejected and the current
    /// one stays in place.
    pub fn set_config(&mut self, config: ScrollConfig) -> Result<(), ConfigError> {
        config.validate(self.validation)?;
        self.config = config;
        self.recompute();
        Ok(())
    }

    /// Edit the configuration in place. The watched bound is recomputed
    /// afterwards; validation does not apply.
    pub fn update_config(&mut self, edit: impl FnOnce(&mut ScrollConfig)) {
        edit(&mut self.config);
        self.recompute();
    }

    fn recompute(&mut self) {
        self.max_watched_distance = max_watched_distance(&self.config);
        debug!(
            target: "scroll_detection::detector",
            max_watched_distance = self.max_watched_distance,
            pixel_sticky = self.config.pixel.sticky_distances.len(),
            percent_sticky = self.config.percent.sticky_distances.len(),
            "scroll config replaced"
        );
    }

    /// Sample `source` and update `sink`.
    pub fn handle_event(
        &self,
        source: &impl MetricsSource,
        sink: &mut impl ClassSink,
    ) -> ClassUpdate {
        let metrics = ScrollMetrics::read(&source.measure());
        self.apply(metrics, sink)
    }

    /// Update `sink` for the given metrics.
    pub fn apply(&self, metrics: ScrollMetrics, sink: &mut impl ClassSink) -> ClassUpdate {
        let ScrollMetrics { distance, percent } = metrics;
        let pixel = &self.config.pixel;
        let pct = &self.config.percent;

        let full_reset = distance <= self.max_watched_distance;
        let pattern = if full_reset {
            TokenPattern::AnyScroll
        } else {
            TokenPattern::PercentOnly
        };
        let removed = sink.remove_matching(pattern);
        let mut added = Vec::new();

        if distance > 0.0 && distance <= pixel.single_classes_until {
            push(sink, &mut added, pixel_token(distance));
        }
        for &d in &pixel.sticky_distances {
            let token = pixel_token(d);
            if distance >= d && !sink.has_token(&token) {
                push(sink, &mut added, token);
            }
        }

        if percent > 0.0 && percent <= pct.single_classes_until {
            push(sink, &mut added, percent_token(percent));
        }
        for &d in &pct.sticky_distances {
            let token = percent_token(d);
            if percent > d && !sink.has_token(&token) {
                push(sink, &mut added, token);
            }
        }

        let update = ClassUpdate {
            full_reset,
            removed,
            added,
        };
        trace!(
            target: "scroll_detection::detector",
            distance,
            percent,
            full_reset,
            removed = update.removed,
            added = update.added.len(),
            "body classes updated"
        );
        update
    }
}

fn push(sink: &mut impl ClassSink, added: &mut Vec<String>, token: String) {
    if sink.has_token(&token) {
        return;
    }
    sink.add_token(&token);
    added.push(token);
}
