#![forbid(unsafe_code)]

//! Scroll metric readers.
//!
//! Browsers disagree on where the vertical scroll offset and the document
//! height live, so the readers walk the same fallback chains legacy scripts
//! use. The DOM is sampled once into a [`DocumentMeasurements`] snapshot and
//! the readers are pure functions over it.
//!
//! Arithmetic follows JavaScript number semantics: a zero-length
//! scroll track yields a `NaN` (or infinite) percentage rather than an error,
//! and the class decisions downstream rely on comparisons against `NaN`
//! being false.

/// Scroll and size properties of one element.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ElementMeasurements {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub offset_height: f64,
    pub client_height: f64,
}

/// One sample of every DOM property the readers consult.
///
/// `None` means the property's owner does not exist in this engine or
/// document (for example no `document.documentElement`).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DocumentMeasurements {
    /// `window.pageYOffset`.
    pub page_y_offset: Option<f64>,
    /// `window.innerHeight`.
    pub inner_height: Option<f64>,
    /// `document.documentElement`.
    pub root: Option<ElementMeasurements>,
    /// `document.body.parentNode.scrollTop`.
    pub body_parent_scroll_top: Option<f64>,
    /// `document.body`.
    pub body: Option<ElementMeasurements>,
}

impl DocumentMeasurements {
    /// A standards-mode document scrolled to `offset`, with the given total
    /// height and viewport height.
    #[must_use]
    pub fn scrolled(offset: f64, doc_height: f64, viewport_height: f64) -> Self {
        let root = ElementMeasurements {
            scroll_top: offset,
            scroll_height: doc_height,
            offset_height: doc_height,
            client_height: viewport_height,
        };
        Self {
            page_y_offset: Some(offset),
            inner_height: Some(viewport_height),
            root: Some(root),
            body_parent_scroll_top: Some(offset),
            body: Some(ElementMeasurements {
                scroll_top: 0.0,
                scroll_height: doc_height,
                offset_height: doc_height,
                client_height: doc_height,
            }),
        }
    }
}

/// Source of DOM samples, implemented by the browser frontend.
pub trait MetricsSource {
    fn measure(&self) -> DocumentMeasurements;
}

impl MetricsSource for DocumentMeasurements {
    fn measure(&self) -> DocumentMeasurements {
        *self
    }
}

/// Metrics computed for one scroll or resize event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    /// Vertical scroll offset in CSS pixels.
    pub distance: f64,
    /// Whole percent of the scroll track covered; `NaN` when the track is empty.
    pub percent: f64,
}

impl ScrollMetrics {
    #[must_use]
    pub fn read(m: &DocumentMeasurements) -> Self {
        Self {
            distance: distance_scrolled(m),
            percent: percent_scrolled(m),
        }
    }
}

/// `Math.max` semantics: `NaN` if any input is `NaN`, `-Infinity` when empty.
#[must_use]
pub fn js_max(values: impl IntoIterator<Item = f64>) -> f64 {
    let mut acc = f64::NEG_INFINITY;
    for value in values {
        if value.is_nan() {
            return f64::NAN;
        }
        if value > acc {
            acc = value;
        }
    }
    acc
}

/// JS truthiness for numbers: `0`, `-0` and `NaN` are falsy.
fn truthy(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0 && !v.is_nan())
}

/// Vertical scroll offset.
///
/// Prefers `window.pageYOffset`; when that is missing or zero, reads
/// `scrollTop` from the first of `documentElement`, `body.parentNode`,
/// `body` that exists.
#[must_use]
pub fn distance_scrolled(m: &DocumentMeasurements) -> f64 {
    if let Some(offset) = truthy(m.page_y_offset) {
        return offset;
    }
    m.root
        .map(|root| root.scroll_top)
        .or(m.body_parent_scroll_top)
        .or(m.body.map(|body| body.scroll_top))
        .unwrap_or(f64::NAN)
}

/// Viewport height: `window.innerHeight`, else `clientHeight` of the root
/// element or the body.
#[must_use]
pub fn viewport_height(m: &DocumentMeasurements) -> f64 {
    if let Some(height) = truthy(m.inner_height) {
        return height;
    }
    m.root
        .or(m.body)
        .map(|el| el.client_height)
        .unwrap_or(f64::NAN)
}

/// Largest of the scroll, offset and client heights of body and root.
#[must_use]
pub fn doc_height(m: &DocumentMeasurements) -> f64 {
    let pick = |el: Option<ElementMeasurements>, f: fn(&ElementMeasurements) -> f64| {
        el.as_ref().map(f).unwrap_or(f64::NAN)
    };
    js_max([
        pick(m.body, |el| el.scroll_height),
        pick(m.root, |el| el.scroll_height),
        pick(m.body, |el| el.offset_height),
        pick(m.root, |el| el.offset_height),
        pick(m.body, |el| el.client_height),
        pick(m.root, |el| el.client_height),
    ])
}

/// `floor(scrollTop / (docHeight - viewportHeight) * 100)`.
///
/// `NaN` for an unscrolled, unscrollable page and `+Infinity` when the page
/// is unscrollable yet reports a positive offset.
#[must_use]
pub fn percent_scrolled(m: &DocumentMeasurements) -> f64 {
    let scroll_top = distance_scrolled(m);
    let track_length = doc_height(m) - viewport_height(m);
    (scroll_top / track_length * 100.0).floor()
}
