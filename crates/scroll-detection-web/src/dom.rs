#![forbid(unsafe_code)]

//! Live DOM adapters: a [`MetricsSource`] over `window`/`document` and a
//! [`ClassSink`] over `<body>`'s `className`.

use scroll_detection_core::metrics::{DocumentMeasurements, ElementMeasurements, MetricsSource};
use scroll_detection_core::token::{ClassAttribute, ClassSink, TokenPattern};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Window};

fn element_measurements(el: &Element) -> ElementMeasurements {
    let offset_height = el
        .dyn_ref::<HtmlElement>()
        .map_or(f64::NAN, |html| f64::from(html.offset_height()));
    ElementMeasurements {
        scroll_top: f64::from(el.scroll_top()),
        scroll_height: f64::from(el.scroll_height()),
        offset_height,
        client_height: f64::from(el.client_height()),
    }
}

/// Samples scroll and size properties from the page.
#[derive(Debug, Clone)]
pub struct DomMeasurer {
    window: Window,
    document: Document,
}

impl DomMeasurer {
    #[must_use]
    pub fn new(window: Window, document: Document) -> Self {
        Self { window, document }
    }
}

impl MetricsSource for DomMeasurer {
    fn measure(&self) -> DocumentMeasurements {
        let body = self.document.body();
        let body_parent_scroll_top = body
            .as_ref()
            .and_then(|body| body.parent_node())
            .and_then(|node| node.dyn_into::<Element>().ok())
            .map(|el| f64::from(el.scroll_top()));
        DocumentMeasurements {
            page_y_offset: self.window.page_y_offset().ok(),
            inner_height: self.window.inner_height().ok().and_then(|v| v.as_f64()),
            root: self
                .document
                .document_element()
                .as_ref()
                .map(element_measurements),
            body_parent_scroll_top,
            body: body.as_ref().map(|body| element_measurements(body)),
        }
    }
}

/// `<body>` class list.
///
/// Every call reads `className` back from the element, so edits made by
/// other scripts between events are respected.
#[derive(Debug, Clone)]
pub struct BodyClassList {
    body: HtmlElement,
}

impl BodyClassList {
    #[must_use]
    pub fn new(body: HtmlElement) -> Self {
        Self { body }
    }

    #[must_use]
    pub fn class_name(&self) -> String {
        self.body.class_name()
    }

    fn attribute(&self) -> ClassAttribute {
        ClassAttribute::new(self.body.class_name())
    }
}

impl ClassSink for BodyClassList {
    fn has_token(&self, token: &str) -> bool {
        self.attribute().has_token(token)
    }

    fn add_token(&mut self, token: &str) {
        let mut attr = self.attribute();
        if attr.has_token(token) {
            return;
        }
        attr.add_token(token);
        self.body.set_class_name(attr.as_str());
    }

    fn remove_matching(&mut self, pattern: TokenPattern) -> usize {
        let mut attr = self.attribute();
        let removed = attr.remove_matching(pattern);
        if removed > 0 {
            self.body.set_class_name(attr.as_str());
        }
        removed
    }
}
