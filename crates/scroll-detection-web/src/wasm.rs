#![forbid(unsafe_code)]

//! `wasm-bindgen` exports.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use js_sys::{Array, Object, Reflect};
use scroll_detection_core::{ClassUpdate, ScrollConfig, ScrollDetector, ValidationMode};
use tracing::{debug, warn};
use wasm_bindgen::prelude::*;

use crate::dom::{BodyClassList, DomMeasurer};
use crate::{SCROLL_DETECTION_EVENTS, SCROLL_DETECTION_GLOBAL};

fn set_js(obj: &Object, key: &str, value: JsValue) {
    let _ = Reflect::set(obj, &JsValue::from_str(key), &value);
}

fn install_panic_hook() {
    use std::sync::Once;
    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let global = js_sys::global();
            if let Ok(console) = Reflect::get(&global, &"console".into()) {
                if let Ok(error) = Reflect::get(&console, &"error".into()) {
                    if let Ok(f) = error.dyn_into::<js_sys::Function>() {
                        let _ = f.call1(&console, &JsValue::from_str(&format!("{info}")));
                    }
                }
            }
        }));
    });
}

fn class_update_to_js(update: &ClassUpdate) -> JsValue {
    let added = Array::new_with_length(update.added.len() as u32);
    for (idx, token) in update.added.iter().enumerate() {
        added.set(idx as u32, JsValue::from_str(token));
    }
    let obj = Object::new();
    set_js(&obj, "fullReset", JsValue::from(update.full_reset));
    set_js(&obj, "removed", JsValue::from(update.removed as u32));
    set_js(&obj, "added", added.into());
    obj.into()
}

/// State shared between the exported handle and its event listeners.
struct Page {
    detector: RefCell<ScrollDetector>,
    measurer: DomMeasurer,
    body: RefCell<BodyClassList>,
}

impl Page {
    fn refresh(&self) -> ClassUpdate {
        let detector = self.detector.borrow();
        let mut body = self.body.borrow_mut();
        detector.handle_event(&self.measurer, &mut *body)
    }
}

/// Scroll detection bound to the current page.
///
/// Construction registers `scroll` and `resize` listeners on `window`; they
/// stay registered until [`destroy`](Self::destroy) or until the handle is
/// freed.
#[wasm_bindgen]
pub struct ScrollDetection {
    page: Rc<Page>,
    listeners: Vec<EventListener>,
}

#[wasm_bindgen]
impl ScrollDetection {
    /// Bind to `window` and `document.body` with the default configuration.
    ///
    /// Pass `strict = true` to make `setConfig` reject negative or
    /// non-finite thresholds.
    #[wasm_bindgen(constructor)]
    pub fn new(strict: Option<bool>) -> Result<ScrollDetection, JsValue> {
        install_panic_hook();
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let Some(body) = document.body() else {
            warn!(
                target: "scroll_detection_web",
                "document has no <body>; scroll detection not installed"
            );
            return Err(JsValue::from_str("document has no <body>"));
        };

        let validation = if strict.unwrap_or(false) {
            ValidationMode::Strict
        } else {
            ValidationMode::Permissive
        };
        let page = Rc::new(Page {
            detector: RefCell::new(ScrollDetector::default().with_validation(validation)),
            measurer: DomMeasurer::new(window.clone(), document),
            body: RefCell::new(BodyClassList::new(body)),
        });

        let listeners = SCROLL_DETECTION_EVENTS
            .iter()
            .map(|&event_type| {
                let page = Rc::clone(&page);
                EventListener::new(&window, event_type, move |_event| {
                    page.refresh();
                })
            })
            .collect();
        debug!(
            target: "scroll_detection_web",
            events = ?SCROLL_DETECTION_EVENTS,
            ?validation,
            "scroll detection listeners registered"
        );
        Ok(Self { page, listeners })
    }

    /// Current configuration as a fresh plain object.
    ///
    /// Editing the returned object has no effect until it is passed back to
    /// `setConfig`.
    #[wasm_bindgen(js_name = getConfig)]
    pub fn get_config(&self) -> Result<JsValue, JsValue> {
        let json = self
            .page
            .detector
            .borrow()
            .config()
            .to_json()
            .map_err(|err| JsValue::from_str(&err.to_string()))?;
        js_sys::JSON::parse(&json)
    }

    /// Replace the configuration wholesale.
    #[wasm_bindgen(js_name = setConfig)]
    pub fn set_config(&self, config: JsValue) -> Result<(), JsValue> {
        let json = js_sys::JSON::stringify(&config)?
            .as_string()
            .ok_or_else(|| JsValue::from_str("config must be a JSON-serializable object"))?;
        let mut detector = self.page.detector.borrow_mut();
        let result = ScrollConfig::from_json(&json, detector.validation())
            .and_then(|config| detector.set_config(config));
        result.map_err(|err| {
            warn!(
                target: "scroll_detection_web",
                error = %err,
                "rejected scroll detection config"
            );
            JsValue::from_str(&err.to_string())
        })
    }

    /// Run one class update now, as if `scroll` had fired.
    ///
    /// Returns `{ fullReset, removed, added }`.
    pub fn refresh(&self) -> JsValue {
        class_update_to_js(&self.page.refresh())
    }

    /// Largest pixel offset that still resets every scroll class.
    #[wasm_bindgen(js_name = maxWatchedDistance)]
    pub fn max_watched_distance(&self) -> f64 {
        self.page.detector.borrow().max_watched_distance()
    }

    /// Current `<body>` class string.
    #[wasm_bindgen(js_name = bodyClassName)]
    pub fn body_class_name(&self) -> String {
        self.page.body.borrow().class_name()
    }

    /// Remove the window listeners. Body classes are left as they are.
    pub fn destroy(&mut self) {
        let removed = self.listeners.len();
        self.listeners.clear();
        debug!(
            target: "scroll_detection_web",
            removed,
            "scroll detection listeners removed"
        );
    }
}

/// Create a [`ScrollDetection`] with default settings and publish it as
/// `window.ScrollDetection`. The published instance lives as long as the page.
#[wasm_bindgen]
pub fn install() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let instance = ScrollDetection::new(None)?;
    Reflect::set(
        &window,
        &JsValue::from_str(SCROLL_DETECTION_GLOBAL),
        &JsValue::from(instance),
    )?;
    Ok(())
}
