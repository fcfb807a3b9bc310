#![forbid(unsafe_code)]

//! `wasm-bindgen` host: the page document, `setTimeout` timers, listeners
//! and the global functions. Only compiled on `wasm32` targets.

use std::cell::RefCell;
use std::sync::Once;

use core::time::Duration;

use js_sys::{Array, Function, Reflect};
use kbui_core::{Document, DomEvent, NodeId, Rect, Size};
use kbui_i18n::{DateInput, FormatError};
use kbui_runtime::Scheduler;
use kbui_runtime::deferred::note_scheduled;
use kbui_widgets::{DeferredTask, PresentationAdapter};
use tracing::Level;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlCollection, HtmlElement, Window, console};

use crate::bridge::{self, HandleTable, LogLine};

// ---------------------------------------------------------------------------
// Diagnostics
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let msg = if let Some(loc) = info.location() {
                format!(
                    "panic at {}:{}:{}: {info}",
                    loc.file(),
                    loc.line(),
                    loc.column()
                )
            } else {
                format!("panic: {info}")
            };
            console::error_1(&JsValue::from_str(&msg));
        }));
    });
}

/// Forwards tracing events to the browser console at the matching level.
struct ConsoleLayer;

impl<S: tracing::Subscriber> Layer<S> for ConsoleLayer {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut line = LogLine::default();
        event.record(&mut line);
        let meta = event.metadata();
        let text = JsValue::from_str(&line.render(meta.level(), meta.target()));
        match *meta.level() {
            Level::ERROR => console::error_1(&text),
            Level::WARN => console::warn_1(&text),
            Level::INFO => console::info_1(&text),
            _ => console::debug_1(&text),
        }
    }
}

fn install_console_tracing() {
    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        let subscriber =
            tracing_subscriber::registry().with(ConsoleLayer.with_filter(LevelFilter::INFO));
        if tracing::subscriber::set_global_default(subscriber).is_err() {
            console::warn_1(&JsValue::from_str("tracing subscriber already installed"));
        }
    });
}

fn js_error(message: &str) -> JsValue {
    js_sys::Error::new(message).into()
}

fn format_error(err: FormatError) -> JsValue {
    js_error(&err.to_string())
}

/// `String(value)`, close enough for messages and tags.
fn js_text(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if value.is_undefined() {
        return "undefined".to_owned();
    }
    if value.is_null() {
        return "null".to_owned();
    }
    Array::of1(value).join("").into()
}

/// Default parameters only kick in for `undefined`.
fn optional_text(value: &JsValue) -> Option<String> {
    (!value.is_undefined()).then(|| js_text(value))
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// [`Document`] over the live page.
#[derive(Debug)]
pub struct WebDocument {
    window: Window,
    document: web_sys::Document,
    nodes: RefCell<HandleTable<Element>>,
}

impl WebDocument {
    /// `None` when the window has no document.
    #[must_use]
    pub fn from_window(window: Window) -> Option<Self> {
        let document = window.document()?;
        Some(Self {
            window,
            document,
            nodes: RefCell::new(HandleTable::new()),
        })
    }

    #[must_use]
    pub const fn window(&self) -> &Window {
        &self.window
    }

    /// The element behind `node`, if it is still tracked.
    #[must_use]
    pub fn element(&self, node: NodeId) -> Option<Element> {
        self.nodes.borrow().get(node).cloned()
    }

    fn html(&self, node: NodeId) -> Option<HtmlElement> {
        self.element(node)?.dyn_into().ok()
    }

    fn intern(&self, element: Element) -> NodeId {
        self.nodes.borrow_mut().intern(element)
    }

    fn collect(&self, collection: &HtmlCollection) -> Vec<NodeId> {
        (0..collection.length())
            .filter_map(|idx| collection.item(idx))
            .map(|el| self.intern(el))
            .collect()
    }
}

impl Document for WebDocument {
    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.document
            .get_element_by_id(id)
            .map(|el| self.intern(el))
    }

    fn elements_by_class(&self, scope: Option<NodeId>, class: &str) -> Vec<NodeId> {
        match scope {
            Some(scope) => match self.element(scope) {
                Some(el) => self.collect(&el.get_elements_by_class_name(class)),
                None => Vec::new(),
            },
            None => self.collect(&self.document.get_elements_by_class_name(class)),
        }
    }

    fn elements_with_attribute(&self, name: &str) -> Vec<NodeId> {
        let list = match self.document.query_selector_all(&format!("[{name}]")) {
            Ok(list) => list,
            Err(err) => {
                tracing::warn!(attribute = name, error = ?err, "attribute query failed");
                return Vec::new();
            }
        };
        (0..list.length())
            .filter_map(|idx| list.item(idx))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(|el| self.intern(el))
            .collect()
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.element(node)?.get_attribute(name)
    }

    fn is_connected(&self, node: NodeId) -> bool {
        self.element(node).is_some_and(|el| el.is_connected())
    }

    fn create_element(&mut self, tag: &str) -> NodeId {
        match self.document.create_element(tag) {
            Ok(el) => self.nodes.get_mut().insert(el),
            Err(err) => {
                tracing::warn!(tag, error = ?err, "createElement failed");
                self.nodes.get_mut().dangling()
            }
        }
    }

    fn set_id(&mut self, node: NodeId, id: &str) {
        if let Some(el) = self.element(node) {
            el.set_id(id);
        }
    }

    fn set_class_name(&mut self, node: NodeId, class_name: &str) {
        if let Some(el) = self.element(node) {
            el.set_class_name(class_name);
        }
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(el) = self.element(node) {
            el.set_text_content(Some(text));
        }
    }

    fn append_to_body(&mut self, node: NodeId) {
        let (Some(el), Some(body)) = (self.element(node), self.document.body()) else {
            return;
        };
        if let Err(err) = body.append_child(&el) {
            tracing::warn!(node = %node, error = ?err, "appendChild failed");
        }
    }

    fn remove(&mut self, node: NodeId) {
        if let Some(el) = self.nodes.get_mut().release(node) {
            el.remove();
        }
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node)
            .is_some_and(|el| el.class_list().contains(class))
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(el) = self.element(node) {
            if let Err(err) = el.class_list().add_1(class) {
                tracing::warn!(class, error = ?err, "classList.add failed");
            }
        }
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(el) = self.element(node) {
            if let Err(err) = el.class_list().remove_1(class) {
                tracing::warn!(class, error = ?err, "classList.remove failed");
            }
        }
    }

    fn toggle_class(&mut self, node: NodeId, class: &str) -> bool {
        let Some(el) = self.element(node) else {
            return false;
        };
        el.class_list().toggle(class).unwrap_or_else(|err| {
            tracing::warn!(class, error = ?err, "classList.toggle failed");
            false
        })
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        if let Some(el) = self.html(node) {
            if let Err(err) = el.style().set_property(property, value) {
                tracing::warn!(property, error = ?err, "style.setProperty failed");
            }
        }
    }

    fn style(&self, node: NodeId, property: &str) -> Option<String> {
        let value = self.html(node)?.style().get_property_value(property).ok()?;
        (!value.is_empty()).then_some(value)
    }

    fn bounding_rect(&self, node: NodeId) -> Rect {
        self.element(node).map_or_else(Rect::default, |el| {
            let r = el.get_bounding_client_rect();
            Rect::new(r.x(), r.y(), r.width(), r.height())
        })
    }

    fn offset_size(&self, node: NodeId) -> Size {
        self.html(node).map_or(Size::ZERO, |el| {
            Size::new(f64::from(el.offset_width()), f64::from(el.offset_height()))
        })
    }

    fn viewport_width(&self) -> f64 {
        self.window
            .inner_width()
            .ok()
            .and_then(|w| w.as_f64())
            .unwrap_or(0.0)
    }
}

// ---------------------------------------------------------------------------
// Scheduler
// ---------------------------------------------------------------------------

/// [`Scheduler`] backed by `window.setTimeout`.
#[derive(Debug, Clone)]
pub struct WindowScheduler {
    window: Window,
}

impl WindowScheduler {
    #[must_use]
    pub const fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Scheduler<DeferredTask> for WindowScheduler {
    fn schedule(&mut self, delay: Duration, task: DeferredTask) {
        let callback = Closure::once_into_js(move || run_deferred(task));
        let timeout = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), timeout)
        {
            Ok(_) => note_scheduled(),
            Err(err) => tracing::warn!(task = task.name(), error = ?err, "setTimeout failed"),
        }
    }
}

// ---------------------------------------------------------------------------
// Page state
// ---------------------------------------------------------------------------

struct PageState {
    adapter: PresentationAdapter,
    doc: Option<WebDocument>,
}

thread_local! {
    static PAGE: RefCell<Option<PageState>> = const { RefCell::new(None) };
}

/// Run `f` against the booted page. Calls made before the page is ready,
/// or while another handler holds it, are dropped.
fn with_document<R>(
    f: impl FnOnce(&mut PresentationAdapter, &mut WebDocument) -> R,
) -> Option<R> {
    PAGE.with(|page| {
        let Ok(mut guard) = page.try_borrow_mut() else {
            tracing::debug!("page busy, call dropped");
            return None;
        };
        let Some(state) = guard.as_mut() else {
            tracing::debug!("adapter not started");
            return None;
        };
        let Some(doc) = state.doc.as_mut() else {
            tracing::debug!("document not ready yet");
            return None;
        };
        Some(f(&mut state.adapter, doc))
    })
}

/// Run `f` against the configured adapter, or a default one before `start`.
fn with_adapter<R>(f: impl FnOnce(&PresentationAdapter) -> R) -> R {
    PAGE.with(|page| match page.try_borrow() {
        Ok(guard) => match guard.as_ref() {
            Some(state) => f(&state.adapter),
            None => f(&PresentationAdapter::with_defaults()),
        },
        Err(_) => f(&PresentationAdapter::with_defaults()),
    })
}

fn run_deferred(task: DeferredTask) {
    with_document(|adapter, doc| {
        let mut scheduler = WindowScheduler::new(doc.window().clone());
        adapter.run_task(doc, &mut scheduler, task)
    });
}

fn dispatch(event: DomEvent) {
    with_document(|adapter, doc| adapter.handle_event(doc, event));
}

/// Scan the document and attach every listener the controllers asked for.
fn boot() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(doc) = WebDocument::from_window(window) else {
        tracing::warn!("window has no document");
        return;
    };
    PAGE.with(|page| {
        let mut guard = page.borrow_mut();
        let state = guard.get_or_insert_with(|| PageState {
            adapter: PresentationAdapter::with_defaults(),
            doc: None,
        });
        if state.doc.is_some() {
            tracing::warn!("page already booted");
            return;
        }

        let mut scheduler = WindowScheduler::new(doc.window().clone());
        let bindings = state.adapter.initialize(&doc, &mut scheduler);
        for binding in bindings {
            let Some(el) = doc.element(binding.node) else {
                continue;
            };
            let listener = Closure::<dyn FnMut()>::new(move || dispatch(binding.event()));
            if let Err(err) = el.add_event_listener_with_callback(
                binding.kind.dom_name(),
                listener.as_ref().unchecked_ref(),
            ) {
                tracing::warn!(node = %binding.node, error = ?err, "addEventListener failed");
            }
            listener.forget();
        }
        state.doc = Some(doc);
    });
}

fn install_globals(window: &Window) -> Result<(), JsValue> {
    let globals: [(&str, JsValue); 5] = [
        (
            "toggleSidebar",
            Closure::<dyn Fn()>::new(toggle_sidebar).into_js_value(),
        ),
        (
            "showNotification",
            Closure::<dyn Fn(JsValue, JsValue)>::new(show_notification).into_js_value(),
        ),
        (
            "confirmAction",
            Closure::<dyn Fn(JsValue, JsValue) -> Result<(), JsValue>>::new(confirm_action)
                .into_js_value(),
        ),
        (
            "formatCurrency",
            Closure::<dyn Fn(JsValue, JsValue) -> Result<String, JsValue>>::new(format_currency)
                .into_js_value(),
        ),
        (
            "formatDate",
            Closure::<dyn Fn(JsValue, JsValue) -> Result<String, JsValue>>::new(format_date)
                .into_js_value(),
        ),
    ];
    for (name, value) in globals {
        Reflect::set(window, &JsValue::from_str(name), &value)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Exports
// ---------------------------------------------------------------------------

/// Configure the adapter, install the page globals and bind the page once
/// the DOM is ready.
///
/// `config_json` is an optional JSON object of configuration overrides; an
/// invalid one throws.
#[wasm_bindgen]
pub fn start(config_json: Option<String>) -> Result<(), JsValue> {
    install_panic_hook();
    install_console_tracing();

    let config =
        bridge::parse_config(config_json.as_deref()).map_err(|err| js_error(&err.to_string()))?;
    let started = PAGE.with(|page| {
        let mut guard = page.borrow_mut();
        if guard.as_ref().is_some_and(|state| state.doc.is_some()) {
            return false;
        }
        *guard = Some(PageState {
            adapter: PresentationAdapter::new(config),
            doc: None,
        });
        true
    });
    if !started {
        tracing::warn!("start called twice, keeping the running page");
        return Ok(());
    }

    let window = web_sys::window().ok_or_else(|| js_error("no window"))?;
    install_globals(&window)?;
    let document = window.document().ok_or_else(|| js_error("no document"))?;
    let ready_state = Reflect::get(&document, &JsValue::from_str("readyState"))
        .ok()
        .and_then(|state| state.as_string());
    if ready_state.as_deref() == Some("loading") {
        let on_ready = Closure::once_into_js(boot);
        document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())?;
    } else {
        boot();
    }
    Ok(())
}

/// `toggleSidebar()`.
#[wasm_bindgen(js_name = toggleSidebar)]
pub fn toggle_sidebar() {
    with_document(|adapter, doc| adapter.toggle_sidebar(doc));
}

/// `showNotification(message, kind = "info")`.
#[wasm_bindgen(js_name = showNotification)]
pub fn show_notification(message: JsValue, kind: JsValue) {
    let message = js_text(&message);
    let kind = optional_text(&kind);
    with_document(|adapter, doc| {
        let mut scheduler = WindowScheduler::new(doc.window().clone());
        adapter.show_notification(doc, &mut scheduler, &message, kind.as_deref())
    });
}

/// `confirmAction(message, callback)`: `callback` runs only if the user
/// accepts `window.confirm(message)`. A non-function callback throws a
/// `TypeError` only once the user has agreed. Errors thrown by the callback
/// propagate.
#[wasm_bindgen(js_name = confirmAction)]
pub fn confirm_action(message: JsValue, callback: JsValue) -> Result<(), JsValue> {
    let message = js_text(&message);
    let window = web_sys::window().ok_or_else(|| js_error("no window"))?;

    let mut prompt = |text: &str| window.confirm_with_message(text).unwrap_or(false);
    let mut outcome = Ok(());
    kbui_widgets::confirm_action(&mut prompt, &message, || {
        outcome = match callback.dyn_into::<Function>() {
            Ok(callback) => callback.call0(&JsValue::UNDEFINED).map(drop),
            Err(_) => {
                Err(js_sys::TypeError::new("confirmAction: callback is not a function").into())
            }
        };
    });
    outcome
}

/// `formatCurrency(amount, currency = "MXN")`.
#[wasm_bindgen(js_name = formatCurrency)]
pub fn format_currency(amount: JsValue, currency: JsValue) -> Result<String, JsValue> {
    let amount = js_sys::Number::new(&amount).value_of();
    let currency = optional_text(&currency);
    with_adapter(|adapter| adapter.format_currency(amount, currency.as_deref()))
        .map_err(format_error)
}

/// `formatDate(date, format = "short")`. Accepts strings, millisecond
/// numbers and `Date` objects.
#[wasm_bindgen(js_name = formatDate)]
pub fn format_date(date: JsValue, format: JsValue) -> Result<String, JsValue> {
    let input = date_input(&date).map_err(format_error)?;
    let format = optional_text(&format);
    with_adapter(|adapter| adapter.format_date(input, format.as_deref())).map_err(format_error)
}

fn date_input(value: &JsValue) -> Result<DateInput, FormatError> {
    if let Some(text) = value.as_string() {
        return Ok(DateInput::Text(text));
    }
    if let Some(date) = value.dyn_ref::<js_sys::Date>() {
        return bridge::date_input_from_millis(date.get_time());
    }
    if let Some(ms) = value.as_f64() {
        return bridge::date_input_from_millis(ms);
    }
    Err(FormatError::InvalidDate(js_text(value)))
}
