//! `web_sys` backend and the page entry point.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{DocumentReadyState, HtmlButtonElement, HtmlElement, HtmlInputElement};

use crate::config::FormConfig;
use crate::console::{Console, Level, Logger};
use crate::controller::{FormHandle, bootstrap};
use crate::dom::{DomEvent, DomEventKind, ElementKind, FormDocument, FormElement, Listener};
use crate::error::InitError;

/// Id of an optional `<script type="application/json">` holding a
/// [`FormConfig`] override.
pub const CONFIG_ELEMENT_ID: &str = "registerFormConfig";

/// Writes to the devtools console.
pub struct BrowserConsole;

impl Console for BrowserConsole {
    fn write(&self, level: Level, message: &str) {
        match level {
            Level::Debug | Level::Info => zoon::println!("[RegisterForm] {}", message),
            Level::Warn | Level::Error => {
                zoon::eprintln!("[RegisterForm] {}: {}", level, message)
            }
        }
    }
}

#[derive(Clone)]
pub struct WebDocument {
    document: web_sys::Document,
}

impl WebDocument {
    pub fn current() -> Result<Self, InitError> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or(InitError::DocumentUnavailable)?;
        Ok(Self { document })
    }
}

impl FormDocument for WebDocument {
    type Element = WebElement;

    fn element_by_id(&self, id: &str) -> Option<WebElement> {
        self.document
            .get_element_by_id(id)
            .and_then(|element| element.dyn_into::<HtmlElement>().ok())
            .map(WebElement::new)
    }

    fn is_ready(&self) -> bool {
        self.document.ready_state() != DocumentReadyState::Loading
    }

    fn on_ready(&self, callback: Box<dyn FnOnce()>) -> Result<(), InitError> {
        let closure = Closure::once(move || callback());
        self.document
            .add_event_listener_with_callback("DOMContentLoaded", closure.as_ref().unchecked_ref())
            .map_err(|error| InitError::Listener {
                event: "DOMContentLoaded",
                detail: format!("{error:?}"),
            })?;
        closure.forget();
        Ok(())
    }
}

type EventClosure = Closure<dyn FnMut(web_sys::Event)>;

#[derive(Clone)]
pub struct WebElement {
    element: HtmlElement,
    /// Closures attached through this handle, kept so they can be detached.
    listeners: Rc<RefCell<Vec<(DomEventKind, EventClosure)>>>,
}

impl WebElement {
    pub fn new(element: HtmlElement) -> Self {
        Self { element, listeners: Rc::default() }
    }

    fn as_input(&self) -> Option<&HtmlInputElement> {
        self.element.dyn_ref::<HtmlInputElement>()
    }
}

/// DOM calls that may throw are logged, never fatal for the form.
fn report(action: &str, result: Result<(), JsValue>) {
    if let Err(error) = result {
        zoon::eprintln!("[RegisterForm] {} failed: {:?}", action, error);
    }
}

struct WebEvent(web_sys::Event);

impl DomEvent for WebEvent {
    fn prevent_default(&self) {
        self.0.prevent_default();
    }
}

impl FormElement for WebElement {
    fn kind(&self) -> ElementKind {
        if self.element.is_instance_of::<HtmlInputElement>() {
            ElementKind::Input
        } else if self.element.is_instance_of::<HtmlButtonElement>() {
            ElementKind::Button
        } else {
            ElementKind::Other
        }
    }

    fn value(&self) -> String {
        self.as_input().map(HtmlInputElement::value).unwrap_or_default()
    }

    fn set_text_content(&self, text: &str) {
        self.element.set_text_content(Some(text));
    }

    fn set_class_name(&self, class_name: &str) {
        self.element.set_class_name(class_name);
    }

    fn set_disabled(&self, disabled: bool) {
        if let Some(button) = self.element.dyn_ref::<HtmlButtonElement>() {
            button.set_disabled(disabled);
        } else if let Some(input) = self.as_input() {
            input.set_disabled(disabled);
        } else if disabled {
            report("set_attribute(disabled)", self.element.set_attribute("disabled", ""));
        } else {
            report("remove_attribute(disabled)", self.element.remove_attribute("disabled"));
        }
    }

    fn input_type(&self) -> String {
        self.as_input().map(HtmlInputElement::type_).unwrap_or_default()
    }

    fn set_input_type(&self, input_type: &str) {
        if let Some(input) = self.as_input() {
            input.set_type(input_type);
        }
    }

    fn set_attribute(&self, name: &str, value: &str) {
        report(&format!("set_attribute({name})"), self.element.set_attribute(name, value));
    }

    fn icon(&self) -> Option<Self> {
        self.element
            .query_selector("i")
            .ok()
            .flatten()
            .and_then(|element| element.dyn_into::<HtmlElement>().ok())
            .map(WebElement::new)
    }

    fn focus(&self) {
        report("focus", self.element.focus());
    }

    fn set_custom_validity(&self, message: &str) {
        if let Some(input) = self.as_input() {
            input.set_custom_validity(message);
        }
    }

    fn add_event_listener(&self, kind: DomEventKind, mut listener: Listener) -> Result<(), InitError> {
        let closure = EventClosure::new(move |event: web_sys::Event| {
            listener(&WebEvent(event) as &dyn DomEvent);
        });
        self.element
            .add_event_listener_with_callback(kind.name(), closure.as_ref().unchecked_ref())
            .map_err(|error| InitError::Listener {
                event: kind.name(),
                detail: format!("{error:?}"),
            })?;
        self.listeners.borrow_mut().push((kind, closure));
        Ok(())
    }

    fn remove_event_listeners(&self) {
        let listeners = self.listeners.take();
        for (kind, closure) in &listeners {
            report(
                &format!("removeEventListener({})", kind.name()),
                self.element
                    .remove_event_listener_with_callback(kind.name(), closure.as_ref().unchecked_ref()),
            );
        }
    }
}

/// Reads the page's JSON override, if any.
pub fn load_config(document: &WebDocument) -> Result<FormConfig, InitError> {
    match document.document.get_element_by_id(CONFIG_ELEMENT_ID) {
        Some(element) => FormConfig::from_json(&element.text_content().unwrap_or_default()),
        None => Ok(FormConfig::default()),
    }
}

/// Page entry point. Failures are logged to the console and leave the form
/// non-interactive.
pub fn start() -> Option<FormHandle<WebElement>> {
    let console: Rc<dyn Console> = Rc::new(BrowserConsole);
    let logger = Logger::new(Rc::clone(&console), Level::Info);
    logger.info("Creating registration form instance...");

    let setup = WebDocument::current()
        .and_then(|document| load_config(&document).map(|config| (document, config)));
    match setup {
        Ok((document, config)) => Some(bootstrap(document, config, console)),
        Err(error) => {
            logger.error(format!("Failed to initialize registration form: {error}"));
            None
        }
    }
}
