//! In-memory document for driving the controller without a browser.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use register_form::{
    Console, DomEvent, DomEventKind, ElementKind, FormDocument, FormElement, InitError, Level,
    Listener,
};

#[derive(Default)]
struct DocumentState {
    elements: RefCell<HashMap<String, FakeElement>>,
    loading: Cell<bool>,
    ready_callbacks: RefCell<Vec<Box<dyn FnOnce()>>>,
}

#[derive(Clone, Default)]
pub struct FakeDocument(Rc<DocumentState>);

impl FakeDocument {
    pub fn loading() -> Self {
        let document = Self::default();
        document.0.loading.set(true);
        document
    }

    pub fn insert(&self, id: &str, element: FakeElement) -> FakeElement {
        self.0.elements.borrow_mut().insert(id.to_string(), element.clone());
        element
    }

    pub fn remove(&self, id: &str) -> Option<FakeElement> {
        self.0.elements.borrow_mut().remove(id)
    }

    pub fn get(&self, id: &str) -> FakeElement {
        self.0.elements.borrow().get(id).cloned().unwrap_or_else(|| panic!("no element #{id}"))
    }

    /// Fires the pending ready callbacks, like `DOMContentLoaded`.
    pub fn finish_loading(&self) {
        self.0.loading.set(false);
        let callbacks = self.0.ready_callbacks.take();
        for callback in callbacks {
            callback();
        }
    }

    pub fn total_listeners(&self) -> usize {
        self.0.elements.borrow().values().map(FakeElement::listener_count).sum()
    }

    /// Submits the form the way a browser does: interactive constraint
    /// validation runs first and any field with a custom validity message
    /// stops the `submit` event from firing at all.
    pub fn submit(&self, form_id: &str) -> Submission {
        let form = self.get(form_id);
        let invalid = self.0.elements.borrow().values().any(|element| !element.validity().is_empty());
        if invalid {
            Submission::Blocked
        } else if form.dispatch(DomEventKind::Submit) {
            Submission::Cancelled
        } else {
            Submission::Sent
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Submission {
    /// A field failed constraint validation, no `submit` event fired.
    Blocked,
    /// A listener called `prevent_default`.
    Cancelled,
    Sent,
}

impl FormDocument for FakeDocument {
    type Element = FakeElement;

    fn element_by_id(&self, id: &str) -> Option<FakeElement> {
        self.0.elements.borrow().get(id).cloned()
    }

    fn is_ready(&self) -> bool {
        !self.0.loading.get()
    }

    fn on_ready(&self, callback: Box<dyn FnOnce()>) -> Result<(), InitError> {
        self.0.ready_callbacks.borrow_mut().push(callback);
        Ok(())
    }
}

struct ElementState {
    kind: ElementKind,
    value: RefCell<String>,
    text: RefCell<String>,
    class_name: RefCell<String>,
    disabled: Cell<bool>,
    input_type: RefCell<String>,
    attributes: RefCell<HashMap<String, String>>,
    icon: RefCell<Option<FakeElement>>,
    focused: Cell<bool>,
    validity: RefCell<String>,
    listeners: RefCell<Vec<(DomEventKind, Listener)>>,
    refuses_listeners: Cell<bool>,
}

#[derive(Clone)]
pub struct FakeElement(Rc<ElementState>);

impl FakeElement {
    fn new(kind: ElementKind, input_type: &str) -> Self {
        Self(Rc::new(ElementState {
            kind,
            value: RefCell::default(),
            text: RefCell::default(),
            class_name: RefCell::default(),
            disabled: Cell::new(false),
            input_type: RefCell::new(input_type.to_string()),
            attributes: RefCell::default(),
            icon: RefCell::default(),
            focused: Cell::new(false),
            validity: RefCell::default(),
            listeners: RefCell::default(),
            refuses_listeners: Cell::new(false),
        }))
    }

    pub fn input(input_type: &str) -> Self {
        Self::new(ElementKind::Input, input_type)
    }

    pub fn button() -> Self {
        Self::new(ElementKind::Button, "")
    }

    pub fn other() -> Self {
        Self::new(ElementKind::Other, "")
    }

    pub fn with_icon(self) -> Self {
        *self.0.icon.borrow_mut() = Some(FakeElement::other());
        self
    }

    pub fn with_value(self, value: &str) -> Self {
        *self.0.value.borrow_mut() = value.to_string();
        self
    }

    /// Every `add_event_listener` on this element fails.
    pub fn refusing_listeners(self) -> Self {
        self.0.refuses_listeners.set(true);
        self
    }

    pub fn text(&self) -> String {
        self.0.text.borrow().clone()
    }

    pub fn class_name(&self) -> String {
        self.0.class_name.borrow().clone()
    }

    pub fn is_disabled(&self) -> bool {
        self.0.disabled.get()
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.0.attributes.borrow().get(name).cloned()
    }

    pub fn icon_class(&self) -> Option<String> {
        self.0.icon.borrow().as_ref().map(FakeElement::class_name)
    }

    pub fn is_focused(&self) -> bool {
        self.0.focused.get()
    }

    pub fn validity(&self) -> String {
        self.0.validity.borrow().clone()
    }

    pub fn listener_count(&self) -> usize {
        self.0.listeners.borrow().len()
    }

    /// Sets the value and fires `input`.
    pub fn type_text(&self, value: &str) {
        *self.0.value.borrow_mut() = value.to_string();
        self.dispatch(DomEventKind::Input);
    }

    pub fn click(&self) {
        self.dispatch(DomEventKind::Click);
    }

    fn dispatch(&self, kind: DomEventKind) -> bool {
        let event = FakeEvent::default();
        let mut listeners = self.0.listeners.take();
        for (listener_kind, listener) in listeners.iter_mut() {
            if *listener_kind == kind {
                listener(&event as &dyn DomEvent);
            }
        }
        let mut current = self.0.listeners.borrow_mut();
        listeners.append(&mut *current);
        *current = listeners;
        event.prevented.get()
    }
}

#[derive(Default)]
struct FakeEvent {
    prevented: Cell<bool>,
}

impl DomEvent for FakeEvent {
    fn prevent_default(&self) {
        self.prevented.set(true);
    }
}

impl FormElement for FakeElement {
    fn kind(&self) -> ElementKind {
        self.0.kind
    }

    fn value(&self) -> String {
        match self.0.kind {
            ElementKind::Input => self.0.value.borrow().clone(),
            _ => String::new(),
        }
    }

    fn set_text_content(&self, text: &str) {
        *self.0.text.borrow_mut() = text.to_string();
    }

    fn set_class_name(&self, class_name: &str) {
        *self.0.class_name.borrow_mut() = class_name.to_string();
    }

    fn set_disabled(&self, disabled: bool) {
        self.0.disabled.set(disabled);
    }

    fn input_type(&self) -> String {
        self.0.input_type.borrow().clone()
    }

    fn set_input_type(&self, input_type: &str) {
        *self.0.input_type.borrow_mut() = input_type.to_string();
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.0.attributes.borrow_mut().insert(name.to_string(), value.to_string());
    }

    fn icon(&self) -> Option<Self> {
        self.0.icon.borrow().clone()
    }

    fn focus(&self) {
        self.0.focused.set(true);
    }

    fn set_custom_validity(&self, message: &str) {
        *self.0.validity.borrow_mut() = message.to_string();
    }

    fn add_event_listener(&self, kind: DomEventKind, listener: Listener) -> Result<(), InitError> {
        if self.0.refuses_listeners.get() {
            return Err(InitError::Listener { event: kind.name(), detail: "refused".to_string() });
        }
        self.0.listeners.borrow_mut().push((kind, listener));
        Ok(())
    }

    fn remove_event_listeners(&self) {
        self.0.listeners.borrow_mut().clear();
    }
}

/// The registration template with the default ids.
pub fn registration_page() -> FakeDocument {
    let document = FakeDocument::default();
    fill_registration_page(&document);
    document
}

pub fn fill_registration_page(document: &FakeDocument) {
    document.insert("registerForm", FakeElement::other());
    document.insert("register_username", FakeElement::input("text"));
    document.insert("register_email", FakeElement::input("email"));
    document.insert("register_password", FakeElement::input("password"));
    document.insert("register_password_confirm", FakeElement::input("password"));
    document.insert("register_submit", FakeElement::button());
    document.insert("passwordMatchFeedback", FakeElement::other());
    for id in ["length", "uppercase", "lowercase", "number", "special", "match"] {
        document.insert(id, FakeElement::other().with_icon());
    }
    document.insert("togglePassword", FakeElement::button().with_icon());
    document.insert("togglePasswordConfirm", FakeElement::button().with_icon());
}

#[derive(Default)]
pub struct RecordingConsole {
    lines: RefCell<Vec<(Level, String)>>,
}

impl RecordingConsole {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn lines(&self) -> Vec<(Level, String)> {
        self.lines.borrow().clone()
    }

    pub fn contains(&self, level: Level, needle: &str) -> bool {
        self.lines.borrow().iter().any(|(l, line)| *l == level && line.contains(needle))
    }

    pub fn count(&self, level: Level) -> usize {
        self.lines.borrow().iter().filter(|(l, _)| *l == level).count()
    }
}

impl Console for RecordingConsole {
    fn write(&self, level: Level, message: &str) {
        self.lines.borrow_mut().push((level, message.to_string()));
    }
}
