//! The slice of the DOM the controller needs.
//!
//! The browser backend implements these traits over `web_sys`; tests use an
//! in-memory document. Element handles are cheap to clone and refer to the
//! same node.

use crate::error::InitError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementKind {
    Input,
    Button,
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DomEventKind {
    Input,
    Click,
    Submit,
}

impl DomEventKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Click => "click",
            Self::Submit => "submit",
        }
    }
}

pub trait DomEvent {
    fn prevent_default(&self);
}

pub type Listener = Box<dyn FnMut(&dyn DomEvent)>;

pub trait FormElement: Clone + 'static {
    fn kind(&self) -> ElementKind;

    /// Current value of an input, empty for anything else.
    fn value(&self) -> String;

    fn set_text_content(&self, text: &str);

    fn set_class_name(&self, class_name: &str);

    fn set_disabled(&self, disabled: bool);

    /// The `type` of an input, empty for anything else.
    fn input_type(&self) -> String;

    fn set_input_type(&self, input_type: &str);

    fn set_attribute(&self, name: &str, value: &str);

    /// First nested `<i>` element.
    fn icon(&self) -> Option<Self>;

    fn focus(&self);

    /// Constraint validation message, an empty string clears it.
    fn set_custom_validity(&self, message: &str);

    fn add_event_listener(&self, kind: DomEventKind, listener: Listener) -> Result<(), InitError>;

    /// Detaches every listener attached through this handle or its clones.
    fn remove_event_listeners(&self);
}

pub trait FormDocument {
    type Element: FormElement;

    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// `false` while the document is still loading.
    fn is_ready(&self) -> bool;

    /// Runs `callback` once the document finished loading.
    fn on_ready(&self, callback: Box<dyn FnOnce()>) -> Result<(), InitError>;
}
