//! Client-side controller for the registration form.
//!
//! The controller is written against the small DOM abstraction in [`dom`], so
//! everything except the `browser` backend runs and is tested natively.
//!
//! ```ignore
//! // wasm32, from the page's `main`:
//! let form = register_form::browser::start();
//! ```

pub mod config;
pub mod console;
pub mod controller;
pub mod dom;
pub mod error;

#[cfg(target_arch = "wasm32")]
pub mod browser;

pub use config::{ElementIds, FormConfig};
pub use console::{Console, Level, Logger};
pub use controller::{
    AccountCheck, FormController, FormElements, FormHandle, FormState, InputMode, bootstrap,
    initialize,
};
pub use dom::{DomEvent, DomEventKind, ElementKind, FormDocument, FormElement, Listener};
pub use error::{InitError, MissingElement};
pub use register_rules as rules;
