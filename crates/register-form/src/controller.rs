//! The registration form controller.
//!
//! Lifecycle: [`bootstrap`] waits for the document, [`initialize`] resolves
//! every element and binds listeners, after which the form is `Ready` for the
//! rest of the page's life. Each keystroke in either password field re-runs
//! [`FormController::validate_password`], which derives everything from the
//! current field values and keeps no state between calls. Keystrokes in the
//! username and email fields re-check their account rule.

use std::cell::RefCell;
use std::rc::Rc;

use register_rules::{
    AccountIssue, MatchFeedback, Requirement, ValidationResult, check_email, check_username,
    evaluate, match_feedback,
};

use crate::config::{ElementIds, FormConfig};
use crate::console::{Console, Logger};
use crate::dom::{DomEvent, DomEventKind, ElementKind, FormDocument, FormElement, Listener};
use crate::error::{InitError, MissingElement};

pub const PASSWORDS_MATCH_MESSAGE: &str = "Passwords match";
pub const PASSWORDS_MISMATCH_MESSAGE: &str = "Passwords do not match";
pub const SHOW_PASSWORD_LABEL: &str = "Show password";
pub const HIDE_PASSWORD_LABEL: &str = "Hide password";

pub const VALID_CLASS: &str = "valid";
pub const INVALID_CLASS: &str = "invalid";
pub const FEEDBACK_VALID_CLASS: &str = "password-match-feedback valid";
pub const FEEDBACK_INVALID_CLASS: &str = "password-match-feedback invalid";
pub const ICON_VALID_CLASS: &str = "fas fa-check-circle";
pub const ICON_INVALID_CLASS: &str = "fas fa-times-circle";
pub const ICON_SHOW_CLASS: &str = "fas fa-eye";
pub const ICON_HIDE_CLASS: &str = "fas fa-eye-slash";

/// How a password input renders its value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputMode {
    Masked,
    Plain,
}

impl InputMode {
    pub fn of<E: FormElement>(input: &E) -> Self {
        if input.input_type() == "password" { Self::Masked } else { Self::Plain }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Masked => Self::Plain,
            Self::Plain => Self::Masked,
        }
    }

    pub fn input_type(&self) -> &'static str {
        match self {
            Self::Masked => "password",
            Self::Plain => "text",
        }
    }
}

/// Every element the controller touches, resolved once.
#[derive(Clone)]
pub struct FormElements<E> {
    pub form: E,
    pub password: E,
    pub password_confirm: E,
    pub submit_button: E,
    pub match_feedback: E,
    /// Indexed by [`Requirement::index`].
    pub requirements: [E; 6],
    pub toggle_password: E,
    pub toggle_password_confirm: E,
    pub email: Option<E>,
    pub username: Option<E>,
}

impl<E: FormElement> FormElements<E> {
    pub fn requirement(&self, requirement: Requirement) -> &E {
        &self.requirements[requirement.index()]
    }

    /// Looks up every required element and reports all missing ones at once.
    pub fn resolve<D>(document: &D, ids: &ElementIds) -> Result<Self, InitError>
    where
        D: FormDocument<Element = E>,
    {
        let mut missing = Vec::new();
        let mut lookup = |role: String, id: &str| {
            let element = document.element_by_id(id);
            if element.is_none() {
                missing.push(MissingElement { role, id: id.to_string() });
            }
            element
        };

        let form = lookup("form".into(), &ids.form);
        let password = lookup("password".into(), &ids.password);
        let password_confirm = lookup("passwordConfirm".into(), &ids.password_confirm);
        let submit_button = lookup("submitButton".into(), &ids.submit_button);
        let match_feedback = lookup("passwordMatchFeedback".into(), &ids.match_feedback);
        let requirements: Vec<_> = Requirement::ALL
            .into_iter()
            .filter_map(|r| lookup(format!("requirement-{}", r.name()), ids.requirement(r)))
            .collect();
        let toggle_password = lookup("togglePassword".into(), &ids.toggle_password);
        let toggle_password_confirm =
            lookup("togglePasswordConfirm".into(), &ids.toggle_password_confirm);

        let (
            Some(form),
            Some(password),
            Some(password_confirm),
            Some(submit_button),
            Some(match_feedback),
            Some(toggle_password),
            Some(toggle_password_confirm),
            Ok(requirements),
        ) = (
            form,
            password,
            password_confirm,
            submit_button,
            match_feedback,
            toggle_password,
            toggle_password_confirm,
            <[E; 6]>::try_from(requirements),
        )
        else {
            return Err(InitError::MissingElements(missing));
        };

        expect_kind("password", &ids.password, &password, &[ElementKind::Input])?;
        expect_kind("passwordConfirm", &ids.password_confirm, &password_confirm, &[ElementKind::Input])?;
        expect_kind(
            "submitButton",
            &ids.submit_button,
            &submit_button,
            &[ElementKind::Button, ElementKind::Input],
        )?;

        Ok(Self {
            form,
            password,
            password_confirm,
            submit_button,
            match_feedback,
            requirements,
            toggle_password,
            toggle_password_confirm,
            email: ids.email.as_deref().and_then(|id| document.element_by_id(id)),
            username: ids.username.as_deref().and_then(|id| document.element_by_id(id)),
        })
    }
}

fn expect_kind<E: FormElement>(
    role: &str,
    id: &str,
    element: &E,
    allowed: &[ElementKind],
) -> Result<(), InitError> {
    let found = element.kind();
    if allowed.contains(&found) {
        Ok(())
    } else {
        Err(InitError::WrongElementKind {
            role: role.to_string(),
            id: id.to_string(),
            expected: allowed[0],
            found,
        })
    }
}

/// One of the account rules from `register_rules::account`.
pub type AccountCheck = fn(&str) -> Result<(), AccountIssue>;

pub struct FormController<E> {
    elements: FormElements<E>,
    logger: Logger,
}

impl<E: FormElement> FormController<E> {
    pub fn elements(&self) -> &FormElements<E> {
        &self.elements
    }

    /// Re-derives every indicator, the match feedback and the submit button
    /// from the current field values.
    pub fn validate_password(&self) -> ValidationResult {
        let password = self.elements.password.value();
        let confirm = self.elements.password_confirm.value();
        let result = evaluate(&password, &confirm);
        self.logger.debug(format!("Password validation results: {result:?}"));

        for (requirement, satisfied) in result.iter() {
            self.update_requirement(requirement, satisfied);
        }

        let feedback = &self.elements.match_feedback;
        match match_feedback(&password, &confirm) {
            MatchFeedback::Cleared => feedback.set_text_content(""),
            MatchFeedback::Match => {
                feedback.set_text_content(PASSWORDS_MATCH_MESSAGE);
                feedback.set_class_name(FEEDBACK_VALID_CLASS);
            }
            MatchFeedback::Mismatch => {
                feedback.set_text_content(PASSWORDS_MISMATCH_MESSAGE);
                feedback.set_class_name(FEEDBACK_INVALID_CLASS);
            }
        }

        let disabled = !result.all_valid();
        self.elements.submit_button.set_disabled(disabled);
        self.logger.debug(format!("Submit button state: disabled={disabled}"));
        result
    }

    fn update_requirement(&self, requirement: Requirement, satisfied: bool) {
        let indicator = self.elements.requirement(requirement);
        indicator.set_class_name(if satisfied { VALID_CLASS } else { INVALID_CLASS });
        match indicator.icon() {
            Some(icon) => {
                icon.set_class_name(if satisfied { ICON_VALID_CLASS } else { ICON_INVALID_CLASS })
            }
            None => self.logger.warn(format!("Icon not found for requirement: {requirement}")),
        }
        self.logger.debug(format!("Updated requirement {requirement}: valid={satisfied}"));
    }

    /// Switches `input` between masked and plain text and updates `button`'s
    /// icon and label to offer the opposite action. Returns the new mode.
    pub fn toggle_password_visibility(&self, input: Option<&E>, button: Option<&E>) -> Option<InputMode> {
        let (Some(input), Some(button)) = (input, button) else {
            self.logger.error("Invalid input or button element");
            return None;
        };

        let mode = InputMode::of(input).toggled();
        input.set_input_type(mode.input_type());

        let (icon_class, label) = match mode {
            InputMode::Masked => (ICON_SHOW_CLASS, SHOW_PASSWORD_LABEL),
            InputMode::Plain => (ICON_HIDE_CLASS, HIDE_PASSWORD_LABEL),
        };
        if let Some(icon) = button.icon() {
            icon.set_class_name(icon_class);
        }
        button.set_attribute("aria-label", label);
        Some(mode)
    }

    /// Runs on form submit. Returns `false` when the submit has to be
    /// cancelled.
    pub fn guard_submission(&self) -> bool {
        let result = self.validate_password();
        let mut allowed = true;
        if !result.all_valid() {
            self.logger.warn(format!(
                "Submit blocked, unmet requirements: {:?}",
                result.unsatisfied()
            ));
            allowed = false;
        }
        for (field, name, check) in self.account_fields() {
            if let Err(issue) = self.check_account_field(field, check) {
                self.logger.warn(format!("Submit blocked, {name}: {issue}"));
                allowed = false;
            }
        }
        allowed
    }

    /// Sets the field's constraint validation message from `check`, or clears
    /// it. Browsers hold back `submit` while any message is set, so this runs
    /// on every keystroke as well as on submit.
    pub fn check_account_field(&self, field: &E, check: AccountCheck) -> Result<(), AccountIssue> {
        let outcome = check(&field.value());
        match &outcome {
            Ok(()) => field.set_custom_validity(""),
            Err(issue) => field.set_custom_validity(&issue.to_string()),
        }
        outcome
    }

    fn account_fields(&self) -> impl Iterator<Item = (&E, &'static str, AccountCheck)> {
        let username = (self.elements.username.as_ref())
            .map(|field| (field, "username", check_username as AccountCheck));
        let email = (self.elements.email.as_ref()).map(|field| (field, "email", check_email as AccountCheck));
        username.into_iter().chain(email)
    }

    /// Attaches every listener or none: on the first refusal the listeners
    /// already attached are detached again.
    fn bind(self: &Rc<Self>) -> Result<(), InitError> {
        let mut bound: Vec<&E> = Vec::new();
        for (element, kind, listener) in self.listeners() {
            if let Err(error) = element.add_event_listener(kind, listener) {
                for element in bound {
                    element.remove_event_listeners();
                }
                return Err(error);
            }
            bound.push(element);
        }
        Ok(())
    }

    fn listeners(self: &Rc<Self>) -> Vec<(&E, DomEventKind, Listener)> {
        let elements = &self.elements;
        let mut listeners: Vec<(&E, DomEventKind, Listener)> = Vec::new();

        let this = Rc::clone(self);
        listeners.push((
            &elements.password,
            DomEventKind::Input,
            Box::new(move |_: &dyn DomEvent| {
                this.logger.debug("Password input event triggered");
                this.validate_password();
            }),
        ));

        let this = Rc::clone(self);
        listeners.push((
            &elements.password_confirm,
            DomEventKind::Input,
            Box::new(move |_: &dyn DomEvent| {
                this.logger.debug("Password confirm input event triggered");
                this.validate_password();
            }),
        ));

        for (field, name, check) in self.account_fields() {
            let this = Rc::clone(self);
            let field_handle = field.clone();
            listeners.push((
                field,
                DomEventKind::Input,
                Box::new(move |_: &dyn DomEvent| {
                    if let Err(issue) = this.check_account_field(&field_handle, check) {
                        this.logger.debug(format!("Invalid {name}: {issue}"));
                    }
                }),
            ));
        }

        let this = Rc::clone(self);
        listeners.push((
            &elements.toggle_password,
            DomEventKind::Click,
            Box::new(move |_: &dyn DomEvent| {
                this.logger.debug("Toggle password visibility");
                let elements = &this.elements;
                this.toggle_password_visibility(Some(&elements.password), Some(&elements.toggle_password));
            }),
        ));

        let this = Rc::clone(self);
        listeners.push((
            &elements.toggle_password_confirm,
            DomEventKind::Click,
            Box::new(move |_: &dyn DomEvent| {
                this.logger.debug("Toggle password confirm visibility");
                let elements = &this.elements;
                this.toggle_password_visibility(
                    Some(&elements.password_confirm),
                    Some(&elements.toggle_password_confirm),
                );
            }),
        ));

        let this = Rc::clone(self);
        listeners.push((
            &elements.form,
            DomEventKind::Submit,
            Box::new(move |event: &dyn DomEvent| {
                if !this.guard_submission() {
                    event.prevent_default();
                }
            }),
        ));

        listeners
    }
}

/// Resolves the elements, binds listeners, renders the starting state and
/// focuses an empty email field. Nothing is bound unless every required
/// element resolves.
pub fn initialize<D: FormDocument>(
    document: &D,
    config: &FormConfig,
    console: Rc<dyn Console>,
) -> Result<Rc<FormController<D::Element>>, InitError> {
    let logger = Logger::new(console, config.log_level);
    logger.info("Initializing registration form...");

    let elements = FormElements::resolve(document, &config.ids)?;
    logger.info("All form elements found successfully");

    let controller = Rc::new(FormController { elements, logger });
    controller.bind()?;

    controller.logger.debug("Performing initial validation");
    controller.validate_password();

    if let Some(email) = &controller.elements.email {
        if email.value().is_empty() {
            email.focus();
        }
    }

    controller.logger.info("Registration form initialization complete");
    Ok(controller)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormState {
    /// No listeners bound, either still waiting for the document or
    /// initialization failed.
    Uninitialized,
    Ready,
}

/// The host page's view of a bootstrapped form.
pub struct FormHandle<E> {
    controller: Rc<RefCell<Option<Rc<FormController<E>>>>>,
}

impl<E> Clone for FormHandle<E> {
    fn clone(&self) -> Self {
        Self { controller: Rc::clone(&self.controller) }
    }
}

impl<E: FormElement> FormHandle<E> {
    pub fn state(&self) -> FormState {
        if self.controller.borrow().is_some() { FormState::Ready } else { FormState::Uninitialized }
    }

    pub fn controller(&self) -> Option<Rc<FormController<E>>> {
        self.controller.borrow().clone()
    }
}

/// Initializes the form now if the document is ready, otherwise once it
/// reports ready. Errors are logged, never propagated to the page.
pub fn bootstrap<D>(document: D, config: FormConfig, console: Rc<dyn Console>) -> FormHandle<D::Element>
where
    D: FormDocument + 'static,
{
    let handle = FormHandle { controller: Rc::new(RefCell::new(None)) };
    let logger = Logger::new(Rc::clone(&console), config.log_level);

    let run = {
        let handle = handle.clone();
        let logger = logger.clone();
        move |document: &D| {
            match initialize(document, &config, console) {
                Ok(controller) => *handle.controller.borrow_mut() = Some(controller),
                Err(error) => logger.error(format!("Failed to initialize registration form: {error}")),
            }
        }
    };

    if document.is_ready() {
        run(&document);
    } else {
        let waiting_on = Rc::new(document);
        let document = Rc::clone(&waiting_on);
        if let Err(error) = waiting_on.on_ready(Box::new(move || run(&document))) {
            logger.error(format!("Failed to initialize registration form: {error}"));
        }
    }
    handle
}
