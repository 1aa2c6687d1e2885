//! Element ids and logging level.
//!
//! `FormConfig::default()` matches the registration template. A page can
//! override any part of it with JSON, missing fields keep their defaults.

use std::collections::BTreeMap;

use register_rules::Requirement;
use serde::{Deserialize, Serialize};

use crate::console::Level;
use crate::error::InitError;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormConfig {
    pub ids: ElementIds,
    pub log_level: Level,
}

impl FormConfig {
    pub fn from_json(json: &str) -> Result<Self, InitError> {
        serde_json::from_str(json).map_err(|error| InitError::Config(error.to_string()))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ElementIds {
    pub form: String,
    pub password: String,
    pub password_confirm: String,
    pub submit_button: String,
    pub match_feedback: String,
    pub toggle_password: String,
    pub toggle_password_confirm: String,
    /// Requirement indicators, a requirement not listed here uses its name.
    pub requirements: BTreeMap<Requirement, String>,
    /// Optional fields, `None` skips them.
    pub email: Option<String>,
    pub username: Option<String>,
}

impl ElementIds {
    pub fn requirement(&self, requirement: Requirement) -> &str {
        self.requirements
            .get(&requirement)
            .map(String::as_str)
            .unwrap_or(requirement.name())
    }
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            form: "registerForm".to_string(),
            password: "register_password".to_string(),
            password_confirm: "register_password_confirm".to_string(),
            submit_button: "register_submit".to_string(),
            match_feedback: "passwordMatchFeedback".to_string(),
            toggle_password: "togglePassword".to_string(),
            toggle_password_confirm: "togglePasswordConfirm".to_string(),
            requirements: Requirement::ALL
                .into_iter()
                .map(|r| (r, r.name().to_string()))
                .collect(),
            email: Some("register_email".to_string()),
            username: Some("register_username".to_string()),
        }
    }
}
