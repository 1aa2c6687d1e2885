//! Rules behind the registration form.
//! No Zoon or browser dependencies.
//!
//! `password` holds the six live password requirements shown next to the
//! password field, `account` holds the username/email rules the server applies
//! to the same form.

pub mod account;
pub mod password;

pub use account::{AccountIssue, check_email, check_username};
pub use password::{
    MatchFeedback, Requirement, SPECIAL_CHARACTERS, ValidationResult, evaluate, has_length,
    has_lowercase, has_number, has_special, has_uppercase, match_feedback, passwords_match,
};
