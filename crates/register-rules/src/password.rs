//! Password requirements.
//!
//! Every predicate is a pure function of the current field values, so
//! evaluating twice with the same input always gives the same result.

use serde::{Deserialize, Serialize};

/// Minimum password length, counted in Unicode scalar values.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Symbols that satisfy the `special` requirement. Anything else (`_`, `-`,
/// `+`, spaces, ...) does not.
pub const SPECIAL_CHARACTERS: &str = "!@#$%^&*(),.?\":{}|<>";

/// One of the six requirements rendered as an indicator next to the form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Requirement {
    Length,
    Uppercase,
    Lowercase,
    Number,
    Special,
    Match,
}

impl Requirement {
    /// All requirements in display order.
    pub const ALL: [Requirement; 6] = [
        Requirement::Length,
        Requirement::Uppercase,
        Requirement::Lowercase,
        Requirement::Number,
        Requirement::Special,
        Requirement::Match,
    ];

    /// Lowercase name, also the default DOM id of the indicator.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Length => "length",
            Self::Uppercase => "uppercase",
            Self::Lowercase => "lowercase",
            Self::Number => "number",
            Self::Special => "special",
            Self::Match => "match",
        }
    }

    /// Position in [`Requirement::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for Requirement {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

pub fn has_length(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LENGTH
}

pub fn has_uppercase(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_uppercase())
}

pub fn has_lowercase(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_lowercase())
}

pub fn has_number(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_digit())
}

pub fn has_special(password: &str) -> bool {
    password.chars().any(|c| SPECIAL_CHARACTERS.contains(c))
}

/// Two empty fields do not match.
pub fn passwords_match(password: &str, confirm: &str) -> bool {
    !password.is_empty() && password == confirm
}

/// Snapshot of all six requirements for one pair of field values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub has_length: bool,
    pub has_uppercase: bool,
    pub has_lowercase: bool,
    pub has_number: bool,
    pub has_special: bool,
    pub passwords_match: bool,
}

impl ValidationResult {
    pub fn get(&self, requirement: Requirement) -> bool {
        match requirement {
            Requirement::Length => self.has_length,
            Requirement::Uppercase => self.has_uppercase,
            Requirement::Lowercase => self.has_lowercase,
            Requirement::Number => self.has_number,
            Requirement::Special => self.has_special,
            Requirement::Match => self.passwords_match,
        }
    }

    /// `(requirement, satisfied)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Requirement, bool)> + '_ {
        Requirement::ALL.into_iter().map(move |r| (r, self.get(r)))
    }

    /// The submit button is enabled only when this holds.
    pub fn all_valid(&self) -> bool {
        Requirement::ALL.into_iter().all(|r| self.get(r))
    }

    pub fn unsatisfied(&self) -> Vec<Requirement> {
        self.iter().filter(|(_, ok)| !ok).map(|(r, _)| r).collect()
    }
}

pub fn evaluate(password: &str, confirm: &str) -> ValidationResult {
    ValidationResult {
        has_length: has_length(password),
        has_uppercase: has_uppercase(password),
        has_lowercase: has_lowercase(password),
        has_number: has_number(password),
        has_special: has_special(password),
        passwords_match: passwords_match(password, confirm),
    }
}

/// What the match-feedback node under the confirm field should say.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchFeedback {
    /// Confirm field is empty, feedback text is cleared.
    Cleared,
    Match,
    Mismatch,
}

pub fn match_feedback(password: &str, confirm: &str) -> MatchFeedback {
    if confirm.is_empty() {
        MatchFeedback::Cleared
    } else if passwords_match(password, confirm) {
        MatchFeedback::Match
    } else {
        MatchFeedback::Mismatch
    }
}
