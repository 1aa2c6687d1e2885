use crate::dom::ElementKind;

/// A required element that did not resolve, by role and by the id looked up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MissingElement {
    pub role: String,
    pub id: String,
}

impl std::fmt::Display for MissingElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (#{})", self.role, self.id)
    }
}

/// Why the form could not be wired up.
///
/// None of these are fatal for the page; the form just stays non-interactive.
#[derive(Debug, Clone, PartialEq)]
pub enum InitError {
    /// Every required element that failed to resolve, in lookup order.
    MissingElements(Vec<MissingElement>),
    /// The element exists but cannot play its role.
    WrongElementKind {
        role: String,
        id: String,
        expected: ElementKind,
        found: ElementKind,
    },
    DocumentUnavailable,
    /// Attaching a listener failed in the host document.
    Listener { event: &'static str, detail: String },
    Config(String),
}

impl InitError {
    /// Role names of the missing elements, empty for other errors.
    pub fn missing_roles(&self) -> Vec<&str> {
        match self {
            InitError::MissingElements(missing) => missing.iter().map(|m| m.role.as_str()).collect(),
            _ => Vec::new(),
        }
    }
}

impl std::fmt::Display for InitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InitError::MissingElements(missing) => {
                write!(f, "Missing required elements: ")?;
                for (index, element) in missing.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{element}")?;
                }
                Ok(())
            }
            InitError::WrongElementKind { role, id, expected, found } => write!(
                f,
                "element #{id} ({role}) is {found:?}, expected {expected:?}"
            ),
            InitError::DocumentUnavailable => write!(f, "no document available"),
            InitError::Listener { event, detail } => {
                write!(f, "failed to attach '{event}' listener: {detail}")
            }
            InitError::Config(detail) => write!(f, "invalid form configuration: {detail}"),
        }
    }
}

impl std::error::Error for InitError {}
