//! Diagnostic sink.
//!
//! Everything the controller reports goes through [`Console`]. In the browser
//! that is the devtools console (see `browser::BrowserConsole`), in tests a
//! recording implementation.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl Default for Level {
    fn default() -> Self {
        Level::Debug
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub trait Console {
    fn write(&self, level: Level, message: &str);
}

/// A [`Console`] with a minimum level.
#[derive(Clone)]
pub struct Logger {
    console: Rc<dyn Console>,
    min_level: Level,
}

impl Logger {
    pub fn new(console: Rc<dyn Console>, min_level: Level) -> Self {
        Self { console, min_level }
    }

    pub fn enabled(&self, level: Level) -> bool {
        level >= self.min_level
    }

    pub fn log(&self, level: Level, message: impl AsRef<str>) {
        if self.enabled(level) {
            self.console.write(level, message.as_ref());
        }
    }

    pub fn debug(&self, message: impl AsRef<str>) {
        self.log(Level::Debug, message);
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.log(Level::Info, message);
    }

    pub fn warn(&self, message: impl AsRef<str>) {
        self.log(Level::Warn, message);
    }

    pub fn error(&self, message: impl AsRef<str>) {
        self.log(Level::Error, message);
    }
}
