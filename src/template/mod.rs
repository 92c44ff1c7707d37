// src/template/mod.rs

//! Command template expansion.
//!
//! A command such as `gcc @file -o @file-ext` is resolved once at startup
//! against [`Bindings`] derived from the first watched file. The resolved
//! string is what runs on every trigger.

pub mod bindings;
pub mod scanner;

use std::path::Path;

pub use bindings::{shell_quote, strip_extension, Bindings};
pub use scanner::{expand, DELIMITER, STRIP_EXT_SUFFIX};

/// Raw command, the bindings it was resolved against, and the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTemplate {
    raw: String,
    bindings: Bindings,
    command: String,
}

impl CommandTemplate {
    pub fn new(raw: impl Into<String>, bindings: Bindings) -> Self {
        let raw = raw.into();
        let command = expand(&raw, &bindings);
        Self {
            raw,
            bindings,
            command,
        }
    }

    /// Resolve `raw` against [`Bindings::for_file`].
    pub fn for_file(raw: impl Into<String>, path: &Path) -> Self {
        Self::new(raw, Bindings::for_file(path))
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    /// The literal command string to execute.
    pub fn command(&self) -> &str {
        &self.command
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_once_from_file() {
        let t = CommandTemplate::for_file(
            "cc @file -o @file-ext && ./@name-ext",
            Path::new("/p/hello.c"),
        );
        assert_eq!(t.raw(), "cc @file -o @file-ext && ./@name-ext");
        assert_eq!(t.command(), "cc /p/hello.c -o /p/hello && ./hello");
        assert_eq!(t.bindings().get("dir"), Some("/p"));
    }
}
