use std::collections::BTreeMap;
use std::path::{is_separator, Path};

/// Placeholder name → literal substitution value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    values: BTreeMap<String, String>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bindings derived from one watched file:
    /// - `file`: the full path,
    /// - `dir`: its parent directory,
    /// - `name`: its final component.
    ///
    /// All values are shell-quoted.
    pub fn for_file(path: &Path) -> Self {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_string_lossy(),
            _ => ".".into(),
        };
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();

        let mut bindings = Self::new();
        bindings.insert("file", shell_quote(&path.to_string_lossy()));
        bindings.insert("dir", shell_quote(&dir));
        bindings.insert("name", shell_quote(&name));
        bindings
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Quote `s` for the platform shell if it contains anything beyond a
/// conservative set of safe characters.
pub fn shell_quote(s: &str) -> String {
    let safe = !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || "@%+=:,./_-".contains(c));
    if safe {
        return s.to_string();
    }
    if cfg!(windows) {
        format!("\"{s}\"")
    } else {
        format!("'{}'", s.replace('\'', r"'\''"))
    }
}

/// Remove the last `.ext` of the final path component of `value`.
///
/// A value wrapped in matching `'` or `"` keeps its quotes. Dotfiles such as
/// `.bashrc` have no extension.
pub fn strip_extension(value: &str) -> String {
    match unquote(value) {
        Some((quote, inner)) => format!("{quote}{}{quote}", strip_bare(inner)),
        None => strip_bare(value).to_string(),
    }
}

fn unquote(value: &str) -> Option<(char, &str)> {
    let quote = value.chars().next().filter(|c| *c == '\'' || *c == '"')?;
    if value.len() >= 2 && value.ends_with(quote) {
        Some((quote, &value[1..value.len() - 1]))
    } else {
        None
    }
}

fn strip_bare(value: &str) -> &str {
    let name_start = value.rfind(is_separator).map_or(0, |i| i + 1);
    match value[name_start..].rfind('.') {
        Some(dot) if dot > 0 => &value[..name_start + dot],
        _ => value,
    }
}
