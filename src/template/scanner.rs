// src/template/scanner.rs

//! Single-pass placeholder scanner.
//!
//! Recognised forms after the delimiter:
//! - `@@` → a literal `@`
//! - `@name` → bare identifier, as long as possible
//! - `@{name}` → braced identifier
//! - anything else → the `@` is kept as-is
//!
//! Identifiers start with an ASCII letter or `_` and continue with ASCII
//! letters, digits, `-` or `_`.

use super::bindings::{strip_extension, Bindings};

/// Placeholder delimiter.
pub const DELIMITER: char = '@';

/// Identifier suffix asking for the extension of the bound value to be
/// stripped (`@file-ext`).
pub const STRIP_EXT_SUFFIX: &str = "-ext";

#[derive(Debug, PartialEq, Eq)]
enum Token<'a> {
    /// `@@`
    Escaped,
    /// A placeholder name and the number of bytes it occupies after the
    /// delimiter (braces included).
    Placeholder { name: &'a str, len: usize },
    /// Nothing recognisable follows the delimiter.
    Literal,
}

/// Substitute every placeholder in `template` using `bindings`.
///
/// Never fails: unresolved placeholders are copied through untouched.
pub fn expand(template: &str, bindings: &Bindings) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find(DELIMITER) {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + DELIMITER.len_utf8()..];

        match scan(after) {
            Token::Escaped => {
                out.push(DELIMITER);
                rest = &after[DELIMITER.len_utf8()..];
            }
            Token::Placeholder { name, len } => {
                match resolve(name, bindings) {
                    Some(value) => out.push_str(&value),
                    None => {
                        out.push(DELIMITER);
                        out.push_str(&after[..len]);
                    }
                }
                rest = &after[len..];
            }
            Token::Literal => {
                out.push(DELIMITER);
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

fn scan(after: &str) -> Token<'_> {
    if after.starts_with(DELIMITER) {
        return Token::Escaped;
    }

    if let Some(inner) = after.strip_prefix('{') {
        let n = identifier_len(inner);
        if n > 0 && inner[n..].starts_with('}') {
            return Token::Placeholder {
                name: &inner[..n],
                len: n + 2,
            };
        }
        return Token::Literal;
    }

    match identifier_len(after) {
        0 => Token::Literal,
        n => Token::Placeholder {
            name: &after[..n],
            len: n,
        },
    }
}

/// Byte length of the identifier at the start of `s` (0 if none).
fn identifier_len(s: &str) -> usize {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return 0,
    }
    1 + chars
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .count()
}

fn resolve(name: &str, bindings: &Bindings) -> Option<String> {
    if let Some(value) = bindings.get(name) {
        return Some(value.to_string());
    }
    let base = name.strip_suffix(STRIP_EXT_SUFFIX)?;
    bindings.get(base).map(strip_extension)
}
