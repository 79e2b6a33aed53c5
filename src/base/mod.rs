//! Foundation types for the generator.
//!
//! - [`FileId`] - Index of a source file inside a loaded package
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - [`LineCol`], [`LineIndex`] - Line/column conversion for diagnostics
//! - [`Position`] - Printable line/column
//!
//! This module has NO dependencies on other handlergen modules.

mod file_id;
mod position;
mod span;

pub use file_id::FileId;
pub use position::Position;
pub use span::{LineCol, LineIndex, TextRange, TextSize};

/// Check whether `text` is a Go identifier.
///
/// Go identifiers are a letter or `_` followed by letters, digits or `_`,
/// which is the XID rule with `_` allowed in leading position.
pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first == '_' || unicode_ident::is_xid_start(first) => {
            chars.all(unicode_ident::is_xid_continue)
        }
        _ => false,
    }
}

/// Exported Go names start with an upper-case letter.
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifiers() {
        assert!(is_identifier("h"));
        assert!(is_identifier("_private"));
        assert!(is_identifier("größe"));
        assert!(!is_identifier("1abc"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("a-b"));
    }

    #[test]
    fn test_exported() {
        assert!(is_exported("Request"));
        assert!(!is_exported("request"));
        assert!(!is_exported("_X"));
    }
}
