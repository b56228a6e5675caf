//! Token patterns of the XPR grammar.
//!
//! Tokens carry no kind of their own. [`classify`] tests a token against the
//! node patterns in a fixed order and the first match wins. The order is
//! KEY, XPATH, MULTI, ATTRIBUTE, CUSTOM, `{`, `}`, `,` and must not change:
//! the patterns do not overlap today, but output on any future overlap has to
//! stay the same.

use once_cell::sync::Lazy;
use regex::Regex;

/// `@name` identifiers.
pub static IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z0-9_]+$").unwrap());
/// Directory entries of `@includes` and `@excludes`.
pub static DIRECTORY_PATH: Lazy<Regex> = Lazy::new(|| Regex::new(r"^/.*$").unwrap());
pub static KEY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z0-9_]+$").unwrap());
pub static XPATH: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:::)?/.*$").unwrap());
pub static MULTI: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\*$").unwrap());
pub static ATTRIBUTE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\[[a-zA-Z0-9-]+\]$").unwrap());
pub static CUSTOM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^'[^'\s]+'$").unwrap());

/// Prefix put in front of a custom style value.
pub const CUSTOM_SEPARATOR: char = ';';

pub const OPEN_BRACE: &str = "{";
pub const CLOSE_BRACE: &str = "}";
pub const COMMA: &str = ",";

/// The role a token plays inside a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Key,
    Xpath,
    Multi,
    Attribute,
    Custom,
    OpenBrace,
    CloseBrace,
    Comma,
}

/// Classification table, in priority order.
static PRIORITY: [(TokenKind, &Lazy<Regex>); 5] = [
    (TokenKind::Key, &KEY),
    (TokenKind::Xpath, &XPATH),
    (TokenKind::Multi, &MULTI),
    (TokenKind::Attribute, &ATTRIBUTE),
    (TokenKind::Custom, &CUSTOM),
];

/// Returns the kind of the first pattern `token` matches, or `None` for an
/// invalid token.
pub fn classify(token: &str) -> Option<TokenKind> {
    if let Some((kind, _)) = PRIORITY.iter().find(|(_, regex)| regex.is_match(token)) {
        return Some(*kind);
    }
    match token {
        OPEN_BRACE => Some(TokenKind::OpenBrace),
        CLOSE_BRACE => Some(TokenKind::CloseBrace),
        COMMA => Some(TokenKind::Comma),
        _ => None,
    }
}

/// Strips the first and last character, used for `[attr]` and `'custom'`.
pub fn strip_delimiters(token: &str) -> &str {
    let mut chars = token.chars();
    chars.next();
    chars.next_back();
    chars.as_str()
}
