use crate::error::{SyntaxError, SyntaxErrorKind};
use crate::lexer::{Lexer, Token};
use miette::{NamedSource, SourceSpan};

/// Number of tokens shown on each side of the current one in diagnostics.
pub const CONTEXT_WINDOW: usize = 5;

/// A movable read position over one file's token stream.
///
/// The position starts before the first token. [`TokenCursor::next_token`] never moves
/// past the last token and [`TokenCursor::prev_token`] never moves before the first,
/// so after running off the end the cursor still points at the last valid
/// token, which is what error reports highlight.
///
/// One cursor is shared, by mutable borrow, between the metadata parser and the
/// node tree builder of the same file.
#[derive(Debug, Clone)]
pub struct TokenCursor {
    tokens: Vec<Token>,
    position: Option<usize>,
    source: NamedSource<String>,
}

impl TokenCursor {
    /// Lexes `source_text` and positions the cursor before its first token.
    pub fn new(source_text: &str, name: impl AsRef<str>) -> Self {
        let tokens = Lexer::new(source_text).lex();
        Self::from_tokens(tokens, NamedSource::new(name, source_text.to_string()))
    }

    pub fn from_tokens(tokens: Vec<Token>, source: NamedSource<String>) -> Self {
        Self {
            tokens,
            position: None,
            source,
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Advances one token and returns it, or returns `None` without moving
    /// when no token follows.
    pub fn next_token(&mut self) -> Option<&str> {
        let next = self.position.map_or(0, |p| p + 1);
        if next >= self.tokens.len() {
            return None;
        }
        self.position = Some(next);
        Some(self.tokens[next].as_str())
    }

    /// Retreats one token and returns it, or returns `None` without moving
    /// when the cursor is at or before the first token.
    pub fn prev_token(&mut self) -> Option<&str> {
        match self.position {
            Some(p) if p > 0 => {
                self.position = Some(p - 1);
                Some(self.tokens[p - 1].as_str())
            }
            _ => None,
        }
    }

    /// Returns the token after the current one without moving.
    pub fn peek_token(&self) -> Option<&str> {
        let next = self.position.map_or(0, |p| p + 1);
        self.tokens.get(next).map(Token::as_str)
    }

    /// The token under the cursor, if the cursor has moved onto one.
    pub fn current(&self) -> Option<&str> {
        self.position.map(|p| self.tokens[p].as_str())
    }

    /// Renders up to `window` tokens on each side of the current one, separated
    /// by spaces, with the current token wrapped in `>>>` and `<<<`.
    pub fn context(&self, window: usize) -> String {
        let Some(current) = self.clamped_index() else {
            return String::new();
        };
        let left = current.saturating_sub(window);
        let right = (current + window + 1).min(self.tokens.len());

        self.tokens[left..right]
            .iter()
            .enumerate()
            .map(|(i, token)| {
                if left + i == current {
                    format!(">>>{}<<<", token.value)
                } else {
                    token.value.clone()
                }
            })
            .collect::<Vec<String>>()
            .join(" ")
    }

    /// Source span of the current token.
    pub fn span(&self) -> SourceSpan {
        match self.clamped_index() {
            Some(index) => {
                let token = &self.tokens[index];
                (token.pos_start, token.pos_end - token.pos_start).into()
            }
            None => (0, 0).into(),
        }
    }

    /// Builds a syntax error located at the current token.
    pub fn error(&self, kind: SyntaxErrorKind) -> SyntaxError {
        SyntaxError::new(
            kind,
            self.context(CONTEXT_WINDOW),
            self.source.clone(),
            self.span(),
        )
    }

    fn clamped_index(&self) -> Option<usize> {
        if self.tokens.is_empty() {
            None
        } else {
            Some(self.position.unwrap_or(0).min(self.tokens.len() - 1))
        }
    }
}
