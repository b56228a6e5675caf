use crate::ast::RuleGroupMetadata;
use crate::cursor::TokenCursor;
use crate::error::{Directive, SyntaxError, SyntaxErrorKind};
use crate::patterns::{CLOSE_BRACE, COMMA, DIRECTORY_PATH, IDENTIFIER, OPEN_BRACE};

/// Reads the leading `@name`, `@includes` and `@excludes` directives.
///
/// Parsing stops at the first token that is not a directive. That token is
/// handed back to the cursor so the node tree builder starts on it.
pub struct MetadataParser<'c> {
    cursor: &'c mut TokenCursor,
}

impl<'c> MetadataParser<'c> {
    pub fn new(cursor: &'c mut TokenCursor) -> Self {
        Self { cursor }
    }

    ///    metadata ::= ( "@name" IDENT ","
    ///                 | "@includes" "{" { path "," } "}"
    ///                 | "@excludes" "{" { path "," } "}" )*
    pub fn parse(mut self) -> Result<RuleGroupMetadata, SyntaxError> {
        let mut name: Option<String> = None;
        let mut includes: Option<Vec<String>> = None;
        let mut excludes: Option<Vec<String>> = None;

        loop {
            let directive = match self.cursor.next_token() {
                Some("@name") => Directive::Name,
                Some("@includes") => Directive::Includes,
                Some("@excludes") => Directive::Excludes,
                Some(_) => {
                    // The node section has started; give its first token back.
                    self.cursor.prev_token();
                    break;
                }
                None => break,
            };

            match directive {
                Directive::Name => {
                    self.ensure_unset(&name, directive)?;
                    name = Some(self.parse_name()?);
                }
                Directive::Includes => {
                    self.ensure_unset(&includes, directive)?;
                    includes = Some(self.parse_directories(directive)?);
                }
                Directive::Excludes => {
                    self.ensure_unset(&excludes, directive)?;
                    excludes = Some(self.parse_directories(directive)?);
                }
            }
        }

        match (name, includes) {
            (Some(name), Some(includes)) => Ok(RuleGroupMetadata {
                name,
                includes,
                excludes: excludes.unwrap_or_default(),
            }),
            _ => Err(self.cursor.error(SyntaxErrorKind::MissingMetadata)),
        }
    }

    fn ensure_unset<T>(&self, current: &Option<T>, directive: Directive) -> Result<(), SyntaxError> {
        if current.is_some() {
            return Err(self
                .cursor
                .error(SyntaxErrorKind::DuplicateDirective(directive)));
        }
        Ok(())
    }

    /// `"@name" IDENT ","`, with the cursor on `@name`.
    fn parse_name(&mut self) -> Result<String, SyntaxError> {
        let name = match self.cursor.next_token() {
            None | Some(COMMA) => return Err(self.cursor.error(SyntaxErrorKind::MissingIdentifier)),
            Some(token) if !IDENTIFIER.is_match(token) => {
                return Err(self.cursor.error(SyntaxErrorKind::InvalidIdentifier))
            }
            Some(token) => token.to_string(),
        };

        self.expect_comma("`@name` identifier")?;
        Ok(name)
    }

    /// `"{" { path "," } "}"`, with the cursor on the directive.
    fn parse_directories(&mut self, directive: Directive) -> Result<Vec<String>, SyntaxError> {
        if self.cursor.next_token() != Some(OPEN_BRACE) {
            return Err(self.cursor.error(SyntaxErrorKind::BlockNotStarted(directive)));
        }

        let mut directories = Vec::new();
        loop {
            let directory = match self.cursor.next_token() {
                Some(CLOSE_BRACE) => break,
                None => return Err(self.cursor.error(SyntaxErrorKind::UnterminatedBlock(directive))),
                Some(token) if !DIRECTORY_PATH.is_match(token) => {
                    return Err(self.cursor.error(SyntaxErrorKind::InvalidPath(directive)))
                }
                Some(token) => token.to_string(),
            };

            self.expect_comma(&format!("`{directive}` directory"))?;
            directories.push(directory);
        }

        if directive == Directive::Includes && directories.is_empty() {
            return Err(self.cursor.error(SyntaxErrorKind::EmptyIncludes));
        }
        Ok(directories)
    }

    fn expect_comma(&mut self, after: &str) -> Result<(), SyntaxError> {
        if self.cursor.next_token() == Some(COMMA) {
            Ok(())
        } else {
            Err(self
                .cursor
                .error(SyntaxErrorKind::MissingComma(after.to_string())))
        }
    }
}
