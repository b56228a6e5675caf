use crate::ast::{Node, RuleGroup, RuleGroupMetadata};
use crate::cursor::TokenCursor;
use crate::error::SyntaxError;
use crate::metadata::MetadataParser;
use crate::nodes::NodeTreeBuilder;
use log::debug;

/// Compiles one XPR file: metadata first, then the node tree, both read from
/// the same cursor.
///
///    file ::= metadata node+
#[derive(Debug)]
pub struct Parser {
    cursor: TokenCursor,
}

impl Parser {
    pub fn new_with_name(source_text: &str, name: impl AsRef<str>) -> Self {
        Self {
            cursor: TokenCursor::new(source_text, name),
        }
    }

    pub fn parse_rule_group(mut self) -> Result<RuleGroup, SyntaxError> {
        debug!("parsing {} tokens", self.cursor.len());
        let metadata = MetadataParser::new(&mut self.cursor).parse()?;
        let nodes = NodeTreeBuilder::new(&mut self.cursor).build()?;
        Ok(assemble(metadata, nodes))
    }
}

/// Joins a file's metadata and node tree into one rule group.
pub fn assemble(metadata: RuleGroupMetadata, nodes: Vec<Node>) -> RuleGroup {
    RuleGroup { metadata, nodes }
}

/// Compiles XPR `source` into a rule group.
///
/// `file_name` only labels diagnostics.
///
/// # Errors
/// Returns a [`SyntaxError`] pointing at the offending token.
pub fn compile(source: &str, file_name: &str) -> Result<RuleGroup, SyntaxError> {
    Parser::new_with_name(source, file_name).parse_rule_group()
}
