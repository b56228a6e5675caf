use crate::ast::{ChildNode, Node, ParentNode};
use crate::cursor::TokenCursor;
use crate::error::{SyntaxError, SyntaxErrorKind};
use crate::patterns::{classify, strip_delimiters, TokenKind, CLOSE_BRACE, CUSTOM_SEPARATOR};

/// Deepest block nesting accepted before parsing stops with an error.
pub const MAX_DEPTH: usize = 256;

/// Builds the node tree from the tokens left after the metadata section.
///
/// Every node is read the same way: tokens are classified one at a time and
/// accumulated until a terminator decides the node's shape. `,` closes a leaf,
/// `}` closes a block opened earlier in the same node with `{`.
///
/// The `multi` flag of a node starts from the resolved `multi` of the
/// enclosing block. A `*` in the node itself sets it.
pub struct NodeTreeBuilder<'c> {
    cursor: &'c mut TokenCursor,
}

impl<'c> NodeTreeBuilder<'c> {
    pub fn new(cursor: &'c mut TokenCursor) -> Self {
        Self { cursor }
    }

    /// Parses top-level nodes until the token stream is exhausted.
    pub fn build(mut self) -> Result<Vec<Node>, SyntaxError> {
        let mut nodes = Vec::new();
        loop {
            nodes.push(self.parse_node(false, 0)?);
            if self.cursor.peek_token().is_none() {
                break;
            }
        }
        Ok(nodes)
    }

    ///    node   ::= leaf | parent
    ///    leaf   ::= [KEY] XPATH ["*"] [ATTR] [CUSTOM] ","
    ///    parent ::= KEY XPATH ["*"] "{" node+ "}"
    fn parse_node(&mut self, inherited_multi: bool, depth: usize) -> Result<Node, SyntaxError> {
        let mut key: Option<String> = None;
        let mut xpath: Option<String> = None;
        let mut multi = inherited_multi;
        let mut attribute: Option<String> = None;
        let mut custom: Option<String> = None;
        let mut children: Vec<Node> = Vec::new();

        loop {
            let Some(token) = self.cursor.next_token().map(str::to_owned) else {
                return Err(self.cursor.error(SyntaxErrorKind::UnexpectedEnd));
            };
            let Some(kind) = classify(&token) else {
                return Err(self.cursor.error(SyntaxErrorKind::InvalidToken));
            };

            match kind {
                TokenKind::Key => key = Some(token),
                TokenKind::Xpath => xpath = Some(token),
                TokenKind::Multi => multi = true,
                TokenKind::Attribute => attribute = Some(strip_delimiters(&token).to_string()),
                TokenKind::Custom => {
                    custom = Some(format!("{CUSTOM_SEPARATOR}{}", strip_delimiters(&token)));
                }
                TokenKind::OpenBrace => {
                    if self.cursor.peek_token() == Some(CLOSE_BRACE) {
                        return Err(self.cursor.error(SyntaxErrorKind::EmptyBlock));
                    }
                    if depth >= MAX_DEPTH {
                        return Err(self.cursor.error(SyntaxErrorKind::NestingTooDeep));
                    }
                    loop {
                        children.push(self.parse_node(multi, depth + 1)?);
                        if self.cursor.peek_token() == Some(CLOSE_BRACE) {
                            break;
                        }
                    }
                }
                TokenKind::CloseBrace => {
                    let (Some(key), Some(xpath)) = (key, xpath) else {
                        return Err(self.cursor.error(SyntaxErrorKind::MissingKeyOrXpath));
                    };
                    if children.is_empty() {
                        return Err(self.cursor.error(SyntaxErrorKind::EmptyBlock));
                    }
                    return Ok(Node::Parent(ParentNode {
                        key,
                        xpath,
                        children,
                    }));
                }
                TokenKind::Comma => {
                    let Some(xpath) = xpath else {
                        return Err(self.cursor.error(SyntaxErrorKind::MissingXpath));
                    };
                    return Ok(Node::Child(ChildNode {
                        key,
                        xpath,
                        multi,
                        attribute,
                        custom,
                    }));
                }
            }
        }
    }
}
