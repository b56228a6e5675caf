use serde::{Deserialize, Serialize};

/// The directives at the top of an XPR file.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct RuleGroupMetadata {
    pub name: String,
    pub includes: Vec<String>,
    pub excludes: Vec<String>,
}

/// An extraction rule: either a block with nested rules or a leaf.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Parent(ParentNode),
    Child(ChildNode),
}

/// `KEY /xpath [*] { node+ }`
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct ParentNode {
    pub key: String,
    pub xpath: String,
    #[serde(rename = "nodes")]
    pub children: Vec<Node>,
}

/// `[KEY] /xpath [*] [[attr]] ['custom'] ,`
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct ChildNode {
    pub key: Option<String>,
    pub xpath: String,
    pub multi: bool,
    pub attribute: Option<String>,
    pub custom: Option<String>,
}

/// One compiled XPR file, serialized as `{name, includes, excludes, nodes}`.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct RuleGroup {
    #[serde(flatten)]
    pub metadata: RuleGroupMetadata,
    pub nodes: Vec<Node>,
}

impl Node {
    pub fn key(&self) -> Option<&str> {
        match self {
            Node::Parent(parent) => Some(&parent.key),
            Node::Child(child) => child.key.as_deref(),
        }
    }

    pub fn xpath(&self) -> &str {
        match self {
            Node::Parent(parent) => &parent.xpath,
            Node::Child(child) => &child.xpath,
        }
    }
}
