pub mod ast;
pub mod cursor;
pub mod error;
pub mod hash;
pub mod lexer;
pub mod manifest;
pub mod merge;
pub mod metadata;
pub mod nodes;
pub mod parser;
pub mod patterns;
pub mod translation;

pub use ast::{ChildNode, Node, ParentNode, RuleGroup, RuleGroupMetadata};
pub use error::{MergeError, ManifestError, SyntaxError, SyntaxErrorKind, XprError};
pub use manifest::Manifest;
pub use merge::{merge, MergeOrchestrator, MergeOutcome};
pub use parser::compile;
