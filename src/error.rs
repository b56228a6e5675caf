use miette::{Diagnostic, NamedSource, SourceSpan};
use std::fmt::Display;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum XprError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Merge(#[from] MergeError),
}

/// The metadata directives an XPR file may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    Name,
    Includes,
    Excludes,
}

impl Display for Directive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Directive::Name => write!(f, "@name"),
            Directive::Includes => write!(f, "@includes"),
            Directive::Excludes => write!(f, "@excludes"),
        }
    }
}

/// What went wrong while reading an XPR token stream.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    #[error("`@name` and `@includes` must both be declared")]
    MissingMetadata,
    #[error("`{0}` cannot be declared twice")]
    DuplicateDirective(Directive),
    #[error("`@name` is not followed by an identifier")]
    MissingIdentifier,
    #[error("`@name` identifiers may only contain A-Z, 0-9 and `_`")]
    InvalidIdentifier,
    #[error("expected `,` after the {0}")]
    MissingComma(String),
    #[error("`{0}` must be followed by `{{`")]
    BlockNotStarted(Directive),
    #[error("the `{0}` block is never closed")]
    UnterminatedBlock(Directive),
    #[error("`@includes` needs at least one directory")]
    EmptyIncludes,
    #[error("directories in `{0}` must start with `/`")]
    InvalidPath(Directive),
    #[error("invalid token")]
    InvalidToken,
    #[error("unexpected end of tokens")]
    UnexpectedEnd,
    #[error("node has no xpath")]
    MissingXpath,
    #[error("block node needs both a key and an xpath")]
    MissingKeyOrXpath,
    #[error("a block must contain at least one node")]
    EmptyBlock,
    #[error("blocks are nested more than {} levels deep", crate::nodes::MAX_DEPTH)]
    NestingTooDeep,
}

impl SyntaxErrorKind {
    fn help(&self) -> Option<&'static str> {
        match self {
            SyntaxErrorKind::MissingMetadata => {
                Some("Start the file with `@name IDENT,` and `@includes { /path, }`.")
            }
            SyntaxErrorKind::MissingComma(_) => {
                Some("Every identifier and directory entry is terminated by a comma.")
            }
            SyntaxErrorKind::InvalidToken => Some(
                "Expected a KEY, an /xpath, `*`, an [attribute], a 'custom' style, a brace or a comma.",
            ),
            SyntaxErrorKind::UnexpectedEnd => {
                Some("The file ended inside a node. Check for an unclosed `{` or a missing `,`.")
            }
            SyntaxErrorKind::MissingXpath => Some("Leaf nodes look like `[KEY] /xpath ... ,`."),
            SyntaxErrorKind::MissingKeyOrXpath => Some("Block nodes look like `KEY /xpath { ... }`."),
            _ => None,
        }
    }
}

/// A fatal error in one XPR file, located at the token the parser was on.
///
/// `context` is the token window around that position with the offending
/// token wrapped in `>>>` and `<<<`.
#[derive(Error, Debug, Diagnostic, Clone)]
#[error("{kind}: {context}")]
#[diagnostic(code(xpr::syntax))]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    pub context: String,
    #[source_code]
    pub src: NamedSource<String>,
    #[label("{kind}")]
    pub span: SourceSpan,
    #[help]
    pub help: Option<String>,
}

impl SyntaxError {
    pub fn new(
        kind: SyntaxErrorKind,
        context: String,
        src: NamedSource<String>,
        span: SourceSpan,
    ) -> Self {
        let help = kind.help().map(str::to_string);
        Self {
            kind,
            context,
            src,
            span,
            help,
        }
    }
}

#[derive(Error, Debug, Diagnostic)]
pub enum ManifestError {
    #[error("expected a manifest named `index.json`, got `{}`", .path.display())]
    #[diagnostic(
        code(manifest::wrong_file),
        help("Run the merge against the project's `index.json`.")
    )]
    WrongFileName { path: PathBuf },

    #[error("manifest `{}` not found", .path.display())]
    #[diagnostic(code(manifest::not_found))]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("manifest `{}` is not valid JSON", .path.display())]
    #[diagnostic(code(manifest::syntax))]
    Syntax {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("manifest `{}` does not match the expected schema", .path.display())]
    #[diagnostic(
        code(manifest::schema),
        help("Allowed fields: input (string), output (string), ignore (string[]), pretty (bool).")
    )]
    Schema {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not list folders in `{}`", .path.display())]
    #[diagnostic(code(manifest::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug, Diagnostic)]
pub enum MergeError {
    #[error("folder `{folder}` has no `{file}`")]
    #[diagnostic(code(merge::missing_file))]
    MissingFile { folder: String, file: String },

    #[error("error in `/{folder}/{file}`")]
    #[diagnostic(code(merge::rule))]
    Rule {
        folder: String,
        file: String,
        #[source]
        #[diagnostic_source]
        source: SyntaxError,
    },

    #[error("`/{folder}/{file}` is not valid JSON")]
    #[diagnostic(code(merge::translation))]
    InvalidTranslation {
        folder: String,
        file: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error on `{}`", .path.display())]
    #[diagnostic(code(merge::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not serialize `{file}`")]
    #[diagnostic(code(merge::serialize))]
    Serialize {
        file: String,
        #[source]
        source: serde_json::Error,
    },
}
