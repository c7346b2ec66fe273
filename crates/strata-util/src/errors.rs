use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all Strata operations.
#[derive(Debug, Error, Diagnostic)]
pub enum StrataError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Requirement file could not be read or is malformed.
    #[error("Requirement file error: {message}")]
    #[diagnostic(help("Check the requirement file for TOML syntax errors"))]
    Manifest { message: String },

    /// Global or per-file configuration is invalid.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// A `module-major.minor.patch-build` token failed to parse.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Identifier(#[from] ParseIdentifierError),

    /// The requirement tree contains one or more cycles.
    #[error("Circular dependencies detected ({count}):\n{cycles}")]
    #[diagnostic(help("Break the cycle, or pass --allow-cycles to continue anyway"))]
    CircularDependency { count: usize, cycles: String },

    /// Rationalization crossed a major version boundary.
    #[error("Semantic version breaches detected ({count}):\n{breaches}")]
    #[diagnostic(help(
        "Exclude the incompatible requirement, or pass --allow-breaches to accept the higher major version"
    ))]
    SemanticVersionBreach { count: usize, breaches: String },

    /// Dependency resolution failed for another reason.
    #[error("Dependency resolution failed: {message}")]
    Resolution { message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

/// Failure to parse a `module-major.minor.patch-build` identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("Invalid dependency identifier '{input}': {kind}")]
#[diagnostic(help("Expected `module.name-MAJOR.MINOR.PATCH-BUILD`, e.g. `a.b.c-1.0.0-0`"))]
pub struct ParseIdentifierError {
    pub input: String,
    pub kind: ParseIdentifierErrorKind,
}

/// What exactly was wrong with an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseIdentifierErrorKind {
    #[error("missing '-' between module name and version")]
    MissingVersion,
    #[error("module name is empty")]
    EmptyModuleName,
    #[error("module name segment '{0}' is not a valid identifier")]
    InvalidModuleName(String),
    #[error("version must be MAJOR.MINOR.PATCH-BUILD")]
    MalformedVersion,
    #[error("'{0}' is not a non-negative integer")]
    InvalidNumber(String),
}

impl ParseIdentifierError {
    pub fn new(input: &str, kind: ParseIdentifierErrorKind) -> Self {
        Self {
            input: input.to_string(),
            kind,
        }
    }
}

/// Convenience alias for `miette::Result<T>`.
pub type StrataResult<T> = miette::Result<T>;
