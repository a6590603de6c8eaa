//! Error taxonomy: configuration errors abort before any route is
//! processed, strategy errors are route-local and become reported skips,
//! output errors abort without replacing previous artifacts. The pipeline
//! driver decides severity; strategies only describe what went wrong.

use thiserror::Error;

/// Fatal before the run starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("match rule has no predicates")]
    EmptyMatchRule,

    #[error("malformed path glob {glob:?}: {reason}")]
    MalformedGlob { glob: String, reason: String },

    #[error("strategies {first:?} and {second:?} both own the {field} field with no merge policy")]
    ConflictingOwnership {
        first: String,
        second: String,
        field: &'static str,
    },

    #[error("invalid base_url {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Route-local; the driver turns these into `Skipping route:` log lines and
/// carries on with the rest of the table.
#[derive(Debug, Error)]
pub enum StrategyError {
    /// The reason string is surfaced verbatim to the operator, filename
    /// included.
    #[error("@responseFile {0} does not exist")]
    ResponseFileMissing(String),

    #[error("@responseFile {file} could not be read: {reason}")]
    ResponseFileUnreadable { file: String, reason: String },

    #[error("malformed {tag} tag: {reason}")]
    MalformedTag { tag: &'static str, reason: String },
}

/// A fatal generation failure: either the configuration was rejected before
/// any route was processed, or a staged write failed and the previous output
/// was left in place.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Output(#[from] OutputError),
}

/// Fatal during serialization; staged output is discarded and the previous
/// artifacts stay in place.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to render {artifact}: {reason}")]
    Render { artifact: &'static str, reason: String },

    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
