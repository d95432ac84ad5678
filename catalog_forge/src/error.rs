//! Error types produced by the catalog transform pipeline.

use camino::Utf8PathBuf;
use thiserror::Error;

use crate::codec::CodecError;
use crate::compiler::CompileFailure;
use crate::policy;

/// Convenience alias for results carrying a [`ForgeError`].
pub type ForgeResult<T> = Result<T, ForgeError>;

/// Errors that can occur while transforming a catalog request.
///
/// Fatal variants propagate unchanged to the host as the outcome of a single
/// [`transform`](crate::pipeline::TransformPipeline::transform) call; the
/// pipeline performs no retries and returns no partial artifact alongside a
/// failure. The policy-gated variants ([`MissingTranslations`] and
/// [`Compilation`]) are only raised when the corresponding switch in
/// [`TransformOptions`](crate::config::TransformOptions) is enabled;
/// otherwise the same message text is forwarded as a build warning.
///
/// [`MissingTranslations`]: ForgeError::MissingTranslations
/// [`Compilation`]: ForgeError::Compilation
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ForgeError {
    /// A required project setting is absent or invalid.
    #[error("{message}")]
    Configuration {
        /// Human-readable description of the missing or invalid setting.
        message: String,
    },

    /// The request id did not match any configured catalog path pattern.
    #[error(
        "Requested resource {relative_path} is not matched to any of your \
         catalogs paths specified in the project configuration.\n\n\
         Resource: {resource}\n\n\
         Your catalogs:\n{}\n\
         Please check that catalogs.path is filled properly.\n",
        .catalog_paths.join("\n")
    )]
    UnresolvedCatalog {
        /// Request path relative to the configured root directory.
        relative_path: Utf8PathBuf,
        /// The original resource id as supplied by the host.
        resource: String,
        /// Every configured catalog path pattern, for diagnostic display.
        catalog_paths: Vec<String>,
    },

    /// The request id matched more than one configured catalog path pattern.
    #[error(
        "Requested resource {relative_path} is matched by more than one of \
         your catalogs paths:\n{}\n\
         Please disambiguate the overlapping catalogs.path patterns.",
        .catalog_paths.join("\n")
    )]
    AmbiguousCatalog {
        /// Request path relative to the configured root directory.
        relative_path: Utf8PathBuf,
        /// The catalog path patterns that all matched the request.
        catalog_paths: Vec<String>,
    },

    /// Catalog data could not be read from disk.
    #[error("failed to read catalog data from '{path}'")]
    Io {
        /// Path of the file that failed to load.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Catalog data was read but could not be decoded by the codec.
    #[error("failed to decode catalog data from '{path}'")]
    Codec {
        /// Path of the file that failed to decode.
        path: Utf8PathBuf,
        /// Underlying codec failure.
        #[source]
        source: CodecError,
    },

    /// Translations are missing and `fail_on_missing` is enabled.
    #[error(
        "{}\nYou see this error because `fail_on_missing = true` in the \
         transform options.",
        policy::missing_error_message(.locale, .missing)
    )]
    MissingTranslations {
        /// Locale the request asked for.
        locale: String,
        /// Every message key the locale does not translate itself.
        missing: Vec<String>,
    },

    /// Messages failed to compile and `fail_on_compile_error` is enabled.
    #[error(
        "{}\nThese errors fail the build because `fail_on_compile_error = \
         true` in the transform options.",
        policy::compilation_error_message(.locale, .failures)
    )]
    Compilation {
        /// Locale the request asked for.
        locale: String,
        /// Per-message compilation failures.
        failures: Vec<CompileFailure>,
    },
}

impl ForgeError {
    /// Builds a [`ForgeError::Configuration`] from any displayable message.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Builds a [`ForgeError::Io`] for a catalog file path.
    #[must_use]
    pub fn io(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
