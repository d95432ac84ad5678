//! Typed project configuration and transform options.
//!
//! Configuration is resolved once, before the pipeline is constructed, and
//! never mutated afterwards. [`ProjectConfig`] describes the project-level
//! catalog layout (root directory, catalog path patterns, locale inventory,
//! fallback rules); [`TransformOptions`] carries the per-pipeline switches a
//! host may toggle. Both deserialize with serde so hosts can embed them in
//! their own configuration surfaces, and [`ProjectConfig::from_file`] loads
//! the stand-alone TOML manifest with an environment-variable overlay.

use std::collections::BTreeMap;

use camino::{Utf8Path, Utf8PathBuf};
use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use serde::{Deserialize, Serialize};

use crate::error::{ForgeError, ForgeResult};

/// Environment variable prefix for overriding manifest settings.
pub const ENV_PREFIX: &str = "CATALOG_FORGE_";

/// On-disk formats a catalog may be stored in.
///
/// The format determines the request file extension and, unless overridden,
/// the artifact kind the compiler emits. Only the JSON-backed formats have a
/// built-in codec; the others require a caller-supplied
/// [`CatalogCodec`](crate::codec::CatalogCodec).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CatalogFormat {
    /// Gettext PO files keyed by generated message ids.
    #[default]
    Po,
    /// Gettext PO files keyed by the source text itself.
    PoGettext,
    /// Flat JSON objects mapping keys to translated strings.
    Minimal,
    /// Structured JSON with per-message metadata.
    Structured,
    /// Comma-separated key/translation rows.
    Csv,
}

impl CatalogFormat {
    /// File extension of catalog files in this format, without the dot.
    #[must_use]
    pub const fn file_extension(self) -> &'static str {
        match self {
            Self::Po | Self::PoGettext => "po",
            Self::Minimal | Self::Structured => "json",
            Self::Csv => "csv",
        }
    }

    /// Artifact kind emitted for this format when none is requested.
    ///
    /// JSON-backed catalogs compile to structured data; everything else
    /// compiles to an executable module.
    #[must_use]
    pub const fn default_artifact_kind(self) -> ArtifactKind {
        match self {
            Self::Minimal | Self::Structured => ArtifactKind::Json,
            Self::Po | Self::PoGettext | Self::Csv => ArtifactKind::EsModule,
        }
    }
}

/// Output shape of a compiled catalog artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactKind {
    /// A self-contained module exposing the message mapping to a bundler.
    EsModule,
    /// The plain serialized mapping, for consumers that deserialize data.
    Json,
}

/// One logical catalog as declared in the project manifest.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// Root-relative path pattern containing a `{locale}` segment, without
    /// the file extension (e.g. `src/locales/{locale}/messages`).
    pub path: String,
    /// Locales this catalog materializes. Falls back to the project-wide
    /// locale inventory when unset.
    #[serde(default)]
    pub locales: Option<Vec<String>>,
}

/// Fallback locale rules consulted when a message lacks a translation.
///
/// The chain for a locale is the explicit per-locale entry when present,
/// otherwise the `default` locale. The source locale is always appended as
/// the terminal fallback by the aggregator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct FallbackLocales {
    /// Locale consulted for every locale without an explicit entry.
    #[serde(default)]
    pub default: Option<String>,
    /// Explicit per-locale fallback sequences.
    #[serde(flatten)]
    pub locales: BTreeMap<String, Vec<String>>,
}

impl FallbackLocales {
    /// Configured fallbacks for `locale`, in consultation order.
    #[must_use]
    pub fn for_locale(&self, locale: &str) -> Vec<&str> {
        self.locales.get(locale).map_or_else(
            || self.default.as_deref().into_iter().collect(),
            |explicit| explicit.iter().map(String::as_str).collect(),
        )
    }
}

/// Project-level catalog configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Directory request ids are resolved against. Required at transform
    /// time; requests fail with a configuration error when unset.
    pub root_dir: Option<Utf8PathBuf>,
    /// Locale inventory applied to catalogs without their own list.
    pub locales: Vec<String>,
    /// The logical catalogs of the project.
    pub catalogs: Vec<CatalogConfig>,
    /// Locale the message keys were extracted from. Acts as the terminal
    /// fallback and is assumed to always carry a value for every key.
    pub source_locale: Option<String>,
    /// Fallback rules applied before the source locale.
    pub fallback_locales: Option<FallbackLocales>,
    /// Synthetic locale compiled with decorated message text and exempt from
    /// missing-translation accounting.
    pub pseudo_locale: Option<String>,
    /// On-disk catalog format.
    pub format: CatalogFormat,
}

impl ProjectConfig {
    /// Loads the project manifest from a TOML file with an
    /// [`ENV_PREFIX`]-prefixed environment overlay.
    ///
    /// # Errors
    ///
    /// Returns [`ForgeError::Io`] when the manifest cannot be read and
    /// [`ForgeError::Configuration`] when it cannot be parsed or extracted.
    pub fn from_file(path: &Utf8Path) -> ForgeResult<Self> {
        let data =
            std::fs::read_to_string(path).map_err(|e| ForgeError::io(path.to_owned(), e))?;
        // Validate TOML eagerly so syntax errors carry the manifest path.
        toml::from_str::<toml::Value>(&data).map_err(|e| {
            ForgeError::configuration(format!("invalid project manifest '{path}': {e}"))
        })?;
        Figment::from(Toml::string(&data))
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()
            .map_err(|e| {
                ForgeError::configuration(format!(
                    "failed to gather project configuration from '{path}': {e}"
                ))
            })
    }
}

/// Per-pipeline switches controlling policy enforcement and output shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TransformOptions {
    /// Abort the transform when translations are missing for the requested
    /// locale. Off by default; the same diagnostic is emitted as a build
    /// warning instead.
    pub fail_on_missing: bool,
    /// Abort the transform when messages fail to compile. Off by default;
    /// the same diagnostic is emitted as a build warning instead.
    pub fail_on_compile_error: bool,
    /// Output shape override. Derived from the catalog format when unset.
    pub artifact_kind: Option<ArtifactKind>,
}
