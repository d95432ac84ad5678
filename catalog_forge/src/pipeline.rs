//! The per-request transform pipeline.
//!
//! [`TransformPipeline`] composes the path resolver, dependency tracker,
//! translation aggregator, compiler and policy gates into the single
//! operation a host build system invokes per matched request. The pipeline
//! is immutable after construction and safe to share across threads; every
//! invocation is independent, deterministic and idempotent given unchanged
//! catalog data.

use std::sync::Arc;

use camino::Utf8Path;

use crate::catalog::{Catalog, CatalogDefinition};
use crate::codec::{CatalogCodec, MinimalJsonCodec};
use crate::compiler::{self, CompileOptions};
use crate::config::{ArtifactKind, CatalogFormat, ProjectConfig, TransformOptions};
use crate::dependencies;
use crate::error::{ForgeError, ForgeResult};
use crate::policy;
use crate::resolver::{self, VIRTUAL_QUERY_SUFFIX};

/// Host-facing side-effect channel of one transform invocation.
///
/// The pipeline registers the files that should invalidate the compiled
/// result and forwards non-fatal diagnostics; the host owns file watching
/// and warning display. Implementations must be cheap to call since the
/// pipeline invokes them inline.
pub trait BuildContext {
    /// Registers a file whose change should re-trigger this transform.
    fn add_watch_file(&self, path: &Utf8Path);

    /// Forwards a non-fatal diagnostic to the host's warning channel.
    fn warn(&self, message: &str);
}

/// Default context for hosts without watch support: warnings go to the
/// `tracing` subscriber, watch registrations are recorded at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingContext;

impl TracingContext {
    /// Creates a new instance.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl BuildContext for TracingContext {
    fn add_watch_file(&self, path: &Utf8Path) {
        tracing::debug!(%path, "watch dependency registered");
    }

    fn warn(&self, message: &str) {
        tracing::warn!("{message}");
    }
}

/// Result of a successful transform, shaped for a bundler module graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOutput {
    /// The serialized artifact.
    pub code: String,
    /// Source map. Always `None` for now; compiled catalogs have no useful
    /// mapping back to catalog text.
    pub map: Option<String>,
}

/// The catalog transform stage.
///
/// Constructed once per build session from resolved configuration, then
/// invoked through [`transform`](Self::transform) for every request id that
/// [`matches`](Self::matches).
#[derive(Debug)]
pub struct TransformPipeline {
    config: ProjectConfig,
    options: TransformOptions,
    artifact_kind: ArtifactKind,
    file_suffix: String,
    catalogs: Vec<Catalog>,
}

impl TransformPipeline {
    /// Builds a pipeline using the built-in codec for the configured format.
    ///
    /// # Errors
    ///
    /// Returns [`ForgeError::Configuration`] when the format has no built-in
    /// codec (only the minimal JSON format does; use
    /// [`with_codec`](Self::with_codec) for the others) or when a catalog
    /// path pattern is malformed.
    pub fn new(config: ProjectConfig, options: TransformOptions) -> ForgeResult<Self> {
        match config.format {
            CatalogFormat::Minimal => {
                Self::with_codec(config, options, Arc::new(MinimalJsonCodec::new()))
            }
            format => Err(ForgeError::configuration(format!(
                "no built-in codec for the {} catalog format; register one \
                 with TransformPipeline::with_codec",
                format.file_extension()
            ))),
        }
    }

    /// Builds a pipeline with a caller-supplied catalog codec.
    ///
    /// # Errors
    ///
    /// Returns [`ForgeError::Configuration`] when a catalog path pattern is
    /// malformed.
    pub fn with_codec(
        config: ProjectConfig,
        options: TransformOptions,
        codec: Arc<dyn CatalogCodec>,
    ) -> ForgeResult<Self> {
        let extension = config.format.file_extension();
        let artifact_kind = options
            .artifact_kind
            .unwrap_or_else(|| config.format.default_artifact_kind());
        let root = config.root_dir.clone().unwrap_or_default();
        let catalogs = config
            .catalogs
            .iter()
            .map(|catalog_config| {
                Catalog::new(
                    CatalogDefinition::from_config(catalog_config, &config.locales),
                    root.clone(),
                    extension,
                    Arc::clone(&codec),
                )
            })
            .collect::<ForgeResult<Vec<_>>>()?;
        Ok(Self {
            config,
            options,
            artifact_kind,
            file_suffix: format!(".{extension}"),
            catalogs,
        })
    }

    /// The resolved project configuration the pipeline was built from.
    #[must_use]
    pub const fn config(&self) -> &ProjectConfig {
        &self.config
    }

    /// The catalogs the pipeline resolves requests against.
    #[must_use]
    pub fn catalogs(&self) -> &[Catalog] {
        &self.catalogs
    }

    /// The artifact kind the compiler will emit.
    #[must_use]
    pub const fn artifact_kind(&self) -> ArtifactKind {
        self.artifact_kind
    }

    /// Whether a request id belongs to this stage: a catalog file in the
    /// configured format, or a virtual catalog import.
    #[must_use]
    pub fn matches(&self, resource: &str) -> bool {
        resource.ends_with(&self.file_suffix) || resource.ends_with(VIRTUAL_QUERY_SUFFIX)
    }

    /// Transforms one catalog request into a loadable artifact.
    ///
    /// Composes resolution, dependency registration, aggregation, the
    /// missing-translation gate, compilation and the compile-error gate in
    /// that order. Watch files and warnings flow through `ctx` as side
    /// effects; the returned output is the only durable result.
    ///
    /// # Errors
    ///
    /// Returns the first fatal [`ForgeError`] encountered: configuration
    /// errors for absent `root_dir`, `fallback_locales` or `source_locale`;
    /// [`ForgeError::UnresolvedCatalog`] / [`ForgeError::AmbiguousCatalog`]
    /// from resolution; I/O and codec failures from catalog loading; and the
    /// policy-gated [`ForgeError::MissingTranslations`] /
    /// [`ForgeError::Compilation`] when the corresponding switch is enabled.
    pub fn transform(&self, resource: &str, ctx: &dyn BuildContext) -> ForgeResult<TransformOutput> {
        let root_dir = self
            .config
            .root_dir
            .as_deref()
            .ok_or_else(|| ForgeError::configuration("root_dir is not set"))?;

        let resolved = resolver::resolve(resource, root_dir, &self.catalogs)?;

        let (fallbacks, source_locale) =
            match (&self.config.fallback_locales, &self.config.source_locale) {
                (Some(fallbacks), Some(source_locale)) => (fallbacks, source_locale.as_str()),
                _ => {
                    return Err(ForgeError::configuration(
                        "fallback_locales or source_locale is not set",
                    ));
                }
            };
        let pseudo_locale = self.config.pseudo_locale.as_deref();

        for path in dependencies::dependent_files(
            resolved.catalog,
            &resolved.locale,
            fallbacks,
            source_locale,
        ) {
            ctx.add_watch_file(&path);
        }

        let translations = resolved.catalog.translations(
            &resolved.locale,
            fallbacks,
            source_locale,
            pseudo_locale,
        )?;

        policy::check_missing(&self.options, &resolved.locale, pseudo_locale, &translations, ctx)?;

        let compiled = compiler::compile(
            &resolved.locale,
            &translations.messages,
            &CompileOptions {
                artifact_kind: self.artifact_kind,
                pseudo_locale,
            },
        )?;
        let artifact = policy::check_compile_errors(&self.options, &resolved.locale, compiled, ctx)?;

        tracing::debug!(
            catalog = %resolved.catalog.definition().name,
            locale = %resolved.locale,
            "compiled catalog"
        );
        Ok(TransformOutput {
            code: artifact.source,
            map: None,
        })
    }
}
