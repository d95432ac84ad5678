//! Build-time compilation of translation catalogs into loadable artifacts.
//!
//! `catalog_forge` sits inside a bundler's module-transformation pipeline.
//! For every request id that names a catalog resource it resolves which
//! logical catalog and locale the request refers to, aggregates the
//! translated messages for that locale along the fallback chain, compiles
//! them into a deterministic artifact (an executable module or plain
//! structured data) and applies two user-configurable policy gates for
//! missing translations and message compilation failures.
//!
//! The host build system drives the stage through
//! [`TransformPipeline::transform`] and receives watch-file registrations
//! and warnings through its [`BuildContext`] implementation. Catalog file
//! formats are pluggable via the [`CatalogCodec`] trait; the minimal JSON
//! format ships built in.
//!
//! ```no_run
//! use camino::Utf8Path;
//! use catalog_forge::{ProjectConfig, TracingContext, TransformOptions, TransformPipeline};
//! # fn main() -> catalog_forge::ForgeResult<()> {
//! let config = ProjectConfig::from_file(Utf8Path::new("catalog.toml"))?;
//! let pipeline = TransformPipeline::new(config, TransformOptions::default())?;
//! let ctx = TracingContext::new();
//! if pipeline.matches("src/locales/en/messages.json") {
//!     let output = pipeline.transform("src/locales/en/messages.json", &ctx)?;
//!     println!("{}", output.code);
//! }
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod codec;
pub mod compiler;
pub mod config;
pub mod dependencies;
pub mod error;
pub mod pipeline;
pub mod policy;
pub mod resolver;

pub use catalog::{Catalog, CatalogDefinition, FallbackChain, MessageEntry, TranslationSet};
pub use codec::{CatalogCodec, CodecError, Messages, MinimalJsonCodec};
pub use compiler::{CompileFailure, CompileOptions, CompiledArtifact};
pub use config::{
    ArtifactKind, CatalogConfig, CatalogFormat, FallbackLocales, ProjectConfig, TransformOptions,
};
pub use error::{ForgeError, ForgeResult};
pub use pipeline::{BuildContext, TracingContext, TransformOutput, TransformPipeline};
pub use resolver::{ResolvedRequest, VIRTUAL_QUERY_SUFFIX};
