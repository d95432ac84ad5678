//! Catalog format codecs.
//!
//! `CatalogCodec` abstracts the concrete on-disk catalog format so the
//! pipeline never parses PO, CSV or JSON syntax itself. Implementations
//! return an ordered key → translation map; an empty translation marks a key
//! that exists in the catalog without a value for that locale. The trait is
//! object-safe so pipelines can hold implementations behind
//! `Arc<dyn CatalogCodec>` and hosts can register codecs for formats this
//! crate does not ship.

use indexmap::IndexMap;
use thiserror::Error;

/// Ordered key → translation map produced by a codec.
///
/// Iteration order is the order keys appear in the catalog file, which the
/// compiler preserves all the way into the serialized artifact.
pub type Messages = IndexMap<String, String>;

/// Errors surfaced while decoding catalog data.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CodecError {
    /// The catalog text is not well-formed in the codec's format.
    #[error("malformed catalog data: {message}")]
    Malformed {
        /// Description of the syntax problem.
        message: String,
    },

    /// Any other failure raised by an external codec implementation.
    #[error(transparent)]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

impl CodecError {
    /// Builds a [`CodecError::Malformed`] from any displayable message.
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }
}

/// Decodes raw catalog file text into an ordered message map.
pub trait CatalogCodec: Send + Sync {
    /// Parses catalog text into key → translation pairs.
    ///
    /// # Errors
    ///
    /// Returns a [`CodecError`] when the text is not valid in the codec's
    /// format. A key present without a translation must be returned with an
    /// empty string value rather than omitted, so the aggregator can tell
    /// "untranslated" apart from "unknown key".
    fn parse(&self, source: &str) -> Result<Messages, CodecError>;
}

/// Built-in codec for the minimal JSON catalog format.
///
/// The minimal format is a flat JSON object mapping message keys to
/// translated strings:
///
/// ```json
/// { "mY42CM": "Hello World", "mVmaLu": "My name is {name}" }
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct MinimalJsonCodec;

impl MinimalJsonCodec {
    /// Creates a new instance.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl CatalogCodec for MinimalJsonCodec {
    fn parse(&self, source: &str) -> Result<Messages, CodecError> {
        if source.trim().is_empty() {
            return Ok(Messages::new());
        }
        serde_json::from_str(source).map_err(|e| CodecError::Malformed {
            message: e.to_string(),
        })
    }
}
