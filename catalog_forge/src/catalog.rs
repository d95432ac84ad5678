//! Catalog definitions and translation aggregation.
//!
//! A [`CatalogDefinition`] names one logical catalog: a root-relative path
//! pattern with a `{locale}` segment and the locales it materializes. A
//! [`Catalog`] binds a definition to the project root and a codec and can
//! aggregate the translations for one locale, walking the fallback chain for
//! every key the catalog knows about and classifying keys as present or
//! missing.

use std::fmt;
use std::sync::Arc;

use camino::Utf8PathBuf;
use indexmap::{IndexMap, IndexSet};
use regex::Regex;

use crate::codec::{CatalogCodec, Messages};
use crate::config::{CatalogConfig, FallbackLocales};
use crate::error::{ForgeError, ForgeResult};
use crate::resolver;

/// Placeholder segment marking where the locale appears in a catalog path.
pub const LOCALE_PLACEHOLDER: &str = "{locale}";

/// Identity of one logical catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogDefinition {
    /// Short name derived from the path pattern, used in diagnostics.
    pub name: String,
    /// Root-relative path pattern containing [`LOCALE_PLACEHOLDER`], without
    /// the file extension.
    pub path: String,
    /// Locales this catalog materializes, in configuration order.
    pub locales: Vec<String>,
}

impl CatalogDefinition {
    /// Builds a definition from manifest configuration, borrowing the
    /// project-wide locale inventory when the catalog has none of its own.
    #[must_use]
    pub fn from_config(config: &CatalogConfig, default_locales: &[String]) -> Self {
        let locales = config
            .locales
            .clone()
            .unwrap_or_else(|| default_locales.to_vec());
        Self {
            name: derive_name(&config.path),
            path: config.path.clone(),
            locales,
        }
    }

    /// Root-relative path of the catalog file for `locale`.
    #[must_use]
    pub fn locale_path(&self, locale: &str, extension: &str) -> Utf8PathBuf {
        Utf8PathBuf::from(format!(
            "{}.{extension}",
            self.path.replace(LOCALE_PLACEHOLDER, locale)
        ))
    }

    /// Root-relative path of the shared template file the catalog's locales
    /// were seeded from.
    #[must_use]
    pub fn template_path(&self, extension: &str) -> Utf8PathBuf {
        self.locale_path("template", extension)
    }
}

/// Catalog names come from the last pattern segment; a segment that is just
/// the locale placeholder falls back to a generic name.
fn derive_name(path: &str) -> String {
    let last = path.rsplit('/').next().unwrap_or(path);
    let trimmed = last
        .replace(LOCALE_PLACEHOLDER, "")
        .trim_matches(['-', '_', '.'])
        .to_owned();
    if trimmed.is_empty() {
        "catalog".to_owned()
    } else {
        trimmed
    }
}

/// Ordered locale sequence consulted when a message lacks a translation.
///
/// The chain is `[primary, ...configured fallbacks, source locale]` with
/// duplicates removed, keeping the first occurrence. The source locale is the
/// extraction origin and acts as the terminal fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackChain(Vec<String>);

impl FallbackChain {
    /// Builds the chain for `primary` under the given fallback rules.
    #[must_use]
    pub fn build(primary: &str, fallbacks: &FallbackLocales, source_locale: &str) -> Self {
        let mut chain: Vec<String> = Vec::new();
        let candidates = std::iter::once(primary)
            .chain(fallbacks.for_locale(primary))
            .chain(std::iter::once(source_locale));
        for locale in candidates {
            if !chain.iter().any(|seen| seen == locale) {
                chain.push(locale.to_owned());
            }
        }
        Self(chain)
    }

    /// The locales of the chain, primary first.
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// One message's resolution result for a requested locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageEntry {
    /// The resolved text, or `None` when no locale in the chain provides a
    /// value. The compiler then falls back to the key text itself.
    pub translation: Option<String>,
    /// Whether the value came from a fallback locale rather than the
    /// requested one.
    pub fallback: bool,
}

/// Aggregated translations for one catalog and locale.
#[derive(Debug, Clone, Default)]
pub struct TranslationSet {
    /// Every key known to the catalog, in catalog order, with its resolved
    /// entry.
    pub messages: IndexMap<String, MessageEntry>,
    /// Keys the requested locale does not translate itself, whether a
    /// fallback filled the value in or not. Always empty when the requested
    /// locale is the pseudo locale.
    pub missing: Vec<String>,
}

/// A catalog definition bound to the project root and a codec.
pub struct Catalog {
    definition: CatalogDefinition,
    root: Utf8PathBuf,
    extension: &'static str,
    matcher: Regex,
    codec: Arc<dyn CatalogCodec>,
}

impl Catalog {
    /// Binds `definition` to the project layout.
    ///
    /// # Errors
    ///
    /// Returns [`ForgeError::Configuration`] when the definition's path
    /// pattern is malformed (unbalanced braces or no locale placeholder).
    pub fn new(
        definition: CatalogDefinition,
        root: Utf8PathBuf,
        extension: &'static str,
        codec: Arc<dyn CatalogCodec>,
    ) -> ForgeResult<Self> {
        let matcher = resolver::compile_pattern(&definition.path, extension)?;
        Ok(Self {
            definition,
            root,
            extension,
            matcher,
            codec,
        })
    }

    /// The catalog's identity.
    #[must_use]
    pub const fn definition(&self) -> &CatalogDefinition {
        &self.definition
    }

    /// Matcher for root-relative request paths, with the locale captured.
    #[must_use]
    pub(crate) const fn matcher(&self) -> &Regex {
        &self.matcher
    }

    /// Absolute path of the catalog file for `locale`.
    #[must_use]
    pub fn locale_file(&self, locale: &str) -> Utf8PathBuf {
        self.root
            .join(self.definition.locale_path(locale, self.extension))
    }

    /// Absolute path of the catalog's shared template file.
    #[must_use]
    pub fn template_file(&self) -> Utf8PathBuf {
        self.root.join(self.definition.template_path(self.extension))
    }

    /// Loads the raw message map for one locale.
    ///
    /// A file that does not exist is an empty catalog (normal for locales
    /// that have not been translated yet); any other read or decode failure
    /// is fatal.
    fn load_locale(&self, locale: &str) -> ForgeResult<Messages> {
        let path = self.locale_file(locale);
        let data = match std::fs::read_to_string(path.as_std_path()) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(%path, locale, "catalog file absent, treating as empty");
                return Ok(Messages::new());
            }
            Err(e) => return Err(ForgeError::io(path, e)),
        };
        self.codec
            .parse(&data)
            .map_err(|source| ForgeError::Codec { path, source })
    }

    /// Aggregates the translations for `locale`.
    ///
    /// The key set is the union of keys across every locale the catalog
    /// materializes (a key exists even if never translated in the requested
    /// locale), in catalog order. Each key takes the first non-empty value
    /// along the fallback chain. A key the requested locale does not
    /// translate itself is reported as missing: a fallback value keeps the
    /// artifact complete, but the untranslated string would still leak into
    /// the UI, which is what the missing gate exists to catch. The pseudo
    /// locale is exempt from missing accounting entirely.
    ///
    /// # Errors
    ///
    /// Returns [`ForgeError::Io`] or [`ForgeError::Codec`] when catalog data
    /// exists but cannot be loaded.
    pub fn translations(
        &self,
        locale: &str,
        fallbacks: &FallbackLocales,
        source_locale: &str,
        pseudo_locale: Option<&str>,
    ) -> ForgeResult<TranslationSet> {
        let chain = FallbackChain::build(locale, fallbacks, source_locale);

        let mut loaded: IndexMap<String, Messages> = IndexMap::new();
        let wanted = self
            .definition
            .locales
            .iter()
            .map(String::as_str)
            .chain(chain.locales());
        for wanted_locale in wanted {
            if !loaded.contains_key(wanted_locale) {
                loaded.insert(wanted_locale.to_owned(), self.load_locale(wanted_locale)?);
            }
        }

        let mut keys: IndexSet<String> = IndexSet::new();
        let union_locales = self
            .definition
            .locales
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(locale));
        for union_locale in union_locales {
            if let Some(messages) = loaded.get(union_locale) {
                for key in messages.keys() {
                    keys.insert(key.clone());
                }
            }
        }

        let exempt = pseudo_locale == Some(locale);
        let mut messages = IndexMap::with_capacity(keys.len());
        let mut missing = Vec::new();
        for key in keys {
            let resolved = chain.locales().find_map(|chain_locale| {
                loaded
                    .get(chain_locale)
                    .and_then(|m| m.get(&key))
                    .filter(|value| !value.is_empty())
                    .map(|value| (chain_locale, value.clone()))
            });
            let entry = match resolved {
                Some((winner, translation)) => {
                    let fallback = winner != locale;
                    if fallback && !exempt {
                        missing.push(key.clone());
                    }
                    MessageEntry {
                        translation: Some(translation),
                        fallback,
                    }
                }
                None => {
                    if !exempt {
                        missing.push(key.clone());
                    }
                    MessageEntry {
                        translation: None,
                        fallback: false,
                    }
                }
            };
            messages.insert(key, entry);
        }

        Ok(TranslationSet { messages, missing })
    }
}

impl fmt::Debug for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalog")
            .field("definition", &self.definition)
            .field("root", &self.root)
            .field("extension", &self.extension)
            .field("codec", &"<codec>")
            .finish()
    }
}
