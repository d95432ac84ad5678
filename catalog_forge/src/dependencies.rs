//! Dependency tracking for incremental rebuilds.
//!
//! For a resolved catalog and locale, every file whose change should
//! invalidate the compiled result: the catalog's shared template plus the
//! catalog file of each locale in the fallback chain. The orchestrator
//! registers each returned path as a watch dependency with the host.

use camino::Utf8PathBuf;
use indexmap::IndexSet;

use crate::catalog::{Catalog, FallbackChain};
use crate::config::FallbackLocales;

/// Returns the ordered set of files backing `(catalog, locale)`.
///
/// Only files that exist on disk are returned; the set merely steers future
/// invalidation, so a probe failure degrades watch accuracy rather than the
/// build. It is logged and the candidate skipped.
#[must_use]
pub fn dependent_files(
    catalog: &Catalog,
    locale: &str,
    fallbacks: &FallbackLocales,
    source_locale: &str,
) -> Vec<Utf8PathBuf> {
    let chain = FallbackChain::build(locale, fallbacks, source_locale);
    let mut candidates: IndexSet<Utf8PathBuf> = IndexSet::new();
    candidates.insert(catalog.template_file());
    for chain_locale in chain.locales() {
        candidates.insert(catalog.locale_file(chain_locale));
    }

    candidates
        .into_iter()
        .filter(|path| match std::fs::metadata(path.as_std_path()) {
            Ok(metadata) => metadata.is_file(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => false,
            Err(e) => {
                tracing::warn!(%path, error = %e, "failed to probe catalog dependency");
                false
            }
        })
        .collect()
}
