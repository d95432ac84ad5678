//! Request path resolution.
//!
//! Maps an incoming request id onto `(catalog, locale)` by matching the
//! id, relativised against the project root, over every configured catalog
//! path pattern. Patterns are validated for brace hygiene before being
//! compiled into a [`Regex`] with the `{locale}` segment as a capture group.

use camino::{Utf8Path, Utf8PathBuf};
use regex::Regex;

use crate::catalog::{Catalog, LOCALE_PLACEHOLDER};
use crate::error::{ForgeError, ForgeResult};

/// Query suffix marking a virtual catalog import (e.g.
/// `./locales/en/messages.po?catalog`).
pub const VIRTUAL_QUERY_SUFFIX: &str = "?catalog";

/// The result of matching a request id against the catalog registry.
#[derive(Debug)]
pub struct ResolvedRequest<'a> {
    /// The catalog whose pattern matched.
    pub catalog: &'a Catalog,
    /// Locale captured from the matched path segment.
    pub locale: String,
    /// Request path relative to the project root.
    pub relative_path: Utf8PathBuf,
}

fn validate_pattern(pattern: &str) -> Result<(), String> {
    let mut rest = pattern;
    let mut placeholders = 0usize;
    while let Some(open) = rest.find(['{', '}']) {
        let (_, tail) = rest.split_at(open);
        if tail.starts_with('}') {
            return Err("unmatched '}' in catalog path".to_owned());
        }
        let Some(stripped) = tail.strip_prefix(LOCALE_PLACEHOLDER) else {
            return Err(format!(
                "only the {LOCALE_PLACEHOLDER} placeholder may appear in a catalog path"
            ));
        };
        placeholders += 1;
        rest = stripped;
    }
    if placeholders == 0 {
        return Err(format!(
            "catalog path must contain the {LOCALE_PLACEHOLDER} placeholder"
        ));
    }
    Ok(())
}

/// Validates a catalog path pattern and compiles it into a [`Regex`]
/// matching root-relative request paths, capturing the locale segment.
///
/// # Errors
///
/// Returns [`ForgeError::Configuration`] when the pattern contains stray
/// braces or lacks the locale placeholder.
pub fn compile_pattern(pattern: &str, extension: &str) -> ForgeResult<Regex> {
    validate_pattern(pattern).map_err(|message| {
        ForgeError::configuration(format!("invalid catalog path '{pattern}': {message}"))
    })?;
    let matcher = pattern
        .split(LOCALE_PLACEHOLDER)
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join("([^/]+)");
    let anchored = format!("^{matcher}\\.{}$", regex::escape(extension));
    Regex::new(&anchored).map_err(|e| {
        ForgeError::configuration(format!("invalid catalog path '{pattern}': {e}"))
    })
}

/// Relativises a request id against the project root.
///
/// Ids outside the root keep their original form; they simply fail to match
/// any pattern and surface through the unresolved-catalog diagnostic.
fn relativize(request: &Utf8Path, root_dir: &Utf8Path) -> Utf8PathBuf {
    request
        .strip_prefix(root_dir)
        .map_or_else(|_| request.to_owned(), Utf8Path::to_path_buf)
}

/// Resolves a request id to the unique catalog and locale it refers to.
///
/// The id may carry the [`VIRTUAL_QUERY_SUFFIX`]; it is stripped before
/// matching.
///
/// # Errors
///
/// Returns [`ForgeError::UnresolvedCatalog`] when no pattern matches,
/// carrying the relative path and every configured pattern for diagnosis,
/// and [`ForgeError::AmbiguousCatalog`] when more than one does.
pub fn resolve<'a>(
    resource: &str,
    root_dir: &Utf8Path,
    catalogs: &'a [Catalog],
) -> ForgeResult<ResolvedRequest<'a>> {
    let trimmed = resource
        .strip_suffix(VIRTUAL_QUERY_SUFFIX)
        .unwrap_or(resource);
    let normalized = trimmed.replace('\\', "/");
    let relative_path = relativize(Utf8Path::new(&normalized), root_dir);

    let mut matches: Vec<(&Catalog, String)> = Vec::new();
    for catalog in catalogs {
        if let Some(captures) = catalog.matcher().captures(relative_path.as_str()) {
            if let Some(locale) = captures.get(1) {
                matches.push((catalog, locale.as_str().to_owned()));
            }
        }
    }

    let mut drained = matches.into_iter();
    match (drained.next(), drained.next()) {
        (Some((catalog, locale)), None) => Ok(ResolvedRequest {
            catalog,
            locale,
            relative_path,
        }),
        (Some(first), Some(second)) => {
            let mut catalog_paths = vec![
                first.0.definition().path.clone(),
                second.0.definition().path.clone(),
            ];
            catalog_paths.extend(drained.map(|(c, _)| c.definition().path.clone()));
            Err(ForgeError::AmbiguousCatalog {
                relative_path,
                catalog_paths,
            })
        }
        _ => Err(ForgeError::UnresolvedCatalog {
            relative_path,
            resource: resource.to_owned(),
            catalog_paths: catalogs
                .iter()
                .map(|c| c.definition().path.clone())
                .collect(),
        }),
    }
}
