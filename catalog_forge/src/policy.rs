//! Policy gates over the aggregation and compilation results.
//!
//! Two independent, user-configurable switches decide whether missing
//! translations and per-message compilation failures abort the transform or
//! only warn. Both default to off. The warning and the fatal error carry the
//! same message content; only the trailing hint and the abort differ.

use crate::catalog::TranslationSet;
use crate::compiler::{CompileFailure, CompiledArtifact};
use crate::config::TransformOptions;
use crate::error::{ForgeError, ForgeResult};
use crate::pipeline::BuildContext;

/// Shared text of the missing-translations diagnostic.
///
/// Carries the exact count and the full key list so the failure can be
/// diagnosed without re-running the build with extra flags.
#[must_use]
pub fn missing_error_message(locale: &str, missing: &[String]) -> String {
    let keys = missing
        .iter()
        .map(|key| format!("  - {key}"))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "Missing {} translation(s) for locale \"{locale}\":\n{keys}",
        missing.len()
    )
}

/// Shared text of the compilation-failures diagnostic.
#[must_use]
pub fn compilation_error_message(locale: &str, failures: &[CompileFailure]) -> String {
    let details = failures
        .iter()
        .map(|failure| format!("  - {}: {}", failure.key, failure.reason))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "Compilation error for {} translation(s) in locale \"{locale}\":\n{details}",
        failures.len()
    )
}

/// Applies the `fail_on_missing` gate to an aggregation result.
///
/// The pseudo locale is exempt: its missing set is empty by construction,
/// and even a host that bypasses the aggregator cannot fail a pseudo build
/// here.
///
/// # Errors
///
/// Returns [`ForgeError::MissingTranslations`] when the gate is enabled and
/// the missing set is non-empty. With the gate off the same message content
/// is forwarded to `ctx` as a warning and the transform proceeds.
pub fn check_missing(
    options: &TransformOptions,
    locale: &str,
    pseudo_locale: Option<&str>,
    translations: &TranslationSet,
    ctx: &dyn BuildContext,
) -> ForgeResult<()> {
    if translations.missing.is_empty() || pseudo_locale == Some(locale) {
        return Ok(());
    }
    if options.fail_on_missing {
        return Err(ForgeError::MissingTranslations {
            locale: locale.to_owned(),
            missing: translations.missing.clone(),
        });
    }
    ctx.warn(&format!(
        "{}\nYou can fail the build on missing translations by setting \
         `fail_on_missing = true` in the transform options.",
        missing_error_message(locale, &translations.missing)
    ));
    Ok(())
}

/// Applies the `fail_on_compile_error` gate to a compiled artifact.
///
/// # Errors
///
/// Returns [`ForgeError::Compilation`] when the gate is enabled and the
/// artifact carries per-message failures. With the gate off the same message
/// content is forwarded to `ctx` as a warning and the artifact, which still
/// contains every message that compiled, is passed through.
pub fn check_compile_errors(
    options: &TransformOptions,
    locale: &str,
    artifact: CompiledArtifact,
    ctx: &dyn BuildContext,
) -> ForgeResult<CompiledArtifact> {
    if artifact.errors.is_empty() {
        return Ok(artifact);
    }
    if options.fail_on_compile_error {
        return Err(ForgeError::Compilation {
            locale: locale.to_owned(),
            failures: artifact.errors,
        });
    }
    ctx.warn(&format!(
        "{}\nYou can fail the build on these errors by setting \
         `fail_on_compile_error = true` in the transform options.",
        compilation_error_message(locale, &artifact.errors)
    ));
    Ok(artifact)
}
