//! Message compilation and artifact serialization.
//!
//! Each message value is a small template: literal text optionally
//! interleaved with `{name}` placeholder references. The compiler tokenizes
//! every message, collects per-message failures without aborting the rest of
//! the catalog, and serializes the compiled mapping into the requested
//! artifact envelope. Compiled messages are JSON token arrays: text tokens
//! as strings, placeholder tokens as one-element arrays.
//!
//! ```json
//! { "mVmaLu": ["My name is ", ["name"]] }
//! ```
//!
//! Output is deterministic: keys serialize in catalog order, so compiling
//! unchanged input twice yields byte-identical artifacts.

use indexmap::IndexMap;
use serde_json::Value;

use crate::catalog::MessageEntry;
use crate::config::ArtifactKind;
use crate::error::{ForgeError, ForgeResult};

mod pseudo;

pub use pseudo::pseudolocalize;

/// One message that failed to compile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileFailure {
    /// Key of the failing message.
    pub key: String,
    /// Why the message's template is malformed.
    pub reason: String,
}

/// Compiler output: the serialized artifact plus per-message failures.
///
/// Failures do not empty `source`; the artifact still contains every message
/// that compiled, with failing messages carried through as plain text. The
/// policy layer decides whether failures abort the transform.
#[derive(Debug, Clone)]
pub struct CompiledArtifact {
    /// Serialized artifact in the requested envelope.
    pub source: String,
    /// Messages whose templates were malformed.
    pub errors: Vec<CompileFailure>,
}

/// Options steering one compilation.
#[derive(Debug, Clone, Copy)]
pub struct CompileOptions<'a> {
    /// Envelope of the serialized artifact.
    pub artifact_kind: ArtifactKind,
    /// The project's pseudo locale, when configured.
    pub pseudo_locale: Option<&'a str>,
}

#[derive(Debug, PartialEq, Eq)]
enum Token {
    Text(String),
    Placeholder(String),
}

fn is_placeholder_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_placeholder_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Tokenizes a message template into text and placeholder tokens.
///
/// Doubled braces (`{{`, `}}`) are literal braces. Anything else between
/// `{` and `}` must be a placeholder identifier.
fn tokenize(template: &str) -> Result<Vec<Token>, String> {
    let mut tokens = Vec::new();
    let mut text = String::new();
    let mut chars = template.char_indices().peekable();
    while let Some((position, c)) = chars.next() {
        match c {
            '{' if chars.peek().is_some_and(|&(_, next)| next == '{') => {
                chars.next();
                text.push('{');
            }
            '}' if chars.peek().is_some_and(|&(_, next)| next == '}') => {
                chars.next();
                text.push('}');
            }
            '{' => {
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some((_, '}')) => break,
                        Some((_, inner)) => name.push(inner),
                        None => {
                            return Err(format!("unclosed '{{' at position {position}"));
                        }
                    }
                }
                let mut name_chars = name.chars();
                let valid = name_chars
                    .next()
                    .is_some_and(is_placeholder_start)
                    && name_chars.all(is_placeholder_char);
                if !valid {
                    return Err(format!("invalid placeholder name '{{{name}}}'"));
                }
                if !text.is_empty() {
                    tokens.push(Token::Text(std::mem::take(&mut text)));
                }
                tokens.push(Token::Placeholder(name));
            }
            '}' => {
                return Err(format!("unmatched '}}' at position {position}"));
            }
            _ => text.push(c),
        }
    }
    if !text.is_empty() {
        tokens.push(Token::Text(text));
    }
    Ok(tokens)
}

fn tokens_to_value(tokens: Vec<Token>, pseudolocalized: bool) -> Value {
    let parts = tokens
        .into_iter()
        .map(|token| match token {
            Token::Text(text) if pseudolocalized => Value::String(pseudolocalize(&text)),
            Token::Text(text) => Value::String(text),
            Token::Placeholder(name) => Value::Array(vec![Value::String(name)]),
        })
        .collect();
    Value::Array(parts)
}

/// Compiles the resolved message mapping for `locale` into an artifact.
///
/// Messages with no resolved translation compile the key text itself (the
/// extraction origin), so the artifact stays loadable; the missing-message
/// policy gate reports them separately. When `locale` is the configured
/// pseudo locale, every text token is decorated by [`pseudolocalize`]
/// instead of taken verbatim.
///
/// # Errors
///
/// Returns [`ForgeError::Configuration`] only when the compiled payload
/// cannot be serialized, which no well-formed message mapping triggers.
/// Malformed message templates are reported per message through
/// [`CompiledArtifact::errors`], never as a `Result` error.
pub fn compile(
    locale: &str,
    messages: &IndexMap<String, MessageEntry>,
    options: &CompileOptions<'_>,
) -> ForgeResult<CompiledArtifact> {
    let pseudolocalized = options.pseudo_locale == Some(locale);
    let mut compiled: IndexMap<&str, Value> = IndexMap::with_capacity(messages.len());
    let mut errors = Vec::new();

    for (key, entry) in messages {
        let template = entry.translation.as_deref().unwrap_or(key.as_str());
        let value = match tokenize(template) {
            Ok(tokens) => tokens_to_value(tokens, pseudolocalized),
            Err(reason) => {
                errors.push(CompileFailure {
                    key: key.clone(),
                    reason,
                });
                // Malformed templates ride along as a single raw text token.
                Value::Array(vec![Value::String(template.to_owned())])
            }
        };
        compiled.insert(key.as_str(), value);
    }

    let payload = serde_json::to_string(&compiled)
        .map_err(|e| ForgeError::configuration(format!("failed to serialize catalog: {e}")))?;
    let source = match options.artifact_kind {
        ArtifactKind::Json => payload,
        ArtifactKind::EsModule => {
            let literal = serde_json::to_string(&payload).map_err(|e| {
                ForgeError::configuration(format!("failed to serialize catalog: {e}"))
            })?;
            format!("/*eslint-disable*/export const messages=JSON.parse({literal})")
        }
    };

    Ok(CompiledArtifact { source, errors })
}

#[cfg(test)]
mod tests;
