//! Unit tests for message tokenization and artifact serialization.

use indexmap::IndexMap;
use rstest::rstest;

use super::{CompileOptions, compile};
use crate::catalog::MessageEntry;
use crate::config::ArtifactKind;

fn entries(pairs: &[(&str, Option<&str>)]) -> IndexMap<String, MessageEntry> {
    pairs
        .iter()
        .map(|(key, translation)| {
            (
                (*key).to_owned(),
                MessageEntry {
                    translation: translation.map(ToOwned::to_owned),
                    fallback: false,
                },
            )
        })
        .collect()
}

const JSON_OPTIONS: CompileOptions<'static> = CompileOptions {
    artifact_kind: ArtifactKind::Json,
    pseudo_locale: None,
};

#[rstest]
fn plain_text_compiles_to_a_single_token() {
    let messages = entries(&[("mY42CM", Some("Hello World"))]);
    let artifact = compile("en", &messages, &JSON_OPTIONS).expect("compiles");
    assert_eq!(artifact.source, r#"{"mY42CM":["Hello World"]}"#);
    assert!(artifact.errors.is_empty());
}

#[rstest]
fn placeholders_compile_to_reference_tokens() {
    let messages = entries(&[("mVmaLu", Some("My name is {name}"))]);
    let artifact = compile("en", &messages, &JSON_OPTIONS).expect("compiles");
    assert_eq!(artifact.source, r#"{"mVmaLu":["My name is ",["name"]]}"#);
}

#[rstest]
fn doubled_braces_are_literal_text() {
    let messages = entries(&[("braces", Some("a {{literal}} brace"))]);
    let artifact = compile("en", &messages, &JSON_OPTIONS).expect("compiles");
    assert_eq!(artifact.source, r#"{"braces":["a {literal} brace"]}"#);
    assert!(artifact.errors.is_empty());
}

#[rstest]
#[case("Hi {name", "unclosed '{'")]
#[case("Hi name}", "unmatched '}'")]
#[case("Hi {1st}", "invalid placeholder name")]
#[case("Hi {}", "invalid placeholder name")]
fn malformed_templates_fail_per_message(#[case] template: &str, #[case] fragment: &str) {
    let messages = entries(&[("bad", Some(template)), ("good", Some("fine"))]);
    let artifact = compile("en", &messages, &JSON_OPTIONS).expect("compiles");
    assert_eq!(artifact.errors.len(), 1);
    let failure = artifact.errors.first().expect("one failure");
    assert_eq!(failure.key, "bad");
    assert!(failure.reason.contains(fragment), "reason: {}", failure.reason);
    // The artifact still contains the healthy message and the raw text of
    // the failing one.
    assert!(artifact.source.contains(r#""good":["fine"]"#));
    assert!(artifact.source.contains("bad"));
}

#[rstest]
fn missing_translations_compile_the_key_text() {
    let messages = entries(&[("Sign in", None)]);
    let artifact = compile("fr", &messages, &JSON_OPTIONS).expect("compiles");
    assert_eq!(artifact.source, r#"{"Sign in":["Sign in"]}"#);
}

#[rstest]
fn the_pseudo_locale_decorates_text_but_not_placeholders() {
    let messages = entries(&[("mVmaLu", Some("My name is {name}"))]);
    let options = CompileOptions {
        artifact_kind: ArtifactKind::Json,
        pseudo_locale: Some("pseudo"),
    };
    let artifact = compile("pseudo", &messages, &options).expect("compiles");
    assert_eq!(
        artifact.source,
        r#"{"mVmaLu":["Ṁý ñáɱé íš ",["name"]]}"#
    );
}

#[rstest]
fn other_locales_ignore_the_pseudo_configuration() {
    let messages = entries(&[("mY42CM", Some("Hello"))]);
    let options = CompileOptions {
        artifact_kind: ArtifactKind::Json,
        pseudo_locale: Some("pseudo"),
    };
    let artifact = compile("en", &messages, &options).expect("compiles");
    assert_eq!(artifact.source, r#"{"mY42CM":["Hello"]}"#);
}

#[rstest]
fn es_module_artifacts_wrap_the_payload_in_a_parse_call() {
    let messages = entries(&[("mY42CM", Some("Hello"))]);
    let options = CompileOptions {
        artifact_kind: ArtifactKind::EsModule,
        pseudo_locale: None,
    };
    let artifact = compile("en", &messages, &options).expect("compiles");
    assert_eq!(
        artifact.source,
        r#"/*eslint-disable*/export const messages=JSON.parse("{\"mY42CM\":[\"Hello\"]}")"#
    );
}

#[rstest]
fn compilation_is_deterministic() {
    let messages = entries(&[
        ("b", Some("second")),
        ("a", Some("first {x}")),
        ("c", None),
    ]);
    let first = compile("en", &messages, &JSON_OPTIONS).expect("compiles");
    let second = compile("en", &messages, &JSON_OPTIONS).expect("compiles");
    assert_eq!(first.source, second.source);
    // Keys keep catalog order rather than sorting.
    assert!(first.source.starts_with(r#"{"b":"#));
}
