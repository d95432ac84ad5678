//! Scenario tests for the missing-translation and compile-error gates.

mod common;

use catalog_forge::{ForgeError, TransformOptions, TransformPipeline};
use common::{Fixture, RecordingContext};
use rstest::rstest;

fn greetings_fixture() -> Fixture {
    let fixture = Fixture::new();
    fixture.write("locales/en/greetings.json", r#"{"HELLO": "Hello"}"#);
    fixture.write("locales/fr/greetings.json", r#"{"HELLO": ""}"#);
    fixture
}

fn pipeline(fixture: &Fixture, options: TransformOptions) -> TransformPipeline {
    TransformPipeline::new(fixture.config(), options).expect("pipeline builds")
}

#[rstest]
fn untranslated_keys_fall_back_and_warn_when_the_gate_is_off() {
    let fixture = greetings_fixture();
    let pipeline = pipeline(&fixture, TransformOptions::default());
    let ctx = RecordingContext::default();

    let output = pipeline
        .transform(&fixture.resource("fr"), &ctx)
        .expect("gate is off");
    assert_eq!(output.code, r#"{"HELLO":["Hello"]}"#);
    let warnings = ctx.warnings();
    assert_eq!(warnings.len(), 1);
    assert!(
        warnings
            .first()
            .is_some_and(|w| w.contains("Missing 1 translation(s)"))
    );
}

#[rstest]
fn untranslated_keys_abort_when_the_gate_is_on() {
    let fixture = greetings_fixture();
    let options = TransformOptions {
        fail_on_missing: true,
        ..TransformOptions::default()
    };
    let pipeline = pipeline(&fixture, options);
    let ctx = RecordingContext::default();

    let err = pipeline
        .transform(&fixture.resource("fr"), &ctx)
        .expect_err("gate is on");
    assert!(matches!(err, ForgeError::MissingTranslations { .. }));
    assert!(err.to_string().contains("Missing 1 translation(s)"));
    assert!(ctx.warnings().is_empty());
}

#[rstest]
fn both_switch_settings_agree_on_complete_catalogs() {
    let fixture = Fixture::new();
    fixture.write("locales/en/greetings.json", r#"{"HELLO": "Hello"}"#);
    fixture.write("locales/fr/greetings.json", r#"{"HELLO": "Bonjour"}"#);

    let mut outputs = Vec::new();
    for fail_on_missing in [false, true] {
        let options = TransformOptions {
            fail_on_missing,
            ..TransformOptions::default()
        };
        let pipeline = pipeline(&fixture, options);
        let ctx = RecordingContext::default();
        let output = pipeline
            .transform(&fixture.resource("fr"), &ctx)
            .expect("no missing keys");
        assert!(ctx.warnings().is_empty());
        outputs.push(output.code);
    }
    assert_eq!(outputs.first(), outputs.last());
}

#[rstest]
fn the_pseudo_locale_never_reports_missing_translations() {
    let fixture = greetings_fixture();
    let options = TransformOptions {
        fail_on_missing: true,
        ..TransformOptions::default()
    };
    let pipeline = pipeline(&fixture, options);
    let ctx = RecordingContext::default();

    pipeline
        .transform(&fixture.resource("pseudo"), &ctx)
        .expect("pseudo locale is exempt");
    assert!(ctx.warnings().is_empty());
}

#[rstest]
fn malformed_messages_abort_when_the_compile_gate_is_on() {
    let fixture = Fixture::new();
    fixture.write(
        "locales/en/greetings.json",
        r#"{"HELLO": "Hello", "BROKEN": "Hi {name"}"#,
    );
    let options = TransformOptions {
        fail_on_compile_error: true,
        ..TransformOptions::default()
    };
    let pipeline = pipeline(&fixture, options);
    let ctx = RecordingContext::default();

    let err = pipeline
        .transform(&fixture.resource("en"), &ctx)
        .expect_err("gate is on");
    assert!(matches!(err, ForgeError::Compilation { .. }));
    assert!(
        err.to_string()
            .contains("Compilation error for 1 translation(s)")
    );
    assert!(ctx.warnings().is_empty());
}

#[rstest]
fn malformed_messages_warn_and_keep_the_rest_when_the_gate_is_off() {
    let fixture = Fixture::new();
    fixture.write(
        "locales/en/greetings.json",
        r#"{"HELLO": "Hello", "BROKEN": "Hi {name"}"#,
    );
    let pipeline = pipeline(&fixture, TransformOptions::default());
    let ctx = RecordingContext::default();

    let output = pipeline
        .transform(&fixture.resource("en"), &ctx)
        .expect("gate is off");
    // The artifact still contains the valid message and the raw text of the
    // malformed one.
    assert!(output.code.contains(r#""HELLO":["Hello"]"#));
    assert!(output.code.contains("Hi {name"));
    let warnings = ctx.warnings();
    assert_eq!(warnings.len(), 1);
    assert!(
        warnings
            .first()
            .is_some_and(|w| w.contains("Compilation error for 1 translation(s)"))
    );
}

#[rstest]
fn the_missing_warning_precedes_a_compile_abort() {
    let fixture = Fixture::new();
    fixture.write(
        "locales/en/greetings.json",
        r#"{"GHOST": "", "BROKEN": "Hi {name"}"#,
    );
    let options = TransformOptions {
        fail_on_compile_error: true,
        ..TransformOptions::default()
    };
    let pipeline = pipeline(&fixture, options);
    let ctx = RecordingContext::default();

    let err = pipeline
        .transform(&fixture.resource("en"), &ctx)
        .expect_err("compile gate is on");
    assert!(matches!(err, ForgeError::Compilation { .. }));
    // The missing-translation diagnostic still surfaced as a warning before
    // the compile gate aborted.
    let warnings = ctx.warnings();
    assert_eq!(warnings.len(), 1);
    assert!(
        warnings
            .first()
            .is_some_and(|w| w.contains("Missing 1 translation(s)"))
    );
}

#[rstest]
fn the_fatal_error_and_the_warning_carry_the_same_count() {
    let fixture = greetings_fixture();
    let warn_ctx = RecordingContext::default();
    pipeline(&fixture, TransformOptions::default())
        .transform(&fixture.resource("fr"), &warn_ctx)
        .expect("gate is off");
    let err = pipeline(
        &fixture,
        TransformOptions {
            fail_on_missing: true,
            ..TransformOptions::default()
        },
    )
    .transform(&fixture.resource("fr"), &RecordingContext::default())
    .expect_err("gate is on");

    let warning = warn_ctx.warnings().first().cloned().expect("one warning");
    let fatal = err.to_string();
    let shared = "Missing 1 translation(s) for locale \"fr\"";
    assert!(warning.contains(shared));
    assert!(fatal.contains(shared));
}
