//! Compiles one locale of a small on-disk catalog and prints the artifact.
//!
//! Run with `cargo run --example compile_catalog`.

use camino::Utf8PathBuf;
use catalog_forge::{
    CatalogConfig, CatalogFormat, FallbackLocales, ForgeResult, ProjectConfig, TracingContext,
    TransformOptions, TransformPipeline,
};

#[expect(clippy::print_stdout, reason = "example output goes to the terminal")]
fn main() -> ForgeResult<()> {
    let dir = tempfile::tempdir().map_err(|e| catalog_forge::ForgeError::io("tempdir", e))?;
    let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
        .map_err(|_| catalog_forge::ForgeError::configuration("tempdir is not UTF-8"))?;

    let en = root.join("locales/en");
    let fr = root.join("locales/fr");
    for locale_dir in [&en, &fr] {
        std::fs::create_dir_all(locale_dir.as_std_path())
            .map_err(|e| catalog_forge::ForgeError::io(locale_dir.clone(), e))?;
    }
    std::fs::write(
        en.join("messages.json").as_std_path(),
        r#"{"HELLO": "Hello World", "NAMED": "My name is {name}"}"#,
    )
    .map_err(|e| catalog_forge::ForgeError::io(en.join("messages.json"), e))?;
    std::fs::write(
        fr.join("messages.json").as_std_path(),
        r#"{"HELLO": "Bonjour tout le monde", "NAMED": ""}"#,
    )
    .map_err(|e| catalog_forge::ForgeError::io(fr.join("messages.json"), e))?;

    let config = ProjectConfig {
        root_dir: Some(root.clone()),
        locales: vec!["en".to_owned(), "fr".to_owned()],
        catalogs: vec![CatalogConfig {
            path: "locales/{locale}/messages".to_owned(),
            locales: None,
        }],
        source_locale: Some("en".to_owned()),
        fallback_locales: Some(FallbackLocales {
            default: Some("en".to_owned()),
            locales: std::collections::BTreeMap::new(),
        }),
        pseudo_locale: None,
        format: CatalogFormat::Minimal,
    };

    let pipeline = TransformPipeline::new(config, TransformOptions::default())?;
    let resource = root.join("locales/fr/messages.json");
    let output = pipeline.transform(resource.as_str(), &TracingContext::new())?;
    println!("{}", output.code);
    Ok(())
}
