use std::path::PathBuf;

use frameworkgen::app::generator::generate_framework_structure;
use frameworkgen::app::outline::{OutlineOptions, render_outline};
use frameworkgen::domain::model::GeneratorOptions;
use frameworkgen::infra::sources::SourceLoader;
use insta::assert_snapshot;

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/framework")
}

#[test]
fn fixture_outline_to_depth_two() {
    let sources = SourceLoader::new(fixture_dir(), "*.txt")
        .and_then(|loader| loader.load())
        .expect("fixture sources load");
    let framework = generate_framework_structure(&sources, &GeneratorOptions::default());

    let rendered = render_outline(
        &framework,
        &OutlineOptions {
            max_depth: Some(2),
            filter: None,
        },
    );
    assert_snapshot!("fixture_outline", rendered);
}
