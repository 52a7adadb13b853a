use std::path::PathBuf;

use frameworkgen::app::generator::{
    count_nodes, depth_histogram, find_node_by_id, framework_to_json,
    generate_framework_structure, nodes_at_depth,
};
use frameworkgen::domain::model::{FrameworkNode, GeneratorOptions};
use frameworkgen::infra::sources::SourceLoader;

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/framework")
}

fn fixture_framework(options: &GeneratorOptions) -> FrameworkNode {
    let sources = SourceLoader::new(fixture_dir(), "*.txt")
        .and_then(|loader| loader.load())
        .expect("fixture sources load");
    generate_framework_structure(&sources, options)
}

#[test]
fn builds_every_section_from_fixture_directory() {
    let framework = fixture_framework(&GeneratorOptions::default());

    assert_eq!(count_nodes(&framework), 29);
    assert_eq!(depth_histogram(&framework), vec![1, 6, 8, 12, 2]);
    assert_eq!(
        nodes_at_depth(&framework, 1),
        vec![
            "O-ORGANIZATIONAL",
            "P-PROCEDURAL",
            "T-TECHNOLOGICAL",
            "I-INTELLIGENT",
            "M-MACHINE",
            "E-EXECUTING",
        ]
    );
}

#[test]
fn configuration_items_hang_under_their_component_architecture() {
    let framework = fixture_framework(&GeneratorOptions::default());

    let governance = find_node_by_id(&framework, "CA-O-001-GOVERNANCE").expect("governance CA");
    let names: Vec<_> = governance
        .children()
        .iter()
        .map(|child| child.name.as_str())
        .collect();
    assert_eq!(
        names,
        vec![
            "PROGRAM GOVERNANCE FRAMEWORK",
            "QUALITY MANAGEMENT SYSTEM",
            "CERTIFICATION ROADMAP",
        ]
    );

    let finance =
        find_node_by_id(&framework, "CA-O-002-FINANCIAL_CONTROL").expect("financial CA");
    assert_eq!(finance.name, "FINANCIAL CONTROL");
    assert_eq!(finance.children().len(), 1);
}

#[test]
fn orphaned_configuration_items_are_dropped() {
    let framework = fixture_framework(&GeneratorOptions::default());
    assert!(find_node_by_id(&framework, "CI-CA-O-009-001-UNASSIGNED-ITEM").is_none());
}

#[test]
fn technical_texts_are_classified_by_content() {
    let framework = fixture_framework(&GeneratorOptions::default());
    let technological = find_node_by_id(&framework, "T-TECHNOLOGICAL").expect("tech section");
    let domains: Vec<_> = technological
        .children()
        .iter()
        .map(|child| (child.id.as_str(), child.name.as_str()))
        .collect();
    assert_eq!(
        domains,
        vec![
            (
                "A-ARCHITECTURES_AIRFRAMES_AERODYNAMICS",
                "Architectures Airframes Aerodynamics"
            ),
            ("M-MECHANICAL_AND_CONTROL", "Mechanical and Control"),
        ]
    );
}

#[test]
fn json_output_round_trips_structure() {
    let framework = fixture_framework(&GeneratorOptions::default());
    let json = framework_to_json(&framework, 2).expect("serialize");

    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(value["id"], "AMPEL360-H2-BWB-Q");
    assert_eq!(value["type"], "folder");
    let first_ci = &value["children"][0]["children"][0]["children"][0];
    assert_eq!(first_ci["name"], "PROGRAM GOVERNANCE FRAMEWORK");
    assert_eq!(
        first_ci["description"],
        "Configuration Item: PROGRAM GOVERNANCE FRAMEWORK"
    );
    assert!(first_ci.get("children").is_none());

    let reparsed: FrameworkNode = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(reparsed, framework);
}

#[test]
fn max_depth_limits_generated_tree() {
    let options = GeneratorOptions {
        include_descriptions: false,
        max_depth: Some(1),
    };
    let framework = fixture_framework(&options);
    assert_eq!(count_nodes(&framework), 7);
}
