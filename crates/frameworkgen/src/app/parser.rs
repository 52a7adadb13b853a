//! Parsing of `CA-...` / `CI-...` naming-convention text.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::model::{FrameworkDomain, ItemLevel, ParsedFrameworkItem};

const CA_PREFIX: &str = "CA-";
const CI_PREFIX: &str = "CI-";
const COMMENT_PREFIX: char = '#';
const CA_MIN_SEGMENTS: usize = 3;
const CI_MIN_SEGMENTS: usize = 5;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Markers checked in order; the first domain with a matching marker wins.
const DOMAIN_MARKERS: &[(FrameworkDomain, &[&str])] = &[
    (
        FrameworkDomain::Organizational,
        &["CA-O-", "GOVERNANCE", "ORGANIZATIONAL"],
    ),
    (
        FrameworkDomain::Procedural,
        &["CA-P-", "PROCESS", "PROCEDURAL"],
    ),
    (
        FrameworkDomain::Intelligent,
        &["CA-I-", "INTELLIGENT", "AUTONOMY"],
    ),
    (
        FrameworkDomain::Machine,
        &["CA-M-", "MACHINE", "AUTOMATION"],
    ),
    (
        FrameworkDomain::Executing,
        &["CA-E-", "EXECUTING", "RUNTIME"],
    ),
    (
        FrameworkDomain::ArchitecturesAirframesAerodynamics,
        &["CA-A-", "ARCHITECTURE", "AIRFRAME"],
    ),
    (
        FrameworkDomain::MechanicalAndControl,
        &["MECHANICAL", "CONTROL", "HYDRAULIC"],
    ),
    (
        FrameworkDomain::EnvironmentalRemediationCircularity,
        &["ENVIRONMENTAL", "REMEDIATION", "CIRCULARITY"],
    ),
    (
        FrameworkDomain::DefenceCybersecuritySafety,
        &["DEFENCE", "CYBERSECURITY", "SAFETY"],
    ),
    (
        FrameworkDomain::EnergyAndRenewable,
        &["ENERGY", "RENEWABLE", "POWER"],
    ),
    (
        FrameworkDomain::OperatingSystemsNavigationHpc,
        &["OPERATING", "NAVIGATION", "HPC"],
    ),
];

/// Parse a CA/CI text block into flat items, in input order.
///
/// Blank lines, `#` comments, lines with another prefix and lines with too
/// few hyphen-delimited segments are skipped without error.
pub fn parse_framework_text(text: &str, domain: FrameworkDomain) -> Vec<ParsedFrameworkItem> {
    let mut items = Vec::new();

    for (index, raw) in text.trim().lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with(COMMENT_PREFIX) {
            continue;
        }

        let item = if line.starts_with(CA_PREFIX) {
            parse_ca_line(line)
        } else if line.starts_with(CI_PREFIX) {
            parse_ci_line(line)
        } else {
            None
        };

        match item {
            Some(item) => items.push(item),
            None => tracing::debug!(%domain, line = index + 1, text = line, "skipping line"),
        }
    }

    tracing::debug!(%domain, items = items.len(), "parsed framework text");
    items
}

fn parse_ca_line(line: &str) -> Option<ParsedFrameworkItem> {
    let segments: Vec<&str> = line.split('-').collect();
    if segments.len() < CA_MIN_SEGMENTS {
        return None;
    }
    Some(ParsedFrameworkItem {
        level: ItemLevel::ComponentArchitecture,
        id: line.to_string(),
        name: name_from_segments(&segments[CA_MIN_SEGMENTS..]),
        parent_id: None,
    })
}

fn parse_ci_line(line: &str) -> Option<ParsedFrameworkItem> {
    let segments: Vec<&str> = line.split('-').collect();
    if segments.len() < CI_MIN_SEGMENTS {
        return None;
    }
    // CI-CA-<domain>-<num>-<seq>-<NAME> belongs under CA-<domain>-<num>-...
    let parent_pattern = format!("{CA_PREFIX}{}-{}-", segments[2], segments[3]);
    Some(ParsedFrameworkItem {
        level: ItemLevel::ConfigurationItem,
        id: line.to_string(),
        name: name_from_segments(&segments[CI_MIN_SEGMENTS..]),
        parent_id: Some(parent_pattern),
    })
}

fn name_from_segments(segments: &[&str]) -> String {
    segments.join(" ").replace('_', " ")
}

/// Guess which framework domain a block of text belongs to.
pub fn extract_domain_from_text(text: &str) -> Option<FrameworkDomain> {
    let upper = text.to_uppercase();
    DOMAIN_MARKERS
        .iter()
        .find(|(_, markers)| markers.iter().any(|marker| upper.contains(marker)))
        .map(|(domain, _)| *domain)
}

/// Collapse underscores, hyphens and whitespace runs into single spaces.
pub fn normalize_text(text: &str) -> String {
    let replaced = text.trim().replace(['_', '-'], " ");
    WHITESPACE_RUN
        .replace_all(&replaced, " ")
        .trim()
        .to_string()
}

/// Human readable description derived from an item's name and id prefix.
pub fn generate_description(name: &str, id: &str) -> String {
    let normalized = normalize_text(name);
    if id.starts_with(CA_PREFIX) {
        format!("Component Architecture: {normalized}")
    } else if id.starts_with(CI_PREFIX) {
        format!("Configuration Item: {normalized}")
    } else {
        normalized
    }
}

/// Number of hyphen-delimited segments in an identifier.
pub fn hierarchy_level(id: &str) -> usize {
    id.split('-').count()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORG_TEXT: &str = "
CA-O-001-GOVERNANCE
CI-CA-O-001-001-PROGRAM-GOVERNANCE-FRAMEWORK
CI-CA-O-001-002-QUALITY-MANAGEMENT-SYSTEM
";

    #[test]
    fn parses_ca_and_ci_lines_in_order() {
        let items = parse_framework_text(ORG_TEXT, FrameworkDomain::Organizational);
        assert_eq!(items.len(), 3);

        assert_eq!(items[0].level, ItemLevel::ComponentArchitecture);
        assert_eq!(items[0].id, "CA-O-001-GOVERNANCE");
        assert_eq!(items[0].name, "GOVERNANCE");
        assert_eq!(items[0].parent_id, None);

        assert_eq!(items[1].level, ItemLevel::ConfigurationItem);
        assert_eq!(items[1].name, "PROGRAM GOVERNANCE FRAMEWORK");
        assert_eq!(items[1].parent_id.as_deref(), Some("CA-O-001-"));
        assert_eq!(items[2].name, "QUALITY MANAGEMENT SYSTEM");
    }

    #[test]
    fn ca_names_replace_underscores() {
        let items = parse_framework_text(
            "CA-P-002-PHASE_GATE-REVIEWS",
            FrameworkDomain::Procedural,
        );
        assert_eq!(items[0].name, "PHASE GATE REVIEWS");
    }

    #[test]
    fn skips_comments_blank_and_malformed_lines() {
        let text = "
# heading comment

CA-O
CI-CA-O-001
README
   CA-O-002-FINANCE
";
        let items = parse_framework_text(text, FrameworkDomain::Organizational);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "CA-O-002-FINANCE");
        assert_eq!(items[0].name, "FINANCE");
    }

    #[test]
    fn minimal_ca_line_has_empty_name() {
        let items = parse_framework_text("CA-O-003", FrameworkDomain::Organizational);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "");
    }

    #[test]
    fn detects_domains_in_priority_order() {
        assert_eq!(
            extract_domain_from_text(ORG_TEXT),
            Some(FrameworkDomain::Organizational)
        );
        assert_eq!(
            extract_domain_from_text("ca-p-001-process-architecture"),
            Some(FrameworkDomain::Procedural)
        );
        assert_eq!(
            extract_domain_from_text("CA-A-001-AIRFRAME-STRUCTURES"),
            Some(FrameworkDomain::ArchitecturesAirframesAerodynamics)
        );
        assert_eq!(
            extract_domain_from_text("CA-H-001-HYDRAULIC-ACTUATION"),
            Some(FrameworkDomain::MechanicalAndControl)
        );
        assert_eq!(
            extract_domain_from_text("CA-D-001-CYBERSECURITY"),
            Some(FrameworkDomain::DefenceCybersecuritySafety)
        );
        assert_eq!(
            extract_domain_from_text("CA-N-001-HPC-CLUSTER"),
            Some(FrameworkDomain::OperatingSystemsNavigationHpc)
        );
        assert_eq!(extract_domain_from_text("nothing to see"), None);
    }

    #[test]
    fn normalizes_separators_and_whitespace() {
        assert_eq!(
            normalize_text("  TEST_WITH_UNDERSCORES-AND-DASHES  "),
            "TEST WITH UNDERSCORES AND DASHES"
        );
        assert_eq!(normalize_text("A  _-  B"), "A B");
    }

    #[test]
    fn descriptions_follow_id_prefix() {
        assert_eq!(
            generate_description("TEST COMPONENT", "CA-TEST-001"),
            "Component Architecture: TEST COMPONENT"
        );
        assert_eq!(
            generate_description("QUALITY_PLAN", "CI-CA-O-001-002-QUALITY_PLAN"),
            "Configuration Item: QUALITY PLAN"
        );
        assert_eq!(generate_description("loose-name", "X-1"), "loose name");
    }

    #[test]
    fn hierarchy_level_counts_segments() {
        assert_eq!(hierarchy_level("CA-O-001-GOVERNANCE"), 4);
        assert_eq!(hierarchy_level("CI-CA-O-001-001-PROGRAM"), 6);
    }
}
