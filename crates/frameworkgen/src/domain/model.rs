//! Domain models for parsed framework items and the generated tree.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Kind of entry a [`FrameworkNode`] stands for in the documentation tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    #[default]
    Folder,
    File,
}

/// A node of the generated framework tree.
///
/// `children` is `None` for leaves (configuration items) and `Some` for
/// grouping nodes, even when the group ended up empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameworkNode {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<FrameworkNode>>,
}

impl FrameworkNode {
    /// Children of this node, empty for leaves.
    pub fn children(&self) -> &[FrameworkNode] {
        self.children.as_deref().unwrap_or_default()
    }
}

/// Level encoded by the prefix of a framework line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemLevel {
    /// Component Architecture (`CA-...`).
    #[serde(rename = "CA")]
    ComponentArchitecture,
    /// Configuration Item (`CI-CA-...`).
    #[serde(rename = "CI")]
    ConfigurationItem,
}

/// Flat record produced by the parser and consumed by the tree builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedFrameworkItem {
    pub level: ItemLevel,
    pub id: String,
    pub name: String,
    /// Parent reference of a configuration item. A value ending in `-` is a
    /// prefix pattern, anything else must equal the parent id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

/// Framework domains recognised in source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FrameworkDomain {
    Organizational,
    Procedural,
    Intelligent,
    Machine,
    Executing,
    ArchitecturesAirframesAerodynamics,
    MechanicalAndControl,
    EnvironmentalRemediationCircularity,
    DefenceCybersecuritySafety,
    EnergyAndRenewable,
    OperatingSystemsNavigationHpc,
}

impl FrameworkDomain {
    pub const ALL: [FrameworkDomain; 11] = [
        FrameworkDomain::Organizational,
        FrameworkDomain::Procedural,
        FrameworkDomain::Intelligent,
        FrameworkDomain::Machine,
        FrameworkDomain::Executing,
        FrameworkDomain::ArchitecturesAirframesAerodynamics,
        FrameworkDomain::MechanicalAndControl,
        FrameworkDomain::EnvironmentalRemediationCircularity,
        FrameworkDomain::DefenceCybersecuritySafety,
        FrameworkDomain::EnergyAndRenewable,
        FrameworkDomain::OperatingSystemsNavigationHpc,
    ];

    /// Stable code used as node id and directory name.
    pub fn code(&self) -> &'static str {
        match self {
            FrameworkDomain::Organizational => "O-ORGANIZATIONAL",
            FrameworkDomain::Procedural => "P-PROCEDURAL",
            FrameworkDomain::Intelligent => "I-INTELLIGENT",
            FrameworkDomain::Machine => "M-MACHINE",
            FrameworkDomain::Executing => "E-EXECUTING",
            FrameworkDomain::ArchitecturesAirframesAerodynamics => {
                "A-ARCHITECTURES_AIRFRAMES_AERODYNAMICS"
            }
            FrameworkDomain::MechanicalAndControl => "M-MECHANICAL_AND_CONTROL",
            FrameworkDomain::EnvironmentalRemediationCircularity => {
                "E1-ENVIRONMENTAL_REMEDIATION_CIRCULARITY"
            }
            FrameworkDomain::DefenceCybersecuritySafety => "D-DEFENCE_CYBERSECURITY_SAFETY",
            FrameworkDomain::EnergyAndRenewable => "E2-ENERGY_AND_RENEWABLE",
            FrameworkDomain::OperatingSystemsNavigationHpc => "O-OPERATING_SYSTEMS_NAVIGATION_HPC",
        }
    }
}

impl fmt::Display for FrameworkDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for FrameworkDomain {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim().to_ascii_uppercase();
        FrameworkDomain::ALL
            .into_iter()
            .find(|domain| domain.code() == wanted)
            .ok_or(DomainError::UnknownDomain(value.trim().to_string()))
    }
}

impl TryFrom<String> for FrameworkDomain {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FrameworkDomain> for String {
    fn from(value: FrameworkDomain) -> Self {
        value.code().to_string()
    }
}

/// Knobs applied while assembling the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    pub include_descriptions: bool,
    /// Deepest level kept in the generated structure; the root is depth 0.
    pub max_depth: Option<usize>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            include_descriptions: true,
            max_depth: None,
        }
    }
}
