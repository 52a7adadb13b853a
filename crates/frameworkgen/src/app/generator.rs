//! Assembly of parsed items into the framework tree and tree utilities.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::app::parser::{extract_domain_from_text, generate_description, parse_framework_text};
use crate::domain::model::{
    FrameworkDomain, FrameworkNode, GeneratorOptions, ItemLevel, NodeType, ParsedFrameworkItem,
};

/// Display names paired positionally with the technical domain texts.
pub const TECHNICAL_DOMAIN_NAMES: [&str; 6] = [
    "Architectures Airframes Aerodynamics",
    "Mechanical and Control",
    "Environmental Remediation Circularity",
    "Defence Cybersecurity Safety",
    "Energy and Renewable",
    "Operating Systems Navigation HPC",
];

/// Raw text inputs for every section of the framework.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameworkSources {
    pub organizational: String,
    pub procedural: String,
    pub intelligent: String,
    pub machine: String,
    pub executing: String,
    pub technical: Vec<String>,
}

/// Identity of the node everything else hangs from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootInfo {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl Default for RootInfo {
    fn default() -> Self {
        Self {
            id: "AMPEL360-H2-BWB-Q".into(),
            name: "AMPEL360 H₂-BWB-Q Framework".into(),
            description:
                "Enterprise-grade framework for AMPEL360 H₂-BWB-Q aircraft configuration optimization"
                    .into(),
        }
    }
}

struct Section {
    domain: FrameworkDomain,
    name: &'static str,
    description: &'static str,
}

const ORGANIZATIONAL: Section = Section {
    domain: FrameworkDomain::Organizational,
    name: "Organizational",
    description: "Governance, financial control, strategic management, org structures",
};
const PROCEDURAL: Section = Section {
    domain: FrameworkDomain::Procedural,
    name: "Procedural",
    description: "Processes, workflows, phase gates, enterprise standards",
};
const INTELLIGENT: Section = Section {
    domain: FrameworkDomain::Intelligent,
    name: "Intelligent",
    description: "AI models, optimizers, predictive analytics, decision support",
};
const MACHINE: Section = Section {
    domain: FrameworkDomain::Machine,
    name: "Machine",
    description: "Simulation, digital twins, co-simulation, HIL testing",
};
const EXECUTING: Section = Section {
    domain: FrameworkDomain::Executing,
    name: "Executing",
    description: "Execution orchestration, deployment automation, runtime monitoring",
};

const TECHNOLOGICAL_ID: &str = "T-TECHNOLOGICAL";
const TECHNOLOGICAL_NAME: &str = "Technological";
const TECHNOLOGICAL_DESCRIPTION: &str = "Technical architecture, CAs/CIs, UTCS artifacts";

/// Construct a node.
pub fn create_node(
    id: impl Into<String>,
    name: impl Into<String>,
    description: impl Into<String>,
    node_type: NodeType,
    children: Option<Vec<FrameworkNode>>,
) -> FrameworkNode {
    FrameworkNode {
        id: id.into(),
        name: name.into(),
        node_type,
        description: description.into(),
        children,
    }
}

/// Build the CA/CI forest for one domain.
///
/// Configuration items whose parent cannot be resolved are dropped.
pub fn build_framework_tree(
    items: &[ParsedFrameworkItem],
    domain: FrameworkDomain,
    options: &GeneratorOptions,
) -> Vec<FrameworkNode> {
    let describe = |item: &ParsedFrameworkItem| {
        if options.include_descriptions {
            generate_description(&item.name, &item.id)
        } else {
            item.name.clone()
        }
    };

    let mut nodes: Vec<FrameworkNode> = items
        .iter()
        .filter(|item| item.level == ItemLevel::ComponentArchitecture)
        .map(|item| {
            create_node(
                &item.id,
                &item.name,
                describe(item),
                NodeType::Folder,
                Some(Vec::new()),
            )
        })
        .collect();

    let mut orphans = 0usize;
    for item in items
        .iter()
        .filter(|item| item.level == ItemLevel::ConfigurationItem)
    {
        let parent = item
            .parent_id
            .as_deref()
            .and_then(|pattern| find_parent_index(&nodes, pattern));

        let Some(index) = parent else {
            orphans += 1;
            tracing::warn!(
                %domain,
                id = %item.id,
                parent = item.parent_id.as_deref().unwrap_or("<none>"),
                "configuration item has no matching component architecture; dropping"
            );
            continue;
        };

        let node = create_node(&item.id, &item.name, describe(item), NodeType::Folder, None);
        nodes[index].children.get_or_insert_with(Vec::new).push(node);
    }

    tracing::debug!(%domain, roots = nodes.len(), orphans, "built framework tree");
    nodes
}

fn find_parent_index(nodes: &[FrameworkNode], pattern: &str) -> Option<usize> {
    if pattern.ends_with('-') {
        nodes.iter().position(|node| node.id.starts_with(pattern))
    } else {
        nodes.iter().position(|node| node.id == pattern)
    }
}

fn section_node(section: &Section, text: &str, options: &GeneratorOptions) -> FrameworkNode {
    let items = parse_framework_text(text, section.domain);
    let tree = build_framework_tree(&items, section.domain, options);
    create_node(
        section.domain.code(),
        section.name,
        section.description,
        NodeType::Folder,
        Some(tree),
    )
}

fn technological_node(texts: &[String], options: &GeneratorOptions) -> FrameworkNode {
    if texts.len() > TECHNICAL_DOMAIN_NAMES.len() {
        tracing::warn!(
            provided = texts.len(),
            supported = TECHNICAL_DOMAIN_NAMES.len(),
            "ignoring extra technical domain texts"
        );
    }

    let mut children = Vec::new();
    for (text, name) in texts.iter().zip(TECHNICAL_DOMAIN_NAMES) {
        let Some(domain) = extract_domain_from_text(text) else {
            tracing::warn!(name, "could not detect a domain for technical text; skipping");
            continue;
        };
        let items = parse_framework_text(text, domain);
        let tree = build_framework_tree(&items, domain, options);
        children.push(create_node(
            domain.code(),
            name,
            format!("Technical domain: {name}"),
            NodeType::Folder,
            Some(tree),
        ));
    }

    create_node(
        TECHNOLOGICAL_ID,
        TECHNOLOGICAL_NAME,
        TECHNOLOGICAL_DESCRIPTION,
        NodeType::Folder,
        Some(children),
    )
}

/// Generate the complete framework structure under the default root.
pub fn generate_framework_structure(
    sources: &FrameworkSources,
    options: &GeneratorOptions,
) -> FrameworkNode {
    generate_framework_structure_with_root(sources, options, &RootInfo::default())
}

/// Generate the complete framework structure under a custom root.
pub fn generate_framework_structure_with_root(
    sources: &FrameworkSources,
    options: &GeneratorOptions,
    root: &RootInfo,
) -> FrameworkNode {
    let children = vec![
        section_node(&ORGANIZATIONAL, &sources.organizational, options),
        section_node(&PROCEDURAL, &sources.procedural, options),
        technological_node(&sources.technical, options),
        section_node(&INTELLIGENT, &sources.intelligent, options),
        section_node(&MACHINE, &sources.machine, options),
        section_node(&EXECUTING, &sources.executing, options),
    ];

    let mut node = create_node(
        &root.id,
        &root.name,
        &root.description,
        NodeType::Folder,
        Some(children),
    );

    if let Some(depth) = options.max_depth {
        prune_to_depth(&mut node, depth);
    }

    tracing::info!(nodes = count_nodes(&node), "generated framework structure");
    node
}

/// Remove every node deeper than `max_depth`; the root is depth 0.
pub fn prune_to_depth(node: &mut FrameworkNode, max_depth: usize) {
    match node.children.as_mut() {
        Some(children) if max_depth == 0 => children.clear(),
        Some(children) => {
            for child in children {
                prune_to_depth(child, max_depth - 1);
            }
        }
        None => {}
    }
}

/// Widest indent accepted by [`framework_to_json`].
pub const MAX_JSON_INDENT: usize = 16;

/// Serialize a tree as JSON, pretty printed with `indent` spaces, compact when 0.
pub fn framework_to_json(node: &FrameworkNode, indent: usize) -> Result<String> {
    if indent > MAX_JSON_INDENT {
        anyhow::bail!("JSON indent {indent} is wider than the maximum of {MAX_JSON_INDENT}");
    }
    if indent == 0 {
        return serde_json::to_string(node).context("failed to serialize framework tree");
    }

    let indent = " ".repeat(indent);
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    node.serialize(&mut serializer)
        .context("failed to serialize framework tree")?;
    String::from_utf8(buffer).context("serialized framework tree is not valid UTF-8")
}

/// Total number of nodes, the root included.
pub fn count_nodes(node: &FrameworkNode) -> usize {
    1 + node.children().iter().map(count_nodes).sum::<usize>()
}

/// Depth-first, pre-order lookup of the first node with `id`.
pub fn find_node_by_id<'a>(node: &'a FrameworkNode, id: &str) -> Option<&'a FrameworkNode> {
    if node.id == id {
        return Some(node);
    }
    node.children()
        .iter()
        .find_map(|child| find_node_by_id(child, id))
}

/// Ids of all nodes exactly `depth` levels below `node`, left to right.
pub fn nodes_at_depth(node: &FrameworkNode, depth: usize) -> Vec<String> {
    let mut ids = Vec::new();
    collect_at_depth(node, depth, &mut ids);
    ids
}

fn collect_at_depth(node: &FrameworkNode, remaining: usize, ids: &mut Vec<String>) {
    if remaining == 0 {
        ids.push(node.id.clone());
        return;
    }
    for child in node.children() {
        collect_at_depth(child, remaining - 1, ids);
    }
}

/// Number of nodes at each depth, starting with the root.
pub fn depth_histogram(node: &FrameworkNode) -> Vec<usize> {
    let mut counts = Vec::new();
    let mut level = vec![node];
    while !level.is_empty() {
        counts.push(level.len());
        level = level
            .into_iter()
            .flat_map(|node| node.children().iter())
            .collect();
    }
    counts
}
