//! Technological domain descriptors and the search catalog shown on the index page.

use serde::Serialize;

/// Default location of the domain directories relative to the index page.
pub const DEFAULT_DOMAIN_BASE: &str = "./T-TECHNOLOGICAL/AMEDEO-PELLICCIA/INTEGRATED/AMPEL360-H2-BWB-QNNN/";

/// Queries shorter than this never produce results.
pub const MIN_QUERY_CHARS: usize = 2;

/// Default number of search results returned.
pub const DEFAULT_SEARCH_LIMIT: usize = 8;

/// One technological domain card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DomainDescriptor {
    /// Directory name under the domain base.
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Font Awesome icon classes.
    pub icon: &'static str,
}

const DOMAINS: [DomainDescriptor; 15] = [
    DomainDescriptor {
        id: "A-ARCHITECTURE",
        name: "A-ARCHITECTURES",
        description: "System architectures, structural design, and integration frameworks.",
        icon: "fas fa-building",
    },
    DomainDescriptor {
        id: "M-MECHANICAL",
        name: "M-MECHANICAL",
        description: "Mechanical systems, components, and structural engineering.",
        icon: "fas fa-cogs",
    },
    DomainDescriptor {
        id: "E-ENVIRONMENTAL",
        name: "E1-ENVIRONMENTAL",
        description: "Environmental systems, climate control, and sustainability.",
        icon: "fas fa-leaf",
    },
    DomainDescriptor {
        id: "D-DIGITAL",
        name: "D-DIGITAL",
        description: "Digital systems, software architecture, and computing platforms.",
        icon: "fas fa-microchip",
    },
    DomainDescriptor {
        id: "E2-ENERGY",
        name: "E2-ENERGY",
        description: "Energy systems, power management, and hydrogen technology.",
        icon: "fas fa-bolt",
    },
    DomainDescriptor {
        id: "O-OPERATING_SYSTEMS",
        name: "O-OPERATING_SYSTEMS",
        description: "Operating systems, runtime environments, and system software.",
        icon: "fas fa-desktop",
    },
    DomainDescriptor {
        id: "P-PROPULSION",
        name: "P-PROPULSION",
        description: "Propulsion systems, engines, and thrust generation.",
        icon: "fas fa-rocket",
    },
    DomainDescriptor {
        id: "E3-ELECTRONICS",
        name: "E3-ELECTRONICS",
        description: "Electronic systems, circuits, and hardware components.",
        icon: "fas fa-circuit-board",
    },
    DomainDescriptor {
        id: "L-LOGISTICS",
        name: "L1-LOGISTICS",
        description: "Logistics, supply chain, and resource management.",
        icon: "fas fa-truck",
    },
    DomainDescriptor {
        id: "L2-LINKS",
        name: "L2-LINKS",
        description: "Communication links, networks, and data transmission.",
        icon: "fas fa-link",
    },
    DomainDescriptor {
        id: "I-INFRASTRUCTURES",
        name: "I-INFRASTRUCTURES",
        description: "Infrastructure systems, facilities, and support structures.",
        icon: "fas fa-industry",
    },
    DomainDescriptor {
        id: "C-CONTROL",
        name: "C1-COMPUTING",
        description: "Control systems, automation, and computing infrastructure.",
        icon: "fas fa-server",
    },
    DomainDescriptor {
        id: "C2-CRYOGENICS",
        name: "C2-CRYOGENICS",
        description: "Cryogenic systems, cooling, and low-temperature technology.",
        icon: "fas fa-snowflake",
    },
    DomainDescriptor {
        id: "I2-INTELLIGENCE",
        name: "I2-INTELLIGENCE",
        description: "Artificial intelligence, machine learning, and smart systems.",
        icon: "fas fa-brain",
    },
    DomainDescriptor {
        id: "A2-AIRPORTS",
        name: "A2-AIRPORTS",
        description: "Airport systems, ground support, and infrastructure.",
        icon: "fas fa-plane-departure",
    },
];

/// The technological domains in display order.
pub fn technological_domains() -> &'static [DomainDescriptor] {
    &DOMAINS
}

/// Link to a domain directory under `base`.
pub fn domain_url(base: &str, domain: &DomainDescriptor) -> String {
    if base.is_empty() || base.ends_with('/') {
        format!("{base}{}/", domain.id)
    } else {
        format!("{base}/{}/", domain.id)
    }
}

/// Entry of the index page search catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchItem {
    pub title: String,
    /// Breadcrumb shown under the title.
    pub path: String,
    pub url: String,
}

impl SearchItem {
    fn new(title: impl Into<String>, path: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            path: path.into(),
            url: url.into(),
        }
    }

    fn matches(&self, lowered_query: &str) -> bool {
        self.title.to_lowercase().contains(lowered_query)
            || self.path.to_lowercase().contains(lowered_query)
    }
}

const FIXED_ENTRIES: [(&str, &str, &str); 17] = [
    ("O-ORGANIZATIONAL", "Framework > Organizational", "./O-ORGANIZATIONAL/"),
    ("P-PROCEDURAL", "Framework > Procedural", "./P-PROCEDURAL/"),
    ("T-TECHNOLOGICAL", "Framework > Technological", "./T-TECHNOLOGICAL/"),
    ("I-INTELLIGENT", "Framework > Intelligent", "./I-INTELLIGENT/"),
    ("M-MACHINE", "Framework > Machine", "./M-MACHINE/"),
    ("E-EXECUTING", "Framework > Executing", "./E-EXECUTING/"),
    ("Framework Overview", "Documentation > Main README", "./README.md"),
    ("Technical Index", "Documentation > Technical", "./T-TECHNOLOGICAL/README.md"),
    (
        "Systems Index",
        "Documentation > Systems",
        "./T-TECHNOLOGICAL/AMEDEO-PELLICCIA/INTEGRATED/README.md",
    ),
    ("Application Ecosystem", "Applications > Main Hub", "./I-INTELLIGENT/app/"),
    (
        "CQEA Applications",
        "Applications > Quantum-Classical",
        "./I-INTELLIGENT/app/CQEA_Classical_Quantum-Extensible_Applications/",
    ),
    ("Validation Tools", "Tools > Validation", "../tools/"),
    ("Build System", "Tools > Make", "../Makefile"),
    ("Demo Script", "Tools > Demo", "../ampel360_integrated_demo.py"),
    ("Main Configuration", "Config > Main", "../ampel360-config.yaml"),
    (
        "Program Configuration",
        "Config > Program",
        "./T-TECHNOLOGICAL/AMEDEO-PELLICCIA/INTEGRATED/AMPEL360-H2-BWB-QNNN/ampel-config.yaml",
    ),
    ("Dependencies", "Config > Requirements", "../requirements.txt"),
];

/// Framework sections, documentation, applications, tools and configuration links.
pub fn fixed_items() -> Vec<SearchItem> {
    FIXED_ENTRIES
        .iter()
        .map(|(title, path, url)| SearchItem::new(*title, *path, *url))
        .collect()
}

/// Full search catalog: fixed entries followed by every domain.
pub fn search_items(domain_base: &str) -> Vec<SearchItem> {
    let mut items = fixed_items();

    items.extend(technological_domains().iter().map(|domain| {
        SearchItem::new(
            domain.name,
            format!("Technological Domains > {}", domain.name),
            domain_url(domain_base, domain),
        )
    }));
    items
}

/// Case-insensitive substring search over titles and paths, in catalog order.
pub fn search<'a>(items: &'a [SearchItem], query: &str, limit: usize) -> Vec<&'a SearchItem> {
    let query = query.trim();
    if query.chars().count() < MIN_QUERY_CHARS {
        return Vec::new();
    }

    let lowered = query.to_lowercase();
    items
        .iter()
        .filter(|item| item.matches(&lowered))
        .take(limit)
        .collect()
}
