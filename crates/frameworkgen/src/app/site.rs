//! Static index page rendering.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use minijinja::Environment;
use minijinja::value::Value;
use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::app::catalog::{
    self, DEFAULT_DOMAIN_BASE, DEFAULT_SEARCH_LIMIT, MIN_QUERY_CHARS, SearchItem,
};
use crate::app::generator::{count_nodes, framework_to_json};
use crate::domain::model::FrameworkNode;
use crate::infra::config::Config;

const INDEX_TEMPLATE_NAME: &str = "index.html";
const INDEX_TEMPLATE: &str = include_str!("../../assets/index.html");
const STYLES: &str = include_str!("../../assets/styles.css");
const SCRIPT: &str = include_str!("../../assets/script.js");

const INDEX_FILE: &str = "index.html";
const STYLES_FILE: &str = "styles.css";
const SCRIPT_FILE: &str = "script.js";
const FRAMEWORK_FILE: &str = "framework.json";

/// Runtime options controlling site rendering.
#[derive(Debug, Clone)]
pub struct SiteOptions {
    pub title: String,
    pub output_dir: PathBuf,
    pub domain_base: String,
    pub search_limit: usize,
    pub json_indent: usize,
}

impl SiteOptions {
    /// Build options from configuration defaults.
    pub fn from_config(config: &Config) -> Self {
        Self {
            title: config.site.title().to_string(),
            output_dir: config.site.output_dir(),
            domain_base: config.site.domain_base().to_string(),
            search_limit: config.site.search_limit(),
            json_indent: config.generator.json_indent(),
        }
    }
}

impl Default for SiteOptions {
    fn default() -> Self {
        Self {
            title: "Interactive OPTIM Framework Index".into(),
            output_dir: PathBuf::from("site"),
            domain_base: DEFAULT_DOMAIN_BASE.into(),
            search_limit: DEFAULT_SEARCH_LIMIT,
            json_indent: 2,
        }
    }
}

/// Files produced by [`SiteRenderer::write`].
#[derive(Debug, Clone)]
pub struct SiteOutput {
    pub output_dir: PathBuf,
    pub files: Vec<PathBuf>,
}

/// Renders the framework index page with minijinja.
pub struct SiteRenderer {
    env: Environment<'static>,
}

impl SiteRenderer {
    /// Create a renderer with the built-in templates loaded.
    pub fn new() -> Result<Self> {
        Ok(Self {
            env: default_environment()?,
        })
    }

    /// Render `index.html` for the given framework tree.
    pub fn render_index(&self, framework: &FrameworkNode, options: &SiteOptions) -> Result<String> {
        let context = build_page_context(framework, options)?;
        self.env
            .get_template(INDEX_TEMPLATE_NAME)
            .map_err(|err| anyhow!("missing template '{INDEX_TEMPLATE_NAME}': {err}"))?
            .render(&context)
            .map_err(|err| anyhow!("failed to render template '{INDEX_TEMPLATE_NAME}': {err}"))
    }

    /// Render the page and write it with its assets into `options.output_dir`.
    pub fn write(&self, framework: &FrameworkNode, options: &SiteOptions) -> Result<SiteOutput> {
        let index = self.render_index(framework, options)?;
        let json = framework_to_json(framework, options.json_indent)?;

        let dir = &options.output_dir;
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create site directory: {}", dir.display()))?;

        let files = vec![
            write_file(dir, INDEX_FILE, &index)?,
            write_file(dir, STYLES_FILE, STYLES)?,
            write_file(dir, SCRIPT_FILE, SCRIPT)?,
            write_file(dir, FRAMEWORK_FILE, &json)?,
        ];

        tracing::info!(dir = %dir.display(), files = files.len(), "wrote framework site");
        Ok(SiteOutput {
            output_dir: dir.clone(),
            files,
        })
    }
}

fn write_file(dir: &Path, name: &str, contents: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, contents)
        .with_context(|| format!("failed to write site file {}", path.display()))?;
    Ok(path)
}

fn default_environment() -> Result<Environment<'static>> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.add_template(INDEX_TEMPLATE_NAME, INDEX_TEMPLATE)
        .map_err(|err| anyhow!("failed to register index template: {err}"))?;
    Ok(env)
}

fn build_page_context(framework: &FrameworkNode, options: &SiteOptions) -> Result<PageContext> {
    let generated_at = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .context("failed to format generation timestamp")?;

    let sections = framework
        .children()
        .iter()
        .map(|section| PageSection {
            id: section.id.clone(),
            name: section.name.clone(),
            description: section.description.clone(),
            nodes: count_nodes(section),
        })
        .collect();

    let domains = catalog::technological_domains()
        .iter()
        .map(|domain| PageDomain {
            id: domain.id,
            name: domain.name,
            description: domain.description,
            icon: domain.icon,
            url: catalog::domain_url(&options.domain_base, domain),
        })
        .collect();

    let mut counter = 0usize;
    let tree = framework
        .children()
        .iter()
        .map(|child| tree_entry(child, &mut counter))
        .collect();

    let search_items = catalog::search_items(&options.domain_base);

    Ok(PageContext {
        title: options.title.clone(),
        generated_at,
        root: PageRoot {
            id: framework.id.clone(),
            name: framework.name.clone(),
            description: framework.description.clone(),
        },
        total_nodes: count_nodes(framework),
        tabs: TABS.to_vec(),
        sections,
        tree,
        domains,
        quick_access: catalog::fixed_items(),
        search_index: Value::from_safe_string(search_index_json(&search_items)?),
        search_limit: options.search_limit,
        min_query_chars: MIN_QUERY_CHARS,
    })
}

fn tree_entry(node: &FrameworkNode, counter: &mut usize) -> TreeEntry {
    *counter += 1;
    let anchor = format!("tree-node-{counter}");
    TreeEntry {
        anchor,
        id: node.id.clone(),
        name: node.name.clone(),
        description: node.description.clone(),
        children: node
            .children()
            .iter()
            .map(|child| tree_entry(child, counter))
            .collect(),
    }
}

/// JSON for an inline `<script>` block; `</` is escaped so it cannot close the tag.
fn search_index_json(items: &[SearchItem]) -> Result<String> {
    let json = serde_json::to_string(items).context("failed to serialize search index")?;
    Ok(json.replace("</", "<\\/"))
}

#[derive(Debug, Clone, Copy, Serialize)]
struct Tab {
    id: &'static str,
    label: &'static str,
    icon: &'static str,
}

const TABS: [Tab; 4] = [
    Tab {
        id: "overview",
        label: "Overview",
        icon: "fas fa-home",
    },
    Tab {
        id: "structure",
        label: "Structure",
        icon: "fas fa-sitemap",
    },
    Tab {
        id: "domains",
        label: "Domains",
        icon: "fas fa-th-large",
    },
    Tab {
        id: "quick-access",
        label: "Quick Access",
        icon: "fas fa-bolt",
    },
];

#[derive(Serialize)]
struct PageContext {
    title: String,
    generated_at: String,
    root: PageRoot,
    total_nodes: usize,
    tabs: Vec<Tab>,
    sections: Vec<PageSection>,
    tree: Vec<TreeEntry>,
    domains: Vec<PageDomain>,
    quick_access: Vec<SearchItem>,
    search_index: Value,
    search_limit: usize,
    min_query_chars: usize,
}

#[derive(Serialize)]
struct PageRoot {
    id: String,
    name: String,
    description: String,
}

#[derive(Serialize)]
struct PageSection {
    id: String,
    name: String,
    description: String,
    nodes: usize,
}

#[derive(Serialize)]
struct PageDomain {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    icon: &'static str,
    url: String,
}

#[derive(Serialize)]
struct TreeEntry {
    anchor: String,
    id: String,
    name: String,
    description: String,
    children: Vec<TreeEntry>,
}
