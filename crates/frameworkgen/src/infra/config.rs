//! Configuration management utilities.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dirs_next::config_dir;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::app::catalog::{DEFAULT_DOMAIN_BASE, DEFAULT_SEARCH_LIMIT};
use crate::app::generator::RootInfo;
use crate::domain::model::GeneratorOptions;

static DEFAULT_CONFIG: Lazy<&'static str> =
    Lazy::new(|| include_str!("../../assets/default-config.toml"));
static DEFAULT_WORKSPACE_CONFIG_PATH: &str = ".frameworkgen/config.toml";

/// Layered configuration loaded from defaults, user, workspace, and env.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub generator: Generator,
    #[serde(default)]
    pub sources: Sources,
    #[serde(default)]
    pub site: Site,
}

/// Tree generation settings. Unset keys fall back to built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Generator {
    #[serde(default)]
    include_descriptions: Option<bool>,
    #[serde(default)]
    max_depth: Option<usize>,
    #[serde(default)]
    root_id: Option<String>,
    #[serde(default)]
    root_name: Option<String>,
    #[serde(default)]
    root_description: Option<String>,
    #[serde(default)]
    json_indent: Option<usize>,
}

impl Generator {
    fn default_json_indent() -> usize {
        2
    }

    pub fn include_descriptions(&self) -> bool {
        self.include_descriptions.unwrap_or(true)
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    pub fn json_indent(&self) -> usize {
        self.json_indent.unwrap_or_else(Self::default_json_indent)
    }

    /// Options passed to the tree builder.
    pub fn options(&self) -> GeneratorOptions {
        GeneratorOptions {
            include_descriptions: self.include_descriptions(),
            max_depth: self.max_depth(),
        }
    }

    /// Root node identity with configured overrides applied.
    pub fn root(&self) -> RootInfo {
        let defaults = RootInfo::default();
        RootInfo {
            id: self.root_id.clone().unwrap_or(defaults.id),
            name: self.root_name.clone().unwrap_or(defaults.name),
            description: self
                .root_description
                .clone()
                .unwrap_or(defaults.description),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Sources {
    /// Glob selecting technical domain files inside `T-TECHNOLOGICAL/`.
    #[serde(default)]
    technical_glob: Option<String>,
}

impl Sources {
    pub fn technical_glob(&self) -> &str {
        self.technical_glob.as_deref().unwrap_or("*.txt")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Site {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    output_dir: Option<PathBuf>,
    #[serde(default)]
    domain_base: Option<String>,
    #[serde(default)]
    search_limit: Option<usize>,
}

impl Site {
    pub fn title(&self) -> &str {
        self.title
            .as_deref()
            .unwrap_or("Interactive OPTIM Framework Index")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("site"))
    }

    pub fn domain_base(&self) -> &str {
        self.domain_base.as_deref().unwrap_or(DEFAULT_DOMAIN_BASE)
    }

    pub fn search_limit(&self) -> usize {
        self.search_limit.unwrap_or(DEFAULT_SEARCH_LIMIT)
    }
}

/// Environment overrides for critical settings.
#[derive(Debug, Default, Clone)]
pub struct EnvOverrides {
    output_dir: Option<String>,
    site_title: Option<String>,
}

impl EnvOverrides {
    fn from_env() -> Self {
        Self {
            output_dir: env::var("FRAMEWORKGEN_OUTPUT_DIR").ok(),
            site_title: env::var("FRAMEWORKGEN_SITE_TITLE").ok(),
        }
    }

    #[cfg(test)]
    fn for_tests(output_dir: &str, site_title: &str) -> Self {
        Self {
            output_dir: Some(output_dir.to_owned()),
            site_title: Some(site_title.to_owned()),
        }
    }
}

impl Config {
    /// Load configuration from defaults, user/global config, workspace config, and env overrides.
    pub fn load() -> Result<Self> {
        let env = EnvOverrides::from_env();
        let global = global_config_path();
        let workspace = workspace_config_path()?;
        Self::load_with_layers(global, workspace, env)
    }

    fn load_with_layers(
        global: Option<PathBuf>,
        workspace: Option<PathBuf>,
        env_overrides: EnvOverrides,
    ) -> Result<Self> {
        let mut layers: Vec<Config> = Vec::new();

        layers.push(Self::from_str(&DEFAULT_CONFIG)?);

        if let Some(global_path) = global.filter(|path| path.exists()) {
            tracing::debug!(path = %global_path.display(), "loading user config");
            layers.push(Self::from_file(&global_path)?);
        }

        if let Some(workspace_path) = workspace.filter(|path| path.exists()) {
            tracing::debug!(path = %workspace_path.display(), "loading workspace config");
            layers.push(Self::from_file(&workspace_path)?);
        }

        let merged = layers.into_iter().reduce(Config::merge).unwrap_or_default();
        Ok(apply_env_overrides(merged, env_overrides))
    }

    fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_str(&data)
            .with_context(|| format!("invalid config file: {}", path.display()))
    }

    fn from_str(contents: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(contents).with_context(|| "failed to parse TOML config".to_string())?;
        Ok(config)
    }

    fn merge(self, other: Self) -> Self {
        Self {
            generator: merge_generator(self.generator, other.generator),
            sources: merge_sources(self.sources, other.sources),
            site: merge_site(self.site, other.site),
        }
    }
}

fn merge_generator(mut base: Generator, overlay: Generator) -> Generator {
    if let Some(value) = overlay.include_descriptions {
        base.include_descriptions = Some(value);
    }
    if let Some(value) = overlay.max_depth {
        base.max_depth = Some(value);
    }
    if let Some(value) = overlay.root_id {
        base.root_id = Some(value);
    }
    if let Some(value) = overlay.root_name {
        base.root_name = Some(value);
    }
    if let Some(value) = overlay.root_description {
        base.root_description = Some(value);
    }
    if let Some(value) = overlay.json_indent {
        base.json_indent = Some(value);
    }
    base
}

fn merge_sources(mut base: Sources, overlay: Sources) -> Sources {
    if let Some(value) = overlay.technical_glob {
        base.technical_glob = Some(value);
    }
    base
}

fn merge_site(mut base: Site, overlay: Site) -> Site {
    if let Some(value) = overlay.title {
        base.title = Some(value);
    }
    if let Some(value) = overlay.output_dir {
        base.output_dir = Some(value);
    }
    if let Some(value) = overlay.domain_base {
        base.domain_base = Some(value);
    }
    if let Some(value) = overlay.search_limit {
        base.search_limit = Some(value);
    }
    base
}

fn global_config_path() -> Option<PathBuf> {
    config_dir().map(|base| base.join("frameworkgen/config.toml"))
}

fn workspace_config_path() -> Result<Option<PathBuf>> {
    let cwd = env::current_dir()?;
    let root = find_repo_root(&cwd).unwrap_or(cwd);
    Ok(Some(root.join(DEFAULT_WORKSPACE_CONFIG_PATH)))
}

fn find_repo_root(start: &Path) -> Option<PathBuf> {
    let mut current = start;
    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        match current.parent() {
            Some(parent) => current = parent,
            None => return None,
        }
    }
}

fn apply_env_overrides(mut config: Config, env: EnvOverrides) -> Config {
    if let Some(output_dir) = env.output_dir {
        config.site.output_dir = Some(PathBuf::from(output_dir));
    }
    if let Some(title) = env.site_title {
        config.site.title = Some(title);
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_uses_defaults_when_no_files() {
        let config = Config::load_with_layers(None, None, EnvOverrides::default())
            .expect("load default config");
        assert_eq!(config.site.title(), "Interactive OPTIM Framework Index");
        assert_eq!(config.site.search_limit(), 8);
        assert_eq!(config.sources.technical_glob(), "*.txt");
        assert!(config.generator.include_descriptions());
        assert_eq!(config.generator.json_indent(), 2);
        assert_eq!(config.generator.root().id, "AMPEL360-H2-BWB-Q");
    }

    #[test]
    fn merge_global_and_workspace() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let global = temp.path().join("config.toml");
        fs::write(
            &global,
            r#"
[generator]
include_descriptions = false
root_name = "Demo Framework"
[site]
search_limit = 5
"#,
        )?;

        let workspace_dir = temp.path().join("repo");
        fs::create_dir_all(workspace_dir.join(".frameworkgen"))?;
        fs::create_dir_all(workspace_dir.join(".git"))?;
        fs::write(
            workspace_dir.join(".frameworkgen/config.toml"),
            r#"
[generator]
max_depth = 3
[sources]
technical_glob = "*.ca"
"#,
        )?;

        let global_path = Some(global);
        let workspace_path = Some(workspace_dir.join(".frameworkgen/config.toml"));

        let config =
            Config::load_with_layers(global_path, workspace_path, EnvOverrides::default())?;

        assert!(!config.generator.include_descriptions());
        assert_eq!(config.generator.max_depth(), Some(3));
        assert_eq!(config.generator.root().name, "Demo Framework");
        assert_eq!(config.generator.root().id, "AMPEL360-H2-BWB-Q");
        assert_eq!(config.site.search_limit(), 5);
        assert_eq!(config.sources.technical_glob(), "*.ca");

        Ok(())
    }

    #[test]
    fn env_overrides_take_precedence() -> Result<()> {
        let overrides = EnvOverrides::for_tests("public", "Program Index");
        let config = Config::load_with_layers(None, None, overrides)?;
        assert_eq!(config.site.output_dir(), PathBuf::from("public"));
        assert_eq!(config.site.title(), "Program Index");
        Ok(())
    }

    #[test]
    fn workspace_can_restore_builtin_site_values() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let global = temp.path().join("config.toml");
        fs::write(
            &global,
            r#"
[sources]
technical_glob = "*.ca"
[site]
title = "Global"
search_limit = 5
"#,
        )?;
        let workspace = temp.path().join("workspace.toml");
        fs::write(
            &workspace,
            r#"
[sources]
technical_glob = "*.txt"
[site]
title = "Interactive OPTIM Framework Index"
search_limit = 8
"#,
        )?;

        let config =
            Config::load_with_layers(Some(global), Some(workspace), EnvOverrides::default())?;

        assert_eq!(config.site.search_limit(), 8);
        assert_eq!(config.site.title(), "Interactive OPTIM Framework Index");
        assert_eq!(config.sources.technical_glob(), "*.txt");
        Ok(())
    }

    #[test]
    fn invalid_config_returns_error() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let file = temp.path().join("broken.toml");
        fs::write(&file, "this is not toml")?;
        let result = Config::from_file(&file);
        assert!(result.is_err());
        Ok(())
    }

    #[test]
    fn finds_repo_root_from_nested_directory() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let nested = temp.path().join("a/b/c");
        fs::create_dir_all(&nested)?;
        fs::create_dir_all(temp.path().join(".git"))?;
        assert_eq!(find_repo_root(&nested), Some(temp.path().to_path_buf()));
        Ok(())
    }
}
