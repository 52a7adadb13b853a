//! Loading framework text inputs from a source directory.
//!
//! Expected layout:
//!
//! ```text
//! <root>/O-ORGANIZATIONAL.txt
//! <root>/P-PROCEDURAL.txt
//! <root>/I-INTELLIGENT.txt
//! <root>/M-MACHINE.txt
//! <root>/E-EXECUTING.txt
//! <root>/T-TECHNOLOGICAL/*.txt   (read in file-name order)
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use globset::{Glob, GlobMatcher};

use crate::app::generator::FrameworkSources;
use crate::infra::config::Config;

const TECHNICAL_DIR: &str = "T-TECHNOLOGICAL";
const TEXT_EXTENSION: &str = "txt";

/// Reads section texts from a directory following the layout above.
#[derive(Debug, Clone)]
pub struct SourceLoader {
    root: PathBuf,
    technical: GlobMatcher,
}

impl SourceLoader {
    pub fn new(root: impl Into<PathBuf>, technical_glob: &str) -> Result<Self> {
        let technical = Glob::new(technical_glob)
            .with_context(|| format!("invalid technical source glob '{technical_glob}'"))?
            .compile_matcher();
        Ok(Self {
            root: root.into(),
            technical,
        })
    }

    pub fn from_config(root: impl Into<PathBuf>, config: &Config) -> Result<Self> {
        Self::new(root, config.sources.technical_glob())
    }

    /// Load every section. Missing section files read as empty text.
    pub fn load(&self) -> Result<FrameworkSources> {
        if !self.root.is_dir() {
            anyhow::bail!("source directory not found: {}", self.root.display());
        }

        let sources = FrameworkSources {
            organizational: self.read_section("O-ORGANIZATIONAL")?,
            procedural: self.read_section("P-PROCEDURAL")?,
            intelligent: self.read_section("I-INTELLIGENT")?,
            machine: self.read_section("M-MACHINE")?,
            executing: self.read_section("E-EXECUTING")?,
            technical: self.read_technical()?,
        };

        tracing::info!(
            root = %self.root.display(),
            technical = sources.technical.len(),
            "loaded framework sources"
        );
        Ok(sources)
    }

    fn read_section(&self, code: &str) -> Result<String> {
        let path = self.root.join(format!("{code}.{TEXT_EXTENSION}"));
        if !path.exists() {
            tracing::warn!(path = %path.display(), "section source missing; using empty text");
            return Ok(String::new());
        }
        read_text(&path)
    }

    fn read_technical(&self) -> Result<Vec<String>> {
        let dir = self.root.join(TECHNICAL_DIR);
        if !dir.is_dir() {
            tracing::warn!(path = %dir.display(), "technical source directory missing");
            return Ok(Vec::new());
        }

        let mut paths = Vec::new();
        for entry in fs::read_dir(&dir)
            .with_context(|| format!("failed to list technical sources in {}", dir.display()))?
        {
            let entry = entry?;
            let path = entry.path();
            if path.is_file() && self.technical.is_match(entry.file_name()) {
                paths.push(path);
            }
        }
        paths.sort();

        paths.iter().map(|path| read_text(path)).collect()
    }
}

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("failed to read framework source {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_sections_and_sorted_technical_files() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let root = temp.path();
        fs::write(root.join("O-ORGANIZATIONAL.txt"), "CA-O-001-GOVERNANCE")?;
        fs::write(root.join("E-EXECUTING.txt"), "CA-E-001-ORCHESTRATION")?;
        fs::create_dir_all(root.join(TECHNICAL_DIR))?;
        fs::write(root.join("T-TECHNOLOGICAL/02-mechanical.txt"), "CA-M-001-HYDRAULICS")?;
        fs::write(root.join("T-TECHNOLOGICAL/01-airframes.txt"), "CA-A-001-AIRFRAME")?;
        fs::write(root.join("T-TECHNOLOGICAL/notes.md"), "ignored")?;

        let sources = SourceLoader::new(root, "*.txt")?.load()?;

        assert_eq!(sources.organizational, "CA-O-001-GOVERNANCE");
        assert_eq!(sources.executing, "CA-E-001-ORCHESTRATION");
        assert_eq!(sources.procedural, "");
        assert_eq!(
            sources.technical,
            vec!["CA-A-001-AIRFRAME".to_string(), "CA-M-001-HYDRAULICS".to_string()]
        );
        Ok(())
    }

    #[test]
    fn missing_root_is_an_error() {
        let result = SourceLoader::new("/definitely/not/here", "*.txt").and_then(|l| l.load());
        assert!(result.is_err());
    }

    #[test]
    fn invalid_glob_is_rejected() {
        assert!(SourceLoader::new(".", "[").is_err());
    }
}
