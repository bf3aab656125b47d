//! TOML level catalog parser.
//!
//! Loads catalogs from TOML files and directories, and lints them for
//! authoring mistakes that are legal but probably unintended.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::catalog::Catalog;
use crate::model::{AssetRef, Level};

/// Intermediate TOML structure for parsing catalog files.
#[derive(Debug, Deserialize)]
struct TomlCatalogFile {
    #[serde(default)]
    catalog: Option<TomlCatalogHeader>,
    #[serde(default)]
    levels: Vec<TomlLevel>,
}

#[derive(Debug, Default, Deserialize)]
struct TomlCatalogHeader {
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlLevel {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    intro_animation: Option<String>,
    questions: Vec<String>,
    answers: Vec<String>,
    correct_sequence: Vec<usize>,
    wrong_answers: Vec<String>,
    #[serde(default)]
    question_images: Vec<String>,
    #[serde(default)]
    answer_images: Vec<String>,
    #[serde(default)]
    wrong_images: Vec<String>,
    #[serde(default)]
    wrong_answer_animations: Vec<String>,
}

// An empty string stands in for "no asset".
fn asset(handle: String) -> Option<AssetRef> {
    if handle.trim().is_empty() {
        None
    } else {
        Some(AssetRef::new(handle))
    }
}

fn assets(handles: Vec<String>) -> Vec<Option<AssetRef>> {
    handles.into_iter().map(asset).collect()
}

impl From<TomlLevel> for Level {
    fn from(l: TomlLevel) -> Self {
        Level {
            id: l.id,
            name: l.name.filter(|n| !n.trim().is_empty()),
            intro_animation: l.intro_animation.and_then(asset),
            questions: l.questions,
            answers: l.answers,
            correct_sequence: l.correct_sequence,
            wrong_answers: l.wrong_answers,
            question_images: assets(l.question_images),
            answer_images: assets(l.answer_images),
            wrong_images: assets(l.wrong_images),
            wrong_answer_animations: l
                .wrong_answer_animations
                .into_iter()
                .filter_map(asset)
                .collect(),
        }
    }
}

fn parse_file_contents(content: &str, source_path: &Path) -> Result<(TomlCatalogHeader, Vec<Level>)> {
    let parsed: TomlCatalogFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let levels = parsed.levels.into_iter().map(Level::from).collect();
    Ok((parsed.catalog.unwrap_or_default(), levels))
}

/// Parse a single TOML file into a validated `Catalog`.
pub fn parse_catalog(path: &Path) -> Result<Catalog> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog file: {}", path.display()))?;

    parse_catalog_str(&content, path)
}

/// Parse a TOML string into a validated `Catalog` (useful for testing).
pub fn parse_catalog_str(content: &str, source_path: &Path) -> Result<Catalog> {
    let (header, levels) = parse_file_contents(content, source_path)?;

    let catalog = Catalog::new(levels)
        .with_context(|| format!("invalid level content in {}", source_path.display()))?;

    tracing::debug!(
        source = %source_path.display(),
        levels = catalog.len(),
        "parsed catalog"
    );
    Ok(catalog.with_metadata(header.name, header.description))
}

/// Load every `.toml` file under `dir` into one catalog.
///
/// Files are read in path order, so level order follows file names. Any file
/// that fails to parse fails the whole load.
pub fn load_catalog_directory(dir: &Path) -> Result<Catalog> {
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut files = Vec::new();
    collect_toml_files(dir, &mut files)?;
    files.sort();

    let mut levels = Vec::new();
    let mut description = String::new();
    for path in &files {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read catalog file: {}", path.display()))?;
        let (header, file_levels) = parse_file_contents(&content, path)?;
        if description.is_empty() {
            description = header.description;
        }
        levels.extend(file_levels);
    }

    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let catalog = Catalog::new(levels)
        .with_context(|| format!("invalid level content in {}", dir.display()))?;

    tracing::debug!(
        dir = %dir.display(),
        files = files.len(),
        levels = catalog.len(),
        "loaded catalog directory"
    );
    Ok(catalog.with_metadata(name, description))
}

fn collect_toml_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            collect_toml_files(&path, out)?;
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            out.push(path);
        }
    }
    Ok(())
}

/// Load a catalog from a file or a directory of files.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    if path.is_dir() {
        load_catalog_directory(path)
    } else {
        parse_catalog(path)
    }
}

/// A warning from catalog linting.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The level ID (if applicable).
    pub level_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Lint a catalog for content that is valid but likely unintended.
pub fn lint_catalog(catalog: &Catalog) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if catalog.is_empty() {
        warnings.push(ValidationWarning {
            level_id: None,
            message: "catalog has no levels; a session completes immediately".into(),
        });
    }

    for level in catalog.levels() {
        let warn = |message: String| ValidationWarning {
            level_id: Some(level.id.clone()),
            message,
        };

        if level.questions.is_empty() {
            warnings.push(warn("level has no questions and will be skipped".into()));
        }

        // Extra image entries
        for (field, images, annotated, of) in [
            ("question_images", level.question_images.len(), level.questions.len(), "questions"),
            ("answer_images", level.answer_images.len(), level.answers.len(), "answers"),
            ("wrong_images", level.wrong_images.len(), level.wrong_answers.len(), "wrong_answers"),
        ] {
            if images > annotated {
                warnings.push(warn(format!(
                    "{field} has {images} entries but {of} has {annotated}; extras are ignored"
                )));
            }
        }

        // Correct values that do not exclude anything from the wrong pool
        for (question, &value) in level.correct_sequence.iter().enumerate() {
            if value >= level.wrong_answers.len() {
                warnings.push(warn(format!(
                    "question {question}: correct value {value} is outside wrong_answers \
                     (0..{}); every wrong answer is eligible",
                    level.wrong_answers.len()
                )));
            }
        }
    }

    warnings
}
