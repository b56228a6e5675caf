use crate::ast::RuleGroup;
use crate::error::{MergeError, XprError};
use crate::hash::ContentHash;
use crate::manifest::Manifest;
use crate::parser::compile;
use crate::translation::{folder_key, parse_translation};
use log::{debug, info};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const RULE_FILE: &str = "rule.xpr";
pub const TRANSLATION_FILE: &str = "trans.json";
pub const RULE_OUTPUT: &str = "rule.json";
pub const TRANSLATION_OUTPUT: &str = "trans.json";
pub const TIMESTAMP_OUTPUT: &str = "lastUpdate.txt";

/// What a merge did to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Both aggregates hash the same as the files already written.
    UpToDate,
    /// At least one aggregate changed. The flags say which output files were
    /// rewritten; the timestamp marker is always rewritten.
    Updated {
        rule: bool,
        translation: bool,
        timestamp: i64,
    },
}

impl Display for MergeOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MergeOutcome::UpToDate => write!(f, "no update needed"),
            MergeOutcome::Updated { .. } => write!(f, "merge completed"),
        }
    }
}

/// Both aggregates of one merge, serialized and ready to compare.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedOutput {
    pub rule: String,
    pub translation: String,
}

/// Merges the rule and translation files of a set of folders into the
/// manifest's output directory.
///
/// Every run parses every folder from scratch. Nothing is written unless all
/// folders parse, and an output file is only rewritten when its content hash
/// changed.
pub struct MergeOrchestrator<'m> {
    manifest: &'m Manifest,
}

impl<'m> MergeOrchestrator<'m> {
    pub fn new(manifest: &'m Manifest) -> Self {
        Self { manifest }
    }

    /// Runs a merge over `folders`, which are names of subdirectories of the
    /// manifest's input directory, in output order.
    pub fn run(&self, folders: &[String]) -> Result<MergeOutcome, MergeError> {
        let merged = self.build(folders)?;

        let rule_path = self.output_path(RULE_OUTPUT);
        let translation_path = self.output_path(TRANSLATION_OUTPUT);
        let rule_changed = has_changed(&rule_path, &merged.rule)?;
        let translation_changed = has_changed(&translation_path, &merged.translation)?;

        if !rule_changed && !translation_changed {
            info!("no update needed");
            return Ok(MergeOutcome::UpToDate);
        }

        fs::create_dir_all(&self.manifest.output).map_err(|source| MergeError::Io {
            path: self.manifest.output.clone(),
            source,
        })?;
        if rule_changed {
            write_file(&rule_path, &merged.rule)?;
        }
        if translation_changed {
            write_file(&translation_path, &merged.translation)?;
        }
        let timestamp = chrono::Utc::now().timestamp_millis();
        write_file(&self.output_path(TIMESTAMP_OUTPUT), &timestamp.to_string())?;

        info!(
            "merge completed ({} folders, rule changed: {rule_changed}, translation changed: {translation_changed})",
            folders.len()
        );
        Ok(MergeOutcome::Updated {
            rule: rule_changed,
            translation: translation_changed,
            timestamp,
        })
    }

    /// Reads, parses and serializes every folder without writing anything.
    pub fn build(&self, folders: &[String]) -> Result<MergedOutput, MergeError> {
        let mut rules: Vec<RuleGroup> = Vec::with_capacity(folders.len());
        let mut translations: BTreeMap<String, Value> = BTreeMap::new();

        for folder in folders {
            rules.push(self.read_rule_group(folder)?);
            translations.insert(folder_key(folder), self.read_translation(folder)?);
        }

        Ok(MergedOutput {
            rule: self.to_json(&rules, RULE_OUTPUT)?,
            translation: self.to_json(&translations, TRANSLATION_OUTPUT)?,
        })
    }

    fn read_rule_group(&self, folder: &str) -> Result<RuleGroup, MergeError> {
        let path = self.input_path(folder, RULE_FILE);
        let source = read_folder_file(&path, folder, RULE_FILE)?;
        let group = compile(&source, &path.to_string_lossy()).map_err(|source| MergeError::Rule {
            folder: folder.to_string(),
            file: RULE_FILE.to_string(),
            source,
        })?;
        debug!("compiled {folder}/{RULE_FILE} as `{}`", group.metadata.name);
        Ok(group)
    }

    fn read_translation(&self, folder: &str) -> Result<Value, MergeError> {
        let path = self.input_path(folder, TRANSLATION_FILE);
        let source = read_folder_file(&path, folder, TRANSLATION_FILE)?;
        parse_translation(&source).map_err(|source| MergeError::InvalidTranslation {
            folder: folder.to_string(),
            file: TRANSLATION_FILE.to_string(),
            source,
        })
    }

    fn to_json<T: Serialize>(&self, value: &T, file: &str) -> Result<String, MergeError> {
        let text = if self.manifest.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        text.map_err(|source| MergeError::Serialize {
            file: file.to_string(),
            source,
        })
    }

    fn input_path(&self, folder: &str, file: &str) -> PathBuf {
        self.manifest.input.join(folder).join(file)
    }

    fn output_path(&self, file: &str) -> PathBuf {
        self.manifest.output.join(file)
    }
}

fn read_folder_file(path: &Path, folder: &str, file: &str) -> Result<String, MergeError> {
    fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            MergeError::MissingFile {
                folder: folder.to_string(),
                file: file.to_string(),
            }
        } else {
            MergeError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

fn has_changed(path: &Path, content: &str) -> Result<bool, MergeError> {
    let previous = ContentHash::of_file(path).map_err(|source| MergeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let next = ContentHash::of_bytes(content);
    debug!("{}: {previous} -> {next}", path.display());
    Ok(previous != next)
}

fn write_file(path: &Path, content: &str) -> Result<(), MergeError> {
    fs::write(path, content).map_err(|source| MergeError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads the manifest at `manifest_path` and merges every eligible folder.
///
/// # Errors
/// Returns the first manifest, parse or I/O failure. Nothing is written
/// unless every folder parsed.
pub fn merge(manifest_path: impl AsRef<Path>) -> Result<MergeOutcome, XprError> {
    let manifest = Manifest::load(manifest_path)?;
    let folders = manifest.folders()?;
    debug!("merging folders {folders:?}");
    Ok(MergeOrchestrator::new(&manifest).run(&folders)?)
}
