use crate::error::ManifestError;
use log::debug;
use serde::Deserialize;
use serde_json::error::Category;
use std::fs;
use std::path::{Path, PathBuf};

pub const MANIFEST_FILE_NAME: &str = "index.json";

/// Project configuration read from `index.json`.
///
/// Every field is optional. After [`Manifest::load`] the `input` and `output`
/// paths are resolved against the manifest's own directory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Manifest {
    pub input: PathBuf,
    pub output: PathBuf,
    pub ignore: Vec<String>,
    /// Indent output JSON with two spaces. `format` is the older name.
    #[serde(alias = "format")]
    pub pretty: bool,
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            input: PathBuf::from("./"),
            output: PathBuf::from("./"),
            ignore: Vec::new(),
            pretty: false,
        }
    }
}

impl Manifest {
    /// Reads, validates and resolves the manifest at `path`.
    ///
    /// # Errors
    /// Fails when the file is not named `index.json`, cannot be read, is not
    /// JSON, or does not fit the schema.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        if path.file_name().map_or(true, |name| name != MANIFEST_FILE_NAME) {
            return Err(ManifestError::WrongFileName {
                path: path.to_path_buf(),
            });
        }

        let text = fs::read_to_string(path).map_err(|source| ManifestError::NotFound {
            path: path.to_path_buf(),
            source,
        })?;
        let manifest = Self::from_json(&text, path)?;

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        Ok(manifest.resolve_paths(base))
    }

    /// Parses manifest JSON without touching the file system. `path` is only
    /// used in errors.
    pub fn from_json(text: &str, path: &Path) -> Result<Self, ManifestError> {
        serde_json::from_str(text).map_err(|source| match source.classify() {
            Category::Data => ManifestError::Schema {
                path: path.to_path_buf(),
                source,
            },
            _ => ManifestError::Syntax {
                path: path.to_path_buf(),
                source,
            },
        })
    }

    fn resolve_paths(mut self, base: &Path) -> Self {
        self.input = base.join(&self.input);
        self.output = base.join(&self.output);
        self
    }

    /// Immediate subdirectories of `input` that take part in a merge, sorted
    /// by name. Hidden folders and folders listed in `ignore` are skipped.
    ///
    /// # Errors
    /// Fails when `input` cannot be listed.
    pub fn folders(&self) -> Result<Vec<String>, ManifestError> {
        let io_error = |source: std::io::Error| ManifestError::Io {
            path: self.input.clone(),
            source,
        };

        let mut folders = Vec::new();
        for entry in fs::read_dir(&self.input).map_err(io_error)? {
            let entry = entry.map_err(io_error)?;
            if !entry.path().is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') || self.ignore.contains(&name) {
                debug!("skipping folder {name}");
                continue;
            }
            folders.push(name);
        }
        folders.sort();
        Ok(folders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn from_json(text: &str) -> Result<Manifest, ManifestError> {
        Manifest::from_json(text, Path::new("index.json"))
    }

    #[test]
    fn test_defaults() {
        assert_eq!(from_json("{}").unwrap(), Manifest::default());
    }

    #[test]
    fn test_all_fields() {
        let manifest =
            from_json(r#"{"input":"./src","output":"./dist","ignore":["drafts"],"pretty":true}"#)
                .unwrap();
        assert_eq!(manifest.input, PathBuf::from("./src"));
        assert_eq!(manifest.output, PathBuf::from("./dist"));
        assert_eq!(manifest.ignore, vec!["drafts"]);
        assert!(manifest.pretty);
    }

    #[test]
    fn test_format_alias() {
        assert!(from_json(r#"{"format":true}"#).unwrap().pretty);
    }

    #[test]
    fn test_schema_error() {
        assert!(matches!(
            from_json(r#"{"ignore":"drafts"}"#),
            Err(ManifestError::Schema { .. })
        ));
        assert!(matches!(
            from_json(r#"{"pretty":"yes"}"#),
            Err(ManifestError::Schema { .. })
        ));
    }

    #[test]
    fn test_syntax_error() {
        assert!(matches!(
            from_json(r#"{"input": "#),
            Err(ManifestError::Syntax { .. })
        ));
        assert!(matches!(
            from_json("not json"),
            Err(ManifestError::Syntax { .. })
        ));
    }

    #[test]
    fn test_wrong_file_name() {
        assert!(matches!(
            Manifest::load("project/config.json"),
            Err(ManifestError::WrongFileName { .. })
        ));
    }

    #[test]
    fn test_missing_manifest() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            Manifest::load(dir.path().join("index.json")),
            Err(ManifestError::NotFound { .. })
        ));
    }

    #[test]
    fn test_paths_resolve_against_manifest_dir() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("index.json");
        fs::write(&path, r#"{"input":"src","output":"dist"}"#).unwrap();
        let manifest = Manifest::load(&path).unwrap();
        assert_eq!(manifest.input, dir.path().join("src"));
        assert_eq!(manifest.output, dir.path().join("dist"));
    }

    #[test]
    fn test_folders_are_filtered_and_sorted() {
        let dir = tempdir().unwrap();
        for name in ["ja", "en", "drafts", ".git"] {
            fs::create_dir(dir.path().join(name)).unwrap();
        }
        fs::write(dir.path().join("notes.txt"), "").unwrap();

        let manifest = Manifest {
            input: dir.path().to_path_buf(),
            ignore: vec!["drafts".to_string()],
            ..Manifest::default()
        };
        assert_eq!(manifest.folders().unwrap(), vec!["en", "ja"]);
    }
}
