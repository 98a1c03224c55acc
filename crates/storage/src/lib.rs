use std::collections::HashMap;
use std::fs;
use std::path::Path;

use docstage_core::{Document, DocumentSummary, StagingError, StagingResult};
use walkdir::WalkDir;

const STAGED_EXTENSIONS: &[&str] = &["md", "markdown", "txt"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loaded {
    pub summary: DocumentSummary,
    pub replaced: bool,
}

/// Documents keyed by name, kept in first-load order.
///
/// Reloading a name swaps the content in place, so listings and searches keep
/// the position the name was first loaded at.
#[derive(Debug, Clone, Default)]
pub struct DocumentStore {
    docs: Vec<Document>,
    positions: HashMap<String, usize>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, document: Document) -> Loaded {
        let summary = document.summary();

        match self.positions.get(&document.name) {
            Some(&idx) => {
                self.docs[idx] = document;
                Loaded {
                    summary,
                    replaced: true,
                }
            }
            None => {
                self.positions
                    .insert(document.name.clone(), self.docs.len());
                self.docs.push(document);
                Loaded {
                    summary,
                    replaced: false,
                }
            }
        }
    }

    pub fn load(&mut self, path: impl AsRef<Path>) -> StagingResult<Loaded> {
        let document = read_document(path.as_ref())?;
        Ok(self.insert(document))
    }

    /// Loads every staged text file under `root`, walking in file-name order.
    ///
    /// All files are read before any is inserted, so a walk or read failure
    /// leaves the store untouched.
    pub fn load_dir(&mut self, root: impl AsRef<Path>) -> StagingResult<Vec<Loaded>> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(StagingError::SourceNotFound(root.to_path_buf()));
        }

        let mut documents = Vec::new();
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry.map_err(|err| walk_error(root, err))?;
            if entry.file_type().is_file() && is_staged_file(entry.path()) {
                documents.push(read_document(entry.path())?);
            }
        }

        Ok(documents
            .into_iter()
            .map(|document| self.insert(document))
            .collect())
    }

    pub fn get(&self, name: &str) -> StagingResult<&Document> {
        self.positions
            .get(name)
            .map(|&idx| &self.docs[idx])
            .ok_or_else(|| StagingError::DocumentNotLoaded(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.docs.iter()
    }

    pub fn summaries(&self) -> Vec<DocumentSummary> {
        self.docs.iter().map(Document::summary).collect()
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

pub fn read_document(path: &Path) -> StagingResult<Document> {
    if !path.is_file() {
        return Err(StagingError::SourceNotFound(path.to_path_buf()));
    }

    let text = fs::read_to_string(path).map_err(|source| StagingError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string());

    Ok(Document::new(name, path.display().to_string(), text))
}

fn walk_error(root: &Path, err: walkdir::Error) -> StagingError {
    let path = err
        .path()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| root.to_path_buf());
    StagingError::Read {
        path,
        source: err.into(),
    }
}

fn is_staged_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| STAGED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}
