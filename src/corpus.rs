//! Corpus loading.
//!
//! The content directory holds one JSON file per parsed document:
//!
//! ```json
//! {
//!   "id": "posts/intro",
//!   "kind": "markdown",
//!   "metadata": { "title": "Intro", "series": "Getting Started", "order": 1 },
//!   "tree": { "type": "root", "children": [ ... ] }
//! }
//! ```
//!
//! `id` defaults to the file path relative to the content directory and
//! `kind` to `markdown`. Each document's fingerprint is the blake3 digest
//! of its file.

use anyhow::{Context, Result};
use seriesnav_core::{Document, Tree};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::{
    borrow::Cow,
    fs,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct DocumentFile {
    id: Option<String>,
    kind: Option<String>,
    #[serde(default)]
    metadata: Map<String, Value>,
    tree: Tree,
}

/// Where a document came from and its parsed tree.
#[derive(Debug, Clone)]
pub struct Entry {
    /// Path relative to the content directory
    pub source: PathBuf,
    pub tree: Tree,
}

/// All documents of one build; `documents[i]` belongs to `entries[i]`.
#[derive(Debug, Default)]
pub struct LoadedCorpus {
    pub documents: Vec<Document>,
    pub entries: Vec<Entry>,
}

impl LoadedCorpus {
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn find(&self, id: &str) -> Option<&Document> {
        self.documents.iter().find(|doc| doc.id == id)
    }
}

impl seriesnav_core::Corpus for LoadedCorpus {
    fn documents(&self) -> Cow<'_, [Document]> {
        Cow::Borrowed(&self.documents)
    }
}

/// Load every `*.json` document under `content`, in path order.
pub fn load_corpus(content: &Path) -> Result<LoadedCorpus> {
    let mut corpus = LoadedCorpus::default();

    let files = WalkDir::new(content)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "json"));

    for file in files {
        let path = file.path();
        let source = path.strip_prefix(content).unwrap_or(path).to_path_buf();
        let (document, tree) =
            read_document(path, &source).with_context(|| format!("Failed to load {}", path.display()))?;
        corpus.documents.push(document);
        corpus.entries.push(Entry { source, tree });
    }

    Ok(corpus)
}

fn read_document(path: &Path, source: &Path) -> Result<(Document, Tree)> {
    let bytes = fs::read(path)?;
    let file: DocumentFile = serde_json::from_slice(&bytes)?;

    let id = file.id.unwrap_or_else(|| default_id(source));
    let mut document = Document::new(id, file.metadata);
    if let Some(kind) = file.kind {
        document = document.with_kind(kind);
    }
    document.fingerprint = hex::encode(blake3::hash(&bytes).as_bytes());

    Ok((document, file.tree))
}

/// Relative path with `/` separators on every platform.
fn default_id(source: &Path) -> String {
    source
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn write(dir: &Path, rel: &str, value: Value) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, serde_json::to_vec(&value).unwrap()).unwrap();
    }

    #[test]
    fn test_load_corpus() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "posts/b.json",
            json!({ "metadata": { "title": "B", "series": "S" }, "tree": { "type": "root" } }),
        );
        write(
            dir.path(),
            "posts/a.json",
            json!({ "id": "custom", "kind": "mdx", "metadata": {}, "tree": { "type": "root" } }),
        );
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let corpus = load_corpus(dir.path()).unwrap();
        assert_eq!(corpus.len(), 2);

        let a = &corpus.documents[0];
        assert_eq!(a.id, "custom");
        assert!(!a.is_content());
        assert_eq!(a.fingerprint.len(), 64);

        let b = corpus.find("posts/b.json").unwrap();
        assert!(b.is_content());
        assert_eq!(b.title(), Some("B"));
        assert_eq!(corpus.entries[1].source, PathBuf::from("posts/b.json"));
    }

    #[test]
    fn test_invalid_document_names_file() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "broken.json", json!({ "metadata": {} }));

        let err = load_corpus(dir.path()).unwrap_err();
        assert!(format!("{err}").contains("broken.json"));
    }
}
