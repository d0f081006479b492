use crate::{DocId, DocumentStatus};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A document as it appears in corpus files and request bodies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputDocument {
    pub id: DocId,
    pub text: String,
    #[serde(default)]
    pub status: DocumentStatus,
    #[serde(default)]
    pub ratings: Vec<i32>,
}

/// Load documents from a `.json` file (array or single object), a `.jsonl`
/// file, or a directory searched recursively for both, in path order.
pub fn load_documents<P: AsRef<Path>>(path: P) -> Result<Vec<InputDocument>> {
    let path = path.as_ref();
    let mut docs = Vec::new();
    for file in corpus_files(path)? {
        let loaded = if has_extension(&file, "jsonl") {
            load_jsonl(&file)
        } else {
            load_json(&file)
        }
        .with_context(|| format!("reading corpus file {}", file.display()))?;
        tracing::debug!(file = %file.display(), documents = loaded.len(), "loaded corpus file");
        docs.extend(loaded);
    }
    Ok(docs)
}

fn corpus_files(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        anyhow::bail!("corpus path {} does not exist", path.display());
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = entry?;
        let p = entry.path();
        if p.is_file() && (has_extension(p, "json") || has_extension(p, "jsonl")) {
            files.push(p.to_path_buf());
        }
    }
    Ok(files)
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some(ext)
}

fn load_jsonl(file: &Path) -> Result<Vec<InputDocument>> {
    let reader = BufReader::new(File::open(file)?);
    let mut docs = Vec::new();
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let doc: InputDocument =
            serde_json::from_str(&line).with_context(|| format!("line {}", lineno + 1))?;
        docs.push(doc);
    }
    Ok(docs)
}

fn load_json(file: &Path) -> Result<Vec<InputDocument>> {
    let reader = BufReader::new(File::open(file)?);
    let json: serde_json::Value = serde_json::from_reader(reader)?;
    let docs: Vec<InputDocument> = match json {
        serde_json::Value::Array(_) => serde_json::from_value(json)?,
        serde_json::Value::Object(_) => vec![serde_json::from_value(json)?],
        other => anyhow::bail!("expected a document or an array of documents, got {other}"),
    };
    Ok(docs)
}
