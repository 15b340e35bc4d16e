use crate::corpus::{Corpus, Document};
use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Load documents from a `.json` file (array or single object), a `.jsonl`
/// file, or a directory walked recursively for both. Directory files are read
/// in path order; any entry the walk cannot read fails the whole load.
pub fn load_documents<P: AsRef<Path>>(path: P) -> Result<Vec<Document>> {
    let path = path.as_ref();
    let mut files: Vec<PathBuf> = Vec::new();
    if path.is_dir() {
        for entry in WalkDir::new(path).follow_links(true).sort_by_file_name() {
            let entry = entry.with_context(|| format!("walking {}", path.display()))?;
            let p = entry.path();
            if p.is_file() && matches!(extension(p), Some("json" | "jsonl")) {
                files.push(p.to_path_buf());
            }
        }
    } else if path.is_file() {
        files.push(path.to_path_buf());
    } else {
        anyhow::bail!("input path {} does not exist", path.display());
    }

    let mut docs = Vec::new();
    for file in files {
        if extension(&file) == Some("jsonl") {
            read_jsonl(&file, &mut docs)?;
        } else {
            read_json(&file, &mut docs)?;
        }
    }
    tracing::debug!(num_docs = docs.len(), path = %path.display(), "loaded documents");
    Ok(docs)
}

/// [`load_documents`] followed by id validation.
pub fn load_corpus<P: AsRef<Path>>(path: P) -> Result<Corpus> {
    let docs = load_documents(path)?;
    Ok(Corpus::new(docs)?)
}

fn extension(p: &Path) -> Option<&str> {
    p.extension().and_then(|s| s.to_str())
}

fn read_jsonl(file: &Path, docs: &mut Vec<Document>) -> Result<()> {
    let reader = BufReader::new(File::open(file).with_context(|| format!("opening {}", file.display()))?);
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        let doc: Document = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}: invalid document", file.display(), lineno + 1))?;
        docs.push(doc);
    }
    Ok(())
}

fn read_json(file: &Path, docs: &mut Vec<Document>) -> Result<()> {
    let raw = fs::read_to_string(file).with_context(|| format!("opening {}", file.display()))?;
    let json: serde_json::Value = serde_json::from_str(&raw).with_context(|| format!("parsing {}", file.display()))?;
    match json {
        serde_json::Value::Array(arr) => {
            for v in arr {
                docs.push(serde_json::from_value(v).with_context(|| format!("{}: invalid document", file.display()))?);
            }
        }
        serde_json::Value::Object(_) => {
            docs.push(serde_json::from_value(json).with_context(|| format!("{}: invalid document", file.display()))?);
        }
        _ => anyhow::bail!("{}: expected a document or an array of documents", file.display()),
    }
    Ok(())
}
