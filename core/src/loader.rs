//! Document ingestion from Wikipedia abstract dumps (XML), JSON and JSONL.
//!
//! Ids are dense and zero-based, assigned in load order.

use crate::index::{DocId, Document};
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Xml,
    Json,
    Jsonl,
}

impl Format {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|s| s.to_str())? {
            "xml" => Some(Format::Xml),
            "json" => Some(Format::Json),
            "jsonl" => Some(Format::Jsonl),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct Feed {
    #[serde(rename = "doc", default)]
    docs: Vec<FeedDoc>,
}

#[derive(Debug, Deserialize)]
struct FeedDoc {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    #[serde(rename = "abstract", default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct InputDoc {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(alias = "abstract", alias = "body")]
    text: String,
}

/// Load a file, or every supported file under a directory in path order.
pub fn load_documents<P: AsRef<Path>>(path: P) -> Result<Vec<Document>> {
    let path = path.as_ref();
    let files: Vec<PathBuf> = if path.is_dir() {
        WalkDir::new(path)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .map(|e| e.into_path())
            .filter(|p| p.is_file() && Format::from_path(p).is_some())
            .collect()
    } else if path.is_file() {
        vec![path.to_path_buf()]
    } else {
        bail!("input path {} does not exist", path.display());
    };

    let mut docs = Vec::new();
    for file in files {
        let format = match Format::from_path(&file) {
            Some(f) => f,
            None => bail!("unsupported input file {} (expected .xml, .json or .jsonl)", file.display()),
        };
        let f = File::open(&file).with_context(|| format!("opening {}", file.display()))?;
        let loaded = read_documents(BufReader::new(f), format, docs.len() as DocId)
            .with_context(|| format!("loading {}", file.display()))?;
        tracing::debug!(file = %file.display(), count = loaded.len(), "loaded documents");
        docs.extend(loaded);
    }
    tracing::info!(num_docs = docs.len(), input = %path.display(), "documents loaded");
    Ok(docs)
}

/// Parse documents from a reader, numbering them from `first_id`.
pub fn read_documents<R: BufRead>(reader: R, format: Format, first_id: DocId) -> Result<Vec<Document>> {
    let mut next_id = first_id;
    let mut assign = |title: String, url: String, text: String| {
        let doc = Document { id: next_id, title, url, text };
        next_id += 1;
        doc
    };

    match format {
        Format::Xml => {
            let feed: Feed = quick_xml::de::from_reader(reader)?;
            Ok(feed.docs.into_iter().map(|d| assign(d.title, d.url, d.text)).collect())
        }
        Format::Json => {
            let json: serde_json::Value = serde_json::from_reader(reader)?;
            let inputs: Vec<InputDoc> = match json {
                serde_json::Value::Array(_) => serde_json::from_value(json)?,
                serde_json::Value::Object(_) => vec![serde_json::from_value(json)?],
                other => bail!("expected a JSON array or object, found {other}"),
            };
            Ok(inputs.into_iter().map(|d| assign(d.title, d.url.unwrap_or_default(), d.text)).collect())
        }
        Format::Jsonl => {
            let mut docs = Vec::new();
            for (lineno, line) in reader.lines().enumerate() {
                let line = line?;
                if line.trim().is_empty() { continue; }
                let d: InputDoc = serde_json::from_str(&line)
                    .with_context(|| format!("line {}", lineno + 1))?;
                docs.push(assign(d.title, d.url.unwrap_or_default(), d.text));
            }
            Ok(docs)
        }
    }
}
