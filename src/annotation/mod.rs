use std::path::PathBuf;

use serde::Serialize;
use serde::ser::SerializeMap;
use thiserror::Error;

use crate::schema::Validator;

pub mod legend;
pub mod vocab;

pub use legend::render_legend;
pub use vocab::{Label, LabelVocabulary};

pub const ENTRY_SEPARATOR: char = ';';
pub const CLUSTER_SEPARATOR: char = '-';
pub const LABEL_SEPARATOR: char = ',';

#[derive(Debug, Error)]
pub enum AnnotationError {
    #[error("annotation entry {entry:?} is not formatted as <cluster>-<label>[,<label>...]")]
    MalformedEntry { entry: String },
    #[error("annotation entry {entry:?} has an empty cluster id")]
    EmptyClusterId { entry: String },
    #[error("duplicate label code in vocabulary: {0}")]
    DuplicateLabel(String),
    #[error("failed to read vocabulary {path}: {source}")]
    VocabularyIo {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid vocabulary file {path}: {source}")]
    VocabularyFormat {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Clusters keep the position of their first entry; a repeated cluster id
/// replaces the labels of the earlier entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClusterAnnotation {
    clusters: Vec<(String, Vec<String>)>,
}

impl ClusterAnnotation {
    pub fn get(&self, cluster: &str) -> Option<&[String]> {
        self.clusters
            .iter()
            .find(|(id, _)| id == cluster)
            .map(|(_, labels)| labels.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.clusters
            .iter()
            .map(|(id, labels)| (id.as_str(), labels.as_slice()))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.clusters
            .iter()
            .flat_map(|(_, labels)| labels.iter().map(String::as_str))
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    fn insert(&mut self, cluster: String, labels: Vec<String>) {
        if let Some(slot) = self.clusters.iter_mut().find(|(id, _)| *id == cluster) {
            slot.1 = labels;
        } else {
            self.clusters.push((cluster, labels));
        }
    }
}

impl Serialize for ClusterAnnotation {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.clusters.len()))?;
        for (id, labels) in &self.clusters {
            map.serialize_entry(id, labels)?;
        }
        map.end()
    }
}

pub fn parse(raw: &str) -> Result<ClusterAnnotation, AnnotationError> {
    let mut out = ClusterAnnotation::default();
    for entry in raw.split(ENTRY_SEPARATOR) {
        let Some((cluster, labels)) = entry.split_once(CLUSTER_SEPARATOR) else {
            return Err(AnnotationError::MalformedEntry {
                entry: entry.to_string(),
            });
        };
        let cluster = cluster.trim();
        if cluster.is_empty() {
            return Err(AnnotationError::EmptyClusterId {
                entry: entry.to_string(),
            });
        }
        let labels = labels
            .split(LABEL_SEPARATOR)
            .map(|l| l.trim().to_string())
            .collect();
        out.insert(cluster.to_string(), labels);
    }
    Ok(out)
}

#[derive(Debug)]
pub enum Verdict {
    Accepted(ClusterAnnotation),
    UnknownLabels {
        annotation: ClusterAnnotation,
        unknown: Vec<String>,
    },
    Malformed(AnnotationError),
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted(_))
    }
}

pub fn check(raw: &str, vocab: &LabelVocabulary) -> Verdict {
    let annotation = match parse(raw) {
        Ok(annotation) => annotation,
        Err(err) => return Verdict::Malformed(err),
    };
    let mut unknown: Vec<String> = Vec::new();
    for label in annotation.labels() {
        if !vocab.contains(label) && !unknown.iter().any(|u| u == label) {
            unknown.push(label.to_string());
        }
    }
    if unknown.is_empty() {
        Verdict::Accepted(annotation)
    } else {
        Verdict::UnknownLabels {
            annotation,
            unknown,
        }
    }
}

pub fn validate(raw: &str, vocab: &LabelVocabulary) -> bool {
    match check(raw, vocab) {
        Verdict::Accepted(_) => true,
        Verdict::UnknownLabels { .. } => false,
        Verdict::Malformed(err) => {
            tracing::warn!("cluster annotation not formatted correctly: {err}");
            false
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClusterAnnotationValidator {
    vocab: LabelVocabulary,
}

impl ClusterAnnotationValidator {
    pub fn new(vocab: LabelVocabulary) -> Self {
        Self { vocab }
    }

    pub fn vocabulary(&self) -> &LabelVocabulary {
        &self.vocab
    }
}

impl Validator for ClusterAnnotationValidator {
    fn name(&self) -> &str {
        "cluster_annotation"
    }

    fn accepts(&self, raw: &str) -> bool {
        validate(raw, &self.vocab)
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/annotation/tests.rs"]
mod tests;
