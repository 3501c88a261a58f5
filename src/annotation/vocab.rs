use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::annotation::AnnotationError;

#[derive(Debug, Clone, Copy)]
pub struct LabelDef {
    pub code: &'static str,
    pub description: &'static str,
}

pub const PHYLOGIC_V1_VERSION: &str = "phylogic-v1";

const PHYLOGIC_V1_LABELS: &[LabelDef] = &[
    LabelDef {
        code: "F",
        description: "Flat cluster (and consistently in middle)",
    },
    LabelDef {
        code: "S",
        description: "Small cluster (few mutations compared to other clusters)",
    },
    LabelDef {
        code: "W",
        description: "very Wide confidence interval (especially given number of mutations)",
    },
    LabelDef {
        code: "ID",
        description: "high InDel/snv ratio",
    },
    LabelDef {
        code: "SN",
        description: "high Synonymous/Non-synonymous ratio",
    },
    LabelDef {
        code: "NC",
        description: "high Non-Coding/coding ratio (only applies to wes)",
    },
    LabelDef {
        code: "G",
        description: "mutations cluster on particular Genomic locations",
    },
    LabelDef {
        code: "C",
        description: "probable Clonal/truncal mutations",
    },
    LabelDef {
        code: "BM",
        description: "mutations have BiModal ccf pmf and are clustered incorrectly",
    },
    LabelDef {
        code: "T",
        description: "breaks phylogenetic Tree",
    },
    LabelDef {
        code: "P",
        description: "Purity related",
    },
    LabelDef {
        code: "CN",
        description: "Copy Number related",
    },
    LabelDef {
        code: "OS",
        description: "OverSplitting (smaller cluster shouldn't have been split from other cluster)",
    },
    LabelDef {
        code: "O",
        description: "Other (explain in notes)",
    },
];

pub fn builtin_labels() -> &'static [LabelDef] {
    PHYLOGIC_V1_LABELS
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub code: String,
    pub description: String,
}

/// Iteration follows declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelVocabulary {
    pub version: String,
    pub labels: Vec<Label>,
}

impl LabelVocabulary {
    pub fn phylogic_v1() -> Self {
        Self {
            version: PHYLOGIC_V1_VERSION.to_string(),
            labels: builtin_labels()
                .iter()
                .map(|def| Label {
                    code: def.code.to_string(),
                    description: def.description.to_string(),
                })
                .collect(),
        }
    }

    pub fn new(version: &str, labels: Vec<Label>) -> Result<Self, AnnotationError> {
        let vocab = Self {
            version: version.to_string(),
            labels,
        };
        vocab.check_unique()?;
        Ok(vocab)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, AnnotationError> {
        let text = std::fs::read_to_string(path).map_err(|source| AnnotationError::VocabularyIo {
            path: path.to_path_buf(),
            source,
        })?;
        let vocab: LabelVocabulary =
            serde_json::from_str(&text).map_err(|source| AnnotationError::VocabularyFormat {
                path: path.to_path_buf(),
                source,
            })?;
        vocab.check_unique()?;
        tracing::debug!(
            version = %vocab.version,
            labels = vocab.labels.len(),
            "loaded label vocabulary from {}",
            path.display()
        );
        Ok(vocab)
    }

    fn check_unique(&self) -> Result<(), AnnotationError> {
        let mut seen = HashSet::with_capacity(self.labels.len());
        for label in &self.labels {
            if !seen.insert(label.code.as_str()) {
                return Err(AnnotationError::DuplicateLabel(label.code.clone()));
            }
        }
        Ok(())
    }

    pub fn contains(&self, code: &str) -> bool {
        self.labels.iter().any(|l| l.code == code)
    }

    pub fn description(&self, code: &str) -> Option<&str> {
        self.labels
            .iter()
            .find(|l| l.code == code)
            .map(|l| l.description.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.labels
            .iter()
            .map(|l| (l.code.as_str(), l.description.as_str()))
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl Default for LabelVocabulary {
    fn default() -> Self {
        Self::phylogic_v1()
    }
}
