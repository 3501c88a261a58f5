use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReviewerKind {
    PhylogicNdt,
    Phylogic,
}

impl ReviewerKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ReviewerKind::PhylogicNdt => "phylogic-ndt",
            ReviewerKind::Phylogic => "phylogic",
        }
    }
}

/// Column names of the MAF the visual components read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MafColumns {
    pub hugo: String,
    pub chromosome: String,
    pub start_pos: String,
    pub end_pos: String,
    pub protein_change: String,
    pub variant_class: String,
    pub cluster: String,
    pub sample_id: String,
    pub participant_id: String,
    pub variant_type: String,
}

impl Default for MafColumns {
    fn default() -> Self {
        Self {
            hugo: "Hugo_Symbol".to_string(),
            chromosome: "Chromosome".to_string(),
            start_pos: "Start_position".to_string(),
            end_pos: "End_position".to_string(),
            protein_change: "Protein_change".to_string(),
            variant_class: "Variant_Classification".to_string(),
            cluster: "Cluster_Assignment".to_string(),
            sample_id: "Sample_ID".to_string(),
            participant_id: "Patient_ID".to_string(),
            variant_type: "Variant_Type".to_string(),
        }
    }
}

pub const DEFAULT_MAF_SAMPLE_COLS: &[&str] =
    &["t_ref_count", "t_alt_count", "n_ref_count", "n_alt_count"];

pub const CLUSTER_ANNOTATION_HELP: &str = "To annotate cluster artifacts, use commas to separate \
annotations and semicolons to separate the clusters (eg: 3-F,S;4-CN,T;5-O)";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewProfile {
    pub kind: ReviewerKind,
    pub title: String,
    pub components: Vec<String>,
    pub configurable_maf_columns: bool,
    pub maf_columns: MafColumns,
    pub default_maf_sample_cols: Vec<String>,
}

impl ReviewProfile {
    pub fn phylogic_ndt() -> Self {
        Self {
            kind: ReviewerKind::PhylogicNdt,
            title: "PhylogicNDT review".to_string(),
            components: components("Phylogic NDT"),
            configurable_maf_columns: true,
            maf_columns: MafColumns::default(),
            default_maf_sample_cols: default_sample_cols(),
        }
    }

    pub fn phylogic() -> Self {
        Self {
            kind: ReviewerKind::Phylogic,
            title: "Phylogic review".to_string(),
            components: components("Phylogic"),
            configurable_maf_columns: false,
            maf_columns: MafColumns::default(),
            default_maf_sample_cols: default_sample_cols(),
        }
    }

    pub fn for_kind(kind: ReviewerKind) -> Self {
        match kind {
            ReviewerKind::PhylogicNdt => Self::phylogic_ndt(),
            ReviewerKind::Phylogic => Self::phylogic(),
        }
    }
}

fn components(tree_component: &str) -> Vec<String> {
    [
        "Cluster Annotations",
        tree_component,
        "Cluster Metrics",
        "Mutation Table",
        "Sample Data",
        "CNV Plot",
        "CCF pmf",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_sample_cols() -> Vec<String> {
    DEFAULT_MAF_SAMPLE_COLS.iter().map(|s| s.to_string()).collect()
}
