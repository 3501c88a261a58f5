use super::*;
use crate::schema::{DisplayKind, FieldConfig, ValueType};

#[test]
fn test_profiles_differ_only_in_tree_component_and_column_config() {
    let ndt = ReviewProfile::phylogic_ndt();
    let old = ReviewProfile::phylogic();
    assert_eq!(ndt.components.len(), old.components.len());
    assert_eq!(ndt.components[1], "Phylogic NDT");
    assert_eq!(old.components[1], "Phylogic");
    assert_eq!(ndt.components[0], "Cluster Annotations");
    assert!(ndt.configurable_maf_columns);
    assert!(!old.configurable_maf_columns);
    assert_eq!(ndt.maf_columns, old.maf_columns);
    assert_eq!(ReviewProfile::for_kind(ReviewerKind::Phylogic), old);
}

#[test]
fn test_maf_defaults() {
    let cols = MafColumns::default();
    assert_eq!(cols.hugo, "Hugo_Symbol");
    assert_eq!(cols.cluster, "Cluster_Assignment");
    assert_eq!(cols.participant_id, "Patient_ID");
    assert_eq!(
        ReviewProfile::phylogic_ndt().default_maf_sample_cols,
        vec!["t_ref_count", "t_alt_count", "n_ref_count", "n_alt_count"]
    );
}

#[test]
fn test_config_partial_maf_override() {
    let config =
        ReviewConfig::from_json(r#"{"maf_columns": {"hugo": "Gene", "cluster": "cluster_id"}}"#)
            .unwrap();
    let profile = config.apply(ReviewProfile::phylogic_ndt());
    assert_eq!(profile.maf_columns.hugo, "Gene");
    assert_eq!(profile.maf_columns.cluster, "cluster_id");
    assert_eq!(profile.maf_columns.chromosome, "Chromosome");
}

#[test]
fn test_config_override_ignored_for_fixed_reviewer() {
    let config = ReviewConfig::from_json(
        r#"{"maf_columns": {"hugo": "Gene"}, "default_maf_sample_cols": ["t_alt_count"]}"#,
    )
    .unwrap();
    let profile = config.apply(ReviewProfile::phylogic());
    assert_eq!(profile.maf_columns.hugo, "Hugo_Symbol");
    assert_eq!(profile.default_maf_sample_cols, vec!["t_alt_count"]);
}

#[test]
fn test_config_rejects_unknown_keys() {
    assert!(ReviewConfig::from_json(r#"{"maf_colums": {}}"#).is_err());
    assert_eq!(ReviewConfig::from_json("{}").unwrap(), ReviewConfig::default());
}

#[test]
fn test_config_custom_fields() {
    let config = ReviewConfig::from_json(
        r#"{"fields": [
            {"name": "tumor_type", "value_type": "string", "options": ["primary", "metastasis"]},
            {"name": "purity_ok", "value_type": "boolean", "display": "radio_items"}
        ]}"#,
    )
    .unwrap();
    assert_eq!(
        config.fields,
        vec![
            FieldConfig {
                name: "tumor_type".to_string(),
                value_type: ValueType::String,
                options: Some(vec!["primary".to_string(), "metastasis".to_string()]),
                display: None,
            },
            FieldConfig {
                name: "purity_ok".to_string(),
                value_type: ValueType::Boolean,
                options: None,
                display: Some(DisplayKind::RadioItems),
            },
        ]
    );
    assert!(ReviewConfig::from_json(r#"{"fields": [{"name": "x"}]}"#).is_err());
}
