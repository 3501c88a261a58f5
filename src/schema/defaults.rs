use std::sync::Arc;

use crate::annotation::{ClusterAnnotationValidator, LabelVocabulary};
use crate::schema::{
    DisplayKind, FieldConfig, FieldSpec, SchemaError, SchemaRegistry, ValueType,
};

pub const CLUSTER_ANNOTATION_FIELD: &str = "cluster_annotation";

pub const URGENCY_OPTIONS: &[&str] = &["Important (broken tree)", "Minor", "No changes needed"];

pub fn default_schema(vocab: &LabelVocabulary) -> Result<SchemaRegistry, SchemaError> {
    let mut registry = SchemaRegistry::new();
    registry.register(
        FieldSpec::new(CLUSTER_ANNOTATION_FIELD, ValueType::String)
            .validator(Arc::new(ClusterAnnotationValidator::new(vocab.clone())))
            .display(DisplayKind::Text),
    )?;
    registry.register(FieldSpec::new("To-Do", ValueType::String).display(DisplayKind::Text))?;
    registry.register(
        FieldSpec::new("Urgency", ValueType::String)
            .options(URGENCY_OPTIONS.iter().copied())
            .display(DisplayKind::RadioItems),
    )?;
    // tree count is not known at setup, so the index is not range-checked
    registry.register(
        FieldSpec::new("selected_tree_idx", ValueType::Integer).display(DisplayKind::Number),
    )?;
    registry.register(
        FieldSpec::new("selected_tree", ValueType::String).display(DisplayKind::Text),
    )?;
    registry.register(FieldSpec::new("notes", ValueType::String).display(DisplayKind::TextArea))?;
    Ok(registry)
}

/// Default fields followed by `extra`, in order.
pub fn session_schema(
    vocab: &LabelVocabulary,
    extra: &[FieldConfig],
) -> Result<SchemaRegistry, SchemaError> {
    let mut registry = default_schema(vocab)?;
    for field in extra {
        registry.register(field.to_spec())?;
    }
    Ok(registry)
}
