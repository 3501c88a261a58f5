use std::sync::Arc;

use super::*;
use crate::annotation::LabelVocabulary;

#[derive(Debug)]
struct NonEmpty;

impl Validator for NonEmpty {
    fn name(&self) -> &str {
        "non_empty"
    }

    fn accepts(&self, raw: &str) -> bool {
        !raw.trim().is_empty()
    }
}

fn schema() -> SchemaRegistry {
    default_schema(&LabelVocabulary::phylogic_v1()).unwrap()
}

#[test]
fn test_default_schema_order_and_types() {
    let registry = schema();
    let names: Vec<&str> = registry.fields().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "cluster_annotation",
            "To-Do",
            "Urgency",
            "selected_tree_idx",
            "selected_tree",
            "notes"
        ]
    );
    assert_eq!(
        registry.get("selected_tree_idx").unwrap().value_type,
        ValueType::Integer
    );
    assert_eq!(registry.get("notes").unwrap().display, DisplayKind::TextArea);
    assert_eq!(
        registry.get("Urgency").unwrap().display,
        DisplayKind::RadioItems
    );
    assert!(matches!(
        registry.get(CLUSTER_ANNOTATION_FIELD).unwrap().rule,
        FieldRule::Custom(_)
    ));
    assert!(matches!(
        registry.get("To-Do").unwrap().rule,
        FieldRule::FreeForm
    ));
}

#[test]
fn test_duplicate_field_rejected() {
    let mut registry = schema();
    let err = registry
        .register(FieldSpec::new("notes", ValueType::String))
        .unwrap_err();
    assert!(matches!(err, SchemaError::DuplicateField(name) if name == "notes"));
    assert_eq!(registry.len(), 6);
}

#[test]
fn test_options_require_string_type() {
    let mut registry = SchemaRegistry::new();
    let err = registry
        .register(FieldSpec::new("score", ValueType::Integer).options(["1", "2"]))
        .unwrap_err();
    assert!(matches!(
        err,
        SchemaError::OptionsRequireString {
            value_type: ValueType::Integer,
            ..
        }
    ));
    let err = registry
        .register(FieldSpec::new("empty", ValueType::String).options(Vec::<String>::new()))
        .unwrap_err();
    assert!(matches!(err, SchemaError::EmptyOptions(_)));
    assert!(registry.is_empty());
}

#[test]
fn test_lookup_missing_field() {
    let registry = schema();
    assert!(matches!(
        registry.get("nope"),
        Err(SchemaError::NotFound(name)) if name == "nope"
    ));
    assert!(registry.validate("nope", "x").is_err());
}

#[test]
fn test_choice_field_membership() {
    let registry = schema();
    assert_eq!(
        registry.validate("Urgency", "Minor").unwrap(),
        Ok(AnnotationValue::String("Minor".to_string()))
    );
    let rejected = registry.validate("Urgency", "minor").unwrap().unwrap_err();
    assert!(matches!(rejected, Rejection::NotAnOption { .. }));
}

#[test]
fn test_cluster_annotation_field_delegates_to_validator() {
    let registry = schema();
    assert!(registry.validate(CLUSTER_ANNOTATION_FIELD, "3-F,S").unwrap().is_ok());
    assert_eq!(
        registry.validate(CLUSTER_ANNOTATION_FIELD, "3-ZZ").unwrap(),
        Err(Rejection::Validator {
            name: "cluster_annotation".to_string()
        })
    );
    assert!(registry.validate(CLUSTER_ANNOTATION_FIELD, "3F").unwrap().is_err());
}

#[test]
fn test_integer_coercion() {
    let registry = schema();
    assert_eq!(
        registry.validate("selected_tree_idx", " 2 ").unwrap(),
        Ok(AnnotationValue::Integer(2))
    );
    assert_eq!(
        registry.validate("selected_tree_idx", "two").unwrap(),
        Err(Rejection::WrongType {
            expected: ValueType::Integer
        })
    );
}

#[test]
fn test_choice_and_custom_both_apply() {
    let mut registry = SchemaRegistry::new();
    registry
        .register(
            FieldSpec::new("verdict", ValueType::String)
                .options(["pass", "fail", " "])
                .validator(Arc::new(NonEmpty)),
        )
        .unwrap();
    assert!(matches!(
        registry.get("verdict").unwrap().rule,
        FieldRule::ChoiceAndCustom { .. }
    ));
    assert!(registry.validate("verdict", "pass").unwrap().is_ok());
    assert!(matches!(
        registry.validate("verdict", "maybe").unwrap(),
        Err(Rejection::NotAnOption { .. })
    ));
    assert!(matches!(
        registry.validate("verdict", " ").unwrap(),
        Err(Rejection::Validator { .. })
    ));
}

#[test]
fn test_default_display_kinds() {
    assert_eq!(
        DisplayKind::default_for(ValueType::Float, false),
        DisplayKind::Number
    );
    assert_eq!(
        DisplayKind::default_for(ValueType::String, true),
        DisplayKind::RadioItems
    );
    let mut registry = SchemaRegistry::new();
    let field = registry
        .register(FieldSpec::new("flagged", ValueType::Boolean))
        .unwrap();
    assert_eq!(field.display, DisplayKind::RadioItems);
    assert_eq!(
        registry.validate("flagged", "Yes").unwrap(),
        Ok(AnnotationValue::Boolean(true))
    );
}

fn extra(name: &str, value_type: ValueType, options: Option<&[&str]>) -> FieldConfig {
    FieldConfig {
        name: name.to_string(),
        value_type,
        options: options.map(|o| o.iter().map(|s| s.to_string()).collect()),
        display: None,
    }
}

#[test]
fn test_session_schema_custom_choice_field() {
    let vocab = LabelVocabulary::phylogic_v1();
    let fields = vec![extra(
        "tumor_type",
        ValueType::String,
        Some(&["primary", "metastasis"]),
    )];
    let registry = session_schema(&vocab, &fields).unwrap();
    assert_eq!(registry.len(), 7);
    assert_eq!(registry.fields()[6].name, "tumor_type");
    assert_eq!(
        registry.get("tumor_type").unwrap().display,
        DisplayKind::RadioItems
    );
    assert_eq!(
        registry.validate("tumor_type", "primary").unwrap(),
        Ok(AnnotationValue::String("primary".to_string()))
    );
    assert!(matches!(
        registry.validate("tumor_type", "relapse").unwrap(),
        Err(Rejection::NotAnOption { .. })
    ));
}

#[test]
fn test_session_schema_rejects_bad_extra_fields() {
    let vocab = LabelVocabulary::phylogic_v1();
    assert!(matches!(
        session_schema(&vocab, &[extra("notes", ValueType::String, None)]),
        Err(SchemaError::DuplicateField(name)) if name == "notes"
    ));
    assert!(matches!(
        session_schema(&vocab, &[extra("depth", ValueType::Integer, Some(&["10"]))]),
        Err(SchemaError::OptionsRequireString { .. })
    ));
    assert!(matches!(
        session_schema(&vocab, &[extra("stage", ValueType::String, Some(&[]))]),
        Err(SchemaError::EmptyOptions(_))
    ));
}
