use crate::review::ReviewSession;
use crate::schema::SchemaRegistry;

pub fn render_record_text(
    session: &ReviewSession,
    schema: &SchemaRegistry,
    participant: &str,
) -> Option<String> {
    let record = session.record(participant).ok()?;
    let mut out = String::new();

    out.push_str(&format!("Participant {participant}\n"));
    out.push_str(&format!("Review: {}\n", session.description));
    out.push_str(&format!("Reviewer: {}\n\n", session.reviewer.as_str()));

    out.push_str("Annotations\n");
    let width = schema
        .fields()
        .iter()
        .map(|f| f.name.len())
        .max()
        .unwrap_or(0);
    for field in schema.fields() {
        let value = record
            .get(&field.name)
            .map(|v| v.to_string())
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&format!("  {:<width$}  {}\n", field.name, value));
    }
    // values of fields the current schema no longer declares
    for (name, value) in &record.values {
        if schema.get(name).is_err() {
            out.push_str(&format!("  {:<width$}  {} (not in schema)\n", name, value));
        }
    }

    let history: Vec<_> = session.history_for(participant).collect();
    out.push_str(&format!("\nHistory ({} entries)\n", history.len()));
    for entry in history {
        out.push_str(&format!(
            "  {}  {}  {}  {:?}\n",
            entry.timestamp,
            if entry.accepted { "accepted" } else { "rejected" },
            entry.field,
            entry.raw
        ));
    }
    Some(out)
}

pub fn render_fields_text(schema: &SchemaRegistry) -> String {
    let mut out = String::new();
    for field in schema.fields() {
        out.push_str(&format!(
            "{}\t{}\t{:?}",
            field.name, field.value_type, field.display
        ));
        if let Some(options) = field.rule.options() {
            out.push_str(&format!("\toptions={}", options.join("|")));
        }
        if let Some(validator) = field.rule.validator() {
            out.push_str(&format!("\tvalidator={}", validator.name()));
        }
        out.push('\n');
    }
    out
}
