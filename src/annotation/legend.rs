use std::sync::LazyLock;

use regex::Regex;

use crate::annotation::LabelVocabulary;

static UPPERCASE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[A-Z]+").expect("uppercase run pattern"));

/// Markdown legend of the vocabulary, one `- CODE - description` bullet per
/// label, with every run of uppercase letters in bold.
pub fn render_legend(vocab: &LabelVocabulary) -> String {
    let lines: Vec<String> = vocab
        .iter()
        .map(|(code, description)| format!("- {code} - {description}"))
        .collect();
    bold_uppercase_runs(&lines.join("\n"))
}

pub fn bold_uppercase_runs(text: &str) -> String {
    UPPERCASE_RUN.replace_all(text, "**$0**").into_owned()
}
