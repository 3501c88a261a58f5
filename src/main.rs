use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use thiserror::Error;

use phylogic_review::annotation::{self, AnnotationError, LabelVocabulary, Verdict, render_legend};
use phylogic_review::input::{self, InputError};
use phylogic_review::logging;
use phylogic_review::model::profile::CLUSTER_ANNOTATION_HELP;
use phylogic_review::model::{ConfigError, ReviewConfig, ReviewProfile, ReviewerKind};
use phylogic_review::report::{render_fields_text, render_record_text, sample_view};
use phylogic_review::review::{ReviewError, ReviewSession, load_session, save_session};
use phylogic_review::schema::{SchemaError, SchemaRegistry, session_schema};

#[derive(Debug, Parser)]
#[command(
    name = "phylogic-review",
    version,
    about = "Review and annotate PhylogicNDT/Phylogic clonal-structure results"
)]
struct Cli {
    /// Reviewer flavour.
    #[arg(long, value_enum, default_value_t = ReviewerArg::PhylogicNdt, global = true)]
    reviewer: ReviewerArg,
    /// JSON label vocabulary replacing the built-in one.
    #[arg(long, global = true)]
    vocab: Option<PathBuf>,
    /// JSON config: MAF column names and extra annotation fields.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ReviewerArg {
    PhylogicNdt,
    Phylogic,
}

impl From<ReviewerArg> for ReviewerKind {
    fn from(value: ReviewerArg) -> Self {
        match value {
            ReviewerArg::PhylogicNdt => ReviewerKind::PhylogicNdt,
            ReviewerArg::Phylogic => ReviewerKind::Phylogic,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the cluster label legend.
    Legend,
    /// Check a cluster-annotation string.
    Validate {
        annotation: String,
        #[arg(long)]
        json: bool,
    },
    /// List the annotation fields of a session.
    Fields,
    /// Print the reviewer profile as JSON.
    Profile,
    /// Create a review session file.
    Init {
        #[arg(long)]
        participants: PathBuf,
        #[arg(long)]
        samples: PathBuf,
        #[arg(long)]
        out: PathBuf,
        #[arg(long, default_value = "")]
        description: String,
        /// Prefilled annotations TSV (participant_id plus one column per field).
        #[arg(long)]
        annotations: Option<PathBuf>,
        /// History TSV from an earlier review (participant, field, raw, accepted, timestamp).
        #[arg(long)]
        history: Option<PathBuf>,
        /// Restrict the review to these participants.
        #[arg(long = "participant")]
        index: Vec<String>,
    },
    /// Show a participant's samples ordered by collection date.
    Samples {
        #[arg(long)]
        session: PathBuf,
        #[arg(long)]
        participant: String,
        #[arg(long)]
        json: bool,
    },
    /// Record an annotation for a participant.
    Annotate {
        #[arg(long)]
        session: PathBuf,
        #[arg(long)]
        participant: String,
        #[arg(long)]
        field: String,
        #[arg(long)]
        value: String,
    },
    /// Show a participant's review record and history.
    Show {
        #[arg(long)]
        session: PathBuf,
        #[arg(long)]
        participant: String,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Annotation(#[from] AnnotationError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Review(#[from] ReviewError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode, CliError> {
    match &cli.command {
        Command::Legend => {
            let vocab = resolve_vocab(cli.vocab.as_deref())?;
            println!("{CLUSTER_ANNOTATION_HELP}\n");
            println!("Use only the following annotations:\n");
            println!("{}", render_legend(&vocab));
        }
        Command::Validate {
            annotation: raw,
            json,
        } => {
            let vocab = resolve_vocab(cli.vocab.as_deref())?;
            let verdict = annotation::check(raw, &vocab);
            if *json {
                println!("{}", serde_json::to_string_pretty(&verdict_json(&verdict))?);
            } else {
                println!("{}", verdict_text(&verdict));
            }
            if !verdict.is_accepted() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Fields => {
            let vocab = resolve_vocab(cli.vocab.as_deref())?;
            let config = ReviewConfig::load_or_default(cli.config.as_deref())?;
            print!("{}", render_fields_text(&session_schema(&vocab, &config.fields)?));
        }
        Command::Profile => {
            let profile = resolve_profile(cli.reviewer.into(), cli.config.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&profile)?);
        }
        Command::Init {
            participants,
            samples,
            out,
            description,
            annotations,
            history,
            index,
        } => {
            let vocab = resolve_vocab(cli.vocab.as_deref())?;
            let config = ReviewConfig::load_or_default(cli.config.as_deref())?;
            let schema = session_schema(&vocab, &config.fields)?;
            let participant_table = input::load_table(participants)?;
            let mut ids = input::parse_participants(&participant_table)?;
            if !index.is_empty() {
                if let Some(missing) = index.iter().find(|p| !ids.contains(p)) {
                    return Err(ReviewError::UnknownParticipant(missing.clone()).into());
                }
                let mut picked: Vec<String> = Vec::with_capacity(index.len());
                for p in index {
                    if !picked.contains(p) {
                        picked.push(p.clone());
                    }
                }
                ids = picked;
            }
            let sample_table = input::load_table(samples)?;
            let mut session =
                ReviewSession::new(description, cli.reviewer.into(), vocab, ids, sample_table);
            session.fields = config.fields;
            if let Some(path) = history {
                let entries = input::parse_history(&input::load_table(path)?)?;
                let total = entries.len();
                let imported = session.import_history(entries);
                tracing::info!("imported {imported} of {total} history entries");
            }
            if let Some(path) = annotations {
                let cells = input::parse_prefill(&input::load_table(path)?)?;
                let accepted = session.prefill(&schema, &cells)?;
                tracing::info!("prefilled {accepted} of {} annotations", cells.len());
            }
            save_session(&session, out)?;
            println!(
                "created review session with {} participants at {}",
                session.participants.len(),
                out.display()
            );
        }
        Command::Samples {
            session,
            participant,
            json,
        } => {
            let session = load_session(session)?;
            session.record(participant)?;
            let view = sample_view(&session.samples, participant)?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&view.to_json())?);
            } else {
                print!("{}", view.to_tsv());
            }
        }
        Command::Annotate {
            session: path,
            participant,
            field,
            value,
        } => {
            let (mut session, schema) = open_session(path)?;
            let outcome = session
                .submit(&schema, participant, field, value)
                .map(|v| v.to_string());
            // rejected attempts are part of the history too
            save_session(&session, path)?;
            let stored = outcome?;
            println!("{participant} {field} = {stored}");
        }
        Command::Show {
            session: path,
            participant,
        } => {
            let (session, schema) = open_session(path)?;
            let text = render_record_text(&session, &schema, participant)
                .ok_or_else(|| ReviewError::UnknownParticipant(participant.clone()))?;
            print!("{text}");
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn resolve_vocab(path: Option<&Path>) -> Result<LabelVocabulary, AnnotationError> {
    match path {
        Some(path) => LabelVocabulary::from_json_file(path),
        None => Ok(LabelVocabulary::phylogic_v1()),
    }
}

fn resolve_profile(
    kind: ReviewerKind,
    config: Option<&Path>,
) -> Result<ReviewProfile, ConfigError> {
    Ok(ReviewConfig::load_or_default(config)?.apply(ReviewProfile::for_kind(kind)))
}

fn open_session(path: &Path) -> Result<(ReviewSession, SchemaRegistry), CliError> {
    let session = load_session(path)?;
    let schema = session.schema()?;
    Ok((session, schema))
}

fn verdict_text(verdict: &Verdict) -> String {
    match verdict {
        Verdict::Accepted(parsed) => {
            let clusters: Vec<String> = parsed
                .iter()
                .map(|(id, labels)| format!("{id}: {}", labels.join(",")))
                .collect();
            format!("accept\n{}", clusters.join("\n"))
        }
        Verdict::UnknownLabels { unknown, .. } => {
            format!("reject: unknown labels {}", unknown.join(", "))
        }
        Verdict::Malformed(err) => format!("reject: {err}"),
    }
}

fn verdict_json(verdict: &Verdict) -> serde_json::Value {
    match verdict {
        Verdict::Accepted(parsed) => serde_json::json!({
            "accepted": true,
            "clusters": parsed,
        }),
        Verdict::UnknownLabels {
            annotation,
            unknown,
        } => serde_json::json!({
            "accepted": false,
            "clusters": annotation,
            "unknown_labels": unknown,
        }),
        Verdict::Malformed(err) => serde_json::json!({
            "accepted": false,
            "error": err.to_string(),
        }),
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
