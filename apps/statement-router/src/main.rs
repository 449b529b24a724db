//! Statement router CLI
//!
//! End-to-end workflow over one document pair: load the do-not-mail
//! reference list (CSV, first column), extract per-page text from the source
//! PDF, classify every statement, walk the ambiguous ones through an
//! interactive y/n/s/p review, then write the JSON report and one PDF per
//! destination bucket.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use chrono::Local;
use clap::Parser;
use statement_engine::{
    build_report, ClassificationEngine, ReferenceList, ReviewError, ReviewSession,
};
use statement_pdf::{extract_page_texts, split_by_destination};
use statement_types::{ReviewAnswer, Statement};
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Command-line arguments for the statement router
#[derive(Parser, Debug)]
#[command(name = "statement-router")]
#[command(about = "Classify scanned statements against a do-not-mail list and split the PDF")]
struct Args {
    /// Source PDF of scanned statements
    pdf: PathBuf,

    /// Do-not-mail reference list (CSV, company names in the first column)
    reference: PathBuf,

    /// Directory for the report and bucket PDFs
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Report file path (default: <out-dir>/<date>.json, deduplicated)
    #[arg(long)]
    report: Option<PathBuf>,

    /// Skip the interactive review and keep auto-assigned destinations
    #[arg(long)]
    skip_questions: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let names = load_reference_names(&args.reference)
        .with_context(|| format!("reading reference list {}", args.reference.display()))?;
    let reference = ReferenceList::from_names(names)?;
    info!(companies = reference.len(), "reference list loaded");

    let pdf_bytes = fs::read(&args.pdf)
        .with_context(|| format!("reading source PDF {}", args.pdf.display()))?;
    let pages = extract_page_texts(&pdf_bytes)?;
    info!(pages = pages.len(), "source document decoded");

    let engine = ClassificationEngine::new(&reference);
    let mut output = engine.process(&pages);
    if output.statements.is_empty() {
        bail!(
            "no statements found in {} ({} dropped as truncated)",
            args.pdf.display(),
            output.dropped
        );
    }

    if args.skip_questions {
        info!("interactive review skipped");
    } else {
        let stdin = io::stdin();
        let stdout = io::stdout();
        run_review(
            &mut output.statements,
            &mut stdin.lock(),
            &mut stdout.lock(),
        )?;
    }

    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating output directory {}", args.out_dir.display()))?;

    let report = build_report(&output);
    let report_path = args
        .report
        .unwrap_or_else(|| dated_report_path(&args.out_dir));
    fs::write(&report_path, serde_json::to_vec_pretty(&report)?)
        .with_context(|| format!("writing report {}", report_path.display()))?;
    info!(report = %report_path.display(), "report written");

    for bucket in split_by_destination(&pdf_bytes, &output.statements)? {
        let path = args.out_dir.join(bucket.destination.output_filename());
        fs::write(&path, &bucket.bytes)
            .with_context(|| format!("writing {}", path.display()))?;
        info!(
            bucket = bucket.destination.label(),
            pages = bucket.pages_included,
            skipped = bucket.pages_skipped,
            file = %path.display(),
            "bucket document written"
        );
    }

    let manual = output.statements.iter().filter(|s| s.manual_required).count();
    info!(
        statements = output.statements.len(),
        dropped = output.dropped,
        manual_review = manual,
        "workflow complete"
    );
    Ok(())
}

/// Read candidate company names from the first CSV column. Header and blank
/// rows are filtered later by the reference loader.
fn load_reference_names(path: &Path) -> anyhow::Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut names = Vec::new();
    for record in reader.records() {
        let record = record?;
        if let Some(field) = record.get(0) {
            names.push(field.to_string());
        }
    }
    Ok(names)
}

/// Dated report path, e.g. `aug232026.json`, counter-suffixed when taken.
fn dated_report_path(out_dir: &Path) -> PathBuf {
    let stem = Local::now().format("%b%d%Y").to_string().to_lowercase();
    let mut path = out_dir.join(format!("{stem}.json"));
    let mut counter = 1;
    while path.exists() {
        path = out_dir.join(format!("{stem}-{counter}.json"));
        counter += 1;
    }
    path
}

/// Drive the review session over stdin one question at a time.
///
/// `y` confirms the match as DNM, `n` keeps the current destination, `s`
/// skips all remaining questions, `p` goes back one answer. Anything else
/// re-prompts. EOF abandons the review; already-classified statements keep
/// their destinations.
fn run_review(
    statements: &mut [Statement],
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> anyhow::Result<()> {
    let mut session = ReviewSession::new(statements);
    if session.question_count() == 0 {
        writeln!(output, "No manual review required.")?;
        return Ok(());
    }
    writeln!(
        output,
        "Found {} companies requiring manual review:",
        session.question_count()
    )?;

    while let Some(question) = session.next_question(statements) {
        writeln!(output)?;
        writeln!(output, "Question {} of {}:", question.ordinal, question.total)?;
        if let Some(best) = question.similar_matches.first() {
            writeln!(
                output,
                "Company '{}' is similar to '{}' ({})",
                question.company_name,
                best.company_name,
                best.percentage_label()
            )?;
        }
        writeln!(output, "Are they the same company? (y/n/s to skip all/p to go back)")?;
        write!(output, "> ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(output, "Input closed; remaining questions left unanswered.")?;
            break;
        }

        match line.trim().to_lowercase().as_str() {
            "y" => {
                session.submit(statements, question.statement_id, ReviewAnswer::Yes)?;
                writeln!(output, "Marked '{}' as DNM", question.company_name)?;
            }
            "n" => {
                session.submit(statements, question.statement_id, ReviewAnswer::No)?;
                let kept = statements[question.statement_id].destination.label();
                writeln!(output, "Kept '{}' as {}", question.company_name, kept)?;
            }
            "s" => {
                session.submit(statements, question.statement_id, ReviewAnswer::Skip)?;
                writeln!(output, "Skipping remaining questions")?;
            }
            "p" => match session.back(statements) {
                Ok(()) => writeln!(output, "Going back to the previous question")?,
                Err(ReviewError::EmptyHistory) => {
                    writeln!(output, "No previous questions to go back to")?
                }
                Err(e) => return Err(e.into()),
            },
            _ => writeln!(output, "Please enter 'y', 'n', 's', or 'p'")?,
        }
    }
    Ok(())
}
