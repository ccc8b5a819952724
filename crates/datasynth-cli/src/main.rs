mod config;
mod logging;
mod schema_file;

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use datasynth_core::{
    Entity, IssueSeverity, SchemaDocument, ValidationIssue, ValidationReport,
    document_json_schema, validate_entity,
};
use datasynth_generate::{
    DatasetProject, GenerationError, OutputFormat, StaticVocabulary, SynthesisEngine,
    VocabularyCategory, writer_for,
};
use thiserror::Error;
use tracing::{info, warn};

use config::{ConfigError, DEFAULT_CONFIG_FILE, Settings, load_settings, save_settings};
use logging::{LoggingError, init_logging};
use schema_file::{SchemaFileError, load_schema};

#[derive(Debug, Error)]
enum CliError {
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("schema file error: {0}")]
    SchemaFile(#[from] SchemaFileError),
    #[error("logging error: {0}")]
    Logging(#[from] LoggingError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
    #[error("schema has {0} validation error(s)")]
    Validation(usize),
}

#[derive(Parser, Debug)]
#[command(name = "datasynth", version, about = "Synthesize fake datasets from a declarative schema")]
struct Cli {
    /// Path to datasynth.toml (defaults to ./datasynth.toml when present).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Log filter such as `debug` or `datasynth_generate=trace`; overrides RUST_LOG.
    #[arg(long, global = true, value_name = "FILTER")]
    log_level: Option<String>,
    /// Append JSON-lines logs to this file.
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate records for one entity and export them.
    Generate(GenerateArgs),
    /// Check a schema file and report issues.
    Validate(ValidateArgs),
    /// Print the JSON Schema of schema documents.
    JsonSchema,
    /// Sample built-in vocabulary lists.
    Vocabulary(VocabularyArgs),
    /// Write a datasynth.toml with default settings.
    InitConfig(InitConfigArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Schema file (.json or .toml).
    #[arg(long)]
    schema: PathBuf,
    /// Root entity to generate (defaults to the first entity).
    #[arg(long)]
    entity: Option<String>,
    /// Number of records.
    #[arg(long)]
    count: Option<usize>,
    /// Seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,
    /// Output format: csv, json, sql or xml.
    #[arg(long)]
    format: Option<OutputFormat>,
    /// Output file; records go to stdout when neither this nor `output.out_dir` is set.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ValidateArgs {
    /// Schema file (.json or .toml).
    #[arg(long)]
    schema: PathBuf,
}

#[derive(Args, Debug)]
struct VocabularyArgs {
    /// One of first_names, last_names, cities, professions, emails,
    /// phone_numbers, product_names, company_names.
    #[arg(long)]
    category: VocabularyCategory,
    #[arg(long, default_value_t = 10)]
    count: usize,
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args, Debug)]
struct InitConfigArgs {
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    path: PathBuf,
    /// Overwrite an existing file.
    #[arg(long, default_value_t = false)]
    force: bool,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref(), cli.log_file.as_deref())?;

    match cli.command {
        Command::Generate(args) => {
            let settings = load_settings(cli.config.as_deref())?;
            run_generate(args, &settings)
        }
        Command::Validate(args) => {
            let settings = load_settings(cli.config.as_deref())?;
            run_validate(args, &settings)
        }
        Command::JsonSchema => run_json_schema(),
        Command::Vocabulary(args) => run_vocabulary(args),
        Command::InitConfig(args) => run_init_config(args),
    }
}

fn run_generate(args: GenerateArgs, settings: &Settings) -> Result<(), CliError> {
    let GenerateArgs {
        schema,
        entity,
        count,
        seed,
        format,
        out,
    } = args;

    let document = load_schema(&schema)?;
    let root = select_entity(&document, entity.as_deref())?.clone();
    let entity_name = root.name.clone().unwrap_or_else(|| "records".to_string());

    let report = validate_entity(&root, settings.generate.max_depth);
    log_warnings(&report);

    let count = count.unwrap_or(settings.generate.count);
    let format = format.unwrap_or(settings.output.format);
    let writer_options = settings.writer_options();
    let out = out.or_else(|| {
        settings
            .output
            .out_dir
            .as_ref()
            .map(|dir| dir.join(format!("{entity_name}.{}", format.extension())))
    });

    let engine = SynthesisEngine::new(settings.generate_options(seed));
    info!(
        schema = %schema.display(),
        entity = %entity_name,
        count,
        format = %format,
        seed = engine.seed(),
        "generate requested"
    );

    let project_name = document.project.clone().unwrap_or_else(|| entity_name.clone());
    let mut project = DatasetProject::with_parts(project_name, Some(Box::new(engine)), None)?;
    for entity in document.entities {
        project.add_entity(entity);
    }

    let timer = Instant::now();
    let records = project.generate(&root, count)?;

    match out {
        Some(path) => {
            project.set_writer(writer_for(format, &writer_options)?);
            let summary = project.export(&records, &path)?;
            println!(
                "wrote {} records ({} bytes) to {}",
                summary.records,
                summary.bytes_written,
                summary.path.display()
            );
        }
        None => {
            let writer = writer_for(format, &writer_options)?;
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            writer.write_to(&records, &mut handle)?;
            handle.flush()?;
        }
    }

    info!(
        records = records.len(),
        duration_ms = timer.elapsed().as_millis() as u64,
        "generate finished"
    );
    Ok(())
}

fn select_entity<'a>(
    document: &'a SchemaDocument,
    name: Option<&str>,
) -> Result<&'a Entity, CliError> {
    match name {
        Some(name) => document
            .entity(name)
            .ok_or_else(|| CliError::InvalidArgs(format!("entity '{name}' not found in schema"))),
        None => document
            .entities
            .first()
            .ok_or_else(|| CliError::InvalidArgs("schema defines no entities".to_string())),
    }
}

fn run_validate(args: ValidateArgs, settings: &Settings) -> Result<(), CliError> {
    let document = match load_schema(&args.schema) {
        Ok(document) => document,
        Err(SchemaFileError::Structural(report)) => {
            print_report(&report);
            return Err(CliError::Validation(report.errors.len()));
        }
        Err(err) => return Err(err.into()),
    };

    let mut report = ValidationReport::default();
    if document.entities.is_empty() {
        report.push_warning(ValidationIssue::new(
            IssueSeverity::Warning,
            "no_entities",
            "/entities",
            "schema defines no entities",
            None,
        ));
    }
    for entity in &document.entities {
        report.merge(validate_entity(entity, settings.generate.max_depth));
    }

    print_report(&report);
    if report.is_ok() {
        println!(
            "{}: ok ({} warning(s))",
            args.schema.display(),
            report.warnings.len()
        );
        Ok(())
    } else {
        Err(CliError::Validation(report.errors.len()))
    }
}

fn print_report(report: &ValidationReport) {
    for issue in report.errors.iter().chain(report.warnings.iter()) {
        println!("{}", format_issue(issue));
    }
}

fn format_issue(issue: &ValidationIssue) -> String {
    let severity = match issue.severity {
        IssueSeverity::Error => "error",
        IssueSeverity::Warning => "warning",
    };
    let mut line = format!("{severity}[{}] {}: {}", issue.code, issue.path, issue.message);
    if let Some(hint) = &issue.hint {
        line.push_str(&format!(" (hint: {hint})"));
    }
    line
}

fn log_warnings(report: &ValidationReport) {
    for issue in &report.warnings {
        warn!(code = %issue.code, path = %issue.path, "{}", issue.message);
    }
}

fn run_json_schema() -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(&document_json_schema())?;
    println!("{json}");
    Ok(())
}

fn run_vocabulary(args: VocabularyArgs) -> Result<(), CliError> {
    let mut vocabulary = match args.seed {
        Some(seed) => StaticVocabulary::seeded(seed),
        None => StaticVocabulary::new(),
    };
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    for item in vocabulary.sample(args.category, args.count) {
        writeln!(handle, "{item}")?;
    }
    Ok(())
}

fn run_init_config(args: InitConfigArgs) -> Result<(), CliError> {
    save_settings(&args.path, &Settings::default(), args.force)?;
    info!(path = %args.path.display(), "config written");
    println!("wrote {}", args.path.display());
    Ok(())
}
