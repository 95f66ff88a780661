use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pyrosift::classify::ClassifyOutcome;
use pyrosift::llm::prompts::SAMPLE_ABSTRACT;
use pyrosift::{
    BatchRunner, Classifier, ColumnSpec, Config, OllamaProvider, PromptTemplate, RunStore,
};

#[derive(Parser, Debug)]
#[command(name = "pyrosift")]
#[command(version = "0.1.0")]
#[command(about = "Screen paper abstracts for plastic-pyrolysis relevance with a local LLM")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the prompt over every row of a CSV file
    Batch {
        /// Input CSV file
        #[arg(long)]
        csv: PathBuf,

        /// Column containing the text to classify
        #[arg(long, default_value = "QWEN_INPUT")]
        text_col: String,

        /// Column containing the paper title (use together with --abstract-col)
        #[arg(long)]
        title_col: Option<String>,

        /// Column containing the paper abstract (use together with --title-col)
        #[arg(long)]
        abstract_col: Option<String>,

        /// Column whose value names each per-row output folder
        #[arg(long)]
        name_col: Option<String>,

        /// Prompt template file (with <<<ABSTRACT>>> placeholder)
        #[arg(long)]
        prompt: PathBuf,

        /// Ollama model name (defaults to PYROSIFT_MODEL)
        #[arg(long)]
        model: Option<String>,

        /// Root output directory
        #[arg(long, default_value = "results_csv")]
        outdir: PathBuf,

        /// Only process the first N rows
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Classify a single abstract and print the typed verdict
    Classify {
        /// File with the abstract text (built-in sample abstract when omitted)
        #[arg(long, value_name = "FILE")]
        abstract_file: Option<PathBuf>,

        /// Prompt template file (built-in classification prompt when omitted)
        #[arg(long)]
        prompt: Option<PathBuf>,

        /// Ollama model name (defaults to PYROSIFT_MODEL)
        #[arg(long)]
        model: Option<String>,

        /// Root output directory
        #[arg(long, default_value = "results")]
        outdir: PathBuf,

        /// Output format (json, text)
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("pyrosift=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = Config::from_env()?;
    let provider = OllamaProvider::new(&config.ollama_host, config.request_timeout_secs)?;

    match args.command {
        Command::Batch {
            csv,
            text_col,
            title_col,
            abstract_col,
            name_col,
            prompt,
            model,
            outdir,
            limit,
        } => {
            let template = PromptTemplate::from_file(&prompt)?;
            let store = RunStore::new(&outdir)?;
            let model = model.unwrap_or_else(|| config.model.clone());

            let spec = ColumnSpec {
                text_col,
                title_col,
                abstract_col,
                name_col,
            };

            let runner = BatchRunner::new(provider, template, store, model);
            let report = runner.run(&csv, &spec, limit).await?;

            if !report.failures.is_empty() {
                tracing::warn!(
                    "{} row(s) failed, see {}",
                    report.rows_failed(),
                    outdir.join(pyrosift::storage::FAIL_LOG).display()
                );
            }
        }

        Command::Classify {
            abstract_file,
            prompt,
            model,
            outdir,
            format,
        } => {
            let template = match prompt {
                Some(path) => PromptTemplate::from_file(&path)?,
                None => PromptTemplate::classify_default(),
            };

            let abstract_text = match abstract_file {
                Some(path) => std::fs::read_to_string(&path)?.trim().to_string(),
                None => {
                    tracing::info!("No abstract file given, using built-in sample abstract");
                    SAMPLE_ABSTRACT.to_string()
                }
            };

            let store = RunStore::new(&outdir)?;
            let model = model.unwrap_or_else(|| config.model.clone());

            let classifier = Classifier::new(provider, template, model);
            let outcome = classifier.classify_and_save(&abstract_text, &store).await?;

            output_verdict(&outcome, &format)?;
        }
    }

    Ok(())
}

fn output_verdict(outcome: &ClassifyOutcome, format: &str) -> anyhow::Result<()> {
    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&outcome.classification)?),
        _ => {
            println!("pyrolysis_related: {}", outcome.classification.pyrolysis_related);
            println!("reason: {}", outcome.classification.reason);
            println!("artifacts: {}", outcome.run_dir.display());
        }
    }

    Ok(())
}
