use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use resumatch::core::{ConfigManager, EvaluationClient, FsOps};
use resumatch::form::{BatchForm, DirectorySelection, SingleForm};
use resumatch::render::terminal::{render_batch, render_single};
use resumatch::render::OutputFormat;
use resumatch::{app_log, start_web_server};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "resumatch")]
#[command(about = "Match resumes against a job description using a ResuMatch backend")]
struct Cli {
    /// Configuration file (defaults to ./resumatch.yaml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Backend base URL, overriding configuration
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
#[group(multiple = false)]
struct JobArgs {
    /// Job description text
    #[arg(long)]
    job: Option<String>,

    /// File containing the job description
    #[arg(long)]
    job_file: Option<PathBuf>,
}

impl JobArgs {
    async fn resolve(&self) -> Result<String> {
        match (&self.job, &self.job_file) {
            (Some(text), _) => Ok(text.clone()),
            (None, Some(path)) => FsOps::read_text(path).await,
            (None, None) => Ok(String::new()),
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate every PDF in a directory and list the candidates above the threshold
    Batch {
        /// Directory containing resumes; asked for interactively when omitted
        #[arg(long)]
        dir: Option<PathBuf>,
        #[command(flatten)]
        job: JobArgs,
        /// Minimum match score (0-100)
        #[arg(long)]
        threshold: Option<String>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Evaluate a single PDF resume
    Single {
        resume: PathBuf,
        #[command(flatten)]
        job: JobArgs,
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Serve the web front end
    Serve {
        #[arg(long)]
        port: Option<u16>,
    },
}

fn init_logging(log_file: Option<&Path>, default_directive: &str) -> Result<()> {
    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true) // Clear file on startup
                .open(path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;
            Some(
                fmt::layer()
                    .json()
                    .with_writer(Mutex::new(file))
                    .with_current_span(false)
                    .with_span_list(false),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_directive)),
        )
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    Ok(())
}

async fn prompt_directory() -> Result<Option<String>> {
    let mut stderr = tokio::io::stderr();
    stderr
        .write_all(b"Directory with resumes (PDF files only): ")
        .await?;
    stderr.flush().await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    Ok(lines.next_line().await?)
}

async fn run_batch(
    config: &ConfigManager,
    dir: Option<PathBuf>,
    job: JobArgs,
    threshold: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let mut form = BatchForm::new(config.default_threshold);
    if let Some(threshold) = threshold {
        form.set_threshold(&threshold)?;
    }

    let answer = match dir {
        Some(dir) => Some(dir.to_string_lossy().into_owned()),
        None => prompt_directory().await?,
    };
    match form.select_directory(answer.as_deref()).await {
        DirectorySelection::Selected(dir) => {
            app_log!(debug, "Selected directory: {}", dir.display());
            eprintln!("Selected: {}", form.directory_name().unwrap_or_default());
        }
        DirectorySelection::Cancelled => return Ok(()),
        DirectorySelection::Rejected => {
            anyhow::bail!("{}", form.error().unwrap_or_default());
        }
    }

    form.set_job_description(job.resolve().await?);

    let client = EvaluationClient::from_config(&config.service)?;
    let threshold = form.threshold();
    let results = form.submit(&client).await.map_err(anyhow::Error::msg)?;

    println!("{}", render_batch(results, threshold, format)?);
    Ok(())
}

async fn run_single(
    config: &ConfigManager,
    resume: PathBuf,
    job: JobArgs,
    format: OutputFormat,
) -> Result<()> {
    let mut form = SingleForm::default();
    form.set_resume(resume);
    form.set_job_description(job.resolve().await?);

    let client = EvaluationClient::from_config(&config.service)?;
    let result = form.submit(&client).await.map_err(anyhow::Error::msg)?;

    println!("{}", render_single(result, format)?);
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = ConfigManager::load(cli.config.as_deref())?;
    if let Some(url) = cli.api_url {
        config.service.base_url = url;
    }

    let default_directive = match cli.command {
        Command::Serve { .. } => "resumatch=info",
        _ => "resumatch=warn",
    };
    init_logging(config.log_file.as_deref(), default_directive)?;
    app_log!(info, "Loaded configuration for environment: {}", config.environment);
    app_log!(info, "Evaluation service: {}", config.service.base_url);

    match cli.command {
        Command::Batch {
            dir,
            job,
            threshold,
            format,
        } => run_batch(&config, dir, job, threshold, format).await,
        Command::Single {
            resume,
            job,
            format,
        } => run_single(&config, resume, job, format).await,
        Command::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            start_web_server(&config).await
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}
