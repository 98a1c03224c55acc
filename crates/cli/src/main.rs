mod render;
mod repl;

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use docstage_core::StagingConfig;
use docstage_observability::{init_tracing, LogFormat};
use docstage_session::StagingSession;

#[derive(Debug, Parser)]
#[command(name = "docstage")]
#[command(about = "Stage large text documents and inspect them piece by piece")]
struct Cli {
    /// Target chunk size in characters [default: 4000]
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Characters of context on each side of a search match [default: 200]
    #[arg(long)]
    context_radius: Option<usize>,

    /// Characters shown by peek without an explicit end [default: 1000]
    #[arg(long)]
    peek_window: Option<usize>,

    #[arg(long, env = "DOCSTAGE_LOG_FORMAT", default_value = "text")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Stage files or directories and print the document listing
    List {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Print characters --start..--end of a file
    Peek {
        path: PathBuf,
        #[arg(long, default_value_t = 0)]
        start: usize,
        #[arg(long)]
        end: Option<usize>,
    },
    /// Print the heading outline of a file, indented by level
    Headings {
        path: PathBuf,
    },
    /// Split a file into heading-aligned chunks, printed as JSON
    Chunk {
        path: PathBuf,
        #[arg(long)]
        size: Option<usize>,
    },
    /// Search files or directories for a literal, case-insensitive query
    Search {
        query: String,
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Print the section under the first heading containing the given text
    Extract {
        path: PathBuf,
        heading: String,
    },
    /// Interactive session; staged documents persist until exit
    Repl {
        #[arg(long)]
        load: Vec<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing("docstage", cli.log_format);

    let config = resolve_config(&cli);
    tracing::debug!(?config, "configuration resolved");
    let mut session = StagingSession::new(config);

    match cli.command {
        Command::List { paths } => {
            for path in &paths {
                stage_all(&mut session, path)?;
            }
            println!("{}", session.list());
        }
        Command::Peek { path, start, end } => {
            let name = stage_file(&mut session, &path)?;
            println!("{}", session.peek(&name, start, end)?);
        }
        Command::Headings { path } => {
            let name = stage_file(&mut session, &path)?;
            for title in session.headings(&name)? {
                println!("{title}");
            }
        }
        Command::Chunk { path, size } => {
            let name = stage_file(&mut session, &path)?;
            let chunks = session.chunk(&name, size)?;
            println!("{}", render::chunks_json(&chunks)?);
        }
        Command::Search { query, paths } => {
            let mut names: Vec<String> = Vec::new();
            for path in &paths {
                for name in stage_all(&mut session, path)? {
                    if !names.contains(&name) {
                        names.push(name);
                    }
                }
            }
            let matches = session.search(&query, Some(names.as_slice()))?;
            println!("{}", render::matches_json(&matches)?);
        }
        Command::Extract { path, heading } => {
            let name = stage_file(&mut session, &path)?;
            println!("{}", session.extract(&name, &heading)?);
        }
        Command::Repl { load } => {
            for path in &load {
                stage_all(&mut session, path)?;
            }
            repl::run(&mut session, io::stdin().lock(), io::stdout())?;
        }
    }

    Ok(())
}

fn resolve_config(cli: &Cli) -> StagingConfig {
    let mut config = StagingConfig::from_env();
    if let Some(size) = cli.chunk_size {
        config.chunk_size = size;
    }
    if let Some(radius) = cli.context_radius {
        config.context_radius = radius;
    }
    if let Some(window) = cli.peek_window {
        config.peek_window = window;
    }
    config
}

fn stage_file(session: &mut StagingSession, path: &Path) -> Result<String> {
    let summary = session
        .load(path)
        .with_context(|| format!("failed staging {}", path.display()))?;
    Ok(summary.name)
}

/// Stages a file, or every text file under a directory, returning the staged names.
fn stage_all(session: &mut StagingSession, path: &Path) -> Result<Vec<String>> {
    if !path.is_dir() {
        return Ok(vec![stage_file(session, path)?]);
    }

    let summaries = session
        .load_dir(path)
        .with_context(|| format!("failed staging directory {}", path.display()))?;
    Ok(summaries.into_iter().map(|summary| summary.name).collect())
}
