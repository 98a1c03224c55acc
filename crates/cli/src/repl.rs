use std::io::{BufRead, Write};

use anyhow::Result;
use docstage_session::StagingSession;

use crate::render;

const HELP: &str = "\
commands:
  load <path>                    stage a file (reloading a name replaces it)
  load-dir <path>                stage every .md/.markdown/.txt file under a directory
  list                           staged documents with sizes
  peek <doc> [start] [end]       characters start..end of a document
  headings <doc>                 heading outline
  chunk <doc> [size]             split a document into chunks
  search <query...>              case-insensitive search across staged documents
  extract <doc> <heading...>     section under the first matching heading
  stats                          session counters
  exit | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Load(String),
    LoadDir(String),
    List,
    Peek {
        doc: String,
        start: usize,
        end: Option<usize>,
    },
    Headings(String),
    Chunk {
        doc: String,
        size: Option<usize>,
    },
    Search(String),
    Extract {
        doc: String,
        heading: String,
    },
    Stats,
    Help,
    Exit,
    Blank,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

pub fn parse_line(line: &str) -> Result<ReplCommand, String> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_lowercase().as_str() {
        "" => ReplCommand::Blank,
        "load" => ReplCommand::Load(required(rest, "load <path>")?),
        "load-dir" => ReplCommand::LoadDir(required(rest, "load-dir <path>")?),
        "list" | "ls" => ReplCommand::List,
        "peek" => {
            let mut args = rest.split_whitespace();
            let doc = args.next().ok_or("usage: peek <doc> [start] [end]")?;
            let start = args.next().map(parse_number).transpose()?.unwrap_or(0);
            let end = args.next().map(parse_number).transpose()?;
            ReplCommand::Peek {
                doc: doc.to_string(),
                start,
                end,
            }
        }
        "headings" => ReplCommand::Headings(required(rest, "headings <doc>")?),
        "chunk" => {
            let mut args = rest.split_whitespace();
            let doc = args.next().ok_or("usage: chunk <doc> [size]")?;
            let size = args.next().map(parse_number).transpose()?;
            ReplCommand::Chunk {
                doc: doc.to_string(),
                size,
            }
        }
        "search" => ReplCommand::Search(required(rest, "search <query>")?),
        "extract" => {
            let (doc, heading) = rest
                .split_once(char::is_whitespace)
                .ok_or("usage: extract <doc> <heading>")?;
            ReplCommand::Extract {
                doc: doc.to_string(),
                heading: heading.trim().to_string(),
            }
        }
        "stats" => ReplCommand::Stats,
        "help" | "?" => ReplCommand::Help,
        "exit" | "quit" => ReplCommand::Exit,
        other => return Err(format!("unknown command '{other}', try 'help'")),
    };

    Ok(command)
}

fn required(rest: &str, usage: &str) -> Result<String, String> {
    if rest.is_empty() {
        Err(format!("usage: {usage}"))
    } else {
        Ok(rest.to_string())
    }
}

fn parse_number(raw: &str) -> Result<usize, String> {
    raw.parse::<usize>()
        .map_err(|_| format!("expected a non-negative number, got '{raw}'"))
}

/// Reads commands until `exit` or end of input. Command failures are printed
/// as `ERROR: ...` lines and the loop keeps going.
pub fn run(session: &mut StagingSession, input: impl BufRead, mut out: impl Write) -> Result<()> {
    writeln!(out, "docstage repl. type 'help' for commands, 'exit' to quit.")?;

    let mut lines = input.lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next() else {
            writeln!(out)?;
            break;
        };
        let line = line?;

        let flow = match parse_line(&line) {
            Ok(command) => execute(session, command, &mut out)?,
            Err(message) => {
                writeln!(out, "ERROR: {message}")?;
                Flow::Continue
            }
        };

        if flow == Flow::Stop {
            break;
        }
    }

    Ok(())
}

fn execute(session: &mut StagingSession, command: ReplCommand, out: &mut impl Write) -> Result<Flow> {
    let rendered = match command {
        ReplCommand::Blank => return Ok(Flow::Continue),
        ReplCommand::Exit => return Ok(Flow::Stop),
        ReplCommand::Help => Ok(HELP.to_string()),
        ReplCommand::Load(path) => session
            .load(&path)
            .map(|summary| format!("Loaded {summary}")),
        ReplCommand::LoadDir(path) => session.load_dir(&path).map(|summaries| {
            summaries
                .iter()
                .map(|summary| format!("Loaded {summary}"))
                .collect::<Vec<_>>()
                .join("\n")
        }),
        ReplCommand::List => Ok(session.list()),
        ReplCommand::Peek { doc, start, end } => session.peek(&doc, start, end),
        ReplCommand::Headings(doc) => session.headings(&doc).map(|titles| titles.join("\n")),
        ReplCommand::Chunk { doc, size } => match session.chunk(&doc, size) {
            Ok(chunks) => Ok(render::chunks_json(&chunks)?),
            Err(err) => Err(err),
        },
        ReplCommand::Search(query) => match session.search(&query, None) {
            Ok(matches) => Ok(render::matches_json(&matches)?),
            Err(err) => Err(err),
        },
        ReplCommand::Extract { doc, heading } => session.extract(&doc, &heading),
        ReplCommand::Stats => Ok(serde_json::to_string_pretty(&session.stats())?),
    };

    match rendered {
        Ok(text) => writeln!(out, "{text}")?,
        Err(err) => writeln!(out, "ERROR: {err}")?,
    }

    Ok(Flow::Continue)
}
