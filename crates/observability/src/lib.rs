use std::io;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use once_cell::sync::OnceCell;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

static TRACING_INIT: OnceCell<()> = OnceCell::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format: {other}")),
        }
    }
}

/// Counters for one staging session.
#[derive(Debug, Default)]
pub struct SessionMetrics {
    documents_loaded: AtomicU64,
    chunks_emitted: AtomicU64,
    searches_total: AtomicU64,
    search_matches_total: AtomicU64,
    sections_extracted: AtomicU64,
    section_misses: AtomicU64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub documents_loaded: u64,
    pub chunks_emitted: u64,
    pub searches_total: u64,
    pub search_matches_total: u64,
    pub sections_extracted: u64,
    pub section_misses: u64,
}

impl SessionMetrics {
    pub fn inc_loaded(&self) {
        self.documents_loaded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_chunks(&self, chunks: usize) {
        self.chunks_emitted
            .fetch_add(chunks as u64, Ordering::Relaxed);
    }

    pub fn observe_search(&self, matches: usize) {
        self.searches_total.fetch_add(1, Ordering::Relaxed);
        self.search_matches_total
            .fetch_add(matches as u64, Ordering::Relaxed);
    }

    pub fn inc_extracted(&self) {
        self.sections_extracted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_section_miss(&self) {
        self.section_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            documents_loaded: self.documents_loaded.load(Ordering::Relaxed),
            chunks_emitted: self.chunks_emitted.load(Ordering::Relaxed),
            searches_total: self.searches_total.load(Ordering::Relaxed),
            search_matches_total: self.search_matches_total.load(Ordering::Relaxed),
            sections_extracted: self.sections_extracted.load(Ordering::Relaxed),
            section_misses: self.section_misses.load(Ordering::Relaxed),
        }
    }
}

/// Installs the global subscriber once; later calls are no-ops.
///
/// Output goes to stderr so stdout stays free for command results.
pub fn init_tracing(service_name: &str, format: LogFormat) {
    TRACING_INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}=info,docstage_session=info",
                service_name
            ))
        });

        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr);

        match format {
            LogFormat::Text => builder.with_target(false).init(),
            LogFormat::Json => builder
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .init(),
        }
    });
}
