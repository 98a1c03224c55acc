use std::path::Path;

use docstage_core::{
    DocumentSummary, SearchMatch, StagingConfig, StagingError, StagingResult,
};
use docstage_observability::{MetricsSnapshot, SessionMetrics};
use docstage_retrieval::{extract_section, heading_outline, search, segment};
use docstage_storage::{DocumentStore, Loaded};
use tracing::{debug, info, instrument, warn};

pub const NO_DOCUMENTS: &str = "No documents loaded.";

/// Documents staged for one caller, plus the settings and counters that go with them.
#[derive(Debug, Default)]
pub struct StagingSession {
    config: StagingConfig,
    store: DocumentStore,
    metrics: SessionMetrics,
}

impl StagingSession {
    pub fn new(config: StagingConfig) -> Self {
        Self {
            config,
            store: DocumentStore::new(),
            metrics: SessionMetrics::default(),
        }
    }

    pub fn config(&self) -> &StagingConfig {
        &self.config
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn load(&mut self, path: impl AsRef<Path>) -> StagingResult<DocumentSummary> {
        let loaded = self.store.load(path)?;
        Ok(self.record_load(loaded))
    }

    #[instrument(skip(self, root), fields(root = %root.as_ref().display()))]
    pub fn load_dir(&mut self, root: impl AsRef<Path>) -> StagingResult<Vec<DocumentSummary>> {
        let loaded = self.store.load_dir(root)?;
        info!(documents = loaded.len(), "directory staged");

        Ok(loaded
            .into_iter()
            .map(|item| self.record_load(item))
            .collect())
    }

    fn record_load(&self, loaded: Loaded) -> DocumentSummary {
        self.metrics.inc_loaded();
        info!(
            name = %loaded.summary.name,
            chars = loaded.summary.char_count,
            words = loaded.summary.word_count,
            replaced = loaded.replaced,
            "document loaded"
        );
        loaded.summary
    }

    pub fn list(&self) -> String {
        if self.store.is_empty() {
            return NO_DOCUMENTS.to_string();
        }

        self.store
            .summaries()
            .iter()
            .map(DocumentSummary::listing_line)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Characters `start..end` of a document, clipped to its length.
    pub fn peek(&self, name: &str, start: usize, end: Option<usize>) -> StagingResult<String> {
        let document = self.store.get(name)?;
        let end = end.unwrap_or_else(|| start.saturating_add(self.config.peek_window));

        Ok(document
            .text
            .chars()
            .skip(start)
            .take(end.saturating_sub(start))
            .collect())
    }

    pub fn headings(&self, name: &str) -> StagingResult<Vec<String>> {
        let document = self.store.get(name)?;
        Ok(heading_outline(&document.text))
    }

    #[instrument(skip(self))]
    pub fn chunk(&self, name: &str, size: Option<usize>) -> StagingResult<Vec<String>> {
        let document = self.store.get(name)?;
        let size = size.unwrap_or(self.config.chunk_size);

        let chunks = segment(&document.text, size);
        self.metrics.add_chunks(chunks.len());
        debug!(chunks = chunks.len(), size, "document segmented");

        Ok(chunks)
    }

    /// Searches all staged documents in load order, or only `names` in the order given.
    #[instrument(skip(self, names))]
    pub fn search(&self, query: &str, names: Option<&[String]>) -> StagingResult<Vec<SearchMatch>> {
        let hits = match names {
            Some(names) => {
                let documents = names
                    .iter()
                    .map(|name| self.store.get(name))
                    .collect::<StagingResult<Vec<_>>>()?;
                search(query, documents, self.config.context_radius)?
            }
            None => search(query, self.store.iter(), self.config.context_radius)?,
        };

        self.metrics.observe_search(hits.len());
        debug!(matches = hits.len(), "search finished");
        Ok(hits)
    }

    #[instrument(skip(self))]
    pub fn extract(&self, name: &str, heading: &str) -> StagingResult<String> {
        let document = self.store.get(name)?;

        match extract_section(&document.text, heading) {
            Some(section) => {
                self.metrics.inc_extracted();
                Ok(section.to_string())
            }
            None => {
                self.metrics.inc_section_miss();
                warn!("section not found");
                Err(StagingError::SectionNotFound {
                    document: name.to_string(),
                    heading: heading.to_string(),
                })
            }
        }
    }

    pub fn stats(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}
